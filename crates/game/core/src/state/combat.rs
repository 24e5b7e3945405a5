//! Encounter bookkeeping.

use crate::combat::DamageResult;
use crate::state::StatusEffect;

/// Side taking a combat turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Combatant {
    Hero,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatMove {
    Attack,
    Defend,
    Flee,
    UseItem,
}

/// One resolved combat turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombatOutcome {
    pub success: bool,
    /// `"hero"` or the enemy id.
    pub attacker: String,
    pub defender: String,
    pub action: CombatMove,
    pub damage: Option<DamageResult>,
    pub effects_applied: Vec<StatusEffect>,
    pub message: String,
}

impl CombatOutcome {
    pub const HERO: &'static str = "hero";

    pub fn new(
        action: CombatMove,
        attacker: impl Into<String>,
        defender: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            attacker: attacker.into(),
            defender: defender.into(),
            action,
            damage: None,
            effects_applied: Vec::new(),
            message: message.into(),
        }
    }

    pub fn with_damage(mut self, damage: DamageResult) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effects_applied.push(effect);
        self
    }

    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}

/// Active encounter with a single enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombatState {
    pub enemy_id: String,
    pub enemy_current_hp: u32,
    pub enemy_max_hp: u32,
    /// Faster side first; ties go to the hero.
    pub turn_order: [Combatant; 2],
    pub current_turn_index: usize,
    pub combat_log: Vec<CombatOutcome>,
    pub hero_is_defending: bool,
    pub turn_count: u32,
}

impl CombatState {
    pub fn new(enemy_id: impl Into<String>, enemy_hp: u32, enemy_max_hp: u32, hero_first: bool) -> Self {
        let turn_order = if hero_first {
            [Combatant::Hero, Combatant::Enemy]
        } else {
            [Combatant::Enemy, Combatant::Hero]
        };
        Self {
            enemy_id: enemy_id.into(),
            enemy_current_hp: enemy_hp,
            enemy_max_hp,
            turn_order,
            current_turn_index: 0,
            combat_log: Vec::new(),
            hero_is_defending: false,
            turn_count: 0,
        }
    }

    pub fn hero_goes_first(&self) -> bool {
        self.turn_order[0] == Combatant::Hero
    }

    pub fn record(&mut self, outcome: CombatOutcome) {
        self.combat_log.push(outcome);
    }
}
