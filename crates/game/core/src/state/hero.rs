use crate::combat::{HeroStats, hero_stats_for_level};
use crate::state::{Equipment, StatusEffects};

/// The hero record of an RPG run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HeroState {
    pub stats: HeroStats,
    pub status_effects: StatusEffects,
}

impl HeroState {
    pub fn new(level: u32) -> Self {
        Self {
            stats: hero_stats_for_level(level),
            status_effects: StatusEffects::new(),
        }
    }

    /// Base attack plus weapon bonus and buffs, never below 1.
    pub fn total_attack(&self, equipped: &Equipment) -> u32 {
        let total = i64::from(self.stats.attack)
            + i64::from(equipped.attack_bonus())
            + self.status_effects.attack_modifier();
        total.max(1) as u32
    }

    /// Base defense plus armor bonuses and buffs, never below 0.
    pub fn total_defense(&self, equipped: &Equipment) -> u32 {
        let total = i64::from(self.stats.defense)
            + i64::from(equipped.defense_bonus())
            + self.status_effects.defense_modifier();
        total.max(0) as u32
    }

    pub fn crit_chance(&self, equipped: &Equipment) -> f64 {
        self.stats.crit_chance + equipped.crit_bonus()
    }
}
