//! Timed status effects.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusEffectKind {
    Poison,
    Burn,
    Freeze,
    Stun,
    BuffAttack,
    BuffDefense,
    DebuffAttack,
    DebuffDefense,
    Regen,
}

impl StatusEffectKind {
    /// Effects removed by a cure.
    pub const fn is_harmful(self) -> bool {
        matches!(
            self,
            Self::Poison
                | Self::Burn
                | Self::Freeze
                | Self::Stun
                | Self::DebuffAttack
                | Self::DebuffDefense
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatusEffect {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: StatusEffectKind,
    /// Remaining turns, counting the current one.
    pub duration: u32,
    pub value: u32,
    /// Item id or enemy id that applied the effect.
    pub source: String,
}

impl StatusEffect {
    pub fn new(kind: StatusEffectKind, duration: u32, value: u32, source: impl Into<String>) -> Self {
        Self {
            kind,
            duration,
            value,
            source: source.into(),
        }
    }
}

/// Effects currently applied to the hero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { EngineConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Applies an effect. When every slot is taken the effect closest to
    /// expiring is replaced.
    pub fn push(&mut self, effect: StatusEffect) {
        if let Err(err) = self.effects.try_push(effect) {
            let shortest = self
                .effects
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.duration)
                .map(|(index, _)| index);
            if let Some(index) = shortest {
                self.effects[index] = err.element();
            }
        }
    }

    /// Net attack change from buffs and debuffs.
    pub fn attack_modifier(&self) -> i64 {
        self.modifier(StatusEffectKind::BuffAttack, StatusEffectKind::DebuffAttack)
    }

    /// Net defense change from buffs and debuffs.
    pub fn defense_modifier(&self) -> i64 {
        self.modifier(StatusEffectKind::BuffDefense, StatusEffectKind::DebuffDefense)
    }

    fn modifier(&self, buff: StatusEffectKind, debuff: StatusEffectKind) -> i64 {
        self.effects
            .iter()
            .map(|e| {
                if e.kind == buff {
                    i64::from(e.value)
                } else if e.kind == debuff {
                    -i64::from(e.value)
                } else {
                    0
                }
            })
            .sum()
    }

    /// Advances every effect by one turn and returns the resulting HP change.
    ///
    /// Poison and burn drain their value, regen restores it. Effects with more
    /// than one turn left count down, the rest expire.
    pub fn tick(&mut self) -> i64 {
        let mut hp_change = 0;
        for effect in &self.effects {
            match effect.kind {
                StatusEffectKind::Poison | StatusEffectKind::Burn => {
                    hp_change -= i64::from(effect.value)
                }
                StatusEffectKind::Regen => hp_change += i64::from(effect.value),
                _ => {}
            }
        }
        self.effects.retain(|e| e.duration > 1);
        for effect in &mut self.effects {
            effect.duration -= 1;
        }
        hp_change
    }

    /// Removes every harmful effect. Returns how many were removed.
    pub fn cure(&mut self) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| !e.kind.is_harmful());
        before - self.effects.len()
    }
}
