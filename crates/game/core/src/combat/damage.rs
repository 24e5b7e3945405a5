//! Damage and escape math.

/// Offensive side of a single blow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Strike {
    pub attack: u32,
    /// Probability in `[0, 1]` that the blow is critical.
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

/// Defensive side of a single blow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Guard {
    pub defense: u32,
    /// Defending halves the damage taken.
    pub defending: bool,
}

/// Outcome of [`calculate_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DamageResult {
    /// Damage after the critical multiplier, before blocking.
    pub raw_damage: u32,
    /// Damage actually dealt. Never below 1.
    pub actual_damage: u32,
    pub is_critical: bool,
    pub is_blocked: bool,
    pub damage_blocked: u32,
}

/// Calculate damage for one blow.
///
/// # Formula
///
/// ```text
/// base   = max(1, attack - floor(defense / 2))
/// raw    = critical ? floor(base * crit_multiplier) : base
/// actual = max(1, defending ? floor(raw * 0.5) : raw)
/// ```
///
/// `roll` is a uniform draw in `[0, 1)`; the blow is critical when
/// `roll < crit_chance`.
pub fn calculate_damage(strike: &Strike, guard: &Guard, roll: f64) -> DamageResult {
    let base = strike.attack.saturating_sub(guard.defense / 2).max(1);

    let is_critical = roll < strike.crit_chance;
    let raw_damage = if is_critical {
        (f64::from(base) * strike.crit_multiplier).floor() as u32
    } else {
        base
    };

    let (actual_damage, damage_blocked) = if guard.defending {
        let halved = raw_damage / 2;
        (halved.max(1), halved)
    } else {
        (raw_damage.max(1), 0)
    };

    DamageResult {
        raw_damage,
        actual_damage,
        is_critical,
        is_blocked: guard.defending,
        damage_blocked,
    }
}

/// Probability that the hero escapes combat.
///
/// `0.5 + 0.05 * (hero_speed - enemy_speed)`, clamped to `[0.1, 0.95]`.
pub fn flee_chance(hero_speed: u32, enemy_speed: u32) -> f64 {
    let diff = i64::from(hero_speed) - i64::from(enemy_speed);
    (0.5 + 0.05 * diff as f64).clamp(0.1, 0.95)
}
