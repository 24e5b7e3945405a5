//! Hero progression and enemy scaling.

/// Total XP required to advance from `level` to `level + 1`.
///
/// `floor(100 * 1.5^(level - 1))`
pub fn xp_for_level(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as i32;
    (100.0 * 1.5_f64.powi(exponent)).floor() as u64
}

/// Hero stat block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HeroStats {
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub current_mp: u32,
    pub max_mp: u32,
    pub current_xp: u64,
    pub xp_to_next_level: u64,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
}

impl HeroStats {
    pub fn is_dead(&self) -> bool {
        self.current_hp == 0
    }

    /// Applies a signed HP change, clamped to `[0, max_hp]`.
    pub fn adjust_hp(&mut self, delta: i64) {
        self.current_hp = clamp_meter(self.current_hp, delta, self.max_hp);
    }

    /// Applies a signed MP change, clamped to `[0, max_mp]`.
    pub fn adjust_mp(&mut self, delta: i64) {
        self.current_mp = clamp_meter(self.current_mp, delta, self.max_mp);
    }

    pub fn missing_hp(&self) -> u32 {
        self.max_hp - self.current_hp.min(self.max_hp)
    }

    pub fn missing_mp(&self) -> u32 {
        self.max_mp - self.current_mp.min(self.max_mp)
    }

    /// Adds XP and applies every level-up it pays for.
    ///
    /// Each level-up recomputes stats for the new level and restores HP and
    /// MP to full. Returns the number of levels gained.
    pub fn gain_xp(&mut self, xp: u64) -> u32 {
        self.current_xp += xp;
        let mut gained = 0;
        while self.current_xp >= self.xp_to_next_level {
            self.current_xp -= self.xp_to_next_level;
            let carry = self.current_xp;
            *self = hero_stats_for_level(self.level + 1);
            self.current_xp = carry;
            gained += 1;
        }
        gained
    }
}

fn clamp_meter(current: u32, delta: i64, max: u32) -> u32 {
    (i64::from(current) + delta).clamp(0, i64::from(max)) as u32
}

/// Full-health stat block for a hero of `level`.
///
/// ```text
/// HP  = 100 + 10(n-1)      MP  = 50 + 5(n-1)
/// ATK = 10 + 2(n-1)        DEF = 5 + (n-1)
/// SPD = 5 + floor((n-1)/2) crit = 0.05 + 0.005(n-1), x1.5
/// ```
pub fn hero_stats_for_level(level: u32) -> HeroStats {
    let level = level.max(1);
    let n = level - 1;
    let max_hp = 100 + 10 * n;
    let max_mp = 50 + 5 * n;
    HeroStats {
        level,
        current_hp: max_hp,
        max_hp,
        current_mp: max_mp,
        max_mp,
        current_xp: 0,
        xp_to_next_level: xp_for_level(level),
        attack: 10 + 2 * n,
        defense: 5 + n,
        speed: 5 + n / 2,
        crit_chance: 0.05 + 0.005 * f64::from(n),
        crit_multiplier: 1.5,
    }
}

/// Base combat numbers of an enemy type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemyStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub crit_chance: f64,
}

/// Scales base enemy stats to `level`.
///
/// HP grows 15%, attack 10% and defense 8% per level above 1 (floored);
/// speed and crit chance are unchanged.
pub fn scale_enemy_stats(base: &EnemyStats, level: u32) -> EnemyStats {
    let n = f64::from(level.max(1) - 1);
    let scale = |value: u32, per_level: f64| (f64::from(value) * (1.0 + per_level * n)).floor() as u32;
    EnemyStats {
        max_hp: scale(base.max_hp, 0.15),
        attack: scale(base.attack, 0.1),
        defense: scale(base.defense, 0.08),
        speed: base.speed,
        crit_chance: base.crit_chance,
    }
}
