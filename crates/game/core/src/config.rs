/// Engine configuration constants and tunable parameters.
///
/// Every field has a default matching the reference game balance, so a TOML
/// file only needs to list the values it overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Upper bound on actions simulated per run.
    pub max_actions: usize,
    /// Inventory capacity of a fresh hero.
    pub inventory_slots: usize,
    /// Level of a fresh hero.
    pub starting_level: u32,
    /// Step budget of the breadth-first pathfinder.
    pub pathfind_max_steps: usize,
    /// Duration of buffs applied from consumables during combat.
    pub combat_buff_duration: u32,
    /// Duration of buffs applied from consumables outside combat.
    pub field_buff_duration: u32,
    pub enemy_crit_chance: f64,
    pub enemy_crit_multiplier: f64,
    /// Share of an item's value paid when selling it, in percent.
    pub sell_ratio_percent: u32,
    /// Turns an item drop stays on the ground. Zero keeps drops forever.
    pub drop_despawn_turns: u64,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MIN_GRID_SIZE: u32 = 3;
    pub const MAX_GRID_SIZE: u32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ACTIONS: usize = 200;
    pub const DEFAULT_INVENTORY_SLOTS: usize = 20;
    pub const DEFAULT_STARTING_LEVEL: u32 = 1;
    pub const DEFAULT_PATHFIND_MAX_STEPS: usize = 100;
    pub const DEFAULT_COMBAT_BUFF_DURATION: u32 = 3;
    pub const DEFAULT_FIELD_BUFF_DURATION: u32 = 5;
    pub const DEFAULT_ENEMY_CRIT_CHANCE: f64 = 0.05;
    pub const DEFAULT_ENEMY_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_SELL_RATIO_PERCENT: u32 = 50;

    pub fn new() -> Self {
        Self {
            max_actions: Self::DEFAULT_MAX_ACTIONS,
            inventory_slots: Self::DEFAULT_INVENTORY_SLOTS,
            starting_level: Self::DEFAULT_STARTING_LEVEL,
            pathfind_max_steps: Self::DEFAULT_PATHFIND_MAX_STEPS,
            combat_buff_duration: Self::DEFAULT_COMBAT_BUFF_DURATION,
            field_buff_duration: Self::DEFAULT_FIELD_BUFF_DURATION,
            enemy_crit_chance: Self::DEFAULT_ENEMY_CRIT_CHANCE,
            enemy_crit_multiplier: Self::DEFAULT_ENEMY_CRIT_MULTIPLIER,
            sell_ratio_percent: Self::DEFAULT_SELL_RATIO_PERCENT,
            drop_despawn_turns: 0,
        }
    }

    pub fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }

    /// Gold paid for one unit of an item worth `value`.
    pub fn sell_price(&self, value: u32) -> u32 {
        (u64::from(value) * u64::from(self.sell_ratio_percent) / 100) as u32
    }

    /// Turn at which a drop created at `turn` disappears, if drops expire.
    pub fn drop_despawn_turn(&self, turn: u64) -> Option<u64> {
        (self.drop_despawn_turns > 0).then(|| turn + self.drop_despawn_turns)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
