//! Combat formulas.
//!
//! Pure, deterministic functions shared by the world simulator. Randomness is
//! never drawn here: callers pass the unit roll in `[0, 1)` they obtained from
//! the RNG oracle, which keeps every formula testable with fixed inputs.
//!
//! - `xp_for_level` / `hero_stats_for_level`: hero progression curve
//! - `scale_enemy_stats`: level scaling for spawned enemies
//! - `calculate_damage`: base damage, critical hits and defending
//! - `flee_chance`: speed-based escape probability

pub mod damage;
pub mod progression;

pub use damage::{DamageResult, Guard, Strike, calculate_damage, flee_chance};
pub use progression::{EnemyStats, HeroStats, hero_stats_for_level, scale_enemy_stats, xp_for_level};
