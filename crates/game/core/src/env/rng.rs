//! RNG oracle for deterministic random number generation.
//!
//! The engine draws randomness in exactly four places: critical hits (hero
//! and enemy), flee attempts, and loot rolls (chance and quantity). Each draw
//! asks the oracle for a value derived from a per-draw seed built by
//! [`compute_seed`], so a run is fully reproducible from its game seed and a
//! test can substitute [`FixedRng`] to force an outcome.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform roll in `[0, 1)`.
    fn roll_unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG random number generator (PCG-XSH-RR, 32-bit output from 64-bit state).
///
/// Stateless: every call performs one LCG step from the given seed and
/// permutes the result, so the same seed always yields the same value.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that returns the same value for every seed.
///
/// Used to force critical hits, flee results and loot rolls in tests and
/// tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl FixedRng {
    /// Every roll lands at the bottom of the range: all chances succeed.
    pub const LOWEST: Self = Self(0);
    /// Every roll lands at the top of the range: all chances fail.
    pub const HIGHEST: Self = Self(u32::MAX);

    /// Oracle whose [`RngOracle::roll_unit`] returns approximately `roll`.
    pub fn unit(roll: f64) -> Self {
        Self((roll.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u32)
    }
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Named random draws. Each maps to a distinct seed context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollKind {
    HeroCritical = 1,
    EnemyCritical = 2,
    Flee = 3,
    LootChance = 4,
    LootQuantity = 5,
}

impl RollKind {
    /// Seed context for the `index`-th draw of this kind within one turn.
    pub const fn context(self, index: u32) -> u32 {
        (index << 8) | self as u32
    }
}

/// Compute deterministic seed from game state components.
///
/// * `game_seed` - Base seed chosen when the run starts
/// * `nonce` - Index of the action being resolved
/// * `actor_id` - 0 for the hero, 1 for the world (enemies, chests)
/// * `context` - Distinguishes independent draws within one action
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor_id).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
