//! Deterministic run-level RNG streams.
//!
//! # Determinism strategy
//!
//! Each run owns exactly two independent `SmallRng` streams, both derived from
//! the run seed:
//!
//! - `movement` — wander-angle draws.  Every mobile agent draws the same
//!   number of values per movement step whether or not its branch uses them,
//!   so the stream position depends only on how many movers acted.
//! - `chance` — Bernoulli reproduction draws, creation-time noise (lifespan,
//!   grass jitter, initial heading) and random placement.
//!
//! Keeping these apart means a change in reproduction outcomes never shifts
//! the movement stream of an unrelated agent.  Nothing here is global: two
//! runs with different seeds can execute on different threads with no
//! shared state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{Rect, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Stream offsets fed to [`SimRng::child`].
const MOVEMENT_STREAM: u64 = 1;
const CHANCE_STREAM: u64 = 2;

// ── SimRng ────────────────────────────────────────────────────────────────────

/// A single seeded random stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform `f64` in `[low, high]`.  Degenerate ranges return `low`.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high > low { self.0.gen_range(low..=high) } else { low }
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// One draw from N(mean, sd).  A zero deviation returns `mean` exactly.
    pub fn gauss(&mut self, mean: f64, sd: f64) -> f64 {
        match Normal::new(mean, sd) {
            Ok(normal) if sd > 0.0 => normal.sample(&mut self.0),
            _ => mean,
        }
    }

    /// Uniform point inside `rect`.
    pub fn point_in(&mut self, rect: Rect) -> Vec2 {
        Vec2::new(
            self.uniform(rect.min.x, rect.max.x),
            self.uniform(rect.min.y, rect.max.y),
        )
    }

    /// Uniformly oriented vector of length `speed`.
    pub fn heading(&mut self, speed: f64) -> Vec2 {
        Vec2::from_angle(self.uniform(0.0, 360.0)) * speed
    }
}

// ── RunRngs ───────────────────────────────────────────────────────────────────

/// The two random streams owned by one simulation run.
pub struct RunRngs {
    /// Wander-angle draws only.
    pub movement: SimRng,
    /// Reproduction draws, creation noise and placement.
    pub chance:   SimRng,
}

impl RunRngs {
    /// Derive both streams from the run seed.
    pub fn new(seed: u64) -> Self {
        let mut root = SimRng::new(seed);
        let movement = root.child(MOVEMENT_STREAM);
        let chance = root.child(CHANCE_STREAM);
        Self { movement, chance }
    }
}
