//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter owned by one run.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick / ticks_per_second
//!
//! The default resolution is 60 ticks per second, so a creature lifespan of
//! 10 800 ticks is three simulated minutes.  Every rule in the decision engine
//! counts ticks; seconds exist only for human-readable progress output.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The per-run tick counter plus its conversion to simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many ticks make one simulated second.  Default: 60.
    pub ticks_per_second: u32,
    /// The current tick — advanced by `SimClock::advance()` once per tick.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self { ticks_per_second, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 / self.ticks_per_second.max(1) as f64
    }

    /// Break elapsed time into (minutes, seconds) for progress output.
    pub fn elapsed_ms(&self) -> (u64, f64) {
        let secs = self.elapsed_secs();
        let minutes = (secs / 60.0).floor();
        (minutes as u64, secs - minutes * 60.0)
    }

    /// How many ticks span `secs` simulated seconds.
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs * self.ticks_per_second as u64
    }

    #[inline]
    pub fn ticks_for_minutes(&self, minutes: u64) -> u64 {
        self.ticks_for_secs(minutes * 60)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({:02}:{:05.2})", self.current_tick, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration: how long, which seed, how often to emit output.
///
/// Species behaviour is configured separately through
/// [`EcosystemConfig`](crate::EcosystemConfig).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate.  Default: 8 simulated hours at 60 ticks/s.
    pub duration_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks per simulated second.  Only used for progress output.
    pub ticks_per_second: u32,

    /// Emit records every N ticks.  1 = every tick; 0 disables output.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            duration_ticks:        8 * 60 * 60 * 60,
            seed:                  1,
            ticks_per_second:      60,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.duration_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_second)
    }

    /// `true` if records should be emitted for `tick`.
    #[inline]
    pub fn is_output_tick(&self, tick: Tick) -> bool {
        self.output_interval_ticks > 0 && tick.0.is_multiple_of(self.output_interval_ticks)
    }
}
