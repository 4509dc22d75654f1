//! Simulation observer trait for progress reporting and data collection.

use eco_agent::Census;
use eco_core::Tick;

use crate::AgentRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — population printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_tick_end(&mut self, tick: Tick, census: &Census) {
///         if tick.0 % 3600 == 0 {
///             println!("{tick}: {} foxes, {} rabbits", census.foxes, census.rabbits);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called on output ticks (every `config.output_interval_ticks`).
    ///
    /// `records` holds one entry per agent live at the start of the tick,
    /// including those that died during it, in ascending id order.
    /// `census` counts the population after this tick's births.
    fn on_snapshot(&mut self, _tick: Tick, _records: &[AgentRecord], _census: &Census) {}

    /// Called at the end of every tick with the post-birth population.
    fn on_tick_end(&mut self, _tick: Tick, _census: &Census) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _census: &Census) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_snapshot(&mut self, tick: Tick, records: &[AgentRecord], census: &Census) {
        (**self).on_snapshot(tick, records, census);
    }

    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        (**self).on_tick_end(tick, census);
    }

    fn on_sim_end(&mut self, final_tick: Tick, census: &Census) {
        (**self).on_sim_end(final_tick, census);
    }
}
