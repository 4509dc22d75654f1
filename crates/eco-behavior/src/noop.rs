//! A behavior model under which nothing happens.

use eco_core::AgentId;

use crate::{BehaviorModel, TickContext};

/// A [`BehaviorModel`] whose agents never age, eat, breed or move.
///
/// Useful in driver tests: the population stays exactly as spawned, so
/// record and census plumbing can be checked in isolation.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(&self, _agent: AgentId, _ctx: &mut TickContext<'_>) {}
}
