//! The `BehaviorModel` trait and the ecosystem's single dispatch point.

use eco_agent::{Kind, Species};
use eco_core::AgentId;

use crate::{fox, grass, rabbit, scent, TickContext};

/// Pluggable agent behavior.
///
/// The driver calls [`decide`](Self::decide) for every agent live at tick
/// start, then [`step`](Self::step) for every one still live, in ascending
/// id order both times.  Neither is called for an agent killed earlier in
/// the tick.
///
/// # Thread safety
///
/// Models hold no per-run state (everything mutable lives in
/// [`TickContext`]), so one model can drive many runs on different threads.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Lifecycle and species decisions: eat, breed, emit, decay.
    fn decide(&self, agent: AgentId, ctx: &mut TickContext<'_>);

    /// Movement.  Default: stay put.
    fn step(&self, _agent: AgentId, _ctx: &mut TickContext<'_>) {}
}

/// The fox / rabbit / grass ecosystem.
///
/// Routes each agent to its species' behavior by matching on its
/// [`Species`] variant.  Grass and scent markers never move.
#[derive(Copy, Clone, Debug, Default)]
pub struct EcosystemModel;

impl BehaviorModel for EcosystemModel {
    fn decide(&self, agent: AgentId, ctx: &mut TickContext<'_>) {
        assert!(ctx.store.is_live(agent), "decide called on dead agent {agent:?}");
        match route(&ctx.store.species[agent]) {
            Route::Grass => grass::decide(ctx, agent),
            Route::Rabbit => rabbit::decide(ctx, agent),
            Route::Scent => scent::decay(ctx, agent),
            Route::Fox => fox::decide(ctx, agent),
        }
    }

    fn step(&self, agent: AgentId, ctx: &mut TickContext<'_>) {
        assert!(ctx.store.is_live(agent), "step called on dead agent {agent:?}");
        match route(&ctx.store.species[agent]) {
            Route::Rabbit => rabbit::step(ctx, agent),
            Route::Fox => fox::step(ctx, agent),
            Route::Grass | Route::Scent => {}
        }
    }
}

enum Route {
    Grass,
    Rabbit,
    Scent,
    Fox,
}

fn route(species: &Species) -> Route {
    match species.kind() {
        Kind::Grass => Route::Grass,
        Kind::Rabbit if species.is_scent() => Route::Scent,
        Kind::Rabbit => Route::Rabbit,
        Kind::Fox => Route::Fox,
    }
}
