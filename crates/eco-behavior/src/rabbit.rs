//! Rabbit: forages grass, breeds when well fed and leaves a scent trail.

use eco_agent::{Agent, Forager, Kind, Motion, RabbitMode, Species};
use eco_core::{AgentId, EcosystemConfig, SimRng, Vec2};

use crate::lifecycle::{self, feed, newborn_vitals};
use crate::movement::{begin_step, wander_step};
use crate::{grass, scent, TickContext};

/// New foraging rabbit at `pos`.  All noise comes from `rng` (the chance
/// stream).
pub fn create(config: &EcosystemConfig, rng: &mut SimRng, pos: Vec2) -> Agent {
    let p = &config.rabbit;
    let vitals = newborn_vitals(rng, p.max_energy, p.hunger_threshold, p.lifespan, p.p_reproduce);
    let heading = rng.heading(config.world.movement_speed);
    Agent {
        pos,
        motion: Motion::new(heading),
        vitals,
        species: Species::Rabbit(RabbitMode::Active(Forager {
            nutrition: p.nutrition,
            scent:     config.scent.clone(),
        })),
    }
}

/// Decision step for a foraging rabbit.
///
/// Neighbour picks are first-found, not nearest: any available patch or
/// foraging mate in range will do.
pub fn decide(ctx: &mut TickContext<'_>, rabbit: AgentId) {
    if !lifecycle::live_one_tick(ctx, rabbit) {
        return;
    }

    let patch = ctx
        .neighbors(rabbit)
        .filter_kind(Kind::Grass)
        .filter_species(Species::is_available_grass)
        .first();
    let mate = ctx
        .neighbors(rabbit)
        .filter_kind(Kind::Rabbit)
        .filter_species(Species::is_active_rabbit)
        .first();

    let hungry = ctx.store.vitals[rabbit].is_hungry();
    let well_fed = ctx.store.vitals[rabbit].is_well_fed();
    if let (true, Some(patch)) = (hungry, patch) {
        let nutrition = forager(ctx, rabbit).nutrition;
        grass::consume(ctx, patch);
        feed(&mut ctx.store.vitals[rabbit], nutrition);
        ctx.store.flags[rabbit].ate = true;
    } else if let (true, Some(mate)) = (well_fed, mate) {
        let cap = ctx.config.rabbit.max_population;
        let config = ctx.config;
        lifecycle::try_reproduce(ctx, rabbit, mate, cap, |rng, pos| create(config, rng, pos));
    }

    emit_scent(ctx, rabbit);
}

/// Drop a marker when the rabbit's age is a multiple of the emission
/// interval.  No-op when trails are disabled.
fn emit_scent(ctx: &mut TickContext<'_>, rabbit: AgentId) {
    let Some(params) = forager(ctx, rabbit).scent.clone() else { return };
    if ctx.store.vitals[rabbit].age % params.interval != 0 {
        return;
    }
    let marker = scent::create_marker(&params, ctx.store.pos[rabbit], rabbit);
    ctx.spawn(marker);
}

/// Movement step: wander.
pub fn step(ctx: &mut TickContext<'_>, rabbit: AgentId) {
    let (draws, wrapped) = begin_step(ctx, rabbit);
    wander_step(ctx, rabbit, &draws, wrapped);
}

fn forager<'c>(ctx: &'c TickContext<'_>, rabbit: AgentId) -> &'c Forager {
    match ctx.store.species[rabbit].as_forager() {
        Some(f) => f,
        None => unreachable!("rabbit behavior routed a non-forager agent"),
    }
}
