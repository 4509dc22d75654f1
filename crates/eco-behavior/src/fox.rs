//! Fox: breeds when well fed, otherwise hunts rabbits directly or by scent.
//!
//! # Hunting modes
//!
//! Re-derived from scratch on every movement step; there is no target lock.
//!
//! ```text
//!   energy ≥ hunger ───────────────────────────────► Wandering
//!   hungry, rabbit in range, d < 20 ───────────────► Feeding   (kill, eat)
//!   hungry, rabbit in range ───────────────────────► Chasing   (hunt speed)
//!   hungry, no rabbit, markers in range ───────────► Tracking  (track speed)
//!   hungry, nothing in range ──────────────────────► Searching (keep heading)
//! ```

use eco_agent::{Agent, AgentStore, DeathCause, Fox, HuntMode, Kind, Motion, Species};
use eco_core::{AgentId, EcosystemConfig, SimRng, Vec2};
use tracing::trace;

use crate::lifecycle::{self, feed, newborn_vitals};
use crate::movement::{begin_step, wander_step};
use crate::{scent, TickContext};

/// A hungry fox kills any rabbit strictly closer than this.
pub const CAPTURE_RADIUS: f64 = 20.0;

/// New fox at `pos`.  All noise comes from `rng` (the chance stream).
pub fn create(config: &EcosystemConfig, rng: &mut SimRng, pos: Vec2) -> Agent {
    let p = &config.fox;
    let vitals = newborn_vitals(rng, p.max_energy, p.hunger_threshold, p.lifespan, p.p_reproduce);
    let heading = rng.heading(config.world.movement_speed);
    Agent {
        pos,
        motion: Motion::new(heading),
        vitals,
        species: Species::Fox(Fox {
            nutrition:   p.nutrition,
            hunt_speed:  p.hunt_speed,
            track_speed: p.track_speed,
            mode:        HuntMode::Wandering,
        }),
    }
}

/// Decision step: lifecycle, then a breeding attempt with the first fox in
/// range when well fed.  Hunting happens in [`step`].
pub fn decide(ctx: &mut TickContext<'_>, fox: AgentId) {
    if !lifecycle::live_one_tick(ctx, fox) {
        return;
    }
    if !ctx.store.vitals[fox].is_well_fed() {
        return;
    }
    let Some(mate) = ctx.neighbors(fox).filter_kind(Kind::Fox).first() else { return };
    let cap = ctx.config.fox.max_population;
    let config = ctx.config;
    lifecycle::try_reproduce(ctx, fox, mate, cap, |rng, pos| create(config, rng, pos));
}

/// Movement step: hunt when hungry, wander otherwise.
pub fn step(ctx: &mut TickContext<'_>, fox: AgentId) {
    let (draws, wrapped) = begin_step(ctx, fox);

    if !ctx.store.vitals[fox].is_hungry() {
        set_mode(ctx.store, fox, HuntMode::Wandering);
        wander_step(ctx, fox, &draws, wrapped);
        return;
    }

    let mode = hunt(ctx, fox);
    set_mode(ctx.store, fox, mode);

    let (hunt_speed, track_speed) = {
        let f = fox_state(ctx.store, fox);
        (f.hunt_speed, f.track_speed)
    };
    let heading = ctx.store.motion[fox].heading.normalize_or_zero();
    let heading = match mode {
        HuntMode::Chasing => heading * hunt_speed,
        HuntMode::Tracking => heading * track_speed,
        _ => heading,
    };
    ctx.store.motion[fox].heading = heading;
    ctx.store.pos[fox] += heading;
}

/// The hungry branch: pick a mode and update the heading (or eat).
fn hunt(ctx: &mut TickContext<'_>, fox: AgentId) -> HuntMode {
    let here = ctx.store.pos[fox];
    let candidates = ctx.neighbors(fox).filter_kind(Kind::Rabbit).into_ids();

    if let Some((prey, distance)) = nearest_rabbit(ctx.store, &candidates, here) {
        if distance < CAPTURE_RADIUS {
            let nutrition = fox_state(ctx.store, fox).nutrition;
            trace!(tick = ctx.tick.0, ?fox, ?prey, distance, "capture");
            ctx.kill(prey, DeathCause::Eaten);
            feed(&mut ctx.store.vitals[fox], nutrition);
            ctx.store.flags[fox].ate = true;
            return HuntMode::Feeding;
        }
        let toward = (ctx.store.pos[prey] - here).normalize_or_zero();
        ctx.store.motion[fox].heading = toward * fox_state(ctx.store, fox).hunt_speed;
        return HuntMode::Chasing;
    }

    if ctx.config.scent.is_none() {
        return HuntMode::Searching;
    }
    let store: &AgentStore = ctx.store;
    let markers: Vec<(Vec2, f64)> = candidates
        .iter()
        .filter(|id| store.is_live(**id))
        .filter_map(|&id| store.species[id].as_scent().map(|s| (store.pos[id], s.strength())))
        .collect();
    if markers.is_empty() {
        return HuntMode::Searching;
    }

    let gradient = scent::aggregate_gradient(here, markers);
    ctx.store.motion[fox].heading += gradient * scent::MOMENTUM;
    HuntMode::Tracking
}

/// The foraging rabbit in `candidates` nearest to `from`, with its distance.
///
/// Markers and dead agents are skipped.  Distances are compared explicitly
/// because neighbour sets carry no distance order; on a tie the earlier
/// candidate wins.
pub fn nearest_rabbit(store: &AgentStore, candidates: &[AgentId], from: Vec2) -> Option<(AgentId, f64)> {
    let mut best: Option<(AgentId, f64)> = None;
    for &id in candidates {
        if !store.is_live(id) || !store.species[id].is_active_rabbit() {
            continue;
        }
        let d = store.pos[id].distance(from);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((id, d));
        }
    }
    best
}

fn fox_state(store: &AgentStore, fox: AgentId) -> &Fox {
    match store.species[fox].as_fox() {
        Some(f) => f,
        None => unreachable!("fox behavior routed a non-fox agent"),
    }
}

fn set_mode(store: &mut AgentStore, fox: AgentId, mode: HuntMode) {
    if let Some(f) = store.species[fox].as_fox_mut() {
        f.mode = mode;
    }
}
