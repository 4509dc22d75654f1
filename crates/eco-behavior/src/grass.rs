//! Grass: a fixed population of patches toggling between available and
//! regrowing.

use eco_agent::{Agent, Grass, GrassPhase, Motion, Species, Vitals};
use eco_core::{AgentId, GrassParams, SimRng, Vec2};

use crate::TickContext;

/// New available patch at `pos`.  The regrow delay is the base delay plus a
/// normally distributed offset truncated toward zero, at least one tick.
pub fn create(params: &GrassParams, rng: &mut SimRng, pos: Vec2) -> Agent {
    let jitter = rng.gauss(params.jitter_mean, params.jitter_sd).trunc() as i64;
    let regrow_delay = (params.regrow_delay as i64 + jitter).clamp(1, u32::MAX as i64) as u32;
    Agent {
        pos,
        motion:  Motion::default(),
        vitals:  Vitals::INERT,
        species: Species::Grass(Grass { regrow_delay, phase: GrassPhase::Available }),
    }
}

/// Eat the patch: start its regrowth countdown and replant it elsewhere.
///
/// # Panics
///
/// If `patch` is not available grass.
pub fn consume(ctx: &mut TickContext<'_>, patch: AgentId) {
    let area = ctx.config.world.planting_area();
    let grass = match ctx.store.species[patch].as_grass_mut() {
        Some(g) if g.is_available() => g,
        _ => panic!("consume of unavailable grass {patch:?}"),
    };
    grass.phase = GrassPhase::Regrowing { remaining: grass.regrow_delay };
    ctx.store.flags[patch].consumed = true;
    ctx.store.pos[patch] = ctx.rngs.chance.point_in(area);
}

/// Count down regrowth.  A patch eaten earlier this tick waits until the next
/// one, so it is unavailable for exactly its regrow delay.
pub fn decide(ctx: &mut TickContext<'_>, patch: AgentId) {
    if ctx.store.flags[patch].consumed {
        return;
    }
    let Some(grass) = ctx.store.species[patch].as_grass_mut() else {
        unreachable!("grass behavior routed a non-grass agent");
    };
    grass.phase = regrow(grass.phase);
}

/// One tick of regrowth.
pub fn regrow(phase: GrassPhase) -> GrassPhase {
    match phase {
        GrassPhase::Available | GrassPhase::Regrowing { remaining: 0 | 1 } => GrassPhase::Available,
        GrassPhase::Regrowing { remaining } => GrassPhase::Regrowing { remaining: remaining - 1 },
    }
}
