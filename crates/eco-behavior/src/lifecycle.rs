//! Ageing, metabolism, death and reproduction shared by every creature.

use eco_agent::{Agent, DeathCause, Kind, Vitals};
use eco_core::{AgentId, SimRng, Vec2};

use crate::TickContext;

/// Multiplicative lifespan noise is drawn from |N(1, σ)|.
const LIFESPAN_NOISE_SD: f64 = 0.25;

/// Advance `vitals` by one tick: age += 1, energy -= 1.
///
/// Returns the cause if the creature dies this tick.  Old age wins when both
/// conditions hold.
///
/// # Panics
///
/// If energy is already 0: such a creature should have died last tick.
pub fn metabolize(vitals: &mut Vitals) -> Option<DeathCause> {
    assert!(vitals.energy > 0, "metabolism on a creature with no energy");
    vitals.age += 1;
    vitals.energy -= 1;
    if vitals.age == vitals.lifespan {
        Some(DeathCause::OldAge)
    } else if vitals.energy == 0 {
        Some(DeathCause::Starvation)
    } else {
        None
    }
}

/// Run the lifecycle step for `agent`, killing it if it dies.
///
/// Returns `true` if the agent survives and may run species behaviour.
pub fn live_one_tick(ctx: &mut TickContext<'_>, agent: AgentId) -> bool {
    match metabolize(&mut ctx.store.vitals[agent]) {
        None => true,
        Some(cause) => {
            ctx.kill(agent, cause);
            false
        }
    }
}

/// Fresh creature vitals: age 0, energy one below the hunger threshold and
/// a noisy lifespan of at least one tick.
pub fn newborn_vitals(
    rng:         &mut SimRng,
    max_energy:  u32,
    hunger:      u32,
    lifespan:    u32,
    p_reproduce: f64,
) -> Vitals {
    let noise = rng.gauss(1.0, LIFESPAN_NOISE_SD).abs();
    Vitals {
        age:              0,
        energy:           hunger - 1,
        max_energy,
        hunger_threshold: hunger,
        lifespan:         ((lifespan as f64 * noise) as u32).max(1),
        p_reproduce,
    }
}

/// Add `gain` to the agent's energy, clamped to its cap.
pub fn feed(vitals: &mut Vitals, gain: u32) {
    vitals.energy = vitals.energy.saturating_add(gain).min(vitals.max_energy);
}

/// Attempt reproduction between `parent` and `mate`.
///
/// The caller has already checked that the parent is well fed and that the
/// mate is a live neighbour of the same kind.  If the species is at its
/// population cap the attempt is skipped without drawing.  Otherwise one
/// Bernoulli draw on the chance stream decides; on success `newborn` builds
/// the offspring at the parent's position and both participants drop to one
/// below their hunger threshold.
pub fn try_reproduce(
    ctx:     &mut TickContext<'_>,
    parent:  AgentId,
    mate:    AgentId,
    cap:     Option<usize>,
    newborn: impl FnOnce(&mut SimRng, Vec2) -> Agent,
) -> bool {
    debug_assert_eq!(ctx.store.kind(parent), ctx.store.kind(mate));
    let kind: Kind = ctx.store.kind(parent);
    if cap.is_some_and(|cap| ctx.projected_population(kind) >= cap) {
        return false;
    }

    let p = ctx.store.vitals[parent].p_reproduce;
    if !ctx.rngs.chance.bernoulli(p) {
        return false;
    }

    let child = newborn(&mut ctx.rngs.chance, ctx.store.pos[parent]);
    ctx.spawn(child);

    for id in [parent, mate] {
        let vitals = &mut ctx.store.vitals[id];
        vitals.energy = vitals.hunger_threshold - 1;
    }
    ctx.store.flags[parent].reproduced = true;
    true
}
