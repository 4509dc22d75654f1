//! Random wander with obstacle avoidance, shared by rabbits and well-fed
//! foxes.

use eco_agent::Motion;
use eco_core::{AgentId, SimRng};

use crate::TickContext;

/// Chance per step that a clear-path wanderer nudges its heading.
pub const TURN_CHANCE: f64 = 0.25;

/// Maximum turn (degrees, either way) after wrapping around the world edge.
pub const TELEPORT_TURN: f64 = 30.0;

/// Maximum random nudge (degrees, either way).
pub const JITTER: f64 = 10.0;

/// The three movement-stream values every mover consumes per step.
///
/// Drawn unconditionally so the stream position depends only on how many
/// agents moved, not on which branch each took.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WanderDraws {
    pub teleport_turn: f64,
    pub change_roll:   f64,
    pub jitter:        f64,
}

impl WanderDraws {
    pub fn draw(rng: &mut SimRng) -> Self {
        let teleport_turn = rng.uniform(-TELEPORT_TURN, TELEPORT_TURN);
        let change_roll = rng.unit();
        let jitter = rng.uniform(-JITTER, JITTER);
        Self { teleport_turn, change_roll, jitter }
    }
}

/// Update `motion` for one wander step.
///
/// - `wrapped`: the agent was just teleported across the world edge.
/// - `colliding`: the agent currently overlaps an obstacle.
///
/// The heading leaves normalised (or zero).
pub fn wander(motion: &mut Motion, wrapped: bool, colliding: bool, draws: &WanderDraws) {
    if wrapped {
        motion.heading = motion.heading.rotate(draws.teleport_turn);
    }

    if colliding && !motion.stuck {
        motion.heading = motion.heading.rotate(180.0);
        motion.stuck = true;
    }
    if !colliding {
        motion.stuck = false;
    }

    // No nudging while in an obstacle: the 180° turn must stay exact.
    if !colliding && !motion.stuck && draws.change_roll < TURN_CHANCE {
        motion.heading = motion.heading.rotate(draws.jitter);
    }

    motion.heading = motion.heading.normalize_or_zero();
}

/// Opening of every mover's step: draw the wander values, then wrap the
/// agent back into the world.  Returns the draws and whether it wrapped.
pub fn begin_step(ctx: &mut TickContext<'_>, agent: AgentId) -> (WanderDraws, bool) {
    let draws = WanderDraws::draw(&mut ctx.rngs.movement);
    let (pos, wrapped) = ctx.landscape.wrap(ctx.store.pos[agent]);
    ctx.store.pos[agent] = pos;
    (draws, wrapped)
}

/// Wander `agent` one step: steer, then apply the heading.
pub fn wander_step(ctx: &mut TickContext<'_>, agent: AgentId, draws: &WanderDraws, wrapped: bool) {
    let colliding = ctx.landscape.collides(ctx.store.pos[agent]);
    let motion = &mut ctx.store.motion[agent];
    wander(motion, wrapped, colliding, draws);
    let heading = motion.heading;
    ctx.store.pos[agent] += heading;
}
