//! Scent trail: markers left by rabbits and the gradient foxes follow.
//!
//! # Gradient
//!
//! For a fox at `p` and markers `m` with strength `s` at offset
//! `o = m.pos - p`, `d = |o|`:
//!
//! ```text
//! g = Σ_{d > 10}  o · d³ · s⁴ / 1200
//! ```
//!
//! normalised when non-zero.  `o` is not unit length, so a marker's pull
//! grows with d⁴: the fox is drawn toward the far end of a trail, where the
//! rabbit is heading, rather than the marker it is standing on.  Markers
//! inside the dead zone are ignored to stop the fox orbiting one.

use eco_agent::{Agent, DeathCause, Motion, RabbitMode, ScentMarker, Species, Vitals};
use eco_core::{AgentId, ScentParams, Vec2};

use crate::TickContext;

/// Markers closer than this contribute nothing.
pub const DEAD_ZONE: f64 = 10.0;

/// Divisor applied to every marker's contribution.
pub const NORMALIZER: f64 = 1200.0;

/// Blend weight of a fresh gradient into the previous heading.  Product of
/// two tuning fractions; kept as written.
pub const MOMENTUM: f64 = 0.7 * 0.3;

/// A marker at `pos` left by `source`, lasting the configured lifetime.
pub fn create_marker(params: &ScentParams, pos: Vec2, source: AgentId) -> Agent {
    Agent {
        pos,
        motion:  Motion::default(),
        vitals:  Vitals::INERT,
        species: Species::Rabbit(RabbitMode::Scent(ScentMarker {
            remaining: params.lifetime,
            source,
        })),
    }
}

/// Marker decision step.
///
/// Removed at once if its source rabbit is gone; otherwise the lifetime
/// counts down and the marker is removed when it reaches zero, so a marker
/// with lifetime L sees exactly L ticks.
pub fn decay(ctx: &mut TickContext<'_>, marker: AgentId) {
    let Some(scent) = ctx.store.species[marker].as_scent() else {
        unreachable!("scent behavior routed a non-marker agent");
    };
    if !ctx.store.is_live(scent.source) {
        ctx.kill(marker, DeathCause::SourceGone);
        return;
    }

    let Some(scent) = ctx.store.species[marker].as_scent_mut() else { return };
    scent.remaining = scent.remaining.saturating_sub(1);
    if scent.remaining == 0 {
        ctx.kill(marker, DeathCause::ScentExpired);
    }
}

/// Weighted, normalised pull of `markers` (position, strength) on a fox at
/// `from`.  Zero if every marker lies in the dead zone.
pub fn aggregate_gradient(from: Vec2, markers: impl IntoIterator<Item = (Vec2, f64)>) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for (pos, strength) in markers {
        let offset = pos - from;
        let d = offset.length();
        if d > DEAD_ZONE {
            sum += offset * (d.powi(3) * strength.powi(4) / NORMALIZER);
        }
    }
    sum.normalize_or_zero()
}
