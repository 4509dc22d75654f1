//! Species-specific agent state as a closed set of tagged variants.
//!
//! Every slot in the arena carries exactly one [`Species`].  The variant is
//! fixed at creation: a grass patch never becomes a creature, and a rabbit
//! created as a scent marker never starts foraging (and vice versa).

use eco_core::{AgentId, ScentParams};

/// Coarse agent kind, as seen by neighbor-query filters.
///
/// Scent markers are rabbit-kind: a `filter_kind(Kind::Rabbit)` query returns
/// both foragers and markers, and callers tell them apart by [`RabbitMode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    Grass,
    Rabbit,
    Fox,
}

/// Per-agent species state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Species {
    Grass(Grass),
    Rabbit(RabbitMode),
    Fox(Fox),
}

impl Species {
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Species::Grass(_) => Kind::Grass,
            Species::Rabbit(_) => Kind::Rabbit,
            Species::Fox(_) => Kind::Fox,
        }
    }

    /// `true` for creatures that age, eat and move: foxes and foraging
    /// rabbits.  Grass and scent markers are not.
    #[inline]
    pub fn is_creature(&self) -> bool {
        matches!(self, Species::Fox(_) | Species::Rabbit(RabbitMode::Active(_)))
    }

    #[inline]
    pub fn is_active_rabbit(&self) -> bool {
        matches!(self, Species::Rabbit(RabbitMode::Active(_)))
    }

    #[inline]
    pub fn is_scent(&self) -> bool {
        matches!(self, Species::Rabbit(RabbitMode::Scent(_)))
    }

    #[inline]
    pub fn is_available_grass(&self) -> bool {
        matches!(self, Species::Grass(g) if g.is_available())
    }

    pub fn as_grass(&self) -> Option<&Grass> {
        match self {
            Species::Grass(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grass_mut(&mut self) -> Option<&mut Grass> {
        match self {
            Species::Grass(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_forager(&self) -> Option<&Forager> {
        match self {
            Species::Rabbit(RabbitMode::Active(f)) => Some(f),
            _ => None,
        }
    }

    pub fn as_scent(&self) -> Option<&ScentMarker> {
        match self {
            Species::Rabbit(RabbitMode::Scent(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_scent_mut(&mut self) -> Option<&mut ScentMarker> {
        match self {
            Species::Rabbit(RabbitMode::Scent(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_fox(&self) -> Option<&Fox> {
        match self {
            Species::Fox(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_fox_mut(&mut self) -> Option<&mut Fox> {
        match self {
            Species::Fox(f) => Some(f),
            _ => None,
        }
    }
}

// ── Grass ─────────────────────────────────────────────────────────────────────

/// A grass patch.  Never moves, never dies; only its availability toggles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grass {
    /// Ticks spent regrowing after being eaten.  Base delay plus a jitter
    /// sampled once when the patch was created.
    pub regrow_delay: u32,
    pub phase:        GrassPhase,
}

/// Availability of a grass patch.  The countdown only exists while the patch
/// is unavailable, so "available with a running timer" cannot be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GrassPhase {
    Available,
    Regrowing { remaining: u32 },
}

impl Grass {
    #[inline]
    pub fn is_available(&self) -> bool {
        self.phase == GrassPhase::Available
    }
}

// ── Rabbit ────────────────────────────────────────────────────────────────────

/// The two mutually exclusive rabbit behaviours, selected at creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RabbitMode {
    Active(Forager),
    Scent(ScentMarker),
}

/// A live, foraging rabbit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forager {
    /// Energy gained per grass eaten.
    pub nutrition: u32,
    /// Trail configuration stamped onto emitted markers.  `None` disables
    /// emission.
    pub scent:     Option<ScentParams>,
}

/// A non-mobile, decaying trail marker left behind by a rabbit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScentMarker {
    /// Ticks until the marker vanishes.  Doubles as its strength, so fresher
    /// trail pulls harder.
    pub remaining: u32,
    /// The rabbit that emitted this marker.  Only ever checked for liveness.
    pub source:    AgentId,
}

impl ScentMarker {
    #[inline]
    pub fn strength(&self) -> f64 {
        self.remaining as f64
    }
}

// ── Fox ───────────────────────────────────────────────────────────────────────

/// Hunting state of a fox, re-derived from scratch every movement step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HuntMode {
    /// Well fed; random wander.
    #[default]
    Wandering,
    /// Hungry with neither prey nor trail in range.
    Searching,
    /// Hungry, following a scent gradient.
    Tracking,
    /// Hungry, running at a visible rabbit.
    Chasing,
    /// Caught and ate a rabbit this tick.
    Feeding,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fox {
    /// Energy gained per rabbit eaten.
    pub nutrition:   u32,
    pub hunt_speed:  f64,
    pub track_speed: f64,
    pub mode:        HuntMode,
}
