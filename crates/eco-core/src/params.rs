//! Parameter records for the world and each species.
//!
//! Defaults reproduce the reference scent-trail model: a 750 × 750 field,
//! 20 foxes, 20 rabbits and 60 grass patches, creatures living about three
//! simulated minutes.  [`EcosystemConfig::validate`] rejects values the
//! decision engine cannot run with; it is called by the simulation builder so
//! an invalid record never reaches a tick.

use crate::{EcoError, EcoResult, Rect};

/// Geometry of the field and the neighbor query radius.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldParams {
    pub width:            f64,
    pub height:           f64,
    /// Radius handed to every neighbor query.
    pub proximity_radius: f64,
    /// Length of a freshly spawned creature's heading.
    pub movement_speed:   f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width:            750.0,
            height:           750.0,
            proximity_radius: 50.0,
            movement_speed:   1.0,
        }
    }
}

impl WorldParams {
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Area grass is (re)planted in: the bounds less a one-unit margin.
    pub fn planting_area(&self) -> Rect {
        self.bounds().inset(1.0)
    }
}

/// Grass regrowth timing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrassParams {
    /// Base ticks between being eaten and becoming available again.
    pub regrow_delay: u32,
    /// Mean of the per-patch offset added to `regrow_delay` once at creation.
    pub jitter_mean:  f64,
    /// Standard deviation of that offset.
    pub jitter_sd:    f64,
}

impl Default for GrassParams {
    fn default() -> Self {
        Self { regrow_delay: 180, jitter_mean: 60.0, jitter_sd: 20.0 }
    }
}

/// Rabbit metabolism, foraging and reproduction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RabbitParams {
    pub max_energy:       u32,
    pub hunger_threshold: u32,
    /// Energy gained per grass eaten.
    pub nutrition:        u32,
    /// Mean lifespan in ticks before noise.
    pub lifespan:         u32,
    pub p_reproduce:      f64,
    /// Reproduction is suppressed once this many rabbits are alive.
    pub max_population:   Option<usize>,
}

impl Default for RabbitParams {
    fn default() -> Self {
        Self {
            max_energy:       10_800,
            hunger_threshold: 600,
            nutrition:        300,
            lifespan:         10_800,
            p_reproduce:      0.2,
            max_population:   None,
        }
    }
}

/// Fox metabolism, hunting and reproduction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FoxParams {
    pub max_energy:       u32,
    pub hunger_threshold: u32,
    /// Energy gained per rabbit eaten.
    pub nutrition:        u32,
    pub lifespan:         u32,
    pub p_reproduce:      f64,
    /// Speed while chasing a visible rabbit.
    pub hunt_speed:       f64,
    /// Speed while following a scent gradient.
    pub track_speed:      f64,
    pub max_population:   Option<usize>,
}

impl Default for FoxParams {
    fn default() -> Self {
        Self {
            max_energy:       10_800,
            hunger_threshold: 480,
            nutrition:        600,
            lifespan:         10_800,
            p_reproduce:      0.2,
            hunt_speed:       1.1,
            track_speed:      1.5,
            max_population:   None,
        }
    }
}

/// Scent trail emitted by active rabbits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScentParams {
    /// Ticks a marker survives.  Its remaining lifetime is also its strength.
    pub lifetime: u32,
    /// A rabbit drops a marker whenever `age % interval == 0`.
    pub interval: u32,
}

impl Default for ScentParams {
    fn default() -> Self {
        Self { lifetime: 120, interval: 30 }
    }
}

/// Initial batch-spawn sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InitialPopulation {
    pub foxes:   usize,
    pub rabbits: usize,
    pub grass:   usize,
}

impl Default for InitialPopulation {
    fn default() -> Self {
        Self { foxes: 20, rabbits: 20, grass: 60 }
    }
}

/// Everything the decision engine needs to know about one run's ecosystem.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EcosystemConfig {
    pub world:      WorldParams,
    pub grass:      GrassParams,
    pub rabbit:     RabbitParams,
    pub fox:        FoxParams,
    /// `None` runs the trail-free variant: rabbits never emit markers and
    /// foxes never track.
    pub scent:      Option<ScentParams>,
    pub population: InitialPopulation,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            world:      WorldParams::default(),
            grass:      GrassParams::default(),
            rabbit:     RabbitParams::default(),
            fox:        FoxParams::default(),
            scent:      Some(ScentParams::default()),
            population: InitialPopulation::default(),
        }
    }
}

impl EcosystemConfig {
    /// The same ecosystem with scent trails disabled.
    pub fn without_scent(mut self) -> Self {
        self.scent = None;
        self
    }

    /// Reject parameter values the decision engine cannot run with.
    pub fn validate(&self) -> EcoResult<()> {
        let w = &self.world;
        positive("world.width", w.width)?;
        positive("world.height", w.height)?;
        positive("world.proximity_radius", w.proximity_radius)?;
        positive("world.movement_speed", w.movement_speed)?;

        if self.grass.regrow_delay == 0 {
            return Err(EcoError::invalid("grass.regrow_delay", "must be at least 1 tick"));
        }
        if !self.grass.jitter_mean.is_finite() {
            return Err(EcoError::invalid("grass.jitter_mean", "must be finite"));
        }
        if !(self.grass.jitter_sd.is_finite() && self.grass.jitter_sd >= 0.0) {
            return Err(EcoError::invalid("grass.jitter_sd", "must be finite and non-negative"));
        }

        let r = &self.rabbit;
        creature(&RABBIT_FIELDS, r.max_energy, r.hunger_threshold, r.lifespan, r.p_reproduce)?;

        let f = &self.fox;
        creature(&FOX_FIELDS, f.max_energy, f.hunger_threshold, f.lifespan, f.p_reproduce)?;
        positive("fox.hunt_speed", f.hunt_speed)?;
        positive("fox.track_speed", f.track_speed)?;

        if let Some(scent) = &self.scent {
            if scent.interval == 0 {
                return Err(EcoError::invalid("scent.interval", "must be at least 1 tick"));
            }
            if scent.lifetime == 0 {
                return Err(EcoError::invalid("scent.lifetime", "must be at least 1 tick"));
            }
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> EcoResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EcoError::invalid(name, format!("must be finite and positive, got {value}")))
    }
}

/// Field names reported by [`creature`] for one species.
struct CreatureFields {
    hunger:      &'static str,
    lifespan:    &'static str,
    p_reproduce: &'static str,
}

const RABBIT_FIELDS: CreatureFields = CreatureFields {
    hunger:      "rabbit.hunger_threshold",
    lifespan:    "rabbit.lifespan",
    p_reproduce: "rabbit.p_reproduce",
};

const FOX_FIELDS: CreatureFields = CreatureFields {
    hunger:      "fox.hunger_threshold",
    lifespan:    "fox.lifespan",
    p_reproduce: "fox.p_reproduce",
};

fn creature(
    fields:      &CreatureFields,
    max_energy:  u32,
    hunger:      u32,
    lifespan:    u32,
    p_reproduce: f64,
) -> EcoResult<()> {
    // Creatures spawn with `hunger - 1` energy, which must leave room to live.
    if hunger < 2 {
        return Err(EcoError::invalid(fields.hunger, "must be at least 2"));
    }
    if hunger >= max_energy {
        return Err(EcoError::invalid(
            fields.hunger,
            format!("must be below max_energy ({max_energy})"),
        ));
    }
    if lifespan == 0 {
        return Err(EcoError::invalid(fields.lifespan, "must be at least 1 tick"));
    }
    if !(0.0..=1.0).contains(&p_reproduce) {
        return Err(EcoError::invalid(
            fields.p_reproduce,
            format!("must lie in [0, 1], got {p_reproduce}"),
        ));
    }
    Ok(())
}
