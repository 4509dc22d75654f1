use crate::{GrassPhase, RabbitMode, Species};

/// Live population counts, taken at the end of a tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Census {
    pub foxes:           usize,
    /// Foraging rabbits only; markers are counted in `scents`.
    pub rabbits:         usize,
    pub scents:          usize,
    pub grass_available: usize,
    pub grass_regrowing: usize,
}

impl Census {
    pub fn count(&mut self, species: &Species) {
        match species {
            Species::Fox(_) => self.foxes += 1,
            Species::Rabbit(RabbitMode::Active(_)) => self.rabbits += 1,
            Species::Rabbit(RabbitMode::Scent(_)) => self.scents += 1,
            Species::Grass(g) => match g.phase {
                GrassPhase::Available => self.grass_available += 1,
                GrassPhase::Regrowing { .. } => self.grass_regrowing += 1,
            },
        }
    }

    pub fn grass(&self) -> usize {
        self.grass_available + self.grass_regrowing
    }

    pub fn total(&self) -> usize {
        self.foxes + self.rabbits + self.scents + self.grass()
    }
}
