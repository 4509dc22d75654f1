//! World bounds, toroidal wrap and static obstacles.

use eco_core::{Rect, Vec2};

use crate::{SpatialError, SpatialResult};

/// The static geometry agents move over.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landscape {
    bounds:    Rect,
    obstacles: Vec<Rect>,
}

impl Landscape {
    pub fn new(bounds: Rect) -> SpatialResult<Self> {
        if !bounds.is_proper() {
            return Err(SpatialError::DegenerateBounds);
        }
        Ok(Self { bounds, obstacles: Vec::new() })
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Rect>) -> SpatialResult<Self> {
        if let Some(index) = obstacles.iter().position(|o| !o.is_proper()) {
            return Err(SpatialError::DegenerateObstacle { index });
        }
        self.obstacles = obstacles;
        Ok(self)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    /// Teleport a position that has left the bounds to the opposite edge.
    ///
    /// Returns the new position and whether any axis wrapped.  Positions on
    /// the boundary itself are left alone.
    pub fn wrap(&self, pos: Vec2) -> (Vec2, bool) {
        let Rect { min, max } = self.bounds;
        let mut out = pos;
        let mut changed = false;

        if out.x < min.x {
            out.x = max.x;
            changed = true;
        } else if out.x > max.x {
            out.x = min.x;
            changed = true;
        }
        if out.y < min.y {
            out.y = max.y;
            changed = true;
        } else if out.y > max.y {
            out.y = min.y;
            changed = true;
        }
        (out, changed)
    }

    /// `true` if `pos` lies inside any obstacle.
    pub fn collides(&self, pos: Vec2) -> bool {
        self.obstacles.iter().any(|o| o.contains(pos))
    }
}
