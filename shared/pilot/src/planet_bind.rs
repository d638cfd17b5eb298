use crate::math::{self, Vec2};
use crate::world::{PlanetId, WorldView};

/// A point and heading pinned to a rotating planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanetBind {
    planet: PlanetId,
    rel_pos: Vec2,
    rel_angle: f64,
}

impl PlanetBind {
    /// Binds to the nearest planet if `pos` is close to its ground.
    pub fn try_bind(world: &dyn WorldView, pos: Vec2, angle: f64) -> Option<PlanetBind> {
        let planet = world.nearest_planet(pos)?;
        if !planet.is_near_ground(pos) {
            return None;
        }
        Some(PlanetBind {
            planet: planet.id,
            rel_pos: planet.to_rel(pos),
            rel_angle: angle - planet.angle,
        })
    }

    pub fn planet(&self) -> PlanetId {
        self.planet
    }

    /// Where the bound point is now. `None` if the planet is gone.
    pub fn world_position(&self, world: &dyn WorldView) -> Option<Vec2> {
        let planet = world.planet(self.planet)?;
        Some(planet.to_world(self.rel_pos))
    }

    /// How far the bound point has moved away from `pos`.
    pub fn diff(&self, world: &dyn WorldView, pos: Vec2) -> Option<Vec2> {
        Some(self.world_position(world)? - pos)
    }

    pub fn desired_angle(&self, world: &dyn WorldView) -> Option<f64> {
        let planet = world.planet(self.planet)?;
        Some(math::normalize_angle(self.rel_angle + planet.angle))
    }
}
