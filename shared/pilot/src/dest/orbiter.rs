use super::{DestProvider, ManeuverDecision, ProviderContext};
use crate::config::SteeringConfig;
use crate::math::{self, Vec2};
use crate::ship::ShipState;
use crate::world::{PlanetId, WorldView};

/// Circles a planet at a fixed height, always chasing a point a little ahead.
pub struct Orbiter {
    planet: PlanetId,
    height: f64,
    clockwise: bool,
    desired_speed: f64,
    destination: Option<Vec2>,
}

impl Orbiter {
    /// `height` is measured from the planet's centre.
    pub fn new(world: &dyn WorldView, planet: PlanetId, height: f64, clockwise: bool) -> Self {
        let desired_speed = match world.planet(planet) {
            Some(p) if height > 0.0 => (p.gravity_constant / height).sqrt(),
            _ => 0.0,
        };
        Self {
            planet,
            height,
            clockwise,
            desired_speed,
            destination: None,
        }
    }

    pub fn planet(&self) -> PlanetId {
        self.planet
    }
}

impl DestProvider for Orbiter {
    fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    fn should_stop_near_destination(&self) -> bool {
        false
    }

    fn should_avoid_large_bodies(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &ProviderContext) {
        let planet = match ctx.world.planet(self.planet) {
            Some(planet) => planet,
            None => {
                log::debug!("orbited planet {:?} does not exist", self.planet);
                self.destination = None;
                return;
            }
        };
        let angle_to_ship = math::angle_between(planet.position, ctx.ship_position);
        let step = ctx.config.orbit_angle_step * math::sign(!self.clockwise);
        let angle = math::normalize_angle(angle_to_ship + step);
        self.destination = Some(planet.position + math::from_angle_len(angle, self.height));
    }

    fn evaluate_maneuver(
        &self,
        _config: &SteeringConfig,
        _can_shoot: bool,
        _enemy: &ShipState,
        _near_ground: bool,
    ) -> ManeuverDecision {
        ManeuverDecision::NotApplicable
    }
}
