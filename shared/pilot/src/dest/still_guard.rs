use super::{ai_speed, DestProvider, ManeuverDecision, ProviderContext};
use crate::config::SteeringConfig;
use crate::math::Vec2;
use crate::planet_bind::PlanetBind;
use crate::ship::{HullConfig, ShipState};
use crate::world::WorldView;

/// Holds a point. A point near a planet's ground turns with the planet.
pub struct StillGuard {
    destination: Vec2,
    destination_velocity: Vec2,
    desired_speed: f64,
    planet_bind: Option<PlanetBind>,
}

impl StillGuard {
    pub fn new(
        world: &dyn WorldView,
        config: &SteeringConfig,
        target: Vec2,
        hull: &HullConfig,
    ) -> Self {
        Self {
            destination: target,
            destination_velocity: Vec2::zeros(),
            desired_speed: ai_speed(config, hull),
            planet_bind: PlanetBind::try_bind(world, target, 0.0),
        }
    }

    pub fn planet_bind(&self) -> Option<&PlanetBind> {
        self.planet_bind.as_ref()
    }
}

impl DestProvider for StillGuard {
    fn destination(&self) -> Option<Vec2> {
        Some(self.destination)
    }

    fn destination_velocity(&self) -> Vec2 {
        self.destination_velocity
    }

    fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    fn should_stop_near_destination(&self) -> bool {
        true
    }

    fn should_avoid_large_bodies(&self) -> bool {
        true
    }

    fn update(&mut self, ctx: &ProviderContext) {
        let bind = match &self.planet_bind {
            Some(bind) => bind,
            None => return,
        };
        let planet = bind.planet();
        if let Some(position) = bind.world_position(ctx.world) {
            self.destination = position;
        }
        if let Some(planet) = ctx.world.planet(planet) {
            self.destination_velocity = planet.velocity_at(self.destination);
        }
    }

    fn evaluate_maneuver(
        &self,
        _config: &SteeringConfig,
        _can_shoot: bool,
        _enemy: &ShipState,
        _near_ground: bool,
    ) -> ManeuverDecision {
        ManeuverDecision::Engage
    }
}
