use super::{DestProvider, ManeuverDecision, ProviderContext};
use crate::config::SteeringConfig;
use crate::math::{self, Vec2};
use crate::ship::{HullConfig, ShipState};
use crate::world::{ShipHandle, ShipLocation, WorldView};
use rand::Rng;

/// Escorts another ship, keeping station beside it.
///
/// The escorted ship is looked up by handle every tick, so it may switch
/// between a simulated and a far representation without the guardian
/// noticing. A lost target leaves the guardian without a destination until
/// the handle resolves again.
pub struct Guardian {
    target: ShipHandle,
    rel_angle: f64,
    desired_speed: f64,
    destination: Option<Vec2>,
    target_location: Option<ShipLocation>,
}

impl Guardian {
    pub fn new(
        world: &dyn WorldView,
        config: &SteeringConfig,
        hull: &HullConfig,
        target: ShipHandle,
        rel_angle: f64,
    ) -> Self {
        let mut guardian = Self {
            target,
            rel_angle: math::normalize_angle(rel_angle),
            desired_speed: config.max_move_speed,
            destination: None,
            target_location: None,
        };
        guardian.track(world, config, hull);
        guardian
    }

    /// Keeps station at a random angle around the target.
    pub fn with_random_angle(
        world: &dyn WorldView,
        config: &SteeringConfig,
        hull: &HullConfig,
        target: ShipHandle,
        rng: &mut impl Rng,
    ) -> Self {
        Self::new(world, config, hull, target, rng.gen_range(-180.0..180.0))
    }

    pub fn target(&self) -> ShipHandle {
        self.target
    }

    pub fn rel_angle(&self) -> f64 {
        self.rel_angle
    }

    fn track(&mut self, world: &dyn WorldView, config: &SteeringConfig, hull: &HullConfig) {
        self.target_location = world.locate_ship(self.target);
        let target = match self.target_location {
            Some(target) => target,
            None => {
                if self.destination.is_some() {
                    log::debug!("guardian lost track of {:?}", self.target);
                }
                self.destination = None;
                return;
            }
        };

        let angle = match world.nearest_planet(target.position) {
            Some(planet) if planet.is_near_ground(target.position) => {
                math::angle_between(planet.position, target.position)
            }
            _ => self.rel_angle,
        };
        let dist = target.approx_radius / 2.0 + config.guardian_gap + hull.approx_radius / 2.0;
        self.destination = Some(target.position + math::from_angle_len(angle, dist));
    }
}

impl DestProvider for Guardian {
    fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    fn destination_velocity(&self) -> Vec2 {
        self.target_location.map_or(Vec2::zeros(), |t| t.velocity)
    }

    fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    fn should_stop_near_destination(&self) -> bool {
        true
    }

    fn should_avoid_large_bodies(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &ProviderContext) {
        self.track(ctx.world, ctx.config, ctx.hull);
    }

    fn evaluate_maneuver(
        &self,
        config: &SteeringConfig,
        can_shoot: bool,
        enemy: &ShipState,
        near_ground: bool,
    ) -> ManeuverDecision {
        if !can_shoot {
            return ManeuverDecision::NotApplicable;
        }
        let max_maneuver_dist = 2.0 * config.cam_view_dist(near_ground);
        if let Some(target) = self.target_location {
            if (target.position - enemy.position).magnitude() > max_maneuver_dist {
                return ManeuverDecision::NotApplicable;
            }
        }
        ManeuverDecision::Engage
    }
}
