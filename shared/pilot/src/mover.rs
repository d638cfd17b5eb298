use crate::avoid::{BigObjAvoider, SmallObjAvoider};
use crate::config::SteeringConfig;
use crate::control::{SteeringContext, SteeringRequest};
use crate::dest::DestinationIntent;
use crate::math::{self, Vec2};
use crate::ship::ShipState;
use crate::world::Planet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoverState {
    Idle,
    Approaching,
    Braking,
    RotatingOnly,
}

/// Bang-bang turn decision.
///
/// Projects where the rotation would stop if braking started now. If that
/// crosses `dest_angle`, the ship has to counter-turn already.
pub fn needs_to_turn(
    angle: f64,
    dest_angle: f64,
    rotation_speed: f64,
    rotation_acceleration: f64,
    allowed_angle_diff: f64,
) -> SteeringRequest {
    if math::angle_diff(dest_angle, angle) < allowed_angle_diff || rotation_acceleration == 0.0 {
        return SteeringRequest::None;
    }

    let break_way = rotation_speed * rotation_speed / rotation_acceleration / 2.0;
    let angle_after_break = angle + break_way * math::sign(rotation_speed > 0.0);
    let rel_angle = math::normalize_angle(angle - dest_angle);
    let rel_angle_after_break = math::normalize_angle(angle_after_break - dest_angle);
    let increase = if (rel_angle > 0.0) == (rel_angle_after_break > 0.0) {
        rel_angle < 0.0
    } else {
        rel_angle > 0.0
    };
    if increase {
        SteeringRequest::TurnLeft
    } else {
        SteeringRequest::TurnRight
    }
}

/// Turns a destination into thrust and turn signals.
pub struct Mover {
    big_obj_avoider: BigObjAvoider,
    small_obj_avoider: SmallObjAvoider,
    state: MoverState,
    thrust: bool,
    steering: SteeringRequest,
    desired_velocity: Vec2,
}

impl Default for Mover {
    fn default() -> Self {
        Self::new()
    }
}

impl Mover {
    pub fn new() -> Self {
        Self {
            big_obj_avoider: BigObjAvoider::new(),
            small_obj_avoider: SmallObjAvoider::new(),
            state: MoverState::Idle,
            thrust: false,
            steering: SteeringRequest::None,
            desired_velocity: Vec2::zeros(),
        }
    }

    pub fn update(
        &mut self,
        ctx: &SteeringContext,
        intent: &DestinationIntent,
        max_idle_dist: f64,
    ) {
        self.state = MoverState::Idle;
        self.thrust = false;
        self.steering = SteeringRequest::None;

        let ship = ctx.ship;
        let dest = match intent.destination {
            Some(dest) if ship.engine.is_some() => dest,
            _ => return,
        };

        let to_dest_len = (dest - ship.position).magnitude();
        let near_dest = to_dest_len < max_idle_dist;
        if near_dest {
            if !intent.stop_near_destination {
                return;
            }
            self.desired_velocity = hover_velocity(ship, intent, ctx.nearest_planet);
            self.state = MoverState::Braking;
        } else if self.update_desired_velocity(ctx, intent, dest, to_dest_len) {
            self.state = MoverState::Braking;
        } else {
            self.state = MoverState::Approaching;
        }

        let config = ctx.config;
        let speed_deviation = (ship.velocity - self.desired_velocity).magnitude();
        let matching = if near_dest {
            speed_deviation < config.near_dest_speed_deviation
        } else {
            speed_deviation < config.max_abs_speed_deviation
                || speed_deviation < config.max_rel_speed_deviation * ship.velocity.magnitude()
        };
        if matching {
            self.state = MoverState::RotatingOnly;
            return;
        }

        let desired_angle = math::angle_between(ship.velocity, self.desired_velocity);
        self.thrust = math::angle_diff(desired_angle, ship.angle) < config.min_angle_to_accelerate;
        self.steering = needs_to_turn(
            ship.angle,
            desired_angle,
            ship.rotation_speed,
            ship.rotation_acceleration(),
            config.min_move_angle_deviation,
        );
    }

    // Returns true when the ship should brake instead of cruising.
    fn update_desired_velocity(
        &mut self,
        ctx: &SteeringContext,
        intent: &DestinationIntent,
        dest: Vec2,
        to_dest_len: f64,
    ) -> bool {
        let ship = ctx.ship;
        let to_dest_angle = self.to_dest_angle(ctx, dest, intent);
        if intent.stop_near_destination {
            let tangent_speed = math::project(ship.velocity, to_dest_angle);
            let turn_way = tangent_speed * ship.time_to_turn(to_dest_angle + 180.0);
            let acceleration = ship.acceleration();
            let break_way = if acceleration > 0.0 {
                tangent_speed * tangent_speed / acceleration / 2.0
            } else {
                f64::INFINITY
            };
            if to_dest_len < 0.5 * tangent_speed + turn_way + break_way {
                self.desired_velocity = intent.destination_velocity;
                return true;
            }
        }
        self.desired_velocity = math::from_angle_len(to_dest_angle, intent.desired_speed);
        false
    }

    fn to_dest_angle(&self, ctx: &SteeringContext, dest: Vec2, intent: &DestinationIntent) -> f64 {
        let ship = ctx.ship;
        let mut angle = math::angle_between(ship.position, dest);
        if intent.avoid_large_bodies {
            angle = self.big_obj_avoider.avoid(
                ctx.world,
                ctx.scratch,
                ctx.config,
                ship.position,
                dest,
                angle,
            );
        }
        self.small_obj_avoider.avoid(
            ctx.world,
            ctx.scratch,
            ctx.config,
            ship,
            angle,
            ctx.nearest_planet,
        )
    }

    /// Keeps a ship that has nothing else to do facing somewhere sensible:
    /// along its travel direction in space, or away from the surface when
    /// parked on a planet.
    pub fn rotate_on_idle(
        &mut self,
        config: &SteeringConfig,
        ship: &ShipState,
        intent: &DestinationIntent,
        nearest_planet: Option<&Planet>,
        max_idle_dist: f64,
    ) {
        if self.is_active() {
            return;
        }
        let dest = match intent.destination {
            Some(dest) => dest,
            None => return,
        };
        let near_final_dest =
            intent.stop_near_destination && (dest - ship.position).magnitude() < max_idle_dist;
        let desired_angle = match (near_final_dest, nearest_planet) {
            // Stopping in space, don't care about the angle.
            (true, None) => return,
            (true, Some(planet)) => {
                if !planet.is_inside_atmosphere(ship.position) {
                    return;
                }
                math::angle_between(planet.position, ship.position)
            }
            (false, planet) => {
                let near_planet = planet.map_or(false, |p| {
                    (p.position - ship.position).magnitude() < p.full_height() + p.atmosphere_height
                });
                if near_planet || ship.velocity.magnitude() < config.max_abs_speed_deviation {
                    return;
                }
                math::angle_of(ship.velocity)
            }
        };

        self.steering = needs_to_turn(
            ship.angle,
            desired_angle,
            ship.rotation_speed,
            ship.rotation_acceleration(),
            config.idle_rotation_angle_deviation,
        );
    }

    pub fn state(&self) -> MoverState {
        self.state
    }

    pub fn thrust(&self) -> bool {
        self.thrust
    }

    pub fn steering(&self) -> SteeringRequest {
        self.steering
    }

    pub fn is_active(&self) -> bool {
        self.thrust || self.steering.is_turning()
    }

    pub fn desired_velocity(&self) -> Vec2 {
        self.desired_velocity
    }

    pub fn big_obj_avoider(&self) -> &BigObjAvoider {
        &self.big_obj_avoider
    }
}

// Matches the surface under the destination. Radial motion is left alone so
// a ship settling onto the ground is not pushed back up.
fn hover_velocity(ship: &ShipState, intent: &DestinationIntent, planet: Option<&Planet>) -> Vec2 {
    match planet {
        Some(planet) if planet.is_inside_atmosphere(ship.position) => {
            let up = ship.position - planet.position;
            if up.magnitude() == 0.0 {
                return intent.destination_velocity;
            }
            let up = up.normalize();
            let radial = (ship.velocity - intent.destination_velocity).dot(&up);
            intent.destination_velocity + up * radial
        }
        _ => intent.destination_velocity,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_no_turn_within_tolerance() {
        for rotation_speed in [-90.0, 0.0, 90.0] {
            assert_eq!(
                needs_to_turn(10.0, 12.0, rotation_speed, 100.0, 5.0),
                SteeringRequest::None
            );
            assert_eq!(
                needs_to_turn(179.0, -179.0, rotation_speed, 100.0, 5.0),
                SteeringRequest::None
            );
        }
    }

    #[test]
    fn test_turns_toward_target_at_rest() {
        assert_eq!(needs_to_turn(0.0, 90.0, 0.0, 100.0, 5.0), SteeringRequest::TurnLeft);
        assert_eq!(needs_to_turn(0.0, -90.0, 0.0, 100.0, 5.0), SteeringRequest::TurnRight);
        assert_eq!(needs_to_turn(170.0, -150.0, 0.0, 100.0, 5.0), SteeringRequest::TurnLeft);
    }

    #[test]
    fn test_counter_turns_before_overshoot() {
        // Rotating left at 100 deg/s needs 50 degrees to stop, only 30 left.
        assert_eq!(needs_to_turn(0.0, 30.0, 100.0, 100.0, 5.0), SteeringRequest::TurnRight);
        // Plenty of room left.
        assert_eq!(needs_to_turn(0.0, 90.0, 100.0, 100.0, 5.0), SteeringRequest::TurnLeft);
        // Mirror image.
        assert_eq!(needs_to_turn(0.0, -30.0, -100.0, 100.0, 5.0), SteeringRequest::TurnLeft);
    }

    #[test]
    fn test_no_rotation_acceleration() {
        assert_eq!(needs_to_turn(0.0, 90.0, 0.0, 0.0, 5.0), SteeringRequest::None);
    }
}
