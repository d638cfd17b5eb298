use crate::config::SteeringConfig;
use crate::math::{self, Vec2};
use crate::scratch::ScratchArena;
use crate::ship::ShipState;
use crate::world::{Planet, WorldView};

const DEFLECTION: f64 = 45.0;

/// Steers around planets and suns lying across the travel corridor.
#[derive(Default)]
pub struct BigObjAvoider;

struct Obstruction {
    position: Vec2,
    radius: f64,
}

impl BigObjAvoider {
    pub fn new() -> Self {
        Self
    }

    pub fn avoid(
        &self,
        world: &dyn WorldView,
        scratch: &ScratchArena,
        config: &SteeringConfig,
        from: Vec2,
        dest: Vec2,
        to_dest_angle: f64,
    ) -> f64 {
        let mut reach = (dest - from).magnitude().min(config.max_big_obj_lookahead());
        let mut result = to_dest_angle;

        let planets = world.planets().iter().map(|p| Obstruction {
            position: p.position,
            radius: if (dest - p.position).magnitude() < p.full_height() {
                p.ground_height
            } else {
                p.full_height()
            },
        });
        let suns = world.systems().iter().map(|s| Obstruction {
            position: s.position,
            radius: s.sun_radius,
        });

        for obstruction in planets.chain(suns) {
            let mut proj = scratch.take(obstruction.position - from);
            *proj = math::rotate(*proj, -to_dest_angle);
            if proj.x < 0.0 || proj.x > reach || proj.y.abs() >= obstruction.radius {
                continue;
            }
            reach = proj.x;
            result = to_dest_angle + DEFLECTION * math::sign(proj.y < 0.0);
        }

        if result == to_dest_angle {
            return result;
        }
        math::normalize_angle(result)
    }
}

/// Reactive avoidance of small bodies using forward ray casts.
#[derive(Default)]
pub struct SmallObjAvoider;

impl SmallObjAvoider {
    pub fn new() -> Self {
        Self
    }

    pub fn avoid(
        &self,
        world: &dyn WorldView,
        scratch: &ScratchArena,
        config: &SteeringConfig,
        ship: &ShipState,
        to_dest_angle: f64,
        nearest_planet: Option<&Planet>,
    ) -> f64 {
        let speed = ship.velocity.magnitude();
        let time_to_turn = ship.time_to_turn(to_dest_angle + DEFLECTION);
        let ray_len = (speed * (time_to_turn + config.maneuver_time)).max(config.min_raycast_len);

        // Always try the same side first so the ship doesn't flip-flop.
        let candidates = [
            to_dest_angle,
            to_dest_angle + DEFLECTION,
            to_dest_angle - DEFLECTION,
        ];
        for candidate in candidates {
            let candidate = math::normalize_angle(candidate);
            let ray_end = scratch.take(ship.position + math::from_angle_len(candidate, ray_len));
            if !world.ray_hits_obstacle(ship.position, *ray_end, ship.collider) {
                return candidate;
            }
        }

        match nearest_planet {
            Some(planet) if planet.is_inside_atmosphere(ship.position) => {
                math::angle_between(planet.position, ship.position)
            }
            _ => math::normalize_angle(to_dest_angle - DEFLECTION),
        }
    }
}
