use super::ManeuverDecision;
use crate::config::SteeringConfig;
use crate::control::SteeringContext;
use crate::math::{self, Vec2};
use crate::rng::SeededRng;
use crate::ship::ShipState;
use rand::Rng;

/// Which way to circle the enemy. `None` heads straight out along the
/// enemy-to-ship line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitSense {
    None,
    Clockwise,
    CounterClockwise,
}

impl OrbitSense {
    fn angle_offset(self) -> f64 {
        match self {
            OrbitSense::None => 0.0,
            OrbitSense::Clockwise => -90.0,
            OrbitSense::CounterClockwise => 90.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattlePlan {
    pub destination: Vec2,
    pub stop_near_destination: bool,
}

/// Picks a spot to fight from while an enemy is around.
pub struct BattleManeuver {
    rng: SeededRng,
    sense: OrbitSense,
    direction_change_countdown: f64,
}

impl BattleManeuver {
    /// Starts circling one way or the other and keeps that for a random
    /// while before the first change of mind.
    pub fn new(config: &SteeringConfig, mut rng: SeededRng) -> Self {
        let sense = if rng.gen_bool(0.5) {
            OrbitSense::Clockwise
        } else {
            OrbitSense::CounterClockwise
        };
        let direction_change_countdown =
            rng.gen_range(config.min_dir_change_await..=config.max_dir_change_await);
        Self {
            rng,
            sense,
            direction_change_countdown,
        }
    }

    pub fn sense(&self) -> OrbitSense {
        self.sense
    }

    /// Panics on [`ManeuverDecision::Flee`], which no behaviour supports.
    pub fn plan(
        &mut self,
        ctx: &SteeringContext,
        decision: ManeuverDecision,
        enemy: &ShipState,
        can_shoot_unfixed: bool,
        near_ground: bool,
    ) -> BattlePlan {
        let config = ctx.config;
        self.direction_change_countdown -= ctx.world.time_step();
        if self.direction_change_countdown <= 0.0 {
            self.sense = match self.rng.gen_range(0..3) {
                0 => OrbitSense::None,
                1 => OrbitSense::Clockwise,
                _ => OrbitSense::CounterClockwise,
            };
            self.direction_change_countdown = self
                .rng
                .gen_range(config.min_dir_change_await..=config.max_dir_change_await);
        }

        match decision {
            ManeuverDecision::Engage => {}
            ManeuverDecision::Flee => unimplemented!("fleeing is not supported"),
            ManeuverDecision::NotApplicable => panic!("battle planned without an engagement"),
        }

        let ship = ctx.ship;
        let radii = ship.hull.approx_radius + enemy.hull.approx_radius;
        match ctx.nearest_planet {
            Some(planet) if near_ground => {
                let angle = math::angle_between(planet.position, enemy.position);
                let dist = if can_shoot_unfixed {
                    0.9 * config.auto_shoot_ground
                } else {
                    0.75 * config.cam_view_dist_ground
                };
                BattlePlan {
                    destination: enemy.position + math::from_angle_len(angle, dist + radii),
                    stop_near_destination: false,
                }
            }
            _ => {
                let angle = math::angle_between(enemy.position, ship.position)
                    + self.sense.angle_offset();
                let dist = if can_shoot_unfixed {
                    0.9 * config.auto_shoot_space
                } else {
                    0.5 * config.cam_view_dist_space
                };
                BattlePlan {
                    destination: enemy.position + math::from_angle_len(angle, dist + radii),
                    stop_near_destination: true,
                }
            }
        }
    }
}
