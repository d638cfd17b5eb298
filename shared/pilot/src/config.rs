use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct SteeringConfig {
    // World scale.
    pub atmosphere_height: f64,
    pub max_ground_height: f64,
    pub sun_radius: f64,
    pub cam_view_dist_space: f64,
    pub cam_view_dist_ground: f64,
    pub auto_shoot_space: f64,
    pub auto_shoot_ground: f64,

    // Cruise speeds.
    pub max_move_speed: f64,
    pub default_ai_speed: f64,
    pub big_ai_speed: f64,

    // Battle.
    pub min_idle_dist: f64,
    pub max_ground_battle_speed: f64,
    pub max_battle_speed_big: f64,
    pub max_battle_speed: f64,
    pub min_dir_change_await: f64,
    pub max_dir_change_await: f64,

    // Mover.
    pub min_angle_to_accelerate: f64,
    pub min_move_angle_deviation: f64,
    pub idle_rotation_angle_deviation: f64,
    pub max_abs_speed_deviation: f64,
    pub max_rel_speed_deviation: f64,
    pub near_dest_speed_deviation: f64,

    // Small object avoidance.
    pub maneuver_time: f64,
    pub min_raycast_len: f64,

    // Shooter.
    pub enemy_speed_fraction: f64,
    pub min_shoot_angle_deviation: f64,
    pub shoot_angle_margin: f64,

    // Providers.
    pub max_await_on_planet: f64,
    pub last_planets_to_avoid: usize,
    pub guardian_gap: f64,
    pub orbit_angle_step: f64,

    // Far ships.
    pub max_bind_await: f64,
    pub far_stop_dist: f64,
    pub max_re_equip_await: f64,
}

impl SteeringConfig {
    /// Longest stretch of a path checked for planets and suns.
    pub fn max_big_obj_lookahead(&self) -> f64 {
        2.0 * (self.max_ground_height + self.atmosphere_height)
    }

    pub fn cam_view_dist(&self, near_ground: bool) -> f64 {
        if near_ground {
            self.cam_view_dist_ground
        } else {
            self.cam_view_dist_space
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        let atmosphere_height = 14.0;
        let max_ground_height = 25.0;
        Self {
            atmosphere_height,
            max_ground_height,
            sun_radius: 2.0 * (max_ground_height + atmosphere_height),
            cam_view_dist_space: 13.0,
            cam_view_dist_ground: 3.6,
            auto_shoot_space: 6.5,
            auto_shoot_ground: 1.8,

            max_move_speed: 8.0,
            default_ai_speed: 4.0,
            big_ai_speed: 2.0,

            min_idle_dist: 0.8,
            max_ground_battle_speed: 0.7,
            max_battle_speed_big: 1.0,
            max_battle_speed: 2.0,
            min_dir_change_await: 10.0,
            max_dir_change_await: 15.0,

            min_angle_to_accelerate: 25.0,
            min_move_angle_deviation: 5.0,
            idle_rotation_angle_deviation: 15.0,
            max_abs_speed_deviation: 0.1,
            max_rel_speed_deviation: 0.05,
            near_dest_speed_deviation: 0.05,

            maneuver_time: 2.0,
            min_raycast_len: 0.5,

            enemy_speed_fraction: 0.5,
            min_shoot_angle_deviation: 2.0,
            shoot_angle_margin: 10.0,

            max_await_on_planet: 30.0,
            last_planets_to_avoid: 2,
            guardian_gap: 2.0,
            orbit_angle_step: 5.0,

            max_bind_await: 0.25,
            far_stop_dist: 0.05,
            max_re_equip_await: 3.0,
        }
    }
}
