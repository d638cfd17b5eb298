use crate::config::SteeringConfig;
use crate::control::SteeringRequest;
use crate::math::{self, Vec2};
use crate::mover::needs_to_turn;
use crate::scratch::ScratchArena;
use crate::ship::{Gun, ShipState};

/// A gun and its target, both in world space.
#[derive(Clone, Copy, Debug)]
pub struct Shot {
    pub gun_pos: Vec2,
    pub gun_velocity: Vec2,
    pub enemy_pos: Vec2,
    pub enemy_velocity: Vec2,
    pub projectile_speed: f64,
}

/// Firing angle that leads a moving target.
///
/// Unless `sharp` is set only `enemy_speed_fraction` of the enemy velocity is
/// led, which lands between full lead and pure pursuit. Returns `None` when
/// the projectile can never catch the target.
pub fn calc_shoot_angle(
    scratch: &ScratchArena,
    shot: &Shot,
    sharp: bool,
    enemy_speed_fraction: f64,
) -> Option<f64> {
    let fraction = if sharp { 1.0 } else { enemy_speed_fraction };
    let rel_enemy_velocity = scratch.take(shot.enemy_velocity * fraction - shot.gun_velocity);
    let rot_angle = math::angle_of(*rel_enemy_velocity);
    let v = rel_enemy_velocity.magnitude();

    let mut to_enemy = scratch.take(shot.enemy_pos - shot.gun_pos);
    *to_enemy = math::rotate(*to_enemy, -rot_angle);
    let (x, y) = (to_enemy.x, to_enemy.y);
    let a = v * v - shot.projectile_speed * shot.projectile_speed;
    let b = 2.0 * x * v;
    let c = x * x + y * y;
    let t = math::solve_quadratic(a, b, c)?;
    to_enemy.x += t * v;
    Some(math::normalize_angle(math::angle_of(*to_enemy) + rot_angle))
}

/// Aims the hull at the nearest enemy and decides when to pull the trigger.
#[derive(Default)]
pub struct Shooter {
    fire: bool,
    fire2: bool,
    steering: SteeringRequest,
}

impl Shooter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn requests are only made while `mover_steering` is idle.
    pub fn update(
        &mut self,
        scratch: &ScratchArena,
        config: &SteeringConfig,
        ship: &ShipState,
        enemy: Option<&ShipState>,
        mover_steering: SteeringRequest,
        can_shoot: bool,
    ) {
        self.fire = false;
        self.fire2 = false;
        self.steering = SteeringRequest::None;

        let enemy = match enemy {
            Some(enemy) if can_shoot => enemy,
            _ => return,
        };
        let enemy_radius = enemy.hull.approx_radius;
        let to_enemy_dst = (enemy.position - ship.position).magnitude();

        let g1 = self.process_gun(ship, false, to_enemy_dst, enemy_radius);
        let g2 = self.process_gun(ship, true, to_enemy_dst, enemy_radius);

        // Aim with whichever fixed gun shoots faster.
        let (second, gun) = match (g1, g2) {
            (None, None) => return,
            (Some(g1), None) => (false, g1),
            (None, Some(g2)) => (true, g2),
            (Some(g1), Some(g2)) => {
                if g1.projectile.effective_speed() < g2.projectile.effective_speed() {
                    (true, g2)
                } else {
                    (false, g1)
                }
            }
        };
        if to_enemy_dst > gun.max_range + enemy_radius {
            return;
        }

        let projectile_speed = gun.projectile.effective_speed();
        let rel_pos = ship.gun_mount(second).map_or(Vec2::zeros(), |m| m.rel_pos);
        let gun_pos = scratch.take(math::to_world(rel_pos, ship.angle, ship.position));
        let shot = Shot {
            gun_pos: *gun_pos,
            gun_velocity: ship.velocity,
            enemy_pos: enemy.position,
            enemy_velocity: enemy.velocity,
            projectile_speed,
        };
        let lead = calc_shoot_angle(scratch, &shot, false, config.enemy_speed_fraction);
        let shoot_angle = match lead {
            Some(angle) => angle,
            None => return,
        };
        // The lead was computed from the muzzle; the hull turns about its centre.
        let to_ship = math::angle_between(enemy.position, ship.position);
        let to_gun = math::angle_between(enemy.position, *gun_pos);
        let shoot_angle = math::normalize_angle(shoot_angle + to_gun - to_ship);

        let mut max_angle_diff =
            math::angular_width_of_sphere(enemy_radius, to_enemy_dst) + config.shoot_angle_margin;
        if projectile_speed > 0.0 && gun.projectile.guide_rotation_speed > 0.0 {
            max_angle_diff += gun.projectile.guide_rotation_speed * to_enemy_dst / projectile_speed;
        }
        if math::angle_diff(shoot_angle, ship.angle) < max_angle_diff {
            self.fire = true;
            self.fire2 = true;
            return;
        }

        if mover_steering.is_turning() {
            return;
        }
        self.steering = needs_to_turn(
            ship.angle,
            shoot_angle,
            ship.rotation_speed,
            ship.rotation_acceleration(),
            config.min_shoot_angle_deviation,
        );
    }

    // Returns the gun if the hull has to be aimed for it. Turrets and
    // projectiles that fly by themselves fire whenever the target is in range.
    fn process_gun(
        &mut self,
        ship: &ShipState,
        second: bool,
        to_enemy_dst: f64,
        enemy_radius: f64,
    ) -> Option<Gun> {
        let mount = ship.gun_mount(second)?;
        let gun = mount.gun.filter(|g| g.ammo > 0)?;
        if gun.fixed && !gun.projectile.zero_abs_speed {
            return Some(gun);
        }
        let in_range = to_enemy_dst <= gun.max_range + enemy_radius;
        if in_range && (gun.projectile.is_self_aiming() || mount.target_detected) {
            if second {
                self.fire2 = true;
            } else {
                self.fire = true;
            }
        }
        None
    }

    pub fn fire(&self) -> bool {
        self.fire
    }

    pub fn fire2(&self) -> bool {
        self.fire2
    }

    pub fn steering(&self) -> SteeringRequest {
        self.steering
    }

    pub fn is_turning(&self) -> bool {
        self.steering.is_turning()
    }
}
