use nalgebra::vector;
use sol_pilot::config::SteeringConfig;
use sol_pilot::control::SteeringRequest;
use sol_pilot::math::{self, Vec2};
use sol_pilot::scratch::ScratchArena;
use sol_pilot::ship::{Gun, GunMount, ProjectileConfig, ShipState};
use sol_pilot::shooter::{calc_shoot_angle, Shooter, Shot};
use test_log::test;

fn armed(gun: Gun) -> ShipState {
    ShipState {
        primary: Some(GunMount {
            gun: Some(gun),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn enemy_at(position: Vec2, velocity: Vec2) -> ShipState {
    ShipState {
        position,
        velocity,
        ..Default::default()
    }
}

fn stationary_gun(enemy_pos: Vec2, enemy_velocity: Vec2) -> Shot {
    Shot {
        gun_pos: Vec2::zeros(),
        gun_velocity: Vec2::zeros(),
        enemy_pos,
        enemy_velocity,
        projectile_speed: 5.0,
    }
}

#[test]
fn test_head_on_intercept() {
    let scratch = ScratchArena::new();
    let shot = stationary_gun(vector![10.0, 0.0], vector![0.0, 2.0]);
    let angle = calc_shoot_angle(&scratch, &shot, false, 0.5).unwrap();
    assert!(angle.is_finite());
    assert!(angle > 0.0 && angle < 90.0);
    approx::assert_abs_diff_eq!(angle, 11.54, epsilon = 0.01);

    // Full lead aims further ahead.
    let sharp = calc_shoot_angle(&scratch, &shot, true, 0.5).unwrap();
    assert!(sharp > angle);
    assert!(scratch.is_balanced());
}

#[test]
fn test_unreachable_target() {
    let scratch = ScratchArena::new();
    // Target runs away faster than the projectile.
    let shot = stationary_gun(vector![10.0, 0.0], vector![20.0, 0.0]);
    assert_eq!(calc_shoot_angle(&scratch, &shot, true, 0.5), None);
    assert!(scratch.is_balanced());
}

#[test]
fn test_fires_when_aimed() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let ship = armed(Gun::default());
    let enemy = enemy_at(vector![8.0, 0.5], Vec2::zeros());
    let mut shooter = Shooter::new();
    shooter.update(&scratch, &config, &ship, Some(&enemy), SteeringRequest::None, true);
    assert!(shooter.fire());
    assert!(shooter.fire2());
    assert!(!shooter.is_turning());
    assert!(scratch.is_balanced());
}

#[test]
fn test_turns_toward_target() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let ship = armed(Gun::default());
    let mut shooter = Shooter::new();

    let above = enemy_at(vector![0.0, 8.0], Vec2::zeros());
    shooter.update(&scratch, &config, &ship, Some(&above), SteeringRequest::None, true);
    assert!(!shooter.fire());
    assert_eq!(shooter.steering(), SteeringRequest::TurnLeft);

    let below = enemy_at(vector![0.0, -8.0], Vec2::zeros());
    shooter.update(&scratch, &config, &ship, Some(&below), SteeringRequest::None, true);
    assert_eq!(shooter.steering(), SteeringRequest::TurnRight);

    // The mover has priority.
    shooter.update(&scratch, &config, &ship, Some(&below), SteeringRequest::TurnLeft, true);
    assert_eq!(shooter.steering(), SteeringRequest::None);
    assert!(scratch.is_balanced());
}

#[test]
fn test_range_gating() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let ship = armed(Gun {
        max_range: 10.0,
        ..Default::default()
    });
    let mut shooter = Shooter::new();

    // Dead ahead but out of range: 10 + 0.5 < 11.
    let far = enemy_at(vector![11.0, 0.0], Vec2::zeros());
    shooter.update(&scratch, &config, &ship, Some(&far), SteeringRequest::None, true);
    assert!(!shooter.fire());
    assert!(!shooter.is_turning());

    // Off to the side and out of range: no turn either.
    let far = enemy_at(vector![0.0, 11.0], Vec2::zeros());
    shooter.update(&scratch, &config, &ship, Some(&far), SteeringRequest::None, true);
    assert!(!shooter.fire());
    assert!(!shooter.is_turning());

    let near = enemy_at(vector![10.4, 0.0], Vec2::zeros());
    shooter.update(&scratch, &config, &ship, Some(&near), SteeringRequest::None, true);
    assert!(shooter.fire());
}

#[test]
fn test_holds_fire_without_ammo() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let ship = armed(Gun {
        ammo: 0,
        ..Default::default()
    });
    let enemy = enemy_at(vector![5.0, 0.0], Vec2::zeros());
    let mut shooter = Shooter::new();
    shooter.update(&scratch, &config, &ship, Some(&enemy), SteeringRequest::None, true);
    assert!(!shooter.fire());
    let ship = armed(Gun::default());
    shooter.update(&scratch, &config, &ship, Some(&enemy), SteeringRequest::None, false);
    assert!(!shooter.fire());
}

#[test]
fn test_turret_fires_opportunistically() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let mut ship = armed(Gun {
        fixed: false,
        ..Default::default()
    });
    let behind = enemy_at(vector![-5.0, 0.0], Vec2::zeros());
    let mut shooter = Shooter::new();

    shooter.update(&scratch, &config, &ship, Some(&behind), SteeringRequest::None, true);
    assert!(!shooter.fire());

    ship.primary.as_mut().unwrap().target_detected = true;
    shooter.update(&scratch, &config, &ship, Some(&behind), SteeringRequest::None, true);
    assert!(shooter.fire());
    assert!(!shooter.fire2());
    assert!(!shooter.is_turning());
}

#[test]
fn test_guided_projectiles_widen_margin() {
    let scratch = ScratchArena::new();
    let config = SteeringConfig::default();
    let enemy = enemy_at(math::from_angle_len(30.0, 8.0), Vec2::zeros());
    let mut shooter = Shooter::new();

    let plain = armed(Gun::default());
    shooter.update(&scratch, &config, &plain, Some(&enemy), SteeringRequest::None, true);
    assert!(!shooter.fire());

    // Guided projectiles forgive a much wider aim error.
    let guided = armed(Gun {
        projectile: ProjectileConfig {
            speed: 5.0,
            guide_rotation_speed: 90.0,
            ..Default::default()
        },
        ..Default::default()
    });
    shooter.update(&scratch, &config, &guided, Some(&enemy), SteeringRequest::None, true);
    assert!(shooter.fire());
}
