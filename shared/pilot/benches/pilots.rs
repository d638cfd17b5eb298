use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::vector;
use sol_pilot::config::SteeringConfig;
use sol_pilot::control::Pilot;
use sol_pilot::dest::{Explorer, StillGuard};
use sol_pilot::math::Vec2;
use sol_pilot::pilot::AiPilot;
use sol_pilot::rng::new_rng;
use sol_pilot::scratch::ScratchArena;
use sol_pilot::ship::{Engine, FarShip, Gun, GunMount, HullConfig, ShipState};
use sol_pilot::shooter::{calc_shoot_angle, Shot};
use sol_pilot::world::{Planet, World};

const TICK: f64 = 1.0 / 60.0;

fn crowded_world() -> World {
    let mut world = World::new(TICK);
    let system = world.add_system(Vec2::zeros(), 200.0, false);
    for i in 0..8 {
        world.add_planet(Planet {
            system,
            position: vector![40.0 * (i + 1) as f64, 0.0],
            landing_places: vec![vector![0.0, 12.0]],
            ..Default::default()
        });
    }
    for i in 0..100 {
        let x = (i % 10) as f64 * 3.0 - 15.0;
        let y = (i / 10) as f64 * 3.0 + 20.0;
        world.add_body(vector![x, y], 0.5);
    }
    world
}

fn battle(world: &World) {
    let config = SteeringConfig::default();
    let mut ship = ShipState {
        position: vector![0.0, 20.0],
        primary: Some(GunMount {
            gun: Some(Gun::default()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let enemy = ShipState {
        position: vector![10.0, 30.0],
        velocity: vector![1.0, 0.0],
        ..Default::default()
    };
    let provider = StillGuard::new(world, &config, ship.position, &ship.hull);
    let mut pilot = AiPilot::new(Box::new(provider), config, 0);
    for _ in 0..600 {
        let controls = pilot.update(world, &ship, Some(&enemy));
        if controls.thrust_forward {
            ship.velocity += sol_pilot::math::from_angle_len(ship.angle, TICK);
        }
        ship.position += ship.velocity * TICK;
    }
    black_box(pilot.controls());
}

fn explore_far(world: &World) {
    let config = SteeringConfig::default();
    let hull = HullConfig::default();
    let position = vector![-50.0, 0.0];
    let provider = Explorer::new(world, &config, new_rng(0), 0, position, false, &hull);
    let mut pilot = AiPilot::new(Box::new(provider), config, 0);
    let mut ship = FarShip {
        handle: None,
        position,
        velocity: Vec2::zeros(),
        angle: 0.0,
        hull,
        engine: Some(Engine::default()),
    };
    for _ in 0..6000 {
        pilot.update_far(world, &mut ship);
    }
    black_box(ship.position);
}

fn criterion_benchmark(c: &mut Criterion) {
    let world = crowded_world();
    c.bench_function("battle", |b| b.iter(|| battle(&world)));
    c.bench_function("explore-far", |b| b.iter(|| explore_far(&world)));

    let scratch = ScratchArena::new();
    let shot = Shot {
        gun_pos: Vec2::zeros(),
        gun_velocity: Vec2::zeros(),
        enemy_pos: vector![10.0, 0.0],
        enemy_velocity: vector![0.0, 2.0],
        projectile_speed: 5.0,
    };
    c.bench_function("shoot-angle", |b| {
        b.iter(|| calc_shoot_angle(&scratch, black_box(&shot), true, 0.5))
    });
}

pub fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(10)
        .measurement_time(core::time::Duration::from_secs(20))
}

criterion_group!(name = benches;
                 config = criterion_config();
                 targets = criterion_benchmark);
criterion_main!(benches);
