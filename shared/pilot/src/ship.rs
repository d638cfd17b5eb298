use crate::math::{self, Vec2};
use crate::world::{ShipHandle, ShipLocation};
use nalgebra::vector;
use rapier2d_f64::prelude::ColliderHandle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum HullClass {
    Std,
    Big,
    Station,
}

#[derive(Clone, Copy, Debug)]
pub struct HullConfig {
    pub class: HullClass,
    pub approx_radius: f64,
    pub size: f64,
    pub max_life: f64,
}

impl Default for HullConfig {
    fn default() -> HullConfig {
        HullConfig {
            class: HullClass::Std,
            approx_radius: 0.5,
            size: 1.0,
            max_life: 100.0,
        }
    }
}

impl HullConfig {
    pub fn is_big(&self) -> bool {
        self.class == HullClass::Big
    }
}

/// Rotation speeds are in degrees per second.
#[derive(Clone, Copy, Debug)]
pub struct Engine {
    pub acceleration: f64,
    pub max_rotation_speed: f64,
    pub rotation_acceleration: f64,
}

impl Default for Engine {
    fn default() -> Engine {
        Engine {
            acceleration: 2.0,
            max_rotation_speed: 180.0,
            rotation_acceleration: 360.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProjectileConfig {
    pub speed: f64,
    pub acceleration: f64,
    pub guide_rotation_speed: f64,
    pub zero_abs_speed: bool,
}

impl ProjectileConfig {
    pub fn effective_speed(&self) -> f64 {
        self.speed + self.acceleration
    }

    /// Projectiles that find their own way and never need the hull aimed.
    pub fn is_self_aiming(&self) -> bool {
        self.zero_abs_speed || self.guide_rotation_speed > 0.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Gun {
    pub fixed: bool,
    pub ammo: u32,
    pub cooldown_remaining: f64,
    pub max_range: f64,
    pub projectile: ProjectileConfig,
}

impl Default for Gun {
    fn default() -> Gun {
        Gun {
            fixed: true,
            ammo: 10,
            cooldown_remaining: 0.0,
            max_range: 10.0,
            projectile: ProjectileConfig {
                speed: 5.0,
                ..Default::default()
            },
        }
    }
}

impl Gun {
    pub fn can_shoot(&self) -> bool {
        self.ammo > 0 && self.cooldown_remaining <= 0.0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GunMount {
    /// Offset from the hull centre in the hull frame.
    pub rel_pos: Vec2,
    /// Set when a turret on this mount is tracking something by itself.
    pub target_detected: bool,
    pub gun: Option<Gun>,
}

impl Default for GunMount {
    fn default() -> GunMount {
        GunMount {
            rel_pos: vector![0.0, 0.0],
            target_detected: false,
            gun: Some(Gun::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ShipAbility {
    pub cooldown_remaining: f64,
    /// `None` when the ability does not consume charge items.
    pub charges: Option<u32>,
}

/// Snapshot of a simulated ship, read once per tick.
#[derive(Clone, Debug)]
pub struct ShipState {
    pub handle: Option<ShipHandle>,
    pub collider: Option<ColliderHandle>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub rotation_speed: f64,
    pub hull: HullConfig,
    pub engine: Option<Engine>,
    pub life: f64,
    pub primary: Option<GunMount>,
    pub secondary: Option<GunMount>,
    pub ability: Option<ShipAbility>,
}

impl Default for ShipState {
    fn default() -> ShipState {
        ShipState {
            handle: None,
            collider: None,
            position: vector![0.0, 0.0],
            velocity: vector![0.0, 0.0],
            angle: 0.0,
            rotation_speed: 0.0,
            hull: HullConfig::default(),
            engine: Some(Engine::default()),
            life: 100.0,
            primary: None,
            secondary: None,
            ability: None,
        }
    }
}

impl ShipState {
    pub fn gun_mount(&self, second: bool) -> Option<&GunMount> {
        if second {
            self.secondary.as_ref()
        } else {
            self.primary.as_ref()
        }
    }

    pub fn gun(&self, second: bool) -> Option<&Gun> {
        self.gun_mount(second).and_then(|m| m.gun.as_ref())
    }

    pub fn acceleration(&self) -> f64 {
        self.engine.map_or(0.0, |e| e.acceleration)
    }

    pub fn rotation_acceleration(&self) -> f64 {
        self.engine.map_or(0.0, |e| e.rotation_acceleration)
    }

    /// Seconds needed to face `dest_angle` at full rotation speed.
    pub fn time_to_turn(&self, dest_angle: f64) -> f64 {
        match self.engine {
            Some(engine) if engine.max_rotation_speed > 0.0 => {
                math::angle_diff(self.angle, dest_angle) / engine.max_rotation_speed
            }
            _ => 0.0,
        }
    }

    pub fn location(&self) -> ShipLocation {
        ShipLocation {
            position: self.position,
            velocity: self.velocity,
            approx_radius: self.hull.approx_radius,
        }
    }
}

/// Coarse stand-in for a ship outside the simulated area. It has no
/// physics body; its pilot moves it directly.
#[derive(Clone, Debug)]
pub struct FarShip {
    pub handle: Option<ShipHandle>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub hull: HullConfig,
    pub engine: Option<Engine>,
}

impl FarShip {
    pub fn location(&self) -> ShipLocation {
        ShipLocation {
            position: self.position,
            velocity: self.velocity,
            approx_radius: self.hull.approx_radius,
        }
    }
}
