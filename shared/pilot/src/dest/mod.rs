//! Destination-intent providers.
//!
//! Each autonomous behaviour answers the same questions every tick: where
//! to go, how fast, whether to stop there and whether to steer around
//! planets. `AiPilot` only ever talks to the `DestProvider` trait.
pub mod battle;
pub mod explorer;
pub mod guardian;
pub mod no_dest;
pub mod orbiter;
pub mod still_guard;

use crate::config::SteeringConfig;
use crate::math::Vec2;
use crate::ship::{HullConfig, ShipState};
use crate::world::WorldView;
use serde::{Deserialize, Serialize};

pub use battle::BattleManeuver;
pub use explorer::Explorer;
pub use guardian::Guardian;
pub use no_dest::NoDest;
pub use orbiter::Orbiter;
pub use still_guard::StillGuard;

/// What a ship is trying to do this tick. Hosts may record it alongside the
/// control signals.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct DestinationIntent {
    /// `None` means hold and emit no movement signals.
    pub destination: Option<Vec2>,
    /// Velocity to match once the destination is reached.
    pub destination_velocity: Vec2,
    pub desired_speed: f64,
    pub stop_near_destination: bool,
    pub avoid_large_bodies: bool,
}

impl Default for DestinationIntent {
    fn default() -> Self {
        Self {
            destination: None,
            destination_velocity: Vec2::zeros(),
            desired_speed: 0.0,
            stop_near_destination: false,
            avoid_large_bodies: false,
        }
    }
}

/// Whether the battle planner overrides the provider this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManeuverDecision {
    NotApplicable,
    Flee,
    Engage,
}

/// Everything a provider may look at during `update`.
pub struct ProviderContext<'a> {
    pub world: &'a dyn WorldView,
    pub config: &'a SteeringConfig,
    pub ship_position: Vec2,
    pub max_idle_dist: f64,
    pub hull: &'a HullConfig,
    pub nearest_enemy: Option<&'a ShipState>,
}

pub trait DestProvider {
    fn destination(&self) -> Option<Vec2>;

    fn destination_velocity(&self) -> Vec2 {
        Vec2::zeros()
    }

    fn desired_speed(&self) -> f64;

    fn should_stop_near_destination(&self) -> bool;

    fn should_avoid_large_bodies(&self) -> bool;

    fn update(&mut self, ctx: &ProviderContext);

    fn evaluate_maneuver(
        &self,
        config: &SteeringConfig,
        can_shoot: bool,
        enemy: &ShipState,
        near_ground: bool,
    ) -> ManeuverDecision;

    fn intent(&self) -> DestinationIntent {
        DestinationIntent {
            destination: self.destination(),
            destination_velocity: self.destination_velocity(),
            desired_speed: self.desired_speed(),
            stop_near_destination: self.should_stop_near_destination(),
            avoid_large_bodies: self.should_avoid_large_bodies(),
        }
    }
}

/// Cruise speed for autonomous ships of the given hull.
pub fn ai_speed(config: &SteeringConfig, hull: &HullConfig) -> f64 {
    if hull.is_big() {
        config.big_ai_speed
    } else {
        config.default_ai_speed
    }
}
