use super::{DestProvider, ManeuverDecision, ProviderContext};
use crate::config::SteeringConfig;
use crate::math::Vec2;
use crate::ship::ShipState;

/// For inert bodies: never goes anywhere and never fights.
#[derive(Default)]
pub struct NoDest;

impl NoDest {
    pub fn new() -> Self {
        Self
    }
}

impl DestProvider for NoDest {
    fn destination(&self) -> Option<Vec2> {
        None
    }

    fn desired_speed(&self) -> f64 {
        0.0
    }

    fn should_stop_near_destination(&self) -> bool {
        false
    }

    fn should_avoid_large_bodies(&self) -> bool {
        false
    }

    fn update(&mut self, _ctx: &ProviderContext) {}

    fn evaluate_maneuver(
        &self,
        _config: &SteeringConfig,
        _can_shoot: bool,
        _enemy: &ShipState,
        _near_ground: bool,
    ) -> ManeuverDecision {
        ManeuverDecision::NotApplicable
    }
}
