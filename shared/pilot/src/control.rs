use crate::config::SteeringConfig;
use crate::scratch::ScratchArena;
use crate::ship::{FarShip, ShipState};
use crate::world::{Planet, WorldView};
use serde::{Deserialize, Serialize};

/// Everything a pilot asks of its ship for one tick.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    pub thrust_forward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub fire2: bool,
    pub use_ability: bool,
}

/// A turn request. Left is counter-clockwise, i.e. toward a larger heading.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum SteeringRequest {
    #[default]
    None,
    TurnLeft,
    TurnRight,
}

impl SteeringRequest {
    pub fn is_turning(self) -> bool {
        self != SteeringRequest::None
    }

    pub fn is_left(self) -> bool {
        self == SteeringRequest::TurnLeft
    }

    pub fn is_right(self) -> bool {
        self == SteeringRequest::TurnRight
    }

    /// `self` unless it is idle, then `other`.
    pub fn or(self, other: SteeringRequest) -> SteeringRequest {
        if self.is_turning() {
            self
        } else {
            other
        }
    }
}

/// What one ship's steering reads during a tick.
#[derive(Clone, Copy)]
pub struct SteeringContext<'a> {
    pub world: &'a dyn WorldView,
    pub scratch: &'a ScratchArena,
    pub config: &'a SteeringConfig,
    pub ship: &'a ShipState,
    pub nearest_planet: Option<&'a Planet>,
}

pub trait Pilot {
    fn update(
        &mut self,
        world: &dyn WorldView,
        ship: &ShipState,
        nearest_enemy: Option<&ShipState>,
    ) -> ControlSignals;

    fn update_far(&mut self, world: &dyn WorldView, ship: &mut FarShip);

    fn controls(&self) -> ControlSignals;

    fn to_debug_string(&self) -> String;
}
