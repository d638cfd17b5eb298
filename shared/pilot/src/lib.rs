pub mod ability;
pub mod avoid;
pub mod config;
pub mod control;
pub mod dest;
pub mod math;
pub mod mover;
pub mod pilot;
pub mod planet_bind;
pub mod rng;
pub mod scratch;
pub mod ship;
pub mod shooter;
pub mod world;
