//! Standalone traffic simulation module
//!
//! This module contains all the core simulation logic: the road grid,
//! traffic lights, cars, and the disruption subsystem. It can run and be
//! tested via console without needing to boot up the full game.

mod car;
mod clock;
mod config;
mod disruption;
mod grid;
mod lights;
mod rng;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use car::{Car, MoveOutcome};
#[allow(unused_imports)]
pub use clock::SimClock;
#[allow(unused_imports)]
pub use config::SimConfig;
#[allow(unused_imports)]
pub use disruption::{
    Accident, DisruptionManager, ERRATIC_HEADING_CHANCE, LIGHT_CORRUPTION_CHANCE,
    LIGHT_OVERRIDE_CHANCE, STALL_CHANCE,
};
#[allow(unused_imports)]
pub use grid::RoadGrid;
#[allow(unused_imports)]
pub use lights::LightBoard;
#[allow(unused_imports)]
pub use rng::SimRng;
#[allow(unused_imports)]
pub use types::{Axis, CarId, GridPos, Heading, LightColor, LightPhase};
pub use world::{CarView, LightView, SimWorld, Snapshot};
