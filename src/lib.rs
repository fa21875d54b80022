//! Smart City Traffic Simulation Library
//!
//! A grid-based traffic simulation with traffic lights, autonomous cars,
//! and a disruption subsystem (cyberattacks and accidents). The core can
//! run headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
