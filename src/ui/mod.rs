//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the
//! `simulation` module. The UI drives the tick schedule, reads the per-tick
//! snapshot, and forwards reset requests from the keyboard.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{SimResource, SnapshotResource};

use input::handle_input;
use sync::{sync_accident, sync_cars, sync_lights, sync_overlays, sync_roads, tick_simulation};
use world::setup_grid;

/// Simulation ticks per second, matching the classic 5 FPS pacing
const TICK_HZ: f64 = 5.0;

/// Plugin to register all UI systems
pub struct SmartCityUIPlugin;

impl Plugin for SmartCityUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(40, 40, 40)))
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_systems(Startup, setup_grid)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    sync_roads,
                    sync_lights,
                    sync_cars,
                    sync_accident,
                    sync_overlays,
                    handle_input,
                ),
            );
    }
}
