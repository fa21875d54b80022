//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{CarId, GridPos, SimWorld, Snapshot};

/// Size of one grid cell in pixels
pub const CELL_SIZE: f32 = 40.0;

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimResource(pub SimWorld);

/// Latest snapshot published by the simulation tick
#[derive(Resource)]
pub struct SnapshotResource(pub Snapshot);

/// Marker component for a road cell sprite
#[derive(Component)]
pub struct RoadCell(pub GridPos);

/// Marker component for a traffic light sprite
#[derive(Component)]
pub struct LightMarker(pub GridPos);

/// Links a Bevy entity to a simulation car
#[derive(Component)]
pub struct CarMarker(pub CarId);

/// Marker component for the accident highlight sprite
#[derive(Component)]
pub struct AccidentMarker;

/// Marker for alert text overlays
#[derive(Component)]
pub enum OverlayText {
    /// Large "ACCIDENT!" banner
    AccidentAlert,
    /// Accident coordinates line
    AccidentCoords,
    /// Large "CYBER ATTACK!" banner
    CyberAlert,
    /// Affected traffic light list
    AffectedLights,
    /// Pause countdown notice
    PauseNotice,
}

/// World translation of a grid cell center; rows grow downward on screen
pub fn cell_translation(pos: GridPos, grid_size: i32, z: f32) -> Vec3 {
    let half = (grid_size - 1) as f32 / 2.0;
    Vec3::new(
        (pos.col as f32 - half) * CELL_SIZE,
        (half - pos.row as f32) * CELL_SIZE,
        z,
    )
}
