//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::components::{
    cell_translation, AccidentMarker, CarMarker, LightMarker, OverlayText, RoadCell, SimResource,
    SnapshotResource, CELL_SIZE,
};
use crate::simulation::{CarId, GridPos, LightColor};

const ROAD_GRAY: Color = Color::srgb(0.39, 0.39, 0.39);
const ATTACK_ORANGE: Color = Color::srgb_u8(255, 165, 0);
const CAR_BLUE: Color = Color::srgb_u8(65, 105, 225);

/// System to run one simulation tick and publish its snapshot
pub fn tick_simulation(mut sim: ResMut<SimResource>, mut snapshot: ResMut<SnapshotResource>) {
    snapshot.0 = sim.0.tick();
}

/// System to tint road cells while a cyberattack is active
pub fn sync_roads(
    sim: Res<SimResource>,
    snapshot: Res<SnapshotResource>,
    mut cells: Query<(&RoadCell, &mut Sprite)>,
) {
    let road_interval = sim.0.config.road_interval;
    for (cell, mut sprite) in cells.iter_mut() {
        let col = cell.0.col;
        sprite.color = if snapshot.0.cyberattack_active && (col + col / road_interval) % 2 == 0 {
            ATTACK_ORANGE
        } else {
            ROAD_GRAY
        };
    }
}

/// System to recolor light markers from the snapshot's display colors
pub fn sync_lights(
    snapshot: Res<SnapshotResource>,
    mut markers: Query<(&LightMarker, &mut Sprite)>,
) {
    let colors: HashMap<GridPos, LightColor> = snapshot
        .0
        .lights
        .iter()
        .map(|light| (light.pos, light.color))
        .collect();

    for (marker, mut sprite) in markers.iter_mut() {
        let Some(color) = colors.get(&marker.0) else {
            continue;
        };
        sprite.color = match color {
            LightColor::Green => Color::srgb_u8(50, 205, 50),
            LightColor::Red => Color::srgb_u8(220, 20, 60),
            LightColor::Yellow => Color::srgb_u8(255, 215, 0),
        };
    }
}

/// System to sync car visuals from simulation state
///
/// Cars despawn and respawn with fresh IDs, so entities are matched by
/// `CarId`: existing markers are moved, stale ones despawned, new ones
/// spawned.
pub fn sync_cars(
    mut commands: Commands,
    sim: Res<SimResource>,
    snapshot: Res<SnapshotResource>,
    mut markers: Query<(Entity, &CarMarker, &mut Transform)>,
) {
    let size = sim.0.grid.size();
    let positions: HashMap<CarId, GridPos> = snapshot
        .0
        .cars
        .iter()
        .map(|car| (car.id, car.pos))
        .collect();

    let mut seen: HashSet<CarId> = HashSet::new();
    for (entity, marker, mut transform) in markers.iter_mut() {
        match positions.get(&marker.0) {
            Some(pos) => {
                seen.insert(marker.0);
                transform.translation = cell_translation(*pos, size, 2.0);
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }

    for car in &snapshot.0.cars {
        if !seen.contains(&car.id) {
            commands.spawn((
                CarMarker(car.id),
                Sprite {
                    color: CAR_BLUE,
                    custom_size: Some(Vec2::splat(CELL_SIZE * 0.5)),
                    ..default()
                },
                Transform::from_translation(cell_translation(car.pos, size, 2.0)),
            ));
        }
    }
}

/// System to show the accident highlight at its location
pub fn sync_accident(
    sim: Res<SimResource>,
    snapshot: Res<SnapshotResource>,
    mut marker: Query<(&mut Transform, &mut Visibility), With<AccidentMarker>>,
) {
    let size = sim.0.grid.size();
    for (mut transform, mut visibility) in marker.iter_mut() {
        match snapshot.0.accident {
            Some(pos) => {
                transform.translation = cell_translation(pos, size, 3.0);
                *visibility = Visibility::Visible;
            }
            None => {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

/// System to update alert overlay visibility and contents
pub fn sync_overlays(
    snapshot: Res<SnapshotResource>,
    mut overlays: Query<(&OverlayText, &mut Text2d, &mut Visibility)>,
) {
    let snap = &snapshot.0;
    for (overlay, mut text, mut visibility) in overlays.iter_mut() {
        let visible = match overlay {
            OverlayText::AccidentAlert => snap.accident_active(),
            OverlayText::AccidentCoords => {
                if let Some(pos) = snap.accident {
                    **text = format!("Coordinates: ({}, {})", pos.col, pos.row);
                }
                snap.accident_active()
            }
            OverlayText::CyberAlert => snap.cyberattack_active,
            OverlayText::AffectedLights => {
                let affected: Vec<String> = snap
                    .affected_lights
                    .iter()
                    .map(|pos| format!("({}, {})", pos.col, pos.row))
                    .collect();
                **text = if affected.is_empty() {
                    "Affected Lights: None (yet)".to_string()
                } else {
                    format!("Affected Lights: {}", affected.join(" "))
                };
                snap.cyberattack_active
            }
            OverlayText::PauseNotice => {
                **text = format!(
                    "Simulation paused for {:.1} more seconds...",
                    snap.pause_secs_remaining
                );
                snap.game_paused
            }
        };
        *visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
