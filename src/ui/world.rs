//! Startup systems that build the static grid visuals

use bevy::prelude::*;

use super::components::{
    cell_translation, AccidentMarker, LightMarker, OverlayText, RoadCell, SimResource, CELL_SIZE,
};
use crate::simulation::GridPos;

const ROAD_GRAY: Color = Color::srgb(0.39, 0.39, 0.39);
const ALERT_RED: Color = Color::srgb_u8(220, 20, 60);

/// Spawn the camera, road cells, light markers, and hidden overlays
pub fn setup_grid(mut commands: Commands, sim: Res<SimResource>) {
    commands.spawn(Camera2d);

    let grid = &sim.0.grid;
    let size = grid.size();

    // Road cells
    for col in 0..size {
        for row in 0..size {
            let pos = GridPos::new(col, row);
            if !grid.is_on_road(pos) {
                continue;
            }
            commands.spawn((
                RoadCell(pos),
                Sprite {
                    color: ROAD_GRAY,
                    custom_size: Some(Vec2::splat(CELL_SIZE)),
                    ..default()
                },
                Transform::from_translation(cell_translation(pos, size, 0.0)),
            ));
        }
    }

    // Traffic light markers; the set of positions never changes, only colors
    for pos in sim.0.lights.positions() {
        commands.spawn((
            LightMarker(pos),
            Sprite {
                color: Color::srgb_u8(50, 205, 50),
                custom_size: Some(Vec2::splat(CELL_SIZE * 0.6)),
                ..default()
            },
            Transform::from_translation(cell_translation(pos, size, 1.0)),
        ));
    }

    // Accident highlight, hidden until one happens
    commands.spawn((
        AccidentMarker,
        Sprite {
            color: ALERT_RED,
            custom_size: Some(Vec2::splat(CELL_SIZE)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 3.0),
        Visibility::Hidden,
    ));

    // Alert overlays
    let overlays = [
        (OverlayText::CyberAlert, "CYBER ATTACK!", 64.0, 120.0),
        (OverlayText::AffectedLights, "", 24.0, 40.0),
        (OverlayText::AccidentAlert, "ACCIDENT!", 64.0, -20.0),
        (OverlayText::AccidentCoords, "", 24.0, -80.0),
        (OverlayText::PauseNotice, "", 24.0, 0.0),
    ];
    for (marker, content, font_size, y) in overlays {
        commands.spawn((
            marker,
            Text2d::new(content),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(ALERT_RED),
            Transform::from_xyz(0.0, y, 10.0),
            Visibility::Hidden,
        ));
    }
}
