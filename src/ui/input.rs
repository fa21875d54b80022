//! Input handling systems

use bevy::prelude::*;

use super::components::SimResource;

/// Handle basic keyboard input
///
/// `R` files a manual reset request; the core drops it unless an accident
/// is active.
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<SimResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        sim.0.request_reset();
    }
}
