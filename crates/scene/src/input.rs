//! Keyboard, wheel and click navigation
//!
//! Controls:
//! - Right arrow / D: next artwork
//! - Left arrow / A: previous artwork
//! - Home / End: first / last artwork
//! - 1-9: jump to that artwork
//! - Scroll wheel: step (down = next)
//! - Left click: on an artwork selects it, on a control steps

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use gallery::{ClickOutcome, Direction, GallerySession};

use crate::camera::{cursor_ray, MainCamera};
use crate::GallerySet;

/// Pixel-unit scroll deltas are converted to lines at this rate
const PIXELS_PER_LINE: f32 = 40.0;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Plugin mapping window input to gallery commands
pub struct GalleryInputPlugin;

impl Plugin for GalleryInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_navigation, wheel_navigation, click_navigation)
                .chain()
                .in_set(GallerySet::Input),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Step(Direction),
    Select(usize),
}

/// Command for this frame's key presses, if any
fn key_command(keys: &ButtonInput<KeyCode>, count: usize) -> Option<KeyCommand> {
    if keys.any_just_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
        return Some(KeyCommand::Step(Direction::Next));
    }
    if keys.any_just_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
        return Some(KeyCommand::Step(Direction::Previous));
    }
    if keys.just_pressed(KeyCode::Home) {
        return Some(KeyCommand::Select(0));
    }
    if keys.just_pressed(KeyCode::End) {
        return Some(KeyCommand::Select(count.saturating_sub(1)));
    }
    // Digits past the end of the collection do nothing
    DIGIT_KEYS
        .iter()
        .position(|key| keys.just_pressed(*key))
        .filter(|&index| index < count)
        .map(KeyCommand::Select)
}

fn keyboard_navigation(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    mut session: ResMut<GallerySession>,
) {
    let Some(command) = key_command(&keys, session.len()) else {
        return;
    };
    let now = time.elapsed();
    let outcome = match command {
        KeyCommand::Step(direction) => session.navigate(direction, now),
        KeyCommand::Select(index) => session.select_index(index as isize, now),
    };
    debug!("Key command {:?} -> {:?}", command, outcome);
}

/// Vertical scroll in lines
fn scroll_lines(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
    }
}

fn wheel_navigation(
    mut scroll_events: MessageReader<MouseWheel>,
    time: Res<Time<Real>>,
    mut session: ResMut<GallerySession>,
) {
    let delta: f32 = scroll_events.read().map(scroll_lines).sum();
    if delta == 0.0 {
        return;
    }
    if let Some(outcome) = session.wheel(delta, time.elapsed()) {
        debug!("Wheel {:.2} -> {:?}", delta, outcome);
    }
}

fn click_navigation(
    mouse_button: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    time: Res<Time<Real>>,
    mut session: ResMut<GallerySession>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(ray) = cursor_ray(window, camera, camera_transform) else {
        return;
    };

    match session.pointer_clicked(&ray, time.elapsed()) {
        ClickOutcome::Missed => debug!("Click missed every pickable"),
        outcome => info!("Click resolved to {:?}", outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut input = ButtonInput::default();
        for key in keys {
            input.press(*key);
        }
        input
    }

    #[test]
    fn test_arrow_and_letter_keys_step() {
        assert_eq!(
            key_command(&pressed(&[KeyCode::ArrowRight]), 6),
            Some(KeyCommand::Step(Direction::Next))
        );
        assert_eq!(
            key_command(&pressed(&[KeyCode::KeyA]), 6),
            Some(KeyCommand::Step(Direction::Previous))
        );
        assert_eq!(key_command(&pressed(&[]), 6), None);
    }

    #[test]
    fn test_home_end_and_digits_select() {
        assert_eq!(
            key_command(&pressed(&[KeyCode::End]), 6),
            Some(KeyCommand::Select(5))
        );
        assert_eq!(
            key_command(&pressed(&[KeyCode::Home]), 6),
            Some(KeyCommand::Select(0))
        );
        assert_eq!(
            key_command(&pressed(&[KeyCode::Digit3]), 6),
            Some(KeyCommand::Select(2))
        );
        assert_eq!(key_command(&pressed(&[KeyCode::Digit9]), 6), None);
    }

    #[test]
    fn test_held_keys_do_not_repeat() {
        let mut input = pressed(&[KeyCode::ArrowRight]);
        input.clear();
        assert!(input.pressed(KeyCode::ArrowRight));
        assert_eq!(key_command(&input, 6), None);
    }
}
