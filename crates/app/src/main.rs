//! Vitrine - 3D artwork gallery

use bevy::prelude::*;
use bevy::window::WindowResolution;

mod config;

use config::StartupState;
use vitrine_scene::GalleryScenePlugin;

fn main() -> AppExit {
    // Invalid configuration is fatal; the gallery never falls back silently
    let startup = match StartupState::from_env() {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("vitrine: {err}");
            return AppExit::error();
        }
    };

    let mut resolution = WindowResolution::new(startup.display.width, startup.display.height);
    if let Some(scale) = startup.display.scale_factor_override() {
        resolution = resolution.with_scale_factor_override(scale);
    }

    let window_config = Window {
        title: startup.display.title.clone(),
        resolution,
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    App::new()
        .insert_resource(startup.display)
        .insert_resource(startup.config)
        .insert_resource(startup.session)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .add_plugins(GalleryScenePlugin)
        .run()
}
