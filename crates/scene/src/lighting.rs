//! Gallery lighting: one sun and a soft ambient fill

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

/// Marker component for the sun directional light
#[derive(Component)]
pub struct SunLight;

/// Light configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LightingSettings {
    /// Direction *towards* the sun
    pub sun_direction: [f32; 3],
    pub sun_color: [f32; 3],
    /// Illuminance in lux
    pub sun_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            sun_direction: [5.0, 10.0, 5.0],
            sun_color: [1.0, 1.0, 1.0],
            sun_intensity: 6_000.0,
            // 0x404040
            ambient_color: [0.25, 0.25, 0.25],
            ambient_intensity: 600.0,
        }
    }
}

/// Resource holding the active lighting settings
#[derive(Resource, Default)]
pub struct SceneLighting {
    pub settings: LightingSettings,
}

/// Plugin for scene lighting
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneLighting>()
            .add_systems(Startup, setup_lighting);
    }
}

/// Spawn the sun light and ambient light
fn setup_lighting(mut commands: Commands, lighting: Res<SceneLighting>) {
    let settings = &lighting.settings;

    // The setting stores the "to light" direction; looking_to needs the forward one
    let direction = Vec3::from_array(settings.sun_direction).normalize_or(Vec3::Y);

    commands.spawn((
        DirectionalLight {
            illuminance: settings.sun_intensity,
            color: Color::srgb(
                settings.sun_color[0],
                settings.sun_color[1],
                settings.sun_color[2],
            ),
            shadows_enabled: cfg!(feature = "shadows"),
            ..default()
        },
        Transform::default().looking_to(-direction, Vec3::Y),
        SunLight,
    ));

    // Ambient light is a resource, not an entity
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(
            settings.ambient_color[0],
            settings.ambient_color[1],
            settings.ambient_color[2],
        ),
        brightness: settings.ambient_intensity,
        ..default()
    });

    info!("Scene lighting initialized");
}
