use thiserror::Error;

/// Reasons a gallery session refuses to start
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GalleryError {
    #[error("Gallery needs at least one item")]
    EmptyCollection,
    #[error("Invalid radius: {0} (must be finite and > 0)")]
    InvalidRadius(f32),
    #[error("Invalid wall count: {0} (must be between 1 and {max})", max = crate::layout::MAX_WALLS)]
    InvalidWallCount(usize),
    #[error("Transition duration must be greater than zero")]
    InvalidDuration,
    #[error("Invalid frame size: {width}x{height}")]
    InvalidFrame { width: f32, height: f32 },
    #[error("Invalid {name}: {value} (must be finite and >= 0)")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("Wall inset {inset} leaves no room on a wall of length {wall_length}")]
    InsetTooLarge { inset: f32, wall_length: f32 },
    #[error("Invalid control radius: {0} (must be finite and > 0)")]
    InvalidControlRadius(f32),
}
