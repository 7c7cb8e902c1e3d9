//! Vitrine gallery core
//!
//! Engine-independent model of a 3D artwork gallery: arrangement of items in
//! world space, a registry of pickable bounds, pointer picking, timed carousel
//! navigation and hover tracking. A rendering host (see `vitrine-scene`) owns a
//! [`GallerySession`], feeds it input and host time, and mirrors its
//! placements onto scene entities.

pub mod easing;
pub mod error;
pub mod hover;
pub mod layout;
pub mod navigation;
pub mod picking;
pub mod raycast;
pub mod registry;
pub mod session;
pub mod types;

pub use glam;

pub use easing::Easing;
pub use error::GalleryError;
pub use hover::{HoverChange, HoverEvent, HoverTracker};
pub use layout::{
    compute_placement, fit_frame, Arrangement, RadialLayout, WallGridLayout, MAX_WALLS,
};
pub use navigation::{
    CommandOutcome, NavigationController, NavigationStatus, Settled, Transition,
    DEFAULT_TRANSITION,
};
pub use picking::{pick, pick_ray, PickHit};
pub use raycast::{ndc_from_viewport, CameraState, Ray};
pub use registry::{Bounds, PickHandle, PickableEntry, PickableKind, PickableRegistry};
pub use session::{ClickOutcome, ControlStyle, GallerySession, GallerySettings};
pub use types::{wrap_index, Direction, GalleryItem, ItemMetadata, Placement};
