//! Gallery session: owns every piece of mutable gallery state.
//!
//! Hosts forward pointer, wheel, keyboard and frame callbacks here. Handles
//! are stable for the session's lifetime: item `i` is handle `i`, the previous
//! control is handle `N` and the next control is handle `N + 1`.

use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info};

use crate::easing::Easing;
use crate::error::GalleryError;
use crate::hover::{HoverChange, HoverTracker};
use crate::layout::{fit_frame, Arrangement};
use crate::navigation::{CommandOutcome, NavigationController, Settled, DEFAULT_TRANSITION};
use crate::picking::{pick, pick_ray, PickHit};
use crate::raycast::{CameraState, Ray};
use crate::registry::{Bounds, PickHandle, PickableKind, PickableRegistry};
use crate::types::{Direction, GalleryItem, ItemMetadata, Placement};

/// Size and spacing of the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlStyle {
    /// Pick radius of each control
    pub radius: f32,
    /// Gap between the frame edge and the control
    pub gap: f32,
}

impl ControlStyle {
    pub fn validate(&self) -> Result<(), GalleryError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GalleryError::InvalidControlRadius(self.radius));
        }
        crate::layout::check_dimension("control gap", self.gap)
    }
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            radius: 0.25,
            gap: 0.3,
        }
    }
}

/// Validated inputs for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GallerySettings {
    pub arrangement: Arrangement,
    pub transition: Duration,
    pub easing: Easing,
    /// Largest frame an item may occupy
    pub max_frame: Vec2,
    pub controls: ControlStyle,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            arrangement: Arrangement::default(),
            transition: DEFAULT_TRANSITION,
            easing: Easing::default(),
            max_frame: Vec2::new(3.0, 2.4),
            controls: ControlStyle::default(),
        }
    }
}

impl GallerySettings {
    pub fn validate(&self) -> Result<(), GalleryError> {
        self.arrangement.validate()?;
        if self.transition.is_zero() {
            return Err(GalleryError::InvalidDuration);
        }
        let frame = self.max_frame;
        if !frame.is_finite() || frame.x <= 0.0 || frame.y <= 0.0 {
            return Err(GalleryError::InvalidFrame {
                width: frame.x,
                height: frame.y,
            });
        }
        self.controls.validate()
    }
}

/// What a click resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A previous/next control was clicked
    Control {
        direction: Direction,
        outcome: CommandOutcome,
    },
    /// An artwork was clicked
    Item {
        index: usize,
        outcome: CommandOutcome,
    },
    Missed,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct GallerySession {
    items: Vec<GalleryItem>,
    settings: GallerySettings,
    navigation: NavigationController,
    registry: PickableRegistry,
    hover: HoverTracker,
    controls_visible: bool,
    /// Rotation the current placements were computed with
    rotation: f32,
}

impl GallerySession {
    /// Create a session over an ordered collection. Fails on invalid settings
    /// or an empty collection rather than falling back to defaults.
    pub fn new(items: Vec<ItemMetadata>, settings: GallerySettings) -> Result<Self, GalleryError> {
        if items.is_empty() {
            return Err(GalleryError::EmptyCollection);
        }
        settings.validate()?;

        let count = items.len();
        let navigation = NavigationController::for_arrangement(
            &settings.arrangement,
            count,
            settings.transition,
            settings.easing,
        )?;
        let rotation = navigation.rotation();

        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, metadata)| GalleryItem {
                index,
                metadata,
                frame: settings.max_frame,
                placement: settings.arrangement.placement(index, count, rotation),
            })
            .collect();

        let mut session = Self {
            items,
            settings,
            navigation,
            registry: PickableRegistry::new(),
            hover: HoverTracker::new(),
            controls_visible: true,
            rotation,
        };
        session.rebuild_registry();

        info!(
            "Gallery session started with {} items ({:?})",
            count, session.settings.arrangement
        );
        Ok(session)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn settings(&self) -> &GallerySettings {
        &self.settings
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn registry(&self) -> &PickableRegistry {
        &self.registry
    }

    pub fn current_index(&self) -> usize {
        self.navigation.current_index()
    }

    pub fn current_item(&self) -> &GalleryItem {
        &self.items[self.navigation.current_index()]
    }

    /// Rotation parameter the current placements use
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn hovered(&self) -> Option<PickHandle> {
        self.hover.hovered()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn item_handle(&self, index: usize) -> PickHandle {
        PickHandle::from_raw(index as u32)
    }

    pub fn control_handle(&self, direction: Direction) -> PickHandle {
        let count = self.items.len() as u32;
        match direction {
            Direction::Previous => PickHandle::from_raw(count),
            Direction::Next => PickHandle::from_raw(count + 1),
        }
    }

    /// Kind of the entity behind `handle`, whether or not it is currently pickable
    pub fn kind_of(&self, handle: PickHandle) -> Option<PickableKind> {
        let raw = handle.raw() as usize;
        let count = self.items.len();
        match raw {
            i if i < count => Some(PickableKind::Item(i)),
            i if i == count => Some(PickableKind::PrevControl),
            i if i == count + 1 => Some(PickableKind::NextControl),
            _ => None,
        }
    }

    /// Where a navigation control sits: beside the front slot of the current item
    pub fn control_placement(&self, direction: Direction) -> Placement {
        let count = self.items.len();
        let anchor_index = self.navigation.current_index();
        let arrangement = &self.settings.arrangement;
        let anchor = arrangement.placement(
            anchor_index,
            count,
            -arrangement.heading(anchor_index, count),
        );
        let controls = self.settings.controls;
        let offset = self.settings.max_frame.x * 0.5 + controls.gap + controls.radius;
        let position = anchor.position
            + anchor.right() * (offset * direction.sign() as f32)
            + anchor.normal() * controls.radius;
        Placement::new(position, anchor.yaw)
    }

    /// Step the carousel
    pub fn navigate(&mut self, direction: Direction, now: Duration) -> CommandOutcome {
        self.navigation.navigate(direction, now)
    }

    /// Jump to an item along the shorter way round
    pub fn select_index(&mut self, target: isize, now: Duration) -> CommandOutcome {
        self.navigation.select_index(target, now)
    }

    /// Map a wheel delta to a step. Deltas inside the dead zone are ignored.
    pub fn wheel(&mut self, delta_y: f32, now: Duration) -> Option<CommandOutcome> {
        let direction = Direction::from_wheel(delta_y)?;
        Some(self.navigate(direction, now))
    }

    /// Nearest pickable under a world ray
    pub fn pick_ray(&self, ray: &Ray) -> Option<PickHit> {
        pick_ray(ray, &self.registry)
    }

    /// Nearest pickable under a pointer in normalized device coordinates
    pub fn pick(&self, pointer_ndc: Vec2, camera: &CameraState) -> Option<PickHandle> {
        pick(pointer_ndc, camera, &self.registry)
    }

    /// Update hover from a pointer move. `None` means the pointer left the view.
    pub fn pointer_moved(&mut self, ray: Option<&Ray>) -> Option<HoverChange> {
        let picked = ray.and_then(|ray| self.pick_ray(ray)).map(|hit| hit.handle);
        self.hover.update(picked)
    }

    /// Resolve a click into a navigation command. Hover state is left alone.
    pub fn pointer_clicked(&mut self, ray: &Ray, now: Duration) -> ClickOutcome {
        let Some(hit) = self.pick_ray(ray) else {
            return ClickOutcome::Missed;
        };
        debug!("Click hit {:?} at distance {:.2}", hit.kind, hit.distance);
        match hit.kind {
            PickableKind::PrevControl => ClickOutcome::Control {
                direction: Direction::Previous,
                outcome: self.navigate(Direction::Previous, now),
            },
            PickableKind::NextControl => ClickOutcome::Control {
                direction: Direction::Next,
                outcome: self.navigate(Direction::Next, now),
            },
            PickableKind::Item(index) => ClickOutcome::Item {
                index,
                outcome: self.select_index(index as isize, now),
            },
        }
    }

    /// Advance navigation to host time `now` and refresh placements
    pub fn tick(&mut self, now: Duration) -> Option<Settled> {
        let settled = self.navigation.tick(now);
        if settled.is_some() || self.navigation.rotation() != self.rotation {
            self.relayout();
        }
        settled
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        if self.controls_visible != visible {
            self.controls_visible = visible;
            self.rebuild_registry();
        }
    }

    /// Refit an item's frame to its image aspect ratio (width / height)
    pub fn set_item_aspect(&mut self, index: usize, aspect: f32) -> bool {
        let max_frame = self.settings.max_frame;
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        let frame = fit_frame(aspect, max_frame);
        if item.frame == frame {
            return false;
        }
        item.frame = frame;
        self.rebuild_registry();
        true
    }

    fn relayout(&mut self) {
        let count = self.items.len();
        let rotation = self.navigation.rotation();
        for item in &mut self.items {
            item.placement = self.settings.arrangement.placement(item.index, count, rotation);
        }
        self.rotation = rotation;
        self.rebuild_registry();
    }

    fn rebuild_registry(&mut self) {
        self.registry.clear();
        for item in &self.items {
            self.registry.upsert(
                PickHandle::from_raw(item.index as u32),
                PickableKind::Item(item.index),
                Bounds::quad(&item.placement, item.frame),
            );
        }
        if !self.controls_visible {
            return;
        }
        for (direction, kind) in [
            (Direction::Previous, PickableKind::PrevControl),
            (Direction::Next, PickableKind::NextControl),
        ] {
            let bounds = Bounds::Sphere {
                center: self.control_placement(direction).position,
                radius: self.settings.controls.radius,
            };
            self.registry.upsert(self.control_handle(direction), kind, bounds);
        }
    }
}
