//! Carousel navigation state machine.
//!
//! Angles here are headings: the bearing of the item currently facing the
//! viewer. The arrangement is rotated by the negated heading, so the current
//! item always ends up straight ahead.
//!
//! States:
//! - Idle: `current_index` is committed, heading is the item's canonical heading
//! - Transitioning: heading moves from `from_angle` to `to_angle` over `duration`
//!
//! Commands arriving while a transition is in flight are ignored. A transition
//! always completes, and completing it yields exactly one [`Settled`].

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use tracing::{debug, info};

use crate::easing::Easing;
use crate::error::GalleryError;
use crate::layout::Arrangement;
use crate::types::{wrap_index, Direction};

/// Default transition length
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(1500);

/// An in-flight move between two items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from_angle: f32,
    pub to_angle: f32,
    /// Sign of `to_angle - from_angle`
    pub direction: Direction,
    /// Index committed when the transition settles
    pub target_index: usize,
    /// Host time the transition started at
    pub start: Duration,
    pub duration: Duration,
    /// Highest linear progress sampled so far
    progress: f32,
}

impl Transition {
    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NavigationStatus {
    #[default]
    Idle,
    Transitioning(Transition),
}

/// How a navigation command was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A transition towards `target` started
    Started { target: usize },
    /// A transition is already running; the command was dropped
    Busy,
    /// The requested item is already current
    AlreadyCurrent,
    /// Single-item gallery, nothing to navigate
    NoOp,
}

/// Emitted once when a transition completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub index: usize,
}

/// Owns the current index and the animated heading
#[derive(Debug, Clone)]
pub struct NavigationController {
    /// Canonical heading of every item, in `[0, 2π)`
    headings: Vec<f32>,
    current_index: usize,
    heading: f32,
    status: NavigationStatus,
    duration: Duration,
    easing: Easing,
}

impl NavigationController {
    /// Controller over items with the given canonical headings, starting at item 0
    pub fn new(
        headings: Vec<f32>,
        duration: Duration,
        easing: Easing,
    ) -> Result<Self, GalleryError> {
        if headings.is_empty() {
            return Err(GalleryError::EmptyCollection);
        }
        if duration.is_zero() {
            return Err(GalleryError::InvalidDuration);
        }
        let heading = headings[0];
        Ok(Self {
            headings,
            current_index: 0,
            heading,
            status: NavigationStatus::Idle,
            duration,
            easing,
        })
    }

    /// Controller whose headings come from an arrangement
    pub fn for_arrangement(
        arrangement: &Arrangement,
        count: usize,
        duration: Duration,
        easing: Easing,
    ) -> Result<Self, GalleryError> {
        let headings = (0..count).map(|i| arrangement.heading(i, count)).collect();
        Self::new(headings, duration, easing)
    }

    pub fn count(&self) -> usize {
        self.headings.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current (possibly mid-transition) heading
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Rotation parameter for the layout engine
    pub fn rotation(&self) -> f32 {
        -self.heading
    }

    pub fn status(&self) -> &NavigationStatus {
        &self.status
    }

    pub fn transition(&self) -> Option<&Transition> {
        match &self.status {
            NavigationStatus::Transitioning(transition) => Some(transition),
            NavigationStatus::Idle => None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.status, NavigationStatus::Transitioning(_))
    }

    /// Linear progress of the running transition
    pub fn progress(&self) -> Option<f32> {
        self.transition().map(Transition::progress)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Step one item in `direction`, wrapping at either end
    pub fn navigate(&mut self, direction: Direction, now: Duration) -> CommandOutcome {
        if let Some(outcome) = self.reject_command() {
            return outcome;
        }
        let target = wrap_index(
            self.current_index as isize + direction.sign() as isize,
            self.count(),
        );
        let delta = arc_in_direction(self.heading, self.headings[target], direction);
        self.begin(target, delta, now)
    }

    /// Move to `target` along the shorter way round. Any index is accepted and
    /// reduced modulo the item count.
    pub fn select_index(&mut self, target: isize, now: Duration) -> CommandOutcome {
        if let Some(outcome) = self.reject_command() {
            return outcome;
        }
        let target = wrap_index(target, self.count());
        if target == self.current_index {
            return CommandOutcome::AlreadyCurrent;
        }
        let delta = shortest_arc(self.heading, self.headings[target]);
        self.begin(target, delta, now)
    }

    fn reject_command(&self) -> Option<CommandOutcome> {
        if self.count() < 2 {
            return Some(CommandOutcome::NoOp);
        }
        if self.is_transitioning() {
            debug!("Navigation busy, ignoring command");
            return Some(CommandOutcome::Busy);
        }
        None
    }

    /// Start moving to `target`, which always differs from the current index.
    ///
    /// A zero arc still runs a transition so the index commits on settle.
    fn begin(&mut self, target: usize, delta: f32, now: Duration) -> CommandOutcome {
        debug_assert_ne!(target, self.current_index);
        let direction = if delta >= 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        let transition = Transition {
            from_angle: self.heading,
            to_angle: self.heading + delta,
            direction,
            target_index: target,
            start: now,
            duration: self.duration,
            progress: 0.0,
        };
        debug!(
            "Navigation {} -> {} ({:?}, {:.3} rad)",
            self.current_index, target, direction, delta
        );
        self.status = NavigationStatus::Transitioning(transition);
        CommandOutcome::Started { target }
    }

    /// Advance the running transition to host time `now`.
    ///
    /// Returns the settled index on the tick that completes the transition.
    pub fn tick(&mut self, now: Duration) -> Option<Settled> {
        let NavigationStatus::Transitioning(transition) = &mut self.status else {
            return None;
        };

        let elapsed = now.saturating_sub(transition.start);
        let linear = (elapsed.as_secs_f32() / transition.duration.as_secs_f32()).min(1.0);
        transition.progress = transition.progress.max(linear);

        if transition.progress >= 1.0 {
            let target = transition.target_index;
            self.status = NavigationStatus::Idle;
            self.current_index = target;
            // Canonical heading equals to_angle modulo 2π
            self.heading = self.headings[target];
            info!("Navigation settled on item {}", target);
            return Some(Settled { index: target });
        }

        let eased = self.easing.apply(transition.progress);
        self.heading =
            transition.from_angle + (transition.to_angle - transition.from_angle) * eased;
        None
    }
}

/// Keeps exact half turns (two walls facing each other) in their requested direction
const HALF_TURN_SLACK: f32 = 1e-4;

/// Signed angle from `from` to `to` travelling in `direction`.
///
/// A step longer than half a turn (wrapping along a single wall) takes the
/// short way instead of sweeping the room round behind the viewer. Ring steps
/// are at most π and always keep their direction.
fn arc_in_direction(from: f32, to: f32, direction: Direction) -> f32 {
    let arc = match direction {
        Direction::Next => (to - from).rem_euclid(TAU),
        Direction::Previous => -(from - to).rem_euclid(TAU),
    };
    if arc.abs() > PI + HALF_TURN_SLACK {
        shortest_arc(from, to)
    } else {
        arc
    }
}

/// Signed angle from `from` to `to` with magnitude at most π. Half turns go forward.
fn shortest_arc(from: f32, to: f32) -> f32 {
    let arc = (to - from).rem_euclid(TAU);
    if arc > PI { arc - TAU } else { arc }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RadialLayout, WallGridLayout};

    const TOLERANCE: f32 = 1e-4;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn radial(count: usize) -> NavigationController {
        NavigationController::for_arrangement(
            &Arrangement::Radial(RadialLayout::default()),
            count,
            DEFAULT_TRANSITION,
            Easing::EaseInOutCubic,
        )
        .unwrap()
    }

    /// Issue a command at `now` and tick past its end
    fn settle(controller: &mut NavigationController, now: &mut Duration) -> Option<Settled> {
        *now += controller.duration() + ms(1);
        controller.tick(*now)
    }

    fn angle_eq_mod_tau(a: f32, b: f32) -> bool {
        let diff = (a - b).rem_euclid(TAU);
        diff < TOLERANCE || TAU - diff < TOLERANCE
    }

    #[test]
    fn test_rejects_invalid_construction() {
        assert_eq!(
            NavigationController::new(vec![], DEFAULT_TRANSITION, Easing::Linear).unwrap_err(),
            GalleryError::EmptyCollection
        );
        assert_eq!(
            NavigationController::new(vec![0.0], Duration::ZERO, Easing::Linear).unwrap_err(),
            GalleryError::InvalidDuration
        );
    }

    #[test]
    fn test_cyclic_closure() {
        for count in [2, 3, 5, 6, 12] {
            let mut controller = radial(count);
            let start_rotation = controller.rotation();
            let mut now = Duration::ZERO;
            for _ in 0..count {
                assert!(matches!(
                    controller.navigate(Direction::Next, now),
                    CommandOutcome::Started { .. }
                ));
                assert!(settle(&mut controller, &mut now).is_some());
            }
            assert_eq!(controller.current_index(), 0, "count {count}");
            assert!(angle_eq_mod_tau(controller.rotation(), start_rotation));
        }
    }

    #[test]
    fn test_direction_symmetry() {
        let mut controller = radial(6);
        let mut now = Duration::ZERO;
        controller.navigate(Direction::Next, now);
        assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 1 }));
        controller.navigate(Direction::Previous, now);
        assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 0 }));
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn test_wraps_backwards_from_first() {
        let mut controller = radial(4);
        let mut now = Duration::ZERO;
        controller.navigate(Direction::Previous, now);
        let transition = *controller.transition().unwrap();
        assert_eq!(transition.direction, Direction::Previous);
        assert!((transition.to_angle - transition.from_angle + TAU / 4.0).abs() < TOLERANCE);
        assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 3 }));
    }

    #[test]
    fn test_relative_step_is_one_slot() {
        let mut controller = radial(6);
        controller.navigate(Direction::Next, Duration::ZERO);
        let transition = controller.transition().unwrap();
        assert!((transition.to_angle - transition.from_angle - TAU / 6.0).abs() < TOLERANCE);
        assert_ne!(transition.from_angle, transition.to_angle);
        assert!(!transition.duration.is_zero());
    }

    #[test]
    fn test_commands_ignored_while_transitioning() {
        let mut controller = radial(6);
        controller.navigate(Direction::Next, Duration::ZERO);
        let started = *controller.transition().unwrap();

        controller.tick(ms(300));
        assert_eq!(controller.navigate(Direction::Next, ms(400)), CommandOutcome::Busy);
        assert_eq!(controller.navigate(Direction::Previous, ms(500)), CommandOutcome::Busy);
        assert_eq!(controller.select_index(4, ms(600)), CommandOutcome::Busy);

        let in_flight = controller.transition().unwrap();
        assert_eq!(in_flight.to_angle, started.to_angle);
        assert_eq!(in_flight.target_index, 1);
        assert_eq!(in_flight.start, Duration::ZERO);

        assert_eq!(controller.tick(ms(1500)), Some(Settled { index: 1 }));
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn test_progress_is_monotonic_and_completes() {
        let mut controller = radial(6);
        controller.navigate(Direction::Next, ms(1000));

        let mut previous = 0.0;
        for t in (1000..2500).step_by(50) {
            assert!(controller.tick(ms(t)).is_none());
            let progress = controller.progress().unwrap();
            assert!(progress >= previous);
            assert!(progress < 1.0);
            previous = progress;
        }

        // A host clock stepping backwards never rewinds progress
        controller.tick(ms(1100));
        assert_eq!(controller.progress().unwrap(), previous);

        assert_eq!(controller.tick(ms(2500)), Some(Settled { index: 1 }));
        assert!(controller.progress().is_none());
    }

    #[test]
    fn test_progress_reaches_exactly_one_at_duration() {
        let mut controller = NavigationController::new(
            vec![0.0, 1.0, 2.0],
            ms(800),
            Easing::Linear,
        )
        .unwrap();
        controller.navigate(Direction::Next, ms(200));
        controller.tick(ms(600));
        assert!((controller.progress().unwrap() - 0.5).abs() < 1e-6);
        assert!((controller.heading() - 0.5).abs() < 1e-5);
        assert_eq!(controller.tick(ms(1000)), Some(Settled { index: 1 }));
        assert_eq!(controller.heading(), 1.0);
    }

    #[test]
    fn test_heading_interpolates_between_endpoints() {
        let mut controller = radial(6);
        controller.navigate(Direction::Next, Duration::ZERO);
        let transition = *controller.transition().unwrap();
        for t in (0..1500).step_by(100) {
            controller.tick(ms(t));
            let heading = controller.heading();
            assert!(heading >= transition.from_angle - TOLERANCE);
            assert!(heading <= transition.to_angle + TOLERANCE);
        }
    }

    #[test]
    fn test_settles_exactly_once() {
        let mut controller = radial(6);
        controller.navigate(Direction::Next, Duration::ZERO);
        assert!(controller.tick(ms(1500)).is_some());
        assert!(controller.tick(ms(1600)).is_none());
        assert!(controller.tick(ms(5000)).is_none());
    }

    #[test]
    fn test_select_index_takes_shorter_path() {
        let mut controller = radial(6);
        let mut now = Duration::ZERO;
        assert_eq!(
            controller.select_index(4, now),
            CommandOutcome::Started { target: 4 }
        );
        let transition = *controller.transition().unwrap();
        // Two steps back through the wrap instead of four forward
        assert_eq!(transition.direction, Direction::Previous);
        assert!((transition.to_angle - transition.from_angle + 2.0 * TAU / 6.0).abs() < TOLERANCE);

        let mut settled = Vec::new();
        for _ in 0..40 {
            now += ms(50);
            if let Some(event) = controller.tick(now) {
                settled.push(event);
            }
        }
        assert_eq!(settled, vec![Settled { index: 4 }]);
        assert_eq!(controller.current_index(), 4);
        assert!(angle_eq_mod_tau(controller.rotation(), -4.0 * TAU / 6.0));
    }

    #[test]
    fn test_select_index_wraps_out_of_range() {
        let mut controller = radial(6);
        let mut now = Duration::ZERO;
        assert_eq!(
            controller.select_index(-1, now),
            CommandOutcome::Started { target: 5 }
        );
        settle(&mut controller, &mut now);
        assert_eq!(
            controller.select_index(13, now),
            CommandOutcome::Started { target: 1 }
        );
    }

    #[test]
    fn test_select_current_is_noop() {
        let mut controller = radial(6);
        assert_eq!(
            controller.select_index(6, Duration::ZERO),
            CommandOutcome::AlreadyCurrent
        );
        assert!(!controller.is_transitioning());
        assert!(controller.tick(ms(5000)).is_none());
    }

    #[test]
    fn test_single_item_is_noop() {
        let mut controller = radial(1);
        assert_eq!(
            controller.navigate(Direction::Next, Duration::ZERO),
            CommandOutcome::NoOp
        );
        assert_eq!(controller.select_index(3, Duration::ZERO), CommandOutcome::NoOp);
        assert_eq!(controller.rotation(), 0.0);
    }

    #[test]
    fn test_wall_grid_navigation_settles_on_target() {
        let mut controller = NavigationController::for_arrangement(
            &Arrangement::WallGrid(WallGridLayout::default()),
            7,
            ms(500),
            Easing::EaseInOutSine,
        )
        .unwrap();
        let mut now = Duration::ZERO;
        for expected in [1, 2, 3, 4, 5, 6, 0] {
            controller.navigate(Direction::Next, now);
            let transition = *controller.transition().unwrap();
            assert!(transition.to_angle > transition.from_angle);
            assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: expected }));
        }
    }

    fn wall_grid(wall_count: usize, count: usize) -> NavigationController {
        NavigationController::for_arrangement(
            &Arrangement::WallGrid(WallGridLayout {
                wall_count,
                ..WallGridLayout::default()
            }),
            count,
            ms(500),
            Easing::Linear,
        )
        .unwrap()
    }

    #[test]
    fn test_single_wall_wrap_takes_short_way() {
        for wall_count in [1, 2] {
            let mut controller = wall_grid(wall_count, 6);
            let mut now = Duration::ZERO;

            // First to last, backwards through the wrap
            controller.navigate(Direction::Previous, now);
            let transition = *controller.transition().unwrap();
            assert!((transition.to_angle - transition.from_angle).abs() <= PI);
            assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 5 }));

            // Last to first, forwards through the wrap
            controller.navigate(Direction::Next, now);
            let transition = *controller.transition().unwrap();
            assert!(
                (transition.to_angle - transition.from_angle).abs() <= PI,
                "walls {wall_count}: wrap swept {} rad",
                transition.to_angle - transition.from_angle
            );
            assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 0 }));
        }
    }

    #[test]
    fn test_single_wall_cyclic_closure() {
        let mut controller = wall_grid(1, 6);
        let start_rotation = controller.rotation();
        let mut now = Duration::ZERO;
        for _ in 0..6 {
            controller.navigate(Direction::Next, now);
            let transition = *controller.transition().unwrap();
            assert!((transition.to_angle - transition.from_angle).abs() <= PI);
            assert!(settle(&mut controller, &mut now).is_some());
        }
        assert_eq!(controller.current_index(), 0);
        assert!(angle_eq_mod_tau(controller.rotation(), start_rotation));
    }

    #[test]
    fn test_coincident_headings_still_commit() {
        let mut controller =
            NavigationController::new(vec![0.5, 0.5, 0.5], ms(200), Easing::Linear).unwrap();
        let mut now = Duration::ZERO;
        assert_eq!(
            controller.navigate(Direction::Next, now),
            CommandOutcome::Started { target: 1 }
        );
        assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 1 }));
        assert_eq!(
            controller.select_index(2, now),
            CommandOutcome::Started { target: 2 }
        );
        assert_eq!(settle(&mut controller, &mut now), Some(Settled { index: 2 }));
        assert_eq!(controller.current_index(), 2);
    }
}
