/// Open/close interaction state for the book hinge.
///
/// One instance drives both covers: the right pivot takes the negated angle,
/// the left pivot the positive one, so the halves stay mirror-symmetric
/// around the spine. Angles are radians in `[0, PI/2]`, 0 closed.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::debug;

/// Fraction of the remaining angular distance closed per tick
pub const EASING_FACTOR: f32 = 0.15;
/// Remaining difference below which easing snaps exactly to the target
pub const SNAP_EPSILON: f32 = 5e-4;
/// Release angle above which the book snaps open rather than closed
pub const SNAP_THRESHOLD: f32 = FRAC_PI_4;
/// Fully open hinge angle
pub const OPEN_ANGLE: f32 = FRAC_PI_2;

/// An in-progress pointer drag
#[derive(Debug, Clone, Copy)]
struct DragSession {
    start_x: f32,
    start_angle: f32,
}

/// Target and current hinge angle plus the logical open/closed flag
#[derive(Debug)]
pub struct HingeState {
    target_angle: f32,
    current_angle: f32,
    open: bool,
    drag: Option<DragSession>,
}

impl HingeState {
    /// New hinge in the logical closed state. The current angle starts fully
    /// open; builders are expected to snap it closed without animation.
    pub fn new() -> Self {
        Self {
            target_angle: 0.0,
            current_angle: OPEN_ANGLE,
            open: false,
            drag: None,
        }
    }

    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Set the target angle, clamped to `[0, PI/2]`. Without animation the
    /// current angle jumps to the target immediately; otherwise the per-frame
    /// easing step converges toward it.
    pub fn set_target_angle(&mut self, angle: f32, animate: bool) {
        self.target_angle = angle.clamp(0.0, OPEN_ANGLE);
        if !animate {
            self.current_angle = self.target_angle;
        }
    }

    /// Flip the logical open/closed flag and ease toward the matching angle
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        debug!(open = self.open, "hinge toggled");
        let target = if self.open { OPEN_ANGLE } else { 0.0 };
        self.set_target_angle(target, true);
        self.open
    }

    /// Begin a drag at a pointer x coordinate (pixels)
    pub fn on_drag_start(&mut self, pointer_x: f32) {
        self.drag = Some(DragSession {
            start_x: pointer_x,
            start_angle: self.current_angle,
        });
    }

    /// Update the angle from pointer motion. A full container width of
    /// travel maps to PI of angle; dragging right closes the right cover.
    /// Returns whether an active drag consumed the event.
    pub fn on_drag_move(&mut self, pointer_x: f32, container_width: f32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        if container_width <= 0.0 {
            return false;
        }
        let delta_angle = (pointer_x - drag.start_x) / container_width * PI;
        self.set_target_angle(drag.start_angle - delta_angle, false);
        true
    }

    /// End the drag and snap: open above the quarter-turn threshold,
    /// closed at or below it
    pub fn on_drag_end(&mut self) {
        if self.drag.take().is_none() {
            return;
        }
        self.open = self.current_angle > SNAP_THRESHOLD;
        debug!(
            angle = self.current_angle,
            open = self.open,
            "drag released"
        );
        let target = if self.open { OPEN_ANGLE } else { 0.0 };
        self.set_target_angle(target, true);
    }

    /// One easing step toward the target angle. The step is a contraction,
    /// so the angle never overshoots; once the remaining difference drops
    /// under [`SNAP_EPSILON`] the angle lands exactly on the target.
    pub fn tick(&mut self) -> f32 {
        let diff = self.target_angle - self.current_angle;
        self.current_angle += diff * EASING_FACTOR;
        if diff.abs() < SNAP_EPSILON {
            self.current_angle = self.target_angle;
        }
        self.current_angle
    }
}

impl Default for HingeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed() -> HingeState {
        let mut hinge = HingeState::new();
        hinge.set_target_angle(0.0, false);
        hinge
    }

    #[test]
    fn test_set_target_angle_clamps_and_applies() {
        let mut hinge = closed();

        hinge.set_target_angle(3.0 * PI, false);
        assert_eq!(hinge.target_angle(), OPEN_ANGLE);
        assert_eq!(hinge.current_angle(), OPEN_ANGLE);

        hinge.set_target_angle(-1.0, false);
        assert_eq!(hinge.target_angle(), 0.0);
        assert_eq!(hinge.current_angle(), 0.0);

        hinge.set_target_angle(0.3, false);
        assert_eq!(hinge.current_angle(), 0.3);
    }

    #[test]
    fn test_animated_set_leaves_current_angle() {
        let mut hinge = closed();
        hinge.set_target_angle(OPEN_ANGLE, true);
        assert_eq!(hinge.target_angle(), OPEN_ANGLE);
        assert_eq!(hinge.current_angle(), 0.0);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut hinge = closed();
        assert!(!hinge.is_open());
        assert!(hinge.toggle());
        assert!(!hinge.toggle());
        assert!(!hinge.is_open());
    }

    #[test]
    fn test_tick_contracts_without_overshoot() {
        let mut hinge = closed();
        hinge.set_target_angle(OPEN_ANGLE, true);

        let mut previous_gap = OPEN_ANGLE;
        let mut ticks = 0;
        while hinge.current_angle() != hinge.target_angle() {
            hinge.tick();
            let gap = (hinge.target_angle() - hinge.current_angle()).abs();
            assert!(hinge.current_angle() <= OPEN_ANGLE, "overshoot");
            assert!(gap < previous_gap, "gap must strictly shrink");
            previous_gap = gap;
            ticks += 1;
            assert!(ticks <= 60, "must converge within 60 ticks");
        }
        assert_eq!(hinge.current_angle(), OPEN_ANGLE);
    }

    #[test]
    fn test_tick_converges_downward_too() {
        let mut hinge = closed();
        hinge.set_target_angle(OPEN_ANGLE, false);
        hinge.set_target_angle(0.0, true);
        for _ in 0..60 {
            hinge.tick();
        }
        assert_eq!(hinge.current_angle(), 0.0);
    }

    #[test]
    fn test_drag_snap_boundary_is_exclusive_on_open() {
        let delta = 0.01;

        let mut hinge = closed();
        hinge.set_target_angle(SNAP_THRESHOLD + delta, false);
        hinge.on_drag_start(0.0);
        hinge.on_drag_end();
        assert!(hinge.is_open());
        assert_eq!(hinge.target_angle(), OPEN_ANGLE);

        let mut hinge = closed();
        hinge.set_target_angle(SNAP_THRESHOLD - delta, false);
        hinge.on_drag_start(0.0);
        hinge.on_drag_end();
        assert!(!hinge.is_open());
        assert_eq!(hinge.target_angle(), 0.0);

        // exactly the threshold closes
        let mut hinge = closed();
        hinge.set_target_angle(SNAP_THRESHOLD, false);
        hinge.on_drag_start(0.0);
        hinge.on_drag_end();
        assert!(!hinge.is_open());
    }

    #[test]
    fn test_drag_release_past_threshold_opens() {
        let mut hinge = closed();
        hinge.set_target_angle(1.0, false);
        hinge.on_drag_start(0.0);
        hinge.on_drag_end();
        assert!(hinge.is_open());
        assert_eq!(hinge.target_angle(), OPEN_ANGLE);
    }

    #[test]
    fn test_rightward_drag_from_closed_saturates_at_zero() {
        let mut hinge = closed();
        hinge.on_drag_start(0.0);
        let consumed = hinge.on_drag_move(200.0, 400.0);
        assert!(consumed);
        // delta is PI/2, start angle 0, so the new angle clamps to 0
        assert_eq!(hinge.current_angle(), 0.0);
        assert_eq!(hinge.target_angle(), 0.0);
    }

    #[test]
    fn test_leftward_drag_opens_proportionally() {
        let mut hinge = closed();
        hinge.on_drag_start(200.0);
        hinge.on_drag_move(100.0, 400.0);
        assert!((hinge.current_angle() - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_drag_move_without_start_is_ignored() {
        let mut hinge = closed();
        assert!(!hinge.on_drag_move(50.0, 400.0));
        assert_eq!(hinge.current_angle(), 0.0);
    }

    #[test]
    fn test_drag_end_without_start_is_ignored() {
        let mut hinge = closed();
        hinge.set_target_angle(1.0, false);
        hinge.on_drag_end();
        // no active drag: the logical flag must not change
        assert!(!hinge.is_open());
    }

    #[test]
    fn test_degenerate_container_width_is_ignored() {
        let mut hinge = closed();
        hinge.on_drag_start(0.0);
        assert!(!hinge.on_drag_move(10.0, 0.0));
        assert_eq!(hinge.current_angle(), 0.0);
    }

    #[test]
    fn test_new_hinge_starts_visually_open_logically_closed() {
        let hinge = HingeState::new();
        assert_eq!(hinge.current_angle(), OPEN_ANGLE);
        assert_eq!(hinge.target_angle(), 0.0);
        assert!(!hinge.is_open());
        assert!(!hinge.is_dragging());
    }
}
