/// Per-frame driver: couples hinge easing to the scene transforms.
///
/// The host shell owns the actual frame scheduling and the draw call; it is
/// expected to call [`BookDriver::tick`] once per display refresh until the
/// driver is cancelled, and to forward pointer and toggle input. The driver
/// never registers callbacks itself.
use std::time::Duration;

use tracing::debug;

use crate::hinge::HingeState;
use crate::scene::{BookGraph, Scene};

/// Wall-clock scale for the idle sway
const IDLE_TIME_SCALE: f32 = 2.0;
const IDLE_YAW_AMPLITUDE: f32 = 0.10;
const IDLE_PITCH_AMPLITUDE: f32 = 0.01;
const IDLE_PITCH_RATE: f32 = 0.6;

/// Owns the hinge state and the handles into the book graph
#[derive(Debug)]
pub struct BookDriver {
    hinge: HingeState,
    graph: BookGraph,
    cancelled: bool,
}

impl BookDriver {
    /// Create the driver and snap the book closed without animation
    pub fn new(scene: &mut Scene, graph: BookGraph) -> Self {
        let mut driver = Self {
            hinge: HingeState::new(),
            graph,
            cancelled: false,
        };
        driver.set_target_angle(scene, 0.0, false);
        driver
    }

    pub fn hinge(&self) -> &HingeState {
        &self.hinge
    }

    pub fn graph(&self) -> BookGraph {
        self.graph
    }

    /// Set the hinge target angle; the non-animated path also applies the
    /// pivot rotations synchronously
    pub fn set_target_angle(&mut self, scene: &mut Scene, angle: f32, animate: bool) {
        if self.cancelled {
            return;
        }
        self.hinge.set_target_angle(angle, animate);
        if !animate {
            self.apply_angle(scene);
        }
    }

    /// Flip open/closed; convergence happens over subsequent ticks
    pub fn toggle(&mut self) {
        if self.cancelled {
            return;
        }
        self.hinge.toggle();
    }

    pub fn pointer_down(&mut self, pointer_x: f32) {
        if self.cancelled {
            return;
        }
        self.hinge.on_drag_start(pointer_x);
    }

    /// Drag updates bypass easing, so the pivots follow the pointer directly
    pub fn pointer_move(&mut self, scene: &mut Scene, pointer_x: f32, container_width: f32) {
        if self.cancelled {
            return;
        }
        if self.hinge.on_drag_move(pointer_x, container_width) {
            self.apply_angle(scene);
        }
    }

    pub fn pointer_up(&mut self) {
        if self.cancelled {
            return;
        }
        self.hinge.on_drag_end();
    }

    /// One frame: ease the hinge, mirror the angle onto both pivots, sway
    /// the spine by elapsed wall-clock time. Returns `false` once cancelled
    /// so hosts stop scheduling; a cancelled tick mutates nothing.
    pub fn tick(&mut self, scene: &mut Scene, elapsed: Duration) -> bool {
        if self.cancelled {
            return false;
        }
        self.hinge.tick();
        self.apply_angle(scene);

        let t = elapsed.as_secs_f32() * IDLE_TIME_SCALE;
        scene.set_yaw(self.graph.spine, t.sin() * IDLE_YAW_AMPLITUDE);
        scene.set_pitch(
            self.graph.spine,
            (t * IDLE_PITCH_RATE).sin() * IDLE_PITCH_AMPLITUDE,
        );
        true
    }

    /// Stop the loop. Safe to call repeatedly; after the first call no
    /// operation mutates the hinge or the scene again.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!("render loop cancelled");
        }
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Right pivot gets the negated angle, left the positive one
    fn apply_angle(&self, scene: &mut Scene) {
        let angle = self.hinge.current_angle();
        scene.set_yaw(self.graph.right_pivot, -angle);
        scene.set_yaw(self.graph.left_pivot, angle);
    }
}
