//! Pointer/touch/wheel gesture handling for rotating and zooming the
//! rendered objects.
//!
//! One controller is constructed per visualization; the objects it adjusts
//! are passed in explicitly at each call, so the controller itself holds no
//! reference to scene or renderer state.

use glam::{EulerRot, Mat4, Vec2, Vec3};

use crate::constants::{DRAG_ROTATE_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Rotation and uniform scale of one renderable object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl TransformState {
    /// XYZ Euler rotation followed by uniform scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Two-state (idle/dragging) gesture machine.
///
/// The previous pointer position is an `Option` rather than a zero sentinel:
/// a mouse drag starts with no recorded position, so the first move after
/// `pointer_down` produces no delta, while `touch_start` seeds the position
/// from the event and the first touch move rotates immediately.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    dragging: bool,
    last_pointer: Option<Vec2>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mouse/pen button pressed. Deliberately does not seed the previous
    /// pointer; the next move only records its position.
    pub fn pointer_down(&mut self) {
        self.dragging = true;
    }

    /// First touch placed. Seeds the previous pointer from the event so the
    /// very first move produces a delta instead of a jump.
    pub fn touch_start(&mut self, at: Vec2) {
        self.dragging = true;
        self.last_pointer = Some(at);
    }

    /// Pointer or touch moved to `at` (canvas-relative pixels). While
    /// dragging, applies the drag delta as a rotation adjustment to every
    /// target. The position is recorded even outside a drag so a later
    /// `pointer_down` continues from the true location.
    pub fn pointer_move(&mut self, at: Vec2, targets: &mut [TransformState]) {
        if self.dragging {
            if let Some(prev) = self.last_pointer {
                let delta = at - prev;
                for target in targets.iter_mut() {
                    target.rotation.y += delta.x * DRAG_ROTATE_FACTOR;
                    target.rotation.x += delta.y * DRAG_ROTATE_FACTOR;
                }
            }
        }
        self.last_pointer = Some(at);
    }

    /// Button released or touch lifted.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Wheel event, independent of the drag state. One notch adjusts the
    /// uniform scale by [`ZOOM_STEP`] against the sign of `delta_y`; the new
    /// scale is applied only while it stays strictly inside the zoom range.
    pub fn wheel(&self, delta_y: f32, targets: &mut [TransformState]) {
        let step = ZOOM_STEP * sign(delta_y);
        for target in targets.iter_mut() {
            let next = target.scale - step;
            if next > ZOOM_MIN && next < ZOOM_MAX {
                target.scale = next;
            }
        }
    }
}

// f32::signum maps 0.0 to 1.0; wheel deltas of zero must not zoom.
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
