/// First-person camera control: pointer look and camera-relative movement
use nalgebra::{Point2, Vector3};

use crate::config::LookOptions;
use crate::projection::Camera;
use crate::transform::{axis_angle, compose_world, conjugate};

/// Whether pointer motion is captured for looking around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookLock {
    /// Pointer hidden and captured; deltas drive the camera
    Locked,
    /// Pointer visible; motion is ignored
    Free,
}

pub struct FreeLookController {
    lock: LookLock,
    sensitivity: f32,
    move_step: f32,
    center: Point2<f32>,
    pointer: Point2<f32>,
}

impl FreeLookController {
    /// Starts locked with the pointer at the viewport center
    pub fn new(options: &LookOptions, viewport_width: u32, viewport_height: u32) -> Self {
        let center = Point2::new(viewport_width as f32 / 2.0, viewport_height as f32 / 2.0);
        Self {
            lock: LookLock::Locked,
            sensitivity: options.sensitivity,
            move_step: options.move_step,
            center,
            pointer: center,
        }
    }

    pub fn lock(&self) -> LookLock {
        self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock == LookLock::Locked
    }

    /// Reference point the next pointer delta is measured from
    pub fn pointer(&self) -> Point2<f32> {
        self.pointer
    }

    pub fn center(&self) -> Point2<f32> {
        self.center
    }

    /// Turn the camera by a pointer delta.
    ///
    /// The X-axis rotation from `dx` and the world-down rotation from `dy`
    /// are composed as `q1 * q2` on the left of the current orientation.
    /// Returns the position the platform should warp the pointer to, or
    /// `None` while the lock is released.
    pub fn on_pointer_delta(
        &mut self,
        camera: &mut Camera,
        dx: f32,
        dy: f32,
    ) -> Option<Point2<f32>> {
        match self.lock {
            LookLock::Free => None,
            LookLock::Locked => {
                let q1 = axis_angle(&Vector3::x_axis(), dx * self.sensitivity);
                let q2 = axis_angle(&-Vector3::y_axis(), dy * self.sensitivity);
                camera.rotation = compose_world(&(q1 * q2), &camera.rotation);

                self.pointer = self.center;
                Some(self.center)
            }
        }
    }

    /// Move along a camera-local direction, e.g. `(0, 0, 1)` for forward
    pub fn on_discrete_move(&self, camera: &mut Camera, local_direction: &Vector3<f32>) {
        let world = conjugate(&camera.rotation, local_direction);
        camera.position += world * self.move_step;
    }

    /// Locked -> Free. Returns false if the lock was already released.
    pub fn release(&mut self) -> bool {
        match self.lock {
            LookLock::Locked => {
                self.lock = LookLock::Free;
                log::debug!("look lock released");
                true
            }
            LookLock::Free => false,
        }
    }

    /// Free -> Locked, recentering the pointer. Returns false if already locked.
    pub fn engage(&mut self) -> bool {
        match self.lock {
            LookLock::Free => {
                self.lock = LookLock::Locked;
                self.pointer = self.center;
                log::debug!("look lock engaged");
                true
            }
            LookLock::Locked => false,
        }
    }
}
