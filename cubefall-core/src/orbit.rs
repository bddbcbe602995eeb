/// Stepped rotation and translation of a single object about world axes
use crate::config::OrbitOptions;
use crate::scene::SceneObject;
use crate::transform::{axis_angle, Axis};

pub struct OrbitController {
    angle_step: f32,
    move_step: f32,
}

impl OrbitController {
    pub fn new(angle_step: f32, move_step: f32) -> Self {
        Self {
            angle_step,
            move_step,
        }
    }

    pub fn from_options(options: &OrbitOptions) -> Self {
        Self::new(options.angle_step(), options.move_step)
    }

    pub fn angle_step(&self) -> f32 {
        self.angle_step
    }

    pub fn move_step(&self) -> f32 {
        self.move_step
    }

    /// Rotate by one step about a world axis; the step lands on top of the
    /// rotation history (`new = step * old`).
    pub fn on_axis_step(&self, target: &mut SceneObject, axis: Axis) {
        let step = axis_angle(&axis.unit_vector(), self.angle_step);
        target.transform.rotate_world(&step);
    }

    /// Move by one step along a world axis
    pub fn on_translate_step(&self, target: &mut SceneObject, direction: Axis) {
        let delta = direction.unit_vector().into_inner() * self.move_step;
        target.transform.translate(&delta);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::from_options(&OrbitOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn target() -> SceneObject {
        SceneObject::new("TestObject")
    }

    #[test]
    fn test_translate_steps_commute() {
        let orbit = OrbitController::default();
        let mut a = target();
        let mut b = target();

        orbit.on_translate_step(&mut a, Axis::PosX);
        orbit.on_translate_step(&mut a, Axis::PosY);
        orbit.on_translate_step(&mut b, Axis::PosY);
        orbit.on_translate_step(&mut b, Axis::PosX);

        assert!((a.transform.position - b.transform.position).norm() < 1e-6);
        assert!((a.transform.position - Vector3::new(0.2, 0.2, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_translation_ignores_orientation() {
        let orbit = OrbitController::default();
        let mut object = target();
        orbit.on_axis_step(&mut object, Axis::PosY);
        orbit.on_translate_step(&mut object, Axis::NegZ);
        assert!((object.transform.position - Vector3::new(0.0, 0.0, -0.2)).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_and_translation_are_independent() {
        let orbit = OrbitController::default();
        let mut a = target();
        let mut b = target();

        orbit.on_axis_step(&mut a, Axis::PosX);
        orbit.on_translate_step(&mut a, Axis::PosZ);
        orbit.on_translate_step(&mut b, Axis::PosZ);
        orbit.on_axis_step(&mut b, Axis::PosX);

        assert!((a.transform.position - b.transform.position).norm() < 1e-6);
        assert!((a.transform.rotation.coords - b.transform.rotation.coords).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_steps_compose_on_the_left() {
        let orbit = OrbitController::default();
        let step = orbit.angle_step();
        let mut object = target();

        orbit.on_axis_step(&mut object, Axis::PosX);
        orbit.on_axis_step(&mut object, Axis::PosY);

        let rx = axis_angle(&Vector3::x_axis(), step);
        let ry = axis_angle(&Vector3::y_axis(), step);
        assert!((object.transform.rotation.coords - (ry * rx).coords).norm() < 1e-6);
        assert!(object.transform.rotation.angle_to(&(rx * ry)) > 1e-2);
    }

    #[test]
    fn test_rotation_steps_do_not_commute() {
        let orbit = OrbitController::default();
        let mut a = target();
        let mut b = target();

        orbit.on_axis_step(&mut a, Axis::PosX);
        orbit.on_axis_step(&mut a, Axis::PosZ);
        orbit.on_axis_step(&mut b, Axis::PosZ);
        orbit.on_axis_step(&mut b, Axis::PosX);

        assert!(a.transform.rotation.angle_to(&b.transform.rotation) > 1e-2);
    }

    #[test]
    fn test_opposite_steps_cancel() {
        let orbit = OrbitController::default();
        let mut object = target();
        orbit.on_axis_step(&mut object, Axis::PosZ);
        orbit.on_axis_step(&mut object, Axis::NegZ);
        let probe = Vector3::new(0.3, -0.4, 0.5);
        assert!((object.transform.rotation * probe - probe).norm() < 1e-5);

        let step = OrbitController::new(10f32.to_radians(), 0.2);
        for _ in 0..36 {
            step.on_axis_step(&mut object, Axis::PosY);
        }
        assert!((object.transform.rotation * probe - probe).norm() < 1e-4);
    }
}
