/// Object transforms and the orientation helpers shared by the controllers
use nalgebra::{Matrix4, Quaternion, Unit, UnitQuaternion, Vector3};

use crate::error::CoreError;

/// Orientation of a camera or scene object
pub type Rotation = UnitQuaternion<f32>;

/// Shortest vector `unit_axis` will still normalize
const AXIS_EPSILON: f32 = 1e-6;

/// Signed world axis, used for discrete rotation and translation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::PosX,
        Axis::NegX,
        Axis::PosY,
        Axis::NegY,
        Axis::PosZ,
        Axis::NegZ,
    ];

    pub fn unit_vector(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::PosX => Vector3::x_axis(),
            Axis::NegX => -Vector3::x_axis(),
            Axis::PosY => Vector3::y_axis(),
            Axis::NegY => -Vector3::y_axis(),
            Axis::PosZ => Vector3::z_axis(),
            Axis::NegZ => -Vector3::z_axis(),
        }
    }
}

/// Normalize `v`, failing when it is too short to define a direction
pub fn unit_axis(v: Vector3<f32>) -> Result<Unit<Vector3<f32>>, CoreError> {
    Unit::try_new(v, AXIS_EPSILON).ok_or_else(|| {
        CoreError::precondition(format!(
            "cannot normalize near-zero axis ({}, {}, {})",
            v.x, v.y, v.z
        ))
    })
}

pub fn axis_angle(axis: &Unit<Vector3<f32>>, angle: f32) -> Rotation {
    UnitQuaternion::from_axis_angle(axis, angle)
}

/// Compose `increment` on the left of `current`, so it acts in the world frame
pub fn compose_world(increment: &Rotation, current: &Rotation) -> Rotation {
    increment * current
}

/// Rotate `v` by conjugation: `q * (0, v) * q⁻¹`
pub fn conjugate(rotation: &Rotation, v: &Vector3<f32>) -> Vector3<f32> {
    let pure = Quaternion::from_imag(*v);
    let rotated = rotation.quaternion() * pure * rotation.inverse().quaternion();
    rotated.imag()
}

/// Position, orientation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Rotation,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Rotation::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Apply a world-frame rotation on top of the current orientation
    pub fn rotate_world(&mut self, increment: &Rotation) {
        self.rotation = compose_world(increment, &self.rotation);
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.position += delta;
    }

    /// Model matrix: scale first, then rotate, then translate
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::new_translation(&self.position);
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * self.rotation.to_homogeneous() * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
