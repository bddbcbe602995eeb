/// Camera and projection utilities
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, Vector3};

use crate::transform::Rotation;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering.
///
/// The camera looks down its local +Z axis with +Y up and +X to the right.
/// Controllers only ever touch `position` and `rotation`; the projection
/// parameters are fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub rotation: Rotation,
    pub mode: ProjectionMode,
    pub width: u32,
    pub height: u32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Visible height of the orthographic view volume
    pub ortho_height: f32,
}

impl Camera {
    pub fn new(orthographic: bool, width: u32, height: u32) -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Rotation::identity(),
            mode: if orthographic {
                ProjectionMode::Orthographic
            } else {
                ProjectionMode::Perspective
            },
            width,
            height,
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            ortho_height: 10.0,
        }
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * Vector3::z()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rotation * Vector3::y()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let world_to_camera =
            Isometry3::from_parts(Translation3::from(self.position), self.rotation).inverse();
        // Camera space looks down +Z; the projection expects -Z
        let flip_z = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, -1.0));
        flip_z * world_to_camera.to_homogeneous()
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.ortho_height;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection() * model_matrix;
        project(&mvp, point, width, height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(false, 640, 480)
    }
}

/// Project `point` through a full model-view-projection matrix.
///
/// Returns screen `(x, y, depth)` or `None` when the point falls outside the
/// near/far range. Points off the sides of the screen are still returned so
/// the rasterizer can clip partially visible faces.
pub fn project(
    mvp: &Matrix4<f32>,
    point: &Point3<f32>,
    width: u32,
    height: u32,
) -> Option<(f32, f32, f32)> {
    let clip = mvp * point.to_homogeneous();

    // Behind the camera, or too close to divide safely
    if clip.w <= 1e-6 {
        return None;
    }

    let ndc = clip.xyz() / clip.w;
    if ndc.z < -1.0 || ndc.z > 1.0 {
        return None;
    }

    let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
    Some((screen_x, screen_y, ndc.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::axis_angle;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(false, 800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);

        let ortho = Camera::new(true, 640, 480);
        assert_eq!(ortho.mode, ProjectionMode::Orthographic);
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let mut camera = Camera::new(false, 640, 480);
        camera.position = Vector3::new(0.0, 0.0, -2.0);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 5.0), &Matrix4::identity(), 640, 480)
            .unwrap();
        assert!((x - 320.0).abs() < 1e-3);
        assert!((y - 240.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_is_rejected() {
        let camera = Camera::new(false, 640, 480);
        let behind = camera.project_to_screen(
            &Point3::new(0.0, 0.0, -5.0),
            &Matrix4::identity(),
            640,
            480,
        );
        assert!(behind.is_none());
    }

    #[test]
    fn test_positive_x_is_screen_right() {
        let camera = Camera::new(false, 640, 480);
        let (x, _, _) = camera
            .project_to_screen(&Point3::new(1.0, 0.0, 5.0), &Matrix4::identity(), 640, 480)
            .unwrap();
        assert!(x > 320.0);
    }

    #[test]
    fn test_rotated_camera_faces_new_forward() {
        let mut camera = Camera::new(false, 640, 480);
        camera.rotation = axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        assert!((camera.forward() - Vector3::x()).norm() < 1e-6);

        // Something straight ahead along the new forward lands mid-screen
        let (x, y, _) = camera
            .project_to_screen(&Point3::new(5.0, 0.0, 0.0), &Matrix4::identity(), 640, 480)
            .unwrap();
        assert!((x - 320.0).abs() < 1e-2);
        assert!((y - 240.0).abs() < 1e-2);
    }

    #[test]
    fn test_orthographic_keeps_size_with_depth() {
        let camera = Camera::new(true, 640, 480);
        let near = camera
            .project_to_screen(&Point3::new(1.0, 0.0, 2.0), &Matrix4::identity(), 640, 480)
            .unwrap();
        let far = camera
            .project_to_screen(&Point3::new(1.0, 0.0, 20.0), &Matrix4::identity(), 640, 480)
            .unwrap();
        assert!((near.0 - far.0).abs() < 1e-3);
    }
}
