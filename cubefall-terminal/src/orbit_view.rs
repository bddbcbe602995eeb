/// Single-object viewer with stepped orbit controls
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use nalgebra::Vector3;

use cubefall_core::{
    build_pyramid, Axis, Camera, CoreError, DemoConfig, Material, ObjectId, OrbitController,
    Scene, SceneObject, Transform,
};

use crate::{cell_aspect, Demo, Flow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitAction {
    Rotate(Axis),
    Translate(Axis),
    Quit,
}

pub fn orbit_action(code: KeyCode) -> Option<OrbitAction> {
    let action = match code {
        KeyCode::Esc => OrbitAction::Quit,
        KeyCode::Up => OrbitAction::Rotate(Axis::PosX),
        KeyCode::Down => OrbitAction::Rotate(Axis::NegX),
        KeyCode::Left => OrbitAction::Rotate(Axis::PosY),
        KeyCode::Right => OrbitAction::Rotate(Axis::NegY),
        KeyCode::PageUp => OrbitAction::Rotate(Axis::PosZ),
        KeyCode::PageDown => OrbitAction::Rotate(Axis::NegZ),
        KeyCode::Char('w') => OrbitAction::Translate(Axis::PosY),
        KeyCode::Char('s') => OrbitAction::Translate(Axis::NegY),
        KeyCode::Char('a') => OrbitAction::Translate(Axis::PosX),
        KeyCode::Char('d') => OrbitAction::Translate(Axis::NegX),
        KeyCode::Char('q') => OrbitAction::Translate(Axis::NegZ),
        KeyCode::Char('e') => OrbitAction::Translate(Axis::PosZ),
        _ => return None,
    };
    Some(action)
}

pub struct OrbitViewerDemo {
    scene: Scene,
    target: ObjectId,
    orbit: OrbitController,
}

impl OrbitViewerDemo {
    pub fn new(config: &DemoConfig, cols: u16, rows: u16) -> Result<Self, CoreError> {
        let viewport = &config.viewport;
        let mut camera = Camera::new(viewport.orthographic, viewport.width, viewport.height);
        camera.aspect = cell_aspect(cols, rows);
        camera.position = viewport.camera_position();

        let orbit_options = &config.orbit;
        let mesh = build_pyramid(orbit_options.sides, orbit_options.height, orbit_options.radius)?;

        let mut scene = Scene::new("TestScene", camera);
        let target = scene.add_object(
            SceneObject::new("TestObject")
                .with_mesh(Arc::new(mesh))
                .with_material(Material::new(orbit_options.color(), "TestMaterial1"))
                .with_transform(Transform::identity()),
        );
        log::info!(
            "orbit viewer: {}-sided pyramid, {} degree steps",
            orbit_options.sides,
            orbit_options.angle_step_degrees
        );

        Ok(Self {
            scene,
            target,
            orbit: OrbitController::from_options(orbit_options),
        })
    }

    pub fn target(&self) -> Option<&SceneObject> {
        self.scene.object(self.target)
    }

    fn apply(&mut self, action: OrbitAction) -> Flow {
        let Some(target) = self.scene.object_mut(self.target) else {
            return Flow::Quit;
        };
        match action {
            OrbitAction::Rotate(axis) => self.orbit.on_axis_step(target, axis),
            OrbitAction::Translate(direction) => self.orbit.on_translate_step(target, direction),
            OrbitAction::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}

impl Demo for OrbitViewerDemo {
    fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                orbit_action(key.code).map_or(Flow::Continue, |action| self.apply(action))
            }
            _ => Flow::Continue,
        }
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn status(&self, fps: f32) -> String {
        let position = self
            .target()
            .map(|target| target.transform.position)
            .unwrap_or_else(Vector3::zeros);
        format!(
            "Orbit Viewer | FPS: {:.1} | pos ({:.1}, {:.1}, {:.1}) | Arrows/PgUp/PgDn=Rotate WASDQE=Move Esc=Quit",
            fps, position.x, position.y, position.z
        )
    }
}
