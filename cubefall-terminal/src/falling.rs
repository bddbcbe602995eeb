/// Falling cubes with a free-look camera
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use nalgebra::Vector3;

use cubefall_core::{
    Camera, CoreError, DemoConfig, FallingCubes, FreeLookController, LookLock, Scene, TickReport,
};

use crate::{cell_aspect, Demo, Flow};

/// Pointer units per terminal cell, so look speed is comparable to a mouse
const POINTER_UNITS_PER_CELL: f32 = 8.0;

/// Keyboard actions for the falling-cubes demo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookAction {
    Move(Vector3<f32>),
    Release,
    Quit,
}

pub fn look_action(code: KeyCode) -> Option<LookAction> {
    match code {
        KeyCode::Char('w') => Some(LookAction::Move(Vector3::new(0.0, 0.0, 1.0))),
        KeyCode::Char('a') => Some(LookAction::Move(Vector3::new(-1.0, 0.0, 0.0))),
        KeyCode::Char('s') => Some(LookAction::Move(Vector3::new(0.0, 0.0, -1.0))),
        KeyCode::Char('d') => Some(LookAction::Move(Vector3::new(1.0, 0.0, 0.0))),
        KeyCode::Esc => Some(LookAction::Release),
        KeyCode::Char('q') => Some(LookAction::Quit),
        _ => None,
    }
}

pub struct FallingCubesDemo {
    scene: Scene,
    cubes: FallingCubes,
    look: FreeLookController,
    last_mouse: Option<(u16, u16)>,
    culled: u64,
}

impl FallingCubesDemo {
    pub fn new(
        config: &DemoConfig,
        seed: Option<u64>,
        cols: u16,
        rows: u16,
    ) -> Result<Self, CoreError> {
        let viewport = &config.viewport;
        let mut camera = Camera::new(viewport.orthographic, viewport.width, viewport.height);
        camera.aspect = cell_aspect(cols, rows);
        // Moves the camera back from the spawn volume
        camera.position = viewport.camera_position();

        let cubes = match seed {
            Some(seed) => FallingCubes::with_seed(config.spawn.clone(), seed)?,
            None => FallingCubes::new(config.spawn.clone())?,
        };
        log::info!(
            "falling cubes: one every {}s, gravity {}, floor {}",
            config.spawn.interval,
            config.spawn.gravity,
            config.spawn.floor
        );

        Ok(Self {
            scene: Scene::new("TestScene", camera),
            cubes,
            look: FreeLookController::new(&config.look, viewport.width, viewport.height),
            last_mouse: None,
            culled: 0,
        })
    }

    pub fn cubes(&self) -> &FallingCubes {
        &self.cubes
    }

    pub fn look(&self) -> &FreeLookController {
        &self.look
    }

    pub fn camera(&self) -> &Camera {
        &self.scene.camera
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        match look_action(key.code) {
            Some(LookAction::Move(direction)) => {
                self.look.on_discrete_move(&mut self.scene.camera, &direction);
            }
            Some(LookAction::Release) => {
                if self.look.release() {
                    log::info!("pointer released; click to capture again");
                }
            }
            Some(LookAction::Quit) => return Flow::Quit,
            None => {}
        }
        Flow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let position = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                // Terminals cannot warp the pointer, so deltas come from
                // successive reports instead of the returned recenter target.
                if let Some((x, y)) = self.last_mouse {
                    let dx = (position.0 as f32 - x as f32) * POINTER_UNITS_PER_CELL;
                    let dy = (position.1 as f32 - y as f32) * POINTER_UNITS_PER_CELL;
                    self.look.on_pointer_delta(&mut self.scene.camera, dx, dy);
                }
                self.last_mouse = Some(position);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.look.engage() {
                    self.last_mouse = Some(position);
                }
            }
            _ => {}
        }
    }
}

impl Demo for FallingCubesDemo {
    fn handle_event(&mut self, event: &Event) -> Flow {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn update(&mut self, elapsed: f32) {
        let report: TickReport = self.cubes.tick(elapsed, &mut self.scene);
        self.culled += report.culled as u64;
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn status(&self, fps: f32) -> String {
        let lock = match self.look.lock() {
            LookLock::Locked => "captured",
            LookLock::Free => "released",
        };
        format!(
            "Cubefall | FPS: {:.1} | cubes: {} (spawned {}, fallen {}) | pointer {} | WASD=Move Mouse=Look Esc=Release Click=Capture Q=Quit",
            fps,
            self.cubes.len(),
            self.cubes.total_spawned(),
            self.culled,
            lock
        )
    }

    fn captures_mouse(&self) -> bool {
        true
    }

    fn cursor_visible(&self) -> bool {
        !self.look.is_locked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn demo() -> FallingCubesDemo {
        FallingCubesDemo::new(&DemoConfig::default(), Some(11), 80, 24).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            look_action(KeyCode::Char('w')),
            Some(LookAction::Move(Vector3::new(0.0, 0.0, 1.0)))
        );
        assert_eq!(look_action(KeyCode::Esc), Some(LookAction::Release));
        assert_eq!(look_action(KeyCode::Char('q')), Some(LookAction::Quit));
        assert_eq!(look_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_camera_starts_behind_spawn_volume() {
        let demo = demo();
        assert_eq!(demo.camera().position, Vector3::new(0.0, 0.0, -2.0));
        assert!(demo.look().is_locked());
    }

    #[test]
    fn test_forward_key_moves_camera() {
        let mut demo = demo();
        assert_eq!(demo.handle_event(&key(KeyCode::Char('w'))), Flow::Continue);
        assert!((demo.camera().position - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_mouse_motion_turns_camera_only_while_locked() {
        let mut demo = demo();
        demo.handle_event(&mouse(MouseEventKind::Moved, 40, 12));
        demo.handle_event(&mouse(MouseEventKind::Moved, 43, 12));
        let turned = demo.camera().rotation;
        assert!(turned.angle() > 1e-3);

        demo.handle_event(&key(KeyCode::Esc));
        assert!(!demo.look().is_locked());
        demo.handle_event(&mouse(MouseEventKind::Moved, 60, 2));
        assert_eq!(demo.camera().rotation, turned);

        demo.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 60, 2));
        assert!(demo.look().is_locked());
        assert!(!demo.cursor_visible());
    }

    #[test]
    fn test_update_spawns_into_scene() {
        let mut demo = demo();
        demo.update(0.5);
        assert_eq!(demo.cubes().len(), 1);
        assert_eq!(demo.scene().len(), 1);
        assert!(demo.status(30.0).contains("cubes: 1"));
    }

    #[test]
    fn test_quit_key() {
        let mut demo = demo();
        assert_eq!(demo.handle_event(&key(KeyCode::Char('q'))), Flow::Quit);
    }
}
