/// Cubefall Core Library - simulation and orientation logic for the demos
///
/// This library holds everything the frame driver calls into: the falling
/// cube simulation, the free-look and orbit controllers, procedural meshes,
/// and the scene/camera types they write their transforms into.

pub mod config;
pub mod error;
pub mod free_look;
pub mod geometry;
pub mod orbit;
pub mod particles;
pub mod procedural;
pub mod projection;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use config::{DemoConfig, LookOptions, OrbitOptions, SpawnOptions, Span, ViewportOptions};
pub use error::CoreError;
pub use free_look::{FreeLookController, LookLock};
pub use geometry::{Mesh, Polygon};
pub use orbit::OrbitController;
pub use particles::{FallingCubes, FallingObject, SpawnTimer, TickReport};
pub use procedural::build_pyramid;
pub use projection::{Camera, ProjectionMode};
pub use scene::{Color, Material, ObjectId, Scene, SceneObject, SceneRenderer};
pub use transform::{Axis, Rotation, Transform};
