/// Falling-object lifecycle: spawn on a timer, integrate under gravity, cull at the floor
use std::sync::Arc;

use nalgebra::{Unit, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{SpawnOptions, Span};
use crate::error::CoreError;
use crate::geometry::Mesh;
use crate::scene::{Color, Material, ObjectId, Scene, SceneObject};
use crate::transform::{axis_angle, compose_world, unit_axis, Rotation, Transform};

/// Countdown that fires once every `interval` seconds of accumulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    interval: f32,
    remaining: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `elapsed`; returns true (and rearms) once the timer
    /// reaches or passes zero.
    pub fn advance(&mut self, elapsed: f32) -> bool {
        self.remaining -= elapsed;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }
}

/// One spawned cube and its physics state
#[derive(Debug, Clone)]
pub struct FallingObject {
    id: ObjectId,
    pub position: Vector3<f32>,
    pub velocity: f32,
    pub orientation: Rotation,
    rotation_axis: Unit<Vector3<f32>>,
    rotation_speed: f32,
    color: Color,
    shape: Arc<Mesh>,
}

impl FallingObject {
    /// Scene handle mirroring this object
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn rotation_axis(&self) -> Unit<Vector3<f32>> {
        self.rotation_axis
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> &Arc<Mesh> {
        &self.shape
    }

    /// Advance velocity, height and spin by `elapsed` seconds
    pub fn integrate(&mut self, elapsed: f32, gravity: f32) {
        self.velocity += gravity * elapsed;
        self.position.y += self.velocity * elapsed;

        let increment = axis_angle(&self.rotation_axis, self.rotation_speed * elapsed);
        self.orientation = compose_world(&increment, &self.orientation);
    }

    fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.orientation,
            ..Transform::identity()
        }
    }
}

/// What a single tick did to the active set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub culled: usize,
    pub skipped: usize,
}

/// Spawns, integrates and culls falling cubes
pub struct FallingCubes {
    options: SpawnOptions,
    mesh: Arc<Mesh>,
    timer: SpawnTimer,
    active: Vec<FallingObject>,
    rng: StdRng,
    total_spawned: u64,
}

impl FallingCubes {
    pub fn new(options: SpawnOptions) -> Result<Self, CoreError> {
        Self::with_rng(options, StdRng::from_os_rng())
    }

    /// Deterministic spawning for reproducible runs
    pub fn with_seed(options: SpawnOptions, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(options, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(options: SpawnOptions, rng: StdRng) -> Result<Self, CoreError> {
        options.validate()?;
        let mesh = Arc::new(Mesh::cube(options.cube_size));
        Ok(Self {
            timer: SpawnTimer::new(options.interval),
            options,
            mesh,
            active: Vec::new(),
            rng,
            total_spawned: 0,
        })
    }

    pub fn options(&self) -> &SpawnOptions {
        &self.options
    }

    pub fn active(&self) -> &[FallingObject] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Advance the simulation by `elapsed` seconds.
    ///
    /// Spawning happens first, so an object created this tick is integrated
    /// with the same `elapsed`. Culling runs last; no object below the floor
    /// survives a tick.
    pub fn tick(&mut self, elapsed: f32, scene: &mut Scene) -> TickReport {
        debug_assert!(elapsed >= 0.0, "negative frame time {elapsed}");
        let mut report = TickReport::default();

        if self.timer.advance(elapsed) {
            if self.active.len() < self.options.max_objects {
                self.spawn(scene);
                report.spawned += 1;
            } else {
                log::warn!(
                    "active set full ({} objects), skipping spawn",
                    self.active.len()
                );
                report.skipped += 1;
            }
        }

        let gravity = self.options.gravity;
        for object in &mut self.active {
            object.integrate(elapsed, gravity);
            if let Some(scene_object) = scene.object_mut(object.id) {
                scene_object.transform = object.transform();
            }
        }

        let floor = self.options.floor;
        let before = self.active.len();
        self.active.retain(|object| {
            if object.position.y < floor {
                scene.remove_object(object.id);
                false
            } else {
                true
            }
        });
        report.culled = before - self.active.len();
        if report.culled > 0 {
            log::trace!("culled {} objects below y={}", report.culled, floor);
        }

        report
    }

    fn spawn(&mut self, scene: &mut Scene) {
        let options = &self.options;
        let rng = &mut self.rng;

        let position = Vector3::new(
            options.x.sample(rng),
            options.y.sample(rng),
            options.z.sample(rng),
        );
        let color = Color::new(
            options.color.sample(rng),
            options.color.sample(rng),
            options.color.sample(rng),
            1.0,
        );
        let rotation_axis = sample_axis(rng);
        let rotation_speed = options.spin.sample(rng);

        let transform = Transform::from_position(position);
        let id = scene.add_object(
            SceneObject::new("FallingCube")
                .with_mesh(Arc::clone(&self.mesh))
                .with_material(Material::new(color, "FallingCubeMaterial"))
                .with_transform(transform),
        );

        self.active.push(FallingObject {
            id,
            position,
            velocity: 0.0,
            orientation: Rotation::identity(),
            rotation_axis,
            rotation_speed,
            color,
            shape: Arc::clone(&self.mesh),
        });
        self.total_spawned += 1;
        log::debug!(
            "spawned cube #{} at ({:.2}, {:.2}, {:.2})",
            self.total_spawned,
            position.x,
            position.y,
            position.z
        );
    }
}

/// Uniformly sample each component in [-1, 1] and normalize, drawing again
/// whenever the sample is too short to normalize.
pub fn sample_axis<R: Rng + ?Sized>(rng: &mut R) -> Unit<Vector3<f32>> {
    let component = Span::new(-1.0, 1.0);
    loop {
        let candidate = Vector3::new(
            component.sample(rng),
            component.sample(rng),
            component.sample(rng),
        );
        if let Ok(axis) = unit_axis(candidate) {
            return axis;
        }
        log::trace!("rejected near-zero rotation axis sample");
    }
}
