/// Scene graph: objects, materials and the camera they are viewed through
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Mesh;
use crate::projection::Camera;
use crate::transform::Transform;

new_key_type! {
    /// Handle to an object registered with a [`Scene`]
    pub struct ObjectId;
}

/// RGBA color, channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// 8-bit channels, alpha dropped
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub line_width: u32,
}

impl Material {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            line_width: 0,
        }
    }
}

/// A positionable, rotatable, scalable object with optional geometry
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Arc<Mesh>>,
    pub material: Option<Material>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            mesh: None,
            material: None,
        }
    }

    pub fn with_mesh(mut self, mesh: Arc<Mesh>) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
}

/// Draw target for [`Scene::render`]
pub trait SceneRenderer {
    fn clear(&mut self);

    /// Called once per object that carries a mesh
    fn draw_object(&mut self, camera: &Camera, object: &SceneObject);
}

/// Collection of scene objects plus the camera used to view them
pub struct Scene {
    pub name: String,
    pub camera: Camera,
    objects: SlotMap<ObjectId, SceneObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            objects: SlotMap::with_key(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Remove an object; stale handles return `None`
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    pub fn render<R: SceneRenderer>(&self, renderer: &mut R) {
        renderer.clear();
        for (_, object) in self.objects.iter() {
            if object.mesh.is_some() {
                renderer.draw_object(&self.camera, object);
            }
        }
    }
}
