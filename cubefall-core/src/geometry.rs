/// Polygon meshes handed to scene objects
use nalgebra::{Point3, Vector3};

/// A planar face, vertices in winding order
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<f32>>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point3<f32>>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Face normal using Newell's method, so quads and n-gons work too.
    ///
    /// Returns `None` for degenerate faces.
    pub fn normal(&self) -> Option<Vector3<f32>> {
        let mut normal = Vector3::zeros();
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal.try_normalize(1e-9)
    }

    /// Split into a triangle fan anchored at the first vertex
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>; 3]> + '_ {
        let anchor = self.vertices.first().copied();
        self.vertices
            .windows(2)
            .skip(1)
            .filter_map(move |pair| anchor.map(|a| [a, pair[0], pair[1]]))
    }
}

/// A 3D mesh composed of polygons
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polygons: Vec::new(),
        }
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }

    /// Translate every vertex of every polygon by `delta`
    pub fn offset(&mut self, delta: &Vector3<f32>) {
        for vertex in self.polygons.iter_mut().flat_map(|p| p.vertices.iter_mut()) {
            *vertex += *delta;
        }
    }

    /// Axis-aligned cube centered on the origin, one quad per face
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let p = |x: f32, y: f32, z: f32| Point3::new(x * h, y * h, z * h);
        let mut mesh = Self::new("Cube");

        // Front (+Z)
        mesh.add_polygon(Polygon::new(vec![
            p(-1.0, -1.0, 1.0),
            p(1.0, -1.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(-1.0, 1.0, 1.0),
        ]));
        // Back (-Z)
        mesh.add_polygon(Polygon::new(vec![
            p(-1.0, -1.0, -1.0),
            p(-1.0, 1.0, -1.0),
            p(1.0, 1.0, -1.0),
            p(1.0, -1.0, -1.0),
        ]));
        // Top (+Y)
        mesh.add_polygon(Polygon::new(vec![
            p(-1.0, 1.0, -1.0),
            p(-1.0, 1.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(1.0, 1.0, -1.0),
        ]));
        // Bottom (-Y)
        mesh.add_polygon(Polygon::new(vec![
            p(-1.0, -1.0, -1.0),
            p(1.0, -1.0, -1.0),
            p(1.0, -1.0, 1.0),
            p(-1.0, -1.0, 1.0),
        ]));
        // Right (+X)
        mesh.add_polygon(Polygon::new(vec![
            p(1.0, -1.0, -1.0),
            p(1.0, 1.0, -1.0),
            p(1.0, 1.0, 1.0),
            p(1.0, -1.0, 1.0),
        ]));
        // Left (-X)
        mesh.add_polygon(Polygon::new(vec![
            p(-1.0, -1.0, -1.0),
            p(-1.0, -1.0, 1.0),
            p(-1.0, 1.0, 1.0),
            p(-1.0, 1.0, -1.0),
        ]));

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new("Mesh")
    }
}
