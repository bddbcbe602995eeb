/// Procedural mesh generation
use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::error::CoreError;
use crate::geometry::{Mesh, Polygon};

/// Build a pyramid with a regular `sides`-gon base in the X-Z plane and its
/// apex at `height` above it, centered vertically on the local origin.
///
/// The base ring comes first, followed by one triangle per consecutive pair
/// of base vertices. The edge closing the ring (last vertex back to the
/// first) has no side face, so the result has `sides - 1` triangles.
pub fn build_pyramid(sides: usize, height: f32, radius: f32) -> Result<Mesh, CoreError> {
    if sides < 3 {
        return Err(CoreError::precondition(format!(
            "pyramid needs at least 3 sides, got {sides}"
        )));
    }
    if !height.is_finite() {
        return Err(CoreError::precondition(format!(
            "pyramid height must be finite, got {height}"
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(CoreError::precondition(format!(
            "pyramid radius must be positive, got {radius}"
        )));
    }

    let apex = Point3::new(0.0, height, 0.0);
    let step = TAU / sides as f32;
    let base: Vec<Point3<f32>> = (0..sides)
        .map(|i| {
            let angle = i as f32 * step;
            Point3::new(radius * angle.sin(), 0.0, radius * angle.cos())
        })
        .collect();

    let mut mesh = Mesh::new("Pyramid");
    mesh.add_polygon(Polygon::new(base.clone()));
    for pair in base.windows(2) {
        mesh.add_polygon(Polygon::new(vec![pair[0], pair[1], apex]));
    }

    mesh.offset(&Vector3::new(0.0, -height / 2.0, 0.0));
    log::debug!(
        "built pyramid: {} sides, {} polygons",
        sides,
        mesh.polygons.len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_pyramid_layout() {
        let mesh = build_pyramid(4, 1.0, 0.8).unwrap();
        assert_eq!(mesh.polygons.len(), 4);

        let base = &mesh.polygons[0];
        assert_eq!(base.len(), 4);

        let sides = &mesh.polygons[1..];
        assert_eq!(sides.len(), 3);
        assert!(sides.iter().all(|p| p.len() == 3));
    }

    #[test]
    fn test_vertices_are_vertically_centered() {
        let mesh = build_pyramid(4, 1.0, 0.8).unwrap();
        for v in mesh.polygons.iter().flat_map(|p| p.vertices.iter()) {
            assert!(v.y >= -0.5 - 1e-6 && v.y <= 0.5 + 1e-6, "y out of range: {}", v.y);
        }
        // Apex of every side face sits at +h/2, base ring at -h/2
        for side in &mesh.polygons[1..] {
            assert!((side.vertices[2].y - 0.5).abs() < 1e-6);
        }
        assert!(mesh.polygons[0].vertices.iter().all(|v| (v.y + 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_base_ring_on_circle() {
        let mesh = build_pyramid(6, 2.0, 1.5).unwrap();
        let base = &mesh.polygons[0];
        assert_eq!(base.len(), 6);
        for v in &base.vertices {
            assert!(((v.x * v.x + v.z * v.z).sqrt() - 1.5).abs() < 1e-5);
        }
        // First vertex lies on +Z
        assert!((base.vertices[0].z - 1.5).abs() < 1e-6);
        assert!(base.vertices[0].x.abs() < 1e-6);
    }

    #[test]
    fn test_closing_edge_has_no_face() {
        let mesh = build_pyramid(5, 1.0, 1.0).unwrap();
        let base = &mesh.polygons[0].vertices;
        let last = base[base.len() - 1];
        let first = base[0];
        let closes_ring = mesh.polygons[1..]
            .iter()
            .any(|p| p.vertices.contains(&last) && p.vertices.contains(&first));
        assert!(!closes_ring);
    }

    #[test]
    fn test_rejects_too_few_sides() {
        for sides in 0..3 {
            assert!(matches!(
                build_pyramid(sides, 1.0, 0.8),
                Err(CoreError::Precondition(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(build_pyramid(4, f32::NAN, 0.8).is_err());
        assert!(build_pyramid(4, 1.0, 0.0).is_err());
        assert!(build_pyramid(4, 1.0, -1.0).is_err());
    }
}
