/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use cubefall_core::projection::project;
use cubefall_core::{Camera, Color, SceneObject, SceneRenderer};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Faces seen edge-on still get this much of their material color
const AMBIENT: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::WHITE,
};

/// ASCII renderer that converts scene objects to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Glyph at a cell, `None` outside the buffer
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    // Degenerate on screen; nothing to fill
                    return;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(u8, u8, u8)> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let (r, g, b) = cell.color.to_rgb8();
                if current != Some((r, g, b)) {
                    writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                    current = Some((r, g, b));
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl SceneRenderer for AsciiRenderer {
    fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(EMPTY);
    }

    fn draw_object(&mut self, camera: &Camera, object: &SceneObject) {
        let Some(mesh) = object.mesh.as_deref() else {
            return;
        };
        let base_color = object
            .material
            .as_ref()
            .map_or(Color::WHITE, |material| material.color);
        let mvp = camera.view_projection() * object.transform.model_matrix();
        let view_dir = camera.forward();
        let (width, height) = (self.width as u32, self.height as u32);

        for polygon in &mesh.polygons {
            let Some(normal) = polygon.normal() else {
                continue;
            };
            // Shade by how squarely the face points along the view axis
            let brightness = (object.transform.rotation * normal).dot(&view_dir).abs();
            let ramp_index = ((brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize)
                .min(LUMINOSITY_RAMP.len() - 1);
            let cell = Cell {
                glyph: LUMINOSITY_RAMP[ramp_index],
                color: base_color.scaled(AMBIENT + (1.0 - AMBIENT) * brightness),
            };

            for triangle in polygon.triangles() {
                let projected = [
                    project(&mvp, &triangle[0], width, height),
                    project(&mvp, &triangle[1], width, height),
                    project(&mvp, &triangle[2], width, height),
                ];
                // Triangles crossing the near plane are dropped whole
                if let [Some(a), Some(b), Some(c)] = projected {
                    self.rasterize_triangle(&[a, b, c], cell);
                }
            }
        }
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
