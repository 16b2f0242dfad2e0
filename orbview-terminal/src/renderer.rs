//! ASCII rasterizer for terminal rendering.

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Matrix4;
use orbview_core::projection::project_to_screen;
use orbview_core::{Frame, Rgb, ShadingModel, SurfaceSample, Triangle, TransformBundle};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: [u8; 3],
}

const BLANK: Cell = Cell {
    character: ' ',
    color: [0, 0, 0],
};

/// A vertex after projection and lighting.
#[derive(Debug, Clone, Copy)]
struct ShadedVertex {
    x: f32,
    y: f32,
    depth: f32,
    color: Rgb,
}

/// ASCII renderer that converts 3D meshes to terminal characters
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
            cells: vec![BLANK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    /// Rasterize every triangle of the frame's mesh with Gouraud shading.
    pub fn render(&mut self, frame: &Frame<'_>) {
        let mvp = frame.transforms.mvp();
        for triangle in frame.mesh.triangles() {
            self.render_triangle(&triangle, &mvp, &frame.transforms, frame.shading);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        mvp: &Matrix4<f32>,
        transforms: &TransformBundle,
        shading: ShadingModel,
    ) {
        let mut shaded = [ShadedVertex {
            x: 0.0,
            y: 0.0,
            depth: 0.0,
            color: Rgb::new(0.0, 0.0, 0.0),
        }; 3];

        for (out, vertex) in shaded.iter_mut().zip(&triangle.vertices) {
            // Corners beside the screen are clipped during rasterization; only
            // corners behind the eye or past the far plane drop the triangle
            let Some(screen) = project_to_screen(
                mvp,
                &vertex.position,
                self.width as u32,
                self.height as u32,
            ) else {
                return;
            };

            let sample = SurfaceSample {
                normal_object: vertex.normal,
                normal_eye: transforms.normal.transform_vector(&vertex.normal),
                position_eye: transforms.model_view.transform_point(&vertex.position),
            };

            *out = ShadedVertex {
                x: screen.x,
                y: screen.y,
                depth: screen.depth,
                color: shading.shade(&sample),
            };
        }

        self.rasterize_triangle(&shaded);
    }

    fn rasterize_triangle(&mut self, v: &[ShadedVertex; 3]) {
        // Bounding box, clipped to screen bounds
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0) as i32;
        let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0) as i32;
        let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                let Some((w0, w1, w2)) =
                    barycentric((v[0].x, v[0].y), (v[1].x, v[1].y), (v[2].x, v[2].y), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v[0].depth + w1 * v[1].depth + w2 * v[2].depth;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    let color = Rgb::new(
                        w0 * v[0].color.r + w1 * v[1].color.r + w2 * v[2].color.r,
                        w0 * v[0].color.g + w1 * v[1].color.g + w2 * v[2].color.g,
                        w0 * v[0].color.b + w1 * v[1].color.b + w2 * v[2].color.b,
                    );
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = Cell {
                        character: ramp_char(color.luminance()),
                        color: color.to_u8(),
                    };
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for (y, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if y > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in row {
                let [r, g, b] = cell.color;
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].character
    }
}

/// Covered cells never use the blank at the bottom of the ramp.
fn ramp_char(luminance: f32) -> char {
    let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
    let index = 1 + (luminance.clamp(0.0, 1.0) * steps).round() as usize;
    LUMINOSITY_RAMP[index]
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
