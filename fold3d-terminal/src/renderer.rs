/// Textured cell rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

use fold3d_core::texture::Material;
use fold3d_core::{Camera, Scene, Triangle};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];
/// Floor brightness so faces turned away from the light stay readable
const AMBIENT: f32 = 0.25;

/// Renders scene meshes to colored terminal cells with a depth buffer
pub struct CellRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<(u8, u8, u8)>>,
}

impl CellRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let size = width * height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![None; size];
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = None;
        }
    }

    /// Rasterize every mesh-bearing node of the scene
    pub fn render_scene(&mut self, scene: &Scene, camera: &Camera) {
        scene.visit(|world, mesh, material| {
            for triangle in &mesh.triangles {
                self.render_triangle(triangle, world, material, camera);
            }
        });
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        material: &Material,
        camera: &Camera,
    ) {
        // Project vertices to screen space, keeping their uvs
        let mut screen = [(0.0f32, 0.0f32, 0.0f32); 3];
        let mut uvs = [[0.0f32; 2]; 3];
        for (i, vertex) in triangle.vertices.iter().enumerate() {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => {
                    screen[i] = coords;
                    uvs[i] = vertex.uv;
                }
                None => return, // Triangle is clipped
            }
        }

        // Shade by how squarely the face points at the view light. Book
        // materials are double-sided, so the back of a cover lights the same.
        let normal = model_matrix
            .transform_vector(&triangle.calculate_normal())
            .normalize();
        let light_dir = Vector3::new(0.0, 0.0, 1.0);
        let brightness = normal.dot(&light_dir).abs().max(AMBIENT);

        self.rasterize_triangle(&screen, &uvs, material, brightness);
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[(f32, f32, f32); 3],
        uvs: &[[f32; 2]; 3],
        material: &Material,
        brightness: f32,
    ) {
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

        let char_index = ((brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize)
            .min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // Interpolate depth and texture coordinates
                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                let u = w0 * uvs[0][0] + w1 * uvs[1][0] + w2 * uvs[2][0];
                let v = w0 * uvs[0][1] + w1 * uvs[1][1] + w2 * uvs[2][1];
                let [r, g, b] = material.sample(u, v);

                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = character;
                self.color_buffer[idx] = Some((
                    (r as f32 * brightness) as u8,
                    (g as f32 * brightness) as u8,
                    (b as f32 * brightness) as u8,
                ));
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                match self.color_buffer[idx] {
                    Some((r, g, b)) => {
                        writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                        writer.queue(Print(self.char_buffer[idx]))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Fraction of cells covered by geometry
    pub fn coverage(&self) -> f32 {
        if self.color_buffer.is_empty() {
            return 0.0;
        }
        let filled = self.color_buffer.iter().filter(|c| c.is_some()).count();
        filled as f32 / self.color_buffer.len() as f32
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

#[cfg(test)]
mod tests {
    use super::*;
    use fold3d_core::{build_book, BookDimensions, BookMaterials, Mesh};
    use nalgebra::Vector3 as V3;

    fn materials() -> BookMaterials {
        BookMaterials {
            cover_front: Material::solid([139, 0, 0, 255]),
            cover_back: Material::solid([51, 51, 51, 255]),
            page_left: Material::solid([255, 255, 255, 255]),
            page_right: Material::solid([255, 248, 225, 255]),
        }
    }

    #[test]
    fn test_barycentric_center() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0))
            .expect("non-degenerate triangle");
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-5);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
    }

    #[test]
    fn test_barycentric_degenerate_is_rejected() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_closed_book_covers_some_cells() {
        let mut scene = Scene::new();
        build_book(&mut scene, BookDimensions::default(), materials());
        let camera = Camera::new(80, 24);
        let mut renderer = CellRenderer::new(80, 24);
        renderer.clear();
        renderer.render_scene(&scene, &camera);
        assert!(renderer.coverage() > 0.0);

        let mut out: Vec<u8> = Vec::new();
        renderer.draw(&mut out).expect("draw into memory");
        assert!(!out.is_empty());
    }

    #[test]
    fn test_nearer_surface_wins_depth_test() {
        let mut scene = Scene::new();
        let near = scene.add_node(None, V3::new(0.0, 0.0, 1.0));
        scene.attach_mesh(near, Mesh::slab(1.0, 1.0, 0.01), Material::solid([255, 0, 0, 255]));
        let far = scene.add_node(None, V3::new(0.0, 0.0, -1.0));
        scene.attach_mesh(far, Mesh::slab(1.0, 1.0, 0.01), Material::solid([0, 0, 255, 255]));

        let camera = Camera::new(80, 24);
        let mut renderer = CellRenderer::new(80, 24);
        renderer.render_scene(&scene, &camera);

        let shaded: Vec<(u8, u8, u8)> = renderer.color_buffer.iter().flatten().copied().collect();
        assert!(!shaded.is_empty());
        // where the slabs overlap the red one is closer; no cell may show
        // blue stronger than red in the overlap region, so at least one red
        // cell must exist
        assert!(shaded.iter().any(|(r, _, b)| r > b));
    }

    #[test]
    fn test_resize_clears_buffers() {
        let mut renderer = CellRenderer::new(10, 5);
        renderer.resize(20, 10);
        assert_eq!(renderer.char_buffer.len(), 200);
        assert!(renderer.color_buffer.iter().all(|c| c.is_none()));
    }
}
