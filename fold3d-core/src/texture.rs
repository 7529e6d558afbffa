/// Page texture composition: an optional base image plus multi-line text,
/// flattened into an RGBA map suitable as a mesh color map.
use std::path::{Path, PathBuf};

use font8x8::legacy::BASIC_LEGACY;
use image::{imageops, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

/// Default page map size
pub const PAGE_MAP_WIDTH: u32 = 1024;
pub const PAGE_MAP_HEIGHT: u32 = 512;

const FLAT_FILL: [u8; 4] = [0xff, 0xf8, 0xdc, 0xff];
const GRADIENT_END: [u8; 4] = [0xff, 0xe4, 0xc4, 0xff];
const TEXT_COLOR: [u8; 4] = [0x8b, 0x00, 0x00, 0xff];
const SHADOW_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0x40];
const BORDER_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0x0f];
const BORDER_INSET: u32 = 10;
const BORDER_WIDTH: u32 = 12;
const SHADOW_OFFSET: i32 = 3;
const LINE_HEIGHT_FACTOR: f32 = 1.2;
const MIN_FONT_PX: u32 = 8;
const GLYPH_SIZE: u32 = 8;

/// Failed to load a base image from disk
#[derive(Debug, Error)]
#[error("failed to load image {}: {source}", path.display())]
pub struct TextureError {
    path: PathBuf,
    source: image::ImageError,
}

/// Decode a base image for composition. Callers are expected to treat a
/// failure as "no image" and fall back to the gradient background.
pub fn load_base_image(path: &Path) -> Result<RgbaImage, TextureError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| TextureError {
            path: path.to_path_buf(),
            source,
        })
}

/// Compose a page map from an optional base image and multi-line text.
///
/// The base image is scaled to fill the whole map; without one the map gets
/// a diagonal cream-to-peach gradient. A faint border and a centered,
/// shadowed text block are drawn on top. Identical inputs always produce
/// pixel-identical output, and no input can make composition fail.
pub fn compose(base: Option<&RgbaImage>, text: &str, width: u32, height: u32) -> RgbaImage {
    let mut map = RgbaImage::from_pixel(width.max(1), height.max(1), Rgba(FLAT_FILL));

    match base {
        Some(img) if img.width() > 0 && img.height() > 0 => {
            let scaled = imageops::resize(
                img,
                map.width(),
                map.height(),
                imageops::FilterType::Triangle,
            );
            imageops::replace(&mut map, &scaled, 0, 0);
        }
        Some(_) => {
            // degenerate source, keep the flat fill
            debug!("base image has a zero dimension, using flat fill");
        }
        None => fill_gradient(&mut map),
    }

    draw_border(&mut map);
    draw_text_block(&mut map, text);
    map
}

/// Two-stop diagonal gradient parameterized by (x + y) / (w + h)
fn fill_gradient(map: &mut RgbaImage) {
    let (width, height) = map.dimensions();
    let span = (width + height).saturating_sub(2).max(1) as f32;
    for (x, y, pixel) in map.enumerate_pixels_mut() {
        let t = (x + y) as f32 / span;
        let mut channels = [0u8; 4];
        for (i, channel) in channels.iter_mut().enumerate() {
            let a = FLAT_FILL[i] as f32;
            let b = GRADIENT_END[i] as f32;
            *channel = (a + (b - a) * t).round() as u8;
        }
        *pixel = Rgba(channels);
    }
}

/// Semi-transparent rectangular frame inset from the map edges
fn draw_border(map: &mut RgbaImage) {
    let (width, height) = map.dimensions();
    if width <= 2 * (BORDER_INSET + BORDER_WIDTH) || height <= 2 * (BORDER_INSET + BORDER_WIDTH) {
        return;
    }
    let outer = BORDER_INSET;
    let inner = BORDER_INSET + BORDER_WIDTH;
    for y in outer..height - outer {
        for x in outer..width - outer {
            let in_band = x < inner
                || x >= width - inner
                || y < inner
                || y >= height - inner;
            if in_band {
                blend_pixel(map, x as i32, y as i32, BORDER_COLOR);
            }
        }
    }
}

/// Render the text block centered on the map, shadow pass first
fn draw_text_block(map: &mut RgbaImage, text: &str) {
    if text.is_empty() {
        return;
    }
    let (width, height) = map.dimensions();
    let font_px = (width / 30).max(MIN_FONT_PX);
    let line_height = (font_px as f32 * LINE_HEIGHT_FACTOR).round() as i32;

    let lines: Vec<&str> = text.split('\n').collect();
    let block_span = (lines.len() as i32 - 1) * line_height;
    let start_y = height as i32 / 2 - block_span / 2;

    for (index, line) in lines.iter().enumerate() {
        let center_y = start_y + index as i32 * line_height;
        draw_line(map, line, center_y, font_px, SHADOW_OFFSET, SHADOW_COLOR);
        draw_line(map, line, center_y, font_px, 0, TEXT_COLOR);
    }
}

/// Draw one line of glyphs, centered horizontally around the map midline
fn draw_line(map: &mut RgbaImage, line: &str, center_y: i32, font_px: u32, offset: i32, color: [u8; 4]) {
    let width = map.width() as i32;
    let advance = font_px as i32;
    let line_width = line.chars().count() as i32 * advance;
    let origin_x = (width - line_width) / 2 + offset;
    let origin_y = center_y - advance / 2 + offset;

    for (index, ch) in line.chars().enumerate() {
        let glyph = match glyph_for_char(ch) {
            Some(glyph) => glyph,
            None => continue,
        };
        let glyph_x = origin_x + index as i32 * advance;
        for py in 0..font_px {
            let row = glyph[(py * GLYPH_SIZE / font_px) as usize];
            for px in 0..font_px {
                let bit = px * GLYPH_SIZE / font_px;
                if (row >> bit) & 0x01 == 0 {
                    continue;
                }
                blend_pixel(map, glyph_x + px as i32, origin_y + py as i32, color);
            }
        }
    }
}

/// Look up the 8x8 bitmap for a character; non-ASCII renders as blank
fn glyph_for_char(ch: char) -> Option<[u8; 8]> {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        Some(BASIC_LEGACY[index])
    } else {
        None
    }
}

/// Source-over blend of a single pixel onto the opaque map
fn blend_pixel(map: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 || x >= map.width() as i32 || y >= map.height() as i32 {
        return;
    }
    let pixel = map.get_pixel_mut(x as u32, y as u32);
    let alpha = color[3] as f32 / 255.0;
    for i in 0..3 {
        let src = color[i] as f32;
        let dst = pixel[i] as f32;
        pixel[i] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    pixel[3] = 0xff;
}

/// A composited color map, owned exclusively by the mesh it is assigned to
#[derive(Debug, Clone)]
pub struct Material {
    map: RgbaImage,
}

impl Material {
    pub fn new(map: RgbaImage) -> Self {
        Self { map }
    }

    /// Single-color fallback material
    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            map: RgbaImage::from_pixel(1, 1, Rgba(color)),
        }
    }

    pub fn map(&self) -> &RgbaImage {
        &self.map
    }

    /// Nearest-neighbor sample; coordinates outside [0, 1] clamp to the edge
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        let x = (u.clamp(0.0, 1.0) * (self.map.width() - 1) as f32).round() as u32;
        let y = (v.clamp(0.0, 1.0) * (self.map.height() - 1) as f32).round() as u32;
        let pixel = self.map.get_pixel(x, y);
        [pixel[0], pixel[1], pixel[2]]
    }
}
