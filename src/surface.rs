//! Drawing surfaces.
//!
//! [`DrawContext`] is the small slice of a 2D canvas API the field needs:
//! clear, one shared fill color, a global alpha, and filled discs.
//! [`PixelSurface`] implements it in software on an [`RgbaImage`].

use glam::{UVec2, Vec2};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// A 2D drawing target.
pub trait DrawContext {
    /// Current backing size in pixels.
    fn size(&self) -> UVec2;

    /// Reallocate the backing store. Implementations should skip the
    /// reallocation when the size is unchanged.
    fn set_size(&mut self, width: u32, height: u32);

    /// Clear every pixel to transparent.
    fn clear(&mut self);

    fn set_fill_color(&mut self, color: [u8; 3]);

    /// Opacity multiplier applied to subsequent fills.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill a disc centered at `center`.
    fn fill_circle(&mut self, center: Vec2, radius: f32);
}

/// Software RGBA surface with anti-aliased disc rasterization.
///
/// Pixels hold straight (non-premultiplied) alpha and blend source-over.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    fill: [u8; 3],
    global_alpha: f32,
    reallocations: u64,
    frames: u64,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            fill: [0, 0, 0],
            global_alpha: 1.0,
            reallocations: 0,
            frames: 0,
        }
    }

    /// Number of times the backing store was reallocated by [`DrawContext::set_size`].
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }

    /// Number of frames begun, counted by [`DrawContext::clear`].
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Write the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }

    fn blend(&mut self, x: u32, y: u32, coverage: f32) {
        let src_a = (coverage * self.global_alpha).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        *dst = alpha_blend(self.fill, src_a, *dst);
    }
}

impl DrawContext for PixelSurface {
    fn size(&self) -> UVec2 {
        UVec2::new(self.image.width(), self.image.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if self.image.width() == width && self.image.height() == height {
            return;
        }
        self.image = RgbaImage::new(width, height);
        self.reallocations += 1;
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.frames += 1;
    }

    fn set_fill_color(&mut self, color: [u8; 3]) {
        self.fill = color;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || radius <= 0.0 {
            return;
        }

        // Half-pixel feather on the edge.
        let reach = radius + 0.5;
        let min_x = (center.x - reach).floor().max(0.0);
        let min_y = (center.y - reach).floor().max(0.0);
        let max_x = (center.x + reach).ceil().min(width as f32 - 1.0);
        let max_y = (center.y + reach).ceil().min(height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y as u32..=max_y as u32 {
            for x in min_x as u32..=max_x as u32 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - pixel_center.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, coverage);
                }
            }
        }
    }
}

/// Source-over blend of a solid color with opacity `src_a` onto `dst`.
fn alpha_blend(src: [u8; 3], src_a: f32, dst: Rgba<u8>) -> Rgba<u8> {
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let s_f = s as f32 / 255.0;
        let d_f = d as f32 / 255.0;
        let out = (s_f * src_a + d_f * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
