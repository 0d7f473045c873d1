//! Software canvas: an RGBA8 framebuffer with the fill primitives the
//! renderer needs.

use crate::color::Color;

/// A 2D drawing surface with immediate-mode fill primitives.
///
/// The simulation paints through this trait. [`Canvas`] is the shipped
/// software implementation; tests substitute recording mocks to observe
/// draw calls.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;
    /// Surface height in pixels.
    fn height(&self) -> u32;
    /// Fill the entire surface with one color.
    fn clear(&mut self, color: Color);
    /// Fill an axis-aligned rectangle with top-left corner at `x`, `y`.
    /// Regions outside the surface are clipped.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Fill a disc centered at `cx`, `cy`, clipped like `fill_rect`.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
}

/// CPU framebuffer: one [`Color`] per pixel, row-major, top row first.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Resize the framebuffer, discarding the previous contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, Color::BLACK);
    }

    /// Read one pixel. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width && y < self.height);
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Raw framebuffer bytes in RGBA order, ready for texture upload.
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill the pixels `[x0, x1)` of row `y`, clipped to the surface.
    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0) as usize;
        let x1 = x1.min(self.width as i32).max(0) as usize;
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x0..row + x1].fill(color);
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        // floor/ceil so even sub-pixel rectangles light at least one pixel.
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let x1 = (x + w).ceil() as i32;
        let y1 = (y + h).ceil() as i32;
        for row in y0..y1 {
            self.fill_span(row, x0, x1, color);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for row in y0..=y1 {
            // Sample the scanline at the pixel row center.
            let dy = row as f32 + 0.5 - cy;
            let half_sq = radius * radius - dy * dy;
            if half_sq <= 0.0 {
                continue;
            }
            let half = half_sq.sqrt();
            let x0 = (cx - half).round() as i32;
            let x1 = (cx + half).round() as i32;
            self.fill_span(row, x0, x1, color);
        }
    }
}
