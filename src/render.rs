//! Size-based level-of-detail rendering of projected particles.

use crate::canvas::Surface;
use crate::color::Color;
use crate::project::Projection;

/// Below this projected size (in pixels) a particle is not drawn at all.
///
/// The comparison is strict: a particle at exactly 0.2 is drawn.
pub const MIN_VISIBLE_SIZE: f32 = 0.2;

/// Below one pixel, particles are drawn as squares instead of discs;
/// cheaper to rasterize and indistinguishable at that scale.
pub const DISC_THRESHOLD: f32 = 1.0;

/// Map a normalized viewport coordinate to pixel space.
///
/// Normalized `0.0` is the surface center; the unit square
/// `[-0.5, 0.5]^2` exactly covers the surface.
#[inline]
pub fn to_pixels(normalized: f32, surface_dim: u32) -> f32 {
    let dim = surface_dim as f32;
    dim * normalized + 0.5 * dim
}

/// Draw one projected particle onto the surface.
///
/// Level of detail by projected size:
/// - below [`MIN_VISIBLE_SIZE`]: nothing;
/// - below [`DISC_THRESHOLD`]: a filled square of side `2 * size`;
/// - otherwise: a filled disc of radius `size`.
pub fn draw_point<S: Surface + ?Sized>(surface: &mut S, projection: &Projection, color: Color) {
    let size = projection.size;
    if size < MIN_VISIBLE_SIZE {
        return;
    }

    let px = to_pixels(projection.pos.x, surface.width());
    let py = to_pixels(projection.pos.y, surface.height());

    if size < DISC_THRESHOLD {
        surface.fill_rect(px - size, py - size, 2.0 * size, 2.0 * size, color);
    } else {
        surface.fill_circle(px, py, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Records draw calls without rasterizing anything.
    struct Recorder {
        rects: Vec<(f32, f32, f32, f32)>,
        circles: Vec<(f32, f32, f32)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                rects: Vec::new(),
                circles: Vec::new(),
            }
        }
    }

    impl Surface for Recorder {
        fn width(&self) -> u32 {
            200
        }
        fn height(&self) -> u32 {
            100
        }
        fn clear(&mut self, _color: Color) {}
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: Color) {
            self.rects.push((x, y, w, h));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, _color: Color) {
            self.circles.push((cx, cy, radius));
        }
    }

    fn projection(x: f32, y: f32, size: f32) -> Projection {
        Projection {
            pos: Vec2::new(x, y),
            size,
        }
    }

    #[test]
    fn test_to_pixels_maps_viewport_to_surface() {
        assert_eq!(to_pixels(0.0, 200), 100.0);
        assert_eq!(to_pixels(-0.5, 200), 0.0);
        assert_eq!(to_pixels(0.5, 200), 200.0);
    }

    #[test]
    fn test_below_threshold_draws_nothing() {
        let mut surface = Recorder::new();
        draw_point(&mut surface, &projection(0.0, 0.0, 0.19), Color::WHITE);
        assert!(surface.rects.is_empty());
        assert!(surface.circles.is_empty());
    }

    #[test]
    fn test_exactly_at_threshold_is_drawn() {
        let mut surface = Recorder::new();
        draw_point(&mut surface, &projection(0.0, 0.0, 0.2), Color::WHITE);
        assert_eq!(surface.rects.len(), 1);
        let (x, y, w, h) = surface.rects[0];
        assert_eq!((w, h), (0.4, 0.4));
        assert_eq!((x, y), (100.0 - 0.2, 50.0 - 0.2));
    }

    #[test]
    fn test_subpixel_sizes_draw_squares() {
        let mut surface = Recorder::new();
        draw_point(&mut surface, &projection(0.25, -0.25, 0.5), Color::WHITE);
        assert_eq!(surface.rects.len(), 1);
        assert!(surface.circles.is_empty());
        let (x, y, w, h) = surface.rects[0];
        // Centered on the projected point: 0.25 -> 150px, -0.25 -> 25px.
        assert_eq!((x + w / 2.0, y + h / 2.0), (150.0, 25.0));
    }

    #[test]
    fn test_pixel_and_larger_sizes_draw_discs() {
        let mut surface = Recorder::new();
        draw_point(&mut surface, &projection(0.0, 0.0, 1.0), Color::WHITE);
        draw_point(&mut surface, &projection(0.0, 0.0, 4.5), Color::WHITE);
        assert!(surface.rects.is_empty());
        assert_eq!(surface.circles.len(), 2);
        assert_eq!(surface.circles[0], (100.0, 50.0, 1.0));
        assert_eq!(surface.circles[1], (100.0, 50.0, 4.5));
    }
}
