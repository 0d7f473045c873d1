//! Pinhole-camera projection from world space to normalized viewport
//! coordinates.

use glam::Vec2;

use crate::store::Particle;

/// Project one world-space value onto the viewport.
///
/// Pure function, no clamping: a zero or near-zero `depth` produces an
/// infinite or NaN result, which the viewport test downstream treats as
/// out of view. Hiding that here would mask recycle conditions.
#[inline]
pub fn project(focal_length: f32, value: f32, depth: f32) -> f32 {
    value * focal_length / depth
}

/// A particle's projected state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Position in normalized viewport coordinates; within `[-0.5, 0.5]`
    /// on both axes when the particle is in view.
    pub pos: Vec2,
    /// Projected point size in pixels.
    pub size: f32,
}

impl Projection {
    /// Project a particle with the given focal length and base point size.
    ///
    /// Lateral x, lateral y, and the point size are each divided by the
    /// particle's own depth.
    pub fn of(particle: &Particle, focal_length: f32, point_size: f32) -> Self {
        Self {
            pos: Vec2::new(
                project(focal_length, particle.lateral.x, particle.depth),
                project(focal_length, particle.lateral.y, particle.depth),
            ),
            size: project(focal_length, point_size, particle.depth),
        }
    }

    /// Whether this projection lands inside the unit viewport with a
    /// non-negative size.
    ///
    /// Written as a conjunction of `<=`/`>=` comparisons so NaN and
    /// infinite projections fail the test and count as out of view.
    #[inline]
    pub fn in_view(&self) -> bool {
        self.pos.x.abs() <= 0.5 && self.pos.y.abs() <= 0.5 && self.size >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn particle(x: f32, y: f32, depth: f32) -> Particle {
        Particle {
            lateral: Vec2::new(x, y),
            depth,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_project_is_pure() {
        let a = project(0.01, 5.0, 0.5);
        let b = project(0.01, 5.0, 0.5);
        assert_eq!(a, b);
        assert!((a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_projected_size_at_unit_depth() {
        // focal_length 0.01, point_size 20, depth 1 -> exactly 0.2
        let p = Projection::of(&particle(0.0, 0.0, 1.0), 0.01, 20.0);
        assert_eq!(p.size, 0.2);
        assert!(p.in_view());
    }

    #[test]
    fn test_zero_depth_is_out_of_view() {
        let p = Projection::of(&particle(3.0, 0.0, 0.0), 0.01, 20.0);
        assert!(p.pos.x.is_infinite() || p.pos.x.is_nan());
        assert!(!p.in_view());
    }

    #[test]
    fn test_negative_depth_is_out_of_view() {
        // Negative depth flips the projected size negative.
        let p = Projection::of(&particle(0.0, 0.0, -0.5), 0.01, 20.0);
        assert!(p.size < 0.0);
        assert!(!p.in_view());
    }

    #[test]
    fn test_out_of_view_on_single_axis() {
        // Leaving the viewport on one axis is enough.
        let p = Projection::of(&particle(60.0, 0.0, 1.0), 0.01, 20.0);
        assert!(p.pos.x.abs() > 0.5);
        assert!(p.pos.y.abs() <= 0.5);
        assert!(!p.in_view());
    }

    #[test]
    fn test_nan_projection_is_out_of_view() {
        let p = Projection {
            pos: Vec2::new(f32::NAN, 0.0),
            size: 1.0,
        };
        assert!(!p.in_view());
    }
}
