//! Particle spawning and the out-of-view recycling policy.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::Color;
use crate::project::Projection;
use crate::store::Particle;

/// Upper bound on respawn attempts for one particle in one tick.
///
/// Spawning at the start distance lands in view with high probability for
/// sane configurations, so the rejection loop almost always exits on the
/// first attempt. The bound only matters for pathological setups where no
/// spawn point projects inside the viewport.
pub(crate) const MAX_RESPAWN_ATTEMPTS: u32 = 16;

/// Generates fresh particles at the spawn distance.
pub struct Spawner {
    start_distance: f32,
    start_spread: f32,
    palette: Vec<Color>,
    rng: SmallRng,
}

impl Spawner {
    /// Create a spawner seeded from the wall clock.
    ///
    /// `palette` must be non-empty; `Config::validate` guarantees this
    /// before a spawner is ever constructed.
    pub fn new(start_distance: f32, start_spread: f32, palette: Vec<Color>) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::with_seed(start_distance, start_spread, palette, seed)
    }

    /// Create a spawner with a fixed seed, for reproducible runs and tests.
    pub fn with_seed(start_distance: f32, start_spread: f32, palette: Vec<Color>, seed: u64) -> Self {
        Self {
            start_distance,
            start_spread,
            palette,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// A fresh particle: lateral coordinates uniform in
    /// `[-spread/2, +spread/2]` per axis, depth exactly the start
    /// distance, color uniform over the palette.
    pub fn spawn(&mut self) -> Particle {
        let half = self.start_spread * 0.5;
        let lateral = if half > 0.0 {
            Vec2::new(
                self.rng.gen_range(-half..half),
                self.rng.gen_range(-half..half),
            )
        } else {
            Vec2::ZERO
        };

        Particle {
            lateral,
            depth: self.start_distance,
            color: self.pick_color(),
        }
    }

    /// The deterministic fallback when the rejection loop gives up: a
    /// particle on the view axis, which always projects to the viewport
    /// center.
    pub fn fallback(&mut self) -> Particle {
        Particle {
            lateral: Vec2::ZERO,
            depth: self.start_distance,
            color: self.pick_color(),
        }
    }

    /// Uniform depth in (0, 1), used once at startup to desynchronize the
    /// initial field.
    pub fn initial_depth(&mut self) -> f32 {
        self.rng.gen_range(f32::MIN_POSITIVE..1.0)
    }

    fn pick_color(&mut self) -> Color {
        self.palette[self.rng.gen_range(0..self.palette.len())]
    }
}

/// Whether a projected particle must be discarded and respawned.
///
/// A particle is recycled as soon as it leaves the viewport on either
/// axis or its projected size goes negative. NaN and infinite
/// projections (zero depth) also qualify.
#[inline]
pub fn needs_recycle(projection: &Projection) -> bool {
    !projection.in_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::default_palette;

    fn spawner(spread: f32) -> Spawner {
        Spawner::with_seed(1.0, spread, default_palette(), 7)
    }

    #[test]
    fn test_spawn_within_spread() {
        let mut s = spawner(60.0);
        for _ in 0..1000 {
            let p = s.spawn();
            assert!(p.lateral.x >= -30.0 && p.lateral.x <= 30.0);
            assert!(p.lateral.y >= -30.0 && p.lateral.y <= 30.0);
        }
    }

    #[test]
    fn test_spawn_depth_is_exactly_start_distance() {
        let mut s = Spawner::with_seed(2.5, 60.0, default_palette(), 7);
        for _ in 0..100 {
            assert_eq!(s.spawn().depth, 2.5);
        }
    }

    #[test]
    fn test_spawn_color_from_palette() {
        let palette = default_palette();
        let mut s = spawner(60.0);
        for _ in 0..100 {
            assert!(palette.contains(&s.spawn().color));
        }
    }

    #[test]
    fn test_single_color_palette() {
        let mut s = Spawner::with_seed(1.0, 60.0, vec![Color::WHITE], 7);
        for _ in 0..100 {
            assert_eq!(s.spawn().color, Color::WHITE);
        }
    }

    #[test]
    fn test_zero_spread_spawns_on_axis() {
        let mut s = spawner(0.0);
        assert_eq!(s.spawn().lateral, Vec2::ZERO);
    }

    #[test]
    fn test_initial_depth_in_open_unit_interval() {
        let mut s = spawner(60.0);
        for _ in 0..1000 {
            let d = s.initial_depth();
            assert!(d > 0.0 && d < 1.0);
        }
    }

    #[test]
    fn test_fallback_projects_to_center() {
        let mut s = spawner(60.0);
        let p = s.fallback();
        let projection = Projection::of(&p, 0.01, 20.0);
        assert_eq!(projection.pos, Vec2::ZERO);
        assert!(projection.in_view());
    }

    #[test]
    fn test_needs_recycle_or_policy() {
        // In view on both axes, non-negative size: keep.
        assert!(!needs_recycle(&Projection {
            pos: Vec2::new(0.3, -0.5),
            size: 0.0,
        }));
        // One axis out is enough to recycle.
        assert!(needs_recycle(&Projection {
            pos: Vec2::new(0.51, 0.0),
            size: 1.0,
        }));
        assert!(needs_recycle(&Projection {
            pos: Vec2::new(0.0, -0.51),
            size: 1.0,
        }));
        // Negative projected size always recycles.
        assert!(needs_recycle(&Projection {
            pos: Vec2::ZERO,
            size: -0.001,
        }));
        // Degenerate projections from zero depth.
        assert!(needs_recycle(&Projection {
            pos: Vec2::new(f32::INFINITY, 0.0),
            size: 1.0,
        }));
        assert!(needs_recycle(&Projection {
            pos: Vec2::new(f32::NAN, f32::NAN),
            size: f32::NAN,
        }));
    }
}
