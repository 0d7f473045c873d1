//! Effect configuration with defaults applied once at construction.

use std::time::Duration;

use crate::color::{self, Color};
use crate::error::ConfigError;

/// Resolved configuration for one effect instance.
///
/// Every field has a default matching the classic effect; the
/// [`Starfield`](crate::Starfield) builder overrides fields individually.
/// Immutable for the lifetime of the effect.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base point size in pixels, before projection.
    pub point_size: f32,
    /// Number of simulated particles.
    pub num_points: usize,
    /// Focal length of the pinhole camera.
    pub focal_length: f32,
    /// Depth assigned to every freshly spawned particle.
    pub start_distance: f32,
    /// Full width of the lateral spawn window, per axis.
    pub start_spread: f32,
    /// Depth units travelled per unit of simulated time.
    pub velocity: f32,
    /// Simulated time increment per tick. A constant, not a measured
    /// delta; visual speed is `velocity * time_step / step_interval`.
    pub time_step: f32,
    /// Wall-clock interval between ticks.
    pub step_interval: Duration,
    /// Background fill color.
    pub bg_color: Color,
    /// Non-empty palette sampled uniformly at spawn time.
    pub point_colors: Vec<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            point_size: 20.0,
            num_points: 2000,
            focal_length: 0.01,
            start_distance: 1.0,
            start_spread: 60.0,
            velocity: 0.1,
            time_step: 0.1,
            step_interval: Duration::from_millis(40),
            bg_color: Color::BLACK,
            point_colors: color::default_palette(),
        }
    }
}

impl Config {
    /// Reject degenerate configurations instead of coercing them.
    ///
    /// This is the documented policy: an empty palette, a non-positive
    /// spawn distance, or a zero point count is an error at build time
    /// and never reaches the tick loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.point_colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        // Negated comparison so NaN is rejected too.
        if !(self.start_distance > 0.0) {
            return Err(ConfigError::StartDistance(self.start_distance));
        }
        if self.num_points == 0 {
            return Err(ConfigError::NoPoints);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.point_size, 20.0);
        assert_eq!(config.num_points, 2000);
        assert_eq!(config.focal_length, 0.01);
        assert_eq!(config.start_distance, 1.0);
        assert_eq!(config.start_spread, 60.0);
        assert_eq!(config.velocity, 0.1);
        assert_eq!(config.time_step, 0.1);
        assert_eq!(config.step_interval, Duration::from_millis(40));
        assert_eq!(config.bg_color, Color::BLACK);
        assert_eq!(config.point_colors.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_palette() {
        let config = Config {
            point_colors: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_rejects_non_positive_start_distance() {
        for d in [0.0, -1.0, f32::NAN] {
            let config = Config {
                start_distance: d,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::StartDistance(_))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_points() {
        let config = Config {
            num_points: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoPoints));
    }
}
