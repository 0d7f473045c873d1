//! Flat, index-addressed storage for the particle field.

use glam::Vec2;

use crate::color::Color;

/// One simulated point.
///
/// Lateral offset and color are fixed at spawn time; only the depth
/// changes between respawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Lateral offset from the view axis, in world units.
    pub lateral: Vec2,
    /// Distance from the observer along the view axis.
    pub depth: f32,
    /// Palette color chosen at spawn time.
    pub color: Color,
}

/// Fixed-capacity particle storage with O(1) indexed access.
///
/// Capacity is established at construction and never changes. An
/// out-of-range index is a programming error and panics like slice
/// indexing; the tick loop never produces one by construction.
#[derive(Debug)]
pub struct PointStore {
    points: Vec<Particle>,
}

impl PointStore {
    /// Wrap an initial field of particles.
    pub fn new(points: Vec<Particle>) -> Self {
        Self { points }
    }

    /// Number of particles in the store.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read the particle at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Particle {
        self.points[index]
    }

    /// Replace the particle at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, particle: Particle) {
        self.points[index] = particle;
    }

    /// Iterate over the current field, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(depth: f32) -> Particle {
        Particle {
            lateral: Vec2::new(1.0, -2.0),
            depth,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut store = PointStore::new(vec![particle(0.5), particle(0.7)]);
        assert_eq!(store.len(), 2);

        let mut p = store.get(1);
        p.depth = 0.25;
        store.set(1, p);

        assert_eq!(store.get(1).depth, 0.25);
        assert_eq!(store.get(0).depth, 0.5);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_panics() {
        let store = PointStore::new(vec![particle(0.5)]);
        store.get(1);
    }
}
