//! Axis-aligned bounds for primitives.
//!
//! Bounds are cached on each primitive and recomputed lazily after an edit
//! flags them stale.

use cgmath::{Vector3, Zero};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Create bounds enclosing a set of vertices
    ///
    /// An empty set yields a zero-sized box at the origin.
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        let mut vertices = vertices.into_iter();
        let Some(first) = vertices.next() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = first;
        let mut max = first;
        for v in vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        Self::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-1.0, -1.0, -1.0),
        ];
        let aabb = Aabb::from_vertices(vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_aabb() {
        let aabb = Aabb::from_vertices(Vec::new());
        assert_eq!(aabb.min, Vector3::zero());
        assert_eq!(aabb.max, Vector3::zero());
    }
}
