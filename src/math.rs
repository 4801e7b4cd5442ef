//! # Vector Math
//!
//! Small 3D vector helpers used by the editor and the feature converter.
//! Everything works on `cgmath::Vector3<f32>`, the same vector type the rest of
//! the scene model stores vertices in.

use cgmath::{Vector3, Zero};

use crate::error::GeometryError;

/// Euclidean distance between two points
///
/// Accumulated in `f64`, so very long segments do not overflow to infinity.
pub fn distance(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    length(difference(a, b)) as f32
}

fn length(v: Vector3<f32>) -> f64 {
    let (x, y, z) = (f64::from(v.x), f64::from(v.y), f64::from(v.z));
    (x * x + y * y + z * z).sqrt()
}

/// Vector pointing from `a` to `b`
pub fn difference(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    b - a
}

pub fn scale(v: Vector3<f32>, k: f32) -> Vector3<f32> {
    v * k
}

pub fn add(a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    a + b
}

/// Exact zero test, no tolerance applied
pub fn is_zero(v: Vector3<f32>) -> bool {
    v.is_zero()
}

/// True when no component is NaN or infinite
pub fn is_finite(v: Vector3<f32>) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Unit vector from `a` to `b`
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateSegment`] when both points coincide,
/// since the direction is undefined. `face_index` is carried into the error
/// so callers can report which segment was rejected.
pub fn normalize_direction(
    a: Vector3<f32>,
    b: Vector3<f32>,
    face_index: usize,
) -> Result<Vector3<f32>, GeometryError> {
    let d = difference(a, b);
    let magnitude = length(d);
    if magnitude == 0.0 || !magnitude.is_finite() {
        return Err(GeometryError::DegenerateSegment { face_index });
    }
    Ok(Vector3::new(
        (f64::from(d.x) / magnitude) as f32,
        (f64::from(d.y) / magnitude) as f32,
        (f64::from(d.z) / magnitude) as f32,
    ))
}
