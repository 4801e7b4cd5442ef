//! # Geometry Editor
//!
//! Bounded in-place edits on editable primitives: moving a single point of a
//! point-set, and moving or extending one segment of a line-set.
//!
//! Edits that cannot apply (read-only primitive, wrong kind, zero or
//! non-finite offset, index out of range) are ordinary no-ops and return
//! `false`. No edit ever writes NaN or infinity into a vertex buffer. The only error
//! is a zero-length segment, which has no direction to move along.
//!
//! ```rust
//! use organ_scene::editor::{line_segment_length, move_or_extend_line};
//! use organ_scene::scene::Primitive;
//!
//! let mut line = Primitive::line_set("nerve", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]])
//!     .with_editable(true);
//! assert!(move_or_extend_line(&mut line, 0, 2.0, true).unwrap());
//! assert_eq!(line_segment_length(&line, 0), 2.0);
//! ```

use cgmath::Vector3;
use log::debug;

use crate::{
    error::GeometryError,
    math,
    scene::{Primitive, PrimitiveKind},
};

/// An endpoint of a line segment picked for dragging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGrab {
    pub face_index: usize,
    /// Vertex index of the endpoint nearer the pick
    pub vertex_index: usize,
    /// The opposite endpoint, which stays fixed while dragging
    pub anchor: Vector3<f32>,
}

fn editable_kind(primitive: &Primitive, kind: PrimitiveKind) -> bool {
    primitive.kind() == kind && primitive.is_editable()
}

/// Translate the vertex at `index` by `delta`
///
/// Only editable point-sets are touched. A zero or non-finite `delta`, a move
/// that would overflow, or an index outside the draw range returns `false` and
/// leaves the vertices unchanged.
pub fn move_point(primitive: &mut Primitive, index: usize, delta: Vector3<f32>) -> bool {
    if !editable_kind(primitive, PrimitiveKind::PointSet)
        || math::is_zero(delta)
        || !math::is_finite(delta)
    {
        return false;
    }
    let Some(v) = primitive.vertex(index) else {
        debug!("point {index} out of range for {}", primitive.uuid());
        return false;
    };
    let moved = math::add(v, delta);
    if !math::is_finite(moved) {
        debug!("point {index} of {} would leave the finite range", primitive.uuid());
        return false;
    }
    if !primitive.edit_vertices(&[moved], index) {
        return false;
    }
    primitive.request_bounding_box_update();
    true
}

/// Move segment `face_index` along its own axis, or extend it
///
/// The offset is the segment's unit direction times `unit`. With
/// `extend_only` endpoint 0 stays put and endpoint 1 is placed at
/// `endpoint0 + offset`, so the segment length becomes `|unit|`. Otherwise
/// both endpoints shift by the offset and the length is unchanged.
///
/// Returns `Ok(false)` for a read-only or non line-set primitive, a zero or
/// non-finite `unit`, a face index outside the draw range, or a move that
/// would overflow a coordinate.
///
/// # Errors
///
/// [`GeometryError::DegenerateSegment`] when the segment has zero length. The
/// vertices are left untouched.
pub fn move_or_extend_line(
    primitive: &mut Primitive,
    face_index: usize,
    unit: f32,
    extend_only: bool,
) -> Result<bool, GeometryError> {
    if unit == 0.0 || !unit.is_finite() || !editable_kind(primitive, PrimitiveKind::LineSet) {
        return Ok(false);
    }
    let Some([start, end]) = primitive.segment(face_index) else {
        debug!("segment {face_index} out of range for {}", primitive.uuid());
        return Ok(false);
    };

    let offset = math::scale(math::normalize_direction(start, end, face_index)?, unit);
    let moved = if extend_only {
        [start, math::add(start, offset)]
    } else {
        [math::add(start, offset), math::add(end, offset)]
    };
    if !moved.iter().all(|v| math::is_finite(*v)) {
        debug!("segment {face_index} of {} would leave the finite range", primitive.uuid());
        return Ok(false);
    }
    if !primitive.edit_vertices(&moved, face_index * 2) {
        return Ok(false);
    }
    primitive.request_bounding_box_update();
    Ok(true)
}

/// Length of segment `face_index`, 0 when it cannot be resolved
pub fn line_segment_length(primitive: &Primitive, face_index: usize) -> f32 {
    if !editable_kind(primitive, PrimitiveKind::LineSet) {
        return 0.0;
    }
    primitive
        .segment(face_index)
        .map_or(0.0, |[start, end]| math::distance(start, end))
}

/// Pick the endpoint of segment `face_index` nearest to `point_on_line`
///
/// Ties go to endpoint 0. Only editable line-sets can be grabbed.
pub fn grab_line_endpoint(
    primitive: &Primitive,
    face_index: usize,
    point_on_line: Vector3<f32>,
) -> Option<LineGrab> {
    if !editable_kind(primitive, PrimitiveKind::LineSet) {
        return None;
    }
    let [start, end] = primitive.segment(face_index)?;
    let grab = if math::distance(start, point_on_line) > math::distance(end, point_on_line) {
        LineGrab {
            face_index,
            vertex_index: face_index * 2 + 1,
            anchor: start,
        }
    } else {
        LineGrab {
            face_index,
            vertex_index: face_index * 2,
            anchor: end,
        }
    };
    Some(grab)
}

/// The first picked object, if it may be deleted
pub fn deletable_target<'a>(picked: &[&'a Primitive]) -> Option<&'a Primitive> {
    picked.first().copied().filter(|p| p.is_editable())
}
