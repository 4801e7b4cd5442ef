//! Error types for identity resolution, geometry editing and the annotation
//! service boundary.
//!
//! Lookup misses in the index are not errors: they surface as `None` or as a
//! skipped entry. Editing preconditions (read-only primitive, zero delta, index
//! out of range) surface as a `false` return. Only the cases below are errors.

use thiserror::Error;

/// Failures while resolving annotation records against a loaded scene
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An annotation names a region path that is not in the current scene
    #[error("region not found: {0:?}")]
    RegionNotFound(String),
}

/// Failures raised by geometry edits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The segment has zero length so it has no direction
    #[error("segment {face_index} has zero length")]
    DegenerateSegment { face_index: usize },
}

/// Failures reported by the external annotation service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request failed before the service produced an answer
    #[error("annotation service request failed: {0}")]
    Request(String),
    /// The service answered but did not accept the annotation
    #[error("annotation service rejected the submission")]
    Rejected,
}

/// Failures loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid annotation config: {0}")]
    Parse(#[from] serde_json::Error),
}
