//! # Organ Scene Prelude
//!
//! Commonly used types and functions in one import.
//!
//! ```rust
//! use organ_scene::prelude::*;
//!
//! let mut scene = Scene::new();
//! let line = scene.create_lines("heart", "vessel", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 0x00ee22);
//! line.set_editable(true);
//! assert!(move_or_extend_line(line, 0, 0.5, false).unwrap());
//! ```

// Re-export scene model
pub use crate::scene::{
    Aabb, Coordinate, Primitive, PrimitiveFactory, PrimitiveKind, Region, Scene, SceneStatistics,
};

// Re-export identities and lookups
pub use crate::identity::{
    decode_compact, decode_path, encode_compact, encode_path, CompactIdentity, PathIdentity,
};
pub use crate::index::{
    collect_all_objects, compact_to_path_identities, deduplicate, find_by_group_name,
    resolve_compact_slots, resolve_region, try_find_region, SceneItem,
};

// Re-export annotation workflow
pub use crate::annotation::{
    features_to_primitives, primitive_to_feature, resolve_annotations, AnnotationRecord,
    AnnotationService, AnnotationStore, FeaturePayload, OrganContext,
};

// Re-export editing
pub use crate::editor::{line_segment_length, move_or_extend_line, move_point};

pub use crate::config::AnnotationConfig;
pub use crate::error::{GeometryError, ResolveError, ServiceError};

// Re-export common external dependencies
pub use cgmath::Vector3;
