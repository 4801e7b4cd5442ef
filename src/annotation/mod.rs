//! # Annotations
//!
//! Everything between live primitives and the external annotation service:
//!
//! - [`record`] - Per-primitive annotation records and their store
//! - [`resolver`] - Binding stored records back to loaded primitives
//! - [`feature`] - Primitive to feature payload conversion and back
//! - [`service`] - The asynchronous service boundary
//!
//! ## Usage
//!
//! ```rust
//! use organ_scene::annotation::{primitive_to_feature, TOMBSTONE_COMMENT};
//! use organ_scene::scene::Primitive;
//!
//! let marker = Primitive::point_set("marker", &[[1.0, 2.0, 3.0]]);
//! let payload = primitive_to_feature(&marker, "heart", "marker", "scaffold.json", TOMBSTONE_COMMENT);
//! assert!(payload.feature.is_none());
//! ```

pub mod feature;
pub mod record;
pub mod resolver;
pub mod service;

pub use feature::{
    features_to_primitives, primitive_to_feature, Creator, Feature, FeaturePayload, GeometryType,
    TOMBSTONE_COMMENT,
};
pub use record::{AnnotationRecord, AnnotationStore, OrganContext};
pub use resolver::{resolve_annotations, AnnotationSelection, MULTIPLE_SELECTIONS};
pub use service::{
    fetch_drawn_features, submit_feature_annotation, AddResponse, AnnotationService,
    MemoryAnnotationService, Submission,
};
