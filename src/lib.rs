// src/lib.rs
//! Organ Scene
//!
//! Identity, annotation resolution and constrained editing for the objects of
//! an anatomical organ scene.
//!
//! A scene is a tree of regions owning primitives. This crate names those
//! objects with compact or path identities, binds stored annotation records
//! back to them after a reload, converts them to and from the annotation
//! service's feature payloads, and edits point-sets and line-sets in place.

pub mod annotation;
pub mod config;
pub mod editor;
pub mod error;
pub mod identity;
pub mod index;
pub mod math;
pub mod prelude;
pub mod scene;

// Re-export main types for convenience
pub use config::AnnotationConfig;
pub use error::{ConfigError, GeometryError, ResolveError, ServiceError};
pub use scene::{Primitive, Region, Scene};
