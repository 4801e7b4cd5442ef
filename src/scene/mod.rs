//! # Scene Model
//!
//! The in-memory scene graph the rest of the crate works on: a tree of
//! [`Region`]s, each owning child regions and [`Primitive`]s.
//!
//! ## Key Components
//!
//! - [`Scene`] - Owns the root region and creates primitives on demand
//! - [`Region`] - Tree node with a UUID and a slash-separated full path
//! - [`Primitive`] - Point-set, line-set or other geometry with a vertex buffer
//! - [`Aabb`] - Cached bounds, refreshed after edits
//!
//! ## Usage
//!
//! ```rust
//! use organ_scene::scene::{PrimitiveFactory, Scene};
//!
//! let mut scene = Scene::new();
//! scene.create_lines("body/heart", "vessel", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 0x00ee22);
//!
//! let heart = scene.root_region().find_child_from_path("body/heart").unwrap();
//! assert_eq!(heart.full_path(), "body/heart");
//! ```
//!
//! Regions and primitives are created by a loader and dropped on
//! [`Scene::clear`]. Nothing else in the crate restructures the tree;
//! editors only rewrite vertex data in place.

pub mod bounds;
pub mod primitive;
pub mod region;
#[allow(clippy::module_inception)]
pub mod scene;

// Re-export main types
pub use bounds::Aabb;
pub use primitive::{Coordinate, Primitive, PrimitiveKind, VertexAttribute, VertexBuffer};
pub use region::Region;
pub use scene::{PrimitiveFactory, Scene, SceneStatistics};
