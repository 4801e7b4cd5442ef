//! # Scene Graph Index
//!
//! Read-only lookups over a region tree: identities to live objects, live
//! objects to identities, and group-name searches.
//!
//! Two lookup policies exist side by side and are kept as separate functions:
//!
//! - best effort: a miss is `None` or a skipped entry ([`try_find_region`],
//!   [`resolve_compact_slots`], [`find_by_group_name`])
//! - strict: a miss is an error ([`resolve_region`])

pub mod consume;

use std::collections::HashMap;

use log::debug;

pub use consume::ConsumeOnce;

use crate::{
    error::ResolveError,
    identity::{decode_compact, encode_compact, encode_path},
    scene::{Primitive, Region, Scene},
};

/// A primitive numbered for display
///
/// Tags start at 1 and are assigned in traversal order on every call, so they
/// are not stable between calls and are never persisted.
#[derive(Debug, Clone, Copy)]
pub struct TaggedPrimitive<'a> {
    pub tag: usize,
    pub primitive: &'a Primitive,
}

/// Either kind of scene object, as handed over by a selection
#[derive(Debug, Clone, Copy)]
pub enum SceneItem<'a> {
    Region(&'a Region),
    Primitive(&'a Primitive),
}

/// Find a region by path relative to `root`, `None` if absent
pub fn try_find_region<'a>(root: &'a Region, path: &str) -> Option<&'a Region> {
    root.find_child_from_path(path)
}

/// Find a region by path relative to `root`
///
/// # Errors
///
/// [`ResolveError::RegionNotFound`] when no region has that path.
pub fn resolve_region<'a>(root: &'a Region, path: &str) -> Result<&'a Region, ResolveError> {
    try_find_region(root, path).ok_or_else(|| ResolveError::RegionNotFound(path.to_string()))
}

/// Convert compact identities to path identities, one slot per input id
///
/// Regions are searched among `root` and all its descendants. A primitive
/// UUID is matched consume-once within its region, so the same primitive
/// resolves only the first time it appears in `ids`. Region-only ids resolve
/// to `__r/<regionPath>`. Ids that do not resolve leave their slot `None`.
pub fn resolve_compact_slots<S: AsRef<str>>(root: &Region, ids: &[S]) -> Vec<Option<String>> {
    let mut working = ConsumeOnce::new();
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            let compact = decode_compact(id);
            let Some(region) = root.find_region_by_uuid(&compact.region_uuid) else {
                debug!("no region for identity {id}");
                return None;
            };
            match &compact.primitive_uuid {
                Some(primitive_uuid) => {
                    let resolved = working
                        .take(region, primitive_uuid)
                        .map(|p| encode_path(region.full_path(), Some(p.group_name())));
                    if resolved.is_none() {
                        debug!("no unmatched primitive for identity {id}");
                    }
                    resolved
                }
                None => Some(format!("__r/{}", region.full_path())),
            }
        })
        .collect()
}

/// Convert compact identities to path identities, dropping unresolved ids
pub fn compact_to_path_identities<S: AsRef<str>>(root: &Region, ids: &[S]) -> Vec<String> {
    resolve_compact_slots(root, ids).into_iter().flatten().collect()
}

/// Every primitive in the scene, tagged 1, 2, 3... in traversal order
pub fn collect_all_objects(scene: &Scene) -> Vec<TaggedPrimitive<'_>> {
    scene
        .root_region()
        .all_objects(true)
        .into_iter()
        .enumerate()
        .map(|(i, primitive)| TaggedPrimitive {
            tag: i + 1,
            primitive,
        })
        .collect()
}

/// Primitives with any of the given group names
///
/// The search starts at `region_path` (or at `root` when `None`) and includes
/// descendants when `recursive` is set. An unknown path gives an empty result.
pub fn find_by_group_name<'a, I, S>(
    root: &'a Region,
    region_path: Option<&str>,
    names: I,
    recursive: bool,
) -> Vec<&'a Primitive>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let target = match region_path {
        Some(path) => match try_find_region(root, path) {
            Some(region) => region,
            None => return Vec::new(),
        },
        None => root,
    };
    names
        .into_iter()
        .flat_map(|name| target.find_objects_with_group_name(name.as_ref(), recursive))
        .collect()
}

/// Expand regions into their objects and drop duplicate UUIDs
///
/// A region contributes every primitive in its subtree. When the same UUID
/// appears more than once the last occurrence wins. The result order is not
/// specified.
pub fn deduplicate<'a>(items: &[SceneItem<'a>]) -> Vec<&'a Primitive> {
    let mut unique: HashMap<&'a str, &'a Primitive> = HashMap::new();
    for item in items {
        match *item {
            SceneItem::Primitive(primitive) => {
                unique.insert(primitive.uuid(), primitive);
            }
            SceneItem::Region(region) => {
                for primitive in region.all_objects(true) {
                    unique.insert(primitive.uuid(), primitive);
                }
            }
        }
    }
    unique.into_values().collect()
}

/// Compact identities of the visible primitives
///
/// The owning region is looked up under `root`; a primitive whose owner is not
/// found is listed by its bare UUID.
pub fn visible_compact_identities(root: &Region, primitives: &[&Primitive]) -> Vec<String> {
    primitives
        .iter()
        .filter(|p| p.is_visible())
        .map(|p| match root.owner_of(p.uuid()) {
            Some(region) => encode_compact(region.uuid(), Some(p.uuid())),
            None => p.uuid().to_string(),
        })
        .collect()
}

/// Path identities of a subtree, depth first
///
/// Each region is listed as `__r<path>`, followed by one `<path>/<group>` entry
/// per primitive it owns, followed by its child regions.
pub fn path_identities(region: &Region) -> Vec<String> {
    let mut list = Vec::new();
    collect_path_identities(region, &mut list);
    list
}

fn collect_path_identities(region: &Region, list: &mut Vec<String>) {
    list.push(encode_path(region.full_path(), None));
    for primitive in region.primitives() {
        list.push(encode_path(region.full_path(), Some(primitive.group_name())));
    }
    for child in region.children() {
        collect_path_identities(child, list);
    }
}
