//! Binding stored annotation records back to live primitives.

use log::warn;

use super::record::AnnotationRecord;
use crate::{
    error::ResolveError,
    index::{resolve_region, ConsumeOnce},
    scene::{Primitive, Scene},
};

/// Label used when a batch spans more than one group
pub const MULTIPLE_SELECTIONS: &str = "Multiple selections";

/// Objects bound from a batch of annotation records
#[derive(Debug, Clone)]
pub struct AnnotationSelection<'a> {
    /// Shared group name, or [`MULTIPLE_SELECTIONS`]
    pub label: String,
    /// Common region path, empty when the records span unrelated regions
    pub region_path: String,
    pub objects: Vec<&'a Primitive>,
}

/// Resolve annotation records to the primitives they describe
///
/// The label and region path start from the first record. A record whose
/// region path does not contain the running path clears it; a record with a
/// different group switches the label to [`MULTIPLE_SELECTIONS`].
///
/// Each physical primitive binds at most once per call even when several
/// records name it. Records whose UUID matches nothing are skipped.
///
/// # Errors
///
/// [`ResolveError::RegionNotFound`] if any record names a region that is not
/// loaded. Records are assumed to describe the current scene, so this aborts
/// the whole batch.
pub fn resolve_annotations<'a>(
    scene: &'a Scene,
    annotations: &[AnnotationRecord],
) -> Result<AnnotationSelection<'a>, ResolveError> {
    let mut selection = AnnotationSelection {
        label: MULTIPLE_SELECTIONS.to_string(),
        region_path: String::new(),
        objects: Vec::new(),
    };
    if let Some(first) = annotations.first() {
        selection.label = first.group.clone();
        selection.region_path = first.region.clone();
    }

    let root = scene.root_region();
    let mut working = ConsumeOnce::new();
    for annotation in annotations {
        if !annotation.region.contains(selection.region_path.as_str()) {
            selection.region_path.clear();
        }
        if selection.label != annotation.group {
            selection.label = MULTIPLE_SELECTIONS.to_string();
        }

        let region = resolve_region(root, &annotation.region).inspect_err(|_| {
            warn!("annotation {} names unloaded region {:?}", annotation.uuid, annotation.region)
        })?;
        if let Some(object) = working.take(region, &annotation.uuid) {
            selection.objects.push(object);
        }
    }

    Ok(selection)
}
