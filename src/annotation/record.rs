//! Annotation records and the store that owns them.
//!
//! A record is created when an organ part is added to the scene and describes
//! where the part lives and what it is. Records are kept apart from the
//! primitives, keyed by primitive UUID, and must be rebuilt after a reload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scene::{Primitive, Region, Scene};

/// What an organ part is, as known by the loader that added it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganContext {
    pub species: String,
    pub system: String,
    pub part: String,
}

impl OrganContext {
    pub fn new(species: &str, system: &str, part: &str) -> Self {
        Self {
            species: species.to_string(),
            system: system.to_string(),
            part: part.to_string(),
        }
    }
}

/// Annotation data for one primitive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationRecord {
    /// Full path of the owning region
    pub region: String,
    pub group: String,
    pub uuid: String,
    pub species: String,
    pub system: String,
    pub part: String,
    /// Set when the latest pick landed on the primitive's marker
    pub last_action_on_marker: bool,
}

impl AnnotationRecord {
    pub fn new(region: &Region, primitive: &Primitive, context: &OrganContext) -> Self {
        Self {
            region: region.full_path().to_string(),
            group: primitive.group_name().to_string(),
            uuid: primitive.uuid().to_string(),
            species: context.species.clone(),
            system: context.system.clone(),
            part: context.part.clone(),
            last_action_on_marker: false,
        }
    }
}

/// Annotation records keyed by primitive UUID
#[derive(Debug, Default)]
pub struct AnnotationStore {
    records: HashMap<String, AnnotationRecord>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the record for a newly added primitive, replacing any previous one
    pub fn attach(
        &mut self,
        region: &Region,
        primitive: &Primitive,
        context: &OrganContext,
    ) -> &AnnotationRecord {
        let record = AnnotationRecord::new(region, primitive, context);
        self.records.insert(primitive.uuid().to_string(), record);
        &self.records[primitive.uuid()]
    }

    /// Drop the record of a removed primitive
    pub fn detach(&mut self, uuid: &str) -> Option<AnnotationRecord> {
        self.records.remove(uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&AnnotationRecord> {
        self.records.get(uuid)
    }

    pub fn get_mut(&mut self, uuid: &str) -> Option<&mut AnnotationRecord> {
        self.records.get_mut(uuid)
    }

    /// Returns `false` when the primitive has no record
    pub fn set_last_action_on_marker(&mut self, uuid: &str, on_marker: bool) -> bool {
        match self.records.get_mut(uuid) {
            Some(record) => {
                record.last_action_on_marker = on_marker;
                true
            }
            None => false,
        }
    }

    /// Records of the given objects, in the same order, skipping objects
    /// without one
    pub fn records_for(&self, objects: &[&Primitive]) -> Vec<&AnnotationRecord> {
        objects
            .iter()
            .filter_map(|p| self.records.get(p.uuid()))
            .collect()
    }

    /// Forget every record, as after a scene reload
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Remove a primitive owned by `region` together with its record
    pub fn remove_primitive(&mut self, region: &mut Region, uuid: &str) -> Option<Primitive> {
        let removed = region.remove_primitive(uuid)?;
        self.detach(uuid);
        Some(removed)
    }

    /// Clear `scene` for a reload and drop every record with it
    pub fn reload(&mut self, scene: &mut Scene) {
        scene.clear();
        self.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
