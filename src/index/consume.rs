//! Consume-once matching.
//!
//! A batch resolving several identities against the same region must bind each
//! primitive at most once. [`ConsumeOnce`] keeps one candidate pool per region
//! for the lifetime of a single batch call and removes a primitive from its
//! pool as soon as it is matched.

use std::collections::HashMap;

use crate::scene::{Primitive, Region};

/// Per-batch working set of unmatched primitives, keyed by region UUID
#[derive(Debug, Default)]
pub struct ConsumeOnce<'a> {
    pools: HashMap<&'a str, Vec<&'a Primitive>>,
}

impl<'a> ConsumeOnce<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the primitive with `uuid` out of `region`'s own primitive list
    ///
    /// The pool for a region is filled on first use. Later calls for the same
    /// UUID in the same region return `None`.
    pub fn take(&mut self, region: &'a Region, uuid: &str) -> Option<&'a Primitive> {
        let pool = self
            .pools
            .entry(region.uuid())
            .or_insert_with(|| region.all_objects(false));
        let index = pool.iter().position(|p| p.uuid() == uuid)?;
        Some(pool.remove(index))
    }

    /// Unmatched primitives left for a region, `None` if it was never touched
    pub fn remaining(&self, region_uuid: &str) -> Option<usize> {
        self.pools.get(region_uuid).map(Vec::len)
    }
}
