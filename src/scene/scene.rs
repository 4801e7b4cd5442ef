use super::{
    primitive::{Coordinate, Primitive},
    region::Region,
};

/// Creates primitives inside a scene on behalf of annotation workflows
///
/// Implemented by whatever owns the region tree. Missing regions on the given
/// path are created.
pub trait PrimitiveFactory {
    /// Create a point-set in `region` from the given coordinates
    fn create_points(
        &mut self,
        region: &str,
        group: &str,
        coords: &[Coordinate],
        label: &str,
        colour: u32,
    ) -> &mut Primitive;

    /// Create a line-set in `region`, coordinates taken in endpoint pairs
    fn create_lines(
        &mut self,
        region: &str,
        group: &str,
        coords: &[Coordinate],
        colour: u32,
    ) -> &mut Primitive;
}

/// Main scene containing the region tree
#[derive(Debug, Clone)]
pub struct Scene {
    root: Region,
}

impl Scene {
    /// Creates an empty scene with a fresh root region
    pub fn new() -> Self {
        Self {
            root: Region::new_root(),
        }
    }

    pub fn root_region(&self) -> &Region {
        &self.root
    }

    pub fn root_region_mut(&mut self) -> &mut Region {
        &mut self.root
    }

    /// Drops every region and primitive, as a reload does
    ///
    /// The new root gets a new UUID, so compact identities issued before the
    /// clear no longer resolve. Annotation records outlive the clear unless it
    /// goes through [`AnnotationStore::reload`](crate::annotation::AnnotationStore::reload).
    pub fn clear(&mut self) {
        self.root = Region::new_root();
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let objects = self.root.all_objects(true);
        SceneStatistics {
            region_count: self.root.child_regions(true).len() + 1,
            primitive_count: objects.len(),
            editable_count: objects.iter().filter(|p| p.is_editable()).count(),
            total_vertices: objects.iter().map(|p| p.draw_range()).sum(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimitiveFactory for Scene {
    fn create_points(
        &mut self,
        region: &str,
        group: &str,
        coords: &[Coordinate],
        label: &str,
        colour: u32,
    ) -> &mut Primitive {
        let primitive = Primitive::point_set(group, coords)
            .with_label(label)
            .with_colour(colour);
        self.root
            .find_or_create_child_from_path(region)
            .add_primitive(primitive)
    }

    fn create_lines(
        &mut self,
        region: &str,
        group: &str,
        coords: &[Coordinate],
        colour: u32,
    ) -> &mut Primitive {
        let primitive = Primitive::line_set(group, coords).with_colour(colour);
        self.root
            .find_or_create_child_from_path(region)
            .add_primitive(primitive)
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    /// Regions including the root
    pub region_count: usize,
    pub primitive_count: usize,
    pub editable_count: usize,
    pub total_vertices: usize,
}
