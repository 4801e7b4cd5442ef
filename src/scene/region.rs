use uuid::Uuid;

use super::primitive::Primitive;

/// Node of the scene's containment tree
///
/// A region exclusively owns its child regions and its primitives. The full
/// path is fixed when the region is created under its parent, so it always
/// equals the ancestor names joined with `/`. The root's path is empty.
#[derive(Debug, Clone)]
pub struct Region {
    uuid: String,
    name: String,
    full_path: String,
    children: Vec<Region>,
    primitives: Vec<Primitive>,
}

impl Region {
    pub fn new_root() -> Self {
        Self::with_parts(Uuid::new_v4().to_string(), String::new(), String::new())
    }

    fn with_parts(uuid: String, name: String, full_path: String) -> Self {
        Self {
            uuid,
            name,
            full_path,
            children: Vec::new(),
            primitives: Vec::new(),
        }
    }

    fn child_path(&self, name: &str) -> String {
        if self.full_path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.full_path, name)
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Direct child regions
    pub fn children(&self) -> &[Region] {
        &self.children
    }

    /// Primitives owned directly by this region
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Add a child region with a fresh UUID
    pub fn add_child(&mut self, name: &str) -> &mut Region {
        self.add_child_with_uuid(name, Uuid::new_v4().to_string())
    }

    pub fn add_child_with_uuid(&mut self, name: &str, uuid: impl Into<String>) -> &mut Region {
        let child = Region::with_parts(uuid.into(), name.to_string(), self.child_path(name));
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn add_primitive(&mut self, primitive: Primitive) -> &mut Primitive {
        self.primitives.push(primitive);
        let last = self.primitives.len() - 1;
        &mut self.primitives[last]
    }

    /// Remove a directly owned primitive
    ///
    /// Annotation records are not touched; use
    /// [`AnnotationStore::remove_primitive`](crate::annotation::AnnotationStore::remove_primitive)
    /// to drop the record too.
    pub fn remove_primitive(&mut self, uuid: &str) -> Option<Primitive> {
        let index = self.primitives.iter().position(|p| p.uuid() == uuid)?;
        Some(self.primitives.remove(index))
    }

    /// Descendant regions in depth-first order
    ///
    /// With `recursive` false only the direct children are returned.
    pub fn child_regions(&self, recursive: bool) -> Vec<&Region> {
        let mut regions = Vec::new();
        for child in &self.children {
            regions.push(child);
            if recursive {
                regions.extend(child.child_regions(true));
            }
        }
        regions
    }

    /// Primitives of this region, followed by those of descendants when
    /// `recursive` is set
    pub fn all_objects(&self, recursive: bool) -> Vec<&Primitive> {
        let mut objects: Vec<&Primitive> = self.primitives.iter().collect();
        if recursive {
            for child in &self.children {
                objects.extend(child.all_objects(true));
            }
        }
        objects
    }

    /// Locate a descendant by a path relative to this region
    ///
    /// Empty path segments are ignored, so `""` and `"/"` name this region.
    pub fn find_child_from_path(&self, path: &str) -> Option<&Region> {
        let mut region = self;
        for name in path_segments(path) {
            region = region.children.iter().find(|c| c.name == name)?;
        }
        Some(region)
    }

    pub fn find_child_from_path_mut(&mut self, path: &str) -> Option<&mut Region> {
        let mut region = self;
        for name in path_segments(path) {
            region = region.children.iter_mut().find(|c| c.name == name)?;
        }
        Some(region)
    }

    /// Locate a descendant by path, creating missing regions on the way
    pub fn find_or_create_child_from_path(&mut self, path: &str) -> &mut Region {
        let mut region = self;
        for name in path_segments(path) {
            let index = match region.children.iter().position(|c| c.name == name) {
                Some(index) => index,
                None => {
                    region.add_child(name);
                    region.children.len() - 1
                }
            };
            region = &mut region.children[index];
        }
        region
    }

    /// Primitives whose group name matches, optionally searching descendants
    pub fn find_objects_with_group_name(&self, group: &str, recursive: bool) -> Vec<&Primitive> {
        self.all_objects(recursive)
            .into_iter()
            .filter(|p| p.group_name() == group)
            .collect()
    }

    /// This region or the first descendant with the given UUID
    pub fn find_region_by_uuid(&self, uuid: &str) -> Option<&Region> {
        if self.uuid == uuid {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_region_by_uuid(uuid))
    }

    /// First primitive in this subtree with the given UUID
    pub fn find_primitive(&self, uuid: &str) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|p| p.uuid() == uuid)
            .or_else(|| self.children.iter().find_map(|c| c.find_primitive(uuid)))
    }

    pub fn find_primitive_mut(&mut self, uuid: &str) -> Option<&mut Primitive> {
        if let Some(index) = self.primitives.iter().position(|p| p.uuid() == uuid) {
            return Some(&mut self.primitives[index]);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_primitive_mut(uuid))
    }

    /// Region in this subtree that directly owns the primitive
    pub fn owner_of(&self, primitive_uuid: &str) -> Option<&Region> {
        if self.primitives.iter().any(|p| p.uuid() == primitive_uuid) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.owner_of(primitive_uuid))
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Region {
        let mut root = Region::new_root();
        let heart = root.add_child_with_uuid("heart", "r-heart");
        heart.add_primitive(Primitive::point_set("valve", &[]).with_uuid("p-valve"));
        let atrium = heart.add_child_with_uuid("atrium", "r-atrium");
        atrium.add_primitive(Primitive::line_set("vessel", &[]).with_uuid("p-vessel"));
        atrium.add_primitive(Primitive::point_set("valve", &[]).with_uuid("p-valve-2"));
        root.add_child_with_uuid("lung", "r-lung");
        root
    }

    #[test]
    fn test_full_paths() {
        let root = tree();
        assert_eq!(root.full_path(), "");
        let atrium = root.find_child_from_path("heart/atrium").unwrap();
        assert_eq!(atrium.full_path(), "heart/atrium");
        assert_eq!(atrium.name(), "atrium");
        assert_eq!(root.find_child_from_path("/heart/").unwrap().uuid(), "r-heart");
        assert!(root.find_child_from_path("heart/ventricle").is_none());
        assert_eq!(root.find_child_from_path("").unwrap().uuid(), root.uuid());
    }

    #[test]
    fn test_child_regions() {
        let root = tree();
        let direct: Vec<_> = root.child_regions(false).iter().map(|r| r.uuid()).collect();
        assert_eq!(direct, vec!["r-heart", "r-lung"]);
        let all: Vec<_> = root.child_regions(true).iter().map(|r| r.uuid()).collect();
        assert_eq!(all, vec!["r-heart", "r-atrium", "r-lung"]);
    }

    #[test]
    fn test_all_objects_and_groups() {
        let root = tree();
        let heart = root.find_child_from_path("heart").unwrap();
        assert_eq!(heart.all_objects(false).len(), 1);
        assert_eq!(heart.all_objects(true).len(), 3);
        assert_eq!(heart.find_objects_with_group_name("valve", false).len(), 1);
        assert_eq!(heart.find_objects_with_group_name("valve", true).len(), 2);
    }

    #[test]
    fn test_find_or_create() {
        let mut root = tree();
        let created = root.find_or_create_child_from_path("heart/atrium/left");
        assert_eq!(created.full_path(), "heart/atrium/left");
        let created_uuid = created.uuid().to_string();
        assert_eq!(
            root.find_or_create_child_from_path("heart/atrium/left").uuid(),
            created_uuid
        );
        assert_eq!(root.child_regions(true).len(), 4);
    }

    #[test]
    fn test_uuid_lookups() {
        let mut root = tree();
        assert_eq!(root.find_region_by_uuid("r-atrium").unwrap().name(), "atrium");
        assert_eq!(root.find_primitive("p-vessel").unwrap().group_name(), "vessel");
        assert_eq!(root.owner_of("p-vessel").unwrap().uuid(), "r-atrium");
        root.find_primitive_mut("p-vessel").unwrap().set_editable(true);
        assert!(root.find_primitive("p-vessel").unwrap().is_editable());

        let atrium = root.find_child_from_path_mut("heart/atrium").unwrap();
        assert!(atrium.remove_primitive("p-vessel").is_some());
        assert!(root.find_primitive("p-vessel").is_none());
    }
}
