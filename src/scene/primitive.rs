use cgmath::Vector3;
use uuid::Uuid;

use super::bounds::Aabb;

/// A single `[x, y, z]` coordinate as stored in feature payloads
pub type Coordinate = [f32; 3];

/// Kind of geometry a primitive renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    PointSet,
    /// Independent segments, vertices `2k` and `2k + 1` bound segment `k`
    LineSet,
    /// Surfaces, glyph sets and anything else that is not drawn by the user
    Other,
}

/// Named vertex attribute backing a primitive's geometry
///
/// Line-sets keep their segment endpoints in a separate instanced attribute,
/// every other kind uses plain positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    InstanceStart,
}

impl VertexAttribute {
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::LineSet => VertexAttribute::InstanceStart,
            PrimitiveKind::PointSet | PrimitiveKind::Other => VertexAttribute::Position,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VertexAttribute::Position => "position",
            VertexAttribute::InstanceStart => "instanceStart",
        }
    }
}

/// Flat vertex array, three components per vertex
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    pub attribute: VertexAttribute,
    pub array: Vec<f32>,
}

impl VertexBuffer {
    pub fn new(attribute: VertexAttribute, coords: &[Coordinate]) -> Self {
        Self {
            attribute,
            array: coords.iter().flatten().copied().collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.array.len() / 3
    }
}

/// A renderable, possibly editable, geometric object owned by a region
#[derive(Debug, Clone)]
pub struct Primitive {
    uuid: String,
    group_name: String,
    kind: PrimitiveKind,
    editable: bool,
    visible: bool,
    colour: u32,
    label: Option<String>,
    buffer: VertexBuffer,
    draw_range: usize,
    bounding_box: Option<Aabb>,
    bounding_box_update_required: bool,
}

impl Primitive {
    /// Create a primitive with a fresh UUID
    ///
    /// Primitives start read-only and visible. The draw range covers every
    /// vertex supplied.
    pub fn new(kind: PrimitiveKind, group_name: &str, coords: &[Coordinate]) -> Self {
        let buffer = VertexBuffer::new(VertexAttribute::for_kind(kind), coords);
        Self {
            uuid: Uuid::new_v4().to_string(),
            group_name: group_name.to_string(),
            kind,
            editable: false,
            visible: true,
            colour: 0xffffff,
            label: None,
            draw_range: buffer.vertex_count(),
            buffer,
            bounding_box: None,
            bounding_box_update_required: true,
        }
    }

    pub fn point_set(group_name: &str, coords: &[Coordinate]) -> Self {
        Self::new(PrimitiveKind::PointSet, group_name, coords)
    }

    pub fn line_set(group_name: &str, coords: &[Coordinate]) -> Self {
        Self::new(PrimitiveKind::LineSet, group_name, coords)
    }

    /// Replace the generated UUID, used by loaders that carry their own ids
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn is_point_set(&self) -> bool {
        self.kind == PrimitiveKind::PointSet
    }

    pub fn is_line_set(&self) -> bool {
        self.kind == PrimitiveKind::LineSet
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn colour(&self) -> u32 {
        self.colour
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of addressable vertices
    pub fn draw_range(&self) -> usize {
        self.draw_range
    }

    /// Limit the addressable vertices, clamped to the buffer size
    pub fn set_draw_range(&mut self, count: usize) {
        self.draw_range = count.min(self.buffer.vertex_count());
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.vertex_count()
    }

    /// Raw array of a named attribute, `None` if this primitive does not carry it
    pub fn attribute(&self, attribute: VertexAttribute) -> Option<&[f32]> {
        (self.buffer.attribute == attribute).then_some(self.buffer.array.as_slice())
    }

    /// Vertex at `index`, `None` outside the draw range
    pub fn vertex(&self, index: usize) -> Option<Vector3<f32>> {
        if index >= self.draw_range {
            return None;
        }
        let i = index * 3;
        let v = self.buffer.array.get(i..i + 3)?;
        Some(Vector3::new(v[0], v[1], v[2]))
    }

    /// All addressable vertices in order
    pub fn vertices(&self) -> Vec<Vector3<f32>> {
        (0..self.draw_range).filter_map(|i| self.vertex(i)).collect()
    }

    /// Both endpoints of segment `face_index`
    ///
    /// Only line-sets have segments.
    pub fn segment(&self, face_index: usize) -> Option<[Vector3<f32>; 2]> {
        if !self.is_line_set() {
            return None;
        }
        let start = self.vertex(face_index.checked_mul(2)?)?;
        let end = self.vertex(face_index * 2 + 1)?;
        Some([start, end])
    }

    pub fn segment_count(&self) -> usize {
        if self.is_line_set() {
            self.draw_range / 2
        } else {
            0
        }
    }

    /// Overwrite consecutive vertices starting at `start_index`
    ///
    /// Nothing is written, and `false` returned, when the run does not fit in
    /// the draw range. Bounds are not flagged here; editors decide that.
    pub fn edit_vertices(&mut self, vertices: &[Vector3<f32>], start_index: usize) -> bool {
        let Some(end) = start_index.checked_add(vertices.len()) else {
            return false;
        };
        if end > self.draw_range {
            return false;
        }
        for (offset, v) in vertices.iter().enumerate() {
            let i = (start_index + offset) * 3;
            self.buffer.array[i] = v.x;
            self.buffer.array[i + 1] = v.y;
            self.buffer.array[i + 2] = v.z;
        }
        true
    }

    pub fn bounding_box_update_required(&self) -> bool {
        self.bounding_box_update_required
    }

    pub fn request_bounding_box_update(&mut self) {
        self.bounding_box_update_required = true;
    }

    /// Bounds of the addressable vertices, recomputed if flagged stale
    pub fn bounding_box(&mut self) -> Aabb {
        match self.bounding_box {
            Some(bounds) if !self.bounding_box_update_required => bounds,
            _ => {
                let bounds = Aabb::from_vertices(self.vertices());
                self.bounding_box = Some(bounds);
                self.bounding_box_update_required = false;
                bounds
            }
        }
    }
}
