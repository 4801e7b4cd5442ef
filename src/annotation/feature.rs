//! Conversion between editable primitives and the feature payloads stored by
//! the annotation service.
//!
//! A feature is identified by `region/group`. Point-sets travel as
//! `MultiPoint`, line-sets as `MultiLineString` (a flat list of segment
//! endpoints), anything else as a plain `Feature` that carries no drawing.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::AnnotationConfig,
    identity::{decode_feature_id, encode_path},
    scene::{Coordinate, Primitive, PrimitiveFactory, PrimitiveKind, VertexAttribute},
};

/// Comment marking a feature as deleted
pub const TOMBSTONE_COMMENT: &str = "Deleted";

/// Geometry type names used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    MultiPoint,
    MultiLineString,
    Feature,
}

impl GeometryType {
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::PointSet => GeometryType::MultiPoint,
            PrimitiveKind::LineSet => GeometryType::MultiLineString,
            PrimitiveKind::Other => GeometryType::Feature,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Feature => "Feature",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "MultiPoint" => Some(GeometryType::MultiPoint),
            "MultiLineString" => Some(GeometryType::MultiLineString),
            "Feature" => Some(GeometryType::Feature),
            _ => None,
        }
    }

    /// Whether features of this type were drawn by a user
    pub fn is_drawn(&self) -> bool {
        !matches!(self, GeometryType::Feature)
    }

    pub fn label(&self) -> &'static str {
        if self.is_drawn() {
            "Drawn annotation"
        } else {
            "Feature annotation"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Geometry type name, kept as text so unknown types survive parsing
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw coordinate array. Its shape depends on the type, so it is only read
    /// as `[x, y, z]` triples through [`Geometry::vertices`].
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl Geometry {
    pub fn from_vertices(geometry_type: GeometryType, coords: &[Coordinate]) -> Self {
        let coordinates = coords
            .iter()
            .map(|c| c.iter().map(|&x| serde_json::Value::from(x)).collect::<serde_json::Value>())
            .collect::<Vec<_>>();
        Self {
            kind: geometry_type.as_str().to_string(),
            coordinates: serde_json::Value::Array(coordinates),
        }
    }

    pub fn geometry_type(&self) -> Option<GeometryType> {
        GeometryType::from_name(&self.kind)
    }

    /// Coordinates as a flat list of `[x, y, z]` triples, `None` for any
    /// other shape
    pub fn vertices(&self) -> Option<Vec<Coordinate>> {
        Vec::<Coordinate>::deserialize(&self.coordinates).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub drawn: bool,
    pub label: String,
}

/// A stored drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// `region/group`, possibly percent-encoded when read back
    pub id: String,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBody {
    #[serde(default)]
    pub evidence: Vec<serde_json::Value>,
    pub comment: String,
}

/// Author of a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    /// Any other profile fields the service reports
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Annotation submitted to, or read from, the annotation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePayload {
    /// Scaffold URL the annotation belongs to
    pub resource: String,
    pub item: FeatureItem,
    pub body: AnnotationBody,
    /// Absent for tombstones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Creator>,
}

impl FeaturePayload {
    pub fn is_tombstone(&self) -> bool {
        self.body.comment == TOMBSTONE_COMMENT
    }
}

/// Coordinates of the addressable vertices, read from the kind's attribute
fn primitive_coordinates(primitive: &Primitive) -> Vec<Coordinate> {
    let attribute = VertexAttribute::for_kind(primitive.kind());
    let array = primitive.attribute(attribute).unwrap_or_default();
    array
        .chunks_exact(3)
        .take(primitive.draw_range())
        .map(|v| [v[0], v[1], v[2]])
        .collect()
}

/// Build the payload describing `primitive` as the drawing `region/group`
///
/// A `comment` of [`TOMBSTONE_COMMENT`] yields a payload without a feature.
pub fn primitive_to_feature(
    primitive: &Primitive,
    region: &str,
    group: &str,
    resource: &str,
    comment: &str,
) -> FeaturePayload {
    let geometry_type = GeometryType::for_kind(primitive.kind());
    let feature_id = encode_path(region, Some(group));

    let feature = (comment != TOMBSTONE_COMMENT).then(|| Feature {
        id: feature_id.clone(),
        properties: FeatureProperties {
            drawn: geometry_type.is_drawn(),
            label: geometry_type.label().to_string(),
        },
        geometry: Geometry::from_vertices(geometry_type, &primitive_coordinates(primitive)),
    });

    FeaturePayload {
        resource: resource.to_string(),
        item: FeatureItem { id: feature_id },
        body: AnnotationBody {
            evidence: Vec::new(),
            comment: comment.to_string(),
        },
        feature,
        creator: None,
    }
}

/// Rebuild editable primitives from stored features
///
/// Returns the UUIDs of the primitives created, in feature order. Features of
/// any type other than `MultiPoint` or `MultiLineString` are skipped, and so
/// are features whose coordinates are not `[x, y, z]` triples.
pub fn features_to_primitives<F: PrimitiveFactory + ?Sized>(
    factory: &mut F,
    features: &[Feature],
    config: &AnnotationConfig,
) -> Vec<String> {
    let mut created = Vec::new();
    for feature in features {
        let (region, group) = decode_feature_id(&feature.id);
        let geometry_type = feature.geometry.geometry_type().filter(GeometryType::is_drawn);
        let Some(geometry_type) = geometry_type else {
            debug!("skipping feature {} of type {}", feature.id, feature.geometry.kind);
            continue;
        };
        let Some(coords) = feature.geometry.vertices() else {
            debug!("skipping feature {}: coordinates are not 3D points", feature.id);
            continue;
        };
        let primitive = match geometry_type {
            GeometryType::MultiPoint => {
                factory.create_points(&region, &group, &coords, &group, config.point_colour)
            }
            _ => factory.create_lines(&region, &group, &coords, config.line_colour),
        };
        primitive.set_editable(true);
        created.push(primitive.uuid().to_string());
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    const SCAFFOLD: &str = "https://example.org/scaffold.json";

    #[test]
    fn test_point_set_feature() {
        let points = Primitive::point_set("marker", &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let payload = primitive_to_feature(&points, "a/b", "marker", SCAFFOLD, "Created");

        assert_eq!(payload.resource, SCAFFOLD);
        assert_eq!(payload.item.id, "a/b/marker");
        assert_eq!(payload.body.comment, "Created");
        let feature = payload.feature.unwrap();
        assert_eq!(feature.id, "a/b/marker");
        assert!(feature.properties.drawn);
        assert_eq!(feature.properties.label, "Drawn annotation");
        assert_eq!(feature.geometry.kind, "MultiPoint");
        assert_eq!(
            feature.geometry.vertices(),
            Some(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])
        );
        assert_eq!(
            serde_json::to_value(&feature.geometry).unwrap(),
            serde_json::json!({"type": "MultiPoint", "coordinates": [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]})
        );
    }

    #[test]
    fn test_other_kind_is_plain_feature() {
        let surface = Primitive::new(PrimitiveKind::Other, "skin", &[[0.0; 3]]);
        let payload = primitive_to_feature(&surface, "body/", "skin", SCAFFOLD, "Edited");
        assert_eq!(payload.item.id, "body/skin");
        let feature = payload.feature.unwrap();
        assert!(!feature.properties.drawn);
        assert_eq!(feature.properties.label, "Feature annotation");
        assert_eq!(feature.geometry.geometry_type(), Some(GeometryType::Feature));
    }

    #[test]
    fn test_coordinates_respect_draw_range() {
        let mut lines = Primitive::line_set("v", &[[0.0; 3], [1.0; 3], [2.0; 3], [3.0; 3]]);
        lines.set_draw_range(2);
        let payload = primitive_to_feature(&lines, "a", "v", SCAFFOLD, "Edited");
        assert_eq!(
            payload.feature.unwrap().geometry.vertices(),
            Some(vec![[0.0; 3], [1.0; 3]])
        );
    }

    #[test]
    fn test_tombstone() {
        let points = Primitive::point_set("marker", &[[1.0, 2.0, 3.0]]);
        let payload = primitive_to_feature(&points, "a/b", "marker", SCAFFOLD, TOMBSTONE_COMMENT);
        assert!(payload.is_tombstone());
        assert!(payload.feature.is_none());
        assert_eq!(payload.item.id, "a/b/marker");

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("feature").is_none());
        assert!(json.get("creator").is_none());
        assert_eq!(json["body"]["evidence"], serde_json::json!([]));
    }

    #[test]
    fn test_round_trip_through_scene() {
        let coords = vec![[0.5, -1.25, 3.0], [1.0e-3, 7.0, -2.5]];
        let originals = [
            Primitive::point_set("marker", &coords),
            Primitive::line_set("vessel", &coords),
        ];
        let features: Vec<Feature> = originals
            .iter()
            .map(|p| {
                primitive_to_feature(p, "heart/left", p.group_name(), SCAFFOLD, "Created")
                    .feature
                    .unwrap()
            })
            .collect();

        let mut scene = Scene::new();
        let created = features_to_primitives(&mut scene, &features, &AnnotationConfig::default());
        assert_eq!(created.len(), 2);

        let region = scene.root_region().find_child_from_path("heart/left").unwrap();
        let points = region.find_primitive(&created[0]).unwrap();
        assert!(points.is_point_set());
        assert!(points.is_editable());
        assert_eq!(points.colour(), 0x0022ee);
        assert_eq!(points.label(), Some("marker"));

        let lines = region.find_primitive(&created[1]).unwrap();
        assert!(lines.is_line_set());
        assert!(lines.is_editable());
        assert_eq!(lines.colour(), 0x00ee22);

        for (original, rebuilt) in originals.iter().zip([points, lines]) {
            assert_eq!(rebuilt.group_name(), original.group_name());
            assert_eq!(primitive_coordinates(rebuilt), primitive_coordinates(original));
        }
    }

    #[test]
    fn test_features_decode_ids_and_skip_unknown() {
        let json = r#"[
            {"id": "heart%2Fleft/marker", "properties": {"drawn": true, "label": "Drawn annotation"},
             "geometry": {"type": "MultiPoint", "coordinates": [[1, 2, 3]]}},
            {"id": "heart/skin", "properties": {"drawn": false, "label": "Feature annotation"},
             "geometry": {"type": "Polygon"}}
        ]"#;
        let features: Vec<Feature> = serde_json::from_str(json).unwrap();
        let mut scene = Scene::new();
        let created = features_to_primitives(&mut scene, &features, &AnnotationConfig::default());
        assert_eq!(created.len(), 1);
        let region = scene.root_region().find_child_from_path("heart/left").unwrap();
        assert_eq!(region.primitives()[0].group_name(), "marker");
    }

    #[test]
    fn test_foreign_coordinate_shapes_are_skipped() {
        let json = r#"[
            {"id": "heart/marker", "properties": {"drawn": true, "label": "Drawn annotation"},
             "geometry": {"type": "MultiPoint", "coordinates": [[1, 2, 3]]}},
            {"id": "heart/outline", "properties": {"drawn": false, "label": "Feature annotation"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}},
            {"id": "heart/vessel", "properties": {"drawn": true, "label": "Drawn annotation"},
             "geometry": {"type": "MultiLineString", "coordinates": [[[0, 0, 0], [1, 1, 1]]]}},
            {"id": "heart/flat", "properties": {"drawn": true, "label": "Drawn annotation"},
             "geometry": {"type": "MultiPoint", "coordinates": [[1, 2]]}}
        ]"#;
        let features: Vec<Feature> = serde_json::from_str(json).unwrap();
        assert_eq!(features.len(), 4);
        assert!(features[1].geometry.vertices().is_none());

        let mut scene = Scene::new();
        let created = features_to_primitives(&mut scene, &features, &AnnotationConfig::default());
        assert_eq!(created.len(), 1);
        let region = scene.root_region().find_child_from_path("heart").unwrap();
        let marker = region.find_primitive(&created[0]).unwrap();
        assert_eq!(marker.group_name(), "marker");
        assert_eq!(primitive_coordinates(marker), vec![[1.0, 2.0, 3.0]]);
    }
}
