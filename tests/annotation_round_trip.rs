//! End-to-end annotation workflow: identify, resolve, edit, persist, reload.

use organ_scene::annotation::{
    fetch_drawn_features, submit_feature_annotation, Creator, MemoryAnnotationService,
    MULTIPLE_SELECTIONS, TOMBSTONE_COMMENT,
};
use organ_scene::index::visible_compact_identities;
use organ_scene::prelude::*;

const SCAFFOLD: &str = "https://example.org/scaffold.json";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Heart with two nerve segments of the same group and one vessel marker
fn load(scene: &mut Scene, store: &mut AnnotationStore) {
    let context = OrganContext::new("rat", "nervous", "vagus");
    let region = scene.root_region_mut().find_or_create_child_from_path("body/heart");
    region.add_primitive(Primitive::line_set("nerve", &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]));
    region.add_primitive(Primitive::line_set("nerve", &[[1.0, 0.0, 0.0], [1.0, 0.0, 1.0]]));
    region.add_primitive(Primitive::point_set("marker", &[[0.5, 0.5, 0.5]]));

    let region = scene.root_region().find_child_from_path("body/heart").unwrap();
    for primitive in region.primitives() {
        store.attach(region, primitive, &context);
    }
}

fn service() -> MemoryAnnotationService {
    MemoryAnnotationService::new().with_user(Creator {
        name: Some("tester".to_string()),
        ..Default::default()
    })
}

#[test]
fn records_resolve_to_live_objects() {
    init_logging();
    let mut scene = Scene::new();
    let mut store = AnnotationStore::new();
    load(&mut scene, &mut store);

    let nerves = find_by_group_name(scene.root_region(), Some("body/heart"), ["nerve"], false);
    let records: Vec<AnnotationRecord> =
        store.records_for(&nerves).into_iter().cloned().collect();
    let selection = resolve_annotations(&scene, &records).unwrap();
    assert_eq!(selection.label, "nerve");
    assert_eq!(selection.region_path, "body/heart");
    assert_eq!(selection.objects.len(), 2);

    let everything = scene.root_region().all_objects(true);
    let records: Vec<AnnotationRecord> =
        store.records_for(&everything).into_iter().cloned().collect();
    let selection = resolve_annotations(&scene, &records).unwrap();
    assert_eq!(selection.label, MULTIPLE_SELECTIONS);
    assert_eq!(selection.objects.len(), 3);
}

#[test]
fn compact_identities_resolve_until_reload() {
    init_logging();
    let mut scene = Scene::new();
    let mut store = AnnotationStore::new();
    load(&mut scene, &mut store);

    let objects = scene.root_region().all_objects(true);
    let ids = visible_compact_identities(scene.root_region(), &objects);
    assert_eq!(ids.len(), 3);
    assert_eq!(
        compact_to_path_identities(scene.root_region(), &ids),
        vec!["body/heart/nerve", "body/heart/nerve", "body/heart/marker"]
    );

    let records: Vec<AnnotationRecord> =
        store.records_for(&objects).into_iter().cloned().collect();
    scene.clear();
    assert!(compact_to_path_identities(scene.root_region(), &ids).is_empty());
    assert_eq!(
        resolve_annotations(&scene, &records).unwrap_err(),
        ResolveError::RegionNotFound("body/heart".to_string())
    );
}

#[test]
fn edited_drawings_survive_reload() {
    init_logging();
    let config = AnnotationConfig::default().with_resource(SCAFFOLD);
    let service = service();
    let mut scene = Scene::new();

    let nerve = scene.create_lines("body/heart", "drawn-nerve", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 0);
    nerve.set_editable(true);
    assert!(move_or_extend_line(nerve, 0, 2.0, true).unwrap());
    let nerve_uuid = nerve.uuid().to_string();

    let marker = scene.create_points("body/heart", "drawn-marker", &[[1.0, 1.0, 1.0]], "m", 0);
    marker.set_editable(true);
    assert!(move_point(marker, 0, Vector3::new(0.0, 1.0, 0.0)));
    let marker_uuid = marker.uuid().to_string();

    for uuid in [&nerve_uuid, &marker_uuid] {
        let primitive = scene.root_region().find_primitive(uuid).unwrap();
        let submission = pollster::block_on(submit_feature_annotation(
            &service,
            "token",
            primitive,
            "body/heart",
            primitive.group_name(),
            &config,
            "Created",
        ))
        .unwrap();
        assert!(submission.annotation_id.is_some());
    }

    scene.clear();
    let features = pollster::block_on(fetch_drawn_features(&service, "token", SCAFFOLD)).unwrap();
    let rebuilt = features_to_primitives(&mut scene, &features, &config);
    assert_eq!(rebuilt.len(), 2);

    let heart = scene.root_region().find_child_from_path("body/heart").unwrap();
    let nerve = heart.find_objects_with_group_name("drawn-nerve", false)[0];
    assert!(nerve.is_editable());
    assert_eq!(line_segment_length(nerve, 0), 2.0);
    let marker = heart.find_objects_with_group_name("drawn-marker", false)[0];
    assert_eq!(marker.vertex(0), Some(Vector3::new(1.0, 2.0, 1.0)));
}

#[test]
fn deleted_drawings_are_not_rebuilt() {
    init_logging();
    let config = AnnotationConfig::default().with_resource(SCAFFOLD);
    let service = service();
    let marker = Primitive::point_set("gone", &[[0.0, 0.0, 0.0]]).with_editable(true);

    for action in ["Created", TOMBSTONE_COMMENT] {
        pollster::block_on(submit_feature_annotation(
            &service, "token", &marker, "body", "gone", &config, action,
        ))
        .unwrap();
    }
    let submissions = service.submissions();
    assert!(submissions[1].feature.is_none());
    assert!(submissions[1].is_tombstone());

    let features = pollster::block_on(fetch_drawn_features(&service, "token", SCAFFOLD)).unwrap();
    let mut scene = Scene::new();
    assert!(features_to_primitives(&mut scene, &features, &config).is_empty());
    assert_eq!(scene.get_statistics().primitive_count, 0);
}
