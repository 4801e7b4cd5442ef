//! # Annotation Round Trip
//!
//! Builds a small organ scene, draws a nerve on it, edits the drawing and
//! stores it with an in-memory annotation service. The scene is then reloaded
//! and the drawing rebuilt from the stored features.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example annotate_round_trip
//! ```

use anyhow::{bail, Context, Result};
use log::info;
use organ_scene::annotation::{
    fetch_drawn_features, submit_feature_annotation, Creator, MemoryAnnotationService,
};
use organ_scene::index::{compact_to_path_identities, path_identities};
use organ_scene::prelude::*;

const SCAFFOLD: &str = "https://example.org/scaffolds/heart/scaffold.json";

fn build_scene(store: &mut AnnotationStore) -> Scene {
    let mut scene = Scene::new();
    let context = OrganContext::new("human", "cardiovascular", "heart");

    let root = scene.root_region_mut();
    let heart = root.find_or_create_child_from_path("body/heart");
    heart.add_primitive(Primitive::new(
        PrimitiveKind::Other,
        "epicardium",
        &[[0.0, 0.0, 0.0], [2.0, 2.0, 2.0]],
    ));
    for primitive in heart.primitives() {
        store.attach(heart, primitive, &context);
    }
    scene
}

fn main() -> Result<()> {
    env_logger::init();

    let config = AnnotationConfig::default().with_resource(SCAFFOLD);
    let service = MemoryAnnotationService::new().with_user(Creator {
        name: Some("Demo User".to_string()),
        ..Default::default()
    });
    let mut store = AnnotationStore::new();
    let mut scene = build_scene(&mut store);

    // Draw a nerve and lengthen it
    let nerve = scene.create_lines(
        "body/heart",
        "vagus",
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        config.line_colour,
    );
    nerve.set_editable(true);
    move_or_extend_line(nerve, 0, 2.5, true).context("extending the nerve")?;
    info!("nerve length is now {}", line_segment_length(nerve, 0));
    let nerve_uuid = nerve.uuid().to_string();

    let heart = resolve_region(scene.root_region(), "body/heart")?;
    let compact = encode_compact(heart.uuid(), Some(&nerve_uuid));
    info!(
        "{} resolves to {:?}",
        compact,
        compact_to_path_identities(scene.root_region(), &[compact.as_str()])
    );

    let nerve = heart
        .find_primitive(&nerve_uuid)
        .context("nerve vanished from its region")?;
    let submission = pollster::block_on(submit_feature_annotation(
        &service,
        "demo-token",
        nerve,
        heart.full_path(),
        nerve.group_name(),
        &config,
        "Created",
    ))?;
    info!("stored as annotation {:?}", submission.annotation_id);

    // Reload: identities and records from before are stale now
    store.reload(&mut scene);
    if !compact_to_path_identities(scene.root_region(), &[compact.as_str()]).is_empty() {
        bail!("compact identity survived a reload");
    }

    let features = pollster::block_on(fetch_drawn_features(&service, "demo-token", SCAFFOLD))?;
    let rebuilt = features_to_primitives(&mut scene, &features, &config);
    info!("rebuilt {} drawing(s)", rebuilt.len());

    for identity in path_identities(scene.root_region()) {
        println!("{identity}");
    }
    println!("{:?}", scene.get_statistics());
    Ok(())
}
