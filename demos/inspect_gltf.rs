//! Loads a glTF / GLB file and prints the resulting scene tree.
//!
//! cargo run --example inspect_gltf -- path/to/model.gltf

use std::path::Path;

use anyhow::Context;
use myth_loader::scene::{NodeHandle, Scene};
use myth_loader::{GltfLoader, LoadOptions};

fn print_tree(scene: &Scene, handle: NodeHandle, depth: usize) {
    let Some(node) = scene.get_node(handle) else {
        return;
    };
    let mut tags = Vec::new();
    if let Some(instance) = scene.mesh_of(handle) {
        tags.push(format!("mesh({} primitives)", instance.mesh.primitives.len()));
    }
    if scene.camera_of(handle).is_some() {
        tags.push("camera".to_string());
    }
    if scene.light_of(handle).is_some() {
        tags.push("light".to_string());
    }
    println!(
        "{}{} {:?} {}",
        "  ".repeat(depth),
        node.name.as_deref().unwrap_or("<unnamed>"),
        node.transform.position,
        tags.join(" ")
    );
    for &child in node.children() {
        print_tree(scene, child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: inspect_gltf <model.gltf|model.glb>")?;
    let path = Path::new(&path);
    let dir = path.parent().unwrap_or(Path::new("."));
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .context("model path has no file name")?;

    let loader = GltfLoader::from_dir(dir).with_options(LoadOptions {
        viewport_aspect: 16.0 / 9.0,
        ..LoadOptions::default()
    });
    let mut scene = Scene::new();
    let result = loader
        .load_blocking(file, &mut scene)
        .with_context(|| format!("Failed to load glTF model: {}", path.display()))?;

    for warning in &result.warnings {
        println!("warning: {warning:?}");
    }
    for &root in &result.scene_roots {
        print_tree(&scene, root, 0);
    }
    println!(
        "{} meshes, {} materials, {} textures, {} vertex arrays",
        result.meshes.len(),
        result.materials.len(),
        result.textures.len(),
        result.vertex_arrays.len()
    );
    Ok(())
}
