//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: create nodes, attach/detach hierarchy
//! - Component management: attach/query mesh, camera, light
//! - Node query: names, root_nodes

use std::sync::Arc;

use glam::Vec3;
use myth_loader::resources::ResolvedMesh;
use myth_loader::scene::{
    Camera, Component, ComponentKey, Light, LightKind, MeshInstance, Scene,
};

// ============================================================================
// Node Creation
// ============================================================================

#[test]
fn scene_create_node() {
    let mut scene = Scene::new();
    let handle = scene.create_node(None, None);
    assert!(scene.get_node(handle).is_some());
    assert_eq!(scene.root_nodes, vec![handle]);
}

#[test]
fn scene_create_node_with_name() {
    let mut scene = Scene::new();
    let handle = scene.create_node_with_name(Some("TestNode"));
    assert_eq!(scene.get_name(handle), Some("TestNode"));
}

#[test]
fn scene_create_node_under_parent() {
    let mut scene = Scene::new();
    let parent = scene.create_node(Some("parent"), None);
    let child = scene.create_node(Some("child"), Some(parent));

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert_eq!(scene.root_nodes, vec![parent]);
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn scene_attach_sets_parent_child() {
    let mut scene = Scene::new();
    let parent = scene.create_node(None, None);
    let child = scene.create_node(None, None);

    scene.attach(child, parent);

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(parent));
    assert!(scene.get_node(parent).unwrap().children().contains(&child));
    assert!(!scene.root_nodes.contains(&child));
}

#[test]
fn scene_attach_removes_from_old_parent() {
    let mut scene = Scene::new();
    let parent1 = scene.create_node(None, None);
    let parent2 = scene.create_node(None, None);
    let child = scene.create_node(None, Some(parent1));

    scene.attach(child, parent2);
    assert!(
        !scene.get_node(parent1).unwrap().children().contains(&child),
        "Child should be removed from old parent"
    );
    assert!(
        scene.get_node(parent2).unwrap().children().contains(&child),
        "Child should be in new parent"
    );
}

#[test]
fn scene_attach_to_self_is_noop() {
    let mut scene = Scene::new();
    let node = scene.create_node(None, None);

    scene.attach(node, node);

    assert_eq!(scene.get_node(node).unwrap().parent(), None);
}

// ============================================================================
// Component Management
// ============================================================================

#[test]
fn scene_attach_camera() {
    let mut scene = Scene::new();
    let handle = scene.create_node(None, None);
    let key = scene.attach_camera(handle, Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0));

    assert_eq!(scene.get_node(handle).unwrap().camera, Some(key));
    assert!(scene.camera_of(handle).is_some());
}

#[test]
fn scene_attach_light() {
    let mut scene = Scene::new();
    let handle = scene.create_node(None, None);
    scene.attach_light(handle, Light::new_directional(Vec3::ONE, 1.0));

    let light = scene.light_of(handle).unwrap();
    assert!(matches!(light.kind, LightKind::Directional));
    assert_eq!(light.range(), None);
}

#[test]
fn scene_mesh_instances_share_the_mesh() {
    let mut scene = Scene::new();
    let a = scene.create_node(None, None);
    let b = scene.create_node(None, None);
    let mesh = Arc::new(ResolvedMesh::new(Some("shared")));

    let ka = scene.attach_mesh(a, MeshInstance::new(mesh.clone()));
    let kb = scene.attach_mesh(b, MeshInstance::new(mesh.clone()));

    assert_ne!(ka, kb);
    assert!(Arc::ptr_eq(&scene.mesh_of(a).unwrap().mesh, &scene.mesh_of(b).unwrap().mesh));
}

#[test]
fn scene_attach_component_routes_by_kind() {
    let mut scene = Scene::new();
    let handle = scene.create_node(None, None);

    let key = scene.attach_component(handle, Component::Light(Light::new_point(Vec3::ONE, 2.0, 10.0)));
    assert!(matches!(key, ComponentKey::Light(_)));
    assert_eq!(scene.light_of(handle).unwrap().range(), Some(10.0));

    let key = scene.attach_component(
        handle,
        Component::Camera(Camera::new_orthographic(1.0, 1.0, 0.1, 10.0)),
    );
    assert!(matches!(key, ComponentKey::Camera(_)));
    assert!(scene.camera_of(handle).is_some());
}

#[test]
fn scene_components_on_unknown_node_are_absent() {
    let mut scene = Scene::new();
    let handle = scene.create_node(None, None);
    let other = Scene::new();
    assert!(other.camera_of(handle).is_none());
    assert!(other.light_of(handle).is_none());
    assert!(other.mesh_of(handle).is_none());
    assert!(scene.get_node_mut(handle).is_some());
}
