/// Tests for Scene
///
/// Builder API, index validation, camera placement and texture bookkeeping.

use super::*;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

fn camera(name: &str, far: f32) -> Camera {
    Camera {
        name: name.to_string(),
        aspect: 1.5,
        vfov: 1.0,
        near: 0.1,
        far,
    }
}

// ============================================================================
// Builders
// ============================================================================

#[test]
fn test_new_scene_is_empty() {
    let scene = Scene::new();
    assert!(scene.nodes().is_empty());
    assert!(scene.roots().is_empty());
    assert_eq!(scene.texture_count(), 0);
    assert_eq!(scene.requested_camera(), None);
}

#[test]
fn test_add_node_returns_sequential_indices() {
    let mut scene = Scene::new();
    assert_eq!(scene.add_node(Node::new("a", Transform::IDENTITY)), 0);
    assert_eq!(scene.add_node(Node::new("b", Transform::IDENTITY)), 1);
    assert_eq!(scene.node(1).unwrap().name, "b");
}

#[test]
fn test_add_child_and_root() {
    let mut scene = Scene::new();
    let parent = scene.add_node(Node::new("parent", Transform::IDENTITY));
    let child = scene.add_node(Node::new("child", Transform::IDENTITY));

    scene.add_child(parent, child).unwrap();
    scene.add_root(parent).unwrap();

    assert_eq!(scene.node(parent).unwrap().children, vec![child]);
    assert_eq!(scene.roots(), &[parent]);
}

#[test]
fn test_add_child_rejects_bad_indices() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("only", Transform::IDENTITY));

    assert!(scene.add_child(node, 5).is_err());
    assert!(scene.add_child(5, node).is_err());
    assert!(scene.add_child(node, node).is_err());
    assert!(scene.add_root(3).is_err());
    assert!(scene.node(node).unwrap().children.is_empty());
}

#[test]
fn test_node_mut_edits_transform() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("moved", Transform::IDENTITY));

    scene.node_mut(node).unwrap().transform.position = Vec3::new(1.0, 2.0, 3.0);

    assert_eq!(scene.node(node).unwrap().transform.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(scene.node_mut(9).is_err());
}

#[test]
fn test_texture_count_tracks_materials() {
    let mut scene = Scene::new();
    scene.add_material(Material { name: "a".to_string(), texture: 2 });
    assert_eq!(scene.texture_count(), 3);

    scene.set_texture_count(1);
    assert_eq!(scene.texture_count(), 3);

    scene.set_texture_count(8);
    assert_eq!(scene.texture_count(), 8);
}

#[test]
fn test_node_builder_attachments() {
    let node = Node::new("n", Transform::IDENTITY)
        .with_mesh(1)
        .with_camera(2)
        .with_light(3);
    assert_eq!((node.mesh, node.camera, node.light), (Some(1), Some(2), Some(3)));

    let mut scene = Scene::new();
    let light = scene.add_light(Light { name: "sun".to_string(), tint: Vec3::ONE, strength: 2.0 });
    assert_eq!(scene.lights()[light as usize].strength, 2.0);
}

// ============================================================================
// Cameras
// ============================================================================

#[test]
fn test_camera_projection_variants() {
    let finite = camera("finite", 50.0);
    let infinite = camera("infinite", 0.0);

    assert!(!finite.is_infinite());
    assert!(infinite.is_infinite());
    assert_eq!(finite.clip_from_view(), perspective(1.0, 1.5, 0.1, 50.0));
    assert_eq!(infinite.clip_from_view(), infinite_perspective(1.0, 1.5, 0.1));
}

#[test]
fn test_camera_instances_use_world_transform() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(camera("main", 100.0));
    let rig = scene.add_node(Node::new("rig", Transform {
        position: Vec3::new(0.0, 0.0, 5.0),
        rotation: Quat::from_rotation_z(FRAC_PI_2),
        scale: Vec3::ONE,
    }));
    let holder = scene.add_node(Node::new("holder", Transform::from_position(Vec3::X)).with_camera(cam));
    scene.add_child(rig, holder).unwrap();
    scene.add_root(rig).unwrap();

    let instances = scene.camera_instances();

    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].camera, cam);
    assert_eq!(instances[0].node, holder);
    // +X rotated a quarter turn about Z lands on +Y
    let eye = instances[0].world_from_view.transform_point3(Vec3::ZERO);
    assert!((eye - Vec3::new(0.0, 1.0, 5.0)).length() < 1e-5);
}

#[test]
fn test_camera_instance_view_inverts_world_chain() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(camera("main", 100.0));
    let mut parent_transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
    parent_transform.rotation = Quat::from_rotation_z(FRAC_PI_2);
    parent_transform.scale = Vec3::splat(2.0);
    let parent = scene.add_node(Node::new("parent", parent_transform));
    let holder = scene.add_node(Node::new("holder", Transform::from_position(Vec3::X)).with_camera(cam));
    scene.add_child(parent, holder).unwrap();
    scene.add_root(parent).unwrap();

    let instance = scene.camera_instances()[0];

    assert!((instance.view_from_world * instance.world_from_view).abs_diff_eq(glam::Mat4::IDENTITY, 1e-5));
}

#[test]
fn test_active_camera_prefers_requested() {
    let mut scene = Scene::new();
    let first = scene.add_camera(camera("first", 100.0));
    let second = scene.add_camera(camera("second", 100.0));
    for cam in [first, second] {
        let node = scene.add_node(Node::new("holder", Transform::IDENTITY).with_camera(cam));
        scene.add_root(node).unwrap();
    }

    assert_eq!(scene.active_camera().unwrap().1.name, "first");

    scene.set_requested_camera(Some(second));
    assert_eq!(scene.active_camera().unwrap().1.name, "second");

    // A requested camera that no node carries falls back to the first placed one
    let unplaced = scene.add_camera(camera("unplaced", 100.0));
    scene.set_requested_camera(Some(unplaced));
    assert_eq!(scene.active_camera().unwrap().1.name, "first");
}

#[test]
fn test_active_camera_none_without_placed_cameras() {
    let mut scene = Scene::new();
    scene.add_camera(camera("loose", 100.0));
    assert!(scene.active_camera().is_none());
}
