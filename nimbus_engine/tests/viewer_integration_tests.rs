//! Integration tests for the Viewer + FrameRenderer loop
//!
//! Drives several frames through the public API on a host-memory device,
//! cycling workspaces the way frame pacing would. No GPU required.
//!
//! Run with: cargo test --test viewer_integration_tests


use nimbus_engine::glam::Vec3;
use nimbus_engine::nimbus::camera::{CameraMode, InputEvent};
use nimbus_engine::nimbus::culling::AABB;
use nimbus_engine::nimbus::frame::StreamKind;
use nimbus_engine::nimbus::math::Transform;
use nimbus_engine::nimbus::scene::{Channel, Driver, Interpolation, Mesh, MeshSlice, Node, Scene};
use nimbus_engine::nimbus::{RenderConfig, Viewer};
use winit::keyboard::KeyCode;
use gpu_test_utils::{as_host_buffer, create_test_renderer};

const EXTENT: [u32; 2] = [640, 480];

/// A row of `count` cubes along +X, the first one sliding along Z
fn cube_row(count: usize) -> Scene {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(Mesh {
        name: "cube".to_string(),
        vertices: MeshSlice::new(0, 36),
        material: None,
        bounds: AABB::new(Vec3::splat(-0.1), Vec3::splat(0.1)),
    });
    for i in 0..count {
        let node = scene.add_node(
            Node::new(format!("cube{}", i), Transform::from_position(Vec3::new(i as f32 * 0.01, 0.0, 0.0)))
                .with_mesh(mesh),
        );
        scene.add_root(node).unwrap();
    }
    scene.add_driver(Driver {
        name: "bob".to_string(),
        node: 0,
        channel: Channel::Translation,
        times: vec![0.0, 1.0],
        values: vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.5],
        interpolation: Interpolation::Linear,
    });
    scene
}

// ============================================================================
// Frame loop
// ============================================================================

#[test]
fn test_integration_frames_alternate_workspaces() {
    let config = RenderConfig::default();
    let (host, mut renderer, target) = create_test_renderer(config.clone(), 1);
    let mut viewer = Viewer::new(config).unwrap();
    let mut scene = cube_row(3);

    for frame_index in 0..6 {
        let frame = viewer.update(1.0 / 60.0, &mut scene, EXTENT);
        assert_eq!(frame.instances.len(), 3);
        renderer.record_and_submit(frame_index % renderer.workspace_count(), &target, &frame).unwrap();
    }

    let host = host.lock().unwrap();
    assert_eq!(host.submission_count(), 6);
    let commands = host.last_submission();
    let draws: Vec<&String> = commands.iter().filter(|c| c.starts_with("draw")).collect();
    assert_eq!(draws, vec!["draw 36 0 0", "draw 36 0 1", "draw 36 0 2"]);
}

#[test]
fn test_integration_growing_scene_grows_each_workspace_once() {
    let config = RenderConfig::default();
    let (host, mut renderer, target) = create_test_renderer(config.clone(), 1);
    let mut viewer = Viewer::new(RenderConfig { frustum_culling: false, ..config }).unwrap();

    let mut small = cube_row(2);
    let mut large = cube_row(64);
    for workspace in 0..2 {
        let frame = viewer.update(0.0, &mut small, EXTENT);
        renderer.record_and_submit(workspace, &target, &frame).unwrap();
    }
    let after_small = host.lock().unwrap().buffers_created;

    for frame_index in 0..4 {
        let frame = viewer.update(0.0, &mut large, EXTENT);
        renderer.record_and_submit(frame_index % 2, &target, &frame).unwrap();
    }

    // 64 * 192 bytes = 12288: one staging + device pair per workspace
    let host = host.lock().unwrap();
    assert_eq!(host.buffers_created - after_small, 4);
    assert_eq!(host.binding_updates, 2);
    for workspace in 0..2 {
        assert_eq!(renderer.workspace(workspace).unwrap().stream(StreamKind::Transforms).capacity(), 12_288);
    }
}

#[test]
fn test_integration_uploaded_time_and_transforms() {
    let config = RenderConfig { frustum_culling: false, ..RenderConfig::default() };
    let (_host, mut renderer, target) = create_test_renderer(config.clone(), 1);
    let mut viewer = Viewer::new(config).unwrap();
    let mut scene = cube_row(1);

    let frame = viewer.update(0.5, &mut scene, EXTENT);
    renderer.record_and_submit(0, &target, &frame).unwrap();

    // Driver moved the cube halfway up
    let workspace = renderer.workspace(0).unwrap();
    let device = workspace.stream(StreamKind::Transforms).device_buffer().unwrap();
    let bytes = as_host_buffer(device.as_ref()).bytes();
    let floats: Vec<f32> = bytes[..192]
        .chunks_exact(4)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    // world_from_local is the second matrix; its translation column starts at float 28
    assert!((floats[28 + 2] - 0.25).abs() < 1e-5);
}

#[test]
fn test_integration_debug_mode_streams_frustum_lines() {
    let config = RenderConfig::default();
    let (host, mut renderer, target) = create_test_renderer(config.clone(), 1);
    let mut viewer = Viewer::new(config).unwrap();
    let mut scene = cube_row(1);

    viewer.on_input(&InputEvent::KeyDown(KeyCode::Tab), EXTENT);
    viewer.on_input(&InputEvent::KeyDown(KeyCode::Tab), EXTENT);
    assert_eq!(viewer.rig().mode(), CameraMode::Debug);

    let frame = viewer.update(0.0, &mut scene, EXTENT);
    renderer.record_and_submit(0, &target, &frame).unwrap();

    let commands = host.lock().unwrap().last_submission();
    assert!(commands.contains(&"copy 384".to_string()));
    assert!(commands.contains(&"draw 24 0 0".to_string()));
}
