use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};
use winit::dpi::PhysicalPosition;
use winit::event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState};
use super::*;

const HEIGHT: f32 = 800.0;

fn press(position: Vec2, modifiers: ModifiersState) -> InputEvent {
    InputEvent::MouseButtonDown { button: MouseButton::Left, position, modifiers }
}

fn release(position: Vec2) -> InputEvent {
    InputEvent::MouseButtonUp { button: MouseButton::Left, position }
}

fn motion(x: f32, y: f32) -> InputEvent {
    InputEvent::MouseMotion { position: Vec2::new(x, y) }
}

fn changed(outcome: InputOutcome) -> OrbitCamera {
    match outcome {
        InputOutcome::CameraChanged(camera) => camera,
        other => panic!("expected CameraChanged, got {:?}", other),
    }
}

// ============================================================================
// Wheel
// ============================================================================

#[test]
fn test_wheel_zooms_by_ten_percent_per_notch() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    let zoomed_in = changed(controller.handle(&InputEvent::MouseWheel { delta_y: 1.0 }, &camera, HEIGHT));
    let zoomed_out = changed(controller.handle(&InputEvent::MouseWheel { delta_y: -1.0 }, &camera, HEIGHT));

    assert!((zoomed_in.radius - 2.0 / 1.1).abs() < 1e-5);
    assert!((zoomed_out.radius - 2.0 * 1.1).abs() < 1e-5);
    assert_eq!(*controller.mode(), InputMode::Idle);
}

#[test]
fn test_wheel_clamps_radius() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    let closest = changed(controller.handle(&InputEvent::MouseWheel { delta_y: 500.0 }, &camera, HEIGHT));
    let farthest = changed(controller.handle(&InputEvent::MouseWheel { delta_y: -500.0 }, &camera, HEIGHT));

    assert_eq!(closest.radius, 0.5 * camera.near);
    assert_eq!(farthest.radius, 2.0 * camera.far);
}

// ============================================================================
// Tumble
// ============================================================================

#[test]
fn test_tumble_follows_drag_from_start() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    assert_eq!(controller.handle(&press(Vec2::new(100.0, 100.0), ModifiersState::empty()), &camera, HEIGHT), InputOutcome::Consumed);
    assert!(matches!(controller.mode(), InputMode::Tumbling { .. }));

    // Half a viewport right, a quarter up
    let moved = changed(controller.handle(&motion(500.0, -100.0), &camera, HEIGHT));
    assert!((moved.azimuth - (-0.5 * PI)).abs() < 1e-5);
    assert!((moved.elevation - (camera.elevation - 0.25 * PI)).abs() < 1e-5);

    // Motion is measured from the drag origin, not accumulated
    let again = changed(controller.handle(&motion(500.0, -100.0), &moved, HEIGHT));
    assert_eq!(again, moved);
}

#[test]
fn test_tumble_flips_when_upside_down() {
    let mut controller = InputController::new();
    let camera = OrbitCamera { elevation: FRAC_PI_2 + 0.5, ..OrbitCamera::default() };

    controller.handle(&press(Vec2::ZERO, ModifiersState::empty()), &camera, HEIGHT);
    let moved = changed(controller.handle(&motion(0.25 * HEIGHT, 0.0), &camera, HEIGHT));

    assert!((moved.azimuth - 0.25 * PI).abs() < 1e-5);
}

#[test]
fn test_tumble_wraps_angles() {
    let mut controller = InputController::new();
    let camera = OrbitCamera { azimuth: 3.0, ..OrbitCamera::default() };

    controller.handle(&press(Vec2::ZERO, ModifiersState::empty()), &camera, HEIGHT);
    let moved = changed(controller.handle(&motion(-0.5 * HEIGHT, 0.0), &camera, HEIGHT));

    // 3.0 + pi/2 wraps below -pi/2
    assert!(moved.azimuth >= -PI && moved.azimuth <= PI);
    assert!((moved.azimuth - (3.0 + 0.5 * PI - 2.0 * PI)).abs() < 1e-5);
}

#[test]
fn test_release_returns_to_idle() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    controller.handle(&press(Vec2::ZERO, ModifiersState::empty()), &camera, HEIGHT);
    assert_eq!(controller.handle(&release(Vec2::ZERO), &camera, HEIGHT), InputOutcome::Consumed);
    assert_eq!(*controller.mode(), InputMode::Idle);
    assert_eq!(controller.handle(&motion(10.0, 10.0), &camera, HEIGHT), InputOutcome::Ignored);
}

#[test]
fn test_drag_swallows_other_events() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    controller.handle(&press(Vec2::ZERO, ModifiersState::empty()), &camera, HEIGHT);
    let wheel = controller.handle(&InputEvent::MouseWheel { delta_y: 1.0 }, &camera, HEIGHT);
    let right_up = controller.handle(
        &InputEvent::MouseButtonUp { button: MouseButton::Right, position: Vec2::ZERO }, &camera, HEIGHT);

    assert_eq!(wheel, InputOutcome::Consumed);
    assert_eq!(right_up, InputOutcome::Consumed);
    assert!(matches!(controller.mode(), InputMode::Tumbling { .. }));
}

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_shift_drag_pans_target_in_view_plane() {
    let mut controller = InputController::new();
    // Looking along -X from +X: camera right is +Y, up is +Z
    let camera = OrbitCamera { elevation: 0.0, radius: 5.0, ..OrbitCamera::default() };

    controller.handle(&press(Vec2::ZERO, ModifiersState::SHIFT), &camera, HEIGHT);
    assert!(matches!(controller.mode(), InputMode::Panning { .. }));

    let moved = changed(controller.handle(&motion(0.1 * HEIGHT, 0.0), &camera, HEIGHT));

    let image_height = 2.0 * (camera.vfov * 0.5).tan() * camera.radius;
    let expected = Vec3::new(0.0, -0.1 * image_height, 0.0);
    assert!((moved.target - expected).length() < 1e-5, "{:?}", moved.target);
    assert_eq!(moved.radius, camera.radius);

    // Dragging down moves the target up
    let moved = changed(controller.handle(&motion(0.0, 0.1 * HEIGHT), &camera, HEIGHT));
    assert!((moved.target - Vec3::new(0.0, 0.0, 0.1 * image_height)).length() < 1e-5);
}

#[test]
fn test_unrelated_events_are_ignored() {
    let mut controller = InputController::new();
    let camera = OrbitCamera::default();

    assert_eq!(controller.handle(&InputEvent::KeyDown(KeyCode::KeyA), &camera, HEIGHT), InputOutcome::Ignored);
    assert_eq!(
        controller.handle(&InputEvent::MouseButtonDown {
            button: MouseButton::Right,
            position: Vec2::ZERO,
            modifiers: ModifiersState::empty(),
        }, &camera, HEIGHT),
        InputOutcome::Ignored
    );
}

// ============================================================================
// EventTranslator
// ============================================================================

#[test]
fn test_translator_tracks_cursor_for_buttons() {
    let mut translator = EventTranslator::new();
    let device_id = DeviceId::dummy();

    let moved = translator.translate(&WindowEvent::CursorMoved {
        device_id,
        position: PhysicalPosition::new(12.0, 34.0),
    });
    assert_eq!(moved, Some(motion(12.0, 34.0)));

    let pressed = translator.translate(&WindowEvent::MouseInput {
        device_id,
        state: ElementState::Pressed,
        button: MouseButton::Left,
    });
    assert_eq!(pressed, Some(press(Vec2::new(12.0, 34.0), ModifiersState::empty())));
}

#[test]
fn test_translator_wheel_deltas() {
    let mut translator = EventTranslator::new();
    let device_id = DeviceId::dummy();

    let lines = translator.translate(&WindowEvent::MouseWheel {
        device_id,
        delta: MouseScrollDelta::LineDelta(0.0, 2.0),
        phase: TouchPhase::Moved,
    });
    let pixels = translator.translate(&WindowEvent::MouseWheel {
        device_id,
        delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)),
        phase: TouchPhase::Moved,
    });

    assert_eq!(lines, Some(InputEvent::MouseWheel { delta_y: 2.0 }));
    assert_eq!(pixels, Some(InputEvent::MouseWheel { delta_y: -2.0 }));
}
