/// Orbit camera input: an explicit `Idle | Panning | Tumbling` state machine.
///
/// The controller never mutates a camera. It receives the current camera
/// and returns the updated one in `InputOutcome::CameraChanged`; the owner
/// decides which camera that applies to.

use glam::{Vec2, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use super::orbit_camera::OrbitCamera;

/// Wheel zoom factor per notch
const ZOOM_STEP: f32 = 1.1;

/// Tumble rotation (radians) for a drag of one viewport height
const TUMBLE_SPEED: f32 = std::f32::consts::PI;

/// Pixel scroll deltas are converted to wheel notches with this divisor
const PIXELS_PER_LINE: f32 = 20.0;

// ============================================================================
// Events
// ============================================================================

/// Windowing-independent input event, positions in pixels (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    MouseButtonDown {
        button: MouseButton,
        position: Vec2,
        modifiers: ModifiersState,
    },
    MouseButtonUp {
        button: MouseButton,
        position: Vec2,
    },
    MouseMotion {
        position: Vec2,
    },
    /// Positive `delta_y` scrolls away from the user (zooms in)
    MouseWheel {
        delta_y: f32,
    },
}

/// Turns winit window events into `InputEvent`s
///
/// Tracks the cursor position and modifier keys, which winit reports as
/// separate events.
#[derive(Debug, Clone, Default)]
pub struct EventTranslator {
    cursor: Vec2,
    modifiers: ModifiersState,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event, or `None` if it carries no camera input
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::MouseMotion { position: self.cursor })
            }
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => InputEvent::MouseButtonDown {
                    button: *button,
                    position: self.cursor,
                    modifiers: self.modifiers,
                },
                ElementState::Released => InputEvent::MouseButtonUp {
                    button: *button,
                    position: self.cursor,
                },
            }),
            WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel {
                delta_y: match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                },
            }),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(code) => Some(InputEvent::KeyDown(code)),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            _ => None,
        }
    }
}

// ============================================================================
// State machine
// ============================================================================

/// Current drag, with the cursor position and camera at its start
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Idle,
    Panning { origin: Vec2, start: OrbitCamera },
    Tumbling { origin: Vec2, start: OrbitCamera },
}

/// Result of feeding one event to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// The event is not a camera control
    Ignored,
    /// The event was used but the camera is unchanged
    Consumed,
    /// The camera must be replaced by this one
    CameraChanged(OrbitCamera),
}

#[derive(Debug, Clone, Copy)]
pub struct InputController {
    mode: InputMode,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self { mode: InputMode::Idle }
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    /// Drop any drag in progress
    pub fn cancel(&mut self) {
        self.mode = InputMode::Idle;
    }

    /// Feed one event
    ///
    /// # Arguments
    ///
    /// * `event` - Input event
    /// * `camera` - Camera currently under control
    /// * `viewport_height` - Height in pixels; drags are normalised by it
    pub fn handle(&mut self, event: &InputEvent, camera: &OrbitCamera, viewport_height: f32) -> InputOutcome {
        let height = viewport_height.max(1.0);

        match (self.mode, *event) {
            (InputMode::Panning { .. } | InputMode::Tumbling { .. },
             InputEvent::MouseButtonUp { button: MouseButton::Left, .. }) => {
                self.mode = InputMode::Idle;
                InputOutcome::Consumed
            }
            (InputMode::Panning { origin, start }, InputEvent::MouseMotion { position }) => {
                InputOutcome::CameraChanged(pan(&start, drag_delta(origin, position, height)))
            }
            (InputMode::Tumbling { origin, start }, InputEvent::MouseMotion { position }) => {
                InputOutcome::CameraChanged(tumble(&start, drag_delta(origin, position, height)))
            }
            (InputMode::Panning { .. } | InputMode::Tumbling { .. }, _) => InputOutcome::Consumed,
            (InputMode::Idle, InputEvent::MouseWheel { delta_y }) => {
                InputOutcome::CameraChanged(zoom(camera, delta_y))
            }
            (InputMode::Idle, InputEvent::MouseButtonDown { button: MouseButton::Left, position, modifiers }) => {
                self.mode = if modifiers.shift_key() {
                    InputMode::Panning { origin: position, start: *camera }
                } else {
                    InputMode::Tumbling { origin: position, start: *camera }
                };
                InputOutcome::Consumed
            }
            (InputMode::Idle, _) => InputOutcome::Ignored,
        }
    }
}

/// Cursor motion since the drag started, in viewport heights, y up
fn drag_delta(origin: Vec2, position: Vec2, height: f32) -> Vec2 {
    let d = (position - origin) / height;
    Vec2::new(d.x, -d.y)
}

fn zoom(camera: &OrbitCamera, delta_y: f32) -> OrbitCamera {
    let radius = camera.radius * (ZOOM_STEP.ln() * -delta_y).exp();
    OrbitCamera {
        radius: radius.max(0.5 * camera.near).min(2.0 * camera.far),
        ..*camera
    }
}

/// Move the target in the view plane so the point under the cursor follows it
fn pan(start: &OrbitCamera, delta: Vec2) -> OrbitCamera {
    let image_height = 2.0 * (start.vfov * 0.5).tan() * start.radius;
    let d = delta * image_height;
    let view = start.view_from_world();
    let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
    let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
    OrbitCamera {
        target: start.target - d.x * right - d.y * up,
        ..*start
    }
}

fn tumble(start: &OrbitCamera, delta: Vec2) -> OrbitCamera {
    // Upside down: horizontal drags turn the other way
    let flip = if start.elevation.abs() > std::f32::consts::FRAC_PI_2 { -1.0 } else { 1.0 };
    OrbitCamera {
        azimuth: wrap_angle(start.azimuth - delta.x * TUMBLE_SPEED * flip),
        elevation: wrap_angle(start.elevation - delta.y * TUMBLE_SPEED),
        ..*start
    }
}

/// Reduce an angle to [-pi, pi]
fn wrap_angle(angle: f32) -> f32 {
    let two_pi = std::f32::consts::TAU;
    angle - (angle / two_pi).round() * two_pi
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
