/// Viewer - drives the per-frame CPU work and produces a `FrameContext`
///
/// Owns everything that used to be implicit per-frame state: the clock,
/// the camera rig and the input controller. `update` runs animation,
/// camera selection, flattening and culling in that order.

use winit::keyboard::KeyCode;
use crate::camera::{CameraMode, CameraRig, InputController, InputEvent, InputMode, InputOutcome};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::frame::{push_frustum_lines, FrameContext, WorldUniforms, FRUSTUM_COLOR};
use crate::scene::{animate, cull_instances, flatten, CullVolume, Scene};
use crate::engine_trace;

pub struct Viewer {
    config: RenderConfig,
    time: f32,
    rig: CameraRig,
    controller: InputController,
    world: WorldUniforms,
}

impl Viewer {
    /// # Errors
    ///
    /// Returns `Error::InitializationFailed` for an invalid configuration.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            time: 0.0,
            rig: CameraRig::new(),
            controller: InputController::new(),
            world: WorldUniforms::default(),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Animation time in seconds, in `[0, time_wrap)`
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn input_mode(&self) -> &InputMode {
        self.controller.mode()
    }

    pub fn world(&self) -> &WorldUniforms {
        &self.world
    }

    pub fn set_world(&mut self, world: WorldUniforms) {
        self.world = world;
    }

    /// Advance the clock and compute the next frame
    ///
    /// # Arguments
    ///
    /// * `dt` - Seconds since the previous update (negative values count as 0)
    /// * `scene` - Scene; animated node transforms are written in place
    /// * `extent` - Target size in pixels, for the aspect ratio
    pub fn update(&mut self, dt: f32, scene: &mut Scene, extent: [u32; 2]) -> FrameContext {
        self.time = (self.time + dt.max(0.0)) % self.config.time_wrap;
        animate(scene, self.time);

        let aspect = aspect_ratio(extent);
        let render = self.rig.render_view(scene, self.time, aspect);

        let mut frame = FrameContext::new(self.time, render.clip_from_world);
        frame.world = self.world;
        frame.instances = flatten(scene, scene.roots(), &render.clip_from_world);
        let flattened = frame.instances.len();

        if self.config.frustum_culling || self.rig.mode() == CameraMode::Debug {
            let cull = self.rig.culling_view(scene, self.time, aspect);
            if self.config.frustum_culling {
                let volume = CullVolume { frustum: cull.frustum, view_from_world: cull.view_from_world };
                frame.instances = cull_instances(&frame.instances, scene, &volume);
            }
            if self.rig.mode() == CameraMode::Debug {
                push_frustum_lines(&mut frame.line_vertices, &cull.world_corners(), FRUSTUM_COLOR);
            }
        }

        engine_trace!("nimbus::Viewer", "t={:.3}s: {} instances ({} culled), {} line vertices",
            self.time, frame.instances.len(), flattened - frame.instances.len(), frame.line_vertices.len());
        frame
    }

    /// Route an input event
    ///
    /// Tab cycles the camera mode (when no drag is in progress); everything
    /// else goes to the input controller for the camera the current mode
    /// controls. Scene mode controls no camera and ignores the rest.
    pub fn on_input(&mut self, event: &InputEvent, extent: [u32; 2]) -> InputOutcome {
        if *event == InputEvent::KeyDown(KeyCode::Tab) && *self.controller.mode() == InputMode::Idle {
            self.rig.cycle_mode();
            return InputOutcome::Consumed;
        }

        let Some(camera) = self.rig.controlled_camera().copied() else {
            return InputOutcome::Ignored;
        };
        let outcome = self.controller.handle(event, &camera, extent[1] as f32);
        if let (InputOutcome::CameraChanged(updated), Some(controlled)) = (outcome, self.rig.controlled_camera_mut()) {
            *controlled = updated;
        }
        outcome
    }
}

fn aspect_ratio(extent: [u32; 2]) -> f32 {
    if extent[1] == 0 {
        1.0
    } else {
        extent[0] as f32 / extent[1] as f32
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
