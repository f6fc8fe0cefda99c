/// CameraRig - selects the camera used to render and the camera used to cull.
///
/// Three modes, cycled in order:
/// - `Scene`: the scene's active camera, or a built-in camera circling the origin
/// - `User`: the user orbit camera
/// - `Debug`: a second orbit camera that renders while culling keeps using
///   the last `Scene`/`User` camera, so the culling frustum can be inspected

use glam::{Mat4, Vec3};
use crate::culling::{make_frustum, CullingFrustum};
use crate::engine_debug;
use crate::math::{look_at, perspective};
use crate::scene::Scene;
use super::orbit_camera::OrbitCamera;

/// Culling far distance used for scene cameras with an infinite far plane
pub const INFINITE_CULL_DISTANCE: f32 = 10_000.0;

/// Seconds for the built-in scene camera to circle the origin 10 times
const CIRCLE_PERIOD: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Scene,
    User,
    Debug,
}

impl CameraMode {
    /// Scene -> User -> Debug -> Scene
    pub fn next(self) -> Self {
        match self {
            CameraMode::Scene => CameraMode::User,
            CameraMode::User => CameraMode::Debug,
            CameraMode::Debug => CameraMode::Scene,
        }
    }
}

/// Matrices and culling frustum derived from one camera for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub clip_from_world: Mat4,
    pub view_from_world: Mat4,
    /// Camera pose; not recomputed from `view_from_world`, which may be singular
    pub world_from_view: Mat4,
    pub frustum: CullingFrustum,
}

impl CameraView {
    /// View of a rigid camera pose (orbit and look-at cameras)
    fn new(clip_from_view: Mat4, view_from_world: Mat4, frustum: CullingFrustum) -> Self {
        Self::with_pose(clip_from_view, view_from_world, view_from_world.inverse(), frustum)
    }

    fn with_pose(clip_from_view: Mat4, view_from_world: Mat4, world_from_view: Mat4, frustum: CullingFrustum) -> Self {
        Self {
            clip_from_world: clip_from_view * view_from_world,
            view_from_world,
            world_from_view,
            frustum,
        }
    }

    /// Frustum corners in world space
    pub fn world_corners(&self) -> [Vec3; 8] {
        self.frustum.corners_in(&self.world_from_view)
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    culling_mode: CameraMode,
    user: OrbitCamera,
    debug: OrbitCamera,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// Start in `Scene` mode with default orbit cameras
    pub fn new() -> Self {
        Self {
            mode: CameraMode::Scene,
            culling_mode: CameraMode::Scene,
            user: OrbitCamera::default(),
            debug: OrbitCamera { radius: 10.0, ..OrbitCamera::default() },
        }
    }

    // ===== MODES =====

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Mode whose camera culls (never `Debug`)
    pub fn culling_mode(&self) -> CameraMode {
        self.culling_mode
    }

    /// Advance to the next mode and return it
    pub fn cycle_mode(&mut self) -> CameraMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
        if mode != CameraMode::Debug {
            self.culling_mode = mode;
        }
        engine_debug!("nimbus::CameraRig", "Camera mode {:?} (culling with {:?})", self.mode, self.culling_mode);
    }

    // ===== CAMERAS =====

    pub fn user_camera(&self) -> &OrbitCamera {
        &self.user
    }

    pub fn debug_camera(&self) -> &OrbitCamera {
        &self.debug
    }

    /// Orbit camera driven by input in the current mode (none in `Scene` mode)
    pub fn controlled_camera(&self) -> Option<&OrbitCamera> {
        match self.mode {
            CameraMode::Scene => None,
            CameraMode::User => Some(&self.user),
            CameraMode::Debug => Some(&self.debug),
        }
    }

    pub fn controlled_camera_mut(&mut self) -> Option<&mut OrbitCamera> {
        match self.mode {
            CameraMode::Scene => None,
            CameraMode::User => Some(&mut self.user),
            CameraMode::Debug => Some(&mut self.debug),
        }
    }

    // ===== VIEWS =====

    /// Camera the frame is rendered from
    pub fn render_view(&self, scene: &Scene, time: f32, aspect: f32) -> CameraView {
        self.view_for(self.mode, scene, time, aspect)
    }

    /// Camera instances are culled against
    pub fn culling_view(&self, scene: &Scene, time: f32, aspect: f32) -> CameraView {
        self.view_for(self.culling_mode, scene, time, aspect)
    }

    fn view_for(&self, mode: CameraMode, scene: &Scene, time: f32, aspect: f32) -> CameraView {
        match mode {
            CameraMode::Scene => scene_view(scene, time, aspect),
            CameraMode::User => orbit_view(&self.user, aspect),
            CameraMode::Debug => orbit_view(&self.debug, aspect),
        }
    }
}

fn orbit_view(camera: &OrbitCamera, aspect: f32) -> CameraView {
    CameraView::new(camera.clip_from_view(aspect), camera.view_from_world(), camera.frustum(aspect))
}

/// Scene camera if one is placed, else the built-in circling camera
fn scene_view(scene: &Scene, time: f32, aspect: f32) -> CameraView {
    if let Some((instance, camera)) = scene.active_camera() {
        let far = if camera.is_infinite() { INFINITE_CULL_DISTANCE } else { camera.far };
        return CameraView::with_pose(
            camera.clip_from_view(),
            instance.view_from_world,
            instance.world_from_view,
            make_frustum(camera.vfov, camera.aspect, camera.near, far),
        );
    }
    circling_view(time, aspect)
}

/// Built-in camera: 10 turns around the origin per minute, looking at (0, 0, 0.5)
pub fn circling_view(time: f32, aspect: f32) -> CameraView {
    let (vfov, near, far) = (60.0_f32.to_radians(), 0.1, 1000.0);
    let angle = std::f32::consts::TAU * 10.0 * (time / CIRCLE_PERIOD);
    let eye = Vec3::new(3.0 * angle.cos(), 3.0 * angle.sin(), 1.0);
    CameraView::new(
        perspective(vfov, aspect, near, far),
        look_at(eye, Vec3::new(0.0, 0.0, 0.5), Vec3::Z),
        make_frustum(vfov, aspect, near, far),
    )
}

#[cfg(test)]
#[path = "camera_rig_tests.rs"]
mod tests;
