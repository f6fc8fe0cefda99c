/// Scene - arena of nodes, meshes, materials, cameras, lights and drivers.
///
/// Every cross-reference is a `u32` index into one of the scene's arrays;
/// nodes own no other nodes. The hierarchy is treated as a tree: cycles are
/// a caller error and are not detected.

use glam::{Mat4, Vec3};
use crate::culling::AABB;
use crate::error::Result;
use crate::engine_bail;
use crate::math::{infinite_perspective, perspective, Transform};
use super::animation::Driver;

// ============================================================================
// Scene data
// ============================================================================

/// Range of vertices inside the shared, load-time vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshSlice {
    /// Index of the first vertex
    pub first: u32,
    /// Number of vertices
    pub count: u32,
}

impl MeshSlice {
    pub fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }
}

/// Scene graph node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Local transform relative to the parent node
    pub transform: Transform,
    /// Child node indices, in draw order
    pub children: Vec<u32>,
    pub mesh: Option<u32>,
    pub camera: Option<u32>,
    pub light: Option<u32>,
}

impl Node {
    /// Create a node with no children and no attachments
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
            mesh: None,
            camera: None,
            light: None,
        }
    }

    pub fn with_mesh(mut self, mesh: u32) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_camera(mut self, camera: u32) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_light(mut self, light: u32) -> Self {
        self.light = Some(light);
        self
    }
}

/// Drawable geometry: a vertex slice, an optional material and local bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: MeshSlice,
    pub material: Option<u32>,
    /// Local-space bounds (EMPTY if unknown; such meshes are never culled)
    pub bounds: AABB,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Index into the scene's texture table
    pub texture: u32,
}

/// Perspective camera attached to a node
///
/// The camera looks down its node's local -Z axis with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    /// Width / height
    pub aspect: f32,
    /// Vertical field of view in radians
    pub vfov: f32,
    pub near: f32,
    /// Far plane distance; `<= 0` means infinite
    pub far: f32,
}

impl Camera {
    /// True if the far plane is at infinity
    pub fn is_infinite(&self) -> bool {
        self.far <= 0.0
    }

    /// Projection matrix, using the infinite variant when `far <= 0`
    pub fn clip_from_view(&self) -> Mat4 {
        if self.is_infinite() {
            infinite_perspective(self.vfov, self.aspect, self.near)
        } else {
            perspective(self.vfov, self.aspect, self.near, self.far)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    /// Linear RGB colour
    pub tint: Vec3,
    pub strength: f32,
}

/// A camera placed in the world by the node hierarchy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInstance {
    /// Index into `Scene::cameras`
    pub camera: u32,
    /// Node carrying the camera
    pub node: u32,
    /// World transform of that node
    pub world_from_view: Mat4,
    /// Inverse chain of that node; zero scale components invert to zero
    pub view_from_world: Mat4,
}

// ============================================================================
// Scene
// ============================================================================

/// A complete scene description
///
/// Populated once before the first frame. Between frames only node
/// transforms change (through animation drivers or direct `node_mut` edits).
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    cameras: Vec<Camera>,
    lights: Vec<Light>,
    drivers: Vec<Driver>,
    roots: Vec<u32>,
    texture_count: u32,
    requested_camera: Option<u32>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    // ===== BUILDERS =====

    /// Add a node (not yet attached to any parent) and return its index
    pub fn add_node(&mut self, node: Node) -> u32 {
        self.nodes.push(node);
        (self.nodes.len() - 1) as u32
    }

    /// Append `child` to `parent`'s children
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range or `child == parent`.
    pub fn add_child(&mut self, parent: u32, child: u32) -> Result<()> {
        self.check_node(child)?;
        if parent == child {
            engine_bail!("nimbus::Scene", "Node {} cannot be its own child", parent);
        }
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Mark a node as a root of the hierarchy
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    pub fn add_root(&mut self, node: u32) -> Result<()> {
        self.check_node(node)?;
        self.roots.push(node);
        Ok(())
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> u32 {
        self.meshes.push(mesh);
        (self.meshes.len() - 1) as u32
    }

    pub fn add_material(&mut self, material: Material) -> u32 {
        self.texture_count = self.texture_count.max(material.texture + 1);
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    pub fn add_camera(&mut self, camera: Camera) -> u32 {
        self.cameras.push(camera);
        (self.cameras.len() - 1) as u32
    }

    pub fn add_light(&mut self, light: Light) -> u32 {
        self.lights.push(light);
        (self.lights.len() - 1) as u32
    }

    pub fn add_driver(&mut self, driver: Driver) -> u32 {
        self.drivers.push(driver);
        (self.drivers.len() - 1) as u32
    }

    /// Declare the size of the texture table (never below what materials reference)
    pub fn set_texture_count(&mut self, count: u32) {
        self.texture_count = self.texture_count.max(count);
    }

    /// Camera to render from in scene-camera mode (index into `cameras`)
    pub fn set_requested_camera(&mut self, camera: Option<u32>) {
        self.requested_camera = camera;
    }

    // ===== ACCESSORS =====

    /// Get a node by index
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    pub fn node(&self, index: u32) -> Result<&Node> {
        match self.nodes.get(index as usize) {
            Some(node) => Ok(node),
            None => engine_bail!("nimbus::Scene", "Node index {} out of range ({} nodes)", index, self.nodes.len()),
        }
    }

    /// Get a mutable node by index
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    pub fn node_mut(&mut self, index: u32) -> Result<&mut Node> {
        let count = self.nodes.len();
        match self.nodes.get_mut(index as usize) {
            Some(node) => Ok(node),
            None => engine_bail!("nimbus::Scene", "Node index {} out of range ({} nodes)", index, count),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Number of scene textures (texture index 0 on the GPU is the fallback)
    pub fn texture_count(&self) -> u32 {
        self.texture_count
    }

    pub fn requested_camera(&self) -> Option<u32> {
        self.requested_camera
    }

    /// Split borrow used by the animation pass
    pub(crate) fn drivers_and_nodes_mut(&mut self) -> (&[Driver], &mut [Node]) {
        (&self.drivers, &mut self.nodes)
    }

    // ===== CAMERAS =====

    /// Every camera-bearing node with its world transform, in traversal order
    pub fn camera_instances(&self) -> Vec<CameraInstance> {
        let mut instances = Vec::new();
        let mut stack: Vec<(u32, Mat4, Mat4)> = self.roots.iter().rev()
            .map(|&root| (root, Mat4::IDENTITY, Mat4::IDENTITY))
            .collect();

        while let Some((index, parent_world, parent_local)) = stack.pop() {
            let Some(node) = self.nodes.get(index as usize) else {
                continue;
            };
            let world = parent_world * node.transform.parent_from_local();
            let local = node.transform.local_from_parent() * parent_local;
            if let Some(camera) = node.camera {
                instances.push(CameraInstance {
                    camera,
                    node: index,
                    world_from_view: world,
                    view_from_world: local,
                });
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, world, local)));
        }
        instances
    }

    /// The requested camera if it is placed in the hierarchy, otherwise the first one
    pub fn active_camera(&self) -> Option<(CameraInstance, &Camera)> {
        let instances = self.camera_instances();
        let chosen = self.requested_camera
            .and_then(|requested| instances.iter().find(|i| i.camera == requested))
            .or_else(|| instances.first())
            .copied()?;
        self.cameras.get(chosen.camera as usize).map(|camera| (chosen, camera))
    }

    fn check_node(&self, index: u32) -> Result<()> {
        self.node(index).map(|_| ())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
