/// Scene flattening: node hierarchy -> draw-ready instance list.
///
/// Runs every frame. The traversal is depth-first; each node's mesh is
/// emitted after its children, using the node's own world transform.
/// Culling is a separate post-filter over the flattened list.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::culling::{aabb_to_obb, intersects, CullingFrustum};
use crate::engine_trace;
use super::scene::{MeshSlice, Scene};

/// Per-instance transforms, laid out as the transforms storage buffer element
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformBundle {
    pub clip_from_local: Mat4,
    pub world_from_local: Mat4,
    /// Equal to `world_from_local`: exact for rigid and uniform-scale
    /// transforms only (non-uniform scale needs the inverse-transpose)
    pub world_from_local_normal: Mat4,
}

/// One drawable occurrence of a mesh for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectInstance {
    /// Index into `Scene::meshes`
    pub mesh: u32,
    pub vertices: MeshSlice,
    pub transform: TransformBundle,
    /// GPU texture index: material texture + 1, or 0 (fallback) without a material
    pub texture: u32,
}

/// Frustum and camera placement used by `cull_instances`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullVolume {
    pub frustum: CullingFrustum,
    pub view_from_world: Mat4,
}

enum Visit {
    Enter { node: u32, parent_world: Mat4 },
    Emit { node: u32, world: Mat4 },
}

/// Flatten the hierarchy below `roots` into one instance per mesh-bearing node
///
/// Each root starts from the identity transform. Indices that do not
/// resolve (node, mesh or material) are skipped.
///
/// # Arguments
///
/// * `scene` - Scene to traverse
/// * `roots` - Root node indices, traversed in order
/// * `clip_from_world` - Camera projection * view for this frame
pub fn flatten(scene: &Scene, roots: &[u32], clip_from_world: &Mat4) -> Vec<ObjectInstance> {
    let nodes = scene.nodes();
    let mut instances = Vec::new();
    let mut stack: Vec<Visit> = roots.iter().rev()
        .map(|&node| Visit::Enter { node, parent_world: Mat4::IDENTITY })
        .collect();

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter { node, parent_world } => {
                let Some(current) = nodes.get(node as usize) else {
                    continue;
                };
                let world = parent_world * current.transform.parent_from_local();
                stack.push(Visit::Emit { node, world });
                stack.extend(
                    current.children.iter().rev()
                        .map(|&child| Visit::Enter { node: child, parent_world: world }),
                );
            }
            Visit::Emit { node, world } => {
                if let Some(instance) = make_instance(scene, node, world, clip_from_world) {
                    instances.push(instance);
                }
            }
        }
    }

    engine_trace!("nimbus::Flatten", "{} instances from {} nodes", instances.len(), nodes.len());
    instances
}

fn make_instance(scene: &Scene, node: u32, world: Mat4, clip_from_world: &Mat4) -> Option<ObjectInstance> {
    let mesh_index = scene.nodes().get(node as usize)?.mesh?;
    let mesh = scene.meshes().get(mesh_index as usize)?;

    let texture = mesh.material
        .and_then(|material| scene.materials().get(material as usize))
        .map_or(0, |material| material.texture + 1);

    Some(ObjectInstance {
        mesh: mesh_index,
        vertices: mesh.vertices,
        transform: TransformBundle {
            clip_from_local: *clip_from_world * world,
            world_from_local: world,
            world_from_local_normal: world,
        },
        texture,
    })
}

/// Keep the instances whose mesh bounds intersect the frustum
///
/// Bounds are moved into view space (`view_from_world * world_from_local`)
/// and tested against the frustum's view-space corners. Meshes with empty
/// bounds are always kept.
pub fn cull_instances(instances: &[ObjectInstance], scene: &Scene, volume: &CullVolume) -> Vec<ObjectInstance> {
    let corners = volume.frustum.corners();
    let visible: Vec<ObjectInstance> = instances.iter()
        .filter(|instance| {
            let Some(mesh) = scene.meshes().get(instance.mesh as usize) else {
                return true;
            };
            if mesh.bounds.is_empty() {
                return true;
            }
            let view_from_local = volume.view_from_world * instance.transform.world_from_local;
            intersects(&corners, &aabb_to_obb(&view_from_local, &mesh.bounds))
        })
        .copied()
        .collect();

    engine_trace!("nimbus::Flatten", "culled {} of {} instances", instances.len() - visible.len(), instances.len());
    visible
}

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod tests;
