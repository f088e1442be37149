/// Per-object light culling.
///
/// For every visible node, the active lights that can reach it, stored as a
/// CSR table: `offsets[i]..offsets[i + 1]` is node `i`'s run in `indices`.

use glam::{Mat4, Vec3};
use crate::culling::{is_aabb_in_planes, VisibleNode, ALL_PLANES};
use crate::math::{AABB, Sphere};
use crate::scene::RendererFlags;
use crate::settings::LightmapMode;
use super::active_lights::{ActiveLight, ActiveLights};
use super::light::{LightType, LightmappingMode};

/// Compressed sparse row table of light indices per object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLightIndices {
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl Default for ObjectLightIndices {
    fn default() -> Self {
        Self { offsets: vec![0], indices: Vec::new() }
    }
}

impl ObjectLightIndices {
    pub fn with_capacity(objects: usize, indices: usize) -> Self {
        let mut offsets = Vec::with_capacity(objects + 1);
        offsets.push(0);
        Self { offsets, indices: Vec::with_capacity(indices) }
    }

    /// Append one object's light run.
    pub fn push_object(&mut self, lights: impl IntoIterator<Item = usize>) {
        self.indices.extend(lights);
        self.offsets.push(self.indices.len());
    }

    pub fn object_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn lights_for(&self, object: usize) -> &[usize] {
        match (self.offsets.get(object), self.offsets.get(object + 1)) {
            (Some(&start), Some(&end)) => &self.indices[start..end],
            _ => &[],
        }
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Offsets start at 0, never decrease and end at `indices.len()`.
    pub fn is_consistent(&self) -> bool {
        self.offsets.first() == Some(&0)
            && self.offsets.windows(2).all(|w| w[0] <= w[1])
            && self.offsets.last() == Some(&self.indices.len())
    }
}

/// Rules shared by every light type: layer mask and lightmap exclusion.
pub fn is_light_culled_by_common_rules(
    light: &ActiveLight,
    layer: u32,
    flags: RendererFlags,
    lightmap_mode: LightmapMode,
) -> bool {
    let layer_bit = 1_u32.checked_shl(layer).unwrap_or(0);
    if light.culling_mask & layer_bit == 0 {
        return true;
    }
    if flags.contains(RendererFlags::LIGHTMAPPED) {
        match light.lightmapping {
            LightmappingMode::BakedOnly => return true,
            LightmappingMode::Auto if lightmap_mode == LightmapMode::Single => return true,
            _ => {}
        }
    }
    false
}

/// Spot cone frustum against the node's local box.
fn spot_reaches_node(light: &ActiveLight, local_aabb: &AABB, node_to_world: &Mat4) -> bool {
    let planes = light.light.spot_planes_for_node(light.light.spot_near(), node_to_world);
    is_aabb_in_planes(local_aabb, &planes, ALL_PLANES)
}

/// Point light sphere moved into node space against the node's local box.
///
/// The local radius uses the largest inverse axis scale.
fn point_reaches_node(light: &ActiveLight, local_aabb: &AABB, node_to_world: &Mat4) -> bool {
    let scale = Vec3::new(
        node_to_world.x_axis.truncate().length(),
        node_to_world.y_axis.truncate().length(),
        node_to_world.z_axis.truncate().length(),
    );
    let min_scale = scale.min_element();
    if min_scale <= f32::EPSILON {
        return true;
    }
    let sphere = light.bounding_sphere;
    let local_center = node_to_world.inverse().transform_point3(sphere.center);
    Sphere::new(local_center, sphere.radius / min_scale).intersects_aabb(local_aabb)
}

/// Whether an active light reaches a visible node.
pub fn light_affects_node(light: &ActiveLight, node: &VisibleNode, lightmap_mode: LightmapMode) -> bool {
    if is_light_culled_by_common_rules(light, node.layer, node.flags, lightmap_mode) {
        return false;
    }
    let transform = &node.transform;
    match light.light_type {
        LightType::Directional => true,
        LightType::Spot => {
            light.bounding_box.intersects(&transform.world_aabb)
                && spot_reaches_node(light, &transform.local_aabb, &transform.world_matrix)
        }
        LightType::Point => {
            light.bounding_box.intersects(&transform.world_aabb)
                && point_reaches_node(light, &transform.local_aabb, &transform.world_matrix)
        }
    }
}

/// Build the per-object light table, visiting the active-light buckets in
/// storage order.
pub fn cull_per_object_lights(
    active: &ActiveLights,
    nodes: &[VisibleNode],
    lightmap_mode: LightmapMode,
) -> ObjectLightIndices {
    let mut table = ObjectLightIndices::with_capacity(nodes.len(), nodes.len() * 4);
    for node in nodes {
        let lights = active.buckets().into_iter().flatten().filter(|&index| {
            light_affects_node(&active.lights[index], node, lightmap_mode)
        });
        table.push_object(lights);
    }
    debug_assert!(table.is_consistent());
    table
}

#[cfg(test)]
#[path = "per_object_lights_tests.rs"]
mod tests;
