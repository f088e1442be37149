/// Shadow caster culling for one light.
///
/// Three stages:
/// - coarse: caster planes against every renderer group (static casters may
///   come from the occlusion oracle instead)
/// - detail: per light type tests (point cube faces, spot cone, common
///   layer and lightmap filters)
/// - parts: one entry per material slot carrying a shadow caster subshader

use std::ops::Range;
use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::culling::{
    frustum_cull, is_aabb_in_planes, is_node_visible, FrameArena,
    FrameContext, IndexList, NodeCullParameters, OcclusionBuffer, ALL_PLANES,
};
use crate::engine_trace;
use crate::lighting::{ActiveLight, LightType, LightmappingMode};
use crate::math::{AABB, Plane};
use crate::scene::{LodData, Renderable, RendererFlags, RendererGroup, RENDERER_GROUP_COUNT};
use crate::settings::LightmapMode;
use super::shadow_cull_data::ShadowCullData;

/// Cube map faces of a point light, in +X, -X, +Y, -Y, +Z, -Z order.
pub const CUBE_FACE_COUNT: usize = 6;

/// All cube faces visible
pub const ALL_CUBE_FACES: u32 = (1 << CUBE_FACE_COUNT) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowCasterPart {
    pub submesh_index: u32,
    pub material_id: u32,
    pub shader_id: u32,
    pub subshader_index: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCasterData {
    pub group: RendererGroup,
    pub node_index: usize,
    pub world_aabb: AABB,
    /// Cube faces for point lights, cascades for directional lights, 1 for spots
    pub visible_mask: u32,
    /// Range into `ShadowCasters::parts`
    pub parts: Range<usize>,
}

/// Casters of one light, with their parts stored contiguously.
#[derive(Debug, Clone, Default)]
pub struct ShadowCasters {
    pub casters: Vec<ShadowCasterData>,
    pub parts: Vec<ShadowCasterPart>,
}

impl ShadowCasters {
    pub fn len(&self) -> usize {
        self.casters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.casters.is_empty()
    }

    pub fn parts_of(&self, caster: &ShadowCasterData) -> &[ShadowCasterPart] {
        self.parts.get(caster.parts.clone()).unwrap_or(&[])
    }

    /// Union of the caster bounds
    pub fn bounds(&self) -> Option<AABB> {
        let mut iter = self.casters.iter().map(|c| c.world_aabb);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, aabb| acc.union(&aabb)))
    }

    /// Casters visible in a cube face or cascade.
    pub fn in_mask(&self, bit: usize) -> impl Iterator<Item = &ShadowCasterData> + '_ {
        let flag = 1_u32.checked_shl(bit as u32).unwrap_or(0);
        self.casters.iter().filter(move |c| c.visible_mask & flag != 0)
    }
}

// ===== COARSE CULL =====

/// Cull every group against the caster planes and apply the camera's node
/// filter (layer mask, LOD). Static casters come from the oracle when it
/// can answer.
pub fn cull_shadow_caster_candidates(
    ctx: &FrameContext,
    caster_planes: &[Plane],
    occlusion_buffer: Option<&OcclusionBuffer>,
    lod: &LodData,
    arena: &mut FrameArena,
) -> [IndexList; RENDERER_GROUP_COUNT] {
    let params = NodeCullParameters { layer_cull_distances: None, ..NodeCullParameters::from_camera(ctx.camera, lod) };
    RendererGroup::ALL.map(|group| {
        let array = ctx.scene.group(group);
        let mut list = arena.acquire(array.len());
        let from_oracle = match (group, ctx.occlusion, occlusion_buffer) {
            (RendererGroup::Static, Some(occlusion), Some(buffer)) => {
                occlusion.oracle().query_shadow_casters(buffer, caster_planes, array.bounds())
            }
            _ => None,
        };
        match from_oracle {
            Some(indices) => {
                list.assign(indices.as_slice());
                list.retain(|i| i < array.len());
            }
            None => frustum_cull(array.bounds(), caster_planes, ALL_PLANES, &mut list),
        }
        list.retain(|i| is_node_visible(array.node(i), array.aabb(i), &params));
        list
    })
}

// ===== DETAIL CULL =====

/// Frustum side planes (through the origin) of cube face `face`.
fn cube_face_planes(face: usize, origin: Vec3) -> [Plane; 4] {
    let axis = face / 2;
    let sign = if face % 2 == 0 { 1.0 } else { -1.0 };
    let mut major = Vec3::ZERO;
    major[axis] = sign;
    let mut planes = [Plane::new(Vec3::ZERO, 0.0); 4];
    let mut k = 0;
    for other in (0..3).filter(|&a| a != axis) {
        for side in [1.0, -1.0] {
            let mut minor = Vec3::ZERO;
            minor[other] = side;
            let normal = (major + minor).normalize();
            planes[k] = Plane::from_normal_and_point(normal, origin);
            k += 1;
        }
    }
    planes
}

/// Bitmask of the point light cube faces an AABB touches.
pub fn cube_face_mask(light_position: Vec3, aabb: &AABB) -> u32 {
    (0..CUBE_FACE_COUNT)
        .filter(|&face| is_aabb_in_planes(aabb, &cube_face_planes(face, light_position), ALL_PLANES))
        .fold(0, |mask, face| mask | (1 << face))
}

/// Layer mask and lightmap exclusion of a caster for a light.
fn is_caster_excluded(light: &ActiveLight, layer: u32, flags: RendererFlags, lightmap_mode: LightmapMode) -> bool {
    if !flags.contains(RendererFlags::CAST_SHADOWS) {
        return true;
    }
    let layer_bit = 1_u32.checked_shl(layer).unwrap_or(0);
    if light.culling_mask & layer_bit == 0 {
        return true;
    }
    // Shadows of lightmapped casters are baked for auto lights
    flags.contains(RendererFlags::LIGHTMAPPED)
        && lightmap_mode == LightmapMode::Single
        && light.lightmapping == LightmappingMode::Auto
}

/// Per light type caster tests. Returns the visible mask, None when culled.
fn caster_visible_mask(light: &ActiveLight, world_aabb: &AABB, local_aabb: &AABB, world_matrix: &Mat4) -> Option<u32> {
    match light.light_type {
        LightType::Directional => Some(u32::MAX),
        LightType::Point => {
            if !light.bounding_sphere.intersects_aabb(world_aabb) {
                return None;
            }
            let mask = cube_face_mask(light.light.position, world_aabb);
            (mask != 0).then_some(mask)
        }
        LightType::Spot => {
            let near = light.light.shadow_near_plane;
            let world_planes = Frustum::from_view_projection(&light.light.spot_frustum_matrix(near)).planes;
            if !light.bounding_box.intersects(world_aabb) || !is_aabb_in_planes(world_aabb, &world_planes, ALL_PLANES) {
                return None;
            }
            let planes = light.light.spot_planes_for_node(near, world_matrix);
            is_aabb_in_planes(local_aabb, &planes, ALL_PLANES).then_some(1)
        }
    }
}

/// Detail culling and part generation for the coarse candidates of one light.
pub fn cull_shadow_casters(
    ctx: &FrameContext,
    data: &ShadowCullData,
    light: &ActiveLight,
    candidates: &[IndexList; RENDERER_GROUP_COUNT],
) -> ShadowCasters {
    let lightmap_mode = ctx.settings.lightmap_mode;
    let mut casters = ShadowCasters::default();
    for group in RendererGroup::ALL {
        let array = ctx.scene.group(group);
        for node_index in candidates[group.index()].iter() {
            let node = array.node(node_index);
            let Some(renderer) = node.renderer() else { continue };
            let world_aabb = *array.aabb(node_index);
            if is_caster_excluded(light, node.layer, renderer.flags(), lightmap_mode)
                || data.is_beyond_layer_distance(node.layer, &world_aabb)
            {
                continue;
            }
            let Some(visible_mask) =
                caster_visible_mask(light, &world_aabb, &renderer.local_aabb(), &renderer.world_matrix())
            else {
                continue;
            };

            let start = casters.parts.len();
            generate_shadow_caster_parts(renderer.as_ref(), &mut casters.parts);
            if casters.parts.len() == start {
                continue;
            }
            casters.casters.push(ShadowCasterData {
                group,
                node_index,
                world_aabb,
                visible_mask,
                parts: start..casters.parts.len(),
            });
        }
    }
    engine_trace!("galaxy3d::ShadowCuller",
        "{:?} light: {} casters, {} parts", light.light_type, casters.casters.len(), casters.parts.len());
    casters
}

/// Append one part per material slot with a shadow caster subshader.
pub fn generate_shadow_caster_parts(renderer: &dyn Renderable, parts: &mut Vec<ShadowCasterPart>) {
    for slot in 0..renderer.material_count() {
        let Some(material) = renderer.material(slot) else { continue };
        if let Some(subshader_index) = material.shadow_caster_subshader {
            parts.push(ShadowCasterPart {
                submesh_index: slot as u32,
                material_id: material.material_id,
                shader_id: material.shader_id,
                subshader_index,
            });
        }
    }
}

#[cfg(test)]
#[path = "shadow_casters_tests.rs"]
mod tests;
