/// Scene culling: frustum (and optionally occlusion) culling of every
/// renderer group, followed by node-level filtering.
///
/// Two strategies share the node filter:
/// - pure frustum: every group is tested against the camera planes
/// - occlusion-assisted: the oracle culls the static group and returns an
///   occlusion buffer, dynamic renderers are frustum culled then tested
///   against that buffer
///
/// If the oracle reports the camera outside its scene, the invocation falls
/// back to pure frustum culling for every group.

use glam::Vec3;
use crate::camera::{Camera, MAX_LAYERS};
use crate::math::{AABB, Plane};
use crate::scene::{LodData, RendererGroup, SceneNode, RENDERER_GROUP_COUNT};
use crate::{engine_trace, engine_warn};
use super::arena::FrameArena;
use super::frame_context::FrameContext;
use super::frustum_culler::{frustum_cull, ALL_PLANES};
use super::index_list::IndexList;
use super::occlusion::{OcclusionBuffer, OcclusionQueryError, OcclusionVisibility};

/// Camera-derived inputs of `is_node_visible`.
#[derive(Debug, Clone)]
pub struct NodeCullParameters<'a> {
    pub culling_mask: u32,
    pub lod: &'a LodData,
    pub eye: Vec3,
    pub view_direction: Vec3,
    /// Per-layer cull distances, None when no layer has one
    pub layer_cull_distances: Option<[f32; MAX_LAYERS]>,
    pub layer_cull_spherical: bool,
}

impl<'a> NodeCullParameters<'a> {
    pub fn from_camera(camera: &Camera, lod: &'a LodData) -> Self {
        Self {
            culling_mask: camera.culling_mask(),
            lod,
            eye: camera.position(),
            view_direction: camera.forward(),
            layer_cull_distances: camera
                .has_layer_cull_distances()
                .then(|| *camera.layer_cull_distances()),
            layer_cull_spherical: camera.layer_cull_spherical(),
        }
    }

    /// Far plane moved to `distance` along the view direction.
    fn layer_far_plane(&self, distance: f32) -> Plane {
        Plane::new(-self.view_direction, self.view_direction.dot(self.eye) + distance)
    }
}

/// Node-level filter applied after the geometric test.
pub fn is_node_visible(node: &SceneNode, aabb: &AABB, params: &NodeCullParameters) -> bool {
    let layer_bit = 1_u32.checked_shl(node.layer).unwrap_or(0);
    if layer_bit & params.culling_mask == 0 {
        return false;
    }
    if node.renderer.is_none() || node.disabled {
        return false;
    }
    if node.lod_index_mask != 0 && node.lod_index_mask & params.lod.mask(node.lod_group) == 0 {
        return false;
    }
    if let Some(distances) = &params.layer_cull_distances {
        let distance = distances.get(node.layer as usize).copied().unwrap_or(0.0);
        if distance > 0.0 {
            if params.layer_cull_spherical {
                if aabb.center.distance_squared(params.eye) > distance * distance {
                    return false;
                }
            } else {
                let plane = params.layer_far_plane(distance);
                let radius = aabb.extent.dot(plane.normal.abs());
                if plane.distance_to_point(aabb.center) + radius < 0.0 {
                    return false;
                }
            }
        }
    }
    true
}

/// Output of the scene culling stage
#[derive(Debug)]
pub struct SceneCullOutput {
    pub visible: [IndexList; RENDERER_GROUP_COUNT],
    pub occlusion_buffer: Option<OcclusionBuffer>,
    pub used_occlusion: bool,
}

fn filter_nodes(ctx: &FrameContext, group: RendererGroup, list: &mut IndexList, params: &NodeCullParameters) {
    let array = ctx.scene.group(group);
    list.retain(|i| is_node_visible(array.node(i), array.aabb(i), params));
}

fn frustum_cull_group(
    ctx: &FrameContext,
    group: RendererGroup,
    planes: &[Plane],
    arena: &mut FrameArena,
) -> IndexList {
    let bounds = ctx.scene.group(group).bounds();
    let mut list = arena.acquire(bounds.len());
    frustum_cull(bounds, planes, ALL_PLANES, &mut list);
    list
}

/// Pure frustum culling of every group.
pub fn cull_scene_frustum(ctx: &FrameContext, lod: &LodData, arena: &mut FrameArena) -> SceneCullOutput {
    let planes = ctx.camera.culling_planes();
    let params = NodeCullParameters::from_camera(ctx.camera, lod);
    let visible = RendererGroup::ALL.map(|group| {
        let mut list = frustum_cull_group(ctx, group, &planes, arena);
        filter_nodes(ctx, group, &mut list, &params);
        list
    });
    SceneCullOutput { visible, occlusion_buffer: None, used_occlusion: false }
}

/// Occlusion-assisted culling, falling back to pure frustum culling when the
/// oracle is missing or the camera is outside its scene.
pub fn cull_scene_with_occlusion(ctx: &FrameContext, lod: &LodData, arena: &mut FrameArena) -> SceneCullOutput {
    let Some(occlusion) = ctx.occlusion else {
        engine_warn!("galaxy3d::SceneCuller", "occlusion culling requested without an oracle");
        return cull_scene_frustum(ctx, lod, arena);
    };
    let oracle = occlusion.oracle();
    let statics = ctx.scene.group(RendererGroup::Static);

    let static_visibility = match oracle.query_visibility(ctx.camera, statics.bounds()) {
        Ok(result) => result,
        Err(OcclusionQueryError::OutsideScene) => {
            engine_warn!("galaxy3d::SceneCuller",
                "camera outside the occlusion scene, falling back to frustum culling");
            return cull_scene_frustum(ctx, lod, arena);
        }
    };

    let planes = ctx.camera.culling_planes();
    let params = NodeCullParameters::from_camera(ctx.camera, lod);
    let buffer = static_visibility.buffer;

    let visible = RendererGroup::ALL.map(|group| match group {
        RendererGroup::Static => {
            let mut list = arena.acquire(statics.len());
            list.assign(static_visibility.visible.as_slice());
            list.retain(|i| i < statics.len());
            filter_nodes(ctx, group, &mut list, &params);
            list
        }
        RendererGroup::Dynamic => {
            let mut list = frustum_cull_group(ctx, group, &planes, arena);
            let bounds = ctx.scene.group(group).bounds();
            list.retain(|i| oracle.test_aabb(&buffer, &bounds[i]) == OcclusionVisibility::Visible);
            filter_nodes(ctx, group, &mut list, &params);
            list
        }
        RendererGroup::SceneIntermediate | RendererGroup::CameraIntermediate => {
            let mut list = frustum_cull_group(ctx, group, &planes, arena);
            filter_nodes(ctx, group, &mut list, &params);
            list
        }
    });

    engine_trace!("galaxy3d::SceneCuller",
        "occlusion culling kept {} static and {} dynamic renderers",
        visible[RendererGroup::Static.index()].size(),
        visible[RendererGroup::Dynamic.index()].size());

    SceneCullOutput { visible, occlusion_buffer: Some(buffer), used_occlusion: true }
}

#[cfg(test)]
#[path = "scene_culler_tests.rs"]
mod tests;
