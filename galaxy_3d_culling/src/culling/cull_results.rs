/// Per-invocation culling output.
///
/// A CullResults lives for one camera render (or one shadow-map render). Its
/// index lists come from the pipeline's frame arena and go back to it through
/// `CullingPipeline::release`; the occlusion buffer is dropped with it.

use std::sync::Arc;
use bitflags::bitflags;
use glam::Mat4;
use crate::lighting::{ActiveLights, ForwardLightsBlock, ObjectLightIndices};
use crate::math::AABB;
use crate::scene::{LodData, Renderable, RendererFlags, RendererGroup, TransformType, RENDERER_GROUP_COUNT};
use crate::shadows::{LightShadows, ShadowCullData};
use super::index_list::IndexList;
use super::occlusion::OcclusionBuffer;

bitflags! {
    /// Stages enabled for a cull invocation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CullFlags: u32 {
        const OCCLUSION_CULLING = 1 << 0;
        const LIGHTING          = 1 << 1;
        const SHADOWS           = 1 << 2;
        /// Deliver visibility callbacks
        const SEND_EVENTS       = 1 << 3;
    }
}

/// How visible objects will be lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderingPath {
    /// Main + additive pixel lights, vertex lights, SH
    Forward,
    /// Vertex lights only
    VertexLit,
    /// Lights are rendered in screen space: no per-object bucketing
    Deferred,
}

#[derive(Debug, Clone, Copy)]
pub struct CullingParameters {
    pub flags: CullFlags,
    pub rendering_path: RenderingPath,
}

impl Default for CullingParameters {
    fn default() -> Self {
        Self {
            flags: CullFlags::LIGHTING | CullFlags::SHADOWS | CullFlags::SEND_EVENTS,
            rendering_path: RenderingPath::Forward,
        }
    }
}

/// Transform data cached for a visible renderer
#[derive(Debug, Clone, Copy)]
pub struct TransformInfo {
    pub world_matrix: Mat4,
    pub world_aabb: AABB,
    pub local_aabb: AABB,
    pub transform_type: TransformType,
    pub inverse_scale: f32,
}

impl TransformInfo {
    pub fn from_renderer(renderer: &dyn Renderable) -> Self {
        let world_matrix = renderer.world_matrix();
        let local_aabb = renderer.local_aabb();
        let (transform_type, inverse_scale) = TransformType::classify(&world_matrix);
        Self {
            world_matrix,
            world_aabb: local_aabb.transformed(&world_matrix),
            local_aabb,
            transform_type,
            inverse_scale,
        }
    }
}

/// A renderer that survived scene culling
#[derive(Clone)]
pub struct VisibleNode {
    pub renderer: Arc<dyn Renderable>,
    pub group: RendererGroup,
    /// Index into the group's arrays
    pub node_index: usize,
    pub layer: u32,
    pub flags: RendererFlags,
    pub transform: TransformInfo,
    pub lod_fade: f32,
}

impl std::fmt::Debug for VisibleNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibleNode")
            .field("renderer", &self.renderer.id())
            .field("group", &self.group)
            .field("node_index", &self.node_index)
            .field("layer", &self.layer)
            .field("lod_fade", &self.lod_fade)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CullResults {
    /// Visible indices per renderer group
    pub visible: [IndexList; RENDERER_GROUP_COUNT],
    /// Visible renderers with cached transforms, in group order
    pub visible_nodes: Vec<VisibleNode>,
    pub active_lights: ActiveLights,
    /// Per visible node: indices into `active_lights`
    pub object_lights: ObjectLightIndices,
    /// Per visible node, empty for the deferred path or without lighting
    pub forward_lights: Vec<ForwardLightsBlock>,
    pub lod_data: LodData,
    pub occlusion_buffer: Option<OcclusionBuffer>,
    /// Occlusion culling actually ran (false after the outside-scene fallback)
    pub used_occlusion: bool,
    /// Per-camera shadow parameters, set when at least one light was shadow culled
    pub shadow_cull_data: Option<ShadowCullData>,
    /// One entry per shadowed light that went through shadow culling
    pub shadows: Vec<LightShadows>,
}

impl CullResults {
    pub fn visible_in(&self, group: RendererGroup) -> &IndexList {
        &self.visible[group.index()]
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().map(IndexList::size).sum()
    }

    /// Light indices (into `active_lights`) of a visible node.
    pub fn lights_for(&self, visible_node: usize) -> &[usize] {
        self.object_lights.lights_for(visible_node)
    }

    /// Shadow results of an active light, if it was shadow culled.
    pub fn shadows_for(&self, active_light: usize) -> Option<&LightShadows> {
        self.shadows.iter().find(|s| s.active_light == active_light)
    }
}
