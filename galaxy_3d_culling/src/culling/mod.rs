//! Culling module: index lists, frustum tests, occlusion oracle interface and
//! scene culling.
//!
//! Every stage writes `IndexList`s of indices into the flat scene arrays.

mod index_list;
mod frustum_culler;
mod arena;
mod occlusion;
mod frame_context;
mod scene_culler;
mod cull_results;
#[cfg(test)]
pub(crate) mod mock_oracle;

pub use index_list::IndexList;
pub use frustum_culler::{
    frustum_cull, frustum_cull_list, is_aabb_in_planes, is_local_aabb_in_planes,
    is_sphere_in_planes, point_distance_to_frustum, ALL_PLANES, MAX_CULLING_PLANES,
};
pub use arena::FrameArena;
pub use occlusion::{
    OcclusionBuffer, OcclusionCulling, OcclusionOracle, OcclusionQueryError, OcclusionVisibility,
    StaticVisibility, MIN_OCCLUSION_INTERFACE_VERSION, OCCLUSION_INTERFACE_VERSION,
};
pub use frame_context::FrameContext;
pub use scene_culler::{
    cull_scene_frustum, cull_scene_with_occlusion, is_node_visible, NodeCullParameters,
    SceneCullOutput,
};
pub use cull_results::{
    CullFlags, CullResults, CullingParameters, RenderingPath, TransformInfo, VisibleNode,
};
