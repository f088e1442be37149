//! Shadow caster culling.
//!
//! Runs after light culling, per camera: the camera frustum is truncated at
//! the shadow distance, each shadowed light gets a caster volume, and
//! directional lights are split into cascades.

mod shadow_cull_data;
mod caster_cull_planes;
mod shadow_casters;
mod cascades;
mod shadow_culler;

pub use shadow_cull_data::ShadowCullData;
pub use caster_cull_planes::{calculate_shadow_caster_cull, LightSource, LIGHT_PLANE_EPSILON};
pub use shadow_casters::{
    cube_face_mask, cull_shadow_caster_candidates, cull_shadow_casters, generate_shadow_caster_parts,
    ShadowCasterData, ShadowCasterPart, ShadowCasters, ALL_CUBE_FACES, CUBE_FACE_COUNT,
};
pub use cascades::{
    calculate_pssm_distances, cull_directional_cascades, pssm_split_percentages,
    setup_directional_cascades, setup_directional_light_shadow_camera,
    ShadowCascadeInfo, ShadowCascadeUniform, MAX_CASCADES, PSSM_SPLITS_2, PSSM_SPLITS_4,
};
pub use shadow_culler::{cull_light_shadows, needs_shadow_cull, LightShadows};
