//! Lighting module: light records, active light selection, per-object light
//! culling and forward light bucketing.

mod light;
mod active_lights;
mod light_culler;
mod per_object_lights;
mod spherical_harmonics;
mod forward_lights;

pub use light::{
    Light, LightKey, LightManager, LightRenderMode, LightType, LightmappingMode, ShadowType,
    RENDER_MODE_SORT_BIAS,
};
pub use active_lights::{ActiveLight, ActiveLights, ScreenRect};
pub use light_culler::{
    compute_screen_rect, find_and_cull_active_lights, select_main_light,
    MAIN_LIGHT_SHADOW_WEIGHT, MIN_LIGHT_INTENSITY, OFFSCREEN_LIGHT_RADIUS_FACTOR,
};
pub use per_object_lights::{
    cull_per_object_lights, is_light_culled_by_common_rules, light_affects_node, ObjectLightIndices,
};
pub use spherical_harmonics::SphericalHarmonicsL2;
pub use forward_lights::{
    find_forward_lights_for_object, ForwardLightsBlock, VertexLight, MAX_VERTEX_LIGHTS,
};
