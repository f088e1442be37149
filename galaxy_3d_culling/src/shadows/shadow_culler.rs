/// Per light shadow culling.
///
/// For every shadowed active light: caster volume, coarse and detail caster
/// culling, then for directional lights the cascade setup and per-caster
/// cascade masks.

use crate::culling::{FrameArena, FrameContext, OcclusionBuffer};
use crate::engine_debug;
use crate::lighting::{ActiveLights, LightType};
use crate::math::Plane;
use crate::scene::LodData;
use super::cascades::{
    calculate_pssm_distances, cull_directional_cascades, setup_directional_cascades,
    ShadowCascadeInfo, ShadowCascadeUniform,
};
use super::caster_cull_planes::{calculate_shadow_caster_cull, LightSource};
use super::shadow_casters::{cull_shadow_caster_candidates, cull_shadow_casters, ShadowCasters};
use super::shadow_cull_data::ShadowCullData;

/// Shadow culling output of one light
#[derive(Debug, Clone)]
pub struct LightShadows {
    /// Index into the active lights
    pub active_light: usize,
    pub caster_planes: Vec<Plane>,
    pub casters: ShadowCasters,
    /// Directional lights only
    pub cascades: Vec<ShadowCascadeInfo>,
    /// Cascade split distances (cascade count + 1), directional lights only
    pub split_distances: Vec<f32>,
}

impl LightShadows {
    pub fn cascade_uniform(&self) -> Option<ShadowCascadeUniform> {
        (!self.cascades.is_empty()).then(|| ShadowCascadeUniform::from_cascades(&self.cascades))
    }
}

/// Whether an active light needs shadow culling this frame.
pub fn needs_shadow_cull(active: &ActiveLights, index: usize) -> bool {
    active.get(index).is_some_and(|light| {
        light.light.casts_shadows() && light.is_visible_in_prepass && light.inside_shadow_range
    })
}

/// Cull the shadow casters of one active light.
pub fn cull_light_shadows(
    ctx: &FrameContext,
    data: &ShadowCullData,
    active: &ActiveLights,
    index: usize,
    occlusion_buffer: Option<&OcclusionBuffer>,
    lod: &LodData,
    arena: &mut FrameArena,
) -> Option<LightShadows> {
    let light = active.get(index)?;
    let source = match light.light_type {
        LightType::Directional => LightSource::Directional(light.light.direction),
        LightType::Point | LightType::Spot => LightSource::Positional(light.light.position),
    };
    let caster_planes = calculate_shadow_caster_cull(&data.camera_planes, &data.frustum_corners, source);

    let candidates = cull_shadow_caster_candidates(ctx, &caster_planes, occlusion_buffer, lod, arena);
    let mut casters = cull_shadow_casters(ctx, data, light, &candidates);
    arena.release_all(candidates);

    let (cascades, split_distances) = if light.light_type == LightType::Directional {
        let settings = ctx.settings;
        let distances = calculate_pssm_distances(data.near, data.shadow_distance, settings.shadow_cascades);
        let cascades = setup_directional_cascades(
            data,
            light.light.direction,
            &distances,
            settings.shadow_projection,
            settings.shadow_resolution,
            casters.bounds().as_ref(),
        );
        cull_directional_cascades(&mut casters, &cascades, light.light.direction, settings.shadow_projection);
        (cascades, distances)
    } else {
        (Vec::new(), Vec::new())
    };

    engine_debug!("galaxy3d::ShadowCuller",
        "light {}: {} caster planes, {} casters, {} cascades",
        index, caster_planes.len(), casters.len(), cascades.len());

    Some(LightShadows { active_light: index, caster_planes, casters, cascades, split_distances })
}

#[cfg(test)]
#[path = "shadow_culler_tests.rs"]
mod tests;
