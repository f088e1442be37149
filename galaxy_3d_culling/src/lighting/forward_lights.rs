/// Forward lighting buckets for one object.
///
/// The object's lights are sorted by received intensity plus a render-mode
/// bias, then split into: an optional main light, additive pixel lights,
/// vertex lights and the SH remainder. The last light of the additive and of
/// the vertex bucket is cross-blended with the next bucket so a light changing
/// rank between frames does not pop.

use glam::Vec3;
use crate::settings::QualitySettings;
use super::active_lights::{ActiveLight, ActiveLights};
use super::light::{LightRenderMode, LightType, LightmappingMode};
use super::spherical_harmonics::SphericalHarmonicsL2;

/// Hard cap of per-vertex lights
pub const MAX_VERTEX_LIGHTS: usize = 4;

/// Intensity gaps below this do not blend
const BLEND_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexLight {
    /// Index into the active lights
    pub index: usize,
    pub weight: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ForwardLightsBlock {
    /// Active light 0 when it is the main light and lights this object
    pub main_light: Option<usize>,
    /// Additive per-pixel lights, brightest first
    pub add_lights: Vec<usize>,
    pub vertex_lights: Vec<VertexLight>,
    /// The last additive light renders at `1 - blend`; the rest went to vertex/SH
    pub last_add_light_blend: f32,
    /// The last vertex light renders at `1 - blend`; the rest went to SH
    pub last_vertex_light_blend: f32,
    pub sh: SphericalHarmonicsL2,
}

impl ForwardLightsBlock {
    /// Weight of the additive light at `position` in `add_lights`.
    pub fn add_light_weight(&self, position: usize) -> f32 {
        if position + 1 == self.add_lights.len() {
            1.0 - self.last_add_light_blend
        } else {
            1.0
        }
    }

    /// Number of lights applied per pixel or per vertex.
    pub fn light_count(&self) -> usize {
        usize::from(self.main_light.is_some()) + self.add_lights.len() + self.vertex_lights.len()
    }
}

#[derive(Debug, Clone, Copy)]
struct SortedLight {
    index: usize,
    key: f32,
    mode: LightRenderMode,
}

/// Blend factor of `current` between `prev` and `next` in sorted order.
///
/// 0 when a neighbor is missing, when render modes differ (bias jump) or when
/// the neighbors have the same intensity.
fn cross_blend(prev: Option<&SortedLight>, current: &SortedLight, next: Option<&SortedLight>) -> f32 {
    let (Some(prev), Some(next)) = (prev, next) else {
        return 0.0;
    };
    if prev.mode != current.mode || next.mode != current.mode {
        return 0.0;
    }
    let denominator = prev.key - next.key;
    if denominator.abs() <= BLEND_EPSILON {
        return 0.0;
    }
    ((prev.key - current.key) / denominator).clamp(0.0, 1.0)
}

/// Fold a light into the SH at the given weight.
fn add_light_to_sh(sh: &mut SphericalHarmonicsL2, active: &ActiveLight, center: Vec3, weight: f32) {
    let light = &active.light;
    let strength = light.intensity * light.attenuation_at_point(center) * active.visibility_fade * weight;
    if strength <= 0.0 {
        return;
    }
    let direction_to_light = match light.light_type {
        LightType::Directional => -light.direction,
        LightType::Point | LightType::Spot => light.position - center,
    };
    sh.add_directional_light(direction_to_light, light.color * strength);
}

/// Sorted light list of one object, brightest first.
fn sort_object_lights(active: &ActiveLights, object_lights: &[usize], center: Vec3) -> Vec<SortedLight> {
    let mut sorted: Vec<SortedLight> = object_lights
        .iter()
        .map(|&index| {
            let light = &active.lights[index];
            SortedLight {
                index,
                key: light.light.intensity_at_point(center) * light.visibility_fade
                    + light.light.render_mode.sort_bias(),
                mode: light.light.render_mode,
            }
        })
        .collect();
    sorted.sort_by(|a, b| b.key.total_cmp(&a.key));
    sorted
}

/// Bucket the lights of one object.
///
/// `object_lights` are indices into `active` (one row of the per-object
/// table). `vertex_lit` selects the vertex-lit path: the brightest lights
/// become vertex lights and nothing else is computed.
pub fn find_forward_lights_for_object(
    active: &ActiveLights,
    object_lights: &[usize],
    object_center: Vec3,
    lightmapped: bool,
    settings: &QualitySettings,
    vertex_lit: bool,
) -> ForwardLightsBlock {
    let mut sorted = sort_object_lights(active, object_lights, object_center);
    let max_vertex_lights = settings.max_vertex_lights.min(MAX_VERTEX_LIGHTS);
    let mut block = ForwardLightsBlock::default();
    block.sh.add_ambient(settings.ambient_light);

    if vertex_lit {
        block.vertex_lights = sorted
            .iter()
            .take(max_vertex_lights)
            .map(|l| VertexLight { index: l.index, weight: 1.0 })
            .collect();
        return block;
    }

    if let Some(main) = active.main_light() {
        let excluded = main.light.has_cookie
            || (settings.use_light_probes_direct && main.lightmapping == LightmappingMode::Auto);
        if !excluded {
            if let Some(position) = sorted.iter().position(|l| l.index == 0) {
                sorted.remove(position);
                block.main_light = Some(0);
            }
        }
    }

    // Additive pixel lights: every Important light plus the first Auto lights
    let mut add = Vec::new();
    let mut rest = Vec::new();
    let mut auto_added = 0;
    for light in sorted {
        let pixel_capable = !active.lights[light.index].is_offscreen_vertex_light;
        let promote = pixel_capable
            && match light.mode {
                LightRenderMode::Important => true,
                LightRenderMode::Auto if auto_added < settings.pixel_light_count => {
                    auto_added += 1;
                    true
                }
                _ => false,
            };
        if promote { add.push(light) } else { rest.push(light) }
    }

    let mut demoted: Vec<(SortedLight, f32)> = Vec::with_capacity(rest.len() + 1);
    if let Some(last) = add.last() {
        let prev = add.len().checked_sub(2).map(|i| &add[i]);
        // Off-screen lights never compete for a pixel slot
        let next = rest.iter().find(|l| !active.lights[l.index].is_offscreen_vertex_light);
        let blend = cross_blend(prev, last, next);
        block.last_add_light_blend = blend;
        if blend > 0.0 {
            demoted.push((*last, blend));
        }
    }
    block.add_lights = add.iter().map(|l| l.index).collect();
    demoted.extend(rest.into_iter().map(|l| (l, 1.0)));

    // Vertex lights for local lights of non-lightmapped objects, SH otherwise
    let mut vertex = Vec::new();
    let mut overflow = Vec::new();
    for (light, weight) in demoted {
        let active_light = &active.lights[light.index];
        if lightmapped || !active_light.light.is_local() {
            add_light_to_sh(&mut block.sh, active_light, object_center, weight);
        } else if vertex.len() < max_vertex_lights {
            vertex.push((light, weight));
        } else {
            overflow.push((light, weight));
        }
    }

    if let (Some(&(last, weight)), Some(&(next, _))) = (vertex.last(), overflow.first()) {
        let prev = vertex.len().checked_sub(2).map(|i| &vertex[i].0);
        let blend = cross_blend(prev, &last, Some(&next));
        block.last_vertex_light_blend = blend;
        if blend > 0.0 {
            let slot = vertex.len() - 1;
            vertex[slot].1 = weight * (1.0 - blend);
            add_light_to_sh(&mut block.sh, &active.lights[last.index], object_center, weight * blend);
        }
    }
    for (light, weight) in overflow {
        add_light_to_sh(&mut block.sh, &active.lights[light.index], object_center, weight);
    }

    block.vertex_lights = vertex
        .into_iter()
        .map(|(light, weight)| VertexLight { index: light.index, weight })
        .collect();
    block
}

#[cfg(test)]
#[path = "forward_lights_tests.rs"]
mod tests;
