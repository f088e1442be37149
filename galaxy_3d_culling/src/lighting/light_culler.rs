/// Active light selection for one camera.
///
/// Local lights are culled with their bounding sphere in two bands: inside
/// the frustum (visible), or within `OFFSCREEN_LIGHT_RADIUS_FACTOR` radii of
/// it (off-screen, vertex lighting with a fade). Visible local lights are then
/// checked against the occlusion buffer. Directional lights are never culled
/// geometrically; the strongest one becomes the main light.

use glam::{Mat4, Vec3};
use crate::culling::{
    point_distance_to_frustum, FrameContext, IndexList, OcclusionBuffer, OcclusionVisibility,
};
use crate::math::{AABB, Sphere};
use crate::{engine_debug, engine_trace};
use super::active_lights::{ActiveLight, ActiveLights, ScreenRect};
use super::light::{Light, LightRenderMode, LightType, LightmappingMode};

/// Main light weight multiplier for shadow-casting directional lights
pub const MAIN_LIGHT_SHADOW_WEIGHT: f32 = 16.0;

/// Local lights up to this many radii outside the frustum stay as off-screen lights
pub const OFFSCREEN_LIGHT_RADIUS_FACTOR: f32 = 2.0;

/// Lights whose greyscale intensity is below this are ignored
pub const MIN_LIGHT_INTENSITY: f32 = 1e-4;

/// Lights the camera can be affected by at all.
fn is_light_relevant(light: &Light, camera_mask: u32) -> bool {
    light.enabled
        && light.lightmapping != LightmappingMode::BakedOnly
        && light.culling_mask & camera_mask != 0
        && light.greyscale() * light.intensity > MIN_LIGHT_INTENSITY
}

/// Index of the main light among directional lights, ties keep the first.
pub fn select_main_light(directional: &[ActiveLight]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, active) in directional.iter().enumerate() {
        let light = &active.light;
        if light.render_mode == LightRenderMode::NotImportant
            || light.lightmapping == LightmappingMode::BakedOnly
        {
            continue;
        }
        let shadow_weight = if light.casts_shadows() { MAIN_LIGHT_SHADOW_WEIGHT } else { 1.0 };
        let weight = light.greyscale() * light.intensity * shadow_weight;
        if best.map_or(true, |(_, best_weight)| weight > best_weight) {
            best = Some((index, weight));
        }
    }
    best.map(|(index, _)| index)
}

/// Normalized screen rectangle covered by a box; full screen if it crosses
/// the camera plane.
pub fn compute_screen_rect(bounds: &AABB, view_projection: &Mat4) -> ScreenRect {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for corner in bounds.corners() {
        let clip = *view_projection * corner.extend(1.0);
        if clip.w <= f32::EPSILON {
            return ScreenRect::FULL;
        }
        let ndc = clip.truncate() / clip.w;
        min = min.min(ndc);
        max = max.max(ndc);
    }
    let x0 = (min.x * 0.5 + 0.5).clamp(0.0, 1.0);
    let x1 = (max.x * 0.5 + 0.5).clamp(0.0, 1.0);
    let y0 = (min.y * 0.5 + 0.5).clamp(0.0, 1.0);
    let y1 = (max.y * 0.5 + 0.5).clamp(0.0, 1.0);
    ScreenRect { x: x0, y: y0, width: x1 - x0, height: y1 - y0 }
}

/// Drop visible local lights rejected by the occlusion buffer or the
/// oracle's connectivity query.
fn occlusion_cull_local_lights(
    ctx: &FrameContext,
    buffer: &OcclusionBuffer,
    lights: &mut Vec<ActiveLight>,
) {
    let Some(occlusion) = ctx.occlusion else {
        return;
    };
    let oracle = occlusion.oracle();
    lights.retain(|l| oracle.test_sphere(buffer, &l.bounding_sphere) == OcclusionVisibility::Visible);

    let spheres: Vec<Sphere> = lights.iter().map(|l| l.bounding_sphere).collect();
    let mut connected = IndexList::from_range(lights.len());
    oracle.query_local_light_connectivity(buffer, &mut connected, &spheres);

    let count = lights.len();
    let mut keep = vec![false; count];
    for index in connected.iter().filter(|&i| i < count) {
        keep[index] = true;
    }
    let mut position = 0;
    lights.retain(|_| {
        let kept = keep[position];
        position += 1;
        kept
    });
}

/// Select and order the lights affecting the camera.
///
/// `occlusion_buffer` is the buffer produced by the scene pass, if occlusion
/// culling ran this frame.
pub fn find_and_cull_active_lights(
    ctx: &FrameContext,
    occlusion_buffer: Option<&OcclusionBuffer>,
) -> ActiveLights {
    let camera = ctx.camera;
    let planes = camera.culling_planes();
    let eye = camera.position();
    let shadow_distance = ctx.shadow_distance();

    let mut directional = Vec::new();
    let mut visible = Vec::new();
    let mut offscreen = Vec::new();

    for (key, light) in ctx.lights.iter() {
        if !is_light_relevant(light, camera.culling_mask()) {
            continue;
        }
        let mut active = ActiveLight::new(key, *light);
        if !light.is_local() {
            directional.push(active);
            continue;
        }

        let sphere = active.bounding_sphere;
        let distance = point_distance_to_frustum(sphere.center, &planes);
        if distance <= sphere.radius {
            visible.push(active);
        } else if distance <= sphere.radius * OFFSCREEN_LIGHT_RADIUS_FACTOR {
            let band = sphere.radius * (OFFSCREEN_LIGHT_RADIUS_FACTOR - 1.0);
            active.is_visible_in_prepass = false;
            active.is_offscreen_vertex_light = true;
            active.visibility_fade = ((sphere.radius * OFFSCREEN_LIGHT_RADIUS_FACTOR - distance) / band)
                .clamp(0.0, 1.0);
            active.screen_rect = ScreenRect::EMPTY;
            offscreen.push(active);
        }
    }

    if let Some(buffer) = occlusion_buffer {
        let before = visible.len();
        occlusion_cull_local_lights(ctx, buffer, &mut visible);
        engine_trace!("galaxy3d::LightCuller",
            "occlusion removed {} of {} visible local lights", before - visible.len(), before);
    }

    let view_projection = camera.view_projection_matrix();
    for active in visible.iter_mut() {
        active.screen_rect = compute_screen_rect(&active.bounding_box, &view_projection);
    }
    for active in visible.iter_mut().chain(offscreen.iter_mut()) {
        let sphere = active.bounding_sphere;
        active.inside_shadow_range = (sphere.center - eye).length() - sphere.radius <= shadow_distance;
    }

    let main_index = select_main_light(&directional);
    if let Some(index) = main_index {
        let main = directional.remove(index);
        directional.insert(0, main);
    }

    let (spots, points): (Vec<_>, Vec<_>) =
        visible.into_iter().partition(|l| l.light_type == LightType::Spot);
    let (off_spots, off_points): (Vec<_>, Vec<_>) =
        offscreen.into_iter().partition(|l| l.light_type == LightType::Spot);

    let mut result = ActiveLights {
        num_dir_lights: directional.len(),
        num_spot_lights: spots.len(),
        num_point_lights: points.len(),
        num_off_screen_spot_lights: off_spots.len(),
        num_off_screen_point_lights: off_points.len(),
        has_main_light: main_index.is_some(),
        lights: Vec::new(),
    };
    result.lights.reserve(directional.len() + spots.len() + points.len() + off_spots.len() + off_points.len());
    result.lights.extend(directional);
    result.lights.extend(spots);
    result.lights.extend(points);
    result.lights.extend(off_spots);
    result.lights.extend(off_points);

    debug_assert!(result.is_consistent());
    engine_debug!("galaxy3d::LightCuller",
        "active lights: {} directional, {} spot, {} point, {} off-screen spot, {} off-screen point",
        result.num_dir_lights, result.num_spot_lights, result.num_point_lights,
        result.num_off_screen_spot_lights, result.num_off_screen_point_lights);
    result
}

#[cfg(test)]
#[path = "light_culler_tests.rs"]
mod tests;
