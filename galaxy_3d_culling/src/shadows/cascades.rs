/// Directional light shadow cascades.
///
/// The truncated camera frustum is split along the view direction (PSSM
/// percentages), each split gets an orthographic light camera fitted either
/// to its bounding sphere (stable fit, texel snapped) or to its hull clipped
/// by the scene bounds (close fit). Casters are then assigned a bitmask of
/// the cascades they can shadow.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use crate::culling::{is_aabb_in_planes, ALL_PLANES};
use crate::engine_debug;
use crate::math::{hull_planes_from_corners, ConvexHull, Plane, Sphere, AABB};
use crate::settings::{ShadowCascades, ShadowProjection};
use super::caster_cull_planes::{calculate_shadow_caster_cull, LightSource};
use super::shadow_casters::ShadowCasters;
use super::shadow_cull_data::ShadowCullData;

pub const MAX_CASCADES: usize = 4;

/// Split percentages of the shadow distance for two cascades
pub const PSSM_SPLITS_2: [f32; 3] = [0.0, 1.0 / 3.0, 1.0];

/// Split percentages of the shadow distance for four cascades
pub const PSSM_SPLITS_4: [f32; 5] = [0.0, 1.0 / 15.0, 3.0 / 15.0, 7.0 / 15.0, 1.0];

const PSSM_SPLITS_1: [f32; 2] = [0.0, 1.0];

/// Smallest light camera half size accepted
const MIN_HALF_SIZE: f32 = 1e-5;

/// Clip space [-1, 1] x/y to shadow map [0, 1]
fn shadow_bias() -> Mat4 {
    Mat4::from_cols_array(&[
        0.5, 0.0, 0.0, 0.0,
        0.0, 0.5, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.5, 0.5, 0.0, 1.0,
    ])
}

pub fn pssm_split_percentages(cascades: ShadowCascades) -> &'static [f32] {
    match cascades {
        ShadowCascades::One => &PSSM_SPLITS_1,
        ShadowCascades::Two => &PSSM_SPLITS_2,
        ShadowCascades::Four => &PSSM_SPLITS_4,
    }
}

/// Split distances (cascade count + 1 entries) from the camera near plane
/// to the shadow distance.
///
/// Inner splits sit at `near + percentage * shadow_far`, clamped to the
/// shadow distance.
pub fn calculate_pssm_distances(near: f32, shadow_far: f32, cascades: ShadowCascades) -> Vec<f32> {
    let percentages = pssm_split_percentages(cascades);
    let last = percentages.len() - 1;
    percentages
        .iter()
        .enumerate()
        .map(|(i, pct)| match i {
            0 => near,
            i if i == last => shadow_far,
            _ => (near + pct * shadow_far).min(shadow_far),
        })
        .collect()
}

/// Light camera of one cascade
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCascadeInfo {
    pub enabled: bool,
    /// Light camera to world
    pub light_matrix: Mat4,
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    /// World to shadow map texture space
    pub world_to_shadow: Mat4,
    /// Bounding sphere of the receivers covered by this cascade
    pub sphere: Sphere,
    pub near_plane: f32,
    pub far_plane: f32,
    /// View distance range covered by this cascade
    pub min_view_distance: f32,
    pub max_view_distance: f32,
    /// Caster volume of this cascade's frustum slice
    pub cull_planes: Vec<Plane>,
}

fn light_up(direction: Vec3) -> Vec3 {
    if direction.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::X } else { Vec3::Y }
}

/// Move a light-space position onto the shadow map texel grid.
fn snap_to_texel(light_space: Vec3, texel_size: f32) -> Vec3 {
    if texel_size <= 0.0 || !texel_size.is_finite() {
        return light_space;
    }
    Vec3::new(
        (light_space.x / texel_size).floor() * texel_size,
        (light_space.y / texel_size).floor() * texel_size,
        light_space.z,
    )
}

/// Fit the orthographic light camera of one cascade.
///
/// Returns None when the split degenerates (empty hull, zero or non finite
/// size): the cascade is then left disabled.
pub fn setup_directional_light_shadow_camera(
    data: &ShadowCullData,
    direction: Vec3,
    split_near: f32,
    split_far: f32,
    projection: ShadowProjection,
    resolution: u32,
    caster_bounds: Option<&AABB>,
) -> Option<ShadowCascadeInfo> {
    let corners = data.split_corners(split_near, split_far);
    let up = light_up(direction);
    let rotation = Mat4::look_to_rh(Vec3::ZERO, direction, up);
    let inverse_rotation = rotation.transpose();

    let (center, half_size, receiver_depth, sphere) = match projection {
        ShadowProjection::StableFit => {
            let bounding = Sphere::from_points(&corners)?;
            let texel_size = 2.0 * bounding.radius / resolution.max(1) as f32;
            let snapped = snap_to_texel(rotation.transform_point3(bounding.center), texel_size);
            let center = inverse_rotation.transform_point3(snapped);
            (center, bounding.radius, (-bounding.radius, bounding.radius), Sphere::new(center, bounding.radius))
        }
        ShadowProjection::CloseFit => {
            let mut hull = ConvexHull::from_frustum_corners(&corners);
            if let Some(bounds) = &data.scene_bounds {
                hull.clip_by_aabb(bounds);
            }
            let vertices = hull.vertices();
            if hull.is_empty() || vertices.is_empty() {
                engine_debug!("galaxy3d::ShadowCuller",
                    "cascade [{}, {}] outside the scene bounds", split_near, split_far);
                return None;
            }
            let light_space: Vec<Vec3> = vertices.iter().map(|v| rotation.transform_point3(*v)).collect();
            let bounds = AABB::from_points(&light_space)?;
            let center = inverse_rotation.transform_point3(bounds.center);
            let half_size = bounds.extent.x.max(bounds.extent.y);
            let sphere = Sphere::from_points(&vertices)?;
            (center, half_size, (-bounds.extent.z, bounds.extent.z), sphere)
        }
    };

    if !half_size.is_finite() || half_size < MIN_HALF_SIZE {
        engine_debug!("galaxy3d::ShadowCuller",
            "degenerate cascade [{}, {}]: half size {}", split_near, split_far, half_size);
        return None;
    }

    let view_matrix = Mat4::look_to_rh(center, direction, up);

    // Casters between the light and the receivers pull the near plane back
    let mut depth_top = receiver_depth.1;
    if let Some(bounds) = caster_bounds {
        for corner in bounds.corners() {
            depth_top = depth_top.max(view_matrix.transform_point3(corner).z);
        }
    }
    let near_plane = -depth_top;
    let far_plane = -receiver_depth.0;
    if !near_plane.is_finite() || !far_plane.is_finite() || far_plane - near_plane <= MIN_HALF_SIZE {
        return None;
    }

    let projection_matrix = Mat4::orthographic_rh(-half_size, half_size, -half_size, half_size, near_plane, far_plane);
    let cull_planes = hull_planes_from_corners(&corners)
        .map(|planes| calculate_shadow_caster_cull(&planes, &corners, LightSource::Directional(direction)))
        .unwrap_or_default();

    Some(ShadowCascadeInfo {
        enabled: true,
        light_matrix: view_matrix.inverse(),
        view_matrix,
        projection_matrix,
        world_to_shadow: shadow_bias() * projection_matrix * view_matrix,
        sphere,
        near_plane,
        far_plane,
        min_view_distance: split_near,
        max_view_distance: split_far,
        cull_planes,
    })
}

/// Fit every cascade of a directional light. Disabled cascades keep their
/// slot so indices match the split distances.
pub fn setup_directional_cascades(
    data: &ShadowCullData,
    direction: Vec3,
    distances: &[f32],
    projection: ShadowProjection,
    resolution: u32,
    caster_bounds: Option<&AABB>,
) -> Vec<ShadowCascadeInfo> {
    distances
        .windows(2)
        .map(|split| {
            setup_directional_light_shadow_camera(data, direction, split[0], split[1], projection, resolution, caster_bounds)
                .unwrap_or_else(|| disabled_cascade(split[0], split[1]))
        })
        .collect()
}

fn disabled_cascade(split_near: f32, split_far: f32) -> ShadowCascadeInfo {
    ShadowCascadeInfo {
        enabled: false,
        light_matrix: Mat4::IDENTITY,
        view_matrix: Mat4::IDENTITY,
        projection_matrix: Mat4::IDENTITY,
        world_to_shadow: Mat4::IDENTITY,
        sphere: Sphere::new(Vec3::ZERO, 0.0),
        near_plane: 0.0,
        far_plane: 0.0,
        min_view_distance: split_near,
        max_view_distance: split_far,
        cull_planes: Vec::new(),
    }
}

/// Whether a caster sphere lies inside the infinite cylinder swept by the
/// cascade sphere towards the light, and not entirely past it.
fn caster_in_cascade_cylinder(caster: &Sphere, cascade: &Sphere, direction: Vec3) -> bool {
    let offset = caster.center - cascade.center;
    let along = offset.dot(direction);
    if along - caster.radius > cascade.radius {
        return false;
    }
    let lateral = (offset - direction * along).length();
    lateral <= cascade.radius + caster.radius
}

/// Assign each caster the bitmask of the cascades it can shadow.
///
/// With a single cascade the light's caster planes already bound the
/// casters; with more, each cascade's own caster volume is tested too.
pub fn cull_directional_cascades(
    casters: &mut ShadowCasters,
    cascades: &[ShadowCascadeInfo],
    direction: Vec3,
    projection: ShadowProjection,
) {
    let per_cascade_planes = cascades.len() > 1;
    for caster in &mut casters.casters {
        let bounding = caster.world_aabb.bounding_sphere();
        let mut mask = 0;
        for (i, cascade) in cascades.iter().enumerate() {
            if !cascade.enabled {
                continue;
            }
            if projection == ShadowProjection::StableFit
                && !caster_in_cascade_cylinder(&bounding, &cascade.sphere, direction)
            {
                continue;
            }
            if per_cascade_planes
                && !cascade.cull_planes.is_empty()
                && !is_aabb_in_planes(&caster.world_aabb, &cascade.cull_planes, ALL_PLANES)
            {
                continue;
            }
            mask |= 1 << i;
        }
        caster.visible_mask = mask;
    }
}

// ===== GPU LAYOUT =====

/// Cascade data as laid out for a shader uniform block
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ShadowCascadeUniform {
    pub world_to_shadow: [[[f32; 4]; 4]; MAX_CASCADES],
    /// Center and squared radius of each cascade sphere
    pub split_spheres: [[f32; 4]; MAX_CASCADES],
    pub split_far_distances: [f32; MAX_CASCADES],
    pub cascade_count: u32,
    pub _padding: [u32; 3],
}

impl ShadowCascadeUniform {
    pub fn from_cascades(cascades: &[ShadowCascadeInfo]) -> Self {
        let mut uniform = Self::zeroed();
        for (i, cascade) in cascades.iter().take(MAX_CASCADES).enumerate() {
            uniform.world_to_shadow[i] = cascade.world_to_shadow.to_cols_array_2d();
            let center = cascade.sphere.center;
            uniform.split_spheres[i] = [center.x, center.y, center.z, cascade.sphere.radius * cascade.sphere.radius];
            uniform.split_far_distances[i] = cascade.max_view_distance;
        }
        uniform.cascade_count = cascades.len().min(MAX_CASCADES) as u32;
        uniform
    }
}

#[cfg(test)]
#[path = "cascades_tests.rs"]
mod tests;
