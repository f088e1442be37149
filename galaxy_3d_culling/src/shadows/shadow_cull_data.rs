/// Per-camera shadow culling parameters.
///
/// Computed once per camera per frame before any light is shadow culled,
/// read-only afterwards. The camera frustum is truncated at the shadow
/// distance: shadows are only received up to there.

use glam::{Mat4, Vec3};
use crate::camera::{Frustum, MAX_LAYERS, PLANE_FAR};
use crate::culling::FrameContext;
use crate::math::{AABB, Plane, Sphere};

#[derive(Debug, Clone)]
pub struct ShadowCullData {
    pub eye: Vec3,
    pub view_direction: Vec3,
    pub view_projection: Mat4,
    pub near: f32,
    /// Shadow distance clamped to the camera far plane
    pub shadow_distance: f32,
    /// Camera frustum planes with the far plane moved to the shadow distance
    pub camera_planes: [Plane; 6],
    /// Frustum corners (near bl, br, tr, tl, far bl, br, tr, tl), far corners
    /// at the shadow distance
    pub frustum_corners: [Vec3; 8],
    /// Sphere around the truncated frustum
    pub shadow_cull_center: Vec3,
    pub shadow_cull_radius: f32,
    pub culling_mask: u32,
    pub layer_cull_distances: [f32; MAX_LAYERS],
    pub layer_cull_spherical: bool,
    /// Union of every live renderer's bounds
    pub scene_bounds: Option<AABB>,
}

impl ShadowCullData {
    /// Derive the shadow parameters of the context's camera.
    pub fn new(ctx: &FrameContext) -> Self {
        let camera = ctx.camera;
        let eye = camera.position();
        let view_direction = camera.forward();
        let view_projection = camera.view_projection_matrix();
        let near = camera.near();
        let far = camera.far();
        let shadow_distance = ctx.shadow_distance().max(near);

        let full = Frustum::corners(&view_projection);
        let t = if far - near > f32::EPSILON { (shadow_distance - near) / (far - near) } else { 1.0 };
        let mut frustum_corners = full;
        for i in 0..4 {
            frustum_corners[i + 4] = full[i].lerp(full[i + 4], t);
        }

        let mut camera_planes = camera.frustum().planes;
        camera_planes[PLANE_FAR] = Plane::new(-view_direction, view_direction.dot(eye) + shadow_distance);

        let sphere = Sphere::from_points(&frustum_corners).unwrap_or(Sphere::new(eye, shadow_distance));

        Self {
            eye,
            view_direction,
            view_projection,
            near,
            shadow_distance,
            camera_planes,
            frustum_corners,
            shadow_cull_center: sphere.center,
            shadow_cull_radius: sphere.radius,
            culling_mask: camera.culling_mask(),
            layer_cull_distances: *camera.layer_cull_distances(),
            layer_cull_spherical: camera.layer_cull_spherical(),
            scene_bounds: ctx.scene.scene_bounds(),
        }
    }

    /// Corners of the slice of the truncated frustum between two view distances.
    pub fn split_corners(&self, split_near: f32, split_far: f32) -> [Vec3; 8] {
        let span = self.shadow_distance - self.near;
        let param = |d: f32| if span > f32::EPSILON { ((d - self.near) / span).clamp(0.0, 1.0) } else { 0.0 };
        let (t0, t1) = (param(split_near), param(split_far));
        let mut corners = [Vec3::ZERO; 8];
        for i in 0..4 {
            let (near_corner, far_corner) = (self.frustum_corners[i], self.frustum_corners[i + 4]);
            corners[i] = near_corner.lerp(far_corner, t0);
            corners[i + 4] = near_corner.lerp(far_corner, t1);
        }
        corners
    }

    /// Layer cull distance of a caster (true = too far to cast a visible shadow).
    pub fn is_beyond_layer_distance(&self, layer: u32, aabb: &AABB) -> bool {
        let distance = self.layer_cull_distances.get(layer as usize).copied().unwrap_or(0.0);
        if distance <= 0.0 {
            return false;
        }
        if self.layer_cull_spherical {
            aabb.center.distance_squared(self.eye) > distance * distance
        } else {
            let radius = aabb.extent.dot(self.view_direction.abs());
            self.view_direction.dot(aabb.center - self.eye) - radius > distance
        }
    }
}

#[cfg(test)]
#[path = "shadow_cull_data_tests.rs"]
mod tests;
