/// Camera: low-level passive data container for culling.
///
/// The caller (game engine) computes view and projection matrices; the
/// camera only stores them along with the culling inputs (layer mask, layer
/// cull distances, user clip planes). It is never stored by the pipeline:
/// a reference is threaded through `FrameContext` for one cull invocation.

use glam::{Mat4, Vec3};
use crate::culling::MAX_CULLING_PLANES;
use crate::math::Plane;
use super::frustum::Frustum;

/// Number of scene layers (bits of a culling mask)
pub const MAX_LAYERS: usize = 32;

/// User clip planes appended after the 6 frustum planes
pub const MAX_USER_CLIP_PLANES: usize = MAX_CULLING_PLANES - 6;

#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
    near: f32,
    far: f32,
    orthographic: bool,
    user_clip_planes: Vec<Plane>,
    culling_mask: u32,
    layer_cull_distances: [f32; MAX_LAYERS],
    layer_cull_spherical: bool,
}

impl Camera {
    /// Create a camera from fully computed parameters.
    ///
    /// Culling mask defaults to all layers, no layer cull distances.
    pub fn new(view: Mat4, projection: Mat4, frustum: Frustum, near: f32, far: f32, orthographic: bool) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum,
            near,
            far,
            orthographic,
            user_clip_planes: Vec::new(),
            culling_mask: u32::MAX,
            layer_cull_distances: [0.0; MAX_LAYERS],
            layer_cull_spherical: false,
        }
    }

    /// Create a camera and extract its frustum from `projection * view`.
    ///
    /// The projection is treated as orthographic when its last row is (0, 0, 0, 1).
    pub fn from_matrices(view: Mat4, projection: Mat4, near: f32, far: f32) -> Self {
        let frustum = Frustum::from_view_projection(&(projection * view));
        let orthographic = projection.row(3) == glam::Vec4::W;
        Self::new(view, projection, frustum, near, far, orthographic)
    }

    // ===== GETTERS =====

    /// View matrix (world to camera).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera to world transform.
    pub fn camera_to_world(&self) -> Mat4 {
        self.view_matrix.inverse()
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.camera_to_world().w_axis.truncate()
    }

    /// Unit view direction in world space (camera looks down -Z in view space).
    pub fn forward(&self) -> Vec3 {
        (-self.camera_to_world().z_axis.truncate()).normalize_or_zero()
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    /// Vertical projection scale: `1 / tan(fov/2)` for perspective,
    /// `1 / half_height` for orthographic.
    pub fn projection_y_scale(&self) -> f32 {
        self.projection_matrix.y_axis.y
    }

    pub fn user_clip_planes(&self) -> &[Plane] {
        &self.user_clip_planes
    }

    /// Frustum planes followed by user clip planes (at most `MAX_CULLING_PLANES`).
    pub fn culling_planes(&self) -> Vec<Plane> {
        let mut planes = Vec::with_capacity(MAX_CULLING_PLANES);
        planes.extend_from_slice(&self.frustum.planes);
        planes.extend(self.user_clip_planes.iter().copied());
        planes.truncate(MAX_CULLING_PLANES);
        planes
    }

    /// Layers rendered by this camera (bit per layer).
    pub fn culling_mask(&self) -> u32 {
        self.culling_mask
    }

    /// Per-layer cull distances (0 = use the far plane).
    pub fn layer_cull_distances(&self) -> &[f32; MAX_LAYERS] {
        &self.layer_cull_distances
    }

    /// True if any layer has a cull distance.
    pub fn has_layer_cull_distances(&self) -> bool {
        self.layer_cull_distances.iter().any(|&d| d > 0.0)
    }

    /// Spherical (distance from eye) instead of planar layer culling.
    pub fn layer_cull_spherical(&self) -> bool {
        self.layer_cull_spherical
    }

    // ===== SETTERS (store, compute nothing) =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    pub fn set_near_far(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    pub fn set_culling_mask(&mut self, mask: u32) {
        self.culling_mask = mask;
    }

    pub fn set_layer_cull_distances(&mut self, distances: [f32; MAX_LAYERS]) {
        self.layer_cull_distances = distances;
    }

    /// Set one layer's cull distance. Out-of-range layers are ignored.
    pub fn set_layer_cull_distance(&mut self, layer: usize, distance: f32) {
        if let Some(slot) = self.layer_cull_distances.get_mut(layer) {
            *slot = distance;
        }
    }

    pub fn set_layer_cull_spherical(&mut self, spherical: bool) {
        self.layer_cull_spherical = spherical;
    }

    /// Set user clip planes; extra planes beyond `MAX_USER_CLIP_PLANES` are dropped.
    pub fn set_user_clip_planes(&mut self, planes: &[Plane]) {
        let count = planes.len().min(MAX_USER_CLIP_PLANES);
        if count < planes.len() {
            crate::engine_debug!("galaxy3d::Camera",
                "{} user clip planes given, keeping {}", planes.len(), count);
        }
        self.user_clip_planes = planes[..count].to_vec();
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
