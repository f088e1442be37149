/// Light records and the light manager.
///
/// Lights are plain `Copy` values owned by a `LightManager` slot map. The
/// culling passes snapshot them into `ActiveLight`s; nothing holds a reference
/// to the manager after `find_and_cull_active_lights` returns.

use glam::{Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::math::{AABB, Plane, Sphere};
use crate::camera::Frustum;

new_key_type! {
    /// Stable key of a light within a LightManager.
    pub struct LightKey;
}

/// Sort bias per render mode (Auto, Important, NotImportant).
///
/// Important lights always sort ahead of any Auto light, NotImportant behind.
pub const RENDER_MODE_SORT_BIAS: [f32; 3] = [0.0, 1000.0, -1000.0];

/// Distance attenuation constant of local lights
const ATTENUATION_CONSTANT: f32 = 25.0;

/// Near plane of a spot frustum, as a fraction of its range
const SPOT_NEAR_FRACTION: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Spot,
    Directional,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightRenderMode {
    Auto = 0,
    Important = 1,
    NotImportant = 2,
}

impl LightRenderMode {
    pub fn sort_bias(self) -> f32 {
        RENDER_MODE_SORT_BIAS[self as usize]
    }
}

/// How a light interacts with baked lightmaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightmappingMode {
    RealtimeOnly,
    /// Baked for lightmapped objects, realtime for the rest
    Auto,
    BakedOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowType {
    None,
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    /// World position (ignored by directional lights)
    pub position: Vec3,
    /// Unit direction the light travels (spot and directional)
    pub direction: Vec3,
    /// Linear RGB
    pub color: Vec3,
    pub intensity: f32,
    pub range: f32,
    /// Full cone angle in degrees
    pub spot_angle: f32,
    pub shadows: ShadowType,
    pub shadow_near_plane: f32,
    pub culling_mask: u32,
    pub has_cookie: bool,
    pub render_mode: LightRenderMode,
    pub lightmapping: LightmappingMode,
    pub enabled: bool,
}

impl Light {
    fn base(light_type: LightType, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            color,
            intensity,
            range: 10.0,
            spot_angle: 30.0,
            shadows: ShadowType::None,
            shadow_near_plane: 0.2,
            culling_mask: u32::MAX,
            has_cookie: false,
            render_mode: LightRenderMode::Auto,
            lightmapping: LightmappingMode::RealtimeOnly,
            enabled: true,
        }
    }

    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            ..Self::base(LightType::Directional, color, intensity)
        }
    }

    pub fn point(position: Vec3, range: f32, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            range,
            ..Self::base(LightType::Point, color, intensity)
        }
    }

    pub fn spot(position: Vec3, direction: Vec3, range: f32, spot_angle: f32, color: Vec3, intensity: f32) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            range,
            spot_angle,
            ..Self::base(LightType::Spot, color, intensity)
        }
    }

    pub fn with_shadows(mut self, shadows: ShadowType) -> Self {
        self.shadows = shadows;
        self
    }

    pub fn with_render_mode(mut self, mode: LightRenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn with_lightmapping(mut self, mode: LightmappingMode) -> Self {
        self.lightmapping = mode;
        self
    }

    pub fn with_culling_mask(mut self, mask: u32) -> Self {
        self.culling_mask = mask;
        self
    }

    pub fn with_cookie(mut self) -> Self {
        self.has_cookie = true;
        self
    }

    /// Perceptual luminance of the color.
    pub fn greyscale(&self) -> f32 {
        self.color.dot(Vec3::new(0.30, 0.59, 0.11))
    }

    pub fn casts_shadows(&self) -> bool {
        self.shadows != ShadowType::None
    }

    pub fn is_local(&self) -> bool {
        self.light_type != LightType::Directional
    }

    /// World to light-space view transform (light looks along `direction`).
    pub fn world_to_light(&self) -> Mat4 {
        let up = if self.direction.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::X } else { Vec3::Y };
        Mat4::look_to_rh(self.position, self.direction, up)
    }

    /// Sphere enclosing the lit volume. Infinite for directional lights.
    pub fn bounding_sphere(&self) -> Sphere {
        match self.light_type {
            LightType::Directional => Sphere::new(Vec3::ZERO, f32::INFINITY),
            LightType::Point => Sphere::new(self.position, self.range),
            LightType::Spot => {
                let cos_half = (self.spot_angle.to_radians() * 0.5).cos();
                let radius = if cos_half > f32::EPSILON { self.range / cos_half } else { self.range };
                Sphere::new(self.position, radius)
            }
        }
    }

    /// World bounds of the lit volume (point: sphere box, spot: cone box).
    pub fn world_bounds(&self) -> AABB {
        match self.light_type {
            LightType::Directional => AABB::new(Vec3::ZERO, Vec3::splat(f32::INFINITY)),
            LightType::Point => AABB::new(self.position, Vec3::splat(self.range)),
            LightType::Spot => {
                let forward = self.direction.try_normalize().unwrap_or(Vec3::NEG_Z);
                let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 { Vec3::X } else { Vec3::Y };
                let side = forward.cross(up).normalize();
                let up = side.cross(forward);
                let half_size = self.range * (self.spot_fov() * 0.5).tan();
                let far_center = self.position + forward * self.range;
                let mut min = self.position;
                let mut max = self.position;
                for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                    let corner = far_center + side * (sx * half_size) + up * (sy * half_size);
                    min = min.min(corner);
                    max = max.max(corner);
                }
                AABB::from_min_max(min, max)
            }
        }
    }

    /// Near plane of the spot frustum used for lighting.
    pub fn spot_near(&self) -> f32 {
        (self.range * SPOT_NEAR_FRACTION).max(1e-4)
    }

    /// Full cone angle in radians, kept away from 0 and 180 degrees.
    fn spot_fov(&self) -> f32 {
        self.spot_angle.to_radians().clamp(1e-3, std::f32::consts::PI - 1e-3)
    }

    /// Perspective projection of a spot light's cone.
    pub fn spot_projection(&self, near: f32) -> Mat4 {
        Mat4::perspective_rh(self.spot_fov(), 1.0, near, self.range.max(near * 2.0))
    }

    /// `spot_projection * world_to_light`
    pub fn spot_frustum_matrix(&self, near: f32) -> Mat4 {
        self.spot_projection(near) * self.world_to_light()
    }

    /// Six world-space planes of the spot cone frustum used for lighting.
    pub fn spot_planes(&self) -> [Plane; 6] {
        Frustum::from_view_projection(&self.spot_frustum_matrix(self.spot_near())).planes
    }

    /// Spot frustum planes expressed in a node's local space.
    ///
    /// `world_to_light` is applied before `node_to_world` so large world
    /// coordinates cancel out before the projection.
    pub fn spot_planes_for_node(&self, near: f32, node_to_world: &Mat4) -> [Plane; 6] {
        let node_to_light = self.world_to_light() * *node_to_world;
        Frustum::from_view_projection(&(self.spot_projection(near) * node_to_light)).planes
    }

    /// Distance attenuation at a point: 1 for directional lights, 0 outside
    /// the range of local lights.
    pub fn attenuation_at_point(&self, point: Vec3) -> f32 {
        match self.light_type {
            LightType::Directional => 1.0,
            LightType::Point | LightType::Spot => {
                let range_sq = self.range * self.range;
                let dist_sq = point.distance_squared(self.position);
                if range_sq <= 0.0 || dist_sq > range_sq {
                    0.0
                } else {
                    1.0 / (1.0 + ATTENUATION_CONSTANT * dist_sq / range_sq)
                }
            }
        }
    }

    /// Greyscale intensity received at a point.
    pub fn intensity_at_point(&self, point: Vec3) -> f32 {
        self.greyscale() * self.intensity * self.attenuation_at_point(point)
    }
}

/// All lights of a scene.
#[derive(Debug, Default)]
pub struct LightManager {
    lights: SlotMap<LightKey, Light>,
}

impl LightManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, light: Light) -> LightKey {
        self.lights.insert(light)
    }

    pub fn remove(&mut self, key: LightKey) -> Option<Light> {
        self.lights.remove(key)
    }

    pub fn get(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    pub fn get_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightKey, &Light)> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
