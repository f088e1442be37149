/// Active lights: the lights affecting one camera this frame.
///
/// Stored in one array with a fixed bucket order:
/// directional, spot, point, off-screen spot, off-screen point.
/// When a main directional light exists it sits at index 0.

use std::ops::Range;
use crate::math::{AABB, Sphere};
use super::light::{Light, LightKey, LightType, LightmappingMode};

/// Normalized viewport rectangle ([0, 1] on both axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub const FULL: ScreenRect = ScreenRect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
    pub const EMPTY: ScreenRect = ScreenRect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[derive(Debug, Clone)]
pub struct ActiveLight {
    pub key: LightKey,
    /// Snapshot of the light at cull time
    pub light: Light,
    pub bounding_box: AABB,
    pub bounding_sphere: Sphere,
    pub screen_rect: ScreenRect,
    pub culling_mask: u32,
    pub light_type: LightType,
    pub lightmapping: LightmappingMode,
    /// Intersects the view frustum
    pub is_visible_in_prepass: bool,
    /// Outside the frustum but within the off-screen band: vertex lighting only
    pub is_offscreen_vertex_light: bool,
    /// 1 for visible lights, fading to 0 across the off-screen band
    pub visibility_fade: f32,
    /// Can cast shadows onto something within the shadow distance
    pub inside_shadow_range: bool,
}

impl ActiveLight {
    pub fn new(key: LightKey, light: Light) -> Self {
        Self {
            key,
            bounding_box: light.world_bounds(),
            bounding_sphere: light.bounding_sphere(),
            screen_rect: ScreenRect::FULL,
            culling_mask: light.culling_mask,
            light_type: light.light_type,
            lightmapping: light.lightmapping,
            is_visible_in_prepass: true,
            is_offscreen_vertex_light: false,
            visibility_fade: 1.0,
            inside_shadow_range: true,
            light,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActiveLights {
    pub lights: Vec<ActiveLight>,
    pub num_dir_lights: usize,
    pub num_spot_lights: usize,
    pub num_point_lights: usize,
    pub num_off_screen_spot_lights: usize,
    pub num_off_screen_point_lights: usize,
    pub has_main_light: bool,
}

impl ActiveLights {
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ActiveLight> {
        self.lights.get(index)
    }

    pub fn main_light(&self) -> Option<&ActiveLight> {
        if self.has_main_light { self.lights.first() } else { None }
    }

    /// Index ranges of the five buckets, in storage order.
    pub fn buckets(&self) -> [Range<usize>; 5] {
        let counts = [
            self.num_dir_lights,
            self.num_spot_lights,
            self.num_point_lights,
            self.num_off_screen_spot_lights,
            self.num_off_screen_point_lights,
        ];
        let mut start = 0;
        counts.map(|count| {
            let range = start..start + count;
            start += count;
            range
        })
    }

    pub fn directional_range(&self) -> Range<usize> {
        0..self.num_dir_lights
    }

    /// Every local light, on-screen and off-screen.
    pub fn local_range(&self) -> Range<usize> {
        self.num_dir_lights..self.lights.len()
    }

    /// Counts sum to the array length, every bucket holds its light type and
    /// the main light (if any) is directional.
    pub fn is_consistent(&self) -> bool {
        let [dir, spot, point, off_spot, off_point] = self.buckets();
        if off_point.end != self.lights.len() {
            return false;
        }
        let holds = |range: Range<usize>, kind: LightType, offscreen: bool| {
            self.lights[range].iter().all(|l| l.light_type == kind && l.is_offscreen_vertex_light == offscreen)
        };
        let main_ok = !self.has_main_light
            || self.lights.first().is_some_and(|l| l.light_type == LightType::Directional);
        main_ok
            && holds(dir, LightType::Directional, false)
            && holds(spot, LightType::Spot, false)
            && holds(point, LightType::Point, false)
            && holds(off_spot, LightType::Spot, true)
            && holds(off_point, LightType::Point, true)
    }
}

#[cfg(test)]
#[path = "active_lights_tests.rs"]
mod tests;
