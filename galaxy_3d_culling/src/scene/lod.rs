/// LOD groups: per-camera active LOD level selection.
///
/// Each group has screen-relative height thresholds, one per level, in
/// decreasing order. The active level is the first whose threshold is not
/// above the group's projected height; nodes tag the levels they belong to
/// with `SceneNode::lod_index_mask`.

use glam::Vec3;
use crate::camera::Camera;

/// Max LOD levels per group (bits of `lod_index_mask`)
pub const MAX_LOD_LEVELS: usize = 8;

/// Default width of the cross-fade band, as a fraction of a level's interval
pub const DEFAULT_LOD_FADE_WIDTH: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct LodGroup {
    /// World position the distance is measured from
    pub reference_point: Vec3,
    /// World-space size of the group (largest bounds axis)
    pub world_size: f32,
    /// Screen-relative heights in (0, 1], decreasing, one per level
    pub thresholds: Vec<f32>,
    pub fade_width: f32,
    pub enabled: bool,
}

impl LodGroup {
    pub fn new(reference_point: Vec3, world_size: f32, thresholds: Vec<f32>) -> Self {
        let mut thresholds = thresholds;
        thresholds.truncate(MAX_LOD_LEVELS);
        Self {
            reference_point,
            world_size,
            thresholds,
            fade_width: DEFAULT_LOD_FADE_WIDTH,
            enabled: true,
        }
    }

    /// Active level mask and fade factor for a projected relative height.
    ///
    /// Returns mask 0 when the group is smaller than every threshold.
    pub fn select(&self, relative_height: f32) -> (u8, f32) {
        let mut upper = 1.0_f32.max(self.thresholds.first().copied().unwrap_or(1.0));
        for (level, &threshold) in self.thresholds.iter().enumerate() {
            if relative_height >= threshold {
                let interval = upper - threshold;
                let fade = if interval <= 0.0 || self.fade_width <= 0.0 {
                    1.0
                } else {
                    ((relative_height - threshold) / interval / self.fade_width).clamp(0.0, 1.0)
                };
                return (1 << level, fade);
            }
            upper = threshold;
        }
        (0, 0.0)
    }
}

/// Active LOD masks and fades for one camera, indexed by group.
#[derive(Debug, Clone, Default)]
pub struct LodData {
    pub masks: Vec<u8>,
    pub fades: Vec<f32>,
}

impl LodData {
    /// Active mask of a group; out-of-range groups have every level active.
    pub fn mask(&self, group: usize) -> u8 {
        self.masks.get(group).copied().unwrap_or(u8::MAX)
    }

    pub fn fade(&self, group: usize) -> f32 {
        self.fades.get(group).copied().unwrap_or(1.0)
    }
}

/// Owns the LOD groups of a scene.
#[derive(Debug, Clone, Default)]
pub struct LodGroupManager {
    groups: Vec<LodGroup>,
}

impl LodGroupManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group, returning its index for `SceneNode::lod_group`.
    pub fn add_group(&mut self, group: LodGroup) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn group(&self, index: usize) -> Option<&LodGroup> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut LodGroup> {
        self.groups.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Compute the active level of every group for a camera.
    pub fn compute_lod_data(&self, camera: &Camera, lod_bias: f32) -> LodData {
        let mut data = LodData {
            masks: Vec::with_capacity(self.groups.len()),
            fades: Vec::with_capacity(self.groups.len()),
        };
        let eye = camera.position();
        let y_scale = camera.projection_y_scale();

        for group in &self.groups {
            if !group.enabled {
                data.masks.push(u8::MAX);
                data.fades.push(1.0);
                continue;
            }
            let height = if camera.is_orthographic() {
                group.world_size * y_scale * 0.5
            } else {
                let distance = (group.reference_point - eye).length();
                if distance <= f32::EPSILON {
                    f32::INFINITY
                } else {
                    group.world_size * y_scale / (2.0 * distance)
                }
            };
            let (mask, fade) = group.select(height * lod_bias);
            data.masks.push(mask);
            data.fades.push(fade);
        }
        data
    }
}

#[cfg(test)]
#[path = "lod_tests.rs"]
mod tests;
