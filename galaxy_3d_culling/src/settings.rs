/// Quality settings consumed by the culling pipeline.
///
/// Descriptor struct with engine defaults. `validate()` is called once when a
/// `FrameContext` is built; the per-frame passes then trust the values.

use glam::Vec3;
use crate::engine_bail;
use crate::error::Result;
use crate::lighting::MAX_VERTEX_LIGHTS;

/// Number of directional shadow cascades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowCascades {
    One,
    Two,
    Four,
}

impl ShadowCascades {
    pub fn count(self) -> usize {
        match self {
            ShadowCascades::One => 1,
            ShadowCascades::Two => 2,
            ShadowCascades::Four => 4,
        }
    }
}

/// How directional shadow cascades are fitted to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowProjection {
    /// Tight fit of each split against the scene bounds (sharper, shimmers on rotation)
    CloseFit,
    /// Bounding sphere per split (rotation invariant, texel-snapped)
    StableFit,
}

/// Lightmap configuration of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightmapMode {
    /// Single lightmaps: Auto lights are baked into lightmapped objects
    Single,
    /// Dual lightmaps: Auto lights stay realtime near the camera
    Dual,
}

/// Quality settings for lighting, shadows and LOD
#[derive(Debug, Clone)]
pub struct QualitySettings {
    /// Max number of Auto lights promoted to per-pixel additive lights
    pub pixel_light_count: usize,
    /// Max vertex lights per object (clamped to `MAX_VERTEX_LIGHTS`)
    pub max_vertex_lights: usize,
    /// Distance from the camera beyond which no shadows are rendered
    pub shadow_distance: f32,
    pub shadow_cascades: ShadowCascades,
    pub shadow_projection: ShadowProjection,
    /// Shadow map size in texels (power of two)
    pub shadow_resolution: u32,
    pub lightmap_mode: LightmapMode,
    /// Multiplier on screen-relative height before LOD selection
    pub lod_bias: f32,
    /// Light probes carry direct lighting of Auto lights
    pub use_light_probes_direct: bool,
    /// Ambient color (linear RGB), folded into the SH of every object
    pub ambient_light: Vec3,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            pixel_light_count: 4,
            max_vertex_lights: MAX_VERTEX_LIGHTS,
            shadow_distance: 150.0,
            shadow_cascades: ShadowCascades::Four,
            shadow_projection: ShadowProjection::StableFit,
            shadow_resolution: 1024,
            lightmap_mode: LightmapMode::Single,
            lod_bias: 1.0,
            use_light_probes_direct: false,
            ambient_light: Vec3::splat(0.2),
        }
    }
}

impl QualitySettings {
    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<()> {
        if self.max_vertex_lights > MAX_VERTEX_LIGHTS {
            engine_bail!("galaxy3d::QualitySettings",
                "max_vertex_lights {} exceeds {}", self.max_vertex_lights, MAX_VERTEX_LIGHTS);
        }
        if !(self.shadow_distance.is_finite() && self.shadow_distance >= 0.0) {
            engine_bail!("galaxy3d::QualitySettings",
                "shadow_distance {} must be finite and non-negative", self.shadow_distance);
        }
        if !self.shadow_resolution.is_power_of_two()
            || !(16..=8192).contains(&self.shadow_resolution)
        {
            engine_bail!("galaxy3d::QualitySettings",
                "shadow_resolution {} must be a power of two in [16, 8192]", self.shadow_resolution);
        }
        if !(self.lod_bias.is_finite() && self.lod_bias > 0.0) {
            engine_bail!("galaxy3d::QualitySettings",
                "lod_bias {} must be positive", self.lod_bias);
        }
        if !self.ambient_light.is_finite() {
            engine_bail!("galaxy3d::QualitySettings", "ambient_light must be finite");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
