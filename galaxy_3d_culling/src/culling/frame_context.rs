/// Per-invocation inputs of the culling pipeline.
///
/// Everything a cull reads is borrowed through this struct; there is no
/// global scene or light state. The borrowed data must not change while a
/// cull is in flight, which the borrow checker enforces for the duration of
/// the context.

use crate::camera::Camera;
use crate::error::Result;
use crate::lighting::LightManager;
use crate::scene::{LodGroupManager, SceneArrays};
use crate::settings::QualitySettings;
use super::occlusion::OcclusionCulling;

#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub scene: &'a SceneArrays,
    pub camera: &'a Camera,
    pub lights: &'a LightManager,
    pub lod_groups: &'a LodGroupManager,
    pub settings: &'a QualitySettings,
    pub occlusion: Option<&'a OcclusionCulling>,
}

impl<'a> FrameContext<'a> {
    /// Build a context, validating the quality settings.
    pub fn new(
        scene: &'a SceneArrays,
        camera: &'a Camera,
        lights: &'a LightManager,
        lod_groups: &'a LodGroupManager,
        settings: &'a QualitySettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            scene,
            camera,
            lights,
            lod_groups,
            settings,
            occlusion: None,
        })
    }

    /// Attach a negotiated occlusion oracle.
    pub fn with_occlusion(mut self, occlusion: &'a OcclusionCulling) -> Self {
        self.occlusion = Some(occlusion);
        self
    }

    /// Shadow distance clamped to the camera far plane.
    pub fn shadow_distance(&self) -> f32 {
        self.settings.shadow_distance.min(self.camera.far())
    }
}
