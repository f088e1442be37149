/// Occlusion oracle interface.
///
/// The occlusion middleware is an external black box. The pipeline hands it
/// the camera and the static bounds, gets back the surviving static indices
/// plus an opaque occlusion buffer, and forwards that buffer to later visibility
/// tests (dynamic renderers, local lights). The buffer is owned by
/// `CullResults` and dropped with it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use crate::camera::Camera;
use crate::engine_error;
use crate::error::{Error, Result};
use crate::math::{AABB, Plane, Sphere};
use super::index_list::IndexList;

/// Interface version spoken by this crate
pub const OCCLUSION_INTERFACE_VERSION: u32 = 2;

/// Oldest oracle interface version this crate can drive
pub const MIN_OCCLUSION_INTERFACE_VERSION: u32 = 2;

/// Oracle query failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcclusionQueryError {
    /// Camera is outside the precomputed visibility volume
    OutsideScene,
}

impl fmt::Display for OcclusionQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcclusionQueryError::OutsideScene => write!(f, "camera is outside the occlusion scene"),
        }
    }
}

impl std::error::Error for OcclusionQueryError {}

/// Opaque occlusion state produced by a visibility query.
///
/// The pipeline never inspects it; only the oracle that created it downcasts.
pub struct OcclusionBuffer {
    inner: Box<dyn Any + Send + Sync>,
}

impl OcclusionBuffer {
    pub fn new<T: Any + Send + Sync>(data: T) -> Self {
        Self { inner: Box::new(data) }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for OcclusionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcclusionBuffer").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcclusionVisibility {
    Visible,
    Occluded,
}

/// Result of the static visibility query
#[derive(Debug)]
pub struct StaticVisibility {
    /// Indices into the static renderer array
    pub visible: IndexList,
    pub buffer: OcclusionBuffer,
}

/// External occlusion culling middleware.
///
/// Implementations must be reentrant: independent cull invocations may query
/// the same oracle.
pub trait OcclusionOracle: Send + Sync {
    /// Interface version implemented by the oracle.
    fn interface_version(&self) -> u32;

    /// Frustum and occlusion cull the static renderers.
    fn query_visibility(
        &self,
        camera: &Camera,
        static_bounds: &[AABB],
    ) -> std::result::Result<StaticVisibility, OcclusionQueryError>;

    /// Test a box against the occlusion buffer.
    fn test_aabb(&self, buffer: &OcclusionBuffer, aabb: &AABB) -> OcclusionVisibility;

    /// Test a sphere against the occlusion buffer.
    fn test_sphere(&self, buffer: &OcclusionBuffer, sphere: &Sphere) -> OcclusionVisibility {
        self.test_aabb(buffer, &AABB::from_sphere(sphere))
    }

    /// Narrow the visible local lights (indices into `light_spheres`) to the
    /// ones connected to the visible cells. Default keeps every light.
    fn query_local_light_connectivity(
        &self,
        _buffer: &OcclusionBuffer,
        _visible_lights: &mut IndexList,
        _light_spheres: &[Sphere],
    ) {
    }

    /// Static shadow casters inside the caster planes that can reach visible
    /// receivers, or None when the oracle cannot answer.
    fn query_shadow_casters(
        &self,
        _buffer: &OcclusionBuffer,
        _caster_planes: &[Plane],
        _static_bounds: &[AABB],
    ) -> Option<IndexList> {
        None
    }
}

/// A version-checked occlusion oracle.
#[derive(Clone)]
pub struct OcclusionCulling {
    oracle: Arc<dyn OcclusionOracle>,
    version: u32,
}

impl OcclusionCulling {
    /// Accept an oracle whose interface version lies in the supported range.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleOracle` for any other version.
    pub fn negotiate(oracle: Arc<dyn OcclusionOracle>) -> Result<Self> {
        let version = oracle.interface_version();
        if !(MIN_OCCLUSION_INTERFACE_VERSION..=OCCLUSION_INTERFACE_VERSION).contains(&version) {
            let message = format!(
                "oracle interface version {} not in supported range [{}, {}]",
                version, MIN_OCCLUSION_INTERFACE_VERSION, OCCLUSION_INTERFACE_VERSION,
            );
            engine_error!("galaxy3d::OcclusionCulling", "{}", message);
            return Err(Error::IncompatibleOracle(message));
        }
        Ok(Self { oracle, version })
    }

    pub fn oracle(&self) -> &dyn OcclusionOracle {
        self.oracle.as_ref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl fmt::Debug for OcclusionCulling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcclusionCulling").field("version", &self.version).finish()
    }
}

#[cfg(test)]
#[path = "occlusion_tests.rs"]
mod tests;
