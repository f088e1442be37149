/// Mock occlusion oracle for unit tests (no middleware required)
///
/// Occluders are boxes: anything fully inside one is hidden. Static
/// visibility is a frustum cull with the camera planes followed by that test.

#[cfg(test)]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(test)]
use crate::camera::Camera;
#[cfg(test)]
use crate::math::{AABB, Plane, Sphere};
#[cfg(test)]
use super::frustum_culler::{frustum_cull, is_aabb_in_planes, ALL_PLANES};
#[cfg(test)]
use super::index_list::IndexList;
#[cfg(test)]
use super::occlusion::{
    OcclusionBuffer, OcclusionOracle, OcclusionQueryError, OcclusionVisibility,
    StaticVisibility, OCCLUSION_INTERFACE_VERSION,
};

#[cfg(test)]
#[derive(Debug)]
pub struct MockOcclusionOracle {
    pub version: u32,
    pub outside_scene: bool,
    pub occluders: Vec<AABB>,
    /// Light indices dropped by the connectivity query
    pub disconnected_lights: Vec<usize>,
    /// Static casters returned by `query_shadow_casters`
    pub shadow_casters: Option<Vec<usize>>,
    pub queries: AtomicU32,
}

#[cfg(test)]
impl MockOcclusionOracle {
    pub fn new() -> Self {
        Self {
            version: OCCLUSION_INTERFACE_VERSION,
            outside_scene: false,
            occluders: Vec::new(),
            disconnected_lights: Vec::new(),
            shadow_casters: None,
            queries: AtomicU32::new(0),
        }
    }

    pub fn query_count(&self) -> u32 {
        self.queries.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
fn hidden(occluders: &[AABB], aabb: &AABB) -> bool {
    occluders.iter().any(|occluder| occluder.contains(aabb))
}

#[cfg(test)]
impl OcclusionOracle for MockOcclusionOracle {
    fn interface_version(&self) -> u32 {
        self.version
    }

    fn query_visibility(
        &self,
        camera: &Camera,
        static_bounds: &[AABB],
    ) -> Result<StaticVisibility, OcclusionQueryError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if self.outside_scene {
            return Err(OcclusionQueryError::OutsideScene);
        }
        let mut visible = IndexList::default();
        frustum_cull(static_bounds, &camera.culling_planes(), ALL_PLANES, &mut visible);
        visible.retain(|i| !hidden(&self.occluders, &static_bounds[i]));
        Ok(StaticVisibility {
            visible,
            buffer: OcclusionBuffer::new(self.occluders.clone()),
        })
    }

    fn test_aabb(&self, buffer: &OcclusionBuffer, aabb: &AABB) -> OcclusionVisibility {
        let occluders = buffer.downcast_ref::<Vec<AABB>>().map(Vec::as_slice).unwrap_or(&[]);
        if hidden(occluders, aabb) {
            OcclusionVisibility::Occluded
        } else {
            OcclusionVisibility::Visible
        }
    }

    fn query_local_light_connectivity(
        &self,
        _buffer: &OcclusionBuffer,
        visible_lights: &mut IndexList,
        _light_spheres: &[Sphere],
    ) {
        visible_lights.retain(|i| !self.disconnected_lights.contains(&i));
    }

    fn query_shadow_casters(
        &self,
        _buffer: &OcclusionBuffer,
        caster_planes: &[Plane],
        static_bounds: &[AABB],
    ) -> Option<IndexList> {
        let casters = self.shadow_casters.as_ref()?;
        let mut list = IndexList::default();
        for &i in casters {
            if is_aabb_in_planes(&static_bounds[i], caster_planes, ALL_PLANES) {
                list.push(i);
            }
        }
        Some(list)
    }
}
