/// Scene node types consumed by the culling passes.
///
/// A SceneNode is the per-renderer record of the flat spatial arrays. It
/// references its renderer through the `Renderable` capability interface:
/// culling only ever reads layer, bounds, transform, flags and materials.

use std::sync::Arc;
use bitflags::bitflags;
use glam::{Mat4, Vec3};
use crate::math::AABB;

// ===== RENDERER IDENTITY =====

/// Caller-assigned stable identifier of a renderer.
///
/// Used to track visibility transitions across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RendererId(pub u64);

bitflags! {
    /// Per-renderer lighting/shadow flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RendererFlags: u32 {
        const CAST_SHADOWS    = 1 << 0;
        const RECEIVE_SHADOWS = 1 << 1;
        /// Lit by baked lightmaps (skips baked-only lights)
        const LIGHTMAPPED     = 1 << 2;
    }
}

impl Default for RendererFlags {
    fn default() -> Self {
        RendererFlags::CAST_SHADOWS | RendererFlags::RECEIVE_SHADOWS
    }
}

/// Material slot as seen by culling: enough to emit shadow caster parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialInfo {
    pub material_id: u32,
    pub shader_id: u32,
    /// Index of the shadow caster subshader, None if the material casts no shadow
    pub shadow_caster_subshader: Option<u32>,
}

// ===== RENDERABLE =====

/// Capability interface of a renderer, restricted to what culling reads.
pub trait Renderable: Send + Sync {
    fn id(&self) -> RendererId;

    /// Scene layer (0..32)
    fn layer(&self) -> u32;

    /// Local to world transform
    fn world_matrix(&self) -> Mat4;

    /// Bounds in local space
    fn local_aabb(&self) -> AABB;

    /// Bounds in world space
    fn world_aabb(&self) -> AABB {
        self.local_aabb().transformed(&self.world_matrix())
    }

    fn material_count(&self) -> usize;

    fn material(&self, index: usize) -> Option<MaterialInfo>;

    fn flags(&self) -> RendererFlags;

    /// Called when the renderer enters or leaves the camera's visible set.
    fn on_visibility_changed(&self, _visible: bool) {}
}

// ===== TRANSFORM CLASSIFICATION =====

/// Scale class of a world matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformType {
    /// Rotation and translation only
    NoScale,
    UniformScale,
    NonUniformScale,
}

const SCALE_EPSILON: f32 = 1e-5;

impl TransformType {
    /// Classify a world matrix. Returns the type and the inverse scale
    /// (1 / uniform scale, 1 otherwise).
    pub fn classify(matrix: &Mat4) -> (TransformType, f32) {
        let scale = Vec3::new(
            matrix.x_axis.truncate().length(),
            matrix.y_axis.truncate().length(),
            matrix.z_axis.truncate().length(),
        );
        let uniform = (scale.x - scale.y).abs() < SCALE_EPSILON
            && (scale.x - scale.z).abs() < SCALE_EPSILON;

        if !uniform {
            (TransformType::NonUniformScale, 1.0)
        } else if (scale.x - 1.0).abs() < SCALE_EPSILON {
            (TransformType::NoScale, 1.0)
        } else if scale.x > 0.0 {
            (TransformType::UniformScale, 1.0 / scale.x)
        } else {
            (TransformType::NonUniformScale, 1.0)
        }
    }
}

// ===== SCENE NODE =====

/// Per-renderer record of the spatial arrays.
#[derive(Clone)]
pub struct SceneNode {
    /// None when a static slot has been vacated
    pub renderer: Option<Arc<dyn Renderable>>,
    pub layer: u32,
    /// Index of the LOD group (only read when `lod_index_mask != 0`)
    pub lod_group: usize,
    /// LOD levels this node belongs to (0 = not LOD-managed)
    pub lod_index_mask: u8,
    /// Deliver `on_visibility_changed` callbacks for this node
    pub needs_cull_callback: bool,
    pub disabled: bool,
}

impl SceneNode {
    /// Node for a renderer, taking the layer from the renderer.
    pub fn new(renderer: Arc<dyn Renderable>) -> Self {
        Self {
            layer: renderer.layer(),
            renderer: Some(renderer),
            lod_group: 0,
            lod_index_mask: 0,
            needs_cull_callback: false,
            disabled: false,
        }
    }

    /// Vacated slot (keeps array indices stable).
    pub fn empty() -> Self {
        Self {
            renderer: None,
            layer: 0,
            lod_group: 0,
            lod_index_mask: 0,
            needs_cull_callback: false,
            disabled: false,
        }
    }

    pub fn with_lod(mut self, group: usize, mask: u8) -> Self {
        self.lod_group = group;
        self.lod_index_mask = mask;
        self
    }

    pub fn with_cull_callback(mut self) -> Self {
        self.needs_cull_callback = true;
        self
    }

    pub fn renderer(&self) -> Option<&Arc<dyn Renderable>> {
        self.renderer.as_ref()
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("renderer", &self.renderer.as_ref().map(|r| r.id()))
            .field("layer", &self.layer)
            .field("lod_group", &self.lod_group)
            .field("lod_index_mask", &self.lod_index_mask)
            .field("needs_cull_callback", &self.needs_cull_callback)
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
