/// Ready-made `Renderable` backed by plain fields.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use glam::Mat4;
use crate::math::AABB;
use super::scene_node::{MaterialInfo, Renderable, RendererFlags, RendererId};

/// Renderable with fixed transform, bounds and materials.
///
/// Records the last visibility callback so hosts can poll it.
#[derive(Debug)]
pub struct SimpleRenderable {
    id: RendererId,
    layer: u32,
    world_matrix: Mat4,
    local_aabb: AABB,
    materials: Vec<MaterialInfo>,
    flags: RendererFlags,
    visible: AtomicBool,
    visibility_events: AtomicU32,
}

impl SimpleRenderable {
    pub fn new(id: RendererId, world_matrix: Mat4, local_aabb: AABB) -> Self {
        Self {
            id,
            layer: 0,
            world_matrix,
            local_aabb,
            materials: Vec::new(),
            flags: RendererFlags::default(),
            visible: AtomicBool::new(false),
            visibility_events: AtomicU32::new(0),
        }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_flags(mut self, flags: RendererFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_material(mut self, material: MaterialInfo) -> Self {
        self.materials.push(material);
        self
    }

    /// Visibility reported by the last callback.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// Number of visibility callbacks received.
    pub fn visibility_event_count(&self) -> u32 {
        self.visibility_events.load(Ordering::Relaxed)
    }
}

impl Renderable for SimpleRenderable {
    fn id(&self) -> RendererId {
        self.id
    }

    fn layer(&self) -> u32 {
        self.layer
    }

    fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    fn local_aabb(&self) -> AABB {
        self.local_aabb
    }

    fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn material(&self, index: usize) -> Option<MaterialInfo> {
        self.materials.get(index).copied()
    }

    fn flags(&self) -> RendererFlags {
        self.flags
    }

    fn on_visibility_changed(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
        self.visibility_events.fetch_add(1, Ordering::Relaxed);
    }
}
