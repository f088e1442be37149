/// Flat spatial arrays: per-group parallel SceneNode / AABB arrays.
///
/// Culling outputs are `IndexList`s holding indices into one of these arrays.
/// The arrays are owned by the host and must not change while a cull runs.

use std::sync::Arc;
use crate::engine_error;
use crate::error::{Error, Result};
use crate::math::AABB;
use super::scene_node::{Renderable, SceneNode};

/// Renderer groups, culled in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererGroup {
    /// Static renderers (candidates for the occlusion oracle)
    Static = 0,
    Dynamic = 1,
    /// Immediate-mode renderers submitted to the whole scene
    SceneIntermediate = 2,
    /// Immediate-mode renderers submitted to one camera
    CameraIntermediate = 3,
}

pub const RENDERER_GROUP_COUNT: usize = 4;

impl RendererGroup {
    pub const ALL: [RendererGroup; RENDERER_GROUP_COUNT] = [
        RendererGroup::Static,
        RendererGroup::Dynamic,
        RendererGroup::SceneIntermediate,
        RendererGroup::CameraIntermediate,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Parallel node / bounds arrays of one renderer group.
#[derive(Debug, Clone, Default)]
pub struct RendererArray {
    nodes: Vec<SceneNode>,
    bounds: Vec<AABB>,
}

impl RendererArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolated` if the lengths differ.
    pub fn from_parts(nodes: Vec<SceneNode>, bounds: Vec<AABB>) -> Result<Self> {
        if nodes.len() != bounds.len() {
            let message = format!(
                "renderer array has {} nodes but {} bounds", nodes.len(), bounds.len());
            engine_error!("galaxy3d::SceneArrays", "{}", message);
            return Err(Error::PreconditionViolated(message));
        }
        Ok(Self { nodes, bounds })
    }

    /// Append a node with its world bounds.
    pub fn push(&mut self, node: SceneNode, bounds: AABB) -> usize {
        self.nodes.push(node);
        self.bounds.push(bounds);
        self.nodes.len() - 1
    }

    /// Append a renderer, taking bounds from its world AABB.
    pub fn push_renderer(&mut self, renderer: Arc<dyn Renderable>) -> usize {
        let bounds = renderer.world_aabb();
        self.push(SceneNode::new(renderer), bounds)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &SceneNode {
        &self.nodes[index]
    }

    pub fn node_mut(&mut self, index: usize) -> &mut SceneNode {
        &mut self.nodes[index]
    }

    pub fn aabb(&self, index: usize) -> &AABB {
        &self.bounds[index]
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn bounds(&self) -> &[AABB] {
        &self.bounds
    }
}

/// All renderer groups of a scene.
#[derive(Debug, Clone, Default)]
pub struct SceneArrays {
    groups: [RendererArray; RENDERER_GROUP_COUNT],
}

impl SceneArrays {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, group: RendererGroup) -> &RendererArray {
        &self.groups[group.index()]
    }

    pub fn group_mut(&mut self, group: RendererGroup) -> &mut RendererArray {
        &mut self.groups[group.index()]
    }

    /// Total renderer count across groups.
    pub fn renderer_count(&self) -> usize {
        self.groups.iter().map(RendererArray::len).sum()
    }

    /// Union of the bounds of every live renderer, None for an empty scene.
    pub fn scene_bounds(&self) -> Option<AABB> {
        self.groups
            .iter()
            .flat_map(|array| array.nodes.iter().zip(array.bounds.iter()))
            .filter(|(node, _)| node.renderer.is_some() && !node.disabled)
            .map(|(_, aabb)| *aabb)
            .reduce(|acc, aabb| acc.union(&aabb))
    }
}

#[cfg(test)]
#[path = "scene_arrays_tests.rs"]
mod tests;
