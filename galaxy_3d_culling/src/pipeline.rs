/// Culling pipeline: per-camera orchestration of every culling stage.
///
/// Stage order for one camera:
///
/// ```text
/// LOD data -> CullScene -> [LIGHTING] CullLights -> CullSendEvents
///          -> [LIGHTING] per-object lights -> [Forward/VertexLit] light buckets
///          -> [SHADOWS] per shadowed light: caster volume, casters, cascades
/// ```
///
/// A pipeline owns the frame arena its index lists come from and the set of
/// renderers it last reported visible. One pipeline per camera: visibility
/// events are tracked per pipeline.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::culling::{
    cull_scene_frustum, cull_scene_with_occlusion, CullFlags, CullResults, CullingParameters,
    FrameArena, FrameContext, IndexList, RenderingPath, SceneCullOutput, TransformInfo, VisibleNode,
};
use crate::engine_debug;
use crate::lighting::{
    cull_per_object_lights, find_and_cull_active_lights, find_forward_lights_for_object,
    ActiveLights, ObjectLightIndices,
};
use crate::scene::{LodData, Renderable, RendererFlags, RendererGroup, RendererId, RENDERER_GROUP_COUNT};
use crate::shadows::{cull_light_shadows, needs_shadow_cull, ShadowCullData};

pub struct CullingPipeline {
    arena: FrameArena,
    /// Renderers with a cull callback reported visible by the last cull
    visible_renderers: FxHashMap<RendererId, Arc<dyn Renderable>>,
}

impl CullingPipeline {
    pub fn new() -> Self {
        Self {
            arena: FrameArena::new(),
            visible_renderers: FxHashMap::default(),
        }
    }

    pub fn arena(&self) -> &FrameArena {
        &self.arena
    }

    /// Number of renderers currently reported visible through callbacks.
    pub fn tracked_visible_count(&self) -> usize {
        self.visible_renderers.len()
    }

    /// Run every stage enabled by `params` for the context's camera.
    pub fn cull(&mut self, ctx: &FrameContext, params: &CullingParameters) -> CullResults {
        let lod_data = ctx.lod_groups.compute_lod_data(ctx.camera, ctx.settings.lod_bias);

        let SceneCullOutput { visible, occlusion_buffer, used_occlusion } =
            if params.flags.contains(CullFlags::OCCLUSION_CULLING) {
                cull_scene_with_occlusion(ctx, &lod_data, &mut self.arena)
            } else {
                cull_scene_frustum(ctx, &lod_data, &mut self.arena)
            };

        let lighting = params.flags.contains(CullFlags::LIGHTING);
        let active_lights = if lighting {
            find_and_cull_active_lights(ctx, occlusion_buffer.as_ref())
        } else {
            ActiveLights::default()
        };

        if params.flags.contains(CullFlags::SEND_EVENTS) {
            self.send_visibility_events(ctx, &visible);
        }
        let visible_nodes = cache_visible_nodes(ctx, &visible, &lod_data);

        let object_lights = if lighting {
            cull_per_object_lights(&active_lights, &visible_nodes, ctx.settings.lightmap_mode)
        } else {
            unlit_object_lights(visible_nodes.len())
        };

        let path = params.rendering_path;
        let forward_lights = if !lighting || path == RenderingPath::Deferred {
            Vec::new()
        } else {
            let vertex_lit = path == RenderingPath::VertexLit;
            visible_nodes
                .iter()
                .enumerate()
                .map(|(i, node)| {
                    find_forward_lights_for_object(
                        &active_lights,
                        object_lights.lights_for(i),
                        node.transform.world_aabb.center,
                        node.flags.contains(RendererFlags::LIGHTMAPPED),
                        ctx.settings,
                        vertex_lit,
                    )
                })
                .collect()
        };

        let mut results = CullResults {
            visible,
            visible_nodes,
            active_lights,
            object_lights,
            forward_lights,
            lod_data,
            occlusion_buffer,
            used_occlusion,
            shadow_cull_data: None,
            shadows: Vec::new(),
        };

        if lighting && params.flags.contains(CullFlags::SHADOWS) {
            self.cull_shadows(ctx, &mut results);
        }

        engine_debug!("galaxy3d::CullingPipeline",
            "{} visible renderers, {} active lights, {} shadowed lights{}",
            results.visible_nodes.len(),
            results.active_lights.len(),
            results.shadows.len(),
            if results.used_occlusion { " (occlusion)" } else { "" });

        results
    }

    /// Shadow cull every shadowed, visible, in-range active light of `results`.
    pub fn cull_shadows(&mut self, ctx: &FrameContext, results: &mut CullResults) {
        let data = ShadowCullData::new(ctx);
        let mut shadows = Vec::new();
        for index in 0..results.active_lights.len() {
            if !needs_shadow_cull(&results.active_lights, index) {
                continue;
            }
            if let Some(light_shadows) = cull_light_shadows(
                ctx,
                &data,
                &results.active_lights,
                index,
                results.occlusion_buffer.as_ref(),
                &results.lod_data,
                &mut self.arena,
            ) {
                shadows.push(light_shadows);
            }
        }
        results.shadow_cull_data = (!shadows.is_empty()).then_some(data);
        results.shadows = shadows;
    }

    /// Return the index lists of a finished cull to the arena.
    pub fn release(&mut self, results: CullResults) {
        self.arena.release_all(results.visible);
    }

    /// Callback renderers entering or leaving the visible set.
    fn send_visibility_events(&mut self, ctx: &FrameContext, visible: &[IndexList; RENDERER_GROUP_COUNT]) {
        let mut now_visible = FxHashMap::default();
        let mut entered = Vec::new();
        for group in RendererGroup::ALL {
            let array = ctx.scene.group(group);
            for node_index in visible[group.index()].iter() {
                let node = array.node(node_index);
                if !node.needs_cull_callback {
                    continue;
                }
                let Some(renderer) = node.renderer() else { continue };
                let id = renderer.id();
                if !self.visible_renderers.contains_key(&id) {
                    entered.push(Arc::clone(renderer));
                }
                now_visible.insert(id, Arc::clone(renderer));
            }
        }

        for (id, renderer) in &self.visible_renderers {
            if !now_visible.contains_key(id) {
                renderer.on_visibility_changed(false);
            }
        }
        for renderer in &entered {
            renderer.on_visibility_changed(true);
        }
        self.visible_renderers = now_visible;
    }
}

impl Default for CullingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible nodes in group order with their transforms cached.
fn cache_visible_nodes(
    ctx: &FrameContext,
    visible: &[IndexList; RENDERER_GROUP_COUNT],
    lod: &LodData,
) -> Vec<VisibleNode> {
    let mut nodes = Vec::with_capacity(visible.iter().map(IndexList::size).sum());
    for group in RendererGroup::ALL {
        let array = ctx.scene.group(group);
        for node_index in visible[group.index()].iter() {
            let node = array.node(node_index);
            let Some(renderer) = node.renderer() else {
                debug_assert!(false, "visible node {node_index} of {group:?} has no renderer");
                continue;
            };
            let lod_fade = if node.lod_index_mask != 0 { lod.fade(node.lod_group) } else { 1.0 };
            nodes.push(VisibleNode {
                renderer: Arc::clone(renderer),
                group,
                node_index,
                layer: node.layer,
                flags: renderer.flags(),
                transform: TransformInfo::from_renderer(renderer.as_ref()),
                lod_fade,
            });
        }
    }
    nodes
}

/// Empty light rows for every visible node.
fn unlit_object_lights(count: usize) -> ObjectLightIndices {
    let mut table = ObjectLightIndices::with_capacity(count, 0);
    for _ in 0..count {
        table.push_object(std::iter::empty());
    }
    table
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
