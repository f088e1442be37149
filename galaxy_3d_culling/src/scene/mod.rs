//! Scene module: the flat spatial arrays culling reads from.
//!
//! Renderers are referenced through the `Renderable` capability interface and
//! laid out in per-group parallel node/bounds arrays. LOD groups select the
//! active level per camera.

mod scene_node;
mod simple_renderable;
mod scene_arrays;
mod lod;

pub use scene_node::{
    MaterialInfo, Renderable, RendererFlags, RendererId, SceneNode, TransformType,
};
pub use simple_renderable::SimpleRenderable;
pub use scene_arrays::{RendererArray, RendererGroup, SceneArrays, RENDERER_GROUP_COUNT};
pub use lod::{LodData, LodGroup, LodGroupManager, DEFAULT_LOD_FADE_WIDTH, MAX_LOD_LEVELS};
