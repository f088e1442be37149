/*!
# Galaxy 3D Culling

Per-frame visibility pipeline of the Galaxy 3D engine.

Given a camera, the scene's flat renderer arrays and its lights, the pipeline
produces the visible renderers, the lights affecting the view (bucketed per
object into main / additive / vertex / spherical-harmonic contributions) and,
per shadowed light, the shadow casters sliced into cascades or cube faces.

## Architecture

- **math**: AABB, Sphere, Plane, ConvexHull
- **camera**: Camera and frustum planes
- **scene**: SceneNode, Renderable, flat renderer arrays, LOD groups
- **culling**: IndexList, frustum tests, frame arena, occlusion oracle, scene culling
- **lighting**: active light selection, per-object lights, forward light buckets
- **shadows**: caster volumes, caster culling, directional cascades
- **pipeline**: CullingPipeline, sequencing every stage for one camera

Everything a cull reads is passed through a `FrameContext`; the only global
state is the logger.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod camera;
pub mod settings;
pub mod scene;
pub mod culling;
pub mod lighting;
pub mod shadows;
pub mod pipeline;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Orchestrator
    pub use crate::pipeline::CullingPipeline;

    // Per-frame inputs and outputs
    pub use crate::culling::{CullFlags, CullResults, CullingParameters, FrameContext, RenderingPath};
    pub use crate::settings::QualitySettings;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod math {
        pub use crate::math::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod settings {
        pub use crate::settings::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod culling {
        pub use crate::culling::*;
    }

    pub mod lighting {
        pub use crate::lighting::*;
    }

    pub mod shadows {
        pub use crate::shadows::*;
    }
}

// Re-export math library at crate root
pub use glam;
