//! Camera module: culling camera and frustum planes.
//!
//! Passive data containers. The caller computes view/projection matrices and
//! the engine only derives what culling needs from them.

mod camera;
mod frustum;

pub use camera::{Camera, MAX_LAYERS, MAX_USER_CLIP_PLANES};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
