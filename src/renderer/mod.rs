//! WebGPU rendering module
//!
//! `scene` composes a frame as plain vertices from game state, `pipeline`
//! uploads and draws them. HUD and overlay text live in `overlay` and are
//! shown by the host page.

pub mod overlay;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use overlay::{Hud, Overlay};
pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
