//! Platform abstraction layer
//!
//! - `input`: raw key events → held intents and one-shot triggers
//! - `web`: browser host (canvas, animation frame loop, DOM HUD), wasm32 only

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Action, InputAdapter, map_key};
