//! Host-side error types
//!
//! The simulation itself is closed arithmetic and never fails. These errors only
//! cover bringing up the page surface and reading settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no browser window available")]
    NoWindow,

    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),

    #[error("failed to create render surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
