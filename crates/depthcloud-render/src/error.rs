//! Rendering error types.
//!
//! Everything here is fatal at setup time: a missing adapter or device is
//! unrecoverable environment misconfiguration, so engine construction fails
//! instead of attempting a degraded render path. Per-frame failures are not
//! errors — the frame is dropped and the pipeline resumes on the next
//! sample.

use thiserror::Error;

/// Errors that can occur while setting up the render engine.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
