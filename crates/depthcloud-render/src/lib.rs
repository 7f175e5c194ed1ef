//! wgpu rendering backend for depthcloud-rs.
//!
//! This crate turns prepared capture samples into draw calls:
//! - [`engine`] — device/queue/surface setup and the per-frame renderer
//! - [`texture_cache`] — reusable GPU textures over capture pixel buffers
//! - [`frame_plan`] — the pure per-frame preparation stage
//! - [`uniforms`] — the per-draw uniform block fed to the shader

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod engine;
pub mod error;
pub mod frame_plan;
pub mod texture_cache;
pub mod uniforms;

pub use engine::{FrameOutcome, RenderEngine, DEPTH_FORMAT};
pub use error::{RenderError, RenderResult};
pub use frame_plan::FramePlan;
pub use texture_cache::TextureCache;
pub use uniforms::FrameUniforms;
