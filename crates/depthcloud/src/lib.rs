//! depthcloud-rs — a live, orbit-navigable point-cloud viewer for depth
//! cameras.
//!
//! A capture subsystem delivers synchronized depth + color samples; this
//! crate renders each one as a GPU point cloud (one point per depth pixel)
//! and lets gesture input orbit the viewpoint around a fixed target,
//! concurrently with rendering.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use depthcloud_rs::{CloudView, ColorImage, DepthFrame, DepthMap, Intrinsics, ViewOptions};
//!
//! fn deliver(view: &mut CloudView, depth: &[f32], color: &[u8]) {
//!     let frame = DepthFrame::new(
//!         DepthMap::new(256, 192, depth).expect("depth plane"),
//!         ColorImage::new(640, 480, color).expect("color plane"),
//!         Some(Intrinsics::new(580.0, 580.0, 320.0, 240.0, 640, 480)),
//!     );
//!     view.submit_frame(&frame);
//! }
//!
//! fn orbit(view: &CloudView, drag_px: (f32, f32)) {
//!     let scale = view.options().degrees_per_pixel;
//!     view.yaw(drag_px.0 * scale);
//!     view.pitch(drag_px.1 * scale);
//! }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod view;

pub use view::CloudView;

pub use depthcloud_core::{
    CameraState, ColorImage, CoreError, DepthFrame, DepthMap, Intrinsics, OrbitCamera,
    ViewOptions, DEFAULT_EYE, DEFAULT_TARGET, DEFAULT_UP,
};
pub use depthcloud_render::{
    FrameOutcome, FramePlan, RenderEngine, RenderError, RenderResult,
};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Vec3};
