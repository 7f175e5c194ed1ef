//! Core domain logic for depthcloud-rs.
//!
//! This crate holds everything that does not touch the GPU:
//! - [`math`] — projection, view, and rotation matrix construction
//! - [`orbit`] — the orbit camera state and its cross-thread discipline
//! - [`intrinsics`] — camera calibration data and per-frame rescaling
//! - [`frame`] — synchronized depth + color capture sample types
//! - [`options`] — view configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// GPU / graphics code casts dimensions to f32 throughout
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod frame;
pub mod intrinsics;
pub mod math;
pub mod options;
pub mod orbit;

pub use error::{CoreError, Result};
pub use frame::{ColorImage, DepthFrame, DepthMap};
pub use intrinsics::Intrinsics;
pub use options::ViewOptions;
pub use orbit::{CameraState, OrbitCamera, DEFAULT_EYE, DEFAULT_TARGET, DEFAULT_UP};

// Re-export glam types for convenience
pub use glam::{Mat3, Mat4, Vec3};
