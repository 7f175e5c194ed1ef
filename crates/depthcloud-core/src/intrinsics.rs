//! Camera calibration intrinsics and per-frame rescaling.

use glam::{Mat3, Vec3};

/// A 3×3 camera calibration matrix together with the resolution it was
/// calibrated at.
///
/// The matrix is column-major: focal lengths on the diagonal of the first
/// two columns, the principal point in the third column, and a homogeneous
/// 1 in the bottom-right entry. The capture subsystem attaches one of these
/// to every frame; the depth map it arrives with is usually a downscaled
/// version of the calibration resolution, so the matrix must be rescaled
/// (see [`Intrinsics::scaled_to`]) before the shader can use it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    /// The calibration matrix at the reference resolution.
    pub matrix: Mat3,
    /// Width of the reference resolution, in pixels.
    pub reference_width: u32,
    /// Height of the reference resolution, in pixels.
    pub reference_height: u32,
}

impl Intrinsics {
    /// Creates intrinsics from focal lengths and the principal point.
    #[must_use]
    pub fn new(
        fx: f32,
        fy: f32,
        cx: f32,
        cy: f32,
        reference_width: u32,
        reference_height: u32,
    ) -> Self {
        Self {
            matrix: Mat3::from_cols(
                Vec3::new(fx, 0.0, 0.0),
                Vec3::new(0.0, fy, 0.0),
                Vec3::new(cx, cy, 1.0),
            ),
            reference_width,
            reference_height,
        }
    }

    /// Creates intrinsics from an existing calibration matrix.
    #[must_use]
    pub fn from_matrix(matrix: Mat3, reference_width: u32, reference_height: u32) -> Self {
        Self {
            matrix,
            reference_width,
            reference_height,
        }
    }

    /// Rescales the calibration matrix to a depth map of `depth_width`
    /// pixels.
    ///
    /// Divides the focal-length and principal-point entries by the ratio of
    /// reference width to actual width; the homogeneous entry is untouched.
    /// The result is valid only for the frame it was computed for and is
    /// recomputed on every frame rather than cached.
    #[must_use]
    pub fn scaled_to(&self, depth_width: u32) -> Mat3 {
        let ratio = self.reference_width as f32 / depth_width as f32;
        let mut m = self.matrix;
        m.x_axis.x /= ratio;
        m.y_axis.y /= ratio;
        m.z_axis.x /= ratio;
        m.z_axis.y /= ratio;
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_halves_entries_at_half_resolution() {
        let intrinsics = Intrinsics::new(600.0, 601.0, 320.0, 240.0, 640, 480);
        let scaled = intrinsics.scaled_to(320);
        assert_eq!(scaled.x_axis.x, 300.0);
        assert_eq!(scaled.y_axis.y, 300.5);
        assert_eq!(scaled.z_axis.x, 160.0);
        assert_eq!(scaled.z_axis.y, 120.0);
        // Homogeneous entry untouched.
        assert_eq!(scaled.z_axis.z, 1.0);
    }

    #[test]
    fn rescale_at_reference_width_is_identity() {
        let intrinsics = Intrinsics::new(600.0, 600.0, 320.0, 240.0, 640, 480);
        assert_eq!(intrinsics.scaled_to(640), intrinsics.matrix);
    }

    #[test]
    fn rescale_does_not_mutate_the_reference_matrix() {
        let intrinsics = Intrinsics::new(600.0, 600.0, 320.0, 240.0, 640, 480);
        let _ = intrinsics.scaled_to(160);
        assert_eq!(intrinsics.matrix.x_axis.x, 600.0);
    }
}
