//! Pure per-frame preparation, separated from GPU encoding.

use glam::{Mat3, Mat4};

use depthcloud_core::frame::{ColorImage, DepthFrame};
use depthcloud_core::orbit::OrbitCamera;

/// Everything the submit stage needs for one frame, computed without
/// touching the GPU: the point count, the view-projection matrix from a
/// locked camera snapshot, and the intrinsics rescaled to the depth map's
/// resolution.
#[derive(Debug, Clone, Copy)]
pub struct FramePlan {
    /// One vertex per depth sample.
    pub vertex_count: u32,
    /// Combined view-projection matrix for this frame.
    pub view_projection: Mat4,
    /// Calibration matrix rescaled to the depth resolution; valid for this
    /// frame only.
    pub scaled_intrinsics: Mat3,
    /// Depth map dimensions in pixels.
    pub depth_size: (u32, u32),
}

impl FramePlan {
    /// Prepares one incoming sample for rendering.
    ///
    /// Returns `None` when a pixel buffer disagrees with its stated
    /// dimensions (the same condition that makes the texture wrap fail) or
    /// the drawable is zero-sized; the frame is dropped silently in both
    /// cases.
    ///
    /// # Panics
    ///
    /// Panics when the sample carries no calibration data. That is a
    /// misconfigured capture pipeline, not a transient condition, and must
    /// not be skipped silently.
    #[must_use]
    pub fn prepare(
        frame: &DepthFrame<'_>,
        drawable: (u32, u32),
        camera: &OrbitCamera,
    ) -> Option<Self> {
        if !plane_valid(frame.depth.width, frame.depth.height, frame.depth.pixels, 1)
            || !plane_valid(
                frame.color.width,
                frame.color.height,
                frame.color.pixels,
                ColorImage::BYTES_PER_PIXEL,
            )
        {
            log::debug!("dropping frame: pixel buffer disagrees with its dimensions");
            return None;
        }

        let intrinsics = frame
            .intrinsics
            .as_ref()
            .expect("depth frame carries no camera calibration data");

        let (drawable_width, drawable_height) = drawable;
        if drawable_width == 0 || drawable_height == 0 {
            log::debug!("dropping frame: zero-sized drawable");
            return None;
        }
        let aspect = drawable_width as f32 / drawable_height as f32;

        Some(Self {
            vertex_count: frame.depth.pixel_count() as u32,
            view_projection: camera.view_projection(aspect),
            scaled_intrinsics: intrinsics.scaled_to(frame.depth.width),
            depth_size: (frame.depth.width, frame.depth.height),
        })
    }
}

/// Checks a pixel plane against its stated dimensions.
fn plane_valid<T>(width: u32, height: u32, pixels: &[T], per_pixel: usize) -> bool {
    width > 0 && height > 0 && pixels.len() == width as usize * height as usize * per_pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthcloud_core::frame::DepthMap;
    use depthcloud_core::intrinsics::Intrinsics;
    use depthcloud_core::options::ViewOptions;

    fn camera_with_far(far: f32) -> OrbitCamera {
        let camera = OrbitCamera::new(&ViewOptions::default());
        camera.set_far_clip(far);
        camera
    }

    #[test]
    fn prepared_frame_draws_one_point_per_depth_sample() {
        let depth_pixels = vec![500.0f32; 256 * 192];
        let color_pixels = vec![128u8; 640 * 480 * 4];
        let frame = DepthFrame::new(
            DepthMap::new(256, 192, &depth_pixels).unwrap(),
            ColorImage::new(640, 480, &color_pixels).unwrap(),
            Some(Intrinsics::new(600.0, 600.0, 320.0, 240.0, 640, 480)),
        );

        let plan = FramePlan::prepare(&frame, (800, 600), &camera_with_far(500.0)).unwrap();
        assert_eq!(plan.vertex_count, 49152);
        assert_eq!(plan.depth_size, (256, 192));
        assert!(plan.view_projection.is_finite());
        // Intrinsics rescaled from the 640-wide reference to the 256-wide map.
        assert!((plan.scaled_intrinsics.x_axis.x - 240.0).abs() < 1e-4);
    }

    #[test]
    fn corrupted_depth_buffer_drops_the_frame_without_panicking() {
        // A capture-side bug: the buffer is shorter than the header claims.
        let depth_pixels = vec![500.0f32; 100];
        let color_pixels = vec![128u8; 640 * 480 * 4];
        let frame = DepthFrame {
            depth: DepthMap {
                width: 256,
                height: 192,
                pixels: &depth_pixels,
            },
            color: ColorImage::new(640, 480, &color_pixels).unwrap(),
            intrinsics: Some(Intrinsics::new(600.0, 600.0, 320.0, 240.0, 640, 480)),
        };

        assert!(FramePlan::prepare(&frame, (800, 600), &camera_with_far(500.0)).is_none());
    }

    #[test]
    fn zero_sized_drawable_drops_the_frame() {
        let depth_pixels = vec![500.0f32; 4];
        let color_pixels = vec![0u8; 16];
        let frame = DepthFrame::new(
            DepthMap::new(2, 2, &depth_pixels).unwrap(),
            ColorImage::new(2, 2, &color_pixels).unwrap(),
            Some(Intrinsics::new(600.0, 600.0, 1.0, 1.0, 2, 2)),
        );

        assert!(FramePlan::prepare(&frame, (0, 600), &camera_with_far(500.0)).is_none());
    }

    #[test]
    #[should_panic(expected = "calibration")]
    fn missing_calibration_data_fails_hard() {
        let depth_pixels = vec![500.0f32; 4];
        let color_pixels = vec![0u8; 16];
        let frame = DepthFrame::new(
            DepthMap::new(2, 2, &depth_pixels).unwrap(),
            ColorImage::new(2, 2, &color_pixels).unwrap(),
            None,
        );

        let _ = FramePlan::prepare(&frame, (800, 600), &camera_with_far(500.0));
    }
}
