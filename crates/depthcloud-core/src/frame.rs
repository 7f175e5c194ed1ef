//! Synchronized capture frame types.
//!
//! These are borrowed views over pixel buffers owned by the capture
//! subsystem; nothing here copies pixel data. A [`DepthFrame`] is valid for
//! the duration of one renderer call and the borrows end when the frame's
//! draw call has been submitted.

use crate::error::{CoreError, Result};
use crate::intrinsics::Intrinsics;

/// A single-channel floating-point depth map.
#[derive(Debug, Clone, Copy)]
pub struct DepthMap<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One distance sample per pixel, row-major.
    pub pixels: &'a [f32],
}

impl<'a> DepthMap<'a> {
    /// Wraps a depth pixel buffer, validating it against the dimensions.
    pub fn new(width: u32, height: u32, pixels: &'a [f32]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CoreError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Number of depth samples, which is also the point count of the frame.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A 4-channel 8-bit color image.
#[derive(Debug, Clone, Copy)]
pub struct ColorImage<'a> {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Four bytes per pixel, row-major.
    pub pixels: &'a [u8],
}

impl ColorImage<'_> {
    /// Bytes per color pixel.
    pub const BYTES_PER_PIXEL: usize = 4;
}

impl<'a> ColorImage<'a> {
    /// Wraps a color pixel buffer, validating it against the dimensions.
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(CoreError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// One synchronized capture sample: a depth map, the color image recorded
/// with it, and the calibration data attached by the capture subsystem.
///
/// The color resolution is independent of the depth resolution. Calibration
/// data is optional at the type level because the capture side may omit it,
/// but the renderer treats a missing matrix as a precondition violation and
/// fails hard — it indicates a misconfigured capture pipeline, not a
/// transient condition.
#[derive(Debug, Clone, Copy)]
pub struct DepthFrame<'a> {
    /// The depth map.
    pub depth: DepthMap<'a>,
    /// The synchronized color image.
    pub color: ColorImage<'a>,
    /// Calibration data for the depth camera, at its reference resolution.
    pub intrinsics: Option<Intrinsics>,
}

impl<'a> DepthFrame<'a> {
    /// Pairs a depth map and color image into one synchronized sample.
    #[must_use]
    pub fn new(
        depth: DepthMap<'a>,
        color: ColorImage<'a>,
        intrinsics: Option<Intrinsics>,
    ) -> Self {
        Self {
            depth,
            color,
            intrinsics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_map_accepts_matching_buffer() {
        let pixels = vec![1.0f32; 8 * 4];
        let map = DepthMap::new(8, 4, &pixels).unwrap();
        assert_eq!(map.pixel_count(), 32);
    }

    #[test]
    fn depth_map_rejects_short_buffer() {
        let pixels = vec![1.0f32; 10];
        let err = DepthMap::new(8, 4, &pixels).unwrap_err();
        assert!(matches!(
            err,
            CoreError::SizeMismatch {
                expected: 32,
                actual: 10
            }
        ));
    }

    #[test]
    fn depth_map_rejects_zero_dimension() {
        let err = DepthMap::new(0, 4, &[]).unwrap_err();
        assert!(matches!(err, CoreError::ZeroDimension { .. }));
    }

    #[test]
    fn color_image_accounts_for_four_bytes_per_pixel() {
        let pixels = vec![0u8; 8 * 4 * 4];
        assert!(ColorImage::new(8, 4, &pixels).is_ok());
        assert!(ColorImage::new(8, 4, &pixels[..8]).is_err());
    }
}
