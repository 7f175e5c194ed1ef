//! Per-draw uniform data handed to the point-cloud shader.

use glam::Mat3;

use crate::frame_plan::FramePlan;

/// Frame uniforms for GPU.
///
/// Layout matches the `FrameUniforms` struct in `shaders/point_cloud.wgsl`:
/// the 3×3 intrinsics matrix is stored as three 16-byte-aligned columns, and
/// the struct is padded to a 16-byte multiple.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(clippy::pub_underscore_fields)]
pub struct FrameUniforms {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Scaled intrinsics, one padded column per row.
    pub intrinsics: [[f32; 4]; 3],
    /// Depth map dimensions in pixels.
    pub depth_size: [u32; 2],
    pub _padding: [u32; 2],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            intrinsics: pad_mat3(Mat3::IDENTITY),
            depth_size: [1, 1],
            _padding: [0; 2],
        }
    }
}

impl FrameUniforms {
    /// Size of the uniform block in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Builds the uniform block for one prepared frame.
    #[must_use]
    pub fn from_plan(plan: &FramePlan) -> Self {
        Self {
            view_proj: plan.view_projection.to_cols_array_2d(),
            intrinsics: pad_mat3(plan.scaled_intrinsics),
            depth_size: [plan.depth_size.0, plan.depth_size.1],
            _padding: [0; 2],
        }
    }
}

/// Expands a column-major 3×3 matrix to vec4-aligned columns.
fn pad_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [
        [m.x_axis.x, m.x_axis.y, m.x_axis.z, 0.0],
        [m.y_axis.x, m.y_axis.y, m.y_axis.z, 0.0],
        [m.z_axis.x, m.z_axis.y, m.z_axis.z, 0.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_the_wgsl_layout() {
        // mat4x4 (64) + mat3x3 as padded columns (48) + vec2<u32> (8) + pad (8)
        assert_eq!(FrameUniforms::SIZE, 128);
    }

    #[test]
    fn intrinsics_columns_keep_their_order() {
        let m = Mat3::from_cols(
            glam::Vec3::new(1.0, 2.0, 3.0),
            glam::Vec3::new(4.0, 5.0, 6.0),
            glam::Vec3::new(7.0, 8.0, 9.0),
        );
        let padded = pad_mat3(m);
        assert_eq!(padded[0], [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(padded[2], [7.0, 8.0, 9.0, 0.0]);
    }
}
