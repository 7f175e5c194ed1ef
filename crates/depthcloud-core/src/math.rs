//! Matrix construction for the point-cloud camera.
//!
//! These are pure functions with no GPU or I/O side effects. The projection
//! and view conventions here are fixed by the shader contract: the camera
//! looks down +z in view space, and clip-space depth maps the near plane to
//! 0 and the far plane to 1, so they are assembled column by column rather
//! than delegated to [`glam`]'s right-handed helpers (which look down -z).

use glam::{Mat4, Vec3, Vec4};

/// Converts an angle in degrees to radians.
#[must_use]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Builds a perspective projection matrix.
///
/// `fovy_degrees` is the vertical field of view. Depth is mapped so that a
/// view-space point at `z = near` projects to clip depth 0 and a point at
/// `z = far` projects to clip depth 1, with `z_scale = far / (far - near)`.
///
/// # Panics
///
/// Panics on degenerate inputs (`far <= near` or `aspect <= 0`) — these
/// would silently produce NaNs downstream and always indicate a caller bug.
#[must_use]
pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    assert!(
        far > near,
        "perspective: far ({far}) must exceed near ({near})"
    );
    assert!(aspect > 0.0, "perspective: aspect ({aspect}) must be > 0");

    let y_scale = 1.0 / to_radians(0.5 * fovy_degrees).tan();
    let x_scale = y_scale / aspect;
    let z_scale = far / (far - near);

    Mat4::from_cols(
        Vec4::new(x_scale, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y_scale, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z_scale, 1.0),
        Vec4::new(0.0, 0.0, -near * z_scale, 0.0),
    )
}

/// Builds a view matrix looking from `eye` toward `target`.
///
/// Constructs the orthonormal camera basis (`z_axis` toward the target,
/// `x_axis = up × z_axis`, `y_axis = z_axis × x_axis`) and assembles the
/// inverse of the camera's world transform: rotation transposed, translation
/// `-dot(axis, eye)` per row.
///
/// The caller must ensure `up` is not parallel to `target - eye`; the cross
/// products degenerate otherwise and the result is undefined.
#[must_use]
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = (target - eye).normalize();
    let x_axis = up.cross(z_axis).normalize();
    let y_axis = z_axis.cross(x_axis);

    Mat4::from_cols(
        Vec4::new(x_axis.x, y_axis.x, z_axis.x, 0.0),
        Vec4::new(x_axis.y, y_axis.y, z_axis.y, 0.0),
        Vec4::new(x_axis.z, y_axis.z, z_axis.z, 0.0),
        Vec4::new(
            -x_axis.dot(eye),
            -y_axis.dot(eye),
            -z_axis.dot(eye),
            1.0,
        ),
    )
}

/// Builds a homogeneous rotation matrix of `angle_degrees` about `axis`.
///
/// Uses the Rodrigues rotation formula for the normalized axis, embedded in
/// the top-left 3×3 of an identity-extended 4×4 matrix.
///
/// A zero-length `axis` normalizes to NaN and yields an undefined matrix;
/// this is not guarded.
#[must_use]
pub fn axis_rotation(angle_degrees: f32, axis: Vec3) -> Mat4 {
    let a = to_radians(angle_degrees);
    let (s, c) = a.sin_cos();
    let k = 1.0 - c;
    let u = axis.normalize();

    Mat4::from_cols(
        Vec4::new(
            u.x * u.x * k + c,
            u.x * u.y * k + u.z * s,
            u.x * u.z * k - u.y * s,
            0.0,
        ),
        Vec4::new(
            u.x * u.y * k - u.z * s,
            u.y * u.y * k + c,
            u.y * u.z * k + u.x * s,
            0.0,
        ),
        Vec4::new(
            u.x * u.z * k + u.y * s,
            u.y * u.z * k - u.x * s,
            u.z * u.z * k + c,
            0.0,
        ),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Applies the rotation part of a 4×4 matrix to a direction vector (w = 0).
#[must_use]
pub fn rotate_vec3(m: Mat4, v: Vec3) -> Vec3 {
    (m * v.extend(0.0)).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    /// Projects a view-space point and returns its NDC coordinates.
    fn project(m: Mat4, p: Vec3) -> Vec3 {
        let clip = m * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn perspective_maps_near_to_zero_and_far_to_one() {
        let m = perspective(70.0, 1.0, 0.01, 30000.0);
        let at_near = project(m, Vec3::new(0.0, 0.0, 0.01));
        let at_far = project(m, Vec3::new(0.0, 0.0, 30000.0));
        assert!(at_near.z.abs() < EPS, "near plane z = {}", at_near.z);
        assert!((at_far.z - 1.0).abs() < EPS, "far plane z = {}", at_far.z);
    }

    #[test]
    fn perspective_centers_the_optical_axis() {
        let m = perspective(70.0, 1.6, 0.01, 500.0);
        let p = project(m, Vec3::new(0.0, 0.0, 250.0));
        assert!(p.x.abs() < EPS && p.y.abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "far")]
    fn perspective_rejects_far_not_beyond_near() {
        let _ = perspective(70.0, 1.0, 10.0, 10.0);
    }

    #[test]
    #[should_panic(expected = "aspect")]
    fn perspective_rejects_non_positive_aspect() {
        let _ = perspective(70.0, 0.0, 0.01, 500.0);
    }

    #[test]
    fn look_at_maps_eye_to_view_space_origin() {
        let eye = Vec3::new(3.0, -2.0, 7.0);
        let m = look_at(eye, Vec3::new(0.0, 0.0, 500.0), Vec3::new(-1.0, 0.0, 0.0));
        let p = (m * eye.extend(1.0)).truncate();
        assert!(p.length() < EPS, "eye in view space = {p}");
    }

    #[test]
    fn look_at_places_target_on_positive_z() {
        let target = Vec3::new(0.0, 0.0, 500.0);
        let m = look_at(Vec3::ZERO, target, Vec3::new(-1.0, 0.0, 0.0));
        let p = (m * target.extend(1.0)).truncate();
        assert!(p.x.abs() < EPS && p.y.abs() < EPS);
        assert!((p.z - 500.0).abs() < EPS);
    }

    #[test]
    fn axis_rotation_zero_angle_is_identity() {
        let m = axis_rotation(0.0, Vec3::new(0.3, -0.4, 0.8));
        assert!(m.abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    #[test]
    fn axis_rotation_quarter_turn_about_z() {
        let m = axis_rotation(90.0, Vec3::Z);
        let v = rotate_vec3(m, Vec3::X);
        assert!(v.abs_diff_eq(Vec3::Y, EPS), "x rotated to {v}");
    }

    #[test]
    fn degenerate_axis_yields_undefined_matrix() {
        // Not guarded: a zero axis normalizes to NaN.
        let m = axis_rotation(45.0, Vec3::ZERO);
        assert!(!m.is_finite());
    }

    proptest! {
        #[test]
        fn half_turn_applied_twice_is_identity(
            ax in -1.0f32..1.0,
            ay in -1.0f32..1.0,
            az in -1.0f32..1.0,
        ) {
            let axis = Vec3::new(ax, ay, az);
            prop_assume!(axis.length() > 1e-2);
            let m = axis_rotation(180.0, axis);
            prop_assert!((m * m).abs_diff_eq(Mat4::IDENTITY, 1e-3));
        }

        #[test]
        fn rotation_preserves_vector_length(
            angle in -720.0f32..720.0,
            ax in -1.0f32..1.0,
            ay in -1.0f32..1.0,
            az in -1.0f32..1.0,
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            vz in -100.0f32..100.0,
        ) {
            let axis = Vec3::new(ax, ay, az);
            prop_assume!(axis.length() > 1e-2);
            let v = Vec3::new(vx, vy, vz);
            let rotated = rotate_vec3(axis_rotation(angle, axis), v);
            prop_assert!((rotated.length() - v.length()).abs() < 1e-2);
        }
    }
}
