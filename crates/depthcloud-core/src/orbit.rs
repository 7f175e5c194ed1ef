//! Orbit camera state shared between the input and render threads.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use glam::{Mat4, Vec3};

use crate::math;
use crate::options::ViewOptions;

/// Default viewer position.
pub const DEFAULT_EYE: Vec3 = Vec3::ZERO;

/// Default look-at target: half a meter straight ahead of the sensor, the
/// center of a front-facing capture's working volume. The target is fixed at
/// setup; the camera orbits around it.
pub const DEFAULT_TARGET: Vec3 = Vec3::new(0.0, 0.0, 500.0);

/// Default up direction, matching the sensor's portrait orientation.
pub const DEFAULT_UP: Vec3 = Vec3::new(-1.0, 0.0, 0.0);

/// The orbiting viewpoint: eye position, fixed look-at target, and up
/// direction, plus a version stamp bumped on every mutation.
///
/// `up` and `target - eye` must never become parallel; the basis
/// construction in [`math::look_at`] degenerates otherwise. This is not
/// guarded here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Viewer position in world space.
    pub eye: Vec3,
    /// Look-at point, fixed at setup.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Incremented by every yaw/pitch, atomically with the fields above.
    pub version: u64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: DEFAULT_EYE,
            target: DEFAULT_TARGET,
            up: DEFAULT_UP,
            version: 0,
        }
    }
}

/// Orbit camera controller, safe to drive from a thread other than the
/// render thread.
///
/// The pose lives behind one mutex: the yaw/pitch mutators and the
/// [`snapshot`](Self::snapshot) read each hold the lock for their entire
/// span, so a concurrent render-thread read never observes a half-updated
/// state (a new `eye` with a stale `up`). The far-clip distance is
/// deliberately outside the lock — a stale read there costs one frame of
/// visual lag, nothing else — stored as f32 bits in a relaxed atomic.
pub struct OrbitCamera {
    state: Mutex<CameraState>,
    far_clip: AtomicU32,
    fovy_degrees: f32,
    near: f32,
    far_clip_min: f32,
    far_clip_max: f32,
}

impl OrbitCamera {
    /// Creates a camera at the default pose with the given view options.
    #[must_use]
    pub fn new(options: &ViewOptions) -> Self {
        Self {
            state: Mutex::new(CameraState::default()),
            far_clip: AtomicU32::new(options.far_clip_default.to_bits()),
            fovy_degrees: options.fovy_degrees,
            near: options.near,
            far_clip_min: options.far_clip_min,
            far_clip_max: options.far_clip_max,
        }
    }

    /// Rotates the eye about the target around the current up axis.
    pub fn yaw(&self, angle_degrees: f32) {
        let mut state = self.state.lock().expect("camera state lock poisoned");
        let rotation = math::axis_rotation(angle_degrees, state.up);
        Self::orbit(&mut state, rotation);
    }

    /// Rotates the eye about the target around the view-right axis.
    pub fn pitch(&self, angle_degrees: f32) {
        let mut state = self.state.lock().expect("camera state lock poisoned");
        let view_direction = (state.target - state.eye).normalize();
        let right_axis = state.up.cross(view_direction);
        let rotation = math::axis_rotation(angle_degrees, right_axis);
        Self::orbit(&mut state, rotation);
    }

    /// Applies an orbit rotation to the locked state as one unit: eye moves
    /// around the target, up follows the same rotation, the version stamp
    /// advances. `up` is renormalized so that f32 drift cannot accumulate
    /// over long interactive sessions.
    fn orbit(state: &mut CameraState, rotation: Mat4) {
        state.eye = math::rotate_vec3(rotation, state.eye - state.target) + state.target;
        state.up = math::rotate_vec3(rotation, state.up).normalize();
        state.version += 1;
    }

    /// Returns a consistent copy of the whole camera state.
    #[must_use]
    pub fn snapshot(&self) -> CameraState {
        *self.state.lock().expect("camera state lock poisoned")
    }

    /// Builds the combined view-projection matrix for the given viewport
    /// aspect ratio, from a locked snapshot of the pose and the current
    /// far-clip distance.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let state = self.snapshot();
        let projection = math::perspective(self.fovy_degrees, aspect, self.near, self.far_clip());
        projection * math::look_at(state.eye, state.target, state.up)
    }

    /// Current far-clip distance. Read once per frame, unsynchronized with
    /// the pose.
    #[must_use]
    pub fn far_clip(&self) -> f32 {
        f32::from_bits(self.far_clip.load(Ordering::Relaxed))
    }

    /// Sets the far-clip distance, clamped to the configured range.
    pub fn set_far_clip(&self, value: f32) {
        let clamped = value.clamp(self.far_clip_min, self.far_clip_max);
        if clamped != value {
            log::debug!("far clip {value} clamped to {clamped}");
        }
        self.far_clip.store(clamped.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const EPS: f32 = 1e-5;

    fn default_camera() -> OrbitCamera {
        OrbitCamera::new(&ViewOptions::default())
    }

    #[test]
    fn zero_angle_yaw_and_pitch_leave_the_pose_unchanged() {
        let camera = default_camera();
        let before = camera.snapshot();
        camera.yaw(0.0);
        camera.pitch(0.0);
        let after = camera.snapshot();
        assert_eq!(after.eye, before.eye);
        assert_eq!(after.target, before.target);
        assert_eq!(after.up, before.up);
    }

    #[test]
    fn every_mutation_bumps_the_version() {
        let camera = default_camera();
        camera.yaw(5.0);
        camera.pitch(-3.0);
        camera.yaw(0.0);
        assert_eq!(camera.snapshot().version, 3);
    }

    #[test]
    fn up_length_is_preserved_across_mutations() {
        let camera = default_camera();
        let before = camera.snapshot().up.length();
        for _ in 0..100 {
            camera.yaw(7.3);
            camera.pitch(-2.1);
        }
        let after = camera.snapshot().up.length();
        assert!((after - before).abs() < EPS);
    }

    #[test]
    fn up_length_stays_unit_over_long_sessions() {
        let camera = default_camera();
        for _ in 0..10_000 {
            camera.yaw(0.37);
            camera.pitch(0.21);
        }
        let up = camera.snapshot().up;
        assert!((up.length() - 1.0).abs() < EPS, "drifted to {}", up.length());
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let camera = default_camera();
        let before = camera.snapshot();
        let radius = (before.eye - before.target).length();
        for _ in 0..50 {
            camera.pitch(11.0);
            camera.yaw(-4.0);
        }
        let after = camera.snapshot();
        assert!(((after.eye - after.target).length() - radius).abs() < 1e-2);
        assert_eq!(after.target, before.target);
    }

    #[test]
    fn view_projection_keeps_the_target_centered() {
        let camera = default_camera();
        camera.yaw(33.0);
        camera.pitch(-12.0);
        let m = camera.view_projection(1.5);
        let clip = m * DEFAULT_TARGET.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    }

    #[test]
    fn far_clip_set_is_clamped_and_visible() {
        let camera = default_camera();
        camera.set_far_clip(250.0);
        assert_eq!(camera.far_clip(), 250.0);
        camera.set_far_clip(0.01);
        assert_eq!(camera.far_clip(), 1.0);
        camera.set_far_clip(1.0e9);
        assert_eq!(camera.far_clip(), 5000.0);
    }

    /// Replays the writer's exact mutation sequence up front, then checks
    /// that every concurrent snapshot matches the replayed state at its
    /// version — i.e. `eye` and `up` always come from the same mutation.
    #[test]
    fn snapshots_never_mix_state_from_different_mutations() {
        const MUTATIONS: usize = 1000;

        let mut expected = Vec::with_capacity(MUTATIONS + 1);
        {
            let replay = default_camera();
            expected.push(replay.snapshot());
            for i in 0..MUTATIONS {
                if i % 2 == 0 {
                    replay.yaw(0.7);
                } else {
                    replay.pitch(-0.4);
                }
                expected.push(replay.snapshot());
            }
        }

        let camera = Arc::new(default_camera());
        let writer = {
            let camera = Arc::clone(&camera);
            thread::spawn(move || {
                for i in 0..MUTATIONS {
                    if i % 2 == 0 {
                        camera.yaw(0.7);
                    } else {
                        camera.pitch(-0.4);
                    }
                }
            })
        };
        let reader = {
            let camera = Arc::clone(&camera);
            thread::spawn(move || {
                for _ in 0..MUTATIONS {
                    let snap = camera.snapshot();
                    let want = &expected[snap.version as usize];
                    assert_eq!(snap.eye, want.eye, "torn eye at version {}", snap.version);
                    assert_eq!(snap.up, want.up, "torn up at version {}", snap.version);
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
    }
}
