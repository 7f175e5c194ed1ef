//! Configuration options for the point-cloud view.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable parameters of the point-cloud view.
///
/// The projection parameters are fixed for the lifetime of a view; only the
/// far-clip distance is adjusted at runtime (through
/// [`OrbitCamera::set_far_clip`](crate::orbit::OrbitCamera::set_far_clip)),
/// clamped to the range declared here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,

    /// Near clipping plane distance.
    pub near: f32,

    /// Far-clip distance applied until the user adjusts it.
    pub far_clip_default: f32,

    /// Smallest accepted far-clip distance.
    pub far_clip_min: f32,

    /// Largest accepted far-clip distance.
    pub far_clip_max: f32,

    /// Orbit rotation per pixel of pointer drag, in degrees.
    pub degrees_per_pixel: f32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fovy_degrees: 70.0,
            near: 0.01,
            far_clip_default: 500.0,
            far_clip_min: 1.0,
            far_clip_max: 5000.0,
            degrees_per_pixel: 0.1,
        }
    }
}

impl ViewOptions {
    /// Clamps a requested far-clip distance to the accepted range.
    #[must_use]
    pub fn clamp_far_clip(&self, value: f32) -> f32 {
        value.clamp(self.far_clip_min, self.far_clip_max)
    }

    /// Loads options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes options to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_clip_clamps_to_range() {
        let options = ViewOptions::default();
        assert_eq!(options.clamp_far_clip(0.0), options.far_clip_min);
        assert_eq!(options.clamp_far_clip(9999.0), options.far_clip_max);
        assert_eq!(options.clamp_far_clip(750.0), 750.0);
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let mut options = ViewOptions::default();
        options.far_clip_default = 42.0;
        let restored = ViewOptions::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(restored.far_clip_default, 42.0);
        assert_eq!(restored.fovy_degrees, options.fovy_degrees);
    }
}
