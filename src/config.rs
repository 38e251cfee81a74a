//! Play area configuration
//!
//! All values are static and read once when a session starts. Loaded from JSON;
//! missing fields fall back to the defaults below.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::BoundaryError;

/// Tri-state policy used for both "check play area" and "use out-of-bounds area"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PolicyMode {
    Enabled,
    Disabled,
    /// Defer to the next source (local config, then device denylist)
    #[default]
    Auto,
}

impl PolicyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyMode::Enabled => "Enabled",
            PolicyMode::Disabled => "Disabled",
            PolicyMode::Auto => "Auto",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "enabled" | "on" | "block" => Some(PolicyMode::Enabled),
            "disabled" | "off" | "ignore" => Some(PolicyMode::Disabled),
            "auto" => Some(PolicyMode::Auto),
            _ => None,
        }
    }

    /// `Some(decision)` when this mode settles the policy on its own
    pub fn decided(&self) -> Option<bool> {
        match self {
            PolicyMode::Enabled => Some(true),
            PolicyMode::Disabled => Some(false),
            PolicyMode::Auto => None,
        }
    }
}

/// Play area settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayAreaConfig {
    // === Play Area ===
    /// Height of the warning ribbon (meters)
    pub play_area_height: f32,
    /// Whether to check the play area boundaries at all
    pub checking_mode: PolicyMode,
    /// Headset models that draw their own boundary (OpenVR, substring match)
    pub headsets_with_own_play_area: Vec<String>,
    /// Controller models that belong to headsets with their own boundary (OpenXR)
    pub controllers_with_own_play_area: Vec<String>,

    // === Bounds Detection ===
    /// Distance at which the grid starts to appear around the left controller
    pub left_controller_detection_distance: f32,
    /// Distance at which the grid starts to appear around the right controller
    pub right_controller_detection_distance: f32,
    /// If both sides are below this, the boundary is replaced by a square of this size
    pub minimum_play_area_size: f32,
    pub min_distance_to_start_show_cell: f32,
    pub min_distance_to_start_show_texture_inside_cell: f32,
    /// Subtracted from the headset's nearest-edge distance
    pub offset_distance: f32,

    // === Controllers Velocity ===
    /// Half-width of the safe zone where controller velocity is ignored
    pub safe_zone_width: f32,
    /// Half-depth of the safe zone where controller velocity is ignored
    pub safe_zone_depth: f32,
    pub min_controllers_velocity_to_affect_the_grid: f32,
    /// Extra detection distance at full controller speed
    pub max_controllers_velocity_detection_distance: f32,

    // === Out Of Bounds ===
    pub out_of_bounds_mode: PolicyMode,
    /// Half-size of the square around the origin required to re-enter bounds
    pub play_area_center_threshold: f32,
    /// Keep drawing the ribbon while the out-of-bounds area is shown
    pub render_play_area_when_out_of_bounds: bool,

    // === Debug ===
    /// Do not wait for the host integration SDK
    pub skip_sdk_initialization: bool,
    /// Always draw the ribbon at full strength
    pub force_show_play_area: bool,
    /// Use `forced_play_area_size` instead of querying the runtime
    pub use_forced_play_area_size: bool,
    pub forced_play_area_size: Vec2,

    /// Device/integration polling interval (seconds)
    pub poll_interval_secs: f32,
}

impl Default for PlayAreaConfig {
    fn default() -> Self {
        Self {
            play_area_height: 3.0,
            checking_mode: PolicyMode::Auto,
            headsets_with_own_play_area: Vec::new(),
            controllers_with_own_play_area: Vec::new(),

            left_controller_detection_distance: 0.3,
            right_controller_detection_distance: 0.3,
            minimum_play_area_size: 2.0,
            min_distance_to_start_show_cell: 0.4,
            min_distance_to_start_show_texture_inside_cell: 0.05,
            offset_distance: 0.25,

            safe_zone_width: 0.7,
            safe_zone_depth: 0.7,
            min_controllers_velocity_to_affect_the_grid: 0.2,
            max_controllers_velocity_detection_distance: 0.2,

            out_of_bounds_mode: PolicyMode::Auto,
            play_area_center_threshold: 0.5,
            render_play_area_when_out_of_bounds: false,

            skip_sdk_initialization: false,
            force_show_play_area: false,
            use_forced_play_area_size: false,
            forced_play_area_size: Vec2::ONE,

            poll_interval_secs: crate::POLL_INTERVAL_SECS,
        }
    }
}

impl PlayAreaConfig {
    /// Longest accepted device polling interval (seconds)
    pub const MAX_POLL_INTERVAL_SECS: f32 = 60.0;

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, BoundaryError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, BoundaryError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded play area config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, BoundaryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the per-frame math cannot work with
    pub fn validate(&self) -> Result<(), BoundaryError> {
        if !(self.play_area_height.is_finite() && self.play_area_height > 0.0) {
            return Err(BoundaryError::InvalidConfig {
                field: "play_area_height",
                reason: format!("must be positive, got {}", self.play_area_height),
            });
        }

        let non_negative = [
            ("left_controller_detection_distance", self.left_controller_detection_distance),
            ("right_controller_detection_distance", self.right_controller_detection_distance),
            ("minimum_play_area_size", self.minimum_play_area_size),
            ("min_distance_to_start_show_cell", self.min_distance_to_start_show_cell),
            (
                "min_distance_to_start_show_texture_inside_cell",
                self.min_distance_to_start_show_texture_inside_cell,
            ),
            ("safe_zone_width", self.safe_zone_width),
            ("safe_zone_depth", self.safe_zone_depth),
            (
                "min_controllers_velocity_to_affect_the_grid",
                self.min_controllers_velocity_to_affect_the_grid,
            ),
            (
                "max_controllers_velocity_detection_distance",
                self.max_controllers_velocity_detection_distance,
            ),
            ("play_area_center_threshold", self.play_area_center_threshold),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BoundaryError::InvalidConfig {
                    field,
                    reason: format!("must be a finite non-negative number, got {}", value),
                });
            }
        }

        if !self.offset_distance.is_finite() {
            return Err(BoundaryError::InvalidConfig {
                field: "offset_distance",
                reason: "must be finite".into(),
            });
        }

        if !(self.poll_interval_secs.is_finite()
            && (0.0..=Self::MAX_POLL_INTERVAL_SECS).contains(&self.poll_interval_secs))
        {
            return Err(BoundaryError::InvalidConfig {
                field: "poll_interval_secs",
                reason: format!(
                    "must be between 0 and {}, got {}",
                    Self::MAX_POLL_INTERVAL_SECS,
                    self.poll_interval_secs
                ),
            });
        }

        if self.use_forced_play_area_size
            && !(self.forced_play_area_size.is_finite() && self.forced_play_area_size.min_element() > 0.0)
        {
            return Err(BoundaryError::InvalidConfig {
                field: "forced_play_area_size",
                reason: format!("both sides must be positive, got {}", self.forced_play_area_size),
            });
        }

        // Degenerate blend curves are guarded per frame, but almost certainly a mistake
        if self.min_distance_to_start_show_cell == self.offset_distance {
            log::warn!("min_distance_to_start_show_cell equals offset_distance; cell visibility becomes a step");
        }
        if self.min_distance_to_start_show_texture_inside_cell == self.offset_distance {
            log::warn!(
                "min_distance_to_start_show_texture_inside_cell equals offset_distance; inside-cell alpha becomes a step"
            );
        }

        Ok(())
    }

    /// Poll interval as a `Duration`
    ///
    /// Out-of-range values fall back to the default interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.poll_interval_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(crate::POLL_INTERVAL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlayAreaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.play_area_height, 3.0);
        assert_eq!(config.checking_mode, PolicyMode::Auto);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlayAreaConfig::from_json_str(
            r#"{ "play_area_height": 2.5, "out_of_bounds_mode": "Disabled" }"#,
        )
        .unwrap();
        assert_eq!(config.play_area_height, 2.5);
        assert_eq!(config.out_of_bounds_mode, PolicyMode::Disabled);
        assert_eq!(config.offset_distance, 0.25);
        assert_eq!(config.forced_play_area_size, Vec2::ONE);
    }

    #[test]
    fn test_json_round_trip_preserves_lists() {
        let mut config = PlayAreaConfig::default();
        config.headsets_with_own_play_area = vec!["Quest".into(), "Index".into()];
        let json = config.to_json_string().unwrap();
        let parsed = PlayAreaConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.headsets_with_own_play_area, config.headsets_with_own_play_area);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = PlayAreaConfig::from_json_str(r#"{ "play_area_height": 0.0 }"#).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig { field: "play_area_height", .. }));

        let err = PlayAreaConfig::from_json_str(r#"{ "safe_zone_width": -1.0 }"#).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig { field: "safe_zone_width", .. }));

        let err = PlayAreaConfig::from_json_str(
            r#"{ "use_forced_play_area_size": true, "forced_play_area_size": [0.0, 1.0] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig { field: "forced_play_area_size", .. }));
    }

    #[test]
    fn test_poll_interval_bounds() {
        let err = PlayAreaConfig::from_json_str(r#"{ "poll_interval_secs": 1e20 }"#).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig { field: "poll_interval_secs", .. }));

        let config = PlayAreaConfig::from_json_str(r#"{ "poll_interval_secs": 0.25 }"#).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(250));

        // Unvalidated values never panic
        for bad in [-1.0, f32::NAN, f32::INFINITY, 1e20] {
            let config = PlayAreaConfig {
                poll_interval_secs: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err());
            assert_eq!(config.poll_interval(), Duration::from_secs_f32(crate::POLL_INTERVAL_SECS));
        }
    }

    #[test]
    fn test_malformed_json() {
        let err = PlayAreaConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, BoundaryError::ConfigParse(_)));
    }

    #[test]
    fn test_policy_mode_strings() {
        assert_eq!(PolicyMode::from_str("ENABLED"), Some(PolicyMode::Enabled));
        assert_eq!(PolicyMode::from_str("ignore"), Some(PolicyMode::Disabled));
        assert_eq!(PolicyMode::from_str("maybe"), None);
        assert_eq!(PolicyMode::Auto.as_str(), "Auto");
        assert_eq!(PolicyMode::Auto.decided(), None);
        assert_eq!(PolicyMode::Disabled.decided(), Some(false));
    }
}
