//! Tracker state: bounds state machine, events and per-controller motion

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Whether the headset is considered inside the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsState {
    #[default]
    InBounds,
    OutOfBounds,
}

impl BoundsState {
    /// Transition with asymmetric hysteresis
    ///
    /// Leaving is immediate once the headset projection is outside the polygon.
    /// Coming back requires being inside the polygon *and* near the center.
    pub fn next(self, inside_polygon: bool, near_center: bool) -> Self {
        match self {
            BoundsState::InBounds if !inside_polygon => BoundsState::OutOfBounds,
            BoundsState::OutOfBounds if inside_polygon && near_center => BoundsState::InBounds,
            unchanged => unchanged,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        *self == BoundsState::OutOfBounds
    }
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryEvent {
    /// Geometry built for the first time
    Ready,
    /// Geometry rebuilt after the runtime reported a new boundary
    Changed,
    /// Headset left the play area
    ExitedBounds,
    /// Headset came back near the play area center
    EnteredBounds,
}

impl BoundaryEvent {
    /// Event fired when entering `state`
    pub fn for_transition(state: BoundsState) -> Self {
        match state {
            BoundsState::InBounds => BoundaryEvent::EnteredBounds,
            BoundsState::OutOfBounds => BoundaryEvent::ExitedBounds,
        }
    }
}

/// `|x| < threshold && |z| < threshold` in play-area-local space
#[inline]
pub fn is_near_center(position: Vec3, threshold: f32) -> bool {
    position.x.abs() < threshold && position.z.abs() < threshold
}

/// Motion history of one controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerMotion {
    /// Static detection distance from config
    pub base_distance: f32,
    /// Instantaneous speed from the last update (units/s)
    pub speed: f32,
    /// Smoothed detection distance sent to the shader
    pub detection_distance: f32,
    previous_position: Option<Vec3>,
}

impl ControllerMotion {
    pub fn new(base_distance: f32) -> Self {
        Self {
            base_distance,
            speed: 0.0,
            detection_distance: base_distance,
            previous_position: None,
        }
    }

    /// Record a new position and return the instantaneous speed
    ///
    /// The first sample and non-positive or non-finite `dt` yield zero.
    pub fn update_speed(&mut self, position: Vec3, dt: f32) -> f32 {
        self.speed = match self.previous_position {
            Some(previous) if dt > 0.0 && dt.is_finite() => {
                let speed = (position - previous).length() / dt;
                if speed.is_finite() { speed } else { 0.0 }
            }
            _ => 0.0,
        };
        self.previous_position = Some(position);
        self.speed
    }

    /// Detection distance this frame before smoothing
    ///
    /// Adds up to `max_bonus` scaled by `clamp01(speed)` when the controller
    /// moves faster than `min_velocity` and velocity is allowed to count.
    pub fn target_distance(&self, velocity_counts: bool, min_velocity: f32, max_bonus: f32) -> f32 {
        if velocity_counts && self.speed > min_velocity {
            self.base_distance + lerp(0.0, max_bonus, self.speed.clamp(0.0, 1.0))
        } else {
            self.base_distance
        }
    }

    /// Exponential approach toward `target` at rate `2 * dt`
    pub fn smooth_toward(&mut self, target: f32, dt: f32) -> f32 {
        let t = if dt.is_finite() { (2.0 * dt).clamp(0.0, 1.0) } else { 0.0 };
        self.detection_distance = lerp(self.detection_distance, target, t);
        self.detection_distance
    }

    /// Forget the last position (next update reports zero speed)
    pub fn reset(&mut self) {
        self.previous_position = None;
        self.speed = 0.0;
        self.detection_distance = self.base_distance;
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaving_is_immediate() {
        assert_eq!(BoundsState::InBounds.next(false, false), BoundsState::OutOfBounds);
        assert_eq!(BoundsState::InBounds.next(false, true), BoundsState::OutOfBounds);
        assert_eq!(BoundsState::InBounds.next(true, false), BoundsState::InBounds);
    }

    #[test]
    fn test_reentry_needs_center() {
        assert_eq!(BoundsState::OutOfBounds.next(true, false), BoundsState::OutOfBounds);
        assert_eq!(BoundsState::OutOfBounds.next(false, true), BoundsState::OutOfBounds);
        assert_eq!(BoundsState::OutOfBounds.next(true, true), BoundsState::InBounds);
    }

    #[test]
    fn test_near_center() {
        assert!(is_near_center(Vec3::new(0.4, 10.0, -0.4), 0.5));
        assert!(!is_near_center(Vec3::new(0.5, 0.0, 0.0), 0.5));
        assert!(!is_near_center(Vec3::new(0.0, 0.0, -0.6), 0.5));
    }

    #[test]
    fn test_speed_first_sample_and_zero_dt() {
        let mut motion = ControllerMotion::new(0.3);
        assert_eq!(motion.update_speed(Vec3::new(5.0, 0.0, 0.0), 0.1), 0.0);
        assert_eq!(motion.update_speed(Vec3::new(6.0, 0.0, 0.0), 0.0), 0.0);
        // Position was still recorded on the zero-dt frame
        let speed = motion.update_speed(Vec3::new(6.5, 0.0, 0.0), 0.5);
        assert!((speed - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_distance() {
        let mut motion = ControllerMotion::new(0.3);
        motion.speed = 1.0;
        assert!((motion.target_distance(true, 0.2, 0.2) - 0.5).abs() < 1e-6);
        assert_eq!(motion.target_distance(false, 0.2, 0.2), 0.3);

        motion.speed = 0.1;
        assert_eq!(motion.target_distance(true, 0.2, 0.2), 0.3);

        // Bonus saturates at unit speed
        motion.speed = 4.0;
        assert!((motion.target_distance(true, 0.2, 0.2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothing_is_clamped() {
        let mut motion = ControllerMotion::new(0.0);
        // 2 * dt > 1 snaps to the target instead of overshooting
        assert_eq!(motion.smooth_toward(1.0, 2.0), 1.0);
        assert_eq!(motion.smooth_toward(0.0, f32::NAN), 1.0);
    }
}
