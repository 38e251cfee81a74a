//! Per-frame proximity and velocity update
//!
//! Produces the blend parameters the ribbon shader consumes. All positions in
//! [`TickInput`] are in play-area-local space except the controller positions,
//! which are forwarded to the shader untouched.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{ControllerMotion, is_near_center};
use super::{BoundaryTracker, TrackerSettings};

pub const LEFT_CONTROLLER_POSITION_NAME: &str = "_LeftControllerPosition";
pub const RIGHT_CONTROLLER_POSITION_NAME: &str = "_RightControllerPosition";
pub const LEFT_CONTROLLER_DETECTION_DISTANCE_NAME: &str = "_LeftControllerSphereRadius";
pub const RIGHT_CONTROLLER_DETECTION_DISTANCE_NAME: &str = "_RightControllerSphereRadius";
pub const CLOSEST_SIDE_DIRECTION_NAME: &str = "_ClosestSideDirection";
pub const HEADSET_DIRECTION_NAME: &str = "_HeadsetDirection";
pub const CELL_TEXTURE_SIZE_NAME: &str = "_CellTextureSize";
pub const INSIDE_CELL_TEXTURE_ALPHA_NAME: &str = "_InsideCellTextureAlpha";

/// Tracked poses for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Unscaled frame time (seconds)
    pub dt: f32,
    pub headset_position: Vec3,
    pub headset_forward: Vec3,
    pub left_controller_position: Vec3,
    pub right_controller_position: Vec3,
}

/// Shader parameter bundle for the ribbon material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaderParams {
    /// Inward normal of the edge nearest to the headset
    pub closest_side_direction: Vec3,
    pub left_controller_position: Vec3,
    pub right_controller_position: Vec3,
    pub left_detection_distance: f32,
    pub right_detection_distance: f32,
    pub headset_direction: Vec3,
    /// `1 - clamp01(d / (min_show_cell - offset))`
    pub cell_visibility: f32,
    /// `clamp01(d / (min_show_texture - offset))`
    pub inside_cell_alpha: f32,
}

/// Scalar or vector uniform value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vector(Vec3),
}

impl ShaderParams {
    /// Debug mode: draw the whole ribbon at full strength
    pub fn force_show() -> Self {
        Self {
            closest_side_direction: Vec3::ZERO,
            left_controller_position: Vec3::ZERO,
            right_controller_position: Vec3::ZERO,
            left_detection_distance: 0.0,
            right_detection_distance: 0.0,
            headset_direction: Vec3::ZERO,
            cell_visibility: 1.0,
            inside_cell_alpha: 1.0,
        }
    }

    /// Material property names paired with their values
    pub fn uniforms(&self) -> [(&'static str, UniformValue); 8] {
        use UniformValue::{Float, Vector};
        [
            (LEFT_CONTROLLER_POSITION_NAME, Vector(self.left_controller_position)),
            (RIGHT_CONTROLLER_POSITION_NAME, Vector(self.right_controller_position)),
            (LEFT_CONTROLLER_DETECTION_DISTANCE_NAME, Float(self.left_detection_distance)),
            (RIGHT_CONTROLLER_DETECTION_DISTANCE_NAME, Float(self.right_detection_distance)),
            (CLOSEST_SIDE_DIRECTION_NAME, Vector(self.closest_side_direction)),
            (HEADSET_DIRECTION_NAME, Vector(self.headset_direction)),
            (CELL_TEXTURE_SIZE_NAME, Float(self.cell_visibility)),
            (INSIDE_CELL_TEXTURE_ALPHA_NAME, Float(self.inside_cell_alpha)),
        ]
    }
}

fn advance_controller(
    motion: &mut ControllerMotion,
    position: Vec3,
    dt: f32,
    velocity_counts: bool,
    settings: &TrackerSettings,
) -> f32 {
    motion.update_speed(position, dt);
    let target = motion.target_distance(
        velocity_counts,
        settings.min_controller_velocity,
        settings.max_velocity_bonus,
    );
    motion.smooth_toward(target, dt)
}

/// `clamp01(numerator / denominator)` with a zero denominator treated as a step at 0
#[inline]
pub fn ratio01(numerator: f32, denominator: f32) -> f32 {
    if denominator.abs() <= f32::EPSILON {
        return if numerator > 0.0 { 1.0 } else { 0.0 };
    }
    let ratio = numerator / denominator;
    if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) }
}

impl BoundaryTracker {
    /// Advance controller motion and compute this frame's shader parameters
    pub fn tick(&mut self, input: &TickInput) -> ShaderParams {
        let settings = self.settings;
        let dt = input.dt;

        // Velocity near the center triggers the grid too easily
        let headset_in_safe_zone = input.headset_position.x.abs() < settings.safe_zone_width
            && input.headset_position.z.abs() < settings.safe_zone_depth;
        let velocity_counts = !headset_in_safe_zone;

        let left_detection_distance =
            advance_controller(&mut self.left, input.left_controller_position, dt, velocity_counts, &settings);
        let right_detection_distance =
            advance_controller(&mut self.right, input.right_controller_position, dt, velocity_counts, &settings);

        let (closest_side_direction, cell_visibility, inside_cell_alpha) =
            match self.geometry.nearest_edge(input.headset_position) {
                Some((edge, distance)) => {
                    let adjusted = distance - settings.offset_distance;
                    (
                        edge.normal,
                        1.0 - ratio01(adjusted, settings.min_show_cell_distance - settings.offset_distance),
                        ratio01(adjusted, settings.min_show_texture_distance - settings.offset_distance),
                    )
                }
                // Nothing to fade toward: hide the grid
                None => (Vec3::ZERO, 0.0, 0.0),
            };

        ShaderParams {
            closest_side_direction,
            left_controller_position: input.left_controller_position,
            right_controller_position: input.right_controller_position,
            left_detection_distance,
            right_detection_distance,
            headset_direction: input.headset_forward,
            cell_visibility,
            inside_cell_alpha,
        }
    }

    /// Whether `position` is inside the center-threshold square
    pub fn is_near_center(&self, position: Vec3) -> bool {
        is_near_center(position, self.settings.center_threshold)
    }
}
