//! Boundary tracker
//!
//! Owns the boundary polygon and the geometry built from it, and runs the
//! per-frame logic on top of them:
//! - `tick`: controller velocity, nearest edge and shader blend parameters
//! - `update_bounds`: in/out-of-bounds state machine with hysteresis
//!
//! Single-threaded; the owner calls both once per frame.

pub mod policy;
pub mod state;
pub mod tick;

pub use policy::{Policies, has_own_play_area, resolve_policy};
pub use state::{BoundaryEvent, BoundsState, ControllerMotion};
pub use tick::{ShaderParams, TickInput, UniformValue};

use glam::Vec3;

use crate::config::PlayAreaConfig;
use crate::geometry::{BoundaryGeometry, BoundaryPolygon, Edge, build_geometry};

/// Thresholds the tracker reads every frame, copied out of the config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    pub height: f32,
    pub min_show_cell_distance: f32,
    pub min_show_texture_distance: f32,
    pub offset_distance: f32,
    pub safe_zone_width: f32,
    pub safe_zone_depth: f32,
    pub min_controller_velocity: f32,
    pub max_velocity_bonus: f32,
    pub center_threshold: f32,
}

impl From<&PlayAreaConfig> for TrackerSettings {
    fn from(config: &PlayAreaConfig) -> Self {
        Self {
            height: config.play_area_height,
            min_show_cell_distance: config.min_distance_to_start_show_cell,
            min_show_texture_distance: config.min_distance_to_start_show_texture_inside_cell,
            offset_distance: config.offset_distance,
            safe_zone_width: config.safe_zone_width,
            safe_zone_depth: config.safe_zone_depth,
            min_controller_velocity: config.min_controllers_velocity_to_affect_the_grid,
            max_velocity_bonus: config.max_controllers_velocity_detection_distance,
            center_threshold: config.play_area_center_threshold,
        }
    }
}

/// Play area geometry plus the per-frame tracking state built on it
#[derive(Debug, Clone)]
pub struct BoundaryTracker {
    polygon: BoundaryPolygon,
    geometry: BoundaryGeometry,
    settings: TrackerSettings,
    left: ControllerMotion,
    right: ControllerMotion,
    bounds: BoundsState,
    events: Vec<BoundaryEvent>,
}

impl BoundaryTracker {
    /// Build geometry for `polygon` and queue [`BoundaryEvent::Ready`]
    pub fn new(polygon: BoundaryPolygon, config: &PlayAreaConfig) -> Self {
        let settings = TrackerSettings::from(config);
        let geometry = build_geometry(&polygon, settings.height);
        log::info!(
            "Play area ready: {} points, perimeter {:.2}m",
            polygon.len(),
            polygon.perimeter()
        );

        Self {
            polygon,
            geometry,
            settings,
            left: ControllerMotion::new(config.left_controller_detection_distance),
            right: ControllerMotion::new(config.right_controller_detection_distance),
            bounds: BoundsState::InBounds,
            events: vec![BoundaryEvent::Ready],
        }
    }

    /// Replace the boundary after the runtime reported a change
    ///
    /// Polygon and geometry are swapped together. Bounds state and controller
    /// history are kept; the next `update_bounds` re-evaluates against the new
    /// polygon.
    pub fn rebuild(&mut self, polygon: BoundaryPolygon) {
        let geometry = build_geometry(&polygon, self.settings.height);
        log::info!("Play area changed: {} points", polygon.len());
        self.polygon = polygon;
        self.geometry = geometry;
        self.events.push(BoundaryEvent::Changed);
    }

    #[inline]
    pub fn polygon(&self) -> &BoundaryPolygon {
        &self.polygon
    }

    #[inline]
    pub fn geometry(&self) -> &BoundaryGeometry {
        &self.geometry
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.geometry.edges
    }

    #[inline]
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    #[inline]
    pub fn bounds_state(&self) -> BoundsState {
        self.bounds
    }

    pub fn left_controller(&self) -> &ControllerMotion {
        &self.left
    }

    pub fn right_controller(&self) -> &ControllerMotion {
        &self.right
    }

    /// Nearest edge plane to `point` (play-area-local)
    pub fn nearest_edge(&self, point: Vec3) -> Option<(&Edge, f32)> {
        self.geometry.nearest_edge(point)
    }

    /// Ground-plane containment test for `point` (play-area-local)
    pub fn contains(&self, point: Vec3) -> bool {
        self.polygon.contains(point)
    }

    /// Feed the headset position to the bounds state machine
    ///
    /// Returns the event when the state changes. Unchanged state emits nothing.
    pub fn update_bounds(&mut self, headset_position: Vec3) -> Option<BoundaryEvent> {
        let inside = self.contains(headset_position);
        let near_center = self.is_near_center(headset_position);
        let next = self.bounds.next(inside, near_center);
        if next == self.bounds {
            return None;
        }

        self.bounds = next;
        let event = BoundaryEvent::for_transition(next);
        log::info!("Player {:?} at ({:.2}, {:.2})", event, headset_position.x, headset_position.z);
        self.events.push(event);
        Some(event)
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<BoundaryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget controller history (e.g. after tracking loss)
    pub fn reset_motion(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}
