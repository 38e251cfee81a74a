//! Play Area - VR play-area boundary tracking
//!
//! Core modules:
//! - `geometry`: Boundary polygon, edge planes, warning-ribbon mesh
//! - `tracker`: Per-frame proximity parameters and the out-of-bounds state machine
//! - `source`: OpenVR / OpenXR / synthetic boundary adapters
//! - `runtime`: Host integration traits and cancellable polling
//! - `session`: Startup sequence and per-frame driver
//! - `config`: JSON configuration

pub mod config;
pub mod error;
pub mod geometry;
pub mod runtime;
pub mod session;
pub mod source;
pub mod tracker;

pub use config::{PlayAreaConfig, PolicyMode};
pub use error::BoundaryError;
pub use geometry::{BoundaryGeometry, BoundaryPolygon, Edge, RenderMesh, build_geometry, contains_point};
pub use session::{FrameInput, FrameOutput, PlayArea};
pub use tracker::{BoundaryEvent, BoundaryTracker, BoundsState, ShaderParams, TickInput};

/// Play area version (major.minor)
pub const VERSION: &str = "1.1";

/// Default device polling interval in seconds
pub const POLL_INTERVAL_SECS: f32 = 0.5;
