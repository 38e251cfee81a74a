//! Play area session
//!
//! Owns one [`BoundaryTracker`] for the lifetime of a VR session and runs the
//! startup sequence:
//! 1. wait for the host integration (unless skipped)
//! 2. wait for the headset, and on OpenXR for a controller
//! 3. resolve the checking / out-of-bounds policies
//! 4. retrieve the boundary and build the tracker
//!
//! Per frame, world-space poses are brought into play-area-local space with the
//! inverse rig pose before reaching the tracker.

use glam::{Affine3A, Quat, Vec3};

use crate::config::PlayAreaConfig;
use crate::error::BoundaryError;
use crate::runtime::{CancelToken, DeviceProvider, HostIntegration, wait_for_device, wait_until};
use crate::source::{BoundarySource, DeviceRole, acquire_boundary};
use crate::tracker::{BoundaryEvent, BoundaryTracker, BoundsState, Policies, ShaderParams, TickInput};

/// World-space poses for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Unscaled frame time (seconds)
    pub dt: f32,
    pub headset_position: Vec3,
    pub headset_forward: Vec3,
    pub left_controller_position: Vec3,
    pub right_controller_position: Vec3,
}

/// What the presentation layer applies this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Ribbon material parameters, `None` when the ribbon is not driven this frame
    pub shader: Option<ShaderParams>,
    pub bounds: BoundsState,
    /// Show the out-of-bounds area (and cull the scene behind it)
    pub show_out_of_bounds_area: bool,
    /// Keep the ribbon visible on top of the out-of-bounds area
    pub render_play_area: bool,
}

/// Why a session ended up without tracking
#[derive(Debug, Clone, PartialEq)]
pub enum Inactive {
    /// Policy says the device draws its own boundary (or config disabled checking)
    NotChecked,
    /// The runtime could not provide a boundary
    BoundaryUnavailable(BoundaryError),
}

/// Tracker plus the session-level state around it
pub struct PlayArea {
    config: PlayAreaConfig,
    policies: Policies,
    tracker: Result<BoundaryTracker, Inactive>,
    pose: Affine3A,
}

impl PlayArea {
    /// Run the startup sequence
    ///
    /// Only an invalid config or cancellation is an error. A missing boundary
    /// or a disabled policy yields an inactive session whose `update` returns
    /// `None`.
    pub fn start(
        config: PlayAreaConfig,
        source: &mut dyn BoundarySource,
        devices: &dyn DeviceProvider,
        host: &dyn HostIntegration,
        cancel: &CancelToken,
    ) -> Result<Self, BoundaryError> {
        config.validate()?;
        let interval = config.poll_interval();
        let backend = source.backend();
        log::info!("Starting play area v{} with {}", crate::VERSION, backend.as_str());

        if config.skip_sdk_initialization {
            log::debug!("Skip host integration initialization");
        } else {
            log::debug!("Waiting for host integration initialization");
            wait_until(|| host.initialized(), interval, cancel)?;
        }

        let headset = wait_for_device(devices, DeviceRole::Headset, interval, cancel)?;
        let policy_device = if backend.needs_controller() {
            wait_for_controller(devices, interval, cancel)?
        } else {
            headset
        };

        let policies = Policies::resolve(
            host.checking_mode(),
            host.out_of_bounds_mode(),
            config.checking_mode,
            config.out_of_bounds_mode,
            &policy_device,
            backend.own_play_area_denylist(&config),
        );

        Ok(Self::with_policies(config, source, policies))
    }

    /// Build a session with already-resolved policies (no waiting)
    pub fn with_policies(config: PlayAreaConfig, source: &mut dyn BoundarySource, policies: Policies) -> Self {
        let tracker = if !policies.check_play_area {
            log::info!("Play area should not be checked");
            Err(Inactive::NotChecked)
        } else {
            match acquire_boundary(source, &config) {
                Ok(polygon) => Ok(BoundaryTracker::new(polygon, &config)),
                Err(err) => {
                    log::warn!("Failed to get play area rect: {}", err);
                    Err(Inactive::BoundaryUnavailable(err))
                }
            }
        };

        Self {
            config,
            policies,
            tracker,
            pose: Affine3A::IDENTITY,
        }
    }

    pub fn is_active(&self) -> bool {
        self.tracker.is_ok()
    }

    /// Why the session is inactive, if it is
    pub fn inactive_reason(&self) -> Option<&Inactive> {
        self.tracker.as_ref().err()
    }

    pub fn tracker(&self) -> Option<&BoundaryTracker> {
        self.tracker.as_ref().ok()
    }

    pub fn policies(&self) -> Policies {
        self.policies
    }

    pub fn config(&self) -> &PlayAreaConfig {
        &self.config
    }

    /// Move the play area with the camera rig
    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.pose = Affine3A::from_rotation_translation(rotation, position);
    }

    pub fn pose(&self) -> Affine3A {
        self.pose
    }

    /// Rebuild geometry if the source reports a changed boundary
    ///
    /// Returns true when the geometry was replaced. A failed re-fetch keeps the
    /// previous geometry. With a forced size the runtime boundary is never
    /// used, so change reports are consumed and ignored.
    pub fn refresh_boundary(&mut self, source: &mut dyn BoundarySource) -> bool {
        let Ok(tracker) = &mut self.tracker else {
            return false;
        };
        if !source.take_changed() || self.config.use_forced_play_area_size {
            return false;
        }

        match acquire_boundary(source, &self.config) {
            Ok(polygon) => {
                tracker.rebuild(polygon);
                true
            }
            Err(err) => {
                log::warn!("Play area changed but could not be retrieved: {}", err);
                false
            }
        }
    }

    /// Advance one frame; `None` while the session is inactive
    pub fn update(&mut self, frame: &FrameInput) -> Option<FrameOutput> {
        let tracker = self.tracker.as_mut().ok()?;

        let to_local = self.pose.inverse();
        let headset_local = to_local.transform_point3(frame.headset_position);
        let input = TickInput {
            dt: frame.dt,
            headset_position: headset_local,
            headset_forward: to_local.transform_vector3(frame.headset_forward),
            left_controller_position: frame.left_controller_position,
            right_controller_position: frame.right_controller_position,
        };

        if self.config.force_show_play_area {
            return Some(FrameOutput {
                shader: Some(ShaderParams::force_show()),
                bounds: tracker.bounds_state(),
                show_out_of_bounds_area: false,
                render_play_area: true,
            });
        }

        let shader = self.policies.check_play_area.then(|| tracker.tick(&input));
        if self.policies.use_out_of_bounds {
            tracker.update_bounds(headset_local);
        }

        let out_of_bounds = tracker.bounds_state().is_out_of_bounds();
        Some(FrameOutput {
            shader,
            bounds: tracker.bounds_state(),
            show_out_of_bounds_area: out_of_bounds,
            render_play_area: !out_of_bounds || self.config.render_play_area_when_out_of_bounds,
        })
    }

    /// Take queued events (Ready, Changed, ExitedBounds, EnteredBounds)
    pub fn drain_events(&mut self) -> Vec<BoundaryEvent> {
        match &mut self.tracker {
            Ok(tracker) => tracker.drain_events(),
            Err(_) => Vec::new(),
        }
    }
}

/// Either controller will do; left is checked first
fn wait_for_controller(
    devices: &dyn DeviceProvider,
    interval: std::time::Duration,
    cancel: &CancelToken,
) -> Result<String, BoundaryError> {
    log::debug!("Waiting for controller");
    let mut name = None;
    wait_until(
        || {
            name = devices
                .device_name(DeviceRole::LeftController)
                .or_else(|| devices.device_name(DeviceRole::RightController));
            name.is_some()
        },
        interval,
        cancel,
    )?;
    let name = name.unwrap_or_default();
    log::info!("Controller connected: {}", name);
    Ok(name)
}
