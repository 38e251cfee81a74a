//! Host-side collaborators and cancellable polling
//!
//! The tracker never blocks on its own. Startup waits for the host integration
//! and tracked devices by polling at a fixed interval until the condition
//! holds or the session's [`CancelToken`] is triggered.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::PolicyMode;
use crate::error::BoundaryError;
use crate::source::DeviceRole;

/// Tracked device lookup
pub trait DeviceProvider {
    /// Model name of the device in `role`, `None` while it is not valid
    fn device_name(&self, role: DeviceRole) -> Option<String>;
}

/// Host integration SDK: initialization flag and policy overrides
pub trait HostIntegration {
    fn initialized(&self) -> bool;

    /// `Auto` when the host does not override checking
    fn checking_mode(&self) -> PolicyMode {
        PolicyMode::Auto
    }

    /// `Auto` when the host does not override out-of-bounds handling
    fn out_of_bounds_mode(&self) -> PolicyMode {
        PolicyMode::Auto
    }
}

/// Standalone use: always initialized, never overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntegration;

impl HostIntegration for NoIntegration {
    fn initialized(&self) -> bool {
        true
    }
}

/// Shared cancellation flag for wait loops
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Poll `ready` every `interval` until it returns true
///
/// No upper bound on attempts; returns [`BoundaryError::Cancelled`] as soon as
/// `cancel` is set (checked before every attempt).
pub fn wait_until<F>(mut ready: F, interval: Duration, cancel: &CancelToken) -> Result<u32, BoundaryError>
where
    F: FnMut() -> bool,
{
    let mut attempts = 0u32;
    loop {
        if cancel.is_cancelled() {
            return Err(BoundaryError::Cancelled);
        }
        attempts = attempts.saturating_add(1);
        if ready() {
            return Ok(attempts);
        }
        std::thread::sleep(interval);
    }
}

/// Wait for the device in `role` and return its model name
pub fn wait_for_device(
    devices: &dyn DeviceProvider,
    role: DeviceRole,
    interval: Duration,
    cancel: &CancelToken,
) -> Result<String, BoundaryError> {
    log::debug!("Waiting for {:?}", role);
    let mut name = None;
    wait_until(
        || {
            name = devices.device_name(role);
            name.is_some()
        },
        interval,
        cancel,
    )?;
    let name = name.unwrap_or_default();
    log::info!("{:?} connected: {}", role, name);
    Ok(name)
}
