//! Boundary sources
//!
//! A VR runtime is reached through one of these adapters, picked at startup:
//! - `OpenVrSource`: chaperone play-area rect (four corners)
//! - `OpenXrSource`: input-subsystem boundary point list
//! - `ForcedSizeSource`: synthetic rectangle for debugging without a runtime

pub mod openvr;
pub mod openxr;

pub use openvr::{Chaperone, OpenVrSource};
pub use openxr::{OpenXrSource, XrInputSubsystem};

use glam::{Vec2, Vec3};

use crate::config::PlayAreaConfig;
use crate::error::BoundaryError;
use crate::geometry::BoundaryPolygon;

/// VR backend behind a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenVr,
    OpenXr,
    /// No runtime involved
    Synthetic,
}

/// Tracked device roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    Headset,
    LeftController,
    RightController,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::OpenVr => "OpenVR",
            Backend::OpenXr => "OpenXR",
            Backend::Synthetic => "Synthetic",
        }
    }

    /// Whether startup must also wait for a controller
    ///
    /// OpenXR only exposes the device model through controllers, so the
    /// own-boundary denylist is matched against the controller name.
    pub fn needs_controller(&self) -> bool {
        matches!(self, Backend::OpenXr)
    }

    /// Denylist to match the policy device against
    pub fn own_play_area_denylist<'a>(&self, config: &'a PlayAreaConfig) -> &'a [String] {
        match self {
            Backend::OpenXr => &config.controllers_with_own_play_area,
            Backend::OpenVr | Backend::Synthetic => &config.headsets_with_own_play_area,
        }
    }
}

/// Opaque provider of the raw boundary polygon
pub trait BoundarySource {
    fn backend(&self) -> Backend;

    /// Raw ground-plane points `(x, z)`, in runtime order
    fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError>;

    /// True once after the runtime reports that the boundary may have changed
    fn take_changed(&mut self) -> bool {
        false
    }
}

impl<S: BoundarySource + ?Sized> BoundarySource for Box<S> {
    fn backend(&self) -> Backend {
        (**self).backend()
    }

    fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError> {
        (**self).fetch_points()
    }

    fn take_changed(&mut self) -> bool {
        (**self).take_changed()
    }
}

/// Project a runtime-space point onto the ground plane
#[inline]
pub fn to_ground(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Centered rectangle of the given size
#[derive(Debug, Clone, Copy)]
pub struct ForcedSizeSource {
    pub size: Vec2,
}

impl ForcedSizeSource {
    pub fn new(size: Vec2) -> Self {
        Self { size }
    }
}

impl BoundarySource for ForcedSizeSource {
    fn backend(&self) -> Backend {
        Backend::Synthetic
    }

    fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError> {
        log::debug!("Forced play area size used: {}x{}", self.size.x, self.size.y);
        Ok(BoundaryPolygon::rect_with_size(self.size)?.points().to_vec())
    }
}

/// Retrieve and validate the boundary, applying the config overrides
///
/// With `use_forced_play_area_size` the runtime is not queried. When both
/// bounding-box sides are below `minimum_play_area_size`, the boundary is
/// replaced by a centered square of that size.
pub fn acquire_boundary(
    source: &mut dyn BoundarySource,
    config: &PlayAreaConfig,
) -> Result<BoundaryPolygon, BoundaryError> {
    log::debug!("Trying to get play area points from {}", source.backend().as_str());

    let points = if config.use_forced_play_area_size {
        ForcedSizeSource::new(config.forced_play_area_size).fetch_points()?
    } else {
        source.fetch_points()?
    };
    let polygon = BoundaryPolygon::new(points)?;

    let extents = polygon.extents();
    log::debug!("Play area size is {:.2}x{:.2}", extents.x, extents.y);

    let minimum = config.minimum_play_area_size;
    if extents.x < minimum && extents.y < minimum {
        log::warn!(
            "Play area size {:.2}x{:.2} is too small and will be increased to {}x{}",
            extents.x,
            extents.y,
            minimum,
            minimum
        );
        return BoundaryPolygon::rect_with_size(Vec2::splat(minimum));
    }

    Ok(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<Vec<Vec2>, BoundaryError>);

    impl BoundarySource for FixedSource {
        fn backend(&self) -> Backend {
            Backend::Synthetic
        }

        fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError> {
            self.0.clone()
        }
    }

    fn rect(w: f32, d: f32) -> Vec<Vec2> {
        BoundaryPolygon::rect_with_size(Vec2::new(w, d)).unwrap().points().to_vec()
    }

    #[test]
    fn test_large_boundary_passes_through() {
        let mut source = FixedSource(Ok(rect(3.0, 2.5)));
        let polygon = acquire_boundary(&mut source, &PlayAreaConfig::default()).unwrap();
        assert_eq!(polygon.extents(), Vec2::new(3.0, 2.5));
    }

    #[test]
    fn test_one_small_side_is_kept() {
        let mut source = FixedSource(Ok(rect(3.0, 1.0)));
        let polygon = acquire_boundary(&mut source, &PlayAreaConfig::default()).unwrap();
        assert_eq!(polygon.extents(), Vec2::new(3.0, 1.0));
    }

    #[test]
    fn test_small_boundary_becomes_minimum_square() {
        let mut source = FixedSource(Ok(rect(1.0, 1.0)));
        let polygon = acquire_boundary(&mut source, &PlayAreaConfig::default()).unwrap();
        assert_eq!(polygon.extents(), Vec2::new(2.0, 2.0));
        assert_eq!(polygon.centroid(), Vec2::ZERO);
    }

    #[test]
    fn test_forced_size_skips_runtime() {
        let mut source = FixedSource(Err(BoundaryError::Unavailable {
            backend: "test",
            reason: "never called".into(),
        }));
        let config = PlayAreaConfig {
            use_forced_play_area_size: true,
            forced_play_area_size: Vec2::new(4.0, 3.0),
            ..Default::default()
        };
        let polygon = acquire_boundary(&mut source, &config).unwrap();
        assert_eq!(polygon.extents(), Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_failures_propagate() {
        let mut source = FixedSource(Err(BoundaryError::Unavailable {
            backend: "test",
            reason: "runtime down".into(),
        }));
        let err = acquire_boundary(&mut source, &PlayAreaConfig::default()).unwrap_err();
        assert!(matches!(err, BoundaryError::Unavailable { .. }));

        let mut source = FixedSource(Ok(vec![Vec2::ZERO, Vec2::ONE]));
        let err = acquire_boundary(&mut source, &PlayAreaConfig::default()).unwrap_err();
        assert_eq!(err, BoundaryError::TooFewPoints { count: 2 });
    }

    #[test]
    fn test_backend_denylist_choice() {
        let config = PlayAreaConfig {
            headsets_with_own_play_area: vec!["hmd".into()],
            controllers_with_own_play_area: vec!["touch".into()],
            ..Default::default()
        };
        assert_eq!(Backend::OpenVr.own_play_area_denylist(&config), ["hmd".to_string()]);
        assert_eq!(Backend::OpenXr.own_play_area_denylist(&config), ["touch".to_string()]);
        assert!(Backend::OpenXr.needs_controller());
        assert!(!Backend::OpenVr.needs_controller());
    }
}
