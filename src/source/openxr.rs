//! OpenXR input-subsystem adapter

use glam::{Vec2, Vec3};

use super::{Backend, BoundarySource, to_ground};
use crate::error::BoundaryError;

/// The subset of the XR input subsystem used here
pub trait XrInputSubsystem {
    /// Boundary points in tracking space, `None` if not available
    fn boundary_points(&self) -> Option<Vec<Vec3>>;

    /// True once after the tracking origin was updated
    fn take_tracking_origin_updated(&mut self) -> bool {
        false
    }
}

/// Reads the play area from the loaded XR input subsystem
///
/// `subsystem` is `None` when no XR loader is active.
pub struct OpenXrSource<S> {
    subsystem: Option<S>,
}

impl<S: XrInputSubsystem> OpenXrSource<S> {
    pub fn new(subsystem: Option<S>) -> Self {
        Self { subsystem }
    }
}

impl<S: XrInputSubsystem> BoundarySource for OpenXrSource<S> {
    fn backend(&self) -> Backend {
        Backend::OpenXr
    }

    fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError> {
        let subsystem = self.subsystem.as_ref().ok_or_else(|| BoundaryError::Unavailable {
            backend: Backend::OpenXr.as_str(),
            reason: "no XR input subsystem loaded".into(),
        })?;

        let points = subsystem.boundary_points().ok_or_else(|| BoundaryError::Unavailable {
            backend: Backend::OpenXr.as_str(),
            reason: "TryGetBoundaryPoints failed".into(),
        })?;

        log::debug!("Play area points retrieved ({})", points.len());
        Ok(points.into_iter().map(to_ground).collect())
    }

    fn take_changed(&mut self) -> bool {
        let changed = self
            .subsystem
            .as_mut()
            .is_some_and(|s| s.take_tracking_origin_updated());
        if changed {
            log::debug!("Play area tracking origin updated");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSubsystem {
        points: Option<Vec<Vec3>>,
        origin_updated: bool,
    }

    impl XrInputSubsystem for FakeSubsystem {
        fn boundary_points(&self) -> Option<Vec<Vec3>> {
            self.points.clone()
        }

        fn take_tracking_origin_updated(&mut self) -> bool {
            std::mem::take(&mut self.origin_updated)
        }
    }

    #[test]
    fn test_projects_to_ground() {
        let mut source = OpenXrSource::new(Some(FakeSubsystem {
            points: Some(vec![
                Vec3::new(-1.0, 0.1, -2.0),
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(1.5, -0.1, -2.0),
            ]),
            origin_updated: false,
        }));
        let points = source.fetch_points().unwrap();
        assert_eq!(
            points,
            vec![Vec2::new(-1.0, -2.0), Vec2::new(0.0, 2.0), Vec2::new(1.5, -2.0)]
        );
    }

    #[test]
    fn test_unavailable() {
        let mut source: OpenXrSource<FakeSubsystem> = OpenXrSource::new(None);
        assert!(source.fetch_points().is_err());
        assert!(!source.take_changed());

        let mut source = OpenXrSource::new(Some(FakeSubsystem {
            points: None,
            origin_updated: false,
        }));
        let err = source.fetch_points().unwrap_err();
        assert!(matches!(err, BoundaryError::Unavailable { backend: "OpenXR", .. }));
    }

    #[test]
    fn test_changed_is_reported_once() {
        let mut source = OpenXrSource::new(Some(FakeSubsystem {
            points: None,
            origin_updated: true,
        }));
        assert!(source.take_changed());
        assert!(!source.take_changed());
    }
}
