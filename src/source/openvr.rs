//! OpenVR chaperone adapter

use glam::{Vec2, Vec3};

use super::{Backend, BoundarySource, to_ground};
use crate::error::BoundaryError;

/// The subset of the OpenVR chaperone interface used here
pub trait Chaperone {
    /// Play-area rect corners `vCorners0..vCorners3`, `None` if the call fails
    fn play_area_rect(&self) -> Option<[Vec3; 4]>;
}

/// Reads the play area from the chaperone
///
/// `chaperone` is `None` when the runtime has no chaperone (HMD not active).
pub struct OpenVrSource<C> {
    chaperone: Option<C>,
}

impl<C: Chaperone> OpenVrSource<C> {
    pub fn new(chaperone: Option<C>) -> Self {
        Self { chaperone }
    }
}

/// Reorder chaperone corners to bottom-left, top-left, top-right, bottom-right
///
/// The runtime reports `c0..c3` starting at a different corner; rotating to
/// `[c1, c2, c3, c0]` matches the synthetic rectangle order.
pub fn corners_to_points(corners: [Vec3; 4]) -> Vec<Vec2> {
    [corners[1], corners[2], corners[3], corners[0]]
        .into_iter()
        .map(to_ground)
        .collect()
}

impl<C: Chaperone> BoundarySource for OpenVrSource<C> {
    fn backend(&self) -> Backend {
        Backend::OpenVr
    }

    fn fetch_points(&mut self) -> Result<Vec<Vec2>, BoundaryError> {
        let Some(chaperone) = &self.chaperone else {
            log::warn!("VR chaperone not found. Is HMD active?");
            return Err(BoundaryError::Unavailable {
                backend: Backend::OpenVr.as_str(),
                reason: "chaperone not found".into(),
            });
        };

        match chaperone.play_area_rect() {
            Some(corners) => {
                log::debug!("Play area points retrieved");
                Ok(corners_to_points(corners))
            }
            None => Err(BoundaryError::Unavailable {
                backend: Backend::OpenVr.as_str(),
                reason: "GetPlayAreaRect failed".into(),
            }),
        }
    }
}
