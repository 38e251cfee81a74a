//! Boundary polygon on the ground plane
//!
//! Points are stored as `Vec2(x, z)`: the `y` component of each `Vec2` is the
//! world Z axis. Edge `i` runs from point `i` to point `(i + 1) % len`.

use glam::{Vec2, Vec3};

use crate::error::BoundaryError;

/// Validated, closed boundary polygon
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    points: Vec<Vec2>,
}

impl BoundaryPolygon {
    /// Minimum number of points for a closed boundary
    pub const MIN_POINTS: usize = 3;

    /// Validate a raw point list
    ///
    /// Rejects lists with fewer than three points, non-finite coordinates and
    /// zero-length edges (including the closing edge).
    pub fn new(points: Vec<Vec2>) -> Result<Self, BoundaryError> {
        if points.len() < Self::MIN_POINTS {
            return Err(BoundaryError::TooFewPoints {
                count: points.len(),
            });
        }

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(BoundaryError::NonFinitePoint { index });
        }

        let n = points.len();
        for i in 0..n {
            if points[i] == points[(i + 1) % n] {
                return Err(BoundaryError::ZeroLengthEdge { index: i });
            }
        }

        Ok(Self { points })
    }

    /// Axis-aligned rectangle centered on the origin
    ///
    /// Corner order matches the runtime's play-area rect:
    /// bottom-left, top-left, top-right, bottom-right.
    pub fn rect_with_size(size: Vec2) -> Result<Self, BoundaryError> {
        let half = size / 2.0;
        Self::new(vec![
            Vec2::new(-half.x, -half.y),
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(half.x, -half.y),
        ])
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated polygon
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate edges as `(start, end)` pairs, closing edge included
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Arithmetic mean of the points
    pub fn centroid(&self) -> Vec2 {
        self.points.iter().copied().sum::<Vec2>() / self.points.len() as f32
    }

    /// Total perimeter length
    pub fn perimeter(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Bounding box extents (width along X, depth along Z)
    pub fn extents(&self) -> Vec2 {
        let (min, max) = self
            .points
            .iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(min, max), p| {
                (min.min(*p), max.max(*p))
            });
        max - min
    }

    /// Even-odd test on the ground-plane projection of `point`
    pub fn contains(&self, point: Vec3) -> bool {
        contains_point(&self.points, Vec2::new(point.x, point.z))
    }
}

/// Even-odd crossing-number test
///
/// Uses the half-open interval `y_i <= p.y < y_j` (or its mirror) so a ray
/// through a shared vertex is counted once. Horizontal edges never satisfy the
/// interval test, so the division below never sees `y_i == y_j`.
pub fn contains_point(points: &[Vec2], point: Vec2) -> bool {
    let mut inside = false;
    if points.is_empty() {
        return inside;
    }

    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        let straddles = (pi.y <= point.y && point.y < pj.y) || (pj.y <= point.y && point.y < pi.y);
        if straddles && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
