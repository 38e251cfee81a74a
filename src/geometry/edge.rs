//! Boundary edges as inward-facing vertical planes

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Lift a ground-plane point `(x, z)` to 3D at height `y`
#[inline]
pub fn ground_to_3d(p: Vec2, y: f32) -> Vec3 {
    Vec3::new(p.x, y, p.y)
}

/// One boundary segment, represented as a plane for distance queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unit normal, horizontal, pointing toward the polygon interior
    pub normal: Vec3,
    /// Point on the plane (segment start, y = 0)
    pub anchor: Vec3,
    /// Segment length on the ground plane
    pub length: f32,
}

impl Edge {
    /// Build the plane for segment `start → end`, facing `center`
    ///
    /// The normal is `cross(direction, up)`, flipped if it points away from
    /// `center` as seen from the segment midpoint. Works for either winding.
    pub fn from_segment(start: Vec2, end: Vec2, center: Vec2) -> Self {
        let start_3d = ground_to_3d(start, 0.0);
        let end_3d = ground_to_3d(end, 0.0);

        let dir = (end_3d - start_3d).normalize_or_zero();
        let mut normal = dir.cross(Vec3::Y);

        let middle = (start_3d + end_3d) * 0.5;
        let to_center = ground_to_3d(center, 0.0) - middle;
        if normal.dot(to_center) < 0.0 {
            normal = -normal;
        }

        Self {
            normal,
            anchor: start_3d,
            length: start.distance(end),
        }
    }

    /// Signed distance from `point` to the plane (positive on the interior side)
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point - self.anchor)
    }

    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.signed_distance(point).abs()
    }
}

/// Edge with the smallest absolute plane distance to `point`
///
/// Linear scan; ties keep the first edge. `None` for an empty slice.
pub fn nearest_edge(edges: &[Edge], point: Vec3) -> Option<(&Edge, f32)> {
    let mut nearest: Option<(&Edge, f32)> = None;
    for edge in edges {
        let distance = edge.distance(point);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((edge, distance)),
        }
    }
    nearest
}
