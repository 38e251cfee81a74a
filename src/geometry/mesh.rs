//! Warning-ribbon mesh and edge planes built from a boundary polygon

use glam::{Vec2, Vec3};

use super::edge::{Edge, ground_to_3d, nearest_edge};
use super::polygon::BoundaryPolygon;
use super::vertex::MeshVertex;

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// One quad per boundary edge
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Axis-aligned bounds as `(min, max)`, `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(MeshVertex::position);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Mesh and edge planes produced from one polygon snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryGeometry {
    pub mesh: RenderMesh,
    pub edges: Vec<Edge>,
    pub height: f32,
}

impl BoundaryGeometry {
    #[inline]
    pub fn nearest_edge(&self, point: Vec3) -> Option<(&Edge, f32)> {
        nearest_edge(&self.edges, point)
    }
}

/// Build the vertical ribbon wrapping `polygon` and its inward edge planes
///
/// Each segment becomes a quad from y = 0 to `height`: vertices bottom-start,
/// top-start, top-end, bottom-end; triangles `(0, 1, 2)` and `(2, 3, 0)`.
/// U follows the cumulative perimeter in `[0, 1]` and V spans
/// `[0, height / perimeter]`, so one repeating texture keeps its aspect ratio
/// regardless of play area size.
pub fn build_geometry(polygon: &BoundaryPolygon, height: f32) -> BoundaryGeometry {
    let total_length = polygon.perimeter();
    let top_v = height / total_length;
    let center = polygon.centroid();

    let quads = polygon.len();
    let mut vertices = Vec::with_capacity(quads * 4);
    let mut indices = Vec::with_capacity(quads * 6);
    let mut edges = Vec::with_capacity(quads);
    let mut accumulated = 0.0;

    for (start, end) in polygon.segments() {
        let corners = [
            ground_to_3d(start, 0.0),
            ground_to_3d(start, height),
            ground_to_3d(end, height),
            ground_to_3d(end, 0.0),
        ];
        let face_normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();

        let segment_length = start.distance(end);
        let start_u = accumulated / total_length;
        let end_u = (accumulated + segment_length) / total_length;
        let uvs = [
            Vec2::new(start_u, 0.0),
            Vec2::new(start_u, top_v),
            Vec2::new(end_u, top_v),
            Vec2::new(end_u, 0.0),
        ];
        let rows = [Vec2::ZERO, Vec2::ONE, Vec2::ONE, Vec2::ZERO];

        let base = vertices.len() as u32;
        for ((corner, uv), row) in corners.into_iter().zip(uvs).zip(rows) {
            vertices.push(MeshVertex::new(corner, face_normal, uv, row));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);

        edges.push(Edge::from_segment(start, end, center));
        accumulated += segment_length;
    }

    log::debug!(
        "Built play area geometry: {} quads, perimeter {:.2}, height {:.2}",
        quads,
        total_length,
        height
    );

    BoundaryGeometry {
        mesh: RenderMesh { vertices, indices },
        edges,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> BoundaryPolygon {
        BoundaryPolygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, -1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_ribbon() {
        let geometry = build_geometry(&square(), 3.0);
        assert_eq!(geometry.mesh.quad_count(), 4);
        assert_eq!(geometry.mesh.triangle_count(), 8);
        assert_eq!(geometry.mesh.vertices.len(), 16);
        assert_eq!(geometry.edges.len(), 4);

        let expected = [Vec3::X, Vec3::NEG_Z, Vec3::NEG_X, Vec3::Z];
        for (edge, normal) in geometry.edges.iter().zip(expected) {
            assert!((edge.normal - normal).length() < 1e-6, "{:?} != {:?}", edge.normal, normal);
        }
    }

    #[test]
    fn test_square_uvs() {
        let geometry = build_geometry(&square(), 3.0);
        let v = &geometry.mesh.vertices;

        // First quad covers the first quarter of the perimeter
        assert_eq!(v[0].uv, [0.0, 0.0]);
        assert_eq!(v[1].uv, [0.0, 3.0 / 8.0]);
        assert_eq!(v[2].uv, [0.25, 3.0 / 8.0]);
        assert_eq!(v[3].uv, [0.25, 0.0]);

        // Last quad ends at U = 1
        assert!((v[14].uv[0] - 1.0).abs() < 1e-6);

        assert_eq!(v[0].uv2, [0.0, 0.0]);
        assert_eq!(v[1].uv2, [1.0, 1.0]);
        assert_eq!(v[2].uv2, [1.0, 1.0]);
        assert_eq!(v[3].uv2, [0.0, 0.0]);
    }

    #[test]
    fn test_square_positions_and_indices() {
        let geometry = build_geometry(&square(), 3.0);
        let mesh = &geometry.mesh;
        assert_eq!(mesh.vertices[0].position, [-1.0, 0.0, -1.0]);
        assert_eq!(mesh.vertices[1].position, [-1.0, 3.0, -1.0]);
        assert_eq!(mesh.vertices[2].position, [-1.0, 3.0, 1.0]);
        assert_eq!(mesh.vertices[3].position, [-1.0, 0.0, 1.0]);
        assert_eq!(&mesh.indices[..6], &[0, 1, 2, 2, 3, 0]);
        assert_eq!(&mesh.indices[6..12], &[4, 5, 6, 6, 7, 4]);

        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(max, Vec3::new(1.0, 3.0, 1.0));
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }

    #[test]
    fn test_nearest_edge_from_centroid_is_finite() {
        let geometry = build_geometry(&square(), 3.0);
        for edge in &geometry.edges {
            let d = edge.distance(Vec3::ZERO);
            assert!(d.is_finite() && d > 0.0);
        }
        let (_, d) = geometry.nearest_edge(Vec3::ZERO).unwrap();
        assert!((d - 1.0).abs() < 1e-6);
    }

    fn convex_points() -> impl Strategy<Value = Vec<Vec2>> {
        (3usize..24, 0.5f32..10.0, any::<bool>()).prop_map(|(n, radius, clockwise)| {
            let sign = if clockwise { -1.0 } else { 1.0 };
            (0..n)
                .map(|i| {
                    let theta = sign * i as f32 / n as f32 * std::f32::consts::TAU;
                    Vec2::new(radius * theta.cos(), radius * theta.sin())
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_build_is_deterministic(points in convex_points(), height in 0.5f32..5.0) {
            let polygon = BoundaryPolygon::new(points).unwrap();
            let a = build_geometry(&polygon, height);
            let b = build_geometry(&polygon, height);
            prop_assert_eq!(a.mesh.vertices.len(), b.mesh.vertices.len());
            prop_assert_eq!(a.edges.len(), b.edges.len());
            for (ea, eb) in a.edges.iter().zip(&b.edges) {
                prop_assert_eq!(ea.normal, eb.normal);
            }
        }

        #[test]
        fn prop_normals_face_centroid(points in convex_points()) {
            let polygon = BoundaryPolygon::new(points).unwrap();
            let centroid = ground_to_3d(polygon.centroid(), 0.0);
            let geometry = build_geometry(&polygon, 3.0);
            for edge in &geometry.edges {
                prop_assert!((edge.normal.length() - 1.0).abs() < 1e-4);
                let d = edge.signed_distance(centroid);
                prop_assert!(d.is_finite() && d > 0.0);
            }
        }
    }
}
