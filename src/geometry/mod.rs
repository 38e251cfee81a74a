//! Boundary geometry
//!
//! Pure functions over the play area polygon: validation, point containment,
//! edge planes and the warning-ribbon mesh. No runtime or rendering dependencies.

pub mod edge;
pub mod mesh;
pub mod polygon;
pub mod vertex;

pub use edge::{Edge, ground_to_3d, nearest_edge};
pub use mesh::{BoundaryGeometry, RenderMesh, build_geometry};
pub use polygon::{BoundaryPolygon, contains_point};
pub use vertex::MeshVertex;
