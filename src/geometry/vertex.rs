//! Vertex type for the boundary ribbon mesh

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Ribbon vertex, laid out for direct GPU buffer upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Perimeter-parametrized texture coordinates
    pub uv: [f32; 2],
    /// (0, 0) on the ground row, (1, 1) on the top row; lets the shader fade each row separately
    pub uv2: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, uv2: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
            uv2: uv2.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Byte stride of one vertex in a tightly packed buffer
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
}
