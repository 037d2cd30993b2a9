use crate::error::MeshError;

/// Number of `f32` coordinates per vertex position.
pub const COORDS_PER_VERTEX: usize = 3;

/// Borrowed, immutable mesh description: positions plus a triangle list.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshData<'a> {
    pub positions: &'a [[f32; COORDS_PER_VERTEX]],
    /// Triangle list; each consecutive triple is one triangle.
    pub indices: &'a [u16],
}

impl<'a> MeshData<'a> {
    #[inline]
    pub const fn new(positions: &'a [[f32; COORDS_PER_VERTEX]], indices: &'a [u16]) -> Self {
        Self { positions, indices }
    }

    /// Checks the triangle-list invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();
        if vertex_count > usize::from(u16::MAX) + 1 {
            return Err(MeshError::TooManyVertices { vertex_count });
        }
        if self.indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle { index_count: self.indices.len() });
        }
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| usize::from(i) >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange { position, index, vertex_count });
        }
        Ok(())
    }
}

/// Validated mesh packed into upload-ready buffers.
///
/// Both buffers are tightly packed in native byte order:
/// - vertices: `COORDS_PER_VERTEX` `f32`s per vertex
/// - indices: one `u16` per index, three per triangle
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMesh {
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

impl StaticMesh {
    /// Validates `data` and copies it into packed buffers.
    pub fn new(data: &MeshData<'_>) -> Result<Self, MeshError> {
        data.validate()?;

        let vertices = data.positions.iter().flatten().copied().collect();
        let indices = data.indices.to_vec();

        Ok(Self { vertices, indices })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / COORDS_PER_VERTEX
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Byte distance between consecutive vertices.
    #[inline]
    pub const fn vertex_stride() -> u64 {
        (COORDS_PER_VERTEX * std::mem::size_of::<f32>()) as u64
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Vertex buffer contents.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents.
    ///
    /// wgpu requires buffer writes to be 4-byte aligned; an odd index count
    /// is padded by [`padded_index_bytes`](Self::padded_index_bytes).
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Index bytes padded with zeros to a multiple of four.
    pub fn padded_index_bytes(&self) -> Vec<u8> {
        let mut bytes = self.index_bytes().to_vec();
        let rem = bytes.len() % 4;
        if rem != 0 {
            bytes.resize(bytes.len() + (4 - rem), 0);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, -0.5],
    ];
    const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    #[test]
    fn buffer_lengths_follow_counts() {
        let mesh = StaticMesh::new(&MeshData::new(&QUAD, &QUAD_INDICES)).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.vertices().len(), 3 * 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 4 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 2);
        assert_eq!(StaticMesh::vertex_stride(), 12);
    }

    #[test]
    fn packed_bytes_decode_to_source_values() {
        let mesh = StaticMesh::new(&MeshData::new(&QUAD, &QUAD_INDICES)).unwrap();

        let floats: Vec<f32> = mesh
            .vertex_bytes()
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        let expected: Vec<f32> = QUAD.iter().flatten().copied().collect();
        assert_eq!(floats, expected);

        let shorts: Vec<u16> = mesh
            .index_bytes()
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(shorts, QUAD_INDICES);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let indices = [0, 1, 4];
        let err = StaticMesh::new(&MeshData::new(&QUAD, &indices)).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange { position: 2, index: 4, vertex_count: 4 }
        );
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let indices = [0, 1, 2, 3];
        let err = StaticMesh::new(&MeshData::new(&QUAD, &indices)).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { index_count: 4 });
    }

    #[test]
    fn empty_index_list_is_rejected() {
        let err = StaticMesh::new(&MeshData::new(&QUAD, &[])).unwrap_err();
        assert_eq!(err, MeshError::Empty);
    }

    #[test]
    fn index_padding_only_for_odd_counts() {
        let tri = StaticMesh::new(&MeshData::new(&QUAD, &[0, 1, 2])).unwrap();
        assert_eq!(tri.index_bytes().len(), 6);
        assert_eq!(tri.padded_index_bytes().len(), 8);

        let quad = StaticMesh::new(&MeshData::new(&QUAD, &QUAD_INDICES)).unwrap();
        assert_eq!(quad.padded_index_bytes(), quad.index_bytes());
    }

    #[test]
    fn vertex_count_is_capped_by_u16_indices() {
        let positions = vec![[0.0f32; 3]; usize::from(u16::MAX) + 2];
        let err = StaticMesh::new(&MeshData::new(&positions, &[0, 1, 2])).unwrap_err();
        assert_eq!(err, MeshError::TooManyVertices { vertex_count: 65_537 });

        let positions = &positions[..usize::from(u16::MAX) + 1];
        assert!(StaticMesh::new(&MeshData::new(positions, &[0, 1, 2])).is_ok());
    }
}
