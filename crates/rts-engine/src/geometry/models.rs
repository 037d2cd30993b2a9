//! Built-in models.

use super::MeshData;

/// Spaceship hull: 5 vertices, 6 triangles.
pub const SHIP_POSITIONS: [[f32; 3]; 5] = [
    [2.024855, -0.010977, 0.000000],
    [-3.000248, 0.014253, -0.000000],
    [1.071316, 0.028810, -1.000000],
    [1.071316, 0.028810, 1.000000],
    [0.593598, 1.469822, -0.021358],
];

pub const SHIP_INDICES: [u16; 18] = [
    0, 4, 3, //
    4, 2, 1, //
    0, 2, 4, //
    0, 3, 2, //
    3, 2, 1, //
    3, 4, 1, //
];

/// Tree: trunk plus two canopy tiers. 25 vertices, 44 triangles.
///
/// Vertex 0 is an unused origin marker.
pub const TREE_POSITIONS: [[f32; 3]; 25] = [
    [0.0, 0.0, 0.0],
    [1.000000, -0.020508, -1.000000],
    [1.000000, -0.020508, 1.000000],
    [-1.000000, -0.020508, 1.000000],
    [-1.000000, -0.020508, -1.000000],
    [2.640002, 7.024941, -2.639999],
    [2.639999, 7.024941, 2.640002],
    [-2.640001, 7.024941, 2.639999],
    [-2.640000, 7.024941, -2.640001],
    [1.000000, 5.834182, -1.000000],
    [0.999999, 5.834182, 1.000000],
    [-1.000000, 5.834182, 1.000000],
    [-1.000000, 5.834182, -1.000000],
    [-2.640000, 7.024941, -2.640001],
    [-2.640001, 7.024941, 2.639999],
    [2.639999, 7.024941, 2.640002],
    [2.640002, 7.024941, -2.639999],
    [-2.640000, 4.992438, -2.640001],
    [-2.640001, 4.992438, 2.639999],
    [2.639999, 4.992438, 2.640001],
    [2.640002, 4.992438, -2.639999],
    [1.056001, 8.024941, -1.055999],
    [1.056000, 8.024941, 1.056001],
    [-1.056000, 8.024941, 1.056000],
    [-1.056000, 8.024941, -1.056000],
];

pub const TREE_INDICES: [u16; 132] = [
    1, 2, 3, //
    8, 7, 24, //
    7, 8, 13, //
    10, 9, 19, //
    8, 5, 16, //
    9, 1, 4, //
    1, 9, 10, //
    2, 10, 3, //
    3, 11, 4, //
    9, 12, 20, //
    20, 16, 15, //
    11, 10, 19, //
    12, 11, 18, //
    16, 20, 17, //
    18, 14, 17, //
    6, 7, 14, //
    19, 15, 18, //
    5, 6, 15, //
    21, 24, 23, //
    7, 6, 23, //
    6, 5, 21, //
    5, 8, 24, //
    4, 1, 3, //
    7, 23, 24, //
    14, 7, 13, //
    9, 20, 19, //
    13, 8, 16, //
    12, 9, 4, //
    2, 1, 10, //
    10, 11, 3, //
    11, 12, 4, //
    12, 17, 20, //
    19, 20, 15, //
    18, 11, 19, //
    17, 12, 18, //
    13, 16, 17, //
    14, 13, 17, //
    15, 6, 14, //
    15, 14, 18, //
    16, 5, 15, //
    22, 21, 23, //
    6, 22, 23, //
    22, 6, 21, //
    21, 5, 24, //
];

/// Spaceship mesh description.
pub const SHIP: MeshData<'static> = MeshData::new(&SHIP_POSITIONS, &SHIP_INDICES);

/// Tree mesh description.
pub const TREE: MeshData<'static> = MeshData::new(&TREE_POSITIONS, &TREE_INDICES);

/// Fill color shared by both models (straight RGBA).
pub const MODEL_COLOR: [f32; 4] = [0.2, 0.709803922, 0.898039216, 1.0];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StaticMesh;

    #[test]
    fn ship_is_valid() {
        let mesh = StaticMesh::new(&SHIP).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.index_count(), 18);
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn tree_is_valid() {
        let mesh = StaticMesh::new(&TREE).unwrap();
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.index_count(), 132);
        assert_eq!(mesh.triangle_count(), 44);
    }
}
