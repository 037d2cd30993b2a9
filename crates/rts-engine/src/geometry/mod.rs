//! Static triangle geometry.
//!
//! Meshes are validated once on the CPU and packed into native-endian byte
//! buffers ready for upload. Nothing here touches the GPU.

mod mesh;
pub mod models;

pub use mesh::{MeshData, StaticMesh, COORDS_PER_VERTEX};
