pub mod gltf;

pub use gltf::{GltfLoader, LoadOptions, LoadResult};
