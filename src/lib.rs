#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;

pub use assets::loaders::gltf::{CompatWarning, PrimitiveRef, Record};
pub use assets::{
    AssetReader, FileAssetReader, GltfLoader, ImageCrateDecoder, ImageDecoder, LoadOptions,
    LoadResult,
};
pub use errors::{LoadError, Result};
pub use resources::{Image, Material, ResolvedMesh, Texture, VertexArray};
pub use scene::{Camera, Light, Node, NodeHandle, Scene, Transform};
