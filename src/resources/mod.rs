//! Render resource descriptors
//!
//! CPU-side descriptions of everything a load produces for the renderer,
//! independent of the GPU backend:
//! - GpuBuffer: an uploaded buffer view (vertex or index)
//! - VertexArray: attribute pointers + index binding of one primitive
//! - Image / Texture / Sampler: decoded pixels and how they are sampled
//! - Material: metallic-roughness PBR parameters
//! - ResolvedMesh: the (vertex array, material) pairs of one mesh

pub mod buffer;
pub mod geometry;
pub mod image;
pub mod material;
pub mod mesh;
pub mod texture;

pub use buffer::{BufferKind, GpuBuffer};
pub use geometry::{
    BoundingBox, ComponentType, IndexBinding, Topology, VertexArray, VertexAttribute, slots,
};
pub use image::Image;
pub use material::{AlphaMode, Channel, Material, MetallicRoughness, Side, TextureSlot};
pub use mesh::{MeshPrimitive, ResolvedMesh};
pub use texture::{MagFilter, MinFilter, Sampler, Texture, WrapMode};
