//! glTF 2.0 JSON document model.
//!
//! Every top-level array is stored as-is; an element's position in its array
//! is its identity. Cross references stay plain `usize` indices and are only
//! ever resolved through [`Document`]'s bounds-checked accessors.

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{LoadError, Result};

/// Extension name for punctual lights, the only extension this loader implements.
pub const KHR_LIGHTS_PUNCTUAL: &str = "KHR_lights_punctual";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: Asset,
    pub scene: Option<usize>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub buffers: Vec<Buffer>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub samplers: Vec<Sampler>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    /// Kept untyped: any entry makes the document unsupported.
    #[serde(default)]
    pub animations: Vec<Value>,
    #[serde(default)]
    pub skins: Vec<Value>,
    #[serde(default)]
    pub extensions_used: Vec<String>,
    #[serde(default)]
    pub extensions_required: Vec<String>,
    pub extensions: Option<RootExtensions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub version: String,
    pub min_version: Option<String>,
    pub generator: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    pub name: Option<String>,
    pub camera: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
    pub skin: Option<usize>,
    pub matrix: Option<[f32; 16]>,
    pub mesh: Option<usize>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub translation: Option<[f32; 3]>,
    pub weights: Option<Vec<f32>>,
    pub extensions: Option<NodeExtensions>,
}

impl Node {
    /// The punctual light index referenced by this node, if any.
    #[must_use]
    pub fn light(&self) -> Option<usize> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.lights_punctual.as_ref())
            .map(|l| l.light)
    }

    #[must_use]
    pub fn has_trs(&self) -> bool {
        self.translation.is_some() || self.rotation.is_some() || self.scale.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeExtensions {
    #[serde(rename = "KHR_lights_punctual")]
    pub lights_punctual: Option<NodeLight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NodeLight {
    pub light: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RootExtensions {
    #[serde(rename = "KHR_lights_punctual")]
    pub lights_punctual: Option<LightsPunctual>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LightsPunctual {
    #[serde(default)]
    pub lights: Vec<Light>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub name: Option<String>,
    pub color: Option<[f32; 3]>,
    pub intensity: Option<f32>,
    #[serde(rename = "type")]
    pub kind: LightType,
    pub range: Option<f32>,
    pub spot: Option<Spot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub inner_cone_angle: Option<f32>,
    pub outer_cone_angle: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Mesh {
    pub name: Option<String>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    pub weights: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Primitive {
    /// Attribute semantic -> accessor index.
    #[serde(default)]
    pub attributes: BTreeMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    pub mode: Option<u32>,
    pub targets: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub name: Option<String>,
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: u32,
    #[serde(default)]
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: AccessorType,
    pub max: Option<Vec<f64>>,
    pub min: Option<Vec<f64>>,
    pub sparse: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub name: Option<String>,
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
    pub target: Option<u32>,
}

impl BufferView {
    /// Byte range inside the parent buffer, `None` if it does not fit in `usize`.
    #[must_use]
    pub fn range(&self) -> Option<Range<usize>> {
        Some(self.byte_offset..self.byte_offset.checked_add(self.byte_length)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub byte_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: Option<String>,
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: Option<[f32; 3]>,
    pub alpha_mode: Option<String>,
    pub alpha_cutoff: Option<f32>,
    #[serde(default)]
    pub double_sided: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Option<[f32; 4]>,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: Option<f32>,
    pub roughness_factor: Option<f32>,
    pub metallic_roughness_texture: Option<TextureInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureInfo {
    pub index: usize,
    #[serde(default)]
    pub tex_coord: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTextureInfo {
    pub index: usize,
    #[serde(default)]
    pub tex_coord: u32,
    pub scale: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcclusionTextureInfo {
    pub index: usize,
    #[serde(default)]
    pub tex_coord: u32,
    pub strength: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Texture {
    pub name: Option<String>,
    pub sampler: Option<usize>,
    pub source: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sampler {
    pub name: Option<String>,
    pub mag_filter: Option<u32>,
    pub min_filter: Option<u32>,
    pub wrap_s: Option<u32>,
    pub wrap_t: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    Orthographic,
    Perspective,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Camera {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: CameraType,
    pub orthographic: Option<Orthographic>,
    pub perspective: Option<Perspective>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Orthographic {
    pub xmag: f32,
    pub ymag: f32,
    pub zfar: f32,
    pub znear: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub aspect_ratio: Option<f32>,
    pub yfov: f32,
    pub zfar: Option<f32>,
    pub znear: f32,
}

/// Bounds-checked lookup into one of the document arrays.
#[inline]
pub fn element<'a, T>(items: &'a [T], index: usize, kind: &str) -> Result<&'a T> {
    items
        .get(index)
        .ok_or_else(|| LoadError::reference(kind, index, items.len()))
}

impl Document {
    /// Parses the JSON text of a `.gltf` file or a GLB JSON chunk.
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    pub fn scene_at(&self, index: usize) -> Result<&Scene> {
        element(&self.scenes, index, "scene")
    }

    pub fn node(&self, index: usize) -> Result<&Node> {
        element(&self.nodes, index, "node")
    }

    pub fn mesh(&self, index: usize) -> Result<&Mesh> {
        element(&self.meshes, index, "mesh")
    }

    pub fn accessor(&self, index: usize) -> Result<&Accessor> {
        element(&self.accessors, index, "accessor")
    }

    pub fn buffer_view(&self, index: usize) -> Result<&BufferView> {
        element(&self.buffer_views, index, "bufferView")
    }

    pub fn material(&self, index: usize) -> Result<&Material> {
        element(&self.materials, index, "material")
    }

    pub fn texture(&self, index: usize) -> Result<&Texture> {
        element(&self.textures, index, "texture")
    }

    pub fn image(&self, index: usize) -> Result<&Image> {
        element(&self.images, index, "image")
    }

    pub fn sampler(&self, index: usize) -> Result<&Sampler> {
        element(&self.samplers, index, "sampler")
    }

    pub fn camera(&self, index: usize) -> Result<&Camera> {
        element(&self.cameras, index, "camera")
    }

    /// Document-level `KHR_lights_punctual` light list (empty when absent).
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.lights_punctual.as_ref())
            .map_or(&[], |l| l.lights.as_slice())
    }

    pub fn light(&self, index: usize) -> Result<&Light> {
        element(self.lights(), index, "KHR_lights_punctual light")
    }

    /// The scene to instantiate: an explicit override, else `scene`, else the first one.
    #[must_use]
    pub fn default_scene_index(&self) -> Option<usize> {
        self.scene
            .or_else(|| (!self.scenes.is_empty()).then_some(0))
    }
}
