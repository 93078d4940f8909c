//! glTF 2.0 / GLB loader.
//!
//! A load runs in three phases:
//!
//! 1. **Parse**: split the container, decode the JSON document and pass it
//!    through the compatibility gate.
//! 2. **Fetch**: resolve every buffer and image concurrently through the
//!    [`AssetReader`] and [`ImageDecoder`] collaborators.
//! 3. **Build**: walk the selected scene depth-first, creating nodes and
//!    attaching cameras, lights and meshes. Meshes, materials, textures and
//!    buffer views are created at most once per load and shared by `Arc`.
//!
//! ```rust,ignore
//! let loader = GltfLoader::new(FileAssetReader::new("assets"), ImageCrateDecoder);
//! let mut scene = Scene::new();
//! let result = loader.load_blocking("DamagedHelmet.glb", &mut scene)?;
//! ```

pub mod cache;
pub mod compat;
pub mod container;
pub mod document;
pub mod enums;
pub mod fetch;
pub mod materials;
pub mod nodes;
pub mod primitives;
pub mod result;

use std::sync::{Arc, OnceLock};

use tokio::runtime::Runtime;

use self::cache::ResourceCache;
use self::container::Container;
use self::document::Document;
use self::fetch::Sources;
use self::nodes::SceneBuilder;
use crate::assets::io::{AssetReader, FileAssetReader, ImageCrateDecoder, ImageDecoder};
use crate::errors::{LoadError, Result};
use crate::resources::{GpuBuffer, Material, Texture};
use crate::scene::Scene;

pub use self::compat::CompatWarning;
pub use self::result::{LoadResult, PrimitiveRef, Record};

fn asset_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }
    // Losing a concurrent race just drops the extra runtime.
    let _ = RUNTIME.set(Runtime::new()?);
    RUNTIME
        .get()
        .ok_or_else(|| LoadError::Io(std::io::Error::other("asset runtime unavailable")))
}

/// Per-call knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Scene to instantiate instead of the document default.
    pub scene: Option<usize>,
    /// When `false`, meshes and materials are still built and returned but
    /// no scene nodes or components are created.
    pub materialize_graph: bool,
    /// Aspect ratio for perspective cameras that do not declare one.
    pub viewport_aspect: f32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            scene: None,
            materialize_graph: true,
            viewport_aspect: 1.0,
        }
    }
}

/// Read-only inputs shared by every build step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoadContext<'a> {
    pub doc: &'a Document,
    pub sources: &'a Sources,
}

/// Per-load identity maps, keyed by glTF index.
#[derive(Debug)]
pub(crate) struct Caches {
    pub vertex_buffers: ResourceCache<Arc<GpuBuffer>>,
    pub index_buffers: ResourceCache<Arc<GpuBuffer>>,
    pub textures: ResourceCache<Arc<Texture>>,
    pub materials: ResourceCache<Arc<Material>>,
}

impl Default for Caches {
    fn default() -> Self {
        Self {
            vertex_buffers: ResourceCache::new("vertex buffer"),
            index_buffers: ResourceCache::new("index buffer"),
            textures: ResourceCache::new("texture"),
            materials: ResourceCache::new("material"),
        }
    }
}

/// Loads glTF assets into a [`Scene`].
///
/// The loader itself holds no per-asset state; every call builds its own
/// caches, so two loads never share resources.
pub struct GltfLoader<R, D> {
    reader: R,
    decoder: D,
    options: LoadOptions,
}

impl GltfLoader<FileAssetReader, ImageCrateDecoder> {
    /// Loader reading from the local filesystem under `root`.
    pub fn from_dir(root: impl AsRef<std::path::Path>) -> Self {
        Self::new(FileAssetReader::new(root), ImageCrateDecoder)
    }
}

impl<R: AssetReader, D: ImageDecoder> GltfLoader<R, D> {
    pub fn new(reader: R, decoder: D) -> Self {
        Self {
            reader,
            decoder,
            options: LoadOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Fetches `uri` through the reader and loads it.
    ///
    /// Relative URIs inside the asset resolve against the directory of `uri`.
    /// Any executor may poll the returned future. The default collaborators
    /// offload work to Tokio when a runtime is current and run inline on the
    /// polling thread otherwise.
    pub async fn load(&self, uri: &str, scene: &mut Scene) -> Result<LoadResult> {
        let bytes = self.reader.read_bytes(uri).await?;
        self.load_bytes(uri, &bytes, scene).await
    }

    /// Loads an asset whose top-level bytes are already in memory.
    pub async fn load_bytes(&self, uri: &str, bytes: &[u8], scene: &mut Scene) -> Result<LoadResult> {
        let container = if has_glb_extension(uri) {
            container::parse_glb(bytes)?
        } else {
            Container::from_bytes(bytes)?
        };

        let doc = Document::from_slice(container.json)?;
        let warnings = compat::check(&doc)?;

        let sources =
            fetch::fetch_sources(&doc, container.bin, uri, &self.reader, &self.decoder).await?;

        let scene_index = self.options.scene.or_else(|| doc.default_scene_index());
        let ctx = LoadContext {
            doc: &doc,
            sources: &sources,
        };
        let mut result = SceneBuilder::new(ctx, &self.options, scene).build(scene_index)?;
        result.warnings = warnings;

        log::info!(
            "Loaded glTF '{uri}': {} nodes, {} meshes, {} materials, {} textures",
            result.nodes.len(),
            result.meshes.len(),
            result.materials.len(),
            result.textures.len()
        );
        Ok(result)
    }

    /// Blocks the calling thread on a shared runtime until the load finishes.
    pub fn load_blocking(&self, uri: &str, scene: &mut Scene) -> Result<LoadResult> {
        asset_runtime()?.block_on(self.load(uri, scene))
    }
}

/// `.glb` files must carry the binary header; anything else is sniffed.
fn has_glb_extension(uri: &str) -> bool {
    std::path::Path::new(uri)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("glb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glb_extension_is_case_insensitive() {
        assert!(has_glb_extension("models/Box.GLB"));
        assert!(has_glb_extension("box.glb"));
        assert!(!has_glb_extension("box.gltf"));
        assert!(!has_glb_extension("glb"));
    }

    #[test]
    fn default_options_materialize_the_graph() {
        let options = LoadOptions::default();
        assert!(options.materialize_graph);
        assert_eq!(options.scene, None);
        assert_eq!(options.viewport_aspect, 1.0);
    }
}
