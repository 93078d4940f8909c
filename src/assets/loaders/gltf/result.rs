use std::sync::Arc;

use super::compat::CompatWarning;
use crate::resources::{Material, ResolvedMesh, Texture, VertexArray};
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// A created object paired with the JSON element it came from.
#[derive(Debug, Clone)]
pub struct Record<T, S = usize> {
    pub object: T,
    pub source: S,
}

impl<T, S> Record<T, S> {
    pub fn new(object: T, source: S) -> Self {
        Self { object, source }
    }
}

/// Location of a primitive inside the `meshes` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveRef {
    pub mesh: usize,
    pub primitive: usize,
}

/// Everything one load call created, in creation order.
///
/// Sources are indices into the matching top-level glTF array. Materials
/// carry `None` when they are the default material of a primitive without
/// one. Mesh attachments are keyed by the node they were attached to.
#[derive(Debug, Default)]
pub struct LoadResult {
    pub scene_roots: Vec<NodeHandle>,
    pub nodes: Vec<Record<NodeHandle>>,
    pub cameras: Vec<Record<CameraKey>>,
    pub lights: Vec<Record<LightKey>>,
    pub mesh_attachments: Vec<Record<MeshKey>>,
    pub meshes: Vec<Record<Arc<ResolvedMesh>>>,
    pub materials: Vec<Record<Arc<Material>, Option<usize>>>,
    pub textures: Vec<Record<Arc<Texture>>>,
    pub vertex_arrays: Vec<Record<Arc<VertexArray>, PrimitiveRef>>,
    pub warnings: Vec<CompatWarning>,
}

impl LoadResult {
    /// Scene node created for the glTF node at `index`.
    #[must_use]
    pub fn node_handle(&self, index: usize) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|r| r.source == index)
            .map(|r| r.object)
    }

    #[must_use]
    pub fn mesh(&self, index: usize) -> Option<&Arc<ResolvedMesh>> {
        self.meshes.iter().find(|r| r.source == index).map(|r| &r.object)
    }

    #[must_use]
    pub fn material(&self, index: usize) -> Option<&Arc<Material>> {
        self.materials
            .iter()
            .find(|r| r.source == Some(index))
            .map(|r| &r.object)
    }

    #[must_use]
    pub fn texture(&self, index: usize) -> Option<&Arc<Texture>> {
        self.textures.iter().find(|r| r.source == index).map(|r| &r.object)
    }
}
