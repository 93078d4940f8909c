use std::sync::Arc;

use crate::resources::geometry::VertexArray;
use crate::resources::material::Material;

/// One drawable batch of a mesh.
#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub vertex_array: Arc<VertexArray>,
    pub material: Arc<Material>,
}

/// The built form of one glTF mesh, shared by every node instancing it.
#[derive(Debug, Clone, Default)]
pub struct ResolvedMesh {
    pub name: Option<String>,
    /// Primitives without POSITION are skipped, so this may be shorter than
    /// the source primitive list.
    pub primitives: Vec<MeshPrimitive>,
}

impl ResolvedMesh {
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
