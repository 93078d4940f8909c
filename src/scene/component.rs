use std::sync::Arc;

use crate::resources::ResolvedMesh;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::{CameraKey, LightKey, MeshKey};

/// Per-node mesh attachment. The mesh itself is shared; the attachment is not.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub mesh: Arc<ResolvedMesh>,
}

impl MeshInstance {
    #[must_use]
    pub fn new(mesh: Arc<ResolvedMesh>) -> Self {
        Self { mesh }
    }
}

/// Everything that can be attached to a node.
#[derive(Debug, Clone)]
pub enum Component {
    Camera(Camera),
    Light(Light),
    MeshInstance(MeshInstance),
}

/// Key of an attached component in its scene pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKey {
    Camera(CameraKey),
    Light(LightKey),
    Mesh(MeshKey),
}
