use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// A scene node: hierarchy, local transform and at most one component of
/// each kind.
///
/// # Hierarchy
///
/// - `parent`: `None` for scene roots
/// - `children`: kept in insertion order
///
/// Components live in the [`Scene`](crate::scene::Scene) pools and are
/// referenced by key.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: Option<String>,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
    pub mesh: Option<MeshKey>,
}

impl Node {
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
