use slotmap::SlotMap;

use crate::scene::camera::Camera;
use crate::scene::component::{Component, ComponentKey, MeshInstance};
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::{CameraKey, LightKey, MeshKey, NodeHandle};

/// Scene graph container.
///
/// Nodes and their components are stored in slot maps; nodes refer to
/// components by key. Roots are kept in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,
    pub meshes: SlotMap<MeshKey, MeshInstance>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a root node.
    pub fn create_node_with_name(&mut self, name: Option<&str>) -> NodeHandle {
        let handle = self.nodes.insert(Node::new(name));
        self.root_nodes.push(handle);
        handle
    }

    /// Creates a node under `parent`, or as a root when `parent` is `None`.
    pub fn create_node(&mut self, name: Option<&str>, parent: Option<NodeHandle>) -> NodeHandle {
        match parent {
            Some(parent) if self.nodes.contains_key(parent) => {
                let handle = self.nodes.insert(Node::new(name));
                self.link(handle, parent);
                handle
            }
            Some(_) => {
                log::warn!("Parent node not found, creating '{}' as a root", name.unwrap_or(""));
                self.create_node_with_name(name)
            }
            None => self.create_node_with_name(name),
        }
    }

    /// Moves `child` under `parent`, detaching it from its previous parent.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Node not found during attach!");
            return;
        }
        self.detach(child);
        self.link(child, parent);
    }

    fn detach(&mut self, child: NodeHandle) {
        let old_parent = self.nodes.get(child).and_then(Node::parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle)?.name.as_deref()
    }

    pub fn set_transform(&mut self, handle: NodeHandle, transform: Transform) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.transform = transform;
        }
    }

    // ========================================================================
    // Component attachment
    // ========================================================================

    pub fn attach_camera(&mut self, node: NodeHandle, camera: Camera) -> CameraKey {
        let key = self.cameras.insert(camera);
        if let Some(n) = self.nodes.get_mut(node) {
            n.camera = Some(key);
        }
        key
    }

    pub fn attach_light(&mut self, node: NodeHandle, light: Light) -> LightKey {
        let key = self.lights.insert(light);
        if let Some(n) = self.nodes.get_mut(node) {
            n.light = Some(key);
        }
        key
    }

    pub fn attach_mesh(&mut self, node: NodeHandle, mesh: MeshInstance) -> MeshKey {
        let key = self.meshes.insert(mesh);
        if let Some(n) = self.nodes.get_mut(node) {
            n.mesh = Some(key);
        }
        key
    }

    /// Routes a component to its kind's attach entry point.
    pub fn attach_component(&mut self, node: NodeHandle, component: Component) -> ComponentKey {
        match component {
            Component::Camera(camera) => ComponentKey::Camera(self.attach_camera(node, camera)),
            Component::Light(light) => ComponentKey::Light(self.attach_light(node, light)),
            Component::MeshInstance(mesh) => ComponentKey::Mesh(self.attach_mesh(node, mesh)),
        }
    }

    // ========================================================================
    // Component queries
    // ========================================================================

    #[must_use]
    pub fn camera_of(&self, node: NodeHandle) -> Option<&Camera> {
        self.cameras.get(self.nodes.get(node)?.camera?)
    }

    #[must_use]
    pub fn light_of(&self, node: NodeHandle) -> Option<&Light> {
        self.lights.get(self.nodes.get(node)?.light?)
    }

    #[must_use]
    pub fn mesh_of(&self, node: NodeHandle) -> Option<&MeshInstance> {
        self.meshes.get(self.nodes.get(node)?.mesh?)
    }
}
