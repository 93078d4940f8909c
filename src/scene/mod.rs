//! Scene graph
//!
//! - Node: hierarchy + local transform + component keys
//! - Transform: position / rotation / scale
//! - Scene: node and component pools
//! - Camera, Light, MeshInstance: the attachable components

pub mod camera;
pub mod component;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::{Camera, Projection};
pub use component::{Component, ComponentKey, MeshInstance};
pub use light::{Light, LightKind, PointLight, SpotLight};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
}
