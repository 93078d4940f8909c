//! Node hierarchy traversal and component attachment.

use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use rustc_hash::FxHashSet;

use super::cache::ResourceCache;
use super::document::{self, CameraType, LightType};
use super::primitives;
use super::result::{LoadResult, Record};
use super::{Caches, LoadContext, LoadOptions};
use crate::errors::{LoadError, Result};
use crate::resources::ResolvedMesh;
use crate::scene::{Camera, Light, MeshInstance, NodeHandle, Scene, Transform};

/// Walks one glTF scene depth-first and mirrors it into a [`Scene`].
pub(crate) struct SceneBuilder<'a> {
    ctx: LoadContext<'a>,
    options: &'a LoadOptions,
    scene: &'a mut Scene,
    caches: Caches,
    meshes: ResourceCache<Arc<ResolvedMesh>>,
    visited: FxHashSet<usize>,
    result: LoadResult,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(ctx: LoadContext<'a>, options: &'a LoadOptions, scene: &'a mut Scene) -> Self {
        Self {
            ctx,
            options,
            scene,
            caches: Caches::default(),
            meshes: ResourceCache::new("mesh"),
            visited: FxHashSet::default(),
            result: LoadResult::default(),
        }
    }

    pub fn build(mut self, scene_index: Option<usize>) -> Result<LoadResult> {
        let Some(scene_index) = scene_index else {
            log::warn!("glTF document has no scenes, nothing to load");
            return Ok(self.result);
        };
        let doc = self.ctx.doc;
        let source = doc.scene_at(scene_index)?;
        for &root in &source.nodes {
            if let Some(handle) = self.walk(root)? {
                self.result.scene_roots.push(handle);
            }
        }
        Ok(self.result)
    }

    /// Pre-order walk of the subtree under `root` on an explicit work stack,
    /// so hierarchy depth is bounded by the heap rather than the call stack.
    fn walk(&mut self, root: usize) -> Result<Option<NodeHandle>> {
        let mut pending = Vec::new();
        let root_handle = self.visit(root, None, &mut pending)?;
        while let Some((index, parent)) = pending.pop() {
            self.visit(index, parent, &mut pending)?;
        }
        Ok(root_handle)
    }

    /// Node `index` may be reached at most once; a second visit means the
    /// hierarchy is not a tree. Children are queued on `pending` in reverse
    /// so they pop in document order.
    fn visit(
        &mut self,
        index: usize,
        parent: Option<NodeHandle>,
        pending: &mut Vec<(usize, Option<NodeHandle>)>,
    ) -> Result<Option<NodeHandle>> {
        let doc = self.ctx.doc;
        let node = doc.node(index)?;
        if !self.visited.insert(index) {
            return Err(LoadError::Reference {
                context: "node reached more than once (cycle or shared child)".to_string(),
                index,
            });
        }
        if node.skin.is_some() {
            return Err(LoadError::unsupported(format!("skin on node {index}")));
        }
        if node.weights.is_some() {
            return Err(LoadError::unsupported(format!("morph weights on node {index}")));
        }

        let camera = node
            .camera
            .map(|i| doc.camera(i).and_then(|c| build_camera(c, self.options.viewport_aspect)))
            .transpose()?;
        let light = node
            .light()
            .map(|i| doc.light(i).map(|l| (i, build_light(l))))
            .transpose()?;

        let handle = if self.options.materialize_graph {
            let handle = self.scene.create_node(node.name.as_deref(), parent);
            self.scene.set_transform(handle, node_transform(node));
            self.result.nodes.push(Record::new(handle, index));

            if let (Some(camera_index), Some(camera)) = (node.camera, camera) {
                let key = self.scene.attach_camera(handle, camera);
                self.result.cameras.push(Record::new(key, camera_index));
            }
            if let Some((light_index, light)) = light {
                let key = self.scene.attach_light(handle, light);
                self.result.lights.push(Record::new(key, light_index));
            }
            Some(handle)
        } else {
            None
        };

        if let Some(mesh_index) = node.mesh {
            let ctx = &self.ctx;
            let caches = &mut self.caches;
            let result = &mut self.result;
            let mesh = self
                .meshes
                .get_or_create(mesh_index, || primitives::build_mesh(ctx, caches, result, mesh_index))?;
            if let Some(handle) = handle {
                let key = self.scene.attach_mesh(handle, MeshInstance::new(mesh));
                self.result.mesh_attachments.push(Record::new(key, index));
            }
        }

        pending.extend(node.children.iter().rev().map(|&child| (child, handle)));
        Ok(handle)
    }
}

/// `matrix` wins over TRS when both are present.
#[must_use]
pub fn node_transform(node: &document::Node) -> Transform {
    if let Some(matrix) = node.matrix {
        if node.has_trs() {
            log::warn!(
                "Node '{}' has both matrix and TRS properties; using the matrix",
                node.name.as_deref().unwrap_or("")
            );
        }
        let mut transform = Transform::new();
        transform.apply_local_matrix(Mat4::from_cols_array(&matrix));
        return transform;
    }
    Transform::from_trs(
        node.translation.map_or(Vec3::ZERO, Vec3::from_array),
        node.rotation.map_or(Quat::IDENTITY, Quat::from_array),
        node.scale.map_or(Vec3::ONE, Vec3::from_array),
    )
}

pub fn build_camera(camera: &document::Camera, viewport_aspect: f32) -> Result<Camera> {
    let name = camera.name.as_deref();
    match camera.kind {
        CameraType::Orthographic => {
            let o = camera.orthographic.ok_or_else(|| {
                LoadError::format("orthographic camera without orthographic properties")
            })?;
            Ok(Camera::new_orthographic(o.xmag / 2.0, o.ymag / 2.0, o.znear, o.zfar).with_name(name))
        }
        CameraType::Perspective => {
            let p = camera.perspective.ok_or_else(|| {
                LoadError::format("perspective camera without perspective properties")
            })?;
            Ok(Camera::new_perspective(
                p.yfov.to_degrees(),
                p.aspect_ratio.unwrap_or(viewport_aspect),
                p.znear,
                p.zfar.unwrap_or(f32::INFINITY),
            )
            .with_name(name))
        }
    }
}

#[must_use]
pub fn build_light(light: &document::Light) -> Light {
    let color = light.color.map_or(Vec3::ONE, Vec3::from_array);
    let intensity = light.intensity.unwrap_or(1.0);
    let range = light.range.unwrap_or(f32::INFINITY);
    let built = match light.kind {
        LightType::Directional => Light::new_directional(color, intensity),
        LightType::Point => Light::new_point(color, intensity, range),
        LightType::Spot => {
            let spot = light.spot.unwrap_or_default();
            Light::new_spot(
                color,
                intensity,
                range,
                spot.inner_cone_angle.unwrap_or(0.0).to_degrees(),
                spot.outer_cone_angle.unwrap_or(FRAC_PI_4).to_degrees(),
            )
        }
    };
    built.with_name(light.name.as_deref())
}
