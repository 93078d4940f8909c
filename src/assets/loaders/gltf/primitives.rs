//! Mesh primitives: accessors, buffer uploads, vertex arrays.

use std::sync::Arc;

use glam::DVec3;
use smallvec::SmallVec;

use super::cache::ResourceCache;
use super::document::{Accessor, Primitive};
use super::enums;
use super::materials;
use super::result::{LoadResult, PrimitiveRef, Record};
use super::{Caches, LoadContext};
use crate::errors::{LoadError, Result};
use crate::resources::{
    BoundingBox, BufferKind, ComponentType, GpuBuffer, IndexBinding, MeshPrimitive, ResolvedMesh,
    VertexArray, VertexAttribute, slots,
};

/// Attribute semantics that bind to a shader slot. Anything else is ignored.
#[must_use]
pub fn attribute_slot(semantic: &str) -> Option<u32> {
    match semantic {
        "POSITION" => Some(slots::POSITION),
        "NORMAL" => Some(slots::NORMAL),
        "TANGENT" => Some(slots::TANGENT),
        "TEXCOORD_0" => Some(slots::TEXCOORD_0),
        "TEXCOORD_1" => Some(slots::TEXCOORD_1),
        "COLOR_0" => Some(slots::COLOR_0),
        _ => None,
    }
}

/// Accessor data bound to an uploaded buffer.
struct AccessorBinding {
    buffer: Arc<GpuBuffer>,
    component_type: ComponentType,
    components: u32,
    normalized: bool,
    byte_offset: usize,
    stride: usize,
    count: usize,
}

pub(crate) fn build_mesh(
    ctx: &LoadContext<'_>,
    caches: &mut Caches,
    result: &mut LoadResult,
    mesh_index: usize,
) -> Result<Arc<ResolvedMesh>> {
    let source = ctx.doc.mesh(mesh_index)?;
    if source.weights.is_some() {
        return Err(LoadError::unsupported(format!("morph target weights on mesh {mesh_index}")));
    }

    let mut primitives: SmallVec<[MeshPrimitive; 4]> = SmallVec::new();
    for (primitive_index, primitive) in source.primitives.iter().enumerate() {
        let at = PrimitiveRef {
            mesh: mesh_index,
            primitive: primitive_index,
        };
        if let Some(built) = build_primitive(ctx, caches, result, at, primitive)? {
            primitives.push(built);
        }
    }

    let mut mesh = ResolvedMesh::new(source.name.as_deref());
    mesh.primitives = primitives.into_vec();
    let mesh = Arc::new(mesh);
    result.meshes.push(Record::new(mesh.clone(), mesh_index));
    Ok(mesh)
}

fn build_primitive(
    ctx: &LoadContext<'_>,
    caches: &mut Caches,
    result: &mut LoadResult,
    at: PrimitiveRef,
    primitive: &Primitive,
) -> Result<Option<MeshPrimitive>> {
    let Some(&position) = primitive.attributes.get("POSITION") else {
        log::debug!(
            "Skipping primitive {} of mesh {}: no POSITION attribute",
            at.primitive,
            at.mesh
        );
        return Ok(None);
    };
    for semantic in ["JOINTS_0", "WEIGHTS_0"] {
        if primitive.attributes.contains_key(semantic) {
            return Err(LoadError::unsupported(format!(
                "skinning attribute {semantic} on mesh {}",
                at.mesh
            )));
        }
    }
    if primitive.targets.as_ref().is_some_and(|t| !t.is_empty()) {
        return Err(LoadError::unsupported(format!("morph targets on mesh {}", at.mesh)));
    }

    let topology = enums::topology(primitive.mode)?;
    let mut vertex_array = VertexArray::new(topology);

    for (semantic, &accessor_index) in &primitive.attributes {
        let Some(slot) = attribute_slot(semantic) else {
            log::debug!("Ignoring vertex attribute {semantic}");
            continue;
        };
        let binding = bind_accessor(ctx, &mut caches.vertex_buffers, BufferKind::Vertex, accessor_index)?;
        vertex_array.set_attribute(VertexAttribute {
            slot,
            buffer: binding.buffer,
            components: binding.components,
            component_type: binding.component_type,
            normalized: binding.normalized,
            byte_offset: binding.byte_offset,
            stride: binding.stride,
        });
    }

    if let Some(indices) = primitive.indices {
        let binding = bind_accessor(ctx, &mut caches.index_buffers, BufferKind::Index, indices)?;
        vertex_array.set_indices(IndexBinding {
            buffer: binding.buffer,
            component_type: binding.component_type,
            byte_offset: binding.byte_offset,
            count: binding.count,
        });
    }

    let positions = ctx.doc.accessor(position)?;
    vertex_array.vertex_count = positions.count;
    vertex_array.face_count = enums::face_count(topology, positions.count);
    vertex_array.bounds = position_bounds(positions)?;
    vertex_array.bounding_radius = vertex_array.bounds.map_or(0.0, |b| b.radius());

    let vertex_array = Arc::new(vertex_array);
    result.vertex_arrays.push(Record::new(vertex_array.clone(), at));

    let material = materials::resolve_material(ctx, caches, result, primitive.material)?;
    Ok(Some(MeshPrimitive { vertex_array, material }))
}

/// Bounds declared on the position accessor, narrowed to f32 precision for
/// float components.
fn position_bounds(accessor: &Accessor) -> Result<Option<BoundingBox>> {
    let (Some(min), Some(max)) = (&accessor.min, &accessor.max) else {
        return Ok(None);
    };
    let component_type = enums::component_type(accessor.component_type)?;
    let vec = |v: &[f64]| -> Option<DVec3> {
        match v {
            [x, y, z, ..] => Some(DVec3::new(
                enums::bounds_value(*x, component_type),
                enums::bounds_value(*y, component_type),
                enums::bounds_value(*z, component_type),
            )),
            _ => None,
        }
    };
    match (vec(min.as_slice()), vec(max.as_slice())) {
        (Some(min), Some(max)) => Ok(Some(BoundingBox { min, max })),
        _ => Err(LoadError::format("POSITION min/max must have three components")),
    }
}

fn bind_accessor(
    ctx: &LoadContext<'_>,
    buffers: &mut ResourceCache<Arc<GpuBuffer>>,
    kind: BufferKind,
    index: usize,
) -> Result<AccessorBinding> {
    let accessor = ctx.doc.accessor(index)?;
    if accessor.sparse.is_some() {
        return Err(LoadError::unsupported(format!("sparse accessor {index}")));
    }
    let view_index = accessor
        .buffer_view
        .ok_or_else(|| LoadError::unsupported(format!("accessor {index} has no bufferView")))?;
    let component_type = enums::component_type(accessor.component_type)?;
    let components = enums::component_count(accessor.kind);
    let view = ctx.doc.buffer_view(view_index)?;

    let element_size = components as usize * component_type.size_in_bytes();
    let stride = view.byte_stride.unwrap_or(element_size);
    if accessor.count > 0 {
        let end = stride
            .checked_mul(accessor.count - 1)
            .and_then(|span| span.checked_add(accessor.byte_offset))
            .and_then(|span| span.checked_add(element_size))
            .ok_or_else(|| {
                LoadError::format(format!("accessor {index} byte range overflows"))
            })?;
        if end > view.byte_length {
            return Err(LoadError::format(format!(
                "accessor {index} reads {end} bytes from bufferView {view_index} of length {}",
                view.byte_length
            )));
        }
    }

    let buffer = buffers.get_or_create(view_index, || upload_view(ctx, kind, view_index))?;
    Ok(AccessorBinding {
        buffer,
        component_type,
        components,
        normalized: accessor.normalized,
        byte_offset: accessor.byte_offset,
        stride,
        count: accessor.count,
    })
}

fn upload_view(ctx: &LoadContext<'_>, kind: BufferKind, view_index: usize) -> Result<Arc<GpuBuffer>> {
    let view = ctx.doc.buffer_view(view_index)?;
    let data = ctx.sources.buffer(view.buffer)?;
    let bytes = view
        .range()
        .and_then(|range| data.get(range))
        .ok_or_else(|| {
            LoadError::format(format!("bufferView {view_index} overruns buffer {}", view.buffer))
        })?;
    let label = view
        .name
        .clone()
        .unwrap_or_else(|| format!("bufferView_{view_index}"));
    log::debug!("Uploading {kind:?} buffer '{label}' ({} bytes)", bytes.len());
    Ok(Arc::new(GpuBuffer::from_bytes(kind, bytes, Some(&label))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::loaders::gltf::document::AccessorType;

    fn accessor(min: Option<Vec<f64>>, max: Option<Vec<f64>>) -> Accessor {
        Accessor {
            name: None,
            buffer_view: Some(0),
            byte_offset: 0,
            component_type: enums::gl::FLOAT,
            normalized: false,
            count: 3,
            kind: AccessorType::Vec3,
            max,
            min,
            sparse: None,
        }
    }

    #[test]
    fn maps_known_semantics() {
        assert_eq!(attribute_slot("POSITION"), Some(slots::POSITION));
        assert_eq!(attribute_slot("TEXCOORD_1"), Some(slots::TEXCOORD_1));
        assert_eq!(attribute_slot("_CUSTOM"), None);
    }

    #[test]
    fn bounds_from_min_max() {
        let bounds = position_bounds(&accessor(Some(vec![-1.0, -2.0, -3.0]), Some(vec![1.0, 2.0, 3.0])))
            .unwrap()
            .unwrap();
        assert_eq!(bounds.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(bounds.center(), DVec3::ZERO);
        assert!((bounds.radius() - 14.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn missing_bounds_are_none() {
        assert!(position_bounds(&accessor(None, Some(vec![1.0; 3]))).unwrap().is_none());
    }

    #[test]
    fn short_bounds_are_rejected() {
        let err = position_bounds(&accessor(Some(vec![0.0]), Some(vec![1.0]))).unwrap_err();
        assert!(err.is_format());
    }
}
