use std::sync::Arc;

use glam::DVec3;

use crate::resources::buffer::GpuBuffer;

/// Numeric type of one vertex / index component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    UnsignedInt,
    Float,
}

impl ComponentType {
    #[must_use]
    pub fn size_in_bytes(self) -> usize {
        match self {
            ComponentType::Byte | ComponentType::UnsignedByte => 1,
            ComponentType::Short | ComponentType::UnsignedShort => 2,
            ComponentType::UnsignedInt | ComponentType::Float => 4,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, ComponentType::Float)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Fixed vertex attribute locations shared with the shaders.
pub mod slots {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
    pub const TANGENT: u32 = 2;
    pub const TEXCOORD_0: u32 = 3;
    pub const TEXCOORD_1: u32 = 4;
    pub const COLOR_0: u32 = 5;
}

/// One attribute pointer of a vertex array.
#[derive(Debug, Clone)]
pub struct VertexAttribute {
    pub slot: u32,
    pub buffer: Arc<GpuBuffer>,
    pub components: u32,
    pub component_type: ComponentType,
    pub normalized: bool,
    /// Offset inside `buffer`.
    pub byte_offset: usize,
    pub stride: usize,
}

#[derive(Debug, Clone)]
pub struct IndexBinding {
    pub buffer: Arc<GpuBuffer>,
    pub component_type: ComponentType,
    pub byte_offset: usize,
    pub count: usize,
}

/// Axis-aligned bounds. Kept in f64 so integer accessor bounds stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Radius of the sphere around `center()` enclosing the box.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size().length() * 0.5
    }
}

/// A bound set of vertex attributes and optional indices: one drawable primitive.
#[derive(Debug, Clone)]
pub struct VertexArray {
    pub attributes: Vec<VertexAttribute>,
    pub indices: Option<IndexBinding>,
    pub topology: Topology,
    pub vertex_count: usize,
    pub face_count: usize,
    pub bounds: Option<BoundingBox>,
    pub bounding_radius: f64,
}

impl VertexArray {
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            attributes: Vec::new(),
            indices: None,
            topology,
            vertex_count: 0,
            face_count: 0,
            bounds: None,
            bounding_radius: 0.0,
        }
    }

    /// Configures an attribute pointer, replacing any earlier binding of `slot`.
    pub fn set_attribute(&mut self, attribute: VertexAttribute) {
        self.attributes.retain(|a| a.slot != attribute.slot);
        self.attributes.push(attribute);
    }

    #[must_use]
    pub fn attribute(&self, slot: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.slot == slot)
    }

    pub fn set_indices(&mut self, indices: IndexBinding) {
        self.indices = Some(indices);
    }
}
