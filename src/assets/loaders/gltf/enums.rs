//! Mapping of glTF enumerations onto engine enumerations.
//!
//! Every function here is stateless. Optional sampler and material fields map
//! to fixed defaults when omitted; unknown values for them fall back to the
//! same default with a warning. Geometry-defining values (component type,
//! primitive mode) have no safe fallback and are format errors.

use super::document::AccessorType;
use crate::errors::{LoadError, Result};
use crate::resources::{AlphaMode, ComponentType, MagFilter, MinFilter, Topology, WrapMode};

pub mod gl {
    pub const BYTE: u32 = 5120;
    pub const UNSIGNED_BYTE: u32 = 5121;
    pub const SHORT: u32 = 5122;
    pub const UNSIGNED_SHORT: u32 = 5123;
    pub const UNSIGNED_INT: u32 = 5125;
    pub const FLOAT: u32 = 5126;

    pub const POINTS: u32 = 0;
    pub const LINES: u32 = 1;
    pub const LINE_LOOP: u32 = 2;
    pub const LINE_STRIP: u32 = 3;
    pub const TRIANGLES: u32 = 4;
    pub const TRIANGLE_STRIP: u32 = 5;
    pub const TRIANGLE_FAN: u32 = 6;

    pub const NEAREST: u32 = 9728;
    pub const LINEAR: u32 = 9729;
    pub const NEAREST_MIPMAP_NEAREST: u32 = 9984;
    pub const LINEAR_MIPMAP_NEAREST: u32 = 9985;
    pub const NEAREST_MIPMAP_LINEAR: u32 = 9986;
    pub const LINEAR_MIPMAP_LINEAR: u32 = 9987;

    pub const CLAMP_TO_EDGE: u32 = 33071;
    pub const MIRRORED_REPEAT: u32 = 33648;
    pub const REPEAT: u32 = 10497;
}

/// Number of scalar components per element: SCALAR..MAT4 -> 1, 2, 3, 4, 4, 9, 16.
#[must_use]
pub fn component_count(kind: AccessorType) -> u32 {
    match kind {
        AccessorType::Scalar => 1,
        AccessorType::Vec2 => 2,
        AccessorType::Vec3 => 3,
        AccessorType::Vec4 | AccessorType::Mat2 => 4,
        AccessorType::Mat3 => 9,
        AccessorType::Mat4 => 16,
    }
}

pub fn component_type(raw: u32) -> Result<ComponentType> {
    match raw {
        gl::BYTE => Ok(ComponentType::Byte),
        gl::UNSIGNED_BYTE => Ok(ComponentType::UnsignedByte),
        gl::SHORT => Ok(ComponentType::Short),
        gl::UNSIGNED_SHORT => Ok(ComponentType::UnsignedShort),
        gl::UNSIGNED_INT => Ok(ComponentType::UnsignedInt),
        gl::FLOAT => Ok(ComponentType::Float),
        other => Err(LoadError::format(format!("unknown accessor componentType {other}"))),
    }
}

/// Primitive mode; omitted means TRIANGLES.
pub fn topology(mode: Option<u32>) -> Result<Topology> {
    match mode.unwrap_or(gl::TRIANGLES) {
        gl::POINTS => Ok(Topology::Points),
        gl::LINES => Ok(Topology::Lines),
        gl::LINE_LOOP => Ok(Topology::LineLoop),
        gl::LINE_STRIP => Ok(Topology::LineStrip),
        gl::TRIANGLES => Ok(Topology::Triangles),
        gl::TRIANGLE_STRIP => Ok(Topology::TriangleStrip),
        gl::TRIANGLE_FAN => Ok(Topology::TriangleFan),
        other => Err(LoadError::format(format!("unknown primitive mode {other}"))),
    }
}

/// Minification filter; omitted means LINEAR_MIPMAP_LINEAR.
#[must_use]
pub fn min_filter(raw: Option<u32>) -> MinFilter {
    match raw {
        None | Some(gl::LINEAR_MIPMAP_LINEAR) => MinFilter::LinearMipmapLinear,
        Some(gl::NEAREST) => MinFilter::Nearest,
        Some(gl::LINEAR) => MinFilter::Linear,
        Some(gl::NEAREST_MIPMAP_NEAREST) => MinFilter::NearestMipmapNearest,
        Some(gl::LINEAR_MIPMAP_NEAREST) => MinFilter::LinearMipmapNearest,
        Some(gl::NEAREST_MIPMAP_LINEAR) => MinFilter::NearestMipmapLinear,
        Some(other) => {
            log::warn!("unknown sampler minFilter {other}, using LINEAR_MIPMAP_LINEAR");
            MinFilter::LinearMipmapLinear
        }
    }
}

/// Magnification filter; omitted means LINEAR.
#[must_use]
pub fn mag_filter(raw: Option<u32>) -> MagFilter {
    match raw {
        None | Some(gl::LINEAR) => MagFilter::Linear,
        Some(gl::NEAREST) => MagFilter::Nearest,
        Some(other) => {
            log::warn!("unknown sampler magFilter {other}, using LINEAR");
            MagFilter::Linear
        }
    }
}

/// Texture wrap (S or T); omitted means REPEAT.
#[must_use]
pub fn wrap_mode(raw: Option<u32>) -> WrapMode {
    match raw {
        None | Some(gl::REPEAT) => WrapMode::Repeat,
        Some(gl::CLAMP_TO_EDGE) => WrapMode::ClampToEdge,
        Some(gl::MIRRORED_REPEAT) => WrapMode::MirroredRepeat,
        Some(other) => {
            log::warn!("unknown sampler wrap mode {other}, using REPEAT");
            WrapMode::Repeat
        }
    }
}

/// Material alpha mode; omitted means OPAQUE.
#[must_use]
pub fn alpha_mode(raw: Option<&str>) -> AlphaMode {
    match raw {
        None | Some("OPAQUE") => AlphaMode::Opaque,
        Some("MASK") => AlphaMode::Mask,
        Some("BLEND") => AlphaMode::Blend,
        Some(other) => {
            log::warn!("unknown alphaMode '{other}', using OPAQUE");
            AlphaMode::Opaque
        }
    }
}

/// Faces drawn for `vertex_count` vertices under `topology`.
#[must_use]
pub fn face_count(topology: Topology, vertex_count: usize) -> usize {
    match topology {
        Topology::Points | Topology::Lines | Topology::LineLoop | Topology::LineStrip => 0,
        Topology::Triangles => vertex_count / 3,
        Topology::TriangleStrip | Topology::TriangleFan => vertex_count.saturating_sub(2),
    }
}

/// Float accessors store min/max at f32 precision; integer ones pass through.
#[must_use]
pub fn bounds_value(value: f64, component: ComponentType) -> f64 {
    if component.is_float() {
        f64::from(value as f32)
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_counts() {
        let counts: Vec<u32> = [
            AccessorType::Scalar,
            AccessorType::Vec2,
            AccessorType::Vec3,
            AccessorType::Vec4,
            AccessorType::Mat2,
            AccessorType::Mat3,
            AccessorType::Mat4,
        ]
        .into_iter()
        .map(component_count)
        .collect();
        assert_eq!(counts, [1, 2, 3, 4, 4, 9, 16]);
    }

    #[test]
    fn component_types() {
        assert_eq!(component_type(5126).unwrap(), ComponentType::Float);
        assert_eq!(component_type(5123).unwrap(), ComponentType::UnsignedShort);
        assert!(component_type(5124).unwrap_err().is_format());
    }

    #[test]
    fn topology_defaults_to_triangles() {
        assert_eq!(topology(None).unwrap(), Topology::Triangles);
        assert_eq!(topology(Some(6)).unwrap(), Topology::TriangleFan);
        assert!(topology(Some(7)).is_err());
    }

    #[test]
    fn face_counts() {
        assert_eq!(face_count(Topology::Triangles, 9), 3);
        assert_eq!(face_count(Topology::TriangleFan, 5), 3);
        assert_eq!(face_count(Topology::TriangleStrip, 4), 2);
        assert_eq!(face_count(Topology::TriangleStrip, 1), 0);
        assert_eq!(face_count(Topology::Lines, 10), 0);
        assert_eq!(face_count(Topology::Points, 3), 0);
    }

    #[test]
    fn sampler_defaults() {
        assert_eq!(min_filter(None), MinFilter::LinearMipmapLinear);
        assert_eq!(mag_filter(None), MagFilter::Linear);
        assert_eq!(wrap_mode(None), WrapMode::Repeat);
        assert_eq!(min_filter(Some(9728)), MinFilter::Nearest);
        assert_eq!(wrap_mode(Some(33071)), WrapMode::ClampToEdge);
        assert_eq!(wrap_mode(Some(1)), WrapMode::Repeat);
    }

    #[test]
    fn alpha_modes() {
        assert_eq!(alpha_mode(None), AlphaMode::Opaque);
        assert_eq!(alpha_mode(Some("MASK")), AlphaMode::Mask);
        assert_eq!(alpha_mode(Some("BLEND")), AlphaMode::Blend);
    }

    #[test]
    fn bounds_precision_depends_on_component_type() {
        let v = 0.1_f64;
        assert_eq!(bounds_value(v, ComponentType::Float), f64::from(0.1_f32));
        assert_ne!(bounds_value(v, ComponentType::Float), v);
        assert_eq!(bounds_value(65535.0, ComponentType::UnsignedShort), 65535.0);
        assert_eq!(bounds_value(v, ComponentType::UnsignedInt), v);
    }
}
