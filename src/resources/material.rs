use std::sync::Arc;

use glam::{Vec3, Vec4};
use uuid::Uuid;

use crate::resources::texture::Texture;

/// Metallic / roughness reported by a material whose source defines neither
/// a factor nor a texture for that channel.
pub const DEFAULT_METALLIC_ROUGHNESS: f32 = 0.5;
pub const DEFAULT_ALPHA_CUTOFF: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// A texture bound to a material channel.
#[derive(Debug, Clone)]
pub struct TextureSlot {
    pub texture: Arc<Texture>,
    /// Which TEXCOORD_n set the slot samples with.
    pub tex_coord: u32,
}

/// One material channel: a factor, optionally modulated by a texture.
#[derive(Debug, Clone)]
pub struct Channel<F> {
    pub factor: F,
    pub map: Option<TextureSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetallicRoughness {
    pub metallic: f32,
    pub roughness: f32,
}

/// Metallic-roughness PBR material.
///
/// Each channel is `None` unless the source supplied a texture or a factor
/// for it; renderers fall back to the accessors below in that case.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub side: Side,
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,

    pub base_color: Option<Channel<Vec4>>,
    pub metallic_roughness: Option<Channel<MetallicRoughness>>,
    /// Factor is the occlusion strength.
    pub occlusion: Option<Channel<f32>>,
    /// Factor is the normal scale.
    pub normal: Option<Channel<f32>>,
    pub emissive: Option<Channel<Vec3>>,
}

impl Material {
    /// The material used by primitives that reference none.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: None,
            side: Side::Front,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            base_color: None,
            metallic_roughness: None,
            occlusion: None,
            normal: None,
            emissive: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn double_sided(&self) -> bool {
        self.side == Side::Double
    }

    #[must_use]
    pub fn base_color_factor(&self) -> Vec4 {
        self.base_color.as_ref().map_or(Vec4::ONE, |c| c.factor)
    }

    #[must_use]
    pub fn metallic(&self) -> f32 {
        self.metallic_roughness
            .as_ref()
            .map_or(DEFAULT_METALLIC_ROUGHNESS, |c| c.factor.metallic)
    }

    #[must_use]
    pub fn roughness(&self) -> f32 {
        self.metallic_roughness
            .as_ref()
            .map_or(DEFAULT_METALLIC_ROUGHNESS, |c| c.factor.roughness)
    }

    #[must_use]
    pub fn emissive_factor(&self) -> Vec3 {
        self.emissive.as_ref().map_or(Vec3::ZERO, |c| c.factor)
    }

    /// Every texture referenced by the material, in channel order.
    pub fn textures(&self) -> impl Iterator<Item = &Arc<Texture>> {
        [
            self.base_color.as_ref().and_then(|c| c.map.as_ref()),
            self.metallic_roughness.as_ref().and_then(|c| c.map.as_ref()),
            self.occlusion.as_ref().and_then(|c| c.map.as_ref()),
            self.normal.as_ref().and_then(|c| c.map.as_ref()),
            self.emissive.as_ref().and_then(|c| c.map.as_ref()),
        ]
        .into_iter()
        .flatten()
        .map(|slot| &slot.texture)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new_default()
    }
}
