//! Material and texture resolution.

use std::sync::Arc;

use glam::{Vec3, Vec4};

use super::cache::ResourceCache;
use super::document::{self, TextureInfo};
use super::enums;
use super::result::{LoadResult, Record};
use super::{Caches, LoadContext};
use crate::errors::{LoadError, Result};
use crate::resources::material::DEFAULT_METALLIC_ROUGHNESS;
use crate::resources::{Channel, Material, MetallicRoughness, Sampler, Side, Texture, TextureSlot};

/// Material channel, for looking up omitted-factor defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    BaseColor,
    MetallicRoughness,
    Occlusion,
    Normal,
    Emissive,
}

/// Scalar used for a factor the source leaves out of a populated channel.
///
/// | slot              | texture present | no texture |
/// |-------------------|-----------------|------------|
/// | base color        | 1.0             | 1.0        |
/// | metallic/rough    | 1.0             | 0.5        |
/// | occlusion, normal | 1.0             | 1.0        |
/// | emissive          | 1.0             | 0.0        |
#[must_use]
pub fn omitted_factor(slot: Slot, has_texture: bool) -> f32 {
    match (slot, has_texture) {
        (Slot::MetallicRoughness, false) => DEFAULT_METALLIC_ROUGHNESS,
        (Slot::Emissive, false) => 0.0,
        (Slot::BaseColor | Slot::Occlusion | Slot::Normal, _) | (_, true) => 1.0,
    }
}

/// A channel exists as soon as the source states a factor or a texture.
fn channel<F>(factor: Option<F>, map: Option<TextureSlot>, fill: impl FnOnce(bool) -> F) -> Option<Channel<F>> {
    match (factor, map) {
        (None, None) => None,
        (Some(factor), map) => Some(Channel { factor, map }),
        (None, Some(map)) => Some(Channel {
            factor: fill(true),
            map: Some(map),
        }),
    }
}

/// Material for a primitive. `None` yields a fresh default material that is
/// never cached, so two primitives without materials never share one.
pub(crate) fn resolve_material(
    ctx: &LoadContext<'_>,
    caches: &mut Caches,
    result: &mut LoadResult,
    index: Option<usize>,
) -> Result<Arc<Material>> {
    let Some(index) = index else {
        let material = Arc::new(Material::new_default());
        result.materials.push(Record::new(material.clone(), None));
        return Ok(material);
    };

    let textures = &mut caches.textures;
    caches.materials.get_or_create(index, || {
        let material = Arc::new(build_material(ctx, textures, result, index)?);
        result.materials.push(Record::new(material.clone(), Some(index)));
        Ok(material)
    })
}

fn build_material(
    ctx: &LoadContext<'_>,
    textures: &mut ResourceCache<Arc<Texture>>,
    result: &mut LoadResult,
    index: usize,
) -> Result<Material> {
    let source = ctx.doc.material(index)?;
    let mut material = Material::new_default();
    material.name.clone_from(&source.name);
    material.side = if source.double_sided { Side::Double } else { Side::Front };
    material.alpha_mode = enums::alpha_mode(source.alpha_mode.as_deref());
    if let Some(cutoff) = source.alpha_cutoff {
        material.alpha_cutoff = cutoff;
    }

    let mut slot = |info: Option<TextureInfo>| -> Result<Option<TextureSlot>> {
        info.map(|info| texture_slot(ctx, textures, result, info)).transpose()
    };

    if let Some(pbr) = &source.pbr_metallic_roughness {
        let base_map = slot(pbr.base_color_texture)?;
        material.base_color = channel(pbr.base_color_factor.map(Vec4::from_array), base_map, |t| {
            Vec4::splat(omitted_factor(Slot::BaseColor, t))
        });

        let mr_map = slot(pbr.metallic_roughness_texture)?;
        let has_texture = mr_map.is_some();
        if pbr.metallic_factor.is_some() || pbr.roughness_factor.is_some() || has_texture {
            let fill = omitted_factor(Slot::MetallicRoughness, has_texture);
            material.metallic_roughness = Some(Channel {
                factor: MetallicRoughness {
                    metallic: pbr.metallic_factor.unwrap_or(fill),
                    roughness: pbr.roughness_factor.unwrap_or(fill),
                },
                map: mr_map,
            });
        }
    }

    if let Some(info) = source.occlusion_texture {
        let map = slot(Some(TextureInfo { index: info.index, tex_coord: info.tex_coord }))?;
        material.occlusion = channel(info.strength, map, |t| omitted_factor(Slot::Occlusion, t));
    }

    if let Some(info) = source.normal_texture {
        let map = slot(Some(TextureInfo { index: info.index, tex_coord: info.tex_coord }))?;
        material.normal = channel(info.scale, map, |t| omitted_factor(Slot::Normal, t));
    }

    let emissive_map = slot(source.emissive_texture)?;
    material.emissive = channel(source.emissive_factor.map(Vec3::from_array), emissive_map, |t| {
        Vec3::splat(omitted_factor(Slot::Emissive, t))
    });

    Ok(material)
}

fn texture_slot(
    ctx: &LoadContext<'_>,
    textures: &mut ResourceCache<Arc<Texture>>,
    result: &mut LoadResult,
    info: TextureInfo,
) -> Result<TextureSlot> {
    let texture = resolve_texture(ctx, textures, result, info.index)?;
    Ok(TextureSlot {
        texture,
        tex_coord: info.tex_coord,
    })
}

pub(crate) fn resolve_texture(
    ctx: &LoadContext<'_>,
    textures: &mut ResourceCache<Arc<Texture>>,
    result: &mut LoadResult,
    index: usize,
) -> Result<Arc<Texture>> {
    textures.get_or_create(index, || {
        let source = ctx.doc.texture(index)?;
        let image_index = source.source.ok_or_else(|| {
            LoadError::unsupported(format!("texture {index} has no image source"))
        })?;
        let image = ctx.sources.image(image_index)?;
        let sampler = match source.sampler {
            Some(sampler) => resolve_sampler(ctx.doc.sampler(sampler)?),
            None => Sampler::default(),
        };
        let texture = Arc::new(Texture::new(source.name.as_deref(), image, sampler));
        result.textures.push(Record::new(texture.clone(), index));
        Ok(texture)
    })
}

#[must_use]
pub fn resolve_sampler(sampler: &document::Sampler) -> Sampler {
    Sampler {
        min_filter: enums::min_filter(sampler.min_filter),
        mag_filter: enums::mag_filter(sampler.mag_filter),
        wrap_s: enums::wrap_mode(sampler.wrap_s),
        wrap_t: enums::wrap_mode(sampler.wrap_t),
    }
}
