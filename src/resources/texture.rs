use std::sync::Arc;

use uuid::Uuid;

use crate::resources::image::Image;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    #[default]
    LinearMipmapLinear,
}

impl MinFilter {
    /// Whether sampling with this filter needs a mip chain.
    #[must_use]
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MagFilter {
    Nearest,
    #[default]
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

/// Sampling state. `Default` is the implicit sampler of a texture without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sampler {
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
}

/// A decoded image paired with the sampler it is read through.
#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: Option<String>,
    pub image: Arc<Image>,
    pub sampler: Sampler,
    pub generate_mipmaps: bool,
}

impl Texture {
    #[must_use]
    pub fn new(name: Option<&str>, image: Arc<Image>, sampler: Sampler) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.map(str::to_string),
            image,
            generate_mipmaps: sampler.min_filter.uses_mipmaps(),
            sampler,
        }
    }
}
