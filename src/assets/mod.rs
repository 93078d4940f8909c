pub mod io;
pub mod loaders;

pub use io::{AssetReader, FileAssetReader, ImageCrateDecoder, ImageDecoder};
pub use loaders::{GltfLoader, LoadOptions, LoadResult};

use std::path::Path;

use crate::errors::Result;
use crate::resources::Image;

/// Decodes an image file from disk into RGBA8 pixels.
pub fn load_image_from_file(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Image::new(width, height, rgba.into_raw()).with_label(path.to_str()))
}
