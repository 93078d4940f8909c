use std::future::Future;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::runtime::Handle;

use crate::errors::{LoadError, Result};
use crate::resources::Image;

/// Asset reader trait.
///
/// Fetches the bytes behind a URI relative to the asset being loaded. Every
/// call is independent; the loader runs many of them concurrently.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Local file reader rooted at a directory.
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    /// `path` may be the asset file itself or its directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

/// Reads through `tokio::fs` inside a Tokio runtime and blocks the calling
/// thread otherwise, so any executor can drive it.
impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        let read = if Handle::try_current().is_ok() {
            tokio::fs::read(&path).await
        } else {
            std::fs::read(&path)
        };
        read.map_err(|e| LoadError::transport(path.display().to_string(), e))
    }
}

/// Image decoder trait.
///
/// Turns encoded image bytes (PNG, JPEG, ...) into RGBA8 pixels.
pub trait ImageDecoder: Send + Sync {
    fn decode(
        &self,
        bytes: Vec<u8>,
        mime_type: Option<String>,
    ) -> impl Future<Output = Result<Image>> + Send;
}

/// Decoder backed by the `image` crate.
///
/// Runs on Tokio's blocking pool when polled inside a runtime and decodes
/// inline on the polling thread otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageCrateDecoder {
    fn decode_cpu(bytes: &[u8], mime_type: Option<&str>) -> Result<Image> {
        let format = match mime_type {
            Some("image/png") => Some(image::ImageFormat::Png),
            Some("image/jpeg") => Some(image::ImageFormat::Jpeg),
            _ => None,
        };
        let img = match format {
            Some(format) => image::load_from_memory_with_format(bytes, format)?,
            None => image::load_from_memory(bytes)?,
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Image::new(width, height, rgba.into_raw()))
    }
}

impl ImageDecoder for ImageCrateDecoder {
    async fn decode(&self, bytes: Vec<u8>, mime_type: Option<String>) -> Result<Image> {
        match Handle::try_current() {
            Ok(handle) => {
                handle
                    .spawn_blocking(move || Self::decode_cpu(&bytes, mime_type.as_deref()))
                    .await?
            }
            Err(_) => Self::decode_cpu(&bytes, mime_type.as_deref()),
        }
    }
}

/// A parsed `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

#[inline]
#[must_use]
pub fn is_data_uri(uri: &str) -> bool {
    uri.starts_with("data:")
}

/// Decodes `data:[<mime>][;base64],<payload>` in place. Only base64
/// payloads are accepted.
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::format("not a data URI"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::format("data URI without ',' separator"))?;
    let Some(mime) = header.strip_suffix(";base64") else {
        return Err(LoadError::format(format!(
            "data URI with header '{header}' is not base64 encoded"
        )));
    };
    let data = STANDARD.decode(payload)?;
    Ok(DataUri {
        mime_type: (!mime.is_empty()).then(|| mime.to_string()),
        data,
    })
}
