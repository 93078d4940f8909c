//! Concurrent resolution of buffers and images before traversal starts.

use std::sync::Arc;

use futures::future::{try_join, try_join_all};

use super::document::{Buffer, Document, Image as ImageDef, element};
use crate::assets::io::{AssetReader, ImageDecoder, decode_data_uri, is_data_uri};
use crate::errors::{LoadError, Result};
use crate::resources::Image;

/// Binary payloads of one load call, indexed like the document arrays.
#[derive(Debug, Default)]
pub struct Sources {
    pub buffers: Vec<Vec<u8>>,
    pub images: Vec<Arc<Image>>,
}

impl Sources {
    pub fn buffer(&self, index: usize) -> Result<&[u8]> {
        element(&self.buffers, index, "buffer").map(Vec::as_slice)
    }

    pub fn image(&self, index: usize) -> Result<Arc<Image>> {
        element(&self.images, index, "image").cloned()
    }
}

/// Percent-decodes `uri` and resolves it against the directory of the asset
/// at `base`.
pub fn resolve_uri(base: &str, uri: &str) -> Result<String> {
    let decoded = urlencoding::decode(uri).map_err(|e| {
        LoadError::format(format!("uri '{uri}' is not valid UTF-8 once decoded: {e}"))
    })?;
    Ok(match base.rfind(['/', '\\']) {
        Some(pos) => format!("{}{decoded}", &base[..=pos]),
        None => decoded.into_owned(),
    })
}

/// Fetches every external buffer and image concurrently, decodes data URIs in
/// place, then decodes all images. The first failure aborts the whole set.
pub async fn fetch_sources<R, D>(
    doc: &Document,
    bin: Option<&[u8]>,
    base: &str,
    reader: &R,
    decoder: &D,
) -> Result<Sources>
where
    R: AssetReader,
    D: ImageDecoder,
{
    let buffer_futures = doc
        .buffers
        .iter()
        .enumerate()
        .map(|(index, buffer)| load_buffer(index, buffer, bin, base, reader));

    let image_futures = doc
        .images
        .iter()
        .map(|image| fetch_external_image(image, base, reader));

    let (buffers, external_images) =
        try_join(try_join_all(buffer_futures), try_join_all(image_futures)).await?;

    // Images stored in buffer views can only be sliced once buffers are in.
    let mut encoded = Vec::with_capacity(doc.images.len());
    for (index, (image, fetched)) in doc.images.iter().zip(external_images).enumerate() {
        encoded.push(encoded_image(doc, index, image, fetched, &buffers)?);
    }

    let images = try_join_all(doc.images.iter().zip(encoded).map(
        |(image, (bytes, mime_type))| async move {
            let decoded = decoder.decode(bytes, mime_type).await?;
            Ok::<_, LoadError>(Arc::new(decoded.with_label(image.name.as_deref())))
        },
    ))
    .await?;

    Ok(Sources { buffers, images })
}

async fn load_buffer<R: AssetReader>(
    index: usize,
    buffer: &Buffer,
    bin: Option<&[u8]>,
    base: &str,
    reader: &R,
) -> Result<Vec<u8>> {
    let data = match &buffer.uri {
        Some(uri) if is_data_uri(uri) => decode_data_uri(uri)?.data,
        Some(uri) => reader.read_bytes(&resolve_uri(base, uri)?).await?,
        None if index == 0 => bin
            .ok_or_else(|| LoadError::format("buffer 0 has no uri and the asset has no BIN chunk"))?
            .to_vec(),
        None => {
            return Err(LoadError::format(format!(
                "buffer {index} has no uri; only buffer 0 may refer to the GLB BIN chunk"
            )));
        }
    };
    if data.len() < buffer.byte_length {
        return Err(LoadError::format(format!(
            "buffer {index} holds {} bytes, less than its byteLength {}",
            data.len(),
            buffer.byte_length
        )));
    }
    Ok(data)
}

async fn fetch_external_image<R: AssetReader>(
    image: &ImageDef,
    base: &str,
    reader: &R,
) -> Result<Option<Vec<u8>>> {
    match &image.uri {
        Some(uri) if !is_data_uri(uri) => Ok(Some(reader.read_bytes(&resolve_uri(base, uri)?).await?)),
        _ => Ok(None),
    }
}

/// Encoded bytes and MIME type of one image.
fn encoded_image(
    doc: &Document,
    index: usize,
    image: &ImageDef,
    fetched: Option<Vec<u8>>,
    buffers: &[Vec<u8>],
) -> Result<(Vec<u8>, Option<String>)> {
    if let Some(bytes) = fetched {
        return Ok((bytes, image.mime_type.clone()));
    }
    if let Some(uri) = &image.uri {
        let data_uri = decode_data_uri(uri)?;
        let mime_type = image.mime_type.clone().or(data_uri.mime_type);
        return Ok((data_uri.data, mime_type));
    }
    let Some(view_index) = image.buffer_view else {
        return Err(LoadError::format(format!(
            "image {index} has neither uri nor bufferView"
        )));
    };
    let view = doc.buffer_view(view_index)?;
    let buffer = element(buffers, view.buffer, "buffer")?;
    let bytes = view
        .range()
        .and_then(|range| buffer.get(range))
        .ok_or_else(|| {
            LoadError::format(format!("bufferView {view_index} overruns buffer {}", view.buffer))
        })?;
    Ok((bytes.to_vec(), image.mime_type.clone()))
}
