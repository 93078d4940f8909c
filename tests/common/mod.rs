//! Shared fixtures: an in-memory reader, a stub image decoder and builders
//! for small glTF / GLB assets.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use myth_loader::errors::{LoadError, Result};
use myth_loader::resources::Image;
use myth_loader::{AssetReader, GltfLoader, ImageDecoder, LoadOptions, LoadResult, Scene};
use serde_json::{Value, json};

// ============================================================================
// Collaborators
// ============================================================================

#[derive(Default)]
pub struct MemoryReader {
    files: HashMap<String, Vec<u8>>,
    reads: Mutex<Vec<String>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, uri: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(uri.to_string(), bytes);
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl AssetReader for MemoryReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        self.reads.lock().unwrap().push(uri.to_string());
        self.files
            .get(uri)
            .cloned()
            .ok_or_else(|| LoadError::transport(uri, "not found"))
    }
}

/// Returns a 1x1 white pixel for any input.
#[derive(Default)]
pub struct StubDecoder {
    pub calls: AtomicUsize,
}

impl ImageDecoder for StubDecoder {
    async fn decode(&self, _bytes: Vec<u8>, _mime_type: Option<String>) -> Result<Image> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Image::new(1, 1, vec![255; 4]))
    }
}

pub struct FailingDecoder;

impl ImageDecoder for FailingDecoder {
    async fn decode(&self, _bytes: Vec<u8>, _mime_type: Option<String>) -> Result<Image> {
        Err(LoadError::transport("<image>", "corrupt image"))
    }
}

// ============================================================================
// Asset builders
// ============================================================================

/// One triangle: three f32 positions followed by three u16 indices, padded
/// to a multiple of four bytes.
pub fn triangle_bin() -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let indices: [u16; 3] = [0, 1, 2];
    let mut bin = bytemuck::cast_slice::<f32, u8>(&positions).to_vec();
    bin.extend_from_slice(bytemuck::cast_slice::<u16, u8>(&indices));
    bin.resize(44, 0);
    bin
}

pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", STANDARD.encode(bytes))
}

/// A solid-red PNG of the given size as a `data:` URI.
pub fn png_data_uri(width: u32, height: u32) -> String {
    let mut bytes = std::io::Cursor::new(Vec::new());
    image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]))
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

/// Two nodes (root with one child) sharing a single triangle mesh.
pub fn triangle_doc(buffer: Value) -> Value {
    json!({
        "asset": { "version": "2.0", "generator": "fixture" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [
            { "name": "root", "mesh": 0, "children": [1] },
            { "name": "child", "mesh": 0, "translation": [1.0, 2.0, 3.0] }
        ],
        "meshes": [{
            "name": "triangle",
            "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }]
        }],
        "accessors": [
            {
                "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
        ],
        "buffers": [buffer]
    })
}

/// Wraps a JSON document and optional BIN payload into a GLB container.
pub fn glb(json: &Value, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json_bytes = serde_json::to_vec(json).unwrap();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let bin_bytes = bin.map(|b| {
        let mut b = b.to_vec();
        while b.len() % 4 != 0 {
            b.push(0);
        }
        b
    });

    let total = 12 + 8 + json_bytes.len() + bin_bytes.as_ref().map_or(0, |b| 8 + b.len());
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&0x4654_6C67_u32.to_le_bytes());
    out.extend_from_slice(&2_u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x4E4F_534A_u32.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    if let Some(b) = bin_bytes {
        out.extend_from_slice(&(b.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x004E_4942_u32.to_le_bytes());
        out.extend_from_slice(&b);
    }
    out
}

// ============================================================================
// Load helpers
// ============================================================================

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_with(
    reader: MemoryReader,
    uri: &str,
    options: LoadOptions,
) -> (Result<LoadResult>, Scene) {
    init_logger();
    let loader = GltfLoader::new(reader, StubDecoder::default()).with_options(options);
    let mut scene = Scene::new();
    let result = pollster::block_on(loader.load(uri, &mut scene));
    (result, scene)
}

/// Loads a JSON document served as `scene.gltf`.
pub fn load_json(doc: &Value) -> (Result<LoadResult>, Scene) {
    let reader = MemoryReader::new().with_file("scene.gltf", serde_json::to_vec(doc).unwrap());
    load_with(reader, "scene.gltf", LoadOptions::default())
}

/// Minimal valid document with the given extra top-level members.
pub fn doc_with(extra: Value) -> Value {
    let mut doc = json!({ "asset": { "version": "2.0" } });
    if let (Some(target), Some(extra)) = (doc.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    doc
}
