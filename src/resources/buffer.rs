use std::sync::atomic::{AtomicU64, Ordering};

// Global buffer id generator
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

/// What a buffer is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertex,
    Index,
}

/// CPU-side copy of one uploaded buffer view.
///
/// The renderer owns the actual GPU allocation; this descriptor is what gets
/// shared (through `Arc`) by every attribute or index binding that reads the
/// same glTF buffer view.
#[derive(Debug)]
pub struct GpuBuffer {
    pub id: u64,
    pub label: String,
    pub kind: BufferKind,
    data: Vec<u8>,
}

impl GpuBuffer {
    /// Allocates a buffer and stores `data` into it.
    #[must_use]
    pub fn from_bytes(kind: BufferKind, data: &[u8], label: Option<&str>) -> Self {
        Self {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            label: label.unwrap_or("Buffer").to_string(),
            kind,
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

impl PartialEq for GpuBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GpuBuffer {}
