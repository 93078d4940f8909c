use uuid::Uuid;

/// Decoded pixel data as produced by an [`ImageDecoder`](crate::assets::ImageDecoder).
#[derive(Debug, Clone)]
pub struct Image {
    pub uuid: Uuid,
    pub label: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows.
    pub data: Vec<u8>,
}

impl Image {
    #[must_use]
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            label: None,
            width,
            height,
            data,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }
}
