use std::path::Path;

use anyhow::Result;

/// Read/write access to the caption embedded in a single image file.
pub trait CaptionStore {
    /// Returns an empty string when the file carries no caption.
    fn read_caption(&self, path: &Path) -> Result<String>;

    /// Replaces the caption, rewriting the file.
    fn write_caption(&self, path: &Path, caption: &str) -> Result<()>;
}

/// The shapes a raw caption value can arrive in from a metadata reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptionValue {
    Text(String),
    TextList(Vec<String>),
    Bytes(Vec<u8>),
    BytesList(Vec<Vec<u8>>),
    Other,
}

impl CaptionValue {
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::TextList(list) => list.into_iter().next().unwrap_or_default(),
            Self::Bytes(bytes) => bytes_to_text(&bytes),
            Self::BytesList(list) => list
                .into_iter()
                .next()
                .map(|bytes| bytes_to_text(&bytes))
                .unwrap_or_default(),
            Self::Other => String::new(),
        }
    }
}

fn bytes_to_text(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |last| last + 1);

    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
