//! Serialized canvas snapshots.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// PNG-encoded copy of the canvas's full pixel content at one point in time.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Vec<u8>,
    width: i32,
    height: i32,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("bytes", &self.png.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Snapshot {
    pub fn new(png: Vec<u8>, width: i32, height: i32) -> Self {
        Self { png, width, height }
    }

    /// Raw PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Formats the snapshot as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_carries_png_prefix() {
        let snapshot = Snapshot::new(vec![0x89, b'P', b'N', b'G'], 1, 1);
        assert_eq!(snapshot.to_data_url(), "data:image/png;base64,iVBORw==");
    }
}
