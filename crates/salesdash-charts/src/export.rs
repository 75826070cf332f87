//! In-memory PNG export

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use salesdash_common::{ChartKind, DashError, Result};

/// One rendered chart, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl RenderedChart {
    /// Download file name
    pub const fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Encoded PNG bytes
    pub fn bytes(&self) -> &[u8] {
        &self.png
    }
}

/// Encode a packed RGB buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let expected = u64::from(width) * u64::from(height) * 3;
    if rgb.len() as u64 != expected {
        return Err(DashError::chart(format!(
            "RGB buffer holds {} bytes, {width}x{height} needs {expected}",
            rgb.len()
        )));
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| DashError::chart_with_source("PNG encoding failed", e))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let rgb = vec![255u8; 4 * 3 * 3];
        let png = encode_png(&rgb, 4, 3).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn test_short_buffer_is_chart_error() {
        let err = encode_png(&[0u8; 5], 4, 3).unwrap_err();
        assert!(matches!(err, DashError::Chart { .. }));
    }
}
