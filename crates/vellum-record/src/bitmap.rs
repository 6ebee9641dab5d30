use std::io::Cursor;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use image::{ImageReader, RgbaImage};
use vellum_core::{Color, ImageData, RenderError, RenderResult};

/// Standard alphabet; trailing `=` padding is optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded RGBA8 bitmap.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbaImage,
}

impl DecodedImage {
    /// Decodes a base64 payload into pixels.
    ///
    /// Accepted input:
    /// - bare base64 text, with any embedded whitespace
    /// - a `data:<mime>;base64,<payload>` URI
    ///
    /// The format is sniffed from the decoded bytes, not from the MIME type.
    pub fn decode(payload: &str, max_pixels: u64) -> RenderResult<Self> {
        let encoded = strip_data_uri(payload.trim())?;
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        if compact.is_empty() {
            return Err(RenderError::decode("empty image payload"));
        }

        let bytes = PAYLOAD_ENGINE
            .decode(compact.as_bytes())
            .map_err(|e| RenderError::decode(format!("invalid base64: {e}")))?;

        let open = || {
            ImageReader::new(Cursor::new(bytes.as_slice()))
                .with_guessed_format()
                .map_err(|e| RenderError::decode(format!("unreadable image data: {e}")))
        };

        // Only the header is read here; pixels are decoded once the size is accepted.
        let header = open()?;
        if header.format().is_none() {
            return Err(RenderError::decode("unrecognized image format"));
        }
        let (width, height) = header
            .into_dimensions()
            .map_err(|e| RenderError::decode(format!("malformed image header: {e}")))?;
        if width == 0 || height == 0 {
            return Err(RenderError::decode("image has zero size"));
        }
        if u64::from(width) * u64::from(height) > max_pixels {
            return Err(RenderError::decode(format!(
                "{width}x{height} image exceeds the {max_pixels} pixel limit"
            )));
        }

        let decoded = open()?
            .decode()
            .map_err(|e| RenderError::decode(format!("unrecognized image data: {e}")))?;

        log::trace!("decoded {width}x{height} image ({} bytes)", bytes.len());
        Ok(Self { pixels: decoded.to_rgba8() })
    }

    /// Color of pixel `(x, y)`, `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Color::from_u8(r, g, b, a)
        })
    }

    #[inline]
    pub fn pixel_width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn pixel_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Decoded pixels, straight-alpha RGBA8.
    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl ImageData for DecodedImage {
    fn width(&self) -> f32 {
        self.pixels.width() as f32
    }

    fn height(&self) -> f32 {
        self.pixels.height() as f32
    }
}

fn strip_data_uri(payload: &str) -> RenderResult<&str> {
    let Some(rest) = payload.strip_prefix("data:") else {
        return Ok(payload);
    };
    match rest.split_once(',') {
        Some((header, data)) if header.ends_with(";base64") => Ok(data),
        Some(_) => Err(RenderError::decode("data URI is not base64 encoded")),
        None => Err(RenderError::decode("malformed data URI")),
    }
}
