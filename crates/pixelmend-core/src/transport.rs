//! `data:` URL transport between the UI shell and the engine.
//!
//! Rasters cross the boundary as base64 data URLs: decoded images come in as
//! `data:<mime>;base64,<payload>`, results and masks go out as lossless PNG.
//! Bare base64 payloads without the `data:` prefix are accepted as well.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::decode::{decode_image, DecodeError, RasterImage};
use crate::encode::{encode_png, EncodeError};

/// MIME type assumed for bare base64 payloads.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A parsed base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parse `data:<mime>;base64,<payload>` or a bare base64 payload.
    ///
    /// The header ends at the first comma. Only base64 data URLs are
    /// accepted; percent-encoded ones are rejected.
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        let input = input.trim();

        let Some(rest) = input.strip_prefix("data:") else {
            let data = decode_base64(input)?;
            return Ok(Self::new(DEFAULT_MIME_TYPE, data));
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| DecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default();
        if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(DecodeError::InvalidDataUrl(
                "only base64 data URLs are supported".to_string(),
            ));
        }

        let mime_type = if mime_type.is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type
        };

        Ok(Self::new(mime_type, decode_base64(payload)?))
    }

    /// Base64 body without the header.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

impl FromStr for DataUrl {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

fn decode_base64(payload: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Decode a data URL (or bare base64) into a raster.
///
/// The image format is detected from the payload, not the MIME type.
pub fn decode_data_url(input: &str) -> Result<RasterImage, DecodeError> {
    let url = DataUrl::parse(input)?;
    log::debug!("decoding {} payload of {} bytes", url.mime_type, url.data.len());
    decode_image(&url.data)
}

/// Encode a raster as a `data:image/png;base64,...` URL.
pub fn encode_png_data_url(image: &RasterImage) -> Result<String, EncodeError> {
    let png = encode_png(image)?;
    Ok(DataUrl::new("image/png", png).to_string())
}
