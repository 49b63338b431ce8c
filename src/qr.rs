//! QR code rendering for shareable casting-code links.
//!
//! Codes are shared out-of-band as `{base}/apply/{code}` links; this module
//! renders that link as an SVG QR image packaged as a data URL so clients
//! can drop it straight into an `img` tag or a printout.

use base64::{Engine as _, engine::general_purpose};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

/// Smallest accepted edge length in pixels.
pub const MIN_QR_SIZE: u32 = 64;
/// Largest accepted edge length in pixels.
pub const MAX_QR_SIZE: u32 = 1024;
/// Edge length used when the caller does not ask for one.
pub const DEFAULT_QR_SIZE: u32 = 256;

/// Errors from QR rendering.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("size must be between {MIN_QR_SIZE} and {MAX_QR_SIZE} pixels, got {0}")]
    SizeOutOfRange(u32),
    #[error("failed to encode QR data: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// Builds the canonical public application URL for a casting code.
pub fn apply_url(public_base_url: &str, code: &str) -> String {
    format!("{}/apply/{}", public_base_url.trim_end_matches('/'), code)
}

/// Renders the given URL as an SVG QR image and returns it as a
/// `data:image/svg+xml;base64,...` URL.
pub fn render_data_url(url: &str, size: u32) -> Result<String, QrError> {
    if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&size) {
        return Err(QrError::SizeOutOfRange(size));
    }

    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::M)?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .build();

    let encoded = general_purpose::STANDARD.encode(image.as_bytes());
    Ok(format!("data:image/svg+xml;base64,{}", encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_url_joins_base_and_code() {
        assert_eq!(
            apply_url("https://callboard.example", "AB12CD"),
            "https://callboard.example/apply/AB12CD"
        );
        // Trailing slash on the base does not produce a double slash.
        assert_eq!(
            apply_url("https://callboard.example/", "AB12CD"),
            "https://callboard.example/apply/AB12CD"
        );
    }

    #[test]
    fn test_render_data_url_produces_svg_payload() {
        let data_url = render_data_url("https://callboard.example/apply/AB12CD", 256).unwrap();
        assert!(data_url.starts_with("data:image/svg+xml;base64,"));

        let payload = data_url
            .strip_prefix("data:image/svg+xml;base64,")
            .unwrap();
        let decoded = general_purpose::STANDARD.decode(payload).unwrap();
        let svg = String::from_utf8(decoded).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_data_url_rejects_out_of_range_sizes() {
        assert!(matches!(
            render_data_url("https://callboard.example/apply/AB12CD", 16),
            Err(QrError::SizeOutOfRange(16))
        ));
        assert!(matches!(
            render_data_url("https://callboard.example/apply/AB12CD", 4096),
            Err(QrError::SizeOutOfRange(4096))
        ));
    }
}
