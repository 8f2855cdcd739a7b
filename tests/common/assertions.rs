//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use retro_filter::{PixelBuffer, ACCENT, INK};
use retrocam::rendering::png_codec;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert every pixel's RGB is INK or ACCENT
pub fn assert_duotone(frame: &PixelBuffer) {
    for (i, px) in frame.data().chunks_exact(4).enumerate() {
        let rgb = [px[0], px[1], px[2]];
        assert!(
            rgb == INK.to_array() || rgb == ACCENT.to_array(),
            "pixel {} ({}, {}) is {:?}, not duotone",
            i,
            i % frame.width(),
            i / frame.width(),
            rgb
        );
    }
}

/// Assert every pixel's alpha equals `alpha`
pub fn assert_alpha(frame: &PixelBuffer, alpha: u8) {
    let wrong = frame
        .data()
        .chunks_exact(4)
        .filter(|px| px[3] != alpha)
        .count();
    assert_eq!(wrong, 0, "{wrong} pixels have alpha != {alpha}");
}

/// Assert `path` holds a PNG of the given size and return its RGBA data
pub fn assert_png_file(path: &Path, width: u32, height: u32) -> Vec<u8> {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let image = png_codec::decode_rgba(&bytes).expect("decodable PNG");
    assert_eq!((image.width, image.height), (width, height));
    image.data
}
