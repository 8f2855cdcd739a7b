use crate::error::RenderError;
use std::io::Cursor;

/// A decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Decode any 8- or 16-bit PNG into RGBA8.
///
/// Palette, grayscale and RGB inputs are expanded; 16-bit samples are
/// reduced to their high byte; missing alpha becomes 255.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, String> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    buf.truncate(info.buffer_size());

    let data = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err("indexed PNG was not expanded".to_string());
        }
    };

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Encode RGBA8 samples as a PNG.
pub fn encode_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(RenderError::PngEncode(format!(
            "expected {expected} bytes of RGBA, got {}",
            rgba.len()
        )));
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress a PNG with oxipng, keeping the input if optimization fails.
pub fn optimize(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) if optimized.len() < png_bytes.len() => optimized,
        Ok(_) => png_bytes,
        Err(e) => {
            tracing::debug!(%e, "oxipng failed, keeping fast encoding");
            png_bytes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with(color: png::ColorType, width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf
    }

    #[test]
    fn test_rgba_survives_encode_decode() {
        let data: Vec<u8> = (0..2 * 3 * 4).map(|i| (i * 9) as u8).collect();
        let png = encode_rgba(2, 3, &data).unwrap();
        let image = decode_rgba(&png).unwrap();
        assert_eq!((image.width, image.height), (2, 3));
        assert_eq!(image.data, data);
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let png = encode_with(png::ColorType::Rgb, 1, 1, &[10, 20, 30]);
        assert_eq!(decode_rgba(&png).unwrap().data, vec![10, 20, 30, 255]);
    }

    #[test]
    fn test_grayscale_is_expanded() {
        let png = encode_with(png::ColorType::Grayscale, 2, 1, &[0, 200]);
        assert_eq!(
            decode_rgba(&png).unwrap().data,
            vec![0, 0, 0, 255, 200, 200, 200, 255]
        );
    }

    #[test]
    fn test_encode_rejects_wrong_length() {
        assert!(matches!(
            encode_rgba(2, 2, &[0; 4]),
            Err(RenderError::PngEncode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_rgba(b"not a png").is_err());
    }

    #[test]
    fn test_optimize_output_still_decodes() {
        let data = [0u8, 255, 156, 255].repeat(64 * 64);
        let png = encode_rgba(64, 64, &data).unwrap();
        let optimized = optimize(png);
        assert_eq!(decode_rgba(&optimized).unwrap().data, data);
    }
}
