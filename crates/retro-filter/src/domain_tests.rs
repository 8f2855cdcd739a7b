//! Domain-critical regression tests for retro-filter.
//!
//! These tests target specific classes of bugs, not just happy paths. Each
//! test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::block::BLOCK_SIZE;
    use crate::buffer::PixelBuffer;
    use crate::color::Rgb;
    use crate::dither::{dither_with_kernel, ChannelArithmetic, DiffusionOptions};
    use crate::palette::{ACCENT, INK};
    use crate::pipeline::{apply, FilterMode};
    use crate::render::{GlyphPatch, TextRasterizer};
    use pretty_assertions::assert_eq;

    /// Deterministic camera-like test frame: diagonal gradient plus a
    /// scrambled low-order pattern.
    fn noisy_frame(width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let base = (x * 255 / width.max(1) + y * 255 / height.max(1)) / 2;
            let jitter = (x * 7919 + y * 104_729) % 41;
            let v = (base + jitter).min(255) as u8;
            [v, v.wrapping_add(13), v / 2, 255]
        })
    }

    /// Counts glyph requests and paints each cell with the requested color.
    #[derive(Default)]
    struct CountingRasterizer {
        glyphs: usize,
    }

    impl TextRasterizer for CountingRasterizer {
        fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch {
            self.glyphs += 1;
            let mut patch = GlyphPatch::blank(
                x as i32,
                baseline_y as i32 - BLOCK_SIZE as i32,
                BLOCK_SIZE,
                BLOCK_SIZE,
            );
            if glyph != ' ' {
                // Light up only the center pixel.
                let c = (4 * BLOCK_SIZE + 4) * 4;
                patch.pixels[c..c + 3].copy_from_slice(&color.to_array());
            }
            patch
        }
    }

    fn is_duotone(px: &[u8]) -> bool {
        px[..3] == INK.to_array() || px[..3] == ACCENT.to_array()
    }

    // ========================================================================
    // GAP 1: Dithering output never leaves the two-color palette
    // ========================================================================

    /// If this breaks, it means: the remap pass is skipped or reads a channel
    /// other than red, letting raw 0/255 gray or diffused error leak into the
    /// output.
    #[test]
    fn test_dither_output_is_strictly_duotone() {
        for mode in [FilterMode::Atkinson, FilterMode::FloydSteinberg] {
            for arithmetic in [ChannelArithmetic::Wrapping, ChannelArithmetic::Saturating] {
                let mut frame = noisy_frame(67, 41);
                let options = DiffusionOptions::new().arithmetic(arithmetic);
                apply(mode, &mut frame, &mut CountingRasterizer::default(), &options);
                let bad = frame.data().chunks_exact(4).filter(|px| !is_duotone(px)).count();
                assert_eq!(bad, 0, "{mode} / {arithmetic} produced non-palette pixels");
            }
        }
    }

    // ========================================================================
    // GAP 2: Brightness mapping stays inverted
    // ========================================================================

    /// If this breaks, it means: someone "fixed" the mapping so bright input
    /// renders as accent. The rendering depends on bright -> ink.
    #[test]
    fn test_bright_maps_to_ink_everywhere() {
        let mut raster = CountingRasterizer::default();
        for mode in [FilterMode::Atkinson, FilterMode::FloydSteinberg, FilterMode::Bitmap] {
            let mut frame = PixelBuffer::filled(16, 16, Rgb::new(250, 250, 250), 255);
            apply(mode, &mut frame, &mut raster, &DiffusionOptions::new());
            assert!(
                frame.data().chunks_exact(4).all(|px| px[..3] == INK.to_array()),
                "{mode}: bright frame should be all ink"
            );

            let mut frame = PixelBuffer::filled(16, 16, Rgb::new(10, 10, 10), 255);
            apply(mode, &mut frame, &mut raster, &DiffusionOptions::new());
            assert!(
                frame.data().chunks_exact(4).all(|px| px[..3] == ACCENT.to_array()),
                "{mode}: dark frame should be all accent"
            );
        }
    }

    // ========================================================================
    // GAP 3: Mid-gray dithers to a mix, roughly in proportion
    // ========================================================================

    /// If this breaks, it means: error is not being carried forward (every
    /// pixel of a flat mid-gray would quantize identically) or it is carried
    /// with the wrong sign.
    #[test]
    fn test_mid_gray_produces_mixed_pattern() {
        let size = 32;
        let total = size * size;
        let mut frame = PixelBuffer::filled(size, size, Rgb::new(100, 100, 100), 255);
        dither_with_kernel(
            &mut frame,
            &crate::dither::FLOYD_STEINBERG,
            &DiffusionOptions::new().arithmetic(ChannelArithmetic::Saturating),
        );
        let ink = frame
            .data()
            .chunks_exact(4)
            .filter(|px| px[..3] == INK.to_array())
            .count();
        let ratio = ink as f64 / total as f64;
        // 100 / 255 ~= 0.39 of the area should quantize to white (-> ink)
        assert!(
            (ratio - 0.39).abs() < 0.1,
            "REGRESSION: mid-gray produced {ratio:.3} ink ratio, expected ~0.39"
        );
    }

    // ========================================================================
    // GAP 4: Alpha is never modified by the pixel filters
    // ========================================================================

    /// If this breaks, it means: a filter is writing all four channels. The
    /// caller's alpha must survive every mode except ASCII, which forces an
    /// opaque frame.
    #[test]
    fn test_alpha_survives_non_ascii_modes() {
        for mode in [FilterMode::Atkinson, FilterMode::FloydSteinberg, FilterMode::Bitmap] {
            let mut frame = noisy_frame(24, 24);
            for px in frame.data_mut().chunks_exact_mut(4) {
                px[3] = 33;
            }
            apply(mode, &mut frame, &mut CountingRasterizer::default(), &DiffusionOptions::new());
            assert!(frame.data().chunks_exact(4).all(|px| px[3] == 33), "{mode}");
        }

        let mut frame = noisy_frame(24, 24);
        for px in frame.data_mut().chunks_exact_mut(4) {
            px[3] = 33;
        }
        apply(
            FilterMode::Ascii,
            &mut frame,
            &mut CountingRasterizer::default(),
            &DiffusionOptions::new(),
        );
        assert!(frame.data().chunks_exact(4).all(|px| px[3] == 255));
    }

    // ========================================================================
    // GAP 5: Block modes honor the skip rule on odd-sized frames
    // ========================================================================

    /// If this breaks, it means: the block loop pads or clamps partial
    /// blocks instead of skipping them.
    #[test]
    fn test_odd_frame_block_counts() {
        let mut raster = CountingRasterizer::default();
        let mut frame = noisy_frame(645, 487);
        apply(FilterMode::Ascii, &mut frame, &mut raster, &DiffusionOptions::new());
        assert_eq!(raster.glyphs, 80 * 60);

        let original = noisy_frame(645, 487);
        let mut frame = original.clone();
        apply(FilterMode::Bitmap, &mut frame, &mut raster, &DiffusionOptions::new());
        for y in 0..487 {
            for x in 640..645 {
                assert_eq!(frame.pixel(x, y), original.pixel(x, y));
            }
        }
        for x in 0..645 {
            for y in 480..487 {
                assert_eq!(frame.pixel(x, y), original.pixel(x, y));
            }
        }
    }

    // ========================================================================
    // GAP 6: Frames are independent
    // ========================================================================

    /// If this breaks, it means: the pipeline is carrying state (error
    /// buffers, previous output) from one frame into the next.
    #[test]
    fn test_same_input_same_output() {
        for mode in FilterMode::ALL {
            let mut raster = CountingRasterizer::default();
            let mut first = noisy_frame(40, 24);
            let mut second = noisy_frame(40, 24);
            apply(mode, &mut first, &mut raster, &DiffusionOptions::new());
            apply(mode, &mut second, &mut raster, &DiffusionOptions::new());
            assert_eq!(first, second, "{mode} is not a pure function of its input");
        }
    }
}
