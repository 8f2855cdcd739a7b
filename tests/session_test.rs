//! End-to-end runs of the capture loop over PNG sequences on disk.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use retro_filter::{FilterMode, FilterPipeline, PixelBuffer};
use retrocam::error::{CaptureError, SessionError};
use retrocam::models::{AppConfig, FrameSpec};
use retrocam::rendering::SvgGlyphRasterizer;
use retrocam::services::{
    CaptureSource, FrameWriter, KeyScript, PngSequenceSource, ScreenshotWriter, Session,
    TestPatternSource,
};

#[test]
fn test_sequence_to_display_frames() {
    let (w, h) = sizes::EVEN;
    let frames = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let shots = tempfile::tempdir().unwrap();
    write_sequence(frames.path(), 3, w, h);

    let source = PngSequenceSource::open(frames.path(), FrameSpec::new(w, h).unwrap()).unwrap();
    let keys: KeyScript = "1:s,2:f".parse().unwrap();
    let mut session = Session::new(
        FilterPipeline::new(SolidGlyphs),
        source,
        ScreenshotWriter::new(shots.path(), false),
    )
    .with_display(FrameWriter::create(out.path()).unwrap())
    .with_keys(keys);

    let report = session.run().unwrap();
    assert_eq!(report.frames, 3);
    assert_eq!(report.final_mode, FilterMode::FloydSteinberg);
    assert!(!report.quit);

    for i in 0..3 {
        let data = assert_png_file(&out.path().join(format!("frame-{i:05}.png")), w, h);
        let frame = PixelBuffer::from_raw(w as usize, h as usize, data).unwrap();
        assert_duotone(&frame);
    }

    // The screenshot on tick 1 is the same image the display got.
    assert_eq!(report.screenshots.len(), 1);
    let shot = assert_png_file(&report.screenshots[0], w, h);
    let displayed = assert_png_file(&out.path().join("frame-00001.png"), w, h);
    assert_eq!(shot, displayed);
    let name = report.screenshots[0]
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap()
        .to_string();
    assert!(name.starts_with("retrocam-") && name.ends_with("Z.png"), "{name}");
    assert!(!name.contains(':'));
}

#[test]
fn test_mismatched_frame_stops_session() {
    let frames = tempfile::tempdir().unwrap();
    let shots = tempfile::tempdir().unwrap();
    write_sequence(frames.path(), 1, 16, 16);

    let source = PngSequenceSource::open(frames.path(), FrameSpec::new(32, 24).unwrap()).unwrap();
    let mut session = Session::new(
        FilterPipeline::new(SolidGlyphs),
        source,
        ScreenshotWriter::new(shots.path(), false),
    );

    let err = session.run().unwrap_err();
    assert!(
        matches!(
            err,
            SessionError::Capture(CaptureError::DimensionMismatch {
                width: 32,
                height: 24,
                actual_width: 16,
                actual_height: 16,
                ..
            })
        ),
        "got {err:?}"
    );
}

#[test]
fn test_quit_before_first_frame() {
    let shots = tempfile::tempdir().unwrap();
    let source = TestPatternSource::new(FrameSpec::new(16, 16).unwrap(), 5, 0);
    let mut session = Session::new(
        FilterPipeline::new(SolidGlyphs),
        source,
        ScreenshotWriter::new(shots.path(), false),
    )
    .with_keys("0:ctrl+q".parse().unwrap());

    let report = session.run().unwrap();
    assert_eq!(report.frames, 0);
    assert!(report.quit);
}

#[test]
fn test_ascii_session_without_fonts_is_black() {
    let (w, h) = sizes::EVEN;
    let out = tempfile::tempdir().unwrap();
    let shots = tempfile::tempdir().unwrap();
    let raster = SvgGlyphRasterizer::with_database(fontdb::Database::new(), "monospace", 8.0);
    let source: Box<dyn CaptureSource> =
        Box::new(TestPatternSource::new(FrameSpec::new(w, h).unwrap(), 2, 9));

    let mut session = Session::new(
        FilterPipeline::new(raster).with_mode(FilterMode::Ascii),
        source,
        ScreenshotWriter::new(shots.path(), false),
    )
    .with_display(FrameWriter::create(out.path()).unwrap());

    let report = session.run().unwrap();
    assert_eq!(report.frames, 2);
    assert!(session.pipeline().rasterizer().cached_glyphs() > 0);

    let data = assert_png_file(&out.path().join("frame-00001.png"), w, h);
    assert!(data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn test_config_drives_pipeline_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("retrocam.yaml");
    std::fs::write(
        &path,
        "width: 32\nheight: 24\nmode: bitmap\nchannel_arithmetic: saturating\n",
    )
    .unwrap();

    let config = AppConfig::load(Some(&path));
    let size = config.frame_spec().unwrap();
    let pipeline = FilterPipeline::new(SolidGlyphs)
        .with_mode(config.filter_mode().unwrap())
        .with_options(config.diffusion_options().unwrap());

    assert_eq!(size.block_grid(), (4, 3));
    assert_eq!(pipeline.mode(), FilterMode::Bitmap);
    assert_eq!(
        pipeline.options().arithmetic,
        retro_filter::ChannelArithmetic::Saturating
    );
}
