use crate::error::RenderError;
use crate::models::AsciiConfig;
use resvg::usvg::{self, Transform};
use retro_filter::{GlyphPatch, Rgb, TextRasterizer, BLOCK_SIZE};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Draws ASCII-mode glyphs by rendering a one-character SVG `<text>`
/// element with resvg.
///
/// Each glyph is rendered once per color into a block-sized cell (black
/// field, baseline on the bottom edge) and then reused at every position.
pub struct SvgGlyphRasterizer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
    font_family: String,
    font_size: f32,
    cache: HashMap<(char, Rgb), Vec<u8>>,
}

impl SvgGlyphRasterizer {
    /// Create a rasterizer from an already populated font database
    pub fn with_database(mut fontdb: fontdb::Database, font_family: &str, font_size: f32) -> Self {
        // Generic "monospace" only resolves if fontdb knows which family it
        // stands for; point it at the first monospaced face we have.
        let mono = fontdb
            .faces()
            .find(|f| f.monospaced)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()));
        if let Some(name) = mono {
            tracing::debug!(family = %name, "Using monospace family");
            fontdb.set_monospace_family(name);
        }

        if fontdb.is_empty() {
            tracing::warn!("No fonts available, ASCII glyphs will render blank");
        } else {
            tracing::info!(
                font_count = fontdb.len(),
                family = font_family,
                size = font_size,
                "Loaded fonts for ASCII glyphs"
            );
        }

        Self {
            fontdb: Arc::new(fontdb),
            font_family: font_family.to_string(),
            font_size,
            cache: HashMap::new(),
        }
    }

    /// Create a rasterizer with fonts from `fonts_dir` plus system fonts
    pub fn with_fonts(fonts_dir: Option<&Path>, font_family: &str, font_size: f32) -> Self {
        let mut fontdb = fontdb::Database::new();
        if let Some(dir) = fonts_dir {
            fontdb.load_fonts_dir(dir);
            tracing::debug!(dir = %dir.display(), faces = fontdb.len(), "Loaded font directory");
        }
        // Load system fonts as fallback
        fontdb.load_system_fonts();
        Self::with_database(fontdb, font_family, font_size)
    }

    /// Create a rasterizer from the `ascii` config section
    pub fn from_config(config: &AsciiConfig) -> Self {
        Self::with_fonts(
            config.fonts_dir.as_deref(),
            &config.font_family,
            config.font_size,
        )
    }

    /// Number of distinct (glyph, color) cells rendered so far
    pub fn cached_glyphs(&self) -> usize {
        self.cache.len()
    }

    /// SVG document for one glyph cell
    fn cell_svg(&self, glyph: char, color: Rgb) -> String {
        let size = BLOCK_SIZE;
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}"><rect width="{size}" height="{size}" fill="#000000"/><text x="0" y="{size}" font-family="{family}" font-size="{font_size}" fill="{fill}" xml:space="preserve">{text}</text></svg>"##,
            family = escape_xml(&self.font_family),
            font_size = self.font_size,
            fill = color.to_hex(),
            text = escape_xml(&glyph.to_string()),
        )
    }

    /// Rasterize one glyph cell to RGBA
    fn render_cell(&self, glyph: char, color: Rgb) -> Result<Vec<u8>, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let svg = self.cell_svg(glyph, color);
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut pixmap = Pixmap::new(BLOCK_SIZE as u32, BLOCK_SIZE as u32)
            .ok_or(RenderError::PixmapAllocation)?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        // The black backing rect makes every pixel opaque, so premultiplied
        // and straight RGBA are the same here.
        Ok(pixmap.data().to_vec())
    }
}

impl TextRasterizer for SvgGlyphRasterizer {
    fn draw_glyph(&mut self, glyph: char, x: usize, baseline_y: usize, color: Rgb) -> GlyphPatch {
        let origin_x = x as i32;
        let origin_y = baseline_y as i32 - BLOCK_SIZE as i32;

        if !self.cache.contains_key(&(glyph, color)) {
            let cell = self.render_cell(glyph, color).unwrap_or_else(|e| {
                tracing::warn!(%e, glyph = %glyph, "Glyph render failed, drawing blank cell");
                GlyphPatch::blank(0, 0, BLOCK_SIZE, BLOCK_SIZE).pixels
            });
            self.cache.insert((glyph, color), cell);
        }

        let pixels = self
            .cache
            .get(&(glyph, color))
            .cloned()
            .unwrap_or_else(|| GlyphPatch::blank(0, 0, BLOCK_SIZE, BLOCK_SIZE).pixels);

        GlyphPatch {
            x: origin_x,
            y: origin_y,
            width: BLOCK_SIZE,
            height: BLOCK_SIZE,
            pixels,
        }
    }
}

/// Escape text for use in SVG content and attribute values
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
