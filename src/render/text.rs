use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{LoomError, LoomResult};

/// One line of text placed on the card, in logical (CSS px) coordinates.
///
/// `y` is the alphabetic baseline, matching canvas `fillText`.
#[derive(Clone, Debug)]
pub(crate) struct TextLabel<'a> {
    pub(crate) text: &'a str,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) family: &'static str,
    pub(crate) size: f64,
    pub(crate) weight: u16,
    pub(crate) color: Rgba8,
}

/// Rasterizes card labels through an SVG text layer.
///
/// Fonts come from the system plus any extra directories. With an empty font database the
/// labels are skipped and the card renders without text.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl TextRasterizer {
    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file directly inside each of `font_dirs`.
    pub fn new<P: AsRef<Path>>(font_dirs: &[P]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.len(), "loaded fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// A rasterizer with no fonts at all. Cards render without labels.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `labels` into a premultiplied RGBA8 layer of `physical` size covering the
    /// `logical` coordinate space. Returns `None` when there is nothing to draw.
    pub(crate) fn rasterize(
        &self,
        labels: &[TextLabel<'_>],
        logical: (f64, f64),
        physical: (u32, u32),
    ) -> LoomResult<Option<Vec<u8>>> {
        if self.fontdb.is_empty() || labels.is_empty() {
            return Ok(None);
        }

        let svg = labels_to_svg(labels, logical, physical);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| LoomError::render(format!("parse text layer: {e}")))?;

        let (w, h) = physical;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| LoomError::render("failed to allocate text layer"))?;
        let sx = (w as f32) / tree.size().width();
        let sy = (h as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );
        Ok(Some(pixmap.data().to_vec()))
    }
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

fn labels_to_svg(labels: &[TextLabel<'_>], logical: (f64, f64), physical: (u32, u32)) -> String {
    let (lw, lh) = logical;
    let (pw, ph) = physical;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{pw}" height="{ph}" viewBox="0 0 {lw} {lh}">"#
    );
    for label in labels {
        let c = label.color;
        // Infallible for String.
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="rgb({},{},{})" fill-opacity="{:.3}">{}</text>"#,
            label.x,
            label.y,
            label.family,
            label.size,
            label.weight,
            c.r,
            c.g,
            c.b,
            f64::from(c.a) / 255.0,
            xml_escape(label.text),
        );
    }
    svg.push_str("</svg>");
    svg
}

pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

/// Generic families first, then any face at all, so a label is drawn whenever one font exists.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Monospace);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
