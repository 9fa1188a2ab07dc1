use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::core::{DayKey, Rgba8};
use crate::foundation::error::{LoomError, LoomResult};
use crate::foundation::math::composite_over_premul;
use crate::render::frame::FrameRGBA;
use crate::render::text::{TextLabel, TextRasterizer};
use crate::weave::pattern::{WEAVE_HEIGHT, WEAVE_WIDTH, WeavePattern};

/// Widest card, in CSS px.
pub const CARD_MAX_WIDTH: f64 = 640.0;
/// Card height, in CSS px.
pub const CARD_HEIGHT: f64 = 240.0;
const CONTAINER_GUTTER: f64 = 24.0;

const CARD_RADIUS: f64 = 22.0;
const BAR_INSET: f64 = 14.0;
const BAR_HEIGHT: f64 = 44.0;
const BAR_RADIUS: f64 = 16.0;
const RULE_Y: f64 = 52.0;
const RULE_HEIGHT: f64 = 4.0;
const GRID_PAD: f64 = 18.0;
const GRID_TOP: f64 = 74.0;
const HIGHLIGHT_INSET: f64 = 0.12;
const BORDER_INSET: f64 = 10.0;
const BORDER_WIDTH: f64 = 2.0;

const TEAL: Rgba8 = Rgba8::rgb(0x2d, 0xd4, 0xbf);
const COPPER: Rgba8 = Rgba8::rgb(0xc7, 0x78, 0x44);

/// Surface options: the container the card sits in and the display density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardOpts {
    /// Width of the hosting container in CSS px. The card is this minus a 24 px gutter,
    /// capped at [`CARD_MAX_WIDTH`].
    pub container_width: f64,
    /// Physical pixels per CSS px.
    pub device_pixel_ratio: f64,
}

impl Default for CardOpts {
    fn default() -> Self {
        Self {
            container_width: CARD_MAX_WIDTH + CONTAINER_GUTTER,
            device_pixel_ratio: 1.0,
        }
    }
}

impl CardOpts {
    /// Card size in CSS px.
    pub fn logical_size(&self) -> (f64, f64) {
        let w = (self.container_width - CONTAINER_GUTTER).min(CARD_MAX_WIDTH);
        (w, CARD_HEIGHT)
    }

    /// Card size in device pixels, `floor(logical * dpr)`.
    pub fn physical_size(&self) -> LoomResult<(u16, u16)> {
        let dpr = self.device_pixel_ratio;
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(LoomError::render(format!(
                "device pixel ratio must be positive, got {dpr}"
            )));
        }
        let (lw, lh) = self.logical_size();
        let to_px = |v: f64, what: &str| -> LoomResult<u16> {
            let px = (v * dpr).floor();
            if !px.is_finite() || px < 1.0 || px > f64::from(u16::MAX) {
                return Err(LoomError::render(format!(
                    "card {what} of {px} px is out of range"
                )));
            }
            Ok(px as u16)
        };
        Ok((to_px(lw, "width")?, to_px(lh, "height")?))
    }
}

/// Paint the card for `pattern` on `day`.
///
/// Pure function of its inputs; the same pattern, day, and options always yield the same pixels.
#[tracing::instrument(skip(pattern, text), fields(seed = pattern.seed()))]
pub fn render_card(
    pattern: &WeavePattern,
    day: DayKey,
    opts: &CardOpts,
    text: &TextRasterizer,
) -> LoomResult<FrameRGBA> {
    let (pw, ph) = opts.physical_size()?;
    let (lw, lh) = opts.logical_size();
    let dpr = opts.device_pixel_ratio;

    let mut ctx = vello_cpu::RenderContext::new(pw, ph);
    ctx.set_transform(vello_cpu::kurbo::Affine::scale(dpr));

    // Card body: diagonal gradient rasterized at device resolution, mapped back to CSS px.
    let card = kurbo::RoundedRect::new(0.0, 0.0, lw, lh, CARD_RADIUS);
    ctx.set_paint(gradient_paint(pw, ph, dpr)?);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::scale(1.0 / dpr));
    ctx.fill_path(&shape_to_cpu(&card));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    set_color(&mut ctx, Rgba8::rgba(250, 245, 255, 0.10));
    let bar = kurbo::RoundedRect::new(
        BAR_INSET,
        BAR_INSET,
        lw - BAR_INSET,
        BAR_INSET + BAR_HEIGHT,
        BAR_RADIUS,
    );
    ctx.fill_path(&shape_to_cpu(&bar));
    set_color(&mut ctx, COPPER);
    ctx.fill_rect(&cpu_rect(
        BAR_INSET,
        RULE_Y,
        lw - BAR_INSET * 2.0,
        RULE_HEIGHT,
    ));

    let grid_w = lw - GRID_PAD * 2.0;
    let grid_h = lh - GRID_TOP - GRID_PAD;
    let cell_w = grid_w / WEAVE_WIDTH as f64;
    let cell_h = grid_h / WEAVE_HEIGHT as f64;
    let off = Rgba8::rgba(250, 245, 255, 0.10);
    let highlight = Rgba8::rgba(250, 245, 255, 0.14);

    for (y, row) in pattern.rows().iter().enumerate() {
        for (x, &on) in row.iter().enumerate() {
            let x0 = GRID_PAD + x as f64 * cell_w;
            let y0 = GRID_TOP + y as f64 * cell_h;
            set_color(&mut ctx, if on { TEAL } else { off });
            ctx.fill_rect(&cpu_rect(x0, y0, cell_w, cell_h));

            if on && (x + y) % 7 == 0 {
                set_color(&mut ctx, highlight);
                ctx.fill_rect(&cpu_rect(
                    x0 + cell_w * HIGHLIGHT_INSET,
                    y0 + cell_h * HIGHLIGHT_INSET,
                    cell_w * (1.0 - 2.0 * HIGHLIGHT_INSET),
                    cell_h * (1.0 - 2.0 * HIGHLIGHT_INSET),
                ));
            }
        }
    }

    set_color(&mut ctx, Rgba8::rgba(199, 120, 68, 0.35));
    ctx.fill_rect(&cpu_rect(
        GRID_PAD,
        GRID_TOP + pattern.stripe_row() as f64 * cell_h,
        grid_w,
        cell_h,
    ));

    let border = kurbo::RoundedRect::new(
        BORDER_INSET,
        BORDER_INSET,
        lw - BORDER_INSET,
        lh - BORDER_INSET,
        CARD_RADIUS,
    );
    let outline = kurbo::stroke(
        border.path_elements(0.1),
        &kurbo::Stroke::new(BORDER_WIDTH),
        &kurbo::StrokeOpts::default(),
        0.1,
    );
    set_color(&mut ctx, Rgba8::rgba(250, 245, 255, 0.16));
    ctx.fill_path(&bezpath_to_cpu(&outline));

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(pw, ph);
    ctx.render_to_pixmap(&mut pixmap);
    let mut data = pixmap.data_as_u8_slice().to_vec();

    let title = format!("LOOM • {day}");
    let signature = format!("SIG {}", pattern.signature());
    let labels = [
        TextLabel {
            text: &title,
            x: 26.0,
            y: 42.0,
            family: "sans-serif",
            size: 14.0,
            weight: 900,
            color: Rgba8::rgba(250, 245, 255, 0.92),
        },
        TextLabel {
            text: &signature,
            x: 26.0,
            y: lh - 20.0,
            family: "monospace",
            size: 12.0,
            weight: 400,
            color: Rgba8::rgba(250, 245, 255, 0.70),
        },
    ];
    match text.rasterize(&labels, (lw, lh), (u32::from(pw), u32::from(ph)))? {
        Some(layer) => composite_over_premul(&mut data, &layer),
        None => tracing::debug!("no fonts available, card labels omitted"),
    }

    Ok(FrameRGBA {
        width: u32::from(pw),
        height: u32::from(ph),
        data,
        premultiplied: true,
    })
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn cpu_rect(x: f64, y: f64, w: f64, h: f64) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(x, y, x + w, y + h)
}

/// Linear gradient from the top-left corner to the bottom-right corner of the card, as an image
/// paint of `w` x `h` device pixels.
fn gradient_paint(w: u16, h: u16, dpr: f64) -> LoomResult<vello_cpu::Image> {
    let from = Rgba8::rgba(250, 245, 255, 0.06);
    let to = Rgba8::rgba(0, 0, 0, 0.18);

    let (lw, lh) = (f64::from(w) / dpr, f64::from(h) / dpr);
    let len_sq = (lw * lw + lh * lh).max(f64::EPSILON);
    let lerp = |a: u8, b: u8, t: f64| -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
    };

    let mut bytes = Vec::with_capacity(usize::from(w) * usize::from(h) * 4);
    for py in 0..h {
        for px in 0..w {
            let x = (f64::from(px) + 0.5) / dpr;
            let y = (f64::from(py) + 0.5) / dpr;
            let t = ((x * lw + y * lh) / len_sq).clamp(0.0, 1.0);
            let c = Rgba8 {
                r: lerp(from.r, to.r, t),
                g: lerp(from.g, to.g, t),
                b: lerp(from.b, to.b, t),
                a: lerp(from.a, to.a, t),
            };
            bytes.extend_from_slice(&c.premul());
        }
    }

    let pixmap = premul_bytes_to_pixmap(&bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(rgba8_premul: &[u8], w: u16, h: u16) -> LoomResult<vello_cpu::Pixmap> {
    if rgba8_premul.len() != usize::from(w) * usize::from(h) * 4 {
        return Err(LoomError::render("gradient byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(usize::from(w) * usize::from(h));
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    bezpath_to_cpu(&shape.to_path(0.1))
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/card.rs"]
mod tests;
