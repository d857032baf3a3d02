use ab_glyph::{Font, FontVec, Glyph, PxScale, ScaleFont, point};
use image::RgbaImage;

use crate::engine::{Alignment, Color, Rect};

pub(super) fn parse_font(bytes: Vec<u8>) -> anyhow::Result<FontVec> {
    FontVec::try_from_vec(bytes).map_err(|e| anyhow::anyhow!("decode font: {e}"))
}

/// Rasterise `text` into `frame`, one line per `\n`, placed inside `bounds`.
pub(super) fn draw_text(
    frame: &mut RgbaImage,
    font: &FontVec,
    size: u32,
    text: &str,
    color: Color,
    alignment: Alignment,
    bounds: Rect,
) {
    let scale = PxScale::from(size as f32);
    let scaled = font.as_scaled(scale);
    let line_height = scaled.height() + scaled.line_gap();

    for (row, line) in text.lines().enumerate() {
        // lay the line out from x = 0, then shift it into the box
        let mut caret = 0.0;
        let mut previous = None;
        let mut glyphs: Vec<Glyph> = Vec::new();
        for c in line.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let left = bounds.x as f32;
        let offset_x = match alignment {
            Alignment::Left => left,
            Alignment::Center => left + (bounds.width as f32 - caret) / 2.0,
            Alignment::Right => left + bounds.width as f32 - caret,
        };
        let offset_y = bounds.y as f32 + row as f32 * line_height;

        for mut glyph in glyphs {
            glyph.position.x += offset_x;
            glyph.position.y += offset_y;
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let px = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                blend(
                    frame,
                    px.min.x as i32 + gx as i32,
                    px.min.y as i32 + gy as i32,
                    color,
                    coverage,
                );
            });
        }
    }
}

fn blend(frame: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= frame.width() || y as u32 >= frame.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0;
    let pixel = frame.get_pixel_mut(x as u32, y as u32);
    for (channel, value) in [color.r, color.g, color.b].into_iter().enumerate() {
        let old = pixel.0[channel] as f32;
        pixel.0[channel] = (old * (1.0 - alpha) + value as f32 * alpha).round() as u8;
    }
    pixel.0[3] = pixel.0[3].max((alpha * 255.0).round() as u8);
}
