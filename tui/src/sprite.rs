//! Sprite Rendering
//!
//! Creature artwork arrives as decoded RGBA pixels; the terminal shows it
//! as `▀` half-block cells, one character per two vertical pixels, with the
//! top pixel as the foreground color and the bottom pixel as the
//! background. Transparent pixels are left blank so the creature keeps its
//! silhouette on any terminal background.

use guessdex_core::SpriteImage;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Alpha threshold below which a pixel reads as transparent.
const ALPHA_CUTOFF: u8 = 128;

/// Render a sprite into styled lines fitting a `max_width` x `max_height`
/// cell area.
///
/// Nearest-neighbor sampling, never upscaled. Cell space keeps the pixel
/// aspect ratio: a cell is one pixel wide and two pixels tall. Degenerate
/// sprites or areas yield no lines.
#[must_use]
pub fn sprite_lines(sprite: &SpriteImage, max_width: u16, max_height: u16) -> Vec<Line<'static>> {
    if sprite.width == 0 || sprite.height == 0 || max_width == 0 || max_height == 0 {
        return Vec::new();
    }
    let (cols, rows) = fit(sprite.width, sprite.height, max_width, max_height);

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..cols {
            let sx = col * sprite.width / cols;
            let top_y = (row * 2) * sprite.height / (rows * 2);
            let bottom_y = (row * 2 + 1) * sprite.height / (rows * 2);
            spans.push(half_block(sprite.pixel(sx, top_y), sprite.pixel(sx, bottom_y)));
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Scale a pixel grid into cell space, preserving aspect ratio.
fn fit(px_width: u32, px_height: u32, max_cols: u16, max_rows: u16) -> (u32, u32) {
    let natural_cols = px_width as f32;
    let natural_rows = px_height as f32 / 2.0;
    let scale = (f32::from(max_cols) / natural_cols)
        .min(f32::from(max_rows) / natural_rows)
        .min(1.0);
    let cols = (natural_cols * scale).floor().max(1.0) as u32;
    let rows = (natural_rows * scale).ceil().max(1.0) as u32;
    (cols, rows)
}

fn half_block(top: [u8; 4], bottom: [u8; 4]) -> Span<'static> {
    let top_visible = top[3] >= ALPHA_CUTOFF;
    let bottom_visible = bottom[3] >= ALPHA_CUTOFF;
    match (top_visible, bottom_visible) {
        (false, false) => Span::raw(" "),
        (true, false) => Span::styled("▀", Style::default().fg(rgb(top))),
        (false, true) => Span::styled("▄", Style::default().fg(rgb(bottom))),
        (true, true) => Span::styled("▀", Style::default().fg(rgb(top)).bg(rgb(bottom))),
    }
}

fn rgb(px: [u8; 4]) -> Color {
    Color::Rgb(px[0], px[1], px[2])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Build a sprite from a grid of (r, g, b, a) pixels.
    fn sprite(width: u32, height: u32, pixels: &[[u8; 4]]) -> SpriteImage {
        assert_eq!(pixels.len() as u32, width * height);
        SpriteImage {
            width,
            height,
            rgba: pixels.iter().flatten().copied().collect(),
        }
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    #[test]
    fn test_two_pixels_share_one_cell() {
        let sprite = sprite(1, 2, &[RED, BLUE]);
        let lines = sprite_lines(&sprite, 10, 10);

        assert_eq!(lines.len(), 1);
        let span = &lines[0].spans[0];
        assert_eq!(span.content.as_ref(), "▀");
        assert_eq!(span.style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(span.style.bg, Some(Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_transparent_pixels_stay_blank() {
        let sprite = sprite(2, 2, &[CLEAR, RED, CLEAR, CLEAR]);
        let lines = sprite_lines(&sprite, 10, 10);

        assert_eq!(lines[0].spans[0].content.as_ref(), " ");
        // Top visible, bottom transparent: upper half block.
        assert_eq!(lines[0].spans[1].content.as_ref(), "▀");
        assert_eq!(lines[0].spans[1].style.bg, None);
    }

    #[test]
    fn test_lower_half_block_for_bottom_only_pixel() {
        let sprite = sprite(1, 2, &[CLEAR, BLUE]);
        let lines = sprite_lines(&sprite, 10, 10);
        assert_eq!(lines[0].spans[0].content.as_ref(), "▄");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_never_upscales() {
        let sprite = sprite(1, 2, &[RED, RED]);
        let lines = sprite_lines(&sprite, 40, 40);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 1);
    }

    #[test]
    fn test_downscales_to_fit_area() {
        let pixels: Vec<[u8; 4]> = std::iter::repeat(RED).take(96 * 96).collect();
        let sprite = sprite(96, 96, &pixels);
        let lines = sprite_lines(&sprite, 24, 12);

        assert!(lines.len() <= 12);
        assert!(lines.iter().all(|l| l.spans.len() <= 24));
    }

    #[test]
    fn test_degenerate_inputs_render_nothing() {
        let sprite = sprite(1, 2, &[RED, RED]);
        assert!(sprite_lines(&sprite, 0, 10).is_empty());
        assert!(sprite_lines(&sprite, 10, 0).is_empty());

        let empty = SpriteImage {
            width: 0,
            height: 0,
            rgba: Vec::new(),
        };
        assert!(sprite_lines(&empty, 10, 10).is_empty());
    }
}
