//! `#inicio`: full-viewport banner.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::core::content::{HERO_HEADLINE, HERO_LEAD, HERO_VIDEO};

use super::bounce::BounceIndicator;
use super::layout::{centered_band, rows};
use super::theme::Theme;

const MAX_WIDTH: u16 = 76;

pub fn render(area: Rect, buf: &mut Buffer, tick: u64) {
    buf.set_style(area, Theme::abyss());

    let band = centered_band(area, MAX_WIDTH);
    let lead_rows = estimate_rows(HERO_LEAD, band.width);
    let headline_rows = HERO_HEADLINE.len() as u16;
    let block_rows = headline_rows + 1 + lead_rows;
    let top = area.height.saturating_sub(block_rows) / 2;

    let headline: Vec<Line> = HERO_HEADLINE
        .iter()
        .map(|l| Line::from(Span::styled(*l, Theme::heading_style())))
        .collect();
    Paragraph::new(Text::from(headline))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows(band, top, headline_rows), buf);

    Paragraph::new(HERO_LEAD)
        .style(Theme::body_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows(band, top + headline_rows + 1, lead_rows), buf);

    // Background video reference, bottom-left.
    if area.height > 4 {
        let label = format!("▶ {}", HERO_VIDEO.0);
        buf.set_stringn(area.x + 2, area.bottom() - 2, label, area.width.saturating_sub(4) as usize, Theme::muted_style());
    }

    if area.height >= 6 {
        BounceIndicator { tick }.render(rows(area, area.height - 4, 2), buf);
    }
}

/// Rows `text` needs when wrapped to `width`, rounded up generously.
pub fn estimate_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let chars = text.chars().count();
    (chars.div_ceil(width) + 1).min(usize::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn headline_is_vertically_centred() {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        render(area, &mut buf, 0);
        let first = (0..40)
            .find(|&y| row_text(&buf, y).contains("Cartografia"))
            .unwrap();
        assert!(first > 5 && first < 20, "headline at row {first}");
        assert!((0..40).any(|y| row_text(&buf, y).contains("tipografia.mp4")));
    }

    #[test]
    fn estimate_never_undershoots() {
        assert_eq!(estimate_rows("", 10), 1);
        assert_eq!(estimate_rows("abcdefghij", 10), 2);
        assert!(estimate_rows(HERO_LEAD, 40) as usize * 40 >= HERO_LEAD.len() / 2);
    }
}
