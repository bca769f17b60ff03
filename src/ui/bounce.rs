//! Scroll-down hint: a chevron bouncing at the bottom of the hero.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Row offset of the chevron for each frame.  One frame per four ticks.
const BOUNCE_FRAMES: &[u16] = &[0, 0, 0, 1, 1, 1, 1, 0];
const TICKS_PER_FRAME: u64 = 4;

/// Needs two rows: the chevron moves between them.
pub struct BounceIndicator {
    pub tick: u64,
}

impl BounceIndicator {
    fn offset(&self) -> u16 {
        let frame = (self.tick / TICKS_PER_FRAME) as usize % BOUNCE_FRAMES.len();
        BOUNCE_FRAMES[frame]
    }
}

impl Widget for BounceIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < 2 {
            return;
        }
        let y = area.y + self.offset();
        let x = area.x + area.width / 2;
        let line = Line::from(Span::styled("⌄", Theme::accent_style()));
        buf.set_line(x, y, &line, 1);
    }
}
