//! Composes one frame: the scrolled page, the nav bar over it, and the
//! status bar.
//!
//! Each section visible in the window is drawn into its own scratch buffer
//! at full height, then the rows inside the window are copied onto the
//! frame.  Section widgets therefore never deal with scrolling.  Their hit
//! rectangles are translated the same way.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Paragraph, Frame};

use crate::app::page::Page;
use crate::app::state::AppState;
use crate::core::nav::SectionId;

use super::layout::{AppLayout, HitMap};
use super::theme::Theme;
use super::{cards, hero, navbar, steps, technology};

pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    state.hits.clear();

    let buf = frame.buffer_mut();
    render_page(&state.page, layout.page_area, buf, &mut state.hits, state.tick);
    navbar::render_bar(&state.page, layout.nav_area, buf, &mut state.hits);
    navbar::render_menu(&state.page, layout.page_area, layout.nav_area, buf, &mut state.hits);

    let hint = state.config.status_bar_hint();
    let message = state.status_message.as_deref().unwrap_or(&hint);
    let status = format!(" {}  │ {}", state.page.current_section().anchor(), message);
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

/// Draw the part of the document under the scroll window into `area`.
pub fn render_page(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap, tick: u64) {
    let top = page.scroll_row();
    let bottom = top + u32::from(area.height);

    for &(section, span) in page.doc().sections() {
        if span.height == 0 || span.bottom() <= top || span.top >= bottom {
            continue;
        }
        let local = Rect::new(0, 0, area.width, span.height);
        let mut scratch = Buffer::empty(local);
        let mut local_hits = HitMap::default();
        match section {
            SectionId::Home => hero::render(local, &mut scratch, tick),
            SectionId::HowWeSee => steps::render(page, local, &mut scratch, &mut local_hits),
            SectionId::Technology => technology::render(page, local, &mut scratch, &mut local_hits),
            SectionId::Environment => cards::render(page, local, &mut scratch, &mut local_hits),
        }

        for doc_row in top.max(span.top)..bottom.min(span.bottom()) {
            let src_y = (doc_row - span.top) as u16;
            let dst_y = area.y + (doc_row - top) as u16;
            for x in 0..area.width {
                let Some(cell) = scratch.cell((x, src_y)) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((area.x + x, dst_y)) {
                    *dst = cell.clone();
                }
            }
        }

        for &(rect, hit) in local_hits.iter() {
            if let Some(screen) = to_screen(rect, span.top, top, area) {
                hits.push(screen, hit);
            }
        }
    }
}

/// Map a rectangle local to a section starting at document row
/// `section_top` onto the screen, clipped to `area`.
fn to_screen(rect: Rect, section_top: u32, scroll: u32, area: Rect) -> Option<Rect> {
    let y0 = i64::from(section_top) + i64::from(rect.y) - i64::from(scroll) + i64::from(area.y);
    let y1 = y0 + i64::from(rect.height);
    let clipped_top = y0.max(i64::from(area.y));
    let clipped_bottom = y1.min(i64::from(area.bottom()));
    if clipped_bottom <= clipped_top {
        return None;
    }
    Some(Rect::new(
        area.x + rect.x,
        clipped_top as u16,
        rect.width,
        (clipped_bottom - clipped_top) as u16,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealTimings;
    use crate::ui::layout::Hit;
    use std::time::Duration;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn hit_rects_follow_scroll_and_clip() {
        let area = Rect::new(0, 0, 80, 20);
        // Section at doc row 30, scrolled to 25: local row 2 lands on screen row 7.
        assert_eq!(to_screen(Rect::new(4, 2, 10, 3), 30, 25, area), Some(Rect::new(4, 7, 10, 3)));
        // Partly above the window.
        assert_eq!(to_screen(Rect::new(0, 0, 10, 5), 30, 33, area), Some(Rect::new(0, 0, 10, 2)));
        // Entirely below.
        assert_eq!(to_screen(Rect::new(0, 0, 10, 5), 30, 0, area), None);
    }

    #[test]
    fn first_frame_shows_the_hero() {
        let page = Page::new(120, 30, RevealTimings::default());
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_page(&page, area, &mut buf, &mut hits, 0);
        assert!((0..30).any(|y| row_text(&buf, y).contains("Profundezas")));
        assert_eq!(hits.len(), 0);
    }

    #[test]
    fn scrolled_cards_are_hit_on_screen() {
        let mut page = Page::new(160, 40, RevealTimings::default());
        page.jump_to_section(SectionId::Environment);
        let now = page.now();
        page.advance(now + Duration::from_secs(1));

        let area = Rect::new(0, 0, 160, 40);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_page(&page, area, &mut buf, &mut hits, 0);

        let slot = page.doc().cards[2];
        let y = (slot.top - page.scroll_row()) as u16 + 1;
        assert_eq!(hits.at(slot.x + 1, y), Some(Hit::Card(2)));
        assert!(row_text(&buf, y - 1).contains('╭'));
    }
}
