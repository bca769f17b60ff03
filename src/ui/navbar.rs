//! Navigation bar and the mobile slide-over menu.
//!
//! Wide terminals get a centred pill of links; below the mobile breakpoint
//! only a menu button is drawn in the top-right corner, and the links move
//! into a panel sliding over the right three quarters of the page.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Clear, Widget},
};

use crate::app::page::Page;
use crate::core::nav::SectionId;

use super::layout::{Hit, HitMap};
use super::theme::Theme;

const LINK_GAP: u16 = 4;
const MENU_MAX_WIDTH: u16 = 48;

fn bar_style(page: &Page) -> Style {
    if page.nav().scrolled() {
        Theme::nav_solid()
    } else {
        Theme::nav_transparent()
    }
}

fn link_style(page: &Page, section: SectionId) -> Style {
    if page.current_section() == section {
        Theme::accent_style()
    } else {
        Theme::body_style()
    }
}

/// Draw the bar into the top rows of the page.
pub fn render_bar(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if area.height == 0 {
        return;
    }
    if page.doc().compact_nav {
        render_menu_button(page, area, buf, hits);
        return;
    }

    let widths: Vec<u16> = SectionId::ALL
        .iter()
        .map(|s| Span::raw(s.label()).width() as u16)
        .collect();
    let content: u16 = widths.iter().sum::<u16>() + LINK_GAP * (widths.len() as u16 - 1);
    let pill_width = (content + 4).min(area.width);
    let pill = Rect {
        x: area.x + (area.width - pill_width) / 2,
        width: pill_width,
        ..area
    };

    Clear.render(pill, buf);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .style(bar_style(page));
    let inner = block.inner(pill);
    block.render(pill, buf);

    let mut x = inner.x;
    for (&section, &w) in SectionId::ALL.iter().zip(&widths) {
        if x >= inner.right() {
            break;
        }
        let visible = w.min(inner.right() - x);
        buf.set_stringn(x, inner.y, section.label(), usize::from(visible), link_style(page, section));
        hits.push(Rect::new(x, inner.y, visible, 1), Hit::NavLink(section));
        x = x.saturating_add(w + LINK_GAP);
    }
}

fn render_menu_button(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let label = if page.nav().menu_open() { " ✕ " } else { " ≡ " };
    let width = 5u16.min(area.width);
    let button = Rect {
        x: area.right() - width,
        width,
        ..area
    };
    Clear.render(button, buf);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
        .style(bar_style(page));
    let inner = block.inner(button);
    block.render(button, buf);
    buf.set_stringn(inner.x, inner.y, label, usize::from(inner.width), Theme::accent_style());
    hits.push(button, Hit::MenuButton);
}

/// Draw the open mobile menu over `area` (the whole page).  The menu button
/// is redrawn on top so it can close the menu again.
pub fn render_menu(page: &Page, area: Rect, nav_area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    if !page.nav().menu_open() || area.is_empty() {
        return;
    }

    buf.set_style(area, Theme::backdrop_style());
    hits.push(area, Hit::MenuBackdrop);

    let width = (area.width * 3 / 4).clamp(1, MENU_MAX_WIDTH);
    let panel = Rect {
        x: area.right() - width,
        width,
        ..area
    };
    Clear.render(panel, buf);
    buf.set_style(panel, Theme::deep());

    let links = SectionId::ALL.len() as u16;
    let spacing = 3;
    let top = panel.y + panel.height.saturating_sub(links * spacing) / 2;
    for (i, &section) in SectionId::ALL.iter().enumerate() {
        let y = top + i as u16 * spacing + 1;
        if y >= panel.bottom() {
            break;
        }
        let w = (Span::raw(section.label()).width() as u16).min(panel.width);
        let x = panel.x + (panel.width - w) / 2;
        buf.set_stringn(x, y, section.label(), usize::from(w), link_style(page, section));
        hits.push(Rect::new(panel.x, y.saturating_sub(1), panel.width, spacing), Hit::NavLink(section));
    }

    render_menu_button(page, nav_area, buf, hits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealTimings;

    fn draw(page: &Page) -> (Buffer, HitMap) {
        let area = Rect::new(0, 0, page.doc().cols, page.doc().viewport_rows);
        let nav = Rect { height: 3, ..area };
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render_bar(page, nav, &mut buf, &mut hits);
        render_menu(page, area, nav, &mut buf, &mut hits);
        (buf, hits)
    }

    #[test]
    fn wide_bar_has_one_hit_per_link() {
        let page = Page::new(160, 40, RevealTimings::default());
        let (_, hits) = draw(&page);
        let links: Vec<Hit> = hits.iter().map(|(_, h)| *h).collect();
        let expected: Vec<Hit> = SectionId::ALL.iter().map(|&s| Hit::NavLink(s)).collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn compact_bar_is_a_menu_button() {
        let page = Page::new(60, 40, RevealTimings::default());
        let (_, hits) = draw(&page);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.at(58, 1), Some(Hit::MenuButton));
    }

    #[test]
    fn open_menu_covers_page_with_backdrop_and_links() {
        let mut page = Page::new(60, 40, RevealTimings::default());
        page.toggle_menu();
        let (_, hits) = draw(&page);

        // Left quarter is backdrop, the panel holds the links.
        assert_eq!(hits.at(2, 20), Some(Hit::MenuBackdrop));
        let link_rows: Vec<Hit> = (0..40)
            .filter_map(|y| hits.at(40, y))
            .filter(|h| matches!(h, Hit::NavLink(_)))
            .collect();
        assert!(link_rows.contains(&Hit::NavLink(SectionId::Environment)));
        // The close button stays on top.
        assert_eq!(hits.at(58, 1), Some(Hit::MenuButton));
    }
}
