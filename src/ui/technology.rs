//! `#tecnologia`: instrument showcase.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::page::Page;
use crate::core::content::{TechItem, TECH_INTRO, TECH_TITLE};
use crate::core::selector::{LayoutClass, TechSelector};

use super::layout::{centered_band, rows, Hit, HitMap};
use super::theme::Theme;

const POINTER_HEADER: u16 = 4;
const POINTER_ITEM_ROWS: u16 = 5;
const TOUCH_HEADER: u16 = 6;
const TOUCH_ITEM_ROWS: u16 = 3;
const TOUCH_BODY_ROWS: u16 = 7;

pub fn render(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    buf.set_style(area, Theme::deep());
    match page.layout() {
        LayoutClass::Pointer => render_tabs(page.tech(), area, buf, hits),
        LayoutClass::Touch => render_accordion(page.tech(), area, buf, hits),
    }
}

/// Image reference, alt text and description of `item`.
fn detail_text(item: &TechItem) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(format!("▣ {}", item.image.0), Theme::muted_style())),
        Line::from(Span::styled(
            item.alt_text,
            Theme::muted_style().add_modifier(Modifier::ITALIC),
        )),
        Line::raw(""),
        Line::from(Span::styled(item.description, Theme::body_style())),
    ])
}

// ── pointer: list + detail pane ────────────────────────────────

fn render_tabs(tech: &TechSelector, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let band = centered_band(area, 120);
    Paragraph::new(Line::from(Span::styled(TECH_TITLE, Theme::heading_style())))
        .render(rows(band, 0, 1), buf);
    Paragraph::new(TECH_INTRO)
        .style(Theme::body_style())
        .wrap(Wrap { trim: true })
        .render(rows(band, 1, 2), buf);

    let list_width = band.width * 2 / 5;
    for (i, item) in tech.items().iter().enumerate() {
        let rect = Rect {
            width: list_width,
            ..rows(band, POINTER_HEADER + i as u16 * POINTER_ITEM_ROWS, POINTER_ITEM_ROWS - 1)
        };
        if rect.height == 0 {
            break;
        }
        let selected = tech.is_selected(item.id);
        let (prefix, style, border) = if selected {
            ("▸ ", Theme::selected_style(), Theme::card_border_hover())
        } else {
            ("  ", Theme::body_style(), Theme::border_style())
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border);
        Paragraph::new(Line::from(Span::styled(format!("{prefix}{}", item.name), style)))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(rect, buf);
        hits.push(rect, Hit::Tech(item.id));
    }

    let Some(item) = tech.selected_item() else {
        return;
    };
    let pane_height = tech.items().len() as u16 * POINTER_ITEM_ROWS - 1;
    let pane = Rect {
        x: band.x + list_width + 2,
        width: band.width.saturating_sub(list_width + 2),
        ..rows(band, POINTER_HEADER, pane_height)
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_hover())
        .title(Span::styled(format!(" {} ", item.name), Theme::accent_style()));
    Paragraph::new(detail_text(item))
        .block(block)
        .wrap(Wrap { trim: true })
        .render(pane, buf);
}

// ── touch: accordion ───────────────────────────────────────────

fn render_accordion(tech: &TechSelector, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let band = centered_band(area, 80);
    Paragraph::new(Line::from(Span::styled(TECH_TITLE, Theme::heading_style())))
        .alignment(Alignment::Center)
        .render(rows(band, 0, 1), buf);
    Paragraph::new(TECH_INTRO)
        .style(Theme::body_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows(band, 1, 4), buf);
    Paragraph::new("Toque em um instrumento para expandir")
        .style(Theme::muted_style())
        .alignment(Alignment::Center)
        .render(rows(band, 5, 1), buf);

    let mut y = TOUCH_HEADER;
    for item in tech.items() {
        let header = rows(band, y, TOUCH_ITEM_ROWS);
        if header.height == 0 {
            break;
        }
        let open = tech.is_selected(item.id);
        let (sign, style) = if open {
            ("−", Theme::accent_style())
        } else {
            ("+", Theme::body_style())
        };
        buf.set_line(
            header.x,
            header.y + 1,
            &Line::from(vec![
                Span::styled(item.name, style),
                Span::raw(" "),
            ]),
            header.width.saturating_sub(2),
        );
        buf.set_string(header.right().saturating_sub(1), header.y + 1, sign, style);
        for x in header.left()..header.right() {
            buf.set_string(x, header.bottom().saturating_sub(1), "─", Theme::border_style());
        }
        hits.push(header, Hit::Tech(item.id));
        y += TOUCH_ITEM_ROWS;

        if open {
            let body = Rect {
                x: band.x + 2,
                width: band.width.saturating_sub(4),
                ..rows(band, y, TOUCH_BODY_ROWS)
            };
            Paragraph::new(detail_text(item))
                .wrap(Wrap { trim: true })
                .render(body, buf);
            y += TOUCH_BODY_ROWS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealTimings;
    use crate::core::nav::SectionId;

    fn draw(page: &Page) -> (String, HitMap) {
        let span = page.doc().span(SectionId::Technology);
        let area = Rect::new(0, 0, page.doc().cols, span.height);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render(page, area, &mut buf, &mut hits);
        let mut s = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                s.push_str(buf[(x, y)].symbol());
            }
            s.push('\n');
        }
        (s, hits)
    }

    #[test]
    fn pointer_layout_shows_detail_of_selection() {
        let mut page = Page::new(160, 40, RevealTimings::default());
        page.select_tech("SIDESCAN");
        let (text, hits) = draw(&page);
        assert!(text.contains("side-sonar.png"));
        assert!(!text.contains("Samplers.jpg"));
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn touch_accordion_collapses_on_second_tap() {
        let mut page = Page::new(60, 40, RevealTimings::default());
        let (text, _) = draw(&page);
        assert!(text.contains("ROVs.webp"));
        assert!(text.contains('−'));

        page.select_tech("ROVs");
        let (text, hits) = draw(&page);
        assert!(!text.contains("ROVs.webp"));
        assert!(!text.contains('−'));
        assert_eq!(hits.len(), 4);
    }
}
