//! `#ciencia-meio-ambiente`: organisation cards, revealed in a stagger.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::page::Page;
use crate::core::content::{ENV_INTRO, ENV_TITLE, ORG_CARDS};

use super::layout::{centered_band, rows, Hit, HitMap};
use super::theme::Theme;

/// A freshly revealed card eases in over this long.
const FADE_IN: Duration = Duration::from_millis(700);

/// `true` while card `index` is still inside its fade-in window.
fn fading_in(page: &Page, index: usize) -> bool {
    page.card(index)
        .and_then(|c| c.revealed_at())
        .is_some_and(|at| page.now().saturating_sub(at) < FADE_IN)
}

pub fn render(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    buf.set_style(area, Theme::deep());

    let band = centered_band(area, 90);
    Paragraph::new(Line::from(Span::styled(ENV_TITLE, Theme::heading_style())))
        .alignment(Alignment::Center)
        .render(rows(band, 1, 1), buf);
    Paragraph::new(ENV_INTRO)
        .style(Theme::body_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows(band, 3, 5), buf);

    let doc = page.doc();
    for (i, (slot, card)) in doc.cards.iter().zip(ORG_CARDS).enumerate() {
        // Not yet revealed: the space stays empty.
        if !page.card_visible(i) {
            continue;
        }
        let rect = Rect {
            x: area.x + slot.x,
            width: slot.width,
            ..rows(area, slot.local_y, slot.height)
        }
        .intersection(area);
        if rect.is_empty() {
            continue;
        }

        let hovered = page.hovered_card() == Some(i);
        let fading = fading_in(page, i);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(if hovered {
                Theme::card_border_hover()
            } else if fading {
                Theme::hidden_style()
            } else {
                Theme::border_style()
            });
        let inner = block.inner(rect);
        block.render(rect, buf);

        let title_style = if hovered {
            Theme::accent_style()
        } else if fading {
            Theme::hidden_style()
        } else {
            Theme::heading_style()
        };
        buf.set_line(
            inner.x,
            inner.y,
            &Line::from(vec![
                Span::raw(card.icon),
                Span::raw(" "),
                Span::styled(card.title, title_style),
            ]),
            inner.width,
        );

        let body = rows(inner, 2, inner.height.saturating_sub(2));
        if doc.narrow_cards || hovered {
            Paragraph::new(card.description)
                .style(Theme::body_style())
                .wrap(Wrap { trim: true })
                .render(body, buf);
        } else {
            Paragraph::new("passe o cursor para saber mais")
                .style(Theme::muted_style())
                .render(rows(body, 0, 1), buf);
        }
        hits.push(rect, Hit::Card(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::Hover;
    use crate::config::RevealTimings;
    use crate::core::nav::SectionId;

    fn draw(page: &Page) -> (String, HitMap) {
        let span = page.doc().span(SectionId::Environment);
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
    fn only_revealed_cards_are_drawn() {
        let mut page = Page::new(160, 40, RevealTimings::default());
        let (text, hits) = draw(&page);
        assert_eq!(hits.len(), 0);
        assert!(!text.contains("Oceana"));

        page.jump_to_section(SectionId::Environment);
        let (_, hits) = draw(&page);
        assert_eq!(hits.len(), 1);

        let now = page.now();
        page.advance(now + Duration::from_millis(600));
        let (text, hits) = draw(&page);
        assert_eq!(hits.len(), 4);
        assert!(text.contains("Sea Shepherd"));
    }

    /// Foreground of the first cell of `word`, searched row by row.
    fn fg_of(page: &Page, word: &str) -> Option<ratatui::style::Color> {
        let span = page.doc().span(SectionId::Environment);
        let area = Rect::new(0, 0, page.doc().cols, span.height);
        let mut buf = Buffer::empty(area);
        render(page, area, &mut buf, &mut HitMap::default());
        let len = word.chars().count() as u16;
        for y in 0..area.height {
            for x in 0..=area.width.saturating_sub(len) {
                let text: String = (x..x + len).map(|cx| buf[(cx, y)].symbol()).collect();
                if text == word {
                    return Some(buf[(x, y)].fg);
                }
            }
        }
        None
    }

    #[test]
    fn revealed_card_fades_in() {
        let mut page = Page::new(160, 40, RevealTimings::default());
        page.jump_to_section(SectionId::Environment);
        assert_eq!(fg_of(&page, "Oceana"), Some(crate::ui::theme::MUTED));

        let now = page.now();
        page.advance(now + Duration::from_millis(700));
        assert_eq!(fg_of(&page, "Oceana"), Some(crate::ui::theme::FOAM));
    }

    #[test]
    fn descriptions_follow_hover_on_wide_layouts() {
        let mut page = Page::new(160, 40, RevealTimings::default());
        page.jump_to_section(SectionId::Environment);
        let now = page.now();
        page.advance(now + Duration::from_secs(1));

        let (text, _) = draw(&page);
        assert!(!text.contains("advocacy"));
        page.pointer_over(Some(Hover::Card(0)));
        let (text, _) = draw(&page);
        assert!(text.contains("advocacy"));
    }

    #[test]
    fn narrow_layout_always_shows_descriptions() {
        let mut page = Page::new(60, 40, RevealTimings::default());
        page.jump_to_section(SectionId::Environment);
        let now = page.now();
        page.advance(now + Duration::from_secs(1));
        let (text, _) = draw(&page);
        assert!(text.contains("advocacy"));
    }
}
