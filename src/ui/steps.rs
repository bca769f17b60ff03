//! `#como-enxergamos`: the four-step mapping pipeline.
//!
//! Pointer layouts draw a horizontal timeline with a description card for
//! the hovered step; touch layouts stack the steps and show each revealed
//! step's description inline.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::page::Page;
use crate::core::content::{Step, MAPPING_STEPS, STEPS_INTRO, STEPS_TITLE};
use crate::core::reveal::StepActivator;
use crate::core::selector::LayoutClass;

use super::layout::{centered_band, rows, Hit, HitMap};
use super::theme::Theme;

const HEADER_ROWS: u16 = 7;

pub fn render(page: &Page, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    buf.set_style(area, Theme::abyss());
    render_header(area, buf);

    let steps = page.steps();
    let body = rows(area, HEADER_ROWS, area.height.saturating_sub(HEADER_ROWS));
    match page.layout() {
        LayoutClass::Pointer => render_timeline(steps, body, buf, hits),
        LayoutClass::Touch => render_stack(steps, body, buf, hits),
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let band = centered_band(area, 80);
    Paragraph::new(Line::from(Span::styled(STEPS_TITLE, Theme::heading_style())))
        .alignment(Alignment::Center)
        .render(rows(band, 1, 1), buf);
    Paragraph::new(STEPS_INTRO)
        .style(Theme::body_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows(band, 3, 3), buf);
}

fn marker_style(steps: &StepActivator, index: usize) -> Style {
    if steps.highlighted() == Some(index) {
        Theme::selected_style()
    } else if steps.is_revealed(index) {
        Theme::active_style()
    } else {
        Theme::hidden_style()
    }
}

fn marker(step: &Step) -> String {
    format!(" {} ", step.id + 1)
}

// ── pointer ────────────────────────────────────────────────────

fn render_timeline(steps: &StepActivator, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let count = MAPPING_STEPS.len() as u16;
    if count == 0 || area.height < 5 {
        return;
    }
    let band = centered_band(area, 120);
    let slot = band.width / count;
    let line_y = area.y + 2;

    // The rail, lit up to the last revealed step.
    let revealed = steps.progress().revealed() as u16;
    let first_center = band.x + slot / 2;
    let last_center = band.x + slot * (count - 1) + slot / 2;
    let lit_until = match revealed {
        0 => first_center,
        n => band.x + slot * (n - 1) + slot / 2,
    };
    for x in first_center..=last_center {
        let style = if x <= lit_until && revealed > 0 {
            Theme::accent_style()
        } else {
            Theme::hidden_style()
        };
        buf.set_string(x, line_y, "─", style);
    }

    for (i, step) in MAPPING_STEPS.iter().enumerate() {
        let x = band.x + slot * i as u16;
        let slot_rect = Rect::new(x, area.y, slot, 5);
        let title_style = if steps.is_revealed(i) {
            Theme::heading_style()
        } else {
            Theme::hidden_style()
        };

        let label = marker(step);
        let center = x + slot / 2;
        let label_x = center.saturating_sub(label.chars().count() as u16 / 2);
        buf.set_string(label_x, line_y, &label, marker_style(steps, i));

        Paragraph::new(Line::from(Span::styled(step.title, title_style)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(Rect::new(x, area.y + 3, slot, 2), buf);

        hits.push(slot_rect, Hit::Step(i));
    }

    let card_area = rows(centered_band(area, 64), 6, area.height.saturating_sub(8));
    match steps.highlighted().and_then(|i| MAPPING_STEPS.get(i)) {
        Some(step) => {
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Theme::card_border_hover())
                .title(Span::styled(format!(" {} ", step.title), Theme::accent_style()));
            Paragraph::new(step.description)
                .style(Theme::body_style())
                .wrap(Wrap { trim: true })
                .block(block)
                .render(card_area, buf);
        }
        None if steps.progress().revealed() > 0 => {
            Paragraph::new("Passe o cursor sobre uma etapa para ver os detalhes")
                .style(Theme::muted_style())
                .alignment(Alignment::Center)
                .render(rows(card_area, 1, 1), buf);
        }
        None => {}
    }
}

// ── touch ──────────────────────────────────────────────────────

const STACK_ROWS: u16 = 5;

fn render_stack(steps: &StepActivator, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
    let band = centered_band(area, 80);
    for (i, step) in MAPPING_STEPS.iter().enumerate() {
        let slot = rows(band, i as u16 * STACK_ROWS, STACK_ROWS);
        if slot.height == 0 {
            break;
        }
        let revealed = steps.is_revealed(i);
        let title_style = if revealed {
            Theme::heading_style()
        } else {
            Theme::hidden_style()
        };
        buf.set_line(
            slot.x,
            slot.y,
            &Line::from(vec![
                Span::styled(marker(step), marker_style(steps, i)),
                Span::raw(" "),
                Span::styled(step.title, title_style),
            ]),
            slot.width,
        );
        if revealed {
            let text = Rect {
                x: slot.x + 4,
                width: slot.width.saturating_sub(4),
                ..rows(slot, 1, 3)
            };
            Paragraph::new(step.description)
                .style(Theme::muted_style())
                .wrap(Wrap { trim: true })
                .render(text, buf);
        }
        hits.push(slot, Hit::Step(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealTimings;
    use crate::core::nav::SectionId;
    use std::time::Duration;

    fn text(buf: &Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf[(x, y)].symbol());
            }
            s.push('\n');
        }
        s
    }

    fn draw(page: &Page) -> (Buffer, HitMap) {
        let span = page.doc().span(SectionId::HowWeSee);
        let area = Rect::new(0, 0, page.doc().cols, span.height);
        let mut buf = Buffer::empty(area);
        let mut hits = HitMap::default();
        render(page, area, &mut buf, &mut hits);
        (buf, hits)
    }

    fn revealed_page(cols: u16) -> Page {
        let mut page = Page::new(cols, 40, RevealTimings::default());
        page.jump_to_section(SectionId::HowWeSee);
        let now = page.now();
        page.advance(now + Duration::from_secs(3));
        page
    }

    #[test]
    fn timeline_registers_one_hit_per_step() {
        let page = revealed_page(160);
        let (buf, hits) = draw(&page);
        let steps: Vec<Hit> = hits.iter().map(|(_, h)| *h).collect();
        assert_eq!(steps, (0..4).map(Hit::Step).collect::<Vec<_>>());
        assert!(text(&buf).contains("Modelagem Digital"));
        assert!(!text(&buf).contains("modelo 3D"));
    }

    #[test]
    fn hovered_step_shows_its_description() {
        let mut page = revealed_page(160);
        page.pointer_over(Some(crate::app::page::Hover::Step(2)));
        let (buf, _) = draw(&page);
        assert!(text(&buf).contains("modelo 3D"));
    }

    #[test]
    fn touch_layout_shows_revealed_descriptions_inline() {
        let page = revealed_page(60);
        let (buf, hits) = draw(&page);
        assert_eq!(hits.len(), 4);
        assert!(text(&buf).contains("sonar emite"));
    }
}
