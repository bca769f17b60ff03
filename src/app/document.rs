//! Document geometry: where every section and card sits, in terminal rows.
//!
//! The page is a vertical stack of sections.  Heights depend on the viewport
//! (the hero fills it) and on the layout class (touch layouts stack things
//! vertically and grow taller).  The reveal core works in layout units, so
//! this module also owns the cell → unit conversion.

use crate::config::RevealTimings;
use crate::core::content::{MAPPING_STEPS, ORG_CARDS, TECHNOLOGIES};
use crate::core::host::Viewport;
use crate::core::nav::SectionId;
use crate::core::selector::LayoutClass;

/// Layout units per terminal column.
pub const UNITS_PER_COL: f64 = 8.0;
/// Layout units per terminal row.
pub const UNITS_PER_ROW: f64 = 16.0;

/// Vertical extent of a section, in document rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub top: u32,
    pub height: u16,
}

impl Span {
    pub fn bottom(&self) -> u32 {
        self.top + u32::from(self.height)
    }
}

/// One card of the organisation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// Document row of the card's top edge.
    pub top: u32,
    /// Offset from the section top.
    pub local_y: u16,
    pub x: u16,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub cols: u16,
    pub viewport_rows: u16,
    pub layout: LayoutClass,
    /// Nav collapses into a menu button.
    pub compact_nav: bool,
    /// Narrow enough that card descriptions are always shown.
    pub narrow_cards: bool,
    sections: Vec<(SectionId, Span)>,
    pub cards: Vec<CardSlot>,
    pub card_columns: u16,
}

// Fixed section chrome, in rows.
const STEPS_HEADER: u16 = 7;
const STEP_ROWS_TOUCH: u16 = 5;
const TIMELINE_ROWS: u16 = 5;
const TOOLTIP_ROWS: u16 = 7;
const TECH_HEADER_TOUCH: u16 = 6;
const TECH_ITEM_ROWS_POINTER: u16 = 5;
const TECH_ITEM_ROWS_TOUCH: u16 = 3;
const TECH_BODY_ROWS_TOUCH: u16 = 7;
const ENV_HEADER: u16 = 9;
const CARD_GAP: u16 = 2;

impl Document {
    pub fn compute(cols: u16, viewport_rows: u16, timings: &RevealTimings) -> Self {
        let width_units = f64::from(cols) * UNITS_PER_COL;
        let layout = LayoutClass::for_width(width_units, timings.touch_breakpoint);
        let compact_nav = width_units < timings.mobile_menu_breakpoint;

        let steps = MAPPING_STEPS.len() as u16;
        let techs = TECHNOLOGIES.len() as u16;

        let hero = viewport_rows.max(12);
        let how = match layout {
            LayoutClass::Pointer => STEPS_HEADER + TIMELINE_ROWS + TOOLTIP_ROWS + 2,
            LayoutClass::Touch => STEPS_HEADER + steps * STEP_ROWS_TOUCH + 2,
        };
        let tech = match layout {
            LayoutClass::Pointer => 4 + techs * TECH_ITEM_ROWS_POINTER + 2,
            LayoutClass::Touch => TECH_HEADER_TOUCH + techs * TECH_ITEM_ROWS_TOUCH + TECH_BODY_ROWS_TOUCH + 2,
        };

        let card_columns: u16 = if width_units < 640.0 {
            1
        } else if width_units < 1024.0 {
            2
        } else {
            4
        };
        let narrow_cards = width_units < 640.0;
        let card_height: u16 = if narrow_cards { 10 } else { 9 };
        let inner = cols.saturating_sub(4);
        let card_width = inner
            .saturating_sub(CARD_GAP * (card_columns - 1))
            .checked_div(card_columns)
            .unwrap_or(0)
            .max(1);
        let card_rows = (ORG_CARDS.len() as u16).div_ceil(card_columns);
        let grid_height = card_rows * (card_height + 1);
        let env = (ENV_HEADER + grid_height + 2).max(viewport_rows);

        let mut sections = Vec::with_capacity(SectionId::ALL.len());
        let mut top = 0u32;
        for (&id, height) in SectionId::ALL.iter().zip([hero, how, tech, env]) {
            sections.push((id, Span { top, height }));
            top += u32::from(height);
        }

        let env_top = sections[3].1.top;
        let cards = (0..ORG_CARDS.len() as u16)
            .map(|i| {
                let row = i / card_columns;
                let col = i % card_columns;
                let local_y = ENV_HEADER + row * (card_height + 1);
                CardSlot {
                    top: env_top + u32::from(local_y),
                    local_y,
                    x: 2 + col * (card_width + CARD_GAP),
                    width: card_width,
                    height: card_height,
                }
            })
            .collect();

        Self {
            cols,
            viewport_rows,
            layout,
            compact_nav,
            narrow_cards,
            sections,
            cards,
            card_columns,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            f64::from(self.cols) * UNITS_PER_COL,
            f64::from(self.viewport_rows) * UNITS_PER_ROW,
        )
    }

    pub fn sections(&self) -> &[(SectionId, Span)] {
        &self.sections
    }

    pub fn span(&self, section: SectionId) -> Span {
        self.sections
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, s)| *s)
            .unwrap_or(Span { top: 0, height: 0 })
    }

    pub fn total_rows(&self) -> u32 {
        self.sections.last().map_or(0, |(_, s)| s.bottom())
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> u32 {
        self.total_rows().saturating_sub(u32::from(self.viewport_rows))
    }

    /// Section whose span contains `row`.
    pub fn section_at(&self, row: u32) -> SectionId {
        self.sections
            .iter()
            .rev()
            .find(|(_, s)| s.top <= row)
            .map_or(SectionId::Home, |(id, _)| *id)
    }
}

/// Convert a row count into layout units.
pub fn rows_to_units(rows: f64) -> f64 {
    rows * UNITS_PER_ROW
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(cols: u16, rows: u16) -> Document {
        Document::compute(cols, rows, &RevealTimings::default())
    }

    #[test]
    fn sections_stack_without_gaps() {
        let d = doc(160, 40);
        let mut expected_top = 0;
        for (_, span) in d.sections() {
            assert_eq!(span.top, expected_top);
            expected_top = span.bottom();
        }
        assert_eq!(d.total_rows(), expected_top);
        assert_eq!(d.span(SectionId::Home).height, 40);
    }

    #[test]
    fn layout_classes_follow_width() {
        // 160 cols = 1280 units
        let wide = doc(160, 40);
        assert_eq!(wide.layout, LayoutClass::Pointer);
        assert!(!wide.compact_nav);
        assert_eq!(wide.card_columns, 4);

        // 90 cols = 720 units
        let mid = doc(90, 40);
        assert_eq!(mid.layout, LayoutClass::Touch);
        assert!(!mid.compact_nav);
        assert_eq!(mid.card_columns, 2);

        // 60 cols = 480 units
        let narrow = doc(60, 40);
        assert!(narrow.compact_nav);
        assert!(narrow.narrow_cards);
        assert_eq!(narrow.card_columns, 1);
    }

    #[test]
    fn cards_sit_inside_environment_section() {
        for cols in [60, 90, 160] {
            let d = doc(cols, 40);
            let env = d.span(SectionId::Environment);
            for card in &d.cards {
                assert!(card.top >= env.top);
                assert!(card.top + u32::from(card.height) <= env.bottom());
                assert!(card.x + card.width <= cols);
            }
        }
    }

    #[test]
    fn section_at_picks_containing_section() {
        let d = doc(160, 40);
        let tech = d.span(SectionId::Technology);
        assert_eq!(d.section_at(0), SectionId::Home);
        assert_eq!(d.section_at(tech.top), SectionId::Technology);
        assert_eq!(d.section_at(tech.bottom() - 1), SectionId::Technology);
        assert_eq!(d.section_at(u32::MAX), SectionId::Environment);
    }

    #[test]
    fn viewport_is_in_layout_units() {
        let d = doc(96, 50);
        assert_eq!(d.viewport(), Viewport::new(768.0, 800.0));
    }
}
