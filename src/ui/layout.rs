//! Layout helpers: split the terminal area into regions and remember where
//! the clickable things ended up.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::nav::SectionId;

/// Rows taken by the navigation bar, drawn over the top of the page.
pub const NAV_HEIGHT: u16 = 3;

/// Primary screen layout: the scrolling page with the nav bar overlaid on
/// its top edge, and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub nav_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let page_area = chunks[0];
        let nav_area = Rect {
            height: NAV_HEIGHT.min(page_area.height),
            ..page_area
        };

        Self {
            page_area,
            nav_area,
            status_area: chunks[1],
        }
    }

    /// Rows available to the page for a terminal of `rows` rows.
    pub fn page_rows(rows: u16) -> u16 {
        rows.saturating_sub(1).max(1)
    }
}

/// Something the pointer can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    NavLink(SectionId),
    MenuButton,
    /// The dimmed page behind the open mobile menu.
    MenuBackdrop,
    Step(usize),
    Tech(&'static str),
    Card(usize),
}

/// Screen rectangles of the last frame's interactive elements, in paint order.
#[derive(Debug, Default, Clone)]
pub struct HitMap {
    regions: Vec<(Rect, Hit)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, hit: Hit) {
        if rect.width > 0 && rect.height > 0 {
            self.regions.push((rect, hit));
        }
    }

    /// Topmost element under `(col, row)`: later pushes paint over earlier ones.
    pub fn at(&self, col: u16, row: u16) -> Option<Hit> {
        self.regions
            .iter()
            .rev()
            .find(|(r, _)| point_in_rect(*r, col, row))
            .map(|(_, hit)| *hit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Rect, Hit)> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

/// A column band of at most `max_width`, centred in `area`, with a two-column
/// margin on each side when space allows.
pub fn centered_band(area: Rect, max_width: u16) -> Rect {
    let width = area.width.saturating_sub(4).min(max_width).max(1).min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Row `offset` of `area`, `height` rows tall, clipped to `area`.
pub fn rows(area: Rect, offset: u16, height: u16) -> Rect {
    let y = area.y.saturating_add(offset).min(area.bottom());
    Rect {
        y,
        height: height.min(area.bottom() - y),
        ..area
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_overlays_page_top() {
        let l = AppLayout::from_area(Rect::new(0, 0, 100, 40));
        assert_eq!(l.page_area, Rect::new(0, 0, 100, 39));
        assert_eq!(l.nav_area, Rect::new(0, 0, 100, NAV_HEIGHT));
        assert_eq!(l.status_area, Rect::new(0, 39, 100, 1));
        assert_eq!(AppLayout::page_rows(40), l.page_area.height);
    }

    #[test]
    fn bands_and_rows_stay_inside_area() {
        let area = Rect::new(0, 10, 100, 20);
        assert_eq!(centered_band(area, 60), Rect::new(20, 10, 60, 20));
        assert_eq!(centered_band(area, 200), Rect::new(2, 10, 96, 20));
        assert_eq!(centered_band(Rect::new(0, 0, 3, 1), 60).width, 1);

        assert_eq!(rows(area, 5, 3), Rect::new(0, 15, 100, 3));
        assert_eq!(rows(area, 18, 5), Rect::new(0, 28, 100, 2));
        assert_eq!(rows(area, 40, 5).height, 0);
    }

    #[test]
    fn topmost_hit_wins() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 50, 20), Hit::MenuBackdrop);
        hits.push(Rect::new(10, 2, 20, 1), Hit::NavLink(SectionId::Technology));
        hits.push(Rect::new(0, 0, 0, 5), Hit::MenuButton);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits.at(12, 2), Some(Hit::NavLink(SectionId::Technology)));
        assert_eq!(hits.at(12, 3), Some(Hit::MenuBackdrop));
        assert_eq!(hits.at(60, 3), None);
    }
}
