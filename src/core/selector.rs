//! Technology showcase selection.

use super::content::TechItem;

/// Interaction model, picked from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutClass {
    /// Accordion: tapping the open item closes it.
    Touch,
    /// Tabs + detail pane: always exactly one selection once chosen.
    Pointer,
}

impl LayoutClass {
    /// Widths strictly below `breakpoint` are touch-sized.
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            LayoutClass::Touch
        } else {
            LayoutClass::Pointer
        }
    }
}

/// Single-selection state over a fixed item list.
#[derive(Debug, Clone)]
pub struct TechSelector {
    items: &'static [TechItem],
    selected: Option<&'static str>,
}

impl TechSelector {
    /// Starts with the first item selected.
    pub fn new(items: &'static [TechItem]) -> Self {
        Self {
            items,
            selected: items.first().map(|i| i.id),
        }
    }

    pub fn items(&self) -> &'static [TechItem] {
        self.items
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&'static TechItem> {
        let id = self.selected?;
        self.items.iter().find(|i| i.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected == Some(id)
    }

    /// Select `id`.  Unknown ids are ignored.
    pub fn select(&mut self, id: &str, layout: LayoutClass) {
        let Some(item) = self.items.iter().find(|i| i.id == id) else {
            return;
        };
        self.selected = match layout {
            LayoutClass::Touch if self.selected == Some(item.id) => None,
            _ => Some(item.id),
        };
    }

    /// Move the selection one item down (wrapping).  From no selection, picks
    /// the first item.
    pub fn select_next(&mut self) {
        self.step(1);
    }

    pub fn select_prev(&mut self) {
        self.step(self.items.len().saturating_sub(1));
    }

    fn step(&mut self, by: usize) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.position() {
            Some(i) => (i + by) % self.items.len(),
            None => 0,
        };
        self.selected = Some(self.items[next].id);
    }

    /// Index of the selected item.
    pub fn position(&self) -> Option<usize> {
        let id = self.selected?;
        self.items.iter().position(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::TECHNOLOGIES;

    #[test]
    fn defaults_to_first_item() {
        let s = TechSelector::new(TECHNOLOGIES);
        assert_eq!(s.selected(), Some("ROVs"));
        assert_eq!(s.selected_item().map(|i| i.name), Some(TECHNOLOGIES[0].name));
    }

    #[test]
    fn touch_reselect_closes() {
        let mut s = TechSelector::new(TECHNOLOGIES);
        s.select("SONAR", LayoutClass::Touch);
        assert_eq!(s.selected(), Some("SONAR"));
        s.select("SONAR", LayoutClass::Touch);
        assert_eq!(s.selected(), None);
        assert!(s.selected_item().is_none());
    }

    #[test]
    fn pointer_never_toggles_off() {
        let mut s = TechSelector::new(TECHNOLOGIES);
        s.select("SONAR", LayoutClass::Pointer);
        s.select("SONAR", LayoutClass::Pointer);
        assert_eq!(s.selected(), Some("SONAR"));
        s.select("SAMPLERS", LayoutClass::Pointer);
        assert_eq!(s.selected(), Some("SAMPLERS"));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut s = TechSelector::new(TECHNOLOGIES);
        s.select("LIDAR", LayoutClass::Touch);
        assert_eq!(s.selected(), Some("ROVs"));
    }

    #[test]
    fn cycling_wraps_and_recovers_from_none() {
        let mut s = TechSelector::new(TECHNOLOGIES);
        s.select_prev();
        assert_eq!(s.position(), Some(TECHNOLOGIES.len() - 1));
        s.select_next();
        assert_eq!(s.position(), Some(0));

        s.select("ROVs", LayoutClass::Touch);
        assert_eq!(s.selected(), None);
        s.select_next();
        assert_eq!(s.position(), Some(0));
    }

    #[test]
    fn layout_class_breakpoint() {
        assert_eq!(LayoutClass::for_width(767.0, 768.0), LayoutClass::Touch);
        assert_eq!(LayoutClass::for_width(768.0, 768.0), LayoutClass::Pointer);
    }
}
