//! Input handling: maps key/mouse events to page operations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::nav::SectionId;
use crate::ui::layout::Hit;

use super::page::Hover;
use super::state::AppState;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    // The open menu swallows Esc before it can mean "quit".
    if state.page.nav().menu_open() && key.code == KeyCode::Esc {
        state.page.close_menu();
        return;
    }

    // Fixed keys that are not rebindable.
    match key.code {
        KeyCode::Home => {
            state.page.scroll_to_top();
            return;
        }
        KeyCode::End => {
            state.page.scroll_to_bottom();
            return;
        }
        KeyCode::Char(c @ '1'..='9') if key.modifiers.is_empty() => {
            let index = c as usize - '1' as usize;
            if let Some(&section) = SectionId::ALL.get(index) {
                state.page.click_link(section);
            }
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    tracing::trace!(action = action.label(), "key action");

    let page_rows = i32::from(state.page.doc().viewport_rows).saturating_sub(3).max(1);
    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.page.scroll_by(-1),
        Action::ScrollDown => state.page.scroll_by(1),
        Action::PageUp => state.page.scroll_by(-page_rows),
        Action::PageDown => state.page.scroll_by(page_rows),
        Action::PrevSection => {
            let current = state.page.current_section();
            // Mid-section, "previous" first means the top of this one.
            let target = if state.page.scroll_row() > state.page.doc().span(current).top {
                current
            } else {
                current.prev()
            };
            state.page.click_link(target);
        }
        Action::NextSection => {
            let next = state.page.current_section().next();
            state.page.click_link(next);
        }
        Action::ToggleMenu => {
            if state.page.doc().compact_nav {
                state.page.toggle_menu();
            } else {
                state.status_message = Some("Menu only on narrow terminals".to_string());
            }
        }
        Action::PrevTech => state.page.prev_tech(),
        Action::NextTech => state.page.next_tech(),
        Action::SelectTech => state.page.activate_tech(),
    }
}

/// Process a mouse event against the hit map of the last frame.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let hit = state.hits.at(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            state.page.pointer_over(hover_of(hit));
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(hit) = hit else {
                return;
            };
            tracing::trace!(?hit, "click");
            match hit {
                Hit::NavLink(section) => state.page.click_link(section),
                Hit::MenuButton => state.page.toggle_menu(),
                Hit::MenuBackdrop => state.page.close_menu(),
                Hit::Tech(id) => state.page.select_tech(id),
                // A tap highlights, like hovering does.
                Hit::Step(_) | Hit::Card(_) => state.page.pointer_over(hover_of(Some(hit))),
            }
        }
        MouseEventKind::ScrollUp => {
            if !state.page.nav().menu_open() {
                state.page.scroll_by(-WHEEL_ROWS);
            }
        }
        MouseEventKind::ScrollDown => {
            if !state.page.nav().menu_open() {
                state.page.scroll_by(WHEEL_ROWS);
            }
        }
        _ => {}
    }
}

fn hover_of(hit: Option<Hit>) -> Option<Hover> {
    match hit? {
        Hit::Step(i) => Some(Hover::Step(i)),
        Hit::Card(i) => Some(Hover::Card(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(state: &mut AppState) {
        let mut t = state.page.now();
        while state.page.is_scrolling() {
            t += Duration::from_millis(33);
            state.page.advance(t);
        }
    }

    #[test]
    fn quit_keys() {
        let mut state = AppState::new(160, 41, AppConfig::default());
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);

        let mut state = AppState::new(160, 41, AppConfig::default());
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn digits_jump_to_sections() {
        let mut state = AppState::new(160, 41, AppConfig::default());
        handle_key(&mut state, key(KeyCode::Char('3')));
        settle(&mut state);
        assert_eq!(state.page.current_section(), SectionId::Technology);

        handle_key(&mut state, key(KeyCode::Char('1')));
        settle(&mut state);
        assert_eq!(state.page.scroll_row(), 0);
    }

    #[test]
    fn section_keys_step_through_page() {
        let mut state = AppState::new(160, 41, AppConfig::default());
        handle_key(&mut state, key(KeyCode::Tab));
        settle(&mut state);
        assert_eq!(state.page.current_section(), SectionId::HowWeSee);

        state.page.scroll_by(2);
        handle_key(&mut state, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        settle(&mut state);
        assert_eq!(state.page.scroll_row(), state.page.doc().span(SectionId::HowWeSee).top);
    }

    #[test]
    fn esc_closes_menu_before_quitting() {
        let mut state = AppState::new(60, 41, AppConfig::default());
        handle_key(&mut state, key(KeyCode::Char('m')));
        assert!(state.page.nav().menu_open());
        handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.page.nav().menu_open());
        assert!(!state.should_quit);
    }

    #[test]
    fn clicks_dispatch_through_hit_map() {
        let mut state = AppState::new(60, 41, AppConfig::default());
        state.hits.push(Rect::new(55, 0, 5, 3), Hit::MenuButton);
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 57, 1));
        assert!(state.page.nav().menu_open());

        state.hits.clear();
        state.hits.push(Rect::new(0, 0, 60, 40), Hit::MenuBackdrop);
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 3, 20));
        assert!(!state.page.nav().menu_open());

        state.hits.push(Rect::new(0, 10, 60, 3), Hit::Tech("SONAR"));
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 5, 11));
        assert_eq!(state.page.tech().selected(), Some("SONAR"));
    }

    #[test]
    fn wheel_scrolls_and_hover_tracks_cards() {
        let mut state = AppState::new(160, 41, AppConfig::default());
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        assert_eq!(state.page.scroll_row(), WHEEL_ROWS as u32);

        state.hits.push(Rect::new(0, 5, 20, 5), Hit::Card(1));
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 3, 6));
        assert_eq!(state.page.hovered_card(), Some(1));
        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 30, 6));
        assert_eq!(state.page.hovered_card(), None);
    }
}
