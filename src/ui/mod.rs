//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the page's render model and turns it into cells on the
//! terminal.  Nothing here mutates reveal state.

pub mod bounce;
pub mod cards;
pub mod hero;
pub mod layout;
pub mod navbar;
pub mod page_view;
pub mod smooth_scroll;
pub mod steps;
pub mod technology;
pub mod theme;
