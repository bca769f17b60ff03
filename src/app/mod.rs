//! Application orchestration: page composition, state, event loop plumbing
//! and input handling.

pub mod document;
pub mod event;
pub mod handler;
pub mod page;
pub mod state;
