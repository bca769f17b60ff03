//! Core page logic – reveal controllers, selection, navigation, content.
//!
//! Nothing in this module depends on any TUI or rendering crate.  All
//! environment access goes through [`host::Host`], so every behaviour here can
//! be driven by a fake clock.

pub mod content;
pub mod host;
pub mod nav;
pub mod reveal;
pub mod selector;
pub mod timer;
