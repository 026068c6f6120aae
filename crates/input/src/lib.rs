//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. Every press is
//! forwarded as-is; there is no key repeat handling beyond what the terminal does.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key_event, should_quit};
