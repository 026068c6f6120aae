//! Terminal rendering for the host binary.
//!
//! A snapshot is painted into a [`FrameBuffer`] by [`BoardView`] (pure, testable),
//! then [`TerminalRenderer`] flushes only the changed runs to the terminal.

pub mod fb;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_changes, TerminalRenderer};
pub use view::{BoardView, Viewport};
