//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{types,core,engine,input,term}` and holds the
//! argument parsing used by the terminal host binary.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod cli;
