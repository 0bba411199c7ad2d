//! TUI Match (workspace facade crate).
//!
//! Re-exports the member crates under short module names and adds the
//! binaries' configuration and logging setup.

pub use tui_match_adapter as adapter;
pub use tui_match_core as core;
pub use tui_match_engine as engine;
pub use tui_match_input as input;
pub use tui_match_orchestrator as orchestrator;
pub use tui_match_term as term;
pub use tui_match_types as types;

pub mod config;
pub mod logging;
