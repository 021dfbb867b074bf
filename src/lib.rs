//! Rainbow parens - incremental rainbow bracket highlighting
//!
//! This crate keeps matching brackets in a Lisp buffer colored by nesting
//! depth while the buffer is edited. It follows the Elm Architecture pattern:
//! `Msg` in, `update` mutates the model, `Cmd` out to the runtime.

pub mod brackets;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod liveness;
pub mod markup;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::HighlightConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use runtime::Runtime;
pub use theme::Theme;
