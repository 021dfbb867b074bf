//! Runtime module - the UI queue and its worker threads
//!
//! - `app` - [`Runtime`]: owns the model, drains the queue, performs commands

pub mod app;

pub use app::{Envelope, Runtime};
