//! Overlay markers for highlighted brackets
//!
//! - [`MarkerStore`]: the UI overlay layer (an external collaborator)
//! - [`MarkupModel`]: in-memory store used headless and in tests
//! - [`apply_highlights`]: replaces a session's markers for a recomputed range

mod applier;
mod store;

pub use applier::{apply_highlights, ApplyStats, SessionMarkers};
pub use store::{MarkerHandle, MarkerStore, MarkupModel, RangeMarker, SharedMarkup};
