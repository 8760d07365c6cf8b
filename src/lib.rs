// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. outline::OutlineEntry)
    clippy::module_name_repetitions
)]

//! # Essayist
//!
//! A markdown essay model with lossless-enough round trips.
//!
//! An essay is a title plus sections; a section is a heading plus
//! paragraphs; a paragraph is a run of sentences. Essayist parses markdown
//! into that tree, serializes it back, and projects it for an outline
//! sidebar and a preview pane.
//!
//! ## Architecture
//!
//! The editing session follows The Elm Architecture (TEA):
//! - **Model**: [`session::Session`], holding one document
//! - **Message**: [`session::Message`]
//! - **Update**: [`session::update`], a pure state transition
//!
//! ## Modules
//!
//! - [`document`]: Document tree, parsing and serialization
//! - [`outline`]: Outline projection for the sidebar
//! - [`preview`]: Render tree for the preview pane
//! - [`session`]: Session state and transitions
//! - [`app`]: Command-line front end
//! - [`watcher`]: File watching
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod outline;
pub mod preview;
pub mod session;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Document, Header, Paragraph, Section, Sentence};
    pub use crate::outline::OutlineEntry;
    pub use crate::preview::RenderNode;
    pub use crate::session::{Message, Session, update};
}
