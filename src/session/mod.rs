//! Editing session state.
//!
//! A [`Session`] owns exactly one [`Document`] and replaces it wholesale on
//! every load or edit. Collaborators (CLI, sidebar, preview) hold the session
//! and talk to it through [`Session::load_markdown`], [`Session::markdown`],
//! [`Session::outline`] and [`Session::presentation_tree`], or through
//! [`Message`]s passed to [`update`].

mod update;

pub use update::{Message, update};

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::SessionError;
use crate::outline::{self, OutlineEntry, OutlineState};
use crate::preview::{self, RenderNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible, non-fatal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// The complete editing session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Document,
    /// File the document was loaded from, if any
    file_path: Option<PathBuf>,
    /// Expanded outline rows; reset on every document replacement
    outline_state: OutlineState,
    notice: Option<Notice>,
}

impl Session {
    /// Create a session holding an empty, untitled document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session associated with a file path without reading it.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub const fn outline_state(&self) -> &OutlineState {
        &self.outline_state
    }

    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Replace the held document by parsing `text` from scratch.
    pub fn load_markdown(&mut self, text: &str) {
        self.replace_document(Document::parse(text));
    }

    /// Serialize the held document.
    pub fn markdown(&self) -> String {
        self.document.to_markdown()
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline::outline(&self.document)
    }

    pub fn presentation_tree(&self) -> RenderNode {
        preview::presentation_tree(&self.document)
    }

    /// Toggle an outline row. Ids that do not name a section are ignored.
    pub fn toggle_section(&mut self, id: usize) {
        if self.document.section(id).is_some() {
            self.outline_state.toggle(id);
        }
    }

    /// Read `path` and load it, remembering the path for reloads.
    ///
    /// # Errors
    /// Returns [`SessionError::Read`] if the file cannot be read. The held
    /// document is left untouched and an error notice is recorded.
    pub fn open_file(&mut self, path: &Path) -> Result<(), SessionError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                self.load_markdown(&text);
                self.file_path = Some(path.to_path_buf());
                tracing::info!(
                    path = %path.display(),
                    sections = self.document.sections.len(),
                    "loaded essay"
                );
                Ok(())
            }
            Err(source) => {
                tracing::warn!(path = %path.display(), error = %source, "failed to read essay");
                let err = SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Re-read the session's file.
    ///
    /// # Errors
    /// Returns [`SessionError::NoPath`] if no file is associated, or the
    /// read error from [`Session::open_file`].
    pub fn reload(&mut self) -> Result<(), SessionError> {
        let Some(path) = self.file_path.clone() else {
            let err = SessionError::NoPath;
            self.show_error(&err);
            return Err(err);
        };
        self.open_file(&path)
    }

    /// Write the serialized document to `path`.
    ///
    /// # Errors
    /// Returns [`SessionError::Write`] if the file cannot be written.
    pub fn save_file(&mut self, path: &Path) -> Result<(), SessionError> {
        if let Err(source) = fs::write(path, self.markdown()) {
            tracing::warn!(path = %path.display(), error = %source, "failed to write essay");
            let err = SessionError::Write {
                path: path.to_path_buf(),
                source,
            };
            self.show_error(&err);
            return Err(err);
        }
        tracing::info!(path = %path.display(), "saved essay");
        self.notice = Some(Notice {
            level: NoticeLevel::Info,
            message: format!("Saved {}", path.display()),
        });
        Ok(())
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.outline_state.reset();
    }

    fn show_error(&mut self, err: &SessionError) {
        let message = match err {
            SessionError::Read { source, .. } | SessionError::Write { source, .. } => {
                format!("{err}: {source}")
            }
            SessionError::NoPath => err.to_string(),
        };
        self.notice = Some(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }
}
