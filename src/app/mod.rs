//! Command-line front end.
//!
//! [`App`] loads one essay into a [`Session`], prints the chosen view and,
//! in watch mode, keeps re-printing it as the file changes on disk.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::View;
use crate::outline::render_outline;
use crate::preview::render_plain;
use crate::session::{Message, NoticeLevel, Session, update};
use crate::watcher::EssayWatcher;

/// Quiet period before a burst of file events counts as one change.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL: Duration = Duration::from_millis(250);

/// Runs the CLI against a single essay file.
pub struct App {
    file_path: PathBuf,
    view: View,
    json: bool,
    write: bool,
    watch: bool,
}

impl App {
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            view: View::Markdown,
            json: false,
            write: false,
            watch: false,
        }
    }

    pub const fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Print JSON instead of text.
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Rewrite the file with normalized markdown after loading.
    pub const fn with_write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    pub const fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Load the file, print the view, and watch if enabled.
    ///
    /// # Errors
    /// Fails if the file cannot be read initially, cannot be written back
    /// with `--write`, or the watcher cannot be started.
    pub fn run(self) -> Result<()> {
        if !crate::document::is_markdown_file(&self.file_path) {
            tracing::warn!(
                path = %self.file_path.display(),
                "file does not look like markdown, parsing anyway"
            );
        }

        let mut session = Session::new();
        session
            .open_file(&self.file_path)
            .context("Failed to load essay")?;
        if self.write {
            session
                .save_file(&self.file_path)
                .context("Failed to write normalized essay")?;
        }

        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", render_view(&session, self.view, self.json)?)?;
        out.flush()?;

        if self.watch {
            self.watch_loop(session, &mut out)?;
        }
        Ok(())
    }

    fn watch_loop(&self, mut session: Session, out: &mut impl Write) -> Result<()> {
        let mut watcher = EssayWatcher::new(&self.file_path, WATCH_DEBOUNCE)
            .with_context(|| format!("Failed to watch {}", self.file_path.display()))?;
        tracing::info!(path = %watcher.target_path().display(), "watching for changes");

        loop {
            std::thread::sleep(WATCH_POLL);
            if !watcher.take_change_ready() {
                continue;
            }
            session = update(session, Message::FileChanged);
            if let Some(notice) = session.notice().filter(|n| n.level == NoticeLevel::Error) {
                eprintln!("[error] {}", notice.message);
                session = update(session, Message::DismissNotice);
                continue;
            }
            writeln!(out, "{}", render_view(&session, self.view, self.json)?)?;
            out.flush()?;
        }
    }
}

/// Render one view of the session as text or JSON.
///
/// # Errors
/// Fails only if JSON serialization fails.
pub fn render_view(session: &Session, view: View, json: bool) -> Result<String> {
    let text = match (view, json) {
        (View::Markdown, false) => session.markdown(),
        (View::Markdown, true) => serde_json::to_string_pretty(&session.markdown())?,
        (View::Outline, false) => render_outline(&session.outline(), session.outline_state()),
        (View::Outline, true) => serde_json::to_string_pretty(&session.outline())?,
        (View::Preview, false) => render_plain(&session.presentation_tree()),
        (View::Preview, true) => serde_json::to_string_pretty(&session.presentation_tree())?,
        (View::Model, _) => serde_json::to_string_pretty(session.document())?,
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::new();
        session.load_markdown("# Sleep\n\n## Why\n\nWe sleep. A lot.\n### How\n\nDeeply.");
        session
    }

    #[test]
    fn test_render_markdown_view() {
        let text = render_view(&session(), View::Markdown, false).unwrap();
        assert_eq!(
            text,
            "# Sleep\n\n## Why\n\nWe sleep. A lot.\n\n### How\n\nDeeply."
        );
    }

    #[test]
    fn test_render_outline_view() {
        let text = render_view(&session(), View::Outline, false).unwrap();
        assert_eq!(text, "▸ Why\n  ▸ How\n");
    }

    #[test]
    fn test_render_outline_json() {
        let text = render_view(&session(), View::Outline, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["level"], 2);
        assert_eq!(value[1]["title"], "How");
    }

    #[test]
    fn test_render_model_json_round_trips() {
        let text = render_view(&session(), View::Model, false).unwrap();
        let doc: crate::document::Document = serde_json::from_str(&text).unwrap();
        assert_eq!(&doc, session().document());
    }

    #[test]
    fn test_run_writes_normalized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.md");
        std::fs::write(&path, "# T\n## A\nOne.\nTwo.\n").unwrap();

        App::new(path.clone()).with_write(true).run().unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# T\n\n## A\n\nOne. Two."
        );
    }

    #[test]
    fn test_run_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = App::new(dir.path().join("missing.md")).run();
        assert!(result.is_err());
    }
}
