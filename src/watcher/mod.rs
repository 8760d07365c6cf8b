//! Live reload of the essay file.
//!
//! Uses notify for cross-platform file system events. Editors often save by
//! writing a temp file and renaming it, so the parent directory is watched
//! and events are matched back to the essay by path or file name.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches one essay file and reports debounced changes.
pub struct EssayWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl EssayWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the parent
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // OS events carry canonical paths.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(
            target = %target_path.display(),
            root = %watch_root.display(),
            "watching essay"
        );

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Drain pending events. Returns true once a change has been quiet for
    /// the debounce interval.
    pub fn take_change_ready(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => {
                    self.pending_since = Some(Instant::now());
                }
                Ok(ev) => {
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignoring event");
                }
                Err(err) => tracing::warn!(error = %err, "watch error"),
            }
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event_for(path: PathBuf) -> Event {
        Event {
            kind: EventKind::Any,
            paths: vec![path],
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("essay.md")), PathBuf::from("."));
    }

    #[test]
    fn test_sibling_with_same_name_is_relevant() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("essay.md");
        std::fs::write(&path, "# Essay").expect("write");
        let watcher = EssayWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        assert!(watcher.is_relevant(&event_for(canonical_dir.clone())));
        assert!(watcher.is_relevant(&event_for(canonical_dir.join("essay.md"))));
        assert!(!watcher.is_relevant(&event_for(PathBuf::from("/elsewhere/other.md"))));
    }

    #[test]
    fn test_no_change_without_events() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("essay.md");
        std::fs::write(&path, "# Essay").expect("write");
        let mut watcher = EssayWatcher::new(&path, Duration::from_millis(10)).expect("watcher");
        assert!(!watcher.take_change_ready());
        assert_eq!(
            watcher.target_path(),
            path.canonicalize().expect("canonicalize")
        );
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("essay.md");
        std::fs::write(&path, "# Before").expect("write");

        let mut watcher = EssayWatcher::new(&path, Duration::from_millis(50)).expect("watcher");
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "# After").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_change_ready() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(detected, "watcher should report the modification");
    }
}
