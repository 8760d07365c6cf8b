//! The essay document model.
//!
//! This module handles:
//! - The title / section / paragraph / sentence tree
//! - Parsing markdown into that tree
//! - Serializing the tree back to markdown
//!
//! Section and paragraph ids are positions in their owning list. They are
//! reassigned on every parse, so anything keyed by them must be reset when a
//! new document is loaded.

mod node;
mod parser;
mod types;

pub use node::{Node, NodeKind};
pub use parser::{match_heading, parse, split_sentences};
pub use types::{DEFAULT_TITLE, Document, Header, Paragraph, Section, Sentence};

/// Markdown file extensions accepted by the file collaborators.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "txt"];

/// Returns true if the file extension is one we treat as essay markdown.
pub fn is_markdown_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_markdown_extensions() {
        assert!(is_markdown_file(Path::new("essay.md")));
        assert!(is_markdown_file(Path::new("essay.MARKDOWN")));
        assert!(is_markdown_file(Path::new("notes.txt")));
        assert!(!is_markdown_file(Path::new("photo.png")));
        assert!(!is_markdown_file(Path::new("README")));
    }
}
