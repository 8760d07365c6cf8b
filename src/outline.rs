//! Outline projection for the sidebar.
//!
//! The outline is a flat list of section headings. Levels are relative to the
//! document title, so a `##` heading sits at outline level 1.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::document::{Document, Section};

/// One heading in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    /// Section id; only valid for the document it was projected from
    pub id: usize,
    /// Header level minus one
    pub level: u8,
    pub title: String,
    /// Section body, shown when the entry is expanded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl OutlineEntry {
    fn from_section(section: &Section) -> Self {
        let content = if section.paragraphs.is_empty() {
            None
        } else {
            Some(section.body())
        };
        Self {
            id: section.id,
            level: section.header.level.saturating_sub(1),
            title: section.header.text.clone(),
            content,
        }
    }

    /// Indentation depth for display; the shallowest heading is 0.
    pub const fn indent(&self) -> usize {
        self.level.saturating_sub(1) as usize
    }
}

/// Project a document onto its outline.
pub fn outline(doc: &Document) -> Vec<OutlineEntry> {
    doc.sections.iter().map(OutlineEntry::from_section).collect()
}

/// Which outline entries are expanded.
///
/// Keyed by section id, so it must be reset whenever the document is
/// replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineState {
    expanded: BTreeSet<usize>,
}

impl OutlineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expansion of `id`. Returns the new state.
    pub fn toggle(&mut self, id: usize) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: usize) -> bool {
        self.expanded.contains(&id)
    }

    pub fn reset(&mut self) {
        self.expanded.clear();
    }
}

/// Render the outline as indented text, expanding entries in `state`.
pub fn render_outline(entries: &[OutlineEntry], state: &OutlineState) -> String {
    let mut out = String::new();
    for entry in entries {
        let indent = "  ".repeat(entry.indent());
        let marker = match (&entry.content, state.is_expanded(entry.id)) {
            (None, _) => ' ',
            (Some(_), false) => '▸',
            (Some(_), true) => '▾',
        };
        out.push_str(&format!("{indent}{marker} {}\n", entry.title));
        if let Some(content) = entry.content.as_ref().filter(|_| state.is_expanded(entry.id)) {
            for line in content.lines() {
                out.push_str(&format!("{indent}    {line}\n"));
            }
        }
    }
    out
}
