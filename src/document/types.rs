//! Core document types.

use serde::{Deserialize, Serialize};

use super::node::Node;

/// Title used until a level-1 heading is seen.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Smallest unit of text, split on terminal punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text with surrounding whitespace removed
    pub text: String,
}

impl Sentence {
    /// Create a sentence, trimming surrounding whitespace.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
        }
    }

    pub fn to_markdown(&self) -> String {
        Node::Sentence(self).to_markdown()
    }
}

/// A blank-line-delimited block of sentences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Position within the owning section; reassigned on every parse
    pub id: usize,
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Create an empty paragraph with the given positional id.
    pub const fn new(id: usize) -> Self {
        Self {
            id,
            sentences: Vec::new(),
        }
    }

    /// Create a paragraph from already split sentences.
    pub fn with_sentences(id: usize, sentences: Vec<Sentence>) -> Self {
        Self { id, sentences }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn to_markdown(&self) -> String {
        Node::Paragraph(self).to_markdown()
    }
}

/// An ATX heading: level 1-6 and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Heading text without the `#` markers
    pub text: String,
    /// Heading level (1-6)
    pub level: u8,
}

impl Header {
    /// Create a header. Levels outside 1-6 are clamped into range.
    pub fn new(text: &str, level: u8) -> Self {
        Self {
            text: text.trim().to_string(),
            level: level.clamp(1, 6),
        }
    }

    pub fn to_markdown(&self) -> String {
        Node::Header(self).to_markdown()
    }
}

/// A heading (level 2-6 in parsed documents) and the paragraphs under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Position within the document; reassigned on every parse
    pub id: usize,
    pub header: Header,
    pub paragraphs: Vec<Paragraph>,
}

impl Section {
    pub const fn new(id: usize, header: Header) -> Self {
        Self {
            id,
            header,
            paragraphs: Vec::new(),
        }
    }

    /// Paragraph text joined by blank lines, without the heading.
    pub fn body(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::to_markdown)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn to_markdown(&self) -> String {
        Node::Section(self).to_markdown()
    }
}

/// The full essay: a title and its ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document titled "Untitled".
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            sections: Vec::new(),
        }
    }

    /// Create a document with the given title and no sections.
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            sections: Vec::new(),
        }
    }

    /// Look up a section by its positional id.
    pub fn section(&self, id: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs.len()).sum()
    }

    pub fn sentence_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.paragraphs)
            .map(|p| p.sentences.len())
            .sum()
    }

    /// Serialize back to markdown.
    pub fn to_markdown(&self) -> String {
        Node::Document(self).to_markdown()
    }
}
