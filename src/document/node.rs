//! Closed view over every node kind in a document tree.
//!
//! Serialization lives here as a single match so that adding a node kind
//! forces every projection to handle it.

use serde::Serialize;

use super::types::{Document, Header, Paragraph, Section, Sentence};

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Section,
    Header,
    Paragraph,
    Sentence,
}

/// A borrowed node of the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Document(&'a Document),
    Section(&'a Section),
    Header(&'a Header),
    Paragraph(&'a Paragraph),
    Sentence(&'a Sentence),
}

impl<'a> Node<'a> {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Document(_) => NodeKind::Document,
            Self::Section(_) => NodeKind::Section,
            Self::Header(_) => NodeKind::Header,
            Self::Paragraph(_) => NodeKind::Paragraph,
            Self::Sentence(_) => NodeKind::Sentence,
        }
    }

    /// Direct children in document order.
    ///
    /// A section's header comes before its paragraphs. The document title is
    /// a plain string and is not a child node.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Self::Document(doc) => doc.sections.iter().map(Node::Section).collect(),
            Self::Section(section) => std::iter::once(Node::Header(&section.header))
                .chain(section.paragraphs.iter().map(Node::Paragraph))
                .collect(),
            Self::Paragraph(paragraph) => {
                paragraph.sentences.iter().map(Node::Sentence).collect()
            }
            Self::Header(_) | Self::Sentence(_) => Vec::new(),
        }
    }

    /// Serialize this node to markdown.
    pub fn to_markdown(&self) -> String {
        match *self {
            Self::Sentence(sentence) => sentence.text.clone(),
            Self::Paragraph(paragraph) => join(
                paragraph.sentences.iter().map(Node::Sentence),
                " ",
            ),
            Self::Header(header) => {
                format!("{} {}", "#".repeat(usize::from(header.level)), header.text)
            }
            Self::Section(section) => format!(
                "{}\n\n{}",
                Node::Header(&section.header).to_markdown(),
                join(section.paragraphs.iter().map(Node::Paragraph), "\n\n")
            ),
            Self::Document(doc) => format!(
                "# {}\n\n{}",
                doc.title,
                join(doc.sections.iter().map(Node::Section), "\n\n")
            ),
        }
    }
}

fn join<'a>(nodes: impl Iterator<Item = Node<'a>>, sep: &str) -> String {
    nodes.map(|n| n.to_markdown()).collect::<Vec<_>>().join(sep)
}

impl<'a> From<&'a Document> for Node<'a> {
    fn from(doc: &'a Document) -> Self {
        Self::Document(doc)
    }
}

impl<'a> From<&'a Section> for Node<'a> {
    fn from(section: &'a Section) -> Self {
        Self::Section(section)
    }
}

impl<'a> From<&'a Paragraph> for Node<'a> {
    fn from(paragraph: &'a Paragraph) -> Self {
        Self::Paragraph(paragraph)
    }
}
