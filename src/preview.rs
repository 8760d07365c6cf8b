//! Presentation projection for the preview pane.
//!
//! The render tree mirrors the document one-to-one and carries no state of
//! its own. [`render_plain`] turns it into terminal text.

use serde::Serialize;

use crate::document::{Document, Node, NodeKind};

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    /// The document title, shown as a level-1 heading
    Title { text: String },
    /// A section heading tagged with its level
    Heading { level: u8, text: String },
    /// Document, section or paragraph wrapper
    Container {
        kind: NodeKind,
        children: Vec<RenderNode>,
    },
    /// A sentence rendered inline, followed by a space
    Inline { text: String },
}

impl RenderNode {
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }
}

/// Build the render tree for a whole document.
pub fn presentation_tree(doc: &Document) -> RenderNode {
    project(Node::Document(doc))
}

/// Project any node of the document tree.
pub fn project(node: Node<'_>) -> RenderNode {
    match node {
        Node::Document(doc) => {
            let mut children = vec![RenderNode::Title {
                text: doc.title.clone(),
            }];
            children.extend(node.children().into_iter().map(project));
            RenderNode::Container {
                kind: NodeKind::Document,
                children,
            }
        }
        Node::Section(_) | Node::Paragraph(_) => RenderNode::Container {
            kind: node.kind(),
            children: node.children().into_iter().map(project).collect(),
        },
        Node::Header(header) => RenderNode::Heading {
            level: header.level,
            text: header.text.clone(),
        },
        Node::Sentence(sentence) => RenderNode::Inline {
            text: format!("{} ", sentence.text),
        },
    }
}

/// Render a tree as plain text with blocks separated by blank lines.
pub fn render_plain(node: &RenderNode) -> String {
    let mut blocks = Vec::new();
    collect_blocks(node, &mut blocks);
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn collect_blocks(node: &RenderNode, blocks: &mut Vec<String>) {
    match node {
        RenderNode::Title { text } => blocks.push(format!("# {text}")),
        RenderNode::Heading { level, text } => {
            blocks.push(format!("{} {text}", "#".repeat(usize::from(*level))));
        }
        RenderNode::Container {
            kind: NodeKind::Paragraph,
            children,
        } => {
            let line: String = children
                .iter()
                .filter_map(|child| match child {
                    RenderNode::Inline { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            blocks.push(line.trim_end().to_string());
        }
        RenderNode::Container { children, .. } => {
            for child in children {
                collect_blocks(child, blocks);
            }
        }
        RenderNode::Inline { text } => blocks.push(text.trim_end().to_string()),
    }
}
