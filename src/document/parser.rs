//! Markdown parsing into the essay model.
//!
//! Only ATX headings, blank-line paragraph breaks and sentence-ending
//! punctuation are recognised. Every other markdown construct is treated as
//! plain sentence text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Document, Header, Paragraph, Section, Sentence};
use crate::error::HeadingError;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

/// Parse markdown source into a Document.
///
/// # Example
///
/// ```
/// use essayist::document::parse;
///
/// let doc = parse("# Sleep\n\n## Why\n\nWe sleep. A lot.");
/// assert_eq!(doc.title, "Sleep");
/// assert_eq!(doc.sections[0].paragraphs[0].sentences.len(), 2);
/// ```
pub fn parse(source: &str) -> Document {
    Document::parse(source)
}

/// Match an ATX heading line, returning its level and trimmed text.
///
/// Surrounding whitespace on the line is ignored. A heading whose text is
/// empty after trimming does not count.
pub fn match_heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING.captures(line.trim())?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    let text = caps.get(2)?.as_str().trim();
    if text.is_empty() {
        return None;
    }
    Some((level, text))
}

/// Split text into sentences.
///
/// A sentence ends after a run of `.`, `!` or `?` that is followed by
/// whitespace or the end of the text. Whatever follows the last boundary is
/// kept as a final sentence, so no text is dropped. Empty candidates are
/// discarded.
pub fn split_sentences(raw: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = raw.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_terminator(ch) {
            continue;
        }
        let mut end = i + ch.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }
        if chars.peek().is_none_or(|&(_, next)| next.is_whitespace()) {
            push_sentence(&mut sentences, &raw[start..end]);
            start = end;
        }
    }
    push_sentence(&mut sentences, &raw[start..]);

    sentences
}

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_sentence(sentences: &mut Vec<Sentence>, candidate: &str) {
    let text = candidate.trim();
    if !text.is_empty() {
        sentences.push(Sentence::new(text));
    }
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

impl Sentence {
    pub fn parse(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Paragraph {
    /// Parse raw paragraph text into sentences.
    pub fn parse(id: usize, raw: &str) -> Self {
        Self::with_sentences(id, split_sentences(raw))
    }
}

impl Header {
    /// Parse a heading line such as `## Methods`.
    ///
    /// # Errors
    /// Returns [`HeadingError::NotAHeading`] if `raw` is not an ATX heading.
    /// Callers are expected to have checked with [`match_heading`] first.
    pub fn parse(raw: &str) -> Result<Self, HeadingError> {
        match_heading(raw)
            .map(|(level, text)| Self::new(text, level))
            .ok_or_else(|| HeadingError::NotAHeading(raw.to_string()))
    }
}

impl Section {
    /// Parse the body lines that follow a heading.
    ///
    /// Consecutive non-blank lines form one paragraph; blank lines close it.
    /// Line breaks inside a paragraph are kept within its sentences, so
    /// serializing never merges two lines into something that reads as a
    /// heading. If the first line is itself a heading it
    /// replaces `header` instead of starting a paragraph.
    pub fn parse<S: AsRef<str>>(id: usize, header: Header, lines: &[S]) -> Self {
        let mut section = Self::new(id, header);
        let mut buffer: Vec<&str> = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let trimmed = strip_cr(line.as_ref()).trim();
            if trimmed.is_empty() {
                section.close_paragraph(&mut buffer);
                continue;
            }
            if i == 0
                && let Ok(header) = Header::parse(trimmed)
            {
                section.header = header;
                continue;
            }
            buffer.push(trimmed);
        }
        section.close_paragraph(&mut buffer);

        section
    }

    fn close_paragraph(&mut self, buffer: &mut Vec<&str>) {
        if buffer.is_empty() {
            return;
        }
        let paragraph = Paragraph::parse(self.paragraphs.len(), &buffer.join("\n"));
        buffer.clear();
        if !paragraph.is_empty() {
            self.paragraphs.push(paragraph);
        }
    }
}

impl Document {
    /// Parse markdown text into a fresh document.
    ///
    /// A level-1 heading sets the title (the last one wins) and closes any
    /// open section. Deeper headings open a section that collects the lines
    /// up to the next heading. Text outside any section is discarded, as is a
    /// heading with no lines after it.
    pub fn parse(text: &str) -> Self {
        let mut doc = Self::new();
        let mut open: Option<Header> = None;
        let mut body: Vec<&str> = Vec::new();

        for line in text.split('\n').map(strip_cr) {
            let Some((level, heading)) = match_heading(line) else {
                if open.is_some() {
                    body.push(line);
                }
                continue;
            };

            doc.close_section(open.take(), &body);
            body.clear();
            if level == 1 {
                doc.title = heading.to_string();
            } else {
                open = Some(Header::new(heading, level));
            }
        }
        doc.close_section(open.take(), &body);

        tracing::debug!(
            title = %doc.title,
            sections = doc.sections.len(),
            paragraphs = doc.paragraph_count(),
            "parsed document"
        );
        doc
    }

    fn close_section(&mut self, header: Option<Header>, body: &[&str]) {
        let Some(header) = header else { return };
        if body.is_empty() {
            return;
        }
        let section = Section::parse(self.sections.len(), header, body);
        self.sections.push(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");
        assert_eq!(doc.title, "Untitled");
        assert!(doc.sections.is_empty());
        assert_eq!(doc.to_markdown(), "# Untitled\n\n");
    }

    #[test]
    fn test_parse_whitespace_only() {
        let doc = parse("   \n\n\t\n");
        assert_eq!(doc.title, "Untitled");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_split_three_sentences() {
        let sentences = split_sentences("One. Two. Three");
        assert_eq!(texts(&sentences), vec!["One.", "Two.", "Three"]);
    }

    #[test]
    fn test_split_without_punctuation_is_one_sentence() {
        let sentences = split_sentences("no punctuation here");
        assert_eq!(texts(&sentences), vec!["no punctuation here"]);
    }

    #[test]
    fn test_split_keeps_inner_dots() {
        let sentences = split_sentences("Version 2.5 is out. Try it!");
        assert_eq!(texts(&sentences), vec!["Version 2.5 is out.", "Try it!"]);
    }

    #[test]
    fn test_split_terminator_runs() {
        let sentences = split_sentences("Wait!! What?! Fine...");
        assert_eq!(texts(&sentences), vec!["Wait!!", "What?!", "Fine..."]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_lone_punctuation() {
        let sentences = split_sentences("Hello. . World.");
        assert_eq!(texts(&sentences), vec!["Hello.", ".", "World."]);
    }

    #[test]
    fn test_sentence_parse_trims() {
        assert_eq!(Sentence::parse("  Hi there.\t").text, "Hi there.");
    }

    #[test]
    fn test_header_parse_levels() {
        let header = Header::parse("### Methods ").unwrap();
        assert_eq!(header.level, 3);
        assert_eq!(header.text, "Methods");
    }

    #[test]
    fn test_header_parse_rejects_plain_text() {
        assert_eq!(
            Header::parse("Methods"),
            Err(HeadingError::NotAHeading("Methods".to_string()))
        );
        assert!(Header::parse("#Methods").is_err());
        assert!(Header::parse("####### Seven").is_err());
    }

    #[test]
    fn test_match_heading_requires_text() {
        assert_eq!(match_heading("##   "), None);
        assert_eq!(match_heading("## Title"), Some((2, "Title")));
    }

    #[test]
    fn test_level_two_heading_opens_section() {
        let doc = parse("## Title\n\nBody.");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].header.level, 2);
        assert_eq!(doc.sections[0].header.text, "Title");
    }

    #[test]
    fn test_level_one_heading_sets_title_only() {
        let doc = parse("# Title\n\nIgnored preamble.");
        assert_eq!(doc.title, "Title");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_last_level_one_heading_wins() {
        let doc = parse("# A\n\n# B\n\nBody");
        assert_eq!(doc.title, "B");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_level_one_heading_closes_open_section() {
        let doc = parse("# A\n\n## One\n\nFirst.\n\n# B\n\nStray text.\n\n## Two\n\nSecond.");
        assert_eq!(doc.title, "B");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].body(), "First.");
        assert_eq!(doc.sections[1].body(), "Second.");
        assert_eq!(doc.sections[1].id, 1);
    }

    #[test]
    fn test_blank_line_separates_paragraphs() {
        let doc = parse("## H\nA.\n\nB.");
        let section = &doc.sections[0];
        assert_eq!(section.paragraphs.len(), 2);
        assert_eq!(section.paragraphs[0].sentences.len(), 1);
        assert_eq!(section.paragraphs[1].sentences.len(), 1);
        assert_eq!(section.paragraphs[0].id, 0);
        assert_eq!(section.paragraphs[1].id, 1);
    }

    #[test]
    fn test_soft_line_breaks_stay_in_paragraph() {
        let doc = parse("## H\nFirst line\n  continues here. Second\nsentence.\nThird.");
        let paragraph = &doc.sections[0].paragraphs[0];
        assert_eq!(
            texts(&paragraph.sentences),
            vec!["First line\ncontinues here.", "Second\nsentence.", "Third."]
        );
    }

    #[test]
    fn test_bare_hashes_never_become_heading() {
        let first = parse("## H\n##\nfoo").to_markdown();
        assert_eq!(first, "# Untitled\n\n## H\n\n##\nfoo");
        assert_eq!(parse(&first).to_markdown(), first);
    }

    #[test]
    fn test_heading_without_body_is_dropped() {
        let doc = parse("## Empty\n## Full\nText.");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].header.text, "Full");
        assert_eq!(doc.sections[0].id, 0);
    }

    #[test]
    fn test_heading_with_blank_body_is_kept() {
        let doc = parse("## Empty\n\n## Full\nText.");
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].paragraphs.is_empty());
    }

    #[test]
    fn test_text_before_first_section_is_discarded() {
        let doc = parse("Intro text.\n\n## One\n\nKept.");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].body(), "Kept.");
    }

    #[test]
    fn test_crlf_input() {
        let doc = parse("# T\r\n\r\n## H\r\n\r\nA. B.\r\n\r\nC.\r\n");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.sections[0].header.text, "H");
        assert_eq!(doc.sections[0].paragraphs.len(), 2);
    }

    #[test]
    fn test_section_ids_follow_order() {
        let doc = parse("## A\nx\n### B\ny\n#### C\nz");
        let ids: Vec<_> = doc.sections.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let levels: Vec<_> = doc.sections.iter().map(|s| s.header.level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
    }

    #[test]
    fn test_section_parse_first_line_heading() {
        let section = Section::parse(0, Header::new("Old", 2), &["### New", "Body."]);
        assert_eq!(section.header, Header::new("New", 3));
        assert_eq!(section.paragraphs.len(), 1);
    }

    #[test]
    fn test_section_parse_later_heading_is_text() {
        let section = Section::parse(0, Header::new("H", 2), &["Body.", "### Not a header"]);
        assert_eq!(section.header.text, "H");
        assert_eq!(section.body(), "Body. ### Not a header");
    }

    #[test]
    fn test_round_trip_is_stable() {
        let source = "Preamble\n# Essay\n\n## One\nA. B\nC!\n\n\n\nD?\n### Two\n\n## Three\n";
        let first = parse(source).to_markdown();
        let second = parse(&first).to_markdown();
        assert_eq!(first, second);
    }
}
