//! Structured model of a documentation page.
//!
//! A [`Document`] is built once per run by [`crate::parse`] and is read-only
//! afterwards. Rules inspect it through [`Node`] references.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::Scope;
use crate::utils::allowance::AllowDirective;

/// Info-string flag that requests line numbers on a code block.
pub const LINE_NUMBERS_FLAG: &str = "showLineNumbers";

/// A parsed documentation page.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path the document was loaded from (used for result locations).
    pub path: PathBuf,
    /// Leading metadata block.
    pub frontmatter: Frontmatter,
    /// Blocks between the front matter and the first heading.
    pub preamble: Vec<Block>,
    /// Top-level sections in source order.
    pub sections: Vec<Section>,
    /// Allow directives found in HTML comments.
    pub allowances: Vec<AllowDirective>,
}

impl Document {
    /// Returns all sections in pre-order (parents before children).
    #[must_use]
    pub fn sections_preorder(&self) -> Vec<&Section> {
        let mut out = Vec::new();
        for section in &self.sections {
            section.collect_preorder(&mut out);
        }
        out
    }

    /// Returns all code blocks in source order.
    #[must_use]
    pub fn code_blocks(&self) -> Vec<&CodeBlock> {
        let mut out: Vec<&CodeBlock> = self.preamble.iter().filter_map(Block::as_code).collect();
        for section in self.sections_preorder() {
            out.extend(section.code_blocks());
        }
        out
    }

    /// Returns true if the body has no headings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Front matter metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Line of the `title` key (1-indexed).
    pub title_line: usize,
    /// Line of the `description` key (1-indexed).
    pub description_line: usize,
    /// Any other keys, preserved as YAML values.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A heading together with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Heading level (1..=6).
    pub level: u8,
    /// Heading text, whitespace-normalized.
    pub title: String,
    /// Line of the heading (1-indexed).
    pub line: usize,
    /// Byte offset of the heading in the file.
    pub offset: usize,
    /// Byte length of the heading source.
    pub length: usize,
    /// Content blocks directly under this heading.
    pub blocks: Vec<Block>,
    /// Deeper headings nested under this one.
    pub children: Vec<Section>,
}

impl Section {
    /// Number of whitespace-separated words in the title.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.title.split_whitespace().count()
    }

    /// Code blocks directly under this heading.
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(Block::as_code)
    }

    /// Returns true if the section has neither content nor subsections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.children.is_empty()
    }

    fn collect_preorder<'a>(&'a self, out: &mut Vec<&'a Section>) {
        out.push(self);
        for child in &self.children {
            child.collect_preorder(out);
        }
    }
}

/// A body block.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Running text.
    Paragraph {
        /// Line the paragraph starts on.
        line: usize,
        /// Plain text content.
        text: String,
    },
    /// Fenced or indented code.
    Code(CodeBlock),
    /// A pipe table.
    Table {
        /// Line the table starts on.
        line: usize,
        /// Number of rows, header included.
        rows: usize,
    },
    /// A bulleted or numbered list.
    List {
        /// Line the list starts on.
        line: usize,
        /// Number of top-level items.
        items: usize,
    },
    /// Raw HTML or JSX.
    Html {
        /// Line the block starts on.
        line: usize,
        /// Raw markup.
        raw: String,
    },
}

impl Block {
    /// Returns the code block, if this is one.
    #[must_use]
    pub fn as_code(&self) -> Option<&CodeBlock> {
        match self {
            Self::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Line the block starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Paragraph { line, .. }
            | Self::Table { line, .. }
            | Self::List { line, .. }
            | Self::Html { line, .. } => *line,
            Self::Code(code) => code.line,
        }
    }
}

/// A code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag (first word of the info string).
    pub language: Option<String>,
    /// Remaining info-string words.
    pub meta: Vec<String>,
    /// Whether line numbers were requested.
    pub line_numbers: bool,
    /// Whether the block was fenced (as opposed to indented).
    pub fenced: bool,
    /// Number of content lines.
    pub line_count: usize,
    /// Raw content.
    pub text: String,
    /// Line of the opening fence (1-indexed).
    pub line: usize,
    /// Line of the first content line (1-indexed).
    pub content_line: usize,
    /// Byte offset of the block in the file.
    pub offset: usize,
    /// Byte offset of the first content byte in the file.
    pub content_offset: usize,
    /// Byte length of the block source.
    pub length: usize,
}

impl CodeBlock {
    /// Builds a code block from a fence info string and its content.
    #[must_use]
    pub fn from_info(info: &str, text: String, fenced: bool) -> Self {
        let mut words = info.split_whitespace().map(String::from);
        let language = words.next();
        let meta: Vec<String> = words.collect();
        let line_numbers = meta.iter().any(|m| m == LINE_NUMBERS_FLAG);
        let line_count = text.lines().count();
        Self {
            language,
            meta,
            line_numbers,
            fenced,
            line_count,
            text,
            line: 0,
            content_line: 0,
            offset: 0,
            content_offset: 0,
            length: 0,
        }
    }

    /// Returns true if the language tag is one of `languages` (case-insensitive).
    #[must_use]
    pub fn language_is(&self, languages: &[&str]) -> bool {
        self.language
            .as_deref()
            .is_some_and(|l| languages.iter().any(|c| c.eq_ignore_ascii_case(l)))
    }
}

/// A reference to a document node a rule can inspect.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// The whole document.
    Document(&'a Document),
    /// A section.
    Section(&'a Section),
    /// A code block.
    CodeBlock(&'a CodeBlock),
}

impl Node<'_> {
    /// Scope this node belongs to.
    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            Self::Document(_) => Scope::Document,
            Self::Section(_) => Scope::Section,
            Self::CodeBlock(_) => Scope::CodeBlock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(level: u8, title: &str, children: Vec<Section>) -> Section {
        Section {
            level,
            title: title.to_string(),
            line: 1,
            offset: 0,
            length: 0,
            blocks: Vec::new(),
            children,
        }
    }

    #[test]
    fn info_string_splits_language_and_meta() {
        let block = CodeBlock::from_info("tsx showLineNumbers title=demo", "a\nb\n".into(), true);
        assert_eq!(block.language.as_deref(), Some("tsx"));
        assert_eq!(block.meta, vec!["showLineNumbers", "title=demo"]);
        assert!(block.line_numbers);
        assert_eq!(block.line_count, 2);
    }

    #[test]
    fn empty_info_string_has_no_language() {
        let block = CodeBlock::from_info("", "x".into(), true);
        assert!(block.language.is_none());
        assert!(!block.line_numbers);
        assert!(!block.language_is(&["tsx"]));
    }

    #[test]
    fn language_match_ignores_case() {
        let block = CodeBlock::from_info("TSX", String::new(), true);
        assert!(block.language_is(&["jsx", "tsx"]));
    }

    #[test]
    fn word_count_uses_whitespace() {
        assert_eq!(section(2, "Installation  Guide Details x", vec![]).word_count(), 4);
        assert_eq!(section(2, "", vec![]).word_count(), 0);
    }

    #[test]
    fn preorder_visits_parents_first() {
        let tree = section(
            2,
            "a",
            vec![section(3, "b", vec![section(4, "c", vec![])]), section(3, "d", vec![])],
        );
        let mut out = Vec::new();
        tree.collect_preorder(&mut out);
        let titles: Vec<&str> = out.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d"]);
    }
}
