//! Context types for rule execution.

use std::path::Path;

use crate::document::{CodeBlock, Document, Section};
use crate::types::Location;

/// Context provided to rules while a document is evaluated.
///
/// Gives rules access to the whole document and the section enclosing the
/// node under inspection, plus helpers to build result locations.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The document being evaluated.
    pub document: &'a Document,
    /// Section enclosing the current node (`None` for the document node,
    /// top-level sections and preamble code blocks).
    pub section: Option<&'a Section>,
}

impl<'a> CheckContext<'a> {
    /// Creates a context for the document node.
    #[must_use]
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            section: None,
        }
    }

    /// Returns a copy of this context with the enclosing section set.
    #[must_use]
    pub fn within(self, section: Option<&'a Section>) -> Self {
        Self { section, ..self }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        &self.document.path
    }

    /// Location of a line in the document.
    #[must_use]
    pub fn location_at(&self, line: usize, column: usize) -> Location {
        Location::new(self.document.path.clone(), line, column)
    }

    /// Location of a section heading.
    #[must_use]
    pub fn section_location(&self, section: &Section) -> Location {
        self.location_at(section.line, 1)
            .with_span(section.offset, section.length)
    }

    /// Location of a code block's opening fence.
    #[must_use]
    pub fn code_location(&self, block: &CodeBlock) -> Location {
        self.location_at(block.line, 1)
            .with_span(block.offset, block.length)
    }

    /// Location of a span inside a code block's content.
    ///
    /// `line` is 0-indexed relative to the first content line; `offset` is
    /// relative to the first content byte.
    #[must_use]
    pub fn code_span_location(
        &self,
        block: &CodeBlock,
        line: usize,
        column: usize,
        offset: usize,
        length: usize,
    ) -> Location {
        self.location_at(block.content_line + line, column)
            .with_span(block.content_offset + offset, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn code_span_location_is_relative_to_content() {
        let source = "---\ntitle: T\ndescription: D\n---\n```tsx\nconst a = 1;\n<IconButton />\n```\n";
        let doc = parse("a.mdx", source).unwrap();
        let block = doc.code_blocks()[0];
        let ctx = CheckContext::new(&doc);

        let loc = ctx.code_span_location(block, 1, 1, 13, 14);
        assert_eq!(loc.line, 7);
        assert_eq!(&source[loc.offset..loc.offset + loc.length], "<IconButton />");

        let fence = ctx.code_location(block);
        assert_eq!(fence.line, 5);
        assert!(source[fence.offset..].starts_with("```tsx"));
    }

    #[test]
    fn within_sets_enclosing_section() {
        let doc = parse("a.md", "---\ntitle: T\ndescription: D\n---\n## A\n").unwrap();
        let ctx = CheckContext::new(&doc);
        assert!(ctx.section.is_none());
        let inner = ctx.within(doc.sections.first());
        assert_eq!(inner.section.map(|s| s.title.as_str()), Some("A"));
        assert_eq!(inner.path(), Path::new("a.md"));
    }
}
