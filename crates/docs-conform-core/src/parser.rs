//! Document model parser: raw page text to a [`Document`] tree.
//!
//! The page must start with a `---` delimited YAML front matter block that
//! provides `title` and `description`. The body is CommonMark (with tables),
//! parsed with `pulldown-cmark`. Headings form a section tree; the front
//! matter title counts as the implicit level-1 heading, so a body heading
//! may be at most one level deeper than the heading before it.

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser as CmarkParser, Tag, TagEnd};
use tracing::trace;

use crate::document::{Block, CodeBlock, Document, Frontmatter, Section};
use crate::utils::allowance::{parse_allow_directive, AllowDirective};

/// Front matter delimiter line.
const FRONTMATTER_DELIM: &str = "---";

/// Level of the implicit heading formed by the front matter title.
const TITLE_LEVEL: u8 = 1;

/// Structural parse failure; fatal to one document's run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum MalformedDocumentError {
    /// The page does not start with a front matter block.
    #[error("{}: missing front matter (expected a leading `---` block)", .path.display())]
    #[diagnostic(code(docs_conform::missing_frontmatter))]
    MissingFrontmatter {
        /// Offending file.
        path: PathBuf,
    },

    /// The file could not be read or is not valid UTF-8.
    #[error("{}: cannot read document: {message}", .path.display())]
    #[diagnostic(code(docs_conform::unreadable))]
    Unreadable {
        /// Offending file.
        path: PathBuf,
        /// IO or decoding error.
        message: String,
    },

    /// The front matter block has no closing delimiter.
    #[error("{}: front matter is not closed by a `---` line", .path.display())]
    #[diagnostic(code(docs_conform::unterminated_frontmatter))]
    UnterminatedFrontmatter {
        /// Offending file.
        path: PathBuf,
    },

    /// The front matter is not a valid YAML mapping.
    #[error("{}: invalid front matter: {message}", .path.display())]
    #[diagnostic(code(docs_conform::invalid_frontmatter))]
    InvalidFrontmatter {
        /// Offending file.
        path: PathBuf,
        /// YAML error or shape problem.
        message: String,
    },

    /// A required front matter key is absent or empty.
    #[error("{}: front matter is missing required key `{key}`", .path.display())]
    #[diagnostic(
        code(docs_conform::missing_key),
        help("every page needs a non-empty `title` and `description`")
    )]
    MissingKey {
        /// Offending file.
        path: PathBuf,
        /// Name of the missing key.
        key: &'static str,
    },

    /// A heading is more than one level deeper than the previous heading.
    #[error(
        "{}:{line}: heading level skipped (H{previous} followed by H{found})",
        .path.display()
    )]
    #[diagnostic(
        code(docs_conform::skipped_heading_level),
        help("nest headings one level at a time; the page title counts as H1")
    )]
    SkippedHeadingLevel {
        /// Offending file.
        path: PathBuf,
        /// Line of the offending heading.
        line: usize,
        /// Level of the preceding heading.
        previous: u8,
        /// Level of the offending heading.
        found: u8,
    },
}

impl MalformedDocumentError {
    /// Returns the path of the malformed document.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::MissingFrontmatter { path }
            | Self::Unreadable { path, .. }
            | Self::UnterminatedFrontmatter { path }
            | Self::InvalidFrontmatter { path, .. }
            | Self::MissingKey { path, .. }
            | Self::SkippedHeadingLevel { path, .. } => path,
        }
    }
}

/// Parses raw page text into a [`Document`].
///
/// # Errors
///
/// Returns [`MalformedDocumentError`] when the front matter is missing,
/// unterminated, invalid or lacks `title`/`description`, or when a heading
/// level is skipped.
pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Document, MalformedDocumentError> {
    let path = path.into();
    let bom = if text.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };

    let split = split_frontmatter(&path, &text[bom..])?;
    let frontmatter = parse_frontmatter(&path, split.raw_frontmatter)?;

    let index = LineIndex::new(text);
    let mut body = BodyParser::new(&path, &index, bom + split.body_offset);
    body.run(split.body)?;

    Ok(body.finish(frontmatter))
}

struct SplitSource<'a> {
    raw_frontmatter: &'a str,
    body: &'a str,
    body_offset: usize,
}

fn split_frontmatter<'a>(path: &Path, text: &'a str) -> Result<SplitSource<'a>, MalformedDocumentError> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next().unwrap_or_default();
    if first.trim_end() != FRONTMATTER_DELIM {
        return Err(MalformedDocumentError::MissingFrontmatter {
            path: path.to_path_buf(),
        });
    }

    let start = first.len();
    let mut pos = start;
    for line in lines {
        if line.trim_end() == FRONTMATTER_DELIM {
            let body_offset = pos + line.len();
            return Ok(SplitSource {
                raw_frontmatter: &text[start..pos],
                body: &text[body_offset..],
                body_offset,
            });
        }
        pos += line.len();
    }

    Err(MalformedDocumentError::UnterminatedFrontmatter {
        path: path.to_path_buf(),
    })
}

fn parse_frontmatter(path: &Path, raw: &str) -> Result<Frontmatter, MalformedDocumentError> {
    let invalid = |message: String| MalformedDocumentError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message,
    };

    let mapping = if raw.trim().is_empty() {
        serde_yaml::Mapping::new()
    } else {
        match serde_yaml::from_str::<serde_yaml::Value>(raw) {
            Ok(serde_yaml::Value::Mapping(m)) => m,
            Ok(serde_yaml::Value::Null) => serde_yaml::Mapping::new(),
            Ok(_) => return Err(invalid("expected a mapping of keys to values".to_string())),
            Err(e) => return Err(invalid(e.to_string())),
        }
    };

    let mut title = None;
    let mut description = None;
    let mut extra = BTreeMap::new();

    for (key, value) in mapping {
        let Some(key) = key.as_str().map(str::to_string) else {
            return Err(invalid(format!("non-string key `{key:?}`")));
        };
        match key.as_str() {
            "title" => title = Some(required_string(path, "title", &value)?),
            "description" => description = Some(required_string(path, "description", &value)?),
            _ => {
                extra.insert(key, value);
            }
        }
    }

    let missing = |key: &'static str| MalformedDocumentError::MissingKey {
        path: path.to_path_buf(),
        key,
    };
    let title = title.ok_or_else(|| missing("title"))?;
    let description = description.ok_or_else(|| missing("description"))?;

    Ok(Frontmatter {
        title,
        description,
        title_line: key_line(raw, "title"),
        description_line: key_line(raw, "description"),
        extra,
    })
}

fn required_string(
    path: &Path,
    key: &'static str,
    value: &serde_yaml::Value,
) -> Result<String, MalformedDocumentError> {
    match value {
        serde_yaml::Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        serde_yaml::Value::String(_) | serde_yaml::Value::Null => {
            Err(MalformedDocumentError::MissingKey {
                path: path.to_path_buf(),
                key,
            })
        }
        _ => Err(MalformedDocumentError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: format!("`{key}` must be a string"),
        }),
    }
}

/// Line of a top-level key in the front matter (the opening `---` is line 1).
fn key_line(raw: &str, key: &str) -> usize {
    raw.lines()
        .position(|l| {
            l.strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map_or(1, |i| i + 2)
}

/// Maps byte offsets to 1-indexed line and column numbers.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&s| s <= offset);
        let col = offset - self.starts[line.saturating_sub(1)] + 1;
        (line, col)
    }

    fn line(&self, offset: usize) -> usize {
        self.line_col(offset).0
    }

    fn next_line_start(&self, offset: usize) -> usize {
        let line = self.line(offset);
        self.starts.get(line).copied().unwrap_or(offset)
    }
}

struct HeadingCapture {
    level: u8,
    text: String,
    range: Range<usize>,
}

struct CodeCapture {
    info: String,
    fenced: bool,
    text: String,
    range: Range<usize>,
}

struct BodyParser<'a> {
    path: &'a Path,
    index: &'a LineIndex,
    base: usize,
    stack: Vec<Section>,
    sections: Vec<Section>,
    preamble: Vec<Block>,
    allowances: Vec<AllowDirective>,
    pending_allow: Vec<AllowDirective>,
    previous_level: u8,
    container_depth: usize,
    heading: Option<HeadingCapture>,
    paragraph: Option<(usize, String)>,
    code: Option<CodeCapture>,
    html: Option<(usize, String)>,
    list: Option<(usize, usize)>,
    table: Option<(usize, usize)>,
}

impl<'a> BodyParser<'a> {
    fn new(path: &'a Path, index: &'a LineIndex, base: usize) -> Self {
        Self {
            path,
            index,
            base,
            stack: Vec::new(),
            sections: Vec::new(),
            preamble: Vec::new(),
            allowances: Vec::new(),
            pending_allow: Vec::new(),
            previous_level: TITLE_LEVEL,
            container_depth: 0,
            heading: None,
            paragraph: None,
            code: None,
            html: None,
            list: None,
            table: None,
        }
    }

    fn run(&mut self, body: &str) -> Result<(), MalformedDocumentError> {
        let parser = CmarkParser::new_ext(body, Options::ENABLE_TABLES);
        for (event, range) in parser.into_offset_iter() {
            let range = (range.start + self.base)..(range.end + self.base);
            self.handle(event, range)?;
        }
        Ok(())
    }

    fn handle(&mut self, event: Event<'_>, range: Range<usize>) -> Result<(), MalformedDocumentError> {
        let line = self.index.line(range.start);
        match event {
            // Headings inside quotes, lists and footnotes are content, not outline
            Event::Start(Tag::Heading { .. }) if self.container_depth > 0 => {}
            Event::Start(Tag::Heading { level, .. }) => {
                self.bind_pending(line);
                self.heading = Some(HeadingCapture {
                    level: heading_level_to_u8(level),
                    text: String::new(),
                    range,
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = self.heading.take() {
                    self.open_section(heading)?;
                }
            }
            Event::Start(Tag::Paragraph) => {
                if self.container_depth == 0 && self.heading.is_none() {
                    self.bind_pending(line);
                    self.paragraph = Some((line, String::new()));
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if self.container_depth == 0 {
                    if let Some((line, text)) = self.paragraph.take() {
                        self.push_block(Block::Paragraph { line, text });
                    }
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                self.bind_pending(line);
                let (info, fenced) = match kind {
                    CodeBlockKind::Fenced(info) => (info.to_string(), true),
                    CodeBlockKind::Indented => (String::new(), false),
                };
                self.code = Some(CodeCapture {
                    info,
                    fenced,
                    text: String::new(),
                    range,
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(capture) = self.code.take() {
                    let block = self.code_block(capture);
                    self.push_block(Block::Code(block));
                }
            }
            Event::Start(Tag::List(_)) => {
                if self.container_depth == 0 {
                    self.bind_pending(line);
                    self.list = Some((line, 0));
                }
                self.container_depth += 1;
            }
            Event::Start(Tag::Item) => {
                if self.container_depth == 1 {
                    if let Some((_, items)) = self.list.as_mut() {
                        *items += 1;
                    }
                }
            }
            Event::End(TagEnd::List(_)) => {
                self.container_depth = self.container_depth.saturating_sub(1);
                if self.container_depth == 0 {
                    if let Some((line, items)) = self.list.take() {
                        self.push_block(Block::List { line, items });
                    }
                }
            }
            Event::Start(Tag::Table(_)) => {
                if self.container_depth == 0 {
                    self.bind_pending(line);
                    self.table = Some((line, 0));
                }
                self.container_depth += 1;
            }
            Event::Start(Tag::TableHead | Tag::TableRow) => {
                if let Some((_, rows)) = self.table.as_mut() {
                    *rows += 1;
                }
            }
            Event::End(TagEnd::Table) => {
                self.container_depth = self.container_depth.saturating_sub(1);
                if self.container_depth == 0 {
                    if let Some((line, rows)) = self.table.take() {
                        self.push_block(Block::Table { line, rows });
                    }
                }
            }
            Event::Start(Tag::BlockQuote(_) | Tag::FootnoteDefinition(_)) => {
                self.container_depth += 1;
            }
            Event::End(TagEnd::BlockQuote(_) | TagEnd::FootnoteDefinition) => {
                self.container_depth = self.container_depth.saturating_sub(1);
            }
            Event::Start(Tag::HtmlBlock) => {
                self.html = Some((line, String::new()));
            }
            Event::Html(raw) => {
                if let Some((_, buf)) = self.html.as_mut() {
                    buf.push_str(&raw);
                }
            }
            Event::End(TagEnd::HtmlBlock) => {
                if let Some((line, raw)) = self.html.take() {
                    self.finish_html(line, raw);
                }
            }
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            _ => {}
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let Some(heading) = self.heading.as_mut() {
            heading.text.push_str(text);
        } else if let Some(code) = self.code.as_mut() {
            code.text.push_str(text);
        } else if let Some((_, buf)) = self.paragraph.as_mut() {
            buf.push_str(text);
        }
    }

    fn finish_html(&mut self, line: usize, raw: String) {
        if let Some((rules, reason)) = parse_allow_directive(&raw) {
            trace!("allow directive at {}:{}", self.path.display(), line);
            self.pending_allow.push(AllowDirective {
                line: 0,
                rules,
                reason,
            });
        } else if self.container_depth == 0 {
            self.bind_pending(line);
            self.push_block(Block::Html { line, raw });
        }
    }

    /// Binds directives seen since the last node to the node starting at `line`.
    fn bind_pending(&mut self, line: usize) {
        for mut directive in self.pending_allow.drain(..) {
            directive.line = line;
            self.allowances.push(directive);
        }
    }

    fn code_block(&self, capture: CodeCapture) -> CodeBlock {
        let mut block = CodeBlock::from_info(&capture.info, capture.text, capture.fenced);
        let content_offset = if capture.fenced {
            self.index.next_line_start(capture.range.start)
        } else {
            capture.range.start
        };
        block.line = self.index.line(capture.range.start);
        block.content_line = self.index.line(content_offset);
        block.offset = capture.range.start;
        block.content_offset = content_offset;
        block.length = capture.range.len();
        block
    }

    fn open_section(&mut self, heading: HeadingCapture) -> Result<(), MalformedDocumentError> {
        let line = self.index.line(heading.range.start);
        if heading.level > self.previous_level + 1 {
            return Err(MalformedDocumentError::SkippedHeadingLevel {
                path: self.path.to_path_buf(),
                line,
                previous: self.previous_level,
                found: heading.level,
            });
        }
        self.previous_level = heading.level;
        self.close_sections_to_level(heading.level);

        self.stack.push(Section {
            level: heading.level,
            title: normalize_title(&heading.text),
            line,
            offset: heading.range.start,
            length: heading.range.len(),
            blocks: Vec::new(),
            children: Vec::new(),
        });
        Ok(())
    }

    /// Closes open sections at the same or a deeper level.
    fn close_sections_to_level(&mut self, level: u8) {
        while self.stack.last().is_some_and(|s| s.level >= level) {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(section) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(section),
                None => self.sections.push(section),
            }
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(section) => section.blocks.push(block),
            None => self.preamble.push(block),
        }
    }

    fn finish(mut self, frontmatter: Frontmatter) -> Document {
        while !self.stack.is_empty() {
            self.close_top();
        }
        Document {
            path: self.path.to_path_buf(),
            frontmatter,
            preamble: self.preamble,
            sections: self.sections,
            allowances: self.allowances,
        }
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn normalize_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
