//! Lightweight JSX element scanning for code-example rules.
//!
//! This is not a JSX parser: it finds opening tags of a given component
//! name and reads their attributes, which is all the accessibility rules
//! need. Braced expressions and quoted strings are skipped as opaque values.

/// An opening JSX tag found in a code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxElement {
    /// Component name (e.g., `IconButton`).
    pub name: String,
    /// Line within the code sample (0-indexed).
    pub line: usize,
    /// Column within that line (1-indexed).
    pub column: usize,
    /// Byte offset of `<` within the code sample.
    pub offset: usize,
    /// Byte length of the opening tag.
    pub length: usize,
    /// Attributes in source order.
    pub attributes: Vec<JsxAttribute>,
}

impl JsxElement {
    /// Returns the attribute named `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Returns true if the attribute is present (with or without a value).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns true if the element spreads props (`{...props}`).
    #[must_use]
    pub fn has_spread(&self) -> bool {
        self.attributes.iter().any(|a| a.name.starts_with("..."))
    }
}

/// A JSX attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttribute {
    /// Attribute name, or the spread expression for `{...props}`.
    pub name: String,
    /// Literal value with quotes removed; `None` for boolean attributes.
    pub value: Option<String>,
}

/// Finds all opening tags named `name` in `code`.
#[must_use]
pub fn find_elements(code: &str, name: &str) -> Vec<JsxElement> {
    let bytes = code.as_bytes();
    let mut elements = Vec::new();
    let mut search_from = 0;

    while let Some(rel) = code[search_from..].find('<') {
        let start = search_from + rel;
        search_from = start + 1;

        let name_end = start + 1 + name.len();
        if !code[start + 1..].starts_with(name) {
            continue;
        }
        match bytes.get(name_end) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
            _ => continue,
        }

        let (attributes, end) = read_attributes(code, name_end);
        let line = code[..start].matches('\n').count();
        let line_start = code[..start].rfind('\n').map_or(0, |i| i + 1);

        elements.push(JsxElement {
            name: name.to_string(),
            line,
            column: start - line_start + 1,
            offset: start,
            length: end - start,
            attributes,
        });
        search_from = end.max(search_from);
    }

    elements
}

/// Reads attributes from `pos` until the end of the opening tag.
///
/// Returns the attributes and the byte position just past the tag.
fn read_attributes(code: &str, mut pos: usize) -> (Vec<JsxAttribute>, usize) {
    let bytes = code.as_bytes();
    let mut attributes = Vec::new();

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let Some(&b) = bytes.get(pos) else {
            return (attributes, pos);
        };

        match b {
            b'>' => return (attributes, pos + 1),
            b'/' if bytes.get(pos + 1) == Some(&b'>') => return (attributes, pos + 2),
            b'{' => {
                let end = skip_braced(code, pos);
                attributes.push(JsxAttribute {
                    name: braced_inner(code, pos, end).to_string(),
                    value: None,
                });
                pos = end;
            }
            _ if is_name_byte(b) => {
                let name_start = pos;
                while pos < bytes.len() && is_name_byte(bytes[pos]) {
                    pos += 1;
                }
                let attr_name = code[name_start..pos].to_string();

                let mut look = pos;
                while look < bytes.len() && bytes[look].is_ascii_whitespace() {
                    look += 1;
                }
                if bytes.get(look) == Some(&b'=') {
                    look += 1;
                    while look < bytes.len() && bytes[look].is_ascii_whitespace() {
                        look += 1;
                    }
                    let (value, end) = read_value(code, look);
                    attributes.push(JsxAttribute {
                        name: attr_name,
                        value,
                    });
                    pos = end;
                } else {
                    attributes.push(JsxAttribute {
                        name: attr_name,
                        value: None,
                    });
                }
            }
            _ => pos += 1,
        }
    }
}

/// Reads an attribute value starting at `pos`.
fn read_value(code: &str, pos: usize) -> (Option<String>, usize) {
    let bytes = code.as_bytes();
    match bytes.get(pos) {
        Some(&q @ (b'"' | b'\'')) => {
            let end = find_byte(bytes, pos + 1, q).unwrap_or(bytes.len());
            let value = code[pos + 1..end].to_string();
            (Some(value), (end + 1).min(bytes.len()))
        }
        Some(b'{') => {
            let end = skip_braced(code, pos);
            let inner = braced_inner(code, pos, end);
            (Some(strip_string_literal(inner).to_string()), end)
        }
        Some(_) => {
            let mut end = pos;
            while end < bytes.len()
                && !bytes[end].is_ascii_whitespace()
                && bytes[end] != b'>'
                && bytes[end] != b'/'
            {
                end += 1;
            }
            (Some(code[pos..end].to_string()), end)
        }
        None => (None, pos),
    }
}

/// Returns the position just past the brace group opening at `pos`.
fn skip_braced(code: &str, pos: usize) -> usize {
    let bytes = code.as_bytes();
    let mut depth = 0usize;
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            q @ (b'"' | b'\'' | b'`') => {
                i = find_byte(bytes, i + 1, q).unwrap_or(bytes.len());
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

/// Text between the brace at `open` and the group end, without the braces.
fn braced_inner(code: &str, open: usize, end: usize) -> &str {
    let close = if code[..end].ends_with('}') { end - 1 } else { end };
    code[open + 1..close.max(open + 1)].trim()
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|p| from + p)
}

fn strip_string_literal(expr: &str) -> &str {
    for q in ['"', '\'', '`'] {
        if let Some(inner) = expr.strip_prefix(q).and_then(|s| s.strip_suffix(q)) {
            return inner;
        }
    }
    expr
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_self_closing_element_with_attributes() {
        let code = r#"<IconButton aria-label="Close" variant='soft' />"#;
        let found = find_elements(code, "IconButton");
        assert_eq!(found.len(), 1);
        let el = &found[0];
        assert_eq!(el.line, 0);
        assert_eq!(el.column, 1);
        assert_eq!(el.length, code.len());
        assert_eq!(
            el.attribute("aria-label").and_then(|a| a.value.as_deref()),
            Some("Close")
        );
        assert_eq!(
            el.attribute("variant").and_then(|a| a.value.as_deref()),
            Some("soft")
        );
    }

    #[test]
    fn does_not_match_longer_component_names() {
        let code = "<IconButtonGroup>\n  <Button>Save</Button>\n</IconButtonGroup>";
        assert!(find_elements(code, "IconButton").is_empty());
        let buttons = find_elements(code, "Button");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].line, 1);
        assert_eq!(buttons[0].column, 3);
    }

    #[test]
    fn reads_boolean_and_braced_attributes() {
        let code = r#"<Button color={"gray"} highContrast onClick={() => go({ a: ">" })}>Go</Button>"#;
        let found = find_elements(code, "Button");
        assert_eq!(found.len(), 1);
        let el = &found[0];
        assert_eq!(
            el.attribute("color").and_then(|a| a.value.as_deref()),
            Some("gray")
        );
        assert!(el.has_attribute("highContrast"));
        assert!(el.attribute("highContrast").is_some_and(|a| a.value.is_none()));
        assert!(el.has_attribute("onClick"));
    }

    #[test]
    fn multiline_tags_and_spreads() {
        let code = "<Flex>\n  <IconButton\n    {...props}\n    size=\"2\"\n  >\n    <Icon />\n  </IconButton>\n</Flex>";
        let found = find_elements(code, "IconButton");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
        assert!(found[0].has_spread());
        assert!(!found[0].has_attribute("aria-label"));
    }

    #[test]
    fn closing_tags_are_ignored() {
        assert!(find_elements("</Button>", "Button").is_empty());
    }

    #[test]
    fn unterminated_tag_does_not_panic() {
        let found = find_elements("<Button color=\"gray", "Button");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].attribute("color").and_then(|a| a.value.as_deref()),
            Some("gray")
        );
    }
}
