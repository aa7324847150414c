//! # docs-conform-rules
//!
//! Built-in conformance rules for docs-conform.
//!
//! Each rule encodes one machine-checkable item of the documentation
//! authoring guides. Guidance without a testable predicate is listed in
//! [`REVIEW_ONLY_GUIDANCE`] instead.
//!
//! ## Available Rules
//!
//! | Code | Name | Scope | Description |
//! |------|------|-------|-------------|
//! | DC001 | `title-length` | document | Title is at most 60 characters |
//! | DC002 | `description-length` | document | Description is 50 to 160 characters |
//! | DC101 | `no-body-h1` | section | No level-1 heading in the body |
//! | DC102 | `heading-length` | section | H2 1-3 words, H3 1-6, deeper 1-8 |
//! | DC103 | `heading-trailing-punctuation` | section | No `.`, `:`, `;` or `,` at the end of a heading |
//! | DC104 | `empty-section` | section | Headings have content or subsections |
//! | DC201 | `code-block-language` | code block | Fenced code declares a language |
//! | DC202 | `code-line-numbers` | code block | Blocks over 10 lines set `showLineNumbers` |
//! | DC203 | `icon-button-label` | code block | `<IconButton>` has an `aria-label` |
//! | DC204 | `gray-button-high-contrast` | code block | `color="gray"` buttons set `highContrast` |
//!
//! ## Usage
//!
//! ```ignore
//! use docs_conform_core::{check_source, RuleRegistry};
//! use docs_conform_rules::{CodeLineNumbers, HeadingLength};
//!
//! let registry = RuleRegistry::builder()
//!     .rule(HeadingLength::new())?
//!     .rule(CodeLineNumbers::new().threshold(5))?
//!     .build();
//! let outcome = check_source("docs/button.mdx", &text, &registry);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod code_block_language;
pub mod code_line_numbers;
pub mod description_length;
pub mod empty_section;
pub mod gray_button_high_contrast;
pub mod heading_length;
pub mod heading_trailing_punctuation;
pub mod icon_button_label;
pub mod no_body_h1;
pub mod title_length;

mod build;
mod presets;
#[cfg(test)]
mod test_util;

pub use build::{configure_rule, registry_from_config, BuildError};
pub use code_block_language::CodeBlockLanguage;
pub use code_line_numbers::CodeLineNumbers;
pub use description_length::DescriptionLength;
pub use empty_section::EmptySection;
pub use gray_button_high_contrast::GrayButtonHighContrast;
pub use heading_length::{HeadingLength, HeadingLimitsError};
pub use heading_trailing_punctuation::HeadingTrailingPunctuation;
pub use icon_button_label::IconButtonLabel;
pub use no_body_h1::NoBodyH1;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use title_length::TitleLength;

/// Re-export core types for convenience.
pub use docs_conform_core::{Rule, Severity, ValidationResult};

/// Code-block languages scanned for JSX elements.
pub(crate) const JSX_LANGUAGES: &[&str] = &["jsx", "tsx", "js", "javascript", "ts", "typescript", "mdx"];

/// Authoring guidance that needs human judgement and is not encoded as rules.
pub const REVIEW_ONLY_GUIDANCE: &[&str] = &[
    "Write in the second person and the present tense",
    "Lead each page with what the component is for, not how it is built",
    "Prefer one focused example per section over a single large demo",
    "Explain design intent where a prop exists for accessibility or theming",
    "Keep terminology consistent with the component API names",
    "Choose headings that a reader would search for",
];
