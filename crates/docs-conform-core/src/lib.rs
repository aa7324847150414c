//! # docs-conform-core
//!
//! Core framework for checking documentation pages against a style guide.
//!
//! This crate provides the foundational traits and types for building
//! documentation checks. It includes:
//!
//! - [`parse`] to turn Markdown/MDX source into a [`Document`]
//! - [`Rule`] trait for checks over documents, sections and code blocks
//! - [`RuleRegistry`] holding the active rules in registration order
//! - [`evaluate`] and [`summarize`] for running rules and building a [`Report`]
//! - [`Checker`] for checking a whole tree of files into a [`BatchReport`]
//!
//! ## Example
//!
//! ```ignore
//! use docs_conform_core::{check_source, RuleRegistry};
//!
//! let registry = RuleRegistry::builder()
//!     .rule(MyRule::new())?
//!     .build();
//!
//! let outcome = check_source("docs/button.mdx", &text, &registry);
//! println!("{}", outcome.status());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod context;
mod document;
mod evaluator;
mod parser;
mod registry;
mod report;
mod rule;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use checker::{check_source, Checker, CheckerBuilder, CheckerError};
pub use config::{CheckerConfig, Config, ConfigError, RuleConfig};
pub use context::CheckContext;
pub use document::{Block, CodeBlock, Document, Frontmatter, Node, Section, LINE_NUMBERS_FLAG};
pub use evaluator::evaluate;
pub use parser::{parse, MalformedDocumentError};
pub use registry::{RegistryBuilder, RegistryError, RuleRegistry};
pub use report::{summarize, BatchReport, DocumentOutcome, Report};
pub use rule::{Rule, RuleBox};
pub use types::{Location, ResultDiagnostic, Scope, Severity, Suggestion, ValidationResult};
pub use utils::allowance::{AllowCheck, AllowDirective};
