//! Rule presets for common configurations.

use crate::{
    CodeBlockLanguage, CodeLineNumbers, DescriptionLength, EmptySection, GrayButtonHighContrast,
    HeadingLength, HeadingTrailingPunctuation, IconButtonLabel, NoBodyH1, TitleLength,
};
use docs_conform_core::RuleBox;

/// Preset configurations for docs-conform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule at its default severity.
    Recommended,
    /// Every rule, with all findings raised to errors.
    Strict,
    /// Heading structure only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets, in documentation order.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Configuration name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Names of the rules in this preset, in registration order.
    #[must_use]
    pub fn rule_names(self) -> Vec<&'static str> {
        self.rules().iter().map(|r| r.name()).collect()
    }

    /// Returns true if this preset raises every finding to an error.
    #[must_use]
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every built-in rule at its default severity.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the strict set of rules.
///
/// Same rules as [`recommended_rules`], but warnings become errors.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    use docs_conform_core::Severity::Error;
    vec![
        Box::new(TitleLength::new().severity(Error)),
        Box::new(DescriptionLength::new().severity(Error)),
        Box::new(NoBodyH1::new().severity(Error)),
        Box::new(HeadingLength::new().severity(Error)),
        Box::new(HeadingTrailingPunctuation::new().severity(Error)),
        Box::new(EmptySection::new().severity(Error)),
        Box::new(CodeBlockLanguage::new().severity(Error)),
        Box::new(CodeLineNumbers::new().severity(Error)),
        Box::new(IconButtonLabel::new().severity(Error)),
        Box::new(GrayButtonHighContrast::new().severity(Error)),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `no-body-h1` (DC101)
/// - `heading-length` (DC102)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(NoBodyH1::new()), Box::new(HeadingLength::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(TitleLength::new()),
        Box::new(DescriptionLength::new()),
        Box::new(NoBodyH1::new()),
        Box::new(HeadingLength::new()),
        Box::new(HeadingTrailingPunctuation::new()),
        Box::new(EmptySection::new()),
        Box::new(CodeBlockLanguage::new()),
        Box::new(CodeLineNumbers::new()),
        Box::new(IconButtonLabel::new()),
        Box::new(GrayButtonHighContrast::new()),
    ]
}
