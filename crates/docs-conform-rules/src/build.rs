//! Registry construction from configuration.
//!
//! Selects the rules of the configured preset, applies each rule's options
//! from its `[rules.<name>]` table and registers them in preset order.

use docs_conform_core::{Config, RegistryError, RuleBox, RuleConfig, RuleRegistry, Severity};
use tracing::{debug, warn};

use crate::presets::{all_rules, Preset};
use crate::{
    code_block_language, code_line_numbers, description_length, empty_section,
    gray_button_high_contrast, heading_length, heading_trailing_punctuation, icon_button_label,
    no_body_h1, title_length, CodeBlockLanguage, CodeLineNumbers, DescriptionLength,
    EmptySection, GrayButtonHighContrast, HeadingLength, HeadingTrailingPunctuation,
    IconButtonLabel, NoBodyH1, TitleLength,
};

/// Errors raised while building a registry from configuration.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Two rules share a name or code.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The configured preset does not exist.
    #[error("unknown preset `{0}` (expected recommended, strict or minimal)")]
    UnknownPreset(String),

    /// No built-in rule has this name.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// A rule option has the wrong type or an invalid value.
    #[error("invalid option `{option}` for rule `{rule}`: {message}")]
    InvalidOption {
        /// Rule the option belongs to.
        rule: String,
        /// Option key.
        option: String,
        /// What is wrong with it.
        message: String,
    },
}

/// Builds the registry described by `config`.
///
/// The preset defaults to `recommended`. Enablement and severity overrides
/// from `[rules.<name>]` are applied by the registry itself.
///
/// # Errors
///
/// Returns an error if the preset is unknown, an option is invalid (such as
/// heading limits that decrease with depth) or two rules clash.
pub fn registry_from_config(config: &Config) -> Result<RuleRegistry, BuildError> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => {
            Preset::from_name(name).ok_or_else(|| BuildError::UnknownPreset(name.to_string()))?
        }
    };
    debug!("Building registry from preset {}", preset.name());
    check_rule_tables(config, preset)?;

    let rules = preset
        .rule_names()
        .into_iter()
        .map(|name| configure_rule(name, config.rule(name), preset.is_strict()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RuleRegistry::from_rules(rules, config.clone())?)
}

/// Rejects `[rules.<name>]` tables for rules that do not exist and warns
/// about enabled tables the preset never registers.
fn check_rule_tables(config: &Config, preset: Preset) -> Result<(), BuildError> {
    let known: Vec<&'static str> = all_rules().iter().map(|r| r.name()).collect();
    let active = preset.rule_names();

    let mut configured: Vec<&String> = config.rules.keys().collect();
    configured.sort();
    for name in configured {
        if !known.contains(&name.as_str()) {
            return Err(BuildError::UnknownRule(name.clone()));
        }
        if !active.contains(&name.as_str()) && config.is_rule_enabled(name) {
            warn!(
                "[rules.{name}] has no effect: the {} preset does not include it",
                preset.name()
            );
        }
    }
    Ok(())
}

/// Builds one built-in rule with the options from its configuration table.
///
/// With `strict`, the rule reports at error severity.
///
/// # Errors
///
/// Returns an error if the rule is unknown or an option is invalid.
pub fn configure_rule(
    name: &str,
    config: Option<&RuleConfig>,
    strict: bool,
) -> Result<RuleBox, BuildError> {
    let opts = Options { rule: name, config };

    let rule: RuleBox = match name {
        title_length::NAME => {
            let rule = TitleLength::new();
            let max = opts.usize_or("max_chars", rule.max_chars)?;
            Box::new(raise(rule.max_chars(max), strict, TitleLength::severity))
        }
        description_length::NAME => {
            let rule = DescriptionLength::new();
            let min = opts.usize_or("min_chars", rule.min_chars)?;
            let max = opts.usize_or("max_chars", rule.max_chars)?;
            if min > max {
                return Err(opts.invalid(
                    "min_chars",
                    format!("min_chars ({min}) is greater than max_chars ({max})"),
                ));
            }
            Box::new(raise(
                rule.min_chars(min).max_chars(max),
                strict,
                DescriptionLength::severity,
            ))
        }
        no_body_h1::NAME => Box::new(raise(NoBodyH1::new(), strict, NoBodyH1::severity)),
        heading_length::NAME => {
            let rule = HeadingLength::new();
            let h2 = opts.usize_or("h2_max_words", rule.max_words(2).unwrap_or(3))?;
            let h3 = opts.usize_or("h3_max_words", rule.max_words(3).unwrap_or(6))?;
            let deep = opts.usize_or("deep_max_words", rule.max_words(4).unwrap_or(8))?;
            let rule = rule
                .limits(h2, h3, deep)
                .map_err(|e| opts.invalid("h2_max_words", e.to_string()))?;
            Box::new(raise(rule, strict, HeadingLength::severity))
        }
        heading_trailing_punctuation::NAME => {
            let mut rule = HeadingTrailingPunctuation::new();
            if let Some(strings) = opts.strings("characters")? {
                let chars: Vec<char> = strings.iter().flat_map(|s| s.chars()).collect();
                rule = rule.characters(&chars);
            }
            Box::new(raise(rule, strict, HeadingTrailingPunctuation::severity))
        }
        empty_section::NAME => {
            Box::new(raise(EmptySection::new(), strict, EmptySection::severity))
        }
        code_block_language::NAME => Box::new(raise(
            CodeBlockLanguage::new(),
            strict,
            CodeBlockLanguage::severity,
        )),
        code_line_numbers::NAME => {
            let rule = CodeLineNumbers::new();
            let threshold = opts.usize_or("threshold", rule.threshold)?;
            Box::new(raise(
                rule.threshold(threshold),
                strict,
                CodeLineNumbers::severity,
            ))
        }
        icon_button_label::NAME => {
            let mut rule = IconButtonLabel::new();
            if let Some(components) = opts.strings("components")? {
                let names: Vec<&str> = components.iter().map(String::as_str).collect();
                rule = rule.components(&names);
            }
            let allow_spread = opts.bool_or("allow_spread", rule.allow_spread)?;
            Box::new(raise(
                rule.allow_spread(allow_spread),
                strict,
                IconButtonLabel::severity,
            ))
        }
        gray_button_high_contrast::NAME => {
            let mut rule = GrayButtonHighContrast::new();
            if let Some(components) = opts.strings("components")? {
                let names: Vec<&str> = components.iter().map(String::as_str).collect();
                rule = rule.components(&names);
            }
            if let Some(colors) = opts.strings("colors")? {
                let names: Vec<&str> = colors.iter().map(String::as_str).collect();
                rule = rule.colors(&names);
            }
            Box::new(raise(rule, strict, GrayButtonHighContrast::severity))
        }
        other => return Err(BuildError::UnknownRule(other.to_string())),
    };
    Ok(rule)
}

/// Applies the strict preset's severity floor.
fn raise<R>(rule: R, strict: bool, set: fn(R, Severity) -> R) -> R {
    if strict {
        set(rule, Severity::Error)
    } else {
        rule
    }
}

/// Typed access to one rule's option table.
struct Options<'a> {
    rule: &'a str,
    config: Option<&'a RuleConfig>,
}

impl Options<'_> {
    fn value(&self, key: &str) -> Option<&toml::Value> {
        self.config.and_then(|c| c.option(key))
    }

    fn invalid(&self, option: &str, message: String) -> BuildError {
        BuildError::InvalidOption {
            rule: self.rule.to_string(),
            option: option.to_string(),
            message,
        }
    }

    fn usize_or(&self, key: &str, default: usize) -> Result<usize, BuildError> {
        let Some(value) = self.value(key) else {
            return Ok(default);
        };
        value
            .as_integer()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                self.invalid(key, format!("expected a non-negative integer, found {value}"))
            })
    }

    fn bool_or(&self, key: &str, default: bool) -> Result<bool, BuildError> {
        let Some(value) = self.value(key) else {
            return Ok(default);
        };
        value
            .as_bool()
            .ok_or_else(|| self.invalid(key, format!("expected a boolean, found {value}")))
    }

    fn strings(&self, key: &str) -> Result<Option<Vec<String>>, BuildError> {
        let Some(value) = self.value(key) else {
            return Ok(None);
        };
        value
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
            })
            .map(Some)
            .ok_or_else(|| {
                self.invalid(key, format!("expected an array of strings, found {value}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(toml: &str) -> Result<RuleRegistry, BuildError> {
        registry_from_config(&Config::parse(toml).unwrap())
    }

    #[test]
    fn default_config_registers_every_rule() {
        let registry = build("").unwrap();
        assert_eq!(registry.len(), 10);
        let names: Vec<&str> = registry.iter().map(|r| r.name()).collect();
        assert_eq!(names[0], title_length::NAME);
        assert_eq!(names[9], gray_button_high_contrast::NAME);
    }

    #[test]
    fn minimal_preset() {
        let registry = build("preset = \"minimal\"").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn strict_preset_raises_warnings() {
        let registry = build("preset = \"strict\"").unwrap();
        assert!(registry.iter().all(|r| r.default_severity() == Severity::Error));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        assert!(matches!(build("preset = \"lenient\""), Err(BuildError::UnknownPreset(_))));
    }

    #[test]
    fn decreasing_heading_limits_are_rejected() {
        let err = build("[rules.heading-length]\nh2_max_words = 7\n").unwrap_err();
        match err {
            BuildError::InvalidOption { rule, .. } => assert_eq!(rule, heading_length::NAME),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrongly_typed_option_is_rejected() {
        let err = build("[rules.code-line-numbers]\nthreshold = \"five\"\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option `threshold` for rule `code-line-numbers`: expected a non-negative integer, found \"five\""
        );
    }

    #[test]
    fn inverted_description_bounds_are_rejected() {
        let err = build("[rules.description-length]\nmin_chars = 200\n").unwrap_err();
        assert!(matches!(err, BuildError::InvalidOption { .. }));
    }

    #[test]
    fn misspelled_rule_table_is_rejected() {
        let err = build("[rules.heading-lenght]\nh2_max_words = 4\n").unwrap_err();
        assert!(matches!(err, BuildError::UnknownRule(ref name) if name == "heading-lenght"));
        assert_eq!(err.to_string(), "unknown rule `heading-lenght`");
    }

    #[test]
    fn table_outside_preset_is_accepted() {
        let registry = build("preset = \"minimal\"\n[rules.empty-section]\nenabled = false\n").unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_enabled("empty-section"));
    }

    #[test]
    fn unknown_rule_name() {
        assert!(matches!(
            configure_rule("no-such-rule", None, false),
            Err(BuildError::UnknownRule(_))
        ));
    }
}
