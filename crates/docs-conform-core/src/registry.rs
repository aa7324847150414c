//! Rule registry: the ordered, duplicate-free set of active rules.
//!
//! A registry is assembled once with a [`RegistryBuilder`] from an explicit
//! [`Config`] and is immutable afterwards. It is `Send + Sync`, so any
//! number of evaluations may share one registry by reference.

use tracing::debug;

use crate::config::Config;
use crate::rule::{Rule, RuleBox};
use crate::types::{Scope, Severity};

/// Errors raised while assembling a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A rule with the same name or code is already registered.
    #[error("duplicate rule `{name}` ({code}): a rule with this {clash} is already registered")]
    DuplicateRule {
        /// Name of the rejected rule.
        name: String,
        /// Code of the rejected rule.
        code: String,
        /// Which identifier clashed ("name" or "code").
        clash: &'static str,
    },
}

struct RegisteredRule {
    rule: RuleBox,
    enabled: bool,
    severity: Option<Severity>,
}

/// Builder for a [`RuleRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<RegisteredRule>,
    config: Config,
}

impl RegistryBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration used for enablement and severity overrides.
    ///
    /// Applies to rules registered before and after this call.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        for entry in &mut self.entries {
            entry.enabled = config.is_rule_enabled(entry.rule.name());
            entry.severity = config.rule_severity(entry.rule.name());
        }
        self.config = config;
        self
    }

    /// Registers a rule, preserving registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] if a rule with the same name
    /// or code is already registered.
    pub fn register(&mut self, rule: RuleBox) -> Result<(), RegistryError> {
        if let Some(existing) = self.entries.iter().find(|e| {
            e.rule.name() == rule.name() || e.rule.code() == rule.code()
        }) {
            let clash = if existing.rule.name() == rule.name() {
                "name"
            } else {
                "code"
            };
            return Err(RegistryError::DuplicateRule {
                name: rule.name().to_string(),
                code: rule.code().to_string(),
                clash,
            });
        }

        let enabled = self.config.is_rule_enabled(rule.name());
        if !enabled {
            debug!("Rule {} disabled by configuration", rule.name());
        }
        self.entries.push(RegisteredRule {
            enabled,
            severity: self.config.rule_severity(rule.name()),
            rule,
        });
        Ok(())
    }

    /// Registers a rule by value. See [`RegistryBuilder::register`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] on a name or code clash.
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Result<Self, RegistryError> {
        self.register(Box::new(rule))?;
        Ok(self)
    }

    /// Registers every rule from an iterator, stopping at the first clash.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] on a name or code clash.
    pub fn rules<I>(mut self, rules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = RuleBox>,
    {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(self)
    }

    /// Freezes the builder into an immutable registry.
    #[must_use]
    pub fn build(self) -> RuleRegistry {
        RuleRegistry {
            entries: self.entries,
        }
    }
}

/// Immutable, ordered set of rules shared by evaluations.
pub struct RuleRegistry {
    entries: Vec<RegisteredRule>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.rule.name()))
            .finish()
    }
}

impl RuleRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from rules and configuration in one step.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] on a name or code clash.
    pub fn from_rules<I>(rules: I, config: Config) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = RuleBox>,
    {
        Ok(Self::builder().config(config).rules(rules)?.build())
    }

    /// Enabled rules of `scope`, in registration order.
    pub fn rules_for(&self, scope: Scope) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.enabled && e.rule.scope() == scope)
            .map(|e| e.rule.as_ref())
    }

    /// All registered rules (enabled or not), in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.entries.iter().map(|e| e.rule.as_ref())
    }

    /// Severity override configured for `rule_name`, if any.
    #[must_use]
    pub fn severity_override(&self, rule_name: &str) -> Option<Severity> {
        self.entries
            .iter()
            .find(|e| e.rule.name() == rule_name)
            .and_then(|e| e.severity)
    }

    /// Returns true if `rule_name` is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, rule_name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.enabled && e.rule.name() == rule_name)
    }

    /// Number of enabled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.enabled).count()
    }

    /// Returns true if no rule is enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CheckContext;
    use crate::document::Node;
    use crate::types::ValidationResult;

    struct Named(&'static str, &'static str, Scope);

    impl Rule for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn code(&self) -> &'static str {
            self.1
        }
        fn scope(&self) -> Scope {
            self.2
        }
        fn check(&self, _ctx: &CheckContext<'_>, _node: Node<'_>) -> Vec<ValidationResult> {
            Vec::new()
        }
    }

    fn boxed(name: &'static str, code: &'static str, scope: Scope) -> RuleBox {
        Box::new(Named(name, code, scope))
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = RuleRegistry::from_rules(
            vec![
                boxed("heading-length", "DC102", Scope::Section),
                boxed("heading-length", "DC999", Scope::Section),
            ],
            Config::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRule {
                name: "heading-length".into(),
                code: "DC999".into(),
                clash: "name",
            }
        );
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let mut builder = RuleRegistry::builder();
        builder.register(boxed("a", "DC1", Scope::Section)).unwrap();
        let err = builder.register(boxed("b", "DC1", Scope::Section)).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRule { clash: "code", .. }));
    }

    #[test]
    fn rules_for_preserves_registration_order() {
        let registry = RuleRegistry::builder()
            .rule(Named("z", "DC3", Scope::Section))
            .and_then(|b| b.rule(Named("doc", "DC1", Scope::Document)))
            .and_then(|b| b.rule(Named("a", "DC2", Scope::Section)))
            .unwrap()
            .build();
        let names: Vec<&str> = registry.rules_for(Scope::Section).map(Rule::name).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(registry.rules_for(Scope::CodeBlock).count(), 0);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn config_disables_and_overrides() {
        let config = Config::parse(
            "[rules.a]\nenabled = false\n\n[rules.b]\nseverity = \"warning\"\n",
        )
        .unwrap();
        let registry = RuleRegistry::from_rules(
            vec![boxed("a", "DC1", Scope::Section), boxed("b", "DC2", Scope::Section)],
            config,
        )
        .unwrap();
        assert!(!registry.is_enabled("a"));
        assert!(registry.is_enabled("b"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().count(), 2);
        assert_eq!(registry.severity_override("b"), Some(Severity::Warning));
        assert_eq!(registry.severity_override("a"), None);
    }

    #[test]
    fn config_applies_to_rules_registered_earlier() {
        let registry = RuleRegistry::builder()
            .rule(Named("a", "DC1", Scope::Section))
            .unwrap()
            .config(Config::parse("[rules.a]\nenabled = false\n").unwrap())
            .build();
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleRegistry>();
    }
}
