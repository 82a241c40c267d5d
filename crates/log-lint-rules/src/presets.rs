//! Rule presets for common configurations.

use crate::{log_and_rethrow, only_message_logged, restricted_log_level};
use crate::{LogAndRethrow, OnlyMessageLogged, RestrictedLogLevel};
use log_lint_core::RuleBox;
use std::str::FromStr;

/// Preset configurations for log-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every built-in rule.
    #[default]
    Recommended,
    /// Minimal rules for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "minimal" => Ok(Self::Minimal),
            _ => Err(format!(
                "unknown preset `{s}`. Valid values: recommended, minimal"
            )),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes, in evaluation order:
/// - `only-message-logged` (LL001)
/// - `log-and-rethrow` (LL002)
/// - `restricted-log-level` (LL003)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes `only-message-logged`.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(OnlyMessageLogged::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(OnlyMessageLogged::new()),
        Box::new(LogAndRethrow::new()),
        Box::new(RestrictedLogLevel::new()),
    ]
}

/// Looks up a rule by name or code.
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    match name {
        only_message_logged::NAME | only_message_logged::CODE => {
            Some(Box::new(OnlyMessageLogged::new()))
        }
        log_and_rethrow::NAME | log_and_rethrow::CODE => Some(Box::new(LogAndRethrow::new())),
        restricted_log_level::NAME | restricted_log_level::CODE => {
            Some(Box::new(RestrictedLogLevel::new()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(
            names(&Preset::Recommended.rules()),
            vec!["only-message-logged", "log-and-rethrow", "restricted-log-level"]
        );
        assert_eq!(names(&Preset::Minimal.rules()), vec!["only-message-logged"]);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("recommended".parse::<Preset>(), Ok(Preset::Recommended));
        assert_eq!("Minimal".parse::<Preset>(), Ok(Preset::Minimal));
        assert!("strict".parse::<Preset>().is_err());
    }

    #[test]
    fn test_rule_by_name_or_code() {
        assert_eq!(rule_by_name("LL002").map(|r| r.name()), Some("log-and-rethrow"));
        assert_eq!(
            rule_by_name("restricted-log-level").map(|r| r.code()),
            Some("LL003")
        );
        assert!(rule_by_name("no-such-rule").is_none());
    }
}
