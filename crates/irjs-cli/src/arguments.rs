//! Internal compiler arguments
//!
//! Unstable switches are passed as `-XX:+Feature` or `-XX:-Feature` and
//! turn one language feature on or off. Malformed switches are reported to
//! the message collector and skipped; they never abort parsing.

use crate::messages::{CompilerMessageSeverity, MessageCollector};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every internal argument
pub const INTERNAL_ARGUMENT_PREFIX: &str = "-XX:";

/// Language features that can be toggled by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LanguageFeature {
    InlineClasses,
    ReleaseCoroutines,
    NewInference,
    FunctionalInterfaceConversion,
    ProperIeee754Comparisons,
    MultiPlatformProjects,
}

impl LanguageFeature {
    /// Every known feature, in declaration order
    pub const ALL: [LanguageFeature; 6] = [
        LanguageFeature::InlineClasses,
        LanguageFeature::ReleaseCoroutines,
        LanguageFeature::NewInference,
        LanguageFeature::FunctionalInterfaceConversion,
        LanguageFeature::ProperIeee754Comparisons,
        LanguageFeature::MultiPlatformProjects,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LanguageFeature::InlineClasses => "InlineClasses",
            LanguageFeature::ReleaseCoroutines => "ReleaseCoroutines",
            LanguageFeature::NewInference => "NewInference",
            LanguageFeature::FunctionalInterfaceConversion => "FunctionalInterfaceConversion",
            LanguageFeature::ProperIeee754Comparisons => "ProperIeee754Comparisons",
            LanguageFeature::MultiPlatformProjects => "MultiPlatformProjects",
        }
    }
}

impl fmt::Display for LanguageFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name that matches no known feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl FromStr for LanguageFeature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageFeature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Requested state of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureState {
    Enabled,
    Disabled,
}

impl FeatureState {
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            FeatureState::Enabled
        } else {
            FeatureState::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self == FeatureState::Enabled
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureState::Enabled => f.write_str("enabled"),
            FeatureState::Disabled => f.write_str("disabled"),
        }
    }
}

/// A parsed `-XX:±Feature` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualLanguageFeatureSetting {
    pub feature: LanguageFeature,
    pub state: FeatureState,
}

/// Parses internal arguments, reporting malformed ones to a collector
pub struct InternalArgumentsParser<'m> {
    collector: &'m mut dyn MessageCollector,
}

impl<'m> InternalArgumentsParser<'m> {
    pub fn new(collector: &'m mut dyn MessageCollector) -> Self {
        Self { collector }
    }

    /// Parse one argument; `None` after reporting an error
    pub fn parse_internal_argument(&mut self, arg: &str) -> Option<ManualLanguageFeatureSetting> {
        let without_prefix = arg.strip_prefix(INTERNAL_ARGUMENT_PREFIX).unwrap_or(arg);

        let mut chars = without_prefix.chars();
        let state = match chars.next() {
            Some('+') => FeatureState::Enabled,
            Some('-') => FeatureState::Disabled,
            _ => {
                self.error(&format!(
                    "Incorrect internal argument syntax, missing modificator: {}",
                    arg
                ));
                return None;
            }
        };

        let feature_name = chars.as_str();
        if feature_name.is_empty() {
            self.error(&format!(
                "Empty language feature name for internal argument '{}'",
                arg
            ));
            return None;
        }

        match feature_name.parse::<LanguageFeature>() {
            Ok(feature) => Some(ManualLanguageFeatureSetting { feature, state }),
            Err(UnknownFeature(name)) => {
                self.error(&format!(
                    "Unknown language feature '{}' in passed internal argument '{}'",
                    name, arg
                ));
                None
            }
        }
    }

    /// Parse every argument; errors accumulate in the collector
    pub fn parse_all<'a>(
        &mut self,
        args: impl IntoIterator<Item = &'a str>,
    ) -> Vec<ManualLanguageFeatureSetting> {
        args.into_iter()
            .filter_map(|arg| self.parse_internal_argument(arg))
            .collect()
    }

    fn error(&mut self, message: &str) {
        self.collector.report(CompilerMessageSeverity::Error, message);
    }
}

/// Split internal arguments off a raw command line
///
/// Returns the remaining arguments (program name included) and the
/// internal ones, both in their original order.
pub fn split_internal_arguments<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .partition(|arg| !arg.starts_with(INTERNAL_ARGUMENT_PREFIX))
}
