//! Compiler configuration (irjs.toml)
//!
//! ```toml
//! [lowering]
//! parallel = true
//! workers = 4
//!
//! [output]
//! indent = 4
//!
//! [features]
//! InlineClasses = true
//! NewInference = false
//! ```
//!
//! Command-line flags override the file; `-XX:` toggles override the
//! `[features]` table.

use crate::arguments::{FeatureState, LanguageFeature, ManualLanguageFeatureSetting};
use crate::messages::{CompilerMessageSeverity, MessageCollector};
use irjs_backend::{LoweringOptions, PrinterOptions};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "irjs.toml";

const MAX_INDENT: usize = 16;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Contents of an irjs.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub lowering: LoweringOptions,
    pub output: PrinterOptions,
    /// Feature name to enabled flag; names are checked when resolved
    pub features: BTreeMap<String, bool>,
}

impl CompilerConfig {
    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse a config from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `irjs.toml` in `working_dir` if present
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        let candidate = working_dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.output.indent > MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "output.indent must be at most {}, got {}",
                MAX_INDENT, self.output.indent
            )));
        }
        if self.lowering.workers == Some(0) {
            return Err(ConfigError::Invalid(
                "lowering.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides
    ///
    /// `--jobs` above one turns parallel lowering on; it never turns an
    /// explicit `--parallel` off.
    pub fn apply_overrides(
        &mut self,
        parallel: bool,
        jobs: Option<usize>,
        indent: Option<usize>,
    ) -> Result<(), ConfigError> {
        if parallel {
            self.lowering.parallel = true;
        }
        if let Some(jobs) = jobs {
            if jobs > 1 {
                self.lowering.parallel = true;
            }
            self.lowering.workers = Some(jobs);
        }
        if let Some(indent) = indent {
            self.output.indent = indent;
        }
        self.validate()
    }

    /// Final feature states: the `[features]` table, then toggles on top
    ///
    /// Unknown names in the table are reported as errors and skipped.
    pub fn resolve_features(
        &self,
        toggles: &[ManualLanguageFeatureSetting],
        collector: &mut dyn MessageCollector,
    ) -> BTreeMap<LanguageFeature, FeatureState> {
        let mut features = BTreeMap::new();

        for (name, enabled) in &self.features {
            match name.parse::<LanguageFeature>() {
                Ok(feature) => {
                    features.insert(feature, FeatureState::from_enabled(*enabled));
                }
                Err(_) => collector.report(
                    CompilerMessageSeverity::Error,
                    &format!("Unknown language feature '{}' in [features] table", name),
                ),
            }
        }

        for toggle in toggles {
            if let Some(previous) = features.insert(toggle.feature, toggle.state) {
                if previous != toggle.state {
                    tracing::warn!(
                        feature = %toggle.feature,
                        config = %previous,
                        toggle = %toggle.state,
                        "internal argument overrides config file"
                    );
                }
            }
        }

        features
    }
}
