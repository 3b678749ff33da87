//! irjs command-line driver
//!
//! The library half of the `irjs` binary: internal argument parsing,
//! message collection, configuration and the read-lower-print pipeline.

#![warn(rust_2018_idioms)]

pub mod arguments;
pub mod config;
pub mod messages;

pub use arguments::{
    FeatureState, InternalArgumentsParser, LanguageFeature, ManualLanguageFeatureSetting,
};
pub use config::{CompilerConfig, ConfigError};
pub use messages::{
    CompilerMessageSeverity, GroupingMessageCollector, MessageCollector, PrintingMessageCollector,
};

use anyhow::Context;
use std::path::Path;

/// Read a JSON IR module from `input`, lower it and return the JavaScript text
pub fn compile_file(input: &Path, config: &CompilerConfig) -> anyhow::Result<String> {
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let module = irjs_ir::module_from_json(&source)
        .with_context(|| format!("failed to parse IR module from {}", input.display()))?;

    tracing::info!(module = %module.name, declarations = module.declarations.len(), "compiling");

    let output = irjs_backend::compile_module(&module, &config.lowering, &config.output)
        .with_context(|| format!("failed to lower module '{}'", module.name))?;
    Ok(output)
}

/// Compile `input` and write the result to `output`
pub fn compile_to_file(input: &Path, output: &Path, config: &CompilerConfig) -> anyhow::Result<()> {
    let text = compile_file(input, config)?;
    std::fs::write(output, text).with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
