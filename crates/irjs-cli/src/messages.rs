//! Compiler messages
//!
//! User-facing diagnostics (bad toggles, unknown config entries) are not
//! errors in the `Result` sense: they are reported to a collector, and the
//! driver decides at the end whether anything fatal was seen.

use std::fmt;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Severity of a reported message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompilerMessageSeverity {
    /// Stops compilation
    Error,
    /// Warning that cannot be suppressed
    StrongWarning,
    /// Ordinary warning
    Warning,
    /// Informational message
    Info,
    /// Verbose progress output
    Logging,
}

impl CompilerMessageSeverity {
    /// Does this severity make the run fail?
    pub fn is_error(self) -> bool {
        self == CompilerMessageSeverity::Error
    }

    /// Label printed in front of the message
    pub fn label(self) -> &'static str {
        match self {
            CompilerMessageSeverity::Error => "error",
            CompilerMessageSeverity::StrongWarning | CompilerMessageSeverity::Warning => "warning",
            CompilerMessageSeverity::Info => "info",
            CompilerMessageSeverity::Logging => "logging",
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            CompilerMessageSeverity::Error => Some(Color::Red),
            CompilerMessageSeverity::StrongWarning | CompilerMessageSeverity::Warning => {
                Some(Color::Yellow)
            }
            CompilerMessageSeverity::Info => Some(Color::Cyan),
            CompilerMessageSeverity::Logging => None,
        }
    }
}

impl fmt::Display for CompilerMessageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sink for user-facing messages
pub trait MessageCollector {
    /// Report a message
    fn report(&mut self, severity: CompilerMessageSeverity, message: &str);

    /// Has an error-severity message been reported?
    fn has_errors(&self) -> bool;
}

/// A reported message, as kept by [`GroupingMessageCollector`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerMessage {
    pub severity: CompilerMessageSeverity,
    pub text: String,
}

/// Keeps every message in report order
#[derive(Debug, Default)]
pub struct GroupingMessageCollector {
    messages: Vec<CompilerMessage>,
}

impl GroupingMessageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in report order
    pub fn messages(&self) -> &[CompilerMessage] {
        &self.messages
    }

    /// Messages of one severity
    pub fn with_severity(
        &self,
        severity: CompilerMessageSeverity,
    ) -> impl Iterator<Item = &CompilerMessage> + '_ {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    /// Replay the kept messages into another collector
    pub fn flush_to(&mut self, target: &mut dyn MessageCollector) {
        for message in self.messages.drain(..) {
            target.report(message.severity, &message.text);
        }
    }
}

impl MessageCollector for GroupingMessageCollector {
    fn report(&mut self, severity: CompilerMessageSeverity, message: &str) {
        self.messages.push(CompilerMessage {
            severity,
            text: message.to_string(),
        });
    }

    fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity.is_error())
    }
}

/// Writes messages to stderr as they arrive
pub struct PrintingMessageCollector {
    stderr: StandardStream,
    errors: usize,
}

impl PrintingMessageCollector {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stderr: StandardStream::stderr(choice),
            errors: 0,
        }
    }

    /// Number of error messages printed so far
    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl MessageCollector for PrintingMessageCollector {
    fn report(&mut self, severity: CompilerMessageSeverity, message: &str) {
        if severity.is_error() {
            self.errors += 1;
        }

        let mut spec = ColorSpec::new();
        spec.set_fg(severity.color()).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = write!(self.stderr, "{}", severity.label());
        let _ = self.stderr.reset();
        let _ = writeln!(self.stderr, ": {}", message);
    }

    fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Color choice from the environment: `NO_COLOR` disables color
pub fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_collector_keeps_order() {
        let mut collector = GroupingMessageCollector::new();
        collector.report(CompilerMessageSeverity::Warning, "first");
        collector.report(CompilerMessageSeverity::Info, "second");
        assert!(!collector.has_errors());

        collector.report(CompilerMessageSeverity::Error, "third");
        assert!(collector.has_errors());

        let texts: Vec<_> = collector.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(collector.with_severity(CompilerMessageSeverity::Error).count(), 1);
    }

    #[test]
    fn test_flush_moves_messages() {
        let mut source = GroupingMessageCollector::new();
        source.report(CompilerMessageSeverity::Error, "broken");

        let mut target = GroupingMessageCollector::new();
        source.flush_to(&mut target);

        assert!(source.messages().is_empty());
        assert!(target.has_errors());
    }

    #[test]
    fn test_strong_warning_is_not_an_error() {
        assert!(!CompilerMessageSeverity::StrongWarning.is_error());
        assert_eq!(CompilerMessageSeverity::StrongWarning.to_string(), "warning");
    }

    #[test]
    fn test_printing_collector_counts_errors() {
        let mut collector = PrintingMessageCollector::new(ColorChoice::Never);
        collector.report(CompilerMessageSeverity::Warning, "ignored toggle");
        assert!(!collector.has_errors());
        collector.report(CompilerMessageSeverity::Error, "bad toggle");
        assert_eq!(collector.error_count(), 1);
        assert!(collector.has_errors());
    }
}
