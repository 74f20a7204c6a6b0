use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;

use crate::ast::Span;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The map cannot be used.
    Error,
    /// The map loads, but probably not the way its author meant.
    Warning,
}

/// A problem found in a map file, pointing at the offending bytes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Byte range the diagnostic points at.
    pub span: Span,
    /// The headline message.
    pub message: String,
    /// Optional text shown next to the span instead of the message.
    pub label: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// A problem that stops the map from loading.
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, span, message)
    }

    /// A suspicious but loadable construct.
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, span, message)
    }

    /// Text shown under the span in rendered output.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this diagnostic blocks loading.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Render diagnostics against their source with ariadne.
///
/// Produces one report per diagnostic, in order; an empty slice renders as an
/// empty string.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut buf = Vec::new();

    for d in diagnostics {
        let (kind, color) = match d.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };
        let label = Label::new((filename, d.span.clone()))
            .with_message(d.label.as_deref().unwrap_or(&d.message))
            .with_color(color);

        Report::build(kind, (filename, d.span.clone()))
            .with_message(&d.message)
            .with_label(label)
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .ok();
    }

    String::from_utf8_lossy(&buf).into_owned()
}
