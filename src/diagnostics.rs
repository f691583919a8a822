// Tue Jan 21 2026 - Alex

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

/// Recoverable anomalies. Each one is logged once and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Layout query failed or the layout is malformed
    BrokenLayout,
    /// A table entry that cannot become a forwarding method
    UnsupportedEntry,
    /// Inheritance chain reaches a denylisted type
    DeniedAncestor,
    /// Inheritance chain loops back on itself
    CyclicInheritance,
    /// A generated member clashes with one already declared
    MemberConflict,
    /// Same constant name with two different values
    ConflictingConstant,
    /// An `int` constant whose value does not fit in 32 bits
    ConstantOutOfRange,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::BrokenLayout => "broken layout",
            DiagnosticKind::UnsupportedEntry => "unsupported entry",
            DiagnosticKind::DeniedAncestor => "denied ancestor",
            DiagnosticKind::CyclicInheritance => "cyclic inheritance",
            DiagnosticKind::MemberConflict => "member conflict",
            DiagnosticKind::ConflictingConstant => "conflicting constant",
            DiagnosticKind::ConstantOutOfRange => "constant out of range",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
    }
}

/// Thread-safe sink shared by every stage of a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, kind: DiagnosticKind, subject: &str, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.to_string(),
            message: message.into(),
        };
        log::warn!("{}", diagnostic);
        self.entries.lock().push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.lock().iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.entries.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_and_count() {
        let diagnostics = Diagnostics::new();
        diagnostics.report(DiagnosticKind::BrokenLayout, "_MMIOINFO", "initializer failed");
        diagnostics.report(DiagnosticKind::UnsupportedEntry, "IFoo.Bar", "not functional");
        diagnostics.report(DiagnosticKind::BrokenLayout, "tagX", "size mismatch");

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::BrokenLayout), 2);
        assert_eq!(
            diagnostics.into_inner()[1].to_string(),
            "[unsupported entry] IFoo.Bar: not functional"
        );
    }
}
