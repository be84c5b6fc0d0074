use std::fmt;

/// What to do with soft (non-fatal) parse diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WarningMode {
    /// Drop them.
    Silent,
    /// Emit them through `log::warn!` and keep going.
    #[default]
    Warn,
    /// Turn them into `ParseError::FatalWarning`.
    Raise,
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A key was assigned while the section already had it, directly or by inheritance.
    DuplicateKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line_number: usize,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.message, self.line_number)
    }
}

/// Receives soft diagnostics while parsing.
///
/// Returning `Err` hands the diagnostic back to the parser, which aborts the
/// current call with `ParseError::FatalWarning`.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<(), Diagnostic>;
}

impl Reporter for WarningMode {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<(), Diagnostic> {
        match *self {
            Self::Silent => Ok(()),
            Self::Warn => {
                log::warn!("{diagnostic}");
                Ok(())
            }
            Self::Raise => Err(diagnostic),
        }
    }
}

/// Keeps every diagnostic it is given and never escalates.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl Reporter for Collector {
    fn report(&mut self, diagnostic: Diagnostic) -> Result<(), Diagnostic> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}
