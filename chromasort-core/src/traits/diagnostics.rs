//! Diagnostic sink trait

use crate::report::Diagnostic;

/// Receiver for human-readable diagnostic reports
///
/// Reporting cannot fail from the caller's point of view; sinks swallow
/// their own I/O errors.
pub trait DiagnosticSink {
    /// Emit one diagnostic
    fn report(&mut self, diagnostic: &Diagnostic<'_>);
}
