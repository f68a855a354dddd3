//! Thread-safe diagnostic collection and batch rendering.

use crate::diagnostic::Diagnostic;
use crate::render::{DiagnosticRenderer, RenderError};
use crate::severity::Severity;
use prism_source::SourceDb;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Severities from worst to mildest, for [`DiagnosticSink::max_severity`].
const WORST_FIRST: [Severity; 5] = [
    Severity::Error,
    Severity::Bug,
    Severity::Warning,
    Severity::Note,
    Severity::Help,
];

/// A thread-safe collector for diagnostics awaiting rendering.
///
/// Producers on any thread add diagnostics with [`push`](Self::push). A
/// per-severity tally is kept in atomics, so severity queries such as
/// [`has_errors`](Self::has_errors) and [`max_severity`](Self::max_severity)
/// never lock the backing vector. [`render_all`](Self::render_all) drives
/// the collected batch through a renderer in emission order.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    tallies: [AtomicUsize; WORST_FIRST.len()],
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            tallies: std::array::from_fn(|_| AtomicUsize::new(0)),
        }
    }

    /// Adds a diagnostic to the sink, bumping its severity tally.
    pub fn push(&self, diag: Diagnostic) {
        self.tallies[diag.severity as usize].fetch_add(1, Ordering::Relaxed);
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Returns how many diagnostics of `severity` have been pushed.
    ///
    /// Tallies are cumulative over the sink's lifetime; draining the sink
    /// does not reset them.
    pub fn count_of(&self, severity: Severity) -> usize {
        self.tallies[severity as usize].load(Ordering::Relaxed)
    }

    /// Returns the total number of diagnostics pushed.
    pub fn len(&self) -> usize {
        self.tallies.iter().map(|t| t.load(Ordering::Relaxed)).sum()
    }

    /// Returns `true` if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any [`Error`](Severity::Error)-severity
    /// diagnostics have been pushed.
    pub fn has_errors(&self) -> bool {
        self.count_of(Severity::Error) > 0
    }

    /// Returns the worst severity pushed so far, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        WORST_FIRST.into_iter().find(|s| self.count_of(*s) > 0)
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    /// Renders every accumulated diagnostic against `db`, in emission
    /// order, separated by blank lines. The sink keeps its contents.
    pub fn render_all<R: DiagnosticRenderer>(
        &self,
        renderer: &R,
        db: &SourceDb,
    ) -> Result<String, RenderError> {
        let batch = self.diagnostics.lock().unwrap().clone();
        let mut rendered = Vec::with_capacity(batch.len());
        for diag in &batch {
            rendered.push(renderer.render(diag, db)?);
        }
        Ok(rendered.join("\n\n"))
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
