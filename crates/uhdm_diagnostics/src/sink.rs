//! Shared accumulator for the diagnostics of a run.

use crate::code::DiagnosticCode;
use crate::diagnostic::Diagnostic;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Collected {
    diagnostics: Vec<Diagnostic>,
    per_code: HashMap<DiagnosticCode, usize>,
    errors: usize,
}

/// Collects diagnostics in emission order.
///
/// Borrowed immutably by the translator, so it can be shared with whoever
/// renders the results. Per-code tallies survive [`take_all`](Self::take_all).
#[derive(Default)]
pub struct DiagnosticSink {
    inner: Mutex<Collected>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collected> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        let mut inner = self.lock();
        if diag.severity.is_error() {
            inner.errors += 1;
        }
        *inner.per_code.entry(diag.code).or_default() += 1;
        inner.diagnostics.push(diag);
    }

    /// Returns `true` once any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.lock().errors
    }

    /// How many diagnostics with `code` were emitted.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.lock().per_code.get(&code).copied().unwrap_or(0)
    }

    /// Drains the held diagnostics.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.lock().diagnostics)
    }

    /// A copy of the held diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().diagnostics.clone()
    }
}
