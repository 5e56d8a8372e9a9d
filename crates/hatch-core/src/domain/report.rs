//! Run lifecycle and the final account of what was written.

use std::fmt;

use serde::Serialize;

use super::{DomainError, EmissionResult};

/// Lifecycle of one emitter run.
///
/// `Idle → Rendering → Writing → Reported → Done`, strictly in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    Rendering,
    Writing,
    Reported,
    Done,
}

impl RunPhase {
    /// The only phase reachable from `self`, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Rendering),
            Self::Rendering => Some(Self::Writing),
            Self::Writing => Some(Self::Reported),
            Self::Reported => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Rendering => "rendering",
            Self::Writing => "writing",
            Self::Reported => "reported",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// Ordered collection of per-artifact results.
///
/// Results are kept in the order they were recorded, which the emitter
/// guarantees is artifact-definition order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmissionReport {
    phase: RunPhase,
    results: Vec<EmissionResult>,
}

impl EmissionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `to`, which must be the immediate successor of the current phase.
    pub fn advance(&mut self, to: RunPhase) -> Result<(), DomainError> {
        if self.phase.next() != Some(to) {
            return Err(DomainError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!(from = %self.phase, to = %to, "run phase");
        self.phase = to;
        Ok(())
    }

    pub fn record(&mut self, result: EmissionResult) {
        self.results.push(result);
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn results(&self) -> &[EmissionResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.succeeded_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmissionResult> {
        self.results.iter().filter(|r| !r.succeeded())
    }

    /// Deterministic multi-line status: one line per artifact, then a total.
    pub fn summarize(&self) -> String {
        let mut out = String::new();

        for result in &self.results {
            let path = result.path().display();
            if result.is_dry_run() {
                out.push_str(&format!("[plan]   {path}\n"));
            } else if result.succeeded() {
                out.push_str(&format!(
                    "[ok]     {path} ({} bytes)\n",
                    result.bytes_written()
                ));
            } else {
                let kind = result
                    .error_kind()
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "failed".into());
                match result.error_message() {
                    Some(msg) => out.push_str(&format!("[failed] {path}: {kind} ({msg})\n")),
                    None => out.push_str(&format!("[failed] {path}: {kind}\n")),
                }
            }
        }

        let (ok, total) = (self.succeeded_count(), self.total());
        if self.all_succeeded() {
            out.push_str(&format!("{ok}/{total} succeeded"));
        } else {
            out.push_str(&format!(
                "{ok}/{total} succeeded, {} failed",
                self.failed_count()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmissionErrorKind;

    #[test]
    fn phases_advance_in_order() {
        let mut report = EmissionReport::new();
        for phase in [
            RunPhase::Rendering,
            RunPhase::Writing,
            RunPhase::Reported,
            RunPhase::Done,
        ] {
            report.advance(phase).unwrap();
        }
        assert_eq!(report.phase(), RunPhase::Done);
    }

    #[test]
    fn skipping_a_phase_is_rejected() {
        let mut report = EmissionReport::new();
        let err = report.advance(RunPhase::Writing).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: RunPhase::Idle,
                to: RunPhase::Writing
            }
        );
        assert_eq!(report.phase(), RunPhase::Idle);
    }

    #[test]
    fn done_is_terminal() {
        assert_eq!(RunPhase::Done.next(), None);
    }

    #[test]
    fn summary_keeps_record_order() {
        let mut report = EmissionReport::new();
        report.record(EmissionResult::success("z.js", 1));
        report.record(EmissionResult::success("a.md", 2));
        let summary = report.summarize();
        let z = summary.find("z.js").unwrap();
        let a = summary.find("a.md").unwrap();
        assert!(z < a);
        assert!(summary.ends_with("2/2 succeeded"));
    }

    #[test]
    fn summary_counts_failures() {
        let mut report = EmissionReport::new();
        report.record(EmissionResult::success("a", 1));
        report.record(EmissionResult::failure(
            "b",
            EmissionErrorKind::PermissionDenied,
            "read-only",
        ));
        let summary = report.summarize();
        assert!(summary.contains("[failed] b: permission denied (read-only)"));
        assert!(summary.ends_with("1/2 succeeded, 1 failed"));
        assert_eq!(report.failures().count(), 1);
        assert!(!report.all_succeeded());
    }

    #[test]
    fn summary_is_stable() {
        let mut report = EmissionReport::new();
        report.record(EmissionResult::planned("x"));
        assert_eq!(report.summarize(), report.summarize());
        assert!(report.summarize().starts_with("[plan]   x"));
    }
}
