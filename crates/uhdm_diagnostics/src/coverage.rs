//! Per-line record of which source constructs the translator could represent.
//!
//! The translator calls [`CoverageReport::mark_handled`] for every node it
//! builds and [`CoverageReport::mark_unhandled`] for every construct it has to
//! skip. Rendering the result (an annotated source listing) is left to the
//! consumer; [`CoverageReport::effective_status`] gives the status a listing
//! should show for any line, including lines no object starts on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uhdm_source::{FileId, SourceLoc};

/// Status of one recorded source line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineStatus {
    /// Every construct starting on this line was translated.
    Handled,
    /// At least one construct starting on this line was skipped.
    Unhandled,
}

/// Totals over all recorded lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Lines whose constructs were all translated.
    pub handled: usize,
    /// Lines with at least one skipped construct.
    pub unhandled: usize,
}

/// Line coverage keyed by file, then by line number.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    files: BTreeMap<FileId, BTreeMap<u32, LineStatus>>,
}

impl CoverageReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file so it appears in the report even with no recorded lines.
    pub fn add_file(&mut self, file: FileId) {
        self.files.entry(file).or_default();
    }

    /// Records a translated construct. Never downgrades an unhandled line.
    pub fn mark_handled(&mut self, loc: SourceLoc) {
        if let Some(lines) = self.lines_mut(loc) {
            lines.entry(loc.line).or_insert(LineStatus::Handled);
        }
    }

    /// Records a skipped construct. Overrides any earlier handled mark.
    pub fn mark_unhandled(&mut self, loc: SourceLoc) {
        if let Some(lines) = self.lines_mut(loc) {
            lines.insert(loc.line, LineStatus::Unhandled);
        }
    }

    fn lines_mut(&mut self, loc: SourceLoc) -> Option<&mut BTreeMap<u32, LineStatus>> {
        if loc.is_dummy() || loc.line == 0 {
            return None;
        }
        Some(self.files.entry(loc.file).or_default())
    }

    /// Recorded status of exactly this line, if any construct starts on it.
    pub fn status(&self, loc: SourceLoc) -> Option<LineStatus> {
        self.files.get(&loc.file)?.get(&loc.line).copied()
    }

    /// Status a listing should show for `loc`: the status of the closest
    /// recorded line at or above it, `Handled` before the first record.
    pub fn effective_status(&self, loc: SourceLoc) -> LineStatus {
        self.files
            .get(&loc.file)
            .and_then(|lines| lines.range(..=loc.line).next_back())
            .map(|(_, status)| *status)
            .unwrap_or(LineStatus::Handled)
    }

    /// Unhandled line numbers of `file`, ascending.
    pub fn unhandled_lines(&self, file: FileId) -> Vec<u32> {
        self.files
            .get(&file)
            .map(|lines| {
                lines
                    .iter()
                    .filter(|(_, s)| **s == LineStatus::Unhandled)
                    .map(|(line, _)| *line)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Files present in the report, ascending by ID.
    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.keys().copied()
    }

    /// Counts handled and unhandled lines over every file.
    pub fn summary(&self) -> CoverageSummary {
        let mut summary = CoverageSummary::default();
        for status in self.files.values().flat_map(|lines| lines.values()) {
            match status {
                LineStatus::Handled => summary.handled += 1,
                LineStatus::Unhandled => summary.unhandled += 1,
            }
        }
        summary
    }
}
