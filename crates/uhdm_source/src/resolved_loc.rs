//! Human-readable resolved source locations.

use std::fmt;
use std::path::PathBuf;

/// A [`SourceLoc`](crate::SourceLoc) resolved to its file path.
///
/// Produced by [`SourceDb::resolve`](crate::SourceDb::resolve).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLoc {
    /// The path recorded in the design for this file.
    pub file_path: PathBuf,
    /// Line number, 1-indexed.
    pub line: u32,
}

impl fmt::Display for ResolvedLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path.display(), self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let rl = ResolvedLoc {
            file_path: PathBuf::from("rtl/top.sv"),
            line: 12,
        };
        assert_eq!(format!("{rl}"), "rtl/top.sv:12");
    }
}
