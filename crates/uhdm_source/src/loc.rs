//! Line-granular source locations.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A file and 1-indexed line. Line 0 means the line is unknown.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLoc {
    /// The file this location belongs to.
    pub file: FileId,
    /// Line number, 1-indexed.
    pub line: u32,
}

impl SourceLoc {
    /// Location used for synthesized nodes.
    pub const DUMMY: SourceLoc = SourceLoc {
        file: FileId::DUMMY,
        line: 0,
    };

    /// Creates a location.
    pub fn new(file: FileId, line: u32) -> Self {
        Self { file, line }
    }

    /// Returns `true` if this is the dummy location.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::DUMMY
    }
}
