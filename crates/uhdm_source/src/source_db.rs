//! Table of every file path referenced by translated objects.

use crate::file_id::FileId;
use crate::loc::SourceLoc;
use crate::resolved_loc::ResolvedLoc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Interns file paths to [`FileId`]s and resolves [`SourceLoc`]s back to paths.
///
/// Source text is never loaded: the object model already carries everything
/// the translator needs, and line numbers come straight from it.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SourceDb {
    paths: Vec<PathBuf>,
    index: HashMap<PathBuf, FileId>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the [`FileId`] for `path`, registering it on first use.
    pub fn intern_path(&mut self, path: impl AsRef<Path>) -> FileId {
        let path = path.as_ref();
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = FileId::from_raw(self.paths.len() as u32);
        self.paths.push(path.to_path_buf());
        self.index.insert(path.to_path_buf(), id);
        id
    }

    /// Returns the path registered for `id`, or `None` for unknown or dummy IDs.
    pub fn path(&self, id: FileId) -> Option<&Path> {
        self.paths.get(id.as_raw() as usize).map(PathBuf::as_path)
    }

    /// Resolves a location to its path and line. Dummy locations resolve to
    /// the path `<synthesized>`.
    pub fn resolve(&self, loc: SourceLoc) -> ResolvedLoc {
        let file_path = self
            .path(loc.file)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<synthesized>"));
        ResolvedLoc {
            file_path,
            line: loc.line,
        }
    }

    /// Iterates over every registered file in registration order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &Path)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, p)| (FileId::from_raw(i as u32), p.as_path()))
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no file has been registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_stable() {
        let mut db = SourceDb::new();
        let a = db.intern_path("top.sv");
        let b = db.intern_path("sub.sv");
        assert_ne!(a, b);
        assert_eq!(db.intern_path("top.sv"), a);
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn resolve_known_and_dummy() {
        let mut db = SourceDb::new();
        let id = db.intern_path("rtl/top.sv");
        assert_eq!(db.resolve(SourceLoc::new(id, 4)).to_string(), "rtl/top.sv:4");
        assert_eq!(db.resolve(SourceLoc::DUMMY).to_string(), "<synthesized>:0");
    }

    #[test]
    fn files_in_registration_order() {
        let mut db = SourceDb::new();
        db.intern_path("a.sv");
        db.intern_path("b.sv");
        let names: Vec<_> = db.files().map(|(_, p)| p.to_path_buf()).collect();
        assert_eq!(names, vec![PathBuf::from("a.sv"), PathBuf::from("b.sv")]);
    }
}
