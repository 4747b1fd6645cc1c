use serde::Serialize;

pub const SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEntry {
    pub path: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl GeneratedEntry {
    /// `path` must already carry the trailing separator.
    pub fn directory(path: String) -> Self {
        debug_assert!(path.ends_with(SEPARATOR));
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(path: String) -> Self {
        Self {
            path,
            kind: EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final path component without the trailing separator.
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches(SEPARATOR);
        trimmed.rsplit(SEPARATOR).next().unwrap_or(trimmed)
    }
}
