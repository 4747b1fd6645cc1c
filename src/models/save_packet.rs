use super::entry::{GeneratedEntry, SEPARATOR};
use serde::Serialize;

pub const S_IFDIR: u32 = 0o040000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IRWXU: u32 = 0o700;

/// Record type reported to the host for each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// Directory, sent after everything it contains.
    DirEnd,
    Regular,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatPacket {
    pub mode: u32,
    pub size: u64,
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
}

impl StatPacket {
    fn with_mode(mode: u32, timestamp: i64) -> Self {
        Self {
            mode,
            size: 0,
            atime: timestamp,
            mtime: timestamp,
            ctime: timestamp,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.mode & S_IFDIR == S_IFDIR
    }
}

/// What the host needs to know to back up one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePacket {
    pub fname: String,
    /// Directory path including the trailing separator; `None` for files.
    pub link: Option<String>,
    pub file_type: FileType,
    pub stat: StatPacket,
    /// Set when the host must not open the entry for reading.
    pub no_read: bool,
}

impl SavePacket {
    pub fn from_entry(entry: &GeneratedEntry, timestamp: i64) -> Self {
        if entry.is_dir() {
            let trimmed = entry.path.trim_end_matches(SEPARATOR);
            let fname = if trimmed.is_empty() {
                SEPARATOR.to_string()
            } else {
                trimmed.to_string()
            };
            Self {
                fname,
                link: Some(entry.path.clone()),
                file_type: FileType::DirEnd,
                stat: StatPacket::with_mode(S_IRWXU | S_IFDIR, timestamp),
                no_read: true,
            }
        } else {
            Self {
                fname: entry.path.clone(),
                link: None,
                file_type: FileType::Regular,
                stat: StatPacket::with_mode(S_IRWXU | S_IFREG, timestamp),
                no_read: false,
            }
        }
    }
}
