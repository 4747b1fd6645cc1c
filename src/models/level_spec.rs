use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of a synthetic tree: how many directories on each of the three
/// directory levels, and how many files in every third-level directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelSpec {
    pub l1: u64,
    pub l2: u64,
    pub l3: u64,
    pub l4: u64,
}

impl LevelSpec {
    pub fn new(l1: u64, l2: u64, l3: u64, l4: u64) -> Self {
        Self { l1, l2, l3, l4 }
    }

    /// Number of directories below the root.
    pub fn directory_count(&self) -> u64 {
        let level1 = self.l1;
        let level2 = level1.saturating_mul(self.l2);
        let level3 = level2.saturating_mul(self.l3);
        level1.saturating_add(level2).saturating_add(level3)
    }

    pub fn file_count(&self) -> u64 {
        self.l1
            .saturating_mul(self.l2)
            .saturating_mul(self.l3)
            .saturating_mul(self.l4)
    }

    /// Root + directories + files.
    pub fn total_entries(&self) -> u64 {
        1u64.saturating_add(self.directory_count())
            .saturating_add(self.file_count())
    }
}

impl FromStr for LevelSpec {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(Error::invalid_option(
                "levels",
                format!(
                    "expected four comma-separated integers, got {} field(s) in '{value}'",
                    fields.len()
                ),
            ));
        }

        let mut parsed = [0u64; 4];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field.parse::<u64>().map_err(|e| {
                Error::invalid_option("levels", format!("'{field}' is not a non-negative integer: {e}"))
            })?;
        }

        let [l1, l2, l3, l4] = parsed;
        Ok(Self::new(l1, l2, l3, l4))
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.l1, self.l2, self.l3, self.l4)
    }
}
