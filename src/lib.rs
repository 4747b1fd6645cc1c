//! Backup plugin that feeds a host randomly named, empty directory trees
//! for load testing, without touching real storage.

pub mod core;
pub mod models;
pub mod plugin;
pub mod services;

pub use crate::core::config::PluginOptions;
pub use crate::core::errors::{Error, Result};
pub use crate::models::entry::{EntryKind, GeneratedEntry};
pub use crate::models::level_spec::LevelSpec;
pub use crate::plugin::host::{HostDriver, JobReport};
pub use crate::plugin::{BackupPlugin, GenRandomFilesPlugin, NextEntry};
pub use crate::services::generator::RandomTreeGenerator;
