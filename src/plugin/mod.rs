pub mod host;

use crate::core::config::PluginOptions;
use crate::core::errors::{Error, Result};
use crate::models::level_spec::LevelSpec;
use crate::models::save_packet::SavePacket;
use crate::services::generator::RandomTreeGenerator;
use crate::services::io::{IoOutcome, IoRequest, SimulatedIo};
use crate::services::sequencer::{Progress, Sequencer, SequencerState};
use time::OffsetDateTime;

/// The calls a backup host makes into a plugin during one job.
pub trait BackupPlugin {
    /// Prepares a job. Fails the whole job on error.
    fn begin(&mut self, options: &PluginOptions) -> Result<()>;

    /// Next entry to back up, or `None` when nothing is left.
    fn next_entry(&mut self) -> Result<Option<NextEntry>>;

    fn transfer(&mut self, request: IoRequest) -> Result<IoOutcome>;

    /// Releases per-job state. The plugin may be reused afterwards.
    fn end(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextEntry {
    pub packet: SavePacket,
    /// Whether the host should call `next_entry` again.
    pub more: bool,
}

/// Backs up a randomly named tree that exists only in memory.
#[derive(Debug, Default)]
pub struct GenRandomFilesPlugin {
    sequencer: Sequencer,
    io: SimulatedIo,
    levels: Option<LevelSpec>,
    started_at: i64,
}

impl GenRandomFilesPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels of the running job, if any.
    pub fn levels(&self) -> Option<LevelSpec> {
        self.levels
    }

    pub fn remaining(&self) -> usize {
        self.sequencer.remaining()
    }
}

impl BackupPlugin for GenRandomFilesPlugin {
    fn begin(&mut self, options: &PluginOptions) -> Result<()> {
        if self.levels.is_some() {
            return Err(Error::State("backup job already started"));
        }
        options.validate()?;

        tracing::debug!(
            "Generating filenames at topdir {} with levels {}",
            options.topdir,
            options.levels
        );
        let levels = options.levels;
        let mut generator = match options.seed {
            Some(seed) => RandomTreeGenerator::seeded(levels, &options.topdir, seed),
            None => RandomTreeGenerator::from_entropy(levels, &options.topdir),
        };
        tracing::info!(
            "Generating {} * {} * {} * {} = {} test files",
            levels.l1,
            levels.l2,
            levels.l3,
            levels.l4,
            levels.file_count()
        );

        let entries = generator.generate();
        // The root alone is not worth a job.
        if entries.len() <= 1 {
            tracing::error!("No (allowed) files to backup found below {}", generator.root());
            return Err(Error::NoEntries(generator.root().to_string()));
        }

        self.started_at = OffsetDateTime::now_utc().unix_timestamp();
        self.sequencer.load(entries);
        self.levels = Some(levels);
        Ok(())
    }

    fn next_entry(&mut self) -> Result<Option<NextEntry>> {
        if self.sequencer.state() == SequencerState::NotStarted {
            return Err(Error::State("backup job not started"));
        }
        let Some((entry, progress)) = self.sequencer.next() else {
            tracing::debug!("No files to backup");
            return Ok(None);
        };
        tracing::debug!("file: {}", entry.path);

        Ok(Some(NextEntry {
            packet: SavePacket::from_entry(entry, self.started_at),
            more: progress == Progress::More,
        }))
    }

    fn transfer(&mut self, request: IoRequest) -> Result<IoOutcome> {
        Ok(self.io.handle(request))
    }

    fn end(&mut self) -> Result<()> {
        self.sequencer.reset();
        self.io = SimulatedIo::new();
        self.levels = None;
        Ok(())
    }
}
