use super::BackupPlugin;
use crate::core::config::PluginOptions;
use crate::core::errors::{Error, Result};
use crate::models::level_spec::LevelSpec;
use crate::models::save_packet::{FileType, SavePacket};
use crate::services::io::{IoRequest, OpenMode};
use serde::Serialize;

/// Read size the host asks for on every `Read` call.
pub const DEFAULT_READ_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub levels: LevelSpec,
    pub directories: u64,
    pub files: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// Minimal backup host: drives a plugin the way the file daemon would.
pub struct HostDriver<'a, P: BackupPlugin + ?Sized> {
    plugin: &'a mut P,
    read_size: usize,
}

impl<'a, P: BackupPlugin + ?Sized> HostDriver<'a, P> {
    pub fn new(plugin: &'a mut P) -> Self {
        Self {
            plugin,
            read_size: DEFAULT_READ_SIZE,
        }
    }

    pub fn with_read_size(mut self, read_size: usize) -> Self {
        self.read_size = read_size.max(1);
        self
    }

    /// Runs one backup job, calling `on_packet` for every entry the plugin
    /// hands out. `end` is called even when `begin` fails, unless the plugin
    /// refused because another job is still running.
    pub fn run_backup<F>(&mut self, options: &PluginOptions, mut on_packet: F) -> Result<JobReport>
    where
        F: FnMut(&SavePacket),
    {
        if let Err(err) = self.plugin.begin(options) {
            if !matches!(err, Error::State(_)) {
                self.plugin.end()?;
            }
            return Err(err);
        }

        let mut report = JobReport {
            levels: options.levels,
            ..JobReport::default()
        };
        let result = self.drain(&mut report, &mut on_packet);
        self.plugin.end()?;
        result.map(|()| report)
    }

    fn drain(&mut self, report: &mut JobReport, on_packet: &mut dyn FnMut(&SavePacket)) -> Result<()> {
        while let Some(next) = self.plugin.next_entry()? {
            match next.packet.file_type {
                FileType::DirEnd => report.directories += 1,
                FileType::Regular => report.files += 1,
            }
            if !next.packet.no_read {
                report.bytes_read += self.read_all(&next.packet.fname)?;
            }
            on_packet(&next.packet);
            if !next.more {
                break;
            }
        }
        Ok(())
    }

    fn read_all(&mut self, fname: &str) -> Result<u64> {
        self.plugin.transfer(IoRequest::Open {
            fname: fname.to_string(),
            mode: OpenMode::Read,
        })?;
        let mut total = 0u64;
        loop {
            let outcome = self.plugin.transfer(IoRequest::Read {
                count: self.read_size,
            })?;
            if outcome.status <= 0 {
                break;
            }
            total += outcome.status as u64;
        }
        self.plugin.transfer(IoRequest::Close)?;
        Ok(total)
    }

    /// Replays previously backed up packets as a restore: every regular file
    /// is opened for writing, sent `payload` (if any) and closed.
    pub fn run_restore(&mut self, packets: &[SavePacket], payload: &[u8]) -> Result<JobReport> {
        let mut report = JobReport::default();
        for packet in packets {
            if packet.file_type == FileType::DirEnd {
                report.directories += 1;
                continue;
            }
            report.files += 1;
            self.plugin.transfer(IoRequest::Open {
                fname: packet.fname.clone(),
                mode: OpenMode::Write,
            })?;
            if !payload.is_empty() {
                let outcome = self.plugin.transfer(IoRequest::Write {
                    buf: payload.to_vec(),
                })?;
                report.bytes_written += outcome.status.max(0) as u64;
            }
            self.plugin.transfer(IoRequest::Close)?;
        }
        Ok(report)
    }
}
