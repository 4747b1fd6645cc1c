use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    Read,
    /// Create or overwrite, as requested by a restore.
    Write,
}

/// One I/O call issued by the host against the current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoRequest {
    Open { fname: String, mode: OpenMode },
    Close,
    Seek { offset: i64 },
    Read { count: usize },
    Write { buf: Vec<u8> },
}

impl IoRequest {
    pub fn name(&self) -> &'static str {
        match self {
            IoRequest::Open { .. } => "open",
            IoRequest::Close => "close",
            IoRequest::Seek { .. } => "seek",
            IoRequest::Read { .. } => "read",
            IoRequest::Write { .. } => "write",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoOutcome {
    /// Bytes moved by a read or write; 0 for everything else.
    pub status: i64,
    pub io_errno: i32,
    pub buf: Vec<u8>,
}

impl IoOutcome {
    fn transferred(count: usize) -> Self {
        Self {
            status: i64::try_from(count).unwrap_or(i64::MAX),
            ..Self::default()
        }
    }
}

/// Stand-in for file access: acknowledges every call without touching storage.
#[derive(Debug, Default)]
pub struct SimulatedIo {
    current: Option<(String, OpenMode)>,
}

impl SimulatedIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current.as_ref().map(|(fname, _)| fname.as_str())
    }

    pub fn handle(&mut self, request: IoRequest) -> IoOutcome {
        tracing::debug!(
            "plugin io called with function {} (current file {:?})",
            request.name(),
            self.current_file()
        );

        match request {
            IoRequest::Open { fname, mode } => {
                match mode {
                    OpenMode::Read => tracing::debug!("Simulating open file {} for reading", fname),
                    OpenMode::Write => tracing::debug!("Simulating open file {} for writing", fname),
                }
                self.current = Some((fname, mode));
                IoOutcome::default()
            }
            IoRequest::Close => {
                tracing::debug!("Simulating closing file {:?}", self.current_file());
                self.current = None;
                IoOutcome::default()
            }
            IoRequest::Seek { offset } => {
                tracing::trace!("Simulating seek to {} in {:?}", offset, self.current_file());
                IoOutcome::default()
            }
            IoRequest::Read { count } => {
                tracing::trace!("Simulating reading {} from file {:?}", count, self.current_file());
                IoOutcome::default()
            }
            IoRequest::Write { buf } => {
                tracing::trace!(
                    "Simulating writing {} bytes to file {:?}",
                    buf.len(),
                    self.current_file()
                );
                IoOutcome::transferred(buf.len())
            }
        }
    }
}
