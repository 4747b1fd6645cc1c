use crate::models::entry::GeneratedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    NotStarted,
    Streaming,
    Done,
}

/// Whether the host should ask for another entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    More,
    Done,
}

/// Hands out one job's entries one at a time.
///
/// Entries go out from the end of the generated sequence backwards, so every
/// directory is delivered after all of its contents.
#[derive(Debug)]
pub struct Sequencer {
    entries: Vec<GeneratedEntry>,
    // Number of entries not yet handed out; the next one is `entries[cursor - 1]`.
    cursor: usize,
    state: SequencerState,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            state: SequencerState::NotStarted,
        }
    }

    pub fn load(&mut self, entries: Vec<GeneratedEntry>) {
        self.cursor = entries.len();
        self.state = if entries.is_empty() {
            SequencerState::Done
        } else {
            SequencerState::Streaming
        };
        self.entries = entries;
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn remaining(&self) -> usize {
        self.cursor
    }

    pub fn next(&mut self) -> Option<(&GeneratedEntry, Progress)> {
        if self.state != SequencerState::Streaming {
            return None;
        }
        self.cursor -= 1;
        let progress = if self.cursor == 0 {
            self.state = SequencerState::Done;
            Progress::Done
        } else {
            Progress::More
        };
        Some((&self.entries[self.cursor], progress))
    }

    pub fn reset(&mut self) {
        self.entries = Vec::new();
        self.cursor = 0;
        self.state = SequencerState::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(path: &str) -> GeneratedEntry {
        GeneratedEntry::directory(path.to_string())
    }

    fn file(path: &str) -> GeneratedEntry {
        GeneratedEntry::file(path.to_string())
    }

    #[test]
    fn starts_idle() {
        let mut seq = Sequencer::new();
        assert_eq!(seq.state(), SequencerState::NotStarted);
        assert!(seq.next().is_none());
    }

    #[test]
    fn drains_backwards_and_flags_the_last_entry() {
        let mut seq = Sequencer::new();
        seq.load(vec![dir("/r/"), dir("/r/1-a/"), file("/r/1-a/f1"), file("/r/1-a/f2")]);
        assert_eq!(seq.state(), SequencerState::Streaming);
        assert_eq!(seq.remaining(), 4);

        let mut seen = Vec::new();
        while let Some((entry, progress)) = seq.next() {
            seen.push((entry.path.clone(), progress));
        }

        assert_eq!(
            seen,
            vec![
                ("/r/1-a/f2".to_string(), Progress::More),
                ("/r/1-a/f1".to_string(), Progress::More),
                ("/r/1-a/".to_string(), Progress::More),
                ("/r/".to_string(), Progress::Done),
            ]
        );
        assert_eq!(seq.state(), SequencerState::Done);
        assert_eq!(seq.remaining(), 0);
        assert!(seq.next().is_none());
    }

    #[test]
    fn single_entry_is_immediately_done() {
        let mut seq = Sequencer::new();
        seq.load(vec![dir("/r/")]);
        let (_, progress) = seq.next().unwrap();
        assert_eq!(progress, Progress::Done);
    }

    #[test]
    fn empty_load_is_done() {
        let mut seq = Sequencer::new();
        seq.load(Vec::new());
        assert_eq!(seq.state(), SequencerState::Done);
        assert!(seq.next().is_none());
    }

    #[test]
    fn reset_returns_to_not_started() {
        let mut seq = Sequencer::new();
        seq.load(vec![dir("/r/"), file("/r/f")]);
        seq.next();
        seq.reset();
        assert_eq!(seq.state(), SequencerState::NotStarted);
        assert_eq!(seq.remaining(), 0);
        assert!(seq.next().is_none());
    }
}
