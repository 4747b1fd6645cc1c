//! Synthetic directory tree generation.
//!
//! A tree has a root directory, three nested directory levels and a batch of
//! files in every third-level directory. Directory names are prefixed with
//! their 1-based position (`3-<random>`) so siblings never collide.

use crate::models::entry::{GeneratedEntry, SEPARATOR};
use crate::models::level_spec::LevelSpec;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

pub const LEVEL1_NAME_LEN: usize = 15;
pub const LEVEL2_NAME_LEN: RangeInclusive<usize> = 20..=30;
pub const LEVEL3_NAME_LEN: RangeInclusive<usize> = 30..=40;
pub const FILE_NAME_LEN: RangeInclusive<usize> = 10..=70;

pub struct RandomTreeGenerator<R: Rng> {
    rng: R,
    levels: LevelSpec,
    root: String,
}

impl RandomTreeGenerator<StdRng> {
    /// Generator seeded from the OS entropy source. Every job gets its own,
    /// so parallel workers never replay the same names.
    pub fn from_entropy(levels: LevelSpec, topdir: &str) -> Self {
        Self::new(levels, topdir, StdRng::from_entropy())
    }

    pub fn seeded(levels: LevelSpec, topdir: &str, seed: u64) -> Self {
        Self::new(levels, topdir, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomTreeGenerator<R> {
    pub fn new(levels: LevelSpec, topdir: &str, rng: R) -> Self {
        Self {
            rng,
            levels,
            root: root_path(topdir),
        }
    }

    pub fn levels(&self) -> LevelSpec {
        self.levels
    }

    /// Root directory path, with exactly one trailing separator.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Lazily walks the tree in pre-order: root, then each directory
    /// followed by everything beneath it.
    pub fn entries(&mut self) -> TreeEntries<'_, R> {
        TreeEntries {
            generator: self,
            step: Step::Root,
            counters: [0; 4],
            dirs: [String::new(), String::new(), String::new()],
            emitted: 0,
        }
    }

    pub fn generate(&mut self) -> Vec<GeneratedEntry> {
        let mut entries = Vec::with_capacity(capacity_hint(self.levels.total_entries()));
        entries.extend(self.entries());
        entries
    }

    fn random_name(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    fn random_len(&mut self, range: RangeInclusive<usize>) -> usize {
        self.rng.gen_range(range)
    }
}

fn root_path(topdir: &str) -> String {
    let mut root = topdir.trim_end_matches(SEPARATOR).to_string();
    root.push(SEPARATOR);
    root
}

fn capacity_hint(total: u64) -> usize {
    // Don't pre-allocate absurd sizes; the Vec grows if we are wrong.
    usize::try_from(total).unwrap_or(usize::MAX).min(1 << 20)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Root,
    Level1,
    Level2,
    Level3,
    Files,
    Finished,
}

/// Forward-only iterator over a generated tree. Names are drawn as entries
/// are produced, so the whole tree never has to be held in memory.
pub struct TreeEntries<'a, R: Rng> {
    generator: &'a mut RandomTreeGenerator<R>,
    step: Step,
    /// Position within level 1, 2, 3 and the current file batch.
    counters: [u64; 4],
    /// Current level 1, 2 and 3 directory paths.
    dirs: [String; 3],
    emitted: u64,
}

impl<R: Rng> TreeEntries<'_, R> {
    fn enter_dir(&mut self, level: usize, name_len: usize) -> GeneratedEntry {
        self.counters[level] += 1;
        let name = self.generator.random_name(name_len);
        let parent = match level {
            0 => self.generator.root.as_str(),
            _ => self.dirs[level - 1].as_str(),
        };
        let path = format!("{parent}{}-{name}{SEPARATOR}", self.counters[level]);
        self.dirs[level].clone_from(&path);
        self.counters[level + 1] = 0;
        GeneratedEntry::directory(path)
    }
}

impl<R: Rng> Iterator for TreeEntries<'_, R> {
    type Item = GeneratedEntry;

    fn next(&mut self) -> Option<GeneratedEntry> {
        let LevelSpec { l1, l2, l3, l4 } = self.generator.levels;
        let entry = loop {
            match self.step {
                Step::Root => {
                    self.step = Step::Level1;
                    self.counters[0] = 0;
                    break GeneratedEntry::directory(self.generator.root.clone());
                }
                Step::Level1 => {
                    if self.counters[0] >= l1 {
                        self.step = Step::Finished;
                        continue;
                    }
                    self.step = Step::Level2;
                    break self.enter_dir(0, LEVEL1_NAME_LEN);
                }
                Step::Level2 => {
                    if self.counters[1] >= l2 {
                        self.step = Step::Level1;
                        continue;
                    }
                    self.step = Step::Level3;
                    let len = self.generator.random_len(LEVEL2_NAME_LEN);
                    break self.enter_dir(1, len);
                }
                Step::Level3 => {
                    if self.counters[2] >= l3 {
                        self.step = Step::Level2;
                        continue;
                    }
                    self.step = Step::Files;
                    let len = self.generator.random_len(LEVEL3_NAME_LEN);
                    break self.enter_dir(2, len);
                }
                Step::Files => {
                    if self.counters[3] >= l4 {
                        self.step = Step::Level3;
                        continue;
                    }
                    self.counters[3] += 1;
                    let len = self.generator.random_len(FILE_NAME_LEN);
                    let name = self.generator.random_name(len);
                    break GeneratedEntry::file(format!("{}{name}", self.dirs[2]));
                }
                Step::Finished => return None,
            }
        };
        self.emitted += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .generator
            .levels
            .total_entries()
            .saturating_sub(self.emitted);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
