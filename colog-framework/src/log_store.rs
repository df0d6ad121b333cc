use crate::{
    layout::Layout,
    log_entry::{EntryError, LogEntry},
    plugin::{self, EntryPostProcessor},
    segmenter,
};
use itertools::Itertools;
use std::{
    cmp::Ordering,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid file pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("unknown log entry {index} (total {total})")]
    OutOfRange { index: usize, total: usize },
}

/// every entry of one run, in file order then line order
#[derive(Debug)]
pub struct LogStore {
    files: Vec<PathBuf>,
    entries: Vec<LogEntry>,
}

impl LogStore {
    /// expand `patterns` as globs, read the matched files in natural order and
    /// split their concatenated lines into entries
    pub fn open<P: AsRef<str>>(
        patterns: &[P],
        layout: &Layout,
        processors: &[Box<dyn EntryPostProcessor>],
    ) -> Result<Self, StoreError> {
        let mut files = expand_file_paths(patterns)?;
        natural_sort(&mut files);
        log::debug!("Reading {} log files: {:?}", files.len(), files);

        let mut contents = Vec::with_capacity(files.len());
        for path in &files {
            contents.push(read_lossy(path)?);
        }

        let lines = contents.iter().flat_map(|text| text.split_inclusive('\n'));
        let mut store = Self::from_lines(lines, layout, processors)?;
        store.files = files;
        Ok(store)
    }

    pub fn from_lines<I, S>(
        lines: I,
        layout: &Layout,
        processors: &[Box<dyn EntryPostProcessor>],
    ) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw_entries = segmenter::segment(lines, &layout.line_start);

        let mut entries = Vec::with_capacity(raw_entries.len());
        for raw in raw_entries {
            let mut entry = LogEntry::new(raw, layout)?;
            plugin::post_construct_all(processors, &mut entry, layout);
            entries.push(entry);
        }
        log::debug!("Built {} log entries", entries.len());

        Ok(Self {
            files: Vec::new(),
            entries,
        })
    }

    /// concrete files the store was read from
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> Result<&LogEntry, StoreError> {
        self.entries.get(index).ok_or(StoreError::OutOfRange {
            index,
            total: self.entries.len(),
        })
    }

    /// entries in `[start, stop)`, clipped to what exists
    pub fn entries(&self, start: usize, stop: usize) -> &[LogEntry] {
        let stop = stop.min(self.entries.len());
        let start = start.min(stop);
        &self.entries[start..stop]
    }
}

/// file text with `\r\n` and lone `\r` line endings turned into `\n`
fn read_lossy(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_newlines(&String::from_utf8_lossy(&bytes)))
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// expand every pattern; a pattern matching nothing contributes nothing
pub fn expand_file_paths<P: AsRef<str>>(patterns: &[P]) -> Result<Vec<PathBuf>, StoreError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let matches = glob::glob(pattern).map_err(|source| StoreError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let before = paths.len();
        for entry in matches {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => log::warn!("Skipping unreadable path: {}", e),
            }
        }
        if paths.len() == before {
            log::warn!("Pattern {} matched no files", pattern);
        }
    }
    Ok(paths)
}

#[derive(Debug, PartialEq, Eq)]
enum NaturalChunk {
    Text(String),
    Number(String),
}

impl NaturalChunk {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        NaturalChunk::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }
}

impl Ord for NaturalChunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NaturalChunk::Number(a), NaturalChunk::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (NaturalChunk::Text(a), NaturalChunk::Text(b)) => a.cmp(b),
            (NaturalChunk::Text(_), NaturalChunk::Number(_)) => Ordering::Less,
            (NaturalChunk::Number(_), NaturalChunk::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for NaturalChunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// alternating text/number chunks, always starting with a (possibly empty) text chunk
fn natural_key(s: &str) -> Vec<NaturalChunk> {
    let mut key = Vec::new();
    for (is_digit, chunk) in &s.chars().chunk_by(|c| c.is_ascii_digit()) {
        let chunk: String = chunk.collect();
        if is_digit {
            if key.is_empty() {
                key.push(NaturalChunk::Text(String::new()));
            }
            key.push(NaturalChunk::number(&chunk));
        } else {
            key.push(NaturalChunk::Text(chunk.to_lowercase()));
        }
    }
    key
}

/// sort so that digit runs compare numerically: `file_2` < `file_03` < `file_10`
pub fn natural_sort<P: AsRef<Path>>(paths: &mut [P]) {
    paths.sort_by_cached_key(|path| natural_key(&path.as_ref().to_string_lossy()));
}
