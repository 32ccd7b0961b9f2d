//! Phonetic Dictionary
//!
//! Maps a character to its ordered zhuyin transcriptions, loaded once from a
//! tab-separated table:
//!
//! ```text
//! 愛	ㄞˋ
//! 了	˙ㄌㄜ	ㄌㄧㄠˇ
//! ```
//!
//! The first successful load wins; later loads are ignored. Readers never
//! take a lock once the table is in place.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

/// Dictionary loading errors
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The source could not be read
    #[error("failed to read dictionary source: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a load call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This call populated the dictionary
    Loaded { entries: usize, skipped: usize },
    /// A previous call already populated it; the source was not read
    AlreadyLoaded,
}

type Table = HashMap<String, Vec<String>>;

/// Character to zhuyin lookup table
#[derive(Debug, Default)]
pub struct PhoneticDictionary {
    table: OnceLock<Table>,
    /// Serializes first loads so only one source is ever parsed
    load_guard: Mutex<()>,
}

impl PhoneticDictionary {
    /// Create an empty, not yet loaded dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary already loaded from an in-memory table
    pub fn from_tsv(source: &str) -> Self {
        let dict = Self::new();
        dict.load_str(source).ok();
        dict
    }

    /// Whether a load has completed
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Load from any buffered reader.
    ///
    /// Concurrent callers block until the first load finishes and then observe
    /// its result. A failed read leaves the dictionary unloaded.
    pub fn load<R: BufRead>(&self, reader: R) -> Result<LoadOutcome, DictionaryError> {
        if self.is_loaded() {
            debug!("Dictionary already loaded, ignoring source");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let _guard = self.load_guard.lock();
        if self.is_loaded() {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let (table, skipped) = parse_table(reader)?;
        let entries = self.table.get_or_init(|| table).len();

        info!("Loaded zhuyin dictionary: {} entries ({} lines skipped)", entries, skipped);
        Ok(LoadOutcome::Loaded { entries, skipped })
    }

    /// Load from a string
    pub fn load_str(&self, source: &str) -> Result<LoadOutcome, DictionaryError> {
        self.load(Cursor::new(source))
    }

    /// Load from a UTF-8 TSV file
    pub fn load_path(&self, path: &Path) -> Result<LoadOutcome, DictionaryError> {
        if self.is_loaded() {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Preferred (first) reading for a character
    pub fn lookup(&self, character: char) -> Option<&str> {
        self.readings(character)
            .and_then(|list| list.first())
            .map(String::as_str)
    }

    /// Every reading recorded for a character, in table order
    pub fn readings(&self, character: char) -> Option<&[String]> {
        let table = self.table.get()?;
        let mut buf = [0u8; 4];
        table
            .get(character.encode_utf8(&mut buf) as &str)
            .map(Vec::as_slice)
    }

    /// Membership test used by the segmenter filter
    pub fn contains_key(&self, character: char) -> bool {
        self.readings(character).is_some()
    }

    /// Preferred reading, or the character itself when there is none
    pub fn reading_or_self(&self, character: char) -> String {
        self.lookup(character)
            .map(str::to_string)
            .unwrap_or_else(|| character.to_string())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.table.get().map(HashMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse the TSV table, returning it with the count of skipped lines.
///
/// Invalid UTF-8 is replaced per line rather than failing the load.
fn parse_table<R: BufRead>(reader: R) -> Result<(Table, usize), DictionaryError> {
    let mut table = Table::new();
    let mut skipped = 0;

    for bytes in reader.split(b'\n') {
        let bytes = bytes?;
        let line = String::from_utf8_lossy(&bytes);
        let mut columns = line.trim().split('\t');

        let key = columns.next().unwrap_or_default();
        let readings: Vec<String> = columns.map(str::to_string).collect();
        if readings.is_empty() {
            skipped += 1;
            continue;
        }

        // Duplicate keys append
        table.entry(key.to_string()).or_default().extend(readings);
    }

    Ok((table, skipped))
}
