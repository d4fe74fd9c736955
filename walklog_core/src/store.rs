//! Per-day record persistence.
//!
//! Each calendar day is stored as one JSON file. Reads take a shared lock,
//! writes go through a locked temp file that is renamed over the original,
//! so a reader never sees a partially written record.

use crate::{DailyRecord, Error, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Key-value storage of daily records keyed by date
pub trait DayStore {
    /// Load the record for `date`, or an empty record if none is stored
    fn load(&self, date: NaiveDate) -> Result<DailyRecord>;

    /// Check whether anything is stored for `date`
    fn contains(&self, date: NaiveDate) -> Result<bool>;

    fn save(&mut self, date: NaiveDate, record: &DailyRecord) -> Result<()>;
}

/// File-backed store with one `<YYYY-MM-DD>.json` file per day
pub struct JsonDayStore {
    dir: PathBuf,
}

impl JsonDayStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding the record for `date`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", date.format("%Y-%m-%d")))
    }

    fn read_locked(path: &Path) -> Result<String> {
        let file = File::open(path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read = reader.read_to_string(&mut contents);
        file.unlock()?;
        read?;

        Ok(contents)
    }
}

impl DayStore for JsonDayStore {
    fn load(&self, date: NaiveDate) -> Result<DailyRecord> {
        let path = self.path_for(date);
        if !path.exists() {
            tracing::info!("No record found at {:?}, starting a new day", path);
            return Ok(DailyRecord::empty(date));
        }

        let contents = Self::read_locked(&path)?;
        let record: DailyRecord = serde_json::from_str(&contents).map_err(|e| {
            tracing::error!("Failed to parse record {:?}: {}", path, e);
            Error::Json(e)
        })?;

        if record.date != date {
            tracing::warn!(
                "Record {:?} is dated {} but was loaded for {}",
                path,
                record.date,
                date
            );
        }

        tracing::debug!(
            "Loaded record for {} with {} entries from {:?}",
            date,
            record.entries.len(),
            path
        );
        Ok(record)
    }

    fn contains(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.path_for(date).exists())
    }

    /// Atomically writes the record by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&mut self, date: NaiveDate, record: &DailyRecord) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(date);

        // Create unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(&self.dir)?;

        // Acquire exclusive lock on the temp file to serialize concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(record)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        // Atomically replace old record file
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved record for {} to {:?}", date, path);
        Ok(())
    }
}

/// In-memory store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryDayStore {
    records: HashMap<NaiveDate, DailyRecord>,
}

impl MemoryDayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records.get(&date)
    }
}

impl DayStore for MemoryDayStore {
    fn load(&self, date: NaiveDate) -> Result<DailyRecord> {
        Ok(self
            .records
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DailyRecord::empty(date)))
    }

    fn contains(&self, date: NaiveDate) -> Result<bool> {
        Ok(self.records.contains_key(&date))
    }

    fn save(&mut self, date: NaiveDate, record: &DailyRecord) -> Result<()> {
        self.records.insert(date, record.clone());
        Ok(())
    }
}
