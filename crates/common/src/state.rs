//! Flat-file state store — two independent scalar slots.
//!
//! Each monitored metric keeps exactly one integer between runs (the last
//! observed subscriber count, the next view milestone). A slot that is
//! missing, unreadable, or corrupt reads as `None`, which callers treat as
//! first-run semantics. Slots are read once and written once per run with
//! no locking; concurrent runs are last-writer-wins.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

/// Minimal load/save capability over a single persisted integer.
pub trait StateSlot {
    /// Read the stored value. `None` on missing file, read error, or
    /// unparseable content — never an error.
    fn load(&self) -> Option<u64>;

    /// Overwrite the slot with the decimal representation of `value`.
    fn save(&self, value: u64) -> anyhow::Result<()>;
}

/// A slot backed by one plain-text file holding one decimal integer.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateSlot for FileSlot {
    fn load(&self) -> Option<u64> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Failed to read state file, treating as first run"
                    );
                }
                return None;
            }
        };

        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "State file holds no parseable integer, treating as first run"
                );
                None
            }
        }
    }

    fn save(&self, value: u64) -> anyhow::Result<()> {
        fs::write(&self.path, value.to_string())?;
        Ok(())
    }
}

/// In-memory slot for exercising business logic in tests without touching
/// the filesystem.
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Cell<Option<u64>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Cell::new(Some(value)),
        }
    }
}

impl StateSlot for MemorySlot {
    fn load(&self) -> Option<u64> {
        self.value.get()
    }

    fn save(&self, value: u64) -> anyhow::Result<()> {
        self.value.set(Some(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_in(dir: &tempfile::TempDir, name: &str) -> FileSlot {
        FileSlot::new(dir.path().join(name))
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir, "absent.txt");
        assert_eq!(slot.load(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir, "count.txt");

        slot.save(12845).unwrap();
        assert_eq!(slot.load(), Some(12845));

        // File contains exactly the decimal string
        let raw = std::fs::read_to_string(slot.path()).unwrap();
        assert_eq!(raw, "12845");
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir, "count.txt");

        slot.save(100).unwrap();
        slot.save(90).unwrap();
        assert_eq!(slot.load(), Some(90));
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir, "corrupt.txt");

        std::fs::write(slot.path(), "not a number").unwrap();
        assert_eq!(slot.load(), None);

        std::fs::write(slot.path(), "-5").unwrap();
        assert_eq!(slot.load(), None, "Negative values are not valid counts");
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let slot = slot_in(&dir, "padded.txt");

        std::fs::write(slot.path(), "  4200\n").unwrap();
        assert_eq!(slot.load(), Some(4200));
    }

    #[test]
    fn test_memory_slot_round_trips() {
        let slot = MemorySlot::new();
        assert_eq!(slot.load(), None);

        slot.save(7).unwrap();
        assert_eq!(slot.load(), Some(7));

        let seeded = MemorySlot::with_value(30);
        assert_eq!(seeded.load(), Some(30));
    }
}
