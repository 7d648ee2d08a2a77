use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::password_generation::Mode;
use crate::strength::{self, StrengthResult};

/// The most entries a history keeps; older ones fall off the end.
pub const HISTORY_LIMIT: usize = 50;

/// A password that was generated, along with how and when.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub password: crate::Secret,
    pub mode: Mode,
    pub strength: StrengthResult,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Score `password` and stamp it with the current time.
    pub fn new(password: crate::Secret, mode: Mode) -> HistoryEntry {
        let strength = strength::score(password.as_str());
        HistoryEntry {
            password,
            mode,
            strength,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Previously generated passwords, newest first. On disk this is a JSON array of entries.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Load the history at the given path. A missing file is an empty history.
    pub fn load(path: &Path) -> Result<History, HistoryError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no history at {}; starting empty", path.display());
                return Ok(History::new());
            }
            Err(err) => return Err(HistoryErrorRepr::Io(err).into()),
        };
        let mut entries: Vec<HistoryEntry> =
            serde_json::from_reader(BufReader::new(file)).map_err(HistoryErrorRepr::Decode)?;
        entries.truncate(HISTORY_LIMIT);
        log::debug!("loaded {} history entries from {}", entries.len(), path.display());
        Ok(History { entries })
    }

    /// Write the history to the given path, replacing whatever is there.
    ///
    /// The data goes to a `.writing` file next to the target first, which is then renamed over
    /// it, so a failed write never leaves a truncated history behind.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(HistoryErrorRepr::Io)?;
        }
        let temp_path = {
            let mut p = path.as_os_str().to_os_string();
            p.push(".writing");
            PathBuf::from(p)
        };

        let mut writer = BufWriter::new(File::create(&temp_path).map_err(HistoryErrorRepr::Io)?);
        serde_json::to_writer_pretty(&mut writer, &self.entries)
            .map_err(HistoryErrorRepr::Encode)?;
        writer.flush().map_err(HistoryErrorRepr::Io)?;
        drop(writer);

        fs::rename(&temp_path, path).map_err(HistoryErrorRepr::Io)?;
        log::debug!("saved {} history entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Add an entry at the front, dropping the oldest ones past [`HISTORY_LIMIT`].
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove the entry at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<HistoryEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove every entry.
    ///
    /// Returns `false` if the history was already empty.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Write the passwords as a numbered plain-text list, under a header carrying `date`.
    pub fn export_text(&self, mut output: impl Write, date: &str) -> io::Result<()> {
        writeln!(output, "AutoPass - Generated Passwords")?;
        writeln!(output, "Date: {}", date)?;
        writeln!(output, "{}", "=".repeat(40))?;
        writeln!(output)?;
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(output, "{}. {}", index + 1, entry.password.as_str())?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct HistoryError(HistoryErrorRepr);

impl From<HistoryErrorRepr> for HistoryError {
    fn from(err: HistoryErrorRepr) -> HistoryError {
        HistoryError(err)
    }
}

#[derive(Debug, thiserror::Error)]
enum HistoryErrorRepr {
    #[error("I/O error: {0}")]
    Io(io::Error),
    #[error("failed to decode the password history: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode the password history: {0}")]
    Encode(#[source] serde_json::Error),
}
