//! Tunable constants for every subsystem.
//!
//! A handful of numbers are implementation defaults rather than fixed
//! constants: the line capacity seed, the writing-context slot growth
//! increment, the watcher's pending-move TTL, and the directory creation
//! mode. A real deployment wants to tune these without a recompile, so they
//! live here as a `serde::Deserialize` struct loadable from TOML, with
//! defaults matching each of those values exactly. Behavior is unchanged
//! unless a caller opts into a non-default config.

use std::path::Path;

/// All tunable numeric knobs for a [`crate::manager::Manager`].
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial byte capacity reserved for a new, empty line. Doubles from
    /// here as bytes are inserted.
    pub line_initial_capacity: usize,
    /// Initial slot count of the writing context's buffer table.
    pub writing_initial_capacity: usize,
    /// Fixed increment the writing context's buffer table grows by once full.
    pub writing_capacity_increment: usize,
    /// Initial reserved capacity for the watcher's watch-entry table.
    pub watcher_initial_capacity: usize,
    /// Seconds a pending move waits for its matching `MOVED_TO` before being
    /// flushed as a `DELETE`.
    pub watcher_pending_ttl_secs: u64,
    /// Mode bits used when creating a directory through the OS adapter.
    pub dir_create_mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_initial_capacity: 256,
            writing_initial_capacity: 32,
            writing_capacity_increment: 32,
            watcher_initial_capacity: 32,
            watcher_pending_ttl_secs: 1,
            dir_create_mode: 0o755,
        }
    }
}

impl Config {
    /// Parses a config from TOML text, falling back to defaults for any
    /// field the text omits.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads a config from a TOML file on disk.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    pub(crate) fn watcher_pending_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.watcher_pending_ttl_secs)
    }
}
