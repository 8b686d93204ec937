//! Runtime settings shared by the session, the TUI and the binary.

use std::path::PathBuf;
use std::time::Duration;

/// Default artificial delay between a command and its reply.
pub const DEFAULT_DELAY_MS: u64 = 1500;

pub const LOG_FILE: &str = "sitewise.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the persisted blobs and the log file.
    pub data_dir: PathBuf,
    /// Pause before a command is answered.
    pub delay: Duration,
}

impl Config {
    #[must_use]
    pub fn new(data_dir: PathBuf, delay_ms: u64) -> Self {
        Self {
            data_dir,
            delay: Duration::from_millis(delay_ms),
        }
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_data_dir(), DEFAULT_DELAY_MS)
    }
}

/// `<platform data dir>/sitewise`, or `./.sitewise` when the platform has none.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("sitewise"))
        .unwrap_or_else(|| PathBuf::from(".sitewise"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_lives_in_the_data_dir() {
        let config = Config::new(PathBuf::from("/tmp/sw"), 0);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/sw/sitewise.log"));
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn default_dir_is_named_after_the_app() {
        assert!(default_data_dir().ends_with("sitewise") || default_data_dir().ends_with(".sitewise"));
    }
}
