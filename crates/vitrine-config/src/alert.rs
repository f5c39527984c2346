//! Persisted dismissal of the fraud alert banner.

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Whether the banner was dismissed, and when (unix seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertState {
    pub dismissed: bool,
    pub dismissed_at: Option<i64>,
}

impl AlertState {
    /// Read the state file; a missing file means never dismissed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn dismiss(&mut self, now: DateTime<Utc>) {
        self.dismissed = true;
        self.dismissed_at = Some(now.timestamp());
    }

    /// The banner shows unless dismissed less than `reshow_after` ago.
    ///
    /// A dismissal without a timestamp never expires.
    pub fn should_show(&self, now: DateTime<Utc>, reshow_after: TimeDelta) -> bool {
        if !self.dismissed {
            return true;
        }
        match self.dismissed_at {
            Some(at) => now.timestamp().saturating_sub(at) >= reshow_after.num_seconds(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_fresh_state_shows_banner() {
        assert!(AlertState::default().should_show(at(0), TimeDelta::hours(24)));
    }

    #[test]
    fn test_dismissal_expires() {
        let mut state = AlertState::default();
        state.dismiss(at(1_000));
        let day = TimeDelta::hours(24);
        assert!(!state.should_show(at(1_000 + 3_600), day));
        assert!(state.should_show(at(1_000 + 86_400), day));
    }

    #[test]
    fn test_dismissal_without_timestamp_is_permanent() {
        let state = AlertState {
            dismissed: true,
            dismissed_at: None,
        };
        assert!(!state.should_show(at(i64::from(u32::MAX)), TimeDelta::hours(1)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("vitrine-alert-{}", std::process::id()));
        let path = dir.join("nested/alert.toml");
        assert_eq!(AlertState::load(&path).unwrap(), AlertState::default());

        let mut state = AlertState::default();
        state.dismiss(at(1_700_000_000));
        state.save(&path).unwrap();
        assert_eq!(AlertState::load(&path).unwrap(), state);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("vitrine-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("alert.toml");
        fs::write(&path, "dismissed = \"maybe\"").unwrap();
        assert!(matches!(
            AlertState::load(&path),
            Err(ConfigError::Parse { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
