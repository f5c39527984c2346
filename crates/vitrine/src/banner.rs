//! The dismissible fraud alert banner.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, warn};
use vitrine_config::{AlertConfig, AlertState};

/// Alert banner with its persisted dismissal.
#[derive(Debug)]
pub struct AlertBanner {
    config: AlertConfig,
    state: AlertState,
    /// Where dismissals are stored; `None` keeps them in memory only.
    path: Option<PathBuf>,
}

impl AlertBanner {
    /// Load the dismissal state from `path`. Unreadable state counts as never dismissed.
    pub fn new(config: AlertConfig, path: Option<PathBuf>) -> Self {
        let state = match path.as_deref().map(AlertState::load) {
            Some(Ok(state)) => state,
            Some(Err(err)) => {
                warn!(error = %err, "ignoring unreadable alert state");
                AlertState::default()
            }
            None => AlertState::default(),
        };
        Self {
            config,
            state,
            path,
        }
    }

    pub fn message(&self) -> &str {
        &self.config.message
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.config.enabled
            && self.state.should_show(
                now,
                TimeDelta::hours(i64::from(self.config.reshow_after_hours)),
            )
    }

    /// Hide the banner and persist the dismissal.
    pub fn dismiss(&mut self, now: DateTime<Utc>) {
        if !self.is_visible(now) {
            return;
        }
        self.state.dismiss(now);
        info!("alert banner dismissed");
        if let Some(path) = &self.path
            && let Err(err) = self.state.save(path)
        {
            warn!(error = %err, "failed to persist alert dismissal");
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
    fn test_dismiss_hides_until_expiry() {
        let mut banner = AlertBanner::new(AlertConfig::default(), None);
        assert!(banner.is_visible(at(0)));
        banner.dismiss(at(0));
        assert!(!banner.is_visible(at(3_600)));
        assert!(banner.is_visible(at(24 * 3_600)));
    }

    #[test]
    fn test_disabled_banner_never_shows() {
        let config = AlertConfig {
            enabled: false,
            ..AlertConfig::default()
        };
        assert!(!AlertBanner::new(config, None).is_visible(at(0)));
    }

    #[test]
    fn test_dismissal_survives_restart() {
        let dir = std::env::temp_dir().join(format!("vitrine-banner-{}", std::process::id()));
        let path = dir.join("alert.toml");
        let mut banner = AlertBanner::new(AlertConfig::default(), Some(path.clone()));
        banner.dismiss(at(100));

        let reloaded = AlertBanner::new(AlertConfig::default(), Some(path));
        assert!(!reloaded.is_visible(at(200)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
