use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::stats::DEFAULT_RECENT_LIMIT;

/// Runtime configuration for a [`crate::Directory`].
///
/// Each embedding view may pick its own poll interval; a directory table
/// wants a refresh every few seconds, an analytics dashboard can settle for
/// ten.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub db_path: PathBuf,
    pub poll_interval: Duration,
    pub recent_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/alumni.db"),
            poll_interval: Duration::from_secs(3),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl DirectoryConfig {
    /// Builds the configuration from the environment, loading a `.env` file
    /// first when one exists. Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(path) = env::var("ALUMNI_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(secs) = env::var("ALUMNI_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(limit) = env::var("ALUMNI_RECENT_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.recent_limit = limit;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
        assert_eq!(config.db_path, PathBuf::from("data/alumni.db"));
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("ALUMNI_POLL_INTERVAL_SECS", "10");
        env::set_var("ALUMNI_RECENT_LIMIT", "not-a-number");
        let config = DirectoryConfig::from_env();
        env::remove_var("ALUMNI_POLL_INTERVAL_SECS");
        env::remove_var("ALUMNI_RECENT_LIMIT");

        assert_eq!(config.poll_interval, Duration::from_secs(10));
        // unparsable values fall back to the default
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    }
}
