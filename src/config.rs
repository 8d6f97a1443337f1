//! Server configuration from environment variables.

use crate::models::ScorePolicy;
use std::path::PathBuf;

/// Settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    /// `HOST`, e.g. 0.0.0.0 so the app is reachable on a VPS.
    pub host: String,
    /// `PORT`
    pub port: u16,
    /// `DATA_DIR`: where the snapshot and history files live.
    pub data_dir: PathBuf,
    /// `SCORE_TOTAL`: when set, both team scores of a match must add up to it.
    pub score_policy: ScorePolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            score_policy: ScorePolicy::Unrestricted,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let score_policy = match lookup("SCORE_TOTAL").map(|v| v.trim().parse::<u32>()) {
            Some(Ok(total)) if total > 0 => ScorePolicy::FixedTotal(total),
            Some(_) => {
                log::warn!("Ignoring invalid SCORE_TOTAL; scores are unrestricted");
                ScorePolicy::Unrestricted
            }
            None => ScorePolicy::Unrestricted,
        };
        Self {
            host: lookup("HOST").unwrap_or_else(default_host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            score_policy,
        }
    }
}
