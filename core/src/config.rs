use core::time::Duration;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How long a mismatched pair stays face up
    pub mismatch_delay: Duration,
    pub snapshot_key: String,
    pub history_key: String,
}

impl EngineConfig {
    pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);
    pub const SNAPSHOT_KEY: &'static str = "memoryGameState";
    pub const HISTORY_KEY: &'static str = "memoryGameHistory";
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: Self::DEFAULT_MISMATCH_DELAY,
            snapshot_key: Self::SNAPSHOT_KEY.to_owned(),
            history_key: Self::HISTORY_KEY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"mismatch_delay": {"secs": 0, "nanos": 350000000}}"#).unwrap();

        assert_eq!(config.mismatch_delay, Duration::from_millis(350));
        assert_eq!(config.snapshot_key, EngineConfig::SNAPSHOT_KEY);
        assert_eq!(config.history_key, EngineConfig::HISTORY_KEY);
    }
}
