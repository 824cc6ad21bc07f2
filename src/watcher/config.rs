//! Watcher configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by every RefPoller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Polling interval in milliseconds
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Capacity of the event channel; a full channel stalls the pollers
    #[serde(rename = "channel-capacity", default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl WatcherConfig {
    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatcherConfig::default();
        assert_eq!(config.poll_interval_ms, 5_000);
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_poll_interval_duration() {
        let config = WatcherConfig {
            poll_interval_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: WatcherConfig = serde_yaml::from_str("poll-interval-ms: 100\n").unwrap();
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.channel_capacity, 64);
    }
}
