use std::time::Instant;

use crate::config::ServerConfig;

/// Read-only state shared across handlers
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
