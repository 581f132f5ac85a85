//! Configuration for the engine and the HTTP server

use std::env;
use std::net::SocketAddr;

/// Default size of the `recentEvents` report window
pub const DEFAULT_RECENT_EVENTS: usize = 50;

/// Configuration for the [`AnalyticsEngine`](crate::AnalyticsEngine)
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of trailing log entries returned in `recentEvents`
    pub recent_events_limit: usize,
    /// Optional cap on retained log entries; `None` keeps the log unbounded.
    /// Counters keep lifetime totals either way; scan-derived report views
    /// only cover retained entries.
    pub max_events: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recent_events_limit: DEFAULT_RECENT_EVENTS,
            max_events: None,
        }
    }
}

impl EngineConfig {
    /// Set the `recentEvents` window size
    pub fn with_recent_events_limit(mut self, limit: usize) -> Self {
        self.recent_events_limit = limit;
        self
    }

    /// Cap the retained log at `max_events` entries
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = Some(max_events);
        self
    }
}

/// Configuration for the `pulse-server` binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl ServerConfig {
    /// Read config from the environment
    ///
    /// `PULSE_BIND` takes a full socket address; `PORT` overrides just the
    /// port on the default host. Malformed values fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bind) = env::var("PULSE_BIND") {
            if let Ok(addr) = bind.parse() {
                config.bind = addr;
                return config;
            }
            tracing::warn!(value = %bind, "ignoring malformed PULSE_BIND");
        }

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.bind.set_port(port);
            }
        }

        config
    }
}
