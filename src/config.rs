//! Runtime configuration
//!
//! Everything has a sensible default; environment variables (optionally from
//! a `.env` file) override them:
//! - `WACK_PORT`: listen port (default 6573)
//! - `WACK_STATIC_DIR`: directory with the browser page (default `static`)
//! - `WACK_COUNTDOWN_SECONDS`: seconds on the prompt countdown (default 60)
//! - `WACK_SHRINK_DELAY_MS`: delay before the prompt screen shrinks (default 5000)
//! - `WACK_TICK_MS`: countdown tick period (default 1000)

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 6573;
pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 60;
pub const DEFAULT_SHRINK_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: String,
    pub countdown_seconds: u32,
    pub shrink_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: "static".to_string(),
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            shrink_delay: DEFAULT_SHRINK_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl AppConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env_or("WACK_PORT", defaults.port);
        let static_dir = std::env::var("WACK_STATIC_DIR").unwrap_or(defaults.static_dir);
        let countdown_seconds = env_or("WACK_COUNTDOWN_SECONDS", defaults.countdown_seconds);
        let shrink_delay = Duration::from_millis(env_or(
            "WACK_SHRINK_DELAY_MS",
            defaults.shrink_delay.as_millis() as u64,
        ));

        // A zero period would make tokio's interval panic
        let tick_ms = env_or("WACK_TICK_MS", defaults.tick_interval.as_millis() as u64).max(1);
        let tick_interval = Duration::from_millis(tick_ms);

        tracing::info!(
            port,
            static_dir = %static_dir,
            countdown_seconds,
            shrink_delay_ms = shrink_delay.as_millis() as u64,
            tick_ms,
            "Config loaded"
        );

        Self {
            port,
            static_dir,
            countdown_seconds,
            shrink_delay,
            tick_interval,
        }
    }
}

/// Read and parse an env var, falling back to `default` when missing or invalid
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
