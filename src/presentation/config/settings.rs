use std::time::Duration;

use crate::application::services::SolverTiming;
use crate::infrastructure::observability::TracingConfig;

#[derive(Debug, Clone)]
pub struct Settings {
    pub browser: BrowserSettings,
    pub solver: SolverSettings,
    pub transcriber: TranscriberSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub demo_url: String,
    pub headless: bool,
}

/// Timeouts and settle delays in milliseconds. The detection timeout is
/// tuned against one challenge provider's UI; other providers will want a
/// different value, hence configuration.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    pub standard_timeout_ms: u64,
    pub short_timeout_ms: u64,
    pub detection_timeout_ms: u64,
    pub audio_settle_ms: u64,
    pub verify_settle_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TranscriberSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json_format: bool,
    pub environment: String,
}

impl Settings {
    /// Environment-backed settings with working defaults for the demo page.
    pub fn from_env() -> Self {
        Self {
            browser: BrowserSettings {
                demo_url: env_or("SOLVER_DEMO_URL", "https://www.google.com/recaptcha/api2/demo"),
                headless: env_parse("SOLVER_HEADLESS", true),
            },
            solver: SolverSettings {
                standard_timeout_ms: env_parse("SOLVER_STANDARD_TIMEOUT_MS", 7_000),
                short_timeout_ms: env_parse("SOLVER_SHORT_TIMEOUT_MS", 1_000),
                detection_timeout_ms: env_parse("SOLVER_DETECTION_TIMEOUT_MS", 50),
                audio_settle_ms: env_parse("SOLVER_AUDIO_SETTLE_MS", 300),
                verify_settle_ms: env_parse("SOLVER_VERIFY_SETTLE_MS", 400),
            },
            transcriber: TranscriberSettings {
                api_key: std::env::var("TRANSCRIBER_API_KEY").unwrap_or_default(),
                base_url: std::env::var("TRANSCRIBER_BASE_URL").ok(),
                model: std::env::var("TRANSCRIBER_MODEL").ok(),
            },
            logging: LoggingSettings {
                level: env_or("SOLVER_LOG_LEVEL", "info,anchorage=debug"),
                json_format: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
                environment: env_or("APP_ENV", "development"),
            },
        }
    }
}

impl SolverSettings {
    pub fn timing(&self) -> SolverTiming {
        SolverTiming {
            standard_timeout: Duration::from_millis(self.standard_timeout_ms),
            short_timeout: Duration::from_millis(self.short_timeout_ms),
            detection_timeout: Duration::from_millis(self.detection_timeout_ms),
            audio_settle: Duration::from_millis(self.audio_settle_ms),
            verify_settle: Duration::from_millis(self.verify_settle_ms),
        }
    }
}

impl LoggingSettings {
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            default_filter: self.level.clone(),
            json_format: self.json_format,
            environment: self.environment.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
