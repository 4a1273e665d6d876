/// Parameters for tracing initialization, supplied by the presentation
/// layer's settings rather than read from the environment here.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_filter: String,
    pub json_format: bool,
    pub environment: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info,anchorage=debug".to_string(),
            json_format: false,
            environment: "development".to_string(),
        }
    }
}
