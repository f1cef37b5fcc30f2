//! CLI configuration.

use std::path::PathBuf;

use vgen_client::ApiConfig;
use vgen_models::GenerationLimits;
use vgen_poller::PollerConfig;

/// Configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// API client configuration
    pub api: ApiConfig,
    /// Polling cadence configuration
    pub poller: PollerConfig,
    /// Request validation limits
    pub limits: GenerationLimits,
    /// Directory finished videos are written to
    pub output_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            poller: PollerConfig::default(),
            limits: GenerationLimits::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            poller: PollerConfig::from_env(),
            limits: limits_from_env(),
            output_dir: std::env::var("VIDGEN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

fn limits_from_env() -> GenerationLimits {
    let defaults = GenerationLimits::default();
    GenerationLimits {
        min_duration_secs: std::env::var("VIDGEN_MIN_DURATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_duration_secs),
        max_duration_secs: std::env::var("VIDGEN_MAX_DURATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_duration_secs),
        allowed_resolutions: std::env::var("VIDGEN_RESOLUTIONS")
            .ok()
            .map(|s| s.split(',').filter_map(|r| r.trim().parse().ok()).collect())
            .filter(|v: &Vec<_>| !v.is_empty())
            .unwrap_or(defaults.allowed_resolutions),
    }
}
