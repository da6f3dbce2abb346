//! Wizard configuration.

use std::time::Duration;

use itemforge_media::IntakeLimits;

pub const PRIMARY_IMAGE_CAP_ENV: &str = "ITEMFORGE_PRIMARY_IMAGE_CAP";
pub const SECONDARY_IMAGE_CAP_ENV: &str = "ITEMFORGE_SECONDARY_IMAGE_CAP";
pub const TITLE_MAX_CHARS_ENV: &str = "ITEMFORGE_TITLE_MAX_CHARS";
pub const MAX_IMAGE_BYTES_ENV: &str = "ITEMFORGE_MAX_IMAGE_BYTES";
pub const SUBMIT_LATENCY_MS_ENV: &str = "ITEMFORGE_SUBMIT_LATENCY_MS";

/// Limits and timings for one wizard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    /// Most main images a listing may carry
    pub primary_image_cap: usize,
    /// Most detail images a listing may carry
    pub secondary_image_cap: usize,
    /// Titles longer than this are truncated on edit
    pub title_max_chars: usize,
    /// Largest accepted image file, in bytes
    pub max_image_bytes: usize,
    /// Delay of the simulated publish call
    pub submit_latency: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            primary_image_cap: 5,
            secondary_image_cap: 8,
            title_max_chars: 50,
            max_image_bytes: 2 * 1024 * 1024,
            submit_latency: Duration::from_millis(1500),
        }
    }
}

impl WizardConfig {
    pub fn with_image_caps(mut self, primary: usize, secondary: usize) -> Self {
        self.primary_image_cap = primary;
        self.secondary_image_cap = secondary;
        self
    }

    pub fn with_title_max_chars(mut self, max: usize) -> Self {
        self.title_max_chars = max;
        self
    }

    pub fn with_max_image_bytes(mut self, max: usize) -> Self {
        self.max_image_bytes = max;
        self
    }

    pub fn with_submit_latency(mut self, latency: Duration) -> Self {
        self.submit_latency = latency;
        self
    }

    /// Defaults overlaid with `ITEMFORGE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Unparseable or zero values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let positive = |key: &str, default: usize| -> usize {
            match lookup(key).map(|raw| (raw.trim().parse::<usize>(), raw)) {
                None => default,
                Some((Ok(value), _)) if value > 0 => value,
                Some((_, raw)) => {
                    tracing::warn!(key, value = %raw, default, "ignoring invalid configuration value");
                    default
                }
            }
        };

        Self {
            primary_image_cap: positive(PRIMARY_IMAGE_CAP_ENV, defaults.primary_image_cap),
            secondary_image_cap: positive(SECONDARY_IMAGE_CAP_ENV, defaults.secondary_image_cap),
            title_max_chars: positive(TITLE_MAX_CHARS_ENV, defaults.title_max_chars),
            max_image_bytes: positive(MAX_IMAGE_BYTES_ENV, defaults.max_image_bytes),
            submit_latency: match lookup(SUBMIT_LATENCY_MS_ENV) {
                None => defaults.submit_latency,
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(ms) => Duration::from_millis(ms),
                    Err(_) => {
                        tracing::warn!(
                            key = SUBMIT_LATENCY_MS_ENV,
                            value = %raw,
                            "ignoring invalid configuration value"
                        );
                        defaults.submit_latency
                    }
                },
            },
        }
    }

    pub fn intake_limits(&self) -> IntakeLimits {
        IntakeLimits {
            primary_cap: self.primary_image_cap,
            secondary_cap: self.secondary_image_cap,
            max_image_bytes: self.max_image_bytes,
        }
    }
}
