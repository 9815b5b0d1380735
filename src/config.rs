//! Generic Fast Fourier Transform.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use std::sync::OnceLock;

/// Smallest sub-transform, in complex points, whose children are dispatched
/// to the worker pool when the `parallel` feature is enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

const PARALLEL_THRESHOLD_ENV: &str = "GFFT_PARALLEL_THRESHOLD";

static ENV_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Execution settings shared by every pipeline of a transform set.
///
/// `EngineConfig::default()` honours `GFFT_PARALLEL_THRESHOLD`. The variable
/// is read once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub parallel_threshold: usize,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold.max(1);
        self
    }

    fn from_env() -> Self {
        let threshold = parse_threshold(std::env::var(PARALLEL_THRESHOLD_ENV).ok().as_deref());
        Self::new().with_parallel_threshold(threshold)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        *ENV_CONFIG.get_or_init(|| {
            let config = EngineConfig::from_env();
            log::debug!("parallel threshold {}", config.parallel_threshold);
            config
        })
    }
}

fn parse_threshold(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v != 0)
        .unwrap_or(DEFAULT_PARALLEL_THRESHOLD)
}
