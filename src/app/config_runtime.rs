//! Effective settings: CLI flags over config file over built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use quizdl_core::fetch::{DEFAULT_BASE_URL, FETCH_TIMEOUT_SECS};
use quizdl_core::{DEFAULT_PACING, FetchConfig, OutputFormat};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::GlobalArgs;

/// Settings every command runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) pacing: Duration,
    pub(crate) output_dir: PathBuf,
    pub(crate) format: OutputFormat,
    pub(crate) verbosity: VerbositySetting,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            pacing: DEFAULT_PACING,
            output_dir: PathBuf::from("."),
            format: OutputFormat::default(),
            verbosity: VerbositySetting::Default,
        }
    }
}

impl Settings {
    /// Layers `global` over `file` over the defaults.
    pub(crate) fn resolve(global: &GlobalArgs, file: Option<&FileConfig>) -> Result<Self> {
        if global.quiet && global.verbose > 0 {
            bail!("--quiet and --verbose cannot be used together");
        }

        let mut settings = Self::default();

        if let Some(file) = file {
            if let Some(base_url) = &file.base_url {
                settings.base_url.clone_from(base_url);
            }
            if let Some(secs) = file.timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            if let Some(ms) = file.pacing_ms {
                settings.pacing = Duration::from_millis(ms);
            }
            if let Some(dir) = &file.output_dir {
                settings.output_dir.clone_from(dir);
            }
            if let Some(format) = file.format {
                settings.format = format;
            }
            if let Some(verbosity) = file.verbosity {
                settings.verbosity = verbosity;
            }
        }

        if let Some(base_url) = &global.base_url {
            settings.base_url.clone_from(base_url);
        }
        if let Some(secs) = global.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = global.pacing_ms {
            settings.pacing = Duration::from_millis(ms);
        }
        if let Some(dir) = &global.output_dir {
            settings.output_dir.clone_from(dir);
        }
        if let Some(verbosity) = cli_verbosity(global) {
            settings.verbosity = verbosity;
        }

        Ok(settings)
    }

    pub(crate) fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }

    pub(crate) fn is_quiet(&self) -> bool {
        self.verbosity == VerbositySetting::Quiet
    }
}

fn cli_verbosity(global: &GlobalArgs) -> Option<VerbositySetting> {
    if global.quiet {
        return Some(VerbositySetting::Quiet);
    }
    match global.verbose {
        0 => None,
        1 => Some(VerbositySetting::Verbose),
        _ => Some(VerbositySetting::Trace),
    }
}

/// Whether the CLI named a log level explicitly, which then beats `RUST_LOG`.
pub(crate) fn should_force_cli_log_level(global: &GlobalArgs) -> bool {
    global.quiet || global.verbose > 0
}
