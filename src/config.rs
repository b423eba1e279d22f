//! Command-line / environment configuration for the terminal game.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::core::{GameState, SpawnProbe, UniformSource};
use crate::types::GRAVITY_INTERVAL_MS;

/// Longest gravity period accepted (one row per minute).
pub const MAX_TICK_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tick interval must be between 1 and {max} ms, got {got}")]
    TickOutOfRange { got: u32, max: u32 },
    #[error("log filter must not be empty")]
    EmptyLogFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProbeArg {
    /// Check the piece that actually spawns
    #[default]
    NextPiece,
    /// Check a second, freshly drawn shape
    FreshDraw,
}

impl From<ProbeArg> for SpawnProbe {
    fn from(value: ProbeArg) -> Self {
        match value {
            ProbeArg::NextPiece => SpawnProbe::NextPiece,
            ProbeArg::FreshDraw => SpawnProbe::FreshDraw,
        }
    }
}

/// Falling-block puzzle in the terminal
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tui-blockfall", version, about, long_about = None)]
pub struct Config {
    /// Gravity period in milliseconds
    #[arg(long, env = "BLOCKFALL_TICK_MS", default_value_t = GRAVITY_INTERVAL_MS)]
    pub tick_ms: u32,

    /// Seed for the piece sequence (random when absent)
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u64>,

    /// Which shape decides game over after a lock
    #[arg(long, value_enum, default_value_t = ProbeArg::NextPiece)]
    pub spawn_probe: ProbeArg,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long, env = "BLOCKFALL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// tracing filter directive, e.g. `info` or `tui_blockfall_core=debug`
    #[arg(long, env = "BLOCKFALL_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: GRAVITY_INTERVAL_MS,
            seed: None,
            spawn_probe: ProbeArg::default(),
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickOutOfRange {
                got: self.tick_ms,
                max: MAX_TICK_MS,
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilter);
        }
        Ok(())
    }

    pub fn piece_source(&self) -> UniformSource {
        match self.seed {
            Some(seed) => UniformSource::seeded(seed),
            None => UniformSource::from_entropy(),
        }
    }

    /// Fresh game wired to this configuration.
    pub fn new_game(&self) -> GameState<UniformSource> {
        GameState::new(self.piece_source()).with_spawn_probe(self.spawn_probe.into())
    }

    /// Parse from an argument list (first item is the program name) and validate.
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Self::try_parse_from(args)?;
        config.validate()?;
        Ok(config)
    }
}
