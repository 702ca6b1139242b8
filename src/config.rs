//! Naming configuration for one preview or execute run.
//!
//! Each setting comes from the command line if given, then from the
//! environment (a `.env` file in the working directory is loaded at startup),
//! then from the built-in default.

use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::cli::ConfigArgs;
use crate::planner::{InvalidPadding, Padding, PlanOptions};
use crate::sorter::{SortError, SortKey};

pub const ENV_SORT: &str = "SEQRENAME_SORT";
pub const ENV_PATTERN: &str = "SEQRENAME_PATTERN";
pub const ENV_PADDING: &str = "SEQRENAME_PADDING";
pub const ENV_START: &str = "SEQRENAME_START";
pub const ENV_MAX_ATTEMPTS: &str = "SEQRENAME_MAX_ATTEMPTS";

pub const DEFAULT_PATTERN: &str = "file_{number}";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidSort(#[from] SortError),

    #[error(transparent)]
    InvalidPadding(#[from] InvalidPadding),

    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Resolved settings, fixed for the duration of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameConfig {
    pub sort: SortKey,
    pub pattern: String,
    pub plan: PlanOptions,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            sort: SortKey::DateAsc,
            pattern: DEFAULT_PATTERN.to_string(),
            plan: PlanOptions::default(),
        }
    }
}

impl RenameConfig {
    pub fn resolve(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sort = match args.sort.clone().or_else(|| env_value(ENV_SORT)) {
            Some(value) => value.parse::<SortKey>()?,
            None => defaults.sort,
        };

        let pattern = args
            .pattern
            .clone()
            .or_else(|| env_value(ENV_PATTERN))
            .unwrap_or(defaults.pattern);

        let padding = match args.padding {
            Some(width) => Padding::try_from(width)?,
            None => match env_parse::<u8>(ENV_PADDING)? {
                Some(width) => Padding::try_from(width)?,
                None => defaults.plan.padding,
            },
        };

        let start_index = match args.start {
            Some(start) => start,
            None => env_parse(ENV_START)?.unwrap_or(defaults.plan.start_index),
        };

        let max_probe_attempts = match args.max_attempts {
            Some(max) => max,
            None => env_parse(ENV_MAX_ATTEMPTS)?.unwrap_or(defaults.plan.max_probe_attempts),
        };

        if max_probe_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max attempts".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let config = Self {
            sort,
            pattern,
            plan: PlanOptions {
                padding,
                start_index,
                max_probe_attempts,
            },
        };

        debug!(?config, "Resolved configuration");

        Ok(config)
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_value(name) {
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}
