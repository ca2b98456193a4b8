use std::env;
use std::time::Duration;

use crate::domain::rules::DEFAULT_MIN_PLAYERS;
use crate::domain::scoring::InactiveScoring;
use crate::error::AppError;

/// Default pause between a resolved trick and the next one.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// Tunables for a single engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Active players required before `start` is accepted.
    pub min_players: usize,
    /// Delay before a resolved trick is cleared from the table.
    pub settle_delay: Duration,
    pub inactive_scoring: InactiveScoring,
    /// Fixed match seed for reproducible deals; drawn from entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            settle_delay: DEFAULT_SETTLE_DELAY,
            inactive_scoring: InactiveScoring::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load from `WIZARD_*` environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("WIZARD_MIN_PLAYERS") {
            let min: usize = parse_var("WIZARD_MIN_PLAYERS", &raw)?;
            if min == 0 {
                return Err(AppError::config("WIZARD_MIN_PLAYERS must be at least 1"));
            }
            config.min_players = min;
        }
        if let Some(raw) = lookup("WIZARD_SETTLE_DELAY_MS") {
            let ms: u64 = parse_var("WIZARD_SETTLE_DELAY_MS", &raw)?;
            config.settle_delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup("WIZARD_SCORE_INACTIVE") {
            config.inactive_scoring = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "include" => InactiveScoring::Include,
                "0" | "false" | "no" | "skip" => InactiveScoring::Skip,
                other => {
                    return Err(AppError::config(format!(
                        "WIZARD_SCORE_INACTIVE must be a boolean, got '{other}'"
                    )))
                }
            };
        }
        if let Some(raw) = lookup("WIZARD_SEED") {
            config.seed = Some(parse_var("WIZARD_SEED", &raw)?);
        }

        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    pub fn with_inactive_scoring(mut self, policy: InactiveScoring) -> Self {
        self.inactive_scoring = policy;
        self
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::config(format!(
            "Environment variable '{name}' has an invalid value: '{raw}'"
        ))
    })
}
