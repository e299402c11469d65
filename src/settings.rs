//! Run options
//!
//! Everything that shapes a session but is not a balance number: the RNG
//! seed, how power-up durations are treated, where the run starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::Tuning;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
    #[error("starting level must be at least 1, got {0}")]
    InvalidLevel(u32),
}

/// What happens when a timed power-up's duration runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoostExpiry {
    /// Boosts last until overwritten by the next pickup of the same kind
    #[default]
    Permanent,
    /// Speed, damage and shield revert once their duration elapses
    Timed,
}

impl BoostExpiry {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostExpiry::Permanent => "permanent",
            BoostExpiry::Timed => "timed",
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for spawn placement
    pub seed: u64,
    pub boost_expiry: BoostExpiry,
    /// Level a new game starts on
    pub start_level: u32,
    /// Populate the first level with the fixed opening layout instead of
    /// random placement
    pub opening_layout: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            boost_expiry: BoostExpiry::Permanent,
            start_level: 1,
            opening_layout: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Settings with the given seed and everything else default
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a (possibly partial) JSON settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: seed={}, boosts={}, start_level={}",
            settings.seed,
            settings.boost_expiry.as_str(),
            settings.start_level
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_level == 0 {
            return Err(ConfigError::InvalidLevel(self.start_level));
        }
        self.tuning.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_expiry_names() {
        for expiry in [BoostExpiry::Permanent, BoostExpiry::Timed] {
            let json = serde_json::to_string(&expiry).unwrap();
            assert_eq!(json, format!("\"{}\"", expiry.as_str()));
        }
        assert!(serde_json::from_str::<BoostExpiry>("\"sometimes\"").is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let s = Settings::from_json(r#"{ "seed": 42, "boost_expiry": "timed" }"#).unwrap();
        assert_eq!(s.seed, 42);
        assert_eq!(s.boost_expiry, BoostExpiry::Timed);
        assert_eq!(s.start_level, 1);
        assert!(s.opening_layout);
        assert_eq!(s.tuning, Tuning::default());
    }

    #[test]
    fn test_level_zero_is_a_config_error() {
        let err = Settings::from_json(r#"{ "start_level": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel(0)));
        assert_eq!(err.to_string(), "starting level must be at least 1, got 0");
    }

    #[test]
    fn test_nested_tuning_is_validated() {
        let err = Settings::from_json(r#"{ "tuning": { "player": { "max_health": 0 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "player.max_health", .. }));
    }
}
