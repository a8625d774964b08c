use std::error::Error;
use config::Config;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoundsError {
    #[error("invalid round range: max_rounds ({max}) must be greater than initial_rounds ({initial})")]
    InvalidRoundRange { initial: u32, max: u32 },
}

/// Bounds of the random round window. A hash always pays `initial_rounds`
/// and at most `max_rounds - 1` digests; verification must search the
/// whole window, so both bounds have to be persisted alongside the hash
/// and reused exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashParams {
    initial_rounds: u32,
    max_rounds: u32,
}

impl HashParams {
    pub fn new(initial_rounds: u32, max_rounds: u32) -> Result<Self, RoundsError> {
        let params = HashParams { initial_rounds, max_rounds };
        params.validate()?;
        Ok(params)
    }

    pub fn from_settings(settings: &Config) -> Result<Self, Box<dyn Error>> {
        let params: HashParams = settings.get("hashing")?;
        params.validate()?;
        Ok(params)
    }

    pub fn initial_rounds(&self) -> u32 {
        self.initial_rounds
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Width of the random window; at least 1 for validated params.
    pub fn span(&self) -> u32 {
        self.max_rounds - self.initial_rounds
    }

    fn validate(&self) -> Result<(), RoundsError> {
        if self.max_rounds <= self.initial_rounds {
            return Err(RoundsError::InvalidRoundRange {
                initial: self.initial_rounds,
                max: self.max_rounds,
            });
        }
        Ok(())
    }
}
