//! Effect duration bounds.

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest sound effect the pipeline will generate, in seconds (inclusive).
pub const MAX_EFFECT_DURATION_SECS: f64 = 20.0;

/// Effect duration used when the caller does not ask for one.
pub const DEFAULT_EFFECT_DURATION_SECS: f64 = 5.0;

/// Rejected effect duration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DurationError {
    #[error("duration must be greater than 0 seconds, got {0}")]
    NotPositive(f64),

    #[error("duration must be at most {max} seconds, got {value}", max = MAX_EFFECT_DURATION_SECS)]
    TooLong { value: f64 },

    #[error("duration must be a finite number, got {0}")]
    NotFinite(f64),
}

/// Requested sound effect duration in seconds.
///
/// Always within `(0, MAX_EFFECT_DURATION_SECS]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EffectDuration(f64);

impl EffectDuration {
    /// Validate a duration in seconds.
    pub fn new(secs: f64) -> Result<Self, DurationError> {
        if secs.is_nan() || secs.is_infinite() {
            return Err(DurationError::NotFinite(secs));
        }
        if secs <= 0.0 {
            return Err(DurationError::NotPositive(secs));
        }
        if secs > MAX_EFFECT_DURATION_SECS {
            return Err(DurationError::TooLong { value: secs });
        }
        Ok(Self(secs))
    }

    /// Duration in seconds.
    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Timestamp of the representative frame (half the effect duration).
    pub fn midpoint(&self) -> f64 {
        self.0 / 2.0
    }
}

impl Default for EffectDuration {
    fn default() -> Self {
        Self(DEFAULT_EFFECT_DURATION_SECS)
    }
}

impl TryFrom<f64> for EffectDuration {
    type Error = DurationError;

    fn try_from(secs: f64) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<EffectDuration> for f64 {
    fn from(d: EffectDuration) -> Self {
        d.0
    }
}

impl fmt::Display for EffectDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

impl JsonSchema for EffectDuration {
    fn schema_name() -> String {
        "EffectDuration".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        f64::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_bounds() {
        assert_err!(EffectDuration::new(0.0));
        assert_err!(EffectDuration::new(-1.0));
        assert_err!(EffectDuration::new(20.0001));
        assert_ok!(EffectDuration::new(20.0));
        assert_ok!(EffectDuration::new(0.001));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            EffectDuration::new(f64::NAN),
            Err(DurationError::NotFinite(_))
        ));
        assert!(matches!(
            EffectDuration::new(f64::INFINITY),
            Err(DurationError::NotFinite(_))
        ));
    }

    #[test]
    fn test_midpoint() {
        let d = EffectDuration::new(5.0).unwrap();
        assert!((d.midpoint() - 2.5).abs() < f64::EPSILON);
        assert!((EffectDuration::default().as_secs() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_validates() {
        let d: EffectDuration = serde_json::from_str("7.5").unwrap();
        assert!((d.as_secs() - 7.5).abs() < f64::EPSILON);
        assert_eq!(serde_json::to_string(&d).unwrap(), "7.5");

        assert!(serde_json::from_str::<EffectDuration>("25.0").is_err());
        assert!(serde_json::from_str::<EffectDuration>("0").is_err());
    }
}
