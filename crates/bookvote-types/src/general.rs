use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Star rating of a book, always within `Score::MIN..=Score::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Score(u8);

impl Score {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Score(value as u8))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }

    /// Lenient parsing of a score coming from a JSON body.
    ///
    /// Accepts integers, floats without fractional part (`4.0`) and strings
    /// containing such numbers (`"4"`). Everything else is rejected.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Score::new(i),
                None => n
                    .as_f64()
                    .ok_or(ValidationError::ScoreNotInteger)
                    .and_then(Score::from_float),
            },
            Value::String(s) => s.parse(),
            _ => Err(ValidationError::ScoreNotInteger),
        }
    }

    fn from_float(f: f64) -> Result<Self, ValidationError> {
        if !f.is_finite() || f.fract() != 0.0 {
            return Err(ValidationError::ScoreNotInteger);
        }
        Score::new(f as i64)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for i64 {
    fn from(value: Score) -> Self {
        value.0 as i64
    }
}

impl FromStr for Score {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(i) => Score::new(i),
            Err(_) => s
                .parse::<f64>()
                .map_err(|_| ValidationError::ScoreNotInteger)
                .and_then(Score::from_float),
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token identifying a voting device.
///
/// Only used to deduplicate votes, format is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Returns `None` for blank input, which is the same as no client id at all
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(ClientId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
