//! Error types for configuration and persistence.
//!
//! Gameplay itself never fails: invalid transitions and unavailable abilities
//! are no-ops. Only loading and saving files can go wrong.

use std::fmt;

/// Crate-wide error
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed
    Io(std::io::Error),
    /// A JSON document could not be parsed or produced
    Json(serde_json::Error),
    /// A tuning value is outside the range the simulation accepts
    InvalidTuning {
        /// Dotted path of the offending field
        field: &'static str,
        /// Human-readable constraint that was violated
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidTuning { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_tuning() {
        let err = Error::InvalidTuning {
            field: "difficulty.min_spawn_interval",
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning value 'difficulty.min_spawn_interval': must be positive"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
