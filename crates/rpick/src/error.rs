#![forbid(unsafe_code)]

//! Facade error type.
//!
//! Layout and gesture handling never fail; the only fallible step is
//! creating a picker from a configuration.

use std::fmt;

use rpick_widgets::ConfigError;

/// Top-level error for picker construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid picker configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for facade APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wraps_config_errors() {
        let err = Error::from(ConfigError::TooFewKeyframes(0));
        assert_eq!(
            err.to_string(),
            "invalid picker configuration: flight path needs at least 2 keyframes, got 0"
        );
        assert!(err.source().is_some());
    }
}
