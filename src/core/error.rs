//! Error types for the engine

use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration or appliance profile set. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation referenced an appliance id that is not registered
    #[error("Unknown appliance: {0}")]
    NotFound(String),

    /// Out-of-range numeric input, rejected without state change
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A simulator hit a registry/profile mismatch. Never recovered.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Reclassify a rejection raised while a simulator was driving the engine.
    ///
    /// Simulators only use validated internal ids and values, so a
    /// `NotFound` or `InvalidValue` coming back from them is a bug.
    pub fn into_invariant(self, source: &str) -> Self {
        match self {
            Error::NotFound(_) | Error::InvalidValue(_) => {
                Error::Invariant(format!("{}: {}", source, self))
            }
            other => other,
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_rejections_become_invariants() {
        let err = Error::NotFound("toaster".into()).into_invariant("telemetry");
        assert!(matches!(err, Error::Invariant(ref msg) if msg.contains("toaster")));

        let err = Error::Configuration("bad".into()).into_invariant("telemetry");
        assert!(matches!(err, Error::Configuration(_)));
    }
}
