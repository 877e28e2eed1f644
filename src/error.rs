use crate::Scalar;
use std::fmt;

/// Error produced by path parsing and by stroke/dash input validation
#[derive(Debug)]
pub enum Error {
    /// Failed to parse SVG path text
    ParseError { reason: String, offset: usize },
    /// Dash pattern does not contain any lengths
    EmptyDashPattern,
    /// Dash pattern must contain even number of lengths (on/off pairs)
    OddDashCount(usize),
    /// Dash length is not a finite positive number
    InvalidDashLength { index: usize, length: Scalar },
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// IO error propagated while reading input stream
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParseError { reason, offset } => {
                write!(f, "failed to parse path at offset {}: {}", offset, reason)
            }
            Error::EmptyDashPattern => write!(f, "dash pattern is empty"),
            Error::OddDashCount(count) => write!(
                f,
                "dash pattern must have even number of lengths, got {}",
                count
            ),
            Error::InvalidDashLength { index, length } => write!(
                f,
                "dash length must be positive, got {} at index {}",
                length, index
            ),
            #[cfg(feature = "serde")]
            Error::Json(error) => write!(f, "invalid configuration: {}", error),
            Error::IoError(error) => error.fmt(f),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::IoError(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "serde")]
            Error::Json(error) => Some(error),
            Error::IoError(error) => Some(error),
            _ => None,
        }
    }
}
