//! Error types returned by fallible session APIs.

use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::SquareIndex;

/// This enum contains all error messages this library can return. Fallible
/// API functions return a [`Result<_, SimonError>`].
///
/// Player mistakes (wrong square, countdown expiry) are not errors: they are
/// ordinary state-machine transitions reported through
/// [`SimonEvent::RoundLost`](crate::SimonEvent::RoundLost).
///
/// [`Result<_, SimonError>`]: std::result::Result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimonError {
    /// The session configuration was rejected at startup, before any round
    /// could run.
    InvalidConfig {
        /// Further specifies why the configuration was invalid.
        info: String,
    },
    /// An [`InputSource`] reported a square index outside the board. Clicks
    /// on non-square regions must resolve to `None`, so this indicates a
    /// broken frontend, not a player mistake.
    ///
    /// [`InputSource`]: crate::InputSource
    InvalidSquare {
        /// The out-of-range index that was reported.
        square: SquareIndex,
        /// The number of squares on the board; valid indices are below this.
        num_squares: usize,
    },
}

impl Display for SimonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimonError::InvalidConfig { info } => {
                write!(f, "Invalid configuration: {}", info)
            }
            SimonError::InvalidSquare {
                square,
                num_squares,
            } => {
                write!(
                    f,
                    "Input source reported square {} on a board of {} squares",
                    square, num_squares
                )
            }
        }
    }
}

impl Error for SimonError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_config() {
        let err = SimonError::InvalidConfig {
            info: "num_squares must be at least 1".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: num_squares must be at least 1"
        );
    }

    #[test]
    fn display_invalid_square() {
        let err = SimonError::InvalidSquare {
            square: SquareIndex::new(7),
            num_squares: 4,
        };
        assert_eq!(
            err.to_string(),
            "Input source reported square 7 on a board of 4 squares"
        );
    }
}
