//! Error handling for the EEG preprocessing stack

use core::fmt;

/// Result type alias for EEG pipeline operations
pub type EegResult<T> = Result<T, EegError>;

/// Error type covering calibration, pipeline, and simulation failures
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EegError {
    /// Calibration (scaler) data is missing, malformed, or unusable
    InvalidCalibration {
        /// Description of the calibration problem
        reason: String,
    },

    /// Feature extraction was requested before a full window was buffered
    WindowNotReady {
        /// Samples accumulated so far
        filled: usize,
        /// Samples required for one analysis window
        required: usize,
    },

    /// Normalization was requested before any features were extracted
    FeaturesNotExtracted,

    /// A vector handed across a component boundary has the wrong length
    LengthMismatch {
        /// Expected number of elements
        expected: usize,
        /// Actual number of elements
        actual: usize,
    },

    /// Invalid static configuration (sampling setup, filter design, ...)
    ConfigurationError {
        /// Description of the configuration error
        message: String,
    },

    /// Signal simulation failure
    SimulationError {
        /// Description of the simulation error
        message: String,
    },
}

impl fmt::Display for EegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EegError::InvalidCalibration { reason } => {
                write!(f, "Invalid calibration data: {}", reason)
            }
            EegError::WindowNotReady { filled, required } => {
                write!(
                    f,
                    "Window not ready: {} of {} samples buffered",
                    filled, required
                )
            }
            EegError::FeaturesNotExtracted => {
                write!(f, "No feature vector available: extraction has not run")
            }
            EegError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Vector length mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            EegError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            EegError::SimulationError { message } => {
                write!(f, "Simulation error: {}", message)
            }
        }
    }
}

impl std::error::Error for EegError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EegError::WindowNotReady {
            filled: 42,
            required: 178,
        };
        let display = format!("{}", error);
        assert!(display.contains("Window not ready"));
        assert!(display.contains("42"));
        assert!(display.contains("178"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = EegError::FeaturesNotExtracted;
        let error2 = EegError::FeaturesNotExtracted;
        assert_eq!(error1, error2);
    }
}
