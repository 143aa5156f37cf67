//! EEG-Core: Foundation types for the seizure-detection preprocessing stack
//!
//! Acquisition constants, error types, and calibration parameters shared by
//! the processing and simulation crates.

pub mod calibration;
pub mod eeg_types;
pub mod error;

pub use calibration::*;
pub use eeg_types::*;
pub use error::{EegError, EegResult};
