//! EEG-Simulation: EEG signal generation at the raw ADC level
//!
//! Provides realistic single-channel EEG simulation for testing and
//! development, emitting the same 10-bit samples a real acquisition
//! device would.

pub mod eeg_simulator;
pub mod real_time_stream;
pub mod signal_patterns;

pub use eeg_simulator::*;
pub use real_time_stream::*;
pub use signal_patterns::*;
