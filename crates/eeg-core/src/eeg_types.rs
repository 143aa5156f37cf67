//! EEG acquisition constants and ADC specification
//!
//! Fixed parameters of the single-channel BITalino EEG front end the
//! pipeline is calibrated for. Windowing and feature-vector geometry are
//! derived from these and must stay consistent with the trained classifier.

use crate::error::{EegError, EegResult};
use serde::{Deserialize, Serialize};

/// Nominal acquisition rate of the EEG channel in Hz
pub const SAMPLE_RATE_HZ: f32 = 178.0;

/// Analysis window length in samples (one second at the nominal rate)
pub const WINDOW_SIZE: usize = 178;

/// Number of equal sub-segments each window is divided into
pub const NUM_SEGMENTS: usize = 7;

/// Segment length in samples. Integer truncation is intentional: the last
/// `WINDOW_SIZE - NUM_SEGMENTS * SEGMENT_SIZE` samples (3) are covered by
/// the whole-window block only. The classifier was trained on this layout.
pub const SEGMENT_SIZE: usize = WINDOW_SIZE / NUM_SEGMENTS;

/// Descriptors computed per analyzed block (whole window or one segment)
pub const FEATURES_PER_BLOCK: usize = 26;

/// Total feature-vector length: one whole-window block plus one per segment
pub const NUM_FEATURES: usize = FEATURES_PER_BLOCK * (1 + NUM_SEGMENTS);

/// Configured window overlap in percent. The accumulator does not consume
/// this: windows are emitted back-to-back with no overlap, matching the
/// behavior the classifier was trained against. Kept so the discrepancy is
/// visible rather than silently dropped.
pub const OVERLAP_PERCENTAGE: usize = 50;

/// Overlap in samples implied by [`OVERLAP_PERCENTAGE`] (unused, see above)
pub const OVERLAP_SIZE: usize = WINDOW_SIZE * OVERLAP_PERCENTAGE / 100;

/// Largest raw sample the 10-bit converter can produce
pub const ADC_MAX: u16 = 1023;

/// Guard added to every denominator that could be zero
pub const EPSILON: f32 = 1e-8;

/// Electrical characteristics of the acquisition front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdcSpec {
    /// Number of quantization steps (1024 for a 10-bit converter)
    pub resolution: f32,
    /// Supply voltage in volts
    pub supply_voltage: f32,
    /// Analog front-end gain
    pub gain: f32,
}

impl AdcSpec {
    /// BITalino EEG front end: 10-bit ADC, 3.3 V supply, gain 1000
    pub fn bitalino() -> Self {
        AdcSpec {
            resolution: 1024.0,
            supply_voltage: 3.3,
            gain: 1000.0,
        }
    }

    /// Validate the specification for use in the converter
    pub fn validate(&self) -> EegResult<()> {
        if self.resolution <= 0.0 {
            return Err(EegError::ConfigurationError {
                message: format!("ADC resolution must be positive, got {}", self.resolution),
            });
        }
        if self.supply_voltage <= 0.0 {
            return Err(EegError::ConfigurationError {
                message: format!(
                    "Supply voltage must be positive, got {}",
                    self.supply_voltage
                ),
            });
        }
        if self.gain <= 0.0 {
            return Err(EegError::ConfigurationError {
                message: format!("Front-end gain must be positive, got {}", self.gain),
            });
        }
        Ok(())
    }
}

impl Default for AdcSpec {
    fn default() -> Self {
        Self::bitalino()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_geometry() {
        assert_eq!(SEGMENT_SIZE, 25);
        assert_eq!(NUM_FEATURES, 194);
        // 3 trailing samples fall outside all segments
        assert_eq!(WINDOW_SIZE - NUM_SEGMENTS * SEGMENT_SIZE, 3);
    }

    #[test]
    fn test_adc_spec_validation() {
        assert!(AdcSpec::bitalino().validate().is_ok());

        let mut spec = AdcSpec::bitalino();
        spec.gain = 0.0;
        assert!(spec.validate().is_err());

        spec = AdcSpec::bitalino();
        spec.resolution = -1.0;
        assert!(spec.validate().is_err());
    }
}
