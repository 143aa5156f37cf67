//! Calibration parameters for feature normalization
//!
//! The downstream classifier expects z-score normalized features. The
//! per-dimension mean and scale come from the offline training pipeline
//! (a fitted StandardScaler exported to JSON) and are immutable for the
//! process lifetime.

use crate::eeg_types::NUM_FEATURES;
use crate::error::{EegError, EegResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-dimension normalization constants (z-score mean and scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Per-dimension mean, length [`NUM_FEATURES`]
    pub mean: Vec<f32>,
    /// Per-dimension scale (standard deviation), length [`NUM_FEATURES`]
    pub scale: Vec<f32>,
}

impl ScalerParams {
    /// Identity scaler (zero mean, unit scale) for tests and uncalibrated runs
    pub fn identity() -> Self {
        ScalerParams {
            mean: vec![0.0; NUM_FEATURES],
            scale: vec![1.0; NUM_FEATURES],
        }
    }

    /// Parse scaler parameters from a JSON document
    pub fn from_json(json: &str) -> EegResult<Self> {
        let params: ScalerParams =
            serde_json::from_str(json).map_err(|e| EegError::InvalidCalibration {
                reason: format!("failed to parse scaler JSON: {}", e),
            })?;
        params.validate()?;
        Ok(params)
    }

    /// Load scaler parameters from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> EegResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EegError::InvalidCalibration {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }

    /// Check shape and numeric sanity of the constants.
    ///
    /// A zero or non-finite scale would turn every window into a division
    /// fault, so it is rejected here, at startup, rather than per sample.
    pub fn validate(&self) -> EegResult<()> {
        if self.mean.len() != NUM_FEATURES {
            return Err(EegError::InvalidCalibration {
                reason: format!(
                    "mean has {} entries, expected {}",
                    self.mean.len(),
                    NUM_FEATURES
                ),
            });
        }
        if self.scale.len() != NUM_FEATURES {
            return Err(EegError::InvalidCalibration {
                reason: format!(
                    "scale has {} entries, expected {}",
                    self.scale.len(),
                    NUM_FEATURES
                ),
            });
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(EegError::InvalidCalibration {
                reason: format!("mean[{}] is not finite", i),
            });
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(EegError::InvalidCalibration {
                reason: format!("scale[{}] is zero or not finite", i),
            });
        }
        Ok(())
    }

    /// Serialize to pretty JSON (for exporting a fitted scaler)
    pub fn to_json(&self) -> EegResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EegError::InvalidCalibration {
            reason: format!("failed to serialize scaler: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scaler_is_valid() {
        let params = ScalerParams::identity();
        assert!(params.validate().is_ok());
        assert_eq!(params.mean.len(), NUM_FEATURES);
        assert_eq!(params.scale.len(), NUM_FEATURES);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut params = ScalerParams::identity();
        params.scale[17] = 0.0;
        let err = params.validate().unwrap_err();
        assert!(matches!(err, EegError::InvalidCalibration { .. }));
        assert!(err.to_string().contains("scale[17]"));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let mut params = ScalerParams::identity();
        params.mean.pop();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut params = ScalerParams::identity();
        params.scale[0] = f32::NAN;
        assert!(params.validate().is_err());

        let mut params = ScalerParams::identity();
        params.mean[3] = f32::INFINITY;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let params = ScalerParams::identity();
        let json = params.to_json().unwrap();
        let restored = ScalerParams::from_json(&json).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(ScalerParams::from_json("{\"mean\": [0.0]}").is_err());
        assert!(ScalerParams::from_json("not json").is_err());
    }
}
