//! Z-score normalization against trained calibration constants

use eeg_core::{EegError, EegResult, ScalerParams, NUM_FEATURES};

/// Applies per-dimension z-score normalization to feature vectors.
///
/// Construction validates the calibration once; a zero or non-finite scale
/// is a fatal configuration error, never a per-window fault. After that,
/// `apply` is branch-free elementwise arithmetic.
#[derive(Debug, Clone)]
pub struct Normalizer {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl Normalizer {
    pub fn new(params: ScalerParams) -> EegResult<Self> {
        params.validate()?;
        Ok(Normalizer {
            mean: params.mean,
            scale: params.scale,
        })
    }

    /// Elementwise `(features[i] - mean[i]) / scale[i]`
    pub fn apply(&self, features: &[f32]) -> EegResult<Vec<f32>> {
        if features.len() != NUM_FEATURES {
            return Err(EegError::LengthMismatch {
                expected: NUM_FEATURES,
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(f, (m, s))| (f - m) / s)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scaler_passes_through() {
        let normalizer = Normalizer::new(ScalerParams::identity()).unwrap();
        let features: Vec<f32> = (0..NUM_FEATURES).map(|i| i as f32).collect();
        let normalized = normalizer.apply(&features).unwrap();
        assert_eq!(normalized, features);
    }

    #[test]
    fn test_z_score_arithmetic() {
        let mut params = ScalerParams::identity();
        params.mean[0] = 10.0;
        params.scale[0] = 2.0;

        let normalizer = Normalizer::new(params).unwrap();
        let mut features = vec![0.0f32; NUM_FEATURES];
        features[0] = 16.0;

        let normalized = normalizer.apply(&features).unwrap();
        assert_eq!(normalized[0], 3.0);
        assert_eq!(normalized[1], 0.0);
    }

    #[test]
    fn test_zero_scale_fails_at_construction() {
        let mut params = ScalerParams::identity();
        params.scale[100] = 0.0;
        assert!(Normalizer::new(params).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let normalizer = Normalizer::new(ScalerParams::identity()).unwrap();
        let err = normalizer.apply(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            EegError::LengthMismatch {
                expected: NUM_FEATURES,
                actual: 2
            }
        );
    }
}
