//! Sample-to-feature-vector preprocessing pipeline
//!
//! One [`EegPreprocessor`] instance owns the complete per-channel state:
//! converter, filter cascade, window buffers, and the most recent feature
//! vectors. All calls run to completion on the caller's context; a
//! multi-threaded host must serialize access or use one instance per
//! channel.

use crate::convert::AdcConverter;
use crate::features::{extract_features, FeatureVector};
use crate::filters::{FilterChain, SampleFilter};
use crate::normalize::Normalizer;
use crate::window::WindowAccumulator;
use eeg_core::{EegError, EegResult, ScalerParams, WINDOW_SIZE};

/// Downstream classifier seam.
///
/// The model itself (format, quantization, weights) lives outside this
/// crate; the pipeline only needs a pure scoring function over the
/// normalized feature vector.
pub trait Classifier {
    /// Score one normalized feature vector (higher = more seizure-like)
    fn classify(&self, features: &[f32]) -> f32;
}

impl<F> Classifier for F
where
    F: Fn(&[f32]) -> f32,
{
    fn classify(&self, features: &[f32]) -> f32 {
        self(features)
    }
}

/// Single-channel EEG preprocessing pipeline.
///
/// Data flows strictly forward: raw sample → microvolts → filtered value →
/// window slot → feature vector → normalized vector. Feature vectors are
/// recomputed from scratch for every completed window and have no identity
/// across windows.
pub struct EegPreprocessor {
    converter: AdcConverter,
    filters: FilterChain,
    window: WindowAccumulator,
    normalizer: Normalizer,
    last_filtered: f32,
    features: Option<FeatureVector>,
    normalized: Option<FeatureVector>,
}

impl EegPreprocessor {
    /// Build a pipeline with the default BITalino front end.
    ///
    /// Fails if the calibration constants are unusable (wrong shape, zero
    /// or non-finite scale).
    pub fn new(params: ScalerParams) -> EegResult<Self> {
        Self::with_converter(AdcConverter::default(), params)
    }

    pub fn with_converter(converter: AdcConverter, params: ScalerParams) -> EegResult<Self> {
        converter.spec().validate()?;
        Ok(EegPreprocessor {
            converter,
            filters: FilterChain::eeg_bandpass(),
            window: WindowAccumulator::new(),
            normalizer: Normalizer::new(params)?,
            last_filtered: 0.0,
            features: None,
            normalized: None,
        })
    }

    /// Return the pipeline to its initial empty state.
    ///
    /// Safe to call at any time and idempotent; used by fault recovery in
    /// the transport layer.
    pub fn reset(&mut self) {
        self.filters.reset();
        self.window.reset();
        self.last_filtered = 0.0;
        self.features = None;
        self.normalized = None;
    }

    /// Admit one raw ADC sample.
    ///
    /// The sample is converted and filtered exactly once, both values are
    /// stored in the window, and the return value is true exactly when this
    /// sample completed a window. The caller should then run
    /// [`extract_features`](Self::extract_features) and
    /// [`normalize`](Self::normalize) before admitting further samples.
    pub fn add_sample(&mut self, raw: u16) -> bool {
        let microvolts = self.converter.to_microvolts(raw);
        let filtered = self.filters.process(microvolts);
        self.last_filtered = filtered;

        let complete = self.window.push(microvolts, filtered);
        if complete {
            tracing::debug!(
                total_samples = self.window.total_samples(),
                "analysis window complete"
            );
        }
        complete
    }

    /// Last filtered sample produced by the most recent
    /// [`add_sample`](Self::add_sample) call (telemetry passthrough)
    pub fn last_filtered(&self) -> f32 {
        self.last_filtered
    }

    /// Lifetime sample count since construction or the last reset
    pub fn samples_seen(&self) -> u64 {
        self.window.total_samples()
    }

    /// Compute the raw feature vector from the buffered window.
    ///
    /// Errors with [`EegError::WindowNotReady`] until a full window has been
    /// admitted; never computes on partial data. On an unchanged buffer the
    /// result is bit-for-bit reproducible.
    pub fn extract_features(&mut self) -> EegResult<()> {
        if !self.window.is_primed() {
            return Err(EegError::WindowNotReady {
                filled: self.window.filled(),
                required: WINDOW_SIZE,
            });
        }

        self.features = Some(extract_features(self.window.filtered()));
        Ok(())
    }

    /// Raw feature vector from the most recent extraction, if any
    pub fn features(&self) -> Option<&[f32]> {
        self.features.as_deref()
    }

    /// Apply the calibration constants to the most recently extracted
    /// feature vector.
    pub fn normalize(&mut self) -> EegResult<()> {
        let features = self
            .features
            .as_ref()
            .ok_or(EegError::FeaturesNotExtracted)?;
        self.normalized = Some(self.normalizer.apply(features)?);
        Ok(())
    }

    /// Normalized feature vector ready for classification, if available
    pub fn normalized_features(&self) -> Option<&[f32]> {
        self.normalized.as_deref()
    }

    /// Run extraction, normalization, and classification for the window
    /// that just completed, in one synchronous turn.
    pub fn process_window<C: Classifier>(&mut self, classifier: &C) -> EegResult<f32> {
        self.extract_features()?;
        self.normalize()?;
        // normalize() just populated this
        let normalized = self
            .normalized
            .as_ref()
            .ok_or(EegError::FeaturesNotExtracted)?;
        Ok(classifier.classify(normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_core::NUM_FEATURES;

    fn fill_one_window(pipeline: &mut EegPreprocessor, samples: impl Iterator<Item = u16>) -> u32 {
        let mut completions = 0;
        for raw in samples {
            if pipeline.add_sample(raw) {
                completions += 1;
            }
        }
        completions
    }

    fn ramp_window() -> impl Iterator<Item = u16> {
        (0..WINDOW_SIZE).map(|i| 400 + (i % 200) as u16)
    }

    #[test]
    fn test_window_completes_on_final_sample() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();

        for i in 0..WINDOW_SIZE - 1 {
            assert!(!pipeline.add_sample(512), "early completion at sample {}", i);
        }
        assert!(pipeline.add_sample(512));
        assert_eq!(pipeline.samples_seen(), WINDOW_SIZE as u64);
    }

    #[test]
    fn test_premature_extraction_rejected() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        pipeline.add_sample(512);

        let err = pipeline.extract_features().unwrap_err();
        assert_eq!(
            err,
            EegError::WindowNotReady {
                filled: 1,
                required: WINDOW_SIZE
            }
        );
        assert!(pipeline.features().is_none());
    }

    #[test]
    fn test_normalize_requires_extraction() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        assert_eq!(pipeline.normalize().unwrap_err(), EegError::FeaturesNotExtracted);
        assert!(pipeline.normalized_features().is_none());
    }

    #[test]
    fn test_full_window_yields_finite_vector() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        assert_eq!(fill_one_window(&mut pipeline, ramp_window()), 1);

        pipeline.extract_features().unwrap();
        pipeline.normalize().unwrap();

        let normalized = pipeline.normalized_features().unwrap();
        assert_eq!(normalized.len(), NUM_FEATURES);
        assert!(normalized.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rerun_on_unchanged_window_is_idempotent() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        fill_one_window(&mut pipeline, ramp_window());

        pipeline.extract_features().unwrap();
        pipeline.normalize().unwrap();
        let first: Vec<f32> = pipeline.normalized_features().unwrap().to_vec();

        pipeline.extract_features().unwrap();
        pipeline.normalize().unwrap();
        let second: Vec<f32> = pipeline.normalized_features().unwrap().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_restores_determinism() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();

        fill_one_window(&mut pipeline, ramp_window());
        pipeline.extract_features().unwrap();
        let first: Vec<f32> = pipeline.features().unwrap().to_vec();

        pipeline.reset();
        assert_eq!(pipeline.samples_seen(), 0);
        assert!(pipeline.features().is_none());
        assert!(pipeline.normalized_features().is_none());

        fill_one_window(&mut pipeline, ramp_window());
        pipeline.extract_features().unwrap();
        let second: Vec<f32> = pipeline.features().unwrap().to_vec();

        assert_eq!(first, second);
    }

    #[test]
    fn test_mid_scale_window_produces_near_zero_features() {
        // Constant 512 converts to 0 µV; the filters settle at zero, so the
        // feature vector collapses to (near) zero everywhere.
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        fill_one_window(&mut pipeline, std::iter::repeat(512).take(WINDOW_SIZE));

        pipeline.extract_features().unwrap();
        let features = pipeline.features().unwrap();

        for (i, &value) in features.iter().enumerate() {
            assert!(value.abs() < 1e-3, "feature {} = {}", i, value);
        }
    }

    #[test]
    fn test_last_filtered_tracks_most_recent_sample() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        assert_eq!(pipeline.last_filtered(), 0.0);

        pipeline.add_sample(512);
        assert_eq!(pipeline.last_filtered(), 0.0); // 512 → 0 µV → 0 filtered

        pipeline.add_sample(900);
        assert!(pipeline.last_filtered() != 0.0);
    }

    #[test]
    fn test_process_window_with_closure_classifier() {
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();
        fill_one_window(&mut pipeline, ramp_window());

        let classifier = |features: &[f32]| features[0].abs().min(1.0);
        let score = pipeline.process_window(&classifier).unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_zero_scale_calibration_fails_construction() {
        let mut params = ScalerParams::identity();
        params.scale[0] = 0.0;
        assert!(EegPreprocessor::new(params).is_err());
    }

    #[test]
    fn test_back_to_back_windows_do_not_overlap() {
        // Two consecutive, different windows: the second extraction must
        // see only second-window data (no carry-over, no overlap).
        let mut pipeline = EegPreprocessor::new(ScalerParams::identity()).unwrap();

        fill_one_window(&mut pipeline, std::iter::repeat(600).take(WINDOW_SIZE));
        pipeline.extract_features().unwrap();
        let first_mean = pipeline.features().unwrap()[0];

        fill_one_window(&mut pipeline, std::iter::repeat(400).take(WINDOW_SIZE));
        pipeline.extract_features().unwrap();
        let second_mean = pipeline.features().unwrap()[0];

        assert!(first_mean > second_mean);
    }
}
