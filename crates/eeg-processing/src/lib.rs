//! EEG-Processing: sample-to-feature-vector pipeline for seizure detection
//!
//! Converts raw ADC samples to microvolts, band-limits them with a fixed
//! IIR cascade, accumulates one-second windows, and produces the z-score
//! normalized 194-element feature vector the classifier consumes.

pub mod convert;
pub mod features;
pub mod filters;
pub mod normalize;
pub mod pipeline;
pub mod window;

pub use convert::AdcConverter;
pub use features::{extract_features, FeatureVector};
pub use filters::{DirectFormIir, FilterChain, SampleFilter};
pub use normalize::Normalizer;
pub use pipeline::{Classifier, EegPreprocessor};
pub use window::WindowAccumulator;
