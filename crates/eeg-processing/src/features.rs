//! Statistical feature extraction over analysis windows
//!
//! Each completed window yields 26 temporal descriptors for the whole
//! window plus 26 per sub-segment, concatenated into one flat 194-element
//! vector. Ordering and arithmetic are fixed by the trained classifier:
//! descriptors must not be reordered, and the epsilon guards must stay.

use eeg_core::{EPSILON, FEATURES_PER_BLOCK, NUM_FEATURES, NUM_SEGMENTS, SEGMENT_SIZE, WINDOW_SIZE};

/// Flat feature vector of [`NUM_FEATURES`] values
pub type FeatureVector = Vec<f32>;

/// Compute the full 194-element feature vector from a filtered window.
///
/// The first block covers the whole window; the following
/// [`NUM_SEGMENTS`] blocks cover consecutive [`SEGMENT_SIZE`]-sample
/// segments, left to right. Segment truncation leaves the last few window
/// samples out of all segment blocks (see [`eeg_core::SEGMENT_SIZE`]).
pub fn extract_features(filtered: &[f32; WINDOW_SIZE]) -> FeatureVector {
    let mut features = vec![0.0f32; NUM_FEATURES];

    extract_block(&filtered[..], &mut features[..FEATURES_PER_BLOCK]);

    for seg in 0..NUM_SEGMENTS {
        let start = seg * SEGMENT_SIZE;
        let out_start = (seg + 1) * FEATURES_PER_BLOCK;
        extract_block(
            &filtered[start..start + SEGMENT_SIZE],
            &mut features[out_start..out_start + FEATURES_PER_BLOCK],
        );
    }

    features
}

/// Fill one 26-descriptor block for a segment.
///
/// Base statistics are computed once and reused by every derived
/// descriptor; segments carry no state across calls.
fn extract_block(segment: &[f32], out: &mut [f32]) {
    debug_assert_eq!(out.len(), FEATURES_PER_BLOCK);

    let len = segment.len() as f32;
    let mean_val = mean(segment);
    let variance_val = variance(segment, mean_val);
    let std_val = variance_val.sqrt();
    let min_val = min(segment);
    let max_val = max(segment);
    let range = max_val - min_val;
    let rms_val = rms(segment);
    let energy_val = energy(segment);
    let crossings = zero_crossings(segment) as f32;
    let mean_diff = mean_abs_diff(segment);
    let std_diff = std_abs_diff(segment, mean_diff);

    out[0] = mean_val;
    out[1] = median(segment);
    out[2] = std_val;
    out[3] = variance_val;
    out[4] = min_val;
    out[5] = max_val;
    out[6] = range;
    out[7] = rms_val;
    out[8] = energy_val;
    out[9] = skewness(segment, mean_val, std_val);
    out[10] = kurtosis(segment, mean_val, std_val);
    out[11] = crossings;
    out[12] = entropy(segment);
    out[13] = mean_diff;
    out[14] = std_diff;
    out[15] = range;
    out[16] = std_val / (mean_val + EPSILON);
    out[17] = max_val / (min_val + EPSILON);
    out[18] = mean_val.abs();
    out[19] = std_val * std_val;
    out[20] = rms_val / (mean_val.abs() + EPSILON);
    out[21] = energy_val / len;
    out[22] = range / 2.0;
    out[23] = mean_diff.abs();
    out[24] = std_diff / (std_val + EPSILON);
    out[25] = crossings / len;
}

pub fn mean(data: &[f32]) -> f32 {
    data.iter().sum::<f32>() / data.len() as f32
}

/// Median via a full sort of a copy; even lengths average the middle pair
pub fn median(data: &[f32]) -> f32 {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Population variance around a precomputed mean
pub fn variance(data: &[f32], mean: f32) -> f32 {
    data.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / data.len() as f32
}

pub fn min(data: &[f32]) -> f32 {
    data.iter().fold(f32::INFINITY, |a, &b| a.min(b))
}

pub fn max(data: &[f32]) -> f32 {
    data.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b))
}

pub fn rms(data: &[f32]) -> f32 {
    (data.iter().map(|x| x * x).sum::<f32>() / data.len() as f32).sqrt()
}

/// Total energy, the un-normalized sum of squares
pub fn energy(data: &[f32]) -> f32 {
    data.iter().map(|x| x * x).sum()
}

/// Third standardized moment; zero for a degenerate (constant) segment
pub fn skewness(data: &[f32], mean: f32, std: f32) -> f32 {
    if std < EPSILON {
        return 0.0;
    }
    let sum: f32 = data
        .iter()
        .map(|x| {
            let z = (x - mean) / std;
            z * z * z
        })
        .sum();
    sum / data.len() as f32
}

/// Excess kurtosis (fourth standardized moment minus 3); zero when degenerate
pub fn kurtosis(data: &[f32], mean: f32, std: f32) -> f32 {
    if std < EPSILON {
        return 0.0;
    }
    let sum: f32 = data
        .iter()
        .map(|x| {
            let z = (x - mean) / std;
            z * z * z * z
        })
        .sum();
    sum / data.len() as f32 - 3.0
}

/// Count sign changes between consecutive samples.
///
/// Zero is treated as non-negative, so a touch of exactly 0.0 from below
/// counts as a crossing.
pub fn zero_crossings(data: &[f32]) -> u32 {
    let mut count = 0;
    for pair in data.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        if (prev >= 0.0 && cur < 0.0) || (prev < 0.0 && cur >= 0.0) {
            count += 1;
        }
    }
    count
}

/// Magnitude-weighted entropy `-Σ p·ln(p)` with `p = |x| + ε`.
///
/// Not a normalized probability distribution; the classifier was trained
/// on exactly this quantity.
pub fn entropy(data: &[f32]) -> f32 {
    let sum: f32 = data
        .iter()
        .map(|x| {
            let p = x.abs() + EPSILON;
            p * p.ln()
        })
        .sum();
    -sum
}

/// Mean absolute first difference (divisor is `len - 1`)
pub fn mean_abs_diff(data: &[f32]) -> f32 {
    if data.len() < 2 {
        return 0.0;
    }
    let sum: f32 = data.windows(2).map(|w| (w[1] - w[0]).abs()).sum();
    sum / (data.len() - 1) as f32
}

/// Standard deviation of absolute first differences around `mean_diff`
pub fn std_abs_diff(data: &[f32], mean_diff: f32) -> f32 {
    if data.len() < 2 {
        return 0.0;
    }
    let sum: f32 = data
        .windows(2)
        .map(|w| {
            let diff = (w[1] - w[0]).abs() - mean_diff;
            diff * diff
        })
        .sum();
    (sum / (data.len() - 1) as f32).sqrt()
}
