//! Fixed-coefficient IIR filtering for the EEG channel
//!
//! The band of interest is roughly 0.5-40 Hz at a 178 Hz sampling rate.
//! Two 4th-order Butterworth designs run in cascade, high-pass first to
//! strip electrode drift, then low-pass to reject EMG and line noise.
//! Coefficients are fixed at the values the classifier was trained with;
//! do not redesign or reorder the cascade.

/// High-pass Butterworth, cutoff 0.5 Hz, order 4 (feed-forward taps)
pub const HPF_B: [f32; 5] = [0.9895, -3.9580, 5.9370, -3.9580, 0.9895];
/// High-pass feed-back taps; the leading 1.0 is never applied as a multiply
pub const HPF_A: [f32; 5] = [1.0000, -3.9580, 5.9162, -3.9370, 0.9790];

/// Low-pass Butterworth, cutoff 40 Hz, order 4 (feed-forward taps)
pub const LPF_B: [f32; 5] = [0.0201, 0.0804, 0.1206, 0.0804, 0.0201];
/// Low-pass feed-back taps
pub const LPF_A: [f32; 5] = [1.0000, -1.9644, 1.7469, -0.7498, 0.1327];

/// Seam for stateful per-sample processing stages
pub trait SampleFilter {
    /// Process one sample and return the filtered value
    fn process(&mut self, input: f32) -> f32;

    /// Clear all rolling state
    fn reset(&mut self);
}

/// 4th-order IIR filter in normalized direct form I.
///
/// Keeps the five most recent inputs and outputs; each call shifts both
/// histories right by one slot and evaluates the difference equation
/// `y[0] = Σ b[i]·x[i] − Σ_{i=1..4} a[i]·y[i]`. Exact tap ordering matters
/// for numerical parity with the trained model, so the histories are plain
/// arrays rotated by index rather than a ring buffer.
#[derive(Debug, Clone)]
pub struct DirectFormIir {
    b: [f32; 5],
    a: [f32; 5],
    x: [f32; 5],
    y: [f32; 5],
}

impl DirectFormIir {
    pub fn new(b: [f32; 5], a: [f32; 5]) -> Self {
        DirectFormIir {
            b,
            a,
            x: [0.0; 5],
            y: [0.0; 5],
        }
    }

    /// 0.5 Hz high-pass stage
    pub fn highpass() -> Self {
        Self::new(HPF_B, HPF_A)
    }

    /// 40 Hz low-pass stage
    pub fn lowpass() -> Self {
        Self::new(LPF_B, LPF_A)
    }
}

impl SampleFilter for DirectFormIir {
    fn process(&mut self, input: f32) -> f32 {
        for i in (1..5).rev() {
            self.x[i] = self.x[i - 1];
            self.y[i] = self.y[i - 1];
        }
        self.x[0] = input;

        self.y[0] = self.b[0] * self.x[0]
            + self.b[1] * self.x[1]
            + self.b[2] * self.x[2]
            + self.b[3] * self.x[3]
            + self.b[4] * self.x[4]
            - self.a[1] * self.y[1]
            - self.a[2] * self.y[2]
            - self.a[3] * self.y[3]
            - self.a[4] * self.y[4];

        self.y[0]
    }

    fn reset(&mut self) {
        self.x = [0.0; 5];
        self.y = [0.0; 5];
    }
}

/// The fixed preprocessing cascade: high-pass into low-pass.
///
/// Order-sensitive: the high-pass output feeds the low-pass input. Each
/// stage owns its own histories; work is O(1) per sample with no
/// look-ahead, suitable for sample-by-sample real-time use.
#[derive(Debug, Clone)]
pub struct FilterChain {
    highpass: DirectFormIir,
    lowpass: DirectFormIir,
}

impl FilterChain {
    /// Standard EEG band-limiting cascade (0.5-40 Hz)
    pub fn eeg_bandpass() -> Self {
        FilterChain {
            highpass: DirectFormIir::highpass(),
            lowpass: DirectFormIir::lowpass(),
        }
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::eeg_bandpass()
    }
}

impl SampleFilter for FilterChain {
    fn process(&mut self, input: f32) -> f32 {
        let high_passed = self.highpass.process(input);
        self.lowpass.process(high_passed)
    }

    fn reset(&mut self) {
        self.highpass.reset();
        self.lowpass.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference evaluation of the difference equation on a full signal
    fn filter_reference(b: &[f32; 5], a: &[f32; 5], signal: &[f32]) -> Vec<f32> {
        let mut x = [0.0f32; 5];
        let mut y = [0.0f32; 5];
        let mut out = Vec::with_capacity(signal.len());
        for &sample in signal {
            for i in (1..5).rev() {
                x[i] = x[i - 1];
                y[i] = y[i - 1];
            }
            x[0] = sample;
            y[0] = b[0] * x[0] + b[1] * x[1] + b[2] * x[2] + b[3] * x[3] + b[4] * x[4]
                - a[1] * y[1]
                - a[2] * y[2]
                - a[3] * y[3]
                - a[4] * y[4];
            out.push(y[0]);
        }
        out
    }

    #[test]
    fn test_impulse_response_first_taps() {
        let mut filter = DirectFormIir::lowpass();

        // First output of a unit impulse is exactly b[0]
        assert_eq!(filter.process(1.0), LPF_B[0]);
        // Second output: b[1] - a[1]*y[0]
        let expected = LPF_B[1] - LPF_A[1] * LPF_B[0];
        assert!((filter.process(0.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_matches_reference_recurrence() {
        let signal: Vec<f32> = (0..64)
            .map(|i| (2.0 * std::f32::consts::PI * i as f32 / 16.0).sin())
            .collect();

        let mut filter = DirectFormIir::highpass();
        let streamed: Vec<f32> = signal.iter().map(|&s| filter.process(s)).collect();
        let reference = filter_reference(&HPF_B, &HPF_A, &signal);

        for (s, r) in streamed.iter().zip(&reference) {
            assert_eq!(s, r);
        }
    }

    #[test]
    fn test_chain_is_highpass_then_lowpass() {
        let signal: Vec<f32> = (0..100).map(|i| (i as f32 * 0.3).sin() + 1.0).collect();

        let mut chain = FilterChain::eeg_bandpass();
        let chained: Vec<f32> = signal.iter().map(|&s| chain.process(s)).collect();

        let mut hp = DirectFormIir::highpass();
        let mut lp = DirectFormIir::lowpass();
        let composed: Vec<f32> = signal.iter().map(|&s| lp.process(hp.process(s))).collect();

        assert_eq!(chained, composed);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut chain = FilterChain::eeg_bandpass();
        let first: Vec<f32> = (0..20).map(|i| chain.process(i as f32)).collect();

        chain.reset();
        let second: Vec<f32> = (0..20).map(|i| chain.process(i as f32)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_input_stays_zero() {
        let mut chain = FilterChain::eeg_bandpass();
        for _ in 0..50 {
            assert_eq!(chain.process(0.0), 0.0);
        }
    }
}
