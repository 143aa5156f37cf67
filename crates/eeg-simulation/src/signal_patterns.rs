//! Pre-defined EEG signal patterns for realistic simulation

use std::f32::consts::PI;

/// Predefined EEG activity patterns, amplitudes in microvolts
#[derive(Debug, Clone, Copy)]
pub enum SignalPattern {
    /// Flat signal at a constant offset
    Constant { level_uv: f32 },
    /// Single-frequency rhythm (e.g. 10 Hz alpha)
    Rhythmic {
        frequency: f32,
        amplitude_uv: f32,
        baseline_uv: f32,
    },
    /// Slow electrode drift, the component the high-pass stage exists for
    Drift {
        rate_uv_per_s: f32,
        rhythm_amplitude_uv: f32,
    },
    /// Repeating spike-and-wave discharge, the classic ictal morphology
    SpikeWave {
        discharge_frequency: f32,
        spike_amplitude_uv: f32,
    },
    /// Burst-suppression: high-amplitude bursts separated by near-silence
    Burst {
        on_duration: f32,
        off_duration: f32,
        amplitude_uv: f32,
        burst_frequency: f32,
    },
}

impl SignalPattern {
    /// Deterministic signal value (µV) at the given time
    pub fn amplitude_at_time(&self, time: f32) -> f32 {
        match self {
            SignalPattern::Constant { level_uv } => *level_uv,

            SignalPattern::Rhythmic { frequency, amplitude_uv, baseline_uv } => {
                baseline_uv + amplitude_uv * (2.0 * PI * frequency * time).sin()
            },

            SignalPattern::Drift { rate_uv_per_s, rhythm_amplitude_uv } => {
                rate_uv_per_s * time + rhythm_amplitude_uv * (2.0 * PI * 10.0 * time).sin()
            },

            SignalPattern::SpikeWave { discharge_frequency, spike_amplitude_uv } => {
                // Sharpened sinusoid: cubing keeps the sign but narrows the
                // peaks into spikes riding a slow wave
                let phase = (2.0 * PI * discharge_frequency * time).sin();
                spike_amplitude_uv * phase * phase * phase
            },

            SignalPattern::Burst { on_duration, off_duration, amplitude_uv, burst_frequency } => {
                let cycle_duration = on_duration + off_duration;
                let phase = time % cycle_duration;
                if phase < *on_duration {
                    amplitude_uv * (2.0 * PI * burst_frequency * time).sin()
                } else {
                    0.0
                }
            },
        }
    }

    /// Get pattern description
    pub fn description(&self) -> &'static str {
        match self {
            SignalPattern::Constant { .. } => "Constant offset",
            SignalPattern::Rhythmic { .. } => "Rhythmic activity",
            SignalPattern::Drift { .. } => "Electrode drift",
            SignalPattern::SpikeWave { .. } => "Spike-and-wave discharge",
            SignalPattern::Burst { .. } => "Burst suppression",
        }
    }

    /// Create common preset patterns
    pub fn presets() -> Vec<(&'static str, SignalPattern)> {
        vec![
            ("Rest (eyes closed)", SignalPattern::Rhythmic {
                frequency: 10.0, amplitude_uv: 30.0, baseline_uv: 0.0
            }),
            ("Rest (eyes open)", SignalPattern::Rhythmic {
                frequency: 18.0, amplitude_uv: 10.0, baseline_uv: 0.0
            }),
            ("Drowsy", SignalPattern::Rhythmic {
                frequency: 6.0, amplitude_uv: 40.0, baseline_uv: 0.0
            }),
            ("Electrode Drift", SignalPattern::Drift {
                rate_uv_per_s: 50.0, rhythm_amplitude_uv: 20.0
            }),
            ("Absence Seizure", SignalPattern::SpikeWave {
                discharge_frequency: 3.0, spike_amplitude_uv: 300.0
            }),
            ("Tonic-Clonic Onset", SignalPattern::SpikeWave {
                discharge_frequency: 5.0, spike_amplitude_uv: 400.0
            }),
            ("Burst Suppression", SignalPattern::Burst {
                on_duration: 1.0, off_duration: 2.0, amplitude_uv: 150.0, burst_frequency: 9.0
            }),
            ("Flatline", SignalPattern::Constant { level_uv: 0.0 }),
        ]
    }
}
