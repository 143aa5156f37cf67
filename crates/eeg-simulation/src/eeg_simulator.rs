//! EEG signal simulator producing raw ADC samples
//!
//! Synthesizes a scalp potential in microvolts, then pushes it back through
//! the acquisition front end model (gain, mid-supply offset, quantization)
//! so consumers receive exactly what the device would put on the wire:
//! 10-bit ADC counts.

use crate::signal_patterns::SignalPattern;
use eeg_core::{AdcSpec, EegError, EegResult, ADC_MAX, SAMPLE_RATE_HZ};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for EEG simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EegConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f32,
    /// Signal pattern to generate
    pub pattern: PatternConfig,
    /// Noise configuration
    pub noise: NoiseConfig,
    /// Power line interference frequency (50/60 Hz), if any
    pub powerline_freq: Option<f32>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

/// Serializable pattern wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub pattern_type: String,
    pub parameters: Vec<f32>,
}

impl PatternConfig {
    pub fn from_pattern(pattern: SignalPattern) -> Self {
        match pattern {
            SignalPattern::Constant { level_uv } => PatternConfig {
                pattern_type: "constant".to_string(),
                parameters: vec![level_uv],
            },
            SignalPattern::Rhythmic { frequency, amplitude_uv, baseline_uv } => PatternConfig {
                pattern_type: "rhythmic".to_string(),
                parameters: vec![frequency, amplitude_uv, baseline_uv],
            },
            SignalPattern::Drift { rate_uv_per_s, rhythm_amplitude_uv } => PatternConfig {
                pattern_type: "drift".to_string(),
                parameters: vec![rate_uv_per_s, rhythm_amplitude_uv],
            },
            SignalPattern::SpikeWave { discharge_frequency, spike_amplitude_uv } => PatternConfig {
                pattern_type: "spike_wave".to_string(),
                parameters: vec![discharge_frequency, spike_amplitude_uv],
            },
            SignalPattern::Burst { on_duration, off_duration, amplitude_uv, burst_frequency } => {
                PatternConfig {
                    pattern_type: "burst".to_string(),
                    parameters: vec![on_duration, off_duration, amplitude_uv, burst_frequency],
                }
            },
        }
    }

    pub fn to_pattern(&self) -> SignalPattern {
        match self.pattern_type.as_str() {
            "constant" => SignalPattern::Constant {
                level_uv: self.parameters.first().copied().unwrap_or(0.0),
            },
            "drift" => SignalPattern::Drift {
                rate_uv_per_s: self.parameters.first().copied().unwrap_or(50.0),
                rhythm_amplitude_uv: self.parameters.get(1).copied().unwrap_or(20.0),
            },
            "spike_wave" => SignalPattern::SpikeWave {
                discharge_frequency: self.parameters.first().copied().unwrap_or(3.0),
                spike_amplitude_uv: self.parameters.get(1).copied().unwrap_or(300.0),
            },
            "burst" => SignalPattern::Burst {
                on_duration: self.parameters.first().copied().unwrap_or(1.0),
                off_duration: self.parameters.get(1).copied().unwrap_or(2.0),
                amplitude_uv: self.parameters.get(2).copied().unwrap_or(150.0),
                burst_frequency: self.parameters.get(3).copied().unwrap_or(9.0),
            },
            _ => SignalPattern::Rhythmic {
                frequency: self.parameters.first().copied().unwrap_or(10.0),
                amplitude_uv: self.parameters.get(1).copied().unwrap_or(30.0),
                baseline_uv: self.parameters.get(2).copied().unwrap_or(0.0),
            },
        }
    }
}

/// Noise configuration for realistic EEG simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Gaussian noise standard deviation in µV (0.0 = no noise)
    pub gaussian_std_uv: f32,
    /// Baseline wander amplitude in µV
    pub baseline_wander_uv: f32,
    /// Motion artifact probability per sample (0.0 to 1.0)
    pub motion_artifact_prob: f32,
    /// Motion artifact amplitude in µV
    pub motion_artifact_amp_uv: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            gaussian_std_uv: 2.0,
            baseline_wander_uv: 5.0,
            motion_artifact_prob: 0.002,
            motion_artifact_amp_uv: 100.0,
        }
    }
}

impl Default for EegConfig {
    fn default() -> Self {
        Self {
            sampling_rate: SAMPLE_RATE_HZ,
            pattern: PatternConfig::from_pattern(SignalPattern::Rhythmic {
                frequency: 10.0,
                amplitude_uv: 30.0,
                baseline_uv: 0.0,
            }),
            noise: NoiseConfig::default(),
            powerline_freq: Some(50.0),
            seed: None,
        }
    }
}

/// EEG signal simulator
pub struct EegSimulator {
    config: EegConfig,
    adc: AdcSpec,
    rng: rand::rngs::StdRng,
    normal_dist: Normal<f32>,
    // Integer clock so chunked and whole-run generation hit bitwise
    // identical sample times
    sample_clock: u64,
}

impl EegSimulator {
    /// Create new EEG simulator with configuration
    pub fn new(config: EegConfig) -> EegResult<Self> {
        if config.sampling_rate <= 0.0 || !config.sampling_rate.is_finite() {
            return Err(EegError::SimulationError {
                message: format!("invalid sampling rate: {}", config.sampling_rate),
            });
        }

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal_dist = Normal::new(0.0, config.noise.gaussian_std_uv).map_err(|e| {
            EegError::SimulationError {
                message: format!("failed to create normal distribution: {}", e),
            }
        })?;

        Ok(EegSimulator {
            config,
            adc: AdcSpec::bitalino(),
            rng,
            normal_dist,
            sample_clock: 0,
        })
    }

    /// Generate raw ADC samples for the specified duration in seconds
    pub fn generate(&mut self, duration: f32) -> EegResult<Vec<u16>> {
        let sample_count = (duration * self.config.sampling_rate) as usize;
        let mut samples = Vec::with_capacity(sample_count);

        let dt = 1.0 / self.config.sampling_rate;
        let pattern = self.config.pattern.to_pattern();

        for sample_idx in 0..sample_count {
            let time = (self.sample_clock + sample_idx as u64) as f32 * dt;

            let mut microvolts = pattern.amplitude_at_time(time);
            microvolts += self.add_noise(time);

            if let Some(powerline_freq) = self.config.powerline_freq {
                microvolts += self.add_powerline_interference(time, powerline_freq);
            }

            samples.push(self.quantize(microvolts));
        }

        // Keep the signal continuous across generate() calls
        self.sample_clock += sample_count as u64;

        Ok(samples)
    }

    /// Map a scalp potential in µV to the 10-bit count the ADC would emit
    fn quantize(&self, microvolts: f32) -> u16 {
        let eeg_voltage = microvolts * 1e-6;
        let adc_voltage = eeg_voltage * self.adc.gain + self.adc.supply_voltage / 2.0;
        let counts = (adc_voltage / self.adc.supply_voltage) * self.adc.resolution;
        counts.round().clamp(0.0, ADC_MAX as f32) as u16
    }

    /// Add various noise components in µV
    fn add_noise(&mut self, time: f32) -> f32 {
        let mut noise = 0.0;

        noise += self.normal_dist.sample(&mut self.rng);

        // Baseline wander (slow drift)
        noise += self.config.noise.baseline_wander_uv
            * (2.0 * std::f32::consts::PI * 0.1 * time).sin();

        // Motion artifacts (random spikes)
        if self.rng.gen::<f32>() < self.config.noise.motion_artifact_prob {
            noise += self.config.noise.motion_artifact_amp_uv * self.rng.gen_range(-1.0..1.0);
        }

        noise
    }

    /// Add powerline interference in µV
    fn add_powerline_interference(&mut self, time: f32, frequency: f32) -> f32 {
        let amplitude_uv = 5.0;
        amplitude_uv * (2.0 * std::f32::consts::PI * frequency * time).sin()
    }

    /// Rewind the sample clock to zero (useful for restarting simulation)
    pub fn reset_time(&mut self) {
        self.sample_clock = 0;
    }

    /// Get current configuration
    pub fn config(&self) -> &EegConfig {
        &self.config
    }

    /// Update configuration, preserving signal continuity
    pub fn update_config(&mut self, config: EegConfig) -> EegResult<()> {
        if config.sampling_rate <= 0.0 || !config.sampling_rate.is_finite() {
            return Err(EegError::SimulationError {
                message: format!("invalid sampling rate: {}", config.sampling_rate),
            });
        }
        self.normal_dist = Normal::new(0.0, config.noise.gaussian_std_uv).map_err(|e| {
            EegError::SimulationError {
                message: format!("failed to create normal distribution: {}", e),
            }
        })?;
        self.config = config;
        Ok(())
    }

    /// Generate continuous chunks for streaming
    pub fn generate_chunk(&mut self, chunk_duration: f32) -> EegResult<Vec<u16>> {
        self.generate(chunk_duration)
    }
}
