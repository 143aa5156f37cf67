//! Real-time EEG sample streaming for live processing

use crate::eeg_simulator::{EegConfig, EegSimulator, PatternConfig};
use eeg_core::EegResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration, Instant};

/// Configuration for real-time streaming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// EEG simulation configuration
    pub eeg_config: EegConfig,
    /// Chunk duration in seconds (e.g. 0.1 for 100ms chunks)
    pub chunk_duration: f32,
    /// Buffer size for the stream (number of chunks to keep)
    pub buffer_size: usize,
    /// Update rate in Hz (how often to send new data)
    pub update_rate: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            eeg_config: EegConfig::default(),
            chunk_duration: 0.1,
            buffer_size: 50,
            update_rate: 10.0,
        }
    }
}

/// One chunk of raw ADC samples with its stream position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleChunk {
    /// Raw 10-bit ADC counts
    pub samples: Vec<u16>,
    /// Stream time of the first sample, in seconds
    pub start_time: f32,
    /// Monotonic chunk index
    pub sequence: u64,
}

/// Commands for controlling the stream
#[derive(Debug, Clone)]
pub enum StreamCommand {
    Start,
    Stop,
    Pause,
    Resume,
    UpdateConfig(StreamConfig),
    UpdatePattern(crate::signal_patterns::SignalPattern),
}

/// Real-time EEG sample stream
pub struct RealTimeEegStream {
    config: StreamConfig,
    simulator: Arc<Mutex<EegSimulator>>,
    data_sender: broadcast::Sender<SampleChunk>,
    control_receiver: mpsc::Receiver<StreamCommand>,
    control_sender: mpsc::Sender<StreamCommand>,
    is_running: Arc<Mutex<bool>>,
}

impl RealTimeEegStream {
    /// Create new real-time EEG stream
    pub fn new(config: StreamConfig) -> EegResult<Self> {
        let simulator = EegSimulator::new(config.eeg_config.clone())?;
        let (data_sender, _) = broadcast::channel(config.buffer_size);
        let (control_sender, control_receiver) = mpsc::channel(32);

        Ok(RealTimeEegStream {
            config,
            simulator: Arc::new(Mutex::new(simulator)),
            data_sender,
            control_receiver,
            control_sender,
            is_running: Arc::new(Mutex::new(false)),
        })
    }

    /// Get a receiver for data updates
    pub fn subscribe(&self) -> broadcast::Receiver<SampleChunk> {
        self.data_sender.subscribe()
    }

    /// Get control sender for sending commands
    pub fn control_handle(&self) -> mpsc::Sender<StreamCommand> {
        self.control_sender.clone()
    }

    /// Run the streaming loop until the control channel closes
    pub async fn run(&mut self) -> EegResult<()> {
        let update_interval = Duration::from_secs_f32(1.0 / self.config.update_rate);
        let mut interval_timer = interval(update_interval);

        let mut sequence: u64 = 0;
        let mut stream_time: f32 = 0.0;

        tracing::info!(
            update_rate = self.config.update_rate,
            chunk_ms = self.config.chunk_duration * 1000.0,
            "EEG stream ready"
        );

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    let is_running = *self.is_running.lock().await;
                    if is_running {
                        let start_time = Instant::now();

                        let samples = {
                            let mut sim = self.simulator.lock().await;
                            sim.generate_chunk(self.config.chunk_duration)?
                        };

                        let chunk = SampleChunk {
                            samples,
                            start_time: stream_time,
                            sequence,
                        };
                        sequence += 1;
                        stream_time += self.config.chunk_duration;

                        // Ignore send errors, no subscribers is fine
                        let _ = self.data_sender.send(chunk);

                        let generation_time = start_time.elapsed();
                        if generation_time.as_secs_f32() > self.config.chunk_duration {
                            tracing::warn!(
                                took_ms = generation_time.as_millis() as u64,
                                budget_ms = (self.config.chunk_duration * 1000.0) as u64,
                                "chunk generation slower than real time"
                            );
                        }
                    }
                }

                command = self.control_receiver.recv() => {
                    match command {
                        Some(StreamCommand::Start) | Some(StreamCommand::Resume) => {
                            *self.is_running.lock().await = true;
                            tracing::info!("EEG stream running");
                        }
                        Some(StreamCommand::Pause) => {
                            *self.is_running.lock().await = false;
                            tracing::info!("EEG stream paused");
                        }
                        Some(StreamCommand::Stop) => {
                            *self.is_running.lock().await = false;
                            sequence = 0;
                            stream_time = 0.0;
                            {
                                let mut sim = self.simulator.lock().await;
                                sim.reset_time();
                            }
                            tracing::info!("EEG stream stopped");
                        }
                        Some(StreamCommand::UpdateConfig(new_config)) => {
                            {
                                let mut sim = self.simulator.lock().await;
                                sim.update_config(new_config.eeg_config.clone())?;
                            }
                            let new_interval = Duration::from_secs_f32(1.0 / new_config.update_rate);
                            interval_timer = interval(new_interval);
                            self.config = new_config;
                            tracing::info!("EEG stream configuration updated");
                        }
                        Some(StreamCommand::UpdatePattern(pattern)) => {
                            let mut config = self.config.clone();
                            config.eeg_config.pattern = PatternConfig::from_pattern(pattern);
                            {
                                let mut sim = self.simulator.lock().await;
                                sim.update_config(config.eeg_config.clone())?;
                            }
                            self.config = config;
                            tracing::info!(pattern = pattern.description(), "EEG stream pattern updated");
                        }
                        None => {
                            tracing::info!("EEG stream control channel closed");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Check if stream is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.lock().await
    }

    /// Get current configuration
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }
}

/// Helper function to create and start a stream in the background
pub async fn start_eeg_stream(
    config: StreamConfig,
) -> EegResult<(broadcast::Receiver<SampleChunk>, mpsc::Sender<StreamCommand>)> {
    let mut stream = RealTimeEegStream::new(config)?;
    let data_receiver = stream.subscribe();
    let control_sender = stream.control_handle();

    tokio::spawn(async move {
        if let Err(e) = stream.run().await {
            tracing::error!(error = %e, "EEG stream terminated");
        }
    });

    Ok((data_receiver, control_sender))
}
