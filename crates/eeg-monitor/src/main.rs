//! EEG Monitor - live seizure screening over a simulated EEG channel
//!
//! Signal flow: EEG Simulator → Preprocessing Pipeline → Threshold Alarm

use anyhow::{anyhow, Context, Result};
use eeg_core::ScalerParams;
use eeg_processing::EegPreprocessor;
use eeg_simulation::{start_eeg_stream, SignalPattern, StreamCommand, StreamConfig};
use tokio::sync::broadcast::error::RecvError;

/// Normalized-score level above which a window raises a seizure alarm
const SEIZURE_THRESHOLD: f32 = 0.7;

/// Stand-in scoring until a trained model is wired in: mean absolute
/// normalized feature magnitude squashed into [0, 1). Large deviations from
/// the calibration baseline push the score toward 1.
fn heuristic_score(features: &[f32]) -> f32 {
    let mean_abs = features.iter().map(|f| f.abs()).sum::<f32>() / features.len() as f32;
    (mean_abs / 3.0).tanh()
}

fn usage() -> &'static str {
    "usage: eeg-monitor [CALIBRATION_JSON] [PATTERN]\n\
     \n\
     CALIBRATION_JSON  path to exported scaler constants (default: identity)\n\
     PATTERN           simulation preset name, e.g. \"Absence Seizure\""
}

fn load_calibration(path: Option<&str>) -> Result<ScalerParams> {
    match path {
        Some(path) => {
            let params = ScalerParams::from_file(path)
                .with_context(|| format!("loading calibration from {}", path))?;
            tracing::info!(path, "calibration loaded");
            Ok(params)
        }
        None => {
            tracing::warn!("no calibration file given, using identity scaler; scores are not comparable to a trained model");
            Ok(ScalerParams::identity())
        }
    }
}

fn find_preset(name: &str) -> Result<SignalPattern> {
    SignalPattern::presets()
        .into_iter()
        .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
        .map(|(_, pattern)| pattern)
        .ok_or_else(|| {
            let names: Vec<&str> = SignalPattern::presets()
                .into_iter()
                .map(|(n, _)| n)
                .collect();
            anyhow!("unknown pattern {:?}, available: {}", name, names.join(", "))
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", usage());
        return Ok(());
    }

    let params = load_calibration(args.first().map(String::as_str))?;
    let mut preprocessor = EegPreprocessor::new(params)?;

    let config = StreamConfig::default();
    let (mut data_receiver, control_sender) = start_eeg_stream(config).await?;

    if let Some(name) = args.get(1) {
        let pattern = find_preset(name)?;
        tracing::info!(pattern = pattern.description(), "simulation pattern selected");
        control_sender
            .send(StreamCommand::UpdatePattern(pattern))
            .await
            .context("stream control channel closed")?;
    }

    control_sender
        .send(StreamCommand::Start)
        .await
        .context("stream control channel closed")?;
    tracing::info!(threshold = SEIZURE_THRESHOLD, "monitoring started (Ctrl-C to stop)");

    let mut windows_scored: u64 = 0;
    loop {
        tokio::select! {
            chunk = data_receiver.recv() => {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(RecvError::Lagged(skipped)) => {
                        // Dropped chunks invalidate filter and window state
                        tracing::warn!(skipped, "fell behind the stream, resetting pipeline");
                        preprocessor.reset();
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                for &raw in &chunk.samples {
                    if preprocessor.add_sample(raw) {
                        let score = preprocessor.process_window(&heuristic_score)?;
                        windows_scored += 1;

                        if score > SEIZURE_THRESHOLD {
                            tracing::warn!(score, window = windows_scored, "SEIZURE ALARM");
                        } else {
                            tracing::info!(score, window = windows_scored, "window scored");
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(windows_scored, "shutting down");
                let _ = control_sender.send(StreamCommand::Stop).await;
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_core::NUM_FEATURES;

    #[test]
    fn test_heuristic_score_bounds() {
        let quiet = vec![0.0f32; NUM_FEATURES];
        assert_eq!(heuristic_score(&quiet), 0.0);

        let loud = vec![5.0f32; NUM_FEATURES];
        let score = heuristic_score(&loud);
        assert!(score > SEIZURE_THRESHOLD && score < 1.0);
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert!(find_preset("absence seizure").is_ok());
        assert!(find_preset("Flatline").is_ok());
        assert!(find_preset("no such pattern").is_err());
    }

    #[test]
    fn test_missing_calibration_falls_back_to_identity() {
        let params = load_calibration(None).unwrap();
        assert_eq!(params, ScalerParams::identity());
    }

    #[test]
    fn test_bad_calibration_path_is_an_error() {
        assert!(load_calibration(Some("/nonexistent/scaler.json")).is_err());
    }
}
