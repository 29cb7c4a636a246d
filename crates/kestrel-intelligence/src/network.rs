// ABOUTME: Network-quality correlation, degradation events, and impact estimation
// ABOUTME: Hysteresis state machine for degradation windows plus band and window statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52
#![allow(clippy::cast_possible_truncation)] // Safe: decile indices are 0-9
#![allow(clippy::cast_sign_loss)] // Safe: qualities are clamped non-negative before bucketing

use serde::{Deserialize, Serialize};
use tracing::debug;

use kestrel_core::models::{FlightSample, Point3};

use crate::constants::network::{
    CRITICAL_ERROR_MULTIPLIER, DEGRADATION_THRESHOLD, EXCELLENT_BAND_FLOOR, FAIR_BAND_FLOOR,
    GOOD_BAND_FLOOR, IMPACT_WINDOW_SIZE, MIN_DEGRADATION_DURATION, MODERATE_QUALITY_FLOOR,
    SEVERE_QUALITY_FLOOR,
};
use crate::statistics;

/// Severity of a degradation event, from the worst quality seen in its window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegradationSeverity {
    /// Quality stayed at or above the moderate floor
    Mild,
    /// Quality dropped below the moderate floor
    Moderate,
    /// Quality dropped below the severe floor
    Severe,
}

/// A contiguous interval of degraded link quality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    /// Index of the first degraded sample
    pub start_index: usize,
    /// Index of the recovery sample that closed the window
    pub end_index: usize,
    /// Time of the first degraded sample (seconds)
    pub start_time: f64,
    /// Time of the recovery sample (seconds)
    pub end_time: f64,
    /// Window duration (seconds)
    pub duration: f64,
    /// Worst quality seen inside the window (percent)
    pub min_quality: f64,
    /// Vehicle position when degradation began
    pub start_position: Point3,
    /// Vehicle position at recovery
    pub end_position: Point3,
    /// Classified severity
    pub severity: DegradationSeverity,
}

/// A quality crossing from degraded back to nominal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryEvent {
    /// Index of the first nominal sample after degradation
    pub index: usize,
    /// Time of the recovery sample (seconds)
    pub time: f64,
    /// Quality gained across the crossing (percentage points)
    pub quality_delta: f64,
}

/// Recovery crossings and how long the link took to come back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAnalysis {
    /// Recovery crossings in flight order
    pub events: Vec<RecoveryEvent>,
    /// Mean time from the last nominal sample to recovery; absent when no
    /// crossing had a nominal sample before it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_recovery_time: Option<f64>,
}

/// Sample count and mean error within one quality band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandStats {
    /// Samples whose quality fell in the band
    pub count: usize,
    /// Mean reported error over those samples (meters)
    pub mean_error: f64,
}

/// Samples bucketed into fixed quality bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSegmentation {
    /// Quality 90-100
    pub excellent: BandStats,
    /// Quality 70-89
    pub good: BandStats,
    /// Quality 50-69
    pub fair: BandStats,
    /// Quality below 50
    pub poor: BandStats,
}

/// Sliding-window correlation and the coarse critical quality threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    /// Mean of per-window quality/error correlations
    pub impact_correlation: f64,
    /// Lower quality bound of the first decile whose mean error exceeds
    /// 1.5x the excellent-decile baseline; absent when not computable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_threshold: Option<f64>,
}

/// Combined network-quality analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAnalysis {
    /// Pearson correlation between link quality and reported error
    pub error_correlation: f64,
    /// Degradation windows that met the minimum duration
    pub degradation_events: Vec<DegradationEvent>,
    /// Recovery crossings
    pub recovery: RecoveryAnalysis,
    /// Quality band segmentation
    pub segmentation: NetworkSegmentation,
    /// Sliding-window impact estimate
    pub impact: ImpactAnalysis,
    /// Relative increase in mean error between excellent and degraded
    /// quality groups; 0 when either group is empty
    pub performance_drop: f64,
}

/// Active degradation window being tracked by the hysteresis state machine
#[derive(Debug, Clone, Copy)]
struct ActiveWindow {
    start_index: usize,
    start_time: f64,
    min_quality: f64,
    start_position: Point3,
}

/// Hysteresis state: either between degradations or inside a tracked window
#[derive(Debug, Clone, Copy)]
enum WindowState {
    Idle,
    Degrading(ActiveWindow),
}

/// Correlates link quality with tracking error and detects degradation windows
pub struct NetworkAnalyzer;

impl NetworkAnalyzer {
    /// Run the full network-quality analysis over one sample sequence
    #[must_use]
    pub fn analyze(samples: &[FlightSample]) -> NetworkAnalysis {
        let (qualities, errors) = paired_series(samples);

        NetworkAnalysis {
            error_correlation: statistics::correlation(&qualities, &errors),
            degradation_events: Self::detect_degradations(samples),
            recovery: Self::analyze_recovery(samples),
            segmentation: Self::segment_by_band(samples),
            impact: Self::analyze_impact(&qualities, &errors),
            performance_drop: Self::performance_drop(samples),
        }
    }

    /// Detect degradation windows with the two-state hysteresis machine.
    ///
    /// A window opens on the first sample below the quality threshold and
    /// closes on the first sample back at or above it; windows shorter than
    /// the minimum duration are dropped, and a window still open at the end of
    /// the series emits nothing.
    #[must_use]
    pub fn detect_degradations(samples: &[FlightSample]) -> Vec<DegradationEvent> {
        let mut events = Vec::new();
        let mut state = WindowState::Idle;

        for (index, sample) in samples.iter().enumerate() {
            let quality = sample.network_quality();
            state = match state {
                WindowState::Idle => {
                    if quality < DEGRADATION_THRESHOLD {
                        WindowState::Degrading(ActiveWindow {
                            start_index: index,
                            start_time: sample.time(),
                            min_quality: quality,
                            start_position: sample.position(),
                        })
                    } else {
                        WindowState::Idle
                    }
                }
                WindowState::Degrading(mut window) => {
                    if quality < DEGRADATION_THRESHOLD {
                        window.min_quality = window.min_quality.min(quality);
                        WindowState::Degrading(window)
                    } else {
                        let duration = sample.time() - window.start_time;
                        if duration >= MIN_DEGRADATION_DURATION {
                            events.push(DegradationEvent {
                                start_index: window.start_index,
                                end_index: index,
                                start_time: window.start_time,
                                end_time: sample.time(),
                                duration,
                                min_quality: window.min_quality,
                                start_position: window.start_position,
                                end_position: sample.position(),
                                severity: Self::classify_severity(window.min_quality),
                            });
                        } else {
                            debug!(
                                duration,
                                start_index = window.start_index,
                                "degradation window below minimum duration, dropped"
                            );
                        }
                        WindowState::Idle
                    }
                }
            };
        }

        events
    }

    const fn classify_severity(min_quality: f64) -> DegradationSeverity {
        if min_quality < SEVERE_QUALITY_FLOOR {
            DegradationSeverity::Severe
        } else if min_quality < MODERATE_QUALITY_FLOOR {
            DegradationSeverity::Moderate
        } else {
            DegradationSeverity::Mild
        }
    }

    /// Record recovery crossings and average how long the link was degraded
    #[must_use]
    pub fn analyze_recovery(samples: &[FlightSample]) -> RecoveryAnalysis {
        let mut events = Vec::new();
        let mut recovery_times = Vec::new();

        for i in 1..samples.len() {
            let prev_quality = samples[i - 1].network_quality();
            let quality = samples[i].network_quality();
            if prev_quality >= DEGRADATION_THRESHOLD || quality < DEGRADATION_THRESHOLD {
                continue;
            }

            events.push(RecoveryEvent {
                index: i,
                time: samples[i].time(),
                quality_delta: quality - prev_quality,
            });

            // Walk back to the last nominal sample before the degradation
            if let Some(prior) = samples[..i]
                .iter()
                .rev()
                .find(|s| s.network_quality() >= DEGRADATION_THRESHOLD)
            {
                recovery_times.push(samples[i].time() - prior.time());
            }
        }

        let average_recovery_time = if recovery_times.is_empty() {
            None
        } else {
            Some(statistics::mean(&recovery_times))
        };

        RecoveryAnalysis {
            events,
            average_recovery_time,
        }
    }

    /// Bucket samples into the four fixed quality bands
    #[must_use]
    pub fn segment_by_band(samples: &[FlightSample]) -> NetworkSegmentation {
        let band = |low: f64, high: Option<f64>| {
            let in_band: Vec<&FlightSample> = samples
                .iter()
                .filter(|s| {
                    let q = s.network_quality();
                    q >= low && high.map_or(true, |h| q < h)
                })
                .collect();
            let errors: Vec<f64> = in_band.iter().filter_map(|s| s.error()).collect();
            BandStats {
                count: in_band.len(),
                mean_error: statistics::mean(&errors),
            }
        };

        NetworkSegmentation {
            excellent: band(EXCELLENT_BAND_FLOOR, None),
            good: band(GOOD_BAND_FLOOR, Some(EXCELLENT_BAND_FLOOR)),
            fair: band(FAIR_BAND_FLOOR, Some(GOOD_BAND_FLOOR)),
            poor: band(f64::NEG_INFINITY, Some(FAIR_BAND_FLOOR)),
        }
    }

    /// Sliding-window impact correlation plus the critical quality threshold
    #[must_use]
    pub fn analyze_impact(qualities: &[f64], errors: &[f64]) -> ImpactAnalysis {
        let mut window_correlations = Vec::new();
        if qualities.len() >= IMPACT_WINDOW_SIZE {
            for start in 0..=qualities.len() - IMPACT_WINDOW_SIZE {
                let end = start + IMPACT_WINDOW_SIZE;
                window_correlations
                    .push(statistics::correlation(&qualities[start..end], &errors[start..end]));
            }
        }

        ImpactAnalysis {
            impact_correlation: statistics::mean(&window_correlations),
            critical_threshold: Self::critical_threshold(qualities, errors),
        }
    }

    /// First quality decile, scanning high to low, whose mean error exceeds
    /// 1.5x the 90-100 decile baseline
    fn critical_threshold(qualities: &[f64], errors: &[f64]) -> Option<f64> {
        if qualities.is_empty() || qualities.len() != errors.len() {
            return None;
        }

        let mut decile_errors: [Vec<f64>; 10] = Default::default();
        for (quality, error) in qualities.iter().zip(errors) {
            let decile = ((quality.clamp(0.0, 100.0) / 10.0) as usize).min(9);
            decile_errors[decile].push(*error);
        }

        if decile_errors[9].is_empty() {
            return None;
        }
        let baseline = statistics::mean(&decile_errors[9]);

        for decile in (0..9).rev() {
            if decile_errors[decile].is_empty() {
                continue;
            }
            if statistics::mean(&decile_errors[decile]) > CRITICAL_ERROR_MULTIPLIER * baseline {
                return Some(decile as f64 * 10.0);
            }
        }
        None
    }

    /// Relative increase in mean error between excellent and degraded samples
    #[must_use]
    pub fn performance_drop(samples: &[FlightSample]) -> f64 {
        let excellent: Vec<f64> = samples
            .iter()
            .filter(|s| s.network_quality() >= EXCELLENT_BAND_FLOOR)
            .filter_map(FlightSample::error)
            .collect();
        let degraded: Vec<f64> = samples
            .iter()
            .filter(|s| s.network_quality() < DEGRADATION_THRESHOLD)
            .filter_map(FlightSample::error)
            .collect();
        if excellent.is_empty() || degraded.is_empty() {
            return 0.0;
        }

        let baseline = statistics::mean(&excellent);
        if baseline == 0.0 {
            return 0.0;
        }
        (statistics::mean(&degraded) - baseline) / baseline
    }
}

/// Paired (quality, error) series over samples that reported an error
fn paired_series(samples: &[FlightSample]) -> (Vec<f64>, Vec<f64>) {
    let mut qualities = Vec::new();
    let mut errors = Vec::new();
    for sample in samples {
        if let Some(error) = sample.error() {
            qualities.push(sample.network_quality());
            errors.push(error);
        }
    }
    (qualities, errors)
}
