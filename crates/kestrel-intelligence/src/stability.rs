// ABOUTME: Stabilization, jitter, and per-phase stability analysis
// ABOUTME: Computes the composite 0-100 stability score from error, settling, and jitter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS
#![allow(clippy::cast_precision_loss)] // Safe: sample counts are far below 2^52

use serde::{Deserialize, Serialize};
use tracing::debug;

use kestrel_core::models::{FlightPhase, FlightSample};

use crate::constants::stability_score::{ERROR_WEIGHT, JITTER_WEIGHT, STABILIZATION_WEIGHT};
use crate::kinematics::segment_velocity;
use crate::statistics;

/// Short-timescale acceleration noise statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JitterAnalysis {
    /// Mean jitter magnitude (m/s^2)
    pub mean: f64,
    /// Largest jitter magnitude (m/s^2)
    pub max: f64,
    /// Standard deviation of the jitter series; the jitter index
    pub jitter_index: f64,
}

/// Stability breakdown for one flight phase.
///
/// A phase with no samples reports as absent, distinguishing "no data" from a
/// perfect score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseStability {
    /// Samples recorded in this phase
    pub sample_count: usize,
    /// Fraction of phase samples with the stabilized flag set
    pub stabilization_rate: f64,
    /// Mean reported error over phase samples that carried one (meters)
    pub average_error: f64,
}

/// Combined stability analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    /// Fraction of all samples with the stabilized flag set
    pub stabilization_ratio: f64,
    /// Jitter statistics
    pub jitter: JitterAnalysis,
    /// Waypoint-phase breakdown, absent when the flight had no waypoint samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waypoint: Option<PhaseStability>,
    /// Transit-phase breakdown, absent when the flight had no transit samples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit: Option<PhaseStability>,
    /// Composite stability score, 0-100
    pub stability_score: f64,
}

/// Analyzes stabilization behavior and control jitter
pub struct StabilityAnalyzer;

impl StabilityAnalyzer {
    /// Run the full stability analysis over one sample sequence
    #[must_use]
    pub fn analyze(samples: &[FlightSample]) -> StabilityAnalysis {
        let stabilization_ratio = if samples.is_empty() {
            0.0
        } else {
            samples.iter().filter(|s| s.stabilized()).count() as f64 / samples.len() as f64
        };

        let jitter = Self::analyze_jitter(samples);

        let errors: Vec<f64> = samples.iter().filter_map(FlightSample::error).collect();
        let mean_error = statistics::mean(&errors);

        let error_score = (1.0 - mean_error).max(0.0);
        let jitter_score = (1.0 - jitter.jitter_index).max(0.0);
        let stability_score = 100.0
            * JITTER_WEIGHT.mul_add(
                jitter_score,
                ERROR_WEIGHT.mul_add(error_score, STABILIZATION_WEIGHT * stabilization_ratio),
            );

        StabilityAnalysis {
            stabilization_ratio,
            jitter,
            waypoint: Self::analyze_phase(samples, FlightPhase::Waypoint),
            transit: Self::analyze_phase(samples, FlightPhase::Transit),
            stability_score,
        }
    }

    /// Jitter samples from consecutive pair-velocity changes.
    ///
    /// Needs at least 3 samples; pairs with non-positive time deltas are
    /// skipped individually.
    #[must_use]
    pub fn analyze_jitter(samples: &[FlightSample]) -> JitterAnalysis {
        let mut jitter_samples = Vec::new();

        if samples.len() < 3 {
            debug!(samples = samples.len(), "too few samples for jitter");
        } else {
            for i in 2..samples.len() {
                let dt = samples[i].time() - samples[i - 1].time();
                if dt <= 0.0 {
                    continue;
                }
                let (Some(v1), Some(v2)) = (
                    segment_velocity(&samples[i - 2], &samples[i - 1]),
                    segment_velocity(&samples[i - 1], &samples[i]),
                ) else {
                    continue;
                };
                jitter_samples.push((v2 - v1).abs() / dt);
            }
        }

        JitterAnalysis {
            mean: statistics::mean(&jitter_samples),
            max: jitter_samples.iter().copied().fold(0.0, f64::max),
            jitter_index: statistics::stddev(&jitter_samples),
        }
    }

    fn analyze_phase(samples: &[FlightSample], phase: FlightPhase) -> Option<PhaseStability> {
        let phase_samples: Vec<&FlightSample> =
            samples.iter().filter(|s| s.phase() == phase).collect();
        if phase_samples.is_empty() {
            return None;
        }

        let stabilized = phase_samples.iter().filter(|s| s.stabilized()).count();
        let errors: Vec<f64> = phase_samples.iter().filter_map(|s| s.error()).collect();

        Some(PhaseStability {
            sample_count: phase_samples.len(),
            stabilization_rate: stabilized as f64 / phase_samples.len() as f64,
            average_error: statistics::mean(&errors),
        })
    }
}
