// ABOUTME: Trajectory report assembly and the engine's public entry points
// ABOUTME: Fans sub-analyzers out over one record and aggregates summary, detail, and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use serde::{Deserialize, Serialize};
use tracing::debug;

use kestrel_core::errors::{AppError, AppResult};
use kestrel_core::models::{FlightRecord, FlightSample};

use crate::kinematics::{KinematicsAnalysis, KinematicsAnalyzer};
use crate::network::{NetworkAnalysis, NetworkAnalyzer};
use crate::path::{PathAnalysis, PathAnalyzer};
use crate::scoring::{Grade, QualityAssessment, QualityScorer, Recommendation};
use crate::stability::{StabilityAnalysis, StabilityAnalyzer};
use crate::Confidence;

/// Command-link delivery summary.
///
/// When the record carried no command statistics the fields hold neutral
/// defaults and `estimated` is set instead of omitting the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDeliveryAnalysis {
    /// Commands acknowledged by the vehicle
    pub sent: u64,
    /// Commands that never arrived
    pub dropped: u64,
    /// Total transmission attempts including retries
    pub total_attempts: u64,
    /// sent / total attempts; 1.0 when not measurable
    pub delivery_ratio: f64,
    /// True when the record carried no usable command statistics
    pub estimated: bool,
}

/// Battery margin summary.
///
/// When the record carried no battery section the fields hold neutral zeros
/// and `estimated` is set instead of omitting the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAnalysis {
    /// Pack voltage at takeoff
    pub start_voltage: f64,
    /// Minimum voltage required for a safe return
    pub minimum_required: f64,
    /// Voltage margin above the safe-return minimum
    pub voltage_margin: f64,
    /// Whether the recorded margin was non-negative
    pub sufficient: bool,
    /// True when the record carried no battery data
    pub estimated: bool,
}

/// Compact scalar highlights of one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Telemetry samples analyzed
    pub sample_count: usize,
    /// Elapsed time from first to last sample (seconds)
    pub duration_seconds: f64,
    /// Length of the flown path (meters)
    pub total_distance: f64,
    /// Mean segment velocity (m/s)
    pub average_velocity: f64,
    /// Composite quality score, 0-100
    pub overall_score: u32,
    /// Letter grade for the composite
    pub grade: Grade,
    /// Detected turns
    pub total_turns: usize,
    /// Degradation events that met the minimum duration
    pub degradation_events: usize,
    /// Fraction of samples with the stabilized flag set
    pub stabilization_ratio: f64,
    /// Confidence given the telemetry channels that were present
    pub confidence: Confidence,
}

/// All sub-analysis structures, preserved verbatim for downstream formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    /// Velocity and acceleration statistics
    pub kinematics: KinematicsAnalysis,
    /// Deviation, turn, and efficiency analysis
    pub path: PathAnalysis,
    /// Stabilization and jitter analysis
    pub stability: StabilityAnalysis,
    /// Network-quality analysis
    pub network: NetworkAnalysis,
    /// Component scores and grade
    pub quality: QualityAssessment,
    /// Command-link delivery summary
    pub command_delivery: CommandDeliveryAnalysis,
    /// Battery margin summary
    pub energy: EnergyAnalysis,
}

/// The complete analysis artifact handed back to collaborators.
///
/// A pure function of the input record: no identifiers, no lifecycle, and no
/// wall-clock content, so repeated analysis of the same record is bit-identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryReport {
    /// Compact scalar highlights
    pub summary: ReportSummary,
    /// All sub-analysis structures
    pub detailed: DetailedAnalysis,
    /// Rule-based findings in fixed priority order
    pub recommendations: Vec<Recommendation>,
}

impl TrajectoryReport {
    /// Serialize the report to JSON for export collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if serialization fails.
    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::internal(format!("report serialization failed: {e}")))
    }
}

/// The trajectory analytics engine.
///
/// Stateless and synchronous; one instance may be shared freely across
/// threads, or flights may simply be analyzed with the free functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryAnalyzer;

impl TrajectoryAnalyzer {
    /// Create a new analyzer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run the full analysis over one flight record.
    ///
    /// The sub-analyzers fan out in parallel over the read-only record; the
    /// report is assembled once all of them complete.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] when the record contains no samples.
    /// Degenerate-but-structurally-valid input never errors; affected metrics
    /// degrade to zeroed or absent values instead.
    pub fn analyze(&self, record: &FlightRecord) -> AppResult<TrajectoryReport> {
        let samples = record.samples();
        if samples.is_empty() {
            return Err(AppError::invalid_input("flight record contains no samples"));
        }
        debug!(samples = samples.len(), "analyzing flight record");

        let (kinematics, (path, (stability, network))) = rayon::join(
            || KinematicsAnalyzer::analyze(samples),
            || {
                rayon::join(
                    || PathAnalyzer::analyze(record),
                    || {
                        rayon::join(
                            || StabilityAnalyzer::analyze(samples),
                            || NetworkAnalyzer::analyze(samples),
                        )
                    },
                )
            },
        );

        let quality = QualityScorer::assess(samples, &path, &stability);
        let recommendations = QualityScorer::recommendations(&stability, &network, &path, &quality);

        let command_delivery = command_delivery(record);
        let energy = energy(record);
        let confidence = derive_confidence(record);

        let summary = ReportSummary {
            sample_count: samples.len(),
            duration_seconds: flight_duration(samples),
            total_distance: path.efficiency.actual_distance,
            average_velocity: kinematics.average_velocity,
            overall_score: quality.overall_score,
            grade: quality.grade,
            total_turns: path.turns.total_turns,
            degradation_events: network.degradation_events.len(),
            stabilization_ratio: stability.stabilization_ratio,
            confidence,
        };

        Ok(TrajectoryReport {
            summary,
            detailed: DetailedAnalysis {
                kinematics,
                path,
                stability,
                network,
                quality,
                command_delivery,
                energy,
            },
            recommendations,
        })
    }

    /// Rebuild the quality assessment from a precomputed report.
    ///
    /// For callers that cache `analyze` output: the composite score is rebuilt
    /// from the stored path and stability analyses instead of recomputing the
    /// sub-analyzers.
    #[must_use]
    pub fn assess_quality(
        &self,
        record: &FlightRecord,
        report: &TrajectoryReport,
    ) -> QualityAssessment {
        QualityScorer::assess(
            record.samples(),
            &report.detailed.path,
            &report.detailed.stability,
        )
    }
}

/// Analyze one flight record with a default engine
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] when the record contains no samples.
pub fn analyze(record: &FlightRecord) -> AppResult<TrajectoryReport> {
    TrajectoryAnalyzer::new().analyze(record)
}

/// Rebuild the quality assessment from a precomputed report
#[must_use]
pub fn assess_quality(record: &FlightRecord, report: &TrajectoryReport) -> QualityAssessment {
    TrajectoryAnalyzer::new().assess_quality(record, report)
}

fn flight_duration(samples: &[FlightSample]) -> f64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (last.time() - first.time()).max(0.0),
        _ => 0.0,
    }
}

fn command_delivery(record: &FlightRecord) -> CommandDeliveryAnalysis {
    record.command_stats().map_or(
        CommandDeliveryAnalysis {
            sent: 0,
            dropped: 0,
            total_attempts: 0,
            delivery_ratio: 1.0,
            estimated: true,
        },
        |stats| {
            let measurable = stats.total_attempts > 0;
            #[allow(clippy::cast_precision_loss)] // Safe: command counts are far below 2^52
            let delivery_ratio = if measurable {
                stats.sent as f64 / stats.total_attempts as f64
            } else {
                1.0
            };
            CommandDeliveryAnalysis {
                sent: stats.sent,
                dropped: stats.dropped,
                total_attempts: stats.total_attempts,
                delivery_ratio,
                estimated: !measurable,
            }
        },
    )
}

fn energy(record: &FlightRecord) -> EnergyAnalysis {
    record.battery().map_or(
        EnergyAnalysis {
            start_voltage: 0.0,
            minimum_required: 0.0,
            voltage_margin: 0.0,
            sufficient: true,
            estimated: true,
        },
        |battery| {
            let voltage_margin = battery.start_voltage - battery.minimum_required;
            EnergyAnalysis {
                start_voltage: battery.start_voltage,
                minimum_required: battery.minimum_required,
                voltage_margin,
                sufficient: voltage_margin >= 0.0,
                estimated: false,
            }
        },
    )
}

fn derive_confidence(record: &FlightRecord) -> Confidence {
    let samples = record.samples();
    let has_tracking_data = samples
        .iter()
        .any(|s| s.error().is_some() || s.target().is_some());

    if samples.len() < 3 || !has_tracking_data {
        return Confidence::Low;
    }
    if record.battery().is_none() || record.command_stats().is_none() {
        return Confidence::Medium;
    }
    Confidence::High
}
