// ABOUTME: Flight-quality analytics algorithms, metrics, and scoring engine
// ABOUTME: Derives path, kinematics, stability, and network metrics from flight records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

#![deny(unsafe_code)]

//! # Kestrel Intelligence
//!
//! Trajectory analytics for recorded UAV flights. A caller hands the engine one
//! decoded [`FlightRecord`](kestrel_core::models::FlightRecord); the engine runs
//! its sub-analyzers over the sample sequence and returns a single
//! [`TrajectoryReport`](report::TrajectoryReport) combining kinematics, path
//! geometry, stability, network-quality impact, a composite quality score, and
//! rule-based recommendations.
//!
//! The engine is a pure synchronous computation: no I/O, no shared state, no
//! retained references. Analysis of independent flights parallelizes trivially
//! in the caller; within one call the sub-analyzers fan out over the read-only
//! record via rayon.

/// Fixed analysis constants grouped by concern
pub mod constants;
/// Pure geometric primitives over 3D points
pub mod geometry;
/// Velocity and acceleration analysis
pub mod kinematics;
/// Network-quality correlation and degradation detection
pub mod network;
/// Deviation, turn, and efficiency analysis
pub mod path;
/// Report assembly and engine entry points
pub mod report;
/// Composite quality scoring and recommendations
pub mod scoring;
/// Statistical kernel: mean, stddev, correlation, trend
pub mod statistics;
/// Stabilization, jitter, and per-phase analysis
pub mod stability;

use serde::{Deserialize, Serialize};

pub use kinematics::{KinematicsAnalysis, KinematicsAnalyzer};
pub use network::{
    BandStats, DegradationEvent, DegradationSeverity, ImpactAnalysis, NetworkAnalysis,
    NetworkAnalyzer, NetworkSegmentation, RecoveryAnalysis, RecoveryEvent,
};
pub use path::{
    DeviationAnalysis, EfficiencyAnalysis, HighDeviationPoint, PathAnalysis, PathAnalyzer,
    TurnAnalysis, TurnEvent,
};
pub use report::{
    analyze, assess_quality, CommandDeliveryAnalysis, DetailedAnalysis, EnergyAnalysis,
    ReportSummary, TrajectoryAnalyzer, TrajectoryReport,
};
pub use scoring::{Grade, QualityAssessment, QualityScorer, Recommendation, RecommendationCategory};
pub use stability::{JitterAnalysis, PhaseStability, StabilityAnalysis, StabilityAnalyzer};

/// Direction of change across a metric series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Second half of the series runs more than 10% above the first
    Improving,
    /// No half-to-half change beyond the 10% band
    Stable,
    /// Second half of the series runs more than 10% below the first
    Degrading,
}

/// Severity attached to recommendations and degraded findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; act when convenient
    Low,
    /// Worth addressing before the next flight campaign
    Medium,
    /// Address before flying this vehicle again
    High,
}

/// Confidence in an analysis result given the data that backed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Key telemetry channels were missing; treat results as indicative only
    Low,
    /// Optional context (battery, command stats) was missing
    Medium,
    /// All telemetry channels present
    High,
}

impl Confidence {
    /// Convert to a numeric score (0.0 to 1.0)
    #[must_use]
    pub const fn as_score(self) -> f64 {
        match self {
            Self::Low => 0.25,
            Self::Medium => 0.50,
            Self::High => 0.90,
        }
    }
}
