// ABOUTME: Path deviation, turn geometry, and route efficiency analysis
// ABOUTME: Flags high-deviation points, classifies turns, and compares actual vs ideal distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use serde::{Deserialize, Serialize};
use tracing::debug;

use kestrel_core::models::{FlightPhase, FlightRecord, FlightSample, Point3};

use crate::constants::deviation::HIGH_DEVIATION_THRESHOLD;
use crate::constants::turns::{DETECTION_THRESHOLD_RAD, SHARP_THRESHOLD_DEG};
use crate::geometry::{bearing, distance3d, path_length, wrap_angle};
use crate::statistics;
use crate::TrendDirection;

/// A sample that strayed beyond the high-deviation threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighDeviationPoint {
    /// Index of the sample within the flight
    pub index: usize,
    /// Vehicle position at the sample
    pub position: Point3,
    /// Target the vehicle was tracking
    pub target: Point3,
    /// Distance from target (meters)
    pub deviation: f64,
    /// Flight phase at the sample
    pub phase: FlightPhase,
}

/// Deviation-from-target statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationAnalysis {
    /// Number of samples that carried a target
    pub sample_count: usize,
    /// Mean deviation (meters)
    pub average: f64,
    /// Smallest deviation (meters)
    pub min: f64,
    /// Largest deviation (meters)
    pub max: f64,
    /// Standard deviation of the deviation series (meters)
    pub stddev: f64,
    /// Direction the deviation series moved across the flight
    pub trend: TrendDirection,
    /// Samples beyond the high-deviation threshold, in flight order
    pub high_deviation_points: Vec<HighDeviationPoint>,
}

/// One detected turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// Index of the interior sample where the turn occurred
    pub index: usize,
    /// Vehicle position at the turn
    pub position: Point3,
    /// Signed bearing change through the turn (degrees)
    pub bearing_change_degrees: f64,
    /// Magnitude of the bearing change (radians)
    pub sharpness_radians: f64,
    /// Flight phase at the turn
    pub phase: FlightPhase,
}

/// Turn detection and classification results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnAnalysis {
    /// Turns past the detection threshold
    pub total_turns: usize,
    /// Turns sharper than the sharp-turn threshold
    pub sharp_turns: usize,
    /// Detected turns at or below the sharp-turn threshold
    pub gentle_turns: usize,
    /// 1 / (1 + stddev of all interior bearing changes)
    pub path_smoothness: f64,
    /// Detected turns in flight order
    pub events: Vec<TurnEvent>,
}

/// Actual versus nominal route length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyAnalysis {
    /// Length of the flown path (meters)
    pub actual_distance: f64,
    /// Length of the nominal route (meters)
    pub ideal_distance: f64,
    /// ideal / actual; `None` when there was insufficient motion to evaluate.
    /// Ratios above 1 indicate a shortcut, not invalid data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_ratio: Option<f64>,
}

/// Combined path analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnalysis {
    /// Deviation-from-target statistics
    pub deviation: DeviationAnalysis,
    /// Turn detection and classification
    pub turns: TurnAnalysis,
    /// Route efficiency comparison
    pub efficiency: EfficiencyAnalysis,
}

/// Analyzes path deviation, turn geometry, and route efficiency
pub struct PathAnalyzer;

impl PathAnalyzer {
    /// Run the full path analysis over one flight record
    #[must_use]
    pub fn analyze(record: &FlightRecord) -> PathAnalysis {
        PathAnalysis {
            deviation: Self::analyze_deviation(record.samples()),
            turns: Self::analyze_turns(record.samples()),
            efficiency: Self::analyze_efficiency(record),
        }
    }

    /// Deviation from target for every sample that carried one
    #[must_use]
    pub fn analyze_deviation(samples: &[FlightSample]) -> DeviationAnalysis {
        let mut deviations = Vec::new();
        let mut high_deviation_points = Vec::new();

        for (index, sample) in samples.iter().enumerate() {
            let Some(target) = sample.target() else {
                continue;
            };
            let deviation = distance3d(sample.position(), target);
            if deviation > HIGH_DEVIATION_THRESHOLD {
                high_deviation_points.push(HighDeviationPoint {
                    index,
                    position: sample.position(),
                    target,
                    deviation,
                    phase: sample.phase(),
                });
            }
            deviations.push(deviation);
        }

        if deviations.is_empty() {
            debug!("no samples carried a target; deviation analysis is empty");
        }

        let min = if deviations.is_empty() {
            0.0
        } else {
            deviations.iter().copied().fold(f64::INFINITY, f64::min)
        };

        DeviationAnalysis {
            sample_count: deviations.len(),
            average: statistics::mean(&deviations),
            min,
            max: deviations.iter().copied().fold(0.0, f64::max),
            stddev: statistics::stddev(&deviations),
            trend: statistics::trend(&deviations),
            high_deviation_points,
        }
    }

    /// Detect and classify turns from consecutive segment bearings.
    ///
    /// Bearing comparison is horizontal-plane only; altitude changes never
    /// register as turns.
    #[must_use]
    pub fn analyze_turns(samples: &[FlightSample]) -> TurnAnalysis {
        let mut bearing_changes = Vec::new();
        let mut events = Vec::new();

        if samples.len() >= 3 {
            for i in 1..samples.len() - 1 {
                let inbound = bearing(samples[i - 1].position(), samples[i].position());
                let outbound = bearing(samples[i].position(), samples[i + 1].position());
                let change = wrap_angle(outbound - inbound);
                bearing_changes.push(change);

                if change.abs() > DETECTION_THRESHOLD_RAD {
                    events.push(TurnEvent {
                        index: i,
                        position: samples[i].position(),
                        bearing_change_degrees: change.to_degrees(),
                        sharpness_radians: change.abs(),
                        phase: samples[i].phase(),
                    });
                }
            }
        }

        let sharp_turns = events
            .iter()
            .filter(|e| e.bearing_change_degrees.abs() > SHARP_THRESHOLD_DEG)
            .count();

        TurnAnalysis {
            total_turns: events.len(),
            sharp_turns,
            gentle_turns: events.len() - sharp_turns,
            path_smoothness: 1.0 / (1.0 + statistics::stddev(&bearing_changes)),
            events,
        }
    }

    /// Compare flown path length against the nominal route
    #[must_use]
    pub fn analyze_efficiency(record: &FlightRecord) -> EfficiencyAnalysis {
        let positions: Vec<Point3> = record.samples().iter().map(FlightSample::position).collect();
        let actual_distance = path_length(&positions);
        let ideal_distance = path_length(record.ideal_route());

        let efficiency_ratio = if actual_distance == 0.0 {
            debug!("zero actual distance; efficiency is not evaluable");
            None
        } else {
            Some(ideal_distance / actual_distance)
        };

        EfficiencyAnalysis {
            actual_distance,
            ideal_distance,
            efficiency_ratio,
        }
    }
}
