// ABOUTME: Composite flight-quality scoring and rule-based recommendations
// ABOUTME: Weights accuracy, stability, efficiency, and adaptability into a graded 0-100 score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS
#![allow(clippy::cast_possible_truncation)] // Safe: scores are clamped to 0-100 before rounding
#![allow(clippy::cast_sign_loss)] // Safe: scores are clamped non-negative before rounding

use serde::{Deserialize, Serialize};

use kestrel_core::models::FlightSample;

use crate::constants::recommendations::{
    MIN_EFFICIENCY_RATIO, MIN_STABILIZATION_RATIO, NETWORK_CORRELATION_ALERT,
    SCORE_IMPROVEMENT_FLOOR, SHARP_TURN_FRACTION_ALERT,
};
use crate::constants::scoring::{
    ACCURACY_WEIGHT, ADAPTABILITY_ERROR_SCALE, ADAPTABILITY_QUALITY_STDDEV_GATE,
    ADAPTABILITY_WEIGHT, EFFICIENCY_WEIGHT, ERROR_SCALE, STABILITY_WEIGHT,
};
use crate::network::NetworkAnalysis;
use crate::path::PathAnalysis;
use crate::stability::StabilityAnalysis;
use crate::statistics;
use crate::Severity;

/// Letter grade for a composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    A,
    /// 80-89
    B,
    /// 70-79
    C,
    /// 60-69
    D,
    /// Below 60
    F,
}

impl Grade {
    /// Map a rounded composite score to its letter grade
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= 90 {
            Self::A
        } else if score >= 80 {
            Self::B
        } else if score >= 70 {
            Self::C
        } else if score >= 60 {
            Self::D
        } else {
            Self::F
        }
    }
}

/// Component and composite quality scores for one flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Tracking accuracy score, 0-100
    pub accuracy: f64,
    /// Stability score, 0-100
    pub stability: f64,
    /// Path efficiency score, 0-100
    pub efficiency: f64,
    /// Network adaptability score, 0-100
    pub adaptability: f64,
    /// Weighted composite, rounded to the nearest integer
    pub overall_score: u32,
    /// Letter grade for the composite
    pub grade: Grade,
}

/// Category a recommendation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    /// Stabilization behavior
    Stability,
    /// Link quality and its impact on control
    Network,
    /// Route adherence and efficiency
    Path,
    /// Turn geometry and maneuvering
    Smoothness,
    /// General score-improvement hint
    Improvement,
}

/// One actionable finding derived from the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What the finding concerns
    pub category: RecommendationCategory,
    /// How urgently it should be addressed
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// The metric value that triggered the rule, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
}

/// Builds the composite quality assessment and its recommendations
pub struct QualityScorer;

impl QualityScorer {
    /// Combine the sub-analyses into component scores and a graded composite
    #[must_use]
    pub fn assess(
        samples: &[FlightSample],
        path: &PathAnalysis,
        stability: &StabilityAnalysis,
    ) -> QualityAssessment {
        let errors: Vec<f64> = samples.iter().filter_map(FlightSample::error).collect();
        let mean_error = statistics::mean(&errors);

        let accuracy = ERROR_SCALE.mul_add(-mean_error, 100.0).max(0.0);
        let stability_score = stability.stability_score.clamp(0.0, 100.0);
        let efficiency = path
            .efficiency
            .efficiency_ratio
            .map_or(0.0, |ratio| (100.0 * ratio).clamp(0.0, 100.0));

        let qualities: Vec<f64> = samples.iter().map(FlightSample::network_quality).collect();
        let adaptability = if statistics::stddev(&qualities) > ADAPTABILITY_QUALITY_STDDEV_GATE {
            ADAPTABILITY_ERROR_SCALE
                .mul_add(-statistics::stddev(&errors), 100.0)
                .max(0.0)
        } else {
            100.0
        };

        let composite = ADAPTABILITY_WEIGHT.mul_add(
            adaptability,
            EFFICIENCY_WEIGHT.mul_add(
                efficiency,
                ACCURACY_WEIGHT.mul_add(accuracy, STABILITY_WEIGHT * stability_score),
            ),
        );
        let overall_score = composite.clamp(0.0, 100.0).round() as u32;

        QualityAssessment {
            accuracy,
            stability: stability_score,
            efficiency,
            adaptability,
            overall_score,
            grade: Grade::from_score(overall_score),
        }
    }

    /// Evaluate the independent recommendation rules.
    ///
    /// Rules are self-contained; the output order is the fixed priority order
    /// stability, network correlation, efficiency, turn smoothness, then
    /// per-score improvement hints.
    #[must_use]
    pub fn recommendations(
        stability: &StabilityAnalysis,
        network: &NetworkAnalysis,
        path: &PathAnalysis,
        assessment: &QualityAssessment,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if stability.stabilization_ratio < MIN_STABILIZATION_RATIO {
            recommendations.push(Recommendation {
                category: RecommendationCategory::Stability,
                severity: Severity::High,
                message: format!(
                    "Vehicle was stabilized for only {:.0}% of samples; inspect controller tuning and wind conditions",
                    stability.stabilization_ratio * 100.0
                ),
                metric: Some(stability.stabilization_ratio),
            });
        }

        if network.error_correlation < NETWORK_CORRELATION_ALERT {
            recommendations.push(Recommendation {
                category: RecommendationCategory::Network,
                severity: Severity::Medium,
                message: format!(
                    "Tracking error rises strongly as link quality falls (correlation {:.2}); review antenna placement and link budget",
                    network.error_correlation
                ),
                metric: Some(network.error_correlation),
            });
        }

        if let Some(ratio) = path.efficiency.efficiency_ratio {
            if ratio < MIN_EFFICIENCY_RATIO {
                recommendations.push(Recommendation {
                    category: RecommendationCategory::Path,
                    severity: Severity::Medium,
                    message: format!(
                        "Path efficiency ratio {ratio:.2} is below the 0.80 target; review waypoint spacing and wind compensation"
                    ),
                    metric: Some(ratio),
                });
            }
        }

        if path.turns.total_turns > 0 {
            #[allow(clippy::cast_precision_loss)] // Safe: turn counts are small
            let sharp_fraction = path.turns.sharp_turns as f64 / path.turns.total_turns as f64;
            if sharp_fraction > SHARP_TURN_FRACTION_ALERT {
                recommendations.push(Recommendation {
                    category: RecommendationCategory::Smoothness,
                    severity: Severity::Low,
                    message: format!(
                        "{:.0}% of turns were sharp; consider smoother route geometry or lower cornering speeds",
                        sharp_fraction * 100.0
                    ),
                    metric: Some(sharp_fraction),
                });
            }
        }

        for (name, score) in [
            ("accuracy", assessment.accuracy),
            ("stability", assessment.stability),
            ("efficiency", assessment.efficiency),
            ("adaptability", assessment.adaptability),
        ] {
            if score < SCORE_IMPROVEMENT_FLOOR {
                recommendations.push(Recommendation {
                    category: RecommendationCategory::Improvement,
                    severity: Severity::Low,
                    message: format!("{name} score {score:.0} is below the 70-point target"),
                    metric: Some(score),
                });
            }
        }

        recommendations
    }
}
