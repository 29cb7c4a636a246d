// ABOUTME: Fixed analysis constants for the trajectory analytics engine
// ABOUTME: Motion, turn, network, and scoring thresholds grouped by concern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

//! Fixed design constants used throughout the analytics engine.
//!
//! These are deliberate design values, not tunables: downstream consumers
//! (export, visualization, alerting) depend on reports produced against the
//! same thresholds across deployments.

/// Motion classification thresholds
pub mod motion {
    /// Velocity above which a segment counts toward active flight time (m/s).
    /// Slower motion is GPS noise around a hover, not travel.
    pub const ACTIVE_VELOCITY_THRESHOLD: f64 = 0.05;
}

/// Trend classification thresholds
pub mod trend {
    /// Relative half-to-half change beyond which a series is no longer stable
    pub const CHANGE_THRESHOLD: f64 = 0.10;
}

/// Path deviation thresholds
pub mod deviation {
    /// Deviation from target beyond which a sample is retained for reporting (meters)
    pub const HIGH_DEVIATION_THRESHOLD: f64 = 0.1;
}

/// Turn detection and classification thresholds
pub mod turns {
    /// Minimum bearing change to record a turn (radians, ~15 degrees)
    pub const DETECTION_THRESHOLD_RAD: f64 = 0.26;

    /// Bearing change beyond which a turn is classified sharp (degrees)
    pub const SHARP_THRESHOLD_DEG: f64 = 45.0;
}

/// Network-quality analysis thresholds
pub mod network {
    /// Quality below this percentage counts as degraded link
    pub const DEGRADATION_THRESHOLD: f64 = 70.0;

    /// Minimum degraded duration before an event is reported (seconds)
    pub const MIN_DEGRADATION_DURATION: f64 = 2.0;

    /// Window minimum quality below this is a severe event
    pub const SEVERE_QUALITY_FLOOR: f64 = 30.0;

    /// Window minimum quality below this is a moderate event
    pub const MODERATE_QUALITY_FLOOR: f64 = 50.0;

    /// Lower bound of the excellent quality band
    pub const EXCELLENT_BAND_FLOOR: f64 = 90.0;

    /// Lower bound of the good quality band
    pub const GOOD_BAND_FLOOR: f64 = 70.0;

    /// Lower bound of the fair quality band
    pub const FAIR_BAND_FLOOR: f64 = 50.0;

    /// Sample count of each sliding impact-correlation window
    pub const IMPACT_WINDOW_SIZE: usize = 10;

    /// Mean error past this multiple of the baseline marks the critical decile
    pub const CRITICAL_ERROR_MULTIPLIER: f64 = 1.5;
}

/// Stability scoring weights and bounds
pub mod stability_score {
    /// Weight of the error component in the composite stability score
    pub const ERROR_WEIGHT: f64 = 0.3;

    /// Weight of the stabilization-ratio component
    pub const STABILIZATION_WEIGHT: f64 = 0.4;

    /// Weight of the jitter component
    pub const JITTER_WEIGHT: f64 = 0.3;
}

/// Composite quality scoring weights and scales
pub mod scoring {
    /// Weight of tracking accuracy in the overall score
    pub const ACCURACY_WEIGHT: f64 = 0.30;

    /// Weight of the stability score in the overall score
    pub const STABILITY_WEIGHT: f64 = 0.25;

    /// Weight of path efficiency in the overall score
    pub const EFFICIENCY_WEIGHT: f64 = 0.25;

    /// Weight of network adaptability in the overall score
    pub const ADAPTABILITY_WEIGHT: f64 = 0.20;

    /// Meters of mean error that cost one accuracy point, inverted:
    /// accuracy = 100 - `ERROR_SCALE` * `mean_error`
    pub const ERROR_SCALE: f64 = 1000.0;

    /// Network-quality stddev beyond which adaptability is scored from errors
    pub const ADAPTABILITY_QUALITY_STDDEV_GATE: f64 = 20.0;

    /// Error stddev scale for the adaptability penalty
    pub const ADAPTABILITY_ERROR_SCALE: f64 = 100.0;
}

/// Recommendation rule thresholds
pub mod recommendations {
    /// Stabilization ratio below this triggers a stability recommendation
    pub const MIN_STABILIZATION_RATIO: f64 = 0.7;

    /// Quality/error correlation below this triggers a network recommendation
    pub const NETWORK_CORRELATION_ALERT: f64 = -0.5;

    /// Efficiency ratio below this triggers a path recommendation
    pub const MIN_EFFICIENCY_RATIO: f64 = 0.8;

    /// Sharp-turn fraction above this triggers a smoothness recommendation
    pub const SHARP_TURN_FRACTION_ALERT: f64 = 0.3;

    /// Component scores below this receive an improvement hint
    pub const SCORE_IMPROVEMENT_FLOOR: f64 = 70.0;
}
