// ABOUTME: Velocity and acceleration analysis over flight sample sequences
// ABOUTME: Computes speed statistics, smoothness index, and active flight time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use serde::{Deserialize, Serialize};
use tracing::debug;

use kestrel_core::models::FlightSample;

use crate::constants::motion::ACTIVE_VELOCITY_THRESHOLD;
use crate::geometry::distance3d;
use crate::statistics;

/// Instantaneous velocity of the segment between two samples (m/s).
///
/// Returns `None` when the pair has a non-positive time delta (duplicate or
/// out-of-order timestamps); such pairs are skipped individually rather than
/// aborting the whole computation.
#[must_use]
pub fn segment_velocity(prev: &FlightSample, next: &FlightSample) -> Option<f64> {
    let dt = next.time() - prev.time();
    if dt <= 0.0 {
        return None;
    }
    Some(distance3d(prev.position(), next.position()) / dt)
}

/// Velocity and acceleration statistics for one flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicsAnalysis {
    /// Mean segment velocity (m/s)
    pub average_velocity: f64,
    /// Slowest segment velocity (m/s)
    pub min_velocity: f64,
    /// Fastest segment velocity (m/s)
    pub max_velocity: f64,
    /// Standard deviation of segment velocities (m/s)
    pub velocity_variation: f64,
    /// Mean acceleration magnitude (m/s^2)
    pub average_acceleration: f64,
    /// Largest acceleration magnitude (m/s^2)
    pub max_acceleration: f64,
    /// 1.0 = perfectly smooth, degrading toward 0 with velocity churn
    pub smoothness_index: f64,
    /// Seconds spent moving faster than the active-flight threshold
    pub active_flight_time: f64,
}

impl KinematicsAnalysis {
    fn empty() -> Self {
        Self {
            average_velocity: 0.0,
            min_velocity: 0.0,
            max_velocity: 0.0,
            velocity_variation: 0.0,
            average_acceleration: 0.0,
            max_acceleration: 0.0,
            smoothness_index: 1.0,
            active_flight_time: 0.0,
        }
    }
}

/// Derives velocity and acceleration series from position samples
pub struct KinematicsAnalyzer;

impl KinematicsAnalyzer {
    /// Analyze the kinematics of one sample sequence.
    ///
    /// Fewer than 2 samples cannot yield a velocity series; the result then
    /// degrades to zeroed statistics with a perfect smoothness index.
    #[must_use]
    pub fn analyze(samples: &[FlightSample]) -> KinematicsAnalysis {
        if samples.len() < 2 {
            debug!(samples = samples.len(), "too few samples for kinematics");
            return KinematicsAnalysis::empty();
        }

        let mut velocities = Vec::with_capacity(samples.len() - 1);
        let mut accelerations = Vec::new();
        let mut active_flight_time = 0.0;
        let mut previous_velocity: Option<f64> = None;

        for pair in samples.windows(2) {
            let dt = pair[1].time() - pair[0].time();
            let Some(velocity) = segment_velocity(&pair[0], &pair[1]) else {
                // Duplicate or out-of-order timestamp; skip this pair only
                previous_velocity = None;
                continue;
            };

            if let Some(prev) = previous_velocity {
                accelerations.push(((velocity - prev) / dt).abs());
            }
            if velocity > ACTIVE_VELOCITY_THRESHOLD {
                active_flight_time += dt;
            }
            velocities.push(velocity);
            previous_velocity = Some(velocity);
        }

        if velocities.is_empty() {
            debug!("no usable sample pairs for kinematics");
            return KinematicsAnalysis::empty();
        }

        let average_velocity = statistics::mean(&velocities);
        let min_velocity = velocities.iter().copied().fold(f64::INFINITY, f64::min);
        let max_velocity = velocities.iter().copied().fold(0.0, f64::max);

        let smoothness_index = if average_velocity == 0.0 {
            1.0
        } else {
            let changes: Vec<f64> = velocities
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).abs())
                .collect();
            (1.0 - statistics::mean(&changes) / average_velocity).max(0.0)
        };

        KinematicsAnalysis {
            average_velocity,
            min_velocity,
            max_velocity,
            velocity_variation: statistics::stddev(&velocities),
            average_acceleration: statistics::mean(&accelerations),
            max_acceleration: accelerations.iter().copied().fold(0.0, f64::max),
            smoothness_index,
            active_flight_time,
        }
    }
}
