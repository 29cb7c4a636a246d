// ABOUTME: Flight record models including FlightSample, FlightRecord, and builders
// ABOUTME: Telemetry positions, targets, phases, network quality, and command/battery stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use serde::{Deserialize, Serialize};

/// Network quality assumed when a sample carries no measurement (percent)
const DEFAULT_NETWORK_QUALITY: f64 = 100.0;

const fn default_network_quality() -> f64 {
    DEFAULT_NETWORK_QUALITY
}

/// A point in local flight coordinates, meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// East offset in meters
    pub x: f64,
    /// North offset in meters
    pub y: f64,
    /// Altitude in meters
    pub z: f64,
}

impl Point3 {
    /// Create a point from its coordinates
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Flight segment classification for a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightPhase {
    /// Holding position at a waypoint
    Waypoint,
    /// Moving between targets
    Transit,
}

/// Represents a single telemetry sample within one flight
///
/// A sample contains the vehicle position at a point in time plus the optional
/// control-loop context recorded alongside it (current target, tracking error,
/// link quality, stabilization flag). Fields are private to ensure ingestion
/// defaults are applied exactly once - use accessor methods to read and
/// `FlightSampleBuilder` to construct new instances.
///
/// # Examples
///
/// ```rust
/// use kestrel_core::models::{FlightPhase, FlightSampleBuilder, Point3};
///
/// let sample = FlightSampleBuilder::new(Point3::new(1.0, 2.0, 10.0), 0.5)
///     .phase(FlightPhase::Transit)
///     .error(0.02)
///     .stabilized(true)
///     .build();
///
/// assert_eq!(sample.network_quality(), 100.0);
/// assert!(sample.stabilized());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSample {
    /// Vehicle position in local coordinates (meters)
    position: Point3,
    /// Seconds since flight start; monotonic non-decreasing within a flight
    time: f64,
    /// Commanded target position, when one was active
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Point3>,
    /// Flight segment classification
    phase: FlightPhase,
    /// Distance to target in meters, when the controller reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<f64>,
    /// Link quality percentage 0-100; absent measurements ingest as 100
    #[serde(default = "default_network_quality")]
    network_quality: f64,
    /// Whether the stabilization controller reported a settled state
    #[serde(default)]
    stabilized: bool,
}

impl FlightSample {
    /// Returns the vehicle position in local coordinates
    #[must_use]
    pub const fn position(&self) -> Point3 {
        self.position
    }

    /// Returns the sample time in seconds since flight start
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Returns the commanded target position, when one was active
    #[must_use]
    pub const fn target(&self) -> Option<Point3> {
        self.target
    }

    /// Returns the flight segment classification
    #[must_use]
    pub const fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Returns the reported distance to target in meters
    #[must_use]
    pub const fn error(&self) -> Option<f64> {
        self.error
    }

    /// Returns the link quality percentage (0-100)
    #[must_use]
    pub const fn network_quality(&self) -> f64 {
        self.network_quality
    }

    /// Returns whether the stabilization controller reported settled
    #[must_use]
    pub const fn stabilized(&self) -> bool {
        self.stabilized
    }
}

/// Builder for constructing `FlightSample` instances
///
/// Applies the ingestion defaults (`network_quality` 100, `stabilized` false,
/// `phase` transit) so consumers never re-derive them.
pub struct FlightSampleBuilder {
    sample: FlightSample,
}

impl FlightSampleBuilder {
    /// Creates a new builder from the required position and time fields
    #[must_use]
    pub const fn new(position: Point3, time: f64) -> Self {
        Self {
            sample: FlightSample {
                position,
                time,
                target: None,
                phase: FlightPhase::Transit,
                error: None,
                network_quality: DEFAULT_NETWORK_QUALITY,
                stabilized: false,
            },
        }
    }

    /// Set the commanded target position
    #[must_use]
    pub const fn target(mut self, target: Point3) -> Self {
        self.sample.target = Some(target);
        self
    }

    /// Set the flight segment classification
    #[must_use]
    pub const fn phase(mut self, phase: FlightPhase) -> Self {
        self.sample.phase = phase;
        self
    }

    /// Set the reported distance to target in meters
    #[must_use]
    pub const fn error(mut self, error: f64) -> Self {
        self.sample.error = Some(error);
        self
    }

    /// Set the measured link quality percentage
    #[must_use]
    pub const fn network_quality(mut self, network_quality: f64) -> Self {
        self.sample.network_quality = network_quality;
        self
    }

    /// Set the stabilization flag
    #[must_use]
    pub const fn stabilized(mut self, stabilized: bool) -> Self {
        self.sample.stabilized = stabilized;
        self
    }

    /// Build the sample
    #[must_use]
    pub fn build(self) -> FlightSample {
        self.sample
    }
}

/// Command-link delivery counters for one flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStats {
    /// Commands acknowledged by the vehicle
    pub sent: u64,
    /// Commands that never arrived
    pub dropped: u64,
    /// Total transmission attempts including retries
    pub total_attempts: u64,
}

/// Battery state recorded at flight start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    /// Pack voltage at takeoff
    pub start_voltage: f64,
    /// Minimum voltage required for a safe return
    pub minimum_required: f64,
}

/// One decoded flight, owned by the caller for the duration of an analysis
///
/// The analytics engine reads a record through accessors, never mutates it,
/// and retains no references beyond a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Telemetry samples ordered by non-decreasing time
    samples: Vec<FlightSample>,
    /// Nominal route the flight was planned against
    #[serde(default)]
    ideal_route: Vec<Point3>,
    /// Command-link delivery counters, when the ground station recorded them
    #[serde(skip_serializing_if = "Option::is_none")]
    command_stats: Option<CommandStats>,
    /// Battery state, when recorded at takeoff
    #[serde(skip_serializing_if = "Option::is_none")]
    battery: Option<BatteryInfo>,
}

impl FlightRecord {
    /// Returns the telemetry samples, ordered by non-decreasing time
    #[must_use]
    pub fn samples(&self) -> &[FlightSample] {
        &self.samples
    }

    /// Returns the nominal route the flight was planned against
    #[must_use]
    pub fn ideal_route(&self) -> &[Point3] {
        &self.ideal_route
    }

    /// Returns command-link delivery counters, when recorded
    #[must_use]
    pub const fn command_stats(&self) -> Option<CommandStats> {
        self.command_stats
    }

    /// Returns battery state, when recorded
    #[must_use]
    pub const fn battery(&self) -> Option<BatteryInfo> {
        self.battery
    }
}

/// Builder for constructing `FlightRecord` instances
pub struct FlightRecordBuilder {
    record: FlightRecord,
}

impl FlightRecordBuilder {
    /// Creates a new builder from the recorded samples
    #[must_use]
    pub fn new(samples: Vec<FlightSample>) -> Self {
        Self {
            record: FlightRecord {
                samples,
                ideal_route: Vec::new(),
                command_stats: None,
                battery: None,
            },
        }
    }

    /// Set the nominal route
    #[must_use]
    pub fn ideal_route(mut self, ideal_route: Vec<Point3>) -> Self {
        self.record.ideal_route = ideal_route;
        self
    }

    /// Set command-link delivery counters
    #[must_use]
    pub fn command_stats(mut self, command_stats: CommandStats) -> Self {
        self.record.command_stats = Some(command_stats);
        self
    }

    /// Set battery state
    #[must_use]
    pub fn battery(mut self, battery: BatteryInfo) -> Self {
        self.record.battery = Some(battery);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> FlightRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_builder_applies_ingestion_defaults() {
        let sample = FlightSampleBuilder::new(Point3::new(0.0, 0.0, 5.0), 1.0).build();

        assert_eq!(sample.network_quality(), 100.0);
        assert!(!sample.stabilized());
        assert_eq!(sample.phase(), FlightPhase::Transit);
        assert!(sample.target().is_none());
        assert!(sample.error().is_none());
    }

    #[test]
    fn sample_deserializes_missing_quality_as_full() {
        let json = r#"{"position":{"x":1.0,"y":2.0,"z":3.0},"time":0.5,"phase":"waypoint"}"#;
        let sample: FlightSample = serde_json::from_str(json).expect("valid sample json");

        assert_eq!(sample.network_quality(), 100.0);
        assert!(!sample.stabilized());
        assert_eq!(sample.phase(), FlightPhase::Waypoint);
    }

    #[test]
    fn record_builder_round_trips_optional_sections() {
        let samples = vec![FlightSampleBuilder::new(Point3::new(0.0, 0.0, 0.0), 0.0).build()];
        let record = FlightRecordBuilder::new(samples)
            .ideal_route(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)])
            .command_stats(CommandStats {
                sent: 10,
                dropped: 1,
                total_attempts: 11,
            })
            .battery(BatteryInfo {
                start_voltage: 12.6,
                minimum_required: 10.5,
            })
            .build();

        let json = serde_json::to_string(&record).expect("serializable record");
        let back: FlightRecord = serde_json::from_str(&json).expect("round trip");
        assert_eq!(back, record);
        assert_eq!(back.ideal_route().len(), 2);
    }
}
