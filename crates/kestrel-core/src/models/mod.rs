// ABOUTME: Flight telemetry data models for the Kestrel platform
// ABOUTME: Re-exports FlightRecord, FlightSample, Point3 and related types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

//! # Data Models
//!
//! Core data structures describing one recorded flight. A collaborator decodes
//! raw upload formats into these types before invoking the analytics engine.
//!
//! ## Design Principles
//!
//! - **Defaults at ingestion**: optional telemetry fields receive their
//!   documented defaults exactly once, when a sample is built or deserialized,
//!   never inside downstream consumers
//! - **Immutable to the engine**: fields are private; analyzers read through
//!   accessor methods and never mutate a record
//! - **Serializable**: all models support JSON for transport and storage by
//!   the surrounding platform

mod flight;

pub use flight::{
    BatteryInfo, CommandStats, FlightPhase, FlightRecord, FlightRecordBuilder, FlightSample,
    FlightSampleBuilder, Point3,
};
