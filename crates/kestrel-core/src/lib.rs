// ABOUTME: Core types for the Kestrel flight-telemetry analytics platform
// ABOUTME: Foundation crate with flight record models and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

#![deny(unsafe_code)]

//! # Kestrel Core
//!
//! Foundation crate providing the shared flight-record data model and error
//! types for the Kestrel telemetry platform. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `AppResult`
//! - **models**: Flight record types (`FlightRecord`, `FlightSample`, `Point3`)

/// Unified error handling for the analytics engine
pub mod errors;

/// Flight telemetry data models
pub mod models;

pub use errors::{AppError, AppResult};
pub use models::{
    BatteryInfo, CommandStats, FlightPhase, FlightRecord, FlightRecordBuilder, FlightSample,
    FlightSampleBuilder, Point3,
};
