// ABOUTME: End-to-end tests for the analyze and assess_quality entry points
// ABOUTME: Validates scoring round-trips, idempotence, degraded confidence, and rule ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use kestrel_core::models::{
    BatteryInfo, CommandStats, FlightPhase, FlightRecord, FlightRecordBuilder, FlightSample,
    FlightSampleBuilder, Point3,
};
use kestrel_intelligence::{
    analyze, assess_quality, Confidence, Grade, RecommendationCategory, Severity,
};

/// Ten-sample straight, constant-velocity, full-quality flight
fn perfect_flight() -> FlightRecord {
    let samples: Vec<FlightSample> = (0..10)
        .map(|i| {
            let x = f64::from(i);
            FlightSampleBuilder::new(Point3::new(x, 0.0, 10.0), f64::from(i))
                .target(Point3::new(x, 0.0, 10.0))
                .phase(FlightPhase::Transit)
                .error(0.0)
                .network_quality(100.0)
                .stabilized(true)
                .build()
        })
        .collect();
    let route: Vec<Point3> = (0..10).map(|i| Point3::new(f64::from(i), 0.0, 10.0)).collect();

    FlightRecordBuilder::new(samples)
        .ideal_route(route)
        .command_stats(CommandStats {
            sent: 20,
            dropped: 0,
            total_attempts: 20,
        })
        .battery(BatteryInfo {
            start_voltage: 12.6,
            minimum_required: 10.5,
        })
        .build()
}

#[test]
fn perfect_flight_scores_one_hundred() {
    let report = analyze(&perfect_flight()).unwrap();

    assert_eq!(report.summary.overall_score, 100);
    assert_eq!(report.summary.grade, Grade::A);
    assert_eq!(report.summary.total_turns, 0);
    assert_eq!(report.summary.degradation_events, 0);
    assert_eq!(report.summary.confidence, Confidence::High);
    assert!(report.recommendations.is_empty());

    let quality = &report.detailed.quality;
    assert!((quality.accuracy - 100.0).abs() < 1e-9);
    assert!((quality.stability - 100.0).abs() < 1e-9);
    assert!((quality.efficiency - 100.0).abs() < 1e-9);
    assert!((quality.adaptability - 100.0).abs() < 1e-9);
}

#[test]
fn analyze_is_idempotent() {
    let record = perfect_flight();
    let first = analyze(&record).unwrap();
    let second = analyze(&record).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn empty_record_is_rejected_before_analysis() {
    let record = FlightRecordBuilder::new(Vec::new()).build();
    let err = analyze(&record).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn single_sample_flight_degrades_instead_of_failing() {
    let samples = vec![FlightSampleBuilder::new(Point3::new(0.0, 0.0, 10.0), 0.0)
        .error(0.0)
        .stabilized(true)
        .build()];
    let record = FlightRecordBuilder::new(samples).build();

    let report = analyze(&record).unwrap();

    assert_eq!(report.detailed.kinematics.average_velocity, 0.0);
    assert_eq!(report.detailed.path.turns.total_turns, 0);
    assert_eq!(report.summary.confidence, Confidence::Low);
}

#[test]
fn missing_battery_and_commands_are_estimated_not_omitted() {
    let samples: Vec<FlightSample> = (0..5)
        .map(|i| {
            FlightSampleBuilder::new(Point3::new(f64::from(i), 0.0, 10.0), f64::from(i))
                .error(0.01)
                .stabilized(true)
                .build()
        })
        .collect();
    let record = FlightRecordBuilder::new(samples).build();

    let report = analyze(&record).unwrap();

    assert!(report.detailed.energy.estimated);
    assert_eq!(report.detailed.energy.start_voltage, 0.0);
    assert!(report.detailed.command_delivery.estimated);
    assert!((report.detailed.command_delivery.delivery_ratio - 1.0).abs() < 1e-9);
    assert_eq!(report.summary.confidence, Confidence::Medium);
}

#[test]
fn recorded_battery_produces_a_measured_margin() {
    let report = analyze(&perfect_flight()).unwrap();

    let energy = &report.detailed.energy;
    assert!(!energy.estimated);
    assert!((energy.voltage_margin - 2.1).abs() < 1e-9);
    assert!(energy.sufficient);

    let delivery = &report.detailed.command_delivery;
    assert!(!delivery.estimated);
    assert!((delivery.delivery_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn assess_quality_rebuilds_the_stored_score() {
    let record = perfect_flight();
    let report = analyze(&record).unwrap();

    let assessment = assess_quality(&record, &report);

    assert_eq!(assessment, report.detailed.quality);
}

#[test]
fn unstable_flight_leads_with_a_stability_recommendation() {
    // Unstabilized samples with large tracking error and an inefficient path
    let samples: Vec<FlightSample> = (0..10)
        .map(|i| {
            let x = f64::from(i);
            // Zig-zag: twice the distance of the direct route
            let y = if i % 2 == 0 { 0.0 } else { 1.5 };
            FlightSampleBuilder::new(Point3::new(x, y, 10.0), f64::from(i))
                .error(0.08)
                .build()
        })
        .collect();
    let route = vec![Point3::new(0.0, 0.0, 10.0), Point3::new(9.0, 0.0, 10.0)];
    let record = FlightRecordBuilder::new(samples).ideal_route(route).build();

    let report = analyze(&record).unwrap();

    let first = &report.recommendations[0];
    assert_eq!(first.category, RecommendationCategory::Stability);
    assert_eq!(first.severity, Severity::High);

    // Inefficient path rule fires after stability, before improvement hints
    let path_position = report
        .recommendations
        .iter()
        .position(|r| r.category == RecommendationCategory::Path)
        .unwrap();
    let improvement_position = report
        .recommendations
        .iter()
        .position(|r| r.category == RecommendationCategory::Improvement)
        .unwrap();
    assert!(path_position < improvement_position);
}

#[test]
fn degraded_link_window_surfaces_in_summary_and_detail() {
    let samples: Vec<FlightSample> = (0..8)
        .map(|i| {
            let quality = if (2..=4).contains(&i) { 20.0 } else { 100.0 };
            FlightSampleBuilder::new(Point3::new(f64::from(i), 0.0, 10.0), f64::from(i))
                .network_quality(quality)
                .error(if (2..=4).contains(&i) { 0.3 } else { 0.01 })
                .stabilized(true)
                .build()
        })
        .collect();
    let record = FlightRecordBuilder::new(samples).build();

    let report = analyze(&record).unwrap();

    assert_eq!(report.summary.degradation_events, 1);
    let event = &report.detailed.network.degradation_events[0];
    assert!((event.duration - 3.0).abs() < 1e-9);
    assert!(report.detailed.network.performance_drop > 0.0);
}
