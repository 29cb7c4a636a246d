// ABOUTME: Unit tests for path deviation, turn, and efficiency analysis
// ABOUTME: Validates turn classification, 2D bearing behavior, and efficiency guards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kestrel UAS

use kestrel_core::models::{
    FlightPhase, FlightRecordBuilder, FlightSample, FlightSampleBuilder, Point3,
};
use kestrel_intelligence::{PathAnalyzer, TrendDirection};

fn sample(position: Point3, time: f64) -> FlightSample {
    FlightSampleBuilder::new(position, time).build()
}

fn straight_line_samples() -> Vec<FlightSample> {
    vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(1.0, 0.0, 0.0), 1.0),
        sample(Point3::new(2.0, 0.0, 0.0), 2.0),
    ]
}

#[test]
fn straight_flight_matches_its_route_exactly() {
    let route = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
    ];
    let record = FlightRecordBuilder::new(straight_line_samples())
        .ideal_route(route)
        .build();

    let analysis = PathAnalyzer::analyze(&record);

    assert_eq!(analysis.turns.total_turns, 0);
    let ratio = analysis.efficiency.efficiency_ratio.unwrap();
    assert!((ratio - 1.0).abs() < 1e-9);
    assert!((analysis.efficiency.actual_distance - 2.0).abs() < 1e-9);
    assert!((analysis.turns.path_smoothness - 1.0).abs() < 1e-9);
}

#[test]
fn right_angle_triplet_is_a_sharp_turn() {
    let samples = vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(1.0, 0.0, 0.0), 1.0),
        sample(Point3::new(1.0, 1.0, 0.0), 2.0),
    ];
    let record = FlightRecordBuilder::new(samples).build();

    let analysis = PathAnalyzer::analyze(&record);

    assert_eq!(analysis.turns.total_turns, 1);
    assert_eq!(analysis.turns.sharp_turns, 1);
    assert_eq!(analysis.turns.gentle_turns, 0);
    let event = &analysis.turns.events[0];
    assert_eq!(event.index, 1);
    assert!((event.bearing_change_degrees - 90.0).abs() < 1e-6);
    assert!((event.sharpness_radians - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn gentle_turn_is_detected_but_not_sharp() {
    // ~30 degree course change
    let samples = vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(1.0, 0.0, 0.0), 1.0),
        sample(Point3::new(1.866, 0.5, 0.0), 2.0),
    ];
    let record = FlightRecordBuilder::new(samples).build();

    let analysis = PathAnalyzer::analyze(&record);

    assert_eq!(analysis.turns.total_turns, 1);
    assert_eq!(analysis.turns.sharp_turns, 0);
    assert_eq!(analysis.turns.gentle_turns, 1);
}

#[test]
fn climbing_straight_flight_produces_no_turns() {
    // Bearing analysis is horizontal-plane only: a pure climb must not
    // register as maneuvering even though the 3D direction changes.
    let samples = vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(1.0, 0.0, 5.0), 1.0),
        sample(Point3::new(2.0, 0.0, 20.0), 2.0),
        sample(Point3::new(3.0, 0.0, 21.0), 3.0),
    ];
    let record = FlightRecordBuilder::new(samples).build();

    let analysis = PathAnalyzer::analyze(&record);

    assert_eq!(analysis.turns.total_turns, 0);
}

#[test]
fn deviation_past_threshold_is_retained_with_context() {
    let target = Point3::new(0.0, 0.0, 10.0);
    let samples = vec![
        FlightSampleBuilder::new(Point3::new(0.0, 0.05, 10.0), 0.0)
            .target(target)
            .phase(FlightPhase::Waypoint)
            .build(),
        FlightSampleBuilder::new(Point3::new(0.0, 0.5, 10.0), 1.0)
            .target(target)
            .phase(FlightPhase::Waypoint)
            .build(),
    ];
    let record = FlightRecordBuilder::new(samples).build();

    let deviation = PathAnalyzer::analyze(&record).deviation;

    assert_eq!(deviation.sample_count, 2);
    assert_eq!(deviation.high_deviation_points.len(), 1);
    let flagged = &deviation.high_deviation_points[0];
    assert_eq!(flagged.index, 1);
    assert_eq!(flagged.phase, FlightPhase::Waypoint);
    assert!((flagged.deviation - 0.5).abs() < 1e-9);
    assert!((deviation.max - 0.5).abs() < 1e-9);
    assert!((deviation.min - 0.05).abs() < 1e-9);
}

#[test]
fn deviation_trend_tracks_worsening_error() {
    let target = Point3::new(0.0, 0.0, 0.0);
    let samples: Vec<FlightSample> = (0..8)
        .map(|i| {
            FlightSampleBuilder::new(Point3::new(0.0, f64::from(i) * 0.1, 0.0), f64::from(i))
                .target(target)
                .build()
        })
        .collect();
    let record = FlightRecordBuilder::new(samples).build();

    let deviation = PathAnalyzer::analyze(&record).deviation;

    // Deviation grows through the flight: the series trends upward
    assert_eq!(deviation.trend, TrendDirection::Improving);
}

#[test]
fn stationary_flight_has_no_evaluable_efficiency() {
    let samples = vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(0.0, 0.0, 0.0), 1.0),
    ];
    let record = FlightRecordBuilder::new(samples)
        .ideal_route(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)])
        .build();

    let efficiency = PathAnalyzer::analyze(&record).efficiency;

    assert_eq!(efficiency.actual_distance, 0.0);
    assert!(efficiency.efficiency_ratio.is_none());
}

#[test]
fn shortcut_flight_reports_ratio_above_one() {
    // Flying the diagonal of an L-shaped route is shorter than the route
    let samples = vec![
        sample(Point3::new(0.0, 0.0, 0.0), 0.0),
        sample(Point3::new(1.0, 1.0, 0.0), 1.0),
    ];
    let record = FlightRecordBuilder::new(samples)
        .ideal_route(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ])
        .build();

    let efficiency = PathAnalyzer::analyze(&record).efficiency;

    let ratio = efficiency.efficiency_ratio.unwrap();
    assert!(ratio > 1.0);
}
