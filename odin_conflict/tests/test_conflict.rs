/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use approx::assert_relative_eq;
use odin_common::geo::{GeoPos, great_circle_destination};
use odin_conflict::{
    conflict::{classify, OffsetPrediction},
    evaluate_offset, evaluate_pair, AircraftConflictStatus, PredictedPosition, Prediction, SeparationConfig,
    Separation, Severity, Unavailable
};

// run with "cargo test --test test_conflict -- --nocapture"

fn pos (lat: f64, lon: f64)->GeoPos { GeoPos::from_degrees( lat, lon).unwrap() }

fn predicted (p: GeoPos, altitude_ft: f64)->PredictedPosition { PredictedPosition { pos: p, altitude_ft } }

fn east_of (p: &PredictedPosition, dist_nm: f64, altitude_ft: f64)->PredictedPosition {
    predicted( great_circle_destination( &p.pos, 90.0, dist_nm), altitude_ft)
}

#[test]
fn test_severity_tiers () {
    let cfg = SeparationConfig::default();
    let p1 = predicted( pos( 40.0, -100.0), 30000.0);

    let (sep, sev) = evaluate_pair( &p1, 0.0, &east_of( &p1, 4.0, 30500.0), 0.0, &cfg);
    println!("4nm/500ft: {sep:?} -> {sev}");
    assert_relative_eq!( sep.horizontal_nm, 4.0, epsilon = 1e-6);
    assert_relative_eq!( sep.vertical_ft, 600.0, epsilon = 1e-6);
    assert_eq!( sev, Severity::Red);

    let (sep, sev) = evaluate_pair( &p1, 0.0, &east_of( &p1, 10.0, 30500.0), 0.0, &cfg);
    println!("10nm/500ft: {sep:?} -> {sev}");
    assert_eq!( sev, Severity::Yellow);

    let (_, sev) = evaluate_pair( &p1, 0.0, &east_of( &p1, 13.0, 30500.0), 0.0, &cfg);
    assert_eq!( sev, Severity::None);

    // close laterally but 1500ft apart (+100ft margin) is only YELLOW
    let (_, sev) = evaluate_pair( &p1, 0.0, &east_of( &p1, 4.0, 31500.0), 0.0, &cfg);
    assert_eq!( sev, Severity::Yellow);

    // the margin pushes 1950ft over the YELLOW limit
    let (_, sev) = evaluate_pair( &p1, 0.0, &east_of( &p1, 4.0, 31950.0), 0.0, &cfg);
    assert_eq!( sev, Severity::None);

    // deviations reduce the horizontal separation
    let (sep, sev) = evaluate_pair( &p1, 2.0, &east_of( &p1, 8.0, 30000.0), 1.5, &cfg);
    assert_relative_eq!( sep.horizontal_nm, 4.5, epsilon = 1e-6);
    assert_eq!( sev, Severity::Red);
}

#[test]
fn test_inclusive_thresholds () {
    let cfg = SeparationConfig::default();
    assert_eq!( classify( &Separation{ horizontal_nm: 5.0, vertical_ft: 1000.0 }, &cfg), Severity::Red);
    assert_eq!( classify( &Separation{ horizontal_nm: 5.01, vertical_ft: 1000.0 }, &cfg), Severity::Yellow);
    assert_eq!( classify( &Separation{ horizontal_nm: 12.0, vertical_ft: 2000.0 }, &cfg), Severity::Yellow);
    assert_eq!( classify( &Separation{ horizontal_nm: 12.0, vertical_ft: 2000.1 }, &cfg), Severity::None);
}

// known edge case: deviations are subtracted without a floor, so the horizontal separation can become negative
#[test]
fn test_negative_horizontal_separation () {
    let cfg = SeparationConfig::default();
    let p1 = predicted( pos( 40.0, -100.0), 30000.0);

    let (sep, sev) = evaluate_pair( &p1, 3.0, &east_of( &p1, 4.0, 30000.0), 3.0, &cfg);
    println!("{sep:?} -> {sev}");
    assert!( sep.horizontal_nm < 0.0);
    assert_relative_eq!( sep.horizontal_nm, -2.0, epsilon = 1e-6);
    assert_eq!( sev, Severity::Red);
}

#[test]
fn test_evaluate_offset () {
    let cfg = SeparationConfig::default();
    let p1 = predicted( pos( 40.0, -100.0), 30000.0);

    let op = |cs: &str, prediction: Prediction| OffsetPrediction { callsign: cs.to_string(), deviation_nm: 0.0, prediction };
    let predictions = vec![
        op( "AAL1", Prediction::Valid( p1)),
        op( "BAW2", Prediction::Valid( east_of( &p1, 4.0, 30500.0))),   // RED with AAL1
        op( "CPA3", Prediction::Valid( east_of( &p1, 14.0, 30000.0))),  // YELLOW with BAW2
        op( "DAL4", Prediction::Unavailable( Unavailable::RouteExhausted)),
        op( "AAL1", Prediction::Valid( p1)),  // same callsign
    ];

    let (pairs, statuses) = evaluate_offset( &predictions, 3, &cfg);
    for p in &pairs { println!("{} <-> {}: {} {:?}", p.callsign_a, p.callsign_b, p.severity, p.separation) }

    // AAL1 appears twice: the two AAL1 states are not paired with each other, but each is paired with the others
    assert_eq!( pairs.len(), 5);
    assert!( pairs.iter().all( |p| p.callsign_a != p.callsign_b));
    assert!( pairs.iter().all( |p| p.callsign_a != "DAL4" && p.callsign_b != "DAL4"));
    assert!( pairs.iter().all( |p| p.minutes == 3));

    assert_eq!( statuses.len(), 3);
    assert_eq!( statuses["AAL1"], AircraftConflictStatus{ severity: Severity::Red, breach_minutes: vec![3] });
    assert_eq!( statuses["BAW2"].severity, Severity::Red);
    assert_eq!( statuses["CPA3"], AircraftConflictStatus{ severity: Severity::Yellow, breach_minutes: vec![3] });
    assert!( !statuses.contains_key( "DAL4"));
}

#[test]
fn test_status_merge () {
    let mut status = AircraftConflictStatus::default();
    assert_eq!( status.severity, Severity::None);

    status.merge( Severity::Yellow, 5);
    status.merge( Severity::Red, 2);
    status.merge( Severity::Yellow, 5);
    status.merge( Severity::Yellow, 8);

    assert_eq!( status.severity, Severity::Red);
    assert_eq!( status.breach_minutes, vec![2, 5, 8]);

    assert!( Severity::Red > Severity::Yellow && Severity::Yellow > Severity::None);
    assert_eq!( Severity::Red.to_string(), "RED");
}
