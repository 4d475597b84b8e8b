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
use proptest::prelude::*;

use odin_common::angle::{Angle360, normalize_180};
use odin_common::geo::*;

// run with "cargo test --test test_geo -- --nocapture"

fn pos (lat: f64, lon: f64)->GeoPos { GeoPos::from_degrees( lat, lon).unwrap() }

#[test]
fn test_geo_pos () {
    let p = pos( 37.0, -122.0);
    println!("p = {p}");
    assert_eq!( p.latitude_deg(), 37.0);
    assert_eq!( p.longitude_deg(), -122.0);

    assert!( GeoPos::from_degrees( f64::NAN, 0.0).is_err());
    assert!( GeoPos::from_degrees( 0.0, f64::INFINITY).is_err());
    assert!( GeoPos::from_degrees( 90.5, 0.0).is_err());
    assert!( GeoPos::from_degrees( 0.0, -180.01).is_err());
    assert!( GeoPos::from_degrees( -90.0, 180.0).is_ok());

    let p: GeoPos = serde_json::from_str( r#"{ "latitude": 37.0, "longitude": -122.0 }"#).unwrap();
    assert_eq!( p, pos( 37.0, -122.0));

    let p: GeoPos = serde_json::from_str( r#"{ "lat": 37.0, "lon": -122.0 }"#).unwrap();
    println!("serialized: {}", serde_json::to_string(&p).unwrap());

    let res: Result<GeoPos,_> = serde_json::from_str( r#"{ "lat": 137.0, "lon": -122.0 }"#);
    assert!( res.is_err());
}

#[test]
fn test_haversine () {
    // one degree of latitude is 60 arc minutes
    let d = haversine_distance( &pos( 0.0, 0.0), &pos( 1.0, 0.0));
    println!("1 deg lat = {d} nm");
    assert_relative_eq!( d, 60.04, epsilon = 0.01);

    // KSFO - KLAX
    let ksfo = pos( 37.6188, -122.3750);
    let klax = pos( 33.9425, -118.4081);
    let d = haversine_distance( &ksfo, &klax);
    println!("KSFO-KLAX = {d} nm");
    assert_relative_eq!( d, 293.0, epsilon = 1.0);

    // across the antimeridian
    let d = haversine_distance( &pos( 0.0, 179.5), &pos( 0.0, -179.5));
    assert_relative_eq!( d, 60.04, epsilon = 0.01);
}

#[test]
fn test_destination () {
    let start = pos( 0.0, 0.0);
    let p = great_circle_destination( &start, 90.0, 60.04);
    println!("60nm east of {start} = {p}");
    assert_relative_eq!( p.latitude_deg(), 0.0, epsilon = 1e-9);
    assert_relative_eq!( p.longitude_deg(), 1.0, epsilon = 1e-3);

    // longitudes are normalized when crossing the antimeridian
    let p = great_circle_destination( &pos( 10.0, 179.9), 90.0, 30.0);
    assert!( p.longitude_deg() < -179.0);

    // zero distance stays put
    let p = great_circle_destination( &start, 123.0, 0.0);
    assert_eq!( p, start);
}

#[test]
fn test_initial_bearing () {
    let b = initial_bearing( &pos( 0.0, 0.0), &pos( 0.0, 10.0));
    assert_relative_eq!( b.degrees(), 90.0, epsilon = 1e-9);

    let b = initial_bearing( &pos( 10.0, 0.0), &pos( 0.0, 0.0));
    assert_relative_eq!( b.degrees(), 180.0, epsilon = 1e-9);

    let b = initial_bearing( &pos( 0.0, 10.0), &pos( 0.0, 0.0));
    assert_relative_eq!( b.degrees(), 270.0, epsilon = 1e-9);
}

#[test]
fn test_arc_endpoints () {
    let a = pos( 33.70735333, -82.16206444);
    let b = pos( 38.75412463, -82.02616761);

    for tol in [0.0, 0.5, 4.0] {
        for p in [a, b] {
            let m = arc_match( &a, &b, &p, tol);
            println!("  endpoint {p} tol {tol}: {m:?}");
            assert!( m.is_within());
            assert!( m.cross_track_nm().unwrap() < 1e-3);
        }
    }
}

#[test]
fn test_arc_on_path () {
    let a = pos( 33.70735333, -82.16206444);
    let b = pos( 38.75412463, -82.02616761);
    let d = haversine_distance( &a, &b);
    let brg = initial_bearing( &a, &b);

    for f in [0.1, 0.5, 0.9] {
        let p = great_circle_destination( &a, brg.degrees(), d * f);
        let m = arc_match( &a, &b, &p, 0.0);
        println!("  {f} along: {m:?}");
        assert!( m.is_within());
        assert_relative_eq!( m.cross_track_nm().unwrap(), 0.0, epsilon = 1e-3);
    }

    // a reference point that is almost exactly on the leg
    let p = pos( 36.31866, -82.09395);
    let m = arc_match( &a, &b, &p, 4.0);
    println!("  reference point: {m:?}");
    assert!( m.is_within());
    assert!( m.cross_track_nm().unwrap() < 0.01);
}

#[test]
fn test_arc_cross_track () {
    let a = pos( 0.0, 0.0);
    let b = pos( 0.0, 10.0);
    let p = pos( 1.0, 5.0);

    // cross track angles convert with 1nm = 1 arc minute, so 1deg off the leg is exactly 60nm.
    // Haversine distances use MEAN_EARTH_RADIUS_NM instead (1deg = 60.04nm)
    match arc_match( &a, &b, &p, 4.0) {
        ArcMatch::Outside{cross_track_nm} => assert_relative_eq!( cross_track_nm, 60.0, epsilon = 1e-9),
        other => panic!("expected Outside, got {other:?}")
    }
    match arc_match( &a, &b, &p, 100.0) {
        ArcMatch::Within{cross_track_nm} => assert_relative_eq!( cross_track_nm, 60.0, epsilon = 1e-9),
        other => panic!("expected Within, got {other:?}")
    }
}

#[test]
fn test_arc_not_applicable () {
    let a = pos( 0.0, 0.0);
    let b = pos( 0.0, 10.0);

    for tol in [0.0, 4.0, 10000.0] {
        assert_eq!( arc_match( &a, &b, &pos( 0.0, 15.0), tol), ArcMatch::NotApplicable);
        assert_eq!( arc_match( &a, &b, &pos( 0.0, -5.0), tol), ArcMatch::NotApplicable);
        assert_eq!( arc_match( &a, &b, &pos( 2.0, -0.5), tol), ArcMatch::NotApplicable);
    }
    assert_eq!( arc_match( &a, &b, &pos( 0.0, 15.0), 4.0).cross_track_nm(), None);
}

#[test]
fn test_arc_degenerate () {
    // coincident endpoints
    let a = pos( 40.0, -100.0);
    let near = great_circle_destination( &a, 45.0, 2.0);
    let far = great_circle_destination( &a, 45.0, 20.0);

    assert_eq!( arc_match( &a, &a, &near, 4.0), ArcMatch::Within{ cross_track_nm: 0.0 });
    assert_eq!( arc_match( &a, &a, &far, 4.0), ArcMatch::Outside{ cross_track_nm: 0.0 });

    // antipodal endpoints
    let a = pos( 0.0, 0.0);
    let b = pos( 0.0, 180.0);
    assert_eq!( arc_match( &a, &b, &pos( 0.0, 179.99), 4.0), ArcMatch::Within{ cross_track_nm: 0.0 });
    assert_eq!( arc_match( &a, &b, &pos( 0.0, 90.0), 4.0), ArcMatch::Outside{ cross_track_nm: 0.0 });
}

#[test]
fn test_angle_between () {
    let u = pos( 0.0, 0.0).to_unit_vector();
    let v = pos( 0.0, 90.0).to_unit_vector();
    assert_relative_eq!( angle_between( &u, &v), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_relative_eq!( angle_between( &v, &u), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);

    // clamped so coincident unit vectors don't produce NaN
    let w = pos( 37.62, -122.38).to_unit_vector();
    let d = angle_between( &w, &w);
    assert!( d.is_finite());
    assert_relative_eq!( d, 0.0, epsilon = 1e-7);

    let s = pos( 0.0, 180.0).to_unit_vector();
    assert_relative_eq!( angle_between( &u, &s), std::f64::consts::PI, epsilon = 1e-7);
}

#[test]
fn test_angle360 () {
    assert_eq!( Angle360::from_degrees( 370.0).degrees(), 10.0);
    assert_eq!( Angle360::from_degrees( -90.0).degrees(), 270.0);
    assert_eq!( Angle360::from_degrees( 350.0).abs_diff( &Angle360::from_degrees( 10.0)), 20.0);
    assert_eq!( normalize_180( 190.0), -170.0);

    let a: Angle360 = serde_json::from_str("271").unwrap();
    assert_eq!( a.degrees(), 271.0);
}

fn any_pos ()->impl Strategy<Value=GeoPos> {
    (-89.0f64..89.0, -180.0f64..180.0).prop_map( |(lat,lon)| GeoPos::from_degrees( lat, lon).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_haversine_zero_and_symmetric (a in any_pos(), b in any_pos()) {
        prop_assert_eq!( haversine_distance( &a, &a), 0.0);

        let d_ab = haversine_distance( &a, &b);
        let d_ba = haversine_distance( &b, &a);
        prop_assert!( (d_ab - d_ba).abs() < 1e-9, "asymmetric: {} vs {}", d_ab, d_ba);
    }

    #[test]
    fn prop_destination_round_trip (a in any_pos(), brg in 0.0f64..360.0, d in 0.0f64..3000.0) {
        let p = great_circle_destination( &a, brg, d);
        let d1 = haversine_distance( &a, &p);
        prop_assert!( (d1 - d).abs() < 1e-3, "round trip {} -> {}", d, d1);
    }
}
