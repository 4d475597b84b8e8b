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

use odin_common::cartesian3::Cartesian3;

/// unit tests for cartesian3 unit sphere vectors
/// run with "cargo test --test test_cart -- --nocapture"

#[test]
fn test_unit_vectors () {
    let ps: Vec<(f64,f64)> = vec![
        ( 0.0, 0.0),
        ( 90.0, 0.0),
        ( -90.0, 180.0),
        ( 37.6188, -122.3750),
        ( -33.9461, 151.1772),
    ];

    for (lat,lon) in ps {
        let v = Cartesian3::unit_from_lat_lon_degrees( lat, lon);
        print!("  ({lat},{lon}) -> {v}");
        assert!( (v.length() - 1.0).abs() < 1e-15);
        assert!( (v.latitude_deg() - lat).abs() < 1e-9);
        println!("✅");
    }

    let v = Cartesian3::unit_from_lat_lon_degrees( 0.0, 90.0);
    assert!( (v.y - 1.0).abs() < 1e-15 && v.x.abs() < 1e-15 && v.z.abs() < 1e-15);
}

#[test]
fn test_angle_between () {
    let u = Cartesian3::unit_from_lat_lon_degrees( 0.0, 0.0);
    let w = Cartesian3::unit_from_lat_lon_degrees( 0.0, 90.0);
    assert!( (u.angle_between(&w) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    // identical vectors might have a dot product slightly above 1.0, which has to be clamped
    let a = Cartesian3::unit_from_lat_lon_degrees( 41.2, -87.9);
    let d = a.angle_between(&a);
    assert!( d.is_finite() && d < 1e-7);

    let b = -a;
    assert!( (a.angle_between(&b) - std::f64::consts::PI).abs() < 1e-7);
}

#[test]
fn test_cross () {
    let x = Cartesian3::new( 1.0, 0.0, 0.0);
    let y = Cartesian3::new( 0.0, 1.0, 0.0);
    let z = x.cross(&y);
    assert_eq!( z, Cartesian3::new( 0.0, 0.0, 1.0));
    assert_eq!( z.dot(&x), 0.0);
}
