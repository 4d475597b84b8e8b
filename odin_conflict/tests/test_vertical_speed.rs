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

use chrono::{DateTime, Duration, TimeZone, Utc};
use odin_conflict::vertical_speed::VerticalSpeedCache;

// run with "cargo test --test test_vertical_speed -- --nocapture"

fn t0 ()->DateTime<Utc> { Utc.with_ymd_and_hms( 2025, 6, 1, 18, 0, 0).unwrap() }

#[test]
fn test_update () {
    let mut cache = VerticalSpeedCache::new();

    assert_eq!( cache.update( "UAL1", 30000.0, t0()), 0.0);
    assert_eq!( cache.update( "UAL1", 31000.0, t0() + Duration::seconds(60)), 1000.0);
    assert_eq!( cache.update( "UAL1", 30500.0, t0() + Duration::seconds(90)), -1000.0);

    // too old
    assert_eq!( cache.update( "UAL1", 35000.0, t0() + Duration::seconds(700)), 0.0);

    // same or earlier timestamp
    assert_eq!( cache.update( "UAL1", 36000.0, t0() + Duration::seconds(700)), 0.0);

    assert_eq!( cache.update( "DAL2", 20000.0, t0()), 0.0);
    assert_eq!( cache.len(), 2);
    assert_eq!( cache.get( "UAL1").unwrap().altitude, 36000.0);
}

#[test]
fn test_stale_samples_dropped () {
    let mut cache = VerticalSpeedCache::new();
    cache.update( "UAL1", 30000.0, t0());
    cache.update( "DAL2", 20000.0, t0() + Duration::seconds(300));
    assert_eq!( cache.len(), 2);

    // UAL1 is now 600 sec old, DAL2 only 300
    assert_eq!( cache.update( "SWA3", 10000.0, t0() + Duration::seconds(600)), 0.0);
    assert_eq!( cache.len(), 2);
    assert!( cache.get( "UAL1").is_none());
    assert!( cache.get( "DAL2").is_some());

    // pruning before save keeps the persisted cache bounded
    cache.prune( t0() + Duration::seconds(1000));
    assert_eq!( cache.len(), 1);
    assert_eq!( cache.get( "SWA3").unwrap().altitude, 10000.0);

    cache.prune( t0() + Duration::seconds(2000));
    assert!( cache.is_empty());
}

#[test]
fn test_persistence () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join( "data").join( "vertical_speed_data.json");

    let cache = VerticalSpeedCache::load( &path).unwrap();
    assert!( cache.is_empty());

    let mut cache = cache;
    cache.update( "UAL1", 30000.0, t0());
    cache.save( &path).unwrap();
    println!("saved: {}", std::fs::read_to_string( &path).unwrap());

    let mut restored = VerticalSpeedCache::load( &path).unwrap();
    assert_eq!( restored, cache);
    assert_eq!( restored.update( "UAL1", 30500.0, t0() + Duration::seconds(30)), 1000.0);

    std::fs::write( &path, "not json").unwrap();
    assert!( VerticalSpeedCache::load( &path).is_err());
}
