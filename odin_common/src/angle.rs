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

use std::{fmt, cmp};
use serde::{Serialize,Deserialize};

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// true if `d` is a finite latitude in degrees. Latitudes are never wrapped - out of range values are errors
#[inline]
pub fn is_latitude (d: f64) -> bool { d.is_finite() && (-90.0..=90.0).contains(&d) }

/// true if `d` is a finite longitude in degrees within [-180,180]
#[inline]
pub fn is_longitude (d: f64) -> bool { d.is_finite() && (-180.0..=180.0).contains(&d) }

/// a direction in degrees that is always kept within [0,360). Used for tracks and bearings, which wrap
/// around (unlike latitudes). Deserializes from any number, including the integer headings of feeds
#[derive(Copy,Clone,Serialize,Deserialize)]
#[serde(from="f64", into="f64")]
pub struct Angle360(f64);

impl Angle360 {
    #[inline] pub fn from_degrees (deg: f64) -> Self { Angle360( normalize_360(deg)) }
    #[inline] pub fn from_radians (rad: f64) -> Self { Angle360( normalize_360( rad.to_degrees())) }

    #[inline] pub fn degrees (&self)->f64 { self.0 }
    #[inline] pub fn radians (&self)->f64 { self.0.to_radians() }

    /// smallest absolute difference between two directions in degrees [0..180]
    pub fn abs_diff (&self, other: &Angle360)->f64 {
        normalize_180( self.0 - other.0).abs()
    }
}

impl From<f64> for Angle360 {
    fn from (deg: f64)->Self { Angle360::from_degrees(deg) }
}

impl From<Angle360> for f64 {
    fn from (a: Angle360) -> Self { a.0 }
}

impl fmt::Display for Angle360 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.0) }
}

impl fmt::Debug for Angle360 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Angle360({})", self.0) }
}

impl cmp::PartialEq for Angle360 {
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl cmp::PartialOrd for Angle360 {
    fn partial_cmp(&self,other:&Self) -> Option<cmp::Ordering> { self.0.partial_cmp(&other.0) }
}
