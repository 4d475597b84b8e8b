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
#![allow(uncommon_codepoints)]

use std::ops::{Mul, Neg, Sub};
use serde::{Serialize,Deserialize};
use crate::clamp_unit;

/// a plain 3D vector without unit semantics.
/// In the navigation context this is mostly used for points on the unit sphere (n-vectors), which
/// turns great circle problems into dot- and cross-products
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct Cartesian3 {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Cartesian3 {
    pub fn new (x: f64, y: f64, z: f64)->Cartesian3 {
        Cartesian3{x,y,z}
    }

    /// project geodetic degrees onto the unit sphere.
    /// The result is re-normalized since cos/sin products drift off unit length in the last bits
    pub fn unit_from_lat_lon_degrees (lat: f64, lon: f64)->Cartesian3 {
        let φ = lat.to_radians();
        let λ = lon.to_radians();
        let cos_φ = φ.cos();

        let v = Cartesian3::new( cos_φ * λ.cos(), cos_φ * λ.sin(), φ.sin());
        v.scaled_to_unit_length()
    }

    pub fn dot (&self, p: &Cartesian3) -> f64 {
        (self.x * p.x) + (self.y * p.y) + (self.z * p.z)
    }

    pub fn cross (&self, p: &Cartesian3)->Self {
        Cartesian3 {
            x: (self.y * p.z) - (self.z * p.y),
            y: (self.z * p.x) - (self.x * p.z),
            z: (self.x * p.y) - (self.y * p.x)
        }
    }

    pub fn length (&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// note this returns non-finite components for zero length vectors - callers have to check the length first
    pub fn scaled_to_unit_length (&self)->Self {
        let length = self.length();
        Cartesian3::new( self.x / length, self.y / length, self.z / length)
    }

    /// angle in radians between two unit vectors. The dot product is clamped so that
    /// rounding errors beyond ±1 do not turn into NaNs
    pub fn angle_between (&self, v: &Cartesian3)->f64 {
        clamp_unit( self.dot(v)).acos()
    }

    pub fn latitude_deg (&self)->f64 { self.z.atan2( self.x.hypot(self.y)).to_degrees() }
    pub fn longitude_deg (&self)->f64 { self.y.atan2( self.x).to_degrees() }
}

impl std::fmt::Display for Cartesian3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ {}, {}, {} ]", self.x, self.y, self.z)
    }
}

impl Sub for Cartesian3 {
    type Output = Self;
    fn sub (self, rhs: Self) -> Self {
        Cartesian3::new( self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Cartesian3 {
    type Output = Self;
    fn neg (self) -> Self {
        Cartesian3::new( -self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Cartesian3 {
    type Output = Self;
    fn mul (self, rhs: f64) -> Self {
        Cartesian3::new( self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

