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
#![allow(uncommon_codepoints,non_snake_case)]

//! this module provides the spherical navigation geometry used for en-route computations: geodetic
//! positions in degrees, great circle distance/destination/bearing and the cross track test of a
//! point against a great circle leg.
//! All distances are nautical miles on a sphere with `MEAN_EARTH_RADIUS_NM`. Functions are pure and
//! do not cache anything.

use std::fmt;
use serde::{Serialize,Deserialize};
use thiserror::Error;

use crate::{clamp_unit, TWO_PI, PI};
use crate::angle::{Angle360, is_latitude, is_longitude, normalize_180};
use crate::cartesian3::Cartesian3;
use crate::geo_constants::{MEAN_EARTH_RADIUS_NM, NM_PER_RADIAN, RADIANS_PER_NM, DEGENERATE_EPSILON, ANGLE_EPSILON};

#[derive(Error,Debug,Clone,PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate lat: {lat}, lon: {lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/* #region GeoPos ***********************************************************************************************/

/// a validated geodetic position in degrees (latitude in [-90,90], longitude in [-180,180]).
/// NaNs and out-of-range values are rejected when constructing, which means all geometry functions
/// can rely on finite input
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(try_from = "RawGeoPos")]
pub struct GeoPos {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawGeoPos {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

impl TryFrom<RawGeoPos> for GeoPos {
    type Error = GeoError;
    fn try_from (raw: RawGeoPos) -> Result<Self,GeoError> { GeoPos::from_degrees( raw.lat, raw.lon) }
}

impl GeoPos {
    pub fn from_degrees (lat: f64, lon: f64) -> Result<Self,GeoError> {
        if is_latitude(lat) && is_longitude(lon) {
            Ok( GeoPos{ lat, lon } )
        } else {
            Err( GeoError::InvalidCoordinate{ lat, lon } )
        }
    }

    /// note this does not validate but clamps the latitude and normalizes the longitude. Use only
    /// for values that are finite by construction (literals or results of great circle computations)
    pub fn from_degrees_normalized (lat: f64, lon: f64) -> Self {
        GeoPos{ lat: lat.clamp(-90.0, 90.0), lon: normalize_180(lon) }
    }

    #[inline] pub fn latitude_deg (&self)->f64 { self.lat }
    #[inline] pub fn longitude_deg (&self)->f64 { self.lon }

    pub fn to_unit_vector (&self)->Cartesian3 { Cartesian3::unit_from_lat_lon_degrees( self.lat, self.lon) }
}

impl fmt::Display for GeoPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5},{:.5})", self.lat, self.lon)
    }
}

/* #endregion GeoPos */

/* #region great circle primitives *****************************************************************************/

/// great circle distance in nautical miles, using the half-angle haversine formula
pub fn haversine_distance (a: &GeoPos, b: &GeoPos) -> f64 {
    let φ1 = a.lat.to_radians();
    let φ2 = b.lat.to_radians();
    let dφ = (b.lat - a.lat).to_radians();
    let dλ = (b.lon - a.lon).to_radians();

    let sin_dφ = (dφ / 2.0).sin();
    let sin_dλ = (dλ / 2.0).sin();

    let h = (sin_dφ*sin_dφ + φ1.cos() * φ2.cos() * sin_dλ*sin_dλ).clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2( (1.0 - h).sqrt());

    MEAN_EARTH_RADIUS_NM * c
}

/// direct geodesic problem on the sphere: position reached when travelling `distance_nm` from `start`
/// along the great circle with initial true `bearing_deg`.
/// Both bearing and distance have to be finite
pub fn great_circle_destination (start: &GeoPos, bearing_deg: f64, distance_nm: f64) -> GeoPos {
    let φ1 = start.lat.to_radians();
    let λ1 = start.lon.to_radians();
    let θ = bearing_deg.to_radians();
    let δ = distance_nm / MEAN_EARTH_RADIUS_NM;

    let sin_φ2 = clamp_unit( φ1.sin() * δ.cos() + φ1.cos() * δ.sin() * θ.cos());
    let φ2 = sin_φ2.asin();
    let λ2 = λ1 + (θ.sin() * δ.sin() * φ1.cos()).atan2( δ.cos() - φ1.sin() * sin_φ2);

    GeoPos::from_degrees_normalized( φ2.to_degrees(), λ2.to_degrees())
}

/// initial true bearing of the great circle from `from` to `to`. Returns 0 for coincident points
pub fn initial_bearing (from: &GeoPos, to: &GeoPos) -> Angle360 {
    let φ1 = from.lat.to_radians();
    let φ2 = to.lat.to_radians();
    let dλ = (to.lon - from.lon).to_radians();

    let y = dλ.sin() * φ2.cos();
    let x = φ1.cos() * φ2.sin() - φ1.sin() * φ2.cos() * dλ.cos();

    Angle360::from_radians( y.atan2(x))
}

/// angle in radians between the unit vectors of two positions
pub fn angle_between (u: &Cartesian3, v: &Cartesian3) -> f64 {
    u.angle_between(v)
}

#[inline] pub fn nm_to_radians (nm: f64)->f64 { nm * RADIANS_PER_NM }
#[inline] pub fn radians_to_nm (rad: f64)->f64 { rad * NM_PER_RADIAN }

/* #endregion great circle primitives */

/* #region cross track test ************************************************************************************/

/// result of testing a point against a great circle leg. We keep "closest approach is not on
/// this leg" apart from "on the leg but too far off" so that neither can be mistaken for a zero distance
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum ArcMatch {
    /// closest approach lies on the leg and the cross track distance is within tolerance
    Within { cross_track_nm: f64 },
    /// closest approach lies on the leg but the point is further off than the tolerance
    Outside { cross_track_nm: f64 },
    /// closest approach on the great circle lies beyond one of the leg endpoints
    NotApplicable,
}

impl ArcMatch {
    pub fn is_within (&self)->bool { matches!( self, ArcMatch::Within{..}) }

    pub fn cross_track_nm (&self)->Option<f64> {
        match self {
            ArcMatch::Within{cross_track_nm} | ArcMatch::Outside{cross_track_nm} => Some(*cross_track_nm),
            ArcMatch::NotApplicable => None
        }
    }
}

#[inline]
fn normalize_two_pi (a: f64)->f64 {
    let x = a % TWO_PI;
    if x < 0.0 { x + TWO_PI } else { x }
}

/// check if the closest approach of `p` to the great circle through `a` and `b` falls on the arc from
/// `a` to `b`, and if so how far `p` is off that arc (cross track distance).
///
/// We parameterize the great circle as `f(θ) = u cosθ + v sinθ` with `u` the unit vector of `a` and `v`
/// the in-plane vector orthogonal to `u` (Gram-Schmidt of `b` against `a`). The closest approach of `p`
/// is at `θ* = atan2(v·p, u·p)`, the leg covers `[0,Δ]` with `Δ = atan2(w·v, w·u)`.
///
/// Coincident or antipodal endpoints do not define a plane. In this case we only check if `p` is within
/// tolerance of either endpoint and report a cross track distance of 0
pub fn arc_match (a: &GeoPos, b: &GeoPos, p: &GeoPos, tolerance_nm: f64) -> ArcMatch {
    let tol_rad = nm_to_radians( tolerance_nm);

    let u = a.to_unit_vector();
    let w = b.to_unit_vector();
    let p = p.to_unit_vector();

    let v_raw = w - u * u.dot(&w);
    let norm_v = v_raw.length();

    if norm_v < DEGENERATE_EPSILON {
        return if angle_between( &u, &p) <= tol_rad || angle_between( &w, &p) <= tol_rad {
            ArcMatch::Within{ cross_track_nm: 0.0 }
        } else {
            ArcMatch::Outside{ cross_track_nm: 0.0 }
        }
    }
    let v = v_raw * (1.0 / norm_v);

    let a_p = u.dot(&p);
    let b_p = v.dot(&p);

    let θ = normalize_two_pi( b_p.atan2( a_p));
    let Δ = normalize_two_pi( w.dot(&v).atan2( w.dot(&u)));

    // θ is in [0,2π). Endpoints get a rounding slack since p == a can produce a θ of -0.0000..1 (i.e. ~2π)
    let in_arc = if Δ <= PI {
        θ <= Δ + ANGLE_EPSILON || θ >= TWO_PI - ANGLE_EPSILON
    } else { // short arc wraps past 2π
        !(θ > Δ + ANGLE_EPSILON && θ < TWO_PI - ANGLE_EPSILON)
    };

    if in_arc {
        // this is acos(hypot(a_p,b_p)) but stays accurate for points that are (almost) on the great circle
        let n = u.cross(&v);
        let perp_angle = n.dot(&p).abs().atan2( a_p.hypot( b_p));
        let cross_track_nm = radians_to_nm( perp_angle);

        if perp_angle <= tol_rad + ANGLE_EPSILON {
            ArcMatch::Within{ cross_track_nm }
        } else {
            ArcMatch::Outside{ cross_track_nm }
        }
    } else {
        ArcMatch::NotApplicable
    }
}

/* #endregion cross track test */
