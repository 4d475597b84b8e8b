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

//! spherical earth constants used for navigation computations.
//! All en-route computations use a spherical earth model - there is no ellipsoid correction
//! since filed routes and feed positions are not accurate enough to make a difference

/// mean earth radius in nautical miles (spherical approximation used by aviation formulas)
pub const MEAN_EARTH_RADIUS_NM: f64 = 3440.065;

/// one nautical mile is one arc minute of a great circle
pub const NM_PER_RADIAN: f64 = 10800.0 / std::f64::consts::PI;
pub const RADIANS_PER_NM: f64 = std::f64::consts::PI / 10800.0;

/// residual norm below which two unit vectors are considered coincident or antipodal
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// slack when comparing angular distances against tolerances
pub const ANGLE_EPSILON: f64 = 1e-12;
