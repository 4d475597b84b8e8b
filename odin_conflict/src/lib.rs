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

//! predictive conflict probe for en-route traffic. Aircraft are located on their filed routes, flown
//! forward along these routes for a number of minute offsets, and all aircraft pairs are checked against
//! lateral/vertical separation tiers at each offset

pub mod errors;
pub mod config;
pub mod model;
pub mod route;
pub mod predict;
pub mod conflict;
pub mod horizon;

pub mod navdata;
pub mod flightplan;
pub mod feed;
pub mod vertical_speed;
pub mod probe;

pub use errors::{OdinConflictError, Result};
pub use config::{ProbeConfig, SeparationConfig, FeedConfig, NavDataConfig, load_config};
pub use model::{AircraftState, Leg, LegMatch, Route, Waypoint};
pub use route::locate_current_leg;
pub use predict::{predict_aircraft, predict_position, KinematicState, PredictedPosition, Prediction, Unavailable};
pub use conflict::{evaluate_offset, evaluate_pair, AircraftConflictStatus, PairSeverity, Separation, Severity};
pub use horizon::{sweep, sweep_offsets, ConflictReportEntry, SweepResult};
pub use probe::ConflictProbe;
