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

//! forward simulation of an aircraft along its filed route. Aircraft fly their current track up to
//! the next waypoint and then follow the remaining legs with the same ground speed. Altitude is
//! extrapolated linearly and capped at the filed cruise level

use std::fmt;
use serde::Serialize;
use odin_common::geo::{GeoPos, haversine_distance, great_circle_destination, initial_bearing};

use crate::{
    config::SeparationConfig, errors::{Result, invalid_input},
    model::{AircraftState, Waypoint}
};

/// a predicted 3D position
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct PredictedPosition {
    pub pos: GeoPos,
    pub altitude_ft: f64,
}

impl fmt::Display for PredictedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.0}ft", self.pos, self.altitude_ft)
    }
}

/// why there is no prediction
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub enum Unavailable {
    OffRoute, // no current leg
    NoRemainingWaypoints,
    RouteExhausted, // route ends before the prediction time
}

/// a prediction result. Unavailable predictions are never represented by a (0,0,0) position
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub enum Prediction {
    Valid(PredictedPosition),
    Unavailable(Unavailable),
}

impl Prediction {
    pub fn position (&self)->Option<&PredictedPosition> {
        match self {
            Prediction::Valid(p) => Some(p),
            Prediction::Unavailable(_) => None
        }
    }

    pub fn is_valid (&self)->bool { matches!( self, Prediction::Valid(_)) }
}

/// the kinematic input of a prediction, in the engine units (ft, kt, ft/min, deg)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct KinematicState {
    pub pos: GeoPos,
    pub altitude_ft: f64,
    pub vertical_rate_fpm: f64,
    pub groundspeed_kn: f64,
    pub track_deg: f64,
    pub cruise_altitude_ft: Option<f64>,
}

impl KinematicState {
    pub fn from_aircraft (ac: &AircraftState)->Self {
        KinematicState {
            pos: ac.position,
            altitude_ft: ac.altitude_ft,
            vertical_rate_fpm: ac.vertical_rate_fpm,
            groundspeed_kn: ac.groundspeed_kn,
            track_deg: ac.track.degrees(),
            cruise_altitude_ft: ac.cruise_altitude.map( |alt| alt as f64)
        }
    }

    fn check (&self, minutes: f64)->Result<()> {
        let values = [
            ("altitude", self.altitude_ft), ("vertical rate", self.vertical_rate_fpm),
            ("groundspeed", self.groundspeed_kn), ("track", self.track_deg),
            ("cruise altitude", self.cruise_altitude_ft.unwrap_or(0.0)), ("minutes", minutes)
        ];
        for (name,v) in values {
            if !v.is_finite() { return Err( invalid_input!("non-finite {name}: {v}")) }
        }
        if self.groundspeed_kn < 0.0 { return Err( invalid_input!("negative groundspeed: {}", self.groundspeed_kn)) }
        if minutes < 0.0 { return Err( invalid_input!("negative prediction time: {minutes}")) }
        Ok(())
    }
}

/// linear altitude extrapolation. Vertical rates within the dead-band count as level flight, and
/// predictions that would climb or descend through the filed cruise level stop at that level
pub fn predicted_altitude (altitude_ft: f64, vertical_rate_fpm: f64, cruise_altitude_ft: Option<f64>,
                           minutes: f64, config: &SeparationConfig) -> f64 {
    let vs = if config.is_in_dead_band( vertical_rate_fpm) { 0.0 } else { vertical_rate_fpm };
    let alt = altitude_ft + vs * minutes;

    match cruise_altitude_ft {
        Some(crz) if vs > 0.0 && altitude_ft <= crz && alt > crz => crz,
        Some(crz) if vs < 0.0 && altitude_ft >= crz && alt < crz => crz,
        _ => alt
    }
}

/// predict where an aircraft will be after `minutes`.
///
/// `remaining` are the waypoints ahead of the aircraft, starting with the forward waypoint of its current
/// leg. As long as the distance flown does not reach that waypoint we extrapolate along the current track.
/// Beyond it we follow the remaining legs, each with the great circle bearing from its start to its end.
/// If the route ends before the distance is used up the result is `Unavailable` - we never extrapolate
/// past the last filed waypoint
pub fn predict_position (state: &KinematicState, remaining: &[Waypoint], minutes: f64, config: &SeparationConfig) -> Result<Prediction> {
    state.check( minutes)?;

    let Some(first) = remaining.first() else {
        return Ok( Prediction::Unavailable( Unavailable::NoRemainingWaypoints))
    };

    let altitude_ft = predicted_altitude( state.altitude_ft, state.vertical_rate_fpm, state.cruise_altitude_ft, minutes, config);
    let distance_to_cover = state.groundspeed_kn * minutes / 60.0;

    let mut dist_remaining = distance_to_cover - haversine_distance( &state.pos, &first.pos);
    if dist_remaining < 0.0 {
        let pos = great_circle_destination( &state.pos, state.track_deg, distance_to_cover);
        return Ok( Prediction::Valid( PredictedPosition{ pos, altitude_ft }))
    }

    let mut last = first;
    for next in &remaining[1..] {
        let hop = haversine_distance( &last.pos, &next.pos);
        let after_hop = dist_remaining - hop;

        if after_hop < 0.0 {
            let bearing = initial_bearing( &last.pos, &next.pos);
            let pos = great_circle_destination( &last.pos, bearing.degrees(), dist_remaining);
            return Ok( Prediction::Valid( PredictedPosition{ pos, altitude_ft }))

        } else if after_hop == 0.0 {
            return Ok( Prediction::Valid( PredictedPosition{ pos: next.pos, altitude_ft }))
        }

        dist_remaining = after_hop;
        last = next;
    }

    Ok( Prediction::Unavailable( Unavailable::RouteExhausted))
}

/// prediction for a located aircraft. Aircraft without a current leg have no prediction
pub fn predict_aircraft (ac: &AircraftState, minutes: f64, config: &SeparationConfig) -> Result<Prediction> {
    match ac.current_leg {
        Some(lm) => {
            let remaining = ac.route.remaining_after_leg( lm.leg_index);
            predict_position( &KinematicState::from_aircraft(ac), remaining, minutes, config)
        }
        None => Ok( Prediction::Unavailable( Unavailable::OffRoute))
    }
}
