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

//! the subset of the VATSIM v3 data feed (https://data.vatsim.net/v3/vatsim-data.json) we need

use serde::{Serialize,Deserialize};
use tracing::debug;
use odin_common::geo::GeoPos;

use crate::{config::FeedConfig, errors::Result};

#[derive(Serialize,Deserialize,Debug,Clone,Default)]
pub struct VatsimData {
    #[serde(default)]
    pub general: Option<General>,
    #[serde(default)]
    pub pilots: Vec<Pilot>,
}

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct General {
    pub version: Option<u32>,
    pub update_timestamp: Option<String>,
    pub connected_clients: Option<u32>,
}

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct Pilot {
    pub callsign: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,    // ft
    #[serde(default)]
    pub groundspeed: f64,         // kn
    #[serde(default)]
    pub heading: f64,             // deg
    pub flight_plan: Option<FlightPlan>,
    pub last_updated: Option<String>,
}

impl Pilot {
    /// None if the reported position is missing or not a valid coordinate
    pub fn position (&self)->Option<GeoPos> {
        let (lat,lon) = (self.latitude?, self.longitude?);
        GeoPos::from_degrees( lat, lon).ok()
    }

    pub fn is_vfr (&self)->bool {
        self.flight_plan.as_ref().is_some_and( |fp| fp.flight_rules == "V")
    }

    pub fn cruise_altitude (&self)->Option<i32> {
        self.flight_plan.as_ref().and_then( |fp| parse_cruise_altitude( &fp.altitude))
    }
}

#[derive(Serialize,Deserialize,Debug,Clone,Default)]
#[serde(default)]
pub struct FlightPlan {
    pub flight_rules: String, // "I" or "V"
    pub aircraft_short: String,
    pub departure: String,
    pub arrival: String,
    pub altitude: String,
    pub route: String,
}

/// filed cruise level in ft. Plain digits are feet, `FLnnn` is a flight level
pub fn parse_cruise_altitude (s: &str)->Option<i32> {
    let s = s.trim();
    let (digits, factor) = match s.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("FL") => (&s[2..], 100),
        _ => (s, 1)
    };

    if !digits.is_empty() && digits.chars().all( |c| c.is_ascii_digit()) {
        digits.parse::<i32>().ok().and_then( |v| v.checked_mul( factor))
    } else {
        None
    }
}

pub fn parse_feed (json: &str)->Result<VatsimData> {
    Ok( serde_json::from_str( json)? )
}

/// blocking fetch of the current feed document
pub fn fetch_feed (url: &str)->Result<VatsimData> {
    let response = reqwest::blocking::get( url)?.error_for_status()?;
    Ok( response.json::<VatsimData>()? )
}

impl FeedConfig {
    /// is this pilot part of the monitored traffic
    pub fn accepts (&self, pilot: &Pilot)->bool {
        if pilot.flight_plan.is_none() { return false }
        if self.exclude_vfr && pilot.is_vfr() { return false }

        let Some(pos) = pilot.position() else { return false };
        let Some(alt) = pilot.altitude else { return false };

        alt >= self.min_altitude_ft && self.contains( &pos)
    }

    pub fn select<'a> (&self, data: &'a VatsimData)->Vec<&'a Pilot> {
        let selected: Vec<&Pilot> = data.pilots.iter().filter( |p| self.accepts(p)).collect();
        debug!("selected {} out of {} pilots", selected.len(), data.pilots.len());
        selected
    }
}
