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

//! the per-cycle data model of the conflict probe. Everything in here is rebuilt from the feed in
//! each poll cycle - nothing is carried over between cycles

use std::{fmt, ops::Index, slice};
use serde::{Serialize,Deserialize};
use uom::si::{f64::{Length,Velocity}, length::foot, velocity::{knot,foot_per_minute}};
use odin_common::{angle::Angle360, geo::GeoPos};

use crate::{errors::{Result, invalid_input}, route::locate_current_leg};

/// a resolved route point
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub pos: GeoPos,
}

impl Waypoint {
    pub fn new (name: impl ToString, pos: GeoPos)->Self {
        Waypoint { name: name.to_string(), pos }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.pos)
    }
}

/// waypoints in flight plan order. Adjacent duplicates are kept - they just form zero length legs
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<Waypoint>);

impl Route {
    pub fn new (waypoints: Vec<Waypoint>)->Self { Route(waypoints) }

    pub fn len (&self)->usize { self.0.len() }
    pub fn is_empty (&self)->bool { self.0.is_empty() }
    pub fn waypoints (&self)->&[Waypoint] { self.0.as_slice() }
    pub fn iter (&self)->slice::Iter<'_,Waypoint> { self.0.iter() }

    /// the legs (Wi,Wi+1) in index order
    pub fn legs (&self)->impl Iterator<Item=Leg<'_>> {
        self.0.windows(2).enumerate().map( |(index,w)| Leg { index, from: &w[0], to: &w[1] })
    }

    pub fn leg (&self, index: usize)->Option<Leg<'_>> {
        if index + 1 < self.0.len() {
            Some( Leg { index, from: &self.0[index], to: &self.0[index+1] })
        } else {
            None
        }
    }

    /// the waypoints still ahead when flying leg `leg_index`, starting with the leg's forward waypoint
    pub fn remaining_after_leg (&self, leg_index: usize)->&[Waypoint] {
        self.0.get( leg_index+1..).unwrap_or(&[])
    }
}

impl Index<usize> for Route {
    type Output = Waypoint;
    fn index (&self, i: usize)->&Waypoint { &self.0[i] }
}

impl From<Vec<Waypoint>> for Route {
    fn from (waypoints: Vec<Waypoint>)->Self { Route(waypoints) }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|wp| wp.name.as_str()).collect();
        write!(f, "[{}]", names.join(" "))
    }
}

/// a pair of consecutive route waypoints
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Leg<'a> {
    pub index: usize,
    pub from: &'a Waypoint,
    pub to: &'a Waypoint,
}

impl<'a> Leg<'a> {
    /// both ends have the same name (adjacent duplicates in the route)
    pub fn is_degenerate (&self)->bool { self.from.name == self.to.name }
}

impl<'a> fmt::Display for Leg<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from.name, self.to.name)
    }
}

/// the leg an aircraft was found on, together with its cross track deviation from that leg
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LegMatch {
    pub leg_index: usize,
    pub deviation_nm: f64,
}

/// the state of one tracked aircraft within a poll cycle
#[derive(Debug,Clone)]
pub struct AircraftState {
    pub callsign: String,
    pub position: GeoPos,
    pub altitude_ft: f64,
    pub groundspeed_kn: f64,
    pub track: Angle360,
    pub vertical_rate_fpm: f64,
    pub cruise_altitude: Option<i32>, // filed cruise level in ft

    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub route: Route,

    pub current_leg: Option<LegMatch>, // None if off-route
}

impl AircraftState {
    /// create a state with a yet undetermined leg. Non-finite kinematic values are rejected
    pub fn new (callsign: impl ToString, position: GeoPos, altitude_ft: f64, groundspeed_kn: f64, track_deg: f64,
                vertical_rate_fpm: f64, cruise_altitude: Option<i32>, route: Route) -> Result<Self> {
        let callsign = callsign.to_string();
        for (name,v) in [("altitude",altitude_ft), ("groundspeed",groundspeed_kn), ("track",track_deg), ("vertical rate",vertical_rate_fpm)] {
            if !v.is_finite() { return Err( invalid_input!("{callsign} has non-finite {name}: {v}")) }
        }
        if groundspeed_kn < 0.0 { return Err( invalid_input!("{callsign} has negative groundspeed: {groundspeed_kn}")) }

        Ok( AircraftState {
            callsign,
            position,
            altitude_ft,
            groundspeed_kn,
            track: Angle360::from_degrees(track_deg),
            vertical_rate_fpm,
            cruise_altitude,
            departure: None,
            arrival: None,
            route,
            current_leg: None
        })
    }

    pub fn with_airports (mut self, departure: Option<String>, arrival: Option<String>)->Self {
        self.departure = departure;
        self.arrival = arrival;
        self
    }

    /// determine the current leg for the given lateral tolerance
    pub fn located (mut self, lateral_tolerance_nm: f64)->Self {
        self.current_leg = locate_current_leg( &self.route, &self.position, lateral_tolerance_nm);
        self
    }

    pub fn is_on_route (&self)->bool { self.current_leg.is_some() }

    pub fn current_leg (&self)->Option<Leg<'_>> {
        self.current_leg.and_then( |lm| self.route.leg( lm.leg_index))
    }

    pub fn deviation_nm (&self)->Option<f64> { self.current_leg.map( |lm| lm.deviation_nm) }

    // typed quantities for consumers outside the engine, which works on the reported ft/kn/fpm values
    pub fn altitude (&self)->Length { Length::new::<foot>( self.altitude_ft) }
    pub fn groundspeed (&self)->Velocity { Velocity::new::<knot>( self.groundspeed_kn) }
    pub fn vertical_rate (&self)->Velocity { Velocity::new::<foot_per_minute>( self.vertical_rate_fpm) }

    /// is the aircraft on a leg that starts at its departure or ends at its arrival airport
    pub fn is_on_terminal_leg (&self)->bool {
        if let Some(leg) = self.current_leg() {
            self.departure.as_ref().is_some_and( |dep| leg.from.name.eq_ignore_ascii_case(dep))
             || self.arrival.as_ref().is_some_and( |arr| leg.to.name.eq_ignore_ascii_case(arr))
        } else {
            false
        }
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Aircraft( cs: {}, pos: {}, alt: {:.0}, spd: {:.0}, trk: {:.0}, vr: {:.0}",
            self.callsign, self.position, self.altitude_ft, self.groundspeed_kn, self.track.degrees(), self.vertical_rate_fpm)?;
        if let Some(crz) = self.cruise_altitude { write!( f, ", crz: {crz}")?; }
        match self.current_leg() {
            Some(leg) => write!( f, ", leg: {leg}")?,
            None => write!( f, ", off-route")?
        }
        write!( f, ")")
    }
}
