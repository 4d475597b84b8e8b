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

use chrono::{DateTime,Utc};
use tracing::{debug,info,warn};

use crate::{
    config::ProbeConfig,
    errors::Result,
    feed::{Pilot, VatsimData},
    flightplan::resolve_route,
    horizon::{sweep, SweepResult},
    model::AircraftState,
    navdata::{NavData, NavLookup},
    vertical_speed::VerticalSpeedCache
};

/// one conflict probe instance. Each `run_cycle` builds a fresh set of aircraft states from a feed
/// document. Only the vertical speed cache carries over between cycles
pub struct ConflictProbe<N: NavLookup = NavData> {
    config: ProbeConfig,
    nav: N,
    vs_cache: VerticalSpeedCache,
}

impl ConflictProbe<NavData> {
    /// load nav data and vertical speed cache as configured
    pub fn from_config (config: ProbeConfig)->Result<Self> {
        let nav = NavData::load( &config.navdata)?;

        let vs_cache = match &config.vertical_speed_cache {
            Some(path) => VerticalSpeedCache::load( path).unwrap_or_else( |e| {
                warn!("ignoring unreadable vertical speed cache {path:?}: {e}");
                VerticalSpeedCache::default()
            }),
            None => VerticalSpeedCache::default()
        };

        ConflictProbe::new( config, nav, vs_cache)
    }
}

impl<N: NavLookup> ConflictProbe<N> {
    pub fn new (config: ProbeConfig, nav: N, vs_cache: VerticalSpeedCache)->Result<Self> {
        config.validate()?;
        Ok( ConflictProbe { config, nav, vs_cache })
    }

    pub fn config (&self)->&ProbeConfig { &self.config }
    pub fn vertical_speed_cache (&self)->&VerticalSpeedCache { &self.vs_cache }

    fn aircraft_state (&mut self, pilot: &Pilot, now: DateTime<Utc>)->Option<AircraftState> {
        let fp = pilot.flight_plan.as_ref()?;
        let pos = pilot.position()?;
        let alt = pilot.altitude?;

        let vs = self.vs_cache.update( &pilot.callsign, alt, now);
        let route = resolve_route( &fp.departure, &fp.route, &fp.arrival, &self.nav);

        match AircraftState::new( &pilot.callsign, pos, alt, pilot.groundspeed, pilot.heading, vs, pilot.cruise_altitude(), route) {
            Ok(ac) => {
                let departure = Some(fp.departure.clone()).filter( |s| !s.is_empty());
                let arrival = Some(fp.arrival.clone()).filter( |s| !s.is_empty());
                Some( ac.with_airports( departure, arrival).located( self.config.separation.lateral_tolerance_nm))
            }
            Err(e) => {
                warn!("skipping {}: {e}", pilot.callsign);
                None
            }
        }
    }

    /// why an aircraft does not take part in the sweep, None if it does
    pub fn exclusion_reason (&self, ac: &AircraftState)->Option<&'static str> {
        match ac.current_leg() {
            None => Some("off-route"),
            Some(leg) if leg.is_degenerate() => Some("on degenerate leg"),
            Some(_) if self.config.exclude_terminal_legs && ac.is_on_terminal_leg() => Some("on terminal leg"),
            _ => None
        }
    }

    /// the aircraft states of all selected pilots that are on a usable route leg
    pub fn tracked_aircraft (&mut self, data: &VatsimData, now: DateTime<Utc>)->Vec<AircraftState> {
        let pilots = self.config.feed.select( data);
        let mut aircraft: Vec<AircraftState> = Vec::with_capacity( pilots.len());

        for pilot in pilots {
            if let Some(ac) = self.aircraft_state( pilot, now) {
                match self.exclusion_reason( &ac) {
                    Some(reason) => debug!("{} excluded: {reason}", ac.callsign),
                    None => aircraft.push( ac)
                }
            }
        }
        aircraft
    }

    /// build aircraft states from the feed, run the horizon sweep and persist the vertical speed cache
    pub fn run_cycle (&mut self, data: &VatsimData, now: DateTime<Utc>)->Result<SweepResult> {
        let aircraft = self.tracked_aircraft( data, now);
        let result = sweep( &aircraft, &self.config.separation)?;

        info!("{} pilots, {} tracked aircraft, {} in conflict", data.pilots.len(), aircraft.len(), result.statuses.len());

        if let Some(path) = &self.config.vertical_speed_cache {
            if let Err(e) = self.vs_cache.save( path) {
                warn!("failed to save vertical speed cache {path:?}: {e}");
            }
        }

        Ok(result)
    }
}
