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

//! turning filed flight plan route strings into resolved waypoint lists

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{model::{Route, Waypoint}, navdata::NavLookup};

lazy_static! {
    static ref AIRWAY_RE: Regex = Regex::new(r"^[JVQT]\d{1,3}$").unwrap();
}

pub fn is_airway (token: &str)->bool {
    AIRWAY_RE.is_match( &token.to_uppercase())
}

/// split a route string into upper case waypoint/airway tokens. Speed/altitude groups (`/N0450F350`) are
/// stripped and `DCT` is dropped
pub fn route_tokens (route: &str)->Vec<String> {
    route.split_whitespace()
        .filter_map( |t| t.split('/').next())
        .map( |t| t.to_uppercase())
        .filter( |t| !t.is_empty() && t != "DCT")
        .collect()
}

/// resolve departure, route and arrival into positioned waypoints. Airways are expanded between the
/// neighbouring tokens, unresolvable tokens are skipped
pub fn resolve_route (departure: &str, route: &str, arrival: &str, nav: &impl NavLookup)->Route {
    let tokens = route_tokens( &format!("{departure} {route} {arrival}"));
    let mut waypoints: Vec<Waypoint> = Vec::with_capacity( tokens.len());

    for (i,token) in tokens.iter().enumerate() {
        if is_airway( token) {
            let from = if i > 0 { Some(tokens[i-1].as_str()) } else { None };
            let to = tokens.get(i+1).map( |t| t.as_str());

            match nav.airway_fixes( token, from, to) {
                Some(fixes) => {
                    for fix in fixes {
                        match nav.position_of( &fix) {
                            Some(pos) => waypoints.push( Waypoint::new( fix, pos)),
                            None => debug!("unknown fix {fix} on airway {token}")
                        }
                    }
                }
                None => debug!("cannot expand airway {token} between {from:?} and {to:?}")
            }

        } else {
            match nav.position_of( token) {
                Some(pos) => waypoints.push( Waypoint::new( token, pos)),
                None => debug!("unresolved route token {token}")
            }
        }
    }

    Route::new( waypoints)
}
