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

use tracing::trace;
use odin_common::geo::{GeoPos, ArcMatch, arc_match};
use crate::model::{Route, LegMatch};

/// find the leg an aircraft at `pos` is currently flying.
///
/// Legs are checked in route order and the first leg that has the position within `tolerance_nm` of
/// its great circle arc wins - even if a later leg would be closer. This is what keeps self-intersecting
/// or reversing routes from snapping to the wrong leg.
/// Returns `None` if no leg matches (climb-out, vectors, incomplete route data)
pub fn locate_current_leg (route: &Route, pos: &GeoPos, tolerance_nm: f64) -> Option<LegMatch> {
    for leg in route.legs() {
        match arc_match( &leg.from.pos, &leg.to.pos, pos, tolerance_nm) {
            ArcMatch::Within{cross_track_nm} => {
                return Some( LegMatch{ leg_index: leg.index, deviation_nm: cross_track_nm })
            }
            ArcMatch::Outside{cross_track_nm} => {
                trace!("{pos} is {cross_track_nm:.1}nm off leg {leg}");
            }
            ArcMatch::NotApplicable => {}
        }
    }
    None
}
