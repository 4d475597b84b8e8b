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

//! pairwise separation evaluation of predicted positions

use std::{fmt, collections::BTreeMap};
use serde::Serialize;
use odin_common::geo::haversine_distance;

use crate::{
    config::SeparationConfig,
    predict::{Prediction, PredictedPosition}
};

/// conflict severity, ordered by urgency
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Default)]
pub enum Severity {
    #[default] None,
    Yellow,
    Red,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "NONE",
            Severity::Yellow => "YELLOW",
            Severity::Red => "RED",
        };
        write!(f, "{s}")
    }
}

/// the separation of two predicted positions
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct Separation {
    pub horizontal_nm: f64, // reduced by both route deviations, can be negative
    pub vertical_ft: f64,   // includes the vertical margin
}

/// the classification of one aircraft pair at one minute offset
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct PairSeverity {
    pub callsign_a: String,
    pub callsign_b: String,
    pub minutes: u32,
    pub separation: Separation,
    pub severity: Severity,
}

/// the worst severity of an aircraft and all offsets where it had a non-NONE pair
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Default)]
pub struct AircraftConflictStatus {
    pub severity: Severity,
    pub breach_minutes: Vec<u32>, // sorted, unique
}

impl AircraftConflictStatus {
    pub fn merge (&mut self, severity: Severity, minutes: u32) {
        if severity > self.severity { self.severity = severity }
        if let Err(idx) = self.breach_minutes.binary_search( &minutes) {
            self.breach_minutes.insert( idx, minutes)
        }
    }
}

/// a predicted position of a tracked aircraft at a given offset, together with the cross track deviation
/// of its current leg
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct OffsetPrediction {
    pub callsign: String,
    pub deviation_nm: f64,
    pub prediction: Prediction,
}

pub fn separation (p1: &PredictedPosition, dev1_nm: f64, p2: &PredictedPosition, dev2_nm: f64, config: &SeparationConfig) -> Separation {
    let horizontal_nm = haversine_distance( &p1.pos, &p2.pos) - dev1_nm - dev2_nm;
    let vertical_ft = (p1.altitude_ft - p2.altitude_ft).abs() + config.vertical_margin_ft;
    Separation { horizontal_nm, vertical_ft }
}

/// RED takes precedence over YELLOW. Both conditions are inclusive
pub fn classify (sep: &Separation, config: &SeparationConfig) -> Severity {
    if sep.horizontal_nm <= config.red_lateral_nm && sep.vertical_ft <= config.red_vertical_ft {
        Severity::Red
    } else if sep.horizontal_nm <= config.yellow_lateral_nm && sep.vertical_ft <= config.yellow_vertical_ft {
        Severity::Yellow
    } else {
        Severity::None
    }
}

/// separation and severity of two predicted positions
pub fn evaluate_pair (p1: &PredictedPosition, dev1_nm: f64, p2: &PredictedPosition, dev2_nm: f64, config: &SeparationConfig) -> (Separation,Severity) {
    let sep = separation( p1, dev1_nm, p2, dev2_nm, config);
    let severity = classify( &sep, config);
    (sep, severity)
}

/// evaluate all unordered pairs of valid predictions at one minute offset. Returns every evaluated pair and
/// the per-aircraft status for aircraft that have at least one non-NONE pair
pub fn evaluate_offset (predictions: &[OffsetPrediction], minutes: u32, config: &SeparationConfig)
                        -> (Vec<PairSeverity>, BTreeMap<String,AircraftConflictStatus>) {
    let mut pairs: Vec<PairSeverity> = Vec::new();
    let mut statuses: BTreeMap<String,AircraftConflictStatus> = BTreeMap::new();

    for (i, a) in predictions.iter().enumerate() {
        let Some(pa) = a.prediction.position() else { continue };

        for b in &predictions[i+1..] {
            if a.callsign == b.callsign { continue }
            let Some(pb) = b.prediction.position() else { continue };

            let (separation, severity) = evaluate_pair( pa, a.deviation_nm, pb, b.deviation_nm, config);
            if severity != Severity::None {
                statuses.entry( a.callsign.clone()).or_default().merge( severity, minutes);
                statuses.entry( b.callsign.clone()).or_default().merge( severity, minutes);
            }

            pairs.push( PairSeverity {
                callsign_a: a.callsign.clone(),
                callsign_b: b.callsign.clone(),
                minutes,
                separation,
                severity
            });
        }
    }

    (pairs, statuses)
}
