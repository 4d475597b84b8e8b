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

//! the prediction sweep over all minute offsets of the configured horizon

use std::{fmt, collections::BTreeMap};
use serde::Serialize;
use tracing::{debug,trace};

use crate::{
    config::SeparationConfig,
    conflict::{evaluate_offset, AircraftConflictStatus, OffsetPrediction, PairSeverity, Severity},
    errors::Result,
    model::AircraftState,
    predict::predict_aircraft
};

#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct ConflictReportEntry {
    pub callsign_a: String,
    pub callsign_b: String,
    pub severity: Severity,
    pub first_minutes: u32,
}

impl fmt::Display for ConflictReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} <-> {}: {} in {} min(s)", self.callsign_a, self.callsign_b, self.severity, self.first_minutes)
    }
}

/// everything a sweep produces. Nothing of this is kept between sweeps
#[derive(Debug,Clone,Default,Serialize)]
pub struct SweepResult {
    pub offsets: Vec<u32>,
    pub predictions: BTreeMap<u32,Vec<OffsetPrediction>>,
    pub pairs: Vec<PairSeverity>,
    pub statuses: BTreeMap<String,AircraftConflictStatus>,
}

impl SweepResult {
    pub fn status (&self, callsign: &str)->Option<&AircraftConflictStatus> {
        self.statuses.get( callsign)
    }

    pub fn has_conflicts (&self)->bool { !self.statuses.is_empty() }

    /// the non-NONE pair records, most severe and earliest first
    pub fn conflicting_pairs (&self)->Vec<&PairSeverity> {
        let mut list: Vec<&PairSeverity> = self.pairs.iter().filter( |p| p.severity != Severity::None).collect();
        list.sort_by( |a,b| b.severity.cmp( &a.severity).then( a.minutes.cmp( &b.minutes)));
        list
    }

    /// one entry per conflicting aircraft pair with its worst severity and the first offset at which that
    /// pair was in conflict. Sorted by severity (descending), then by time
    pub fn conflict_report (&self)->Vec<ConflictReportEntry> {
        let mut entries: BTreeMap<(&str,&str),ConflictReportEntry> = BTreeMap::new();
        for p in self.pairs.iter().filter( |p| p.severity != Severity::None) {
            entries.entry( (p.callsign_a.as_str(), p.callsign_b.as_str()))
                .and_modify( |e| {
                    if p.severity > e.severity { e.severity = p.severity }
                    if p.minutes < e.first_minutes { e.first_minutes = p.minutes }
                })
                .or_insert_with( || ConflictReportEntry {
                    callsign_a: p.callsign_a.clone(),
                    callsign_b: p.callsign_b.clone(),
                    severity: p.severity,
                    first_minutes: p.minutes
                });
        }

        let mut list: Vec<ConflictReportEntry> = entries.into_values().collect();
        list.sort_by( |a,b| b.severity.cmp( &a.severity).then( a.first_minutes.cmp( &b.first_minutes)));
        list
    }

    fn merge_statuses (&mut self, minutes: u32, statuses: BTreeMap<String,AircraftConflictStatus>) {
        for (callsign, status) in statuses {
            let cumulative = self.statuses.entry( callsign).or_default();
            cumulative.merge( status.severity, minutes);
        }
    }
}

/// predict all aircraft at each of the given offsets and evaluate all pairs at each offset.
/// Every offset is evaluated, including for aircraft that are already RED
pub fn sweep_offsets (aircraft: &[AircraftState], offsets: &[u32], config: &SeparationConfig) -> Result<SweepResult> {
    let mut result = SweepResult { offsets: offsets.to_vec(), ..Default::default() };

    for &minutes in offsets {
        let mut predictions: Vec<OffsetPrediction> = Vec::with_capacity( aircraft.len());
        for ac in aircraft {
            let prediction = predict_aircraft( ac, minutes as f64, config)?;
            trace!("{} at +{minutes}min: {:?}", ac.callsign, prediction);
            predictions.push( OffsetPrediction {
                callsign: ac.callsign.clone(),
                deviation_nm: ac.deviation_nm().unwrap_or(0.0),
                prediction
            });
        }

        let (pairs, statuses) = evaluate_offset( &predictions, minutes, config);
        debug!("+{minutes}min: {} pairs evaluated, {} aircraft in conflict", pairs.len(), statuses.len());

        result.merge_statuses( minutes, statuses);
        result.pairs.extend( pairs);
        result.predictions.insert( minutes, predictions);
    }

    Ok(result)
}

/// run a sweep over the configured horizon. Fails with a `ConfigError` if the config does not validate
pub fn sweep (aircraft: &[AircraftState], config: &SeparationConfig) -> Result<SweepResult> {
    config.validate()?;
    sweep_offsets( aircraft, &config.minute_offsets(), config)
}
