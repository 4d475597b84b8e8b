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

//! vertical speed estimation from consecutive altitude reports. The feed does not carry vertical rates,
//! so we derive them from the last altitude we saw for the same callsign. The cache is persisted between
//! runs but is not used by the conflict engine itself

use std::{collections::HashMap, fs, path::Path};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};

use crate::errors::Result;

/// samples older than this do not produce a vertical speed and are dropped from the cache
pub const MAX_SAMPLE_AGE_SECS: f64 = 600.0;

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct AltitudeSample {
    pub altitude: f64, // ft
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize,Deserialize,Debug,Clone,Default,PartialEq)]
#[serde(transparent)]
pub struct VerticalSpeedCache {
    samples: HashMap<String,AltitudeSample>,
}

impl VerticalSpeedCache {
    pub fn new ()->Self { VerticalSpeedCache::default() }

    pub fn len (&self)->usize { self.samples.len() }
    pub fn is_empty (&self)->bool { self.samples.is_empty() }
    pub fn get (&self, callsign: &str)->Option<&AltitudeSample> { self.samples.get( callsign) }

    /// record a new altitude report and return the vertical speed in ft/min relative to the previous report.
    /// This is 0 if there is no previous report or if it is not between 0 and 600 sec old.
    /// Samples of other callsigns that are too old relative to `now` are removed
    pub fn update (&mut self, callsign: &str, altitude: f64, now: DateTime<Utc>)->f64 {
        let mut vs = 0.0;

        if let Some(prev) = self.samples.get( callsign) {
            let dt = sample_age_secs( prev, now);
            if dt > 0.0 && dt < MAX_SAMPLE_AGE_SECS {
                vs = (altitude - prev.altitude) * 60.0 / dt;
            }
        }

        self.prune( now);
        self.samples.insert( callsign.to_string(), AltitudeSample{ altitude, timestamp: now });
        vs
    }

    /// drop all samples that are at least MAX_SAMPLE_AGE_SECS older than `now`
    pub fn prune (&mut self, now: DateTime<Utc>) {
        self.samples.retain( |_, s| sample_age_secs( s, now) < MAX_SAMPLE_AGE_SECS);
    }

    /// a non-existing file is an empty cache
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        if !path.is_file() { return Ok( VerticalSpeedCache::default()) }

        let data = fs::read_to_string( path)?;
        Ok( serde_json::from_str( &data)? )
    }

    pub fn save (&self, path: impl AsRef<Path>)->Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() { fs::create_dir_all( dir)? }
        }
        fs::write( path, serde_json::to_string( self)?)?;
        Ok(())
    }
}

fn sample_age_secs (sample: &AltitudeSample, now: DateTime<Utc>)->f64 {
    (now - sample.timestamp).num_milliseconds() as f64 / 1000.0
}
