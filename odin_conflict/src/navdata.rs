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

//! read-only navigation database handle built from the FAA NASR CSV tables. This is constructed once
//! and then passed explicitly into route resolution

use std::{collections::HashMap, fs::File, io::Read, path::Path};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug,info};
use odin_common::geo::{GeoPos, great_circle_destination};

use crate::{config::NavDataConfig, errors::{Result, OdinConflictError}};

lazy_static! {
    // <navaid><radial deg><distance nm>, e.g. SJC085002
    static ref RADIAL_RE: Regex = Regex::new(r"^([A-Z]{3})(\d{3})(\d{3})$").unwrap();
}

/// the lookup seam used by route resolution
pub trait NavLookup {
    /// position of a fix, navaid, airport or radial/DME point
    fn position_of (&self, ident: &str)->Option<GeoPos>;

    /// the fixes of `airway` strictly between `from` and `to` (if given). None if the airway is unknown or
    /// `from` or `to` are not on it
    fn airway_fixes (&self, airway: &str, from: Option<&str>, to: Option<&str>)->Option<Vec<String>>;
}

#[derive(Deserialize,Debug)]
struct FixRecord {
    #[serde(rename="FIX_ID")] id: String,
    #[serde(rename="LAT_DECIMAL")] lat: f64,
    #[serde(rename="LONG_DECIMAL")] lon: f64,
}

#[derive(Deserialize,Debug)]
struct NavRecord {
    #[serde(rename="NAV_ID")] id: String,
    #[serde(rename="LAT_DECIMAL")] lat: f64,
    #[serde(rename="LONG_DECIMAL")] lon: f64,
}

#[derive(Deserialize,Debug)]
struct AirportRecord {
    #[serde(rename="ARPT_ID")] id: String,
    #[serde(rename="LAT_DECIMAL")] lat: f64,
    #[serde(rename="LONG_DECIMAL")] lon: f64,
}

#[derive(Deserialize,Debug)]
struct AirwayRecord {
    #[serde(rename="AWY_ID")] id: String,
    #[serde(rename="AIRWAY_STRING")] fixes: String,
}

/// positions keyed by upper case identifier, first record wins
#[derive(Debug,Default)]
pub struct NavData {
    fixes: HashMap<String,GeoPos>,
    navaids: HashMap<String,GeoPos>,
    airports: HashMap<String,GeoPos>,
    airways: HashMap<String,Vec<String>>,
}

fn read_positions<R,T> (reader: R, f: impl Fn(T)->(String,f64,f64)) -> Result<HashMap<String,GeoPos>>
    where R: Read, T: for<'de> Deserialize<'de>
{
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut map: HashMap<String,GeoPos> = HashMap::new();

    for res in csv_reader.deserialize::<T>() {
        let (id, lat, lon) = f(res?);
        match GeoPos::from_degrees( lat, lon) {
            Ok(pos) => { map.entry( id.trim().to_uppercase()).or_insert( pos); }
            Err(e) => debug!("ignoring nav record {id}: {e}")
        }
    }
    Ok(map)
}

fn read_airways<R: Read> (reader: R) -> Result<HashMap<String,Vec<String>>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut map: HashMap<String,Vec<String>> = HashMap::new();

    for res in csv_reader.deserialize::<AirwayRecord>() {
        let rec = res?;
        let fixes: Vec<String> = rec.fixes.split_whitespace().map( |s| s.to_uppercase()).collect();
        map.entry( rec.id.trim().to_uppercase()).or_insert( fixes);
    }
    Ok(map)
}

fn open (path: &Path)->Result<File> {
    File::open( path).map_err( |e| OdinConflictError::OpFailedError( format!("cannot open nav table {path:?}: {e}")))
}

impl NavData {
    /// load the four tables from the configured directory
    pub fn load (config: &NavDataConfig)->Result<Self> {
        let navdata = NavData::from_readers(
            open( &config.fix_path())?,
            open( &config.nav_path())?,
            open( &config.awy_path())?,
            open( &config.apt_path())?
        )?;
        info!("loaded nav data from {:?}: {} fixes, {} navaids, {} airports, {} airways", config.dir,
            navdata.fixes.len(), navdata.navaids.len(), navdata.airports.len(), navdata.airways.len());
        Ok(navdata)
    }

    pub fn from_readers (fix: impl Read, nav: impl Read, awy: impl Read, apt: impl Read)->Result<Self> {
        Ok( NavData {
            fixes: read_positions( fix, |r: FixRecord| (r.id, r.lat, r.lon))?,
            navaids: read_positions( nav, |r: NavRecord| (r.id, r.lat, r.lon))?,
            airports: read_positions( apt, |r: AirportRecord| (r.id, r.lat, r.lon))?,
            airways: read_airways( awy)?,
        })
    }

    fn named_position (&self, ident: &str)->Option<GeoPos> {
        if let Some(pos) = self.fixes.get( ident).or_else( || self.navaids.get( ident)) {
            return Some(*pos)
        }

        let apt_id = if ident.len() == 4 && ident.starts_with('K') { &ident[1..] } else { ident };
        self.airports.get( apt_id).copied()
    }

    fn radial_position (&self, ident: &str)->Option<GeoPos> {
        let caps = RADIAL_RE.captures( ident)?;
        let navaid = self.named_position( &caps[1])?;
        let radial: f64 = caps[2].parse().ok()?;
        let dist: f64 = caps[3].parse().ok()?;
        Some( great_circle_destination( &navaid, radial, dist))
    }
}

impl NavLookup for NavData {
    fn position_of (&self, ident: &str)->Option<GeoPos> {
        let ident = ident.trim().to_uppercase();
        if RADIAL_RE.is_match( &ident) {
            self.radial_position( &ident)
        } else {
            self.named_position( &ident)
        }
    }

    fn airway_fixes (&self, airway: &str, from: Option<&str>, to: Option<&str>)->Option<Vec<String>> {
        let mut fixes: &[String] = self.airways.get( &airway.trim().to_uppercase())?.as_slice();

        if let Some(from) = from {
            let from = from.to_uppercase();
            let idx = fixes.iter().position( |f| *f == from)?;
            fixes = &fixes[idx+1..];
        }
        if let Some(to) = to {
            let to = to.to_uppercase();
            let idx = fixes.iter().position( |f| *f == to)?;
            fixes = &fixes[..idx];
        }

        Some( fixes.to_vec())
    }
}
