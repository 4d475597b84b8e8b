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
#![allow(unused)]

use std::{fs, path::{Path,PathBuf}, time::Duration};
use serde::{Serialize,Deserialize,de::DeserializeOwned};
use odin_common::geo::GeoPos;

use crate::errors::{Result, OdinConflictError, config_error};

/// the separation and prediction parameters of the conflict engine. All engine functions take this
/// explicitly - there are no embedded threshold constants
#[derive(Deserialize,Serialize,Debug,Clone,PartialEq)]
pub struct SeparationConfig {
    pub lateral_tolerance_nm: f64, // max cross track distance to consider an aircraft on a leg
    pub red_lateral_nm: f64,
    pub red_vertical_ft: f64,
    pub yellow_lateral_nm: f64,
    pub yellow_vertical_ft: f64,
    pub vertical_margin_ft: f64, // always added to the vertical separation
    pub vs_dead_band_fpm: (f64,f64), // vertical speeds within [min,max] are treated as level flight
    pub horizon_minutes: u32, // exclusive upper bound of prediction offsets
    pub precision_minutes: u32, // step between prediction offsets
}

impl Default for SeparationConfig {
    fn default()->Self {
        SeparationConfig {
            lateral_tolerance_nm: 4.0,
            red_lateral_nm: 5.0,
            red_vertical_ft: 1000.0,
            yellow_lateral_nm: 12.0,
            yellow_vertical_ft: 2000.0,
            vertical_margin_ft: 100.0,
            vs_dead_band_fpm: (-150.0, 150.0),
            horizon_minutes: 10,
            precision_minutes: 1,
        }
    }
}

impl SeparationConfig {
    pub fn validate (&self)->Result<()> {
        let thresholds = [
            ("lateral_tolerance_nm", self.lateral_tolerance_nm),
            ("red_lateral_nm", self.red_lateral_nm),
            ("red_vertical_ft", self.red_vertical_ft),
            ("yellow_lateral_nm", self.yellow_lateral_nm),
            ("yellow_vertical_ft", self.yellow_vertical_ft),
            ("vertical_margin_ft", self.vertical_margin_ft),
        ];
        for (name,v) in thresholds {
            if !v.is_finite() || v < 0.0 { return Err( config_error!("{name} has to be a non-negative number, got {v}")) }
        }

        let (vs_min,vs_max) = self.vs_dead_band_fpm;
        if !(vs_min.is_finite() && vs_max.is_finite()) || vs_min > vs_max {
            return Err( config_error!("invalid vertical speed dead-band ({vs_min},{vs_max})"))
        }

        if self.precision_minutes == 0 { return Err( config_error!("precision_minutes has to be > 0")) }
        if self.horizon_minutes <= self.precision_minutes {
            return Err( config_error!("horizon_minutes ({}) has to exceed precision_minutes ({})", self.horizon_minutes, self.precision_minutes))
        }

        Ok(())
    }

    /// the minute offsets we predict for: `precision, 2*precision, ..` strictly below the horizon
    pub fn minute_offsets (&self)->Vec<u32> {
        if self.precision_minutes == 0 { return Vec::new() }
        (self.precision_minutes..self.horizon_minutes).step_by( self.precision_minutes as usize).collect()
    }

    pub fn is_in_dead_band (&self, vs_fpm: f64)->bool {
        vs_fpm >= self.vs_dead_band_fpm.0 && vs_fpm <= self.vs_dead_band_fpm.1
    }
}

/// which part of the live feed we monitor
#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct FeedConfig {
    pub url: String,
    pub south_west: GeoPos,
    pub north_east: GeoPos,
    pub min_altitude_ft: f64,
    pub exclude_vfr: bool,
}

impl Default for FeedConfig {
    fn default()->Self {
        FeedConfig {
            url: "https://data.vatsim.net/v3/vatsim-data.json".to_string(),
            south_west: GeoPos::from_degrees_normalized( 32.0, -130.0),
            north_east: GeoPos::from_degrees_normalized( 48.0, -62.6),
            min_altitude_ft: 18000.0,
            exclude_vfr: true,
        }
    }
}

impl FeedConfig {
    pub fn contains (&self, pos: &GeoPos)->bool {
        let lat = pos.latitude_deg();
        let lon = pos.longitude_deg();
        lat >= self.south_west.latitude_deg() && lat <= self.north_east.latitude_deg()
            && lon >= self.south_west.longitude_deg() && lon <= self.north_east.longitude_deg()
    }
}

/// location of the navigation database tables (CSV exports of the FAA NASR subscription)
#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct NavDataConfig {
    pub dir: PathBuf,
    pub fix_file: String,
    pub nav_file: String,
    pub awy_file: String,
    pub apt_file: String,
}

impl Default for NavDataConfig {
    fn default()->Self {
        NavDataConfig {
            dir: PathBuf::from("navdata"),
            fix_file: "FIX_BASE.csv".to_string(),
            nav_file: "NAV_BASE.csv".to_string(),
            awy_file: "AWY_BASE.csv".to_string(),
            apt_file: "APT_BASE.csv".to_string(),
        }
    }
}

impl NavDataConfig {
    pub fn fix_path (&self)->PathBuf { self.dir.join( &self.fix_file) }
    pub fn nav_path (&self)->PathBuf { self.dir.join( &self.nav_file) }
    pub fn awy_path (&self)->PathBuf { self.dir.join( &self.awy_file) }
    pub fn apt_path (&self)->PathBuf { self.dir.join( &self.apt_file) }
}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct ProbeConfig {
    pub separation: SeparationConfig,
    pub feed: FeedConfig,
    pub navdata: NavDataConfig,
    pub exclude_terminal_legs: bool, // ignore aircraft on their first or last leg (no SID/STAR support)
    pub poll_interval: Duration,
    pub vertical_speed_cache: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default()->Self {
        ProbeConfig {
            separation: SeparationConfig::default(),
            feed: FeedConfig::default(),
            navdata: NavDataConfig::default(),
            exclude_terminal_legs: true,
            poll_interval: Duration::from_secs(15),
            vertical_speed_cache: Some( PathBuf::from("data/vertical_speed_data.json")),
        }
    }
}

impl ProbeConfig {
    pub fn validate (&self)->Result<()> {
        self.separation.validate()?;
        if self.poll_interval.is_zero() { return Err( config_error!("poll_interval has to be > 0")) }
        Ok(())
    }
}

/// load a RON config from the given path
pub fn load_config<C> (path: impl AsRef<Path>) -> Result<C> where C: DeserializeOwned {
    let path = path.as_ref();
    let data = fs::read_to_string( path)
        .map_err(|e| config_error!("failed to read config {:?}: {}", path, e))?;
    Ok( ron::from_str( &data)? )
}
