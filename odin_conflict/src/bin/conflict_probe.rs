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

use std::{fs, path::PathBuf, thread};
use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_conflict::{
    load_config, ConflictProbe, ProbeConfig,
    feed::{fetch_feed, parse_feed, VatsimData}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "predictive conflict probe for VATSIM en-route traffic")]
pub struct Args {
    /// RON config file (defaults are used if not set)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// read the feed document from this JSON file instead of the configured URL
    #[arg(short,long)]
    pub feed_file: Option<PathBuf>,

    /// run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

fn get_feed (args: &Args, config: &ProbeConfig)->Result<VatsimData> {
    match &args.feed_file {
        Some(path) => Ok( parse_feed( &fs::read_to_string(path)?)? ),
        None => Ok( fetch_feed( &config.feed.url)? )
    }
}

fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    let config: ProbeConfig = match &args.config {
        Some(path) => load_config( path)?,
        None => ProbeConfig::default()
    };
    let poll_interval = config.poll_interval;
    let mut probe = ConflictProbe::from_config( config)?;

    loop {
        println!("-----------------------------------------------");
        match get_feed( &args, probe.config()) {
            Ok(data) => {
                let result = probe.run_cycle( &data, Utc::now())?;
                let report = result.conflict_report();
                if report.is_empty() {
                    println!("no conflicts detected");
                } else {
                    for entry in &report {
                        println!("{entry}");
                    }
                }
            }
            Err(e) => eprintln!("failed to get feed: {e}")
        }

        if args.once { break }
        thread::sleep( poll_interval);
    }

    Ok(())
}
