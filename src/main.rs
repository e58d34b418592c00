// Copyright 2016 Joe Wilm, The Alacritty Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
//! Rowgrid - walk a numeric grid through every storage lifetime
#![deny(clippy::all, clippy::if_not_else, clippy::enum_glob_use)]

#[macro_use]
extern crate log;

use std::io;

use rowgrid::cli::{self, Format};
use rowgrid::config::Config;
use rowgrid::report::{JsonSink, TextSink};
use rowgrid::{demo, die, logging};

fn main() {
    // Load command line options
    let options = cli::Options::new();

    // Initialize the logger as soon as possible as to capture output from other subsystems
    logging::initialize(&options).expect("Unable to initialize logger");

    // Load configuration file
    let mut config = Config::load(options.config_path.as_deref());

    // Command line overrides the file
    if options.alloc_limit.is_some() {
        config.allocator.limit = options.alloc_limit;
    }

    if let Some(limit) = config.allocator.limit {
        info!("Limiting dynamic allocations to {} bytes", limit);
    }

    let stdout = io::stdout();
    let result = match options.format {
        Format::Text => demo::run(&config, &mut TextSink::new(stdout.lock())),
        Format::Json => demo::run(&config, &mut JsonSink::new(stdout.lock())),
    };

    if let Err(err) = result {
        error!("{}", err);
        die!("rowgrid: {}", err);
    }

    info!("Goodbye");
}
