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
use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, App, Arg, ArgMatches};
use log::LevelFilter;

#[cfg(not(windows))]
const CONFIG_HELP: &str =
    "Specify alternative configuration file [default: $XDG_CONFIG_HOME/rowgrid/rowgrid.yml]";
#[cfg(windows)]
const CONFIG_HELP: &str =
    "Specify alternative configuration file [default: %APPDATA%\\rowgrid\\rowgrid.yml]";

/// How reports are written to stdout
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Format {
    Text,
    Json,
}

impl Default for Format {
    fn default() -> Format {
        Format::Text
    }
}

/// Options specified on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub format: Format,
    pub alloc_limit: Option<usize>,
    pub log_level: LevelFilter,
    pub config_path: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            format: Format::default(),
            alloc_limit: None,
            log_level: LevelFilter::Warn,
            config_path: None,
        }
    }
}

impl Options {
    /// Build `Options` from command line arguments
    pub fn new() -> Self {
        Options::from_matches(&app().get_matches())
    }

    fn from_matches(matches: &ArgMatches<'_>) -> Self {
        let mut options = Options::default();

        if let Some(format) = matches.value_of("format") {
            options.format = match format {
                "json" => Format::Json,
                _ => Format::Text,
            };
        }

        // Validated by clap
        options.alloc_limit = matches.value_of("alloc-limit").and_then(|limit| limit.parse().ok());

        match matches.occurrences_of("q") {
            0 => (),
            1 => options.log_level = LevelFilter::Error,
            _ => options.log_level = LevelFilter::Off,
        }

        match matches.occurrences_of("v") {
            0 => (),
            1 => options.log_level = LevelFilter::Info,
            2 => options.log_level = LevelFilter::Debug,
            _ => options.log_level = LevelFilter::Trace,
        }

        if let Some(path) = matches.value_of("config-file") {
            options.config_path = Some(PathBuf::from(path.to_string()));
        }

        options
    }
}

#[allow(unknown_lints, dangerous_implicit_autorefs)]
fn app() -> App<'static, 'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .arg(
            Arg::with_name("format")
                .long("format")
                .takes_value(true)
                .possible_values(&["text", "json"])
                .help("Output format of the reports [default: text]"),
        )
        .arg(
            Arg::with_name("alloc-limit")
                .long("alloc-limit")
                .takes_value(true)
                .value_name("bytes")
                .validator(|limit| {
                    limit.parse::<usize>().map(|_| ()).map_err(|err| err.to_string())
                })
                .help("Refuse dynamic allocations larger than this many bytes"),
        )
        .arg(
            Arg::with_name("q")
                .short("q")
                .multiple(true)
                .conflicts_with("v")
                .help("Reduces the level of verbosity (the min level is -qq)"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .conflicts_with("q")
                .help("Increases the level of verbosity (the max level is -vvv)"),
        )
        .arg(
            Arg::with_name("config-file")
                .long("config-file")
                .takes_value(true)
                .help(CONFIG_HELP),
        )
}
