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

//! Configuration definitions and file loading
//!
//! Every section is optional. Missing or malformed sections fall back to
//! their defaults, which reproduce the built-in demonstration values.
use std::borrow::Cow;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize};

/// Top-level config type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// One dimensional demonstration buffer
    #[serde(default, deserialize_with = "failure_default")]
    pub sequence: Sequence,

    /// Two dimensional demonstration grid
    #[serde(default, deserialize_with = "failure_default")]
    pub grid: GridConfig,

    /// Dynamic memory settings
    #[serde(default, deserialize_with = "failure_default")]
    pub allocator: AllocatorConfig,

    /// Path the config was loaded from
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            sequence: Sequence::default(),
            grid: GridConfig::default(),
            allocator: AllocatorConfig::default(),
            config_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sequence {
    pub values: Vec<i32>,

    /// Single write performed through a borrowed view
    pub poke: Poke,
}

impl Default for Sequence {
    fn default() -> Sequence {
        Sequence { values: vec![0, 10, 9, 1, 8, 2, 7, 3, 6, 4, 5], poke: Poke::default() }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Poke {
    pub index: usize,
    pub value: i32,
}

impl Default for Poke {
    fn default() -> Poke {
        Poke { index: 1, value: -99 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,

    /// Elements in row-major order
    pub values: Vec<i32>,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig { rows: 2, columns: 5, values: vec![0, 9, 1, 8, 2, 7, 3, 6, 4, 5] }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Largest single allocation in bytes, unlimited when absent
    pub limit: Option<usize>,
}

fn failure_default<'a, D, T>(deserializer: D) -> ::std::result::Result<T, D::Error>
where
    D: de::Deserializer<'a>,
    T: Deserialize<'a> + Default,
{
    match T::deserialize(deserializer) {
        Ok(value) => Ok(value),
        Err(err) => {
            error!("Problem with config: {}; using default value", err);
            Ok(T::default())
        },
    }
}

/// Errors occurring during config loading
#[derive(Debug)]
pub enum Error {
    /// Config file not found
    NotFound,

    /// Config file empty
    Empty,

    /// io error reading file
    Io(io::Error),

    /// Not valid yaml or missing parameters
    Yaml(serde_yaml::Error),
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::NotFound | Error::Empty => None,
            Error::Io(ref err) => Some(err),
            Error::Yaml(ref err) => Some(err),
        }
    }
}

impl ::std::fmt::Display for Error {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match *self {
            Error::NotFound => f.write_str("could not locate config file"),
            Error::Empty => f.write_str("empty config file"),
            Error::Io(ref err) => write!(f, "error reading config file: {}", err),
            Error::Yaml(ref err) => write!(f, "problem with config: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Error {
        if val.kind() == io::ErrorKind::NotFound {
            Error::NotFound
        } else {
            Error::Io(val)
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(val: serde_yaml::Error) -> Error {
        Error::Yaml(val)
    }
}

/// Result from config loading
pub type Result<T> = ::std::result::Result<T, Error>;

impl Config {
    /// Get the location of the first found default config file paths
    /// according to the following order:
    ///
    /// 1. $XDG_CONFIG_HOME/rowgrid/rowgrid.yml
    /// 2. $XDG_CONFIG_HOME/rowgrid.yml
    /// 3. $HOME/.config/rowgrid/rowgrid.yml
    #[cfg(not(windows))]
    pub fn installed_config<'a>() -> Option<Cow<'a, Path>> {
        // Try using XDG location by default
        ::xdg::BaseDirectories::with_prefix("rowgrid")
            .ok()
            .and_then(|xdg| xdg.find_config_file("rowgrid.yml"))
            .or_else(|| {
                ::xdg::BaseDirectories::new()
                    .ok()
                    .and_then(|fallback| fallback.find_config_file("rowgrid.yml"))
            })
            .or_else(|| {
                let home = env::var("HOME").ok()?;
                let fallback = PathBuf::from(&home).join(".config/rowgrid/rowgrid.yml");
                if fallback.exists() {
                    Some(fallback)
                } else {
                    None
                }
            })
            .map(Cow::from)
    }

    #[cfg(windows)]
    pub fn installed_config<'a>() -> Option<Cow<'a, Path>> {
        env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join("rowgrid\\rowgrid.yml"))
            .filter(|path| path.exists())
            .map(Cow::from)
    }

    pub fn load_from<P: Into<PathBuf>>(path: P) -> Result<Config> {
        let path = path.into();
        let raw = Config::read_file(path.as_path())?;
        let mut config: Config = serde_yaml::from_str(&raw)?;
        config.config_path = Some(path);

        Ok(config)
    }

    /// Load from `path`, or from the installed location when `None`
    ///
    /// Falls back to the defaults whenever no usable file is found.
    pub fn load(path: Option<&Path>) -> Config {
        let path = match path.map(Cow::from).or_else(Config::installed_config) {
            Some(path) => path,
            None => {
                debug!("No config file found; using default");
                return Config::default();
            },
        };

        match Config::load_from(&*path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Err(err) => {
                match err {
                    Error::NotFound | Error::Empty => warn!("Config file {}: {}", path.display(), err),
                    _ => error!("Unable to load config {}: {}", path.display(), err),
                }
                Config::default()
            },
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_ref().map(|p| p.as_path())
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let mut f = fs::File::open(path)?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)?;
        if contents.trim().is_empty() {
            return Err(Error::Empty);
        }

        Ok(contents)
    }
}
