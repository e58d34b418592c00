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
//! Logging for rowgrid.
//!
//! The main executable is supposed to call `initialize()` exactly once during
//! startup. All logging messages are written to stderr, given that their
//! log-level is sufficient for the level configured in `cli::Options`.
//! Reports go to stdout, so the two never interleave.
use std::env;
use std::io::{self, LineWriter, Write};
use std::sync::Mutex;

use log::{self, SetLoggerError};

use crate::cli::Options;

/// Crates whose messages are logged
const ALLOWED_TARGETS: [&str; 1] = ["rowgrid"];

pub fn initialize(options: &Options) -> Result<(), SetLoggerError> {
    // Use env_logger if RUST_LOG environment variable is defined. Otherwise,
    // use the rowgrid-only logger.
    if env::var("RUST_LOG").is_ok() {
        env_logger::try_init()
    } else {
        log::set_max_level(options.log_level);
        log::set_boxed_logger(Box::new(Logger::new(io::stderr())))
    }
}

pub struct Logger<T: Write> {
    output: Mutex<LineWriter<T>>,
}

impl<T: Send + Write> Logger<T> {
    pub fn new(output: T) -> Logger<T> {
        Logger { output: Mutex::new(LineWriter::new(output)) }
    }

    fn format(record: &log::Record<'_>, target: &str) -> String {
        format!("[{:<5}] [{}] {}\n", record.level(), target, record.args())
    }
}

impl<T: Send + Write> log::Log for Logger<T> {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        // Get target crate
        let index = record.target().find(':').unwrap_or_else(|| record.target().len());
        let target = &record.target()[..index];

        // Only log our own crate
        if !self.enabled(record.metadata()) || !ALLOWED_TARGETS.contains(&target) {
            return;
        }

        if let Ok(mut output) = self.output.lock() {
            let _ = output.write_all(Logger::<T>::format(record, target).as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut output) = self.output.lock() {
            let _ = output.flush();
        }
    }
}
