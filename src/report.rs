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

//! Reporting grid contents to a consumer
//!
//! A `Report` is a snapshot of a grid: its label, lifetime, shape and values
//! in row-major order. Sinks turn reports into text or JSON lines.
use std::io::{self, Write};

use serde_json::Value;

use crate::grid::{Grid, Lifetime, Storage};

/// Snapshot of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub label: String,
    pub lifetime: Lifetime,
    pub rows: usize,
    pub columns: usize,

    /// Every element, in row-major order
    pub values: Vec<Value>,
}

impl Report {
    pub fn new<L, S>(label: L, grid: &Grid<S>) -> Report
    where
        L: Into<String>,
        S: Storage,
    {
        let values = grid
            .as_slice()
            .iter()
            .map(|value| serde_json::to_value(value).unwrap_or(Value::Null))
            .collect();

        Report {
            label: label.into(),
            lifetime: grid.lifetime(),
            rows: grid.rows().0,
            columns: grid.cols().0,
            values,
        }
    }

    /// Values of one line
    pub fn line(&self, line: usize) -> &[Value] {
        let start = line * self.columns;
        &self.values[start..start + self.columns]
    }
}

/// Consumer of grid reports
pub trait Sink {
    fn emit(&mut self, report: &Report) -> io::Result<()>;
}

/// Human readable output
///
/// ```text
/// bounded grid (bounded, 2 x 5)
/// 0 | 9 | 1 | 8 | 2
/// 7 | 3 | 6 | 4 | 5
/// ```
///
/// Reports are separated by an empty line.
pub struct TextSink<W> {
    output: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(output: W) -> TextSink<W> {
        TextSink { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn emit(&mut self, report: &Report) -> io::Result<()> {
        writeln!(
            self.output,
            "{} ({}, {} x {})",
            report.label, report.lifetime, report.rows, report.columns
        )?;

        for line in 0..report.rows {
            let cells: Vec<String> = report.line(line).iter().map(ToString::to_string).collect();
            writeln!(self.output, "{}", cells.join(" | "))?;
        }

        writeln!(self.output)?;
        self.output.flush()
    }
}

/// One JSON object per report, one report per line
pub struct JsonSink<W> {
    output: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(output: W) -> JsonSink<W> {
        JsonSink { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Sink for JsonSink<W> {
    fn emit(&mut self, report: &Report) -> io::Result<()> {
        serde_json::to_writer(&mut self.output, report)?;
        writeln!(self.output)?;
        self.output.flush()
    }
}
