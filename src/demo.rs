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

//! Walk through every storage lifetime with the configured values
//!
//! Bounded buffers have their capacity fixed at compile time, so the
//! configured value lists must fill them exactly. Dynamic grids take their
//! shape from the configuration.
use std::convert::TryInto;
use std::fmt;
use std::io;

use crate::alloc::{Limited, System};
use crate::config::Config;
use crate::grid::{self, Grid, Owned};
use crate::index::{Column, Line, Point};
use crate::report::{Report, Sink};

/// Capacity of the bounded one dimensional buffer
pub const SEQUENCE_CAPACITY: usize = 11;

/// Capacity of the bounded two dimensional grid
pub const GRID_CAPACITY: usize = 10;

/// Shape of the nested fixed-size array
const NESTED_LINES: usize = 2;
const NESTED_COLS: usize = 5;

#[derive(Debug)]
pub enum Error {
    /// Building or accessing a grid failed
    Grid(grid::Error),

    /// The sink could not be written
    Io(io::Error),
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Grid(ref err) => Some(err),
            Error::Io(ref err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Grid(ref err) => fmt::Display::fmt(err, f),
            Error::Io(ref err) => write!(f, "Unable to write report: {}", err),
        }
    }
}

impl From<grid::Error> for Error {
    fn from(val: grid::Error) -> Error {
        Error::Grid(val)
    }
}

impl From<io::Error> for Error {
    fn from(val: io::Error) -> Error {
        Error::Io(val)
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Copy `values` into a fixed-size array
fn fixed<const N: usize>(lines: Line, cols: Column, values: &[i32]) -> grid::Result<[i32; N]> {
    values.try_into().map_err(|_| grid::Error::ShapeMismatch { rows: lines, cols, len: values.len() })
}

/// Run every step, emitting one report per rendered grid
pub fn run(config: &Config, sink: &mut dyn Sink) -> Result<()> {
    let allocator = Limited::new(System, config.allocator.limit);
    let lines = Line(config.grid.rows);
    let cols = Column(config.grid.columns);

    info!("Bounded sequence");
    let mut sequence = Grid::sequence(fixed::<SEQUENCE_CAPACITY>(
        Line(1),
        Column(SEQUENCE_CAPACITY),
        &config.sequence.values,
    )?);
    sink.emit(&Report::new("bounded sequence", &sequence))?;

    poke(&mut sequence.view_mut(), config)?;
    sink.emit(&Report::new("bounded sequence after poke", &sequence))?;

    info!("Bounded grid");
    let values = fixed::<GRID_CAPACITY>(lines, cols, &config.grid.values)?;
    let bounded = Grid::bounded(lines, cols, values)?;
    sink.emit(&Report::new("bounded grid", &bounded.view()))?;

    info!("Nested array");
    let mut nested = Grid::nested([[0; NESTED_COLS]; NESTED_LINES]);
    nested.copy_from_slice(bounded.as_slice())?;
    sink.emit(&Report::new("nested array", &nested))?;

    info!("Owned sequence");
    let mut owned = Grid::<Owned<i32, _>>::owned_in(sequence.rows(), sequence.cols(), &allocator)?;
    owned.copy_from_slice(sequence.as_slice())?;
    sink.emit(&Report::new("owned sequence", &owned))?;
    owned.release();

    info!("Owned grid");
    let mut owned = Grid::<Owned<i32, _>>::owned_in(lines, cols, &allocator)?;
    owned.copy_from_slice(bounded.as_slice())?;
    sink.emit(&Report::new("owned grid", &owned))?;
    owned.release();

    Ok(())
}

/// Consumer writing a single element through a borrowed view
fn poke(view: &mut Grid<&mut [i32]>, config: &Config) -> grid::Result<()> {
    let poke = config.sequence.poke;
    let point = Point::new(Line(0), Column(poke.index));

    debug!("Writing {} at {}", poke.value, point);
    *view.get_mut(point)? = poke.value;

    Ok(())
}
