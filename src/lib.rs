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
//! Rowgrid - row-major numeric grids over pluggable storage
#![deny(clippy::all, clippy::if_not_else, clippy::enum_glob_use)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
pub mod macros;

pub mod alloc;
pub mod cli;
pub mod config;
pub mod demo;
pub mod grid;
pub mod index;
pub mod logging;
pub mod report;

pub use crate::grid::Grid;
