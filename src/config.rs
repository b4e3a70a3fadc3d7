/*
config.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazegrid.

Mazegrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazegrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazegrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Maze settings.
//!
//! Settings can be read from a JSON file such as:
//!
//! ```json
//! { "width": 31, "height": 21, "step_interval_ms": 50 }
//! ```
//!
//! Missing fields take their default value.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::{MazeError, Result};

/// Default number of columns and rows.
pub const DEFAULT_SIZE: usize = 21;

/// Default size of a cell in pixels, for renderers.
pub const DEFAULT_CELL_SIZE: u32 = 50;

/// Default delay between two auto-solve steps.
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 20;

/// Maze settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of columns. Odd, at least 3.
    pub width: usize,

    /// Number of rows. Odd, at least 3.
    pub height: usize,

    /// Size of a cell in pixels. Only used by renderers.
    pub cell_size: u32,

    /// Delay between two auto-solve steps. The core never waits; the caller does.
    pub step_interval_ms: u64,

    /// Seed for the random source. The wall clock is used when not set.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            step_interval_ms: DEFAULT_STEP_INTERVAL_MS,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Read the settings from a JSON file.
    ///
    /// Return None if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        debug!("Settings file: {path:?}");
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(error.into()),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let config: MazeConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Write the settings to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file: File = File::create(path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Verify the settings.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 || self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.cell_size == 0 {
            return Err(MazeError::Config("cell size must be positive".to_string()));
        }
        Ok(())
    }

    /// Delay between two auto-solve steps.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}
