/*
error.rs

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

//! Errors raised by the maze engine.
//!
//! Invalid moves are not errors: they are reported by [`crate::agent::MoveRejection`] and leave
//! the session untouched.

use thiserror::Error;

use crate::position::Position;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, MazeError>;

/// Type of errors.
#[derive(Debug, Error)]
pub enum MazeError {
    /// A grid accessor was given coordinates outside the grid.
    /// Core callers never build such positions, so this is a bug.
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// The agent or the target was placed on a wall.
    #[error("cell ({x}, {y}) is a wall")]
    NotOpen { x: i32, y: i32 },

    /// Grid dimensions must be odd and at least 3.
    #[error("invalid maze dimensions {width}x{height}: both must be odd and at least 3")]
    InvalidDimensions { width: usize, height: usize },

    /// The search exhausted its frontier without reaching the goal.
    #[error("no path from {from} to {to}")]
    NoPath { from: Position, to: Position },

    /// Inconsistent settings.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
