/*
draw.rs

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

//! Draw a maze snapshot as text.
//!
//! Used by the command line and by debug traces. Each cell is one character:
//!
//! | Cell               | Character |
//! |--------------------|-----------|
//! | Wall               | `#`       |
//! | Open               | space     |
//! | Highlighted path   | `.`       |
//! | Agent              | `A`       |
//! | Target             | `T`       |

use crate::grid::{CellKind, Occupancy};
use crate::session::{CellView, Snapshot};

pub const WALL: char = '#';
pub const OPEN: char = ' ';
pub const PATH: char = '.';
pub const AGENT: char = 'A';
pub const TARGET: char = 'T';

/// Character for a cell. The agent and the target hide the path.
fn cell_char(cell: &CellView) -> char {
    match (cell.kind, cell.occupancy) {
        (CellKind::Wall, _) => WALL,
        (CellKind::Open, Occupancy::Agent) => AGENT,
        (CellKind::Open, Occupancy::Target) => TARGET,
        (CellKind::Open, Occupancy::None) if cell.on_path => PATH,
        (CellKind::Open, Occupancy::None) => OPEN,
    }
}

/// Return one string per row.
pub fn draw_lines(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .rows
        .iter()
        .map(|row| row.iter().map(cell_char).collect())
        .collect()
}

/// Return the whole maze, rows separated by new lines.
pub fn draw(snapshot: &Snapshot) -> String {
    draw_lines(snapshot).join("\n")
}
