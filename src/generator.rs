/*
generator.rs

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

//! Generate random mazes and represent paths through them.
//!
//! A maze is generated in place in a [`crate::grid::Grid`] object by creating a
//! [`maze::MazeGenerator`] object and by using its [`maze::MazeGenerator::generate`] method.
//! The generator carves a perfect maze: the open cells form a tree, so there is exactly one path
//! between any two open cells.
//!
//! The generator owns its random source.
//! Use [`maze::MazeGenerator::with_seed`] to get the same maze on every run, or
//! [`maze::MazeGenerator::from_clock`] for a different maze each time.
//!
//! Paths through the maze are [`path::Path`] objects.
//! They are produced by [`crate::pathfinder::find_shortest_path`] and walked by
//! [`crate::agent::AgentController`].

pub mod maze;
pub mod path;
