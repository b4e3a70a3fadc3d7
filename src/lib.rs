/*
lib.rs

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

//! Grid maze engine.
//!
//! The crate generates perfect mazes, finds the shortest path between two cells, and walks an
//! agent along that path one step at a time.
//!
//! Everything goes through a [`session::MazeSession`] object:
//!
//! ```
//! use mazegrid::config::MazeConfig;
//! use mazegrid::position::Direction;
//! use mazegrid::session::MazeSession;
//!
//! let config = MazeConfig { seed: Some(42), ..MazeConfig::default() };
//! let mut session = MazeSession::new(config)?;
//! session.try_move(Direction::Right)?;
//! session.reset()?;
//! if session.prepare_auto_solve()? {
//!     while session.advance_animation()?.moved {}
//! }
//! assert_eq!(session.agent(), session.target());
//! # Ok::<(), mazegrid::error::MazeError>(())
//! ```
//!
//! Drawing, input, and pacing the animation are left to the caller.

pub mod agent;
pub mod config;
pub mod draw;
pub mod error;
pub mod generator;
pub mod grid;
pub mod pathfinder;
pub mod position;
pub mod session;
