//! **jumpgrid-core** — foundational types for grid pathfinding.
//!
//! This crate provides the geometry primitives and the raw map
//! representation shared across the *jumpgrid* workspace: integer [`Point`]s,
//! half-open [`Range`] rectangles, and an immutable [`Grid`] of caller-defined
//! [`Cell`] values.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid};
