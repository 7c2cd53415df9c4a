//! **jumpgrid-paths** — incremental Jump Point Search on uniform-cost grids.
//!
//! Jump Point Search (JPS) is an optimised A* variant for 8-way grids with
//! unit cardinal cost and a configurable diagonal cost. Instead of expanding
//! every cell, it walks straight rays and only enqueues *jump points* —
//! cells with forced neighbours where an optimal path may have to turn.
//!
//! The central type is [`JpsField`]: a search engine bound to one borrowed
//! [`Grid`](jumpgrid_core::Grid) and one start position, queried with goal
//! *sets*:
//!
//! - [`JpsField::find`] — the jump-point path to the nearest reachable goal
//! - [`JpsField::find_full`] — the same path interpolated to unit steps
//! - [`JpsField::path_cost`] — the cost of that path
//!
//! Classification of raw cells is lazy and cached, so untouched map regions
//! are never inspected. With [`FieldConfig::resumable`] set, cost and
//! frontier state is retained across queries from the same start, letting
//! repeated goal lookups reuse earlier work.
//!
//! Walkability and the heuristic are pluggable via the [`Walkability`] and
//! [`Heuristic`] strategies; the defaults cover the common case of an
//! open-sentinel map searched with the octile distance.

mod error;
mod field;
mod frontier;
mod jps;
mod path;
mod traits;

pub use error::{FieldError, FieldResult};
pub use field::{FieldConfig, JpsField};
pub use traits::{Heuristic, OctileToGoals, OpenIsWalkable, Walkability, octile};
