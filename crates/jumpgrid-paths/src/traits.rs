//! Pluggable search strategies: walkability and the goal heuristic.

use std::collections::HashSet;

use jumpgrid_core::{Cell, Point};

/// Decides whether a raw grid cell can be walked on.
///
/// Implemented for any `Fn(Point, Cell) -> bool` closure, so most callers
/// can pass a lambda instead of defining a type.
pub trait Walkability {
    /// `true` if the cell at `p` with raw value `cell` is walkable.
    fn walkable(&self, p: Point, cell: Cell) -> bool;
}

impl<F: Fn(Point, Cell) -> bool> Walkability for F {
    fn walkable(&self, p: Point, cell: Cell) -> bool {
        self(p, cell)
    }
}

/// Default walkability: a cell is walkable iff it equals [`Cell::OPEN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenIsWalkable;

impl Walkability for OpenIsWalkable {
    fn walkable(&self, _p: Point, cell: Cell) -> bool {
        cell == Cell::OPEN
    }
}

/// Estimates the remaining cost from a cell to the nearest active goal.
///
/// For the search to stay optimal the estimate must be admissible: it may
/// never exceed the true remaining cost, and must be non-negative.
pub trait Heuristic {
    /// Estimate of the cost from `p` to the cheapest member of `goals`.
    fn estimate(&self, p: Point, cell: Cell, goals: &HashSet<Point>, diagonal_cost: f64) -> f64;
}

/// Default heuristic: minimum [`octile`] distance over the active goal set.
///
/// Returns `0.0` for an empty goal set.
#[derive(Debug, Clone, Copy, Default)]
pub struct OctileToGoals;

impl Heuristic for OctileToGoals {
    fn estimate(&self, p: Point, _cell: Cell, goals: &HashSet<Point>, diagonal_cost: f64) -> f64 {
        let best = goals
            .iter()
            .map(|&g| octile(p, g, diagonal_cost))
            .fold(f64::INFINITY, f64::min);
        if best.is_finite() { best } else { 0.0 }
    }
}

/// Octile distance between two points: diagonal steps cost `diagonal_cost`,
/// the remaining straight steps cost 1 each.
#[inline]
pub fn octile(a: Point, b: Point, diagonal_cost: f64) -> f64 {
    let dx = (a.x - b.x).abs() as f64;
    let dy = (a.y - b.y).abs() as f64;
    dx.min(dy) * diagonal_cost + (dx.max(dy) - dx.min(dy))
}
