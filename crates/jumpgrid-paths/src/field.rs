//! Field state: lazy cell classification, cost cache, and parent map.

use std::collections::HashSet;
use std::fmt;

use jumpgrid_core::{Grid, Point};

use crate::error::{FieldError, FieldResult};
use crate::frontier::Frontier;
use crate::traits::{Heuristic, OctileToGoals, OpenIsWalkable, Walkability};

/// Search configuration for a [`JpsField`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldConfig {
    /// Permit diagonal movement past a single blocked corner cell.
    pub corner_cut: bool,
    /// Cost of one diagonal step. Must lie in `[1.0, 2.0]`.
    pub diagonal_cost: f64,
    /// Retain cost, parent, and frontier state across queries so repeated
    /// goal lookups from the same start reuse earlier work. Trades memory
    /// and per-query work for amortised latency.
    pub resumable: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            corner_cut: false,
            diagonal_cost: std::f64::consts::SQRT_2,
            resumable: false,
        }
    }
}

/// Cached classification of one grid cell.
///
/// `Obstacle` is terminal: once assigned it never changes. A `Walkable`
/// cell's cost starts at `+inf` and only ever decreases as cheaper rays
/// reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum CellState {
    Unvisited,
    Obstacle,
    Walkable(f64),
}

/// An incremental Jump Point Search engine over one borrowed grid.
///
/// A field is bound to a single start coordinate at construction and then
/// queried any number of times with goal sets via
/// [`find`](Self::find) / [`find_full`](Self::find_full) /
/// [`path_cost`](Self::path_cost).
///
/// The raw grid is only ever borrowed; all mutable search state (the cost
/// cache, parent map, and frontier) is owned by the field. A field is
/// single-threaded: for concurrent queries give each thread its own
/// instance.
pub struct JpsField<'g, W = OpenIsWalkable, H = OctileToGoals> {
    pub(crate) grid: &'g Grid,
    pub(crate) states: Vec<CellState>,
    pub(crate) parents: Vec<Option<Point>>,
    pub(crate) frontier: Frontier,
    pub(crate) goal_set: HashSet<Point>,
    pub(crate) goal: Option<Point>,
    pub(crate) goal_cost: f64,
    start: Point,
    pub(crate) corner_cut: bool,
    pub(crate) diagonal_cost: f64,
    pub(crate) resumable: bool,
    walkable: W,
    pub(crate) heuristic: H,
    width: i32,
}

// Derive would demand `W: Debug` and `H: Debug` and dump the whole cost
// cache; print the configuration instead.
impl<W, H> fmt::Debug for JpsField<'_, W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JpsField")
            .field("start", &self.start)
            .field("bounds", &self.grid.bounds())
            .field("corner_cut", &self.corner_cut)
            .field("diagonal_cost", &self.diagonal_cost)
            .field("resumable", &self.resumable)
            .finish_non_exhaustive()
    }
}

impl<'g> JpsField<'g> {
    /// Create a field with the default strategies ([`OpenIsWalkable`],
    /// [`OctileToGoals`]).
    ///
    /// Fails with [`FieldError::BlockedStart`] if `start` is not walkable
    /// and [`FieldError::BadDiagonalCost`] if the configured diagonal cost
    /// is outside `[1, 2]`.
    pub fn new(grid: &'g Grid, start: Point, config: FieldConfig) -> FieldResult<Self> {
        Self::with_strategies(grid, start, config, OpenIsWalkable, OctileToGoals)
    }
}

impl<'g, W: Walkability, H: Heuristic> JpsField<'g, W, H> {
    /// Create a field with custom walkability and heuristic strategies.
    pub fn with_strategies(
        grid: &'g Grid,
        start: Point,
        config: FieldConfig,
        walkable: W,
        heuristic: H,
    ) -> FieldResult<Self> {
        if !(1.0..=2.0).contains(&config.diagonal_cost) {
            return Err(FieldError::BadDiagonalCost(config.diagonal_cost));
        }
        let len = grid.bounds().len();
        let mut field = Self {
            grid,
            states: vec![CellState::Unvisited; len],
            parents: vec![None; len],
            frontier: Frontier::new(),
            goal_set: HashSet::new(),
            goal: None,
            goal_cost: f64::INFINITY,
            start,
            corner_cut: config.corner_cut,
            diagonal_cost: config.diagonal_cost,
            resumable: config.resumable,
            walkable,
            heuristic,
            width: grid.width(),
        };
        if field.classify(start) == CellState::Obstacle {
            return Err(FieldError::BlockedStart(start));
        }
        let si = field.idx(start);
        field.states[si] = CellState::Walkable(0.0);
        field.enqueue(start);
        Ok(field)
    }

    /// The configured start coordinate.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The best goal found by the most recent query, if any.
    pub fn best_goal(&self) -> Option<Point> {
        self.goal
    }

    // -----------------------------------------------------------------------
    // Cost cache
    // -----------------------------------------------------------------------

    /// Flat index of an in-bounds point.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// Classify the cell at `p`, caching the result. The walkability
    /// predicate runs at most once per coordinate.
    ///
    /// Callers must guarantee `p` is in bounds; the search relies on the
    /// grid border being non-walkable rather than on bounds checks.
    pub(crate) fn classify(&mut self, p: Point) -> CellState {
        let i = self.idx(p);
        if self.states[i] == CellState::Unvisited {
            self.states[i] = if self.walkable.walkable(p, self.grid.get(p)) {
                CellState::Walkable(f64::INFINITY)
            } else {
                CellState::Obstacle
            };
        }
        self.states[i]
    }

    /// Whether the cell at `p` classifies as an obstacle.
    #[inline]
    pub(crate) fn is_obstacle(&mut self, p: Point) -> bool {
        self.classify(p) == CellState::Obstacle
    }

    /// Best known distance from start to the cell at flat index `i`.
    /// `+inf` for cells no ray has reached.
    #[inline]
    pub(crate) fn cached_cost(&self, i: usize) -> f64 {
        match self.states[i] {
            CellState::Walkable(c) => c,
            _ => f64::INFINITY,
        }
    }

    /// Queue `p` as a jump point at priority `g + h` against the active
    /// goal set.
    pub(crate) fn enqueue(&mut self, p: Point) {
        let g = self.cached_cost(self.idx(p));
        let h = self
            .heuristic
            .estimate(p, self.grid.get(p), &self.goal_set, self.diagonal_cost);
        self.frontier.push(p, g + h);
    }
}
