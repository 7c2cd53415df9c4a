//! Path reconstruction: parent back-walking and straight-line interpolation.

use jumpgrid_core::Point;

use crate::error::FieldResult;
use crate::field::JpsField;
use crate::traits::{Heuristic, Walkability};

impl<'g, W: Walkability, H: Heuristic> JpsField<'g, W, H> {
    /// Find the unit-step path to the nearest reachable goal: the
    /// jump-point path of [`find`](Self::find) with every straight segment
    /// expanded into single cardinal or diagonal steps.
    pub fn find_full<I>(&mut self, goals: I) -> FieldResult<Vec<Point>>
    where
        I: IntoIterator<Item = Point>,
    {
        let jump_points = self.find(goals)?;
        Ok(interpolate(&jump_points))
    }

    /// Total cost of the best path to `goals`: unit cost per cardinal step
    /// plus the configured diagonal cost per diagonal step.
    pub fn path_cost<I>(&mut self, goals: I) -> FieldResult<f64>
    where
        I: IntoIterator<Item = Point>,
    {
        self.resolve_goals(goals)?;
        self.search()?;
        Ok(self.goal_cost)
    }

    /// Walk parent back-references from the recorded best goal to the
    /// start, then reverse.
    ///
    /// Only called after a successful search, which guarantees the goal is
    /// set and the parent chain terminates at the start (each parent was
    /// assigned from a strictly earlier expansion, so there is no cycle).
    pub(crate) fn jump_point_path(&self) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = self.goal;
        while let Some(p) = cur {
            path.push(p);
            cur = self.parents[self.idx(p)];
        }
        path.reverse();
        path
    }
}

/// Expand a jump-point path into a step-by-step path.
///
/// Consecutive jump points always lie on a single straight cardinal or
/// diagonal ray, so each segment is walked with one fixed step vector; the
/// final point is appended once at the end.
pub(crate) fn interpolate(jump_points: &[Point]) -> Vec<Point> {
    if jump_points.len() <= 1 {
        return jump_points.to_vec();
    }
    let mut result = Vec::new();
    for window in jump_points.windows(2) {
        let (a, b) = (window[0], window[1]);
        let step = a.dir_to(b);
        let mut cur = a;
        while cur != b {
            result.push(cur);
            cur = cur + step;
        }
    }
    result.push(jump_points[jump_points.len() - 1]);
    result
}
