//! Search driver and ray explorers.
//!
//! The driver pops jump points off the frontier and fans out into four
//! cardinal and four diagonal rays. Rays update the cost cache and parent
//! map as they go and enqueue any jump points they discover; goal hits are
//! recorded in the field's search state and checked by the driver, never
//! signalled through control flow.

use log::{debug, trace};

use jumpgrid_core::Point;

use crate::error::{FieldError, FieldResult};
use crate::field::{CellState, JpsField};
use crate::traits::{Heuristic, Walkability};

const CARDINALS: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, 1),
    Point::new(0, -1),
];

const DIAGONALS: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

impl<'g, W: Walkability, H: Heuristic> JpsField<'g, W, H> {
    /// Find the jump-point path from the start to the nearest reachable
    /// member of `goals`: every returned point lies on a straight cardinal
    /// or diagonal ray to the next, with both endpoints included.
    ///
    /// Fails with [`FieldError::NoGoal`] if no goal is walkable and
    /// [`FieldError::NoPath`] if the frontier empties before a goal is
    /// reached. Neither failure poisons the field: later queries with other
    /// goal sets may still succeed.
    ///
    /// Goal points must lie within the grid bounds; like the bordered-map
    /// contract on the grid itself, this is not checked here.
    pub fn find<I>(&mut self, goals: I) -> FieldResult<Vec<Point>>
    where
        I: IntoIterator<Item = Point>,
    {
        self.resolve_goals(goals)?;
        self.search()?;
        Ok(self.jump_point_path())
    }

    /// Resolve a goal set for a new query: reset search state, filter out
    /// non-walkable goals, and take the cached fast path when a goal has
    /// already been reached by an earlier query.
    pub(crate) fn resolve_goals<I>(&mut self, goals: I) -> FieldResult<()>
    where
        I: IntoIterator<Item = Point>,
    {
        self.goal = None;
        self.goal_cost = f64::INFINITY;

        let mut set = std::collections::HashSet::new();
        for g in goals {
            if self.classify(g) != CellState::Obstacle {
                set.insert(g);
            }
        }
        if set.is_empty() {
            return Err(FieldError::NoGoal);
        }
        self.goal_set = set;

        // A goal with a finite cached cost was reached by a previous query
        // from the same start; its recorded distance is already optimal.
        for &g in &self.goal_set {
            let cost = self.cached_cost(self.idx(g));
            if cost < self.goal_cost {
                self.goal = Some(g);
                self.goal_cost = cost;
            }
        }
        if self.goal_cost.is_infinite() {
            self.goal = None;
        } else {
            debug!(
                "goal {} served from cache at cost {}",
                self.goal.unwrap_or(Point::ZERO),
                self.goal_cost
            );
        }
        Ok(())
    }

    /// The main JPS loop.
    ///
    /// Pops the frontier and expands all eight rays from each popped jump
    /// point. A non-resumable search stops as soon as the popped cell's
    /// cached cost reaches the best goal cost (no cheaper path can remain);
    /// a resumable search keeps draining the frontier so the retained state
    /// stays valid for arbitrary later goal sets.
    pub(crate) fn search(&mut self) -> FieldResult<()> {
        if self.goal_cost.is_finite() {
            return Ok(());
        }
        debug!(
            "jps search from {} over {} goals (corner_cut={}, resumable={})",
            self.start(),
            self.goal_set.len(),
            self.corner_cut,
            self.resumable
        );

        let mut expanded = 0u64;
        while !self.frontier.is_empty() {
            let p = self.frontier.pop()?;
            expanded += 1;
            trace!("expand {} (g={})", p, self.cached_cost(self.idx(p)));
            for dir in CARDINALS {
                self.explore_cardinal(p, dir);
            }
            for dir in DIAGONALS {
                self.explore_diagonal(p, dir);
            }
            if !self.resumable && self.cached_cost(self.idx(p)) >= self.goal_cost {
                break;
            }
        }

        // The loop exits either through the cost bound (goal found) or by
        // exhausting the frontier.
        debug_assert!(self.goal.is_some() || self.frontier.is_empty());

        match self.goal {
            Some(goal) => {
                debug!(
                    "reached goal {} at cost {} after {} expansions",
                    goal, self.goal_cost, expanded
                );
                Ok(())
            }
            None => Err(FieldError::NoPath),
        }
    }

    /// Walk one axis-aligned ray from the jump point `origin`.
    ///
    /// Each stepped-to cell costs 1 more than the previous. The ray stops at
    /// obstacles, at cells already reached at least as cheaply, and (when
    /// not resumable) once it can no longer beat the best goal cost. Cells
    /// with a forced neighbour are enqueued as jump points.
    fn explore_cardinal(&mut self, origin: Point, dir: Point) {
        let mut cur = origin;
        let mut cost = self.cached_cost(self.idx(origin));

        loop {
            cur = cur + dir;
            cost += 1.0;

            if cost > self.goal_cost && !self.resumable {
                return;
            }
            if self.classify(cur) == CellState::Obstacle {
                return;
            }
            let i = self.idx(cur);
            if cost >= self.cached_cost(i) {
                return;
            }
            self.states[i] = CellState::Walkable(cost);
            self.parents[i] = Some(origin);

            if self.goal_set.contains(&cur) {
                if cost < self.goal_cost {
                    self.goal = Some(cur);
                    self.goal_cost = cost;
                }
                if !self.resumable {
                    return;
                }
            }

            // Forced-neighbour test. Without corner cutting the blocked cell
            // sits diagonally behind the step (an optimal detour must round
            // that corner through `cur`); with corner cutting it sits
            // directly beside it.
            let forced = if self.corner_cut {
                (dir.x == 0
                    && (self.is_obstacle(cur.shift(1, 0)) || self.is_obstacle(cur.shift(-1, 0))))
                    || (dir.y == 0
                        && (self.is_obstacle(cur.shift(0, 1))
                            || self.is_obstacle(cur.shift(0, -1))))
            } else {
                (dir.x == 0
                    && (self.is_obstacle(cur.shift(1, -dir.y))
                        || self.is_obstacle(cur.shift(-1, -dir.y))))
                    || (dir.y == 0
                        && (self.is_obstacle(cur.shift(-dir.x, 1))
                            || self.is_obstacle(cur.shift(-dir.x, -1))))
            };
            if forced {
                self.enqueue(cur);
            }
        }
    }

    /// Walk one diagonal ray from the jump point `origin`.
    ///
    /// Each step costs `diagonal_cost` and must pass the corner rule for the
    /// two orthogonal cells adjacent to the move: a fully blocked corner is
    /// always impassable, and with corner cutting disabled a single blocked
    /// side already stops the ray. Every legal step spawns the two component
    /// cardinal rays, which is how diagonal travel picks up forced
    /// neighbours reachable only perpendicular to it.
    fn explore_diagonal(&mut self, origin: Point, dir: Point) {
        let mut cur = origin;
        let mut cost = self.cached_cost(self.idx(origin));

        loop {
            cur = cur + dir;
            cost += self.diagonal_cost;

            if cost > self.goal_cost && !self.resumable {
                return;
            }
            if self.classify(cur) == CellState::Obstacle {
                return;
            }

            let side_x = self.is_obstacle(cur.shift(-dir.x, 0));
            let side_y = self.is_obstacle(cur.shift(0, -dir.y));
            if side_x && side_y {
                return;
            }
            if !self.corner_cut && (side_x || side_y) {
                return;
            }

            let i = self.idx(cur);
            if cost >= self.cached_cost(i) {
                return;
            }
            self.states[i] = CellState::Walkable(cost);
            self.parents[i] = Some(origin);

            if self.goal_set.contains(&cur) {
                if cost < self.goal_cost {
                    self.goal = Some(cur);
                    self.goal_cost = cost;
                }
                if !self.resumable {
                    return;
                }
            }

            // A cut corner forces paths through this cell, so it is a jump
            // point in its own right.
            if self.corner_cut && (side_x || side_y) {
                self.enqueue(cur);
            }

            self.explore_cardinal(cur, Point::new(dir.x, 0));
            self.explore_cardinal(cur, Point::new(0, dir.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldConfig;
    use jumpgrid_core::Grid;

    const EPS: f64 = 1e-9;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// 3×3 open interior with a two-cell wall at x=2, y=1..2.
    fn tiny() -> Grid {
        Grid::parse(
            "#####
             #.#.#
             #.#.#
             #...#
             #####",
        )
    }

    /// Interior with obstacles at (1,2) and (3,3); the only 3-step route
    /// from (1,3) to (3,2) turns twice.
    fn fork() -> Grid {
        Grid::parse(
            "#####
             #...#
             ##..#
             #..##
             #####",
        )
    }

    /// Diagonal squeeze: obstacles at (1,1) and (2,2) leave a staircase gap
    /// that only corner-cutting can thread.
    fn clip() -> Grid {
        Grid::parse(
            "#####
             ##..#
             #.#.#
             #...#
             #####",
        )
    }

    fn config(corner_cut: bool, diagonal_cost: f64) -> FieldConfig {
        FieldConfig {
            corner_cut,
            diagonal_cost,
            resumable: false,
        }
    }

    /// Sum of unit/diagonal step costs along a full path.
    fn step_cost_sum(path: &[Point], diagonal_cost: f64) -> f64 {
        path.windows(2)
            .map(|w| {
                let d = w[1] - w[0];
                assert!(d.x.abs() <= 1 && d.y.abs() <= 1 && (d.x != 0 || d.y != 0));
                if d.x != 0 && d.y != 0 { diagonal_cost } else { 1.0 }
            })
            .sum()
    }

    /// Sum of straight-ray costs along a jump-point path.
    fn ray_cost_sum(path: &[Point], diagonal_cost: f64) -> f64 {
        path.windows(2)
            .map(|w| {
                let d = w[1] - w[0];
                let steps = d.x.abs().max(d.y.abs()) as f64;
                if d.x != 0 && d.y != 0 {
                    assert_eq!(d.x.abs(), d.y.abs(), "jump segment is not straight");
                    steps * diagonal_cost
                } else {
                    steps
                }
            })
            .sum()
    }

    #[test]
    fn no_goal_when_all_goals_blocked() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        let err = field.find([pt(4, 4), pt(2, 1)]).unwrap_err();
        assert_eq!(err, FieldError::NoGoal);
        // The field stays usable afterwards.
        assert!(field.find([pt(1, 2)]).is_ok());
    }

    #[test]
    fn start_in_goal_set_is_a_zero_length_path() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        assert_eq!(field.find([pt(1, 1)]).unwrap(), vec![pt(1, 1)]);
        assert_eq!(field.find_full([pt(1, 1)]).unwrap(), vec![pt(1, 1)]);
        assert!(field.path_cost([pt(1, 1)]).unwrap().abs() < EPS);
    }

    #[test]
    fn tiny_without_corner_cut_takes_the_detour() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        assert!((field.path_cost([pt(3, 1)]).unwrap() - 6.0).abs() < EPS);
        assert_eq!(
            field.find([pt(3, 1)]).unwrap(),
            vec![pt(1, 1), pt(1, 3), pt(3, 3), pt(3, 1)]
        );
        assert_eq!(
            field.find_full([pt(3, 1)]).unwrap(),
            vec![
                pt(1, 1),
                pt(1, 2),
                pt(1, 3),
                pt(2, 3),
                pt(3, 3),
                pt(3, 2),
                pt(3, 1)
            ]
        );
    }

    #[test]
    fn tiny_with_corner_cut_squeezes_past_the_wall() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), config(true, 1.4)).unwrap();
        assert!((field.path_cost([pt(3, 1)]).unwrap() - (2.0 + 2.0 * 1.4)).abs() < EPS);
        let jp = field.find([pt(3, 1)]).unwrap();
        assert_eq!(jp, vec![pt(1, 1), pt(1, 2), pt(2, 3), pt(3, 2), pt(3, 1)]);
        // Every hop is already a single step, so the full path is identical.
        assert_eq!(field.find_full([pt(3, 1)]).unwrap(), jp);
    }

    #[test]
    fn fork_map_threads_the_turns() {
        let grid = fork();
        let mut field = JpsField::new(&grid, pt(1, 3), FieldConfig::default()).unwrap();
        assert_eq!(
            field.find_full([pt(3, 2)]).unwrap(),
            vec![pt(1, 3), pt(2, 3), pt(2, 2), pt(3, 2)]
        );
        assert!((field.path_cost([pt(3, 2)]).unwrap() - 3.0).abs() < EPS);
    }

    #[test]
    fn clip_map_corner_cut_tradeoff() {
        let grid = clip();

        let mut cut = JpsField::new(&grid, pt(2, 1), config(true, 1.5)).unwrap();
        assert!((cut.path_cost([pt(1, 2)]).unwrap() - 4.5).abs() < EPS);

        let mut no_cut = JpsField::new(&grid, pt(2, 1), config(false, 1.5)).unwrap();
        assert!((no_cut.path_cost([pt(1, 2)]).unwrap() - 6.0).abs() < EPS);
    }

    #[test]
    fn fully_blocked_corner_is_never_cut() {
        // The direct diagonal from (2,1) to (1,2) passes between two
        // obstacles; even with corner cutting the path must go the long way.
        let grid = clip();
        let mut field = JpsField::new(&grid, pt(2, 1), config(true, 1.0)).unwrap();
        let full = field.find_full([pt(1, 2)]).unwrap();
        assert!(full.len() > 2);
        assert!(!full.contains(&pt(1, 1)));
        assert!(!full.contains(&pt(2, 2)));
    }

    #[test]
    fn path_endpoints_and_cost_are_consistent() {
        let grid = tiny();
        for corner_cut in [false, true] {
            let mut field = JpsField::new(&grid, pt(1, 1), config(corner_cut, 1.4)).unwrap();
            let goals = [pt(3, 1), pt(3, 2)];
            let cost = field.path_cost(goals).unwrap();
            let full = field.find_full(goals).unwrap();
            let jp = field.find(goals).unwrap();

            assert_eq!(full.first(), Some(&pt(1, 1)));
            assert_eq!(jp.first(), Some(&pt(1, 1)));
            assert!(goals.contains(full.last().unwrap()));
            assert_eq!(jp.last(), full.last());
            assert!((step_cost_sum(&full, 1.4) - cost).abs() < EPS);
            assert!((ray_cost_sum(&jp, 1.4) - cost).abs() < EPS);
        }
    }

    #[test]
    fn multi_goal_picks_the_nearest() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        let cost = field.path_cost([pt(3, 1), pt(1, 3)]).unwrap();
        assert!((cost - 2.0).abs() < EPS);
        assert_eq!(field.best_goal(), Some(pt(1, 3)));
    }

    #[test]
    fn no_path_to_a_walled_off_goal() {
        let grid = Grid::parse(
            "#####
             #.#.#
             #.#.#
             #####",
        );
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        assert_eq!(field.find([pt(3, 1)]).unwrap_err(), FieldError::NoPath);
        // A reachable goal set still works on the same field.
        assert!((field.path_cost([pt(1, 2)]).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn resumable_queries_reuse_cached_costs() {
        let grid = tiny();
        let config = FieldConfig {
            resumable: true,
            ..FieldConfig::default()
        };
        let mut field = JpsField::new(&grid, pt(1, 1), config).unwrap();

        assert!((field.path_cost([pt(1, 3)]).unwrap() - 2.0).abs() < EPS);
        // The first resumable query drains the frontier, so the two later
        // goals are answered from the cache alone.
        assert!(field.frontier.is_empty());
        assert_eq!(
            field.find([pt(3, 3)]).unwrap(),
            vec![pt(1, 1), pt(1, 3), pt(3, 3)]
        );
        assert!((field.path_cost([pt(3, 3)]).unwrap() - 4.0).abs() < EPS);
        assert!((field.path_cost([pt(3, 1)]).unwrap() - 6.0).abs() < EPS);
    }

    #[test]
    fn non_resumable_field_answers_repeat_queries() {
        let grid = tiny();
        let mut field = JpsField::new(&grid, pt(1, 1), FieldConfig::default()).unwrap();
        assert!((field.path_cost([pt(3, 1)]).unwrap() - 6.0).abs() < EPS);
        // Goals already reached by the first query come straight from the
        // cache; the stale best-goal state does not leak between queries.
        assert!((field.path_cost([pt(1, 3)]).unwrap() - 2.0).abs() < EPS);
        assert_eq!(field.best_goal(), Some(pt(1, 3)));
    }

    #[test]
    fn custom_walkability_predicate() {
        // Ignore the raw cell values entirely: every interior coordinate is
        // walkable, including the wall cells of the tiny map.
        let grid = tiny();
        let mut field = JpsField::with_strategies(
            &grid,
            pt(1, 1),
            FieldConfig::default(),
            |p: Point, _cell: jumpgrid_core::Cell| (1..=3).contains(&p.x) && (1..=3).contains(&p.y),
            crate::traits::OctileToGoals,
        )
        .unwrap();
        // With the wall walkable the straight route is open.
        assert!((field.path_cost([pt(3, 1)]).unwrap() - 2.0).abs() < EPS);
    }
}
