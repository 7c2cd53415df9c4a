//! Search error types.

use thiserror::Error;

use jumpgrid_core::Point;

/// Errors produced by a [`JpsField`](crate::JpsField).
///
/// None of these are retried internally; callers decide whether to query
/// again with different parameters. Only [`BlockedStart`](Self::BlockedStart)
/// and [`BadDiagonalCost`](Self::BadDiagonalCost) are fatal to the field —
/// after `NoGoal` or `NoPath` the field stays usable for further queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("start cell {0} is not walkable")]
    BlockedStart(Point),

    #[error("diagonal cost {0} outside the valid range [1, 2]")]
    BadDiagonalCost(f64),

    #[error("no walkable cell in the goal set")]
    NoGoal,

    #[error("frontier exhausted without reaching a goal")]
    NoPath,

    /// The search driver popped its queue without checking for emptiness
    /// first. Seeing this from a query is a bug in this crate, not in the
    /// caller's map or goal set.
    #[error("frontier popped while empty")]
    ExhaustedFrontier,
}

pub type FieldResult<T> = Result<T, FieldError>;
