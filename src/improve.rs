//! Local search over a single tour: 2-opt segment reversal and Or-opt
//! single-node relocation.
//!
//! Both passes are deterministic hill climbers. Position 0 is never moved and
//! a move is only kept if it shortens the tour by more than the tolerance,
//! so the tour length never increases. Moves are applied in place and undone
//! when rejected; only the edges touched by a move are re-evaluated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matrix::CostMatrix;
use crate::tour::Tour;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImproveOptions {
    /// Maximum full sweeps per pass.
    pub max_iterations: usize,
    /// Minimum gain for a move to count as an improvement.
    pub tolerance: f64,
}

impl Default for ImproveOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-9,
        }
    }
}

/// Runs 2-opt, then Or-opt. `closed` adds the edge from the last stop back
/// to the first to the objective.
pub fn improve(mut tour: Tour, matrix: &CostMatrix, closed: bool, options: &ImproveOptions) -> Tour {
    let before = tour.length(matrix, closed);
    two_opt(&mut tour, matrix, closed, options);
    or_opt(&mut tour, matrix, closed, options);
    let after = tour.length(matrix, closed);
    debug!(before, after, closed, stops = tour.len(), "local search finished");
    tour
}

/// Sum of the edges leaving positions `lo..=hi`. The edge leaving the last
/// position exists only for closed tours and returns to position 0.
fn edges_cost(order: &[usize], matrix: &CostMatrix, lo: usize, hi: usize, closed: bool) -> f64 {
    let last = order.len() - 1;
    (lo..=hi)
        .map(|p| {
            if p < last {
                matrix.get(order[p], order[p + 1])
            } else if closed {
                matrix.get(order[last], order[0])
            } else {
                0.0
            }
        })
        .sum()
}

#[inline]
fn improves(candidate: f64, current: f64, tolerance: f64) -> bool {
    candidate + tolerance < current
}

/// Reverses `order[i..=j]` for `1 <= i < j`. Returns true if any reversal
/// was kept.
pub fn two_opt(tour: &mut Tour, matrix: &CostMatrix, closed: bool, options: &ImproveOptions) -> bool {
    let order = tour.order_mut();
    let n = order.len();
    if n < 3 {
        return false;
    }

    let mut any = false;
    let mut sweeps = 0;
    while sweeps < options.max_iterations {
        sweeps += 1;
        let mut improved = false;

        for i in 1..n - 1 {
            for j in i + 1..n {
                let current = edges_cost(order, matrix, i - 1, j, closed);
                order[i..=j].reverse();
                let candidate = edges_cost(order, matrix, i - 1, j, closed);

                if improves(candidate, current, options.tolerance) {
                    improved = true;
                } else {
                    order[i..=j].reverse();
                }
            }
        }

        any |= improved;
        if !improved {
            break;
        }
    }

    debug!(sweeps, improved = any, "2-opt pass");
    any
}

/// Moves one non-start node to another position. Returns true if any
/// relocation was kept.
pub fn or_opt(tour: &mut Tour, matrix: &CostMatrix, closed: bool, options: &ImproveOptions) -> bool {
    let order = tour.order_mut();
    let n = order.len();
    if n < 3 {
        return false;
    }

    let mut any = false;
    let mut sweeps = 0;
    while sweeps < options.max_iterations {
        sweeps += 1;
        let mut improved = false;

        for from in 1..n {
            for to in 1..n {
                if to == from {
                    continue;
                }
                let (lo, hi) = (from.min(to), from.max(to));
                let current = edges_cost(order, matrix, lo - 1, hi, closed);
                relocate(order, from, to);
                let candidate = edges_cost(order, matrix, lo - 1, hi, closed);

                if improves(candidate, current, options.tolerance) {
                    improved = true;
                } else {
                    relocate(order, to, from);
                }
            }
        }

        any |= improved;
        if !improved {
            break;
        }
    }

    debug!(sweeps, improved = any, "or-opt pass");
    any
}

/// Removes the element at `from` and reinserts it so it ends up at `to`.
fn relocate(order: &mut [usize], from: usize, to: usize) {
    if from < to {
        order[from..=to].rotate_left(1);
    } else {
        order[to..=from].rotate_right(1);
    }
}
