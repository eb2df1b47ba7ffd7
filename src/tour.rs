//! Visiting orders and the nearest-neighbor constructor.

use serde::{Deserialize, Serialize};

use crate::matrix::CostMatrix;

/// A visiting order over point indices; the first element is the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub(crate) fn order_mut(&mut self) -> &mut [usize] {
        &mut self.order
    }

    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn length(&self, matrix: &CostMatrix, closed: bool) -> f64 {
        matrix.route_length(&self.order, closed)
    }

    /// True when the order visits every index in `0..size` exactly once and
    /// starts at `start`.
    pub fn is_permutation_from(&self, size: usize, start: usize) -> bool {
        if self.order.len() != size || self.order.first() != Some(&start) {
            return false;
        }
        let mut seen = vec![false; size];
        self.order.iter().all(|&idx| idx < size && !std::mem::replace(&mut seen[idx], true))
    }
}

/// Greedy walk from `start`, always moving to the cheapest unvisited index.
///
/// Equal costs go to the lowest index. Unreachable (infinite) steps are only
/// taken when nothing reachable remains. A `start` outside the matrix gives an
/// empty tour.
pub fn nearest_neighbor(matrix: &CostMatrix, start: usize) -> Tour {
    let n = matrix.len();
    if start >= n {
        return Tour::new(Vec::new());
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = start;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, &cost) in matrix.row(current).iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((candidate, cost));
            }
        }

        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Tour::new(order)
}
