//! Candidate selection: reduce a working pool to a bounded set of units.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::haversine::haversine_km;
use crate::traits::Site;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Highest weights first.
    Priority { count: usize },
    /// Nearest units around the densest point of the pool.
    Density { count: usize, radius_km: f64 },
}

impl Default for SelectionStrategy {
    fn default() -> Self {
        SelectionStrategy::Priority { count: 10 }
    }
}

impl SelectionStrategy {
    pub fn count(&self) -> usize {
        match *self {
            SelectionStrategy::Priority { count } | SelectionStrategy::Density { count, .. } => count,
        }
    }
}

/// Picks at most `strategy.count()` units from `pool`.
///
/// Never returns more units than the pool holds. An empty pool is reported as
/// [`PlanError::EmptySelection`].
pub fn select<'a, S>(pool: &[&'a S], strategy: &SelectionStrategy) -> Result<Vec<&'a S>, PlanError>
where
    S: Site + Sync,
{
    if pool.is_empty() {
        return Err(PlanError::EmptySelection);
    }

    let selected = match *strategy {
        SelectionStrategy::Priority { count } => by_priority(pool, count),
        SelectionStrategy::Density { count, radius_km } => by_density(pool, count, radius_km),
    };
    debug!(pool = pool.len(), selected = selected.len(), ?strategy, "selection done");
    Ok(selected)
}

fn by_priority<'a, S: Site>(pool: &[&'a S], count: usize) -> Vec<&'a S> {
    let mut ranked = pool.to_vec();
    ranked.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
    ranked.truncate(count);
    ranked
}

fn by_density<'a, S: Site + Sync>(pool: &[&'a S], count: usize, radius_km: f64) -> Vec<&'a S> {
    let center = pool[densest_index(pool, radius_km)].location();

    let mut ranked: Vec<(usize, f64)> = pool
        .iter()
        .enumerate()
        .map(|(idx, unit)| (idx, haversine_km(center, unit.location())))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    ranked
        .into_iter()
        .take(count.min(pool.len()))
        .map(|(idx, _)| pool[idx])
        .collect()
}

/// Index of the unit with the most neighbors within `radius_km`; the first
/// one wins ties. A non-positive radius leaves every unit isolated.
fn densest_index<S: Site + Sync>(pool: &[&S], radius_km: f64) -> usize {
    if radius_km.is_nan() || radius_km <= 0.0 {
        return 0;
    }

    let counts: Vec<usize> = pool
        .par_iter()
        .enumerate()
        .map(|(i, unit)| {
            let at = unit.location();
            pool.iter()
                .enumerate()
                .filter(|&(j, other)| j != i && haversine_km(at, other.location()) <= radius_km)
                .count()
        })
        .collect();

    let mut best = 0;
    for (idx, &neighbors) in counts.iter().enumerate().skip(1) {
        if neighbors > counts[best] {
            best = idx;
        }
    }
    best
}
