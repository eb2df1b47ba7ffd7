//! Working-pool helpers over a validated unit catalog.

use std::collections::BTreeSet;

use crate::traits::Site;
use crate::unit::Coordinate;

/// Distinct group keys, sorted.
pub fn groups<S: Site>(units: &[S]) -> Vec<String> {
    units
        .iter()
        .map(|unit| unit.group())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Units of `group` whose id contains `id_query` (case-insensitive), sorted
/// by weight descending. Ties keep catalog order.
pub fn working_pool<'a, S: Site>(units: &'a [S], group: &str, id_query: Option<&str>) -> Vec<&'a S> {
    let query = id_query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut pool: Vec<&S> = units
        .iter()
        .filter(|unit| unit.group() == group)
        .filter(|unit| {
            query
                .as_deref()
                .is_none_or(|q| unit.id().to_lowercase().contains(q))
        })
        .collect();

    pool.sort_by(|a, b| b.weight().total_cmp(&a.weight()));
    pool
}

/// Mean position of the given units; the default depot for a group.
pub fn centroid<'a, S, I>(units: I) -> Option<Coordinate>
where
    S: Site + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let (count, lat, lng) = units.into_iter().fold((0usize, 0.0, 0.0), |(n, lat, lng), unit| {
        let at = unit.location();
        (n + 1, lat + at.lat, lng + at.lng)
    });

    (count > 0).then(|| Coordinate::new(lat / count as f64, lng / count as f64))
}
