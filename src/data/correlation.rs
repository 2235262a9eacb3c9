use indexmap::IndexSet;

use super::model::CorrelationMap;

/// Heatmap bound used when the caller does not pick one.
pub const DEFAULT_MAX_COLS: usize = 12;

// ---------------------------------------------------------------------------
// SymmetricPairs – total, order-insensitive view over a sparse pairwise map
// ---------------------------------------------------------------------------

/// Wraps a possibly one-sided correlation map behind one total lookup.
///
/// Reads `(a, b)`, falls back to `(b, a)`, and defaults to `0.0`. When the map
/// holds both orderings with different values the forward one wins.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricPairs<'a> {
    map: &'a CorrelationMap,
}

impl<'a> SymmetricPairs<'a> {
    pub fn new(map: &'a CorrelationMap) -> Self {
        Self { map }
    }

    pub fn get(&self, a: &str, b: &str) -> f64 {
        self.directed(a, b)
            .or_else(|| self.directed(b, a))
            .unwrap_or(0.0)
    }

    fn directed(&self, row: &str, col: &str) -> Option<f64> {
        self.map.get(row)?.get(col).copied()
    }

    /// Every key mentioned anywhere, outer keys first, then inner keys, each
    /// at its first encounter.
    pub fn key_closure(&self) -> Vec<&'a str> {
        let mut keys: IndexSet<&'a str> = self.map.keys().map(String::as_str).collect();
        for inner in self.map.values() {
            keys.extend(inner.keys().map(String::as_str));
        }
        keys.into_iter().collect()
    }

    /// Sum of `|get(key, other)|` over every other candidate.
    pub fn connectedness(&self, key: &str, candidates: &[&str]) -> f64 {
        candidates
            .iter()
            .filter(|other| **other != key)
            .map(|other| self.get(key, other).abs())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// ReducedMatrix – dense symmetric matrix ready for the heatmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReducedMatrix {
    /// Retained columns, most connected first.
    pub keys: Vec<String>,
    /// `keys.len() × keys.len()`, symmetric, diagonal `1.0`.
    pub cells: Vec<Vec<f64>>,
}

impl ReducedMatrix {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// An empty matrix means "nothing to render".
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Reduce a sparse correlation map to at most `max_cols` columns ranked by
/// connectedness.
///
/// Ties keep first-encounter order. Input values are not clamped.
pub fn reduce(correlations: &CorrelationMap, max_cols: usize) -> ReducedMatrix {
    let pairs = SymmetricPairs::new(correlations);
    let candidates = pairs.key_closure();
    if candidates.is_empty() {
        return ReducedMatrix::default();
    }

    let mut ranked: Vec<(&str, f64)> = candidates
        .iter()
        .map(|&k| (k, pairs.connectedness(k, &candidates)))
        .collect();
    // `sort_by` is stable, equal scores stay in encounter order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(max_cols);

    let keys: Vec<String> = ranked.iter().map(|(k, _)| k.to_string()).collect();
    // Each pair is read once, upper triangle first, and mirrored, so a map
    // holding both (a, b) and (b, a) still yields a symmetric matrix.
    let n = keys.len();
    let mut cells = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let v = pairs.get(&keys[i], &keys[j]);
            cells[i][j] = v;
            cells[j][i] = v;
        }
    }

    log::debug!(
        "reduced {} correlation keys to {} (max {max_cols})",
        candidates.len(),
        keys.len()
    );

    ReducedMatrix { keys, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn corr(entries: &[(&str, &[(&str, f64)])]) -> CorrelationMap {
        entries
            .iter()
            .map(|(k, inner)| {
                let inner: IndexMap<String, f64> =
                    inner.iter().map(|(j, v)| (j.to_string(), *v)).collect();
                (k.to_string(), inner)
            })
            .collect()
    }

    #[test]
    fn lookup_falls_back_to_reverse_then_zero() {
        let map = corr(&[("A", &[("B", 0.9)]), ("C", &[("A", 0.1)])]);
        let pairs = SymmetricPairs::new(&map);
        assert_eq!(pairs.get("A", "B"), 0.9);
        assert_eq!(pairs.get("B", "A"), 0.9);
        assert_eq!(pairs.get("A", "C"), 0.1);
        assert_eq!(pairs.get("B", "C"), 0.0);
        assert_eq!(pairs.get("X", "Y"), 0.0);
    }

    #[test]
    fn forward_entry_wins_over_reverse() {
        let map = corr(&[("A", &[("B", 0.5)]), ("B", &[("A", -0.2)])]);
        let pairs = SymmetricPairs::new(&map);
        assert_eq!(pairs.get("A", "B"), 0.5);
        assert_eq!(pairs.get("B", "A"), -0.2);
    }

    #[test]
    fn conflicting_entries_still_reduce_symmetrically() {
        let map = corr(&[("A", &[("B", 0.5)]), ("B", &[("A", -0.2)])]);
        let m = reduce(&map, DEFAULT_MAX_COLS);
        assert_eq!(m.keys, vec!["A", "B"]);
        assert_eq!(m.cells, vec![vec![1.0, 0.5], vec![0.5, 1.0]]);

        let map = corr(&[("e", &[("c", 0.0)]), ("c", &[("e", -0.375)])]);
        let m = reduce(&map, 2);
        assert_eq!(m.cells[0][1], m.cells[1][0]);
    }

    #[test]
    fn closure_lists_outer_then_inner_keys() {
        let map = corr(&[("A", &[("B", 0.9)]), ("C", &[("A", 0.1), ("D", 0.3)])]);
        assert_eq!(SymmetricPairs::new(&map).key_closure(), vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn worked_example_keeps_the_two_most_connected() {
        let map = corr(&[("A", &[("B", 0.9)]), ("C", &[("A", 0.1)])]);
        let pairs = SymmetricPairs::new(&map);
        let keys = pairs.key_closure();
        assert!((pairs.connectedness("A", &keys) - 1.0).abs() < 1e-12);
        assert!((pairs.connectedness("B", &keys) - 0.9).abs() < 1e-12);
        assert!((pairs.connectedness("C", &keys) - 0.1).abs() < 1e-12);

        let m = reduce(&map, 2);
        assert_eq!(m.keys, vec!["A", "B"]);
        assert_eq!(m.cells, vec![vec![1.0, 0.9], vec![0.9, 1.0]]);
    }

    #[test]
    fn empty_map_reduces_to_empty_matrix() {
        let m = reduce(&CorrelationMap::new(), DEFAULT_MAX_COLS);
        assert!(m.is_empty());
        assert!(m.cells.is_empty());
    }

    #[test]
    fn outer_keys_without_entries_still_count() {
        let map = corr(&[("A", &[]), ("B", &[])]);
        let m = reduce(&map, DEFAULT_MAX_COLS);
        assert_eq!(m.keys, vec!["A", "B"]);
        assert_eq!(m.cells, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let map = corr(&[("A", &[("B", 0.5)]), ("C", &[("D", -0.5)])]);
        let m = reduce(&map, 3);
        assert_eq!(m.keys, vec!["A", "C", "B"]);
    }

    #[test]
    fn zero_max_cols_gives_empty_keys() {
        let map = corr(&[("A", &[("B", 0.5)])]);
        let m = reduce(&map, 0);
        assert!(m.keys.is_empty());
        assert!(m.cells.is_empty());
    }

    #[test]
    fn diagonal_is_forced_and_values_are_not_clamped() {
        let map = corr(&[("A", &[("A", 0.3), ("B", 1.7)])]);
        let m = reduce(&map, DEFAULT_MAX_COLS);
        assert_eq!(m.keys, vec!["A", "B"]);
        assert_eq!(m.cells[0][0], 1.0);
        assert_eq!(m.cells[0][1], 1.7);
        assert_eq!(m.cells[1][0], 1.7);
    }

    #[test]
    fn zero_score_keys_are_kept_when_within_bound() {
        let map = corr(&[("A", &[("B", 0.4), ("Z", 0.0)])]);
        let m = reduce(&map, 3);
        assert_eq!(m.keys, vec!["A", "B", "Z"]);
    }
}
