use rand_chacha::{
    ChaCha8Rng,
    rand_core::{RngCore, SeedableRng},
};

use crate::{
    common::{pagination::Pagination, random_order::RandomOrderToken},
    filter::RowFilter,
};

/// Regenerates the permutation a token stands for.
/// ---
/// Every index draws its swap partner from the *whole* range rather than
/// the remaining suffix. The result is not a uniform shuffle, but it is
/// exactly reproducible from the seed, which is all tokens rely on.
///
/// ChaCha8 keystreams are fixed by the algorithm and the index mapping is
/// local, so the permutation does not depend on the `rand` release.
pub fn shuffle(token: &RandomOrderToken) -> Vec<usize> {
    let item_count = token.item_count() as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(token.seed()));
    let mut entries: Vec<usize> = (0..item_count).collect();

    for i in 0..item_count {
        let j = draw_index(&mut rng, item_count);
        entries.swap(i, j);
    }

    entries
}

/// Maps one 64-bit draw onto `[0, bound)` by widening multiply.
fn draw_index(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    ((u128::from(rng.next_u64()) * bound as u128) >> 64) as usize
}

/// Slices `pagination` out of the shuffled view of `rows`.
/// ---
/// `rows` must be the current filtered set, in the same natural order used
/// to size the token. The walk stops at the token's item count and at the
/// live row count, whichever is smaller. Positions pointing past the end of
/// `rows` and rows that no longer pass `filter` are skipped, so short pages
/// are expected when the data drifted.
pub fn page<R, F>(
    pagination: &Pagination,
    token: &RandomOrderToken,
    rows: &[R],
    filter: &F,
) -> Vec<R>
where
    R: Clone,
    F: RowFilter<R> + ?Sized,
{
    let end = pagination
        .end()
        .min(token.item_count())
        .min(rows.len() as u64);
    if pagination.offset >= end {
        return Vec::new();
    }

    let permutation = shuffle(token);

    (pagination.offset..end)
        .filter_map(|i| rows.get(permutation[i as usize]))
        .filter(|row| filter.matches(row))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct AcceptAll;

    impl<R> RowFilter<R> for AcceptAll {
        fn matches(&self, _row: &R) -> bool {
            true
        }
    }

    struct Even;

    impl RowFilter<u32> for Even {
        fn matches(&self, row: &u32) -> bool {
            row % 2 == 0
        }
    }

    fn token(item_count: u64, seed: u32) -> RandomOrderToken {
        RandomOrderToken::new(1_700_000_100, item_count, seed).unwrap()
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let t = token(200, 42);
        assert_eq!(shuffle(&t), shuffle(&t));
        assert_eq!(shuffle(&t), shuffle(&token(200, 42)));
    }

    #[test]
    fn test_shuffle_known_permutations() {
        assert_eq!(shuffle(&token(4, 7)), vec![1, 0, 3, 2]);
        assert_eq!(shuffle(&token(10, 7)), vec![4, 0, 7, 3, 6, 2, 1, 8, 5, 9]);
        assert_eq!(shuffle(&token(10, 5)), vec![2, 7, 5, 0, 4, 3, 9, 1, 6, 8]);
        assert!(shuffle(&token(0, 7)).is_empty());
    }

    #[test]
    fn test_shuffle_ignores_time() {
        let later = RandomOrderToken::new(1_700_003_700, 10, 7).unwrap();
        assert_eq!(shuffle(&later), shuffle(&token(10, 7)));
    }

    #[test]
    fn test_shuffle_is_bijection() {
        for item_count in [0_u64, 1, 2, 3, 17, 256] {
            for seed in [0, 7, 63] {
                let mut permutation = shuffle(&token(item_count, seed));
                permutation.sort_unstable();
                let expected: Vec<usize> = (0..item_count as usize).collect();
                assert_eq!(permutation, expected);
            }
        }
    }

    #[test]
    fn test_two_pages_cover_all_rows() {
        let t = token(4, 7);
        let rows = vec!["a", "b", "c", "d"];

        let first = page(&Pagination::new(0, 2), &t, &rows, &AcceptAll);
        let second = page(&Pagination::new(2, 3), &t, &rows, &AcceptAll);

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);

        let seen: HashSet<_> = first.iter().chain(second.iter()).copied().collect();
        assert_eq!(seen, rows.into_iter().collect());
    }

    #[test]
    fn test_page_follows_permutation() {
        let t = token(6, 11);
        let rows: Vec<u32> = (0..6).collect();
        let permutation = shuffle(&t);

        let slice = page(&Pagination::new(1, 3), &t, &rows, &AcceptAll);
        let expected: Vec<u32> = permutation[1..4].iter().map(|&p| p as u32).collect();
        assert_eq!(slice, expected);
    }

    #[test]
    fn test_drift_past_live_rows_is_empty() {
        let t = token(10, 5);
        let rows: Vec<u32> = (0..6).collect();

        assert!(page(&Pagination::new(8, 2), &t, &rows, &AcceptAll).is_empty());

        let none: Vec<u32> = Vec::new();
        assert!(page(&Pagination::new(8, 2), &t, &none, &AcceptAll).is_empty());
    }

    #[test]
    fn test_drift_skips_missing_positions() {
        let t = token(10, 5);
        let rows: Vec<u32> = (0..6).collect();
        let permutation = shuffle(&t);

        let slice = page(&Pagination::new(0, 6), &t, &rows, &AcceptAll);
        let expected: Vec<u32> = permutation[0..6]
            .iter()
            .filter(|&&p| p < 6)
            .map(|&p| p as u32)
            .collect();
        assert_eq!(slice, expected);
    }

    #[test]
    fn test_stops_at_item_count() {
        let t = token(3, 1);
        let rows: Vec<u32> = (0..10).collect();
        assert_eq!(page(&Pagination::new(0, 10), &t, &rows, &AcceptAll).len(), 3);
        assert!(page(&Pagination::new(3, 10), &t, &rows, &AcceptAll).is_empty());
        assert!(page(&Pagination::new(u64::MAX, 10), &t, &rows, &AcceptAll).is_empty());
    }

    #[test]
    fn test_refilters_rows() {
        let t = token(8, 9);
        let rows: Vec<u32> = (0..8).collect();
        let slice = page(&Pagination::new(0, 8), &t, &rows, &Even);
        assert_eq!(slice.len(), 4);
        assert!(slice.iter().all(|r| r % 2 == 0));
    }
}
