//! Static block partitioning of `[0, n)` across a worker team.
//!
//! Worker `t` of `team` gets `[t * chunk, min(n, (t + 1) * chunk))` with
//! `chunk = ceil(n / team)`. Trailing workers may get an empty range when
//! `team > n` or `n` is not a multiple of `chunk`.

use std::ops::Range;

/// Size of each worker's block. `team` must be at least 1.
#[inline]
pub fn chunk_len(n: usize, team: usize) -> usize {
    debug_assert!(team >= 1, "team size must be positive");
    n.div_ceil(team.max(1))
}

/// Index range owned by worker `index` in a team of `team` workers.
#[inline]
pub fn range(n: usize, team: usize, index: usize) -> Range<usize> {
    let chunk = chunk_len(n, team);
    let start = index.saturating_mul(chunk).min(n);
    let end = index.saturating_add(1).saturating_mul(chunk).min(n);
    start..end
}

/// All ranges of a team, in worker order.
pub fn ranges(n: usize, team: usize) -> impl Iterator<Item = Range<usize>> {
    (0..team).map(move |index| range(n, team, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(n: usize, team: usize) {
        let mut next = 0;
        for r in ranges(n, team) {
            assert_eq!(r.start, next, "gap or overlap at n={n} team={team}");
            assert!(r.end >= r.start);
            next = r.end;
        }
        assert_eq!(next, n);
    }

    #[test]
    fn test_even_split() {
        let r: Vec<_> = ranges(100, 4).collect();
        assert_eq!(r, vec![0..25, 25..50, 50..75, 75..100]);
    }

    #[test]
    fn test_uneven_split_shortens_last() {
        let r: Vec<_> = ranges(10, 4).collect();
        assert_eq!(r, vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let r: Vec<_> = ranges(3, 8).collect();
        assert_eq!(r.len(), 8);
        assert_eq!(&r[..3], &[0..1, 1..2, 2..3]);
        assert!(r[3..].iter().all(|r| r.is_empty()));
        assert_covers(3, 8);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(chunk_len(0, 4), 0);
        assert!(ranges(0, 4).all(|r| r.is_empty()));
        assert_covers(0, 4);
    }

    #[test]
    fn test_coverage_grid() {
        for n in [0, 1, 2, 7, 64, 1000, 1001] {
            for team in [1, 2, 3, 4, 7, 8, 16] {
                assert_covers(n, team);
            }
        }
    }
}
