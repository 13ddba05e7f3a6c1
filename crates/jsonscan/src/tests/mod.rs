mod arbitrary;

mod snapshot_events;

/// Quickcheck iterations: more on CI, fewer locally.
pub(crate) fn test_count() -> u64 {
    if is_ci::cached() { 2_000 } else { 300 }
}
