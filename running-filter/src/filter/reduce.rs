//! Reducers from a window snapshot to a statistic.
//!
//! Each reducer takes the occupied samples in any order and never sees an
//! unfilled slot, so a filter still warming up reports the statistic of
//! what it has seen so far.

use std::cmp::Ordering;

use heapless::Vec;

use super::config::MAX_CAPACITY;
use super::kind::StatisticKind;
use super::sample::Sample;

/// Compute `kind` over `values`, or `None` if there are no values.
///
/// `values` holds at most `MAX_CAPACITY` samples, as any window does.
pub(crate) fn reduce<T: Sample>(kind: StatisticKind, values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let statistic = match kind {
        StatisticKind::Average => T::mean(values),
        StatisticKind::Median => median(values),
        StatisticKind::Minimum => minimum(values),
        StatisticKind::Maximum => maximum(values),
    };
    Some(statistic)
}

/// Middle element of the sorted values. For an even count this is the
/// lower of the two middle elements, so the result is always a sample
/// that was actually observed.
pub(crate) fn median<T: Sample>(values: &[T]) -> T {
    debug_assert!(values.len() <= MAX_CAPACITY);
    let mut sorted: Vec<T, MAX_CAPACITY> = values.iter().copied().take(MAX_CAPACITY).collect();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
        .get(sorted.len().saturating_sub(1) / 2)
        .copied()
        .unwrap_or_default()
}

pub(crate) fn minimum<T: Sample>(values: &[T]) -> T {
    extreme(values, |candidate, best| candidate < best)
}

pub(crate) fn maximum<T: Sample>(values: &[T]) -> T {
    extreme(values, |candidate, best| candidate > best)
}

fn extreme<T: Sample>(values: &[T], beats: impl Fn(T, T) -> bool) -> T {
    let mut samples = values.iter().copied();
    let first = samples.next().unwrap_or_default();
    samples.fold(first, |best, candidate| {
        if beats(candidate, best) {
            candidate
        } else {
            best
        }
    })
}
