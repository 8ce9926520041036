use super::config::{FilterConfig, Settings, ValidRange};
use super::error::RejectedSample;
use super::kind::StatisticKind;
use super::reduce::reduce;
use super::sample::Sample;
use super::window::Window;
use crate::tracing::prelude::*;

/// A running statistic over the most recent samples of one signal.
///
/// Each accepted sample enters a fixed-size window, evicting the oldest
/// once the window is full, and the configured statistic is recomputed
/// over the window. The result stands in for the raw sample. Samples
/// outside the valid range are dropped without touching the window or the
/// statistic.
///
/// Updates take `&mut self`; the filter is meant to be driven from a
/// single periodic sampling loop.
#[derive(Debug, Clone)]
pub struct RunningFilter<T: Sample> {
    settings: Settings<T>,
    window: Window<T>,
    statistic: T,
}

impl<T: Sample> RunningFilter<T> {
    /// Creates a filter from a configuration, correcting any out-of-range
    /// values in it.
    pub fn new(config: &FilterConfig<T>) -> Self {
        let settings = config.sanitize();
        debug!(
            kind = %settings.kind,
            capacity = settings.capacity,
            low = %settings.range.low(),
            high = %settings.range.high(),
            "Running filter created"
        );
        Self {
            window: Window::new(settings.capacity),
            settings,
            statistic: T::default(),
        }
    }

    /// Creates a filter for `kind` with the default capacity over the full
    /// domain.
    pub fn from_kind(kind: StatisticKind) -> Self {
        Self::new(&FilterConfig::new(kind))
    }

    /// Feeds a sample and returns the running statistic.
    ///
    /// A sample outside the valid range is ignored and the previous
    /// statistic is returned unchanged. Use [`try_update`](Self::try_update)
    /// to tell the two cases apart.
    pub fn update(&mut self, sample: T) -> T {
        self.try_update(sample).unwrap_or(self.statistic)
    }

    /// Feeds a sample, reporting a rejection instead of hiding it.
    ///
    /// On rejection the window and the statistic are left exactly as they
    /// were.
    pub fn try_update(&mut self, sample: T) -> Result<T, RejectedSample<T>> {
        if let Err(rejected) = self.settings.range.check(sample) {
            trace!(sample = %sample, reason = %rejected, "Sample rejected");
            return Err(rejected);
        }

        let evicted = self.window.push(sample);
        if let Some(statistic) = reduce(self.settings.kind, &self.window.snapshot()) {
            self.statistic = statistic;
        }

        trace!(
            sample = %sample,
            evicted = ?evicted,
            statistic = %self.statistic,
            readings = self.window.len(),
            "Sample accepted"
        );
        Ok(self.statistic)
    }

    /// Last computed statistic, or zero before any sample was accepted.
    pub fn statistic(&self) -> T {
        self.statistic
    }

    /// Forgets all samples and zeroes the statistic. Configuration is kept.
    pub fn reset(&mut self) {
        self.window.clear();
        self.statistic = T::default();
    }

    pub fn kind(&self) -> StatisticKind {
        self.settings.kind
    }

    /// Window size after sanitization.
    pub fn capacity(&self) -> usize {
        self.settings.capacity
    }

    pub fn valid_range(&self) -> ValidRange<T> {
        self.settings.range
    }

    /// Number of samples currently in the window.
    pub fn readings(&self) -> usize {
        self.window.len()
    }

    pub fn settings(&self) -> &Settings<T> {
        &self.settings
    }

    /// Samples in the window, most recent first.
    pub fn window(&self) -> impl Iterator<Item = T> + '_ {
        self.window.iter()
    }
}

impl<T: Sample> Default for RunningFilter<T> {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
