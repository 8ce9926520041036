//! Running median, average, minimum and maximum over a sliding window of
//! sensor samples.
//!
//! A [`RunningFilter`] keeps the most recent samples of one signal in a
//! fixed-size window and substitutes a running statistic for each raw
//! sample, rejecting samples outside a configured valid range.
//!
//! ```
//! use running_filter::{FilterConfig, RunningFilter, StatisticKind};
//!
//! let mut filter = RunningFilter::new(&FilterConfig::new(StatisticKind::Median).with_capacity(4));
//! assert_eq!(filter.capacity(), 5);
//!
//! for sample in [423u16, 753, 217, 42, 898] {
//!     filter.update(sample);
//! }
//! assert_eq!(filter.statistic(), 423);
//! ```

pub mod filter;
pub mod tracing;

pub use filter::{
    ConfigError, FilterConfig, RejectedSample, RunningFilter, Sample, Settings, StatisticKind,
    ValidRange,
};

/// Crate version, reported by the command-line tool.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
