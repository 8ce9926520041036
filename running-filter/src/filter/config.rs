use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{ConfigError, RejectedSample};
use super::kind::StatisticKind;
use super::sample::Sample;
use crate::tracing::prelude::*;

/// Smallest window a filter will run with.
pub const MIN_CAPACITY: usize = 3;

/// Largest window a filter will run with. Also sizes the fixed storage.
pub const MAX_CAPACITY: usize = 11;

pub const DEFAULT_CAPACITY: usize = 5;

/// Requested filter configuration, as written by the caller.
///
/// Nothing here is validated. [`sanitize`](Self::sanitize) corrects every
/// field into [`Settings`] instead of failing, since the intended callers
/// are headless sampling loops with nowhere to report an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(serialize = "T: Serialize", deserialize = "T: Sample"))]
pub struct FilterConfig<T> {
    /// Statistic to keep over the window.
    pub kind: StatisticKind,

    /// Requested window size. Forced odd for a median, then clamped to
    /// `MIN_CAPACITY..=MAX_CAPACITY`.
    pub capacity: usize,

    /// Lowest accepted sample. Defaults to the domain minimum.
    #[serde(deserialize_with = "deserialize_bound")]
    pub low: Option<T>,

    /// Highest accepted sample. Defaults to the domain maximum.
    #[serde(deserialize_with = "deserialize_bound")]
    pub high: Option<T>,
}

impl<T> Default for FilterConfig<T> {
    fn default() -> Self {
        Self {
            kind: StatisticKind::Average,
            capacity: DEFAULT_CAPACITY,
            low: None,
            high: None,
        }
    }
}

impl<T: Sample> FilterConfig<T> {
    pub fn new(kind: StatisticKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Accept only samples between `low` and `high`, in either order.
    pub fn with_valid_range(self, low: T, high: T) -> Self {
        self.with_low(low).with_high(high)
    }

    pub fn with_low(mut self, low: T) -> Self {
        self.low = Some(low);
        self
    }

    pub fn with_high(mut self, high: T) -> Self {
        self.high = Some(high);
        self
    }

    /// Parse a JSON document such as
    /// `{"kind": "median", "capacity": 7, "low": 128, "high": 768}`.
    /// Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Correct every field into a usable [`Settings`].
    pub fn sanitize(&self) -> Settings<T> {
        let capacity = normalize_capacity(self.kind, self.capacity);
        if capacity != self.capacity {
            debug!(
                kind = %self.kind,
                requested = self.capacity,
                capacity,
                "Window capacity adjusted"
            );
        }

        let range = ValidRange::new(
            sanitize_bound(self.low, T::LOWEST),
            sanitize_bound(self.high, T::HIGHEST),
        );
        if let (Some(low), Some(high)) = (self.low, self.high) {
            if low > high {
                debug!(low = %low, high = %high, "Valid range bounds swapped");
            }
        }

        Settings {
            kind: self.kind,
            capacity,
            range,
        }
    }
}

/// Force odd for a median, then clamp into `MIN_CAPACITY..=MAX_CAPACITY`.
///
/// Both limits are odd, so clamping keeps a median window odd.
pub fn normalize_capacity(kind: StatisticKind, capacity: usize) -> usize {
    let capacity = match kind {
        StatisticKind::Median => capacity | 1,
        _ => capacity,
    };
    capacity.clamp(MIN_CAPACITY, MAX_CAPACITY)
}

/// Read a bound as any JSON number and clamp it into the domain, so a
/// `u16` filter accepts `"low": -5` as `0` rather than failing.
fn deserialize_bound<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Sample,
{
    let wide = Option::<f64>::deserialize(deserializer)?;
    Ok(wide.and_then(T::from_f64_clamped))
}

fn sanitize_bound<T: Sample>(bound: Option<T>, fallback: T) -> T {
    match bound {
        Some(value) if !value.is_unordered() => value.clamp_to_domain(),
        _ => fallback,
    }
}

/// Inclusive range of accepted samples, always ordered `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange<T> {
    low: T,
    high: T,
}

impl<T: Sample> ValidRange<T> {
    /// Build a range from two bounds given in either order.
    pub fn new(a: T, b: T) -> Self {
        if a > b {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    /// The whole domain.
    pub fn full() -> Self {
        Self {
            low: T::LOWEST,
            high: T::HIGHEST,
        }
    }

    pub fn low(&self) -> T {
        self.low
    }

    pub fn high(&self) -> T {
        self.high
    }

    /// Gate a sample. NaN never passes, whatever the bounds.
    pub fn check(&self, sample: T) -> Result<T, RejectedSample<T>> {
        if sample.is_unordered() {
            Err(RejectedSample::NotANumber)
        } else if sample < self.low {
            Err(RejectedSample::BelowRange {
                sample,
                low: self.low,
            })
        } else if sample > self.high {
            Err(RejectedSample::AboveRange {
                sample,
                high: self.high,
            })
        } else {
            Ok(sample)
        }
    }
}

/// Sanitized configuration a filter runs with. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings<T> {
    pub kind: StatisticKind,
    pub capacity: usize,
    pub range: ValidRange<T>,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(StatisticKind::Median, 4, 5; "median_even_rounds_up_to_odd")]
    #[test_case(StatisticKind::Median, 5, 5; "median_odd_kept")]
    #[test_case(StatisticKind::Median, 10, 11; "median_even_near_max")]
    #[test_case(StatisticKind::Median, 12, 11; "median_above_max_clamped")]
    #[test_case(StatisticKind::Median, 0, 3; "median_zero_clamped")]
    #[test_case(StatisticKind::Median, 2, 3; "median_below_min")]
    #[test_case(StatisticKind::Average, 4, 4; "average_even_kept")]
    #[test_case(StatisticKind::Average, 1, 3; "average_below_min")]
    #[test_case(StatisticKind::Minimum, 200, 11; "minimum_above_max")]
    #[test_case(StatisticKind::Maximum, usize::MAX, 11; "maximum_huge")]
    fn should_normalize_capacity(kind: StatisticKind, requested: usize, expected: usize) {
        assert_eq!(normalize_capacity(kind, requested), expected);
    }

    #[test]
    fn should_keep_median_capacity_odd_for_every_request() {
        for requested in 0..=64 {
            let capacity = normalize_capacity(StatisticKind::Median, requested);
            assert_eq!(capacity % 2, 1, "requested {requested}");
            assert!((MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity));
        }
    }

    #[test]
    fn should_default_to_average_of_five_over_full_domain() {
        let settings = FilterConfig::<u16>::default().sanitize();

        assert_eq!(settings.kind, StatisticKind::Average);
        assert_eq!(settings.capacity, DEFAULT_CAPACITY);
        assert_eq!(settings.range, ValidRange::full());
        assert_eq!(settings.range.low(), 0);
        assert_eq!(settings.range.high(), u16::MAX);
    }

    #[test]
    fn should_order_inverted_bounds() {
        let settings = FilterConfig::<u16>::default()
            .with_valid_range(768, 128)
            .sanitize();

        assert_eq!(settings.range.low(), 128);
        assert_eq!(settings.range.high(), 768);
    }

    #[test]
    fn should_order_single_bound_against_domain_limit() {
        let settings = FilterConfig::<f32>::default().with_low(10.0).sanitize();

        assert_eq!(settings.range.low(), 10.0);
        assert_eq!(settings.range.high(), f32::MAX);
    }

    #[test]
    fn should_replace_nan_and_infinite_bounds() {
        let settings = FilterConfig::<f64>::default()
            .with_valid_range(f64::NAN, f64::INFINITY)
            .sanitize();

        assert_eq!(settings.range.low(), f64::MIN);
        assert_eq!(settings.range.high(), f64::MAX);
    }

    #[test_case(127, false; "below_low")]
    #[test_case(128, true; "at_low")]
    #[test_case(500, true; "inside")]
    #[test_case(768, true; "at_high")]
    #[test_case(769, false; "above_high")]
    fn should_gate_samples_inclusively(sample: u16, accepted: bool) {
        let range = ValidRange::new(128u16, 768);
        assert_eq!(range.check(sample).is_ok(), accepted);
    }

    #[test]
    fn should_report_which_bound_rejected() {
        let range = ValidRange::new(128u16, 768);

        assert_eq!(
            range.check(42),
            Err(RejectedSample::BelowRange {
                sample: 42,
                low: 128
            })
        );
        assert_eq!(
            range.check(898),
            Err(RejectedSample::AboveRange {
                sample: 898,
                high: 768
            })
        );
        assert_eq!(range.check(423), Ok(423));
    }

    #[test]
    fn should_reject_nan_even_over_full_domain() {
        let range = ValidRange::<f32>::full();
        assert_eq!(range.check(f32::NAN), Err(RejectedSample::NotANumber));
    }

    #[test]
    fn should_load_partial_json_with_defaults() {
        let config = FilterConfig::<u16>::from_json_str(r#"{"kind": "median", "high": 768}"#)
            .unwrap();

        assert_eq!(config.kind, StatisticKind::Median);
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.low, None);
        assert_eq!(config.high, Some(768));
    }

    #[test]
    fn should_sanitize_loaded_json_instead_of_failing() {
        let settings = FilterConfig::<u16>::from_json_str(
            r#"{"kind": "trimmed-mean", "capacity": 40, "low": 900, "high": 100}"#,
        )
        .unwrap()
        .sanitize();

        assert_eq!(settings.kind, StatisticKind::Average);
        assert_eq!(settings.capacity, MAX_CAPACITY);
        assert_eq!(settings.range.low(), 100);
        assert_eq!(settings.range.high(), 900);
    }

    #[test_case(r#"{"kind": -1}"#; "negative_code")]
    #[test_case(r#"{"kind": 2.5}"#; "fractional_code")]
    #[test_case(r#"{"kind": null}"#; "null")]
    fn should_load_unrecognized_kind_as_average(json: &str) {
        let config = FilterConfig::<u16>::from_json_str(json).unwrap();
        assert_eq!(config.kind, StatisticKind::Average);
    }

    #[test]
    fn should_clamp_out_of_domain_json_bounds() {
        let config =
            FilterConfig::<u16>::from_json_str(r#"{"low": -5, "high": 70000}"#).unwrap();

        assert_eq!(config.low, Some(0));
        assert_eq!(config.high, Some(u16::MAX));
    }

    #[test]
    fn should_round_fractional_json_bounds_for_integers() {
        let config =
            FilterConfig::<i16>::from_json_str(r#"{"low": -40000.0, "high": 12.7}"#).unwrap();
        let settings = config.sanitize();

        assert_eq!(settings.range.low(), i16::MIN);
        assert_eq!(settings.range.high(), 13);
    }

    #[test]
    fn should_clamp_huge_json_bounds_for_f32() {
        let config = FilterConfig::<f32>::from_json_str(r#"{"low": -1e300, "high": null}"#)
            .unwrap();

        assert_eq!(config.low, Some(f32::MIN));
        assert_eq!(config.high, None);
    }

    #[test]
    fn should_fail_on_malformed_json() {
        let result = FilterConfig::<u16>::from_json_str("{kind: median");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_fail_on_unreadable_file() {
        let result = FilterConfig::<u16>::load("/nonexistent/running-filter.json");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
