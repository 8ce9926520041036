//! Numeric domains a [`RunningFilter`](super::RunningFilter) can smooth.
//!
//! Integer domains average with round-half-away-from-zero into a wide
//! accumulator; float domains average exactly. Every domain exposes the
//! absolute limits a valid range is clamped into.

use std::fmt;

/// A value type that can be fed through a running filter.
pub trait Sample: Copy + PartialOrd + Default + fmt::Debug + fmt::Display {
    /// Lowest value a valid range may admit.
    const LOWEST: Self;

    /// Highest value a valid range may admit.
    const HIGHEST: Self;

    /// Arithmetic mean of `values`, rounded into the domain.
    ///
    /// Returns the default value for an empty slice.
    fn mean(values: &[Self]) -> Self;

    /// Convert a configuration number, saturating at the domain limits.
    /// Integers round to the nearest value. `None` for NaN.
    fn from_f64_clamped(value: f64) -> Option<Self>;

    /// True for values with no place in an ordering (float NaN).
    fn is_unordered(self) -> bool {
        false
    }

    /// Clamp into `[LOWEST, HIGHEST]`.
    fn clamp_to_domain(self) -> Self {
        if self < Self::LOWEST {
            Self::LOWEST
        } else if self > Self::HIGHEST {
            Self::HIGHEST
        } else {
            self
        }
    }
}

macro_rules! unsigned_sample {
    ($($ty:ty),*) => {$(
        impl Sample for $ty {
            const LOWEST: Self = <$ty>::MIN;
            const HIGHEST: Self = <$ty>::MAX;

            fn mean(values: &[Self]) -> Self {
                if values.is_empty() {
                    return Self::default();
                }
                let count = values.len() as u64;
                let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
                ((sum + count / 2) / count) as Self
            }

            fn from_f64_clamped(value: f64) -> Option<Self> {
                if value.is_nan() {
                    return None;
                }
                Some(value.round().clamp(<$ty>::MIN as f64, <$ty>::MAX as f64) as Self)
            }
        }
    )*};
}

macro_rules! signed_sample {
    ($($ty:ty),*) => {$(
        impl Sample for $ty {
            const LOWEST: Self = <$ty>::MIN;
            const HIGHEST: Self = <$ty>::MAX;

            fn mean(values: &[Self]) -> Self {
                if values.is_empty() {
                    return Self::default();
                }
                let count = values.len() as i64;
                let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
                // Division truncates toward zero, so bias away from it first
                let biased = if sum < 0 { sum - count / 2 } else { sum + count / 2 };
                (biased / count) as Self
            }

            fn from_f64_clamped(value: f64) -> Option<Self> {
                if value.is_nan() {
                    return None;
                }
                Some(value.round().clamp(<$ty>::MIN as f64, <$ty>::MAX as f64) as Self)
            }
        }
    )*};
}

macro_rules! float_sample {
    ($($ty:ty),*) => {$(
        impl Sample for $ty {
            const LOWEST: Self = <$ty>::MIN;
            const HIGHEST: Self = <$ty>::MAX;

            fn mean(values: &[Self]) -> Self {
                if values.is_empty() {
                    return Self::default();
                }
                // Sum of v / n stays within the largest |v|, so a window of
                // finite samples near the domain limit cannot overflow
                let count = values.len() as f64;
                let mean: f64 = values.iter().map(|&v| f64::from(v) / count).sum();
                mean as Self
            }

            fn from_f64_clamped(value: f64) -> Option<Self> {
                if value.is_nan() {
                    return None;
                }
                Some(value.clamp(<$ty>::MIN as f64, <$ty>::MAX as f64) as Self)
            }

            fn is_unordered(self) -> bool {
                self.is_nan()
            }
        }
    )*};
}

unsigned_sample!(u8, u16, u32);
signed_sample!(i16, i32);
float_sample!(f32, f64);
