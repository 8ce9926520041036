use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::tracing::prelude::*;

/// The statistic a [`RunningFilter`](super::RunningFilter) keeps over its
/// window.
///
/// Unrecognized names and codes never fail: they fall back to
/// [`Average`](StatisticKind::Average), both when converting by hand and
/// when deserializing a configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(from = "KindRepr", into = "String")]
pub enum StatisticKind {
    #[default]
    Average,
    Median,
    Minimum,
    Maximum,
}

impl StatisticKind {
    /// Numeric code used by firmware configuration tables.
    pub fn code(self) -> u8 {
        match self {
            StatisticKind::Median => 1,
            StatisticKind::Average => 2,
            StatisticKind::Minimum => 3,
            StatisticKind::Maximum => 4,
        }
    }

    /// Parse a kind by name, falling back to `Average`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().parse() {
            Ok(kind) => kind,
            Err(_) => {
                debug!(name, "Unknown statistic kind, using average");
                StatisticKind::Average
            }
        }
    }
}

impl From<u8> for StatisticKind {
    fn from(code: u8) -> Self {
        match code {
            1 => StatisticKind::Median,
            2 => StatisticKind::Average,
            3 => StatisticKind::Minimum,
            4 => StatisticKind::Maximum,
            _ => {
                debug!(code, "Unknown statistic code, using average");
                StatisticKind::Average
            }
        }
    }
}

impl From<StatisticKind> for String {
    fn from(kind: StatisticKind) -> Self {
        kind.to_string()
    }
}

/// Accepts a name or a numeric code in configuration files. Anything
/// else lands in `Other` and becomes `Average`.
#[derive(Deserialize)]
#[serde(untagged)]
enum KindRepr {
    Code(u64),
    Name(String),
    Other(IgnoredAny),
}

impl From<KindRepr> for StatisticKind {
    fn from(repr: KindRepr) -> Self {
        match repr {
            KindRepr::Code(code) => u8::try_from(code)
                .map(StatisticKind::from)
                .unwrap_or_default(),
            KindRepr::Name(name) => StatisticKind::from_name(&name),
            KindRepr::Other(_) => {
                debug!("Unrecognized statistic kind value, using average");
                StatisticKind::Average
            }
        }
    }
}
