mod config;
mod error;
mod kind;
mod reduce;
mod running;
mod sample;
mod window;

pub use config::{
    DEFAULT_CAPACITY, FilterConfig, MAX_CAPACITY, MIN_CAPACITY, Settings, ValidRange,
    normalize_capacity,
};
pub use error::{ConfigError, RejectedSample};
pub use kind::StatisticKind;
pub use running::RunningFilter;
pub use sample::Sample;
pub use window::Window;
