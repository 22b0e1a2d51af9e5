use thiserror::Error;

/// Everything that can stop a calendar from being rendered.
///
/// Rendering is all-or-nothing: when one of these is returned no markup was produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(f32),

    #[error("cell spacing must not be negative, got {0}")]
    NegativeCellSpacing(f32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("week {week} has {days} days, expected 7")]
    IncompleteWeek { week: usize, days: usize },

    #[error("day {day} of week {week} has weekday index {weekday}")]
    WeekdayMismatch { week: usize, day: usize, weekday: u8 },

    #[error("calendar reports {total} contributions but contains no weeks")]
    MissingWeeks { total: u32 },

    #[error("malformed calendar: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Malformed(err.to_string())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
