use axum::http::StatusCode;

/// Validation failures in pure calendar arithmetic. Out-of-range input is
/// always an error, never clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("day of year {day_of_year} is out of range for {year} (must be 1..={max})")]
    DayOfYearOutOfRange { day_of_year: u32, year: i32, max: u32 },

    #[error("month {month} is out of range (must be 1..=12)")]
    MonthOutOfRange { month: u32 },

    #[error("day {day} is out of range for {year}-{month:02} (must be 1..={max})")]
    DayOutOfRange { day: u32, month: u32, year: i32, max: u32 },

    #[error("year {year} is out of range (must be >= 1)")]
    YearOutOfRange { year: i32 },
}

/// Domain error taxonomy shared by the service and the collection store.
///
/// `Validation` and `Calendar` errors are rejected at the boundary before
/// any optimistic write. `Invariant` means the cached collection did not
/// hold exactly one habit for an id during a mutation; the mutation is
/// aborted and a full refresh is scheduled. `Remote` means the service
/// call failed after the optimistic write and a rollback took place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("habit collection invariant violated: {0}")]
    Invariant(String),

    #[error("remote call failed: {0}")]
    Remote(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::Calendar(_) | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Remote(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        CoreError::from(err).into()
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
