//! Report error types.

use chrono::NaiveDate;
use serde_json::json;
use tally_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// The store could not serve the posted lines.
    #[error("Report computation failed: {0}")]
    Compute(#[source] StoreError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Compute(_) => "REPORT_COMPUTE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDateRange { .. } => 400,
            Self::Compute(_) => 500,
        }
    }
}

impl From<StoreError> for ReportError {
    fn from(err: StoreError) -> Self {
        Self::Compute(err)
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let details = match &err {
            ReportError::InvalidDateRange { start, end } => Some(json!({
                "start_date": start,
                "end_date": end,
            })),
            ReportError::Compute(_) => None,
        };

        Self::Rule {
            status: err.http_status_code(),
            code: err.error_code(),
            message: err.to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_maps_to_bad_request() {
        let err = ReportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2026-02-01 is after end 2026-01-01"
        );

        let app: AppError = err.into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.error_code(), "INVALID_DATE_RANGE");
        assert_eq!(
            app.details(),
            Some(&json!({ "start_date": "2026-02-01", "end_date": "2026-01-01" }))
        );
    }

    #[test]
    fn test_store_failure_maps_to_server_error() {
        let err: ReportError = StoreError::Unavailable("pool".into()).into();
        assert_eq!(err.error_code(), "REPORT_COMPUTE_ERROR");
        assert_eq!(AppError::from(err).status_code(), 500);
    }
}
