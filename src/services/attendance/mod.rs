pub mod query;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::ApiError;
use crate::models::ErrorCode;
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryParams, RecordAttendanceRequest,
    UpdateAttendanceRequest,
};
use crate::utils::validate::parse_date;

use super::storage_service;

storage_service! {
    /// Daily attendance per subject.
    AttendanceService
}

impl AttendanceService {
    pub async fn record_attendance(
        &self,
        request: &HttpRequest,
        batch: RecordAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_attendance(self, request, batch).await
    }

    pub async fn update_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
        update: UpdateAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        record::update_attendance(self, request, attendance_id, update).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        record::delete_attendance(self, request, attendance_id).await
    }

    pub async fn list_attendances(
        &self,
        request: &HttpRequest,
        query: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        query::list_attendances(self, request, query).await
    }

    pub async fn attendance_summary(
        &self,
        request: &HttpRequest,
        query: AttendanceSummaryParams,
    ) -> ActixResult<HttpResponse> {
        query::attendance_summary(self, request, query).await
    }
}

/// Validates optional `YYYY-MM-DD` bounds, returning them normalised.
pub(crate) fn check_date_range(
    date_from: Option<String>,
    date_to: Option<String>,
) -> Result<(Option<String>, Option<String>), ApiError> {
    let parse = |value: Option<String>, name: &str| -> Result<_, ApiError> {
        value
            .map(|v| {
                parse_date(v.trim())
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .map_err(|msg| {
                        ApiError::bad_request(ErrorCode::AttendanceInvalidDate, format!("{name}: {msg}"))
                    })
            })
            .transpose()
    };
    let from = parse(date_from, "date_from")?;
    let to = parse(date_to, "date_to")?;
    if let (Some(from), Some(to)) = (&from, &to)
        && from > to
    {
        return Err(ApiError::bad_request(
            ErrorCode::AttendanceInvalidDate,
            "date_from must not be after date_to",
        ));
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_validation() {
        assert_eq!(check_date_range(None, None).unwrap(), (None, None));
        let (from, to) =
            check_date_range(Some("2025-08-01".into()), Some("2025-08-31".into())).unwrap();
        assert_eq!(from.as_deref(), Some("2025-08-01"));
        assert_eq!(to.as_deref(), Some("2025-08-31"));

        assert!(check_date_range(Some("2025-02-30".into()), None).is_err());
        assert!(check_date_range(None, Some("31/08/2025".into())).is_err());
        assert!(check_date_range(Some("2025-09-01".into()), Some("2025-08-01".into())).is_err());
    }
}
