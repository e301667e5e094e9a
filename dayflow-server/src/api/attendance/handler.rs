//! Attendance API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{AttendanceQuery, AttendanceRecord, AttendanceWithEmployee};

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::attendance::{self, DateRange};
use crate::utils::time::{format_date, parse_optional_date};
use crate::utils::{AppError, AppResult};

/// Parse and normalize `from`/`to`
fn date_range(query: &AttendanceQuery) -> AppResult<DateRange> {
    let from = parse_optional_date(query.from.as_deref())?;
    let to = parse_optional_date(query.to.as_deref())?;
    if let (Some(f), Some(t)) = (from, to)
        && f > t
    {
        return Err(AppError::validation("from must not be after to"));
    }
    Ok(DateRange {
        from: from.map(format_date),
        to: to.map(format_date),
    })
}

/// GET /api/attendance/my-attendance?from&to
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    user.authorize(Resource::Attendance, Action::ListOwn, None)?;
    let range = date_range(&query)?;
    let records = attendance::find_by_user(&state.pool, user.id, &range).await?;
    Ok(Json(records))
}

/// GET /api/attendance/all?userId&from&to
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceWithEmployee>>> {
    user.authorize(Resource::Attendance, Action::ListAll, None)?;
    let range = date_range(&query)?;
    let records = attendance::find_all(&state.pool, query.user_id, &range).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_normalizes_and_checks_order() {
        let query = AttendanceQuery {
            from: Some(" 2024-01-01 ".into()),
            to: Some("2024-01-31".into()),
            user_id: None,
        };
        let range = date_range(&query).unwrap();
        assert_eq!(range.from.as_deref(), Some("2024-01-01"));

        let inverted = AttendanceQuery {
            from: Some("2024-02-01".into()),
            to: Some("2024-01-01".into()),
            user_id: None,
        };
        assert!(date_range(&inverted).is_err());

        let bad = AttendanceQuery {
            from: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(date_range(&bad).is_err());
    }
}
