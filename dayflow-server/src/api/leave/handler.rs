//! Leave Request API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::client::{CreatedResponse, MessageResponse};
use shared::models::{
    LeaveCreate, LeaveDecision, LeaveQuery, LeaveRequest, LeaveRequestWithEmployee, LeaveStatus, LeaveType,
};

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::leave::{self, NewLeave};
use crate::db::repository::RepoError;
use crate::utils::sanitize::RemarkFilter;
use crate::utils::time::{parse_date, span_days};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Longest accepted leave, in days
pub const MAX_LEAVE_DAYS: i64 = 366;

fn sanitize_leave(filter: &RemarkFilter, leave: &mut LeaveRequest) {
    filter.sanitize_field(&mut leave.remarks);
    filter.sanitize_field(&mut leave.admin_comment);
}

fn required_date(value: Option<&str>) -> AppResult<chrono::NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v),
        None => Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Start date and end date are required",
        )),
    }
}

/// POST /api/leave - submit a request for the caller
///
/// Every day of the range is marked `leave` in attendance right away.
pub async fn submit(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<LeaveCreate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    user.authorize(Resource::Leave, Action::Create, None)?;

    let leave_type =
        LeaveType::parse(payload.leave_type.trim()).ok_or_else(|| AppError::new(ErrorCode::LeaveInvalidType))?;
    let start_date = required_date(payload.start_date.as_deref())?;
    let end_date = required_date(payload.end_date.as_deref())?;
    if start_date > end_date {
        return Err(AppError::new(ErrorCode::LeaveInvalidDateRange));
    }
    if span_days(start_date, end_date) > MAX_LEAVE_DAYS {
        return Err(AppError::with_message(
            ErrorCode::LeaveRangeTooLong,
            format!("Leave may span at most {MAX_LEAVE_DAYS} days"),
        ));
    }
    validate_optional_text(&payload.remarks, "remarks", MAX_NOTE_LEN)?;

    let request = NewLeave {
        user_id: user.id,
        leave_type,
        start_date,
        end_date,
        remarks: state.remark_filter.sanitize(payload.remarks.as_deref()),
    };
    let id = leave::submit(&state.pool, &request).await?;

    tracing::info!(
        leave_id = id,
        user_id = user.id,
        leave_type = leave_type.as_str(),
        days = span_days(start_date, end_date),
        "Leave request submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Leave request submitted successfully".to_string(),
            id,
        }),
    ))
}

/// GET /api/leave/my-leaves
pub async fn list_mine(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<LeaveRequest>>> {
    user.authorize(Resource::Leave, Action::ListOwn, None)?;

    let mut leaves = leave::find_by_user(&state.pool, user.id).await?;
    for l in &mut leaves {
        sanitize_leave(&state.remark_filter, l);
    }
    Ok(Json(leaves))
}

/// GET /api/leave/all?status=
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<LeaveQuery>,
) -> AppResult<Json<Vec<LeaveRequestWithEmployee>>> {
    user.authorize(Resource::Leave, Action::ListAll, None)?;

    let status = match query.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(LeaveStatus::parse(s).ok_or_else(|| AppError::new(ErrorCode::LeaveInvalidStatus))?),
        None => None,
    };

    let mut leaves = leave::find_all(&state.pool, status).await?;
    for l in &mut leaves {
        sanitize_leave(&state.remark_filter, &mut l.leave);
    }
    Ok(Json(leaves))
}

/// PUT /api/leave/{id}/approve - approve or reject
pub async fn decide(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<LeaveDecision>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(Resource::Leave, Action::Approve, None)?;

    let status = match LeaveStatus::parse(payload.status.trim()) {
        Some(s @ (LeaveStatus::Approved | LeaveStatus::Rejected)) => s,
        _ => return Err(AppError::new(ErrorCode::LeaveInvalidStatus)),
    };
    validate_optional_text(&payload.admin_comment, "admin_comment", MAX_NOTE_LEN)?;
    let comment = state.remark_filter.sanitize(payload.admin_comment.as_deref());

    let decided = leave::decide(&state.pool, id, status, user.id, &comment)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::LeaveNotFound),
            other => other.into(),
        })?;

    tracing::info!(
        leave_id = id,
        owner_id = decided.user_id,
        status = %status,
        decided_by = user.id,
        "Leave request decided"
    );

    Ok(Json(MessageResponse::new(format!("Leave request {status} successfully"))))
}
