//! Payroll API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::client::MessageResponse;
use shared::models::{PayrollCreate, PayrollQuery, PayrollRecord, PayrollStatus, PayrollStatusUpdate, PayrollWithEmployee};

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::payroll::{self, NewPayroll, PayrollFilter};
use crate::db::repository::{RepoError, user as user_repo};
use crate::utils::money::{compute_net_salary, validate_amount, validate_period};
use crate::utils::{AppError, AppResult, ErrorCode};

fn parse_status(value: &str) -> AppResult<PayrollStatus> {
    PayrollStatus::parse(value.trim()).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::PayrollInvalidStatus,
            format!("Invalid payroll status: {value}"),
        )
    })
}

/// GET /api/payroll - admin/hr see every record, employees their own
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<PayrollWithEmployee>>> {
    let filter = if user.can(Resource::Payroll, Action::ListAll, None) {
        PayrollFilter::default()
    } else {
        user.authorize(Resource::Payroll, Action::ListOwn, None)?;
        PayrollFilter {
            user_id: Some(user.id),
            ..Default::default()
        }
    };
    let records = payroll::find_all(&state.pool, filter).await?;
    Ok(Json(records))
}

/// GET /api/payroll/my-payroll
pub async fn list_mine(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<PayrollRecord>>> {
    user.authorize(Resource::Payroll, Action::ListOwn, None)?;
    let records = payroll::find_by_user(&state.pool, user.id).await?;
    Ok(Json(records))
}

/// GET /api/payroll/all?month&year&userId
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PayrollQuery>,
) -> AppResult<Json<Vec<PayrollWithEmployee>>> {
    user.authorize(Resource::Payroll, Action::ListAll, None)?;
    let filter = PayrollFilter {
        month: query.month,
        year: query.year,
        user_id: query.user_id,
    };
    let records = payroll::find_all(&state.pool, filter).await?;
    Ok(Json(records))
}

/// GET /api/payroll/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<PayrollRecord>> {
    let record = payroll::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PayrollNotFound))?;
    user.authorize(Resource::Payroll, Action::Read, Some(record.user_id))?;
    Ok(Json(record))
}

/// POST /api/payroll - save the record for (user, month, year)
///
/// An existing record for the same period is replaced.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PayrollCreate>,
) -> AppResult<(StatusCode, Json<PayrollRecord>)> {
    user.authorize(Resource::Payroll, Action::Create, None)?;

    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "user_id is required"))?;
    let (month, year) = validate_period(payload.month, payload.year)?;
    let base_salary = payload
        .base_salary
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "base_salary is required"))?;
    let allowances = payload.allowances.unwrap_or(0.0);
    let deductions = payload.deductions.unwrap_or(0.0);
    validate_amount(base_salary, "base_salary")?;
    validate_amount(allowances, "allowances")?;
    validate_amount(deductions, "deductions")?;
    let status = match payload.status.as_deref() {
        Some(s) => parse_status(s)?,
        None => PayrollStatus::Pending,
    };

    if !user_repo::exists(&state.pool, user_id).await? {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }

    let amounts = compute_net_salary(base_salary, allowances, deductions);
    let record = payroll::upsert(
        &state.pool,
        &NewPayroll {
            user_id,
            month,
            year,
            base_salary: amounts.base_salary,
            allowances: amounts.allowances,
            deductions: amounts.deductions,
            net_salary: amounts.net_salary,
            status,
        },
    )
    .await?;

    tracing::info!(
        payroll_id = record.id,
        user_id,
        month,
        year,
        net_salary = record.net_salary,
        saved_by = user.id,
        "Payroll saved"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/payroll/{id}/status
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PayrollStatusUpdate>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(Resource::Payroll, Action::SetStatus, None)?;
    let status = parse_status(&payload.status)?;

    payroll::set_status(&state.pool, id, status)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::PayrollNotFound),
            other => other.into(),
        })?;

    tracing::info!(payroll_id = id, status = %status, changed_by = user.id, "Payroll status updated");

    Ok(Json(MessageResponse::new(format!("Payroll status updated to {status}"))))
}
