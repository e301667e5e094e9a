//! Reports API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared::models::SalarySlip;

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::payroll;
use crate::utils::money::validate_period;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Salary slip period
#[derive(Debug, Deserialize)]
pub struct SlipQuery {
    pub month: Option<i32>,
    pub year: Option<i32>,
}

async fn load_slip(state: &ServerState, user: &CurrentUser, user_id: i64, query: &SlipQuery) -> AppResult<SalarySlip> {
    user.authorize(Resource::SalarySlip, Action::Read, Some(user_id))?;
    let (month, year) = validate_period(query.month, query.year)?;

    let employee = payroll::find_slip_employee(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    let record = payroll::find_for_period(&state.pool, user_id, month, year)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::SalarySlipNotFound)
                .with_detail("month", month)
                .with_detail("year", year)
        })?;

    Ok(SalarySlip::new(employee, &record))
}

/// GET /api/reports/salary-slip/{user_id}?month&year
pub async fn salary_slip(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(user_id): Path<i64>,
    Query(query): Query<SlipQuery>,
) -> AppResult<Json<SalarySlip>> {
    let slip = load_slip(&state, &user, user_id, &query).await?;
    Ok(Json(slip))
}

/// GET /api/reports/salary-slip/{user_id}/download?month&year
///
/// Plain-text attachment.
pub async fn download_salary_slip(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(user_id): Path<i64>,
    Query(query): Query<SlipQuery>,
) -> AppResult<Response> {
    let slip = load_slip(&state, &user, user_id, &query).await?;
    let disposition = format!("attachment; filename=\"{}\"", slip.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        slip.render_text(),
    )
        .into_response())
}
