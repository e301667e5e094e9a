//! Leave Request Repository
//!
//! Submitting and deciding a request also writes attendance; both run in
//! a single transaction so a failure leaves neither table changed.

use super::{RepoError, RepoResult, attendance};
use crate::utils::time::{days_inclusive, format_date};
use chrono::NaiveDate;
use shared::models::{LeaveRequest, LeaveRequestWithEmployee, LeaveStatus, LeaveType};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const LEAVE_COLUMNS: &str = "l.id, l.user_id, l.leave_type, l.start_date, l.end_date, l.status, \
     l.remarks, l.admin_comment, l.approved_by, l.created_at, l.updated_at";

/// Validated leave submission
#[derive(Debug, Clone)]
pub struct NewLeave {
    pub user_id: i64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Already sanitized
    pub remarks: String,
}

/// Insert a pending request and mark every covered day as `leave`
pub async fn submit(pool: &SqlitePool, data: &NewLeave) -> RepoResult<i64> {
    if data.start_date > data.end_date {
        return Err(RepoError::Validation("Start date must be before end date".into()));
    }

    let now = shared::util::now_millis();
    let start = format_date(data.start_date);
    let end = format_date(data.end_date);

    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO leave_requests (user_id, leave_type, start_date, end_date, status, remarks, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) RETURNING id",
    )
    .bind(data.user_id)
    .bind(data.leave_type)
    .bind(&start)
    .bind(&end)
    .bind(LeaveStatus::Pending)
    .bind(&data.remarks)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for day in days_inclusive(data.start_date, data.end_date) {
        attendance::mark_leave(&mut tx, data.user_id, &format_date(day), now).await?;
    }

    tx.commit().await?;
    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<LeaveRequest>> {
    let leave = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests l WHERE l.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(leave)
}

/// A user's requests, newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<LeaveRequest>> {
    let leaves = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests l WHERE l.user_id = ? ORDER BY l.created_at DESC, l.id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(leaves)
}

/// All requests with employee identity, newest first
pub async fn find_all(pool: &SqlitePool, status: Option<LeaveStatus>) -> RepoResult<Vec<LeaveRequestWithEmployee>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {LEAVE_COLUMNS}, u.employee_id, p.first_name, p.last_name \
         FROM leave_requests l JOIN users u ON u.id = l.user_id \
         LEFT JOIN employee_profiles p ON p.user_id = l.user_id"
    ));
    if let Some(status) = status {
        qb.push(" WHERE l.status = ").push_bind(status);
    }
    qb.push(" ORDER BY l.created_at DESC, l.id DESC");

    let leaves = qb.build_query_as::<LeaveRequestWithEmployee>().fetch_all(pool).await?;
    Ok(leaves)
}

/// Record an approve/reject decision
///
/// A rejection forces every existing attendance row in the range to
/// `absent`. Deciding an already decided request is allowed.
pub async fn decide(
    pool: &SqlitePool,
    id: i64,
    status: LeaveStatus,
    approver_id: i64,
    admin_comment: &str,
) -> RepoResult<LeaveRequest> {
    if status == LeaveStatus::Pending {
        return Err(RepoError::Validation("Invalid status".into()));
    }

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let leave = sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests l WHERE l.id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Leave request {id} not found")))?;

    sqlx::query(
        "UPDATE leave_requests SET status = ?1, approved_by = ?2, admin_comment = ?3, updated_at = ?4 WHERE id = ?5",
    )
    .bind(status)
    .bind(approver_id)
    .bind(admin_comment)
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if status == LeaveStatus::Rejected {
        let reverted =
            attendance::mark_absent_range(&mut tx, leave.user_id, &leave.start_date, &leave.end_date, now).await?;
        tracing::debug!(leave_id = id, reverted, "Attendance reverted after rejection");
    }

    tx.commit().await?;

    Ok(LeaveRequest {
        status,
        approved_by: Some(approver_id),
        admin_comment: Some(admin_comment.to_string()),
        updated_at: now,
        ..leave
    })
}
