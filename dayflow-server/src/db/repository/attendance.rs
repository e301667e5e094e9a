//! Attendance Repository

use super::RepoResult;
use shared::models::{AttendanceRecord, AttendanceStatus, AttendanceWithEmployee};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const ATTENDANCE_COLUMNS: &str =
    "a.id, a.user_id, a.date, a.status, a.check_in, a.check_out, a.created_at, a.updated_at";

/// Inclusive date bounds (YYYY-MM-DD)
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn push_range(qb: &mut QueryBuilder<'_, Sqlite>, range: &DateRange) {
    if let Some(from) = &range.from {
        qb.push(" AND a.date >= ").push_bind(from.clone());
    }
    if let Some(to) = &range.to {
        qb.push(" AND a.date <= ").push_bind(to.clone());
    }
}

/// Set a day to `leave`, inserting the row if needed
pub async fn mark_leave(conn: &mut SqliteConnection, user_id: i64, date: &str, now: i64) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO attendance (user_id, date, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) \
         ON CONFLICT(user_id, date) DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(date)
    .bind(AttendanceStatus::Leave)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(())
}

/// Force every existing row in `start..=end` to `absent`
///
/// Rows are only updated, never inserted. Returns the number of rows changed.
pub async fn mark_absent_range(
    conn: &mut SqliteConnection,
    user_id: i64,
    start: &str,
    end: &str,
    now: i64,
) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE attendance SET status = ?1, updated_at = ?2 WHERE user_id = ?3 AND date >= ?4 AND date <= ?5",
    )
    .bind(AttendanceStatus::Absent)
    .bind(now)
    .bind(user_id)
    .bind(start)
    .bind(end)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected())
}

/// A user's attendance, latest day first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64, range: &DateRange) -> RepoResult<Vec<AttendanceRecord>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {ATTENDANCE_COLUMNS} FROM attendance a WHERE a.user_id = "));
    qb.push_bind(user_id);
    push_range(&mut qb, range);
    qb.push(" ORDER BY a.date DESC");

    let records = qb.build_query_as::<AttendanceRecord>().fetch_all(pool).await?;
    Ok(records)
}

/// Attendance across users with employee identity
pub async fn find_all(
    pool: &SqlitePool,
    user_id: Option<i64>,
    range: &DateRange,
) -> RepoResult<Vec<AttendanceWithEmployee>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {ATTENDANCE_COLUMNS}, u.employee_id, p.first_name, p.last_name \
         FROM attendance a JOIN users u ON u.id = a.user_id \
         LEFT JOIN employee_profiles p ON p.user_id = a.user_id WHERE 1 = 1"
    ));
    if let Some(user_id) = user_id {
        qb.push(" AND a.user_id = ").push_bind(user_id);
    }
    push_range(&mut qb, range);
    qb.push(" ORDER BY a.date DESC, a.user_id");

    let records = qb.build_query_as::<AttendanceWithEmployee>().fetch_all(pool).await?;
    Ok(records)
}
