//! Payroll Repository

use super::{RepoError, RepoResult};
use shared::models::{PayrollRecord, PayrollStatus, PayrollWithEmployee, SlipEmployee};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const PAYROLL_COLUMNS: &str = "pr.id, pr.user_id, pr.month, pr.year, pr.base_salary, pr.allowances, \
     pr.deductions, pr.net_salary, pr.status, pr.created_at, pr.updated_at";

/// Validated payroll figures for one period; `net_salary` already computed
#[derive(Debug, Clone)]
pub struct NewPayroll {
    pub user_id: i64,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub status: PayrollStatus,
}

/// AND-composed listing filters
#[derive(Debug, Clone, Copy, Default)]
pub struct PayrollFilter {
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub user_id: Option<i64>,
}

/// Insert or replace the record for (user, month, year)
pub async fn upsert(pool: &SqlitePool, data: &NewPayroll) -> RepoResult<PayrollRecord> {
    let now = shared::util::now_millis();
    let record = sqlx::query_as::<_, PayrollRecord>(
        "INSERT INTO payroll (user_id, month, year, base_salary, allowances, deductions, net_salary, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) \
         ON CONFLICT(user_id, month, year) DO UPDATE SET \
            base_salary = excluded.base_salary, \
            allowances = excluded.allowances, \
            deductions = excluded.deductions, \
            net_salary = excluded.net_salary, \
            status = excluded.status, \
            updated_at = excluded.updated_at \
         RETURNING id, user_id, month, year, base_salary, allowances, deductions, net_salary, status, created_at, updated_at",
    )
    .bind(data.user_id)
    .bind(data.month)
    .bind(data.year)
    .bind(data.base_salary)
    .bind(data.allowances)
    .bind(data.deductions)
    .bind(data.net_salary)
    .bind(data.status)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(record)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PayrollRecord>> {
    let record = sqlx::query_as::<_, PayrollRecord>(&format!(
        "SELECT {PAYROLL_COLUMNS} FROM payroll pr WHERE pr.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

pub async fn find_for_period(
    pool: &SqlitePool,
    user_id: i64,
    month: i32,
    year: i32,
) -> RepoResult<Option<PayrollRecord>> {
    let record = sqlx::query_as::<_, PayrollRecord>(&format!(
        "SELECT {PAYROLL_COLUMNS} FROM payroll pr WHERE pr.user_id = ?1 AND pr.month = ?2 AND pr.year = ?3"
    ))
    .bind(user_id)
    .bind(month)
    .bind(year)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// A user's records, latest period first
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<PayrollRecord>> {
    let records = sqlx::query_as::<_, PayrollRecord>(&format!(
        "SELECT {PAYROLL_COLUMNS} FROM payroll pr WHERE pr.user_id = ? ORDER BY pr.year DESC, pr.month DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(records)
}

/// Records across users with employee identity
pub async fn find_all(pool: &SqlitePool, filter: PayrollFilter) -> RepoResult<Vec<PayrollWithEmployee>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {PAYROLL_COLUMNS}, u.employee_id, p.first_name, p.last_name \
         FROM payroll pr JOIN users u ON u.id = pr.user_id \
         LEFT JOIN employee_profiles p ON p.user_id = pr.user_id WHERE 1 = 1"
    ));
    if let Some(month) = filter.month {
        qb.push(" AND pr.month = ").push_bind(month);
    }
    if let Some(year) = filter.year {
        qb.push(" AND pr.year = ").push_bind(year);
    }
    if let Some(user_id) = filter.user_id {
        qb.push(" AND pr.user_id = ").push_bind(user_id);
    }
    qb.push(" ORDER BY pr.year DESC, pr.month DESC, pr.user_id");

    let records = qb.build_query_as::<PayrollWithEmployee>().fetch_all(pool).await?;
    Ok(records)
}

/// Set the status; setting the current value again succeeds
pub async fn set_status(pool: &SqlitePool, id: i64, status: PayrollStatus) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE payroll SET status = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(status)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Payroll record {id} not found")));
    }
    Ok(())
}

/// Employee block for a salary slip
pub async fn find_slip_employee(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<SlipEmployee>> {
    let employee = sqlx::query_as::<_, SlipEmployee>(
        "SELECT u.id, u.employee_id, p.first_name, p.last_name, p.department, p.job_title \
         FROM users u LEFT JOIN employee_profiles p ON p.user_id = u.id WHERE u.id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}
