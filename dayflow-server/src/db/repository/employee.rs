//! Employee Repository
//!
//! An employee is a `users` row joined with its `employee_profiles` row.

use super::{RepoError, RepoResult, user};
use shared::models::{Employee, PersonalFields, PrivilegedFields, Role};
use sqlx::{SqliteConnection, SqlitePool};

const EMPLOYEE_SELECT: &str = "SELECT u.id, u.employee_id, u.username, u.email, u.role, u.created_at, \
     p.first_name, p.last_name, p.phone, p.address, p.profile_picture, \
     p.job_title, p.department, p.hire_date, p.employment_type, p.salary, p.updated_at \
     FROM users u LEFT JOIN employee_profiles p ON p.user_id = u.id";

/// Validated account data for a new employee
#[derive(Debug, Clone)]
pub struct NewEmployee {
    /// Empty to assign the next `EMPnnnn` ID
    pub employee_id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub personal: PersonalFields,
    pub privileged: PrivilegedFields,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub personal: PersonalFields,
    pub privileged: PrivilegedFields,
    pub role: Option<Role>,
}

/// All employees, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "{EMPLOYEE_SELECT} ORDER BY u.created_at DESC, u.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!("{EMPLOYEE_SELECT} WHERE u.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(employee)
}

/// Create the user and its profile in one transaction
pub async fn create(pool: &SqlitePool, data: NewEmployee) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let employee_id = if data.employee_id.is_empty() {
        next_employee_id(&mut tx).await?
    } else {
        data.employee_id
    };

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (employee_id, username, email, role, password_hash, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(&employee_id)
    .bind(&data.username)
    .bind(&data.email)
    .bind(data.role)
    .bind(&data.password_hash)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let p = &data.personal;
    let q = &data.privileged;
    sqlx::query(
        "INSERT INTO employee_profiles (user_id, first_name, last_name, phone, address, profile_picture, job_title, department, hire_date, employment_type, salary, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )
    .bind(id)
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.phone)
    .bind(&p.address)
    .bind(&p.profile_picture)
    .bind(&q.job_title)
    .bind(&q.department)
    .bind(&q.hire_date)
    .bind(&q.employment_type)
    .bind(q.salary)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

async fn next_employee_id(conn: &mut SqliteConnection) -> RepoResult<String> {
    let next: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) + 1 FROM users")
        .fetch_one(conn)
        .await?;
    Ok(format!("EMP{next:04}"))
}

/// Apply profile changes (and an optional role change) in one transaction
///
/// The profile row is created if the user never had one.
pub async fn update_profile(pool: &SqlitePool, id: i64, changes: &ProfileChanges) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if found.is_none() {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }

    let p = &changes.personal;
    let q = &changes.privileged;
    sqlx::query(
        "INSERT INTO employee_profiles (user_id, first_name, last_name, phone, address, profile_picture, job_title, department, hire_date, employment_type, salary, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) \
         ON CONFLICT(user_id) DO UPDATE SET \
            first_name = COALESCE(excluded.first_name, employee_profiles.first_name), \
            last_name = COALESCE(excluded.last_name, employee_profiles.last_name), \
            phone = COALESCE(excluded.phone, employee_profiles.phone), \
            address = COALESCE(excluded.address, employee_profiles.address), \
            profile_picture = COALESCE(excluded.profile_picture, employee_profiles.profile_picture), \
            job_title = COALESCE(excluded.job_title, employee_profiles.job_title), \
            department = COALESCE(excluded.department, employee_profiles.department), \
            hire_date = COALESCE(excluded.hire_date, employee_profiles.hire_date), \
            employment_type = COALESCE(excluded.employment_type, employee_profiles.employment_type), \
            salary = COALESCE(excluded.salary, employee_profiles.salary), \
            updated_at = excluded.updated_at",
    )
    .bind(id)
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.phone)
    .bind(&p.address)
    .bind(&p.profile_picture)
    .bind(&q.job_title)
    .bind(&q.department)
    .bind(&q.hire_date)
    .bind(&q.employment_type)
    .bind(q.salary)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if let Some(role) = changes.role {
        user::update_role(&mut tx, id, role).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Rename the user; a taken name yields `Duplicate`
pub async fn update_username(pool: &SqlitePool, id: i64, username: &str) -> RepoResult<()> {
    let mut conn = pool.acquire().await?;
    user::update_username(&mut conn, id, username).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    fn new_employee(employee_id: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: employee_id.into(),
            username: format!("user-{employee_id}"),
            email: email.into(),
            password_hash: "hash".into(),
            role: Role::Employee,
            personal: PersonalFields {
                first_name: Some("Ann".into()),
                last_name: Some("Lee".into()),
                ..Default::default()
            },
            privileged: PrivilegedFields {
                job_title: Some("Engineer".into()),
                salary: Some(5000.0),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn create_and_list_newest_first() {
        let pool = test_support::pool().await;
        let first = create(&pool, new_employee("EMP100", "a@example.com")).await.unwrap();
        let second = create(&pool, new_employee("", "b@example.com")).await.unwrap();

        assert_eq!(first.job_title.as_deref(), Some("Engineer"));
        assert_eq!(first.full_name(), "Ann Lee");
        assert_eq!(second.employee_id, format!("EMP{:04}", second.id));

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn duplicate_email_rolls_back() {
        let pool = test_support::pool().await;
        create(&pool, new_employee("EMP1", "same@example.com")).await.unwrap();
        let err = create(&pool, new_employee("EMP2", "same@example.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(msg) if msg.contains("email")));
        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_absent_fields() {
        let pool = test_support::pool().await;
        let emp = create(&pool, new_employee("EMP1", "a@example.com")).await.unwrap();

        let changes = ProfileChanges {
            personal: PersonalFields {
                phone: Some("555-0100".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        update_profile(&pool, emp.id, &changes).await.unwrap();

        let after = find_by_id(&pool, emp.id).await.unwrap().unwrap();
        assert_eq!(after.phone.as_deref(), Some("555-0100"));
        assert_eq!(after.first_name.as_deref(), Some("Ann"));
        assert_eq!(after.job_title.as_deref(), Some("Engineer"));
        assert_eq!(after.salary, Some(5000.0));
    }

    #[tokio::test]
    async fn update_creates_missing_profile_and_changes_role() {
        let pool = test_support::pool().await;
        let id = test_support::insert_user(&pool, "EMP7", Role::Employee).await;

        let changes = ProfileChanges {
            privileged: PrivilegedFields {
                department: Some("Finance".into()),
                ..Default::default()
            },
            role: Some(Role::Hr),
            ..Default::default()
        };
        update_profile(&pool, id, &changes).await.unwrap();

        let after = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(after.department.as_deref(), Some("Finance"));
        assert_eq!(after.role, Role::Hr);
    }

    #[tokio::test]
    async fn update_unknown_employee_is_not_found() {
        let pool = test_support::pool().await;
        let err = update_profile(&pool, 42, &ProfileChanges::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
