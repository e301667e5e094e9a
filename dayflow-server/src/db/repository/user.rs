//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::hash_password;
use shared::models::{Role, User};
use sqlx::{SqliteConnection, SqlitePool};

const USER_COLUMNS: &str =
    "SELECT id, employee_id, username, email, role, password_hash, created_at FROM users";

/// Employee ID given to the bootstrap admin
pub const BOOTSTRAP_EMPLOYEE_ID: &str = "ADMIN";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{USER_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Find by username, email or employee ID
pub async fn find_by_login(pool: &SqlitePool, login: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "{USER_COLUMNS} WHERE username = ?1 OR email = ?1 OR employee_id = ?1 \
         ORDER BY CASE WHEN username = ?1 THEN 0 WHEN email = ?1 THEN 1 ELSE 2 END LIMIT 1"
    ))
    .bind(login)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Create the first admin account when the users table is empty
///
/// Returns `true` when an account was created.
pub async fn create_admin_if_empty(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> RepoResult<bool> {
    let hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let mut tx = pool.begin().await?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (employee_id, username, email, role, password_hash, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(BOOTSTRAP_EMPLOYEE_ID)
    .bind(username)
    .bind(email)
    .bind(Role::Admin)
    .bind(&hash)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO employee_profiles (user_id, updated_at) VALUES (?1, ?2)")
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(true)
}

/// Rename a user; fails with `Duplicate` when the name is taken
pub async fn update_username(conn: &mut SqliteConnection, id: i64, username: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET username = ?1 WHERE id = ?2")
        .bind(username)
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

pub async fn update_role(conn: &mut SqliteConnection, id: i64, role: Role) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE users SET role = ?1 WHERE id = ?2")
        .bind(role)
        .bind(id)
        .execute(conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn bootstrap_admin_is_created_once() {
        let pool = test_support::pool().await;
        assert!(create_admin_if_empty(&pool, "admin", "admin@example.com", "secret-pass").await.unwrap());
        assert!(!create_admin_if_empty(&pool, "other", "other@example.com", "secret-pass").await.unwrap());
        assert_eq!(count(&pool).await.unwrap(), 1);

        let admin = find_by_login(&pool, "admin@example.com").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.employee_id, BOOTSTRAP_EMPLOYEE_ID);
        assert!(verify_password("secret-pass", &admin.password_hash));
    }

    #[tokio::test]
    async fn login_matches_username_email_or_employee_id() {
        let pool = test_support::pool().await;
        let id = test_support::insert_user(&pool, "EMP010", Role::Employee).await;

        for login in ["EMP010", "EMP010@example.com"] {
            let user = find_by_login(&pool, login).await.unwrap().unwrap();
            assert_eq!(user.id, id);
        }
        assert!(find_by_login(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() {
        let pool = test_support::pool().await;
        let a = test_support::insert_user(&pool, "EMP001", Role::Employee).await;
        test_support::insert_user(&pool, "EMP002", Role::Employee).await;

        let mut conn = pool.acquire().await.unwrap();
        let err = update_username(&mut conn, a, "EMP002").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        update_username(&mut conn, a, "Ann Lee").await.unwrap();
        drop(conn);
        assert_eq!(find_by_id(&pool, a).await.unwrap().unwrap().username, "Ann Lee");
    }

    #[tokio::test]
    async fn missing_user_does_not_exist() {
        let pool = test_support::pool().await;
        assert!(!exists(&pool, 99).await.unwrap());
        let mut conn = pool.acquire().await.unwrap();
        assert!(matches!(
            update_role(&mut conn, 99, Role::Hr).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
