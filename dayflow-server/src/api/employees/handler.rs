//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::MessageResponse;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, PersonalFields, PrivilegedFields, Role};

use crate::auth::{Action, CurrentUser, Resource, hash_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, employee};
use crate::db::repository::employee::{NewEmployee, ProfileChanges};
use crate::utils::money::validate_amount;
use crate::utils::time::parse_optional_date;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_email, validate_employee_id,
    validate_optional_text, validate_password,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn validate_personal(fields: &PersonalFields) -> AppResult<()> {
    validate_optional_text(&fields.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&fields.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&fields.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&fields.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&fields.profile_picture, "profile_picture", MAX_URL_LEN)?;
    Ok(())
}

fn validate_privileged(fields: &PrivilegedFields) -> AppResult<()> {
    validate_optional_text(&fields.job_title, "job_title", MAX_NAME_LEN)?;
    validate_optional_text(&fields.department, "department", MAX_NAME_LEN)?;
    validate_optional_text(&fields.employment_type, "employment_type", MAX_SHORT_TEXT_LEN)?;
    parse_optional_date(fields.hire_date.as_deref())?;
    if let Some(salary) = fields.salary {
        validate_amount(salary, "salary")?;
    }
    Ok(())
}

fn parse_role(role: &str) -> AppResult<Role> {
    role.trim()
        .parse::<Role>()
        .map_err(|e| AppError::with_message(ErrorCode::InvalidRole, e))
}

/// `"first last"` trimmed; `None` when both parts are blank
fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let name = format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
        .trim()
        .to_string();
    (!name.is_empty()).then_some(name)
}

/// Map a unique-constraint violation on `users` to a specific conflict
fn duplicate_error(message: &str) -> AppError {
    let code = if message.contains("users.email") {
        ErrorCode::EmployeeEmailExists
    } else if message.contains("users.employee_id") {
        ErrorCode::EmployeeIdExists
    } else if message.contains("users.username") {
        ErrorCode::EmployeeUsernameExists
    } else {
        ErrorCode::AlreadyExists
    };
    AppError::new(code)
}

/// GET /api/employees - all employees, newest first
pub async fn list(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<Vec<Employee>>> {
    user.authorize(Resource::Employee, Action::List, None)?;
    let employees = employee::find_all(&state.pool).await?;
    Ok(Json(employees))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    // Checked before the lookup: non-owners get 403 for unknown ids too
    user.authorize(Resource::Employee, Action::Read, Some(id))?;

    let employee = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;
    Ok(Json(employee))
}

/// POST /api/employees - create account and profile
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    user.authorize(Resource::Employee, Action::Create, None)?;

    let role = match payload.role.as_deref() {
        Some(r) => parse_role(r)?,
        None => Role::Employee,
    };
    if role.is_privileged() {
        user.authorize(Resource::EmployeeRole, Action::Create, None)?;
    }

    let email = payload.email.trim().to_string();
    validate_email(&email)?;
    validate_password(&payload.password)?;
    let employee_id = payload.employee_id.trim().to_string();
    // Empty means "assign the next EMPnnnn"
    if !employee_id.is_empty() {
        validate_employee_id(&employee_id)?;
    }
    validate_personal(&payload.personal)?;
    validate_privileged(&payload.privileged)?;

    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or_else(|| display_name(payload.personal.first_name.as_deref(), payload.personal.last_name.as_deref()))
        .unwrap_or_else(|| email.clone());
    validate_optional_text(&Some(username.clone()), "username", MAX_NAME_LEN)?;

    let password_hash =
        hash_password(&payload.password).map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let created = employee::create(
        &state.pool,
        NewEmployee {
            employee_id,
            username,
            email,
            password_hash,
            role,
            personal: payload.personal,
            privileged: payload.privileged,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(msg) => duplicate_error(&msg),
        other => other.into(),
    })?;

    tracing::info!(
        employee_id = %created.employee_id,
        role = %created.role,
        created_by = user.id,
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/employees/{id} - partial profile update
///
/// Fields the caller may not write are dropped, not rejected: employees
/// editing themselves keep only personal fields, and only admins change
/// roles.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<MessageResponse>> {
    user.authorize(Resource::Employee, Action::Update, Some(id))?;

    let existing = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    validate_personal(&payload.personal)?;

    let privileged = if user.can(Resource::EmployeePrivileged, Action::Update, Some(id)) {
        validate_privileged(&payload.privileged)?;
        payload.privileged
    } else {
        if !payload.privileged.is_empty() {
            tracing::debug!(user_id = user.id, target = id, "Ignoring privileged fields in self-update");
        }
        PrivilegedFields::default()
    };

    let role = match payload.role.as_deref() {
        Some(r) if user.can(Resource::EmployeeRole, Action::Update, Some(id)) => Some(parse_role(r)?),
        _ => None,
    };

    let changes = ProfileChanges {
        personal: payload.personal,
        privileged,
        role,
    };
    employee::update_profile(&state.pool, id, &changes)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::EmployeeNotFound),
            other => other.into(),
        })?;

    // Username follows the supplied value, else the (possibly new) full name
    let first = changes.personal.first_name.as_deref().or(existing.first_name.as_deref());
    let last = changes.personal.last_name.as_deref().or(existing.last_name.as_deref());
    let username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or_else(|| display_name(first, last));

    if let Some(username) = username
        && username != existing.username
        && let Err(e) = employee::update_username(&state.pool, id, &username).await
    {
        tracing::warn!(user_id = id, username = %username, error = %e, "Username update skipped");
    }

    if let Some(role) = changes.role {
        tracing::info!(user_id = id, role = %role, changed_by = user.id, "Employee role updated");
    }

    Ok(Json(MessageResponse::new("Profile updated successfully")))
}
