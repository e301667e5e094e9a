//! Employee Model
//!
//! An employee is a `users` row joined with its `employee_profiles` row.

use super::user::Role;
use serde::{Deserialize, Serialize};

/// Employee with profile (list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub employee_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    /// YYYY-MM-DD
    pub hire_date: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<f64>,
    pub updated_at: Option<i64>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Identity columns attached to leave/attendance/payroll rows in admin views
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeIdentity {
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Profile fields every user may change on their own record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
}

/// Profile fields reserved for admin/hr
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivilegedFields {
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<f64>,
}

impl PrivilegedFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Update employee payload
///
/// Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub username: Option<String>,
    #[serde(flatten)]
    pub personal: PersonalFields,
    #[serde(flatten)]
    pub privileged: PrivilegedFields,
    /// Honoured for admin callers only
    pub role: Option<String>,
}

/// Create employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub username: Option<String>,
    pub role: Option<String>,
    #[serde(flatten)]
    pub personal: PersonalFields,
    #[serde(flatten)]
    pub privileged: PrivilegedFields,
}
