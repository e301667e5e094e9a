//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Admin,
    Hr,
    #[default]
    Employee,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hr => "hr",
            Self::Employee => "employee",
        }
    }

    /// Admin and HR manage other people's records
    pub const fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "hr" => Ok(Self::Hr),
            "employee" => Ok(Self::Employee),
            other => Err(format!("Invalid role: {other}")),
        }
    }
}

/// User account row (login identity)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub employee_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_and_prints() {
        assert_eq!("hr".parse::<Role>(), Ok(Role::Hr));
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!(Role::Hr.is_privileged());
        assert!(!Role::Employee.is_privileged());
        assert_eq!(Role::default(), Role::Employee);
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: 1,
            employee_id: "EMP001".into(),
            username: "Jane Doe".into(),
            email: "jane@example.com".into(),
            role: Role::Employee,
            password_hash: "$argon2id$secret".into(),
            created_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"employee\""));
    }
}
