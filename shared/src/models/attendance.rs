//! Attendance Model

use super::employee::EmployeeIdentity;
use serde::{Deserialize, Serialize};

/// Per-day attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
}

impl AttendanceStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Leave => "leave",
            Self::HalfDay => "half_day",
        }
    }
}

/// Attendance row, unique per (user_id, date)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub status: AttendanceStatus,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Attendance row with employee identity (admin view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceWithEmployee {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub record: AttendanceRecord,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub employee: EmployeeIdentity,
}

/// Listing filters (inclusive date bounds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_day_is_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::HalfDay).unwrap();
        assert_eq!(json, "\"half_day\"");
        assert_eq!(AttendanceStatus::HalfDay.as_str(), "half_day");
    }
}
