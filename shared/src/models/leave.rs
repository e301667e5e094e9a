//! Leave Request Model

use super::employee::EmployeeIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leave type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum LeaveType {
    Paid,
    Sick,
    Unpaid,
}

impl LeaveType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "paid" => Some(Self::Paid),
            "sick" => Some(Self::Sick),
            "unpaid" => Some(Self::Unpaid),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Sick => "sick",
            Self::Unpaid => "unpaid",
        }
    }
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Default for LeaveStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leave request row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveRequest {
    pub id: i64,
    pub user_id: i64,
    pub leave_type: LeaveType,
    /// YYYY-MM-DD, inclusive
    pub start_date: String,
    /// YYYY-MM-DD, inclusive
    pub end_date: String,
    pub status: LeaveStatus,
    pub remarks: Option<String>,
    pub admin_comment: Option<String>,
    pub approved_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Leave request with requester identity (admin view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveRequestWithEmployee {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub leave: LeaveRequest,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub employee: EmployeeIdentity,
}

/// Submit leave payload
///
/// Fields are loosely typed so bad values surface as 400 validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveCreate {
    #[serde(default)]
    pub leave_type: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub remarks: Option<String>,
}

/// Approve/reject payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveDecision {
    #[serde(default)]
    pub status: String,
    pub admin_comment: Option<String>,
}

/// Query for the admin listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveQuery {
    pub status: Option<String>,
}
