//! Unified error codes for Dayflow
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Attendance errors
//! - 4xxx: Leave errors
//! - 5xxx: Payroll errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so clients can branch on it without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin or HR role required
    AdminRequired = 2003,
    /// Only admins may change roles
    RoleChangeForbidden = 2004,

    // ==================== 3xxx: Attendance ====================
    /// Attendance record not found
    AttendanceNotFound = 3001,

    // ==================== 4xxx: Leave ====================
    /// Leave request not found
    LeaveNotFound = 4001,
    /// Leave type is not one of paid/sick/unpaid
    LeaveInvalidType = 4002,
    /// Start date after end date
    LeaveInvalidDateRange = 4003,
    /// Approval status is not approved/rejected
    LeaveInvalidStatus = 4004,
    /// Requested range spans too many days
    LeaveRangeTooLong = 4005,

    // ==================== 5xxx: Payroll ====================
    /// Payroll record not found
    PayrollNotFound = 5001,
    /// Month or year out of range
    PayrollInvalidPeriod = 5002,
    /// Negative or non-finite amount
    PayrollInvalidAmount = 5003,
    /// Payroll status is not pending/paid
    PayrollInvalidStatus = 5004,
    /// No payroll record for the requested period
    SalarySlipNotFound = 5005,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Username already taken
    EmployeeUsernameExists = 8002,
    /// Employee ID already taken
    EmployeeIdExists = 8003,
    /// Email already taken
    EmployeeEmailExists = 8004,
    /// Role is not admin/hr/employee
    InvalidRole = 8005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            // Auth
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            // Permission
            Self::PermissionDenied => "Access denied",
            Self::AdminRequired => "Admin access required",
            Self::RoleChangeForbidden => "Only admins can change roles",

            // Attendance
            Self::AttendanceNotFound => "Attendance record not found",

            // Leave
            Self::LeaveNotFound => "Leave request not found",
            Self::LeaveInvalidType => "Invalid leave type",
            Self::LeaveInvalidDateRange => "Start date must be before end date",
            Self::LeaveInvalidStatus => "Invalid status",
            Self::LeaveRangeTooLong => "Leave range is too long",

            // Payroll
            Self::PayrollNotFound => "Payroll record not found",
            Self::PayrollInvalidPeriod => "Invalid payroll period",
            Self::PayrollInvalidAmount => "Invalid payroll amount",
            Self::PayrollInvalidStatus => "Invalid payroll status",
            Self::SalarySlipNotFound => "Salary slip not found",

            // Employee
            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeUsernameExists => "Username already exists",
            Self::EmployeeIdExists => "Employee ID already exists",
            Self::EmployeeEmailExists => "Email already exists",
            Self::InvalidRole => "Invalid role",

            // System
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::RoleChangeForbidden),

            // Attendance
            3001 => Ok(ErrorCode::AttendanceNotFound),

            // Leave
            4001 => Ok(ErrorCode::LeaveNotFound),
            4002 => Ok(ErrorCode::LeaveInvalidType),
            4003 => Ok(ErrorCode::LeaveInvalidDateRange),
            4004 => Ok(ErrorCode::LeaveInvalidStatus),
            4005 => Ok(ErrorCode::LeaveRangeTooLong),

            // Payroll
            5001 => Ok(ErrorCode::PayrollNotFound),
            5002 => Ok(ErrorCode::PayrollInvalidPeriod),
            5003 => Ok(ErrorCode::PayrollInvalidAmount),
            5004 => Ok(ErrorCode::PayrollInvalidStatus),
            5005 => Ok(ErrorCode::SalarySlipNotFound),

            // Employee
            8001 => Ok(ErrorCode::EmployeeNotFound),
            8002 => Ok(ErrorCode::EmployeeUsernameExists),
            8003 => Ok(ErrorCode::EmployeeIdExists),
            8004 => Ok(ErrorCode::EmployeeEmailExists),
            8005 => Ok(ErrorCode::InvalidRole),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
