//! Payroll Model

use super::employee::EmployeeIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payroll status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PayrollStatus {
    #[default]
    Pending,
    Paid,
}

impl PayrollStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payroll row, unique per (user_id, month, year)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PayrollRecord {
    pub id: i64,
    pub user_id: i64,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub status: PayrollStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payroll row with employee identity (admin view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PayrollWithEmployee {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub payroll: PayrollRecord,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub employee: EmployeeIdentity,
}

/// Create/save payroll payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollCreate {
    pub user_id: Option<i64>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub base_salary: Option<f64>,
    pub allowances: Option<f64>,
    pub deductions: Option<f64>,
    pub status: Option<String>,
}

/// Status change payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollStatusUpdate {
    #[serde(default)]
    pub status: String,
}

/// Admin listing filters, AND-composed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollQuery {
    pub month: Option<i32>,
    pub year: Option<i32>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// Employee block of a salary slip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SlipEmployee {
    pub id: i64,
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
}

/// Salary slip for one employee and one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalarySlip {
    pub employee: SlipEmployee,
    pub month: i32,
    pub year: i32,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
    pub status: PayrollStatus,
}

impl SalarySlip {
    pub fn new(employee: SlipEmployee, record: &PayrollRecord) -> Self {
        Self {
            employee,
            month: record.month,
            year: record.year,
            base_salary: record.base_salary,
            allowances: record.allowances,
            deductions: record.deductions,
            net_salary: record.net_salary,
            status: record.status,
        }
    }

    /// Download file name, e.g. `salary-slip-EMP001-3-2024.txt`
    ///
    /// Safe to quote in a header: characters outside `[A-Za-z0-9_-]` in the
    /// employee ID become `_`.
    pub fn file_name(&self) -> String {
        let employee_id: String = self
            .employee
            .employee_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("salary-slip-{employee_id}-{}-{}.txt", self.month, self.year)
    }

    /// Plain-text rendering used by the download endpoint
    pub fn render_text(&self) -> String {
        let e = &self.employee;
        format!(
            "SALARY SLIP\n\
             ===========\n\
             Employee: {} {}\n\
             Employee ID: {}\n\
             Department: {}\n\
             Month: {}/{}\n\
             \n\
             Base Salary: ${:.2}\n\
             Allowances: ${:.2}\n\
             Deductions: ${:.2}\n\
             ------------------------\n\
             Net Salary: ${:.2}\n\
             Status: {}\n",
            e.first_name.as_deref().unwrap_or_default(),
            e.last_name.as_deref().unwrap_or_default(),
            e.employee_id,
            e.department
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("N/A"),
            self.month,
            self.year,
            self.base_salary,
            self.allowances,
            self.deductions,
            self.net_salary,
            self.status,
        )
    }
}
