//! Money calculation utilities using rust_decimal for precision
//!
//! Payroll amounts are stored as `f64`; arithmetic happens in `Decimal`
//! and is rounded back to 2 decimal places (half away from zero).

use rust_decimal::prelude::*;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Rounding precision for monetary values
const DECIMAL_PLACES: u32 = 2;

/// Upper bound for any single payroll amount
pub const MAX_AMOUNT: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Validate a payroll amount: finite, non-negative, bounded
pub fn validate_amount(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(invalid_amount(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(invalid_amount(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(invalid_amount(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

fn invalid_amount(message: String) -> AppError {
    AppError::with_message(ErrorCode::PayrollInvalidAmount, message)
}

/// Earliest and latest accepted payroll years
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Validate a payroll period; both parts are required
pub fn validate_period(month: Option<i32>, year: Option<i32>) -> AppResult<(i32, i32)> {
    let (Some(month), Some(year)) = (month, year) else {
        return Err(AppError::with_message(
            ErrorCode::PayrollInvalidPeriod,
            "Month and year are required",
        ));
    };
    if !(1..=12).contains(&month) {
        return Err(AppError::with_message(
            ErrorCode::PayrollInvalidPeriod,
            format!("Month must be between 1 and 12, got {month}"),
        ));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::with_message(
            ErrorCode::PayrollInvalidPeriod,
            format!("Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"),
        ));
    }
    Ok((month, year))
}

/// Amounts of one payroll period, each rounded to cents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayrollAmounts {
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_salary: f64,
}

/// `net = base + allowances - deductions`, computed in Decimal
///
/// Net may be negative when deductions exceed the gross amount.
pub fn compute_net_salary(base: f64, allowances: f64, deductions: f64) -> PayrollAmounts {
    let base = to_decimal(base);
    let allowances = to_decimal(allowances);
    let deductions = to_decimal(deductions);
    let net = base + allowances - deductions;

    PayrollAmounts {
        base_salary: to_f64(base),
        allowances: to_f64(allowances),
        deductions: to_f64(deductions),
        net_salary: to_f64(net),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_bounds() {
        assert_eq!(validate_period(Some(1), Some(2024)).unwrap(), (1, 2024));
        assert_eq!(validate_period(Some(12), Some(9999)).unwrap(), (12, 9999));
        for (m, y) in [(Some(0), Some(2024)), (Some(13), Some(2024)), (Some(5), Some(1899)), (None, Some(2024)), (Some(5), None)] {
            let err = validate_period(m, y).unwrap_err();
            assert_eq!(err.code, ErrorCode::PayrollInvalidPeriod);
            assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn net_salary_basic() {
        let amounts = compute_net_salary(1000.0, 200.0, 50.0);
        assert_eq!(amounts.net_salary, 1150.0);
        assert_eq!(format!("{:.2}", amounts.net_salary), "1150.00");
    }

    #[test]
    fn net_salary_avoids_float_drift() {
        // 0.1 + 0.2 - 0.3 is 5.55e-17 in plain f64
        assert_eq!(compute_net_salary(0.1, 0.2, 0.3).net_salary, 0.0);
        assert_eq!(compute_net_salary(2500.1, 99.95, 0.05).net_salary, 2600.0);
    }

    #[test]
    fn deductions_may_exceed_gross() {
        assert_eq!(compute_net_salary(100.0, 0.0, 150.0).net_salary, -50.0);
    }

    #[test]
    fn validate_amount_rejects_bad_values() {
        assert!(validate_amount(0.0, "allowances").is_ok());
        assert!(validate_amount(-0.01, "allowances").is_err());
        assert!(validate_amount(f64::NAN, "base_salary").is_err());
        assert!(validate_amount(f64::INFINITY, "base_salary").is_err());
        let err = validate_amount(MAX_AMOUNT * 2.0, "base_salary").unwrap_err();
        assert_eq!(err.code, ErrorCode::PayrollInvalidAmount);
    }
}
