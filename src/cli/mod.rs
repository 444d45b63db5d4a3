//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod investment;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use investment::{handle_investment_command, InvestmentCommands};
pub use report::{handle_report_command, OutputFormat, ReportCommands};

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::{Money, MonthPeriod};

/// Parse a period argument, defaulting to the current month
pub fn parse_period_or_current(period: Option<&str>) -> TeamFinResult<MonthPeriod> {
    match period {
        Some(s) => MonthPeriod::parse(s).map_err(|e| {
            TeamFinError::Validation(format!(
                "{}. Use YYYY-MM (e.g., 2025-01), 'current' or 'last'",
                e
            ))
        }),
        None => Ok(MonthPeriod::current()),
    }
}

/// Parse an amount argument ("1500", "1500.50", "R$ 89,90")
pub fn parse_money(s: &str) -> TeamFinResult<Money> {
    Money::parse(s).map_err(|e| TeamFinError::Validation(e.to_string()))
}

/// Parse an income share.
///
/// "35%" and "35" both mean 35%; values up to 1 without a percent sign are
/// read as fractions, so "0.35" is also 35%.
pub fn parse_percentage(s: &str) -> TeamFinResult<Decimal> {
    let trimmed = s.trim();
    let (number, explicit_percent) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed, false),
    };

    let value = Decimal::from_str(number)
        .map_err(|_| TeamFinError::Validation(format!("Invalid percentage: {}", s)))?;

    if explicit_percent || value > Decimal::ONE {
        Ok(value / Decimal::ONE_HUNDRED)
    } else {
        Ok(value)
    }
}

/// Parse a yearly return rate in percent ("8.5" or "8.5%")
pub fn parse_rate(s: &str) -> TeamFinResult<Decimal> {
    let number = s.trim().trim_end_matches('%').trim();
    Decimal::from_str(number)
        .map_err(|_| TeamFinError::Validation(format!("Invalid return rate: {}", s)))
}

/// Parse an expense date (YYYY-MM-DD) as midnight UTC, defaulting to now
pub fn parse_date_or_now(date: Option<&str>) -> TeamFinResult<DateTime<Utc>> {
    match date {
        Some(s) => {
            let day = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                TeamFinError::Validation(format!("Invalid date: {}. Use YYYY-MM-DD", s))
            })?;
            day.and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc())
                .ok_or_else(|| TeamFinError::Validation(format!("Invalid date: {}", s)))
        }
        None => Ok(Utc::now()),
    }
}
