//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{TeamFinError, TeamFinResult};
use crate::permissions::RoleTable;
use crate::services::{BudgetService, ExpenseService};
use crate::storage::Storage;

use super::{parse_date_or_now, parse_money, parse_period_or_current};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// Amount spent (e.g., "89.90")
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date of the expense (YYYY-MM-DD), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        memo: String,
    },

    /// List the expenses of a month
    List {
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete an expense
    Remove {
        /// Expense ID (full or as shown by 'expense list')
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TeamFinResult<()> {
    let team = settings.team()?;
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    let gate = RoleTable::from_settings(settings);
    let budget = BudgetService::new(storage, &gate, settings.member()?);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
            memo,
        } => {
            let category = match category {
                Some(identifier) => Some(
                    budget
                        .find_category(team, &identifier)?
                        .ok_or_else(|| TeamFinError::category_not_found(&identifier))?,
                ),
                None => None,
            };

            let expense = service.record(
                team,
                parse_money(&amount)?,
                parse_date_or_now(date.as_deref())?,
                category.as_ref().map(|c| c.id),
                &memo,
            )?;

            println!(
                "Recorded expense: {} {}",
                expense.amount.format_with_symbol(symbol),
                category.map(|c| c.name).unwrap_or_default()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { period } => {
            let period = parse_period_or_current(period.as_deref())?;
            let expenses = service.list_for_month(team, period)?;
            let categories = budget.list_categories(team)?;

            println!(
                "{}",
                format_expense_list(&expenses, &categories, symbol, &settings.date_format).trim_end()
            );
        }

        ExpenseCommands::Remove { id } => {
            let expense = service
                .find(team, &id)?
                .ok_or_else(|| TeamFinError::expense_not_found(&id))?;

            service.delete(team, expense.id)?;
            println!(
                "Deleted expense {} ({})",
                expense.id,
                expense.amount.format_with_symbol(symbol)
            );
        }
    }

    Ok(())
}
