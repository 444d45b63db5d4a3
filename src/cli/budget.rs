//! Budget CLI commands
//!
//! Monthly income, envelopes and expense categories.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_budget, format_category_tree, format_envelope_list};
use crate::error::{TeamFinError, TeamFinResult};
use crate::models::Classification;
use crate::permissions::RoleTable;
use crate::services::{BudgetService, EnvelopeUpdate};
use crate::storage::Storage;

use super::{parse_money, parse_percentage, parse_period_or_current};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Declare the team's income for a month
    Income {
        /// Amount (e.g., "8500" or "8500.00")
        amount: String,
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show the declared income of a month
    Show {
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Envelope management
    #[command(subcommand)]
    Envelope(EnvelopeCommands),

    /// Expense category management
    #[command(subcommand)]
    Category(CategoryCommands),
}

/// Envelope subcommands
#[derive(Subcommand)]
pub enum EnvelopeCommands {
    /// Create an envelope
    Add {
        /// Envelope name
        name: String,
        /// Share of income ("35%", "35" or "0.35")
        percentage: String,
        /// Classification: needs, wants, savings or other
        #[arg(short, long, default_value = "other")]
        class: String,
    },

    /// Change an envelope
    Edit {
        /// Envelope name or ID
        envelope: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New share of income
        #[arg(short, long)]
        percentage: Option<String>,
        /// New classification
        #[arg(short, long)]
        class: Option<String>,
    },

    /// List envelopes
    List,

    /// Delete an envelope; its categories become unlinked
    Remove {
        /// Envelope name or ID
        envelope: String,
    },
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create an expense category
    Add {
        /// Category name
        name: String,
        /// Envelope to link the category to
        #[arg(short, long)]
        envelope: Option<String>,
    },

    /// Link a category to an envelope, or unlink it when no envelope is given
    Link {
        /// Category name or ID
        category: String,
        /// Envelope name or ID
        envelope: Option<String>,
    },

    /// List categories grouped by envelope
    List,
}

fn parse_class(s: &str) -> TeamFinResult<Classification> {
    s.parse::<Classification>()
        .map_err(|e| TeamFinError::Validation(e.to_string()))
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> TeamFinResult<()> {
    let team = settings.team()?;
    let gate = RoleTable::from_settings(settings);
    let service = BudgetService::new(storage, &gate, settings.member()?);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Income { amount, period } => {
            let period = parse_period_or_current(period.as_deref())?;
            let budget = service.set_income(team, period, parse_money(&amount)?)?;
            println!("{}", format_budget(period, Some(&budget), symbol));
        }

        BudgetCommands::Show { period } => {
            let period = parse_period_or_current(period.as_deref())?;
            let budget = service.get_budget(team, period)?;
            println!("{}", format_budget(period, budget.as_ref(), symbol));
        }

        BudgetCommands::Envelope(cmd) => match cmd {
            EnvelopeCommands::Add {
                name,
                percentage,
                class,
            } => {
                let envelope = service.add_envelope(
                    team,
                    &name,
                    parse_percentage(&percentage)?,
                    parse_class(&class)?,
                )?;
                println!("Created envelope: {}", envelope);
                println!("  ID: {}", envelope.id);
            }

            EnvelopeCommands::Edit {
                envelope,
                name,
                percentage,
                class,
            } => {
                let existing = service
                    .find_envelope(team, &envelope)?
                    .ok_or_else(|| TeamFinError::envelope_not_found(&envelope))?;

                let update = EnvelopeUpdate {
                    name,
                    percentage: percentage.as_deref().map(parse_percentage).transpose()?,
                    classification: class.as_deref().map(parse_class).transpose()?,
                };
                let updated = service.update_envelope(team, existing.id, update)?;
                println!("Updated envelope: {}", updated);
            }

            EnvelopeCommands::List => {
                println!("{}", format_envelope_list(&service.list_envelopes(team)?).trim_end());
            }

            EnvelopeCommands::Remove { envelope } => {
                let existing = service
                    .find_envelope(team, &envelope)?
                    .ok_or_else(|| TeamFinError::envelope_not_found(&envelope))?;

                let (removed, unlinked) = service.remove_envelope(team, existing.id)?;
                println!("Removed envelope: {}", removed.name);
                if unlinked > 0 {
                    println!("  {} categories are now unlinked", unlinked);
                }
            }
        },

        BudgetCommands::Category(cmd) => match cmd {
            CategoryCommands::Add { name, envelope } => {
                let envelope_id = match envelope {
                    Some(identifier) => Some(
                        service
                            .find_envelope(team, &identifier)?
                            .ok_or_else(|| TeamFinError::envelope_not_found(&identifier))?
                            .id,
                    ),
                    None => None,
                };

                let category = service.add_category(team, &name, envelope_id)?;
                println!("Created category: {}", category.name);
                println!("  ID: {}", category.id);
            }

            CategoryCommands::Link { category, envelope } => {
                let existing = service
                    .find_category(team, &category)?
                    .ok_or_else(|| TeamFinError::category_not_found(&category))?;

                let target = match envelope {
                    Some(identifier) => Some(
                        service
                            .find_envelope(team, &identifier)?
                            .ok_or_else(|| TeamFinError::envelope_not_found(&identifier))?,
                    ),
                    None => None,
                };

                service.link_category(team, existing.id, target.as_ref().map(|e| e.id))?;
                match target {
                    Some(envelope) => println!("Linked '{}' to '{}'", existing.name, envelope.name),
                    None => println!("Unlinked '{}'", existing.name),
                }
            }

            CategoryCommands::List => {
                let envelopes = service.list_envelopes(team)?;
                let categories = service.list_categories(team)?;
                println!("{}", format_category_tree(&envelopes, &categories).trim_end());
            }
        },
    }

    Ok(())
}
