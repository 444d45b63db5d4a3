//! Investment CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_investment_list;
use crate::error::{TeamFinError, TeamFinResult};
use crate::services::InvestmentService;
use crate::storage::Storage;

use super::{parse_money, parse_rate};

/// Investment subcommands
#[derive(Subcommand)]
pub enum InvestmentCommands {
    /// Register an investment position
    Add {
        /// Position name
        name: String,
        /// Current value
        current: String,
        /// Monthly contribution
        #[arg(short, long, default_value = "0")]
        monthly: String,
        /// Expected yearly return in percent (e.g., "10.5")
        #[arg(short, long, allow_hyphen_values = true)]
        rate: String,
    },

    /// List investment positions
    List,

    /// Delete an investment position
    Remove {
        /// Position name or ID
        investment: String,
    },
}

/// Handle an investment command
pub fn handle_investment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: InvestmentCommands,
) -> TeamFinResult<()> {
    let team = settings.team()?;
    let service = InvestmentService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        InvestmentCommands::Add {
            name,
            current,
            monthly,
            rate,
        } => {
            let investment = service.add(
                team,
                &name,
                parse_money(&current)?,
                parse_money(&monthly)?,
                parse_rate(&rate)?,
            )?;
            println!("Added investment: {}", investment.name);
            println!("  ID: {}", investment.id);
        }

        InvestmentCommands::List => {
            println!("{}", format_investment_list(&service.list(team)?, symbol).trim_end());
        }

        InvestmentCommands::Remove { investment } => {
            let existing = service
                .find(team, &investment)?
                .ok_or_else(|| TeamFinError::investment_not_found(&investment))?;

            service.remove(team, existing.id)?;
            println!("Removed investment: {}", existing.name);
        }
    }

    Ok(())
}
