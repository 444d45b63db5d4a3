use anyhow::Result;
use clap::{Parser, Subcommand};

use teamfin::cli::{
    handle_budget_command, handle_expense_command, handle_investment_command,
    handle_report_command, BudgetCommands, ExpenseCommands, InvestmentCommands, ReportCommands,
};
use teamfin::config::{paths::TeamFinPaths, settings::Settings};
use teamfin::logging::init_logger;
use teamfin::models::{MemberId, TeamId};
use teamfin::permissions::Role;
use teamfin::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "teamfin",
    version,
    about = "Shared household budgeting from the command line",
    long_about = "teamfin splits a team's monthly income across percentage envelopes, \
                  reconciles expenses against them and projects investment growth."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and a default team
    Init,

    /// Show current configuration and paths
    Config,

    /// Income, envelope and category management
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense management
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Investment management
    #[command(subcommand, alias = "inv")]
    Investment(InvestmentCommands),

    /// Dashboards, summaries and projections
    #[command(subcommand)]
    Report(ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let paths = TeamFinPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            let team = *settings.default_team.get_or_insert_with(TeamId::new);
            let member = *settings.acting_member.get_or_insert_with(MemberId::new);
            if settings.role_of(member).is_none() {
                settings.set_role(member, Role::Owner);
            }

            println!("Initializing teamfin at: {}", paths.base_dir().display());
            initialize_storage(&paths, team)?;
            settings.save(&paths)?;

            println!("Initialization complete!");
            println!();
            println!("Team:   {}", team);
            println!("Member: {} (owner)", member);
            println!();
            println!("Default envelopes have been created:");
            println!("  - Essenciais (50%): Aluguel, Mercado, Contas da Casa, Transporte, Saude");
            println!("  - Estilo de Vida (30%): Restaurantes, Lazer, Assinaturas");
            println!("  - Investimentos (20%): Reserva de Emergencia");
            println!();
            println!("Run 'teamfin budget income <amount>' to declare this month's income.");
        }
        Some(Commands::Config) => {
            println!("teamfin Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Projection years: {}", settings.projection_years);
            match (settings.default_team, settings.acting_member) {
                (Some(team), Some(member)) => {
                    let role = settings
                        .role_of(member)
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "none".to_string());
                    println!("  Team:             {}", team);
                    println!("  Acting member:    {} ({})", member, role);
                }
                _ => println!("  Not initialized. Run 'teamfin init'."),
            }
        }
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Investment(cmd)) => handle_investment_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        None => {
            println!("teamfin - Shared household budgeting");
            println!();
            println!("Run 'teamfin --help' for usage information.");
            println!("Run 'teamfin init' to get started.");
        }
    }

    Ok(())
}
