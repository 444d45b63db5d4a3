//! Storage initialization
//!
//! Handles first-run setup: directories plus a starter envelope budget for
//! the team created by `teamfin init`.

use crate::config::paths::TeamFinPaths;
use crate::error::TeamFinError;
use crate::models::{BudgetEnvelope, DefaultEnvelope, ExpenseCategory, TeamId};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

#[derive(serde::Serialize)]
struct EnvelopeSeed<'a> {
    envelopes: &'a [BudgetEnvelope],
}

/// Initialize storage for a fresh installation
///
/// Creates the default envelopes and linked starter categories for `team_id`
/// unless envelope data already exists.
pub fn initialize_storage(paths: &TeamFinPaths, team_id: TeamId) -> Result<(), TeamFinError> {
    paths.ensure_directories()?;

    if needs_initialization(paths) {
        create_default_budget(paths, team_id)?;
        tracing::info!(team = %team_id, "created default envelopes");
    }

    Ok(())
}

fn starter_categories(envelope: DefaultEnvelope) -> &'static [&'static str] {
    match envelope {
        DefaultEnvelope::Essentials => &["Aluguel", "Mercado", "Contas da Casa", "Transporte", "Saude"],
        DefaultEnvelope::Lifestyle => &["Restaurantes", "Lazer", "Assinaturas"],
        DefaultEnvelope::Investments => &["Reserva de Emergencia"],
    }
}

fn create_default_budget(paths: &TeamFinPaths, team_id: TeamId) -> Result<(), TeamFinError> {
    let mut envelopes = Vec::new();
    let mut categories = Vec::new();

    for default in DefaultEnvelope::all() {
        let envelope = default.to_envelope(team_id);
        for name in starter_categories(*default) {
            categories.push(ExpenseCategory::linked(team_id, *name, envelope.id));
        }
        envelopes.push(envelope);
    }

    write_json_atomic(paths.envelopes_file(), &EnvelopeSeed { envelopes: &envelopes })?;
    write_json_atomic(paths.categories_file(), &CategoryData { categories })?;

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TeamFinPaths) -> bool {
    !paths.envelopes_file().exists()
}
