//! Budget CLI commands
//!
//! Show, trim and clear the budget cache of whoever is logged in (or the
//! shared cache when nobody is).

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::display::{format_budget_items, format_budget_summary};
use crate::error::{EventsxError, EventsxResult};
use crate::services::budget::calculate;
use crate::services::budget_cache::discard_legacy_cache;
use crate::services::user::current_session;
use crate::services::{BudgetCache, BudgetInputs};
use crate::storage::{KeyValueStore, Storage};
use crate::validation::is_non_negative_number;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budgeted events and the total cost
    Show {
        /// Accommodation and food cost
        #[arg(short, long, default_value = "")]
        accommodation: String,
        /// Include transport to the capital
        #[arg(short, long)]
        transport: bool,
        /// Governorate you travel from
        #[arg(short, long, default_value = "")]
        from: String,
    },
    /// Remove an event from the budget by its list number
    Remove {
        /// Position as shown by 'budget show' (starting at 1)
        position: usize,
    },
    /// Remove every event from the budget
    Clear,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    store: &dyn KeyValueStore,
    settings: &Settings,
    cmd: BudgetCommands,
) -> EventsxResult<()> {
    let user_id = current_session(store)?.map(|s| s.id);
    discard_legacy_cache(store, user_id)?;
    let mut cache = BudgetCache::load(store, user_id)?;

    match cmd {
        BudgetCommands::Show {
            accommodation,
            transport,
            from,
        } => {
            if !is_non_negative_number(&accommodation) {
                eprintln!(
                    "Warning: accommodation '{}' is not a non-negative number; counting it as 0",
                    accommodation.trim()
                );
            }

            let inputs = BudgetInputs::from_form(&accommodation, transport, &from);
            let summary = calculate(cache.items(), &inputs);

            println!("Budgeted events");
            println!("===============");
            print!("{}", format_budget_items(cache.items(), settings));
            if cache.is_empty() {
                println!();
            }
            println!();
            print!("{}", format_budget_summary(&summary, &inputs, settings));
        }

        BudgetCommands::Remove { position } => {
            let removed = position
                .checked_sub(1)
                .and_then(|index| cache.remove_at(index))
                .ok_or_else(|| {
                    EventsxError::Validation(format!(
                        "No budget entry at position {} ({} in budget)",
                        position,
                        cache.len()
                    ))
                })?;
            cache.save(store)?;

            storage.log_delete(
                EntityType::BudgetItem,
                removed.id.to_string(),
                Some(removed.title.clone()),
                &removed,
            )?;

            println!("Removed {} from your budget.", removed.title);
            println!(
                "Tickets total is now {}.",
                cache.ticket_total().format_with_symbol(&settings.currency_symbol)
            );
        }

        BudgetCommands::Clear => {
            let items = cache.items().to_vec();
            let count = cache.clear();
            cache.save(store)?;

            for item in &items {
                storage.log_delete(
                    EntityType::BudgetItem,
                    item.id.to_string(),
                    Some(item.title.clone()),
                    item,
                )?;
            }

            println!("Removed {} event(s) from your budget.", count);
        }
    }

    Ok(())
}
