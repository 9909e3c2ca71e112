use anyhow::{Context, Result};
use tracing::{Level, event};
use trickset_core::model::book::{CommandOutcome, TrickBook, TrickCommand};
use trickset_core::model::requirement::Requirement;
use trickset_core::model::trick::Trick;
use trickset_core::report::Report;
use trickset_core::store::TrickStore;

use crate::cli::Command;
use crate::config::TricksetsConfig;

/// Run one command against the configured store and return what should be
/// printed. Edits are saved immediately.
pub fn execute(command: Command, config: &TricksetsConfig) -> Result<String> {
    let store = TrickStore::new(config.store_path());

    let edit = match command {
        Command::List => return Ok(render_list(&store.load_or_default())),
        Command::Calculate { json } => {
            let book = store.load_or_default();
            let report = Report::build(config.decks, book.tricks());
            event!(
                target: "tricksets::calculate",
                Level::INFO,
                decks = config.decks,
                tricks = book.len(),
                allocated = report.allocation.per_trick.len(),
                total_sets = report.allocation.total_sets(),
                leftover = report.allocation.leftover_cards
            );
            return if json {
                report.to_json().context("serializing report")
            } else {
                Ok(report.to_string())
            };
        }
        Command::AddTrick { name } => TrickCommand::AddTrick { name },
        Command::RemoveTrick { id } => TrickCommand::RemoveTrick { id },
        Command::Rename { id, name } => TrickCommand::RenameTrick { id, name },
        Command::Activate { id } => TrickCommand::SetActive { id, active: true },
        Command::Deactivate { id } => TrickCommand::SetActive { id, active: false },
        Command::AddRequirement { id, count, kind } => TrickCommand::AddRequirement {
            id,
            requirement: Requirement::new(count, kind),
        },
        Command::SetRequirement {
            id,
            index,
            count,
            kind,
        } => TrickCommand::SetRequirement {
            id,
            index,
            requirement: Requirement::new(count, kind),
        },
        Command::RemoveRequirement { id, index } => TrickCommand::RemoveRequirement { id, index },
    };

    // A file that fails to parse is left untouched rather than overwritten.
    let mut book = store
        .load()
        .with_context(|| format!("loading tricks from {}", store.path().display()))?;
    let description = format!("{edit:?}");
    let outcome = book.apply(edit).context("applying edit")?;
    store
        .save(&book)
        .with_context(|| format!("saving tricks to {}", store.path().display()))?;

    event!(
        target: "tricksets::command",
        Level::INFO,
        command = %description,
        outcome = ?outcome,
        path = %store.path().display()
    );

    Ok(describe_outcome(&book, outcome))
}

fn describe_outcome(book: &TrickBook, outcome: CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Added(id) => {
            let name = book.get(id).map(|t| t.name.as_str()).unwrap_or_default();
            format!("Added trick #{id} '{name}'")
        }
        CommandOutcome::Removed(id) => format!("Removed trick #{id}"),
        CommandOutcome::Updated(id) => match book.get(id) {
            Some(trick) => format!("Updated trick #{id}\n{}", render_trick(trick)),
            None => format!("Updated trick #{id}"),
        },
    }
}

fn render_trick(trick: &Trick) -> String {
    let status = if trick.active { "active" } else { "inactive" };
    let mut out = format!("#{} {} [{status}]\n", trick.id, trick.name);
    if trick.requirements.is_empty() {
        out.push_str("  (no requirements)\n");
    }
    for (index, req) in trick.requirements.iter().enumerate() {
        out.push_str(&format!("  [{index}] {req}\n"));
    }
    out
}

pub fn render_list(book: &TrickBook) -> String {
    if book.is_empty() {
        return "No tricks defined.\n".to_string();
    }
    book.tricks().iter().map(render_trick).collect()
}
