use clap::Parser;

use trickset_cli::app::execute;
use trickset_cli::cli::Cli;
use trickset_cli::logging::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let _logging_guard = init_logging(&config.logging)?;
    tracing::debug!(
        target: "tricksets",
        decks = config.decks,
        store = %config.store,
        "configuration resolved"
    );

    let output = execute(cli.command, &config)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
