use anyhow::Result;
use clap::Parser;

use atlas::{
    app::{load_config, AppContext},
    cli::{handle_command, Cli},
    runtime::Shell,
    utils::init_logger,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Load configuration
    let config = load_config(cli.config.as_deref())?;
    if cli.no_color || !config.ui.color {
        colored::control::set_override(false);
    }

    let mut ctx = AppContext::new(config, cli.ephemeral)?;

    // No subcommand, or `browse`, starts the interactive shell
    let handled = match &cli.command {
        Some(command) => handle_command(&mut ctx, command).await?,
        None => false,
    };

    if !handled {
        Shell::new(&mut ctx).run().await?;
    }

    Ok(())
}
