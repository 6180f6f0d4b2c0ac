//! Command implementations

mod config;
mod delete;
mod dye;
mod gate;
mod import;
mod reset;
mod sessions;
mod show;
mod toggle;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_cli_config;
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_cli_config(&cli)?;

    match cli.command {
        Commands::Import(args) => import::execute(args, &config, &output),
        Commands::Sessions(args) => sessions::execute(args, &config, &output),
        Commands::Show(args) => show::execute(args, &config, &output),
        Commands::Gate(args) => gate::execute(args, &config, &output),
        Commands::Dye(args) => dye::execute(args, config, &output),
        Commands::Toggle(args) => toggle::execute(args, &config, &output),
        Commands::Reset(args) => reset::execute(args, &config, &output),
        Commands::Delete(args) => delete::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}
