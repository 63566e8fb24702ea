//! Top-level run: parse the CLI, resolve settings, dispatch the command.

use anyhow::Result;
use clap::Parser;
use quizdl_core::SourceRegistry;
use tracing::debug;

use crate::app::config_runtime::{self, Settings};
use crate::app::terminal;
use crate::cli::{Cli, Command};
use crate::{ProcessExit, app_config, commands};

pub(crate) async fn run_quizdl() -> Result<ProcessExit> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let loaded_config = app_config::load_default_file_config()?;
    let settings = Settings::resolve(&cli.global, loaded_config.config.as_ref())?;

    terminal::init_tracing(
        settings.verbosity.log_level(),
        config_runtime::should_force_cli_log_level(&cli.global),
    );
    debug!(?settings, config_loaded = loaded_config.loaded_from_file, "Settings resolved");

    let registry = SourceRegistry::builtin();

    match &cli.command {
        Command::All(args) => commands::run_all_command(&settings, &registry, args).await,
        Command::Game(args) => commands::run_game_command(&settings, &registry, args).await,
        Command::List => {
            commands::run_list_command(&registry);
            Ok(ProcessExit::Success)
        }
        Command::Search(args) => {
            commands::run_search_command(args)?;
            Ok(ProcessExit::Success)
        }
        Command::Config => {
            commands::run_config_show_command(&settings, &loaded_config);
            Ok(ProcessExit::Success)
        }
    }
}
