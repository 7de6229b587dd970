use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult, IoResultExt};
use crate::cli::session::Session;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    if cli.no_color || !settings.display.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        None | Some(Commands::Play) => _play(settings),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(&settings),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { shell }) => _completion(*shell),
    }
}

#[instrument(skip(settings))]
fn _play(settings: Settings) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), settings).run()
}

#[instrument(skip(settings))]
fn _config_show(settings: &Settings) -> CliResult<()> {
    let text = settings
        .to_toml()
        .map_err(|e| CliError::Usage(format!("cannot render settings: {}", e)))?;
    print!("{}", text);
    io::stdout().flush().io_context("write output")
}

#[instrument]
fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => println!("{}", path.display()),
        None => return Err(CliError::Usage("no config directory on this platform".into())),
    }
    Ok(())
}

#[instrument]
fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
