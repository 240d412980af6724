use std::process::ExitCode;

use clap::Parser;

use crate::{cli::Cli, settings::Settings};

mod cli;
mod commands;
mod error;
mod settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "flextime={level},flex={level}",
            level = settings.log_level
        ))
        .init();
    tracing::debug!("using ledger \"{}\"", settings.file_name());

    match commands::run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
