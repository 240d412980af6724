use crate::{cli::Command, error::Result, settings::Settings};

mod add;
mod delete;
mod list;

pub fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Add(args) => add::run(args, settings),
        Command::List(args) => list::run(args, settings),
        Command::Delete(args) => delete::run(args, settings),
    }
}

/// `None` for a missing or blank customer name.
fn customer_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|name| !name.is_empty())
}
