use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand, builder::FalseyValueParser};
use flex::{CustomerSortOrder, EntrySortOrder, Flex, date};

#[derive(Parser, Debug)]
#[command(name = "flextime", version)]
#[command(about = "Track flex time +/- per customer")]
pub struct Cli {
    /// JSON file to load/save data from (`-` for stdin/stdout, also `FLEXTIME_FILE`).
    #[arg(short = 'f', long)]
    pub file: Option<String>,

    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long)]
    pub log_level: Option<String>,

    /// Set log level to debug.
    #[arg(short = 'd', long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add or set flex time for a given customer
    #[command(visible_alias = "set")]
    Add(AddArgs),
    /// List recorded flex time
    #[command(visible_alias = "ls")]
    List(ListArgs),
    /// Delete flex entries or customers
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// The customer name for whom to add flex
    #[arg(short, long)]
    pub customer: Option<String>,
    /// Date (YYYY-MM-DD) to add flex for [default: today]
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<DateTime<FixedOffset>>,
    /// Amount of flex time (e.g. 1h30m, -45m)
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<Flex>,
    /// Overwrite if matching entry already exists
    #[arg(short, long)]
    pub overwrite: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// The customer for whom to list flex time
    #[arg(short, long)]
    pub customer: Option<String>,
    /// List each entry, not just summary
    #[arg(short, long)]
    pub verbose: bool,
    /// List flex for all customers
    #[arg(short, long)]
    pub all: bool,
    /// Sort order if listing all customers (asc, desc)
    #[arg(long)]
    pub customer_sort: Option<CustomerSortOrder>,
    /// Sort order for entries, if verbose is set (dateasc, datedesc, amountasc, amountdesc)
    #[arg(long)]
    pub entry_sort: Option<EntrySortOrder>,
    /// List entries for this specific date
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<DateTime<FixedOffset>>,
    /// List entries starting from this date
    #[arg(short, long, value_parser = parse_date)]
    pub from: Option<DateTime<FixedOffset>>,
    /// List entries up to this date
    #[arg(short, long, value_parser = parse_date)]
    pub to: Option<DateTime<FixedOffset>>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Customer from whom to delete flex entries; alone, deletes the customer
    #[arg(short, long)]
    pub customer: Option<String>,
    /// Delete matching entries from all customers
    #[arg(short, long)]
    pub all: bool,
    /// Delete entries matching this specific date
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<DateTime<FixedOffset>>,
    /// Delete entries starting from this date
    #[arg(short, long, value_parser = parse_date)]
    pub from: Option<DateTime<FixedOffset>>,
    /// Delete entries up to this date
    #[arg(short, long, value_parser = parse_date)]
    pub to: Option<DateTime<FixedOffset>>,
}

fn parse_date(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    date::parse_day(raw).map_err(|err| err.to_string())
}
