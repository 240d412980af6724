use flex::{DeleteSelection, Ledger};

use crate::{cli::DeleteArgs, error::Result, settings::Settings};

pub fn run(args: DeleteArgs, settings: &Settings) -> Result<()> {
    let mut ledger = Ledger::open(settings.file_name())?;
    ledger.ensure_not_empty()?;

    let deleted = ledger.delete(&selection(args))?;
    tracing::info!(
        "deleted {} customers and {} entries",
        deleted.customers,
        deleted.entries
    );

    ledger.save()?;
    Ok(())
}

fn selection(args: DeleteArgs) -> DeleteSelection {
    DeleteSelection {
        customer: super::customer_name(args.customer.as_deref()).map(str::to_string),
        all: args.all,
        date: args.date,
        from: args.from,
        to: args.to,
    }
}
