use flex::{Ledger, date};

use crate::{
    cli::AddArgs,
    error::{AppError, Result},
    settings::Settings,
};

pub fn run(args: AddArgs, settings: &Settings) -> Result<()> {
    let mut ledger = Ledger::open(settings.file_name())?;
    apply(&mut ledger, &args)?;
    ledger.save()?;
    Ok(())
}

fn apply(ledger: &mut Ledger, args: &AddArgs) -> Result<()> {
    let customer = super::customer_name(args.customer.as_deref());

    let Some(amount) = args.amount else {
        let Some(name) = customer else {
            return Err(AppError::InvalidArguments(
                "either a customer or an amount is required".to_string(),
            ));
        };
        let customer = ledger.add_customer(name).into_result()?;
        tracing::info!("added customer \"{}\"", customer.name);
        return Ok(());
    };

    if amount.is_zero() {
        return Err(AppError::InvalidArguments(
            "refusing to add entry with 0 flex amount".to_string(),
        ));
    }

    let day = args.date.unwrap_or_else(date::today);
    ledger.set_flex_for_customer(customer.unwrap_or_default(), day, amount, args.overwrite)?;
    tracing::info!(
        "set {amount} on {} for \"{}\"",
        date::format_day(&day),
        customer.unwrap_or(flex::DEFAULT_CUSTOMER_NAME)
    );
    Ok(())
}
