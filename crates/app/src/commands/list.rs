use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};
use flex::{
    Customer, CustomerSortOrder, Entries, Entry, EntrySortOrder, FlexError, Ledger,
    date::format_day,
};

use crate::{cli::ListArgs, error::Result, settings::Settings};

type Date = DateTime<FixedOffset>;

/// A resolved `list` request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub customer: Option<String>,
    pub all: bool,
    pub verbose: bool,
    pub customer_sort: CustomerSortOrder,
    pub entry_sort: EntrySortOrder,
    pub date: Option<Date>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl ListQuery {
    /// Sort orders not given on the command line fall back to the settings.
    fn new(args: ListArgs, settings: &Settings) -> Result<Self> {
        let customer_sort = match args.customer_sort {
            Some(order) => order,
            None => settings
                .customer_sort
                .as_deref()
                .unwrap_or_default()
                .parse()?,
        };
        let entry_sort = match args.entry_sort {
            Some(order) => order,
            None => settings.entry_sort.as_deref().unwrap_or_default().parse()?,
        };

        Ok(Self {
            customer: super::customer_name(args.customer.as_deref()).map(str::to_string),
            all: args.all,
            verbose: args.verbose,
            customer_sort,
            entry_sort,
            date: args.date,
            from: args.from,
            to: args.to,
        })
    }

    fn has_range(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

pub fn run(args: ListArgs, settings: &Settings) -> Result<()> {
    let query = ListQuery::new(args, settings)?;
    tracing::debug!("listing with {query:?}");

    let mut ledger = Ledger::open(settings.file_name())?;
    ledger.ensure_not_empty()?;

    let mut out = Vec::new();
    render(&mut ledger, &query, &mut out)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(())
}

/// Write the report for `query` to `w`.
///
/// Customers and entries are sorted in place as requested.
pub fn render(ledger: &mut Ledger, query: &ListQuery, w: &mut impl Write) -> Result<()> {
    if query.customer.is_none() && query.all {
        return render_all(ledger, query, w);
    }

    let name = match &query.customer {
        Some(name) => name.clone(),
        None => ledger
            .working_customer()
            .map(|customer| customer.name.clone())
            .ok_or(FlexError::NilCustomer)?,
    };
    let customer = ledger.get_customer_mut(&name)?;

    if let Some(date) = &query.date {
        let entry = customer.get_entry(date)?;
        write_date(w, &customer.name, entry)?;
        return Ok(());
    }

    if !query.has_range() {
        if !query.verbose {
            writeln!(w, "{}: {}", customer.name, customer.total_flex())?;
            return Ok(());
        }
        if !customer.has_entries() {
            return Err(FlexError::NoEntries.into());
        }
        customer.entries.sort(query.entry_sort);
        write_entries(w, &customer.name, &customer.entries)?;
        return Ok(());
    }

    let mut filtered = range_of(customer, query)?;
    if query.verbose {
        filtered.sort(query.entry_sort);
        write_entries(w, &customer.name, &filtered)?;
    } else {
        writeln!(w, "{}: {}", customer.name, filtered.total_flex())?;
    }
    Ok(())
}

fn render_all(ledger: &mut Ledger, query: &ListQuery, w: &mut impl Write) -> Result<()> {
    ledger.ensure_not_empty()?;
    let width = ledger.customers.longest_name();
    ledger.customers.sort(query.customer_sort);

    if let Some(date) = &query.date {
        for customer in &ledger.customers {
            if let Ok(entry) = customer.get_entry(date) {
                write_date(w, &customer.name, entry)?;
            }
        }
        return Ok(());
    }

    if !query.has_range() {
        for customer in &mut ledger.customers {
            if query.verbose {
                customer.entries.sort(query.entry_sort);
                write_entries(w, &customer.name, &customer.entries)?;
            } else {
                writeln!(w, "{:<width$} : {}", customer.name, customer.total_flex())?;
            }
        }
        return Ok(());
    }

    for customer in &ledger.customers {
        if !customer.has_entries() {
            continue;
        }
        let mut filtered = range_of(customer, query)?;
        if query.verbose {
            filtered.sort(query.entry_sort);
            write_entries(w, &customer.name, &filtered)?;
        } else {
            writeln!(w, "{:<width$} : {}", customer.name, filtered.total_flex())?;
        }
    }
    Ok(())
}

/// Entries of `customer` inside the query range; open bounds take the
/// customer's own first and last date.
fn range_of(customer: &Customer, query: &ListQuery) -> Result<Entries> {
    if !customer.has_entries() {
        return Err(FlexError::NoEntries.into());
    }
    let (from, to) = customer.entries.resolve_range(query.from, query.to)?;
    Ok(customer.entries.filter_by_range(&from, &to))
}

fn write_date(w: &mut impl Write, name: &str, entry: &Entry) -> io::Result<()> {
    writeln!(w, "{name}:")?;
    writeln!(w, "\t* {}: {}", format_day(&entry.date), entry.amount)
}

fn write_entries(w: &mut impl Write, name: &str, entries: &Entries) -> io::Result<()> {
    writeln!(w, "{name}: {}", entries.total_flex())?;
    for entry in entries {
        writeln!(w, "\t* {}: {}", format_day(&entry.date), entry.amount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flex::{Flex, date::parse_day};

    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for (name, day, amount) in [
            ("Globex", "2021-12-02", Flex::minutes(-45)),
            ("Acme", "2021-12-02", Flex::minutes(30)),
            ("Acme", "2021-12-01", Flex::hours(1)),
            ("Acme", "2021-12-05", Flex::minutes(15)),
        ] {
            ledger
                .set_flex_for_customer(name, parse_day(day).unwrap(), amount, false)
                .unwrap();
        }
        ledger.add_customer("Initech");
        ledger
    }

    fn output(ledger: &mut Ledger, query: &ListQuery) -> String {
        let mut out = Vec::new();
        render(ledger, query, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn customer(name: &str) -> ListQuery {
        ListQuery {
            customer: Some(name.to_string()),
            ..ListQuery::default()
        }
    }

    fn all() -> ListQuery {
        ListQuery {
            all: true,
            customer_sort: CustomerSortOrder::NameAscending,
            ..ListQuery::default()
        }
    }

    #[test]
    fn customer_summary_and_specific_date() {
        let mut ledger = ledger();

        assert_eq!(output(&mut ledger, &customer("acme")), "Acme: 1h45m0s\n");

        let query = ListQuery {
            date: Some(parse_day("2021-12-02").unwrap()),
            ..customer("Acme")
        };
        assert_eq!(output(&mut ledger, &query), "Acme:\n\t* 2021-12-02: 30m0s\n");

        let query = ListQuery {
            date: Some(parse_day("2021-12-24").unwrap()),
            ..customer("Acme")
        };
        let err = render(&mut ledger, &query, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Flex(FlexError::NoEntry(_))));
    }

    #[test]
    fn customer_verbose_sorted() {
        let mut ledger = ledger();
        let query = ListQuery {
            verbose: true,
            entry_sort: EntrySortOrder::DateAscending,
            ..customer("Acme")
        };

        assert_eq!(
            output(&mut ledger, &query),
            "Acme: 1h45m0s\n\
             \t* 2021-12-01: 1h0m0s\n\
             \t* 2021-12-02: 30m0s\n\
             \t* 2021-12-05: 15m0s\n"
        );

        let err = render(
            &mut ledger,
            &ListQuery {
                verbose: true,
                ..customer("Initech")
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Flex(FlexError::NoEntries)));
    }

    #[test]
    fn customer_range_defaults_open_bounds() {
        let mut ledger = ledger();

        let query = ListQuery {
            from: Some(parse_day("2021-12-02").unwrap()),
            ..customer("Acme")
        };
        assert_eq!(output(&mut ledger, &query), "Acme: 45m0s\n");

        let query = ListQuery {
            to: Some(parse_day("2021-12-02").unwrap()),
            verbose: true,
            entry_sort: EntrySortOrder::AmountDescending,
            ..customer("Acme")
        };
        assert_eq!(
            output(&mut ledger, &query),
            "Acme: 1h30m0s\n\t* 2021-12-01: 1h0m0s\n\t* 2021-12-02: 30m0s\n"
        );
    }

    #[test]
    fn unknown_customer() {
        let mut ledger = ledger();
        let err = render(&mut ledger, &customer("Hooli"), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Flex(FlexError::NoSuchCustomer(_))
        ));
    }

    #[test]
    fn all_summary_is_aligned() {
        let mut ledger = ledger();

        assert_eq!(
            output(&mut ledger, &all()),
            "Acme    : 1h45m0s\nGlobex  : -45m0s\nInitech : 0s\n"
        );
    }

    #[test]
    fn all_specific_date_skips_customers_without_entry() {
        let mut ledger = ledger();
        let query = ListQuery {
            date: Some(parse_day("2021-12-02").unwrap()),
            ..all()
        };

        assert_eq!(
            output(&mut ledger, &query),
            "Acme:\n\t* 2021-12-02: 30m0s\nGlobex:\n\t* 2021-12-02: -45m0s\n"
        );
    }

    #[test]
    fn all_verbose_lists_every_customer() {
        let mut ledger = ledger();
        let query = ListQuery {
            verbose: true,
            customer_sort: CustomerSortOrder::NameDescending,
            entry_sort: EntrySortOrder::DateDescending,
            ..all()
        };

        assert_eq!(
            output(&mut ledger, &query),
            "Initech: 0s\n\
             Globex: -45m0s\n\
             \t* 2021-12-02: -45m0s\n\
             Acme: 1h45m0s\n\
             \t* 2021-12-05: 15m0s\n\
             \t* 2021-12-02: 30m0s\n\
             \t* 2021-12-01: 1h0m0s\n"
        );
    }

    #[test]
    fn all_range_skips_customers_without_entries() {
        let mut ledger = ledger();

        let query = ListQuery {
            from: Some(parse_day("2021-12-02").unwrap()),
            ..all()
        };
        assert_eq!(
            output(&mut ledger, &query),
            "Acme    : 45m0s\nGlobex  : -45m0s\n"
        );

        let query = ListQuery {
            verbose: true,
            entry_sort: EntrySortOrder::DateAscending,
            ..query
        };
        assert_eq!(
            output(&mut ledger, &query),
            "Acme: 45m0s\n\
             \t* 2021-12-02: 30m0s\n\
             \t* 2021-12-05: 15m0s\n\
             Globex: -45m0s\n\
             \t* 2021-12-02: -45m0s\n"
        );
    }

    #[test]
    fn working_customer_when_nothing_selected() {
        let mut ledger = ledger();
        assert_eq!(output(&mut ledger, &ListQuery::default()), "Globex: -45m0s\n");

        let day = parse_day("2021-12-01").unwrap();
        ledger
            .set_flex_for_customer("Default", day, Flex::minutes(5), false)
            .unwrap();
        assert_eq!(output(&mut ledger, &ListQuery::default()), "Default: 5m0s\n");
    }

    #[test]
    fn nothing_to_list_on_empty_ledger() {
        let mut ledger = Ledger::new();

        let err = render(&mut ledger, &ListQuery::default(), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Flex(FlexError::NilCustomer)
        ));

        let err = render(&mut ledger, &all(), &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Flex(FlexError::EmptyDb)
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn sort_orders_fall_back_to_settings() {
        let settings = Settings {
            customer_sort: Some("desc".to_string()),
            ..Settings::default()
        };
        let args = ListArgs {
            customer: Some(" ".to_string()),
            verbose: false,
            all: true,
            customer_sort: None,
            entry_sort: Some(EntrySortOrder::AmountAscending),
            date: None,
            from: None,
            to: None,
        };

        let query = ListQuery::new(args, &settings).unwrap();

        assert!(query.customer.is_none());
        assert_eq!(query.customer_sort, CustomerSortOrder::NameDescending);
        assert_eq!(query.entry_sort, EntrySortOrder::AmountAscending);
    }
}
