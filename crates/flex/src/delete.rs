//! Deleting customers and entries.
//!
//! A [`DeleteSelection`] holds the selectors given by the user and resolves
//! to exactly one [`DeleteAction`]:
//!
//! | customer | all  | date | from/to | action                               |
//! |----------|------|------|---------|--------------------------------------|
//! | set      | any  | set  | -       | that date from that customer         |
//! | set      | yes  | -    | -       | all entries of that customer         |
//! | set      | any  | -    | set     | date range from that customer        |
//! | set      | no   | -    | -       | the customer itself                  |
//! | -        | yes  | -    | -       | all entries of every customer        |
//! | -        | yes  | set  | -       | that date from every customer        |
//! | -        | yes  | -    | set     | date range from every customer       |
//!
//! Anything else is [`FlexError::InvalidSelection`]. A missing range bound
//! defaults to the first/last date of each customer.
use chrono::{DateTime, FixedOffset};

use crate::{Customer, FlexError, Ledger, ResultFlex, date::format_day};

/// Selectors of a delete request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteSelection {
    pub customer: Option<String>,
    pub all: bool,
    pub date: Option<DateTime<FixedOffset>>,
    pub from: Option<DateTime<FixedOffset>>,
    pub to: Option<DateTime<FixedOffset>>,
}

impl DeleteSelection {
    #[must_use]
    pub fn customer(mut self, name: impl Into<String>) -> Self {
        self.customer = Some(name.into());
        self
    }

    #[must_use]
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }

    #[must_use]
    pub fn date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn since(mut self, from: DateTime<FixedOffset>) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn until(mut self, to: DateTime<FixedOffset>) -> Self {
        self.to = Some(to);
        self
    }

    /// Resolve the selectors to the action they describe.
    pub fn action(&self) -> ResultFlex<DeleteAction> {
        let customer = self
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToString::to_string);
        let has_range = self.from.is_some() || self.to.is_some();

        let action = match (customer, self.all, self.date, has_range) {
            (Some(customer), _, Some(date), false) => {
                DeleteAction::DateFromCustomer { customer, date }
            }
            (Some(customer), true, None, false) => DeleteAction::AllFromCustomer { customer },
            (Some(customer), _, None, true) => DeleteAction::RangeFromCustomer {
                customer,
                from: self.from,
                to: self.to,
            },
            (Some(customer), false, None, false) => DeleteAction::Customer { customer },
            (None, true, None, false) => DeleteAction::AllFromAll,
            (None, true, Some(date), false) => DeleteAction::DateFromAll { date },
            (None, true, None, true) => DeleteAction::RangeFromAll {
                from: self.from,
                to: self.to,
            },
            _ => return Err(FlexError::InvalidSelection(self.describe())),
        };
        Ok(action)
    }

    fn describe(&self) -> String {
        let day = |date: &Option<DateTime<FixedOffset>>| {
            date.as_ref()
                .map(format_day)
                .unwrap_or_else(|| "<none>".to_string())
        };
        format!(
            "customer={}, all={}, date={}, from={}, to={}",
            self.customer.as_deref().unwrap_or("<none>"),
            self.all,
            day(&self.date),
            day(&self.from),
            day(&self.to),
        )
    }
}

/// What a [`DeleteSelection`] removes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteAction {
    DateFromCustomer {
        customer: String,
        date: DateTime<FixedOffset>,
    },
    AllFromCustomer {
        customer: String,
    },
    RangeFromCustomer {
        customer: String,
        from: Option<DateTime<FixedOffset>>,
        to: Option<DateTime<FixedOffset>>,
    },
    Customer {
        customer: String,
    },
    AllFromAll,
    DateFromAll {
        date: DateTime<FixedOffset>,
    },
    RangeFromAll {
        from: Option<DateTime<FixedOffset>>,
        to: Option<DateTime<FixedOffset>>,
    },
}

/// What a delete removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deleted {
    pub customers: usize,
    pub entries: usize,
}

impl Deleted {
    fn entries(entries: usize) -> Self {
        Self {
            customers: 0,
            entries,
        }
    }
}

fn delete_date_from_customer(
    customer: &mut Customer,
    date: &DateTime<FixedOffset>,
) -> ResultFlex<usize> {
    if !customer.has_entries() {
        return Err(FlexError::NoEntries);
    }
    if !customer.entries.delete_by_date(date) {
        return Err(FlexError::NoEntry(format_day(date)));
    }
    tracing::info!(
        "deleted entry {} from customer \"{}\"",
        format_day(date),
        customer.name
    );
    Ok(1)
}

fn delete_all_from_customer(customer: &mut Customer) -> usize {
    let deleted = customer.entries.len();
    customer.entries.clear();
    tracing::info!(
        "deleted all {deleted} entries from customer \"{}\"",
        customer.name
    );
    deleted
}

/// Keep only the entries outside the range; returns how many were dropped.
fn delete_range_from_customer(
    customer: &mut Customer,
    from: Option<DateTime<FixedOffset>>,
    to: Option<DateTime<FixedOffset>>,
) -> ResultFlex<usize> {
    let (from, to) = customer.entries.resolve_range(from, to)?;
    let kept = customer.entries.filter_by_not_in_range(&from, &to);
    let deleted = customer.entries.len() - kept.len();
    customer.entries = kept;
    Ok(deleted)
}

impl Ledger {
    /// Delete what `selection` describes, see the [module documentation](self).
    pub fn delete(&mut self, selection: &DeleteSelection) -> ResultFlex<Deleted> {
        let action = selection.action()?;
        tracing::debug!("delete action: {action:?}");
        self.apply_delete(action)
    }

    fn apply_delete(&mut self, action: DeleteAction) -> ResultFlex<Deleted> {
        match action {
            DeleteAction::DateFromCustomer { customer, date } => {
                let customer = self.get_customer_mut(&customer)?;
                delete_date_from_customer(customer, &date).map(Deleted::entries)
            }
            DeleteAction::AllFromCustomer { customer } => {
                let customer = self.get_customer_mut(&customer)?;
                Ok(Deleted::entries(delete_all_from_customer(customer)))
            }
            DeleteAction::RangeFromCustomer { customer, from, to } => {
                let customer = self.get_customer_mut(&customer)?;
                let deleted = delete_range_from_customer(customer, from, to)?;
                tracing::info!(
                    "deleted {deleted} entries in date range from customer \"{}\"",
                    customer.name
                );
                Ok(Deleted::entries(deleted))
            }
            DeleteAction::Customer { customer } => {
                let (name, entries) = {
                    let found = self.get_customer(&customer)?;
                    (found.name.clone(), found.entries.len())
                };
                self.customers.delete(&name);
                tracing::info!("deleted customer \"{name}\" with {entries} entries");
                Ok(Deleted {
                    customers: 1,
                    entries,
                })
            }
            DeleteAction::AllFromAll => {
                self.ensure_not_empty()?;
                let deleted = self
                    .customers
                    .iter_mut()
                    .map(|customer| {
                        let deleted = customer.entries.len();
                        customer.entries.clear();
                        deleted
                    })
                    .sum();
                tracing::info!("deleted all {deleted} entries from all customers");
                Ok(Deleted::entries(deleted))
            }
            DeleteAction::DateFromAll { date } => {
                self.ensure_not_empty()?;
                let deleted = self
                    .customers
                    .iter_mut()
                    .map(|customer| customer.entries.delete_by_date(&date))
                    .filter(|deleted| *deleted)
                    .count();
                tracing::info!(
                    "deleted {deleted} entries matching {} from all customers",
                    format_day(&date)
                );
                Ok(Deleted::entries(deleted))
            }
            DeleteAction::RangeFromAll { from, to } => {
                self.ensure_not_empty()?;
                let mut deleted = 0;
                for customer in self.customers.iter_mut().filter(|c| c.has_entries()) {
                    deleted += delete_range_from_customer(customer, from, to)?;
                }
                tracing::info!("deleted {deleted} entries in date range from all customers");
                Ok(Deleted::entries(deleted))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::Flex;

    fn day(d: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2021, 12, d, 0, 0, 0).unwrap().fixed_offset()
    }

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for d in 1..=5 {
            ledger
                .set_flex_for_customer("Acme", day(d), Flex::hours(1), false)
                .unwrap();
        }
        for d in 3..=8 {
            ledger
                .set_flex_for_customer("Globex", day(d), Flex::minutes(10), false)
                .unwrap();
        }
        ledger.add_customer("Initech");
        ledger
    }

    fn entry_count(ledger: &Ledger, name: &str) -> usize {
        ledger.get_customer(name).unwrap().entries.len()
    }

    #[test]
    fn dispatch_table() {
        let base = DeleteSelection::default();

        assert_eq!(
            base.clone().customer("a").date(day(1)).action(),
            Ok(DeleteAction::DateFromCustomer {
                customer: "a".to_string(),
                date: day(1)
            })
        );
        assert_eq!(
            base.clone().customer("a").all().action(),
            Ok(DeleteAction::AllFromCustomer {
                customer: "a".to_string()
            })
        );
        assert_eq!(
            base.clone().customer("a").until(day(2)).action(),
            Ok(DeleteAction::RangeFromCustomer {
                customer: "a".to_string(),
                from: None,
                to: Some(day(2))
            })
        );
        assert_eq!(
            base.clone().customer("a").action(),
            Ok(DeleteAction::Customer {
                customer: "a".to_string()
            })
        );
        assert_eq!(base.clone().all().action(), Ok(DeleteAction::AllFromAll));
        assert_eq!(
            base.clone().all().date(day(1)).action(),
            Ok(DeleteAction::DateFromAll { date: day(1) })
        );
        assert_eq!(
            base.clone().all().since(day(1)).action(),
            Ok(DeleteAction::RangeFromAll {
                from: Some(day(1)),
                to: None
            })
        );
    }

    #[test]
    fn invalid_combinations() {
        let base = DeleteSelection::default();
        for selection in [
            base.clone(),
            base.clone().date(day(1)),
            base.clone().since(day(1)),
            base.clone().all().date(day(1)).until(day(2)),
            base.clone().customer("a").date(day(1)).since(day(1)),
            base.clone().customer("  ").date(day(1)),
        ] {
            assert!(matches!(
                selection.action(),
                Err(FlexError::InvalidSelection(_))
            ));
        }
    }

    #[test]
    fn delete_date_from_customer() {
        let mut ledger = ledger();
        let selection = DeleteSelection::default().customer("acme").date(day(2));

        assert_eq!(ledger.delete(&selection), Ok(Deleted::entries(1)));
        assert_eq!(entry_count(&ledger, "Acme"), 4);
        assert_eq!(
            ledger.delete(&selection),
            Err(FlexError::NoEntry("2021-12-02".to_string()))
        );
        assert_eq!(
            ledger.delete(&DeleteSelection::default().customer("Initech").date(day(2))),
            Err(FlexError::NoEntries)
        );
        assert_eq!(
            ledger.delete(&DeleteSelection::default().customer("Hooli").date(day(2))),
            Err(FlexError::NoSuchCustomer("Hooli".to_string()))
        );
    }

    #[test]
    fn delete_all_from_customer() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.delete(&DeleteSelection::default().customer("Globex").all()),
            Ok(Deleted::entries(6))
        );
        assert_eq!(entry_count(&ledger, "Globex"), 0);
        assert_eq!(entry_count(&ledger, "Acme"), 5);
    }

    #[test]
    fn delete_range_from_customer() {
        let mut ledger = ledger();

        let selection = DeleteSelection::default()
            .customer("Acme")
            .since(day(2))
            .until(day(3));
        assert_eq!(ledger.delete(&selection), Ok(Deleted::entries(2)));
        assert_eq!(
            ledger.total_flex_for_customer("Acme"),
            Ok(Flex::hours(3))
        );

        // open-ended: from the 4th to the customer's last date
        let selection = DeleteSelection::default().customer("Acme").since(day(4));
        assert_eq!(ledger.delete(&selection), Ok(Deleted::entries(2)));
        assert_eq!(entry_count(&ledger, "Acme"), 1);

        let selection = DeleteSelection::default().customer("Initech").until(day(4));
        assert_eq!(ledger.delete(&selection), Err(FlexError::NoEntries));
    }

    #[test]
    fn delete_customer_keeps_order() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.delete(&DeleteSelection::default().customer("ACME")),
            Ok(Deleted {
                customers: 1,
                entries: 5
            })
        );
        let names: Vec<_> = ledger.customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Globex", "Initech"]);
    }

    #[test]
    fn delete_from_all_customers() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.delete(&DeleteSelection::default().all().date(day(4))),
            Ok(Deleted::entries(2))
        );
        assert_eq!(
            ledger.delete(&DeleteSelection::default().all().until(day(5))),
            Ok(Deleted::entries(6))
        );
        assert_eq!(entry_count(&ledger, "Acme"), 0);
        assert_eq!(entry_count(&ledger, "Globex"), 3);

        assert_eq!(
            ledger.delete(&DeleteSelection::default().all()),
            Ok(Deleted::entries(3))
        );
        assert_eq!(ledger.total_flex_for_all_customers(), Flex::ZERO);
        assert_eq!(ledger.customers.len(), 3);
    }

    #[test]
    fn range_from_all_uses_each_customer_span() {
        let mut ledger = ledger();
        // Acme spans 1..=5 and Globex 3..=8; from the 5th on removes Acme's last
        // entry and Globex's 5..=8.
        assert_eq!(
            ledger.delete(&DeleteSelection::default().all().since(day(5))),
            Ok(Deleted::entries(5))
        );
        assert_eq!(entry_count(&ledger, "Acme"), 4);
        assert_eq!(entry_count(&ledger, "Globex"), 2);
    }

    #[test]
    fn ledger_wide_deletes_need_customers() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.delete(&DeleteSelection::default().all()),
            Err(FlexError::EmptyDb)
        );
        assert_eq!(
            ledger.delete(&DeleteSelection::default().all().date(day(1))),
            Err(FlexError::EmptyDb)
        );
    }
}
