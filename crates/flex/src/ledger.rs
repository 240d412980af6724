//! The module contains the `Ledger`, the root of the flex data model.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    Customer, Customers, Entry, Flex, FlexError, ResultFlex, date::format_day,
    storage::STDIO_FILE_NAME, util::null_as_default,
};

/// Name of the customer used when none is given.
pub const DEFAULT_CUSTOMER_NAME: &str = "default";

/// All customers and their entries, plus where they were loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Backing file; `-` means stdin/stdout. Never written to the file itself.
    #[serde(skip, default = "stdio_file_name")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customers: Customers,
}

fn stdio_file_name() -> String {
    STDIO_FILE_NAME.to_string()
}

/// Result of [`Ledger::add_customer`].
///
/// Both variants hand out the customer so callers that do not care whether it
/// was just created can keep going.
#[derive(Debug)]
pub enum AddOutcome<'a> {
    Created(&'a mut Customer),
    Existing(&'a mut Customer),
}

impl<'a> AddOutcome<'a> {
    pub fn customer(self) -> &'a mut Customer {
        match self {
            AddOutcome::Created(customer) | AddOutcome::Existing(customer) => customer,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, AddOutcome::Created(_))
    }

    /// Treat an existing customer as [`FlexError::CustomerExists`].
    pub fn into_result(self) -> ResultFlex<&'a mut Customer> {
        match self {
            AddOutcome::Created(customer) => Ok(customer),
            AddOutcome::Existing(customer) => Err(FlexError::CustomerExists(customer.name.clone())),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// An empty ledger that saves to stdout.
    pub fn new() -> Self {
        Self {
            file_name: stdio_file_name(),
            customers: Customers::new(),
        }
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            customers: Customers::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Fail with [`FlexError::EmptyDb`] when there are no customers.
    pub fn ensure_not_empty(&self) -> ResultFlex<()> {
        if self.is_empty() {
            return Err(FlexError::EmptyDb);
        }
        Ok(())
    }

    /// Look a customer up by name, ignoring case.
    pub fn get_customer(&self, name: &str) -> ResultFlex<&Customer> {
        self.customers
            .index_of(name)
            .map(|idx| &self.customers[idx])
            .ok_or_else(|| FlexError::NoSuchCustomer(name.to_string()))
    }

    pub fn get_customer_mut(&mut self, name: &str) -> ResultFlex<&mut Customer> {
        match self.customers.index_of(name) {
            Some(idx) => Ok(&mut self.customers[idx]),
            None => Err(FlexError::NoSuchCustomer(name.to_string())),
        }
    }

    /// The customer to work on when no name is given.
    ///
    /// Precedence: a new `default` customer when the ledger is empty, then the
    /// customer named `default`, then the first customer.
    pub fn get_default_customer(&mut self) -> &mut Customer {
        if self.customers.is_empty() {
            tracing::debug!("ledger is empty, creating customer \"{DEFAULT_CUSTOMER_NAME}\"");
            return self.customers.push(Customer::new(DEFAULT_CUSTOMER_NAME));
        }
        let idx = self.customers.index_of(DEFAULT_CUSTOMER_NAME).unwrap_or(0);
        &mut self.customers[idx]
    }

    /// Same precedence as [`Ledger::get_default_customer`], without creating anything.
    pub fn working_customer(&self) -> Option<&Customer> {
        let idx = self.customers.index_of(DEFAULT_CUSTOMER_NAME).unwrap_or(0);
        self.customers.get(idx)
    }

    /// Add a customer unless one with the same name (ignoring case) exists.
    pub fn add_customer(&mut self, name: &str) -> AddOutcome<'_> {
        match self.customers.index_of(name) {
            Some(idx) => AddOutcome::Existing(&mut self.customers[idx]),
            None => AddOutcome::Created(self.customers.push(Customer::new(name))),
        }
    }

    pub fn total_flex_for_customer(&self, name: &str) -> ResultFlex<Flex> {
        Ok(self.get_customer(name)?.total_flex())
    }

    pub fn total_flex_for_all_customers(&self) -> Flex {
        self.customers.iter().map(Customer::total_flex).sum()
    }

    /// Record `amount` on `date` for the customer called `name`.
    ///
    /// A blank name selects the default customer, an unknown name creates the
    /// customer. An existing entry for that day is only replaced when
    /// `overwrite` is set; otherwise [`FlexError::EntryExists`] is returned.
    pub fn set_flex_for_customer(
        &mut self,
        name: &str,
        date: DateTime<FixedOffset>,
        amount: Flex,
        overwrite: bool,
    ) -> ResultFlex<()> {
        let customer = if name.trim().is_empty() {
            self.get_default_customer()
        } else {
            match self.add_customer(name) {
                AddOutcome::Created(customer) => customer,
                AddOutcome::Existing(customer) => {
                    tracing::debug!("{}", FlexError::CustomerExists(customer.name.clone()));
                    customer
                }
            }
        };

        if !customer.set_entry(Entry::new(date, amount), overwrite) {
            return Err(FlexError::EntryExists {
                amount,
                date: format_day(&date),
                customer: customer.name.clone(),
                overwrite,
            });
        }
        Ok(())
    }
}
