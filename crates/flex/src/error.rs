//! The module contains the errors the flex ledger can return.
//!
//! The kinds callers usually branch on are:
//!
//! - [`NoEntry`] a specific date was asked for and the customer has no entry for it.
//! - [`NoEntries`] the customer has no entries at all.
//! - [`NoSuchCustomer`] a name lookup failed.
//! - [`CustomerExists`] returned when adding a customer that is already present.
//! - [`EmptyDb`] the ledger has no customers.
//!
//!  [`NoEntry`]: FlexError::NoEntry
//!  [`NoEntries`]: FlexError::NoEntries
//!  [`NoSuchCustomer`]: FlexError::NoSuchCustomer
//!  [`CustomerExists`]: FlexError::CustomerExists
//!  [`EmptyDb`]: FlexError::EmptyDb
use thiserror::Error;

use crate::Flex;

/// Flex ledger errors.
#[derive(Error, Debug)]
pub enum FlexError {
    #[error("no entry for given date: {0}")]
    NoEntry(String),
    #[error("no entries for customer")]
    NoEntries,
    #[error("no such customer: \"{0}\"")]
    NoSuchCustomer(String),
    #[error("customer already exists: {0}")]
    CustomerExists(String),
    #[error("customer is nil")]
    NilCustomer,
    #[error("empty flex database")]
    EmptyDb,
    #[error("invalid JSON input: {0}")]
    InvalidJsonInput(String),
    #[error(
        "failed to add {amount} flex on {date} for customer {customer} (overwrite: {overwrite})"
    )]
    EntryExists {
        amount: Flex,
        date: String,
        customer: String,
        overwrite: bool,
    },
    #[error("invalid combination of options: {0}")]
    InvalidSelection(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PartialEq for FlexError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoEntry(a), Self::NoEntry(b)) => a == b,
            (Self::NoEntries, Self::NoEntries) => true,
            (Self::NoSuchCustomer(a), Self::NoSuchCustomer(b)) => a == b,
            (Self::CustomerExists(a), Self::CustomerExists(b)) => a == b,
            (Self::NilCustomer, Self::NilCustomer) => true,
            (Self::EmptyDb, Self::EmptyDb) => true,
            (Self::InvalidJsonInput(a), Self::InvalidJsonInput(b)) => a == b,
            (
                Self::EntryExists {
                    amount: a1,
                    date: d1,
                    customer: c1,
                    overwrite: o1,
                },
                Self::EntryExists {
                    amount: a2,
                    date: d2,
                    customer: c2,
                    overwrite: o2,
                },
            ) => a1 == a2 && d1 == d2 && c1 == c2 && o1 == o2,
            (Self::InvalidSelection(a), Self::InvalidSelection(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidSortOrder(a), Self::InvalidSortOrder(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
