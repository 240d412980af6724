//! Flex time ledger.
//!
//! A [`Ledger`] holds [`Customer`]s, each with a collection of dated
//! [`Entry`]s recording how much flex time was earned (positive) or taken
//! (negative) on a given day. Customers are identified by name ignoring
//! case, entries by calendar day.
//!
//! ```rust
//! use flex::{Flex, Ledger, date::parse_day};
//!
//! let mut ledger = Ledger::new();
//! let day = parse_day("2021-12-03").unwrap();
//! ledger.set_flex_for_customer("Acme", day, Flex::hours(1), false).unwrap();
//!
//! assert_eq!(ledger.total_flex_for_customer("acme").unwrap(), Flex::hours(1));
//! assert!(ledger.set_flex_for_customer("Acme", day, Flex::minutes(5), false).is_err());
//! ```
pub use amount::Flex;
pub use customer::{Customer, Customers};
pub use delete::{DeleteAction, DeleteSelection, Deleted};
pub use entry::{Entries, Entry};
pub use error::FlexError;
pub use ledger::{AddOutcome, DEFAULT_CUSTOMER_NAME, Ledger};
pub use sort::{CustomerSortOrder, EntrySortOrder};

mod amount;
mod customer;
pub mod date;
mod delete;
mod entry;
mod error;
mod ledger;
mod sort;
pub mod storage;
mod util;

pub type ResultFlex<T> = Result<T, FlexError>;
