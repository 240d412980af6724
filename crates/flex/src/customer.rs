//! The module contains `Customer` and the ordered `Customers` collection.
use std::{
    cmp::Ordering,
    ops::{Index, IndexMut},
    slice,
};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    CustomerSortOrder, Entries, Entry, Flex, FlexError, ResultFlex, date::format_day,
    util::{names_match, null_as_default},
};

/// A customer and the flex time recorded for it.
///
/// The name is the identity of the customer and is compared without regard
/// to case, so `Acme` and `ACME` are the same customer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "customer_name")]
    pub name: String,
    #[serde(rename = "flex_entries", default, deserialize_with = "null_as_default")]
    pub entries: Entries,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Entries::new(),
        }
    }

    pub fn with_entries(name: impl Into<String>, entries: Entries) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The entry recorded on the same day as `date`.
    pub fn get_entry(&self, date: &DateTime<FixedOffset>) -> ResultFlex<&Entry> {
        if self.entries.is_empty() {
            return Err(FlexError::NoEntries);
        }
        self.entries
            .get(date)
            .ok_or_else(|| FlexError::NoEntry(format_day(date)))
    }

    /// See [`Entries::set`].
    pub fn set_entry(&mut self, entry: Entry, overwrite: bool) -> bool {
        self.entries.set(entry, overwrite)
    }

    pub fn total_flex(&self) -> Flex {
        self.entries.total_flex()
    }
}

/// Ordered collection of customers.
///
/// The collection itself does not enforce unique names; [`crate::Ledger::add_customer`]
/// checks before appending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customers(Vec<Customer>);

impl Customers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Customer> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Customer> {
        self.0.iter_mut()
    }

    pub fn first(&self) -> Option<&Customer> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Customer> {
        self.0.get_mut(index)
    }

    pub(crate) fn push(&mut self, customer: Customer) -> &mut Customer {
        self.0.push(customer);
        let last = self.0.len() - 1;
        &mut self.0[last]
    }

    /// Index of the first customer whose name matches `name`, ignoring case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0
            .iter()
            .position(|customer| names_match(&customer.name, name))
    }

    /// Remove the customer named `name`, keeping the order of the others.
    pub fn delete(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn sort(&mut self, order: CustomerSortOrder) {
        match order {
            CustomerSortOrder::None => {}
            CustomerSortOrder::NameAscending => {
                self.0.sort_by(|a, b| compare_names(&a.name, &b.name))
            }
            CustomerSortOrder::NameDescending => {
                self.0.sort_by(|a, b| compare_names(&b.name, &a.name))
            }
        }
    }

    /// Length in characters of the longest customer name; 0 when empty.
    pub fn longest_name(&self) -> usize {
        self.0
            .iter()
            .map(|customer| customer.name.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Case-insensitive order, falling back to ordinal order for names that only differ in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Index<usize> for Customers {
    type Output = Customer;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Customers {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl From<Vec<Customer>> for Customers {
    fn from(customers: Vec<Customer>) -> Self {
        Self(customers)
    }
}

impl FromIterator<Customer> for Customers {
    fn from_iter<I: IntoIterator<Item = Customer>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Customers {
    type Item = &'a Customer;
    type IntoIter = slice::Iter<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut Customers {
    type Item = &'a mut Customer;
    type IntoIter = slice::IterMut<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}
