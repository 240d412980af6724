//! The module contains `Entry`, a dated amount of flex time, and the
//! `Entries` collection owned by every customer.
//!
//! Entries are identified by calendar day: no two entries in one collection
//! may fall on the same year, month and day. [`Entries::set`] is the only way
//! to add an entry and it enforces that rule.
use std::slice;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{EntrySortOrder, Flex, FlexError, ResultFlex, util::same_day};

/// Flex time recorded for one day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: DateTime<FixedOffset>,
    pub amount: Flex,
}

impl Entry {
    pub fn new(date: DateTime<FixedOffset>, amount: Flex) -> Self {
        Self { date, amount }
    }

    /// `true` if both entries fall on the same year, month and day.
    ///
    /// Time of day is ignored.
    pub fn match_date(&self, other: &Entry) -> bool {
        same_day(&self.date, &other.date)
    }

    /// `true` if `from <= self.date <= to`.
    pub fn within_range(&self, from: &DateTime<FixedOffset>, to: &DateTime<FixedOffset>) -> bool {
        self.date >= *from && self.date <= *to
    }
}

/// Ordered collection of entries.
///
/// Insertion order is kept until [`Entries::sort`] is called.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries(Vec<Entry>);

impl Entries {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Index of the first entry on the same day as `date`.
    pub fn index_of(&self, date: &DateTime<FixedOffset>) -> Option<usize> {
        self.0.iter().position(|entry| same_day(&entry.date, date))
    }

    /// The entry recorded on the same day as `date`, if any.
    pub fn get(&self, date: &DateTime<FixedOffset>) -> Option<&Entry> {
        self.index_of(date).map(|idx| &self.0[idx])
    }

    /// Sum of every amount; zero when empty.
    pub fn total_flex(&self) -> Flex {
        self.0.iter().map(|entry| entry.amount).sum()
    }

    /// Entries with `from <= date <= to`, in their current order.
    pub fn filter_by_range(
        &self,
        from: &DateTime<FixedOffset>,
        to: &DateTime<FixedOffset>,
    ) -> Entries {
        self.0
            .iter()
            .filter(|entry| entry.within_range(from, to))
            .cloned()
            .collect()
    }

    /// Entries strictly outside `[from, to]`, in their current order.
    pub fn filter_by_not_in_range(
        &self,
        from: &DateTime<FixedOffset>,
        to: &DateTime<FixedOffset>,
    ) -> Entries {
        self.0
            .iter()
            .filter(|entry| !entry.within_range(from, to))
            .cloned()
            .collect()
    }

    pub fn first_date(&self) -> ResultFlex<DateTime<FixedOffset>> {
        self.0
            .iter()
            .map(|entry| entry.date)
            .min()
            .ok_or(FlexError::NoEntries)
    }

    pub fn last_date(&self) -> ResultFlex<DateTime<FixedOffset>> {
        self.0
            .iter()
            .map(|entry| entry.date)
            .max()
            .ok_or(FlexError::NoEntries)
    }

    /// Fill in missing range bounds with the first and last date of the collection.
    pub fn resolve_range(
        &self,
        from: Option<DateTime<FixedOffset>>,
        to: Option<DateTime<FixedOffset>>,
    ) -> ResultFlex<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let from = match from {
            Some(from) => from,
            None => self.first_date()?,
        };
        let to = match to {
            Some(to) => to,
            None => self.last_date()?,
        };
        Ok((from, to))
    }

    /// Insert `entry`, or replace the entry on the same day when `overwrite` is set.
    ///
    /// Returns `false` if an entry for that day exists and `overwrite` is not set;
    /// the collection is left untouched in that case.
    pub fn set(&mut self, entry: Entry, overwrite: bool) -> bool {
        match self.index_of(&entry.date) {
            None => {
                self.0.push(entry);
                true
            }
            Some(idx) if overwrite => {
                self.0[idx] = entry;
                true
            }
            Some(_) => false,
        }
    }

    /// Remove the entry on the same day as `date`.
    ///
    /// The last entry takes the place of the removed one.
    pub fn delete_by_date(&mut self, date: &DateTime<FixedOffset>) -> bool {
        match self.index_of(date) {
            Some(idx) => {
                self.0.swap_remove(idx);
                true
            }
            None => false,
        }
    }

    /// Stable sort; entries with equal keys keep their relative order.
    pub fn sort(&mut self, order: EntrySortOrder) {
        match order {
            EntrySortOrder::None => {}
            EntrySortOrder::DateAscending => self.0.sort_by(|a, b| a.date.cmp(&b.date)),
            EntrySortOrder::DateDescending => self.0.sort_by(|a, b| b.date.cmp(&a.date)),
            EntrySortOrder::AmountAscending => self.0.sort_by_key(|entry| entry.amount),
            EntrySortOrder::AmountDescending => self.0.sort_by(|a, b| b.amount.cmp(&a.amount)),
        }
    }
}

impl From<Vec<Entry>> for Entries {
    fn from(entries: Vec<Entry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<Entry> for Entries {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Entries {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Entries {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
