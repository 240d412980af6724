//! Sort orders for entries and customers, with the keys used on the command line.
use std::{fmt, str::FromStr};

use crate::FlexError;

/// How to order the entries of a customer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntrySortOrder {
    /// Keep the current order.
    #[default]
    None,
    DateAscending,
    DateDescending,
    AmountAscending,
    AmountDescending,
}

impl EntrySortOrder {
    /// Every order that actually sorts, in the order their keys are listed in help texts.
    pub const SORTING: [EntrySortOrder; 4] = [
        EntrySortOrder::DateAscending,
        EntrySortOrder::DateDescending,
        EntrySortOrder::AmountAscending,
        EntrySortOrder::AmountDescending,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            EntrySortOrder::None => "none",
            EntrySortOrder::DateAscending => "dateasc",
            EntrySortOrder::DateDescending => "datedesc",
            EntrySortOrder::AmountAscending => "amountasc",
            EntrySortOrder::AmountDescending => "amountdesc",
        }
    }
}

impl fmt::Display for EntrySortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntrySortOrder {
    type Err = FlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(EntrySortOrder::None),
            "dateasc" => Ok(EntrySortOrder::DateAscending),
            "datedesc" => Ok(EntrySortOrder::DateDescending),
            "amountasc" => Ok(EntrySortOrder::AmountAscending),
            "amountdesc" => Ok(EntrySortOrder::AmountDescending),
            other => Err(FlexError::InvalidSortOrder(format!(
                "unknown entry order \"{other}\""
            ))),
        }
    }
}

/// How to order the customers of a ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CustomerSortOrder {
    #[default]
    None,
    NameAscending,
    NameDescending,
}

impl CustomerSortOrder {
    pub const SORTING: [CustomerSortOrder; 2] = [
        CustomerSortOrder::NameAscending,
        CustomerSortOrder::NameDescending,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            CustomerSortOrder::None => "none",
            CustomerSortOrder::NameAscending => "asc",
            CustomerSortOrder::NameDescending => "desc",
        }
    }
}

impl fmt::Display for CustomerSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CustomerSortOrder {
    type Err = FlexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(CustomerSortOrder::None),
            "asc" => Ok(CustomerSortOrder::NameAscending),
            "desc" => Ok(CustomerSortOrder::NameDescending),
            other => Err(FlexError::InvalidSortOrder(format!(
                "unknown customer order \"{other}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back() {
        for order in EntrySortOrder::SORTING {
            assert_eq!(order.key().parse::<EntrySortOrder>().unwrap(), order);
        }
        for order in CustomerSortOrder::SORTING {
            assert_eq!(order.to_string().parse::<CustomerSortOrder>().unwrap(), order);
        }
        assert_eq!("".parse::<EntrySortOrder>().unwrap(), EntrySortOrder::None);
        assert_eq!("DESC".parse::<CustomerSortOrder>().unwrap(), CustomerSortOrder::NameDescending);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(matches!(
            "sideways".parse::<EntrySortOrder>(),
            Err(FlexError::InvalidSortOrder(_))
        ));
        assert!("dateasc".parse::<CustomerSortOrder>().is_err());
    }
}
