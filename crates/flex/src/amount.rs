use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::FlexError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Signed amount of flex time represented as **integer nanoseconds**.
///
/// Positive values are time the employer owes, negative values time that has
/// to be worked back. The wire form is the bare integer.
///
/// # Examples
///
/// ```rust
/// use flex::Flex;
///
/// let amount = Flex::minutes(90);
/// assert_eq!(amount.to_string(), "1h30m0s");
/// assert_eq!("-1h30m".parse::<Flex>().unwrap(), -amount);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Flex(i64);

impl Flex {
    pub const ZERO: Flex = Flex(0);

    /// Creates a new amount from integer nanoseconds.
    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn hours(hours: i64) -> Self {
        Self(hours * HOUR as i64)
    }

    #[must_use]
    pub const fn minutes(minutes: i64) -> Self {
        Self(minutes * MINUTE as i64)
    }

    #[must_use]
    pub const fn seconds(seconds: i64) -> Self {
        Self(seconds * SECOND as i64)
    }

    /// Returns the raw value in nanoseconds.
    #[must_use]
    pub const fn nanos(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Flex) -> Option<Flex> {
        self.0.checked_add(rhs.0).map(Flex)
    }
}

/// Splits `value` into its integer part and the fractional part rendered
/// with at most `prec` digits and no trailing zeros (`""` when exact).
fn split_fraction(value: u64, prec: u32) -> (u64, String) {
    let scale = 10u64.pow(prec);
    let frac = value % scale;
    if frac == 0 {
        return (value / scale, String::new());
    }
    let digits = format!("{frac:0width$}", width = prec as usize);
    (value / scale, format!(".{}", digits.trim_end_matches('0')))
}

impl fmt::Display for Flex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        if abs == 0 {
            return f.write_str("0s");
        }

        if abs < SECOND {
            let (unit, prec) = if abs < MICROSECOND {
                ("ns", 0)
            } else if abs < MILLISECOND {
                ("µs", 3)
            } else {
                ("ms", 6)
            };
            let (int, frac) = split_fraction(abs, prec);
            return write!(f, "{sign}{int}{frac}{unit}");
        }

        let (secs, frac) = split_fraction(abs, 9);
        let mins = secs / 60;
        f.write_str(sign)?;
        if mins > 0 {
            let hours = mins / 60;
            if hours > 0 {
                write!(f, "{hours}h")?;
            }
            write!(f, "{}m", mins % 60)?;
        }
        write!(f, "{}{frac}s", secs % 60)
    }
}

impl From<i64> for Flex {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Flex> for i64 {
    fn from(value: Flex) -> Self {
        value.0
    }
}

impl Add for Flex {
    type Output = Flex;

    fn add(self, rhs: Flex) -> Self::Output {
        Flex(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Flex {
    fn add_assign(&mut self, rhs: Flex) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Flex {
    type Output = Flex;

    fn sub(self, rhs: Flex) -> Self::Output {
        Flex(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Flex {
    fn sub_assign(&mut self, rhs: Flex) {
        self.0 = self.0.wrapping_sub(rhs.0);
    }
}

impl Neg for Flex {
    type Output = Flex;

    fn neg(self) -> Self::Output {
        Flex(self.0.wrapping_neg())
    }
}

impl Sum for Flex {
    fn sum<I: Iterator<Item = Flex>>(iter: I) -> Self {
        iter.fold(Flex::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Flex> for Flex {
    fn sum<I: Iterator<Item = &'a Flex>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

impl FromStr for Flex {
    type Err = FlexError;

    /// Parses a duration string such as `1h30m`, `-45m`, `1.5h` or `250ms`.
    ///
    /// Every number needs a unit; the bare string `0` is the only exception.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FlexError::InvalidAmount(format!("invalid duration \"{s}\""));
        let overflow = || FlexError::InvalidAmount(format!("duration out of range \"{s}\""));

        let trimmed = s.trim();
        let (negative, mut rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        if rest == "0" {
            return Ok(Flex::ZERO);
        }
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut total: u128 = 0;
        while !rest.is_empty() {
            let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let (int_str, tail) = rest.split_at(int_len);
            rest = tail;

            let mut frac: u128 = 0;
            let mut scale: u128 = 1;
            let mut frac_len = 0;
            if let Some(tail) = rest.strip_prefix('.') {
                frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                // Digits beyond nanosecond precision of an hour cannot change the result.
                for digit in tail[..frac_len].bytes().take(18) {
                    frac = frac * 10 + u128::from(digit - b'0');
                    scale *= 10;
                }
                rest = &tail[frac_len..];
            }
            if int_str.is_empty() && frac_len == 0 {
                return Err(invalid());
            }

            let unit_len = rest
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(rest.len());
            if unit_len == 0 {
                return Err(FlexError::InvalidAmount(format!(
                    "missing unit in duration \"{s}\""
                )));
            }
            let (unit_str, tail) = rest.split_at(unit_len);
            rest = tail;
            let unit = u128::from(unit_nanos(unit_str).ok_or_else(|| {
                FlexError::InvalidAmount(format!("unknown unit \"{unit_str}\" in duration \"{s}\""))
            })?);

            let int: u128 = if int_str.is_empty() {
                0
            } else {
                int_str.parse().map_err(|_| overflow())?
            };
            let value = int
                .checked_mul(unit)
                .and_then(|v| v.checked_add(frac * unit / scale))
                .ok_or_else(overflow)?;
            total = total.checked_add(value).ok_or_else(overflow)?;
            if total > u128::from(i64::MAX.unsigned_abs()) + 1 {
                return Err(overflow());
            }
        }

        if negative {
            let total = i128::try_from(total).map_err(|_| overflow())?;
            i64::try_from(-total).map(Flex).map_err(|_| overflow())
        } else {
            i64::try_from(total).map(Flex).map_err(|_| overflow())
        }
    }
}
