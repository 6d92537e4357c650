//! Positive monetary amounts with exactly two decimal places of precision.

use std::{
    fmt::Display,
    ops::{Add, AddAssign},
    str::FromStr,
};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Serialize, Serializer};

use crate::Error;

/// The largest amount of a single expense, 99,999,999.99, in cents.
pub const MAX_CENTS: i64 = 9_999_999_999;

/// An amount of money greater than zero, stored as a whole number of cents.
///
/// Use [str::parse] for user input and [Amount::from_cents] for values that
/// are already in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from a number of cents.
    ///
    /// # Errors
    ///
    /// Returns [Error::NonPositiveAmount] if `cents` is zero or negative and
    /// [Error::InvalidAmount] if it is more than [MAX_CENTS].
    pub fn from_cents(cents: i64) -> Result<Self, Error> {
        if cents <= 0 {
            Err(Error::NonPositiveAmount)
        } else if cents > MAX_CENTS {
            Err(Error::InvalidAmount(Amount(cents).to_string()))
        } else {
            Ok(Self(cents))
        }
    }

    /// The amount as a whole number of cents.
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse a decimal number with at most two fractional digits, e.g. "12", "12.5" or "12.50".
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `s` is not a number, has more than
    /// two fractional digits or is more than [MAX_CENTS], and [Error::NonPositiveAmount] if it is zero or
    /// negative.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || Error::InvalidAmount(text.to_owned());

        let (is_negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
            Some(_) => return Err(invalid()),
            None => (unsigned, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !is_digits(whole)
            || !is_digits(fraction)
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .ok_or_else(invalid)?;

        if is_negative {
            return Err(Error::NonPositiveAmount);
        }

        if cents > MAX_CENTS {
            return Err(invalid());
        }

        Amount::from_cents(cents)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Sums saturate at `i64::MAX` cents, so a total is never negative.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let cents = value.as_i64()?;
        Amount::from_cents(cents).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
