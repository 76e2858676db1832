//! Exact rational arithmetic for net scores.
//!
//! Nets are `correct - wrong / divisor`, so every intermediate value is a
//! fraction with a small denominator. Keeping them as reduced fractions means
//! sums over thousands of subject tallies never drift, and ranking ties are
//! decided on exact values. Rounding happens only in [`Rational::round_to`]
//! and its reporting helpers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A reduced fraction with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RationalRepr", into = "RationalRepr")]
pub struct Rational {
    numer: i128,
    denom: i128,
}

#[derive(Serialize, Deserialize)]
struct RationalRepr {
    numer: i128,
    denom: i128,
}

impl TryFrom<RationalRepr> for Rational {
    type Error = &'static str;

    fn try_from(repr: RationalRepr) -> Result<Self, Self::Error> {
        Rational::new(repr.numer, repr.denom).ok_or("denominator must not be zero")
    }
}

impl From<Rational> for RationalRepr {
    fn from(value: Rational) -> Self {
        Self {
            numer: value.numer,
            denom: value.denom,
        }
    }
}

impl Rational {
    /// Zero.
    pub const ZERO: Self = Self { numer: 0, denom: 1 };

    /// One.
    pub const ONE: Self = Self { numer: 1, denom: 1 };

    /// Builds a reduced fraction. Returns `None` for a zero denominator.
    pub fn new(numer: i128, denom: i128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        Some(Self::reduced(numer, denom))
    }

    /// Whole number.
    pub const fn from_integer(value: i64) -> Self {
        Self {
            numer: value as i128,
            denom: 1,
        }
    }

    /// Parses `"4"`, `"5/2"`, `"2.5"` or `"-0.25"`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Some((numer, denom)) = text.split_once('/') {
            let numer: i128 = numer.trim().parse().ok()?;
            let denom: i128 = denom.trim().parse().ok()?;
            return Self::new(numer, denom);
        }
        if let Some((whole, frac)) = text.split_once('.') {
            if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) || frac.len() > 18 {
                return None;
            }
            let negative = whole.trim_start().starts_with('-');
            let whole_value: i128 = match whole.trim() {
                "" | "-" | "+" => 0,
                digits => digits.parse().ok()?,
            };
            let scale = 10i128.pow(frac.len() as u32);
            let frac_value: i128 = frac.parse().ok()?;
            let magnitude = whole_value.abs() * scale + frac_value;
            let numer = if negative { -magnitude } else { magnitude };
            return Self::new(numer, scale);
        }
        let value: i128 = text.parse().ok()?;
        Self::new(value, 1)
    }

    fn reduced(numer: i128, denom: i128) -> Self {
        let sign = if denom < 0 { -1 } else { 1 };
        let divisor = gcd(numer.abs(), denom.abs()).max(1);
        Self {
            numer: sign * numer / divisor,
            denom: sign * denom / divisor,
        }
    }

    /// Numerator of the reduced fraction.
    pub fn numer(&self) -> i128 {
        self.numer
    }

    /// Denominator of the reduced fraction (always positive).
    pub fn denom(&self) -> i128 {
        self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_positive(&self) -> bool {
        self.numer > 0
    }

    /// Multiplies by a whole number.
    pub fn mul_int(self, factor: i64) -> Self {
        Self::reduced(self.numer * factor as i128, self.denom)
    }

    /// Divides by a whole number. Returns `None` when dividing by zero.
    pub fn div_int(self, divisor: i64) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        Some(Self::reduced(self.numer, self.denom * divisor as i128))
    }

    /// Divides by another fraction. Returns `None` when dividing by zero.
    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.numer == 0 {
            return None;
        }
        Some(Self::reduced(
            self.numer * other.denom,
            self.denom * other.numer,
        ))
    }

    /// Rounds half away from zero to `places` decimal places.
    pub fn round_to(self, places: u32) -> Self {
        let scale = 10i128.pow(places);
        let scaled = self.numer * scale;
        let quotient = scaled / self.denom;
        let remainder = (scaled % self.denom).abs();
        let rounded = if remainder * 2 >= self.denom {
            quotient + scaled.signum()
        } else {
            quotient
        };
        Self::reduced(rounded, scale)
    }

    /// Rounded value as `f64`, for reporting only.
    pub fn to_f64_rounded(self, places: u32) -> f64 {
        let scale = 10i128.pow(places);
        let rounded = self.round_to(places);
        (rounded.numer * (scale / rounded.denom)) as f64 / scale as f64
    }

    /// Arithmetic mean of the given values. `None` for an empty input.
    pub fn mean<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sum = Self::ZERO;
        let mut count = 0i64;
        for value in values {
            sum += value;
            count += 1;
        }
        sum.div_int(count)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u32> for Rational {
    fn from(value: u32) -> Self {
        Self::from_integer(i64::from(value))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer * other.denom).cmp(&(other.numer * self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        if self.denom == rhs.denom {
            return Self::reduced(self.numer + rhs.numer, self.denom);
        }
        Self::reduced(
            self.numer * rhs.denom + rhs.numer * self.denom,
            self.denom * rhs.denom,
        )
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Two-decimal rendering, e.g. `12.25`, `-0.50`.
impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to(2);
        let hundredths = rounded.numer * (100 / rounded.denom);
        let sign = if hundredths < 0 { "-" } else { "" };
        let magnitude = hundredths.abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(numer: i128, denom: i128) -> Rational {
        Rational::new(numer, denom).unwrap()
    }

    #[test]
    fn test_reduces_and_normalizes_sign() {
        let value = r(6, -8);
        assert_eq!(value.numer(), -3);
        assert_eq!(value.denom(), 4);
    }

    #[test]
    fn test_zero_denominator_rejected() {
        assert!(Rational::new(1, 0).is_none());
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(r(1, 4) + r(1, 3), r(7, 12));
        assert_eq!(Rational::from_integer(1) - r(2, 4), r(1, 2));
    }

    #[test]
    fn test_ordering() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < Rational::ZERO);
        assert_eq!(r(2, 4).cmp(&r(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rational::parse("4"), Some(Rational::from_integer(4)));
        assert_eq!(Rational::parse("5/2"), Some(r(5, 2)));
        assert_eq!(Rational::parse("2.5"), Some(r(5, 2)));
        assert_eq!(Rational::parse("-0.25"), Some(r(-1, 4)));
        assert_eq!(Rational::parse("abc"), None);
        assert_eq!(Rational::parse("1/0"), None);
        assert_eq!(Rational::parse(""), None);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(r(1, 8).round_to(2), r(13, 100));
        assert_eq!(r(-1, 8).round_to(2), r(-13, 100));
        assert_eq!(r(1, 3).round_to(2), r(33, 100));
        assert_eq!(r(2, 3).round_to(2), r(67, 100));
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(r(1, 2).to_string(), "0.50");
        assert_eq!(r(-1, 2).to_string(), "-0.50");
        assert_eq!(r(49, 4).to_string(), "12.25");
        assert_eq!(r(100, 3).to_string(), "33.33");
        assert_eq!(Rational::from_integer(20).to_string(), "20.00");
    }

    #[test]
    fn test_to_f64_rounded() {
        assert_eq!(r(2, 3).to_f64_rounded(2), 0.67);
        assert_eq!(r(25, 1).to_f64_rounded(2), 25.0);
    }

    #[test]
    fn test_no_drift_over_many_tallies() {
        // 0.1 summed ten thousand times is exactly 1000.
        let tenth = r(1, 10);
        let total: Rational = std::iter::repeat_n(tenth, 10_000).sum();
        assert_eq!(total, Rational::from_integer(1000));
    }

    #[test]
    fn test_mean() {
        let values = [10, 20, 30].map(Rational::from_integer);
        assert_eq!(Rational::mean(values), Some(Rational::from_integer(20)));
        assert_eq!(Rational::mean(Vec::new()), None);
    }

    #[test]
    fn test_serde_round_trip_rejects_zero_denominator() {
        let json = serde_json::to_string(&r(3, 4)).unwrap();
        let back: Rational = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r(3, 4));
        assert!(serde_json::from_str::<Rational>(r#"{"numer":1,"denom":0}"#).is_err());
    }
}
