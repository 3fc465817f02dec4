//! Exact fraction type used for every share in the engine.
//!
//! Shares are kept as reduced rationals so that sums, comparisons against
//! the whole estate and proportional rescaling stay exact. Conversion to
//! [`Decimal`] only happens when monetary amounts are produced.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use num_rational::Rational64;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An exact fraction stored in lowest terms with a positive denominator.
///
/// Serialises as `{"numerator": n, "denominator": d}`. Deserialisation
/// reduces the input and rejects a zero denominator.
///
/// # Example
///
/// ```
/// use estate_engine::models::Fraction;
///
/// let sixth = Fraction::new(1, 6).unwrap();
/// let third = sixth.add(sixth);
/// assert_eq!(third, Fraction::new(1, 3).unwrap());
/// assert_eq!(third.to_string(), "1/3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction(Rational64);

/// Wire representation of a [`Fraction`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawFraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Creates a fraction in lowest terms.
    ///
    /// The sign is carried by the numerator. Returns
    /// [`EngineError::DivisionByZero`] when `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> EngineResult<Self> {
        if denominator == 0 {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Self(Rational64::new(numerator, denominator)))
    }

    /// Creates the fraction `value/1`.
    pub fn from_integer(value: i64) -> Self {
        Self(Rational64::from_integer(value))
    }

    /// The fraction `0/1`.
    pub fn zero() -> Self {
        Self(Rational64::zero())
    }

    /// The fraction `1/1`, i.e. the whole estate.
    pub fn one() -> Self {
        Self(Rational64::one())
    }

    /// Returns the (reduced) numerator.
    pub fn numerator(&self) -> i64 {
        *self.0.numer()
    }

    /// Returns the (reduced, always positive) denominator.
    pub fn denominator(&self) -> i64 {
        *self.0.denom()
    }

    /// Returns true if the fraction is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the fraction is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    /// Returns true if the denominator is 1.
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// Returns `self + other`.
    pub fn add(self, other: Fraction) -> Fraction {
        Self(self.0 + other.0)
    }

    /// Returns `self - other`.
    pub fn subtract(self, other: Fraction) -> Fraction {
        Self(self.0 - other.0)
    }

    /// Returns `self * other`.
    pub fn multiply(self, other: Fraction) -> Fraction {
        Self(self.0 * other.0)
    }

    /// Returns `self / other`, or [`EngineError::DivisionByZero`] when
    /// `other` is zero.
    pub fn divide(self, other: Fraction) -> EngineResult<Fraction> {
        if other.is_zero() {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Self(self.0 / other.0))
    }

    /// Returns `1 / self`.
    pub fn reciprocal(self) -> EngineResult<Fraction> {
        Fraction::one().divide(self)
    }

    /// Converts the fraction to a decimal.
    ///
    /// Non-terminating fractions are truncated to the precision of
    /// [`Decimal`]. Never use the result for comparisons between shares.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.numerator()) / Decimal::from(self.denominator())
    }

    /// Converts the fraction to a float, for display only.
    pub fn to_f64(&self) -> f64 {
        self.numerator() as f64 / self.denominator() as f64
    }

    /// Applies the fraction to a decimal value (`value * n / d`).
    ///
    /// Multiplies before dividing to keep as much precision as possible.
    ///
    /// # Example
    ///
    /// ```
    /// use estate_engine::models::Fraction;
    /// use rust_decimal::Decimal;
    ///
    /// let eighth = Fraction::new(1, 8).unwrap();
    /// assert_eq!(eighth.apply_to(Decimal::from(1000)).unwrap(), Decimal::from(125));
    /// ```
    pub fn apply_to(&self, value: Decimal) -> EngineResult<Decimal> {
        value
            .checked_mul(Decimal::from(self.numerator()))
            .and_then(|scaled| scaled.checked_div(Decimal::from(self.denominator())))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("amount overflow applying {} to {}", self, value),
            })
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        Fraction::add(self, rhs)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self.subtract(rhs)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        self.multiply(rhs)
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::zero(), Fraction::add)
    }
}

impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<RawFraction> for Fraction {
    type Error = EngineError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

impl From<Fraction> for RawFraction {
    fn from(fraction: Fraction) -> Self {
        RawFraction {
            numerator: fraction.numerator(),
            denominator: fraction.denominator(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 { a.abs() } else { gcd(b, a % b) }
    }

    #[test]
    fn test_new_reduces_to_lowest_terms() {
        let f = frac(4, 8);
        assert_eq!(f.numerator(), 1);
        assert_eq!(f.denominator(), 2);
    }

    #[test]
    fn test_new_moves_sign_to_numerator() {
        let f = frac(3, -9);
        assert_eq!(f.numerator(), -1);
        assert_eq!(f.denominator(), 3);
    }

    #[test]
    fn test_zero_denominator_is_division_by_zero() {
        assert_eq!(Fraction::new(1, 0), Err(EngineError::DivisionByZero));
    }

    #[test]
    fn test_add_sixths_gives_third() {
        assert_eq!(frac(1, 6).add(frac(1, 6)), frac(1, 3));
    }

    #[test]
    fn test_subtract_from_one() {
        assert_eq!(Fraction::one().subtract(frac(1, 8)), frac(7, 8));
    }

    #[test]
    fn test_multiply_reduces() {
        assert_eq!(frac(2, 3).multiply(frac(3, 4)), frac(1, 2));
    }

    #[test]
    fn test_divide() {
        assert_eq!(frac(1, 4).divide(frac(5, 4)).unwrap(), frac(1, 5));
    }

    #[test]
    fn test_divide_by_zero_fraction_fails() {
        assert_eq!(
            frac(1, 4).divide(Fraction::zero()),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(frac(5, 4).reciprocal().unwrap(), frac(4, 5));
    }

    #[test]
    fn test_ordering_is_exact() {
        assert!(frac(13, 12) > Fraction::one());
        assert!(frac(1, 3) < frac(334, 1000));
        assert_eq!(frac(2, 6).cmp(&frac(1, 3)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_display_integer_and_fraction() {
        assert_eq!(Fraction::one().to_string(), "1");
        assert_eq!(frac(6, 3).to_string(), "2");
        assert_eq!(frac(7, 8).to_string(), "7/8");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(frac(1, 8).to_decimal(), Decimal::from_str("0.125").unwrap());
    }

    #[test]
    fn test_to_f64() {
        assert!((frac(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_to_third_of_estate() {
        let amount = frac(1, 3).apply_to(Decimal::from(90_000)).unwrap();
        assert_eq!(amount, Decimal::from(30_000));
    }

    #[test]
    fn test_sum_of_fractions() {
        let total: Fraction = [frac(1, 4), frac(2, 3), frac(1, 6)].iter().sum();
        assert_eq!(total, frac(13, 12));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Fraction = Vec::<Fraction>::new().into_iter().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(frac(2, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"numerator": 1, "denominator": 2}));
    }

    #[test]
    fn test_deserialization_reduces() {
        let f: Fraction = serde_json::from_str(r#"{"numerator": 3, "denominator": 9}"#).unwrap();
        assert_eq!(f, frac(1, 3));
    }

    #[test]
    fn test_deserialization_rejects_zero_denominator() {
        let result: Result<Fraction, _> =
            serde_json::from_str(r#"{"numerator": 1, "denominator": 0}"#);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_results_are_reduced(
            a in -500i64..500, b in 1i64..500, c in -500i64..500, d in 1i64..500
        ) {
            let x = frac(a, b);
            let y = frac(c, d);
            for result in [x.add(y), x.subtract(y), x.multiply(y)] {
                prop_assert!(result.denominator() > 0);
                prop_assert_eq!(gcd(result.numerator(), result.denominator()), 1);
            }
            if !y.is_zero() {
                let q = x.divide(y).unwrap();
                prop_assert!(q.denominator() > 0);
                prop_assert_eq!(gcd(q.numerator(), q.denominator()), 1);
            }
        }

        #[test]
        fn prop_subtract_undoes_add(
            a in -500i64..500, b in 1i64..500, c in -500i64..500, d in 1i64..500
        ) {
            let x = frac(a, b);
            let y = frac(c, d);
            prop_assert_eq!(x.add(y).subtract(y), x);
        }

        #[test]
        fn prop_divide_undoes_multiply(
            a in -500i64..500, b in 1i64..500, c in 1i64..500, d in 1i64..500
        ) {
            let x = frac(a, b);
            let y = frac(c, d);
            prop_assert_eq!(x.multiply(y).divide(y).unwrap(), x);
        }
    }
}
