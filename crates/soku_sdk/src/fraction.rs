use crate::{
    constants::{Rounding, BIPS_BASE},
    math::{cmp_products, mul_div, pow10},
};
use ethnum::U256;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: U256,
    pub denominator: U256,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: U256::ZERO,
        denominator: U256::ONE,
    };

    pub fn new(numerator: impl Into<U256>, denominator: impl Into<U256>) -> Self {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    pub fn from_integer(value: impl Into<U256>) -> Self {
        Self::new(value, U256::ONE)
    }

    /// Floor division. A zero denominator reads as zero.
    pub fn quotient(&self) -> U256 {
        self.numerator
            .checked_div(self.denominator)
            .unwrap_or(U256::ZERO)
    }

    pub fn remainder(&self) -> Fraction {
        Fraction::new(
            self.numerator.checked_rem(self.denominator).unwrap_or(U256::ZERO),
            self.denominator,
        )
    }

    pub fn invert(&self) -> Fraction {
        Fraction::new(self.denominator, self.numerator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == U256::ZERO || self.denominator == U256::ZERO
    }

    pub fn add(&self, other: &Fraction) -> Fraction {
        if self.denominator == other.denominator {
            return Fraction::new(self.numerator + other.numerator, self.denominator);
        }
        let (a, b, c, d) = scale_to_fit(
            self.numerator,
            self.denominator,
            other.numerator,
            other.denominator,
        );
        Fraction::new(a * d + c * b, b * d)
    }

    /// Returns `None` when the result would be negative.
    pub fn checked_sub(&self, other: &Fraction) -> Option<Fraction> {
        if self.less_than(other) {
            return None;
        }
        if self.denominator == other.denominator {
            return Some(Fraction::new(
                self.numerator - other.numerator,
                self.denominator,
            ));
        }
        let (a, b, c, d) = scale_to_fit(
            self.numerator,
            self.denominator,
            other.numerator,
            other.denominator,
        );
        Some(Fraction::new((a * d).saturating_sub(c * b), b * d))
    }

    pub fn multiply(&self, other: &Fraction) -> Fraction {
        let (a, b, c, d) = scale_to_fit(
            self.numerator,
            self.denominator,
            other.numerator,
            other.denominator,
        );
        Fraction::new(a * c, b * d)
    }

    pub fn divide(&self, other: &Fraction) -> Fraction {
        self.multiply(&other.invert())
    }

    pub fn less_than(&self, other: &Fraction) -> bool {
        self.cmp_value(other) == Ordering::Less
    }

    pub fn greater_than(&self, other: &Fraction) -> bool {
        self.cmp_value(other) == Ordering::Greater
    }

    pub fn equal_to(&self, other: &Fraction) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }

    /// Exact comparison by cross multiplication.
    pub fn cmp_value(&self, other: &Fraction) -> Ordering {
        cmp_products(
            self.numerator,
            other.denominator,
            other.numerator,
            self.denominator,
        )
    }

    /// Formats with exactly `decimal_places` digits after the point.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> String {
        if self.denominator == U256::ZERO {
            return format_digits(U256::ZERO, &vec![0; decimal_places as usize]);
        }

        let mut integer = self.quotient();
        let (mut remainder, mut denominator) = (self.numerator % self.denominator, self.denominator);
        let mut digits = Vec::with_capacity(decimal_places as usize);

        for _ in 0..decimal_places {
            (remainder, denominator) = fit_times_ten(remainder, denominator);
            let scaled = remainder * U256::new(10);
            digits.push((scaled / denominator).as_u8().min(9));
            remainder = scaled % denominator;
        }

        if round_up(remainder, denominator, rounding) {
            let mut carry = true;
            for digit in digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                integer += U256::ONE;
            }
        }

        format_digits(integer, &digits)
    }

    /// Formats with `significant_digits` significant digits and no trailing zeros.
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let integer = self.quotient();

        if integer > U256::ZERO {
            let integer_digits = integer.to_string().len() as u32;

            if integer_digits >= significant_digits {
                let divisor = pow10(integer_digits - significant_digits);
                let mut rounded = integer / divisor;
                let remainder = integer % divisor;
                // the fractional part only matters for ties and upward rounding
                let has_fraction = (self.numerator % self.denominator) != U256::ZERO;
                let bump = match rounding {
                    Rounding::RoundDown => false,
                    Rounding::RoundHalfUp if divisor == U256::ONE => {
                        let fraction = self.numerator % self.denominator;
                        fraction >= self.denominator - fraction
                    }
                    Rounding::RoundHalfUp => remainder >= divisor - remainder,
                    Rounding::RoundUp => remainder > U256::ZERO || has_fraction,
                };
                if bump {
                    rounded += U256::ONE;
                }
                return (rounded * divisor).to_string();
            }

            let fixed = self.to_fixed(significant_digits - integer_digits, rounding);
            return trim_trailing_zeros(fixed);
        }

        // count the zeros between the decimal point and the first significant digit
        let (mut remainder, mut denominator) = (self.numerator, self.denominator);
        let mut leading_zeros = 0u32;
        loop {
            (remainder, denominator) = fit_times_ten(remainder, denominator);
            let scaled = remainder * U256::new(10);
            if scaled >= denominator || remainder == U256::ZERO {
                break;
            }
            remainder = scaled;
            leading_zeros += 1;
        }

        let fixed = self.to_fixed(leading_zeros + significant_digits, rounding);
        trim_trailing_zeros(fixed)
    }
}

impl From<U256> for Fraction {
    fn from(value: U256) -> Self {
        Fraction::from_integer(value)
    }
}

/// A fraction displayed as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub Fraction);

impl Percent {
    pub const ZERO: Percent = Percent(Fraction::ZERO);

    pub fn new(numerator: impl Into<U256>, denominator: impl Into<U256>) -> Self {
        Self(Fraction::new(numerator, denominator))
    }

    pub fn from_bips(bips: u16) -> Self {
        Self(Fraction::new(U256::from(bips), BIPS_BASE))
    }

    pub fn fraction(&self) -> &Fraction {
        &self.0
    }

    pub fn less_than(&self, other: &Percent) -> bool {
        self.0.less_than(&other.0)
    }

    pub fn greater_than(&self, other: &Percent) -> bool {
        self.0.greater_than(&other.0)
    }

    pub fn checked_sub(&self, other: &Percent) -> Option<Percent> {
        self.0.checked_sub(&other.0).map(Percent)
    }

    pub fn to_significant(&self, significant_digits: u32) -> String {
        self.0
            .multiply(&Fraction::from_integer(100u128))
            .to_significant(significant_digits, Rounding::RoundHalfUp)
    }

    pub fn to_fixed(&self, decimal_places: u32) -> String {
        self.0
            .multiply(&Fraction::from_integer(100u128))
            .to_fixed(decimal_places, Rounding::RoundHalfUp)
    }
}

fn round_up(remainder: U256, denominator: U256, rounding: Rounding) -> bool {
    match rounding {
        Rounding::RoundDown => false,
        Rounding::RoundHalfUp => remainder >= denominator - remainder,
        Rounding::RoundUp => remainder != U256::ZERO,
    }
}

/// Keeps `remainder * 10` from overflowing by shifting the remainder and denominator together.
fn fit_times_ten(mut remainder: U256, mut denominator: U256) -> (U256, U256) {
    let limit = U256::MAX / U256::new(10);
    while remainder > limit || denominator > limit {
        remainder >>= 4u32;
        denominator >>= 4u32;
    }
    (remainder, denominator.max(U256::ONE))
}

/// Shifts both fractions so that cross products fit in 256 bits. Only the displayed precision of
/// very large operands is affected.
fn scale_to_fit(mut a: U256, mut b: U256, mut c: U256, mut d: U256) -> (U256, U256, U256, U256) {
    fn bits(value: U256) -> u32 {
        256 - value.leading_zeros()
    }

    while bits(a) + bits(d) > 255
        || bits(c) + bits(b) > 255
        || bits(b) + bits(d) > 255
        || bits(a) + bits(c) > 255
    {
        if bits(a).max(bits(b)) >= bits(c).max(bits(d)) {
            a >>= 1u32;
            b >>= 1u32;
        } else {
            c >>= 1u32;
            d >>= 1u32;
        }
    }

    (a, b.max(U256::ONE), c, d.max(U256::ONE))
}

fn format_digits(integer: U256, digits: &[u8]) -> String {
    if digits.is_empty() {
        return integer.to_string();
    }
    let fractional: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    format!("{integer}.{fractional}")
}

fn trim_trailing_zeros(value: String) -> String {
    if !value.contains('.') {
        return value;
    }
    value
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Multiplies an integer by a fraction, flooring the result.
pub fn mul_fraction(value: U256, fraction: &Fraction) -> Option<U256> {
    mul_div(value, fraction.numerator, fraction.denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comparisons() {
        let a = Fraction::new(1u128, 10u128);
        let b = Fraction::new(4u128, 12u128);
        assert!(a.less_than(&b));
        assert!(b.greater_than(&a));
        assert!(Fraction::new(2u128, 4u128).equal_to(&Fraction::new(1u128, 2u128)));
    }

    #[test]
    fn test_add_and_sub() {
        let a = Fraction::new(1u128, 10u128);
        let b = Fraction::new(4u128, 12u128);
        assert_eq!(a.add(&b), Fraction::new(52u128, 120u128));
        assert_eq!(b.checked_sub(&a), Some(Fraction::new(28u128, 120u128)));
        assert_eq!(a.checked_sub(&b), None);
    }

    #[test]
    fn test_to_significant_rounds_fraction_when_integer_fills_digits() {
        let value = Fraction::new(123456u128, 100u128);
        assert_eq!(value.to_significant(4, Rounding::RoundHalfUp), "1235");
        assert_eq!(value.to_significant(4, Rounding::RoundDown), "1234");
        assert_eq!(Fraction::new(123449u128, 100u128).to_significant(4, Rounding::RoundHalfUp), "1234");
        assert_eq!(Fraction::new(123450u128, 100u128).to_significant(4, Rounding::RoundHalfUp), "1235");
        assert_eq!(Fraction::new(123456u128, 10u128).to_significant(4, Rounding::RoundHalfUp), "12350");
    }

    #[test]
    fn test_to_fixed_rounds_half_up() {
        let value = Fraction::new(2u128, 3u128);
        assert_eq!(value.to_fixed(2, Rounding::RoundHalfUp), "0.67");
        assert_eq!(value.to_fixed(2, Rounding::RoundDown), "0.66");
        assert_eq!(Fraction::new(1999u128, 1000u128).to_fixed(2, Rounding::RoundHalfUp), "2.00");
        assert_eq!(Fraction::new(123u128, 100u128).to_fixed(0, Rounding::RoundDown), "1");
    }

    #[test]
    fn test_to_significant() {
        assert_eq!(
            Fraction::new(1234567u128, 100u128).to_significant(6, Rounding::RoundHalfUp),
            "12345.7"
        );
        assert_eq!(
            Fraction::new(123456789u128, 1u128).to_significant(4, Rounding::RoundHalfUp),
            "123500000"
        );
        assert_eq!(
            Fraction::new(123u128, 1_000_000u128).to_significant(2, Rounding::RoundHalfUp),
            "0.00012"
        );
        assert_eq!(
            Fraction::new(5u128, 1u128).to_significant(6, Rounding::RoundHalfUp),
            "5"
        );
        assert_eq!(Fraction::ZERO.to_significant(6, Rounding::RoundHalfUp), "0");
    }

    #[test]
    fn test_percent_display() {
        assert_eq!(Percent::from_bips(50).to_fixed(2), "0.50");
        assert_eq!(Percent::new(1u128, 3u128).to_significant(4), "33.33");
    }
}
