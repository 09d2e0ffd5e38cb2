use ethnum::U256;

/// Full 512-bit product of two 256-bit integers, returned as `(high, low)` words.
pub fn widening_mul(a: U256, b: U256) -> (U256, U256) {
    let (a1, a0) = a.into_words();
    let (b1, b0) = b.into_words();

    let p00 = U256::from(a0) * U256::from(b0);
    let p01 = U256::from(a0) * U256::from(b1);
    let p10 = U256::from(a1) * U256::from(b0);
    let p11 = U256::from(a1) * U256::from(b1);

    let (mid, mid_carry) = p01.overflowing_add(p10);
    let (low, low_carry) = p00.overflowing_add(mid << 128u32);

    let mut high = p11 + (mid >> 128u32);
    if mid_carry {
        high += U256::ONE << 128u32;
    }
    if low_carry {
        high += U256::ONE;
    }

    (high, low)
}

/// Computes `floor(a * b / denominator)` without intermediate overflow.
///
/// Returns `None` when the denominator is zero or the quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Option<U256> {
    if denominator == U256::ZERO {
        return None;
    }

    let (high, low) = widening_mul(a, b);

    if high == U256::ZERO {
        return Some(low / denominator);
    }
    if high >= denominator {
        return None;
    }

    // binary long division of (high, low) by denominator; `high < denominator` keeps the
    // quotient within 256 bits
    let mut remainder = high;
    let mut quotient = U256::ZERO;

    for i in (0..256u32).rev() {
        let carry = (remainder >> 255u32) == U256::ONE;
        remainder = (remainder << 1u32) | ((low >> i) & U256::ONE);
        quotient <<= 1u32;

        if carry || remainder >= denominator {
            remainder = remainder.wrapping_sub(denominator);
            quotient |= U256::ONE;
        }
    }

    Some(quotient)
}

/// Compares `a * b` with `c * d` exactly.
pub fn cmp_products(a: U256, b: U256, c: U256, d: U256) -> std::cmp::Ordering {
    widening_mul(a, b).cmp(&widening_mul(c, d))
}

/// Integer square root (floor) by Newton's method.
pub fn sqrt(value: U256) -> U256 {
    if value < U256::new(4) {
        return if value == U256::ZERO {
            U256::ZERO
        } else {
            U256::ONE
        };
    }

    let two = U256::new(2);
    let mut z = value;
    let mut x = value / two + U256::ONE;
    while x < z {
        z = x;
        x = (value / x + x) / two;
    }
    z
}

pub fn pow10(exponent: u32) -> U256 {
    U256::new(10).pow(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_mul_fits() {
        let (high, low) = widening_mul(U256::new(12345), U256::new(6789));
        assert_eq!(high, U256::ZERO);
        assert_eq!(low, U256::new(12345 * 6789));
    }

    #[test]
    fn test_widening_mul_overflows_into_high_word() {
        // (2^255) * 4 = 2^257 -> high = 2, low = 0
        let (high, low) = widening_mul(U256::ONE << 255u32, U256::new(4));
        assert_eq!(high, U256::new(2));
        assert_eq!(low, U256::ZERO);

        // MAX * MAX = 2^512 - 2^257 + 1
        let (high, low) = widening_mul(U256::MAX, U256::MAX);
        assert_eq!(high, U256::MAX - U256::ONE);
        assert_eq!(low, U256::ONE);
    }

    #[test]
    fn test_mul_div_small() {
        assert_eq!(
            mul_div(U256::new(100), U256::new(3), U256::new(7)),
            Some(U256::new(42))
        );
    }

    #[test]
    fn test_mul_div_with_wide_intermediate() {
        let a = U256::MAX;
        let b = U256::new(1_000_000);
        assert_eq!(mul_div(a, b, U256::new(1_000_000)), Some(U256::MAX));
        assert_eq!(mul_div(a, b, U256::new(2_000_000)), Some(U256::MAX / U256::new(2)));
    }

    #[test]
    fn test_mul_div_rejects_overflow_and_zero() {
        assert_eq!(mul_div(U256::MAX, U256::new(2), U256::ONE), None);
        assert_eq!(mul_div(U256::ONE, U256::ONE, U256::ZERO), None);
    }

    #[test]
    fn test_cmp_products() {
        use std::cmp::Ordering;
        assert_eq!(
            cmp_products(U256::MAX, U256::new(2), U256::MAX, U256::new(3)),
            Ordering::Less
        );
        assert_eq!(
            cmp_products(U256::new(6), U256::new(4), U256::new(8), U256::new(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt(U256::ZERO), U256::ZERO);
        assert_eq!(sqrt(U256::new(3)), U256::ONE);
        assert_eq!(sqrt(U256::new(16)), U256::new(4));
        assert_eq!(sqrt(U256::new(17)), U256::new(4));
        assert_eq!(sqrt(U256::new(1_000_000_000_000)), U256::new(1_000_000));
    }
}
