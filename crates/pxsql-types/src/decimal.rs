use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

/// Maximum total number of digits a MySQL DECIMAL column can carry.
pub const MAX_PRECISION: u32 = 65;
/// Maximum number of fractional digits a MySQL DECIMAL column can carry.
pub const MAX_SCALE: u32 = 30;

/// Largest exponent magnitude accepted in scientific notation.
const EXPONENT_LIMIT: i64 = 1024;

/// An immutable arbitrary-precision decimal: `value * 10^exp`.
///
/// All operations return new values. Equality and ordering are numeric:
/// `1.0 == 1.00` even though the representations differ.
#[derive(Debug, Clone)]
pub struct Decimal {
    value: BigInt,
    exp: i32,
}

/// A malformed decimal string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("can't convert empty string to decimal")]
    Empty,
    #[error("can't convert {0:?} to decimal: too many decimal points")]
    TooManyPoints(String),
    #[error("can't convert {0:?} to decimal: unexpected character")]
    UnexpectedChar(String),
    #[error("invalid decimal string: {0:?}")]
    Invalid(String),
    #[error("exponent in {0:?} is out of range")]
    ExponentOverflow(String),
}

fn pow10(n: u32) -> BigInt {
    let mut p = BigInt::from(1u8);
    for _ in 0..n {
        p *= 10u32;
    }
    p
}

/// The largest decimal with `precision` total digits and `scale` of them
/// fractional, i.e. `precision` nines.
fn largest_form(precision: u32, scale: u32, negative: bool) -> Decimal {
    let mut value = pow10(precision) - BigInt::from(1u8);
    if negative {
        value = -value;
    }
    Decimal {
        value,
        exp: -(scale as i32),
    }
}

impl Decimal {
    /// Zero with exponent 0.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            value: BigInt::zero(),
            exp: 0,
        }
    }

    /// `coefficient * 10^exp`.
    #[must_use]
    pub fn new(coefficient: i64, exp: i32) -> Self {
        Self {
            value: BigInt::from(coefficient),
            exp,
        }
    }

    #[must_use]
    pub fn from_int(v: i64) -> Self {
        Self::new(v, 0)
    }

    /// Parse a decimal with unbounded precision.
    ///
    /// Accepts surrounding ASCII whitespace, an optional sign, one optional
    /// decimal point, and an optional `e`/`E` exponent. Exponents beyond
    /// ±1024 are rejected. Trailing zeroes are preserved.
    pub fn new_from_string(s: &str) -> Result<Self, DecimalError> {
        let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r'));
        if trimmed.is_empty() {
            return Err(DecimalError::Empty);
        }

        let bytes = trimmed.as_bytes();
        let mut i = 0;
        let mut neg = false;
        match bytes[0] {
            b'+' => i = 1,
            b'-' => {
                neg = true;
                i = 1;
            }
            _ => {}
        }

        let mut digits = String::with_capacity(bytes.len());
        let mut frac_len: i64 = 0;
        let mut seen_dot = false;
        let mut seen_digit = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => {
                    digits.push(bytes[i] as char);
                    if seen_dot {
                        frac_len += 1;
                    }
                    seen_digit = true;
                }
                b'.' => {
                    if seen_dot {
                        return Err(DecimalError::TooManyPoints(s.to_owned()));
                    }
                    seen_dot = true;
                }
                b'e' | b'E' => break,
                _ => return Err(DecimalError::UnexpectedChar(s.to_owned())),
            }
            i += 1;
        }
        if !seen_digit {
            return Err(DecimalError::Invalid(s.to_owned()));
        }

        let mut exp = -frac_len;
        if i < bytes.len() {
            // Exponent part: bytes[i] is 'e' or 'E'.
            let etext = &trimmed[i + 1..];
            let e: i64 = etext
                .parse()
                .map_err(|_| DecimalError::Invalid(s.to_owned()))?;
            if e.abs() > EXPONENT_LIMIT {
                return Err(DecimalError::ExponentOverflow(s.to_owned()));
            }
            exp += e;
        }

        let mut value = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| DecimalError::Invalid(s.to_owned()))?;
        if neg {
            value = -value;
        }
        Ok(Self {
            value,
            exp: exp as i32,
        })
    }

    /// Parse a decimal enforcing MySQL's column limits: at most 65 total
    /// digits with at most 30 fractional.
    ///
    /// Integral overflow is not an error: the result clamps to the largest
    /// representable value of that sign. Fractional overflow truncates.
    /// No exponent notation.
    pub fn new_from_mysql(s: &[u8]) -> Result<Self, DecimalError> {
        let original = String::from_utf8_lossy(s).into_owned();
        let mut s = s;
        let mut neg = false;
        if let Some(&first) = s.first() {
            match first {
                b'+' => s = &s[1..],
                b'-' => {
                    neg = true;
                    s = &s[1..];
                }
                _ => {}
            }
        }
        if s.is_empty() {
            return Err(DecimalError::Empty);
        }

        let (integral, fractional) = match s.iter().position(|&b| b == b'.') {
            Some(dot) => {
                let frac = &s[dot + 1..];
                if frac.contains(&b'.') {
                    return Err(DecimalError::TooManyPoints(original));
                }
                (&s[..dot], frac)
            }
            None => (s, &s[..0]),
        };
        if integral.iter().any(|b| !b.is_ascii_digit())
            || fractional.iter().any(|b| !b.is_ascii_digit())
        {
            return Err(DecimalError::UnexpectedChar(original));
        }

        // Leading zeroes do not count against the precision cap.
        let significant = {
            let trimmed: &[u8] = {
                let mut t = integral;
                while t.len() > 1 && t[0] == b'0' {
                    t = &t[1..];
                }
                t
            };
            if trimmed == b"0" { &trimmed[..0] } else { trimmed }
        };

        let intg = significant.len() as u32;
        if intg > MAX_PRECISION {
            return Ok(largest_form(MAX_PRECISION, 0, neg));
        }

        let frac_keep = (fractional.len() as u32)
            .min(MAX_SCALE)
            .min(MAX_PRECISION - intg) as usize;
        let fractional = &fractional[..frac_keep];

        let mut digits = Vec::with_capacity(integral.len() + fractional.len() + 1);
        digits.extend_from_slice(integral);
        digits.extend_from_slice(fractional);
        if digits.is_empty() {
            return Err(DecimalError::Invalid(original));
        }

        let mut value =
            BigInt::parse_bytes(&digits, 10).ok_or(DecimalError::Invalid(original))?;
        if neg {
            value = -value;
        }
        Ok(Self {
            value,
            exp: -(fractional.len() as i32),
        })
    }

    /// -1, 0, or +1.
    #[must_use]
    pub fn sign(&self) -> i32 {
        match self.value.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            value: -&self.value,
            exp: self.exp,
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            value: self.value.abs(),
            exp: self.exp,
        }
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let exp = self.exp.min(other.exp);
        let a = self.rescaled_value(exp);
        let b = other.rescaled_value(exp);
        Self { value: a + b, exp }
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            value: &self.value * &other.value,
            exp: self.exp + other.exp,
        }
    }

    /// Division with remainder.
    ///
    /// Returns `(q, r)` with `self = divisor*q + r`, where `q` is an integer
    /// multiple of `10^(-scale)` (truncated toward zero) and `|r| <
    /// |divisor| * 10^(-scale)`.
    #[must_use]
    pub fn quo_rem(&self, divisor: &Self, scale: u32) -> (Self, Self) {
        let qexp = -(scale as i32);
        let e = i64::from(self.exp) - i64::from(divisor.exp) - i64::from(qexp);
        let (aa, bb, rexp) = if e < 0 {
            let shift = (-e) as u32;
            (
                self.value.clone(),
                &divisor.value * pow10(shift),
                self.exp,
            )
        } else {
            (
                &self.value * pow10(e as u32),
                divisor.value.clone(),
                qexp + divisor.exp,
            )
        };
        let q = &aa / &bb;
        let r = &aa % &bb;
        (
            Self { value: q, exp: qexp },
            Self { value: r, exp: rexp },
        )
    }

    /// Numeric comparison, independent of representation.
    #[must_use]
    pub fn cmp(&self, other: &Self) -> Ordering {
        let exp = self.exp.min(other.exp);
        self.rescaled_value(exp).cmp(&other.rescaled_value(exp))
    }

    /// Truncate toward zero to an i64, if it fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.exp >= 0 {
            (&self.value * pow10(self.exp as u32)).to_i64()
        } else {
            (&self.value / pow10((-self.exp) as u32)).to_i64()
        }
    }

    fn rescaled_value(&self, exp: i32) -> BigInt {
        debug_assert!(exp <= self.exp);
        &self.value * pow10((self.exp - exp) as u32)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.sign() == Sign::Minus {
            f.write_str("-")?;
        }
        let digits = self.value.magnitude().to_string();
        if self.exp >= 0 {
            f.write_str(&digits)?;
            for _ in 0..self.exp {
                f.write_str("0")?;
            }
            return Ok(());
        }
        let frac = (-self.exp) as usize;
        if digits.len() <= frac {
            f.write_str("0.")?;
            for _ in 0..(frac - digits.len()) {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        } else {
            let split = digits.len() - frac;
            write!(f, "{}.{}", &digits[..split], &digits[split..])
        }
    }
}

/// Size and scale of a decimal string without parsing it: total digit count
/// and digits after the point.
#[must_use]
pub fn size_and_scale_from_string(s: &str) -> (u32, u32) {
    let s = s
        .strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s);
    let total = s.len() as u32;
    match s.find('.') {
        None => (total, 0),
        Some(idx) => (total - 1, total - 1 - idx as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_simple() {
        let d = Decimal::new_from_string("-123.45").unwrap();
        assert_eq!(d.to_string(), "-123.45");
        let d = Decimal::new_from_string(".0001").unwrap();
        assert_eq!(d.to_string(), "0.0001");
        let d = Decimal::new_from_string("1.47000").unwrap();
        assert_eq!(d.to_string(), "1.47000");
    }

    #[test]
    fn parse_exponent() {
        let d = Decimal::new_from_string("1.5e3").unwrap();
        assert_eq!(d.to_string(), "1500");
        let d = Decimal::new_from_string("15e-2").unwrap();
        assert_eq!(d.to_string(), "0.15");
        assert!(matches!(
            Decimal::new_from_string("1e99999"),
            Err(DecimalError::ExponentOverflow(_))
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Decimal::new_from_string("").is_err());
        assert!(Decimal::new_from_string("-").is_err());
        assert!(Decimal::new_from_string("1.2.3").is_err());
        assert!(Decimal::new_from_string("12a").is_err());
        assert!(Decimal::new_from_string("e4").is_err());
    }

    #[test]
    fn string_parse_is_unbounded() {
        let sixty_six_nines = "9".repeat(66);
        let d = Decimal::new_from_string(&sixty_six_nines).unwrap();
        assert_eq!(d.to_string(), sixty_six_nines);
    }

    #[test]
    fn mysql_parse_clamps_integral_overflow() {
        let sixty_six_nines = "9".repeat(66);
        let d = Decimal::new_from_mysql(sixty_six_nines.as_bytes()).unwrap();
        assert_eq!(d.to_string(), "9".repeat(65));

        let neg = format!("-{sixty_six_nines}");
        let d = Decimal::new_from_mysql(neg.as_bytes()).unwrap();
        assert_eq!(d.to_string(), format!("-{}", "9".repeat(65)));
    }

    #[test]
    fn mysql_parse_truncates_fraction() {
        // 40 fractional digits truncate to the 30-digit scale cap.
        let s = format!("1.{}", "7".repeat(40));
        let d = Decimal::new_from_mysql(s.as_bytes()).unwrap();
        assert_eq!(d.to_string(), format!("1.{}", "7".repeat(30)));

        // 60 integral digits leave room for only 5 fractional.
        let s = format!("{}.123456789", "8".repeat(60));
        let d = Decimal::new_from_mysql(s.as_bytes()).unwrap();
        assert_eq!(d.to_string(), format!("{}.12345", "8".repeat(60)));
    }

    #[test]
    fn mysql_parse_ignores_leading_zeroes() {
        let s = format!("000{}", "9".repeat(65));
        let d = Decimal::new_from_mysql(s.as_bytes()).unwrap();
        assert_eq!(d.to_string(), "9".repeat(65));
    }

    #[test]
    fn mysql_parse_plain() {
        let d = Decimal::new_from_mysql(b"12.50").unwrap();
        assert_eq!(d.to_string(), "12.50");
        assert!(Decimal::new_from_mysql(b"").is_err());
        assert!(Decimal::new_from_mysql(b"+").is_err());
        assert!(Decimal::new_from_mysql(b"1..2").is_err());
    }

    #[test]
    fn arithmetic() {
        let a = Decimal::new_from_string("1.5").unwrap();
        let b = Decimal::new_from_string("0.25").unwrap();
        assert_eq!(a.add(&b).to_string(), "1.75");
        assert_eq!(a.sub(&b).to_string(), "1.25");
        assert_eq!(a.neg().to_string(), "-1.5");
        assert_eq!(a.neg().abs().to_string(), "1.5");
        assert_eq!(a.mul(&b).to_string(), "0.375");
    }

    #[test]
    fn quo_rem_integral() {
        let ten = Decimal::from_int(10);
        let three = Decimal::from_int(3);
        let (q, r) = ten.quo_rem(&three, 0);
        assert_eq!(q.to_string(), "3");
        assert_eq!(r.to_string(), "1");
    }

    #[test]
    fn quo_rem_scaled() {
        let one = Decimal::from_int(1);
        let eight = Decimal::from_int(8);
        let (q, r) = one.quo_rem(&eight, 3);
        assert_eq!(q.to_string(), "0.125");
        assert!(r.is_zero());
    }

    #[test]
    fn quo_rem_reconstructs() {
        let a = Decimal::new_from_string("7.3").unwrap();
        let b = Decimal::new_from_string("2.4").unwrap();
        let (q, r) = a.quo_rem(&b, 2);
        assert_eq!(b.mul(&q).add(&r), a);
    }

    #[test]
    fn ordering_is_numeric() {
        let a = Decimal::new_from_string("1.0").unwrap();
        let b = Decimal::new_from_string("1.00").unwrap();
        assert_eq!(a, b);
        let c = Decimal::new_from_string("-2").unwrap();
        assert_eq!(c.cmp(&a), std::cmp::Ordering::Less);
        assert_eq!(c.sign(), -1);
        assert_eq!(Decimal::zero().sign(), 0);
    }

    #[test]
    fn to_i64_truncates() {
        assert_eq!(Decimal::new_from_string("12.9").unwrap().to_i64(), Some(12));
        assert_eq!(Decimal::new_from_string("-12.9").unwrap().to_i64(), Some(-12));
        assert_eq!(Decimal::new(15, 2).to_i64(), Some(1500));
    }

    #[test]
    fn size_and_scale() {
        assert_eq!(size_and_scale_from_string("123.45"), (5, 2));
        assert_eq!(size_and_scale_from_string("-123.45"), (5, 2));
        assert_eq!(size_and_scale_from_string("123"), (3, 0));
    }

    proptest! {
        #[test]
        fn display_round_trips(v in -1_000_000_000i64..1_000_000_000, scale in 0u32..6) {
            let d = Decimal::new(v, -(scale as i32));
            let back = Decimal::new_from_string(&d.to_string()).unwrap();
            prop_assert_eq!(back, d);
        }

        #[test]
        fn add_commutes(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000,
                        ea in -4i32..4, eb in -4i32..4) {
            let x = Decimal::new(a, ea);
            let y = Decimal::new(b, eb);
            prop_assert_eq!(x.add(&y), y.add(&x));
        }
    }
}
