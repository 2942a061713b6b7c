use std::fmt;

use crate::Type;

/// A single typed cell: a [`Type`] tag plus a raw byte payload.
///
/// Numeric payloads hold the ASCII representation; decoding to a native
/// number happens on demand. Text payloads hold the bytes as written
/// (already unquoted and unescaped). NULL is the singleton [`Value::NULL`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Value {
    typ: Type,
    val: Vec<u8>,
}

impl Default for Value {
    fn default() -> Self {
        Self::NULL
    }
}

impl Value {
    /// The SQL NULL value.
    pub const NULL: Self = Self {
        typ: Type::Null,
        val: Vec::new(),
    };

    /// Build a value from a trusted type/payload pair. The payload is not
    /// validated against the type.
    #[must_use]
    pub fn make_trusted(typ: Type, val: Vec<u8>) -> Self {
        if typ == Type::Null {
            return Self::NULL;
        }
        Self { typ, val }
    }

    #[must_use]
    pub fn new_int64(v: i64) -> Self {
        Self::make_trusted(Type::Int64, v.to_string().into_bytes())
    }

    #[must_use]
    pub fn new_uint64(v: u64) -> Self {
        Self::make_trusted(Type::Uint64, v.to_string().into_bytes())
    }

    #[must_use]
    pub fn new_float64(v: f64) -> Self {
        Self::make_trusted(Type::Float64, format!("{v}").into_bytes())
    }

    /// A DECIMAL literal from its ASCII spelling.
    #[must_use]
    pub fn new_decimal(ascii: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::Decimal, ascii.into())
    }

    #[must_use]
    pub fn new_varchar(s: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::VarChar, s.into())
    }

    #[must_use]
    pub fn new_varbinary(s: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::VarBinary, s.into())
    }

    /// A `0x...` literal; the payload keeps the spelling without the prefix.
    #[must_use]
    pub fn new_hexnum(digits: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::HexNum, digits.into())
    }

    /// An `X'...'` literal; the payload keeps the hex digits.
    #[must_use]
    pub fn new_hexval(digits: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::HexVal, digits.into())
    }

    /// A `0b...` or `B'...'` literal; the payload keeps the binary digits.
    #[must_use]
    pub fn new_bitnum(digits: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::BitNum, digits.into())
    }

    #[must_use]
    pub fn new_date(ascii: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::Date, ascii.into())
    }

    #[must_use]
    pub fn new_time(ascii: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::Time, ascii.into())
    }

    #[must_use]
    pub fn new_datetime(ascii: impl Into<Vec<u8>>) -> Self {
        Self::make_trusted(Type::Datetime, ascii.into())
    }

    #[must_use]
    pub const fn typ(&self) -> Type {
        self.typ
    }

    /// The raw payload bytes.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.val
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.val.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.val.is_empty()
    }

    /// Payload as UTF-8, lossy for binary payloads.
    #[must_use]
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.val)
    }

    /// Decode an integral payload. `None` when the type is not integral or
    /// the payload does not parse.
    #[must_use]
    pub fn to_int64(&self) -> Option<i64> {
        if !self.typ.is_integral() {
            return None;
        }
        std::str::from_utf8(&self.val).ok()?.parse().ok()
    }

    #[must_use]
    pub fn to_uint64(&self) -> Option<u64> {
        if !self.typ.is_integral() {
            return None;
        }
        std::str::from_utf8(&self.val).ok()?.parse().ok()
    }

    /// Decode a numeric payload as a float. Accepts any numeric type.
    #[must_use]
    pub fn to_float64(&self) -> Option<f64> {
        if !self.typ.is_number() {
            return None;
        }
        std::str::from_utf8(&self.val).ok()?.parse().ok()
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.typ.is_null()
    }

    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.typ.is_integral()
    }

    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.typ.is_signed()
    }

    #[must_use]
    pub fn is_unsigned(&self) -> bool {
        self.typ.is_unsigned()
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        self.typ.is_float()
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.typ.is_text()
    }

    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.typ.is_binary()
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        self.typ.is_number()
    }

    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.typ.is_quoted()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.typ, self.as_str())
    }
}

/// SQL-ish rendering: quoted types are single-quoted with `'` doubled, hex
/// and bit literals get their prefixes back, everything else prints raw.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        match self.typ {
            Type::HexNum => write!(f, "0x{}", self.as_str()),
            Type::HexVal => write!(f, "X'{}'", self.as_str()),
            Type::BitNum => write!(f, "0b{}", self.as_str()),
            t if t.is_quoted() => {
                // Backslashes are escape introducers in MySQL strings, so
                // they must be doubled alongside the quotes.
                let escaped = self.as_str().replace('\\', "\\\\").replace('\'', "''");
                write!(f, "'{escaped}'")
            }
            _ => f.write_str(&self.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_singleton() {
        assert!(Value::NULL.is_null());
        assert_eq!(Value::make_trusted(Type::Null, b"junk".to_vec()), Value::NULL);
        assert_eq!(Value::NULL.to_string(), "NULL");
    }

    #[test]
    fn int64_round_trip() {
        let v = Value::new_int64(-42);
        assert_eq!(v.typ(), Type::Int64);
        assert_eq!(v.raw(), b"-42");
        assert_eq!(v.to_int64(), Some(-42));
        assert_eq!(v.to_string(), "-42");
    }

    #[test]
    fn uint64_round_trip() {
        let v = Value::new_uint64(u64::MAX);
        assert_eq!(v.to_uint64(), Some(u64::MAX));
        assert_eq!(v.to_int64(), None);
    }

    #[test]
    fn float_decoding() {
        let v = Value::new_float64(1.5);
        assert_eq!(v.to_float64(), Some(1.5));
        let i = Value::new_int64(3);
        assert_eq!(i.to_float64(), Some(3.0));
        let s = Value::new_varchar("3");
        assert_eq!(s.to_float64(), None);
    }

    #[test]
    fn quoting_in_display() {
        assert_eq!(Value::new_varchar("it's").to_string(), "'it''s'");
        assert_eq!(Value::new_hexnum("1A").to_string(), "0x1A");
        assert_eq!(Value::new_hexval("CAFE").to_string(), "X'CAFE'");
        assert_eq!(Value::new_bitnum("1011").to_string(), "0b1011");
        assert_eq!(Value::new_decimal("1.50").to_string(), "1.50");
    }

    #[test]
    fn predicates_forward_to_type() {
        assert!(Value::new_varchar("x").is_text());
        assert!(Value::new_varbinary("x").is_binary());
        assert!(Value::new_int64(1).is_signed());
        assert!(Value::new_uint64(1).is_unsigned());
        assert!(Value::new_decimal("1").is_number());
    }
}
