//! Typed value primitives for ParallaxSQL.
//!
//! This crate holds everything a SQL literal needs once it leaves the lexer:
//! the closed [`Type`] catalog with its classification flags, the tagged
//! [`Value`] cell, the arbitrary-precision [`Decimal`], and the MySQL-calendar
//! [`Date`]/[`Time`]/[`DateTime`] records with interval arithmetic.

mod datetime;
mod decimal;
mod value;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use datetime::{
    mysql_date_from_day_number, mysql_day_number, new_time_from_seconds, Date, DateTime, Interval,
    IntervalUnit, Time, DEFAULT_PRECISION, MAX_HOURS,
};
pub use decimal::{size_and_scale_from_string, Decimal, DecimalError, MAX_PRECISION, MAX_SCALE};
pub use value::Value;

// Classification bit flags merged into the type discriminants. Querying a
// type's family is a single mask test.
const FLAG_IS_INTEGRAL: u32 = 256;
const FLAG_IS_UNSIGNED: u32 = 512;
const FLAG_IS_FLOAT: u32 = 1024;
const FLAG_IS_QUOTED: u32 = 2048;
const FLAG_IS_TEXT: u32 = 4096;
const FLAG_IS_BINARY: u32 = 8192;

/// The closed catalog of column/value types.
///
/// Discriminants are a small base id merged with the classification flags
/// above, so the predicates below are mask tests rather than match arms.
/// The numbering is wire-compatible with the MySQL-protocol conversion in
/// [`mysql_to_type`] / [`type_to_mysql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Type {
    Null = 0,
    Int8 = 1 | FLAG_IS_INTEGRAL,
    Uint8 = 2 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Int16 = 3 | FLAG_IS_INTEGRAL,
    Uint16 = 4 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Int24 = 5 | FLAG_IS_INTEGRAL,
    Uint24 = 6 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Int32 = 7 | FLAG_IS_INTEGRAL,
    Uint32 = 8 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Int64 = 9 | FLAG_IS_INTEGRAL,
    Uint64 = 10 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Float32 = 11 | FLAG_IS_FLOAT,
    Float64 = 12 | FLAG_IS_FLOAT,
    Timestamp = 13 | FLAG_IS_QUOTED,
    Date = 14 | FLAG_IS_QUOTED,
    Time = 15 | FLAG_IS_QUOTED,
    Datetime = 16 | FLAG_IS_QUOTED,
    Year = 17 | FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED,
    Decimal = 18,
    Text = 19 | FLAG_IS_QUOTED | FLAG_IS_TEXT,
    Blob = 20 | FLAG_IS_QUOTED | FLAG_IS_BINARY,
    VarChar = 21 | FLAG_IS_QUOTED | FLAG_IS_TEXT,
    VarBinary = 22 | FLAG_IS_QUOTED | FLAG_IS_BINARY,
    Char = 23 | FLAG_IS_QUOTED | FLAG_IS_TEXT,
    Binary = 24 | FLAG_IS_QUOTED | FLAG_IS_BINARY,
    Bit = 25 | FLAG_IS_QUOTED,
    Enum = 26 | FLAG_IS_QUOTED,
    Set = 27 | FLAG_IS_QUOTED,
    Tuple = 28,
    Geometry = 29 | FLAG_IS_QUOTED,
    Json = 30 | FLAG_IS_QUOTED,
    Expression = 31,
    HexNum = 32 | FLAG_IS_TEXT,
    HexVal = 33 | FLAG_IS_TEXT,
    BitNum = 34 | FLAG_IS_TEXT,
    Vector = 35 | FLAG_IS_QUOTED,
}

impl Type {
    const fn flags(self) -> u32 {
        self as u32
    }

    /// Signed or unsigned integer representable in up to 64 bits.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        self.flags() & FLAG_IS_INTEGRAL == FLAG_IS_INTEGRAL
    }

    /// Signed integral.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        self.flags() & (FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED) == FLAG_IS_INTEGRAL
    }

    /// Unsigned integral. Not the complement of [`Type::is_signed`].
    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        self.flags() & (FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED)
            == FLAG_IS_INTEGRAL | FLAG_IS_UNSIGNED
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        self.flags() & FLAG_IS_FLOAT == FLAG_IS_FLOAT
    }

    #[must_use]
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::Decimal)
    }

    /// Quoted text or binary. `BIT` carries the flag for wire purposes but is
    /// not considered quoted.
    #[must_use]
    pub const fn is_quoted(self) -> bool {
        self.flags() & FLAG_IS_QUOTED == FLAG_IS_QUOTED && !matches!(self, Self::Bit)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        self.flags() & FLAG_IS_TEXT == FLAG_IS_TEXT
    }

    #[must_use]
    pub const fn is_binary(self) -> bool {
        self.flags() & FLAG_IS_BINARY == FLAG_IS_BINARY
    }

    #[must_use]
    pub const fn is_text_or_binary(self) -> bool {
        self.is_text() || self.is_binary()
    }

    /// Any numeric type: integral, float, or decimal.
    #[must_use]
    pub const fn is_number(self) -> bool {
        self.is_integral() || self.is_float() || self.is_decimal()
    }

    /// Has a date component.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Datetime | Self::Date | Self::Timestamp)
    }

    /// Has a date and/or time component.
    #[must_use]
    pub const fn is_date_or_time(self) -> bool {
        matches!(
            self,
            Self::Datetime | Self::Date | Self::Timestamp | Self::Time
        )
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_enum(self) -> bool {
        matches!(self, Self::Enum)
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Set)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Int8 => "INT8",
            Self::Uint8 => "UINT8",
            Self::Int16 => "INT16",
            Self::Uint16 => "UINT16",
            Self::Int24 => "INT24",
            Self::Uint24 => "UINT24",
            Self::Int32 => "INT32",
            Self::Uint32 => "UINT32",
            Self::Int64 => "INT64",
            Self::Uint64 => "UINT64",
            Self::Float32 => "FLOAT32",
            Self::Float64 => "FLOAT64",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Datetime => "DATETIME",
            Self::Year => "YEAR",
            Self::Decimal => "DECIMAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::VarChar => "VARCHAR",
            Self::VarBinary => "VARBINARY",
            Self::Char => "CHAR",
            Self::Binary => "BINARY",
            Self::Bit => "BIT",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Tuple => "TUPLE",
            Self::Geometry => "GEOMETRY",
            Self::Json => "JSON",
            Self::Expression => "EXPRESSION",
            Self::HexNum => "HEXNUM",
            Self::HexVal => "HEXVAL",
            Self::BitNum => "BITNUM",
            Self::Vector => "VECTOR",
        };
        f.write_str(name)
    }
}

// MySQL wire-protocol column flags that refine the base type code.
const MYSQL_FLAG_UNSIGNED: i64 = 32;
const MYSQL_FLAG_BINARY: i64 = 128;
const MYSQL_FLAG_ENUM: i64 = 256;
const MYSQL_FLAG_SET: i64 = 2048;

/// A wire type code this library cannot map.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported MySQL type code: {0}")]
pub struct UnsupportedTypeCode(pub u8);

/// Map a MySQL-protocol type code plus column flags to a [`Type`].
///
/// The flag refinement only looks at the flags each base type can legally
/// carry, so stray flags MySQL sometimes sets are ignored.
pub fn mysql_to_type(code: u8, flags: i64) -> Result<Type, UnsupportedTypeCode> {
    let base = match code {
        0 | 246 => Type::Decimal,
        1 => Type::Int8,
        2 => Type::Int16,
        3 => Type::Int32,
        4 => Type::Float32,
        5 => Type::Float64,
        6 => Type::Null,
        7 | 17 => Type::Timestamp,
        8 => Type::Int64,
        9 => Type::Int24,
        10 => Type::Date,
        11 | 19 => Type::Time,
        12 | 18 => Type::Datetime,
        13 => Type::Year,
        15 | 253 => Type::VarChar,
        16 => Type::Bit,
        242 => Type::Vector,
        245 => Type::Json,
        247 => Type::Enum,
        248 => Type::Set,
        249..=252 => Type::Text,
        254 => Type::Char,
        255 => Type::Geometry,
        other => return Err(UnsupportedTypeCode(other)),
    };

    let refined = match base {
        Type::Int8 if flags & MYSQL_FLAG_UNSIGNED != 0 => Type::Uint8,
        Type::Int16 if flags & MYSQL_FLAG_UNSIGNED != 0 => Type::Uint16,
        Type::Int24 if flags & MYSQL_FLAG_UNSIGNED != 0 => Type::Uint24,
        Type::Int32 if flags & MYSQL_FLAG_UNSIGNED != 0 => Type::Uint32,
        Type::Int64 if flags & MYSQL_FLAG_UNSIGNED != 0 => Type::Uint64,
        Type::Text if flags & MYSQL_FLAG_BINARY != 0 => Type::Blob,
        Type::VarChar if flags & MYSQL_FLAG_BINARY != 0 => Type::VarBinary,
        Type::Char if flags & MYSQL_FLAG_BINARY != 0 => Type::Binary,
        Type::Char if flags & MYSQL_FLAG_ENUM != 0 => Type::Enum,
        Type::Char if flags & MYSQL_FLAG_SET != 0 => Type::Set,
        other => other,
    };
    Ok(refined)
}

/// The reverse of [`mysql_to_type`]: the wire code and flags a [`Type`] is
/// transmitted as.
#[must_use]
pub fn type_to_mysql(typ: Type) -> (u8, i64) {
    match typ {
        Type::Int8 => (1, 0),
        Type::Uint8 => (1, MYSQL_FLAG_UNSIGNED),
        Type::Int16 => (2, 0),
        Type::Uint16 => (2, MYSQL_FLAG_UNSIGNED),
        Type::Int32 => (3, 0),
        Type::Uint32 => (3, MYSQL_FLAG_UNSIGNED),
        Type::Float32 => (4, 0),
        Type::Float64 => (5, 0),
        Type::Null => (6, MYSQL_FLAG_BINARY),
        Type::Timestamp => (7, 0),
        Type::Int64 => (8, 0),
        Type::Uint64 => (8, MYSQL_FLAG_UNSIGNED),
        Type::Int24 => (9, 0),
        Type::Uint24 => (9, MYSQL_FLAG_UNSIGNED),
        Type::Date => (10, MYSQL_FLAG_BINARY),
        Type::Time => (11, MYSQL_FLAG_BINARY),
        Type::Datetime => (12, MYSQL_FLAG_BINARY),
        Type::Year => (13, MYSQL_FLAG_UNSIGNED),
        Type::Bit => (16, MYSQL_FLAG_UNSIGNED),
        Type::Vector => (242, 0),
        Type::Json => (245, 0),
        Type::Decimal => (246, 0),
        Type::Text => (252, 0),
        Type::Blob => (252, MYSQL_FLAG_BINARY),
        Type::VarChar => (253, 0),
        Type::VarBinary | Type::HexNum | Type::HexVal | Type::BitNum => {
            (253, MYSQL_FLAG_BINARY)
        }
        Type::Char => (254, 0),
        Type::Binary => (254, MYSQL_FLAG_BINARY),
        Type::Enum => (254, MYSQL_FLAG_ENUM),
        Type::Set => (254, MYSQL_FLAG_SET),
        Type::Geometry => (255, 0),
        Type::Tuple | Type::Expression => (0, 0),
    }
}

/// Whether a type observed in a binlog event matches a schema type.
///
/// Binlog events only carry base type codes, so several logical types
/// collapse to the same observed type.
#[must_use]
pub fn are_types_equivalent(from_binlog: Type, from_schema: Type) -> bool {
    from_binlog == from_schema
        || (from_binlog == Type::VarChar && from_schema == Type::VarBinary)
        || (from_binlog == Type::Char && from_schema == Type::Binary)
        || (from_binlog == Type::Char && from_schema == Type::Enum)
        || (from_binlog == Type::Char && from_schema == Type::Set)
        || (from_binlog == Type::Text && from_schema == Type::Blob)
        || (from_binlog == Type::Int8 && from_schema == Type::Uint8)
        || (from_binlog == Type::Int16 && from_schema == Type::Uint16)
        || (from_binlog == Type::Int24 && from_schema == Type::Uint24)
        || (from_binlog == Type::Int32 && from_schema == Type::Uint32)
        || (from_binlog == Type::Int64 && from_schema == Type::Uint64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Type] = &[
        Type::Null,
        Type::Int8,
        Type::Uint8,
        Type::Int16,
        Type::Uint16,
        Type::Int24,
        Type::Uint24,
        Type::Int32,
        Type::Uint32,
        Type::Int64,
        Type::Uint64,
        Type::Float32,
        Type::Float64,
        Type::Timestamp,
        Type::Date,
        Type::Time,
        Type::Datetime,
        Type::Year,
        Type::Decimal,
        Type::Text,
        Type::Blob,
        Type::VarChar,
        Type::VarBinary,
        Type::Char,
        Type::Binary,
        Type::Bit,
        Type::Enum,
        Type::Set,
        Type::Tuple,
        Type::Geometry,
        Type::Json,
        Type::Expression,
        Type::HexNum,
        Type::HexVal,
        Type::BitNum,
        Type::Vector,
    ];

    #[test]
    fn signed_types() {
        let signed: Vec<Type> = ALL.iter().copied().filter(|t| t.is_signed()).collect();
        assert_eq!(
            signed,
            vec![Type::Int8, Type::Int16, Type::Int24, Type::Int32, Type::Int64]
        );
    }

    #[test]
    fn unsigned_types() {
        let unsigned: Vec<Type> = ALL.iter().copied().filter(|t| t.is_unsigned()).collect();
        assert_eq!(
            unsigned,
            vec![
                Type::Uint8,
                Type::Uint16,
                Type::Uint24,
                Type::Uint32,
                Type::Uint64,
                Type::Year
            ]
        );
    }

    #[test]
    fn text_types() {
        let text: Vec<Type> = ALL.iter().copied().filter(|t| t.is_text()).collect();
        assert_eq!(
            text,
            vec![
                Type::Text,
                Type::VarChar,
                Type::Char,
                Type::HexNum,
                Type::HexVal,
                Type::BitNum
            ]
        );
    }

    #[test]
    fn binary_types() {
        let bin: Vec<Type> = ALL.iter().copied().filter(|t| t.is_binary()).collect();
        assert_eq!(bin, vec![Type::Blob, Type::VarBinary, Type::Binary]);
    }

    #[test]
    fn quoted_excludes_bit() {
        assert!(!Type::Bit.is_quoted());
        assert!(Type::Timestamp.is_quoted());
        assert!(Type::Json.is_quoted());
        assert!(Type::Blob.is_quoted());
        assert!(!Type::Int64.is_quoted());
        assert!(!Type::HexNum.is_quoted());
    }

    #[test]
    fn number_classification() {
        assert!(Type::Decimal.is_number());
        assert!(Type::Year.is_number());
        assert!(Type::Float32.is_number());
        assert!(!Type::VarChar.is_number());
        assert!(!Type::Bit.is_number());
    }

    #[test]
    fn date_classification() {
        assert!(Type::Date.is_date());
        assert!(Type::Timestamp.is_date());
        assert!(!Type::Time.is_date());
        assert!(Type::Time.is_date_or_time());
        assert!(!Type::Year.is_date_or_time());
    }

    #[test]
    fn wire_mapping_basic() {
        assert_eq!(mysql_to_type(0, 0), Ok(Type::Decimal));
        assert_eq!(mysql_to_type(1, 0), Ok(Type::Int8));
        assert_eq!(mysql_to_type(1, 32), Ok(Type::Uint8));
        assert_eq!(mysql_to_type(8, 32), Ok(Type::Uint64));
        assert_eq!(mysql_to_type(17, 0), Ok(Type::Timestamp));
        assert_eq!(mysql_to_type(18, 0), Ok(Type::Datetime));
        assert_eq!(mysql_to_type(19, 0), Ok(Type::Time));
        assert_eq!(mysql_to_type(242, 0), Ok(Type::Vector));
        assert_eq!(mysql_to_type(245, 0), Ok(Type::Json));
        assert_eq!(mysql_to_type(250, 0), Ok(Type::Text));
        assert_eq!(mysql_to_type(14, 0), Err(UnsupportedTypeCode(14)));
    }

    #[test]
    fn wire_mapping_binary_flag() {
        assert_eq!(mysql_to_type(252, 128), Ok(Type::Blob));
        assert_eq!(mysql_to_type(253, 128), Ok(Type::VarBinary));
        assert_eq!(mysql_to_type(254, 128), Ok(Type::Binary));
        assert_eq!(mysql_to_type(254, 256), Ok(Type::Enum));
        assert_eq!(mysql_to_type(254, 2048), Ok(Type::Set));
        // Stray BINARY flag on an integer is ignored.
        assert_eq!(mysql_to_type(3, 128), Ok(Type::Int32));
    }

    #[test]
    fn wire_round_trip() {
        for &typ in ALL {
            if matches!(typ, Type::Tuple | Type::Expression) {
                continue;
            }
            let (code, flags) = type_to_mysql(typ);
            let back = mysql_to_type(code, flags).unwrap();
            // Text round-trips as Text via code 252; the hex/bit literal
            // pseudo-types round-trip as VARBINARY.
            match typ {
                Type::HexNum | Type::HexVal | Type::BitNum => {
                    assert_eq!(back, Type::VarBinary);
                }
                other => assert_eq!(back, other),
            }
        }
    }

    #[test]
    fn binlog_equivalence() {
        assert!(are_types_equivalent(Type::Char, Type::Enum));
        assert!(are_types_equivalent(Type::Int24, Type::Uint24));
        assert!(are_types_equivalent(Type::Text, Type::Blob));
        assert!(!are_types_equivalent(Type::Blob, Type::Text));
        assert!(!are_types_equivalent(Type::Uint8, Type::Int8));
    }
}
