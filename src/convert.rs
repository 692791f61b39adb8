//! Typed conversion of field text
//!
//! Each supported type implements [`FromField`]; the conversion used by
//! [`Table::get`](crate::Table::get) is picked by the caller's type annotation.

use std::num::{IntErrorKind, ParseIntError};

/// Why a field could not be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Text is not a well-formed value of the target type
    Malformed,
    /// Text is well-formed but the value does not fit the target type
    OutOfRange,
}

/// Types that can be read out of a single field
pub trait FromField: Sized {
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    /// Convert trimmed field text
    fn from_field(text: &str) -> Result<Self, FieldError>;
}

fn int_error(e: &ParseIntError) -> FieldError {
    match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => FieldError::OutOfRange,
        _ => FieldError::Malformed,
    }
}

/// `Some(is_zero)` when `text` is a minus sign followed by decimal digits
fn negative_digits(text: &str) -> Option<bool> {
    let digits = text.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().all(|b| b == b'0'))
}

macro_rules! impl_signed {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_field(text: &str) -> Result<Self, FieldError> {
                    text.parse::<$t>().map_err(|e| int_error(&e))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_field(text: &str) -> Result<Self, FieldError> {
                    text.parse::<$t>().or_else(|e| match negative_digits(text) {
                        // "-0" is zero, any other negative number is below the range
                        Some(true) => Ok(0),
                        Some(false) => Err(FieldError::OutOfRange),
                        None => Err(int_error(&e)),
                    })
                }
            }
        )*
    };
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl FromField for $t {
                const TYPE_NAME: &'static str = stringify!($t);

                fn from_field(text: &str) -> Result<Self, FieldError> {
                    let value = text.parse::<$t>().map_err(|_| FieldError::Malformed)?;
                    if value.is_infinite() && !is_infinity_literal(text) {
                        return Err(FieldError::OutOfRange);
                    }
                    Ok(value)
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

impl FromField for char {
    const TYPE_NAME: &'static str = "char";

    fn from_field(text: &str) -> Result<Self, FieldError> {
        text.chars().next().ok_or(FieldError::Malformed)
    }
}

impl FromField for String {
    const TYPE_NAME: &'static str = "String";

    fn from_field(text: &str) -> Result<Self, FieldError> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_boundary() {
        assert_eq!(i32::from_field("2147483647"), Ok(i32::MAX));
        assert_eq!(i32::from_field("-2147483648"), Ok(i32::MIN));
        assert_eq!(i32::from_field("2147483648"), Err(FieldError::OutOfRange));
        assert_eq!(i32::from_field("-2147483649"), Err(FieldError::OutOfRange));
        assert_eq!(i64::from_field("2147483648"), Ok(2_147_483_648));
    }

    #[test]
    fn test_malformed_integers() {
        assert_eq!(i32::from_field("abc"), Err(FieldError::Malformed));
        assert_eq!(i32::from_field("12abc"), Err(FieldError::Malformed));
        assert_eq!(i32::from_field(""), Err(FieldError::Malformed));
        assert_eq!(i32::from_field("1.5"), Err(FieldError::Malformed));
        assert_eq!(i8::from_field("+7"), Ok(7));
    }

    #[test]
    fn test_unsigned_rejects_negative_as_out_of_range() {
        assert_eq!(u8::from_field("255"), Ok(255));
        assert_eq!(u8::from_field("256"), Err(FieldError::OutOfRange));
        assert_eq!(u32::from_field("-1"), Err(FieldError::OutOfRange));
        assert_eq!(u32::from_field("-0"), Ok(0));
        assert_eq!(u32::from_field("-"), Err(FieldError::Malformed));
        assert_eq!(u64::from_field("-x"), Err(FieldError::Malformed));
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_field("3.25"), Ok(3.25));
        assert_eq!(f64::from_field("-1e3"), Ok(-1000.0));
        assert_eq!(f32::from_field("1e39"), Err(FieldError::OutOfRange));
        assert_eq!(f64::from_field("1e39"), Ok(1e39));
        assert_eq!(f64::from_field("1e400"), Err(FieldError::OutOfRange));
        assert_eq!(f64::from_field("-inf"), Ok(f64::NEG_INFINITY));
        assert_eq!(f32::from_field("one"), Err(FieldError::Malformed));
        assert!(f64::from_field("NaN").is_ok_and(f64::is_nan));
    }

    #[test]
    fn test_char() {
        assert_eq!(char::from_field("x"), Ok('x'));
        assert_eq!(char::from_field("yes"), Ok('y'));
        assert_eq!(char::from_field("é!"), Ok('é'));
        assert_eq!(char::from_field(""), Err(FieldError::Malformed));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(<u16 as FromField>::TYPE_NAME, "u16");
        assert_eq!(<f32 as FromField>::TYPE_NAME, "f32");
        assert_eq!(<char as FromField>::TYPE_NAME, "char");
    }
}
