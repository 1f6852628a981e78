//! Scalar values held by tool configuration fields.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Value of a declared configuration field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Free-form text.
    String(String),
}

impl FieldValue {
    /// Interprets raw environment text, coercing it to the narrowest type it
    /// unambiguously represents.
    ///
    /// All-digit text becomes [`FieldValue::Int`], digits with exactly one
    /// `.` become [`FieldValue::Float`], `true`/`false` (any case) become
    /// [`FieldValue::Bool`]. Everything else, including integers too large
    /// for `i64`, stays a string.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        if is_integer(raw) {
            if let Ok(value) = raw.parse::<i64>() {
                return Self::Int(value);
            }
        } else if is_decimal(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                return Self::Float(value);
            }
        } else if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        } else if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::String(raw.to_owned())
    }

    /// Returns the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

fn is_integer(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(raw: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for b in raw.bytes() {
        match b {
            b'.' => dots += 1,
            b'0'..=b'9' => digits += 1,
            _ => return false,
        }
    }
    dots == 1 && digits > 0
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => Display::fmt(value, f),
            Self::Int(value) => Display::fmt(value, f),
            Self::Float(value) => Display::fmt(value, f),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_numbers_and_flags() {
        assert_eq!(FieldValue::coerce("1"), FieldValue::Int(1));
        assert_eq!(FieldValue::coerce("0042"), FieldValue::Int(42));
        assert_eq!(FieldValue::coerce("3.25"), FieldValue::Float(3.25));
        assert_eq!(FieldValue::coerce("TRUE"), FieldValue::Bool(true));
        assert_eq!(FieldValue::coerce("false"), FieldValue::Bool(false));
    }

    #[test]
    fn ambiguous_text_stays_string() {
        for raw in ["1.2.3", "-1", "1e5", "hello", ".", "", "99999999999999999999"] {
            assert_eq!(FieldValue::coerce(raw), FieldValue::String(raw.to_owned()), "{raw}");
        }
    }

    #[test]
    fn display_matches_payload() {
        assert_eq!(FieldValue::from(5).to_string(), "5");
        assert_eq!(FieldValue::from("hello").to_string(), "hello");
        assert_eq!(FieldValue::from(true).to_string(), "true");
    }
}
