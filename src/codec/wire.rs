//
//  teamcity-cli
//  codec/wire.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Primitive wire conversions.
//!
//! Every property value is a string. These helpers convert between the
//! string form and the field types used by configuration objects, and are
//! what the field tables in [`crate::model`] are written with.
//!
//! List separators are never inferred from the value: each list field
//! declares [`LF`] or [`CRLF`] because the server is inconsistent between
//! resource kinds.

use std::str::FromStr;

use super::{CodecError, Result};

/// Newline list separator.
pub const LF: &str = "\n";

/// CRLF list separator, used by artifact dependency path rules.
pub const CRLF: &str = "\r\n";

/// Closed set of string values carried by a single property.
///
/// Implemented through [`wire_enum!`](crate::codec::wire::wire_enum) for the
/// enums in [`crate::model`].
pub trait WireEnum: Sized + Copy + 'static {
    /// Every accepted wire string, in declaration order.
    const VARIANTS: &'static [&'static str];

    fn as_wire(&self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self>;

    /// Parses `value`, reporting the accepted set on failure.
    fn parse_wire(value: &str) -> Result<Self> {
        Self::from_wire(value).ok_or_else(|| {
            CodecError::invalid("", value, format!("one of {}", Self::VARIANTS.join(", ")))
        })
    }
}

/// Declares a closed string enum together with its [`WireEnum`] impl.
///
/// ```rust,ignore
/// wire_enum! {
///     /// When a step runs.
///     pub enum StepMode {
///         Default => "default",
///         Always => "execute_always",
///     }
///     default = Default;
/// }
/// ```
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $crate::codec::wire::WireEnum for $name {
            const VARIANTS: &'static [&'static str] = &[$($wire),+];

            fn as_wire(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::codec::wire::WireEnum::as_wire(self))
            }
        }
    };
}

pub(crate) use wire_enum;

/// Parses `true`/`false`, ignoring ASCII case and surrounding whitespace.
pub fn parse_bool(value: &str) -> Result<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CodecError::invalid("", value, "true or false"))
    }
}

/// Parses an integer of any width.
pub fn parse_int<T: FromStr>(value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CodecError::invalid("", value, "an integer"))
}

pub fn bool_str(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_string()
}

/// Joins list items with `separator`.
pub fn join_list(items: &[String], separator: &str) -> String {
    items.join(separator)
}

/// Splits a joined list. The empty string is the empty list.
pub fn split_list(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(separator).map(str::to_string).collect()
}

// Setter helpers used by field tables.

pub fn store_str(slot: &mut String, value: &str) -> Result<()> {
    *slot = value.to_string();
    Ok(())
}

pub fn store_bool(slot: &mut bool, value: &str) -> Result<()> {
    *slot = parse_bool(value)?;
    Ok(())
}

pub fn store_int<T: FromStr>(slot: &mut T, value: &str) -> Result<()> {
    *slot = parse_int(value)?;
    Ok(())
}

pub fn store_list(slot: &mut Vec<String>, value: &str, separator: &str) -> Result<()> {
    *slot = split_list(value, separator);
    Ok(())
}

pub fn store_enum<E: WireEnum>(slot: &mut E, value: &str) -> Result<()> {
    *slot = E::parse_wire(value)?;
    Ok(())
}

/// Ignores the value. Used for properties derived from other fields.
pub fn derived(_value: &str) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        enum Mode {
            Fast => "FAST",
            Slow => "SLOW",
        }
        default = Slow;
    }

    #[test]
    fn test_list_lf() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_list(&items, LF), "a\nb");
        assert_eq!(split_list("a\nb", LF), items);
    }

    #[test]
    fn test_list_crlf_is_not_inferred() {
        assert_eq!(split_list("a\r\nb", CRLF), vec!["a", "b"]);
        assert_eq!(split_list("a\r\nb", LF), vec!["a\r", "b"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(split_list("", LF).is_empty());
        assert_eq!(join_list(&[], LF), "");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool(" false ").unwrap());
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_parse_int_error() {
        let err = parse_int::<u32>("noon").unwrap_err();
        assert!(err.to_string().contains("an integer"));
    }

    #[test]
    fn test_wire_enum() {
        assert_eq!(Mode::default(), Mode::Slow);
        assert_eq!(Mode::Fast.as_wire(), "FAST");
        assert_eq!(Mode::from_wire("SLOW"), Some(Mode::Slow));
        assert_eq!(Mode::from_wire("slow"), None);
        assert_eq!(Mode::Fast.to_string(), "FAST");
        let err = Mode::parse_wire("MEDIUM").unwrap_err();
        assert!(err.to_string().contains("one of FAST, SLOW"));
    }
}
