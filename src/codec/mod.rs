//
//  teamcity-cli
//  codec/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Codec
//!
//! TeamCity exchanges almost all configuration as a flat, ordered,
//! string-valued property bag. This module maps strongly-typed configuration
//! objects onto that bag and back.
//!
//! ## Architecture
//!
//! The codec is layered, leaves first:
//!
//! - [`property`]: the [`PropertyBag`] wire format itself
//! - [`descriptor`]: the packed UI-hint mini-language carried in `type.rawValue`
//! - [`wire`]: primitive conversions (booleans, integers, joined lists, enums)
//! - [`mapper`]: the declarative field table evaluated by [`PropertyModel`]
//! - [`parameter`]: `system.` / `env.` namespaced build parameters
//! - [`resource`]: the `{id, type, properties}` envelope and variant dispatch
//!
//! ## Example
//!
//! ```rust
//! use teamcity_cli::codec::{PropertyBag, PropertyModel};
//! use teamcity_cli::model::BuildTypeOptions;
//!
//! let mut options = BuildTypeOptions::default();
//! options.allow_personal_build_triggering = false;
//!
//! let bag: PropertyBag = options.to_properties();
//! assert_eq!(bag.get("allowPersonalBuildTriggering"), Some("false"));
//!
//! let decoded = BuildTypeOptions::from_properties(&bag).unwrap();
//! assert_eq!(decoded, options);
//! ```
//!
//! ## Error Handling
//!
//! Only structural problems are errors. A missing required property or a
//! value that does not parse as its declared primitive yields a
//! [`CodecError`]. Unknown resource types and malformed UI hints are not
//! errors: they degrade to a generic resource and to absent hints.

use thiserror::Error;

pub mod descriptor;
pub mod mapper;
pub mod parameter;
pub mod property;
pub mod resource;
pub mod wire;

pub use descriptor::{ControlType, TypeDescriptor};
pub use mapper::{Emit, Fallback, Field, PropertyModel};
pub use parameter::{Namespace, Parameter, Parameters};
pub use property::{Property, PropertyBag};
pub use resource::{
    BuildTypeRef, Discriminated, Document, Envelope, EnvelopeList, GenericResource, Polymorphic,
    Resource,
};
pub use wire::WireEnum;

/// Errors raised while decoding wire data into typed configuration.
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `MissingProperty` | A required property is absent from the bag |
/// | `InvalidValue` | A value does not parse as its declared primitive |
/// | `Json` / `Yaml` | Wire text is not well-formed |
/// | `Io` | Reading or writing an envelope file failed |
#[derive(Error, Debug)]
pub enum CodecError {
    /// A required property is absent and has no documented default.
    #[error("Missing required property '{name}'")]
    MissingProperty {
        /// Wire name of the missing property
        name: String,
    },

    /// A property value failed to parse as its declared type.
    #[error("Invalid value '{value}' for property '{name}': expected {expected}")]
    InvalidValue {
        /// Wire name of the offending property
        name: String,
        /// The raw value found on the wire
        value: String,
        /// Human readable description of the accepted values
        expected: String,
    },

    /// Envelope JSON could not be parsed or produced.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Typed YAML input could not be parsed or produced.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Envelope file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Builds a [`CodecError::InvalidValue`].
    pub fn invalid(name: &str, value: &str, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Builds a [`CodecError::MissingProperty`].
    pub fn missing(name: &str) -> Self {
        Self::MissingProperty {
            name: name.to_string(),
        }
    }

    /// Re-targets an `InvalidValue` at a different property name.
    ///
    /// Field setters parse values without knowing which wire name they were
    /// registered under; the mapper fixes the name up afterwards.
    pub(crate) fn for_property(self, property: &str) -> Self {
        match self {
            Self::InvalidValue { value, expected, .. } => Self::InvalidValue {
                name: property.to_string(),
                value,
                expected,
            },
            other => other,
        }
    }
}

/// Convenience result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_property_message() {
        let err = CodecError::missing("dependsOn");
        assert_eq!(err.to_string(), "Missing required property 'dependsOn'");
    }

    #[test]
    fn test_json_error_message_not_repeated() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let message = source.to_string();
        let err = anyhow::Error::from(CodecError::from(source));
        assert_eq!(format!("{err:#}"), message);
    }

    #[test]
    fn test_for_property_renames_invalid_value() {
        let err = CodecError::invalid("", "ten", "an integer").for_property("hour");
        match err {
            CodecError::InvalidValue { name, value, .. } => {
                assert_eq!(name, "hour");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
