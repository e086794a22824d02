//
//  teamcity-cli
//  codec/mapper.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Declarative struct <-> property bag mapping.
//!
//! Each configuration type lists its properties once, as a table of
//! [`Field`] entries. A field names its wire property, says when it is
//! emitted ([`Emit`]) and what a missing property means ([`Fallback`]), and
//! carries two plain functions converting between the struct field and the
//! wire string. [`PropertyModel`] evaluates that table in both directions.
//!
//! # Emission rules
//!
//! | Rule | Encoding |
//! |------|----------|
//! | [`Emit::Always`] | Always written, the default for every field |
//! | [`Emit::OmitIfDefault`] | Skipped when equal to the documented server default |
//! | [`Emit::OmitIfEmpty`] | Skipped when the wire form is empty |
//!
//! Omission is decided per field, never by a blanket "skip zero values"
//! rule: for some properties an explicit `false` disables behaviour the
//! server would otherwise enable, so they must be left out instead.
//!
//! # Decoding
//!
//! Decoding starts from `Default::default()` and visits the table in order.
//! A present property is parsed through the field's setter; a missing one
//! is either an error ([`Fallback::Required`]) or replaced by the documented
//! default ([`Fallback::Default`]), which may differ from the Rust zero
//! value. Properties not named by the table are ignored.
//!
//! # Example
//!
//! ```rust
//! use teamcity_cli::codec::{wire, Field, PropertyBag, PropertyModel};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Widget {
//!     name: String,
//!     enabled: bool,
//! }
//!
//! type F = Field<Widget>;
//!
//! impl PropertyModel for Widget {
//!     const FIELDS: &'static [Field<Self>] = &[
//!         F::new("name", |w| w.name.clone(), |w, v| wire::store_str(&mut w.name, v)),
//!         F::new("enabled", |w| wire::bool_str(w.enabled), |w, v| wire::store_bool(&mut w.enabled, v))
//!             .default("true"),
//!     ];
//! }
//!
//! let mut bag = PropertyBag::new();
//! bag.set("name", "gizmo");
//! let widget = Widget::from_properties(&bag).unwrap();
//! assert!(widget.enabled);
//! assert_eq!(widget.to_properties().count(), 1);
//! ```

use super::{CodecError, PropertyBag, Result};

/// When a field is written to the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Always,
    OmitIfDefault,
    OmitIfEmpty,
}

/// What a missing property decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Absence is a structural decode error.
    Required,
    /// Absence means the server applies this default (wire form).
    Default(&'static str),
}

/// One row of a configuration type's property table.
pub struct Field<T> {
    /// Wire property name.
    pub name: &'static str,
    pub emit: Emit,
    pub fallback: Fallback,
    /// Produces the wire form of the field.
    pub get: fn(&T) -> String,
    /// Parses the wire form into the field.
    pub set: fn(&mut T, &str) -> Result<()>,
}

impl<T> Field<T> {
    /// A required field that is always emitted.
    pub const fn new(
        name: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, &str) -> Result<()>,
    ) -> Self {
        Self {
            name,
            emit: Emit::Always,
            fallback: Fallback::Required,
            get,
            set,
        }
    }

    /// Documents the server default and omits the field when it holds it.
    pub const fn default(mut self, value: &'static str) -> Self {
        self.fallback = Fallback::Default(value);
        self.emit = Emit::OmitIfDefault;
        self
    }

    /// Optional field, empty when absent and omitted when empty.
    pub const fn optional(mut self) -> Self {
        self.fallback = Fallback::Default("");
        self.emit = Emit::OmitIfEmpty;
        self
    }

    /// Omit when the wire form is empty, keeping the declared fallback.
    pub const fn omit_if_empty(mut self) -> Self {
        self.emit = Emit::OmitIfEmpty;
        self
    }

    /// Always emit, even when holding the default.
    pub const fn force(mut self) -> Self {
        self.emit = Emit::Always;
        self
    }

    /// Whether `value` (the field's wire form) is left out of the bag.
    pub fn omits(&self, value: &str) -> bool {
        match (self.emit, self.fallback) {
            (Emit::Always, _) => false,
            (Emit::OmitIfEmpty, _) => value.is_empty(),
            (Emit::OmitIfDefault, Fallback::Default(default)) => value == default,
            (Emit::OmitIfDefault, Fallback::Required) => false,
        }
    }

    fn apply(&self, target: &mut T, value: &str) -> Result<()> {
        (self.set)(target, value).map_err(|e| e.for_property(self.name))
    }
}

/// A configuration object with a declarative property table.
pub trait PropertyModel: Default + Sized + 'static {
    /// The property table, in emission order.
    const FIELDS: &'static [Field<Self>];

    /// Encodes the object into a fresh bag.
    fn to_properties(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for field in Self::FIELDS {
            let value = (field.get)(self);
            if field.omits(&value) {
                tracing::trace!(property = field.name, "omitting property");
                continue;
            }
            bag.set(field.name, value);
        }
        bag
    }

    /// Decodes an object, applying documented defaults for absent properties.
    fn from_properties(bag: &PropertyBag) -> Result<Self> {
        let mut target = Self::default();
        for field in Self::FIELDS {
            match (bag.get(field.name), field.fallback) {
                (Some(value), _) => field.apply(&mut target, value)?,
                (None, Fallback::Default(default)) => {
                    tracing::trace!(property = field.name, default, "applying server default");
                    field.apply(&mut target, default)?;
                }
                (None, Fallback::Required) => return Err(CodecError::missing(field.name)),
            }
        }
        Ok(target)
    }

    /// Wire names this type understands.
    fn property_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(|f| f.name).collect()
    }
}
