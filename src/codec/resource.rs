//
//  teamcity-cli
//  codec/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Polymorphic resources.
//!
//! Build steps, triggers, build features, project features and dependencies
//! all travel in the same envelope:
//!
//! ```json
//! { "id": "TRIGGER_1", "type": "vcsTrigger",
//!   "properties": { "count": 1, "property": [ { "name": "branchFilter", "value": "+:*" } ] } }
//! ```
//!
//! The `type` discriminator selects the concrete variant. Each resource kind
//! is a closed enum in [`crate::model`] with one arm per known type and a
//! [`GenericResource`] arm for everything else, so a type introduced by a
//! newer server degrades gracefully instead of failing the decode.
//!
//! # Decode flow
//!
//! ```text
//! Envelope ──read "type"──┬─ known  ──> Resource<Options>::from_envelope (mapper decode)
//!                         └─ unknown ─> GenericResource (properties kept verbatim)
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{CodecError, PropertyBag, PropertyModel, Result};

/// Reference to a build configuration, as used by dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTypeRef {
    pub id: String,
}

impl BuildTypeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The shared wire envelope of every polymorphic resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The discriminator.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,

    /// Only present on snapshot and artifact dependencies.
    #[serde(
        rename = "source-buildType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_build_type: Option<BuildTypeRef>,

    #[serde(default)]
    pub properties: PropertyBag,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, properties: PropertyBag) -> Self {
        Self {
            kind: kind.into(),
            properties,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Options types that are the payload of one resource variant.
pub trait Discriminated {
    /// The `type` string selecting this variant.
    const TYPE: &'static str;
}

/// A decoded resource of a known type.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::codec::{Envelope, PropertyBag, Resource};
/// use teamcity_cli::model::VcsTriggerOptions;
///
/// let mut bag = PropertyBag::new();
/// bag.set("branchFilter", "+:*");
/// let envelope = Envelope::new("vcsTrigger", bag).with_id("TRIGGER_1");
///
/// let trigger = Resource::<VcsTriggerOptions>::from_envelope(envelope).unwrap();
/// assert_eq!(trigger.id.as_deref(), Some("TRIGGER_1"));
/// assert_eq!(trigger.options.branch_filter, vec!["+:*"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(bound(deserialize = "O: Deserialize<'de> + Default"))]
pub struct Resource<O> {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub inherited: bool,
    #[serde(default)]
    pub source_build_type: Option<BuildTypeRef>,
    #[serde(default)]
    pub options: O,
}

impl<O: PropertyModel + Discriminated> Resource<O> {
    pub fn new(options: O) -> Self {
        Self {
            id: None,
            name: None,
            disabled: false,
            inherited: false,
            source_build_type: None,
            options,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the upstream build configuration of a dependency.
    pub fn with_source(mut self, build_type_id: impl Into<String>) -> Self {
        self.source_build_type = Some(BuildTypeRef::new(build_type_id));
        self
    }

    pub fn discriminator(&self) -> &'static str {
        O::TYPE
    }

    /// Decodes the envelope's properties into `O`.
    ///
    /// The caller has already matched the discriminator.
    pub fn from_envelope(envelope: Envelope) -> Result<Self> {
        let options = O::from_properties(&envelope.properties)?;
        Ok(Self {
            id: envelope.id,
            name: envelope.name,
            disabled: envelope.disabled.unwrap_or(false),
            inherited: envelope.inherited.unwrap_or(false),
            source_build_type: envelope.source_build_type,
            options,
        })
    }

    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: O::TYPE.to_string(),
            disabled: self.disabled.then_some(true),
            inherited: self.inherited.then_some(true),
            source_build_type: self.source_build_type.clone(),
            properties: self.options.to_properties(),
        }
    }
}

/// Serialized view of a [`Resource`], tagged with its discriminator.
#[derive(Serialize)]
struct ResourceView<'a, O> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    disabled: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    inherited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_build_type: Option<&'a BuildTypeRef>,
    options: &'a O,
}

impl<O: Serialize + Discriminated> Serialize for Resource<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ResourceView {
            kind: O::TYPE,
            id: self.id.as_ref(),
            name: self.name.as_ref(),
            disabled: self.disabled,
            inherited: self.inherited,
            source_build_type: self.source_build_type.as_ref(),
            options: &self.options,
        }
        .serialize(serializer)
    }
}

/// Catch-all for discriminators without a registered variant.
///
/// Keeps the envelope exactly as received so it can be sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericResource {
    envelope: Envelope,
}

impl GenericResource {
    /// Wraps an envelope whose type has no registered variant.
    pub fn fallback(envelope: Envelope) -> Self {
        tracing::debug!(
            kind = %envelope.kind,
            id = envelope.id.as_deref().unwrap_or(""),
            "no variant registered for resource type, keeping generic form"
        );
        Self { envelope }
    }

    pub fn discriminator(&self) -> &str {
        &self.envelope.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.envelope.id.as_deref()
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.envelope.properties
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }
}

/// The serialized form of a polymorphic value, as read back from a user's
/// JSON or YAML document.
///
/// A known variant serializes with an `options` object; the generic
/// fallback serializes as its envelope, with `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    kind: String,
    value: serde_json::Value,
}

impl Document {
    /// Reads the `type` field of a document object.
    pub fn new(value: serde_json::Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| CodecError::missing("type"))?
            .to_string();
        Ok(Self { kind, value })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether this is the typed form.
    pub fn is_typed(&self) -> bool {
        self.value.get("options").is_some()
    }

    pub fn typed<O>(self) -> Result<Resource<O>>
    where
        O: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(self.value)?)
    }

    pub fn into_envelope(self) -> Result<Envelope> {
        Ok(serde_json::from_value(self.value)?)
    }

    /// Error for typed options under a type with no typed variant.
    pub fn unknown_options(&self) -> CodecError {
        CodecError::invalid("type", &self.kind, "a type with typed options")
    }
}

/// A resource kind: a closed set of variants plus a generic fallback.
pub trait Polymorphic: Sized {
    /// Selects and decodes the variant named by `envelope.kind`.
    ///
    /// Unknown kinds are never an error; only a structurally broken known
    /// variant is.
    fn from_envelope(envelope: Envelope) -> Result<Self>;

    /// Reads a value back from its serialized document form.
    ///
    /// Generic documents go through [`Polymorphic::from_envelope`], so a
    /// known type written in envelope form is decoded like wire input.
    fn from_document(document: Document) -> Result<Self>;

    fn to_envelope(&self) -> Envelope;

    fn discriminator(&self) -> &str;

    fn id(&self) -> Option<&str>;

    /// Whether this value fell back to the generic representation.
    fn is_generic(&self) -> bool;
}

/// A wire collection such as `{"count": 2, "step": [...]}`.
///
/// The item key differs per resource kind and is kept so the list
/// serializes back under the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeList {
    pub item_key: String,
    pub items: Vec<Envelope>,
}

impl EnvelopeList {
    pub fn new(item_key: impl Into<String>, items: Vec<Envelope>) -> Self {
        Self {
            item_key: item_key.into(),
            items,
        }
    }

    /// Reads a collection object. The item key is the first key holding an array.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(CodecError::invalid(
                    "collection",
                    &other.to_string(),
                    "a JSON object",
                ))
            }
        };
        let mut item_key = None;
        let mut items = Vec::new();
        for (key, entry) in map {
            if key != "count" && entry.is_array() {
                items = serde_json::from_value(entry)?;
                item_key = Some(key);
                break;
            }
        }
        Ok(Self {
            // an empty collection arrives as just {"count": 0}
            item_key: item_key.unwrap_or_default(),
            items,
        })
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("count".to_string(), self.items.len().into());
        // an empty collection read from {"count": 0} has no item key
        if !self.item_key.is_empty() {
            map.insert(self.item_key.clone(), serde_json::to_value(&self.items)?);
        }
        Ok(serde_json::Value::Object(map))
    }

    /// Decodes every envelope; stops at the first structural error.
    pub fn decode_all<P: Polymorphic>(self) -> Result<Vec<P>> {
        self.items.into_iter().map(P::from_envelope).collect()
    }

    pub fn encode_all<P: Polymorphic>(item_key: &str, resources: &[P]) -> Self {
        Self::new(item_key, resources.iter().map(P::to_envelope).collect())
    }
}

impl Serialize for EnvelopeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EnvelopeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
