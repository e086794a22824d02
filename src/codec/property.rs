//
//  teamcity-cli
//  codec/property.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Property bag wire format.
//!
//! A [`PropertyBag`] is the canonical flat collection TeamCity uses for build
//! parameters and for the settings of every polymorphic resource. On the wire
//! it looks like:
//!
//! ```json
//! {
//!   "count": 2,
//!   "property": [
//!     { "name": "branchFilter", "value": "+:*" },
//!     { "name": "env.TOKEN", "value": "", "inherited": true,
//!       "type": { "rawValue": "password display='hidden'" } }
//!   ]
//! }
//! ```
//!
//! # Notes
//!
//! - Insertion order is preserved; duplicates are allowed but discouraged
//! - `count` is recomputed whenever the bag is serialized
//! - `inherited` is omitted when false, `type` when no descriptor is set

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix TeamCity puts on property names whose values are scrambled secrets.
pub const SECURE_PREFIX: &str = "secure:";

/// A single `name`/`value` entry of a property bag.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::codec::Property;
///
/// let prop = Property::new("secure:password", "hunter2");
/// assert!(prop.is_secure());
/// assert!(!prop.inherited);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name, unique within its bag in practice.
    pub name: String,

    /// Property value. TeamCity omits it for some secure values.
    #[serde(default)]
    pub value: String,

    /// Whether the property comes from a parent project or template.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,

    /// Packed UI metadata, see [`crate::codec::TypeDescriptor`].
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        with = "raw_type"
    )]
    pub type_descriptor: Option<String>,
}

impl Property {
    /// Creates a non-inherited property without UI metadata.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inherited: false,
            type_descriptor: None,
        }
    }

    /// Attaches a raw type descriptor string.
    pub fn with_type_descriptor(mut self, raw: impl Into<String>) -> Self {
        self.type_descriptor = Some(raw.into());
        self
    }

    /// Marks the property as inherited.
    pub fn inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    /// Returns `true` for `secure:` prefixed properties.
    pub fn is_secure(&self) -> bool {
        self.name.starts_with(SECURE_PREFIX)
    }
}

/// Ordered collection of [`Property`] entries.
///
/// Lookups return the first match. Mutations keep order stable: [`set`]
/// replaces in place and only appends when the name is new.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::codec::{Property, PropertyBag};
///
/// let mut bag = PropertyBag::new();
/// bag.set("quietPeriodMode", "DO_NOT_USE");
/// bag.set("quietPeriodMode", "USE_DEFAULT");
/// bag.add(Property::new("branchFilter", "+:*"));
///
/// assert_eq!(bag.count(), 2);
/// assert_eq!(bag.get("quietPeriodMode"), Some("USE_DEFAULT"));
/// assert_eq!(bag.get("triggerRules"), None);
/// ```
///
/// [`set`]: PropertyBag::set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireBag", into = "WireBag")]
pub struct PropertyBag {
    properties: Vec<Property>,
}

impl PropertyBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries; this is what goes into the wire `count` field.
    pub fn count(&self) -> usize {
        self.properties.len()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Value of the first property called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_property(name).map(|p| p.value.as_str())
    }

    /// First property called `name`.
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }

    /// Replaces the value of the first property called `name`, or appends a
    /// new property when there is none.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(Property::new(name, value)),
        }
    }

    /// Appends `property` unconditionally, duplicates included.
    pub fn add(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Removes every property called `name`. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties.retain(|p| p.name != name);
        before != self.properties.len()
    }

    /// Collapses the bag into a name to value map.
    ///
    /// Later duplicates overwrite earlier ones; keys keep first-seen order.
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::with_capacity(self.properties.len());
        for p in &self.properties {
            map.insert(p.name.clone(), p.value.clone());
        }
        map
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// Property names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    pub fn into_vec(self) -> Vec<Property> {
        self.properties
    }
}

impl From<Vec<Property>> for PropertyBag {
    fn from(properties: Vec<Property>) -> Self {
        Self { properties }
    }
}

impl FromIterator<Property> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

impl Extend<Property> for PropertyBag {
    fn extend<I: IntoIterator<Item = Property>>(&mut self, iter: I) {
        self.properties.extend(iter);
    }
}

impl IntoIterator for PropertyBag {
    type Item = Property;
    type IntoIter = std::vec::IntoIter<Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyBag {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

/// Serialized form of a bag. `count` is ignored on input.
#[derive(Serialize, Deserialize)]
struct WireBag {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    property: Vec<Property>,
}

impl From<WireBag> for PropertyBag {
    fn from(wire: WireBag) -> Self {
        if wire.count != wire.property.len() {
            tracing::trace!(
                count = wire.count,
                actual = wire.property.len(),
                "property bag count disagrees with entries"
            );
        }
        Self {
            properties: wire.property,
        }
    }
}

impl From<PropertyBag> for WireBag {
    fn from(bag: PropertyBag) -> Self {
        Self {
            count: bag.properties.len(),
            property: bag.properties,
        }
    }
}

/// `"type": {"rawValue": "..."}` <-> `Option<String>`.
mod raw_type {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct RawType {
        #[serde(rename = "rawValue", default)]
        raw_value: String,
    }

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(raw) => RawType {
                raw_value: raw.clone(),
            }
            .serialize(s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<RawType>::deserialize(d)?;
        Ok(raw.map(|r| r.raw_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_first_match() {
        let mut bag = PropertyBag::new();
        bag.add(Property::new("a", "1"));
        bag.add(Property::new("a", "2"));
        bag.set("a", "3");
        let values: Vec<_> = bag.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["3", "2"]);
    }

    #[test]
    fn test_to_map_later_duplicates_win() {
        let mut bag = PropertyBag::new();
        bag.add(Property::new("a", "1"));
        bag.add(Property::new("b", "x"));
        bag.add(Property::new("a", "2"));
        let map = bag.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "2");
        assert_eq!(map.keys().next().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_remove_all_matches() {
        let mut bag = PropertyBag::new();
        bag.add(Property::new("a", "1"));
        bag.add(Property::new("b", "2"));
        bag.add(Property::new("a", "3"));
        assert!(bag.remove("a"));
        assert!(!bag.remove("a"));
        assert_eq!(bag.count(), 1);
    }

    #[test]
    fn test_wire_count_recomputed() {
        let json = r#"{"count": 7, "property": [{"name": "a", "value": "1"}]}"#;
        let mut bag: PropertyBag = serde_json::from_str(json).unwrap();
        bag.set("b", "2");
        let out = serde_json::to_value(&bag).unwrap();
        assert_eq!(out["count"], 2);
        assert_eq!(out["property"][1]["name"], "b");
    }

    #[test]
    fn test_wire_optional_fields() {
        let bag: PropertyBag = vec![
            Property::new("plain", "v"),
            Property::new("env.X", "")
                .inherited(true)
                .with_type_descriptor("password"),
        ]
        .into();
        let out = serde_json::to_value(&bag).unwrap();
        let plain = &out["property"][0];
        assert!(plain.get("inherited").is_none());
        assert!(plain.get("type").is_none());
        let env = &out["property"][1];
        assert_eq!(env["inherited"], true);
        assert_eq!(env["type"]["rawValue"], "password");
    }

    #[test]
    fn test_missing_property_array_is_empty_bag() {
        let bag: PropertyBag = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn test_missing_value_decodes_empty() {
        let json = r#"{"property": [{"name": "secure:password", "type": {"rawValue": "password"}}]}"#;
        let bag: PropertyBag = serde_json::from_str(json).unwrap();
        let prop = bag.get_property("secure:password").unwrap();
        assert_eq!(prop.value, "");
        assert!(prop.is_secure());
        assert_eq!(prop.type_descriptor.as_deref(), Some("password"));
    }
}
