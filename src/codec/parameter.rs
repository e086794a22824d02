//
//  teamcity-cli
//  codec/parameter.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Namespaced build parameters.
//!
//! TeamCity keeps three parameter kinds in one flat name space and tells them
//! apart by a name prefix:
//!
//! | Namespace | Prefix | Example wire name |
//! |-----------|--------|-------------------|
//! | Plain | (none) | `deploy.target` |
//! | System | `system.` | `system.version` |
//! | Environment | `env.` | `env.JAVA_HOME` |
//!
//! UI metadata rides along in the property's `type.rawValue`, see
//! [`TypeDescriptor`].
//!
//! # Example
//!
//! ```rust
//! use teamcity_cli::codec::{Namespace, Parameter, Parameters};
//!
//! let mut params = Parameters::new();
//! params.add(Parameter::new(Namespace::Plain, "p", "v1"));
//! params.add(Parameter::new(Namespace::System, "s", "v2"));
//! params.add(Parameter::new(Namespace::Environment, "e", "v3"));
//!
//! let bag = params.to_properties();
//! let names: Vec<_> = bag.names().collect();
//! assert_eq!(names, vec!["p", "system.s", "env.e"]);
//! assert_eq!(bag.count(), 3);
//! ```

use serde::{Deserialize, Serialize};

use super::{Property, PropertyBag, TypeDescriptor};

pub const SYSTEM_PREFIX: &str = "system.";
pub const ENV_PREFIX: &str = "env.";

/// Which of the three parameter kinds a parameter belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Configuration parameter, no prefix.
    #[default]
    Plain,
    /// Passed to the build tool, `system.` prefix.
    System,
    /// Exported to the agent process, `env.` prefix.
    #[serde(alias = "env")]
    Environment,
}

impl Namespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::System => SYSTEM_PREFIX,
            Self::Environment => ENV_PREFIX,
        }
    }

    /// Splits a wire name into namespace and bare name.
    ///
    /// Only an exact `env.` or `system.` prefix selects a namespace; any
    /// other name, dotted or not, is plain and kept whole.
    pub fn split(wire_name: &str) -> (Self, &str) {
        if let Some(name) = wire_name.strip_prefix(ENV_PREFIX) {
            (Self::Environment, name)
        } else if let Some(name) = wire_name.strip_prefix(SYSTEM_PREFIX) {
            (Self::System, name)
        } else {
            (Self::Plain, wire_name)
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Plain => "plain",
            Self::System => "system",
            Self::Environment => "environment",
        };
        f.write_str(label)
    }
}

/// A build parameter with its namespace decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub namespace: Namespace,
    /// Bare name, without the namespace prefix.
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "TypeDescriptor::is_empty")]
    pub ui: TypeDescriptor,
}

impl Parameter {
    pub fn new(namespace: Namespace, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            value: value.into(),
            inherited: false,
            ui: TypeDescriptor::default(),
        }
    }

    /// Attaches UI metadata.
    pub fn with_ui(mut self, ui: TypeDescriptor) -> Self {
        self.ui = ui;
        self
    }

    /// Name as it appears on the wire, prefix included.
    pub fn wire_name(&self) -> String {
        format!("{}{}", self.namespace.prefix(), self.name)
    }

    pub fn to_property(&self) -> Property {
        Property {
            name: self.wire_name(),
            value: self.value.clone(),
            inherited: self.inherited,
            type_descriptor: self.ui.render(),
        }
    }

    pub fn from_property(property: &Property) -> Self {
        let (namespace, name) = Namespace::split(&property.name);
        Self {
            namespace,
            name: name.to_string(),
            value: property.value.clone(),
            inherited: property.inherited,
            ui: property
                .type_descriptor
                .as_deref()
                .map(TypeDescriptor::parse)
                .unwrap_or_default(),
        }
    }
}

/// Ordered parameter collection.
///
/// Serializes exactly like a [`PropertyBag`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PropertyBag", into = "PropertyBag")]
pub struct Parameters {
    items: Vec<Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, or replaces the one with the same namespace and name.
    pub fn add(&mut self, parameter: Parameter) {
        match self
            .items
            .iter_mut()
            .find(|p| p.namespace == parameter.namespace && p.name == parameter.name)
        {
            Some(existing) => *existing = parameter,
            None => self.items.push(parameter),
        }
    }

    pub fn get(&self, namespace: Namespace, name: &str) -> Option<&Parameter> {
        self.items
            .iter()
            .find(|p| p.namespace == namespace && p.name == name)
    }

    pub fn remove(&mut self, namespace: Namespace, name: &str) -> Option<Parameter> {
        let index = self
            .items
            .iter()
            .position(|p| p.namespace == namespace && p.name == name)?;
        Some(self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.items.iter()
    }

    /// Parameters of one namespace, in insertion order.
    pub fn in_namespace(&self, namespace: Namespace) -> impl Iterator<Item = &Parameter> {
        self.items.iter().filter(move |p| p.namespace == namespace)
    }

    /// Encodes in insertion order.
    pub fn to_properties(&self) -> PropertyBag {
        self.items.iter().map(Parameter::to_property).collect()
    }

    pub fn from_properties(bag: &PropertyBag) -> Self {
        Self {
            items: bag.iter().map(Parameter::from_property).collect(),
        }
    }
}

impl From<PropertyBag> for Parameters {
    fn from(bag: PropertyBag) -> Self {
        Self::from_properties(&bag)
    }
}

impl From<Parameters> for PropertyBag {
    fn from(params: Parameters) -> Self {
        params.to_properties()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        let mut params = Self::new();
        for p in iter {
            params.add(p);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ControlType;

    #[test]
    fn test_roundtrip_all_namespaces() {
        for namespace in [Namespace::Plain, Namespace::System, Namespace::Environment] {
            let p = Parameter::new(namespace, "build.tool.version", "1.2");
            assert_eq!(Parameter::from_property(&p.to_property()), p);
        }
    }

    #[test]
    fn test_dotted_plain_name_stays_plain() {
        let prop = Property::new("teamcity.ui.settings", "x");
        let p = Parameter::from_property(&prop);
        assert_eq!(p.namespace, Namespace::Plain);
        assert_eq!(p.name, "teamcity.ui.settings");
    }

    #[test]
    fn test_prefix_stripped_once() {
        let p = Parameter::from_property(&Property::new("env.system.x", "1"));
        assert_eq!(p.namespace, Namespace::Environment);
        assert_eq!(p.name, "system.x");
        assert_eq!(p.wire_name(), "env.system.x");
    }

    #[test]
    fn test_prefix_requires_dot() {
        let (ns, name) = Namespace::split("environment");
        assert_eq!(ns, Namespace::Plain);
        assert_eq!(name, "environment");
    }

    #[test]
    fn test_ui_metadata_carried_in_type() {
        let p = Parameter::new(Namespace::Environment, "TOKEN", "").with_ui(TypeDescriptor {
            control_type: Some(ControlType::Password),
            label: "Token".to_string(),
            ..Default::default()
        });
        let prop = p.to_property();
        assert_eq!(prop.type_descriptor.as_deref(), Some("password label='Token'"));
        let back = Parameter::from_property(&prop);
        assert!(back.ui.is_password());
        assert_eq!(back, p);
    }

    #[test]
    fn test_add_replaces_same_namespace_and_name() {
        let mut params = Parameters::new();
        params.add(Parameter::new(Namespace::System, "x", "1"));
        params.add(Parameter::new(Namespace::Plain, "x", "2"));
        params.add(Parameter::new(Namespace::System, "x", "3"));
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(Namespace::System, "x").unwrap().value, "3");
        assert_eq!(params.in_namespace(Namespace::Plain).count(), 1);
    }

    #[test]
    fn test_wire_shape() {
        let params: Parameters = [
            Parameter::new(Namespace::Plain, "p", "v1"),
            Parameter::new(Namespace::System, "s", "v2"),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["property"][1]["name"], "system.s");

        let back: Parameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_remove() {
        let mut params = Parameters::new();
        params.add(Parameter::new(Namespace::Environment, "e", "v"));
        assert!(params.remove(Namespace::Plain, "e").is_none());
        assert!(params.remove(Namespace::Environment, "e").is_some());
        assert!(params.is_empty());
    }
}
