//
//  teamcity-cli
//  codec/descriptor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! UI hint mini-language.
//!
//! TeamCity packs the presentation hints of a parameter into one free-text
//! field, `type.rawValue`:
//!
//! ```text
//! password display='hidden' description='Deploy key' readOnly='true' label='Key'
//! ```
//!
//! The leading control type is optional and the `key='value'` pairs may come
//! in any order and any subset. Parsing scans each key independently and
//! never fails; rendering always uses the order control type, `display`,
//! `description`, `readOnly`, `label`.
//!
//! Values are not escaped. A value containing `'` cannot be represented and
//! is truncated at the quote when parsed back.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CONTROL_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(checkbox|password|text|select)(?:\s|$)").unwrap());
static DISPLAY_RE: Lazy<Regex> = Lazy::new(|| hint_regex("display"));
static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| hint_regex("description"));
static READ_ONLY_RE: Lazy<Regex> = Lazy::new(|| hint_regex("readOnly"));
static LABEL_RE: Lazy<Regex> = Lazy::new(|| hint_regex("label"));

fn hint_regex(key: &str) -> Regex {
    Regex::new(&format!(r"(?:^|\s){key}='([^']*)'")).unwrap()
}

/// Control used to edit a parameter in the TeamCity UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Checkbox,
    Password,
    Text,
    Select,
}

impl ControlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Password => "password",
            Self::Text => "text",
            Self::Select => "select",
        }
    }

    /// Parses one of the four known control tokens.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "checkbox" => Some(Self::Checkbox),
            "password" => Some(Self::Password),
            "text" => Some(Self::Text),
            "select" => Some(Self::Select),
            _ => None,
        }
    }
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded UI metadata of a parameter.
///
/// String hints use the empty string for "not present".
///
/// # Example
///
/// ```rust
/// use teamcity_cli::codec::{ControlType, TypeDescriptor};
///
/// let ui = TypeDescriptor {
///     control_type: Some(ControlType::Password),
///     label: "X".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(ui.render().as_deref(), Some("password label='X'"));
/// assert_eq!(TypeDescriptor::parse("password label='X'"), ui);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_type: Option<ControlType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub read_only: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl TypeDescriptor {
    /// Parses a raw descriptor. Anything that does not match the grammar is
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let capture = |re: &Regex| {
            re.captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Self {
            control_type: CONTROL_TYPE_RE
                .captures(raw)
                .and_then(|c| c.get(1))
                .and_then(|m| ControlType::parse(m.as_str())),
            display: capture(&DISPLAY_RE),
            description: capture(&DESCRIPTION_RE),
            read_only: capture(&READ_ONLY_RE),
            label: capture(&LABEL_RE),
        }
    }

    /// Renders the descriptor, or `None` when no hint is set.
    pub fn render(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(control) = self.control_type {
            parts.push(control.as_str().to_string());
        }
        for (key, value) in [
            ("display", &self.display),
            ("description", &self.description),
            ("readOnly", &self.read_only),
            ("label", &self.label),
        ] {
            if !value.is_empty() {
                parts.push(format!("{key}='{value}'"));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.control_type.is_none()
            && self.display.is_empty()
            && self.description.is_empty()
            && self.read_only.is_empty()
            && self.label.is_empty()
    }

    pub fn is_password(&self) -> bool {
        self.control_type == Some(ControlType::Password)
    }
}
