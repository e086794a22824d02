//
//  teamcity-cli
//  cli/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `tcity decode`: wire payload in, typed form out.
//!
//! Resource kinds accept a single envelope, a bare JSON array of envelopes,
//! or a collection object such as `{"count": 2, "trigger": [...]}`.
//! `options` and `parameters` take a property bag; `git` takes either a VCS
//! root object or its property bag.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{
    CodecError, Envelope, EnvelopeList, Parameter, Parameters, Polymorphic, PropertyBag,
    PropertyModel,
};
use crate::model::{
    BuildFeature, BuildTypeOptions, Dependency, GitVcsRootOptions, ProjectFeature, Step, Trigger,
    VcsRoot,
};
use crate::output::{OutputWriter, TableBuilder, TableOutput, MASK};
use crate::transport::FileTransport;

use super::{GlobalOptions, Kind};

#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// What the payload contains
    #[arg(value_enum)]
    pub kind: Kind,

    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Fail when a resource has no typed variant
    #[arg(long)]
    pub strict: bool,
}

impl DecodeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer()?;
        let transport = FileTransport::new(self.file.clone(), None);
        let text = transport.read_text().await?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(CodecError::from)
            .context("Input is not valid JSON")?;

        match self.kind {
            Kind::Step => self.resources::<Step>(value, &writer),
            Kind::Trigger => self.resources::<Trigger>(value, &writer),
            Kind::Feature => self.resources::<BuildFeature>(value, &writer),
            Kind::ProjectFeature => self.resources::<ProjectFeature>(value, &writer),
            Kind::Dependency => self.resources::<Dependency>(value, &writer),
            Kind::Options => {
                let bag: PropertyBag = from_value(value)?;
                let options = BuildTypeOptions::from_properties(&bag)?;
                writer.write_model(&options)
            }
            Kind::Git => {
                let options = decode_git(value)?;
                writer.write_model(&options)
            }
            Kind::Parameters => {
                let bag: PropertyBag = from_value(value)?;
                let parameters = Parameters::from_properties(&bag);
                writer.write(&ParameterList(parameters.iter().cloned().collect()))
            }
        }
    }

    fn resources<P: Polymorphic + Serialize>(
        &self,
        value: serde_json::Value,
        writer: &OutputWriter,
    ) -> Result<()> {
        let items = read_envelopes(value)?
            .into_iter()
            .map(P::from_envelope)
            .collect::<crate::codec::Result<Vec<P>>>()?;

        let generic: Vec<&str> = items
            .iter()
            .filter(|item| item.is_generic())
            .map(|item| item.discriminator())
            .collect();
        if !generic.is_empty() {
            if self.strict {
                bail!("No typed variant for: {}", generic.join(", "));
            }
            tracing::info!(count = generic.len(), "resources kept in generic form");
        }

        writer.write_resources(&items)
    }
}

/// Deserializes a parsed document, keeping shape errors as [`CodecError`].
pub(crate) fn from_value<T: DeserializeOwned>(
    value: serde_json::Value,
) -> crate::codec::Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Accepts a single envelope, an array of envelopes, or a collection object.
pub(crate) fn read_envelopes(value: serde_json::Value) -> Result<Vec<Envelope>> {
    match value {
        serde_json::Value::Array(_) => Ok(from_value(value)?),
        serde_json::Value::Object(_) if value.get("type").is_some() => {
            Ok(vec![from_value(value)?])
        }
        serde_json::Value::Object(_) => Ok(EnvelopeList::from_value(value)?.items),
        _ => bail!("Expected a resource object, an array or a collection"),
    }
}

fn decode_git(value: serde_json::Value) -> Result<GitVcsRootOptions> {
    if value.get("vcsName").is_none() {
        let bag: PropertyBag = from_value(value)?;
        return Ok(GitVcsRootOptions::from_properties(&bag)?);
    }
    let root: VcsRoot = from_value(value)?;
    match root.git_options() {
        Some(options) => Ok(options?),
        None => bail!("VCS root uses '{}', not jetbrains.git", root.vcs_name),
    }
}

/// Decoded parameters, listed in wire order.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct ParameterList(Vec<Parameter>);

impl TableOutput for ParameterList {
    fn print_table(&self, color: bool) {
        if self.0.is_empty() {
            println!("No parameters");
            return;
        }
        let rows = self.0.iter().map(|p| {
            let value = if p.ui.is_password() && !p.value.is_empty() {
                MASK.to_string()
            } else {
                p.value.clone()
            };
            let name = if color && p.inherited {
                style(&p.name).dim().to_string()
            } else {
                p.name.clone()
            };
            [
                p.namespace.to_string(),
                name,
                value,
                p.ui.control_type
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        });
        TableBuilder::new()
            .color(color)
            .headers(["Namespace", "Name", "Value", "Control"])
            .rows(rows)
            .print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_single_envelope() {
        let value = serde_json::json!({"type": "golang", "properties": {"count": 0}});
        let envelopes = read_envelopes(value).unwrap();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].kind, "golang");
    }

    #[test]
    fn test_read_collection() {
        let value = serde_json::json!({
            "count": 2,
            "step": [
                {"id": "S1", "type": "simpleRunner"},
                {"id": "S2", "type": "gradle-runner"}
            ]
        });
        let envelopes = read_envelopes(value).unwrap();
        let ids: Vec<_> = envelopes.iter().filter_map(|e| e.id.as_deref()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn test_read_rejects_scalar() {
        assert!(read_envelopes(serde_json::json!("step")).is_err());
    }

    #[test]
    fn test_decode_git_from_root_or_bag() {
        let bag = serde_json::json!({
            "count": 2,
            "property": [
                {"name": "url", "value": "https://example.com/app.git"},
                {"name": "branch", "value": "refs/heads/main"}
            ]
        });
        let from_bag = decode_git(bag.clone()).unwrap();
        assert_eq!(from_bag.default_branch, "refs/heads/main");

        let root = serde_json::json!({"name": "App", "vcsName": "jetbrains.git", "properties": bag});
        assert_eq!(decode_git(root).unwrap(), from_bag);

        let svn = serde_json::json!({"name": "Old", "vcsName": "svn", "properties": {"count": 0}});
        assert!(decode_git(svn).is_err());
    }
}
