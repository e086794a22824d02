//
//  teamcity-cli
//  cli/encode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `tcity encode`: typed document in, wire JSON out.
//!
//! The input is what `tcity decode --output yaml` (or `json`) prints, so a
//! payload can be decoded, edited and encoded again. A single resource
//! encodes to one envelope, a list to a `{"count", "<item>": [...]}`
//! collection.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;

use crate::codec::{
    CodecError, Document, EnvelopeList, Parameter, Parameters, Polymorphic, PropertyModel,
};
use crate::model::{
    BuildFeature, BuildTypeOptions, Dependency, GitVcsRootOptions, ProjectFeature, Step, Trigger,
    VcsRoot,
};
use crate::output::OutputWriter;
use crate::transport::{FileTransport, Transport};

use super::{GlobalOptions, Kind};

#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// What the document describes
    #[arg(value_enum)]
    pub kind: Kind,

    /// Input file, YAML or JSON (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Write the payload to a file instead of stdout
    #[arg(long, short = 'O')]
    pub out: Option<PathBuf>,

    /// Collection item key for lists (defaults per kind)
    #[arg(long)]
    pub item_key: Option<String>,

    /// With `git`: wrap the properties in a VCS root of this name
    #[arg(long, requires = "project")]
    pub root_name: Option<String>,

    /// With `git`: project id of the VCS root
    #[arg(long)]
    pub project: Option<String>,
}

impl EncodeCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer()?;
        let transport = FileTransport::new(self.file.clone(), self.out.clone());
        let text = transport.read_text().await?;
        let document = parse_document(&text)?;

        self.encode(document, &transport, &writer).await?;
        if let Some(path) = transport.output() {
            writer.write_success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }

    async fn encode(
        &self,
        document: serde_json::Value,
        transport: &FileTransport,
        writer: &OutputWriter,
    ) -> Result<()> {
        match self.kind {
            Kind::Step => self.resources::<Step>(document, transport, writer).await,
            Kind::Trigger => self.resources::<Trigger>(document, transport, writer).await,
            Kind::Feature => self.resources::<BuildFeature>(document, transport, writer).await,
            Kind::ProjectFeature => {
                self.resources::<ProjectFeature>(document, transport, writer)
                    .await
            }
            Kind::Dependency => self.resources::<Dependency>(document, transport, writer).await,
            Kind::Options => {
                let options: BuildTypeOptions = typed(document)?;
                let text = writer.wire_text(&options.to_properties())?;
                Ok(transport.write_text(&text).await?)
            }
            Kind::Git => {
                let options: GitVcsRootOptions = typed(document)?;
                let text = match (&self.root_name, &self.project) {
                    (Some(name), Some(project)) => {
                        writer.wire_text(&VcsRoot::git(name, project, &options))?
                    }
                    _ => writer.wire_text(&options.to_properties())?,
                };
                Ok(transport.write_text(&text).await?)
            }
            Kind::Parameters => {
                let list: Vec<Parameter> = typed(document)?;
                let parameters: Parameters = list.into_iter().collect();
                let text = writer.wire_text(&parameters.to_properties())?;
                Ok(transport.write_text(&text).await?)
            }
        }
    }

    async fn resources<P: Polymorphic>(
        &self,
        document: serde_json::Value,
        transport: &FileTransport,
        writer: &OutputWriter,
    ) -> Result<()> {
        match document {
            serde_json::Value::Array(values) => {
                let items = values
                    .into_iter()
                    .map(|value| P::from_document(Document::new(value)?))
                    .collect::<crate::codec::Result<Vec<P>>>()?;
                let item_key = match (&self.item_key, self.kind.item_key()) {
                    (Some(key), _) => key.as_str(),
                    (None, Some(key)) => key,
                    (None, None) => bail!("No collection key for {:?}", self.kind),
                };
                let list = EnvelopeList::encode_all(item_key, &items);
                let text = writer.wire_text(&list)?;
                transport.write_text(&text).await?;
                tracing::debug!(count = items.len(), item_key, "encoded collection");
            }
            value => {
                let item = P::from_document(Document::new(value)?)?;
                if writer.is_pretty() {
                    transport.send(item.to_envelope()).await?;
                } else {
                    let text = writer.wire_text(&item.to_envelope())?;
                    transport.write_text(&text).await?;
                }
            }
        }
        Ok(())
    }
}

/// Parses YAML or JSON into a JSON value tree.
fn parse_document(text: &str) -> Result<serde_json::Value> {
    serde_yaml::from_str(text)
        .map_err(CodecError::from)
        .context("Input is neither valid YAML nor JSON")
}

fn typed<T: DeserializeOwned>(document: serde_json::Value) -> Result<T> {
    super::decode::from_value(document).context("Document does not match the expected shape")
}
