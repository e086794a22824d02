//
//  teamcity-cli
//  transport/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Moving envelopes in and out of the codec.
//!
//! The codec never performs I/O itself. A [`Transport`] hands it envelopes
//! received from somewhere and takes the ones it produces. The only
//! implementation shipped here is file based; the REST client that talks
//! to a live server lives outside this crate.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::codec::{Envelope, Result};

/// Source and sink of resource envelopes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Delivers an envelope and returns the stored form as echoed back.
    async fn send(&self, envelope: Envelope) -> Result<Envelope>;

    /// Reads the next envelope.
    async fn receive(&self) -> Result<Envelope>;
}

/// Reads envelopes from a file (or stdin) and writes them to a file (or stdout).
#[derive(Debug, Clone, Default)]
pub struct FileTransport {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl FileTransport {
    /// `None` for either side means the standard stream.
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self { input, output }
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Raw input text, for payloads that are not a single envelope
    /// (collections, property bags, typed documents).
    pub async fn read_text(&self) -> Result<String> {
        match &self.input {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading input file");
                Ok(tokio::fs::read_to_string(path).await?)
            }
            None => {
                tracing::debug!("reading input from stdin");
                let mut text = String::new();
                tokio::io::stdin().read_to_string(&mut text).await?;
                Ok(text)
            }
        }
    }

    /// Writes `text` followed by a newline.
    pub async fn write_text(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                tracing::debug!(path = %path.display(), "writing output file");
                tokio::fs::write(path, format!("{text}\n")).await?;
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn send(&self, envelope: Envelope) -> Result<Envelope> {
        let json = envelope.to_json()?;
        self.write_text(&json).await?;
        Envelope::from_json(&json)
    }

    async fn receive(&self) -> Result<Envelope> {
        let text = self.read_text().await?;
        Envelope::from_json(&text)
    }
}
