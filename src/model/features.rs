//
//  teamcity-cli
//  model/features.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build features and project features.
//!
//! # Build Feature Types
//!
//! * `commit-status-publisher` - report build status back to the code host
//! * `golang` - parse `go test -json` output
//! * `ssh-agent` - load an uploaded SSH key into an agent for the build
//!
//! # Project Feature Types
//!
//! * `versionedSettings` - keep project settings in a VCS root
//! * `OAuthProvider` - connections; the `providerType` property picks the
//!   concrete kind, and only `slackConnection` has a typed form
//!
//! Unrecognized types, and connections of other providers, decode to the
//! generic arm.

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum};
use crate::codec::{
    Discriminated, Document, Envelope, Field, GenericResource, Polymorphic, PropertyModel, Resource,
    Result,
};

/// Property selecting the concrete kind of an `OAuthProvider` feature.
pub const PROVIDER_TYPE_PROPERTY: &str = "providerType";

/// `commit-status-publisher` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitStatusPublisherOptions {
    /// Publisher plugin, e.g. `githubStatusPublisher`.
    pub publisher: String,
    pub github_host: String,
    pub github_auth_type: String,
    pub github_token: String,
    /// Restricts publishing to one VCS root.
    pub vcs_root_id: String,
}

impl CommitStatusPublisherOptions {
    /// GitHub publisher authenticating with a personal access token.
    pub fn github(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            publisher: "githubStatusPublisher".to_string(),
            github_host: host.into(),
            github_auth_type: "token".to_string(),
            github_token: token.into(),
            vcs_root_id: String::new(),
        }
    }
}

impl Discriminated for CommitStatusPublisherOptions {
    const TYPE: &'static str = "commit-status-publisher";
}

type Csp = Field<CommitStatusPublisherOptions>;

impl PropertyModel for CommitStatusPublisherOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Csp::new(
            "publisherId",
            |o| o.publisher.clone(),
            |o, v| wire::store_str(&mut o.publisher, v),
        ),
        Csp::new(
            "github_host",
            |o| o.github_host.clone(),
            |o, v| wire::store_str(&mut o.github_host, v),
        )
        .optional(),
        Csp::new(
            "github_authentication_type",
            |o| o.github_auth_type.clone(),
            |o, v| wire::store_str(&mut o.github_auth_type, v),
        )
        .optional(),
        Csp::new(
            "secure:github_access_token",
            |o| o.github_token.clone(),
            |o, v| wire::store_str(&mut o.github_token, v),
        )
        .optional(),
        Csp::new(
            "vcsRootId",
            |o| o.vcs_root_id.clone(),
            |o, v| wire::store_str(&mut o.vcs_root_id, v),
        )
        .optional(),
    ];
}

/// `golang` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolangOptions {
    pub test_format: String,
}

impl Default for GolangOptions {
    fn default() -> Self {
        Self {
            test_format: "json".to_string(),
        }
    }
}

impl Discriminated for GolangOptions {
    const TYPE: &'static str = "golang";
}

impl PropertyModel for GolangOptions {
    const FIELDS: &'static [Field<Self>] = &[Field::<GolangOptions>::new(
        "test.format",
        |o| o.test_format.clone(),
        |o, v| wire::store_str(&mut o.test_format, v),
    )
    .default("json")
    .force()];
}

/// `ssh-agent` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshAgentOptions {
    /// Name of a key uploaded to the project.
    pub key_name: String,
}

impl Discriminated for SshAgentOptions {
    const TYPE: &'static str = "ssh-agent";
}

impl PropertyModel for SshAgentOptions {
    const FIELDS: &'static [Field<Self>] = &[Field::<SshAgentOptions>::new(
        "teamcitySshKey",
        |o| o.key_name.clone(),
        |o, v| wire::store_str(&mut o.key_name, v),
    )];
}

/// A build feature of any type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BuildFeature {
    CommitStatusPublisher(Resource<CommitStatusPublisherOptions>),
    Golang(Resource<GolangOptions>),
    SshAgent(Resource<SshAgentOptions>),
    Generic(GenericResource),
}

impl BuildFeature {
    /// Item key of the `features` collection.
    pub const ITEM: &'static str = "feature";
}

impl Polymorphic for BuildFeature {
    fn from_envelope(envelope: Envelope) -> Result<Self> {
        let kind = envelope.kind.clone();
        Ok(match kind.as_str() {
            CommitStatusPublisherOptions::TYPE => {
                Self::CommitStatusPublisher(Resource::from_envelope(envelope)?)
            }
            GolangOptions::TYPE => Self::Golang(Resource::from_envelope(envelope)?),
            SshAgentOptions::TYPE => Self::SshAgent(Resource::from_envelope(envelope)?),
            _ => Self::Generic(GenericResource::fallback(envelope)),
        })
    }

    fn from_document(document: Document) -> Result<Self> {
        if !document.is_typed() {
            return Self::from_envelope(document.into_envelope()?);
        }
        let kind = document.kind().to_string();
        Ok(match kind.as_str() {
            CommitStatusPublisherOptions::TYPE => Self::CommitStatusPublisher(document.typed()?),
            GolangOptions::TYPE => Self::Golang(document.typed()?),
            SshAgentOptions::TYPE => Self::SshAgent(document.typed()?),
            _ => return Err(document.unknown_options()),
        })
    }

    fn to_envelope(&self) -> Envelope {
        match self {
            Self::CommitStatusPublisher(r) => r.to_envelope(),
            Self::Golang(r) => r.to_envelope(),
            Self::SshAgent(r) => r.to_envelope(),
            Self::Generic(g) => g.envelope().clone(),
        }
    }

    fn discriminator(&self) -> &str {
        match self {
            Self::CommitStatusPublisher(r) => r.discriminator(),
            Self::Golang(r) => r.discriminator(),
            Self::SshAgent(r) => r.discriminator(),
            Self::Generic(g) => g.discriminator(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::CommitStatusPublisher(r) => r.id.as_deref(),
            Self::Golang(r) => r.id.as_deref(),
            Self::SshAgent(r) => r.id.as_deref(),
            Self::Generic(g) => g.id(),
        }
    }

    fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}

wire_enum! {
    pub enum SettingsFormat {
        Kotlin => "kotlin",
        Xml => "xml",
    }
    default = Kotlin;
}

wire_enum! {
    /// Which settings a build uses when VCS and server disagree.
    pub enum BuildSettingsMode {
        AlwaysUseCurrent => "ALWAYS_USE_CURRENT",
        PreferCurrent => "PREFER_CURRENT",
        PreferVcs => "PREFER_VCS",
    }
    default = AlwaysUseCurrent;
}

wire_enum! {
    /// Where secure values referenced by versioned settings are stored.
    pub enum CredentialsStorage {
        CredentialsJson => "credentialsJSON",
        ScrambledInVcs => "scrambledInVcs",
    }
    default = CredentialsJson;
}

/// `versionedSettings` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionedSettingsOptions {
    pub enabled: bool,
    pub vcs_root_id: String,
    pub format: SettingsFormat,
    pub build_settings: BuildSettingsMode,
    pub credentials_storage: CredentialsStorage,
    pub show_changes: bool,
    pub use_relative_ids: bool,
}

impl Default for VersionedSettingsOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            vcs_root_id: String::new(),
            format: SettingsFormat::Kotlin,
            build_settings: BuildSettingsMode::AlwaysUseCurrent,
            credentials_storage: CredentialsStorage::CredentialsJson,
            show_changes: false,
            use_relative_ids: true,
        }
    }
}

impl Discriminated for VersionedSettingsOptions {
    const TYPE: &'static str = "versionedSettings";
}

type Vs = Field<VersionedSettingsOptions>;

impl PropertyModel for VersionedSettingsOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Vs::new(
            "enabled",
            |o| wire::bool_str(o.enabled),
            |o, v| wire::store_bool(&mut o.enabled, v),
        )
        .default("true")
        .force(),
        Vs::new(
            "rootId",
            |o| o.vcs_root_id.clone(),
            |o, v| wire::store_str(&mut o.vcs_root_id, v),
        ),
        Vs::new(
            "format",
            |o| o.format.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.format, v),
        )
        .default("kotlin")
        .force(),
        Vs::new(
            "buildSettings",
            |o| o.build_settings.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.build_settings, v),
        )
        .default("ALWAYS_USE_CURRENT")
        .force(),
        Vs::new(
            "credentialsStorageType",
            |o| o.credentials_storage.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.credentials_storage, v),
        )
        .default("credentialsJSON")
        .force(),
        Vs::new(
            "showChanges",
            |o| wire::bool_str(o.show_changes),
            |o, v| wire::store_bool(&mut o.show_changes, v),
        )
        .default("false"),
        Vs::new(
            "useRelativeIds",
            |o| wire::bool_str(o.use_relative_ids),
            |o, v| wire::store_bool(&mut o.use_relative_ids, v),
        )
        .default("true")
        .force(),
    ];
}

/// `OAuthProvider` connection with `providerType = slackConnection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConnectionOptions {
    pub display_name: String,
    pub client_id: String,
    pub client_secret: String,
    pub bot_token: String,
}

impl SlackConnectionOptions {
    pub const PROVIDER: &'static str = "slackConnection";
}

impl Discriminated for SlackConnectionOptions {
    const TYPE: &'static str = "OAuthProvider";
}

type Slack = Field<SlackConnectionOptions>;

impl PropertyModel for SlackConnectionOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Slack::new(
            PROVIDER_TYPE_PROPERTY,
            |_| SlackConnectionOptions::PROVIDER.to_string(),
            |_, v| wire::derived(v),
        ),
        Slack::new(
            "displayName",
            |o| o.display_name.clone(),
            |o, v| wire::store_str(&mut o.display_name, v),
        )
        .optional(),
        Slack::new(
            "clientId",
            |o| o.client_id.clone(),
            |o, v| wire::store_str(&mut o.client_id, v),
        )
        .optional(),
        Slack::new(
            "secure:clientSecret",
            |o| o.client_secret.clone(),
            |o, v| wire::store_str(&mut o.client_secret, v),
        )
        .optional(),
        Slack::new(
            "secure:token",
            |o| o.bot_token.clone(),
            |o, v| wire::store_str(&mut o.bot_token, v),
        )
        .optional(),
    ];
}

/// A project feature of any type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProjectFeature {
    VersionedSettings(Resource<VersionedSettingsOptions>),
    SlackConnection(Resource<SlackConnectionOptions>),
    Generic(GenericResource),
}

impl ProjectFeature {
    /// Item key of the `projectFeatures` collection.
    pub const ITEM: &'static str = "projectFeature";
}

impl Polymorphic for ProjectFeature {
    fn from_envelope(envelope: Envelope) -> Result<Self> {
        let kind = envelope.kind.clone();
        let provider = envelope
            .properties
            .get(PROVIDER_TYPE_PROPERTY)
            .map(str::to_string);
        Ok(match (kind.as_str(), provider.as_deref()) {
            (VersionedSettingsOptions::TYPE, _) => {
                Self::VersionedSettings(Resource::from_envelope(envelope)?)
            }
            (SlackConnectionOptions::TYPE, Some(SlackConnectionOptions::PROVIDER)) => {
                Self::SlackConnection(Resource::from_envelope(envelope)?)
            }
            _ => Self::Generic(GenericResource::fallback(envelope)),
        })
    }

    fn from_document(document: Document) -> Result<Self> {
        if !document.is_typed() {
            return Self::from_envelope(document.into_envelope()?);
        }
        let kind = document.kind().to_string();
        Ok(match kind.as_str() {
            VersionedSettingsOptions::TYPE => Self::VersionedSettings(document.typed()?),
            SlackConnectionOptions::TYPE => Self::SlackConnection(document.typed()?),
            _ => return Err(document.unknown_options()),
        })
    }

    fn to_envelope(&self) -> Envelope {
        match self {
            Self::VersionedSettings(r) => r.to_envelope(),
            Self::SlackConnection(r) => r.to_envelope(),
            Self::Generic(g) => g.envelope().clone(),
        }
    }

    fn discriminator(&self) -> &str {
        match self {
            Self::VersionedSettings(r) => r.discriminator(),
            Self::SlackConnection(r) => r.discriminator(),
            Self::Generic(g) => g.discriminator(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::VersionedSettings(r) => r.id.as_deref(),
            Self::SlackConnection(r) => r.id.as_deref(),
            Self::Generic(g) => g.id(),
        }
    }

    fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}
