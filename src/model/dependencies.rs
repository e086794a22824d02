//
//  teamcity-cli
//  model/dependencies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Snapshot and artifact dependencies.
//!
//! Both kinds carry their upstream build configuration in the envelope's
//! `source-buildType` field rather than in the property bag. They are
//! listed under different collection keys (`snapshot-dependency`,
//! `artifact-dependency`) but share one dispatcher.
//!
//! Artifact path rules are the one list the server joins with CRLF.

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum, CRLF};
use crate::codec::{
    Discriminated, Document, Envelope, Field, GenericResource, Polymorphic, PropertyModel, Resource,
    Result,
};

wire_enum! {
    /// What happens when the upstream build fails or cannot start.
    pub enum FailureAction {
        Run => "RUN",
        RunAddProblem => "RUN_ADD_PROBLEM",
        MakeFailedToStart => "MAKE_FAILED_TO_START",
        Cancel => "CANCEL",
    }
    default = MakeFailedToStart;
}

/// `artifact_dependency` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactDependencyOptions {
    /// `source => destination` rules.
    pub path_rules: Vec<String>,
    /// `lastSuccessful`, `lastPinned`, `lastFinished`, `sameChainOrLastFinished`,
    /// `buildNumber` or `buildTag`.
    pub revision_name: String,
    pub revision_value: String,
    pub branch: String,
    pub clean_destination: bool,
}

impl Default for ArtifactDependencyOptions {
    fn default() -> Self {
        Self {
            path_rules: Vec::new(),
            revision_name: "lastSuccessful".to_string(),
            revision_value: String::new(),
            branch: String::new(),
            clean_destination: false,
        }
    }
}

impl ArtifactDependencyOptions {
    pub fn new(path_rules: Vec<String>) -> Self {
        Self {
            path_rules,
            ..Default::default()
        }
    }
}

impl Discriminated for ArtifactDependencyOptions {
    const TYPE: &'static str = "artifact_dependency";
}

type Artifact = Field<ArtifactDependencyOptions>;

impl PropertyModel for ArtifactDependencyOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Artifact::new(
            "pathRules",
            |o| wire::join_list(&o.path_rules, CRLF),
            |o, v| wire::store_list(&mut o.path_rules, v, CRLF),
        ),
        Artifact::new(
            "revisionName",
            |o| o.revision_name.clone(),
            |o, v| wire::store_str(&mut o.revision_name, v),
        )
        .default("lastSuccessful")
        .force(),
        Artifact::new(
            "revisionValue",
            |o| o.revision_value.clone(),
            |o, v| wire::store_str(&mut o.revision_value, v),
        )
        .optional(),
        Artifact::new(
            "revisionBranch",
            |o| o.branch.clone(),
            |o, v| wire::store_str(&mut o.branch, v),
        )
        .optional(),
        Artifact::new(
            "cleanDestinationDirectory",
            |o| wire::bool_str(o.clean_destination),
            |o, v| wire::store_bool(&mut o.clean_destination, v),
        )
        .default("false")
        .force(),
    ];
}

/// `snapshot_dependency` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotDependencyOptions {
    pub on_dependency_failure: FailureAction,
    pub on_dependency_cancel: FailureAction,
    pub run_on_same_agent: bool,
    pub reuse_builds_with_same_revisions: bool,
    pub reuse_successful_builds_only: bool,
}

impl Default for SnapshotDependencyOptions {
    fn default() -> Self {
        Self {
            on_dependency_failure: FailureAction::MakeFailedToStart,
            on_dependency_cancel: FailureAction::MakeFailedToStart,
            run_on_same_agent: false,
            reuse_builds_with_same_revisions: true,
            reuse_successful_builds_only: true,
        }
    }
}

impl Discriminated for SnapshotDependencyOptions {
    const TYPE: &'static str = "snapshot_dependency";
}

type Snapshot = Field<SnapshotDependencyOptions>;

impl PropertyModel for SnapshotDependencyOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Snapshot::new(
            "run-build-if-dependency-failed",
            |o| o.on_dependency_failure.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.on_dependency_failure, v),
        )
        .default("MAKE_FAILED_TO_START")
        .force(),
        Snapshot::new(
            "run-build-if-dependency-failed-to-start",
            |o| o.on_dependency_cancel.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.on_dependency_cancel, v),
        )
        .default("MAKE_FAILED_TO_START")
        .force(),
        Snapshot::new(
            "run-build-on-the-same-agent",
            |o| wire::bool_str(o.run_on_same_agent),
            |o, v| wire::store_bool(&mut o.run_on_same_agent, v),
        )
        .default("false")
        .force(),
        Snapshot::new(
            "take-started-build-with-same-revisions",
            |o| wire::bool_str(o.reuse_builds_with_same_revisions),
            |o, v| wire::store_bool(&mut o.reuse_builds_with_same_revisions, v),
        )
        .default("true")
        .force(),
        Snapshot::new(
            "take-successful-builds-only",
            |o| wire::bool_str(o.reuse_successful_builds_only),
            |o, v| wire::store_bool(&mut o.reuse_successful_builds_only, v),
        )
        .default("true")
        .force(),
    ];
}

/// A dependency of any type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dependency {
    Artifact(Resource<ArtifactDependencyOptions>),
    Snapshot(Resource<SnapshotDependencyOptions>),
    Generic(GenericResource),
}

impl Dependency {
    /// Item key of the `artifact-dependencies` collection.
    pub const ARTIFACT_ITEM: &'static str = "artifact-dependency";
    /// Item key of the `snapshot-dependencies` collection.
    pub const SNAPSHOT_ITEM: &'static str = "snapshot-dependency";

    /// Upstream build configuration id.
    pub fn source_build_type(&self) -> Option<&str> {
        let source = match self {
            Self::Artifact(r) => r.source_build_type.as_ref(),
            Self::Snapshot(r) => r.source_build_type.as_ref(),
            Self::Generic(g) => g.envelope().source_build_type.as_ref(),
        };
        source.map(|s| s.id.as_str())
    }
}

impl Polymorphic for Dependency {
    fn from_envelope(envelope: Envelope) -> Result<Self> {
        let kind = envelope.kind.clone();
        Ok(match kind.as_str() {
            ArtifactDependencyOptions::TYPE => Self::Artifact(Resource::from_envelope(envelope)?),
            SnapshotDependencyOptions::TYPE => Self::Snapshot(Resource::from_envelope(envelope)?),
            _ => Self::Generic(GenericResource::fallback(envelope)),
        })
    }

    fn from_document(document: Document) -> Result<Self> {
        if !document.is_typed() {
            return Self::from_envelope(document.into_envelope()?);
        }
        let kind = document.kind().to_string();
        Ok(match kind.as_str() {
            ArtifactDependencyOptions::TYPE => Self::Artifact(document.typed()?),
            SnapshotDependencyOptions::TYPE => Self::Snapshot(document.typed()?),
            _ => return Err(document.unknown_options()),
        })
    }

    fn to_envelope(&self) -> Envelope {
        match self {
            Self::Artifact(r) => r.to_envelope(),
            Self::Snapshot(r) => r.to_envelope(),
            Self::Generic(g) => g.envelope().clone(),
        }
    }

    fn discriminator(&self) -> &str {
        match self {
            Self::Artifact(r) => r.discriminator(),
            Self::Snapshot(r) => r.discriminator(),
            Self::Generic(g) => g.discriminator(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::Artifact(r) => r.id.as_deref(),
            Self::Snapshot(r) => r.id.as_deref(),
            Self::Generic(g) => g.id(),
        }
    }

    fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, PropertyBag};

    #[test]
    fn test_path_rules_use_crlf() {
        let options = ArtifactDependencyOptions::new(vec![
            "dist/*.zip => artifacts".to_string(),
            "-:dist/debug.zip".to_string(),
        ]);
        let bag = options.to_properties();
        assert_eq!(
            bag.get("pathRules"),
            Some("dist/*.zip => artifacts\r\n-:dist/debug.zip")
        );
        assert_eq!(bag.get("revisionName"), Some("lastSuccessful"));
        assert_eq!(bag.get("cleanDestinationDirectory"), Some("false"));
        assert!(!bag.contains("revisionValue"));
        assert_eq!(ArtifactDependencyOptions::from_properties(&bag).unwrap(), options);
    }

    #[test]
    fn test_path_rules_required() {
        let err = ArtifactDependencyOptions::from_properties(&PropertyBag::new()).unwrap_err();
        assert!(matches!(err, CodecError::MissingProperty { ref name } if name == "pathRules"));
    }

    #[test]
    fn test_snapshot_defaults_forced() {
        let bag = SnapshotDependencyOptions::default().to_properties();
        assert_eq!(bag.len(), 5);
        assert_eq!(bag.get("run-build-if-dependency-failed"), Some("MAKE_FAILED_TO_START"));
        assert_eq!(bag.get("take-successful-builds-only"), Some("true"));
    }

    #[test]
    fn test_snapshot_rejects_unknown_action() {
        let mut bag = PropertyBag::new();
        bag.set("run-build-if-dependency-failed", "IGNORE");
        let err = SnapshotDependencyOptions::from_properties(&bag).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidValue { ref name, .. } if name == "run-build-if-dependency-failed"
        ));
    }

    #[test]
    fn test_source_build_type_travels_in_envelope() {
        let dep = Resource::new(SnapshotDependencyOptions::default())
            .with_id("Acme_Compile")
            .with_source("Acme_Compile");
        let envelope = dep.to_envelope();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["source-buildType"]["id"], "Acme_Compile");
        assert_eq!(json["type"], "snapshot_dependency");

        let decoded = Dependency::from_envelope(envelope).unwrap();
        assert_eq!(decoded.source_build_type(), Some("Acme_Compile"));
        assert_eq!(decoded, Dependency::Snapshot(dep));
    }

    #[test]
    fn test_unknown_dependency_is_generic() {
        let envelope = Envelope::new("future_dependency", PropertyBag::new());
        let decoded = Dependency::from_envelope(envelope).unwrap();
        assert!(decoded.is_generic());
        assert_eq!(decoded.source_build_type(), None);
    }
}
