//
//  teamcity-cli
//  model/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build configuration general settings.
//!
//! These are the `settings` bag of a build type. Several booleans are left
//! out of the payload when they hold the server default: sending an explicit
//! value is not equivalent to omitting it on every server version.
//!
//! | Property | Default | Rule |
//! |----------|---------|------|
//! | `allowExternalStatus` | `false` | omit if default |
//! | `allowPersonalBuildTriggering` | `true` | omit if default |
//! | `artifactRules` | empty | omit if empty, LF-joined |
//! | `buildConfigurationType` | `REGULAR` | forced |
//! | `buildNumberCounter` | `1` | forced |
//! | `buildNumberPattern` | `%build.counter%` | forced |
//! | `checkoutDirectory` | empty | omit if empty |
//! | `cleanBuild` | `false` | omit if default |
//! | `enableHangingBuildsDetection` | `true` | forced |
//! | `executionTimeoutMin` | `0` | omit if default |
//! | `maximumNumberOfBuilds` | `0` | omit if default |
//! | `publishArtifacts` | `NORMALLY_FINISHED` | omit if default |

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum, LF};
use crate::codec::{Field, PropertyModel};

wire_enum! {
    /// Kind of build configuration.
    pub enum BuildConfigurationType {
        Regular => "REGULAR",
        Composite => "COMPOSITE",
        Deployment => "DEPLOYMENT",
    }
    default = Regular;
}

wire_enum! {
    /// When artifacts are published.
    pub enum PublishArtifacts {
        NormallyFinished => "NORMALLY_FINISHED",
        SuccessfulOnly => "SUCCESSFUL_ONLY",
        Always => "ALWAYS",
    }
    default = NormallyFinished;
}

/// General settings of a build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTypeOptions {
    pub allow_external_status: bool,
    pub allow_personal_build_triggering: bool,
    pub artifact_rules: Vec<String>,
    pub build_configuration_type: BuildConfigurationType,
    pub build_counter: u64,
    pub build_number_format: String,
    pub checkout_directory: String,
    pub clean_build: bool,
    pub enable_hanging_builds_detection: bool,
    pub execution_timeout_min: u32,
    pub max_simultaneous_builds: u32,
    pub publish_artifacts: PublishArtifacts,
}

impl Default for BuildTypeOptions {
    fn default() -> Self {
        Self {
            allow_external_status: false,
            allow_personal_build_triggering: true,
            artifact_rules: Vec::new(),
            build_configuration_type: BuildConfigurationType::Regular,
            build_counter: 1,
            build_number_format: "%build.counter%".to_string(),
            checkout_directory: String::new(),
            clean_build: false,
            enable_hanging_builds_detection: true,
            execution_timeout_min: 0,
            max_simultaneous_builds: 0,
            publish_artifacts: PublishArtifacts::NormallyFinished,
        }
    }
}

type F = Field<BuildTypeOptions>;

impl PropertyModel for BuildTypeOptions {
    const FIELDS: &'static [Field<Self>] = &[
        F::new(
            "allowExternalStatus",
            |o| wire::bool_str(o.allow_external_status),
            |o, v| wire::store_bool(&mut o.allow_external_status, v),
        )
        .default("false"),
        F::new(
            "allowPersonalBuildTriggering",
            |o| wire::bool_str(o.allow_personal_build_triggering),
            |o, v| wire::store_bool(&mut o.allow_personal_build_triggering, v),
        )
        .default("true"),
        F::new(
            "artifactRules",
            |o| wire::join_list(&o.artifact_rules, LF),
            |o, v| wire::store_list(&mut o.artifact_rules, v, LF),
        )
        .optional(),
        F::new(
            "buildConfigurationType",
            |o| o.build_configuration_type.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.build_configuration_type, v),
        )
        .default("REGULAR")
        .force(),
        F::new(
            "buildNumberCounter",
            |o| o.build_counter.to_string(),
            |o, v| wire::store_int(&mut o.build_counter, v),
        )
        .default("1")
        .force(),
        F::new(
            "buildNumberPattern",
            |o| o.build_number_format.clone(),
            |o, v| wire::store_str(&mut o.build_number_format, v),
        )
        .default("%build.counter%")
        .force(),
        F::new(
            "checkoutDirectory",
            |o| o.checkout_directory.clone(),
            |o, v| wire::store_str(&mut o.checkout_directory, v),
        )
        .optional(),
        F::new(
            "cleanBuild",
            |o| wire::bool_str(o.clean_build),
            |o, v| wire::store_bool(&mut o.clean_build, v),
        )
        .default("false"),
        F::new(
            "enableHangingBuildsDetection",
            |o| wire::bool_str(o.enable_hanging_builds_detection),
            |o, v| wire::store_bool(&mut o.enable_hanging_builds_detection, v),
        )
        .default("true")
        .force(),
        F::new(
            "executionTimeoutMin",
            |o| o.execution_timeout_min.to_string(),
            |o, v| wire::store_int(&mut o.execution_timeout_min, v),
        )
        .default("0"),
        F::new(
            "maximumNumberOfBuilds",
            |o| o.max_simultaneous_builds.to_string(),
            |o, v| wire::store_int(&mut o.max_simultaneous_builds, v),
        )
        .default("0"),
        F::new(
            "publishArtifacts",
            |o| o.publish_artifacts.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.publish_artifacts, v),
        )
        .default("NORMALLY_FINISHED"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecError, PropertyBag};

    #[test]
    fn test_defaults_emit_only_forced() {
        let bag = BuildTypeOptions::default().to_properties();
        let names: Vec<_> = bag.names().collect();
        assert_eq!(
            names,
            vec![
                "buildConfigurationType",
                "buildNumberCounter",
                "buildNumberPattern",
                "enableHangingBuildsDetection",
            ]
        );
    }

    #[test]
    fn test_personal_builds_omitted_when_default() {
        let options = BuildTypeOptions::default();
        assert!(!options.to_properties().contains("allowPersonalBuildTriggering"));

        let options = BuildTypeOptions {
            allow_personal_build_triggering: false,
            ..Default::default()
        };
        assert_eq!(
            options.to_properties().get("allowPersonalBuildTriggering"),
            Some("false")
        );
    }

    #[test]
    fn test_empty_bag_decodes_to_server_defaults() {
        let options = BuildTypeOptions::from_properties(&PropertyBag::new()).unwrap();
        assert_eq!(options, BuildTypeOptions::default());
        assert_eq!(options.build_configuration_type, BuildConfigurationType::Regular);
        assert!(options.allow_personal_build_triggering);
    }

    #[test]
    fn test_roundtrip_non_defaults() {
        let options = BuildTypeOptions {
            allow_external_status: true,
            allow_personal_build_triggering: false,
            artifact_rules: vec!["out/** => dist".to_string(), "logs => logs.zip".to_string()],
            build_configuration_type: BuildConfigurationType::Deployment,
            build_counter: 42,
            build_number_format: "1.0.%build.counter%".to_string(),
            checkout_directory: "src".to_string(),
            clean_build: true,
            enable_hanging_builds_detection: false,
            execution_timeout_min: 30,
            max_simultaneous_builds: 2,
            publish_artifacts: PublishArtifacts::Always,
        };
        let bag = options.to_properties();
        assert_eq!(bag.get("artifactRules"), Some("out/** => dist\nlogs => logs.zip"));
        assert_eq!(BuildTypeOptions::from_properties(&bag).unwrap(), options);
    }

    #[test]
    fn test_bad_enum_is_structural_error() {
        let mut bag = PropertyBag::new();
        bag.set("buildConfigurationType", "NIGHTLY");
        let err = BuildTypeOptions::from_properties(&bag).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { ref name, .. } if name == "buildConfigurationType"));
    }
}
