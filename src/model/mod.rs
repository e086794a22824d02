//
//  teamcity-cli
//  model/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Concrete configuration objects.
//!
//! Every type here pairs a plain Rust struct with a property table (see
//! [`crate::codec::PropertyModel`]), and every resource kind is a closed
//! enum implementing [`crate::codec::Polymorphic`] with a generic arm.
//!
//! | Kind | Enum | Collection item key |
//! |------|------|---------------------|
//! | Build steps | [`Step`] | `step` |
//! | Triggers | [`Trigger`] | `trigger` |
//! | Build features | [`BuildFeature`] | `feature` |
//! | Project features | [`ProjectFeature`] | `projectFeature` |
//! | Dependencies | [`Dependency`] | `snapshot-dependency`, `artifact-dependency` |

pub mod dependencies;
pub mod features;
pub mod options;
pub mod steps;
pub mod triggers;
pub mod vcs;

pub use dependencies::{
    ArtifactDependencyOptions, Dependency, FailureAction, SnapshotDependencyOptions,
};
pub use features::{
    BuildFeature, BuildSettingsMode, CommitStatusPublisherOptions, CredentialsStorage,
    GolangOptions, ProjectFeature, SettingsFormat, SlackConnectionOptions, SshAgentOptions,
    VersionedSettingsOptions, PROVIDER_TYPE_PROPERTY,
};
pub use options::{BuildConfigurationType, BuildTypeOptions, PublishArtifacts};
pub use steps::{
    CommandLineStep, DotNetCommand, DotNetStep, PowerShellBitness, PowerShellStep, ScriptMode, Step,
    StepMode, STEP_MODE_PROPERTY,
};
pub use triggers::{
    FinishBuildTriggerOptions, QuietPeriodMode, SchedulePolicy, ScheduleTriggerOptions, Trigger,
    VcsTriggerOptions, Weekday,
};
pub use vcs::{
    AgentCleanFilesPolicy, AgentCleanPolicy, GitAuthMethod, GitVcsRootOptions, ProjectRef,
    SubmoduleCheckout, UsernameStyle, VcsRoot,
};
