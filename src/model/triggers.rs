//
//  teamcity-cli
//  model/triggers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build triggers.
//!
//! # Trigger Types
//!
//! * `vcsTrigger` - start a build when commits are detected
//! * `buildDependencyTrigger` - start a build when another build finishes
//! * `schedulingTrigger` - start a build daily or weekly at a fixed time
//!
//! # Example
//!
//! ```rust
//! use teamcity_cli::codec::{Envelope, Polymorphic, PropertyBag};
//! use teamcity_cli::model::Trigger;
//!
//! let envelope = Envelope::new("vcsTrigger", PropertyBag::new()).with_id("TRIGGER_1");
//! let trigger = Trigger::from_envelope(envelope).unwrap();
//! assert!(matches!(trigger, Trigger::Vcs(_)));
//! assert_eq!(trigger.id(), Some("TRIGGER_1"));
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum, LF};
use crate::codec::{
    Discriminated, Document, Envelope, Field, GenericResource, Polymorphic, PropertyModel, Resource,
    Result,
};

wire_enum! {
    /// How long to wait for more commits before starting a build.
    pub enum QuietPeriodMode {
        DoNotUse => "DO_NOT_USE",
        UseDefault => "USE_DEFAULT",
        UseCustom => "USE_CUSTOM",
    }
    default = DoNotUse;
}

wire_enum! {
    pub enum SchedulePolicy {
        Daily => "daily",
        Weekly => "weekly",
    }
    default = Daily;
}

wire_enum! {
    pub enum Weekday {
        Sunday => "Sunday",
        Monday => "Monday",
        Tuesday => "Tuesday",
        Wednesday => "Wednesday",
        Thursday => "Thursday",
        Friday => "Friday",
        Saturday => "Saturday",
    }
    default = Sunday;
}

/// `vcsTrigger` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsTriggerOptions {
    pub branch_filter: Vec<String>,
    pub trigger_rules: Vec<String>,
    pub quiet_period_mode: QuietPeriodMode,
    /// Seconds; only used with [`QuietPeriodMode::UseCustom`].
    pub quiet_period: u32,
    pub enable_queue_optimization: bool,
    pub per_checkin_triggering: bool,
    pub group_checkins_by_committer: bool,
}

impl Discriminated for VcsTriggerOptions {
    const TYPE: &'static str = "vcsTrigger";
}

type Vcs = Field<VcsTriggerOptions>;

impl PropertyModel for VcsTriggerOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Vcs::new(
            "branchFilter",
            |o| wire::join_list(&o.branch_filter, LF),
            |o, v| wire::store_list(&mut o.branch_filter, v, LF),
        )
        .optional(),
        Vcs::new(
            "triggerRules",
            |o| wire::join_list(&o.trigger_rules, LF),
            |o, v| wire::store_list(&mut o.trigger_rules, v, LF),
        )
        .optional(),
        Vcs::new(
            "quietPeriodMode",
            |o| o.quiet_period_mode.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.quiet_period_mode, v),
        )
        .default("DO_NOT_USE")
        .force(),
        Vcs::new(
            "quietPeriod",
            |o| o.quiet_period.to_string(),
            |o, v| wire::store_int(&mut o.quiet_period, v),
        )
        .default("0"),
        Vcs::new(
            "enableQueueOptimization",
            |o| wire::bool_str(o.enable_queue_optimization),
            |o, v| wire::store_bool(&mut o.enable_queue_optimization, v),
        )
        .default("false"),
        Vcs::new(
            "perCheckinTriggering",
            |o| wire::bool_str(o.per_checkin_triggering),
            |o, v| wire::store_bool(&mut o.per_checkin_triggering, v),
        )
        .default("false"),
        Vcs::new(
            "groupCheckinsByCommitter",
            |o| wire::bool_str(o.group_checkins_by_committer),
            |o, v| wire::store_bool(&mut o.group_checkins_by_committer, v),
        )
        .default("false"),
    ];
}

/// `buildDependencyTrigger` settings ("finish build" trigger).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishBuildTriggerOptions {
    /// Build configuration whose completion starts this build.
    pub depends_on: String,
    pub after_successful_build_only: bool,
    pub branch_filter: Vec<String>,
}

impl Discriminated for FinishBuildTriggerOptions {
    const TYPE: &'static str = "buildDependencyTrigger";
}

type Finish = Field<FinishBuildTriggerOptions>;

impl PropertyModel for FinishBuildTriggerOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Finish::new(
            "dependsOn",
            |o| o.depends_on.clone(),
            |o, v| wire::store_str(&mut o.depends_on, v),
        ),
        Finish::new(
            "afterSuccessfulBuildOnly",
            |o| wire::bool_str(o.after_successful_build_only),
            |o, v| wire::store_bool(&mut o.after_successful_build_only, v),
        )
        .default("false")
        .force(),
        Finish::new(
            "branchFilter",
            |o| wire::join_list(&o.branch_filter, LF),
            |o, v| wire::store_list(&mut o.branch_filter, v, LF),
        )
        .optional(),
    ];
}

/// `schedulingTrigger` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTriggerOptions {
    pub policy: SchedulePolicy,
    pub hour: u8,
    pub minute: u8,
    pub timezone: String,
    /// Only sent for weekly schedules.
    pub day_of_week: Weekday,
    pub branch_filter: Vec<String>,
    pub pending_changes_only: bool,
    pub enforce_clean_checkout: bool,
    pub enforce_clean_checkout_for_dependencies: bool,
    pub on_all_compatible_agents: bool,
    pub promote_watched_build: bool,
    pub revision_rule: String,
}

impl Default for ScheduleTriggerOptions {
    fn default() -> Self {
        Self {
            policy: SchedulePolicy::Daily,
            hour: 0,
            minute: 0,
            timezone: "SERVER".to_string(),
            day_of_week: Weekday::Sunday,
            branch_filter: Vec::new(),
            pending_changes_only: false,
            enforce_clean_checkout: false,
            enforce_clean_checkout_for_dependencies: false,
            on_all_compatible_agents: false,
            promote_watched_build: true,
            revision_rule: "lastFinished".to_string(),
        }
    }
}

impl ScheduleTriggerOptions {
    pub fn daily(hour: u8, minute: u8) -> Self {
        Self {
            hour,
            minute,
            ..Default::default()
        }
    }

    pub fn weekly(day: Weekday, hour: u8, minute: u8) -> Self {
        Self {
            policy: SchedulePolicy::Weekly,
            day_of_week: day,
            hour,
            minute,
            ..Default::default()
        }
    }
}

impl Discriminated for ScheduleTriggerOptions {
    const TYPE: &'static str = "schedulingTrigger";
}

type Schedule = Field<ScheduleTriggerOptions>;

impl PropertyModel for ScheduleTriggerOptions {
    const FIELDS: &'static [Field<Self>] = &[
        Schedule::new(
            "schedulingPolicy",
            |o| o.policy.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.policy, v),
        ),
        Schedule::new("hour", |o| o.hour.to_string(), |o, v| wire::store_int(&mut o.hour, v))
            .default("0")
            .force(),
        Schedule::new(
            "minute",
            |o| o.minute.to_string(),
            |o, v| wire::store_int(&mut o.minute, v),
        )
        .default("0")
        .force(),
        Schedule::new(
            "timezone",
            |o| o.timezone.clone(),
            |o, v| wire::store_str(&mut o.timezone, v),
        )
        .default("SERVER")
        .force(),
        Schedule::new(
            "dayOfWeek",
            |o| match o.policy {
                SchedulePolicy::Weekly => o.day_of_week.as_wire().to_string(),
                SchedulePolicy::Daily => String::new(),
            },
            |o, v| wire::store_enum(&mut o.day_of_week, v),
        )
        .default("Sunday")
        .omit_if_empty(),
        Schedule::new(
            "branchFilter",
            |o| wire::join_list(&o.branch_filter, LF),
            |o, v| wire::store_list(&mut o.branch_filter, v, LF),
        )
        .optional(),
        Schedule::new(
            "triggerBuildWithPendingChangesOnly",
            |o| wire::bool_str(o.pending_changes_only),
            |o, v| wire::store_bool(&mut o.pending_changes_only, v),
        )
        .default("false"),
        Schedule::new(
            "enforceCleanCheckout",
            |o| wire::bool_str(o.enforce_clean_checkout),
            |o, v| wire::store_bool(&mut o.enforce_clean_checkout, v),
        )
        .default("false"),
        Schedule::new(
            "enforceCleanCheckoutForDependencies",
            |o| wire::bool_str(o.enforce_clean_checkout_for_dependencies),
            |o, v| wire::store_bool(&mut o.enforce_clean_checkout_for_dependencies, v),
        )
        .default("false"),
        Schedule::new(
            "triggerBuildOnAllCompatibleAgents",
            |o| wire::bool_str(o.on_all_compatible_agents),
            |o, v| wire::store_bool(&mut o.on_all_compatible_agents, v),
        )
        .default("false"),
        Schedule::new(
            "promoteWatchedBuild",
            |o| wire::bool_str(o.promote_watched_build),
            |o, v| wire::store_bool(&mut o.promote_watched_build, v),
        )
        .default("true")
        .force(),
        Schedule::new(
            "revisionRule",
            |o| o.revision_rule.clone(),
            |o, v| wire::store_str(&mut o.revision_rule, v),
        )
        .default("lastFinished")
        .force(),
    ];
}

/// A build trigger of any type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Trigger {
    Vcs(Resource<VcsTriggerOptions>),
    FinishBuild(Resource<FinishBuildTriggerOptions>),
    Schedule(Resource<ScheduleTriggerOptions>),
    Generic(GenericResource),
}

impl Trigger {
    /// Item key of the `triggers` collection.
    pub const ITEM: &'static str = "trigger";
}

impl Polymorphic for Trigger {
    fn from_envelope(envelope: Envelope) -> Result<Self> {
        let kind = envelope.kind.clone();
        Ok(match kind.as_str() {
            VcsTriggerOptions::TYPE => Self::Vcs(Resource::from_envelope(envelope)?),
            FinishBuildTriggerOptions::TYPE => Self::FinishBuild(Resource::from_envelope(envelope)?),
            ScheduleTriggerOptions::TYPE => Self::Schedule(Resource::from_envelope(envelope)?),
            _ => Self::Generic(GenericResource::fallback(envelope)),
        })
    }

    fn from_document(document: Document) -> Result<Self> {
        if !document.is_typed() {
            return Self::from_envelope(document.into_envelope()?);
        }
        let kind = document.kind().to_string();
        Ok(match kind.as_str() {
            VcsTriggerOptions::TYPE => Self::Vcs(document.typed()?),
            FinishBuildTriggerOptions::TYPE => Self::FinishBuild(document.typed()?),
            ScheduleTriggerOptions::TYPE => Self::Schedule(document.typed()?),
            _ => return Err(document.unknown_options()),
        })
    }

    fn to_envelope(&self) -> Envelope {
        match self {
            Self::Vcs(r) => r.to_envelope(),
            Self::FinishBuild(r) => r.to_envelope(),
            Self::Schedule(r) => r.to_envelope(),
            Self::Generic(g) => g.envelope().clone(),
        }
    }

    fn discriminator(&self) -> &str {
        match self {
            Self::Vcs(r) => r.discriminator(),
            Self::FinishBuild(r) => r.discriminator(),
            Self::Schedule(r) => r.discriminator(),
            Self::Generic(g) => g.discriminator(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::Vcs(r) => r.id.as_deref(),
            Self::FinishBuild(r) => r.id.as_deref(),
            Self::Schedule(r) => r.id.as_deref(),
            Self::Generic(g) => g.id(),
        }
    }

    fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}
