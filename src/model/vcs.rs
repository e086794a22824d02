//
//  teamcity-cli
//  model/vcs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Git VCS root settings.
//!
//! A VCS root travels as `{id, name, vcsName, project, properties}`. Its
//! `vcsName` plays the role of the discriminator; only `jetbrains.git` has a
//! typed representation, other VCS plugins keep their raw properties.
//!
//! # Example
//!
//! ```rust
//! use teamcity_cli::codec::PropertyModel;
//! use teamcity_cli::model::{GitAuthMethod, GitVcsRootOptions};
//!
//! let mut git = GitVcsRootOptions::new("https://github.com/acme/app.git", "refs/heads/main");
//! git.auth_method = GitAuthMethod::Password;
//! git.username = "ci".to_string();
//! git.password = "s3cret".to_string();
//!
//! let bag = git.to_properties();
//! assert_eq!(bag.get("secure:password"), Some("s3cret"));
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum, LF};
use crate::codec::{Discriminated, Field, PropertyBag, PropertyModel, Result};

wire_enum! {
    /// How the agent authenticates against the remote.
    pub enum GitAuthMethod {
        Anonymous => "ANONYMOUS",
        Password => "PASSWORD",
        PrivateKeyDefault => "PRIVATE_KEY_DEFAULT",
        PrivateKeyFile => "PRIVATE_KEY_FILE",
        UploadedKey => "TEAMCITY_SSH_KEY",
    }
    default = Anonymous;
}

wire_enum! {
    /// When the checkout directory is cleaned.
    pub enum AgentCleanPolicy {
        Never => "NEVER",
        Always => "ALWAYS",
        OnBranchChange => "ON_BRANCH_CHANGE",
    }
    default = OnBranchChange;
}

wire_enum! {
    /// Which files a clean removes.
    pub enum AgentCleanFilesPolicy {
        AllUntracked => "ALL_UNTRACKED",
        IgnoredOnly => "IGNORED_ONLY",
        NonIgnoredOnly => "NON_IGNORED_ONLY",
    }
    default = AllUntracked;
}

wire_enum! {
    pub enum SubmoduleCheckout {
        Checkout => "CHECKOUT",
        Ignore => "IGNORE",
    }
    default = Checkout;
}

wire_enum! {
    /// How commit authors are mapped to TeamCity users.
    pub enum UsernameStyle {
        UserId => "USERID",
        Name => "NAME",
        Email => "EMAIL",
        Full => "FULL",
    }
    default = UserId;
}

/// Settings of a `jetbrains.git` VCS root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitVcsRootOptions {
    pub fetch_url: String,
    pub push_url: String,
    pub default_branch: String,
    pub branch_spec: Vec<String>,
    pub auth_method: GitAuthMethod,
    pub username: String,
    pub password: String,
    pub uploaded_key: String,
    pub private_key_path: String,
    pub agent_clean_policy: AgentCleanPolicy,
    pub agent_clean_files_policy: AgentCleanFilesPolicy,
    pub submodule_checkout: SubmoduleCheckout,
    pub username_style: UsernameStyle,
    pub enable_tags_in_branch_spec: bool,
    pub use_mirrors: bool,
    pub ignore_known_hosts: bool,
}

impl Default for GitVcsRootOptions {
    fn default() -> Self {
        Self {
            fetch_url: String::new(),
            push_url: String::new(),
            default_branch: String::new(),
            branch_spec: Vec::new(),
            auth_method: GitAuthMethod::Anonymous,
            username: String::new(),
            password: String::new(),
            uploaded_key: String::new(),
            private_key_path: String::new(),
            agent_clean_policy: AgentCleanPolicy::OnBranchChange,
            agent_clean_files_policy: AgentCleanFilesPolicy::AllUntracked,
            submodule_checkout: SubmoduleCheckout::Checkout,
            username_style: UsernameStyle::UserId,
            enable_tags_in_branch_spec: false,
            use_mirrors: true,
            ignore_known_hosts: true,
        }
    }
}

impl GitVcsRootOptions {
    pub fn new(fetch_url: impl Into<String>, default_branch: impl Into<String>) -> Self {
        Self {
            fetch_url: fetch_url.into(),
            default_branch: default_branch.into(),
            ..Default::default()
        }
    }
}

impl Discriminated for GitVcsRootOptions {
    const TYPE: &'static str = "jetbrains.git";
}

type F = Field<GitVcsRootOptions>;

impl PropertyModel for GitVcsRootOptions {
    const FIELDS: &'static [Field<Self>] = &[
        F::new("url", |o| o.fetch_url.clone(), |o, v| wire::store_str(&mut o.fetch_url, v)),
        F::new("push_url", |o| o.push_url.clone(), |o, v| wire::store_str(&mut o.push_url, v))
            .optional(),
        F::new(
            "branch",
            |o| o.default_branch.clone(),
            |o, v| wire::store_str(&mut o.default_branch, v),
        ),
        F::new(
            "teamcity:branchSpec",
            |o| wire::join_list(&o.branch_spec, LF),
            |o, v| wire::store_list(&mut o.branch_spec, v, LF),
        )
        .optional(),
        F::new(
            "authMethod",
            |o| o.auth_method.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.auth_method, v),
        )
        .default("ANONYMOUS")
        .force(),
        F::new("username", |o| o.username.clone(), |o, v| wire::store_str(&mut o.username, v))
            .optional(),
        F::new(
            "secure:password",
            |o| o.password.clone(),
            |o, v| wire::store_str(&mut o.password, v),
        )
        .optional(),
        F::new(
            "teamcitySshKey",
            |o| o.uploaded_key.clone(),
            |o, v| wire::store_str(&mut o.uploaded_key, v),
        )
        .optional(),
        F::new(
            "privateKeyPath",
            |o| o.private_key_path.clone(),
            |o, v| wire::store_str(&mut o.private_key_path, v),
        )
        .optional(),
        F::new(
            "agentCleanPolicy",
            |o| o.agent_clean_policy.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.agent_clean_policy, v),
        )
        .default("ON_BRANCH_CHANGE")
        .force(),
        F::new(
            "agentCleanFilesPolicy",
            |o| o.agent_clean_files_policy.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.agent_clean_files_policy, v),
        )
        .default("ALL_UNTRACKED")
        .force(),
        F::new(
            "submoduleCheckout",
            |o| o.submodule_checkout.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.submodule_checkout, v),
        )
        .default("CHECKOUT")
        .force(),
        F::new(
            "usernameStyle",
            |o| o.username_style.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.username_style, v),
        )
        .default("USERID")
        .force(),
        F::new(
            "reportTagRevisions",
            |o| wire::bool_str(o.enable_tags_in_branch_spec),
            |o, v| wire::store_bool(&mut o.enable_tags_in_branch_spec, v),
        )
        .default("false"),
        F::new(
            "useAlternates",
            |o| wire::bool_str(o.use_mirrors),
            |o, v| wire::store_bool(&mut o.use_mirrors, v),
        )
        .default("true")
        .force(),
        F::new(
            "ignoreKnownHosts",
            |o| wire::bool_str(o.ignore_known_hosts),
            |o, v| wire::store_bool(&mut o.ignore_known_hosts, v),
        )
        .default("true")
        .force(),
    ];
}

/// Reference to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
}

/// Wire form of a VCS root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsRoot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "vcsName")]
    pub vcs_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub properties: PropertyBag,
}

impl VcsRoot {
    /// Builds a Git root from typed options.
    pub fn git(name: impl Into<String>, project_id: impl Into<String>, options: &GitVcsRootOptions) -> Self {
        Self {
            id: None,
            name: name.into(),
            vcs_name: GitVcsRootOptions::TYPE.to_string(),
            project: Some(ProjectRef {
                id: project_id.into(),
            }),
            properties: options.to_properties(),
        }
    }

    pub fn is_git(&self) -> bool {
        self.vcs_name == GitVcsRootOptions::TYPE
    }

    /// Typed Git settings, or `None` for other VCS plugins.
    pub fn git_options(&self) -> Option<Result<GitVcsRootOptions>> {
        if !self.is_git() {
            tracing::debug!(vcs = %self.vcs_name, "no typed settings for VCS plugin");
            return None;
        }
        Some(GitVcsRootOptions::from_properties(&self.properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;

    #[test]
    fn test_required_url_and_branch() {
        let mut bag = PropertyBag::new();
        bag.set("url", "git@example.com:a/b.git");
        let err = GitVcsRootOptions::from_properties(&bag).unwrap_err();
        assert!(matches!(err, CodecError::MissingProperty { ref name } if name == "branch"));
    }

    #[test]
    fn test_branch_spec_lf() {
        let mut git = GitVcsRootOptions::new("u", "refs/heads/main");
        git.branch_spec = vec!["+:refs/heads/*".to_string(), "-:refs/heads/tmp".to_string()];
        let bag = git.to_properties();
        assert_eq!(
            bag.get("teamcity:branchSpec"),
            Some("+:refs/heads/*\n-:refs/heads/tmp")
        );
        assert_eq!(GitVcsRootOptions::from_properties(&bag).unwrap(), git);
    }

    #[test]
    fn test_secure_password_property() {
        let mut git = GitVcsRootOptions::new("u", "main");
        git.password = "pw".to_string();
        let bag = git.to_properties();
        assert!(bag.get_property("secure:password").unwrap().is_secure());
        assert!(!bag.contains("reportTagRevisions"));
        assert_eq!(bag.get("useAlternates"), Some("true"));
    }

    #[test]
    fn test_vcs_root_wire() {
        let root = VcsRoot::git("App", "Acme", &GitVcsRootOptions::new("u", "main"));
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["vcsName"], "jetbrains.git");
        assert_eq!(json["project"]["id"], "Acme");

        let back: VcsRoot = serde_json::from_value(json).unwrap();
        let git = back.git_options().unwrap().unwrap();
        assert_eq!(git.fetch_url, "u");
    }

    #[test]
    fn test_non_git_root_has_no_options() {
        let root = VcsRoot {
            id: Some("Svn".to_string()),
            name: "svn".to_string(),
            vcs_name: "svn".to_string(),
            project: None,
            properties: PropertyBag::new(),
        };
        assert!(root.git_options().is_none());
    }
}
