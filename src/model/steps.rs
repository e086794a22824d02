//
//  teamcity-cli
//  model/steps.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build steps.
//!
//! # Step Types
//!
//! * `simpleRunner` - command line, either a custom script or an executable
//! * `jetbrains_powershell` - PowerShell, inline code or a script file
//! * `dotnet` - .NET CLI command
//!
//! Any other runner type decodes to [`Step::Generic`].

use serde::{Deserialize, Serialize};

use crate::codec::wire::{self, wire_enum, WireEnum, LF};
use crate::codec::{
    Discriminated, Document, Envelope, Field, GenericResource, Polymorphic, PropertyModel, Resource,
    Result,
};

/// Property holding a step's execution policy, shared by every runner.
pub const STEP_MODE_PROPERTY: &str = "teamcity.step.mode";

wire_enum! {
    /// When a step runs relative to the outcome of earlier steps.
    pub enum StepMode {
        Default => "default",
        IfSuccessful => "execute_if_success",
        IfFailed => "execute_if_failed",
        Always => "execute_always",
    }
    default = Default;
}

wire_enum! {
    pub enum PowerShellBitness {
        X86 => "x86",
        X64 => "x64",
    }
    default = X64;
}

wire_enum! {
    /// Where a PowerShell step takes its script from.
    pub enum ScriptMode {
        File => "FILE",
        Code => "CODE",
    }
    default = File;
}

wire_enum! {
    pub enum DotNetCommand {
        Build => "build",
        Test => "test",
        Pack => "pack",
        Publish => "publish",
        Restore => "restore",
        Run => "run",
        Custom => "custom",
    }
    default = Build;
}

/// `simpleRunner`: a shell script or an executable with arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandLineStep {
    /// Runs `script` when set, `executable` otherwise.
    pub use_custom_script: bool,
    pub script: String,
    pub executable: String,
    pub parameters: String,
    pub working_dir: String,
    pub mode: StepMode,
}

impl CommandLineStep {
    pub fn script(script: impl Into<String>) -> Self {
        Self {
            use_custom_script: true,
            script: script.into(),
            ..Default::default()
        }
    }

    pub fn executable(executable: impl Into<String>, parameters: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            parameters: parameters.into(),
            ..Default::default()
        }
    }
}

impl Discriminated for CommandLineStep {
    const TYPE: &'static str = "simpleRunner";
}

type Cmd = Field<CommandLineStep>;

impl PropertyModel for CommandLineStep {
    const FIELDS: &'static [Field<Self>] = &[
        Cmd::new(
            "script.content",
            |o| o.script.clone(),
            |o, v| wire::store_str(&mut o.script, v),
        )
        .optional(),
        Cmd::new(
            "use.custom.script",
            |o| wire::bool_str(o.use_custom_script),
            |o, v| wire::store_bool(&mut o.use_custom_script, v),
        )
        .default("false"),
        Cmd::new(
            "command.executable",
            |o| o.executable.clone(),
            |o, v| wire::store_str(&mut o.executable, v),
        )
        .optional(),
        Cmd::new(
            "command.parameters",
            |o| o.parameters.clone(),
            |o, v| wire::store_str(&mut o.parameters, v),
        )
        .optional(),
        Cmd::new(
            "teamcity.build.workingDir",
            |o| o.working_dir.clone(),
            |o, v| wire::store_str(&mut o.working_dir, v),
        )
        .optional(),
        Cmd::new(
            STEP_MODE_PROPERTY,
            |o| o.mode.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.mode, v),
        )
        .default("default")
        .force(),
    ];
}

/// `jetbrains_powershell`: inline code or a `.ps1` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerShellStep {
    pub script_mode: ScriptMode,
    pub code: String,
    pub script_file: String,
    pub arguments: String,
    pub bitness: PowerShellBitness,
    pub no_profile: bool,
    pub mode: StepMode,
}

impl Default for PowerShellStep {
    fn default() -> Self {
        Self {
            script_mode: ScriptMode::File,
            code: String::new(),
            script_file: String::new(),
            arguments: String::new(),
            bitness: PowerShellBitness::X64,
            no_profile: true,
            mode: StepMode::Default,
        }
    }
}

impl PowerShellStep {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            script_mode: ScriptMode::Code,
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            script_file: path.into(),
            ..Default::default()
        }
    }
}

impl Discriminated for PowerShellStep {
    const TYPE: &'static str = "jetbrains_powershell";
}

type Ps = Field<PowerShellStep>;

impl PropertyModel for PowerShellStep {
    const FIELDS: &'static [Field<Self>] = &[
        Ps::new(
            "jetbrains_powershell_script_mode",
            |o| o.script_mode.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.script_mode, v),
        )
        .default("FILE")
        .force(),
        Ps::new(
            "jetbrains_powershell_script_code",
            |o| o.code.clone(),
            |o, v| wire::store_str(&mut o.code, v),
        )
        .optional(),
        Ps::new(
            "jetbrains_powershell_script_file",
            |o| o.script_file.clone(),
            |o, v| wire::store_str(&mut o.script_file, v),
        )
        .optional(),
        Ps::new(
            "jetbrains_powershell_scriptArguments",
            |o| o.arguments.clone(),
            |o, v| wire::store_str(&mut o.arguments, v),
        )
        .optional(),
        Ps::new(
            "jetbrains_powershell_bitness",
            |o| o.bitness.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.bitness, v),
        )
        .default("x64")
        .force(),
        Ps::new(
            "jetbrains_powershell_execution",
            |_| "PS1".to_string(),
            |_, v| wire::derived(v),
        )
        .default("PS1")
        .force(),
        Ps::new(
            "jetbrains_powershell_noprofile",
            |o| wire::bool_str(o.no_profile),
            |o, v| wire::store_bool(&mut o.no_profile, v),
        )
        .default("true")
        .force(),
        Ps::new(
            STEP_MODE_PROPERTY,
            |o| o.mode.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.mode, v),
        )
        .default("default")
        .force(),
    ];
}

/// `dotnet`: a .NET CLI command over one or more project paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotNetStep {
    pub command: DotNetCommand,
    pub paths: Vec<String>,
    pub args: String,
    pub configuration: String,
    pub verbosity: String,
    pub mode: StepMode,
}

impl Discriminated for DotNetStep {
    const TYPE: &'static str = "dotnet";
}

type Net = Field<DotNetStep>;

impl PropertyModel for DotNetStep {
    const FIELDS: &'static [Field<Self>] = &[
        Net::new(
            "command",
            |o| o.command.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.command, v),
        ),
        Net::new(
            "paths",
            |o| wire::join_list(&o.paths, LF),
            |o, v| wire::store_list(&mut o.paths, v, LF),
        )
        .optional(),
        Net::new("args", |o| o.args.clone(), |o, v| wire::store_str(&mut o.args, v)).optional(),
        Net::new(
            "configuration",
            |o| o.configuration.clone(),
            |o, v| wire::store_str(&mut o.configuration, v),
        )
        .optional(),
        Net::new(
            "verbosity",
            |o| o.verbosity.clone(),
            |o, v| wire::store_str(&mut o.verbosity, v),
        )
        .optional(),
        Net::new(
            STEP_MODE_PROPERTY,
            |o| o.mode.as_wire().to_string(),
            |o, v| wire::store_enum(&mut o.mode, v),
        )
        .default("default")
        .force(),
    ];
}

/// A build step of any runner type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Step {
    CommandLine(Resource<CommandLineStep>),
    PowerShell(Resource<PowerShellStep>),
    DotNet(Resource<DotNetStep>),
    Generic(GenericResource),
}

impl Step {
    /// Item key of the `steps` collection.
    pub const ITEM: &'static str = "step";

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::CommandLine(r) => r.name.as_deref(),
            Self::PowerShell(r) => r.name.as_deref(),
            Self::DotNet(r) => r.name.as_deref(),
            Self::Generic(g) => g.envelope().name.as_deref(),
        }
    }
}

impl Polymorphic for Step {
    fn from_envelope(envelope: Envelope) -> Result<Self> {
        let kind = envelope.kind.clone();
        Ok(match kind.as_str() {
            CommandLineStep::TYPE => Self::CommandLine(Resource::from_envelope(envelope)?),
            PowerShellStep::TYPE => Self::PowerShell(Resource::from_envelope(envelope)?),
            DotNetStep::TYPE => Self::DotNet(Resource::from_envelope(envelope)?),
            _ => Self::Generic(GenericResource::fallback(envelope)),
        })
    }

    fn from_document(document: Document) -> Result<Self> {
        if !document.is_typed() {
            return Self::from_envelope(document.into_envelope()?);
        }
        let kind = document.kind().to_string();
        Ok(match kind.as_str() {
            CommandLineStep::TYPE => Self::CommandLine(document.typed()?),
            PowerShellStep::TYPE => Self::PowerShell(document.typed()?),
            DotNetStep::TYPE => Self::DotNet(document.typed()?),
            _ => return Err(document.unknown_options()),
        })
    }

    fn to_envelope(&self) -> Envelope {
        match self {
            Self::CommandLine(r) => r.to_envelope(),
            Self::PowerShell(r) => r.to_envelope(),
            Self::DotNet(r) => r.to_envelope(),
            Self::Generic(g) => g.envelope().clone(),
        }
    }

    fn discriminator(&self) -> &str {
        match self {
            Self::CommandLine(r) => r.discriminator(),
            Self::PowerShell(r) => r.discriminator(),
            Self::DotNet(r) => r.discriminator(),
            Self::Generic(g) => g.discriminator(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::CommandLine(r) => r.id.as_deref(),
            Self::PowerShell(r) => r.id.as_deref(),
            Self::DotNet(r) => r.id.as_deref(),
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
    fn test_command_line_script() {
        let step = CommandLineStep::script("make test");
        let bag = step.to_properties();
        assert_eq!(bag.get("use.custom.script"), Some("true"));
        assert_eq!(bag.get("script.content"), Some("make test"));
        assert_eq!(bag.get(STEP_MODE_PROPERTY), Some("default"));
        assert!(!bag.contains("command.executable"));
        assert_eq!(CommandLineStep::from_properties(&bag).unwrap(), step);
    }

    #[test]
    fn test_command_line_executable() {
        let step = CommandLineStep::executable("./gradlew", "build --info");
        let bag = step.to_properties();
        assert!(!bag.contains("use.custom.script"));
        assert_eq!(bag.get("command.parameters"), Some("build --info"));
        assert_eq!(CommandLineStep::from_properties(&bag).unwrap(), step);
    }

    #[test]
    fn test_powershell_mode_follows_content() {
        let bag = PowerShellStep::code("Write-Host hi").to_properties();
        assert_eq!(bag.get("jetbrains_powershell_script_mode"), Some("CODE"));
        assert_eq!(bag.get("jetbrains_powershell_execution"), Some("PS1"));

        let bag = PowerShellStep::file("build.ps1").to_properties();
        assert_eq!(bag.get("jetbrains_powershell_script_mode"), Some("FILE"));
        assert_eq!(
            PowerShellStep::from_properties(&bag).unwrap(),
            PowerShellStep::file("build.ps1")
        );
    }

    #[test]
    fn test_powershell_file_mode_ignores_stale_code() {
        let mut bag = PropertyBag::new();
        bag.set("jetbrains_powershell_script_mode", "FILE");
        bag.set("jetbrains_powershell_script_file", "a.ps1");
        bag.set("jetbrains_powershell_script_code", "echo");

        let step = PowerShellStep::from_properties(&bag).unwrap();
        assert_eq!(step.script_mode, ScriptMode::File);
        assert_eq!(step.code, "echo");

        let bag = step.to_properties();
        assert_eq!(bag.get("jetbrains_powershell_script_mode"), Some("FILE"));
        assert_eq!(bag.get("jetbrains_powershell_script_code"), Some("echo"));
    }

    #[test]
    fn test_powershell_rejects_unknown_mode() {
        let mut bag = PropertyBag::new();
        bag.set("jetbrains_powershell_script_mode", "INLINE");
        let err = PowerShellStep::from_properties(&bag).unwrap_err();
        assert!(
            matches!(err, CodecError::InvalidValue { ref name, .. } if name == "jetbrains_powershell_script_mode")
        );
    }

    #[test]
    fn test_command_line_executable_keeps_stale_script() {
        let mut bag = PropertyBag::new();
        bag.set("use.custom.script", "false");
        bag.set("command.executable", "./gradlew");
        bag.set("script.content", "make");

        let step = CommandLineStep::from_properties(&bag).unwrap();
        assert!(!step.use_custom_script);
        assert_eq!(step.script, "make");
        assert!(!step.to_properties().contains("use.custom.script"));
    }

    #[test]
    fn test_dotnet_requires_command() {
        let err = DotNetStep::from_properties(&PropertyBag::new()).unwrap_err();
        assert!(matches!(err, CodecError::MissingProperty { ref name } if name == "command"));
    }

    #[test]
    fn test_dispatch_known_and_unknown() {
        let step = Resource::new(DotNetStep {
            command: DotNetCommand::Test,
            paths: vec!["a.csproj".to_string(), "b.csproj".to_string()],
            ..Default::default()
        })
        .with_id("RUNNER_2")
        .with_name("Tests");
        let envelope = step.to_envelope();
        assert_eq!(envelope.kind, "dotnet");
        assert_eq!(envelope.properties.get("paths"), Some("a.csproj\nb.csproj"));

        let decoded = Step::from_envelope(envelope).unwrap();
        assert_eq!(decoded, Step::DotNet(step));
        assert_eq!(decoded.name(), Some("Tests"));

        let unknown = Envelope::new("Maven2", PropertyBag::new()).with_id("RUNNER_3");
        let decoded = Step::from_envelope(unknown.clone()).unwrap();
        assert!(decoded.is_generic());
        assert_eq!(decoded.discriminator(), "Maven2");
        assert_eq!(decoded.to_envelope(), unknown);
    }

    #[test]
    fn test_disabled_flag_roundtrip() {
        let mut step = Resource::new(CommandLineStep::script("echo"));
        step.disabled = true;
        let envelope = step.to_envelope();
        assert_eq!(envelope.disabled, Some(true));
        match Step::from_envelope(envelope).unwrap() {
            Step::CommandLine(r) => assert!(r.disabled),
            other => panic!("unexpected step: {other:?}"),
        }
    }
}
