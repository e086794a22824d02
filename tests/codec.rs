//
//  teamcity-cli
//  tests/codec.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use teamcity_cli::codec::{
    ControlType, Envelope, EnvelopeList, Namespace, Parameter, Parameters, Polymorphic,
    PropertyBag, PropertyModel, Resource, TypeDescriptor,
};
use teamcity_cli::model::{
    ArtifactDependencyOptions, BuildTypeOptions, Dependency, GitVcsRootOptions, Step, Trigger,
    VcsTriggerOptions,
};

#[test]
fn test_parameter_namespaces_in_insertion_order() {
    let parameters: Parameters = [
        Parameter::new(Namespace::Plain, "p", "v1"),
        Parameter::new(Namespace::System, "s", "v2"),
        Parameter::new(Namespace::Environment, "e", "v3"),
    ]
    .into_iter()
    .collect();

    let json = serde_json::to_value(&parameters).unwrap();
    assert_eq!(json["count"], 3);
    let names: Vec<_> = json["property"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["p", "system.s", "env.e"]);

    let decoded: Parameters = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, parameters);
}

#[test]
fn test_password_parameter_carries_descriptor() {
    let ui = TypeDescriptor {
        control_type: Some(ControlType::Password),
        label: "X".to_string(),
        ..Default::default()
    };
    let mut parameters = Parameters::new();
    parameters.add(Parameter::new(Namespace::Environment, "TOKEN", "secret").with_ui(ui.clone()));

    let json = serde_json::to_value(&parameters).unwrap();
    assert_eq!(json["property"][0]["name"], "env.TOKEN");
    assert_eq!(json["property"][0]["type"]["rawValue"], "password label='X'");

    let decoded: Parameters = serde_json::from_value(json).unwrap();
    let token = decoded.get(Namespace::Environment, "TOKEN").unwrap();
    assert_eq!(token.ui, ui);
    assert!(token.ui.is_password());
}

#[test]
fn test_unknown_trigger_keeps_wire_form() {
    let json = r#"{
        "id": "TRIGGER_9",
        "type": "newFutureThing",
        "properties": {
            "count": 2,
            "property": [
                {"name": "x", "value": "1"},
                {"name": "x", "value": "2"}
            ]
        }
    }"#;
    let envelope = Envelope::from_json(json).unwrap();
    let trigger = Trigger::from_envelope(envelope.clone()).unwrap();

    assert!(trigger.is_generic());
    assert_eq!(trigger.discriminator(), "newFutureThing");
    assert_eq!(trigger.id(), Some("TRIGGER_9"));
    assert_eq!(trigger.to_envelope(), envelope);
}

#[test]
fn test_known_trigger_dispatch() {
    let json = r#"{
        "id": "TRIGGER_1",
        "type": "vcsTrigger",
        "properties": {
            "count": 2,
            "property": [
                {"name": "branchFilter", "value": "+:*\n-:pull/*"},
                {"name": "quietPeriodMode", "value": "DO_NOT_USE"}
            ]
        }
    }"#;
    let trigger = Trigger::from_envelope(Envelope::from_json(json).unwrap()).unwrap();
    match &trigger {
        Trigger::Vcs(resource) => {
            assert_eq!(resource.id.as_deref(), Some("TRIGGER_1"));
            assert_eq!(resource.options.branch_filter, vec!["+:*", "-:pull/*"]);
        }
        other => panic!("unexpected variant: {other:?}"),
    }
    assert_eq!(trigger.discriminator(), "vcsTrigger");
}

#[test]
fn test_personal_build_flag_omitted_only_at_default() {
    let options = BuildTypeOptions::default();
    assert!(!options.to_properties().contains("allowPersonalBuildTriggering"));

    let options = BuildTypeOptions {
        allow_personal_build_triggering: false,
        ..Default::default()
    };
    let bag = options.to_properties();
    assert_eq!(bag.get("allowPersonalBuildTriggering"), Some("false"));
    assert_eq!(BuildTypeOptions::from_properties(&bag).unwrap(), options);
}

#[test]
fn test_forced_fields_always_emitted() {
    let bag = BuildTypeOptions::default().to_properties();
    assert_eq!(bag.get("buildConfigurationType"), Some("REGULAR"));
    assert_eq!(bag.get("buildNumberCounter"), Some("1"));
    assert!(!bag.contains("cleanBuild"));
}

#[test]
fn test_list_separators_are_per_field() {
    let mut trigger = VcsTriggerOptions::default();
    trigger.branch_filter = vec!["a".to_string(), "b".to_string()];
    assert_eq!(trigger.to_properties().get("branchFilter"), Some("a\nb"));

    let artifact = ArtifactDependencyOptions::new(vec!["a".to_string(), "b".to_string()]);
    let bag = artifact.to_properties();
    assert_eq!(bag.get("pathRules"), Some("a\r\nb"));
    assert_eq!(
        ArtifactDependencyOptions::from_properties(&bag)
            .unwrap()
            .path_rules,
        vec!["a", "b"]
    );
}

#[test]
fn test_git_root_secure_password() {
    let mut options = GitVcsRootOptions::new("https://example.com/app.git", "refs/heads/main");
    options.password = "hunter2".to_string();
    let bag = options.to_properties();
    let password = bag.get_property("secure:password").unwrap();
    assert!(password.is_secure());
    assert_eq!(GitVcsRootOptions::from_properties(&bag).unwrap(), options);
}

#[test]
fn test_collection_of_mixed_steps() {
    let json = serde_json::json!({
        "count": 2,
        "step": [
            {
                "id": "RUNNER_1",
                "type": "simpleRunner",
                "properties": {"count": 2, "property": [
                    {"name": "script.content", "value": "make"},
                    {"name": "use.custom.script", "value": "true"}
                ]}
            },
            {"id": "RUNNER_2", "type": "kotlinScript", "properties": {"count": 0}}
        ]
    });
    let list = EnvelopeList::from_value(json).unwrap();
    assert_eq!(list.item_key, "step");
    let steps: Vec<Step> = list.decode_all().unwrap();
    assert!(!steps[0].is_generic());
    assert!(steps[1].is_generic());

    let wire = serde_json::to_value(EnvelopeList::encode_all(Step::ITEM, &steps)).unwrap();
    assert_eq!(wire["count"], 2);
    assert_eq!(wire["step"][1]["type"], "kotlinScript");
}

#[test]
fn test_dependency_source_build_type() {
    let dependency = Dependency::Artifact(
        Resource::new(ArtifactDependencyOptions::new(vec!["*.zip => dist".to_string()]))
            .with_id("ARTIFACT_1")
            .with_source("App_Build"),
    );
    let envelope = dependency.to_envelope();
    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["source-buildType"]["id"], "App_Build");
    assert_eq!(
        Dependency::from_envelope(envelope).unwrap().source_build_type(),
        Some("App_Build")
    );
}

#[test]
fn test_descriptor_quote_is_a_known_boundary() {
    let ui = TypeDescriptor {
        label: "it's".to_string(),
        ..Default::default()
    };
    let raw = ui.render().unwrap();
    assert_eq!(raw, "label='it's'");
    assert_eq!(TypeDescriptor::parse(&raw).label, "it");
}

#[test]
fn test_bag_count_tracks_mutations() {
    let mut bag = PropertyBag::new();
    bag.set("a", "1");
    bag.set("b", "2");
    bag.set("a", "3");
    assert_eq!(bag.count(), 2);
    bag.remove("b");
    let json = serde_json::to_value(&bag).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["property"][0]["value"], "3");
}
