use std::sync::Arc;

use liveload_core::demo::builtin_sources;
use liveload_core::{
    CollectingDiagnosticHandler, Container, ImportStyle, LoaderConfig, Scenario, Transcript,
};

fn container_with(config: LoaderConfig) -> Container {
    let transcript = Transcript::new();
    let sources = builtin_sources(&transcript).unwrap();
    Container::with_dependencies(
        config,
        Arc::new(CollectingDiagnosticHandler::new()),
        sources,
        transcript,
    )
}

fn run(container: &Container, scenario: Scenario) -> String {
    container.run_scenario(scenario).unwrap().join("\n")
}

#[test]
fn test_live_binding_transcript() {
    let container = container_with(LoaderConfig::default());

    insta::assert_snapshot!(run(&container, Scenario::LiveBinding), @r###"
    3
    3
    4
    5
    "###);
}

#[test]
fn test_live_binding_transcript_import_style() {
    let mut config = LoaderConfig::default();
    config.loader_options.import_style = ImportStyle::Import;
    let container = container_with(config);

    insta::assert_snapshot!(run(&container, Scenario::LiveBinding), @r###"
    3
    4
    4
    5
    "###);
}

#[test]
fn test_define_property_transcript() {
    let container = container_with(LoaderConfig::default());

    insta::assert_snapshot!(run(&container, Scenario::DefineProperty), @"failure");
}

#[test]
fn test_define_property_transcript_legacy() {
    let mut config = LoaderConfig::default();
    config.loader_options.legacy_define = true;
    let container = container_with(config);

    insta::assert_snapshot!(run(&container, Scenario::DefineProperty), @r###"
    error: TypeError: Cannot redefine property: getDate
    failure
    "###);
}

#[test]
fn test_load_order_transcript() {
    let container = container_with(LoaderConfig::default());

    insta::assert_snapshot!(run(&container, Scenario::LoadOrder), @r###"
    Before require module1
    Module 1 body executed
    After require module1
    Before require module2
    Module 2 body executed
    After require module2
    Module 1 content: { name: 'module1' }
    Module 2 content: { name: 'module2' }
    Before require module1 again
    After require module1 again
    Same module1 record: true
    "###);
}

#[test]
fn test_load_order_twice_never_reruns_bodies() {
    let container = container_with(LoaderConfig::default());
    run(&container, Scenario::LoadOrder);

    let second = container.run_scenario(Scenario::LoadOrder).unwrap();

    assert!(second.iter().all(|line| !line.contains("body executed")));
    assert_eq!(
        container.registry().loaded_specifiers(),
        vec!["1.js".to_string(), "2.js".to_string()]
    );
}

#[test]
fn test_proxy_get_transcript() {
    let container = container_with(LoaderConfig::default());

    insta::assert_snapshot!(run(&container, Scenario::ProxyGet), @"2");
}
