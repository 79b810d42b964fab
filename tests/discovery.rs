//! Integration tests for command discovery.

mod common;

use common::{
    example_context, greet_archive, session_for, temp_dir, write_file, Recorder, RESOURCE,
};
use shellboot::config::DiscoveryPolicy;
use shellboot::discovery::discover_commands;
use shellboot::loader::{build_loading_context, Catalog, LoadingContext};
use shellboot::shell::{Origin, SessionFactory};
use shellboot::BootstrapError;
use std::sync::Arc;

#[test]
fn comment_and_blank_lines_are_skipped() {
    let recorder = Recorder::default();
    let context = example_context(&recorder, "# comment\n\ncom.example.EchoCommand\n");
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let report =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();

    assert_eq!(report.registered, vec!["example:echo"]);
    assert!(report.skipped.is_empty());
    assert_eq!(session.registry().commands().len(), 1);
}

#[test]
fn commented_unknown_names_never_reach_resolution() {
    let recorder = Recorder::default();
    // Under fail-fast any resolution attempt of these names would abort.
    let context = example_context(
        &recorder,
        "#com.example.Missing\n   # com.example.AlsoMissing\n\t\n",
    );
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let report =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();
    assert!(report.registered.is_empty());
}

#[test]
fn registrations_land_in_factory_registry_as_discovered() {
    let recorder = Recorder::default();
    let context = example_context(&recorder, "com.example.EchoCommand\ncom.example.FailCommand\n");
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();

    let entry = factory.registry().get("example:echo").unwrap();
    assert_eq!(entry.origin, Origin::Discovered);
    assert_eq!(entry.class_name, "com.example.EchoCommand");
    assert!(session.registry().get("example:fail").is_some());
    assert!(session.manager().lookup("example:fail").is_some());
    assert!(session.registry().is_empty());
}

#[test]
fn discovery_is_idempotent() {
    let recorder = Recorder::default();
    let context = example_context(&recorder, "com.example.EchoCommand\ncom.example.FailCommand\n");
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let first =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();
    let keys_after_first: Vec<String> = session
        .registry()
        .commands()
        .iter()
        .map(|c| c.key())
        .collect();
    let second =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();
    let keys_after_second: Vec<String> = session
        .registry()
        .commands()
        .iter()
        .map(|c| c.key())
        .collect();

    assert_eq!(first, second);
    assert_eq!(keys_after_first, keys_after_second);
    assert_eq!(factory.registry().len(), 2);
}

#[test]
fn fail_fast_aborts_on_unresolvable_entry() {
    let recorder = Recorder::default();
    let context = example_context(
        &recorder,
        "com.example.EchoCommand\ncom.example.Missing\ncom.example.FailCommand\n",
    );
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let err =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap_err();

    assert!(matches!(
        &err,
        BootstrapError::Unresolvable { class_name, .. } if class_name == "com.example.Missing"
    ));
    // Entries before the bad line were already registered, later ones were not.
    assert!(factory.registry().get("example:echo").is_some());
    assert!(factory.registry().get("example:fail").is_none());
}

#[test]
fn best_effort_skips_and_continues() {
    let recorder = Recorder::default();
    let context = example_context(
        &recorder,
        "com.example.EchoCommand\ncom.example.Missing\ncom.example.FailCommand\n",
    );
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let report =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::BestEffort).unwrap();

    assert_eq!(report.registered, vec!["example:echo", "example:fail"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].class_name, "com.example.Missing");
    assert_eq!(report.skipped[0].origin, "<builtin>");
}

#[test]
fn every_copy_of_the_resource_is_scanned() {
    let dir = temp_dir();
    write_file(dir.path(), "a.cmdpack", &greet_archive("alpha", "demo.Alpha"));
    write_file(dir.path(), "b/b.cmdpack", &greet_archive("beta", "demo.Beta"));
    let system = Arc::new(LoadingContext::system(Catalog::builtin(RESOURCE)));
    let context = build_loading_context(Some(dir.path()), system).unwrap();

    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);
    let report =
        discover_commands(&session, &context, RESOURCE, DiscoveryPolicy::FailFast).unwrap();

    let mut registered = report.registered.clone();
    registered.sort();
    assert_eq!(
        registered,
        vec![
            "alpha:greet",
            "beta:greet",
            "shell:echo",
            "shell:exit",
            "shell:help",
            "shell:set",
        ]
    );
}

#[test]
fn other_resource_names_are_ignored() {
    let recorder = Recorder::default();
    let context = example_context(&recorder, "com.example.EchoCommand\n");
    let factory = SessionFactory::new();
    let (session, _, _) = session_for(&factory);

    let report =
        discover_commands(&session, &context, "custom/commands", DiscoveryPolicy::FailFast)
            .unwrap();
    assert!(report.registered.is_empty());
    assert!(factory.registry().is_empty());
}
