//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::application",
            "crate::app::",
            "crate::cli",
            "crate::port",
            "tokio::",
            "tracing::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn application_depends_on_ports_not_adapters() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter", "crate::app::", "crate::cli", "teloxide::"],
    );

    assert!(
        hits.is_empty(),
        "found adapter or outer-layer imports in application layer: {hits:#?}"
    );
}

#[test]
fn ports_do_not_reference_adapters() {
    let hits = find_lines_containing("src/port", &["crate::adapter", "crate::app::", "crate::cli"]);

    assert!(
        hits.is_empty(),
        "found adapter imports in port definitions: {hits:#?}"
    );
}

#[test]
fn core_layers_know_nothing_about_telegram() {
    for dir in ["src/domain", "src/application", "src/port"] {
        let hits = find_lines_containing(dir, &["telegram", "teloxide"]);
        assert!(hits.is_empty(), "telegram referenced in {dir}: {hits:#?}");
    }
}
