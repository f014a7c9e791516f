//! Integration tests for the crawler
//!
//! These tests use wiremock to serve package and class pages and run the
//! full crawl cycle end-to-end against a temp output directory.

use crate::common::{
    class_page_with_mismatched_row, class_path, empty_index_page, index_page,
    index_page_with_broken_row, index_path, manifest, Harness,
};
use javadoc_harvest::crawler::{Coordinator, CrawlReport, RunMode};
use javadoc_harvest::output::read_package_xml;
use javadoc_harvest::{PackageManifest, PackageStatus};

async fn run(harness: &Harness, manifest: PackageManifest, mode: RunMode) -> (CrawlReport, String) {
    let coordinator =
        Coordinator::new(harness.config(), manifest).expect("Failed to create coordinator");
    let (report, output) = coordinator
        .run_with_output(mode, Vec::new())
        .await
        .expect("Crawl failed");
    (report, String::from_utf8(output).expect("status output is UTF-8"))
}

#[tokio::test]
async fn test_partial_package() {
    let harness = Harness::start().await;
    harness.mount_index("P1", index_page(&["A", "B", "C"])).await;
    harness.mount_class("P1", "A", 0).await;
    harness.mount_status(&class_path("P1", "B"), 500).await;
    harness.mount_class("P1", "C", 0).await;

    let (report, output) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PackageStatus::Partial);
    assert_eq!(outcome.succeeded, Some(2));
    assert_eq!(outcome.total, Some(3));

    let log = std::fs::read_to_string(harness.log_path("P1")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("P1.B:"), "unexpected log line {}", lines[0]);
    assert!(lines[0].contains("500"));

    let document = read_package_xml(&harness.xml_path("P1")).unwrap();
    let names: Vec<&str> = document.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["P1.A", "P1.C"]);
    assert_eq!(document.description.as_deref(), Some("A test package."));

    assert!(report.retry.contains("P1"));
    assert_eq!(
        std::fs::read_to_string(harness.path("pkg_retry")).unwrap(),
        "P1\n"
    );
    assert!(output.contains("PARTIAL"));
}

#[tokio::test]
async fn test_class_order_survives_out_of_order_completion() {
    let harness = Harness::start().await;
    let classes = ["A", "B", "C", "D"];
    harness.mount_index("P1", index_page(&classes)).await;
    harness.mount_class("P1", "A", 400).await;
    harness.mount_class("P1", "B", 250).await;
    harness.mount_class("P1", "C", 100).await;
    harness.mount_class("P1", "D", 0).await;

    let (report, _) = run(&harness, manifest(&["P1"]), RunMode::Full).await;
    assert_eq!(report.outcomes[0].status, PackageStatus::Success);

    let document = read_package_xml(&harness.xml_path("P1")).unwrap();

    let class_names: Vec<&str> = document.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(class_names, vec!["P1.A", "P1.B", "P1.C", "P1.D"]);

    let ids: Vec<usize> = document.classes.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    let owners: Vec<&str> = document
        .methods
        .iter()
        .map(|m| m.class_name.as_str())
        .collect();
    assert_eq!(
        owners,
        vec!["P1.A", "P1.A", "P1.B", "P1.B", "P1.C", "P1.C", "P1.D", "P1.D"]
    );

    let run_method = &document.methods[0];
    assert_eq!(run_method.name, "run");
    assert_eq!(run_method.return_type, None);
    assert_eq!(run_method.parameters.len(), 1);
    assert_eq!(run_method.parameters[0].name, "times");
    assert_eq!(run_method.parameters[0].type_name, "int");

    let constructor = &document.methods[1];
    assert_eq!(constructor.name, "P1.A");
    assert_eq!(constructor.return_type.as_deref(), Some("P1.A"));
    assert!(constructor.parameters.is_empty());

    assert!(!harness.log_path("P1").exists());
    assert!(report.retry.is_empty());
}

#[tokio::test]
async fn test_empty_package() {
    let harness = Harness::start().await;
    harness.mount_index("P1", empty_index_page()).await;

    let (report, output) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    assert_eq!(report.outcomes[0].status, PackageStatus::Empty);
    assert_eq!(report.outcomes[0].total, Some(0));
    assert!(!harness.xml_path("P1").exists());
    assert!(!harness.log_path("P1").exists());
    assert!(report.retry.is_empty());
    assert_eq!(report.summary.empty, 1);
    assert!(output.contains("EMPTY"));
}

#[tokio::test]
async fn test_index_page_failure() {
    let harness = Harness::start().await;
    harness.mount_status(&index_path("P1"), 404).await;

    let (report, output) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PackageStatus::Failure);
    assert_eq!(outcome.succeeded, None);
    assert!(outcome.cause.as_deref().unwrap_or_default().contains("404"));

    assert!(!harness.xml_path("P1").exists());
    assert!(report.retry.contains("P1"));

    let line = output.lines().find(|l| l.contains("FAILURE")).unwrap();
    assert!(line.contains("P1"));
    assert!(line.contains(" - "));
}

#[tokio::test]
async fn test_no_class_succeeds() {
    let harness = Harness::start().await;
    harness.mount_index("P1", index_page(&["A", "B"])).await;
    harness.mount_status(&class_path("P1", "A"), 500).await;
    harness.mount_status(&class_path("P1", "B"), 503).await;

    let (report, _) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PackageStatus::Failure);
    assert_eq!(outcome.succeeded, Some(0));
    assert_eq!(outcome.total, Some(2));

    assert!(!harness.xml_path("P1").exists());
    let log = std::fs::read_to_string(harness.log_path("P1")).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(report.retry.contains("P1"));
}

#[tokio::test]
async fn test_mixed_run_tally() {
    let harness = Harness::start().await;
    harness.mount_package("P1", &["A"]).await;
    harness.mount_index("P2", empty_index_page()).await;
    harness.mount_status(&index_path("P3"), 500).await;
    harness.mount_package("P4", &["A", "B"]).await;

    let (report, output) = run(&harness, manifest(&["P1", "P2", "P3", "P4"]), RunMode::Full).await;

    let packages: Vec<&str> = report.outcomes.iter().map(|o| o.package.as_str()).collect();
    assert_eq!(packages, vec!["P1", "P2", "P3", "P4"]);

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.complete, 2);
    assert_eq!(report.summary.empty, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.retry.packages(), &["P3".to_string()]);

    assert_eq!(output.lines().filter(|l| l.contains("    P")).count(), 4);
    assert!(output
        .lines()
        .last()
        .unwrap()
        .starts_with("total: 4, complete: 2"));
}

#[tokio::test]
async fn test_retry_only_crawls_listed_packages() {
    let harness = Harness::start().await;
    harness.forbid_index("P1").await;
    harness.mount_package("P2", &["A"]).await;
    harness.forbid_index("P3").await;
    std::fs::write(harness.path("pkg_retry"), "P2\n").unwrap();

    let (report, _) = run(&harness, manifest(&["P1", "P2", "P3"]), RunMode::RetryOnly).await;

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].package, "P2");
    assert_eq!(report.outcomes[0].status, PackageStatus::Success);
    assert!(harness.xml_path("P2").exists());
    assert_eq!(
        std::fs::read_to_string(harness.path("pkg_retry")).unwrap(),
        ""
    );
}

#[tokio::test]
async fn test_retry_only_without_retry_manifest_runs_everything() {
    let harness = Harness::start().await;
    for package in ["P1", "P2", "P3"] {
        harness.mount_package(package, &["A"]).await;
    }

    let (report, _) = run(&harness, manifest(&["P1", "P2", "P3"]), RunMode::RetryOnly).await;

    assert_eq!(report.outcomes.len(), 3);
    assert!(report
        .outcomes
        .iter()
        .all(|o| o.status == PackageStatus::Success));
}

#[tokio::test]
async fn test_rerun_replaces_previous_log() {
    let harness = Harness::start().await;
    harness.mount_package("P1", &["A"]).await;
    std::fs::create_dir_all(harness.path("logs")).unwrap();
    std::fs::write(harness.log_path("P1"), "P1.A:HTTP 500\n").unwrap();

    let (report, _) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    assert_eq!(report.outcomes[0].status, PackageStatus::Success);
    assert!(!harness.log_path("P1").exists());
}

#[tokio::test]
async fn test_written_record_counts() {
    let harness = Harness::start().await;
    harness.mount_package("P1", &["A", "B", "C"]).await;

    run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let document = read_package_xml(&harness.xml_path("P1")).unwrap();
    assert_eq!(document.name, "P1");
    assert_eq!(document.classes.len(), 3);
    assert_eq!(document.methods.len(), 6);
    assert_eq!(document.parameter_count(), 3);
    assert_eq!(
        document.classes[1].description.as_deref(),
        Some("The B class.")
    );
}

#[tokio::test]
async fn test_failure_line_printed_when_package_settles() {
    let harness = Harness::start().await;
    harness.mount_index("P1", index_page(&["A"])).await;
    harness.mount_class("P1", "A", 1500).await;
    harness.mount_status(&index_path("P2"), 404).await;

    let (report, output) = run(&harness, manifest(&["P1", "P2"]), RunMode::Full).await;

    assert_eq!(report.outcomes[0].status, PackageStatus::Success);
    assert_eq!(report.outcomes[1].status, PackageStatus::Failure);

    let p1 = output.find("SUCCESS    P1").unwrap();
    let p2 = output.find("FAILURE    P2").unwrap();
    assert!(p2 < p1, "status lines out of completion order:\n{}", output);
}

#[tokio::test]
async fn test_unreadable_class_row_counts_and_is_logged() {
    let harness = Harness::start().await;
    harness.mount_index("P1", index_page_with_broken_row("A")).await;
    harness.mount_class("P1", "A", 0).await;

    let (report, _) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PackageStatus::Partial);
    assert_eq!(outcome.succeeded, Some(1));
    assert_eq!(outcome.total, Some(2));

    assert_eq!(
        std::fs::read_to_string(harness.log_path("P1")).unwrap(),
        "row 2:missing class link\n"
    );

    let document = read_package_xml(&harness.xml_path("P1")).unwrap();
    assert_eq!(document.classes.len(), 1);
    assert_eq!(document.classes[0].name, "P1.A");
    assert!(report.retry.contains("P1"));
}

#[tokio::test]
async fn test_mismatched_signature_row_is_logged_but_class_succeeds() {
    let harness = Harness::start().await;
    harness.mount_index("P1", index_page(&["A"])).await;
    harness
        .mount_class_page("P1", "A", class_page_with_mismatched_row("A"))
        .await;

    let (report, _) = run(&harness, manifest(&["P1"]), RunMode::Full).await;

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.status, PackageStatus::Success);
    assert_eq!(outcome.succeeded, Some(1));

    assert_eq!(
        std::fs::read_to_string(harness.log_path("P1")).unwrap(),
        "P1.A:method row 2: parameter lists disagree: 4 rendered tokens for 1 linked types\n"
    );

    let document = read_package_xml(&harness.xml_path("P1")).unwrap();
    let methods: Vec<&str> = document.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["run", "P1.A"]);
    assert!(report.retry.is_empty());
}
