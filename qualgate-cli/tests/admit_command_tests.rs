//! Integration tests for `qualgate admit` with manifests on disk.

use std::fs;

use tempfile::TempDir;

use qualgate_cli::cli::AdmitArgs;
use qualgate_cli::commands::Engine;
use qualgate_cli::commands::admit::{admit_manifest, execute};
use qualgate_cli::cli::OutputFormat;
use qualgate_cli::error::CliError;
use qualgate_cli::output::OutputWriter;
use qualgate_core::config::QualgateConfig;

fn engine_for(domain: &str) -> Engine {
    let mut config = QualgateConfig::default();
    config.admission.domain = domain.to_owned();
    Engine::from_config(&config).expect("valid domain")
}

fn args(file: std::path::PathBuf) -> AdmitArgs {
    AdmitArgs {
        file,
        operation: "create".to_owned(),
        subresource: String::new(),
        resource: "pods".to_owned(),
    }
}

fn pod_manifest(images: &[(&str, &str)]) -> String {
    let containers: Vec<serde_json::Value> = images
        .iter()
        .map(|(name, image)| serde_json::json!({"name": name, "image": image}))
        .collect();
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {"namespace": "test", "name": "123"},
        "spec": {"containers": containers}
    })
    .to_string()
}

#[tokio::test]
async fn test_admit_file_allowed() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("pod.json");
    fs::write(&path, pod_manifest(&[("ctrl1", "busybox:latest")])).expect("write manifest");

    let writer = OutputWriter::new(OutputFormat::Json);
    execute(args(path), &engine_for("test.io"), &writer)
        .await
        .expect("pod should be admitted");
}

#[tokio::test]
async fn test_admit_file_rejected_exit_code() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("pod.json");
    fs::write(&path, pod_manifest(&[("ctrl1", "Busybox")])).expect("write manifest");

    let writer = OutputWriter::new(OutputFormat::Json);
    let err = execute(args(path), &engine_for("test.io"), &writer)
        .await
        .expect_err("pod should be rejected");

    assert!(matches!(err, CliError::Rejected(_)));
    assert_eq!(err.exit_code(), 5);
    assert!(err.to_string().contains("test.io/Busybox"));
}

#[tokio::test]
async fn test_admit_missing_file() {
    let writer = OutputWriter::new(OutputFormat::Text);
    let err = execute(
        args("/nonexistent/pod.json".into()),
        &engine_for("test.io"),
        &writer,
    )
    .await
    .expect_err("missing manifest should fail");
    assert!(err.to_string().contains("/nonexistent/pod.json"));
}

#[test]
fn test_admit_every_domain_and_repository() {
    let domains = ["test.io", "localhost", "localhost:5000", "a.b.c.d.e.f", "a.b.c.d.e.f:5000"];
    let repos = ["busybox", "busybox:latest", "foo/busybox", "foo/busybox:v1.2.3"];

    for domain in domains {
        let engine = engine_for(domain);
        let images: Vec<(String, String)> = repos
            .iter()
            .enumerate()
            .map(|(i, repo)| (format!("ctrl{}", i + 1), (*repo).to_owned()))
            .collect();
        let pairs: Vec<(&str, &str)> = images
            .iter()
            .map(|(n, i)| (n.as_str(), i.as_str()))
            .collect();

        let report = admit_manifest(&pod_manifest(&pairs), &args("-".into()), &engine)
            .expect("admission should run");

        assert!(report.allowed, "domain {domain} should admit");
        assert_eq!(report.changes.len(), repos.len());
        for (change, repo) in report.changes.iter().zip(repos) {
            assert_eq!(change.to, format!("{domain}/{repo}"));
        }
    }
}

#[test]
fn test_admit_already_qualified_is_unchanged() {
    let manifest = pod_manifest(&[("ctrl1", "test.io/foo/busybox:v1.2.3")]);
    let report = admit_manifest(&manifest, &args("-".into()), &engine_for("localhost"))
        .expect("admission should run");

    assert!(report.allowed);
    assert!(report.changes.is_empty());
    assert_eq!(
        report.object["spec"]["containers"][0]["image"],
        "test.io/foo/busybox:v1.2.3"
    );
}
