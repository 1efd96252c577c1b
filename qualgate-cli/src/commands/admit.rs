//! `qualgate admit` command handler
//!
//! Reads a manifest, wraps it in an admission request and runs it through the chain.
//! The (possibly mutated) object is reported back together with the image changes.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use qualgate_core::admission::{
    AdmissionObject, AttributesRecord, GroupVersionResource, Operation, StatusError,
};

use crate::cli::AdmitArgs;
use crate::commands::Engine;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// API version used for resources given on the command line.
const RESOURCE_VERSION: &str = "v1";

/// Execute the `admit` command.
///
/// A rejection is rendered like any other outcome, then returned as `CliError::Rejected`.
pub async fn execute(args: AdmitArgs, engine: &Engine, writer: &OutputWriter) -> Result<(), CliError> {
    let manifest = read_manifest(&args.file).await?;
    let report = admit_manifest(&manifest, &args, engine)?;
    writer.render(&report)?;

    match report.status {
        Some(status) => Err(CliError::Rejected(status.message)),
        None => Ok(()),
    }
}

async fn read_manifest(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        return Ok(buffer);
    }

    tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::Command(format!("failed to read manifest '{}': {e}", path.display()))
    })
}

/// Run one manifest through the admission chain and build the report.
pub fn admit_manifest(
    manifest: &str,
    args: &AdmitArgs,
    engine: &Engine,
) -> Result<AdmitReport, CliError> {
    let operation: Operation = args
        .operation
        .parse()
        .map_err(|e: qualgate_core::QualgateError| CliError::Command(e.to_string()))?;
    let resource = parse_resource(&args.resource)?;

    let value: Value = serde_json::from_str(manifest)?;
    let object = AdmissionObject::from_json(value)?;
    let before = container_images(&object);

    let mut attributes = AttributesRecord::new(operation, resource, Some(object))
        .with_subresource(args.subresource.as_str());
    let kind = attributes.kind.kind.clone();
    let namespace = attributes.namespace.clone();
    let name = attributes.name.clone();

    let chain = engine.chain()?;
    let status = match chain.admit(&mut attributes) {
        Ok(()) => {
            info!(%operation, kind = %kind, namespace = %namespace, name = %name, "request admitted");
            None
        }
        Err(status) => {
            warn!(%operation, kind = %kind, reason = %status.message, "request rejected");
            Some(status)
        }
    };

    let resource_label = attributes.resource.group_resource().to_string();
    let object = attributes
        .into_object()
        .ok_or_else(|| CliError::Command("admission request lost its object".to_owned()))?;
    let changes = diff_images(&before, &container_images(&object));

    Ok(AdmitReport {
        allowed: status.is_none(),
        operation,
        resource: resource_label,
        subresource: args.subresource.clone(),
        kind,
        namespace,
        name,
        status,
        changes,
        object: object.to_json()?,
    })
}

/// Parse `resource[.group]` into a resource at [`RESOURCE_VERSION`].
fn parse_resource(input: &str) -> Result<GroupVersionResource, CliError> {
    let (resource, group) = input.split_once('.').unwrap_or((input, ""));
    if resource.is_empty() {
        return Err(CliError::Command(format!(
            "invalid resource '{input}', expected resource[.group]"
        )));
    }

    Ok(GroupVersionResource {
        group: group.to_owned(),
        version: RESOURCE_VERSION.to_owned(),
        resource: resource.to_owned(),
    })
}

/// `(container, image)` pairs in processing order; empty for non-Pod objects.
fn container_images(object: &AdmissionObject) -> Vec<(String, String)> {
    object
        .as_pod()
        .map(|pod| {
            pod.spec
                .init_containers
                .iter()
                .chain(pod.spec.containers.iter())
                .map(|c| (c.name.clone(), c.image.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn diff_images(before: &[(String, String)], after: &[(String, String)]) -> Vec<ImageChange> {
    before
        .iter()
        .zip(after)
        .filter(|((_, from), (_, to))| from != to)
        .map(|((container, from), (_, to))| ImageChange {
            container: container.clone(),
            from: from.clone(),
            to: to.clone(),
        })
        .collect()
}

/// A rewritten container image.
#[derive(Debug, Serialize)]
pub struct ImageChange {
    pub container: String,
    pub from: String,
    pub to: String,
}

/// Report for the `admit` command.
#[derive(Debug, Serialize)]
pub struct AdmitReport {
    pub allowed: bool,
    pub operation: Operation,
    pub resource: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subresource: String,
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Rejection details (None when admitted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusError>,
    /// Images rewritten before the decision, kept even on rejection
    pub changes: Vec<ImageChange>,
    pub object: Value,
}

impl Render for AdmitReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        let target = match (self.namespace.is_empty(), self.name.is_empty()) {
            (false, false) => format!("{} {}/{}", self.kind, self.namespace, self.name),
            (true, false) => format!("{} {}", self.kind, self.name),
            _ => self.kind.clone(),
        };
        writeln!(w, "Admission: {} {} ({})", self.operation, target.bold(), self.resource)?;

        match self.status {
            None => writeln!(w, "  Result: {}", "ALLOWED".green().bold())?,
            Some(ref status) => {
                writeln!(w, "  Result: {} ({})", "REJECTED".red().bold(), status.code())?;
                writeln!(w, "  Reason: {}", status.message.red())?;
            }
        }

        if self.changes.is_empty() {
            writeln!(w, "  Changes: {}", "none".dimmed())?;
        } else {
            writeln!(w, "  Changes:")?;
            for change in &self.changes {
                writeln!(
                    w,
                    "    {}: {} -> {}",
                    change.container,
                    change.from,
                    change.to.cyan()
                )?;
            }
        }

        Ok(())
    }
}
