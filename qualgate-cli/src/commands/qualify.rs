//! `qualgate qualify` command handler

use std::io::Write;

use serde::Serialize;

use qualgate_admission::qualify_image;

use crate::cli::QualifyArgs;
use crate::commands::Engine;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `qualify` command.
///
/// Fails on the first image that cannot be qualified.
pub fn execute(args: QualifyArgs, engine: &Engine, writer: &OutputWriter) -> Result<(), CliError> {
    let report = qualify_all(&args.images, engine)?;
    writer.render(&report)
}

fn qualify_all(images: &[String], engine: &Engine) -> Result<QualifyReport, CliError> {
    let mut results = Vec::with_capacity(images.len());
    for image in images {
        let qualified = qualify_image(engine.domain(), image)?;
        results.push(QualifiedImage {
            image: image.clone(),
            changed: qualified.is_some(),
            qualified: qualified.unwrap_or_else(|| image.clone()),
        });
    }

    Ok(QualifyReport {
        domain: engine.domain().to_string(),
        images: results,
    })
}

/// A single qualification result.
#[derive(Debug, Serialize)]
pub struct QualifiedImage {
    pub image: String,
    pub qualified: String,
    pub changed: bool,
}

/// Report for the `qualify` command.
#[derive(Debug, Serialize)]
pub struct QualifyReport {
    pub domain: String,
    pub images: Vec<QualifiedImage>,
}

impl Render for QualifyReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for result in &self.images {
            if result.changed {
                writeln!(w, "{} -> {}", result.image, result.qualified.green())?;
            } else {
                writeln!(w, "{} {}", result.image, "(unchanged)".dimmed())?;
            }
        }
        Ok(())
    }
}
