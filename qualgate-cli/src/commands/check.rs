//! `qualgate check` command handler

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use qualgate_admission::{has_domain, qualify_image};
use qualgate_reference::{parse_image_name, split_image_name};

use crate::cli::CheckArgs;
use crate::commands::Engine;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `check` command.
///
/// Every image is reported; the command fails if any of them is invalid.
pub fn execute(args: CheckArgs, engine: &Engine, writer: &OutputWriter) -> Result<(), CliError> {
    let images: Vec<ImageCheck> = args
        .images
        .iter()
        .map(|image| inspect(image, engine))
        .collect();

    let invalid = images.iter().filter(|c| !c.valid).count();
    let report = CheckReport {
        domain: engine.domain().to_string(),
        images,
    };
    writer.render(&report)?;

    if invalid > 0 {
        return Err(CliError::Command(format!(
            "{invalid} of {} image references are invalid",
            report.images.len()
        )));
    }
    Ok(())
}

fn inspect(image: &str, engine: &Engine) -> ImageCheck {
    let mut check = ImageCheck {
        image: image.to_owned(),
        valid: false,
        domain: String::new(),
        remainder: String::new(),
        has_domain: has_domain(image),
        repository: None,
        tag: None,
        digest: None,
        qualified: None,
        error: None,
    };

    match split_image_name(image) {
        Ok((domain, remainder)) => {
            check.domain = domain.to_owned();
            check.remainder = remainder.to_owned();
        }
        Err(e) => {
            debug!(image, error = %e, "image reference rejected");
            check.error = Some(e.to_string());
            return check;
        }
    }

    match parse_image_name(image) {
        Ok(parsed) => {
            check.repository = Some(parsed.repository);
            check.tag = Some(parsed.tag).filter(|t| !t.is_empty());
            check.digest = Some(parsed.digest).filter(|d| !d.is_empty());
        }
        Err(e) => {
            check.error = Some(e.to_string());
            return check;
        }
    }

    match qualify_image(engine.domain(), image) {
        Ok(qualified) => {
            check.qualified = qualified;
            check.valid = true;
        }
        Err(e) => check.error = Some(e.to_string()),
    }
    check
}

/// Result of inspecting a single image reference.
#[derive(Debug, Serialize)]
pub struct ImageCheck {
    pub image: String,
    pub valid: bool,
    /// Domain component (empty when the reference has none)
    pub domain: String,
    pub remainder: String,
    pub has_domain: bool,
    /// Normalized repository (`docker.io/library/...` for bare names)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Qualified form under the configured domain (None when unchanged)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report for the `check` command.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub domain: String,
    pub images: Vec<ImageCheck>,
}

impl Render for CheckReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Image Check (domain: {})", self.domain.bold())?;
        writeln!(w)?;

        for check in &self.images {
            if !check.valid {
                writeln!(w, "  {} {}", "INVALID".red().bold(), check.image)?;
                if let Some(ref error) = check.error {
                    writeln!(w, "    Error: {}", error.red())?;
                }
                continue;
            }

            writeln!(w, "  {} {}", "VALID".green().bold(), check.image)?;
            let domain = if check.domain.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                check.domain.clone()
            };
            writeln!(w, "    Domain:     {domain}")?;
            writeln!(w, "    Remainder:  {}", check.remainder)?;
            if let Some(ref repository) = check.repository {
                writeln!(w, "    Repository: {repository}")?;
            }
            if let Some(ref tag) = check.tag {
                writeln!(w, "    Tag:        {tag}")?;
            }
            if let Some(ref digest) = check.digest {
                writeln!(w, "    Digest:     {digest}")?;
            }
            match check.qualified {
                Some(ref qualified) => writeln!(w, "    Qualified:  {}", qualified.cyan())?,
                None => writeln!(w, "    Qualified:  {}", "(unchanged)".dimmed())?,
            }
        }

        Ok(())
    }
}
