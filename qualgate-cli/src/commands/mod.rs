//! Command handlers -- one module per subcommand

pub mod admit;
pub mod check;
pub mod config;
pub mod qualify;

use std::path::Path;

use tracing::info;

use qualgate_admission::{AlwaysQualifyImages, AlwaysQualifyImagesConfig, Domain};
use qualgate_core::config::QualgateConfig;
use qualgate_core::plugin::AdmissionChain;

use crate::error::CliError;

/// Load the effective configuration.
///
/// With a path: file + env overrides + validation. Without: defaults + env overrides + validation.
pub async fn load_config(path: Option<&Path>) -> Result<QualgateConfig, CliError> {
    match path {
        Some(path) => Ok(QualgateConfig::load(path).await?),
        None => {
            let mut config = QualgateConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Human-readable label for where the configuration came from.
pub fn config_source(path: Option<&Path>) -> String {
    path.map_or_else(|| "(defaults)".to_owned(), |p| p.display().to_string())
}

/// Engine state built once at startup and shared by `check`, `qualify` and `admit`.
///
/// Construction validates the domain; failure is a configuration error (exit code 2).
#[derive(Debug, Clone)]
pub struct Engine {
    plugin: AlwaysQualifyImages,
}

impl Engine {
    /// Build the engine from the `[admission]` section.
    pub fn from_config(config: &QualgateConfig) -> Result<Self, CliError> {
        let plugin_config = AlwaysQualifyImagesConfig::from_core(&config.admission)?;
        let plugin = AlwaysQualifyImages::from_config(&plugin_config)?;
        info!(domain = %plugin.domain(), "engine ready");
        Ok(Self { plugin })
    }

    /// The validated registry domain.
    pub fn domain(&self) -> &Domain {
        self.plugin.domain()
    }

    /// Build an admission chain holding the image qualifier.
    pub fn chain(&self) -> Result<AdmissionChain, CliError> {
        let mut chain = AdmissionChain::new();
        chain.register(Box::new(self.plugin.clone()))?;
        Ok(chain)
    }
}
