//! Configuration and workbench loading utilities for CLI commands

use anyhow::{Context, Result};
use cytogate_core::config::{CliConfigOverrides, LayeredConfig};
use cytogate_engine::{Workbench, WorkbenchOptions};
use cytogate_store::JsonFileStore;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cytogate.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(config_file: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    let file = match config_file {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
    };
    if let Some(path) = file {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// Load configuration for the global flags of `cli`
pub fn load_cli_config(cli: &Cli) -> Result<LayeredConfig> {
    load_config(
        cli.config.as_deref(),
        CliConfigOverrides { store_path: cli.store.clone(), ..Default::default() },
    )
}

/// Empty workbench backed by the configured session store
pub fn open_workbench(config: &LayeredConfig) -> Workbench {
    Workbench::new(
        Vec::new(),
        Box::new(JsonFileStore::new(&config.store_path.value)),
        WorkbenchOptions::from_config(config),
    )
}

/// Workbench with the saved session `name` loaded
pub fn open_session(config: &LayeredConfig, name: &str) -> Result<Workbench> {
    let mut workbench = open_workbench(config);
    workbench.load_session(name)?;
    tracing::debug!(session = name, store = %config.store_path.value.display(), "Opened session");
    Ok(workbench)
}
