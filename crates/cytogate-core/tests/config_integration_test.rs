//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use cytogate_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn clear_env() {
    for key in [
        "CYTOGATE_CLOSURE_THRESHOLD",
        "CYTOGATE_DYE_DELAY_MS",
        "CYTOGATE_DEFAULT_COLOR",
        "CYTOGATE_STORE_PATH",
    ] {
        env::remove_var(key);
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", contents).unwrap();
    file
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let file = config_file("dye_delay_ms = 250\ndefault_color = \"silver\"");

    env::set_var("CYTOGATE_DYE_DELAY_MS", "10");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.dye_delay_ms.value, 10);
    assert_eq!(config.dye_delay_ms.source, ConfigSource::Environment);
    assert_eq!(config.default_color.value, "silver");
    assert_eq!(config.default_color.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_value_is_ignored() {
    clear_env();
    env::set_var("CYTOGATE_CLOSURE_THRESHOLD", "-5");
    env::set_var("CYTOGATE_DYE_DELAY_MS", "soon");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.closure_threshold.value, 20.0);
    assert_eq!(config.closure_threshold.source, ConfigSource::Default);
    assert_eq!(config.dye_delay_ms.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    let file = config_file("store_path = \"from_file.json\"");
    env::set_var("CYTOGATE_STORE_PATH", "from_env.json");

    let mut config =
        LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        store_path: Some(PathBuf::from("from_cli.json")),
        ..Default::default()
    });

    assert_eq!(config.store_path.value, PathBuf::from("from_cli.json"));
    assert_eq!(config.store_path.source, ConfigSource::Cli);

    clear_env();
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/cytogate.toml");
    assert!(result.is_err());
}
