use property_tools::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

const BIN: &str = "property-tools";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("PROPTOOLS_SERVER__PORT");
        env::remove_var("PROPTOOLS_SERVER__CORS_PERMISSIVE");
        env::remove_var("PROPTOOLS_LOGGING__JSON");
        env::remove_var("PROPTOOLS_TOOLS__EXPANDABLE_TITLES");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("BIND_HOST");
        env::remove_var("LOG_JSON");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("defaults should load");
    assert_eq!(config.server.port, 8888);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.server.cors_permissive);
    assert!(!config.logging.json);
    assert_eq!(
        config.tools.expandable_titles,
        ["Projects Data", "Property Types"]
    );
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("PROPTOOLS_SERVER__PORT", "9090");
        env::set_var("PROPTOOLS_SERVER__CORS_PERMISSIVE", "false");
        env::set_var("PROPTOOLS_TOOLS__EXPANDABLE_TITLES", "Projects Data,Children");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert!(!config.server.cors_permissive);
    assert_eq!(config.tools.expandable_titles, ["Projects Data", "Children"]);

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_single_underscore_after_prefix() {
    clear_env_vars();
    unsafe {
        env::set_var("PROPTOOLS_LOGGING__JSON", "true");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert!(config.logging.json);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("settings.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
logging:
  json: true
    "#,
    )
    .expect("Failed to write temp config");

    let path = file_path.to_str().unwrap();
    let config =
        AppConfig::load_from_args([BIN, "--config", path]).expect("Failed to load config file");
    assert_eq!(config.server.port, 7070);
    assert!(config.logging.json);
    // Untouched keys keep their defaults.
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_cli_beats_env_and_file() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("tempdir");
    let file_path = dir.path().join("settings.yaml");
    fs::write(&file_path, "server:\n  port: 7070\n").expect("Failed to write temp config");

    unsafe {
        env::set_var("PROPTOOLS_SERVER__PORT", "9090");
    }

    let path = file_path.to_str().unwrap();
    let config = AppConfig::load_from_args([BIN, "--config", path, "--port", "6060"])
        .expect("Failed to load config");
    assert_eq!(config.server.port, 6060);
    assert_eq!(config.bind_address(), "0.0.0.0:6060");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--config", "/definitely/not/here.yaml"]);
    assert!(result.is_err());
}
