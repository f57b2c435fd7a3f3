//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

// ===== Test Helpers =====

/// Removes an environment variable when dropped.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        Self(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

// ===== Paths =====

#[test]
fn default_config_path_ends_in_postboard_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("postboard") && path_str.ends_with("config.toml"),
        "unexpected default config path: {path_str}"
    );
}

#[test]
fn default_log_path_ends_with_postboard_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("postboard.log"));
}

// ===== load_config_file =====

#[test]
fn missing_file_is_not_an_error() {
    assert_eq!(load_config_file("/nonexistent/path/to/config.toml"), Ok(None));
}

#[test]
fn parses_every_field() {
    let path = write_temp(
        "postboard_test_full.toml",
        r#"
api_url = "https://blog.example.com/api/v1"
debounce_ms = 250
request_timeout_secs = 15
log_file_path = "/tmp/postboard-test.log"
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(
        config,
        ConfigFile {
            api_url: Some("https://blog.example.com/api/v1".to_string()),
            debounce_ms: Some(250),
            request_timeout_secs: Some(15),
            log_file_path: Some(PathBuf::from("/tmp/postboard-test.log")),
        }
    );
    fs::remove_file(path).ok();
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let path = write_temp("postboard_test_invalid.toml", "this is not valid TOML ][}{");

    match load_config_file(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
    fs::remove_file(path).ok();
}

#[test]
fn unknown_keys_are_rejected() {
    let path = write_temp("postboard_test_unknown.toml", "theme = \"dark\"\n");
    assert!(matches!(
        load_config_file(&path),
        Err(ConfigError::ParseError { .. })
    ));
    fs::remove_file(path).ok();
}

// ===== merge_config =====

#[test]
fn no_file_means_defaults() {
    let resolved = merge_config(None);
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.api_url, DEFAULT_API_URL);
    assert_eq!(resolved.debounce, Duration::from_millis(500));
    assert_eq!(resolved.request_timeout, None);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let resolved = merge_config(Some(ConfigFile {
        debounce_ms: Some(100),
        ..ConfigFile::default()
    }));

    assert_eq!(resolved.debounce, Duration::from_millis(100));
    assert_eq!(resolved.api_url, DEFAULT_API_URL);
    assert_eq!(resolved.log_file_path, default_log_path());
}

#[test]
fn timeout_is_converted_to_seconds() {
    let resolved = merge_config(Some(ConfigFile {
        request_timeout_secs: Some(7),
        ..ConfigFile::default()
    }));
    assert_eq!(resolved.request_timeout, Some(Duration::from_secs(7)));
}

// ===== Env overrides =====

#[test]
#[serial(postboard_api_url)]
fn env_overrides_api_url() {
    let _guard = EnvGuard::new(API_URL_ENV_VAR);
    env::set_var(API_URL_ENV_VAR, "http://env.example/api/v1");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.api_url, "http://env.example/api/v1");
    assert_eq!(result.debounce, ResolvedConfig::default().debounce);
}

#[test]
#[serial(postboard_api_url)]
fn empty_env_value_is_ignored() {
    let _guard = EnvGuard::new(API_URL_ENV_VAR);
    env::set_var(API_URL_ENV_VAR, "  ");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.api_url, DEFAULT_API_URL);
}

#[test]
#[serial(postboard_api_url)]
fn unset_env_changes_nothing() {
    let _guard = EnvGuard::new(API_URL_ENV_VAR);
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

// ===== CLI overrides =====

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        api_url: "http://file.example".to_string(),
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(base, Some("http://cli.example".to_string()), Some(50));

    assert_eq!(result.api_url, "http://cli.example");
    assert_eq!(result.debounce, Duration::from_millis(50));
}

#[test]
fn absent_cli_flags_change_nothing() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None), base);
}

// ===== Precedence =====

#[test]
#[serial(postboard_config)]
fn explicit_path_beats_env_var() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit = write_temp("postboard_explicit.toml", "api_url = \"http://explicit\"\n");
    let from_env = write_temp("postboard_env.toml", "api_url = \"http://env\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();

    assert_eq!(config.api_url.as_deref(), Some("http://explicit"));
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(postboard_config)]
fn env_var_used_without_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let from_env = write_temp("postboard_env_only.toml", "debounce_ms = 42\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();

    assert_eq!(config.debounce_ms, Some(42));
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(postboard_config)]
fn env_var_pointing_nowhere_yields_none() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/postboard/config.toml");

    assert_eq!(load_config_with_precedence(None), Ok(None));
}
