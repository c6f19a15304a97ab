use crate::Config;
use crate::tests::{EnvGuard, VALID_SECRET, setup_config_dir, with_valid_secret};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok, some};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::remove("KB_AUTH_TOKEN_SECRET");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert!(config.auth.token_secret.is_none());
    assert_that!(config.auth.identity_ttl_secs, eq(86_400));
    assert_that!(config.auth.state_ttl_secs, eq(86_400));
    assert_that!(config.auth.invite_ttl_secs, eq(3_600));
    assert_that!(config.auth.cookie_secure, eq(false));
    assert_that!(config.limits.max_boards_per_team, eq(3));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_is_created() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let nested = temp.path().join("nested");
    let _dir = EnvGuard::set("KB_CONFIG_DIR", nested.to_str().unwrap());

    // When
    Config::load().unwrap();

    // Then
    assert_that!(nested.is_dir(), eq(true));
}

#[test]
#[serial]
fn given_secret_from_env_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = with_valid_secret();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        format!(
            r#"
              [server]
              port = 9000

              [auth]
              token_secret = "{VALID_SECRET}"
              state_ttl_secs = 60
              cookie_secure = true

              [limits]
              max_boards_per_team = 10

              [logging]
              level = "debug"
          "#
        ),
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9000));
    assert_that!(config.auth.token_secret.as_deref(), some(eq(VALID_SECRET)));
    assert_that!(config.auth.state_ttl_secs, eq(60));
    assert_that!(config.auth.cookie_secure, eq(true));
    assert_that!(config.limits.max_boards_per_team, eq(10));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [server]
              port = 9000
          "#,
    )
    .unwrap();
    let _port = EnvGuard::set("KB_SERVER_PORT", "9100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9100));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_previous_value() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("KB_SERVER_PORT", "not-a-port");
    let _level = EnvGuard::set("KB_LOG_LEVEL", "loud");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_default_config_when_building_paths_then_they_live_in_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("KB_LOG_FILE", "server.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.database_path().unwrap(), temp.path().join("kanban.db"));
    assert_eq!(
        config.log_file_path().unwrap(),
        Some(temp.path().join("log").join("server.log"))
    );
    assert_that!(config.bind_addr(), eq("127.0.0.1:8000"));
}
