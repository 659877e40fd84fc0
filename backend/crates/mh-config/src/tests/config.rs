use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.cors.origin.as_str(), eq(""));
    assert!(config.auth.basic.is_none());
    assert_that!(config.websocket.send_buffer_size, eq(256));
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();

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
        r#"
            [server]
            port = 9025

            [cors]
            origin = "https://a.com, https://b.com"

            [ui]
            web_path = "mailhub"

            [websocket]
            send_buffer_size = 16
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9025));
    assert_eq!(config.cors.origins(), vec!["https://a.com", "https://b.com"]);
    assert_that!(config.ui.route_prefix().as_str(), eq("/mailhub"));
    assert_that!(config.websocket.send_buffer_size, eq(16));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server]\nport = 9025").unwrap();
    let _port = EnvGuard::set("MH_SERVER_PORT", "8888");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(8888));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let _temp = setup_config_dir();
    let _host = EnvGuard::set("MH_SERVER_HOST", "0.0.0.0");
    let _cors = EnvGuard::set("MH_CORS_ORIGIN", "https://ui.local");
    let _path = EnvGuard::set("MH_UI_WEB_PATH", "hub");
    let _buffer = EnvGuard::set("MH_WS_SEND_BUFFER_SIZE", "32");
    let _colored = EnvGuard::set("MH_LOG_COLORED", "false");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.host.as_str(), eq("0.0.0.0"));
    assert_that!(config.cors.origin.as_str(), eq("https://ui.local"));
    assert_that!(config.ui.web_path.as_str(), eq("hub"));
    assert_that!(config.websocket.send_buffer_size, eq(32));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_default() {
    // Given
    let _temp = setup_config_dir();
    let _buffer = EnvGuard::set("MH_WS_SEND_BUFFER_SIZE", "lots");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.websocket.send_buffer_size, eq(256));
}
