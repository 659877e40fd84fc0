use crate::AuthConfig;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};

fn auth(basic: Option<&str>) -> AuthConfig {
    AuthConfig {
        basic: basic.map(str::to_string),
    }
}

#[test]
fn given_no_credentials_when_validate_then_ok_and_disabled() {
    let config = auth(None);

    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.enabled(), eq(false));
}

#[test]
fn given_user_and_password_when_credentials_then_split_on_first_colon() {
    let config = auth(Some("admin:s3:cret"));

    assert_eq!(config.credentials(), Some(("admin", "s3:cret")));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_missing_colon_when_validate_then_error() {
    let config = auth(Some("admin"));

    assert_eq!(config.credentials(), None);
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_empty_user_when_validate_then_error() {
    assert_that!(auth(Some(":password")).validate(), err(anything()));
}

#[test]
fn given_credentials_when_debug_formatted_then_password_hidden() {
    let rendered = format!("{:?}", auth(Some("admin:hunter2")));

    assert!(rendered.contains("admin"));
    assert!(!rendered.contains("hunter2"));
}
