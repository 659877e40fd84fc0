use crate::UiConfig;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};

fn ui(web_path: &str) -> UiConfig {
    UiConfig {
        web_path: web_path.to_string(),
    }
}

#[test]
fn given_empty_web_path_when_route_prefix_then_empty() {
    assert_that!(ui("").route_prefix().as_str(), eq(""));
}

#[test]
fn given_bare_segment_when_route_prefix_then_leading_slash_added() {
    assert_that!(ui("mailhub").route_prefix().as_str(), eq("/mailhub"));
}

#[test]
fn given_slashes_when_route_prefix_then_single_leading_no_trailing() {
    assert_that!(ui("/mailhub/").route_prefix().as_str(), eq("/mailhub"));
    assert_that!(ui("/").route_prefix().as_str(), eq(""));
}

#[test]
fn given_nested_path_when_route_prefix_then_preserved() {
    assert_that!(ui("tools/mail").route_prefix().as_str(), eq("/tools/mail"));
}

#[test]
fn given_double_slash_when_validate_then_error() {
    assert_that!(ui("a//b").validate(), err(anything()));
}
