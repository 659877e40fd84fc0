use crate::{Hub, HubConfig, Metrics, OriginPolicy};

#[test]
fn given_empty_allow_list_when_checked_then_any_origin_allowed() {
    let policy = OriginPolicy::from_allow_list("");

    assert!(policy.allows_all());
    assert!(policy.is_origin_allowed("https://anything"));
}

#[test]
fn given_allow_list_when_checked_then_only_listed_origins_allowed() {
    let policy = OriginPolicy::from_allow_list("https://a.com, https://b.com");

    assert!(policy.is_origin_allowed("https://a.com"));
    assert!(policy.is_origin_allowed("https://b.com"));
    assert!(!policy.is_origin_allowed("https://c.com"));
}

#[test]
fn given_allow_list_when_origin_differs_by_scheme_then_rejected() {
    let policy = OriginPolicy::from_allow_list("https://a.com");

    assert!(!policy.is_origin_allowed("http://a.com"));
    assert!(!policy.is_origin_allowed(""));
}

#[test]
fn given_wildcard_entry_when_checked_then_any_origin_allowed() {
    let policy = OriginPolicy::from_allow_list("https://a.com,*");

    assert!(policy.is_origin_allowed("https://z.com"));
}

#[test]
fn given_allow_list_when_request_has_no_origin_then_allowed() {
    let policy = OriginPolicy::from_allow_list("https://a.com");

    assert!(policy.check_request(None));
    assert!(!policy.check_request(Some("https://c.com")));
}

#[test]
fn given_only_separators_when_parsed_then_allow_all() {
    let policy = OriginPolicy::from_allow_list(" , ,");

    assert!(policy.allows_all());
    assert!(policy.allowed_origins().is_empty());
}

#[tokio::test]
async fn given_hub_with_allow_list_when_checked_then_delegates_to_policy() {
    let hub = Hub::new(
        "https://a.com, https://b.com",
        HubConfig::default(),
        Metrics::new(),
    );

    assert!(hub.is_origin_allowed("https://a.com"));
    assert!(!hub.is_origin_allowed("https://c.com"));
}

#[tokio::test]
async fn given_hub_with_empty_allow_list_when_checked_then_allows_anything() {
    let hub = Hub::new("", HubConfig::default(), Metrics::new());

    assert!(hub.is_origin_allowed("https://anything"));
}
