use crate::events::{EventEnvelope, validate_event_type};

use serde_json::json;

#[test]
fn given_plain_tokens_when_validated_then_accepted() {
    for event_type in ["new", "deleted", "msg_2", "a-b"] {
        assert!(validate_event_type(event_type).is_ok(), "{event_type}");
    }
}

#[test]
fn given_unsafe_types_when_validated_then_rejected() {
    let too_long = "x".repeat(33);
    for event_type in ["", "has space", "dot.ted", "slash/", too_long.as_str()] {
        assert!(validate_event_type(event_type).is_err(), "{event_type}");
    }
}

#[test]
fn given_envelope_when_serialized_then_capitalized_fields() {
    let content = json!({ "ID": "abc" });
    let envelope = EventEnvelope {
        event_type: "new",
        content: &content,
    };

    let value = serde_json::to_value(&envelope).unwrap();

    assert_eq!(value, json!({ "Type": "new", "Content": { "ID": "abc" } }));
}
