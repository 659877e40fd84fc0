mod origin_policy;

use crate::{BroadcastMessage, Hub, HubConfig, Metrics, Payload};

pub(crate) fn test_hub() -> Hub {
    Hub::new("", HubConfig::default(), Metrics::new())
}

pub(crate) fn text_message(text: &str) -> BroadcastMessage {
    BroadcastMessage::new(Payload::text(text), "test")
}
