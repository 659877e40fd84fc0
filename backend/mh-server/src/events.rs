use crate::{ApiError, ApiResult, ServerState};

use mh_ws::{BroadcastMessage, Payload};

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use error_location::ErrorLocation;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_EVENT_TYPE: &str = "new";
const MAX_EVENT_TYPE_LEN: usize = 32;

#[derive(Debug, Deserialize)]
pub struct PublishQuery {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

/// Frame sent to subscribers: `{"Type": ..., "Content": ...}`
#[derive(Debug, Serialize)]
pub struct EventEnvelope<'a> {
    #[serde(rename = "Type")]
    pub event_type: &'a str,
    #[serde(rename = "Content")]
    pub content: &'a Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    pub bytes: usize,
}

/// Event types become metric name segments, so keep them to a plain token.
pub fn validate_event_type(event_type: &str) -> ApiResult<()> {
    if event_type.is_empty() || event_type.len() > MAX_EVENT_TYPE_LEN {
        return Err(ApiError::validation(format!(
            "type must be 1-{MAX_EVENT_TYPE_LEN} characters"
        )));
    }
    if !event_type
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::validation(format!(
            "type may only contain letters, digits, '_' and '-', got '{event_type}'"
        )));
    }
    Ok(())
}

/// POST /api/v2/events - broadcast a JSON body to every subscriber
pub async fn publish(
    State(state): State<ServerState>,
    Query(query): Query<PublishQuery>,
    Json(content): Json<Value>,
) -> ApiResult<(StatusCode, Json<PublishResponse>)> {
    let event_type = query
        .event_type
        .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string());
    validate_event_type(&event_type)?;

    let payload = Payload::json(&EventEnvelope {
        event_type: &event_type,
        content: &content,
    })?;
    let bytes = payload.len();

    if !state.hub().is_running() {
        return Err(ApiError::Unavailable {
            message: "Hub is shutting down".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    state
        .hub()
        .broadcast(BroadcastMessage::new(payload, event_type.clone()))
        .await;
    debug!("Published {event_type} event ({bytes} bytes)");

    Ok((
        StatusCode::ACCEPTED,
        Json(PublishResponse { event_type, bytes }),
    ))
}
