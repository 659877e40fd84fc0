use crate::Result as WsResult;

use axum::extract::ws::{Message, Utf8Bytes};
use bytes::Bytes;
use serde::Serialize;

/// Body of one outbound frame.
///
/// Both variants are reference counted, so handing a copy to every
/// subscriber queue does not copy the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(Utf8Bytes),
    Binary(Bytes),
}

impl Payload {
    pub fn text(text: impl Into<Utf8Bytes>) -> Self {
        Self::Text(text.into())
    }

    pub fn binary(data: impl Into<Bytes>) -> Self {
        Self::Binary(data.into())
    }

    /// Serialize a structured value into a JSON text frame.
    #[track_caller]
    pub fn json<T: Serialize + ?Sized>(value: &T) -> WsResult<Self> {
        let encoded = serde_json::to_string(value)?;
        Ok(Self::Text(encoded.into()))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.as_str().len(),
            Self::Binary(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_message(self) -> Message {
        match self {
            Self::Text(text) => Message::Text(text),
            Self::Binary(data) => Message::Binary(data),
        }
    }
}
