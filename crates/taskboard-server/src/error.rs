//! HTTP rendering of task errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use taskboard_core::KeyValue;
use taskboard_tasks::{ErrorKind, TaskError};
use tracing::{error, warn};

use crate::locale::Locale;
use crate::messages;

/// A [`TaskError`] bound to the locale its message is rendered in.
#[derive(Debug)]
pub struct ApiError {
    pub source: TaskError,
    pub locale: Locale,
}

impl ApiError {
    pub fn new(source: TaskError, locale: Locale) -> Self {
        Self { source, locale }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.source.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Data | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{key, value}` body: the message key and its localized text.
    pub fn body(&self) -> KeyValue {
        let key = self.source.message_key();
        let text = messages::render(self.locale, key, &self.source.message_args());
        KeyValue::new(key.as_str(), text)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let key = self.source.message_key();
        match self.source.kind() {
            ErrorKind::Internal => error!(error = %self.source, %key, "request failed"),
            _ => warn!(error = %self.source, %key, status = status.as_u16(), "request rejected"),
        }
        (status, Json(self.body())).into_response()
    }
}
