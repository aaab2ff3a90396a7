pub mod components;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::rc::Rc;
use url::ParseError;

/// Structured error payload the backend returns for failed requests.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorInformation {
    pub error: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub details: String,
}

/// What could be recovered from the body of a failed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiErrorDetails {
    Information(ErrorInformation),
    Plain(String),
    Empty,
    Unknown,
}

impl Display for ApiErrorDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Information(info) => {
                write!(f, "{} ({})", info.message, info.error)
            }
            Self::Plain(s) => f.write_str(s),
            Self::Empty => f.write_str("no information"),
            Self::Unknown => f.write_str("unknown error information"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error("Failed to parse backend URL: {0}")]
    Url(#[from] ParseError),
    #[error("Failed to request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("The request took too long to respond")]
    Timeout,
    #[error("API error: {details} ({status})")]
    Api {
        status: StatusCode,
        details: ApiErrorDetails,
    },
}

/// The error type of all backend calls. Cheap to clone, so asynchronous
/// hook states can hand it around.
#[derive(Clone, Debug)]
pub struct ApiError(Rc<ApiErrorKind>);

impl Deref for ApiError {
    type Target = ApiErrorKind;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for ApiError {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ApiErrorKind> for ApiError {
    fn from(value: ApiErrorKind) -> Self {
        Self(Rc::new(value))
    }
}

impl From<ParseError> for ApiError {
    fn from(value: ParseError) -> Self {
        ApiErrorKind::from(value).into()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        ApiErrorKind::from(value).into()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiErrorKind::from(value).into()
    }
}

/// Turn client and server error statuses into an [`ApiError`], decoding the
/// body as [`ErrorInformation`] when the backend sent one.
#[async_trait(?Send)]
pub trait ApiErrorForStatus: Sized {
    async fn api_error_for_status(self) -> Result<Self, ApiError>;
}

#[async_trait(?Send)]
impl ApiErrorForStatus for Response {
    async fn api_error_for_status(self) -> Result<Self, ApiError> {
        let status = self.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Ok(self);
        }

        let details = decode_details(self.text().await);
        Err(ApiErrorKind::Api { status, details }.into())
    }
}

fn decode_details<E>(body: Result<String, E>) -> ApiErrorDetails {
    match body {
        Err(_) => ApiErrorDetails::Unknown,
        Ok(text) if text.is_empty() => ApiErrorDetails::Empty,
        Ok(text) => match serde_json::from_str(&text) {
            Ok(info) => ApiErrorDetails::Information(info),
            Err(_) => ApiErrorDetails::Plain(text),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn structured_body_decodes_to_information() {
        let details = decode_details::<()>(Ok(
            r#"{"error": "Conflict", "message": "Cannot delete software that has vulnerabilities"}"#
                .to_string(),
        ));
        match details {
            ApiErrorDetails::Information(info) => {
                assert_eq!(info.error, "Conflict");
                assert_eq!(info.message, "Cannot delete software that has vulnerabilities");
            }
            _ => panic!("expected structured information"),
        }
    }

    #[test]
    fn unstructured_body_is_passed_through() {
        assert_eq!(
            decode_details::<()>(Ok("teapot".to_string())),
            ApiErrorDetails::Plain("teapot".to_string())
        );
    }

    #[test]
    fn empty_body_maps_to_empty() {
        assert_eq!(decode_details::<()>(Ok(String::new())), ApiErrorDetails::Empty);
    }

    #[test]
    fn unreadable_body_maps_to_unknown() {
        assert_eq!(decode_details(Err(())), ApiErrorDetails::Unknown);
    }

    #[test]
    fn details_render_message_and_error() {
        let details = ApiErrorDetails::Information(ErrorInformation {
            error: "Conflict".to_string(),
            message: "Still referenced".to_string(),
            details: String::new(),
        });
        assert_eq!(details.to_string(), "Still referenced (Conflict)");
    }
}
