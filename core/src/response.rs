//! Classification of transport outcomes.
//!
//! A 2xx response is decoded into a generic JSON value. Everything else
//! becomes an `ApiError`: the real status and reason phrase when the server
//! answered, status 500 with the transport's message when it did not.

use serde_json::Value;

use crate::error::{ApiError, ClientError, Result, NO_RESPONSE_STATUS};
use crate::http::{HttpResponse, TransportError};

/// The response actually received from the server, if any.
pub fn received(outcome: &std::result::Result<HttpResponse, TransportError>) -> Option<&HttpResponse> {
    match outcome {
        Ok(response) => Some(response),
        Err(err) => err.response.as_ref(),
    }
}

/// Turn a transport outcome into a decoded body or a typed error.
pub fn classify(outcome: std::result::Result<HttpResponse, TransportError>) -> Result<Value> {
    match outcome {
        Ok(response) if response.is_success() => decode(&response.body),
        Ok(response) => Err(http_error(response, None).into()),
        Err(err) => match err.response.clone() {
            Some(response) => Err(http_error(response, Some(err)).into()),
            None => Err(ApiError {
                reason_phrase: err.message.clone(),
                status_code: NO_RESPONSE_STATUS,
                body: None,
                source: Some(err),
            }
            .into()),
        },
    }
}

fn http_error(response: HttpResponse, source: Option<TransportError>) -> ApiError {
    ApiError {
        reason_phrase: response.reason,
        status_code: response.status,
        body: (!response.body.is_empty()).then_some(response.body),
        source,
    }
}

fn decode(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(ClientError::Deserialization)
}
