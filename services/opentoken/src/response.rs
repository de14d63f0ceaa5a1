// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Classification of service responses.

use bytes::Bytes;
use http::StatusCode;
use log::debug;
use opentoken_core::{Error, Result};
use serde::Deserialize;

/// Failure category derived from the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 500
    InternalServerError,
    /// Any other non-2xx status.
    Unknown,
}

impl FailureKind {
    /// Map a status code onto a failure kind.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => FailureKind::Unauthorized,
            StatusCode::FORBIDDEN => FailureKind::Forbidden,
            StatusCode::NOT_FOUND => FailureKind::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => FailureKind::InternalServerError,
            _ => FailureKind::Unknown,
        }
    }

    /// Reason used when the service does not send a message.
    pub fn reason(&self) -> &'static str {
        match self {
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::Forbidden => "forbidden",
            FailureKind::NotFound => "resource_not_found",
            FailureKind::InternalServerError => "internal_server_error",
            FailureKind::Unknown => "unknown",
        }
    }
}

/// Outcome of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResponse {
    /// 2xx with the response body.
    Success(Bytes),
    /// Anything else.
    Failure {
        /// Category from the status code.
        kind: FailureKind,
        /// Message sent by the service, or the reason of `kind`.
        reason: String,
        /// Status code as received.
        status: StatusCode,
    },
}

impl ClassifiedResponse {
    /// Check if the response is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, ClassifiedResponse::Success(_))
    }

    /// Human readable message of a failure, `None` on success.
    ///
    /// Format: `Error occurred: <reason>, HTTP status code: <code>.`
    pub fn message(&self) -> Option<String> {
        match self {
            ClassifiedResponse::Success(_) => None,
            ClassifiedResponse::Failure { reason, status, .. } => Some(format!(
                "Error occurred: {reason}, HTTP status code: {}.",
                status.as_u16()
            )),
        }
    }

    /// Turn a failure into an error of kind `ResponseRejected`.
    pub fn into_result(self) -> Result<Bytes> {
        let message = self.message();
        match self {
            ClassifiedResponse::Success(body) => Ok(body),
            ClassifiedResponse::Failure { status, .. } => Err(Error::response_rejected(
                message.unwrap_or_default(),
                status,
            )),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classify a status code and body.
///
/// Never fails: a body that is not JSON, or has no usable `message`, falls
/// back to the reason of the status code.
pub fn classify(status: StatusCode, body: Bytes) -> ClassifiedResponse {
    if status.is_success() {
        return ClassifiedResponse::Success(body);
    }

    let kind = FailureKind::from_status(status);
    let message = match serde_json::from_slice::<ErrorBody>(&body) {
        Ok(v) => v.message.filter(|m| !m.is_empty()),
        Err(err) => {
            debug!("failed to parse response body as json: {err}");
            None
        }
    };

    ClassifiedResponse::Failure {
        kind,
        reason: message.unwrap_or_else(|| kind.reason().to_string()),
        status,
    }
}

/// Check a response and return its body if the status is 2xx.
pub fn check_response(resp: &http::Response<Bytes>) -> Result<Bytes> {
    let status = resp.status();
    debug!("status code: {}", status.as_u16());
    debug!("response body: {}", String::from_utf8_lossy(resp.body()));

    classify(status, resp.body().clone()).into_result()
}

#[cfg(test)]
mod tests {
    use opentoken_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(401, "", "Error occurred: unauthorized, HTTP status code: 401."; "unauthorized")]
    #[test_case(403, "", "Error occurred: forbidden, HTTP status code: 403."; "forbidden")]
    #[test_case(404, "", "Error occurred: resource_not_found, HTTP status code: 404."; "not found")]
    #[test_case(500, "", "Error occurred: internal_server_error, HTTP status code: 500."; "internal server error")]
    #[test_case(491, "", "Error occurred: unknown, HTTP status code: 491."; "unmapped status")]
    #[test_case(401, r#"{"message":"Failed to verify signature"}"#, "Error occurred: Failed to verify signature, HTTP status code: 401."; "message overrides table")]
    #[test_case(404, "<html>not found</html>", "Error occurred: resource_not_found, HTTP status code: 404."; "malformed json")]
    #[test_case(403, r#"{"error":"nope"}"#, "Error occurred: forbidden, HTTP status code: 403."; "json without message")]
    #[test_case(403, r#"{"message":""}"#, "Error occurred: forbidden, HTTP status code: 403."; "empty message")]
    #[test_case(500, r#"{"message":42}"#, "Error occurred: internal_server_error, HTTP status code: 500."; "non string message")]
    fn test_classify_failure(status: u16, body: &'static str, expected: &str) {
        let status = StatusCode::from_u16(status).expect("status must be valid");
        let resp = classify(status, Bytes::from_static(body.as_bytes()));

        assert!(!resp.is_success());
        assert_eq!(Some(expected.to_string()), resp.message());
    }

    #[test]
    fn test_classify_success() {
        for status in [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT] {
            let resp = classify(status, Bytes::from_static(b"content"));
            assert_eq!(
                ClassifiedResponse::Success(Bytes::from_static(b"content")),
                resp
            );
            assert!(resp.message().is_none());
        }
    }

    #[test]
    fn test_classify_kind() {
        let resp = classify(StatusCode::UNAUTHORIZED, Bytes::new());
        assert!(matches!(
            resp,
            ClassifiedResponse::Failure {
                kind: FailureKind::Unauthorized,
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));
    }

    #[test]
    fn test_check_response() -> anyhow::Result<()> {
        let ok = http::Response::builder()
            .status(200)
            .body(Bytes::from_static(b"token content"))?;
        assert_eq!(Bytes::from_static(b"token content"), check_response(&ok)?);

        let rejected = http::Response::builder()
            .status(401)
            .body(Bytes::from_static(br#"{"message":"Failed to verify signature"}"#))?;
        let err = check_response(&rejected).unwrap_err();
        assert_eq!(ErrorKind::ResponseRejected, err.kind());
        assert_eq!(Some(StatusCode::UNAUTHORIZED), err.status());
        assert_eq!(
            "Error occurred: Failed to verify signature, HTTP status code: 401.",
            err.to_string()
        );

        Ok(())
    }
}
