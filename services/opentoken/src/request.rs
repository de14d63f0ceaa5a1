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

//! Building requests for the token API.

use http::Method;
use opentoken_core::time::{format_iso8601, now, DateTime};
use opentoken_core::{Body, RequestDescriptor, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constants::*;

/// Characters kept as is in a path segment: the unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Token namespace of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Namespace {
    /// Tokens only readable with a signed request.
    #[default]
    Private,
    /// Tokens readable by anyone.
    Public,
}

/// TokenRequestBuilder builds unsigned request descriptors for one host.
#[derive(Debug, Clone)]
pub struct TokenRequestBuilder {
    host: String,
    time: Option<DateTime>,
}

impl TokenRequestBuilder {
    /// Create a builder for `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            time: None,
        }
    }

    /// Specify the request time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Host requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Url of the token collection of an account, or of one token in it.
    ///
    /// ```text
    /// https://<host>/account/<account_id>/token[/<token>][?public=true]
    /// ```
    pub fn token_url(&self, account_id: &str, namespace: Namespace, token: Option<&str>) -> String {
        let mut url = format!(
            "https://{}/account/{}/token",
            self.host,
            utf8_percent_encode(account_id, PATH_SEGMENT)
        );
        if let Some(token) = token {
            url.push('/');
            url.extend(utf8_percent_encode(token, PATH_SEGMENT));
        }
        if namespace == Namespace::Public {
            url.push_str("?public=true");
        }

        url
    }

    /// Build a descriptor with the headers every OpenToken request carries.
    ///
    /// Headers are added in this order: `content-type` (defaults to
    /// `text/plain`), `x-opentoken-date`, `host`.
    pub fn build(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> Result<RequestDescriptor> {
        let date = format_iso8601(self.time.unwrap_or_else(now));

        RequestDescriptor::builder()
            .method(method)
            .uri(url)
            .header(CONTENT_TYPE, content_type.unwrap_or(DEFAULT_CONTENT_TYPE))
            .header(X_OPENTOKEN_DATE, date)
            .header(HOST, self.host.as_str())
            .body(body)
            .build()
    }
}
