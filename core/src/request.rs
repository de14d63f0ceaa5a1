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

use std::str::FromStr;

use http::header::HeaderName;
use http::HeaderValue;
use http::Method;
use http::Uri;

use crate::{Body, Error, Result};

/// RequestDescriptor describes one outbound request to be signed.
///
/// Headers are kept as an ordered list with the caller's original name
/// casing. The order is part of the signature: it decides both the canonical
/// content and the `signed-headers` list.
///
/// A descriptor is never changed in place. Operations that add headers
/// return a new descriptor.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    uri: Uri,
    headers: Vec<(String, String)>,
    body: Body,
}

impl RequestDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target uri.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Path component of the uri, as carried by the uri.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Raw query string, empty if the uri has none.
    pub fn query(&self) -> &str {
        self.uri.query().unwrap_or_default()
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Header names in insertion order with their original casing.
    pub fn header_names(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(k, _)| k.as_str())
    }

    /// Get the first header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Return a new descriptor with one more header appended at the end.
    pub fn with_header(&self, name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let (name, value) = (name.into(), value.into());
        validate_header(&name, &value)?;

        let mut req = self.clone();
        req.headers.push((name, value));
        Ok(req)
    }

    /// Convert into an [`http::Request`] that carries the same body.
    pub fn into_http_request(self) -> Result<http::Request<Body>> {
        let mut builder = http::Request::builder().method(self.method).uri(self.uri);
        for (name, value) in &self.headers {
            let mut value = HeaderValue::from_str(value)?;
            if name.eq_ignore_ascii_case(http::header::AUTHORIZATION.as_str()) {
                value.set_sensitive(true);
            }
            builder = builder.header(HeaderName::from_bytes(name.as_bytes())?, value);
        }

        Ok(builder.body(self.body)?)
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug, Default)]
pub struct RequestDescriptorBuilder {
    method: Option<Method>,
    uri: Option<std::result::Result<Uri, http::uri::InvalidUri>>,
    headers: Vec<(String, String)>,
    body: Body,
}

impl RequestDescriptorBuilder {
    /// Set the method. Only `GET` and `POST` can be signed.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the target uri.
    pub fn uri(mut self, uri: impl AsRef<str>) -> Self {
        self.uri = Some(Uri::from_str(uri.as_ref()));
        self
    }

    /// Append a header. Order of calls is preserved.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Build the descriptor.
    ///
    /// Fails when method or uri is missing, when the method is neither `GET`
    /// nor `POST`, or when a header name or value is not valid for HTTP.
    pub fn build(self) -> Result<RequestDescriptor> {
        let method = self
            .method
            .ok_or_else(|| Error::request_invalid("request method is required for signing"))?;
        if method != Method::GET && method != Method::POST {
            return Err(Error::request_invalid(format!(
                "request method {method} is not supported for signing"
            )));
        }
        let uri = self
            .uri
            .ok_or_else(|| Error::request_invalid("request uri is required for signing"))??;

        for (name, value) in &self.headers {
            validate_header(name, value)?;
        }

        Ok(RequestDescriptor {
            method,
            uri,
            headers: self.headers,
            body: self.body,
        })
    }
}

fn validate_header(name: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(name.as_bytes())?;
    HeaderValue::from_str(value)?;
    Ok(())
}
