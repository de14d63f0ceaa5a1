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

//! A thin client for the token API.

use bytes::Bytes;
use http::header::LOCATION;
use http::Method;
use log::debug;
use opentoken_core::{Body, Context, Error, RequestDescriptor, Result, Signer};

use crate::request::{Namespace, TokenRequestBuilder};
use crate::response::check_response;
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};

/// TokenClient uploads and downloads tokens of one account.
///
/// Requests go through the [`HttpSend`](opentoken_core::HttpSend) of the
/// given [`Context`]. Public downloads may be sent unsigned, everything else
/// needs a signer.
#[derive(Debug, Clone)]
pub struct TokenClient {
    ctx: Context,
    builder: TokenRequestBuilder,
    account_id: String,
    namespace: Namespace,
    signer: Option<Signer<Credential>>,
}

impl TokenClient {
    /// Create an unsigned client for the public namespace.
    pub fn new(ctx: Context, config: &Config) -> Result<Self> {
        let account_id = config
            .account_id
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("account_id is required"))?;

        Ok(Self {
            builder: TokenRequestBuilder::new(config.host_or_default()),
            ctx,
            account_id,
            namespace: Namespace::Public,
            signer: None,
        })
    }

    /// Create a client that signs every request.
    ///
    /// Credentials come from `config` first, then from the environment.
    pub fn signed(ctx: Context, config: &Config, namespace: Namespace) -> Result<Self> {
        let signer = Signer::new(
            ctx.clone(),
            DefaultCredentialProvider::from_config(config),
            RequestSigner::new(),
        );

        Ok(Self::new(ctx, config)?
            .with_namespace(namespace)
            .with_signer(signer))
    }

    /// Set the namespace tokens are read from and written to.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Set the signer used for every request.
    pub fn with_signer(mut self, signer: Signer<Credential>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Replace the request builder, mostly to pin the request time in tests.
    pub fn with_request_builder(mut self, builder: TokenRequestBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Namespace of this client.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Download the contents stored under `token`.
    pub async fn download(&self, token: &str) -> Result<Bytes> {
        let url = self
            .builder
            .token_url(&self.account_id, self.namespace, Some(token));
        let req = self.builder.build(Method::GET, &url, None, Body::Empty)?;

        let resp = self.send(req).await?;
        check_response(&resp)
    }

    /// Upload `contents` and return the token the service assigned to it.
    pub async fn upload(
        &self,
        contents: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Result<String> {
        if self.signer.is_none() {
            return Err(Error::credential_invalid("upload requires a signed client"));
        }

        let url = self.builder.token_url(&self.account_id, self.namespace, None);
        let req = self
            .builder
            .build(Method::POST, &url, content_type, contents.into())?;

        let resp = self.send(req).await?;
        check_response(&resp)?;

        let location = resp
            .headers()
            .get(LOCATION)
            .ok_or_else(|| Error::unexpected("upload response has no location header"))?
            .to_str()?;
        token_from_location(location).ok_or_else(|| {
            Error::unexpected(format!("no token found in location header: {location}"))
        })
    }

    async fn send(&self, req: RequestDescriptor) -> Result<http::Response<Bytes>> {
        let req = match &self.signer {
            Some(signer) => signer.sign(&req).await?,
            None if self.namespace == Namespace::Private => {
                return Err(Error::credential_invalid(
                    "private namespace requires a signed client",
                ))
            }
            None => req,
        };

        let (parts, body) = req.into_http_request()?.into_parts();
        let body = match body {
            Body::Empty => Bytes::new(),
            Body::Bytes(bs) => bs,
            Body::Stream(_) => {
                return Err(Error::request_invalid(
                    "stream bodies can't be sent through HttpSend",
                ))
            }
        };
        debug!("sending request: {} {}", parts.method, parts.uri);

        self.ctx
            .http_send(http::Request::from_parts(parts, body))
            .await
    }
}

/// Last path segment of a `Location` value, ignoring query and fragment.
fn token_from_location(location: &str) -> Option<String> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    path.rsplit('/')
        .next()
        .filter(|v| !v.is_empty() && !v.contains(':'))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use opentoken_core::ErrorKind;

    #[test_case("https://api.opentoken.io/account/abc/token/xyz", Some("xyz"); "absolute")]
    #[test_case("/account/abc/token/xyz", Some("xyz"); "relative")]
    #[test_case("/account/abc/token/xyz/?public=true#top", Some("xyz"); "query and fragment")]
    #[test_case("", None; "empty")]
    #[test_case("https:", None; "no path")]
    fn test_token_from_location(location: &str, expected: Option<&str>) {
        assert_eq!(expected.map(String::from), token_from_location(location));
    }

    #[test]
    fn test_new_requires_account_id() {
        let err = TokenClient::new(Context::new(), &Config::new()).unwrap_err();
        assert_eq!(ErrorKind::ConfigInvalid, err.kind());

        let client = TokenClient::new(Context::new(), &Config::new().with_account_id("abc"))
            .expect("client must be created");
        assert_eq!(Namespace::Public, client.namespace());
    }

    #[tokio::test]
    async fn test_unsigned_client_rejects_private_and_upload() {
        let client = TokenClient::new(Context::new(), &Config::new().with_account_id("abc"))
            .expect("client must be created");

        let err = client.upload("hello", None).await.unwrap_err();
        assert_eq!(ErrorKind::CredentialInvalid, err.kind());

        let err = client
            .with_namespace(Namespace::Private)
            .download("xyz")
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::CredentialInvalid, err.kind());
    }
}
