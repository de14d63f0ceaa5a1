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

//! OpenToken request signer.

use log::debug;
use opentoken_core::hash::{Algorithm, ContentHasher};
use opentoken_core::{Context, Error, RequestDescriptor, Result, SignRequest};

use crate::canonical::{canonicalize, signed_headers};
use crate::constants::{AUTHORIZATION, AUTHORIZATION_SCHEME};
use crate::Credential;

/// RequestSigner that implements OpenToken `OT1-HMAC-SHA256-HEX` authorization.
///
/// ```text
/// OT1-HMAC-SHA256-HEX; access-code=<code>; signed-headers=<names>; signature=<hex>
/// ```
#[derive(Debug, Default)]
pub struct RequestSigner {
    algorithm: Algorithm,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the value of the `Authorization` header for `req`.
    ///
    /// `req` is only read. Signing the same descriptor with the same
    /// credential always gives the same value.
    pub async fn build_header_value(
        &self,
        cred: &Credential,
        req: &RequestDescriptor,
    ) -> Result<String> {
        let mut hasher = ContentHasher::new();
        hasher.push_all(canonicalize(req));
        let signature = hasher.digest(cred.secret.as_bytes(), self.algorithm).await?;

        let value = format!(
            "{AUTHORIZATION_SCHEME}; access-code={}; signed-headers={}; signature={signature}",
            cred.access_code,
            signed_headers(req)
        );
        debug!("authorization header value: {value}");

        Ok(value)
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &RequestDescriptor,
        credential: Option<&Self::Credential>,
    ) -> Result<RequestDescriptor> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        let value = self.build_header_value(cred, req).await?;
        req.with_header(AUTHORIZATION, value)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use bytes::Bytes;
    use http::Method;
    use opentoken_core::{Body, ErrorKind, Signer};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StaticCredentialProvider;

    const EXPECTED_SIGNATURE: &str =
        "49c0edb8558bee14649dc77da6ab934a23477261549dd377f19206f85a56785b";
    const EXPECTED_AUTH: &str = "OT1-HMAC-SHA256-HEX; access-code=code; signed-headers=content-type x-opentoken-date host; signature=49c0edb8558bee14649dc77da6ab934a23477261549dd377f19206f85a56785b";

    fn request(headers: &[(&str, &str)], body: Body) -> Result<RequestDescriptor> {
        let mut builder = RequestDescriptor::builder()
            .method(Method::POST)
            .uri("https://api.opentoken.io/account/abc123/token?public")
            .body(body);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.build()
    }

    fn default_headers() -> Vec<(&'static str, &'static str)> {
        vec![
            ("content-type", "text/plain"),
            ("x-opentoken-date", "NOW"),
            ("host", "api.opentoken.io"),
        ]
    }

    fn signature_of(value: &str) -> &str {
        value
            .rsplit("signature=")
            .next()
            .expect("signature must exist")
    }

    #[tokio::test]
    async fn test_sign_string_body() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let req = request(&default_headers(), Body::from("hello world"))?;
        let value = RequestSigner::new()
            .build_header_value(&Credential::new("code", "secret"), &req)
            .await?;

        assert_eq!(EXPECTED_AUTH, value);
        assert_eq!(EXPECTED_SIGNATURE, signature_of(&value));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_stream_body() -> Result<()> {
        let body = Body::from_stream(|| {
            futures::stream::iter(vec![
                Ok(Bytes::from_static(b"hello")),
                Ok(Bytes::from_static(b" ")),
                Ok(Bytes::from_static(b"world")),
            ])
        });
        let req = request(&default_headers(), body)?;
        let value = RequestSigner::new()
            .build_header_value(&Credential::new("code", "secret"), &req)
            .await?;

        assert_eq!(EXPECTED_AUTH, value);

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_ignores_header_case() -> Result<()> {
        let req = request(
            &[
                ("CoNtent-tYpe", "text/plain"),
                ("x-opEntOken-datE", "NOW"),
                ("host", "Api.OPENtoken.io"),
            ],
            Body::from("hello world"),
        )?;
        let value = RequestSigner::new()
            .build_header_value(&Credential::new("code", "secret"), &req)
            .await?;

        assert_eq!(EXPECTED_SIGNATURE, signature_of(&value));
        assert!(value.contains("signed-headers=CoNtent-tYpe x-opEntOken-datE host;"));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_depends_on_header_order() -> Result<()> {
        let mut headers = default_headers();
        headers.rotate_left(1);
        let req = request(&headers, Body::from("hello world"))?;
        let value = RequestSigner::new()
            .build_header_value(&Credential::new("code", "secret"), &req)
            .await?;

        assert_ne!(EXPECTED_SIGNATURE, signature_of(&value));
        assert!(value.contains("signed-headers=x-opentoken-date host content-type;"));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_does_not_mutate() -> Result<()> {
        let req = request(&default_headers(), Body::from("hello world"))?;
        let signer = Signer::new(
            Context::new(),
            StaticCredentialProvider::new("code", "secret"),
            RequestSigner::new(),
        );

        let first = signer.sign(&req).await?;
        let second = signer.sign(&req).await?;

        assert_eq!(3, req.headers().len());
        assert_eq!(first.headers(), second.headers());
        assert_eq!(Some(EXPECTED_AUTH), first.header("authorization"));
        assert_eq!(
            Some(&Bytes::from_static(b"hello world")),
            first.body().as_bytes()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_stream_error() -> Result<()> {
        let body = Body::from_stream(|| {
            futures::stream::iter(vec![
                Ok(Bytes::from_static(b"hello")),
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "file truncated")),
            ])
        });
        let req = request(&default_headers(), body)?;

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &req, Some(&Credential::new("code", "secret")))
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::BodyUnreadable, err.kind());

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_without_credential() -> Result<()> {
        let req = request(&default_headers(), Body::Empty)?;

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &req, None)
            .await
            .unwrap_err();
        assert_eq!(ErrorKind::CredentialInvalid, err.kind());

        Ok(())
    }
}
