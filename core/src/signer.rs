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

use std::sync::Arc;

use crate::{Context, ProvideCredential, RequestDescriptor, Result, SignRequest, SigningCredential};

/// Signer is the main struct used to sign the request.
///
/// The credential is asked from the provider on every call and dropped once
/// the request is signed. Nothing is cached between calls.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            builder: Arc::new(builder),
        }
    }

    /// Context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Sign the request and return the signed copy.
    pub async fn sign(&self, req: &RequestDescriptor) -> Result<RequestDescriptor> {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .filter(|cred| cred.is_valid());

        self.builder
            .sign_request(&self.ctx, req, cred.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::Method;

    use super::*;
    use crate::{Error, ErrorKind};

    #[derive(Clone, Debug)]
    struct Token(String);

    impl SigningCredential for Token {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug, Default)]
    struct CountingProvider {
        token: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ProvideCredential for CountingProvider {
        type Credential = Token;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(Token(self.token.to_string())))
        }
    }

    #[derive(Debug)]
    struct HeaderSigner;

    #[async_trait::async_trait]
    impl SignRequest for HeaderSigner {
        type Credential = Token;

        async fn sign_request(
            &self,
            _: &Context,
            req: &RequestDescriptor,
            credential: Option<&Token>,
        ) -> Result<RequestDescriptor> {
            let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
            req.with_header("x-token", cred.0.as_str())
        }
    }

    fn request() -> Result<RequestDescriptor> {
        RequestDescriptor::builder()
            .method(Method::GET)
            .uri("https://api.opentoken.io/account/abc/token/xyz")
            .build()
    }

    #[tokio::test]
    async fn test_sign_loads_credential_every_time() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            token: "token",
            calls: calls.clone(),
        };
        let signer = Signer::new(Context::new(), provider, HeaderSigner);

        let req = request()?;
        let first = signer.sign(&req).await?;
        let second = signer.sign(&req).await?;

        assert_eq!(Some("token"), first.header("x-token"));
        assert_eq!(first.headers(), second.headers());
        assert!(req.header("x-token").is_none());
        assert_eq!(2, calls.load(Ordering::SeqCst));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_skips_invalid_credential() -> Result<()> {
        let signer = Signer::new(Context::new(), CountingProvider::default(), HeaderSigner);

        let err = signer.sign(&request()?).await.unwrap_err();
        assert_eq!(ErrorKind::CredentialInvalid, err.kind());

        Ok(())
    }
}
