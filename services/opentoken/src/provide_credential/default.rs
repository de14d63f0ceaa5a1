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

use async_trait::async_trait;
use opentoken_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::provide_credential::{EnvCredentialProvider, StaticCredentialProvider};
use crate::{Config, Credential};

/// DefaultCredentialProvider will try to load credential from different sources.
///
/// Resolution order:
///
/// 1. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider
    pub fn new() -> Self {
        let chain = ProvideCredentialChain::new().push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create the default chain, preceded by the credential in `config` when
    /// both access code and secret are set there.
    pub fn from_config(config: &Config) -> Self {
        match (&config.access_code, &config.secret) {
            (Some(code), Some(secret)) => {
                Self::new().push_front(StaticCredentialProvider::new(code, secret))
            }
            _ => Self::new(),
        }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use opentoken::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new()
    ///     .push_front(StaticCredentialProvider::new("access_code", "secret"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use opentoken_core::StaticEnv;

    use super::*;
    use crate::constants::*;

    fn env_context() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (OPENTOKEN_ACCESS_CODE.to_string(), "env_code".to_string()),
                (OPENTOKEN_SECRET.to_string(), "env_secret".to_string()),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv::default());

        let cred = DefaultCredentialProvider::new()
            .provide_credential(&ctx)
            .await?;
        assert!(cred.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_default_loader_with_env() -> anyhow::Result<()> {
        let cred = DefaultCredentialProvider::new()
            .provide_credential(&env_context())
            .await?
            .expect("credential must be loaded");
        assert_eq!("env_code", cred.access_code);
        assert_eq!("env_secret", cred.secret);

        Ok(())
    }

    #[tokio::test]
    async fn test_default_loader_prefers_config() -> anyhow::Result<()> {
        let config = Config::new()
            .with_access_code("config_code")
            .with_secret("config_secret");

        let cred = DefaultCredentialProvider::from_config(&config)
            .provide_credential(&env_context())
            .await?
            .expect("credential must be loaded");
        assert_eq!("config_code", cred.access_code);

        // A half filled config is ignored.
        let config = Config::new().with_access_code("config_code");
        let cred = DefaultCredentialProvider::from_config(&config)
            .provide_credential(&env_context())
            .await?
            .expect("credential must be loaded");
        assert_eq!("env_code", cred.access_code);

        Ok(())
    }
}
