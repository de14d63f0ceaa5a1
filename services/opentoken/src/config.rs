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

use std::fmt::{Debug, Formatter};

use opentoken_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for OpenToken.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_code` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPENTOKEN_ACCESS_CODE`]
    pub access_code: Option<String>,
    /// `secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPENTOKEN_SECRET`]
    pub secret: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPENTOKEN_HOST`]
    /// - [`DEFAULT_HOST`] otherwise
    pub host: Option<String>,
    /// `account_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OPENTOKEN_ACCOUNT_ID`]
    pub account_id: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_code
    pub fn with_access_code(mut self, access_code: impl Into<String>) -> Self {
        self.access_code = Some(access_code.into());
        self
    }

    /// Set secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set account_id
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(OPENTOKEN_ACCESS_CODE) {
            self.access_code.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OPENTOKEN_SECRET) {
            self.secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OPENTOKEN_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OPENTOKEN_ACCOUNT_ID) {
            self.account_id.get_or_insert(v);
        }

        self
    }

    /// Host to talk to, falling back to [`DEFAULT_HOST`].
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_code", &self.access_code)
            .field("secret", &self.secret.as_ref().map(Redact::from))
            .field("host", &self.host)
            .field("account_id", &self.account_id)
            .finish()
    }
}
