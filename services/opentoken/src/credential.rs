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

use opentoken_core::{utils::Redact, SigningCredential};

/// Credential for OpenToken.
#[derive(Clone)]
pub struct Credential {
    /// Public access code identifying the signer.
    pub access_code: String,
    /// Shared secret, only ever used as the HMAC key.
    pub secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_code: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_code: access_code.into(),
            secret: secret.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_code", &self.access_code)
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.access_code.is_empty() && !self.secret.is_empty()
    }
}
