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

//! Core components for signing OpenToken requests.
//!
//! This crate provides the foundational types and traits shared by the
//! opentoken signer and its transports.
//!
//! ## Overview
//!
//! - **RequestDescriptor**: an immutable description of one request, with an
//!   ordered header list and a [`Body`] that may be in memory or a stream
//! - **ContentHasher**: a keyed hash folded over ordered chunks without
//!   buffering the whole content, see [`hash`]
//! - **Context**: a container that holds implementations for HTTP sending and
//!   environment access
//! - **Traits**: [`ProvideCredential`] for credential loading and
//!   [`SignRequest`] for request signing
//! - **Signer**: loads a credential and signs a request with it
//!
//! ## Example
//!
//! ```no_run
//! use opentoken_core::{Context, RequestDescriptor, Result, Signer};
//! use opentoken_core::{ProvideCredential, SignRequest, SigningCredential};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &RequestDescriptor,
//!         cred: Option<&Self::Credential>,
//!     ) -> Result<RequestDescriptor> {
//!         let cred = cred.expect("credential must be loaded");
//!         req.with_header("x-token", cred.token.as_str())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::default(), MyProvider, MySigner);
//!
//! let req = RequestDescriptor::builder()
//!     .method(http::Method::GET)
//!     .uri("https://api.opentoken.io/account/abc/token/xyz")
//!     .build()?;
//! let signed = signer.sign(&req).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod body;
pub use body::{Body, ByteStream, StreamBody};
mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};
mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod request;
pub use request::{RequestDescriptor, RequestDescriptorBuilder};
mod signer;
pub use signer::Signer;
