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

//! Signing [OpenToken](https://opentoken.io) API requests.
//!
//! Every request is signed with an `OT1-HMAC-SHA256-HEX` authorization
//! header computed over a canonical form of the method, path, query, the
//! headers in the order they were added, and the body.
//!
//! ## Example
//!
//! ```no_run
//! use opentoken::{Config, Namespace, TokenClient};
//! use opentoken_core::{Context, OsEnv, Result};
//! use opentoken_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!     let config = Config::new().from_env(&ctx);
//!
//!     let client = TokenClient::signed(ctx, &config, Namespace::Private)?;
//!     let token = client.upload("hello world", None).await?;
//!     let contents = client.download(&token).await?;
//!     assert_eq!(&contents[..], b"hello world");
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod canonical;
pub mod constants;
pub mod response;
pub use response::{check_response, classify, ClassifiedResponse, FailureKind};

mod config;
pub use config::Config;
mod credential;
pub use credential::Credential;
mod request;
pub use request::{Namespace, TokenRequestBuilder};
mod sign_request;
pub use sign_request::RequestSigner;
mod client;
pub use client::TokenClient;

mod provide_credential;
pub use provide_credential::*;
