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

//! Sign a request and print the authorization header.
//!
//! ```shell
//! OPENTOKEN_ACCESS_CODE=code OPENTOKEN_SECRET=secret cargo run --example sign_request
//! ```

use http::Method;
use opentoken::{DefaultCredentialProvider, RequestSigner, TokenRequestBuilder};
use opentoken_core::{Context, OsEnv, Result, Signer};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new().with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let builder = TokenRequestBuilder::new("api.opentoken.io");
    let url = builder.token_url("abc123", Default::default(), None);
    let req = builder.build(Method::POST, &url, None, "hello world")?;

    let signed = signer.sign(&req).await?;
    for (name, value) in signed.headers() {
        println!("{name}: {value}");
    }

    Ok(())
}
