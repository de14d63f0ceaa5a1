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

//! Constants used by the OpenToken signer.

/// Scheme prefix of the authorization header value.
pub const AUTHORIZATION_SCHEME: &str = "OT1-HMAC-SHA256-HEX";
/// Name of the header carrying the signature.
pub const AUTHORIZATION: &str = "Authorization";

// Headers set on every request, in this order.

/// Content type of the body.
pub const CONTENT_TYPE: &str = "content-type";
/// Request time, ISO-8601 in UTC with milliseconds.
pub const X_OPENTOKEN_DATE: &str = "x-opentoken-date";
/// Service host.
pub const HOST: &str = "host";

/// Content type used when the caller gives none.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";
/// Service host used when the config gives none.
pub const DEFAULT_HOST: &str = "api.opentoken.io";

// Env values used in opentoken.

/// Access code of the credential.
pub const OPENTOKEN_ACCESS_CODE: &str = "OPENTOKEN_ACCESS_CODE";
/// Shared secret of the credential.
pub const OPENTOKEN_SECRET: &str = "OPENTOKEN_SECRET";
/// Host to talk to.
pub const OPENTOKEN_HOST: &str = "OPENTOKEN_HOST";
/// Account owning the tokens.
pub const OPENTOKEN_ACCOUNT_ID: &str = "OPENTOKEN_ACCOUNT_ID";
