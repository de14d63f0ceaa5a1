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

//! Canonical content of a request.
//!
//! ```text
//! METHOD + "\n" +
//! PATH + "\n" +
//! QUERY + "\n" +
//! lowercase(name) + ":" + trim(value) + "\n"    (once per header, in order)
//! "\n" +
//! BODY
//! ```
//!
//! Headers are not sorted. The host value is lowercased as well. An absent
//! body adds nothing after the blank line.

use opentoken_core::hash::Chunk;
use opentoken_core::{Body, RequestDescriptor};

use crate::constants::HOST;

/// Build the ordered chunks to be signed for `req`.
///
/// Stream bodies are opened here but not read: reading happens while the
/// chunks are hashed.
pub fn canonicalize(req: &RequestDescriptor) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(req.headers().len() + 5);
    chunks.push(Chunk::from(format!("{}\n", req.method())));
    chunks.push(Chunk::from(format!("{}\n", req.path())));
    chunks.push(Chunk::from(format!("{}\n", req.query())));
    for (name, value) in req.headers() {
        chunks.push(Chunk::from(canonical_header(name, value)));
    }
    chunks.push(Chunk::from("\n"));

    match req.body() {
        Body::Empty => {}
        Body::Bytes(bs) => chunks.push(Chunk::from(bs.clone())),
        Body::Stream(s) => chunks.push(Chunk::from(s.open())),
    }

    chunks
}

/// Canonical line for one header, including the trailing newline.
pub fn canonical_header(name: &str, value: &str) -> String {
    let name = name.to_ascii_lowercase();
    let value = value.trim();

    if name == HOST {
        format!("{name}:{}\n", value.to_lowercase())
    } else {
        format!("{name}:{value}\n")
    }
}

/// Header names joined by a single space, original case and order.
pub fn signed_headers(req: &RequestDescriptor) -> String {
    req.header_names().collect::<Vec<_>>().join(" ")
}
