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

//! Hash related utils.

use std::fmt::{Debug, Formatter};

use bytes::Bytes;
use futures::{future, stream, StreamExt, TryStreamExt};
use hmac::Hmac;
use hmac::Mac;
use log::debug;
use sha2::Sha256;

use crate::body::ByteStream;
use crate::{Error, Result};

/// Hex encoded HMAC with SHA256 hash.
///
/// Use this function instead of `hex::encode(hmac_sha256(key, content))` can
/// reduce extra copy.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    hex::encode(h.finalize().into_bytes())
}

/// Keyed hash algorithms supported by [`ContentHasher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC with SHA256, hex encoded.
    #[default]
    HmacSha256,
}

impl Algorithm {
    /// Name of the algorithm as it appears in the authorization scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::HmacSha256 => "HMAC-SHA256",
        }
    }
}

/// One piece of content fed into a [`ContentHasher`].
pub enum Chunk {
    /// Content already in memory.
    Bytes(Bytes),
    /// Content read from a stream.
    Stream(ByteStream),
}

impl Chunk {
    /// Every chunk is consumed as a stream so hashing has a single code path.
    fn into_stream(self) -> ByteStream {
        match self {
            Chunk::Bytes(bs) => stream::once(future::ready(Ok(bs))).boxed(),
            Chunk::Stream(s) => s,
        }
    }
}

impl Debug for Chunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Chunk::Bytes(bs) => f.debug_tuple("Bytes").field(&bs.len()).finish(),
            Chunk::Stream(_) => f.write_str("Stream"),
        }
    }
}

impl From<Bytes> for Chunk {
    fn from(value: Bytes) -> Self {
        Chunk::Bytes(value)
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(value: Vec<u8>) -> Self {
        Chunk::Bytes(Bytes::from(value))
    }
}

impl From<String> for Chunk {
    fn from(value: String) -> Self {
        Chunk::Bytes(Bytes::from(value))
    }
}

impl From<&str> for Chunk {
    fn from(value: &str) -> Self {
        Chunk::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<ByteStream> for Chunk {
    fn from(value: ByteStream) -> Self {
        Chunk::Stream(value)
    }
}

/// ContentHasher computes one keyed hash over an ordered list of chunks.
///
/// Chunks are folded into the hash state one after another, so a large
/// stream never needs to be held in memory. A stream chunk is drained to its
/// end before the next chunk is touched.
///
/// The hasher is consumed by [`ContentHasher::digest`] and can't be reused.
#[derive(Debug, Default)]
pub struct ContentHasher {
    chunks: Vec<Chunk>,
}

impl ContentHasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk.
    pub fn push(&mut self, chunk: impl Into<Chunk>) {
        self.chunks.push(chunk.into());
    }

    /// Append several chunks in order.
    pub fn push_all<I>(&mut self, chunks: I)
    where
        I: IntoIterator,
        I::Item: Into<Chunk>,
    {
        self.chunks.extend(chunks.into_iter().map(Into::into));
    }

    /// Number of chunks pushed so far.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Consume all chunks and return the hex encoded keyed digest.
    ///
    /// Returns an error of kind [`crate::ErrorKind::BodyUnreadable`] if any
    /// stream chunk fails; the partial state is dropped.
    pub async fn digest(self, secret: &[u8], algorithm: Algorithm) -> Result<String> {
        match algorithm {
            Algorithm::HmacSha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(secret)
                    .map_err(|_| Error::unexpected("invalid key length for hmac"))?;

                let mut total = 0;
                for chunk in self.chunks {
                    let mut stream = chunk.into_stream();
                    while let Some(bs) = stream.try_next().await.map_err(|e| {
                        Error::body_unreadable("failed to read content while hashing")
                            .with_source(e)
                    })? {
                        total += bs.len();
                        mac.update(&bs);
                    }
                }
                debug!("hashed {total} bytes with {}", algorithm.name());

                Ok(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }
}
