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

//! Request body used during signing.

use std::fmt::{Debug, Formatter};
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

/// A boxed stream of body bytes.
pub type ByteStream = BoxStream<'static, io::Result<Bytes>>;

/// StreamBody is a lazily opened stream of bytes.
///
/// Nothing is read until [`StreamBody::open`] is called, and every call opens
/// a fresh stream. This keeps a [`crate::RequestDescriptor`] immutable: signing
/// the same descriptor twice reads the body twice from the start.
#[derive(Clone)]
pub struct StreamBody {
    open: Arc<dyn Fn() -> ByteStream + Send + Sync>,
}

impl StreamBody {
    /// Create a stream body from an opener.
    pub fn new<F, S>(open: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            open: Arc::new(move || open().boxed()),
        }
    }

    /// Open a new stream over the body content.
    pub fn open(&self) -> ByteStream {
        (self.open)()
    }
}

impl Debug for StreamBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("StreamBody { .. }")
    }
}

/// Body of a request to be signed.
#[derive(Clone, Debug, Default)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// Body held in memory.
    Bytes(Bytes),
    /// Body read lazily from a stream.
    Stream(StreamBody),
}

impl Body {
    /// Create a body from a stream opener.
    pub fn from_stream<F, S>(open: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Body::Stream(StreamBody::new(open))
    }

    /// Check if the body is known to be absent.
    ///
    /// Streams are never reported as absent since their length is unknown.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Bytes(bs) => bs.is_empty(),
            Body::Stream(_) => false,
        }
    }

    /// Return the in-memory bytes if the body is not a stream.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Body::Bytes(bs) => Some(bs),
            _ => None,
        }
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Body::Bytes(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(value))
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Bytes(Bytes::from(value))
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Body::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

impl From<StreamBody> for Body {
    fn from(value: StreamBody) -> Self {
        Body::Stream(value)
    }
}
