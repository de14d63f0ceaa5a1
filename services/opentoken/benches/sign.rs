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

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, Criterion};
use opentoken::{Credential, RequestSigner};
use opentoken_core::{Body, RequestDescriptor};

criterion_group!(benches, bench);
criterion_main!(benches);

fn request(body: Body) -> RequestDescriptor {
    RequestDescriptor::builder()
        .method(http::Method::POST)
        .uri("https://api.opentoken.io/account/abc123/token")
        .header("content-type", "text/plain")
        .header("x-opentoken-date", "2024-05-01T12:00:00.000Z")
        .header("host", "api.opentoken.io")
        .body(body)
        .build()
        .expect("request must be valid")
}

pub fn bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success");

    let cred = Credential::new("access_code", "secret");
    let signer = RequestSigner::new();

    let mut group = c.benchmark_group("opentoken");

    let small = request(Body::from("hello world"));
    group.bench_function("small_body", |b| {
        b.to_async(&runtime).iter(|| async {
            signer
                .build_header_value(&cred, &small)
                .await
                .expect("must success")
        })
    });

    let large = request(Body::from(Bytes::from(vec![b'x'; 1024 * 1024])));
    group.bench_function("1MiB_body", |b| {
        b.to_async(&runtime).iter(|| async {
            signer
                .build_header_value(&cred, &large)
                .await
                .expect("must success")
        })
    });

    let chunk = Bytes::from(vec![b'x'; 64 * 1024]);
    let stream = request(Body::from_stream(move || {
        futures::stream::iter(vec![chunk.clone(); 16].into_iter().map(Ok))
    }));
    group.bench_function("1MiB_stream", |b| {
        b.to_async(&runtime).iter(|| async {
            signer
                .build_header_value(&cred, &stream)
                .await
                .expect("must success")
        })
    });

    group.finish();
}
