//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//


//! Loopback benchmarks for the full client stack

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;
use tl1kit_client::Tl1Client;
use tl1kit_codec::{Command, StatusCode, Terminator};
use tl1kit_fiberhome::{Fiberhome, ListTrunkInfo, logout};
use tl1kit_suite::{MockElement, response, table_body};

fn element(command: &Command) -> Vec<String> {
    let ctag = command.ctag();
    if command.code().to_string() == "LST-TRUNKINFO" {
        let rows: Vec<Vec<String>> = (0..64)
            .map(|n| vec![n.to_string(), format!("NA-NA-1-{n}"), format!("NA-NA-2-{n}")])
            .collect();
        let body = table_body("List of Trunk", &["TRUNKNO", "MASTERPORT", "MEMBERPORT"], &rows);
        vec![response(ctag, StatusCode::Completed, &body, Terminator::Stop)]
    } else {
        vec![response(
            ctag,
            StatusCode::Completed,
            "   EN=0   ENDESC=No error\r\n",
            Terminator::Stop,
        )]
    }
}

// ============================================================================
// Round Trip Benchmarks
// ============================================================================

fn bench_round_trip(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mock = runtime.block_on(MockElement::start(element)).unwrap();
    let mut client = runtime
        .block_on(Tl1Client::connect(mock.config(), Arc::new(Fiberhome)))
        .unwrap();

    let commands = [
        ("logout", logout()),
        (
            "list_trunks",
            ListTrunkInfo::Olt("10.0.0.1".parse().unwrap()).build(),
        ),
    ];

    let mut group = c.benchmark_group("round_trip");
    group.throughput(Throughput::Elements(1));
    for (name, command) in &commands {
        group.bench_with_input(BenchmarkId::from_parameter(name), command, |b, command| {
            b.iter_custom(|iters| {
                runtime.block_on(async {
                    let start = Instant::now();
                    for _ in 0..iters {
                        black_box(client.execute(command).await.unwrap());
                    }
                    start.elapsed()
                })
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_round_trip);
criterion_main!(benches);
