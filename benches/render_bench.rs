//! Benchmarks for the directory renderer
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voter_central::api::{Candidate, CandidateId, DirectoryResponse, Election, Position};
use voter_central::config::RenderConfig;
use voter_central::query::DirectoryQuery;
use voter_central::render::{render_elections, DirectoryView, PageShell};

fn create_test_response(elections: usize) -> DirectoryResponse {
    let elections_data = (0..elections)
        .map(|e| Election {
            name: format!("Election {}", e),
            date: "2020-11-03".to_string(),
            positions: (0..5)
                .map(|p| Position {
                    name: format!("Position {}", p),
                    candidates: (0..4)
                        .map(|c| Candidate {
                            id: CandidateId::from((e * 100 + p * 10 + c) as u64),
                            name: format!("Candidate {}", c),
                            party_affiliation: "Independent".to_string(),
                            incumbency: c == 0,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    DirectoryResponse {
        elections_data,
        alert: None,
    }
}

fn bench_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("directory");
    let config = RenderConfig::default();

    for size in [1, 10, 100] {
        let response = create_test_response(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("render_elections_{}", size), |b| {
            b.iter(|| render_elections(black_box(&response.elections_data), &config))
        });

        let query = DirectoryQuery::for_address("123 Main St");
        group.bench_function(format!("apply_and_serialize_{}", size), |b| {
            b.iter(|| {
                let mut shell = PageShell::directory();
                DirectoryView::new(black_box(response.clone()), &query)
                    .apply(&mut shell, &config)
                    .unwrap();
                shell.to_html()
            })
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let body = serde_json::to_string(&create_test_response(100)).unwrap();

    c.bench_function("decode_directory_100", |b| {
        b.iter(|| serde_json::from_str::<DirectoryResponse>(black_box(&body)).unwrap())
    });
}

criterion_group!(benches, bench_directory, bench_decode);
criterion_main!(benches);
