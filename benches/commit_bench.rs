use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use tablestore::object_store::MemoryObjectStore;
use tablestore::txn::Client;
use tablestore::Config;

fn make_rows(num: usize) -> Vec<Vec<serde_json::Value>> {
    let mut rng = rand::thread_rng();
    (0..num)
        .map(|i| vec![format!("row-{i}").into(), rng.gen_range(0..1_000).into()])
        .collect()
}

fn commit_n_rows(dataobject_size: usize, num_rows: usize) {
    let store = Arc::new(MemoryObjectStore::new());
    let config = Config { dataobject_size, ..Config::default() };
    let mut client = Client::with_config(store, config);

    client.new_tx().unwrap();
    client.create_table("bench", vec!["label".to_string(), "value".to_string()]).unwrap();
    for row in make_rows(num_rows) {
        client.write_row("bench", row).unwrap();
    }
    client.commit_tx().unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("commit 1000 rows, dataobject_size=256", |b| {
        b.iter(|| commit_n_rows(black_box(256), black_box(1000)))
    });
    c.bench_function("commit 1000 rows, dataobject_size=65536", |b| {
        b.iter(|| commit_n_rows(black_box(65536), black_box(1000)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
