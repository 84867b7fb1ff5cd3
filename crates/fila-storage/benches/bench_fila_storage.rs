use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fila_core::{Fila, WriteTextOptions};
use fila_storage::{LocalHostPlugin, VolumeFs};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn make_fs() -> (TempDir, VolumeFs) {
    let tmp = TempDir::new().unwrap();
    let fs = VolumeFs::with_plugin(Arc::new(LocalHostPlugin::new(tmp.path())));
    (tmp, fs)
}

fn bench_write_read(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let data_1k = vec![b'A'; 1024];
    let data_1m = vec![b'C'; 1024 * 1024];
    let text_1k = "x".repeat(1024);

    c.bench_function("fila_text_write_read_1kb_x100", |b| {
        let (_tmp, fs) = make_fs();
        b.iter(|| {
            rt.block_on(async {
                for i in 0..100 {
                    let f = fs.fila(format!("documents/bench/file_{i}.txt"));
                    f.write_text(&text_1k, WriteTextOptions::default()).await.unwrap();
                    black_box(f.read_text().await.unwrap());
                }
            })
        })
    });

    c.bench_function("fila_binary_write_read_1kb_x100", |b| {
        let (_tmp, fs) = make_fs();
        b.iter(|| {
            rt.block_on(async {
                for i in 0..100 {
                    let f = fs.fila(format!("cache/bench/file_{i}.bin"));
                    f.write_binary(&data_1k).await.unwrap();
                    black_box(f.read_binary().await.unwrap());
                }
            })
        })
    });

    c.bench_function("fila_binary_write_read_1mb_x10", |b| {
        let (_tmp, fs) = make_fs();
        b.iter(|| {
            rt.block_on(async {
                for i in 0..10 {
                    let f = fs.fila(format!("data/bench/file_{i}.bin"));
                    f.write_binary(&data_1m).await.unwrap();
                    black_box(f.read_binary().await.unwrap());
                }
            })
        })
    });
}

fn bench_stat(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (_tmp, fs) = make_fs();
    let f = fs.fila("data/stat.txt");
    rt.block_on(f.write_text("s", WriteTextOptions::default())).unwrap();
    let ghost = fs.fila("data/ghost.txt");

    c.bench_function("fila_exists_hit_and_miss_x1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..1000 {
                    black_box(f.exists().await.unwrap());
                    black_box(ghost.exists().await.unwrap());
                }
            })
        })
    });
}

criterion_group!(benches, bench_write_read, bench_stat);
criterion_main!(benches);
