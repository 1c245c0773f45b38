//! Performance benchmarks for pkgcache

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pkgcache::cache::Cache;
use pkgcache::core::checksum::hash_reader;
use pkgcache::package::{ArchiveIntegrityChecker, DirectoryManifestVerifier};
use pkgcache::resource::DownloadResource;
use pkgcache::{Checksum, HashAlgorithm};
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn benchmark_checksum_parsing(c: &mut Criterion) {
    c.bench_function("parse_checksum", |b| {
        b.iter(|| {
            Checksum::parse(black_box(
                "SHA-256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ))
            .unwrap();
        })
    });
}

fn benchmark_hash_algorithms(c: &mut Criterion) {
    let data = vec![0xa5u8; 1024 * 1024];

    for algorithm in HashAlgorithm::ALL {
        c.bench_function(&format!("hash_1mib_{}", algorithm), |b| {
            b.iter(|| {
                let mut hasher = algorithm.hasher();
                hash_reader(hasher.as_mut(), &mut Cursor::new(black_box(&data))).unwrap();
                hasher.finalize()
            })
        });
    }
}

fn benchmark_verify_integrity(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let cache = Cache::new(temp.path().to_path_buf()).unwrap();
    let mut resource = DownloadResource {
        url: "https://example.com/bench.tar.gz".to_string(),
        archive_file_name: "bench.tar.gz".to_string(),
        checksum: String::new(),
        size: 0,
        cache_path: "packages".to_string(),
    };
    let path = cache.archive_path(&resource).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, vec![0x5au8; 4 * 1024 * 1024]).unwrap();
    resource.size = 4 * 1024 * 1024;
    resource.checksum = Checksum::of_file(HashAlgorithm::Sha256, &path)
        .unwrap()
        .to_string();

    let archive = cache.locate(&resource);
    c.bench_function("verify_integrity_4mib", |b| {
        b.iter(|| ArchiveIntegrityChecker::new(black_box(&archive)).verify_integrity().unwrap())
    });
}

fn benchmark_tree_digest(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    for dir in 0..10 {
        let sub = temp.path().join(format!("dir-{}", dir));
        fs::create_dir_all(&sub).unwrap();
        for file in 0..50 {
            fs::write(sub.join(format!("file-{}.h", file)), vec![b'x'; 2048]).unwrap();
        }
    }

    let verifier = DirectoryManifestVerifier::default();
    c.bench_function("tree_digest_500_files", |b| {
        b.iter(|| verifier.compute_tree_digest(black_box(temp.path())).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_checksum_parsing,
    benchmark_hash_algorithms,
    benchmark_verify_integrity,
    benchmark_tree_digest
);
criterion_main!(benches);
