use criterion::*;
use fdkit::utils::human_readable_size;
use fdkit::Md5;

fn bench_md5_hash(c: &mut Criterion, size: usize) {
    let data = vec![0u8; size];

    let test_name = format!("{} md5 hash {}", std::env::consts::ARCH, human_readable_size(size as u64));
    c.bench_function(&test_name, |b| b.iter(|| {
        std::hint::black_box(fdkit::digest(&data).unwrap());
    }));
}

fn bench_md5_incremental(c: &mut Criterion, size: usize) {
    let data = vec![0u8; size];

    let test_name = format!("{} md5 incremental {}", std::env::consts::ARCH, human_readable_size(size as u64));
    c.bench_function(&test_name, |b| b.iter(|| {
        let mut md5 = Md5::new();
        md5.update(&data).unwrap();
        std::hint::black_box(md5.finalize());
    }));
}

fn bench_crate_md5_hash(c: &mut Criterion, size: usize) {
    let data = vec![0u8; size];

    let test_name = format!("{} crate md5 hash {}", std::env::consts::ARCH, human_readable_size(size as u64));
    c.bench_function(&test_name, |b| b.iter(|| {
        std::hint::black_box(md5::compute(&data));
    }));
}

fn bench_md5(c: &mut Criterion) {
    for size in [16, 64, 256, 1024, 8192, 65536] {
        bench_md5_hash(c, size);
        bench_md5_incremental(c, size);
        bench_crate_md5_hash(c, size);
    }
}

criterion_group!(benches, bench_md5);
criterion_main!(benches);
