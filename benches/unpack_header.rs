use bytepack::format::Format;
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_buffer(len: usize) -> Vec<u8> {
    // Deterministic but non-trivial pattern
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}

fn bench_unpack(c: &mut Criterion) {
    for &count in &[1usize, 10, 50, 100] {
        let format = Format::compile(&format!("<{count}I")).unwrap();
        let buffer = gen_buffer(format.byte_len().unwrap());

        c.bench_function(&format!("unpack_{count}_fields"), |b| {
            b.iter(|| {
                let _ = format.unpack(&buffer).unwrap();
            })
        });
    }

    let header = Format::compile("<cc8xi4xii2xhii").unwrap();
    let buffer = gen_buffer(54);
    c.bench_function("unpack_bmp_header", |b| {
        b.iter(|| {
            let _ = header.unpack(&buffer).unwrap();
        })
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_bmp_header", |b| {
        b.iter(|| {
            let _ = Format::compile("<cc8xi4xii2xhii").unwrap();
        })
    });
}

criterion_group!(benches, bench_unpack, bench_compile);
criterion_main!(benches);
