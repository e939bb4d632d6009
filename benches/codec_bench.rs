use criterion::{black_box, criterion_group, criterion_main, Criterion};

use didcodec::prelude::*;

const STATUS: &[u8] = &[0xd2, 0x04, 0x01, 0x07, 0x2a, 0x00, 0x00, 0x00];

const HISTORY: &[u8] = &[
    0x04, 0x11, 0x01, 0x12, 0x00, 0x13, 0x01, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00,
];

fn status_codec() -> Record {
    Record::new(
        "Status",
        8,
        vec![
            ScaledInteger::new("Temperature", 2, 2, Scaling::default().scale(10.0).signed(true))
                .unwrap()
                .into(),
            Boolean::new("Pump", 1, 0).unwrap().into(),
            Byte::new("Level", 1, 0).unwrap().into(),
            Byte::new("Hours", 4, 0).unwrap().into(),
        ],
    )
    .unwrap()
}

fn history_codec() -> List {
    let entry = Record::new(
        "Entries",
        2,
        vec![
            Byte::new("Code", 1, 0).unwrap().into(),
            Boolean::new("Active", 1, 0).unwrap().into(),
        ],
    )
    .unwrap();
    List::new("History", 13, vec![Byte::new("Count", 1, 0).unwrap().into(), entry.into()]).unwrap()
}

fn record_bench(c: &mut Criterion) {
    let codec = status_codec();
    c.bench_function("record_decode", |b| b.iter(|| codec.decode(black_box(STATUS)).unwrap()));
}

fn list_bench(c: &mut Criterion) {
    let codec = history_codec();
    c.bench_function("list_decode", |b| b.iter(|| codec.decode(black_box(HISTORY)).unwrap()));

    let value = codec.decode(HISTORY).unwrap();
    c.bench_function("list_encode", |b| b.iter(|| codec.encode(black_box(&value)).unwrap()));
}

criterion_group! {
    name = codec_benches;
    config = Criterion::default();
    targets = record_bench, list_bench
}

criterion_main!(codec_benches);
