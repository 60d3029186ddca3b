//! Criterion benchmarks for identifier conversion

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathkey_identifier::{
    parse_lambda, to_identifier_string, to_identifier_string_bound, Bindings, ConversionOptions,
    StaticMemberConversion,
};
use std::time::Duration;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(100))
        .measurement_time(Duration::from_secs(1))
}

fn bench_member_chain(c: &mut Criterion) {
    let expr = parse_lambda("x => x.Customer.Address.Street.Name").unwrap();

    c.bench_function("member_chain", |b| {
        b.iter(|| to_identifier_string(black_box(&expr), None).unwrap())
    });
}

fn bench_indexed_chain(c: &mut Criterion) {
    let expr = parse_lambda("x => x.Orders[3].Lines[(page - 1) * size].Product.Sku").unwrap();
    let bindings = Bindings::new().bind("page", 4).bind("size", 25);

    c.bench_function("indexed_chain", |b| {
        b.iter(|| to_identifier_string_bound(black_box(&expr), None, &bindings).unwrap())
    });
}

fn bench_static_member(c: &mut Criterion) {
    let expr = parse_lambda("x => Company.Settings.Defaults::Culture").unwrap();
    let options = ConversionOptions::default()
        .with_static_member_conversion(StaticMemberConversion::ParentTypeFullName);

    c.bench_function("static_member", |b| {
        b.iter(|| to_identifier_string(black_box(&expr), Some(&options)).unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_lambda", |b| {
        b.iter(|| parse_lambda(black_box("x => x.Orders[3].Lines[i].Product.Sku")).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = bench_member_chain, bench_indexed_chain, bench_static_member, bench_parse
}
criterion_main!(benches);
